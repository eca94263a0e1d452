mod cli;
mod shell;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    leadreach_logging::initialize(cli.log.into(), cli.log_level(), &cli.log_file);
    shell::run(&cli)
}
