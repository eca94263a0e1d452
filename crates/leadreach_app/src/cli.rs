use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use leadreach_engine::{ClientSettings, EngineConfig, DEFAULT_BASE_URL};
use leadreach_logging::{LogDestination, DEFAULT_LOG_FILE};
use log::LevelFilter;

/// Find B2B leads and draft outreach from the terminal.
#[derive(Parser, Debug)]
#[command(name = "leadreach", version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the lead/outreach backend.
    #[arg(long, env = "LEADREACH_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Directory that receives exported CSVs and saved messages.
    #[arg(long, default_value = "./exports")]
    pub export_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    pub log: LogTarget,

    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Per-request timeout in seconds. Generation can take a while.
    #[arg(long, default_value_t = 60)]
    pub timeout_secs: u64,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    pub fn engine_config(&self) -> anyhow::Result<EngineConfig> {
        let mut config = EngineConfig::default_with_export_dir(self.export_dir.clone());
        config.client = ClientSettings {
            request_timeout: Duration::from_secs(self.timeout_secs.max(1)),
            ..ClientSettings::with_base_url(&self.api_url)
                .with_context(|| format!("invalid --api-url {:?}", self.api_url))?
        };
        Ok(config)
    }
}
