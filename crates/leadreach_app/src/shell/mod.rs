//! Interactive terminal front end.
//!
//! A reader thread turns input lines into [`ShellEvent`]s, the engine sink
//! turns completions into [`ShellEvent`]s, and the main loop feeds both
//! through `update`, re-rendering whenever the state reports itself dirty.

mod command;
mod effects;
mod render;

use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::{anyhow, bail, Context};
use colored::Colorize;
use leadreach_core::{
    update, AppState, AppViewModel, Effect, LeadId, Msg, RequestId, ScreenKind,
};
use leadreach_engine::{outreach_filename, AtomicFileWriter};
use leadreach_logging::{reach_debug, reach_info};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::cli::Cli;
use command::{Command, LeadRef, HELP};
use effects::EffectRunner;

/// Everything the main loop reacts to.
pub enum ShellEvent {
    Line(String),
    Msg(Msg),
    Closed,
    ReaderFailed(String),
}

pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.engine_config()?;
    let mut shell = Shell::new(config.export_dir.clone());
    reach_info!(
        "starting shell api_url={} export_dir={:?}",
        config.client.base_url,
        config.export_dir
    );

    let (event_tx, event_rx) = mpsc::channel();
    let runner = EffectRunner::new(config, event_tx.clone())?;
    let (ack_tx, ack_rx) = mpsc::channel();
    spawn_reader(event_tx, ack_rx);

    println!("{}", "leadreach".bold().green());
    println!("Type {} for commands, {} to exit.\n", "help".yellow(), "quit".yellow());
    runner.enqueue(shell.dispatch(Msg::HealthCheckRequested));

    for event in event_rx {
        match event {
            ShellEvent::Line(line) => {
                let step = shell.handle_line(&line);
                runner.enqueue(step.effects);
                let _ = ack_tx.send(());
                if step.quit {
                    break;
                }
            }
            ShellEvent::Msg(msg) => runner.enqueue(shell.dispatch(msg)),
            ShellEvent::Closed => break,
            ShellEvent::ReaderFailed(err) => bail!("failed to initialize readline: {err}"),
        }
    }
    reach_info!("shell closed");
    Ok(())
}

/// Reads lines on its own thread. After each line it waits for the main loop
/// to acknowledge before prompting again, so output and prompt do not race.
fn spawn_reader(events: mpsc::Sender<ShellEvent>, ack: mpsc::Receiver<()>) {
    thread::spawn(move || {
        let mut editor = match DefaultEditor::new() {
            Ok(editor) => editor,
            Err(err) => {
                let _ = events.send(ShellEvent::ReaderFailed(err.to_string()));
                return;
            }
        };
        let prompt = format!("{}> ", "leadreach".green());
        loop {
            match editor.readline(&prompt) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let _ = editor.add_history_entry(line.as_str());
                    if events.send(ShellEvent::Line(line)).is_err() || ack.recv().is_err() {
                        return;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    let _ = events.send(ShellEvent::Closed);
                    return;
                }
                Err(err) => {
                    eprintln!("{}: {err}", "error".red());
                    let _ = events.send(ShellEvent::Closed);
                    return;
                }
            }
        }
    });
}

/// Result of handling one line: effects to run and whether to stop.
#[derive(Debug, Default)]
pub struct Step {
    pub effects: Vec<Effect>,
    pub quit: bool,
}

pub struct Shell {
    state: AppState,
    writer: AtomicFileWriter,
}

impl Shell {
    pub fn new(export_dir: PathBuf) -> Self {
        Self {
            state: AppState::new(),
            writer: AtomicFileWriter::new(export_dir),
        }
    }

    /// Runs `msg` through `update` and prints the view when it changed.
    pub fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let completion = completion_id(&msg);
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let dirty = state.consume_dirty();
        self.state = state;
        if let (Some(request_id), false) = (completion, dirty) {
            reach_debug!("discarded stale completion for request {}", request_id);
        }
        if dirty {
            print!("{}", render::render(&self.state.view()));
        }
        effects
    }

    pub fn handle_line(&mut self, line: &str) -> Step {
        match command::parse(line).and_then(|command| self.handle_command(command)) {
            Ok(step) => step,
            Err(err) => {
                println!("{}", err.to_string().yellow());
                Step::default()
            }
        }
    }

    fn handle_command(&mut self, command: Command) -> anyhow::Result<Step> {
        let view = self.state.view();
        match command {
            Command::Quit => {
                return Ok(Step {
                    effects: Vec::new(),
                    quit: true,
                })
            }
            Command::Help => println!("{HELP}"),
            Command::Show => print!("{}", render::render(&view)),
            Command::Detail => println!("{}", error_detail(&view)?),
            Command::Save => {
                let path = self.save_output(&view)?;
                println!("{}", format!("Saved to {}", path.display()).green());
            }
            command => {
                if let Some(reason) = blocked_reason(&command, &view) {
                    bail!(reason);
                }
                let mut effects = Vec::new();
                for msg in to_msgs(command, &view)? {
                    effects.extend(self.dispatch(msg));
                }
                return Ok(Step {
                    effects,
                    quit: false,
                });
            }
        }
        Ok(Step::default())
    }

    fn save_output(&self, view: &AppViewModel) -> anyhow::Result<PathBuf> {
        let output = view
            .outreach
            .as_ref()
            .and_then(|outreach| outreach.output.as_deref())
            .context("nothing to save yet; generate a message first")?;
        let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let path = self
            .writer
            .write_text(&outreach_filename(&stamp), output)
            .context("could not save the generated text")?;
        reach_info!("saved generated text to {:?}", path);
        Ok(path)
    }
}

fn completion_id(msg: &Msg) -> Option<RequestId> {
    match msg {
        Msg::SearchCompleted { request_id, .. }
        | Msg::ExportCompleted { request_id, .. }
        | Msg::GenerationCompleted { request_id, .. }
        | Msg::HealthChecked { request_id, .. } => Some(*request_id),
        _ => None,
    }
}

fn error_detail(view: &AppViewModel) -> anyhow::Result<String> {
    let detail = match (view.screen, &view.outreach) {
        (ScreenKind::Outreach, Some(outreach)) => outreach.error_detail.as_ref(),
        _ => view.leads.error_detail.as_ref(),
    };
    detail
        .map(|detail| detail.render())
        .ok_or_else(|| anyhow!("no server response to show"))
}

fn required_screen(command: &Command) -> Option<ScreenKind> {
    match command {
        Command::Industry(_)
        | Command::Location(_)
        | Command::Search
        | Command::Select(_)
        | Command::SelectAll(_)
        | Command::Export
        | Command::Outreach => Some(ScreenKind::Leads),
        Command::Filter(_)
        | Command::Mode(_)
        | Command::Pick(_)
        | Command::Toggle(_)
        | Command::PickFiltered(_)
        | Command::Set(_)
        | Command::Generate
        | Command::Clear
        | Command::Back => Some(ScreenKind::Outreach),
        _ => None,
    }
}

/// Explains why a command would do nothing in the current view.
fn blocked_reason(command: &Command, view: &AppViewModel) -> Option<String> {
    match required_screen(command) {
        Some(ScreenKind::Leads) if view.screen != ScreenKind::Leads => {
            return Some("only available in the leads view; type `back` first".into())
        }
        Some(ScreenKind::Outreach) if view.screen != ScreenKind::Outreach => {
            return Some("only available in the outreach view; type `outreach` first".into())
        }
        _ => {}
    }
    let leads = &view.leads;
    match command {
        Command::Search if leads.searching => Some("a search is already running".into()),
        Command::Search if !leads.can_search => {
            Some("set both industry and location before searching".into())
        }
        Command::Export if leads.exporting => Some("an export is already running".into()),
        Command::Export if leads.selected_count == 0 => {
            Some("select at least one lead to export".into())
        }
        Command::Generate => {
            let outreach = view.outreach.as_ref()?;
            if outreach.generating {
                Some("generation already in progress".into())
            } else if !outreach.missing_fields.is_empty() {
                let missing: Vec<_> = outreach.missing_fields.iter().map(|f| f.label()).collect();
                Some(format!("fill in: {}", missing.join(", ")))
            } else if !outreach.can_generate {
                Some("pick a target lead first".into())
            } else {
                None
            }
        }
        _ => None,
    }
}

fn lead_id(lead: &LeadRef, view: &AppViewModel) -> anyhow::Result<LeadId> {
    match lead {
        LeadRef::Id(id) => Ok(id.clone()),
        LeadRef::Row(row) => {
            let ids: Vec<&LeadId> = match (view.screen, &view.outreach) {
                (ScreenKind::Outreach, Some(outreach)) => {
                    outreach.rows.iter().map(|r| &r.lead.id).collect()
                }
                _ => view.leads.rows.iter().map(|r| &r.lead.id).collect(),
            };
            row.checked_sub(1)
                .and_then(|index| ids.get(index))
                .map(|id| (*id).clone())
                .ok_or_else(|| anyhow!("no row {row}; {} shown", ids.len()))
        }
    }
}

fn to_msgs(command: Command, view: &AppViewModel) -> anyhow::Result<Vec<Msg>> {
    let msgs = match command {
        Command::Industry(text) => vec![Msg::IndustryChanged(text)],
        Command::Location(text) => vec![Msg::LocationChanged(text)],
        Command::Search => vec![Msg::SearchClicked],
        Command::Select(refs) => refs
            .iter()
            .map(|lead| lead_id(lead, view).map(Msg::LeadToggled))
            .collect::<anyhow::Result<Vec<_>>>()?,
        Command::SelectAll(on) => vec![Msg::SelectAllToggled(on)],
        Command::Export => vec![Msg::ExportClicked],
        Command::Outreach => vec![Msg::OpenOutreachClicked],
        Command::Back => vec![Msg::BackClicked],
        Command::Filter(term) => vec![Msg::LeadFilterChanged(term)],
        Command::Mode(mode) => vec![Msg::GenerationModeChanged(mode)],
        Command::Pick(lead) => vec![Msg::SingleLeadPicked(lead_id(&lead, view)?)],
        Command::Toggle(refs) => refs
            .iter()
            .map(|lead| lead_id(lead, view).map(Msg::BulkLeadToggled))
            .collect::<anyhow::Result<Vec<_>>>()?,
        Command::PickFiltered(on) => vec![Msg::BulkFilteredToggled(on)],
        Command::Set(edit) => vec![Msg::ConfigEdited(edit)],
        Command::Generate => vec![Msg::GenerateClicked],
        Command::Clear => vec![Msg::ClearOutputClicked],
        Command::Health => vec![Msg::HealthCheckRequested],
        Command::Save | Command::Show | Command::Detail | Command::Help | Command::Quit => {
            Vec::new()
        }
    };
    Ok(msgs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadreach_core::{
        GenerationResult, Lead, Priority, SearchOutcome, SearchQuery, SingleMessage,
    };
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn lead(id: &str, company: &str) -> Lead {
        Lead {
            id: id.into(),
            company: company.into(),
            industry: "Technology".into(),
            location: "Boston".into(),
            website: None,
            linkedin_url: None,
            contact: None,
            employees: None,
            priority: Priority::Low,
            outreach_angle: None,
            last_updated: "2024-05-01".into(),
        }
    }

    fn shell_with_leads(dir: &TempDir) -> Shell {
        let mut shell = Shell::new(dir.path().to_path_buf());
        shell.handle_line("industry Technology");
        shell.handle_line("location Boston");
        let step = shell.handle_line("search");
        assert_eq!(
            step.effects,
            vec![Effect::SearchLeads {
                request_id: 1,
                query: SearchQuery::new("Technology", "Boston"),
            }]
        );
        shell.dispatch(Msg::SearchCompleted {
            request_id: 1,
            result: Ok(SearchOutcome {
                leads: vec![lead("a", "Acme"), lead("b", "Globex"), lead("c", "Initech")],
                total: 3,
            }),
        });
        shell
    }

    #[test]
    fn rows_resolve_to_ids_in_view_order() {
        let dir = TempDir::new().unwrap();
        let mut shell = shell_with_leads(&dir);

        shell.handle_line("select 3 1");
        let selected: Vec<_> = shell
            .state
            .view()
            .leads
            .rows
            .iter()
            .filter(|row| row.selected)
            .map(|row| row.lead.id.clone())
            .collect();
        assert_eq!(selected, vec!["a".to_string(), "c".to_string()]);

        let step = shell.handle_line("export");
        match step.effects.as_slice() {
            [Effect::ExportLeads { leads, .. }] => {
                let ids: Vec<_> = leads.iter().map(|l| l.id.as_str()).collect();
                assert_eq!(ids, vec!["a", "c"]);
            }
            other => panic!("unexpected effects {other:?}"),
        }
    }

    #[test]
    fn out_of_range_row_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut shell = shell_with_leads(&dir);
        let before = shell.state.view();

        let step = shell.handle_line("select 9");

        assert!(step.effects.is_empty());
        assert_eq!(shell.state.view().leads, before.leads);
    }

    #[test]
    fn search_without_location_emits_nothing() {
        let dir = TempDir::new().unwrap();
        let mut shell = Shell::new(dir.path().to_path_buf());
        shell.handle_line("industry Technology");

        assert!(shell.handle_line("search").effects.is_empty());
    }

    #[test]
    fn outreach_commands_need_outreach_view() {
        let dir = TempDir::new().unwrap();
        let mut shell = shell_with_leads(&dir);

        shell.handle_line("set tone friendly");
        assert_eq!(shell.state.view().outreach, None);

        shell.handle_line("select all");
        shell.handle_line("outreach");
        shell.handle_line("set tone friendly");
        let outreach = shell.state.view().outreach.unwrap();
        assert_eq!(outreach.config.tone, Some(leadreach_core::Tone::Friendly));
        assert_eq!(outreach.available_count, 3);
    }

    #[test]
    fn generate_then_save_writes_output() {
        let dir = TempDir::new().unwrap();
        let mut shell = shell_with_leads(&dir);
        for line in [
            "select 2",
            "outreach",
            "pick 1",
            "set tone professional",
            "set level medium",
            "set role CTO",
            "set company We build bots",
            "set value Fewer tickets",
            "set sender Sam",
        ] {
            shell.handle_line(line);
        }

        let step = shell.handle_line("generate");
        let [Effect::GenerateSingle { request_id, lead, .. }] = step.effects.as_slice() else {
            panic!("expected a single generation, got {:?}", step.effects);
        };
        assert_eq!(lead.id, "b");
        shell.dispatch(Msg::GenerationCompleted {
            request_id: *request_id,
            result: Ok(GenerationResult::Single(SingleMessage::Content(
                "Hi Globex team".into(),
            ))),
        });

        assert!(shell.handle_line("save").effects.is_empty());
        let saved: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(saved.len(), 1);
        assert_eq!(std::fs::read_to_string(&saved[0]).unwrap(), "Hi Globex team");
    }

    #[test]
    fn quit_stops_the_loop() {
        let dir = TempDir::new().unwrap();
        let mut shell = Shell::new(dir.path().to_path_buf());
        assert!(shell.handle_line("quit").quit);
        assert!(!shell.handle_line("help").quit);
    }
}
