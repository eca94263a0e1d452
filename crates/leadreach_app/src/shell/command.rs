//! Typed shell commands and their parsing.

use anyhow::{anyhow, bail};
use leadreach_core::{ConfigEdit, GenerationMode, MessageType, PersonalizationLevel, Tone};

/// A lead named on the command line: a 1-based row in the list currently
/// shown, or an explicit id (`id:<value>`, `id:"<value>"` or any non-numeric
/// token).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadRef {
    Row(usize),
    Id(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Industry(String),
    Location(String),
    Search,
    Select(Vec<LeadRef>),
    SelectAll(bool),
    Export,
    Outreach,
    Back,
    Filter(String),
    Mode(GenerationMode),
    Pick(LeadRef),
    Toggle(Vec<LeadRef>),
    PickFiltered(bool),
    Set(ConfigEdit),
    Generate,
    Clear,
    Save,
    Health,
    Show,
    Detail,
    Help,
    Quit,
}

pub const HELP: &str = "\
Leads view
  industry <text>          set the industry filter
  location <text>          set the location filter
  search                   find leads for industry + location
  select <n|id:..>...      toggle leads by row number or id (id:\"a, b\" quotes)
  select all | none        select or clear every lead
  export                   export the selected leads as CSV
  outreach                 open the outreach view with the selection

Outreach view
  filter [text]            narrow the lead picker (empty clears)
  mode single | bulk       choose the generation mode
  pick <n|id:..>           single mode: choose the target lead
  toggle <n|id:..>...      bulk mode: toggle target leads
  pick all | none          bulk mode: add or remove every filtered lead
  set type <cold_email|linkedin_message|cold_call_script>
  set tone <professional|friendly|casual|urgent>
  set level <low|medium|high>
  set role|company|value|sender <text>
  generate                 generate with the current configuration
  clear                    clear the generated text
  save                     save the generated text to the export directory
  back                     return to the leads view

Anywhere
  health | show | detail | help | quit";

/// Parses one input line. Blank lines are rejected by the caller.
pub fn parse(line: &str) -> anyhow::Result<Command> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "industry" => Command::Industry(rest.to_owned()),
        "location" => Command::Location(rest.to_owned()),
        "search" | "find" => Command::Search,
        "select" => match rest {
            "all" => Command::SelectAll(true),
            "none" => Command::SelectAll(false),
            _ => Command::Select(lead_refs(rest)?),
        },
        "export" => Command::Export,
        "outreach" => Command::Outreach,
        "back" => Command::Back,
        "filter" => Command::Filter(rest.to_owned()),
        "mode" => Command::Mode(match rest.to_ascii_lowercase().as_str() {
            "single" => GenerationMode::Single,
            "bulk" => GenerationMode::Bulk,
            other => bail!("unknown mode {other:?}, expected single or bulk"),
        }),
        "pick" => match rest {
            "all" => Command::PickFiltered(true),
            "none" => Command::PickFiltered(false),
            _ => {
                let mut refs = lead_refs(rest)?;
                if refs.len() != 1 {
                    bail!("pick takes exactly one lead");
                }
                Command::Pick(refs.remove(0))
            }
        },
        "toggle" => Command::Toggle(lead_refs(rest)?),
        "set" => Command::Set(config_edit(rest)?),
        "generate" | "gen" => Command::Generate,
        "clear" => Command::Clear,
        "save" => Command::Save,
        "health" => Command::Health,
        "show" | "ls" => Command::Show,
        "detail" => Command::Detail,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "/quit" | "/exit" => Command::Quit,
        other => bail!("unknown command {other:?}; type help"),
    };
    Ok(command)
}

fn lead_refs(rest: &str) -> anyhow::Result<Vec<LeadRef>> {
    let mut refs = Vec::new();
    let mut remaining = rest;
    loop {
        remaining = remaining.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
        if remaining.is_empty() {
            break;
        }
        // `id:"..."` keeps commas and spaces inside the id.
        if let Some(quoted) = remaining.strip_prefix("id:\"") {
            let (id, after) = quoted
                .split_once('"')
                .ok_or_else(|| anyhow!("unterminated quoted id"))?;
            if id.is_empty() {
                bail!("empty lead id");
            }
            refs.push(LeadRef::Id(id.to_owned()));
            remaining = after;
            continue;
        }
        let end = remaining
            .find(|c: char| c.is_whitespace() || c == ',')
            .unwrap_or(remaining.len());
        refs.push(lead_ref(&remaining[..end])?);
        remaining = &remaining[end..];
    }
    if refs.is_empty() {
        bail!("name at least one lead by row number or id:<id>");
    }
    Ok(refs)
}

fn lead_ref(token: &str) -> anyhow::Result<LeadRef> {
    if let Some(id) = token.strip_prefix("id:") {
        if id.is_empty() {
            bail!("empty lead id");
        }
        return Ok(LeadRef::Id(id.to_owned()));
    }
    match token.parse::<usize>() {
        Ok(0) => bail!("rows are numbered from 1"),
        Ok(row) => Ok(LeadRef::Row(row)),
        Err(_) => Ok(LeadRef::Id(token.to_owned())),
    }
}

fn config_edit(rest: &str) -> anyhow::Result<ConfigEdit> {
    let (key, value) = match rest.split_once(char::is_whitespace) {
        Some((key, value)) => (key, value.trim()),
        None => (rest, ""),
    };
    let edit = match key.to_ascii_lowercase().as_str() {
        "type" => ConfigEdit::MessageType(
            MessageType::from_wire(value).ok_or_else(|| anyhow!("unknown message type {value:?}"))?,
        ),
        "tone" => ConfigEdit::Tone(
            Tone::from_wire(value).ok_or_else(|| anyhow!("unknown tone {value:?}"))?,
        ),
        "level" => ConfigEdit::PersonalizationLevel(
            PersonalizationLevel::from_wire(value)
                .ok_or_else(|| anyhow!("unknown personalization level {value:?}"))?,
        ),
        "role" => ConfigEdit::TargetRole(value.to_owned()),
        "company" => ConfigEdit::CompanyDescription(value.to_owned()),
        "value" => ConfigEdit::ValueProposition(value.to_owned()),
        "sender" => ConfigEdit::SenderName(value.to_owned()),
        "" => bail!("set needs a field: type, tone, level, role, company, value or sender"),
        other => bail!("unknown field {other:?}"),
    };
    Ok(edit)
}
