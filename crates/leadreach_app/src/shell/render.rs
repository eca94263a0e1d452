//! Plain-text rendering of the view-model.

use std::fmt::Write;

use colored::Colorize;
use leadreach_core::{
    AppViewModel, BackendStatus, GenerationMode, Lead, LeadsViewModel, OutreachConfig,
    OutreachViewModel, ScreenKind, SelectionState,
};

pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", backend_line(&view.backend).dimmed());
    match (view.screen, &view.outreach) {
        (ScreenKind::Outreach, Some(outreach)) => render_outreach(&mut out, outreach),
        _ => render_leads(&mut out, &view.leads),
    }
    out
}

pub fn backend_line(status: &BackendStatus) -> String {
    match status {
        BackendStatus::Unknown => "backend: unknown".to_owned(),
        BackendStatus::Checking => "backend: checking...".to_owned(),
        BackendStatus::Connected(report) => format!(
            "backend: {} (apollo api {})",
            report.status, report.apollo_api
        ),
        BackendStatus::Unreachable(message) => format!("backend: unreachable ({message})"),
    }
}

fn checkbox(state: SelectionState) -> &'static str {
    match state {
        SelectionState::None => "[ ]",
        SelectionState::Some => "[-]",
        SelectionState::All => "[x]",
    }
}

fn mark(on: bool) -> &'static str {
    if on {
        "[x]"
    } else {
        "[ ]"
    }
}

fn lead_line(lead: &Lead) -> String {
    let mut line = format!(
        "{} | {} | {} | {}",
        lead.company, lead.industry, lead.location, lead.priority
    );
    if let Some(contact) = &lead.contact {
        let _ = write!(line, " | {contact}");
    }
    if let Some(website) = &lead.website {
        let _ = write!(line, " | {website}");
    }
    line
}

fn render_leads(out: &mut String, leads: &LeadsViewModel) {
    let _ = writeln!(
        out,
        "{}  industry: {:?}  location: {:?}",
        "LEADS".bold(),
        leads.industry,
        leads.location
    );
    if leads.rows.is_empty() {
        let _ = writeln!(out, "  (no leads yet)");
    } else {
        let _ = writeln!(
            out,
            "  {} {} of {} selected",
            checkbox(leads.selection_state),
            leads.selected_count,
            leads.rows.len()
        );
        for (index, row) in leads.rows.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {} {:>2}. {}",
                mark(row.selected),
                index + 1,
                lead_line(&row.lead)
            );
        }
    }
    if leads.searching {
        let _ = writeln!(out, "  Searching...");
    }
    if leads.exporting {
        let _ = writeln!(out, "  Exporting...");
    }
    if let Some(message) = &leads.success_message {
        let _ = writeln!(out, "{}", message.green());
    }
    if let Some(path) = &leads.last_export_path {
        let _ = writeln!(out, "  saved to {path}");
    }
    if let Some(message) = &leads.error_message {
        let _ = writeln!(out, "{}", format!("Error: {message}").red());
        if leads.error_detail.is_some() {
            let _ = writeln!(out, "  (type `detail` for the server response)");
        }
    }
}

fn render_outreach(out: &mut String, outreach: &OutreachViewModel) {
    let mode = match outreach.mode {
        GenerationMode::Single => "single",
        GenerationMode::Bulk => "bulk",
    };
    let _ = writeln!(
        out,
        "{}  {} leads  mode: {}  filter: {:?}",
        "OUTREACH".bold(),
        outreach.available_count,
        mode,
        outreach.filter_term
    );
    if outreach.rows.is_empty() {
        let _ = writeln!(out, "  (no leads match)");
    }
    for (index, row) in outreach.rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {} {:>2}. {}",
            mark(row.picked),
            index + 1,
            lead_line(&row.lead)
        );
    }
    match outreach.mode {
        GenerationMode::Single => {
            let target = outreach
                .single_pick
                .as_ref()
                .map_or("none", |lead| lead.company.as_str());
            let _ = writeln!(out, "  target: {target}");
        }
        GenerationMode::Bulk => {
            let _ = writeln!(out, "  targets: {}", outreach.bulk_count);
        }
    }
    render_config(out, &outreach.config);
    if !outreach.missing_fields.is_empty() {
        let missing: Vec<_> = outreach.missing_fields.iter().map(|f| f.label()).collect();
        let _ = writeln!(out, "  missing: {}", missing.join(", "));
    }
    let generate = if outreach.generating {
        "Generating..."
    } else if outreach.can_generate {
        "ready to generate"
    } else {
        "not ready"
    };
    let _ = writeln!(out, "  {generate}");
    if let Some(output) = &outreach.output {
        let _ = writeln!(out, "{}", "-- result --".bold());
        let _ = writeln!(out, "{output}");
        if let Some(detail) = &outreach.error_detail {
            let _ = writeln!(out, "{}", detail.render().dimmed());
        }
    }
}

fn render_config(out: &mut String, config: &OutreachConfig) {
    let unset = "(unset)";
    let _ = writeln!(out, "  type:    {}", config.message_type.label());
    let _ = writeln!(
        out,
        "  tone:    {}",
        config.tone.map_or(unset, |tone| tone.as_wire())
    );
    let _ = writeln!(
        out,
        "  level:   {}",
        config
            .personalization_level
            .map_or(unset, |level| level.as_wire())
    );
    for (label, value) in [
        ("role:   ", &config.target_role),
        ("company:", &config.company_description),
        ("value:  ", &config.value_proposition),
        ("sender: ", &config.sender_name),
    ] {
        let shown = if value.trim().is_empty() { unset } else { value.as_str() };
        let _ = writeln!(out, "  {label} {shown}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadreach_core::{
        update, AppState, ConfigEdit, HealthReport, Msg, Priority, RequestFailure, FailureKind,
        ErrorDetail, SearchOutcome, Tone,
    };

    fn lead(id: &str, company: &str) -> Lead {
        Lead {
            id: id.into(),
            company: company.into(),
            industry: "Technology".into(),
            location: "New York".into(),
            website: None,
            linkedin_url: None,
            contact: Some("Jane Doe".into()),
            employees: None,
            priority: Priority::High,
            outreach_angle: None,
            last_updated: "2024-05-01".into(),
        }
    }

    fn searched() -> AppState {
        let mut state = AppState::new();
        for msg in [
            Msg::IndustryChanged("Technology".into()),
            Msg::LocationChanged("New York".into()),
            Msg::SearchClicked,
        ] {
            state = update(state, msg).0;
        }
        let (state, _) = update(
            state,
            Msg::SearchCompleted {
                request_id: 1,
                result: Ok(SearchOutcome {
                    leads: vec![lead("1", "Acme"), lead("2", "Globex")],
                    total: 2,
                }),
            },
        );
        state
    }

    #[test]
    fn leads_screen_shows_rows_and_tri_state() {
        colored::control::set_override(false);
        let (state, _) = update(searched(), Msg::LeadToggled("2".into()));

        let text = render(&state.view());

        assert!(text.contains("backend: unknown"));
        assert!(text.contains("[-] 1 of 2 selected"));
        assert!(text.contains("[ ]  1. Acme | Technology | New York | High | Jane Doe"));
        assert!(text.contains("[x]  2. Globex"));
        assert!(text.contains("Found 2 leads successfully!"));
    }

    #[test]
    fn leads_screen_shows_errors() {
        colored::control::set_override(false);
        let mut state = AppState::new();
        for msg in [
            Msg::IndustryChanged("Tech".into()),
            Msg::LocationChanged("NYC".into()),
            Msg::SearchClicked,
        ] {
            state = update(state, msg).0;
        }
        let failure = RequestFailure::new(FailureKind::Server { status: 500 }, "boom").with_detail(
            ErrorDetail {
                status: 500,
                raw_body: "boom".into(),
            },
        );
        let (state, _) = update(
            state,
            Msg::SearchCompleted {
                request_id: 1,
                result: Err(failure),
            },
        );

        let text = render(&state.view());

        assert!(text.contains("Error: boom"));
        assert!(text.contains("type `detail`"));
    }

    #[test]
    fn outreach_screen_shows_config_and_missing_fields() {
        colored::control::set_override(false);
        let mut state = searched();
        for msg in [
            Msg::SelectAllToggled(true),
            Msg::OpenOutreachClicked,
            Msg::ConfigEdited(ConfigEdit::Tone(Tone::Friendly)),
            Msg::SingleLeadPicked("2".into()),
        ] {
            state = update(state, msg).0;
        }

        let text = render(&state.view());

        assert!(text.contains("OUTREACH  2 leads  mode: single"));
        assert!(text.contains("target: Globex"));
        assert!(text.contains("tone:    friendly"));
        assert!(text.contains("type:    Cold Email"));
        assert!(text.contains(
            "missing: personalization level, target role, company description, value proposition, sender name"
        ));
        assert!(text.contains("not ready"));
    }

    #[test]
    fn backend_line_variants() {
        let report = HealthReport {
            status: "healthy".into(),
            apollo_api: "configured".into(),
            timestamp: "t".into(),
        };
        assert_eq!(
            backend_line(&BackendStatus::Connected(report)),
            "backend: healthy (apollo api configured)"
        );
        assert_eq!(
            backend_line(&BackendStatus::Unreachable("down".into())),
            "backend: unreachable (down)"
        );
    }
}
