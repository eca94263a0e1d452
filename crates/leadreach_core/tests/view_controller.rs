use leadreach_core::{
    update, AppState, BackendStatus, ConfigEdit, Effect, FailureKind, GenerationResult,
    HealthReport, Lead, Msg, Priority, RequestFailure, ScreenKind, SearchOutcome, SingleMessage,
    Tone,
};

fn lead(id: &str) -> Lead {
    Lead {
        id: id.to_string(),
        company: format!("Company {id}"),
        industry: "Retail".to_string(),
        location: "Chicago".to_string(),
        website: None,
        linkedin_url: None,
        contact: None,
        employees: None,
        priority: Priority::Medium,
        outreach_angle: None,
        last_updated: "2024-02-02".to_string(),
    }
}

fn with_leads(ids: &[&str]) -> AppState {
    let (state, _) = update(AppState::new(), Msg::IndustryChanged("Retail".into()));
    let (state, _) = update(state, Msg::LocationChanged("Chicago".into()));
    let (state, effects) = update(state, Msg::SearchClicked);
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id: effects[0].request_id(),
            result: Ok(SearchOutcome {
                leads: ids.iter().map(|id| lead(id)).collect(),
                total: ids.len() as u64,
            }),
        },
    );
    state
}

#[test]
fn starts_in_leads_view() {
    let view = AppState::new().view();
    assert_eq!(view.screen, ScreenKind::Leads);
    assert!(view.outreach.is_none());
    assert_eq!(view.backend, BackendStatus::Unknown);
}

#[test]
fn entering_outreach_snapshots_selection_without_clearing_it() {
    let state = with_leads(&["a", "b", "c"]);
    let (state, _) = update(state, Msg::LeadToggled("c".into()));
    let (state, _) = update(state, Msg::LeadToggled("a".into()));

    let (state, effects) = update(state, Msg::OpenOutreachClicked);

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.screen, ScreenKind::Outreach);
    let outreach = view.outreach.unwrap();
    assert_eq!(outreach.available_count, 2);
    let ids: Vec<_> = outreach.rows.iter().map(|r| r.lead.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);
    assert_eq!(view.leads.selected_count, 2);
}

#[test]
fn snapshot_is_immune_to_later_selection_changes() {
    let state = with_leads(&["a", "b"]);
    let (state, _) = update(state, Msg::SelectAllToggled(true));
    let (state, _) = update(state, Msg::OpenOutreachClicked);

    // Leads-view messages still reach the session underneath.
    let (state, _) = update(state, Msg::SelectAllToggled(false));

    let view = state.view();
    assert_eq!(view.leads.selected_count, 0);
    assert_eq!(view.outreach.unwrap().available_count, 2);
}

#[test]
fn outreach_with_no_selection_has_empty_snapshot() {
    let state = with_leads(&["a"]);
    let (state, _) = update(state, Msg::OpenOutreachClicked);
    let outreach = state.view().outreach.unwrap();
    assert_eq!(outreach.available_count, 0);
    assert!(outreach.rows.is_empty());
}

#[test]
fn back_discards_outreach_state() {
    let state = with_leads(&["a"]);
    let (state, _) = update(state, Msg::SelectAllToggled(true));
    let (state, _) = update(state, Msg::OpenOutreachClicked);
    let (state, _) = update(state, Msg::ConfigEdited(ConfigEdit::Tone(Tone::Urgent)));
    let (state, _) = update(state, Msg::ConfigEdited(ConfigEdit::SenderName("Sam".into())));
    let (state, _) = update(state, Msg::SingleLeadPicked("a".into()));

    let (state, _) = update(state, Msg::BackClicked);
    assert_eq!(state.view().screen, ScreenKind::Leads);
    assert!(state.view().outreach.is_none());
    assert_eq!(state.view().leads.selected_count, 1);

    let (state, _) = update(state, Msg::OpenOutreachClicked);
    let outreach = state.view().outreach.unwrap();
    assert_eq!(outreach.config.tone, None);
    assert!(outreach.config.sender_name.is_empty());
    assert_eq!(outreach.single_pick, None);
}

#[test]
fn outreach_messages_are_ignored_in_leads_view() {
    let mut state = with_leads(&["a"]);
    state.consume_dirty();

    for msg in [
        Msg::LeadFilterChanged("x".into()),
        Msg::SingleLeadPicked("a".into()),
        Msg::GenerateClicked,
        Msg::ClearOutputClicked,
        Msg::BackClicked,
    ] {
        let (next, effects) = update(state, msg);
        state = next;
        assert!(effects.is_empty());
        assert!(!state.consume_dirty());
    }
}

#[test]
fn generation_response_after_back_is_discarded() {
    let state = with_leads(&["a"]);
    let (state, _) = update(state, Msg::SelectAllToggled(true));
    let (state, _) = update(state, Msg::OpenOutreachClicked);
    let edits = [
        ConfigEdit::Tone(Tone::Casual),
        ConfigEdit::PersonalizationLevel(leadreach_core::PersonalizationLevel::Medium),
        ConfigEdit::TargetRole("Owner".into()),
        ConfigEdit::CompanyDescription("Desc".into()),
        ConfigEdit::ValueProposition("Value".into()),
        ConfigEdit::SenderName("Sam".into()),
    ];
    let state = edits
        .into_iter()
        .fold(state, |s, e| update(s, Msg::ConfigEdited(e)).0);
    let (state, _) = update(state, Msg::SingleLeadPicked("a".into()));
    let (state, effects) = update(state, Msg::GenerateClicked);
    let stale_id = effects[0].request_id();

    let (state, _) = update(state, Msg::BackClicked);
    let (state, _) = update(state, Msg::OpenOutreachClicked);
    let (mut state, _) = update(
        state,
        Msg::GenerationCompleted {
            request_id: stale_id,
            result: Ok(GenerationResult::Single(SingleMessage::Content("late".into()))),
        },
    );
    state.consume_dirty();

    let outreach = state.view().outreach.unwrap();
    assert_eq!(outreach.output, None);
    assert!(!outreach.generating);
}

#[test]
fn stale_search_completion_is_ignored() {
    let state = with_leads(&["a"]);
    let (state, effects) = update(state, Msg::SearchClicked);
    let current = effects[0].request_id();

    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id: current + 100,
            result: Ok(SearchOutcome {
                leads: vec![],
                total: 0,
            }),
        },
    );
    assert!(state.view().leads.searching);
    assert_eq!(state.view().leads.rows.len(), 1);
}

#[test]
fn health_check_round_trip() {
    let (state, effects) = update(AppState::new(), Msg::HealthCheckRequested);
    let request_id = match effects.as_slice() {
        [Effect::CheckHealth { request_id }] => *request_id,
        other => panic!("expected health effect, got {other:?}"),
    };
    assert_eq!(state.view().backend, BackendStatus::Checking);

    let (state, effects) = update(state, Msg::HealthCheckRequested);
    assert!(effects.is_empty(), "one probe at a time");

    let report = HealthReport {
        status: "healthy".into(),
        apollo_api: "configured".into(),
        timestamp: "2024-05-01T10:00:00".into(),
    };
    let (state, _) = update(
        state,
        Msg::HealthChecked {
            request_id,
            result: Ok(report.clone()),
        },
    );
    assert_eq!(state.view().backend, BackendStatus::Connected(report));

    let (state, effects) = update(state, Msg::HealthCheckRequested);
    let (state, _) = update(
        state,
        Msg::HealthChecked {
            request_id: effects[0].request_id(),
            result: Err(RequestFailure::new(
                FailureKind::Transport,
                "Unable to Connect to the Backend Server",
            )),
        },
    );
    assert_eq!(
        state.view().backend,
        BackendStatus::Unreachable("Unable to Connect to the Backend Server".into())
    );
}
