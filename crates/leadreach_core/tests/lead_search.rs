use std::sync::Once;

use leadreach_core::{
    update, AppState, Effect, ErrorDetail, ExportReceipt, FailureKind, Lead, Msg, Priority,
    RequestFailure, RequestId, SearchOutcome, SearchQuery, SelectionState,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(leadreach_logging::initialize_for_tests);
}

fn lead(id: &str, company: &str) -> Lead {
    Lead {
        id: id.to_string(),
        company: company.to_string(),
        industry: "Technology".to_string(),
        location: "New York".to_string(),
        website: Some("https://example.com".to_string()),
        linkedin_url: None,
        contact: Some("Jane Doe".to_string()),
        employees: Some("51-200".to_string()),
        priority: Priority::High,
        outreach_angle: None,
        last_updated: "2024-05-01".to_string(),
    }
}

fn fill_query(state: AppState, industry: &str, location: &str) -> AppState {
    let (state, _) = update(state, Msg::IndustryChanged(industry.to_string()));
    let (state, _) = update(state, Msg::LocationChanged(location.to_string()));
    state
}

fn start_search(state: AppState) -> (AppState, RequestId) {
    let (state, effects) = update(state, Msg::SearchClicked);
    let request_id = match effects.as_slice() {
        [Effect::SearchLeads { request_id, .. }] => *request_id,
        other => panic!("expected one search effect, got {other:?}"),
    };
    (state, request_id)
}

fn searched(leads: Vec<Lead>) -> AppState {
    let state = fill_query(AppState::new(), "Technology", "New York");
    let (state, request_id) = start_search(state);
    let total = leads.len() as u64;
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id,
            result: Ok(SearchOutcome { leads, total }),
        },
    );
    state
}

#[test]
fn search_emits_effect_with_trimmed_query() {
    init_logging();
    let state = fill_query(AppState::new(), "  Technology ", "New York ");

    let (mut state, effects) = update(state, Msg::SearchClicked);

    assert_eq!(
        effects,
        vec![Effect::SearchLeads {
            request_id: 1,
            query: SearchQuery::new("Technology", "New York"),
        }]
    );
    assert!(state.view().leads.searching);
    assert!(!state.view().leads.can_search);
    assert!(state.consume_dirty());
}

#[test]
fn search_with_missing_field_issues_nothing() {
    init_logging();
    let state = fill_query(AppState::new(), "Technology", "   ");

    let (mut state, _) = update(state, Msg::LocationChanged("  ".to_string()));
    assert!(state.consume_dirty());
    let (mut state, effects) = update(state, Msg::SearchClicked);

    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
    assert!(!state.view().leads.searching);

    let (_, effects) = update(fill_query(AppState::new(), "", "Boston"), Msg::SearchClicked);
    assert!(effects.is_empty());
}

#[test]
fn successful_search_replaces_collection_and_reports_total() {
    init_logging();
    let state = searched(vec![lead("1", "Acme"), lead("2", "Globex"), lead("3", "Initech")]);

    let view = state.view();
    assert_eq!(view.leads.rows.len(), 3);
    assert_eq!(
        view.leads.success_message.as_deref(),
        Some("Found 3 leads successfully!")
    );
    assert_eq!(view.leads.error_message, None);
    assert!(!view.leads.searching);
    assert_eq!(view.leads.rows[1].lead.company, "Globex");
}

#[test]
fn new_search_drops_selection_of_vanished_leads() {
    init_logging();
    let state = searched(vec![lead("1", "Acme"), lead("2", "Globex")]);
    let (state, _) = update(state, Msg::SelectAllToggled(true));
    assert_eq!(state.view().leads.selected_count, 2);

    let (state, request_id) = start_search(state);
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id,
            result: Ok(SearchOutcome {
                leads: vec![lead("2", "Globex"), lead("9", "Hooli")],
                total: 2,
            }),
        },
    );

    let view = state.view();
    assert_eq!(view.leads.selected_count, 1);
    let selection = state.session().selection();
    assert_eq!(selection.ordered_ids(state.session().leads()), vec!["2".to_string()]);
    assert_eq!(selection.len(), 1);
}

#[test]
fn failed_search_keeps_collection_and_sets_error() {
    init_logging();
    let state = searched(vec![lead("1", "Acme")]);
    let (state, _) = update(state, Msg::LeadToggled("1".to_string()));
    let (state, request_id) = start_search(state);

    let failure = RequestFailure::new(FailureKind::Server { status: 502 }, "Apollo is down")
        .with_detail(ErrorDetail {
            status: 502,
            raw_body: r#"{"detail":"Apollo is down"}"#.to_string(),
        });
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            request_id,
            result: Err(failure),
        },
    );

    let view = state.view();
    assert_eq!(view.leads.rows.len(), 1);
    assert_eq!(view.leads.selected_count, 1);
    assert_eq!(view.leads.error_message.as_deref(), Some("Apollo is down"));
    assert_eq!(view.leads.success_message, None);
    assert_eq!(view.leads.error_detail.map(|d| d.status), Some(502));
    assert!(view.leads.can_search);
}

#[test]
fn second_search_is_ignored_while_first_is_outstanding() {
    init_logging();
    let state = fill_query(AppState::new(), "Technology", "New York");
    let (state, _first) = start_search(state);

    let (state, effects) = update(state, Msg::SearchClicked);

    assert!(effects.is_empty());
    assert!(state.view().leads.searching);
}

#[test]
fn toggle_and_select_all_drive_tri_state() {
    init_logging();
    let state = searched(vec![lead("1", "Acme"), lead("2", "Globex")]);
    assert_eq!(state.view().leads.selection_state, SelectionState::None);

    let (state, _) = update(state, Msg::LeadToggled("1".to_string()));
    assert_eq!(state.view().leads.selection_state, SelectionState::Some);
    assert!(state.view().leads.rows[0].selected);

    let (state, _) = update(state, Msg::LeadToggled("1".to_string()));
    assert_eq!(state.view().leads.selection_state, SelectionState::None);

    let (state, _) = update(state, Msg::SelectAllToggled(true));
    assert_eq!(state.view().leads.selection_state, SelectionState::All);
    assert_eq!(state.view().leads.selected_count, 2);

    let (state, _) = update(state, Msg::SelectAllToggled(false));
    assert_eq!(state.view().leads.selected_count, 0);
}

#[test]
fn toggling_unknown_lead_changes_nothing() {
    init_logging();
    let mut state = searched(vec![lead("1", "Acme")]);
    state.consume_dirty();

    let (mut state, _) = update(state, Msg::LeadToggled("missing".to_string()));

    assert!(!state.consume_dirty());
    assert_eq!(state.view().leads.selected_count, 0);
}

#[test]
fn export_with_empty_selection_issues_nothing() {
    init_logging();
    let mut state = searched(vec![lead("1", "Acme")]);
    state.consume_dirty();

    let (mut state, effects) = update(state, Msg::ExportClicked);

    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
    assert_eq!(state.view().leads.error_message, None);
    assert!(!state.view().leads.can_export);
}

#[test]
fn export_sends_selected_leads_in_collection_order() {
    init_logging();
    let state = searched(vec![lead("1", "Acme"), lead("2", "Globex"), lead("3", "Initech")]);
    let (state, _) = update(state, Msg::LeadToggled("3".to_string()));
    let (state, _) = update(state, Msg::LeadToggled("1".to_string()));

    let (state, effects) = update(state, Msg::ExportClicked);

    let (request_id, exported) = match effects.as_slice() {
        [Effect::ExportLeads {
            request_id,
            leads,
            query,
        }] => {
            assert_eq!(query, &SearchQuery::new("Technology", "New York"));
            (*request_id, leads.clone())
        }
        other => panic!("expected one export effect, got {other:?}"),
    };
    let companies: Vec<_> = exported.iter().map(|l| l.company.as_str()).collect();
    assert_eq!(companies, vec!["Acme", "Initech"]);
    assert!(state.view().leads.exporting);

    let (state, _) = update(
        state,
        Msg::ExportCompleted {
            request_id,
            result: Ok(ExportReceipt {
                lead_count: 2,
                path: "exports/leads.csv".to_string(),
            }),
        },
    );
    let view = state.view();
    assert_eq!(
        view.leads.success_message.as_deref(),
        Some("Exported 2 leads successfully!")
    );
    assert_eq!(view.leads.last_export_path.as_deref(), Some("exports/leads.csv"));
    assert!(!view.leads.exporting);
}

#[test]
fn failed_export_keeps_leads_and_selection() {
    init_logging();
    let state = searched(vec![lead("1", "Acme"), lead("2", "Globex")]);
    let (state, _) = update(state, Msg::SelectAllToggled(true));
    let (state, effects) = update(state, Msg::ExportClicked);
    let request_id = effects[0].request_id();

    let (state, _) = update(
        state,
        Msg::ExportCompleted {
            request_id,
            result: Err(RequestFailure::new(
                FailureKind::MalformedResponse,
                "Export Failed: Received Empty File",
            )),
        },
    );

    let view = state.view();
    assert_eq!(view.leads.rows.len(), 2);
    assert_eq!(view.leads.selected_count, 2);
    assert_eq!(
        view.leads.error_message.as_deref(),
        Some("Export Failed: Received Empty File")
    );
    assert!(view.leads.can_export);
}
