use crate::{AppState, BackendStatus, Effect, GenerationRequest, Msg, OutreachComposer};

/// Pure update function: applies a message to state and returns any effects.
///
/// A request of a given kind is only issued while none of that kind is
/// outstanding; completions whose request id no longer matches are dropped.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::IndustryChanged(industry) => {
            state.session_mut().set_industry(industry);
            state.mark_dirty();
            Vec::new()
        }
        Msg::LocationChanged(location) => {
            state.session_mut().set_location(location);
            state.mark_dirty();
            Vec::new()
        }
        Msg::SearchClicked => {
            if !state.session().can_search() {
                return (state, Vec::new());
            }
            let request_id = state.next_request_id();
            match state.session_mut().begin_search(request_id) {
                Some(query) => {
                    state.mark_dirty();
                    vec![Effect::SearchLeads { request_id, query }]
                }
                None => Vec::new(),
            }
        }
        Msg::SearchCompleted { request_id, result } => {
            if state.session_mut().apply_search(request_id, result) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::LeadToggled(id) => {
            if state.session_mut().toggle_select(&id) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SelectAllToggled(on) => {
            state.session_mut().select_all(on);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ExportClicked => {
            if !state.session().can_export() {
                return (state, Vec::new());
            }
            let request_id = state.next_request_id();
            match state.session_mut().begin_export(request_id) {
                Some((leads, query)) => {
                    state.mark_dirty();
                    vec![Effect::ExportLeads {
                        request_id,
                        leads,
                        query,
                    }]
                }
                None => Vec::new(),
            }
        }
        Msg::ExportCompleted { request_id, result } => {
            if state.session_mut().apply_export(request_id, result) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::OpenOutreachClicked => {
            let (screen, session) = state.screen_and_session_mut();
            if screen.enter_outreach(session) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::BackClicked => {
            if state.screen_mut().back() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::LeadFilterChanged(term) => {
            with_composer(&mut state, |composer| {
                composer.set_filter_term(term);
                true
            });
            Vec::new()
        }
        Msg::GenerationModeChanged(mode) => {
            with_composer(&mut state, |composer| {
                composer.set_mode(mode);
                true
            });
            Vec::new()
        }
        Msg::SingleLeadPicked(id) => {
            with_composer(&mut state, |composer| composer.pick_single(&id));
            Vec::new()
        }
        Msg::BulkLeadToggled(id) => {
            with_composer(&mut state, |composer| composer.toggle_bulk(&id));
            Vec::new()
        }
        Msg::BulkFilteredToggled(on) => {
            with_composer(&mut state, |composer| {
                composer.set_bulk_filtered(on);
                true
            });
            Vec::new()
        }
        Msg::ConfigEdited(edit) => {
            with_composer(&mut state, |composer| {
                composer.apply_config(edit);
                true
            });
            Vec::new()
        }
        Msg::GenerateClicked => {
            let can_generate = state
                .screen()
                .composer()
                .is_some_and(OutreachComposer::can_generate);
            if !can_generate {
                return (state, Vec::new());
            }
            let request_id = state.next_request_id();
            let request = state
                .screen_mut()
                .composer_mut()
                .and_then(|composer| composer.begin_generation(request_id));
            match request {
                Some(GenerationRequest::Single { config, lead }) => {
                    state.mark_dirty();
                    vec![Effect::GenerateSingle {
                        request_id,
                        config,
                        lead,
                    }]
                }
                Some(GenerationRequest::Bulk { lead_ids, config }) => {
                    state.mark_dirty();
                    vec![Effect::GenerateBulk {
                        request_id,
                        lead_ids,
                        config,
                    }]
                }
                None => Vec::new(),
            }
        }
        Msg::GenerationCompleted { request_id, result } => {
            // A response for a discarded composer has nowhere to go.
            with_composer(&mut state, |composer| {
                composer.apply_generation(request_id, result)
            });
            Vec::new()
        }
        Msg::ClearOutputClicked => {
            with_composer(&mut state, OutreachComposer::clear_output);
            Vec::new()
        }
        Msg::HealthCheckRequested => {
            let request_id = state.next_request_id();
            if state.begin_health_check(request_id) {
                state.mark_dirty();
                vec![Effect::CheckHealth { request_id }]
            } else {
                Vec::new()
            }
        }
        Msg::HealthChecked { request_id, result } => {
            if state.finish_health_check(request_id) {
                let backend = match result {
                    Ok(report) => BackendStatus::Connected(report),
                    Err(failure) => BackendStatus::Unreachable(failure.message),
                };
                state.set_backend(backend);
                state.mark_dirty();
            }
            Vec::new()
        }
    };

    (state, effects)
}

/// Runs `apply` on the composer when the outreach view is shown and marks the
/// state dirty if it reports a change.
fn with_composer(state: &mut AppState, apply: impl FnOnce(&mut OutreachComposer) -> bool) {
    let changed = state.screen_mut().composer_mut().is_some_and(apply);
    if changed {
        state.mark_dirty();
    }
}
