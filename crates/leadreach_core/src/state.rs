use crate::view_model::{AppViewModel, LeadRowView, LeadsViewModel, OutreachViewModel, PickRowView};
use crate::{GenerationMode, LeadSearchSession, RequestId, Screen};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub status: String,
    pub apollo_api: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BackendStatus {
    #[default]
    Unknown,
    Checking,
    Connected(HealthReport),
    Unreachable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    screen: Screen,
    session: LeadSearchSession,
    backend: BackendStatus,
    pending_health: Option<RequestId>,
    last_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn session(&self) -> &LeadSearchSession {
        &self.session
    }

    pub fn backend(&self) -> &BackendStatus {
        &self.backend
    }

    pub fn view(&self) -> AppViewModel {
        let session = &self.session;
        let leads = LeadsViewModel {
            industry: session.query().industry.clone(),
            location: session.query().location.clone(),
            rows: session
                .leads()
                .iter()
                .map(|lead| LeadRowView {
                    selected: session.selection().contains(&lead.id),
                    lead: lead.clone(),
                })
                .collect(),
            selected_count: session.selection().len(),
            selection_state: session.selection_state(),
            can_search: session.can_search(),
            searching: session.is_searching(),
            can_export: session.can_export(),
            exporting: session.is_exporting(),
            success_message: session.success_message().map(str::to_owned),
            error_message: session.error_message().map(str::to_owned),
            error_detail: session.error_detail().cloned(),
            last_export_path: session.last_export_path().map(str::to_owned),
        };

        let outreach = self.screen.composer().map(|composer| {
            let picked = |id: &str| match composer.mode() {
                GenerationMode::Single => composer.single_pick().is_some_and(|lead| lead.id == id),
                GenerationMode::Bulk => composer.bulk_picks().contains(id),
            };
            OutreachViewModel {
                available_count: composer.leads().len(),
                filter_term: composer.filter_term().to_owned(),
                rows: composer
                    .filtered_leads()
                    .into_iter()
                    .map(|lead| PickRowView {
                        picked: picked(&lead.id),
                        lead: lead.clone(),
                    })
                    .collect(),
                mode: composer.mode(),
                single_pick: composer.single_pick().cloned(),
                bulk_count: composer.bulk_picks().len(),
                config: composer.config().clone(),
                missing_fields: composer.missing_fields(),
                can_generate: composer.can_generate(),
                generating: composer.is_generating(),
                output: composer.output().map(str::to_owned),
                error_detail: composer.error_detail().cloned(),
            }
        });

        AppViewModel {
            screen: self.screen.kind(),
            backend: self.backend.clone(),
            leads,
            outreach,
            dirty: self.dirty,
        }
    }

    /// Returns and clears the dirty flag. Callers re-render when it was set.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn next_request_id(&mut self) -> RequestId {
        self.last_request_id += 1;
        self.last_request_id
    }

    pub(crate) fn session_mut(&mut self) -> &mut LeadSearchSession {
        &mut self.session
    }

    /// Split borrow for transitions that read the session while replacing the screen.
    pub(crate) fn screen_and_session_mut(&mut self) -> (&mut Screen, &LeadSearchSession) {
        (&mut self.screen, &self.session)
    }

    pub(crate) fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    pub(crate) fn begin_health_check(&mut self, request_id: RequestId) -> bool {
        if self.pending_health.is_some() {
            return false;
        }
        self.pending_health = Some(request_id);
        self.backend = BackendStatus::Checking;
        true
    }

    pub(crate) fn finish_health_check(&mut self, request_id: RequestId) -> bool {
        if self.pending_health != Some(request_id) {
            return false;
        }
        self.pending_health = None;
        true
    }

    pub(crate) fn set_backend(&mut self, backend: BackendStatus) {
        self.backend = backend;
    }
}
