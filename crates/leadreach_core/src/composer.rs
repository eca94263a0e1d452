use crate::{
    render_result, ConfigEdit, ConfigField, ErrorDetail, GenerationResult, Lead, LeadId,
    OutreachConfig, RequestFailure, RequestId, SelectionSet,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationMode {
    #[default]
    Single,
    Bulk,
}

/// The active target of a generation, derived from the current mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationTarget {
    Single(Lead),
    Bulk(SelectionSet),
}

/// What to send to the backend once the gate has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationRequest {
    Single {
        config: OutreachConfig,
        lead: Lead,
    },
    Bulk {
        lead_ids: Vec<LeadId>,
        config: OutreachConfig,
    },
}

/// Leads whose company, industry or contact contains `term`, ignoring case.
/// An empty term keeps everything. Order is preserved.
pub fn filtered_leads<'a>(leads: &'a [Lead], term: &str) -> Vec<&'a Lead> {
    let lowered = term.to_lowercase();
    leads
        .iter()
        .filter(|lead| lead.matches_lowered(&lowered))
        .collect()
}

/// State of one visit to the outreach view. Dropped wholesale on `back`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutreachComposer {
    leads: Vec<Lead>,
    config: OutreachConfig,
    mode: GenerationMode,
    single_pick: Option<LeadId>,
    bulk_picks: SelectionSet,
    filter_term: String,
    pending: Option<RequestId>,
    output: Option<String>,
    error_detail: Option<ErrorDetail>,
}

impl OutreachComposer {
    /// `leads` is the snapshot of the selection taken at transition time.
    pub fn new(leads: Vec<Lead>) -> Self {
        Self {
            leads,
            ..Self::default()
        }
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn config(&self) -> &OutreachConfig {
        &self.config
    }

    pub fn mode(&self) -> GenerationMode {
        self.mode
    }

    pub fn filter_term(&self) -> &str {
        &self.filter_term
    }

    pub fn bulk_picks(&self) -> &SelectionSet {
        &self.bulk_picks
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn error_detail(&self) -> Option<&ErrorDetail> {
        self.error_detail.as_ref()
    }

    pub fn is_generating(&self) -> bool {
        self.pending.is_some()
    }

    pub fn single_pick(&self) -> Option<&Lead> {
        let id = self.single_pick.as_ref()?;
        self.leads.iter().find(|lead| &lead.id == id)
    }

    pub fn filtered_leads(&self) -> Vec<&Lead> {
        filtered_leads(&self.leads, &self.filter_term)
    }

    pub fn set_filter_term(&mut self, term: String) {
        self.filter_term = term;
    }

    /// Switching modes keeps the other mode's picks.
    pub fn set_mode(&mut self, mode: GenerationMode) {
        self.mode = mode;
    }

    pub fn apply_config(&mut self, edit: ConfigEdit) {
        self.config.apply(edit);
    }

    pub fn missing_fields(&self) -> Vec<ConfigField> {
        self.config.missing_fields()
    }

    /// Returns whether the pick changed.
    pub fn pick_single(&mut self, id: &LeadId) -> bool {
        if self.single_pick.as_ref() == Some(id) || !self.leads.iter().any(|l| &l.id == id) {
            return false;
        }
        self.single_pick = Some(id.clone());
        true
    }

    pub fn toggle_bulk(&mut self, id: &LeadId) -> bool {
        self.bulk_picks.toggle(id, &self.leads)
    }

    /// Adds or removes every lead currently passing the filter.
    pub fn set_bulk_filtered(&mut self, on: bool) {
        let visible: Vec<Lead> = self.filtered_leads().into_iter().cloned().collect();
        self.bulk_picks.set_many(on, &visible);
    }

    pub fn can_generate_single(&self) -> bool {
        self.single_pick().is_some() && self.config.is_complete()
    }

    pub fn can_generate_bulk(&self) -> bool {
        !self.bulk_picks.is_empty() && self.config.is_complete()
    }

    /// Predicate of the active mode, including the busy flag.
    pub fn can_generate(&self) -> bool {
        if self.is_generating() {
            return false;
        }
        match self.mode {
            GenerationMode::Single => self.can_generate_single(),
            GenerationMode::Bulk => self.can_generate_bulk(),
        }
    }

    pub fn target(&self) -> Option<GenerationTarget> {
        match self.mode {
            GenerationMode::Single => self.single_pick().cloned().map(GenerationTarget::Single),
            GenerationMode::Bulk if !self.bulk_picks.is_empty() => {
                Some(GenerationTarget::Bulk(self.bulk_picks.clone()))
            }
            GenerationMode::Bulk => None,
        }
    }

    /// Marks a generation as outstanding and returns the request to send.
    /// Clears the previous output and error detail.
    pub fn begin_generation(&mut self, request_id: RequestId) -> Option<GenerationRequest> {
        if !self.can_generate() {
            return None;
        }
        let request = match self.target()? {
            GenerationTarget::Single(lead) => GenerationRequest::Single {
                config: self.config.clone(),
                lead,
            },
            GenerationTarget::Bulk(picks) => GenerationRequest::Bulk {
                lead_ids: picks.ordered_ids(&self.leads),
                config: self.config.clone(),
            },
        };
        self.pending = Some(request_id);
        self.output = None;
        self.error_detail = None;
        Some(request)
    }

    /// Applies a generation completion. Returns `false` for a stale response.
    /// The configuration survives failures.
    pub fn apply_generation(
        &mut self,
        request_id: RequestId,
        result: Result<GenerationResult, RequestFailure>,
    ) -> bool {
        if self.pending != Some(request_id) {
            return false;
        }
        self.pending = None;
        match result {
            Ok(result) => {
                self.output = Some(render_result(&result));
            }
            Err(failure) => {
                self.output = Some(format!("Error: {}", failure.message));
                self.error_detail = failure.detail;
            }
        }
        true
    }

    pub fn clear_output(&mut self) -> bool {
        let had_output = self.output.is_some() || self.error_detail.is_some();
        self.output = None;
        self.error_detail = None;
        had_output
    }
}
