use crate::{
    ErrorDetail, Lead, LeadId, RequestFailure, RequestId, SearchQuery, SelectionSet,
    SelectionState,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub leads: Vec<Lead>,
    /// Total reported by the backend.
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    pub lead_count: usize,
    /// Where the CSV was written.
    pub path: String,
}

/// Owns the query, the loaded lead collection and its selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LeadSearchSession {
    query: SearchQuery,
    leads: Vec<Lead>,
    selection: SelectionSet,
    success_message: Option<String>,
    error_message: Option<String>,
    error_detail: Option<ErrorDetail>,
    last_export_path: Option<String>,
    pending_search: Option<RequestId>,
    pending_export: Option<RequestId>,
}

impl LeadSearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn error_detail(&self) -> Option<&ErrorDetail> {
        self.error_detail.as_ref()
    }

    pub fn last_export_path(&self) -> Option<&str> {
        self.last_export_path.as_deref()
    }

    pub fn is_searching(&self) -> bool {
        self.pending_search.is_some()
    }

    pub fn is_exporting(&self) -> bool {
        self.pending_export.is_some()
    }

    pub fn set_industry(&mut self, industry: String) {
        self.query.industry = industry;
    }

    pub fn set_location(&mut self, location: String) {
        self.query.location = location;
    }

    pub fn can_search(&self) -> bool {
        self.query.is_complete() && !self.is_searching()
    }

    pub fn can_export(&self) -> bool {
        !self.selection.is_empty() && !self.is_exporting()
    }

    /// Marks a search as outstanding and returns the query to send, or `None`
    /// when the query is incomplete or a search is already in flight.
    pub fn begin_search(&mut self, request_id: RequestId) -> Option<SearchQuery> {
        if !self.can_search() {
            return None;
        }
        self.pending_search = Some(request_id);
        self.error_message = None;
        self.error_detail = None;
        self.success_message = None;
        Some(self.query.trimmed())
    }

    /// Applies a search completion. Returns `false` for a stale response.
    pub fn apply_search(
        &mut self,
        request_id: RequestId,
        result: Result<SearchOutcome, RequestFailure>,
    ) -> bool {
        if self.pending_search != Some(request_id) {
            return false;
        }
        self.pending_search = None;
        match result {
            Ok(outcome) => {
                self.success_message = Some(format!("Found {} leads successfully!", outcome.total));
                self.error_message = None;
                self.error_detail = None;
                self.leads = outcome.leads;
                self.selection.retain_present(&self.leads);
            }
            Err(failure) => {
                self.success_message = None;
                self.error_message = Some(failure.message);
                self.error_detail = failure.detail;
            }
        }
        true
    }

    /// Returns whether the selection changed.
    pub fn toggle_select(&mut self, id: &LeadId) -> bool {
        self.selection.toggle(id, &self.leads)
    }

    pub fn select_all(&mut self, on: bool) {
        self.selection.select_all(on, &self.leads);
    }

    pub fn selection_state(&self) -> SelectionState {
        self.selection.state(self.leads.len())
    }

    /// Snapshot of the selected leads in collection order.
    pub fn selected_leads(&self) -> Vec<Lead> {
        self.selection.selected_leads(&self.leads)
    }

    /// Marks an export as outstanding and returns the leads to export, or
    /// `None` when nothing is selected or an export is already in flight.
    pub fn begin_export(&mut self, request_id: RequestId) -> Option<(Vec<Lead>, SearchQuery)> {
        if !self.can_export() {
            return None;
        }
        self.pending_export = Some(request_id);
        self.error_message = None;
        self.error_detail = None;
        Some((self.selected_leads(), self.query.trimmed()))
    }

    /// Applies an export completion. Leads and selection are never touched.
    pub fn apply_export(
        &mut self,
        request_id: RequestId,
        result: Result<ExportReceipt, RequestFailure>,
    ) -> bool {
        if self.pending_export != Some(request_id) {
            return false;
        }
        self.pending_export = None;
        match result {
            Ok(receipt) => {
                self.success_message =
                    Some(format!("Exported {} leads successfully!", receipt.lead_count));
                self.last_export_path = Some(receipt.path);
            }
            Err(failure) => {
                self.error_message = Some(failure.message);
                self.error_detail = failure.detail;
            }
        }
        true
    }
}
