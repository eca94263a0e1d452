use crate::{
    ConfigEdit, ExportReceipt, GenerationMode, GenerationResult, HealthReport, LeadId,
    RequestFailure, RequestId, SearchOutcome,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the industry filter.
    IndustryChanged(String),
    /// User edited the location filter.
    LocationChanged(String),
    /// User clicked Find Leads.
    SearchClicked,
    /// Backend answered a search.
    SearchCompleted {
        request_id: RequestId,
        result: Result<SearchOutcome, RequestFailure>,
    },
    /// User ticked or unticked one lead row.
    LeadToggled(LeadId),
    /// User clicked the header checkbox.
    SelectAllToggled(bool),
    /// User clicked Export.
    ExportClicked,
    /// Export finished (file written or failed).
    ExportCompleted {
        request_id: RequestId,
        result: Result<ExportReceipt, RequestFailure>,
    },
    /// Navigate to the outreach view carrying the current selection.
    OpenOutreachClicked,
    /// Navigate back to the leads view, discarding the outreach state.
    BackClicked,
    /// User typed into the outreach lead filter.
    LeadFilterChanged(String),
    GenerationModeChanged(GenerationMode),
    /// Single mode: pick the target lead.
    SingleLeadPicked(LeadId),
    /// Bulk mode: toggle one target lead.
    BulkLeadToggled(LeadId),
    /// Bulk mode: add or remove every lead passing the filter.
    BulkFilteredToggled(bool),
    ConfigEdited(ConfigEdit),
    /// User clicked Generate for the active mode.
    GenerateClicked,
    /// Backend answered a generation request.
    GenerationCompleted {
        request_id: RequestId,
        result: Result<GenerationResult, RequestFailure>,
    },
    /// User cleared the generated text.
    ClearOutputClicked,
    /// Probe the backend health endpoint.
    HealthCheckRequested,
    HealthChecked {
        request_id: RequestId,
        result: Result<HealthReport, RequestFailure>,
    },
}
