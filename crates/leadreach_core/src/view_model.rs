use crate::{
    BackendStatus, ConfigField, ErrorDetail, GenerationMode, Lead, OutreachConfig, ScreenKind,
    SelectionState,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub screen: ScreenKind,
    pub backend: BackendStatus,
    pub leads: LeadsViewModel,
    /// Present only while the outreach view is shown.
    pub outreach: Option<OutreachViewModel>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LeadsViewModel {
    pub industry: String,
    pub location: String,
    pub rows: Vec<LeadRowView>,
    pub selected_count: usize,
    pub selection_state: SelectionState,
    pub can_search: bool,
    pub searching: bool,
    pub can_export: bool,
    pub exporting: bool,
    pub success_message: Option<String>,
    pub error_message: Option<String>,
    pub error_detail: Option<ErrorDetail>,
    pub last_export_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadRowView {
    pub lead: Lead,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutreachViewModel {
    pub available_count: usize,
    pub filter_term: String,
    /// Leads passing the filter, in snapshot order.
    pub rows: Vec<PickRowView>,
    pub mode: GenerationMode,
    pub single_pick: Option<Lead>,
    pub bulk_count: usize,
    pub config: OutreachConfig,
    pub missing_fields: Vec<ConfigField>,
    pub can_generate: bool,
    pub generating: bool,
    pub output: Option<String>,
    pub error_detail: Option<ErrorDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickRowView {
    pub lead: Lead,
    /// Picked in the active mode.
    pub picked: bool,
}
