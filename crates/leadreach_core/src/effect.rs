use crate::{Lead, LeadId, OutreachConfig, SearchQuery};

/// Tag carried by every outbound request and echoed back by its completion.
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SearchLeads {
        request_id: RequestId,
        query: SearchQuery,
    },
    ExportLeads {
        request_id: RequestId,
        leads: Vec<Lead>,
        query: SearchQuery,
    },
    GenerateSingle {
        request_id: RequestId,
        config: OutreachConfig,
        lead: Lead,
    },
    GenerateBulk {
        request_id: RequestId,
        lead_ids: Vec<LeadId>,
        config: OutreachConfig,
    },
    CheckHealth {
        request_id: RequestId,
    },
}

impl Effect {
    pub fn request_id(&self) -> RequestId {
        match self {
            Effect::SearchLeads { request_id, .. }
            | Effect::ExportLeads { request_id, .. }
            | Effect::GenerateSingle { request_id, .. }
            | Effect::GenerateBulk { request_id, .. }
            | Effect::CheckHealth { request_id } => *request_id,
        }
    }
}
