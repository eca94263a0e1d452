//! JSON shapes exchanged with the backend and their validation into core types.

use std::collections::HashSet;

use leadreach_core::{
    GeneratedMessage, HealthReport, Lead, LeadId, OutreachConfig, Priority, SearchOutcome,
    SingleMessage,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ClientError;

#[derive(Debug, Serialize)]
pub(crate) struct SearchRequestBody<'a> {
    pub industry: &'a str,
    pub location: &'a str,
}

/// Lead as it travels over the wire (camelCase keys).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireLead {
    id: String,
    company: String,
    industry: String,
    location: String,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    linkedin_url: Option<String>,
    #[serde(default)]
    contact: Option<String>,
    #[serde(default)]
    employees: Option<String>,
    priority: String,
    #[serde(default)]
    outreach_angle: Option<String>,
    last_updated: String,
}

impl TryFrom<WireLead> for Lead {
    type Error = ClientError;

    fn try_from(wire: WireLead) -> Result<Self, Self::Error> {
        if wire.id.trim().is_empty() {
            return Err(ClientError::MalformedResponse("Lead Without Id".into()));
        }
        let priority = Priority::parse(&wire.priority).ok_or_else(|| {
            ClientError::MalformedResponse(format!(
                "Unknown Priority {:?} for Lead {}",
                wire.priority, wire.id
            ))
        })?;
        Ok(Lead {
            id: wire.id,
            company: wire.company,
            industry: wire.industry,
            location: wire.location,
            website: wire.website,
            linkedin_url: wire.linkedin_url,
            contact: wire.contact,
            employees: wire.employees,
            priority,
            outreach_angle: wire.outreach_angle,
            last_updated: wire.last_updated,
        })
    }
}

/// Outbound lead, borrowed from the core record.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LeadBody<'a> {
    id: &'a str,
    company: &'a str,
    industry: &'a str,
    location: &'a str,
    website: Option<&'a str>,
    linkedin_url: Option<&'a str>,
    contact: Option<&'a str>,
    employees: Option<&'a str>,
    priority: &'static str,
    outreach_angle: Option<&'a str>,
    last_updated: &'a str,
}

impl<'a> From<&'a Lead> for LeadBody<'a> {
    fn from(lead: &'a Lead) -> Self {
        Self {
            id: &lead.id,
            company: &lead.company,
            industry: &lead.industry,
            location: &lead.location,
            website: lead.website.as_deref(),
            linkedin_url: lead.linkedin_url.as_deref(),
            contact: lead.contact.as_deref(),
            employees: lead.employees.as_deref(),
            priority: lead.priority.as_str(),
            outreach_angle: lead.outreach_angle.as_deref(),
            last_updated: &lead.last_updated,
        }
    }
}

/// The six configuration fields plus the message type, snake_case on the wire.
#[derive(Debug, Serialize)]
pub(crate) struct OutreachRequestBody<'a> {
    message_type: &'static str,
    tone: &'static str,
    personalization_level: &'static str,
    target_role: &'a str,
    company_description: &'a str,
    value_proposition: &'a str,
    sender_name: &'a str,
}

impl<'a> TryFrom<&'a OutreachConfig> for OutreachRequestBody<'a> {
    type Error = ClientError;

    fn try_from(config: &'a OutreachConfig) -> Result<Self, Self::Error> {
        let missing = config.missing_fields();
        if let Some(field) = missing.first() {
            return Err(ClientError::Validation(format!(
                "Missing required field: {}",
                field.label()
            )));
        }
        let (Some(tone), Some(level)) = (config.tone, config.personalization_level) else {
            return Err(ClientError::Validation("Missing required field".into()));
        };
        Ok(Self {
            message_type: config.message_type.as_wire(),
            tone: tone.as_wire(),
            personalization_level: level.as_wire(),
            target_role: config.target_role.trim(),
            company_description: config.company_description.trim(),
            value_proposition: config.value_proposition.trim(),
            sender_name: config.sender_name.trim(),
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SingleGenerateBody<'a> {
    #[serde(flatten)]
    pub request: OutreachRequestBody<'a>,
    pub lead: LeadBody<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BulkGenerateBody<'a> {
    pub lead_ids: &'a [LeadId],
    pub outreach_request: OutreachRequestBody<'a>,
}

#[derive(Debug, Deserialize)]
struct HealthBody {
    status: String,
    apollo_api: String,
    timestamp: String,
}

fn parse_json(raw: &str) -> Result<Value, ClientError> {
    serde_json::from_str(raw)
        .map_err(|err| ClientError::MalformedResponse(format!("Body Is Not JSON ({err})")))
}

pub(crate) fn parse_health(raw: &str) -> Result<HealthReport, ClientError> {
    let body: HealthBody = serde_json::from_str(raw)
        .map_err(|err| ClientError::MalformedResponse(format!("Health Payload ({err})")))?;
    Ok(HealthReport {
        status: body.status,
        apollo_api: body.apollo_api,
        timestamp: body.timestamp,
    })
}

/// `{leads: Lead[], total}`. A missing or non-array `leads` rejects the
/// response; so does any lead that fails validation or repeats an id.
pub(crate) fn parse_search(raw: &str) -> Result<SearchOutcome, ClientError> {
    let mut value = parse_json(raw)?;
    let leads_value = match value.get_mut("leads").map(Value::take) {
        Some(leads @ Value::Array(_)) => leads,
        _ => return Err(ClientError::MalformedResponse("Missing Leads Array".into())),
    };
    let wire: Vec<WireLead> = serde_json::from_value(leads_value)
        .map_err(|err| ClientError::MalformedResponse(format!("Invalid Lead ({err})")))?;
    let leads = wire
        .into_iter()
        .map(Lead::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    let mut seen = HashSet::with_capacity(leads.len());
    if let Some(dup) = leads.iter().find(|&lead| !seen.insert(lead.id.as_str())) {
        return Err(ClientError::MalformedResponse(format!(
            "Duplicate Lead Id {:?}",
            dup.id
        )));
    }
    let total = value
        .get("total")
        .and_then(Value::as_u64)
        .unwrap_or(leads.len() as u64);
    Ok(SearchOutcome { leads, total })
}

/// `{success, message: {message}}`. Anything short of a successful response
/// with a nested message string is a no-content completion.
pub(crate) fn parse_single(raw: &str) -> Result<SingleMessage, ClientError> {
    let value = parse_json(raw)?;
    let success = value.get("success").and_then(Value::as_bool) == Some(true);
    let message = value
        .get("message")
        .and_then(|m| m.get("message"))
        .and_then(Value::as_str);
    Ok(match (success, message) {
        (true, Some(text)) => SingleMessage::Content(text.to_owned()),
        _ => SingleMessage::NoContent,
    })
}

/// `{success, messages: [{lead_id, message}]}`, order preserved. `success:
/// false` yields an empty list.
pub(crate) fn parse_bulk(raw: &str) -> Result<Vec<GeneratedMessage>, ClientError> {
    let value = parse_json(raw)?;
    let Some(entries) = value.get("messages").and_then(Value::as_array) else {
        return Err(ClientError::MalformedResponse("Missing Messages Array".into()));
    };
    if value.get("success").and_then(Value::as_bool) == Some(false) {
        return Ok(Vec::new());
    }
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let lead_id = entry.get("lead_id").and_then(Value::as_str);
            let message = entry.get("message").and_then(Value::as_str);
            match (lead_id, message) {
                (Some(lead_id), Some(message)) => Ok(GeneratedMessage {
                    lead_id: lead_id.to_owned(),
                    message: message.to_owned(),
                }),
                _ => Err(ClientError::MalformedResponse(format!(
                    "Message {} Lacks lead_id or message",
                    index + 1
                ))),
            }
        })
        .collect()
}

/// Human-readable text for a non-2xx body: the `detail` field when the body
/// is JSON carrying one, otherwise the status line.
pub(crate) fn server_message(raw: &str, status_line: &str) -> String {
    match serde_json::from_str::<Value>(raw)
        .ok()
        .and_then(|v| v.get("detail").cloned())
    {
        Some(Value::String(detail)) if !detail.is_empty() => detail,
        Some(Value::Null) | None => status_line.to_owned(),
        Some(Value::String(_)) => status_line.to_owned(),
        Some(other) => other.to_string(),
    }
}
