//! Turns generation results into the single display string shown to the user.

use crate::LeadId;

/// Shown when a generation completed but produced no usable message.
pub const NO_CONTENT_FALLBACK: &str = "No message content returned from AI";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SingleMessage {
    Content(String),
    NoContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMessage {
    pub lead_id: LeadId,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    Single(SingleMessage),
    /// Entries in the order the backend returned them.
    Bulk(Vec<GeneratedMessage>),
}

pub fn render_single(message: &SingleMessage) -> String {
    match message {
        SingleMessage::Content(text) => text.clone(),
        SingleMessage::NoContent => NO_CONTENT_FALLBACK.to_string(),
    }
}

/// One `--- Message k (lead_id) ---` block per entry, in response order,
/// blocks separated by a blank line. An empty list renders the fallback text.
pub fn render_bulk(messages: &[GeneratedMessage]) -> String {
    if messages.is_empty() {
        return NO_CONTENT_FALLBACK.to_string();
    }
    messages
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            format!(
                "--- Message {} ({}) ---\n{}\n",
                index + 1,
                entry.lead_id,
                entry.message
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_result(result: &GenerationResult) -> String {
    match result {
        GenerationResult::Single(message) => render_single(message),
        GenerationResult::Bulk(messages) => render_bulk(messages),
    }
}
