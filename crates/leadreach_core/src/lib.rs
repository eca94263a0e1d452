//! Leadreach core: pure state machine and view-model helpers.
//!
//! Nothing in this crate performs IO. The front end feeds [`Msg`]s into
//! [`update`], executes the returned [`Effect`]s elsewhere, and feeds the
//! completions back in as further messages.
mod aggregate;
mod composer;
mod effect;
mod failure;
mod lead;
mod msg;
mod outreach;
mod search;
mod selection;
mod state;
mod update;
mod view_controller;
mod view_model;

pub use aggregate::{
    render_bulk, render_result, render_single, GeneratedMessage, GenerationResult, SingleMessage,
    NO_CONTENT_FALLBACK,
};
pub use composer::{filtered_leads, GenerationMode, GenerationRequest, GenerationTarget, OutreachComposer};
pub use effect::{Effect, RequestId};
pub use failure::{ErrorDetail, FailureKind, RequestFailure};
pub use lead::{Lead, LeadId, Priority, SearchQuery};
pub use msg::Msg;
pub use outreach::{ConfigEdit, ConfigField, MessageType, OutreachConfig, PersonalizationLevel, Tone};
pub use search::{ExportReceipt, LeadSearchSession, SearchOutcome};
pub use selection::{SelectionSet, SelectionState};
pub use state::{AppState, BackendStatus, HealthReport};
pub use update::update;
pub use view_controller::{Screen, ScreenKind};
pub use view_model::{AppViewModel, LeadRowView, LeadsViewModel, OutreachViewModel, PickRowView};
