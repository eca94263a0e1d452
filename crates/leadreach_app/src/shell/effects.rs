use std::sync::{mpsc, Arc};

use leadreach_core::{Effect, Msg, RequestFailure};
use leadreach_engine::{EngineConfig, EngineEvent, EngineHandle, EventSink};
use leadreach_logging::{reach_info, reach_warn};

use super::ShellEvent;

/// Hands core effects to the engine. Completions come back through
/// [`MsgSink`] as shell events.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: EngineConfig, events: mpsc::Sender<ShellEvent>) -> anyhow::Result<Self> {
        let engine = EngineHandle::new(config, Arc::new(MsgSink { tx: events }))?;
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::CheckHealth { request_id } => {
                    reach_info!("CheckHealth request_id={}", request_id);
                    self.engine.check_health(request_id);
                }
                Effect::SearchLeads { request_id, query } => {
                    reach_info!(
                        "SearchLeads request_id={} industry={:?} location={:?}",
                        request_id,
                        query.industry,
                        query.location
                    );
                    self.engine.search(request_id, query);
                }
                Effect::ExportLeads {
                    request_id,
                    leads,
                    query,
                } => {
                    reach_info!("ExportLeads request_id={} leads={}", request_id, leads.len());
                    self.engine.export(request_id, leads, query);
                }
                Effect::GenerateSingle {
                    request_id,
                    config,
                    lead,
                } => {
                    reach_info!("GenerateSingle request_id={} lead={}", request_id, lead.id);
                    self.engine.generate_single(request_id, config, lead);
                }
                Effect::GenerateBulk {
                    request_id,
                    lead_ids,
                    config,
                } => {
                    reach_info!(
                        "GenerateBulk request_id={} leads={}",
                        request_id,
                        lead_ids.len()
                    );
                    self.engine.generate_bulk(request_id, lead_ids, config);
                }
            }
        }
    }
}

struct MsgSink {
    tx: mpsc::Sender<ShellEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(ShellEvent::Msg(completion_msg(event)));
    }
}

/// Translates an engine completion into the message the state machine expects.
pub fn completion_msg(event: EngineEvent) -> Msg {
    if let Some(err) = event_error(&event) {
        reach_warn!("request {} failed: {}", event.request_id(), err);
    }
    match event {
        EngineEvent::HealthChecked { request_id, result } => Msg::HealthChecked {
            request_id,
            result: result.map_err(RequestFailure::from),
        },
        EngineEvent::SearchCompleted { request_id, result } => Msg::SearchCompleted {
            request_id,
            result: result.map_err(RequestFailure::from),
        },
        EngineEvent::ExportCompleted { request_id, result } => Msg::ExportCompleted {
            request_id,
            result: result.map_err(RequestFailure::from),
        },
        EngineEvent::GenerationCompleted { request_id, result } => Msg::GenerationCompleted {
            request_id,
            result: result.map_err(RequestFailure::from),
        },
    }
}

fn event_error(event: &EngineEvent) -> Option<String> {
    match event {
        EngineEvent::HealthChecked { result, .. } => result.as_ref().err().map(ToString::to_string),
        EngineEvent::SearchCompleted { result, .. } => result.as_ref().err().map(ToString::to_string),
        EngineEvent::ExportCompleted { result, .. } => result.as_ref().err().map(ToString::to_string),
        EngineEvent::GenerationCompleted { result, .. } => {
            result.as_ref().err().map(ToString::to_string)
        }
    }
}
