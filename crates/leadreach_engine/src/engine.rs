use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use leadreach_core::{
    ExportReceipt, GenerationResult, Lead, LeadId, OutreachConfig, RequestId, SearchQuery,
};
use leadreach_logging::{reach_debug, reach_info};

use crate::client::{ClientSettings, GenerationClient, ReqwestGenerationClient};
use crate::export::export_filename;
use crate::persist::AtomicFileWriter;
use crate::{ClientError, EngineEvent};

/// Produces the date stamp used in export filenames.
pub type DateStamp = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Clone)]
pub struct EngineConfig {
    pub client: ClientSettings,
    pub export_dir: PathBuf,
    pub export_date: DateStamp,
}

impl EngineConfig {
    pub fn default_with_export_dir(export_dir: PathBuf) -> Self {
        Self {
            client: ClientSettings::default(),
            export_dir,
            export_date: Arc::new(|| chrono::Local::now().format("%Y-%m-%d").to_string()),
        }
    }
}

/// Receives completions from the engine thread.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    CheckHealth {
        request_id: RequestId,
    },
    Search {
        request_id: RequestId,
        query: SearchQuery,
    },
    Export {
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
}

struct Worker {
    client: Arc<dyn GenerationClient>,
    writer: AtomicFileWriter,
    export_date: DateStamp,
}

/// Runs backend calls on a background tokio runtime. Each command runs as its
/// own task, so completions are emitted in arrival order.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig, sink: Arc<dyn EventSink>) -> Result<Self, ClientError> {
        let client = Arc::new(ReqwestGenerationClient::new(config.client.clone())?);
        Ok(Self::with_client(client, config, sink))
    }

    /// Uses `client` instead of the HTTP client; `config.client` is ignored.
    pub fn with_client(
        client: Arc<dyn GenerationClient>,
        config: EngineConfig,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let worker = Arc::new(Worker {
            client,
            writer: AtomicFileWriter::new(config.export_dir),
            export_date: config.export_date,
        });

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let worker = worker.clone();
                let sink = sink.clone();
                runtime.spawn(async move {
                    let event = worker.handle(command).await;
                    reach_debug!("request {} completed", event.request_id());
                    sink.emit(event);
                });
            }
            reach_info!("engine command channel closed, shutting down");
        });

        Self { cmd_tx }
    }

    pub fn check_health(&self, request_id: RequestId) {
        self.submit(EngineCommand::CheckHealth { request_id });
    }

    pub fn search(&self, request_id: RequestId, query: SearchQuery) {
        self.submit(EngineCommand::Search { request_id, query });
    }

    pub fn export(&self, request_id: RequestId, leads: Vec<Lead>, query: SearchQuery) {
        self.submit(EngineCommand::Export {
            request_id,
            leads,
            query,
        });
    }

    pub fn generate_single(&self, request_id: RequestId, config: OutreachConfig, lead: Lead) {
        self.submit(EngineCommand::GenerateSingle {
            request_id,
            config,
            lead,
        });
    }

    pub fn generate_bulk(&self, request_id: RequestId, lead_ids: Vec<LeadId>, config: OutreachConfig) {
        self.submit(EngineCommand::GenerateBulk {
            request_id,
            lead_ids,
            config,
        });
    }

    fn submit(&self, command: EngineCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

impl Worker {
    async fn handle(&self, command: EngineCommand) -> EngineEvent {
        match command {
            EngineCommand::CheckHealth { request_id } => EngineEvent::HealthChecked {
                request_id,
                result: self.client.health().await,
            },
            EngineCommand::Search { request_id, query } => EngineEvent::SearchCompleted {
                request_id,
                result: self.client.search(&query).await,
            },
            EngineCommand::Export {
                request_id,
                leads,
                query,
            } => EngineEvent::ExportCompleted {
                request_id,
                result: self.export(&leads, &query).await,
            },
            EngineCommand::GenerateSingle {
                request_id,
                config,
                lead,
            } => EngineEvent::GenerationCompleted {
                request_id,
                result: self
                    .client
                    .generate_single(&config, &lead)
                    .await
                    .map(GenerationResult::Single),
            },
            EngineCommand::GenerateBulk {
                request_id,
                lead_ids,
                config,
            } => EngineEvent::GenerationCompleted {
                request_id,
                result: self
                    .client
                    .generate_bulk(&lead_ids, &config)
                    .await
                    .map(GenerationResult::Bulk),
            },
        }
    }

    async fn export(&self, leads: &[Lead], query: &SearchQuery) -> Result<ExportReceipt, ClientError> {
        let bytes = self.client.export(leads).await?;
        let filename = export_filename(query, &(self.export_date)());
        let path = self.writer.write(&filename, &bytes)?;
        reach_info!("saved export of {} leads to {:?}", leads.len(), path);
        Ok(ExportReceipt {
            lead_count: leads.len(),
            path: path.display().to_string(),
        })
    }
}
