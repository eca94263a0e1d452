//! Leadreach engine: backend client, IO and effect execution.
mod client;
mod engine;
mod export;
mod persist;
mod types;
mod wire;

pub use client::{ClientSettings, GenerationClient, ReqwestGenerationClient, DEFAULT_BASE_URL};
pub use engine::{ChannelEventSink, DateStamp, EngineConfig, EngineHandle, EventSink};
pub use export::{export_filename, outreach_filename};
pub use persist::{ensure_export_dir, AtomicFileWriter, PersistError};
pub use types::{ClientError, EngineEvent, TRANSPORT_GUIDANCE};
