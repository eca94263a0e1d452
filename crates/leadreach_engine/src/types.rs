use leadreach_core::{
    ErrorDetail, ExportReceipt, FailureKind, GenerationResult, HealthReport, RequestFailure,
    RequestId, SearchOutcome,
};

/// Shown whenever the backend cannot be reached at all.
pub const TRANSPORT_GUIDANCE: &str =
    "Unable to Connect to the Server. Please Check if the Backend is Running.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// Rejected before any request was sent.
    #[error("{0}")]
    Validation(String),
    #[error("Unable to Connect to the Server. Please Check if the Backend is Running.")]
    Transport { cause: String },
    /// Non-2xx response. `message` is the server `detail` or the status line.
    #[error("{message}")]
    Server {
        status: u16,
        message: String,
        raw_body: String,
    },
    #[error("Invalid Response Format: {0}")]
    MalformedResponse(String),
    #[error("Export Failed: Received Empty File")]
    EmptyExport,
    #[error("Export Failed: response too large (max {max_bytes} bytes)")]
    TooLarge { max_bytes: u64 },
    #[error("Failed to save file: {0}")]
    Storage(String),
}

impl ClientError {
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        ClientError::Transport {
            cause: err.to_string(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            ClientError::Validation(_) => FailureKind::Validation,
            ClientError::Transport { .. } => FailureKind::Transport,
            ClientError::Server { status, .. } => FailureKind::Server { status: *status },
            ClientError::MalformedResponse(_)
            | ClientError::EmptyExport
            | ClientError::TooLarge { .. } => FailureKind::MalformedResponse,
            ClientError::Storage(_) => FailureKind::Storage,
        }
    }

    /// Raw status and body, kept for diagnostics independent of the message.
    pub fn detail(&self) -> Option<ErrorDetail> {
        match self {
            ClientError::Server {
                status, raw_body, ..
            } => Some(ErrorDetail {
                status: *status,
                raw_body: raw_body.clone(),
            }),
            _ => None,
        }
    }
}

impl From<ClientError> for RequestFailure {
    fn from(err: ClientError) -> Self {
        let failure = RequestFailure::new(err.kind(), err.to_string());
        match err.detail() {
            Some(detail) => failure.with_detail(detail),
            None => failure,
        }
    }
}

/// Completion of one engine command, tagged with the request id it answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    HealthChecked {
        request_id: RequestId,
        result: Result<HealthReport, ClientError>,
    },
    SearchCompleted {
        request_id: RequestId,
        result: Result<SearchOutcome, ClientError>,
    },
    ExportCompleted {
        request_id: RequestId,
        result: Result<ExportReceipt, ClientError>,
    },
    GenerationCompleted {
        request_id: RequestId,
        result: Result<GenerationResult, ClientError>,
    },
}

impl EngineEvent {
    pub fn request_id(&self) -> RequestId {
        match self {
            EngineEvent::HealthChecked { request_id, .. }
            | EngineEvent::SearchCompleted { request_id, .. }
            | EngineEvent::ExportCompleted { request_id, .. }
            | EngineEvent::GenerationCompleted { request_id, .. } => *request_id,
        }
    }
}
