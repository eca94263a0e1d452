use std::fmt;

/// Raw diagnostic payload of a failed request, kept apart from the derived
/// display message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    pub status: u16,
    pub raw_body: String,
}

impl ErrorDetail {
    pub fn render(&self) -> String {
        format!("Status: {}\nResponse: {}", self.status, self.raw_body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// A required field or selection was missing; no request was sent.
    Validation,
    /// The backend could not be reached.
    Transport,
    /// Non-2xx response.
    Server { status: u16 },
    /// 2xx response whose body does not have the expected shape.
    MalformedResponse,
    /// The response arrived but could not be written locally.
    Storage,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Validation => write!(f, "validation error"),
            FailureKind::Transport => write!(f, "transport error"),
            FailureKind::Server { status } => write!(f, "server error {status}"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::Storage => write!(f, "storage error"),
        }
    }
}

/// Uniform failure shape delivered back into the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailure {
    pub kind: FailureKind,
    pub message: String,
    pub detail: Option<ErrorDetail>,
}

impl RequestFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: ErrorDetail) -> Self {
        self.detail = Some(detail);
        self
    }
}
