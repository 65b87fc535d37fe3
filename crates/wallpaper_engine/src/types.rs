use std::fmt;

/// Step of a single candidate download reported through a `ProgressSink`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Downloading,
    Writing,
    Probing,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// `bytes` is the running total while downloading and the body size afterwards.
    Progress {
        url: String,
        stage: Stage,
        bytes: Option<u64>,
    },
    CandidateRejected {
        url: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    /// Hops followed before `final_url`.
    pub redirect_count: usize,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    /// `actual` is the declared `Content-Length` when the server sent one.
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Network,
    /// The body could not be written to its destination.
    Storage,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "server answered {code}"),
            FailureKind::Timeout => write!(f, "timed out"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge {
                max_bytes,
                actual: Some(actual),
            } => write!(f, "image is {actual} bytes, limit is {max_bytes}"),
            FailureKind::TooLarge { max_bytes, actual: None } => {
                write!(f, "image exceeds {max_bytes} bytes")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "not an image ({content_type})")
            }
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Storage => write!(f, "could not store the body"),
        }
    }
}
