use std::time::Duration;

use thiserror::Error;

/// Everything that can go wrong between receiving a request and holding
/// decoded audio.
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// Upstream answered but reported a non-zero status or sent no audio
    #[error("upstream rejected the request (status_code={status_code:?}, status_msg={status_msg:?})")]
    Rejected {
        status_code: Option<i64>,
        status_msg: Option<String>,
    },

    #[error("MINIMAX_API_KEY not configured")]
    MissingCredential,

    #[error("upstream request timed out after {0:?}")]
    Timeout(Duration),

    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned HTTP {0}")]
    UpstreamStatus(reqwest::StatusCode),

    #[error("upstream response is not valid JSON: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    #[error("failed to encode upstream payload: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("upstream audio is not valid hex: {0}")]
    Decoding(#[from] hex::FromHexError),
}

/// Coarse classification used to pick the client-visible status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UpstreamRejected,
    TransportFault,
    DecodingFault,
}

impl SynthesisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SynthesisError::Rejected { .. } => ErrorKind::UpstreamRejected,
            SynthesisError::MissingCredential
            | SynthesisError::Timeout(_)
            | SynthesisError::Transport(_)
            | SynthesisError::UpstreamStatus(_)
            | SynthesisError::MalformedResponse(_)
            | SynthesisError::Encode(_) => ErrorKind::TransportFault,
            SynthesisError::Decoding(_) => ErrorKind::DecodingFault,
        }
    }
}
