//! Error taxonomy for the assistant.
//!
//! A classification miss is not an error (the default tier answers it), so there is
//! no variant for it. Remote lookup failures stay inside the documentation search and
//! are converted to absence; only submission failures ever reach a user.

use std::time::Duration;

/// Failure inside a documentation search. Never leaves the remote fallback.
#[derive(Debug, thiserror::Error)]
pub enum RemoteLookupError {
    #[error("documentation search unavailable: {0}")]
    Unavailable(String),

    #[error("documentation search timed out after {0:?}")]
    TimedOut(Duration),
}

/// Failure of one conversation turn at the responder boundary.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("responder failed: {0}")]
    Responder(String),
}

impl SubmissionError {
    pub fn responder(message: impl Into<String>) -> Self {
        Self::Responder(message.into())
    }
}
