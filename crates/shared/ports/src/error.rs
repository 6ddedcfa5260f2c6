use thiserror::Error;

/// Failures at the remote trading-service boundary
///
/// A response with a false or absent success indicator is `Rejected`
/// and carries the backend-provided message; callers treat it exactly
/// like a transport failure (surface, never assume partial success).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{0}")]
    Rejected(String),

    #[error("transport failure: {0}")]
    Transport(String),
}

impl ServiceError {
    /// The most specific message available for display to the trader
    pub fn message(&self) -> &str {
        match self {
            ServiceError::Rejected(msg) => msg,
            ServiceError::Transport(msg) => msg,
        }
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
