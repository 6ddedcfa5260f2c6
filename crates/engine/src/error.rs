//! Engine error taxonomy
//!
//! Local validation errors never reach the network; remote errors are
//! never retried automatically - the trader must re-trigger the action.
//! Every remote variant carries the most specific message available,
//! preferring backend-provided text over generic transport text.

use orderdesk_ports::ServiceError;
use thiserror::Error;

/// Account link rejected - no session formed, prior state retained
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("link rejected: {0}")]
    Rejected(String),

    #[error("link failed: {0}")]
    Transport(String),
}

impl From<ServiceError> for AuthError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Rejected(msg) => AuthError::Rejected(msg),
            ServiceError::Transport(msg) => AuthError::Transport(msg),
        }
    }
}

/// A local precondition failed - no network call was made
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no instrument selected - pick a symbol from the resolver results")]
    MissingInstrument,

    #[error("quantity must be a positive integer")]
    InvalidQuantity,

    #[error("limit orders require a positive price")]
    MissingLimitPrice,
}

/// Order submission failed - the draft is left unchanged
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("order rejected: {0}")]
    Rejected(String),

    #[error("order failed: {0}")]
    Transport(String),
}

impl From<ServiceError> for SubmissionError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Rejected(msg) => SubmissionError::Rejected(msg),
            ServiceError::Transport(msg) => SubmissionError::Transport(msg),
        }
    }
}

/// Position close failed - the position list is left unchanged
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CloseError {
    #[error("close not confirmed by the trader")]
    NotConfirmed,

    #[error("position has no security id - cannot be closed")]
    MissingSecurityId,

    #[error("close rejected: {0}")]
    Rejected(String),

    #[error("close failed: {0}")]
    Transport(String),
}

impl From<ServiceError> for CloseError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Rejected(msg) => CloseError::Rejected(msg),
            ServiceError::Transport(msg) => CloseError::Transport(msg),
        }
    }
}
