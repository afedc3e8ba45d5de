use thiserror::Error;

/// Failure taxonomy for explorer operations
///
/// Every variant carries a human-readable message only; no structured codes
/// propagate past the controller boundary. Failures are not retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExplorerError {
    /// The operation referenced an identity the backing store does not know
    #[error("not found: {0}")]
    NotFound(String),
    /// A required field was missing or empty
    #[error("validation failed: {0}")]
    Validation(String),
    /// The collaborator call failed, including backend errors
    #[error("transport failure: {0}")]
    Transport(String),
}
