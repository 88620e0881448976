use thiserror::Error;

/// Errors from transform engine operations.
///
/// Every variant is terminal: operations never leave partial state behind, so
/// callers either retry the whole call or surface the failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Random source failure: {0}")]
    Randomness(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Signature verification failed: {0}")]
    SignatureVerification(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    pub(crate) fn wrong_length(what: &str, expected: usize, actual: usize) -> Self {
        CoreError::Validation(format!("{what} must be {expected} bytes, got {actual}"))
    }
}
