use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtoError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Armor parse error: {0}")]
    ArmorParse(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: u8, actual: u8 },

    #[error("Core error: {0}")]
    Core(#[from] transform_core::CoreError),
}

pub type ProtoResult<T> = Result<T, ProtoError>;
