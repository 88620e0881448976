//! Multi-format serialization support

use crate::armor::BEGIN_PREFIX;
use crate::binary::MAGIC;
use crate::error::{ProtoError, ProtoResult};

/// Detected serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Binary,
    Json,
    Armor,
}

/// Detect format from raw bytes
pub fn detect_format(data: &[u8]) -> ProtoResult<Format> {
    let start = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(data.len());
    let trimmed = &data[start..];
    if data.starts_with(MAGIC) {
        Ok(Format::Binary)
    } else if trimmed.starts_with(BEGIN_PREFIX.as_bytes()) {
        Ok(Format::Armor)
    } else if trimmed.first() == Some(&b'{') {
        Ok(Format::Json)
    } else {
        Err(ProtoError::InvalidFormat("Unrecognized serialization format".into()))
    }
}

/// Trait for types that can be serialized to multiple formats
pub trait MultiFormat: Sized {
    /// Human-readable type name (for debugging)
    fn format_name() -> &'static str;

    fn to_binary(&self) -> Vec<u8>;

    fn from_binary(bytes: &[u8]) -> ProtoResult<Self>;

    fn to_json(&self) -> ProtoResult<String>;

    fn from_json(s: &str) -> ProtoResult<Self>;

    fn to_armor(&self) -> String;

    fn from_armor(s: &str) -> ProtoResult<Self>;

    /// Deserialize from any format (auto-detect)
    fn from_any(data: &[u8]) -> ProtoResult<Self> {
        match detect_format(data)? {
            Format::Binary => Self::from_binary(data),
            Format::Json => {
                let s = std::str::from_utf8(data)
                    .map_err(|e| ProtoError::InvalidFormat(e.to_string()))?;
                Self::from_json(s)
            }
            Format::Armor => {
                let s = std::str::from_utf8(data)
                    .map_err(|e| ProtoError::InvalidFormat(e.to_string()))?;
                Self::from_armor(s)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(b"TRFM\x01\x01").unwrap(), Format::Binary);
        assert_eq!(detect_format(b"  {\"x\": 1}").unwrap(), Format::Json);
        assert_eq!(
            detect_format(b"\n----- BEGIN TRANSFORM PUBLIC KEY -----\n").unwrap(),
            Format::Armor
        );
        assert!(detect_format(b"\x00\x01").is_err());
    }
}
