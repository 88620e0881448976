//! ASCII armor for human-readable export
//!
//! Format:
//! ```text
//! ----- BEGIN TRANSFORM ENCRYPTED VALUE -----
//! Version: 1
//! Level: 2
//!
//! VFJGTQEBLmh3b1mB3Vf7kV9cY4xqYk3Lr2dQzvN1JxH6o9QmS0q8vB7hX2u1f3Yw...
//! (base64 of the binary encoding continues)
//! ----- END TRANSFORM ENCRYPTED VALUE -----
//! ```

use std::collections::HashMap;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::error::{ProtoError, ProtoResult};

pub const BEGIN_PREFIX: &str = "----- BEGIN TRANSFORM ";
const END_PREFIX: &str = "----- END TRANSFORM ";
const DELIMITER_SUFFIX: &str = " -----";
const LINE_WIDTH: usize = 64;

/// Types of armored content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmorType {
    PublicKey,
    EncryptedValue,
    TransformKey,
}

impl ArmorType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::PublicKey => "PUBLIC KEY",
            Self::EncryptedValue => "ENCRYPTED VALUE",
            Self::TransformKey => "TRANSFORM KEY",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "PUBLIC KEY" => Some(Self::PublicKey),
            "ENCRYPTED VALUE" => Some(Self::EncryptedValue),
            "TRANSFORM KEY" => Some(Self::TransformKey),
            _ => None,
        }
    }
}

/// Parsed armor block
#[derive(Debug)]
pub struct ArmorBlock {
    pub armor_type: ArmorType,
    pub headers: HashMap<String, String>,
    pub payload: Vec<u8>,
}

impl ArmorBlock {
    /// Fails unless the block holds `expected`.
    pub fn expect(self, expected: ArmorType) -> ProtoResult<Vec<u8>> {
        if self.armor_type != expected {
            return Err(ProtoError::ArmorParse(format!(
                "Expected {}, found {}",
                expected.label(),
                self.armor_type.label()
            )));
        }
        Ok(self.payload)
    }
}

/// Encode data as ASCII armor
pub fn armor_encode(armor_type: ArmorType, headers: &[(&str, &str)], payload: &[u8]) -> String {
    let mut result = format!("{BEGIN_PREFIX}{}{DELIMITER_SUFFIX}\n", armor_type.label());

    for (key, value) in headers {
        result.push_str(&format!("{key}: {value}\n"));
    }

    // Blank line before payload
    result.push('\n');

    // base64 output is ASCII, so byte-wise wrapping never splits a character
    let b64 = BASE64.encode(payload);
    let mut rest = b64.as_str();
    while !rest.is_empty() {
        let (line, tail) = rest.split_at(rest.len().min(LINE_WIDTH));
        result.push_str(line);
        result.push('\n');
        rest = tail;
    }

    result.push_str(&format!("{END_PREFIX}{}{DELIMITER_SUFFIX}\n", armor_type.label()));
    result
}

/// Decode ASCII armor to bytes
pub fn armor_decode(s: &str) -> ProtoResult<ArmorBlock> {
    let lines: Vec<&str> = s.lines().collect();

    let begin_idx = lines
        .iter()
        .position(|l| l.starts_with(BEGIN_PREFIX))
        .ok_or_else(|| ProtoError::ArmorParse("Missing BEGIN line".into()))?;

    let type_str = lines[begin_idx]
        .strip_prefix(BEGIN_PREFIX)
        .and_then(|s| s.strip_suffix(DELIMITER_SUFFIX))
        .ok_or_else(|| ProtoError::ArmorParse("Invalid BEGIN format".into()))?;

    let armor_type = ArmorType::from_label(type_str)
        .ok_or_else(|| ProtoError::ArmorParse(format!("Unknown armor type: {type_str}")))?;

    let end_marker = format!("{END_PREFIX}{}{DELIMITER_SUFFIX}", armor_type.label());
    let end_idx = lines
        .iter()
        .skip(begin_idx + 1)
        .position(|l| *l == end_marker)
        .map(|i| begin_idx + 1 + i)
        .ok_or_else(|| ProtoError::ArmorParse("Missing END line".into()))?;

    // Headers run until the first blank line
    let mut headers = HashMap::new();
    let mut payload_start = begin_idx + 1;
    for (i, line) in lines[begin_idx + 1..end_idx].iter().enumerate() {
        if line.is_empty() {
            payload_start = begin_idx + 1 + i + 1;
            break;
        }
        if let Some((key, value)) = line.split_once(": ") {
            headers.insert(key.to_string(), value.to_string());
        }
    }

    let payload_b64: String = lines[payload_start..end_idx]
        .iter()
        .flat_map(|l| l.chars())
        .filter(|c| !c.is_whitespace())
        .collect();

    let payload = BASE64.decode(&payload_b64)?;

    Ok(ArmorBlock {
        armor_type,
        headers,
        payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_armor_roundtrip() {
        let payload = b"Hello, transform!";
        let headers = [("Version", "1"), ("Level", "0")];

        let armored = armor_encode(ArmorType::EncryptedValue, &headers, payload);
        assert!(armored.starts_with("----- BEGIN TRANSFORM ENCRYPTED VALUE -----\n"));
        let decoded = armor_decode(&armored).unwrap();

        assert_eq!(decoded.armor_type, ArmorType::EncryptedValue);
        assert_eq!(decoded.headers.get("Version"), Some(&"1".to_string()));
        assert_eq!(decoded.payload, payload);
    }

    #[test]
    fn test_armor_long_payload_wraps() {
        let payload = vec![0u8; 1024];
        let armored = armor_encode(ArmorType::TransformKey, &[], &payload);
        assert!(armored.lines().all(|l| l.len() <= LINE_WIDTH || l.starts_with("-----")));
        let decoded = armor_decode(&armored).unwrap();
        assert_eq!(decoded.payload, payload);
    }

    #[test]
    fn test_expect_rejects_other_type() {
        let armored = armor_encode(ArmorType::PublicKey, &[], b"x");
        let block = armor_decode(&armored).unwrap();
        assert!(block.expect(ArmorType::TransformKey).is_err());
    }

    #[test]
    fn test_missing_end_line() {
        let armored = armor_encode(ArmorType::PublicKey, &[], b"x");
        let truncated: String = armored.lines().take(3).collect::<Vec<_>>().join("\n");
        assert!(matches!(armor_decode(&truncated), Err(ProtoError::ArmorParse(_))));
    }
}
