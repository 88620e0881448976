//! [`MultiFormat`] implementations for transform-core types.

use tracing::trace;
use transform_core::{EncryptedValue, PublicKey, TransformKey};

use crate::armor::{armor_decode, armor_encode, ArmorType};
use crate::binary::{self, VERSION};
use crate::error::ProtoResult;
use crate::format::MultiFormat;
use crate::json::{EncryptedValueJson, PublicKeyJson, TransformKeyJson};

fn armor_with_version(armor_type: ArmorType, extra: &[(&str, &str)], payload: &[u8]) -> String {
    let version = VERSION.to_string();
    let mut headers = vec![("Version", version.as_str())];
    headers.extend_from_slice(extra);
    armor_encode(armor_type, &headers, payload)
}

impl MultiFormat for EncryptedValue {
    fn format_name() -> &'static str {
        "EncryptedValue"
    }

    fn to_binary(&self) -> Vec<u8> {
        binary::encode_encrypted_value(self)
    }

    fn from_binary(bytes: &[u8]) -> ProtoResult<Self> {
        binary::decode_encrypted_value(bytes)
    }

    fn to_json(&self) -> ProtoResult<String> {
        Ok(serde_json::to_string_pretty(&EncryptedValueJson::from(self))?)
    }

    fn from_json(s: &str) -> ProtoResult<Self> {
        let json: EncryptedValueJson = serde_json::from_str(s)?;
        EncryptedValue::try_from(&json)
    }

    fn to_armor(&self) -> String {
        let level = self.level().to_string();
        armor_with_version(
            ArmorType::EncryptedValue,
            &[("Level", level.as_str())],
            &self.to_binary(),
        )
    }

    fn from_armor(s: &str) -> ProtoResult<Self> {
        let block = armor_decode(s)?;
        trace!(headers = block.headers.len(), "decoded armored encrypted value");
        Self::from_binary(&block.expect(ArmorType::EncryptedValue)?)
    }
}

impl MultiFormat for TransformKey {
    fn format_name() -> &'static str {
        "TransformKey"
    }

    fn to_binary(&self) -> Vec<u8> {
        binary::encode_transform_key(self)
    }

    fn from_binary(bytes: &[u8]) -> ProtoResult<Self> {
        binary::decode_transform_key(bytes)
    }

    fn to_json(&self) -> ProtoResult<String> {
        Ok(serde_json::to_string_pretty(&TransformKeyJson::from(self))?)
    }

    fn from_json(s: &str) -> ProtoResult<Self> {
        let json: TransformKeyJson = serde_json::from_str(s)?;
        TransformKey::try_from(&json)
    }

    fn to_armor(&self) -> String {
        armor_with_version(ArmorType::TransformKey, &[], &self.to_binary())
    }

    fn from_armor(s: &str) -> ProtoResult<Self> {
        Self::from_binary(&armor_decode(s)?.expect(ArmorType::TransformKey)?)
    }
}

impl MultiFormat for PublicKey {
    fn format_name() -> &'static str {
        "PublicKey"
    }

    fn to_binary(&self) -> Vec<u8> {
        binary::encode_public_key(self)
    }

    fn from_binary(bytes: &[u8]) -> ProtoResult<Self> {
        binary::decode_public_key(bytes)
    }

    fn to_json(&self) -> ProtoResult<String> {
        Ok(serde_json::to_string(&PublicKeyJson::from(self))?)
    }

    fn from_json(s: &str) -> ProtoResult<Self> {
        let json: PublicKeyJson = serde_json::from_str(s)?;
        PublicKey::try_from(&json)
    }

    fn to_armor(&self) -> String {
        armor_with_version(ArmorType::PublicKey, &[], &self.to_binary())
    }

    fn from_armor(s: &str) -> ProtoResult<Self> {
        Self::from_binary(&armor_decode(s)?.expect(ArmorType::PublicKey)?)
    }
}
