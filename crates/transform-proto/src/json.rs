//! JSON shapes matching the original JavaScript binding's objects.
//!
//! Field names are camelCase and every buffer is standard base64:
//!
//! ```json
//! {
//!   "ephemeralPublicKey": { "x": "…", "y": "…" },
//!   "encryptedMessage": "…",
//!   "authHash": "…",
//!   "transformBlocks": [],
//!   "publicSigningKey": "…",
//!   "signature": "…"
//! }
//! ```

use serde::{Deserialize, Serialize};
use transform_core::pre::{
    Ciphertext, EncryptedMessage, EncryptedTempKey, HashedTempKey, ReencryptionKey,
};
use transform_core::{
    AuthHash, CoreError, Ed25519Signature, EncryptedValue, KeyPair, PrivateKey, PublicKey, PublicSigningKey,
    Signed, TransformBlock, TransformChain, TransformKey,
};

use crate::error::{ProtoError, ProtoResult};

mod b64 {
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        BASE64.decode(s.as_bytes()).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyJson {
    #[serde(with = "b64")]
    pub x: Vec<u8>,
    #[serde(with = "b64")]
    pub y: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPairJson {
    pub public_key: PublicKeyJson,
    #[serde(with = "b64")]
    pub private_key: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformBlockJson {
    pub public_key: PublicKeyJson,
    #[serde(with = "b64")]
    pub encrypted_temp_key: Vec<u8>,
    pub random_transform_public_key: PublicKeyJson,
    #[serde(with = "b64")]
    pub random_transform_encrypted_temp_key: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedValueJson {
    pub ephemeral_public_key: PublicKeyJson,
    #[serde(with = "b64")]
    pub encrypted_message: Vec<u8>,
    #[serde(with = "b64")]
    pub auth_hash: Vec<u8>,
    pub transform_blocks: Vec<TransformBlockJson>,
    #[serde(with = "b64")]
    pub public_signing_key: Vec<u8>,
    #[serde(with = "b64")]
    pub signature: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformKeyJson {
    pub ephemeral_public_key: PublicKeyJson,
    pub to_public_key: PublicKeyJson,
    #[serde(with = "b64")]
    pub encrypted_temp_key: Vec<u8>,
    #[serde(with = "b64")]
    pub hashed_temp_key: Vec<u8>,
    #[serde(with = "b64")]
    pub public_signing_key: Vec<u8>,
    #[serde(with = "b64")]
    pub signature: Vec<u8>,
}

impl From<&PublicKey> for PublicKeyJson {
    fn from(key: &PublicKey) -> Self {
        let (x, y) = key.bytes_x_y();
        Self {
            x: x.to_vec(),
            y: y.to_vec(),
        }
    }
}

impl TryFrom<&PublicKeyJson> for PublicKey {
    type Error = ProtoError;

    fn try_from(json: &PublicKeyJson) -> ProtoResult<Self> {
        // x and y are checked separately so one cannot borrow bytes from the other.
        let coordinate = PublicKey::LEN / 2;
        if json.x.len() != coordinate || json.y.len() != coordinate {
            return Err(CoreError::Validation(format!(
                "public key coordinates must be {coordinate} bytes each, got {} and {}",
                json.x.len(),
                json.y.len()
            ))
            .into());
        }
        let mut bytes = Vec::with_capacity(PublicKey::LEN);
        bytes.extend_from_slice(&json.x);
        bytes.extend_from_slice(&json.y);
        Ok(PublicKey::from_bytes(&bytes)?)
    }
}

impl From<&KeyPair> for KeyPairJson {
    fn from(kp: &KeyPair) -> Self {
        Self {
            public_key: (&kp.public_key).into(),
            private_key: kp.private_key.to_bytes().to_vec(),
        }
    }
}

impl TryFrom<&KeyPairJson> for KeyPair {
    type Error = ProtoError;

    fn try_from(json: &KeyPairJson) -> ProtoResult<Self> {
        Ok(KeyPair {
            public_key: (&json.public_key).try_into()?,
            private_key: PrivateKey::from_bytes(&json.private_key)?,
        })
    }
}

impl From<&TransformBlock> for TransformBlockJson {
    fn from(block: &TransformBlock) -> Self {
        Self {
            public_key: block.public_key().into(),
            encrypted_temp_key: block.encrypted_temp_key().to_bytes().to_vec(),
            random_transform_public_key: block.random_transform_public_key().into(),
            random_transform_encrypted_temp_key: block
                .random_transform_encrypted_temp_key()
                .to_bytes()
                .to_vec(),
        }
    }
}

impl TryFrom<&TransformBlockJson> for TransformBlock {
    type Error = ProtoError;

    fn try_from(json: &TransformBlockJson) -> ProtoResult<Self> {
        Ok(TransformBlock::new(
            (&json.public_key).try_into()?,
            EncryptedTempKey::from_bytes(&json.encrypted_temp_key)?,
            (&json.random_transform_public_key).try_into()?,
            EncryptedTempKey::from_bytes(&json.random_transform_encrypted_temp_key)?,
        ))
    }
}

impl From<&EncryptedValue> for EncryptedValueJson {
    fn from(value: &EncryptedValue) -> Self {
        let ct = value.payload();
        Self {
            ephemeral_public_key: ct.ephemeral_public_key().into(),
            encrypted_message: ct.encrypted_message().to_bytes().to_vec(),
            auth_hash: ct.auth_hash().to_bytes().to_vec(),
            transform_blocks: ct.transform_blocks().iter().map(Into::into).collect(),
            public_signing_key: value.public_signing_key().to_bytes().to_vec(),
            signature: value.signature().to_bytes().to_vec(),
        }
    }
}

impl TryFrom<&EncryptedValueJson> for EncryptedValue {
    type Error = ProtoError;

    fn try_from(json: &EncryptedValueJson) -> ProtoResult<Self> {
        let blocks = json
            .transform_blocks
            .iter()
            .map(TransformBlock::try_from)
            .collect::<ProtoResult<Vec<_>>>()?;
        let ciphertext = Ciphertext::new(
            (&json.ephemeral_public_key).try_into()?,
            EncryptedMessage::from_bytes(&json.encrypted_message)?,
            AuthHash::from_bytes(&json.auth_hash)?,
            TransformChain::from_blocks(blocks),
        );
        Ok(Signed::from_parts(
            ciphertext,
            PublicSigningKey::from_bytes(&json.public_signing_key)?,
            Ed25519Signature::from_bytes(&json.signature)?,
        ))
    }
}

impl From<&TransformKey> for TransformKeyJson {
    fn from(key: &TransformKey) -> Self {
        let body = key.payload();
        Self {
            ephemeral_public_key: body.ephemeral_public_key().into(),
            to_public_key: body.to_public_key().into(),
            encrypted_temp_key: body.encrypted_temp_key().to_bytes().to_vec(),
            hashed_temp_key: body.hashed_temp_key().to_bytes().to_vec(),
            public_signing_key: key.public_signing_key().to_bytes().to_vec(),
            signature: key.signature().to_bytes().to_vec(),
        }
    }
}

impl TryFrom<&TransformKeyJson> for TransformKey {
    type Error = ProtoError;

    fn try_from(json: &TransformKeyJson) -> ProtoResult<Self> {
        let body = ReencryptionKey::new(
            (&json.ephemeral_public_key).try_into()?,
            (&json.to_public_key).try_into()?,
            EncryptedTempKey::from_bytes(&json.encrypted_temp_key)?,
            HashedTempKey::from_bytes(&json.hashed_temp_key)?,
        );
        Ok(Signed::from_parts(
            body,
            PublicSigningKey::from_bytes(&json.public_signing_key)?,
            Ed25519Signature::from_bytes(&json.signature)?,
        ))
    }
}
