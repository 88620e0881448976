//! Length-implied binary framing.
//!
//! ```text
//! "TRFM" ‖ version (1) ‖ kind (1) ‖ body
//! ```
//!
//! Bodies are the fixed-size encodings from transform-core. An encrypted
//! value body is its signed payload followed by the public signing key and
//! signature, so the block count follows from the length.

use transform_core::pre::{Ciphertext, ReencryptionKey, REENCRYPTION_KEY_LEN};
use transform_core::sign::{PUBLIC_SIGNING_KEY_LEN, SIGNATURE_LEN};
use transform_core::{Ed25519Signature, EncryptedValue, PublicKey, PublicSigningKey, Signed, TransformKey};

use crate::error::{ProtoError, ProtoResult};

pub const MAGIC: &[u8; 4] = b"TRFM";
pub const VERSION: u8 = 1;
pub const HEADER_LEN: usize = MAGIC.len() + 2;

const SEAL_LEN: usize = PUBLIC_SIGNING_KEY_LEN + SIGNATURE_LEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Kind {
    EncryptedValue = 1,
    TransformKey = 2,
    PublicKey = 3,
}

impl TryFrom<u8> for Kind {
    type Error = ProtoError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::EncryptedValue),
            2 => Ok(Self::TransformKey),
            3 => Ok(Self::PublicKey),
            other => Err(ProtoError::InvalidFormat(format!("Unknown binary kind: {other}"))),
        }
    }
}

fn frame(kind: Kind, body: &[&[u8]]) -> Vec<u8> {
    let len = HEADER_LEN + body.iter().map(|part| part.len()).sum::<usize>();
    let mut out = Vec::with_capacity(len);
    out.extend_from_slice(MAGIC);
    out.push(VERSION);
    out.push(kind as u8);
    for part in body {
        out.extend_from_slice(part);
    }
    out
}

fn unframe(bytes: &[u8], expected: Kind) -> ProtoResult<&[u8]> {
    if bytes.len() < HEADER_LEN || &bytes[..MAGIC.len()] != MAGIC {
        return Err(ProtoError::InvalidFormat("Missing binary header".into()));
    }
    let version = bytes[MAGIC.len()];
    if version != VERSION {
        return Err(ProtoError::VersionMismatch {
            expected: VERSION,
            actual: version,
        });
    }
    let kind = Kind::try_from(bytes[MAGIC.len() + 1])?;
    if kind != expected {
        return Err(ProtoError::InvalidFormat(format!(
            "Expected {expected:?}, found {kind:?}"
        )));
    }
    Ok(&bytes[HEADER_LEN..])
}

/// Splits off the trailing public signing key and signature.
fn split_seal(body: &[u8]) -> ProtoResult<(&[u8], PublicSigningKey, Ed25519Signature)> {
    if body.len() < SEAL_LEN {
        return Err(ProtoError::InvalidFormat("Body too short for signature".into()));
    }
    let (payload, seal) = body.split_at(body.len() - SEAL_LEN);
    let (psk, sig) = seal.split_at(PUBLIC_SIGNING_KEY_LEN);
    Ok((
        payload,
        PublicSigningKey::from_bytes(psk)?,
        Ed25519Signature::from_bytes(sig)?,
    ))
}

pub fn encode_encrypted_value(value: &EncryptedValue) -> Vec<u8> {
    frame(
        Kind::EncryptedValue,
        &[
            &value.payload().to_bytes(),
            value.public_signing_key().as_bytes(),
            value.signature().as_bytes(),
        ],
    )
}

pub fn decode_encrypted_value(bytes: &[u8]) -> ProtoResult<EncryptedValue> {
    let (payload, psk, sig) = split_seal(unframe(bytes, Kind::EncryptedValue)?)?;
    Ok(Signed::from_parts(Ciphertext::from_bytes(payload)?, psk, sig))
}

pub fn encode_transform_key(key: &TransformKey) -> Vec<u8> {
    frame(Kind::TransformKey, &[&key.to_bytes(), key.signature().as_bytes()])
}

pub fn decode_transform_key(bytes: &[u8]) -> ProtoResult<TransformKey> {
    let body = unframe(bytes, Kind::TransformKey)?;
    if body.len() != REENCRYPTION_KEY_LEN + SEAL_LEN {
        return Err(ProtoError::InvalidFormat(format!(
            "Transform key body must be {} bytes, got {}",
            REENCRYPTION_KEY_LEN + SEAL_LEN,
            body.len()
        )));
    }
    let (payload, psk, sig) = split_seal(body)?;
    Ok(Signed::from_parts(ReencryptionKey::from_bytes(payload)?, psk, sig))
}

pub fn encode_public_key(key: &PublicKey) -> Vec<u8> {
    frame(Kind::PublicKey, &[&key.to_bytes()])
}

pub fn decode_public_key(bytes: &[u8]) -> ProtoResult<PublicKey> {
    Ok(PublicKey::from_bytes(unframe(bytes, Kind::PublicKey)?)?)
}
