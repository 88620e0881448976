//! SHA-256 based hashing: the public `hash256`, the authentication hash that
//! binds a plaintext to its shared secret, and the hash-to-group maps used by
//! transform keys and Schnorr challenges.

use ark_bn254::{Fr, G2Affine, G2Projective};
use ark_ec::AffineRepr;
use ark_ff::PrimeField;
use sha2::{Digest, Sha256};

use crate::error::{CoreError, CoreResult};
use crate::group::GtElement;

pub const HASH_LEN: usize = 32;

const AUTH_HASH_DOMAIN: &[u8] = b"transform-engine/auth-hash/v1";
const TEMP_KEY_DOMAIN: &[u8] = b"transform-engine/hash-to-g2/v1";
const CHALLENGE_DOMAIN: &[u8] = b"transform-engine/schnorr-challenge/v1";

/// SHA-256 of arbitrary bytes.
pub fn hash256(bytes: &[u8]) -> [u8; HASH_LEN] {
    digest(&[bytes])
}

fn digest(parts: &[&[u8]]) -> [u8; HASH_LEN] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; HASH_LEN];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// Two domain-separated digests reduced mod the group order.
fn wide_scalar(domain: &[u8], parts: &[&[u8]]) -> Fr {
    let mut wide = [0u8; 2 * HASH_LEN];
    for (counter, half) in wide.chunks_exact_mut(HASH_LEN).enumerate() {
        let counter = [counter as u8];
        let mut all: Vec<&[u8]> = Vec::with_capacity(parts.len() + 2);
        all.push(domain);
        all.push(&counter);
        all.extend_from_slice(parts);
        half.copy_from_slice(&digest(&all));
    }
    Fr::from_be_bytes_mod_order(&wide)
}

/// Maps a temp key into G2.
///
/// The point is `h · g2` for a hashed scalar `h`, so its discrete log is
/// public. That is intentional: the map only has to be deterministic and
/// one-way in the temp key, which stays hidden in GT. Delegation security
/// rests on the temp key and `sk`, not on `H2(K)` having an unknown log, so
/// this is the same collusion profile as a point-hashing map.
pub(crate) fn hash_to_twist(temp_key: &GtElement) -> G2Projective {
    G2Affine::generator() * wide_scalar(TEMP_KEY_DOMAIN, &[&temp_key.to_bytes()])
}

pub(crate) fn challenge_scalar(commitment: &[u8], public_key: &[u8], message: &[u8]) -> Fr {
    wide_scalar(CHALLENGE_DOMAIN, &[commitment, public_key, message])
}

/// Hash binding a plaintext to the secret it was masked with; carried in
/// every encrypted value and checked after decryption.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AuthHash([u8; HASH_LEN]);

impl AuthHash {
    pub const LEN: usize = HASH_LEN;

    pub fn new(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> CoreResult<Self> {
        let bytes: [u8; HASH_LEN] = bytes
            .try_into()
            .map_err(|_| CoreError::wrong_length("auth hash", HASH_LEN, bytes.len()))?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }

    pub fn to_bytes(&self) -> [u8; HASH_LEN] {
        self.0
    }

    pub(crate) fn compute(plaintext: &GtElement, secret: &GtElement) -> Self {
        Self(digest(&[
            AUTH_HASH_DOMAIN,
            &plaintext.to_bytes(),
            &secret.to_bytes(),
        ]))
    }

    /// Constant-time comparison.
    pub(crate) fn matches(&self, other: &AuthHash) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

/// 32-byte symmetric key derived from a plaintext, for use with a DEM.
pub(crate) fn symmetric_key(plaintext: &GtElement) -> [u8; HASH_LEN] {
    hash256(&plaintext.to_bytes())
}
