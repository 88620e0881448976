//! Key and plaintext generation.

use std::fmt;

use ark_bn254::G1Affine;
use ark_ec::AffineRepr;
use tracing::trace;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CoreError, CoreResult};
use crate::group::{GtElement, PrivateKey, PublicKey, GT_ELEMENT_LEN};
use crate::hash::{symmetric_key, HASH_LEN};
use crate::random::RandomSource;

/// A PRE keypair; `public_key == private_key · G1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPair {
    pub public_key: PublicKey,
    pub private_key: PrivateKey,
}

pub fn generate_key_pair<R: RandomSource + ?Sized>(random: &R) -> CoreResult<KeyPair> {
    let private_key = PrivateKey::random(random)?;
    let public_key = compute_public_key(&private_key)?;
    trace!("generated PRE keypair");
    Ok(KeyPair {
        public_key,
        private_key,
    })
}

/// Deterministic `private_key · G1`.
pub fn compute_public_key(private_key: &PrivateKey) -> CoreResult<PublicKey> {
    PublicKey::from_point(G1Affine::generator() * private_key.scalar())
}

/// A value that can be encrypted: a random element of GT, never raw bytes.
/// Use [`Plaintext::derive_symmetric_key`] to turn it into a DEM key.
/// Zeroized on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Plaintext {
    element: GtElement,
}

impl Plaintext {
    pub const LEN: usize = GT_ELEMENT_LEN;

    /// Parses 384 bytes that must encode an element of GT.
    pub fn from_bytes(bytes: &[u8]) -> CoreResult<Self> {
        let element = GtElement::from_bytes(bytes)?;
        if !element.is_in_target_group() {
            return Err(CoreError::Validation("plaintext is not an element of GT".into()));
        }
        Ok(Self { element })
    }

    pub fn to_bytes(&self) -> [u8; GT_ELEMENT_LEN] {
        self.element.to_bytes()
    }

    pub fn derive_symmetric_key(&self) -> [u8; HASH_LEN] {
        symmetric_key(&self.element)
    }

    pub(crate) fn from_element(element: GtElement) -> Self {
        Self { element }
    }

    pub(crate) fn element(&self) -> &GtElement {
        &self.element
    }
}

impl fmt::Debug for Plaintext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Plaintext(<redacted>)")
    }
}

pub fn generate_plaintext<R: RandomSource + ?Sized>(random: &R) -> CoreResult<Plaintext> {
    Ok(Plaintext::from_element(GtElement::random(random)?))
}

/// SHA-256 of the plaintext encoding.
pub fn derive_symmetric_key(plaintext: &Plaintext) -> [u8; HASH_LEN] {
    plaintext.derive_symmetric_key()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{OsRandom, SeededRandom};

    #[test]
    fn test_keypair_consistent() {
        let kp = generate_key_pair(&OsRandom).unwrap();
        assert_eq!(compute_public_key(&kp.private_key).unwrap(), kp.public_key);
    }

    #[test]
    fn test_seeded_keypairs_reproducible() {
        let a = generate_key_pair(&SeededRandom::from_seed(1)).unwrap();
        let b = generate_key_pair(&SeededRandom::from_seed(1)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_plaintext_roundtrip() {
        let pt = generate_plaintext(&OsRandom).unwrap();
        let bytes = pt.to_bytes();
        assert_eq!(bytes.len(), 384);
        assert_eq!(Plaintext::from_bytes(&bytes).unwrap(), pt);
    }

    #[test]
    fn test_plaintext_rejects_non_gt() {
        let mut bytes = generate_plaintext(&OsRandom).unwrap().to_bytes();
        bytes[100] ^= 0x01;
        assert!(matches!(Plaintext::from_bytes(&bytes), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_plaintext_zeroize() {
        let mut pt = generate_plaintext(&OsRandom).unwrap();
        pt.zeroize();
        assert_eq!(pt.to_bytes(), [0u8; GT_ELEMENT_LEN]);
    }

    #[test]
    fn test_symmetric_key_is_sha256_of_encoding() {
        let pt = generate_plaintext(&OsRandom).unwrap();
        assert_eq!(pt.derive_symmetric_key(), crate::hash::hash256(&pt.to_bytes()));
        assert_eq!(derive_symmetric_key(&pt), pt.derive_symmetric_key());
    }
}
