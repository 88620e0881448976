//! Ed25519 signatures via ed25519-dalek, keyed by the 64-byte expanded secret.

use std::fmt;

use ed25519_dalek::hazmat::{raw_sign, ExpandedSecretKey};
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use sha2::{Digest, Sha512};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{CoreError, CoreResult};
use crate::random::RandomSource;

pub const SIGNING_KEYPAIR_LEN: usize = 64;
pub const PUBLIC_SIGNING_KEY_LEN: usize = 32;
pub const SIGNATURE_LEN: usize = 64;

/// An Ed25519 signing key in expanded form: clamped scalar ‖ hash prefix
/// (zeroized on drop).
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SigningKeypair {
    bytes: [u8; SIGNING_KEYPAIR_LEN],
}

impl SigningKeypair {
    pub const LEN: usize = SIGNING_KEYPAIR_LEN;

    pub fn generate<R: RandomSource + ?Sized>(random: &R) -> CoreResult<Self> {
        let mut seed = Zeroizing::new([0u8; 32]);
        random.fill_bytes(&mut seed[..])?;
        Ok(Self::from_seed(&seed))
    }

    /// Expands a standard 32-byte Ed25519 seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let mut digest = Sha512::digest(seed);
        let mut keypair = Self {
            bytes: [0u8; SIGNING_KEYPAIR_LEN],
        };
        keypair.bytes.copy_from_slice(&digest);
        digest.as_mut_slice().zeroize();
        keypair.bytes[0] &= 248;
        keypair.bytes[31] &= 127;
        keypair.bytes[31] |= 64;
        keypair
    }

    pub fn from_bytes(bytes: &[u8]) -> CoreResult<Self> {
        let bytes: [u8; SIGNING_KEYPAIR_LEN] = bytes
            .try_into()
            .map_err(|_| CoreError::wrong_length("signing keypair", SIGNING_KEYPAIR_LEN, bytes.len()))?;
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8; SIGNING_KEYPAIR_LEN] {
        &self.bytes
    }

    pub fn to_bytes(&self) -> [u8; SIGNING_KEYPAIR_LEN] {
        self.bytes
    }

    pub fn public_key(&self) -> PublicSigningKey {
        let expanded = ExpandedSecretKey::from_bytes(&self.bytes);
        PublicSigningKey(VerifyingKey::from(&expanded).to_bytes())
    }

    pub fn sign(&self, message: &[u8]) -> Ed25519Signature {
        let expanded = ExpandedSecretKey::from_bytes(&self.bytes);
        let verifying_key = VerifyingKey::from(&expanded);
        Ed25519Signature(raw_sign::<Sha512>(&expanded, message, &verifying_key).to_bytes())
    }
}

impl fmt::Debug for SigningKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningKeypair({:?})", self.public_key())
    }
}

/// An Ed25519 public key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PublicSigningKey([u8; PUBLIC_SIGNING_KEY_LEN]);

impl PublicSigningKey {
    pub const LEN: usize = PUBLIC_SIGNING_KEY_LEN;

    pub fn new(bytes: [u8; PUBLIC_SIGNING_KEY_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> CoreResult<Self> {
        let bytes: [u8; PUBLIC_SIGNING_KEY_LEN] = bytes.try_into().map_err(|_| {
            CoreError::wrong_length("public signing key", PUBLIC_SIGNING_KEY_LEN, bytes.len())
        })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_SIGNING_KEY_LEN] {
        &self.0
    }

    pub fn to_bytes(&self) -> [u8; PUBLIC_SIGNING_KEY_LEN] {
        self.0
    }

    /// False for bad signatures and for bytes that are not a curve point.
    pub fn verify(&self, message: &[u8], signature: &Ed25519Signature) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.0) else {
            return false;
        };
        verifying_key
            .verify(message, &Signature::from_bytes(&signature.0))
            .is_ok()
    }
}

/// An Ed25519 signature. Deliberately a different type from
/// [`SchnorrSignature`](super::SchnorrSignature).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ed25519Signature([u8; SIGNATURE_LEN]);

impl Ed25519Signature {
    pub const LEN: usize = SIGNATURE_LEN;

    pub fn new(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> CoreResult<Self> {
        let bytes: [u8; SIGNATURE_LEN] = bytes
            .try_into()
            .map_err(|_| CoreError::wrong_length("Ed25519 signature", SIGNATURE_LEN, bytes.len()))?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        self.0
    }
}

pub fn generate_ed25519_key_pair<R: RandomSource + ?Sized>(random: &R) -> CoreResult<SigningKeypair> {
    SigningKeypair::generate(random)
}

pub fn compute_ed25519_public_key(keypair: &SigningKeypair) -> PublicSigningKey {
    keypair.public_key()
}

pub fn ed25519_sign(keypair: &SigningKeypair, message: &[u8]) -> Ed25519Signature {
    keypair.sign(message)
}

pub fn ed25519_verify(public_key: &PublicSigningKey, message: &[u8], signature: &Ed25519Signature) -> bool {
    public_key.verify(message, signature)
}
