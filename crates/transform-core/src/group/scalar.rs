use std::fmt;

use ark_bn254::Fr;
use ark_ff::Zero;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{field_from_be, field_to_be, PRIVATE_KEY_LEN};
use crate::error::{CoreError, CoreResult};
use crate::random::{random_scalar, RandomSource};

/// A PRE private key: a non-zero scalar modulo the BN254 group order
/// (zeroized on drop).
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    bytes: [u8; PRIVATE_KEY_LEN],
}

impl PrivateKey {
    pub const LEN: usize = PRIVATE_KEY_LEN;

    /// Parses a 32-byte big-endian scalar in `[1, order - 1]`.
    pub fn from_bytes(bytes: &[u8]) -> CoreResult<Self> {
        let bytes: [u8; PRIVATE_KEY_LEN] = bytes
            .try_into()
            .map_err(|_| CoreError::wrong_length("private key", PRIVATE_KEY_LEN, bytes.len()))?;
        let scalar: Fr = field_from_be(&bytes)
            .ok_or_else(|| CoreError::InvalidKey("private key is not reduced mod the group order".into()))?;
        if scalar.is_zero() {
            return Err(CoreError::InvalidKey("private key is zero".into()));
        }
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8; PRIVATE_KEY_LEN] {
        &self.bytes
    }

    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_LEN] {
        self.bytes
    }

    pub(crate) fn random<R: RandomSource + ?Sized>(random: &R) -> CoreResult<Self> {
        let scalar = random_scalar(random)?;
        Ok(Self {
            bytes: field_to_be(&scalar),
        })
    }

    /// Wraps an arithmetic result; zero is not a usable key.
    pub(crate) fn from_scalar(scalar: Fr) -> CoreResult<Self> {
        if scalar.is_zero() {
            return Err(CoreError::Validation("private key arithmetic produced zero".into()));
        }
        Ok(Self {
            bytes: field_to_be(&scalar),
        })
    }

    pub(crate) fn scalar(&self) -> Fr {
        // Constructors only admit canonical non-zero scalars.
        let scalar: Option<Fr> = field_from_be(&self.bytes);
        debug_assert!(
            matches!(scalar, Some(s) if !s.is_zero()),
            "private key bytes must hold a canonical non-zero scalar"
        );
        scalar.unwrap_or_else(Fr::zero)
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.bytes
            .iter()
            .zip(other.bytes.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}
