//! Random sources feeding every sampling step of the engine.
//!
//! Production code uses [`OsRandom`]. [`SeededRandom`] exists for reproducible
//! test vectors and must never protect real data.

use std::sync::Mutex;

use ark_bn254::Fr;
use ark_ff::{PrimeField, Zero};
use rand::rngs::OsRng;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use zeroize::Zeroizing;

use crate::error::{CoreError, CoreResult};

/// Sampling gives up after this many zero draws; a healthy source never gets here.
const MAX_SAMPLING_ATTEMPTS: usize = 16;

/// A cryptographically secure byte source shared across engine calls.
pub trait RandomSource: Send + Sync {
    fn fill_bytes(&self, dest: &mut [u8]) -> CoreResult<()>;
}

/// Operating system CSPRNG. Stateless, so trivially shareable.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> CoreResult<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| CoreError::Randomness(e.to_string()))
    }
}

/// Deterministic ChaCha20 stream for reproducible test vectors.
///
/// NOT SECURE - anyone who knows the seed can reproduce every ephemeral key
/// the engine samples.
pub struct SeededRandom {
    rng: Mutex<ChaCha20Rng>,
}

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha20Rng::seed_from_u64(seed)),
        }
    }
}

impl std::fmt::Debug for SeededRandom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SeededRandom(..)")
    }
}

impl RandomSource for SeededRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> CoreResult<()> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| CoreError::Randomness("seeded source lock poisoned".into()))?;
        rng.fill_bytes(dest);
        Ok(())
    }
}

/// Uniform non-zero scalar, reduced from 64 random bytes to keep the bias negligible.
pub(crate) fn random_scalar<R: RandomSource + ?Sized>(random: &R) -> CoreResult<Fr> {
    let mut wide = Zeroizing::new([0u8; 64]);
    for _ in 0..MAX_SAMPLING_ATTEMPTS {
        random.fill_bytes(&mut wide[..])?;
        let scalar = Fr::from_le_bytes_mod_order(&wide[..]);
        if !scalar.is_zero() {
            return Ok(scalar);
        }
    }
    Err(CoreError::Randomness(
        "random source kept producing a zero scalar".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Zeros;

    impl RandomSource for Zeros {
        fn fill_bytes(&self, dest: &mut [u8]) -> CoreResult<()> {
            dest.fill(0);
            Ok(())
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a = SeededRandom::from_seed(42);
        let b = SeededRandom::from_seed(42);
        let mut x = [0u8; 48];
        let mut y = [0u8; 48];
        a.fill_bytes(&mut x).unwrap();
        b.fill_bytes(&mut y).unwrap();
        assert_eq!(x, y);

        let c = SeededRandom::from_seed(43);
        let mut z = [0u8; 48];
        c.fill_bytes(&mut z).unwrap();
        assert_ne!(x, z);
    }

    #[test]
    fn test_random_scalar_nonzero() {
        let rng = OsRandom;
        for _ in 0..8 {
            assert!(!random_scalar(&rng).unwrap().is_zero());
        }
    }

    #[test]
    fn test_degenerate_source_is_randomness_error() {
        let err = random_scalar(&Zeros).unwrap_err();
        assert!(matches!(err, CoreError::Randomness(_)));
    }
}
