//! Key augmentation and splitting.
//!
//! A private key can be split into two shares held by different parties
//! (say a device and a server). Values are encrypted to the sum of the share
//! public keys; transform keys generated from one share are augmented with
//! the other before use.

use tracing::trace;

use crate::error::{CoreError, CoreResult};
use crate::group::{PrivateKey, PublicKey};
use crate::keys::compute_public_key;
use crate::random::RandomSource;

pub use crate::pre::augment_transform_key;

/// `a + b` on G1. Fails with `InvalidKey` if the keys cancel out.
pub fn augment_public_key(a: &PublicKey, b: &PublicKey) -> CoreResult<PublicKey> {
    a.augment(b)
}

/// `a + b` mod the group order.
pub fn add_private_keys(a: &PrivateKey, b: &PrivateKey) -> CoreResult<PrivateKey> {
    PrivateKey::from_scalar(a.scalar() + b.scalar())
}

/// `a - b` mod the group order.
pub fn subtract_private_keys(a: &PrivateKey, b: &PrivateKey) -> CoreResult<PrivateKey> {
    PrivateKey::from_scalar(a.scalar() - b.scalar())
}

/// [`add_private_keys`] over raw encodings. Any malformed input is a
/// `Validation` failure.
pub fn add_private_key_bytes(a: &[u8], b: &[u8]) -> CoreResult<PrivateKey> {
    add_private_keys(&augmenting_input(a)?, &augmenting_input(b)?)
}

/// [`subtract_private_keys`] over raw encodings.
pub fn subtract_private_key_bytes(a: &[u8], b: &[u8]) -> CoreResult<PrivateKey> {
    subtract_private_keys(&augmenting_input(a)?, &augmenting_input(b)?)
}

fn augmenting_input(bytes: &[u8]) -> CoreResult<PrivateKey> {
    PrivateKey::from_bytes(bytes).map_err(|e| match e {
        CoreError::InvalidKey(reason) => CoreError::Validation(reason),
        other => other,
    })
}

/// Two private keys whose sum is the key they were split from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyShares {
    first: PrivateKey,
    second: PrivateKey,
}

impl KeyShares {
    pub fn new(first: PrivateKey, second: PrivateKey) -> Self {
        Self { first, second }
    }

    /// Splits `private_key` into a fresh random share and its complement.
    pub fn split<R: RandomSource + ?Sized>(random: &R, private_key: &PrivateKey) -> CoreResult<Self> {
        // A share equal to the whole key would leave a zero complement.
        let mut last_err = None;
        for _ in 0..4 {
            let first = PrivateKey::random(random)?;
            match subtract_private_keys(private_key, &first) {
                Ok(second) => {
                    trace!("split private key");
                    return Ok(Self { first, second });
                }
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err.unwrap_or_else(|| CoreError::Randomness("could not split key".into())))
    }

    pub fn first(&self) -> &PrivateKey {
        &self.first
    }

    pub fn second(&self) -> &PrivateKey {
        &self.second
    }

    pub fn combine(&self) -> CoreResult<PrivateKey> {
        add_private_keys(&self.first, &self.second)
    }

    pub fn public_keys(&self) -> CoreResult<(PublicKey, PublicKey)> {
        Ok((compute_public_key(&self.first)?, compute_public_key(&self.second)?))
    }

    /// The augmented public key, equal to the public key of [`Self::combine`].
    pub fn public_key(&self) -> CoreResult<PublicKey> {
        let (first, second) = self.public_keys()?;
        augment_public_key(&first, &second)
    }
}
