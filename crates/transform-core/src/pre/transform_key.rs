//! Transform keys: the delegation from one private key to another public key.

use ark_ec::{AffineRepr, CurveGroup};
use tracing::debug;
use zeroize::Zeroizing;

use super::value::{EncryptedTempKey, HashedTempKey};
use crate::error::{CoreError, CoreResult};
use crate::group::{g2_generator, pair, GtElement, PrivateKey, PublicKey, TwistPoint, GT_ELEMENT_LEN, PUBLIC_KEY_LEN};
use crate::hash::hash_to_twist;
use crate::keys::compute_public_key;
use crate::random::RandomSource;
use crate::sign::{Signable, Signed, SigningKeypair, Unsigned, PUBLIC_SIGNING_KEY_LEN};

/// Unsigned body of a transform key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReencryptionKey {
    ephemeral_public_key: PublicKey,
    to_public_key: PublicKey,
    encrypted_temp_key: EncryptedTempKey,
    hashed_temp_key: HashedTempKey,
}

/// Length of [`ReencryptionKey::to_bytes`].
pub const REENCRYPTION_KEY_LEN: usize = 2 * PUBLIC_KEY_LEN + GT_ELEMENT_LEN + TwistPoint::LEN;

/// Length of the signed transform-key encoding, which ends with the public signing key.
pub const TRANSFORM_KEY_LEN: usize = REENCRYPTION_KEY_LEN + PUBLIC_SIGNING_KEY_LEN;

impl ReencryptionKey {
    pub fn new(
        ephemeral_public_key: PublicKey,
        to_public_key: PublicKey,
        encrypted_temp_key: EncryptedTempKey,
        hashed_temp_key: HashedTempKey,
    ) -> Self {
        Self {
            ephemeral_public_key,
            to_public_key,
            encrypted_temp_key,
            hashed_temp_key,
        }
    }

    pub fn ephemeral_public_key(&self) -> &PublicKey {
        &self.ephemeral_public_key
    }

    pub fn to_public_key(&self) -> &PublicKey {
        &self.to_public_key
    }

    pub fn encrypted_temp_key(&self) -> &EncryptedTempKey {
        &self.encrypted_temp_key
    }

    pub fn hashed_temp_key(&self) -> &HashedTempKey {
        &self.hashed_temp_key
    }

    pub fn to_bytes(&self) -> [u8; REENCRYPTION_KEY_LEN] {
        let mut out = [0u8; REENCRYPTION_KEY_LEN];
        let parts: [&[u8]; 4] = [
            &self.ephemeral_public_key.to_bytes(),
            &self.to_public_key.to_bytes(),
            &self.encrypted_temp_key.to_bytes(),
            &self.hashed_temp_key.to_bytes(),
        ];
        let mut offset = 0;
        for part in parts {
            out[offset..offset + part.len()].copy_from_slice(part);
            offset += part.len();
        }
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> CoreResult<Self> {
        if bytes.len() != REENCRYPTION_KEY_LEN {
            return Err(CoreError::wrong_length("transform key body", REENCRYPTION_KEY_LEN, bytes.len()));
        }
        let (ephemeral, rest) = bytes.split_at(PUBLIC_KEY_LEN);
        let (to, rest) = rest.split_at(PUBLIC_KEY_LEN);
        let (encrypted, hashed) = rest.split_at(GT_ELEMENT_LEN);
        Ok(Self::new(
            PublicKey::from_bytes(ephemeral)?,
            PublicKey::from_bytes(to)?,
            EncryptedTempKey::from_bytes(encrypted)?,
            HashedTempKey::from_bytes(hashed)?,
        ))
    }
}

impl Signable for ReencryptionKey {
    fn signable_bytes(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }
}

/// A signed transform key.
pub type TransformKey = Signed<ReencryptionKey>;

impl Signed<ReencryptionKey> {
    /// `ephemeral_public_key ‖ to_public_key ‖ encrypted_temp_key ‖
    /// hashed_temp_key ‖ public_signing_key`, exactly the signed message.
    pub fn to_bytes(&self) -> [u8; TRANSFORM_KEY_LEN] {
        let mut out = [0u8; TRANSFORM_KEY_LEN];
        out[..REENCRYPTION_KEY_LEN].copy_from_slice(&self.payload().to_bytes());
        out[REENCRYPTION_KEY_LEN..].copy_from_slice(self.public_signing_key().as_bytes());
        out
    }

    /// Folds a second private key into the key so that it delegates from the
    /// sum of both keys, as used with augmented public keys.
    ///
    /// The original signature is carried over untouched and no longer covers
    /// the new body: [`Signed::verify`] fails on the result. Transform does not
    /// check transform-key signatures, so the augmented key is still usable.
    pub fn augment(&self, private_key: &PrivateKey) -> CoreResult<TransformKey> {
        let body = self.payload();
        let hashed = body.hashed_temp_key.point().point().into_group() - g2_generator() * private_key.scalar();
        let augmented = ReencryptionKey {
            hashed_temp_key: HashedTempKey::new(TwistPoint::from_point(hashed)),
            ..body.clone()
        };
        debug!("augmented transform key");
        Ok(Signed::from_parts(augmented, *self.public_signing_key(), *self.signature()))
    }
}

/// Builds the key that lets a proxy move values encrypted to
/// `from_private_key`'s public key over to `to_public_key`.
pub fn generate_transform_key<R: RandomSource + ?Sized>(
    random: &R,
    from_private_key: &PrivateKey,
    to_public_key: &PublicKey,
    signing_keypair: &SigningKeypair,
) -> CoreResult<TransformKey> {
    let ephemeral = PrivateKey::random(random)?;
    let temp_key = Zeroizing::new(GtElement::random(random)?);

    let ephemeral_public_key = compute_public_key(&ephemeral)?;
    let mask = pair((to_public_key.point() * ephemeral.scalar()).into_affine(), g2_generator());
    let encrypted_temp_key = EncryptedTempKey::new(temp_key.mul(&mask));
    let hashed_temp_key = HashedTempKey::new(TwistPoint::from_point(
        hash_to_twist(&temp_key) - g2_generator() * from_private_key.scalar(),
    ));

    debug!("generated transform key");
    Ok(Unsigned::new(ReencryptionKey::new(
        ephemeral_public_key,
        *to_public_key,
        encrypted_temp_key,
        hashed_temp_key,
    ))
    .sign(signing_keypair))
}

/// Free-function form of [`TransformKey::augment`].
pub fn augment_transform_key(key: &TransformKey, private_key: &PrivateKey) -> CoreResult<TransformKey> {
    key.augment(private_key)
}

/// Free-function form of [`TransformKey::to_bytes`].
pub fn transform_key_to_bytes(key: &TransformKey) -> [u8; TRANSFORM_KEY_LEN] {
    key.to_bytes()
}
