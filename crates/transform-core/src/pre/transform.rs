use ark_bn254::G1Affine;
use ark_ec::{AffineRepr, CurveGroup};
use tracing::{debug, instrument};
use zeroize::Zeroizing;

use super::transform_key::{ReencryptionKey, TransformKey};
use super::value::{EncryptedTempKey, EncryptedValue, TransformBlock};
use crate::error::{CoreError, CoreResult};
use crate::group::{g2_generator, pair, PublicKey};
use crate::random::{random_scalar, RandomSource};
use crate::sign::{SigningKeypair, Unsigned};

/// Re-randomization gives up after this many identity points.
const MAX_RERANDOMIZE_ATTEMPTS: usize = 16;

/// Moves `value` one hop along `key` by appending a transform block.
///
/// Earlier blocks, the encrypted message and the auth hash are carried over
/// unchanged. The result is signed by `signing_keypair`. Each hop adds one
/// block, and decryption cost grows linearly with the number of blocks.
///
/// No hop limit is applied here; `EngineConfig::max_hops` is enforced by
/// [`Api::transform`](crate::Api::transform).
#[instrument(level = "debug", skip_all, fields(level = value.level()))]
pub fn transform<R: RandomSource + ?Sized>(
    random: &R,
    value: &EncryptedValue,
    key: &TransformKey,
    signing_keypair: &SigningKeypair,
) -> CoreResult<EncryptedValue> {
    let ciphertext = value.verified()?;
    let key = key.payload();

    let current_point = ciphertext
        .transform_blocks()
        .last()
        .map(|block| *block.random_transform_public_key())
        .unwrap_or(*ciphertext.ephemeral_public_key());
    let encrypted_temp_key = EncryptedTempKey::new(pair(
        current_point.point(),
        key.hashed_temp_key().point().point(),
    ));
    let (random_transform_public_key, random_transform_encrypted_temp_key) = rerandomize(random, key)?;

    let block = TransformBlock::new(
        *key.ephemeral_public_key(),
        encrypted_temp_key,
        random_transform_public_key,
        random_transform_encrypted_temp_key,
    );
    let next = ciphertext.with_block(block);
    debug!(level = next.level(), "transformed value");
    Ok(Unsigned::new(next).sign(signing_keypair))
}

/// Fresh `u`: `Q = R + u·G1` and `encrypted_temp_key · e(u·to_public_key, g2)`,
/// so the same key never yields linkable blocks.
fn rerandomize<R: RandomSource + ?Sized>(
    random: &R,
    key: &ReencryptionKey,
) -> CoreResult<(PublicKey, EncryptedTempKey)> {
    for _ in 0..MAX_RERANDOMIZE_ATTEMPTS {
        let blinding = Zeroizing::new(random_scalar(random)?);
        let point = key.ephemeral_public_key().point().into_group() + G1Affine::generator() * *blinding;
        let Ok(public_key) = PublicKey::from_point(point) else {
            continue;
        };
        let mask = pair((key.to_public_key().point() * *blinding).into_affine(), g2_generator());
        return Ok((
            public_key,
            EncryptedTempKey::new(key.encrypted_temp_key().element().mul(&mask)),
        ));
    }
    Err(CoreError::Randomness(
        "could not sample a non-identity transform point".into(),
    ))
}
