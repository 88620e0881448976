use ark_ec::CurveGroup;
use tracing::{debug, instrument};
use zeroize::Zeroizing;

use super::value::{Ciphertext, EncryptedMessage, EncryptedValue, TransformChain};
use crate::error::CoreResult;
use crate::group::{g2_generator, pair, PrivateKey, PublicKey};
use crate::hash::AuthHash;
use crate::keys::{compute_public_key, Plaintext};
use crate::random::RandomSource;
use crate::sign::{SigningKeypair, Unsigned};

/// Encrypts `plaintext` to `to_public_key` as a level-0 value signed by
/// `signing_keypair`.
#[instrument(level = "debug", skip_all)]
pub fn encrypt<R: RandomSource + ?Sized>(
    random: &R,
    plaintext: &Plaintext,
    to_public_key: &PublicKey,
    signing_keypair: &SigningKeypair,
) -> CoreResult<EncryptedValue> {
    let ephemeral = PrivateKey::random(random)?;
    let ephemeral_public_key = compute_public_key(&ephemeral)?;

    let secret = Zeroizing::new(pair(
        (to_public_key.point() * ephemeral.scalar()).into_affine(),
        g2_generator(),
    ));
    let encrypted_message = EncryptedMessage::new(plaintext.element().mul(&secret));
    let auth_hash = AuthHash::compute(plaintext.element(), &secret);

    let ciphertext = Ciphertext::new(
        ephemeral_public_key,
        encrypted_message,
        auth_hash,
        TransformChain::new(),
    );
    debug!(level = 0, "encrypted value");
    Ok(Unsigned::new(ciphertext).sign(signing_keypair))
}
