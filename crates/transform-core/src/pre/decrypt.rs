use ark_ec::CurveGroup;
use tracing::{debug, instrument};
use zeroize::Zeroizing;

use super::value::{Ciphertext, EncryptedValue};
use crate::error::{CoreError, CoreResult};
use crate::group::{g2_generator, pair, GtElement, PrivateKey, PublicKey};
use crate::hash::{hash_to_twist, AuthHash};
use crate::keys::Plaintext;

/// Recovers the plaintext of a value at any level.
///
/// Fails with `SignatureVerification` before touching the payload if the
/// signature does not hold, and with `Authentication` if the recovered
/// plaintext does not match the value's auth hash (wrong key, or a payload
/// altered and re-signed).
#[instrument(level = "debug", skip_all, fields(level = value.level()))]
pub fn decrypt(value: &EncryptedValue, private_key: &PrivateKey) -> CoreResult<Plaintext> {
    let ciphertext = value.verified()?;
    let secret = recover_secret(ciphertext, private_key)?;

    let element = Zeroizing::new(ciphertext.encrypted_message().element().checked_div(&secret)?);
    let expected = AuthHash::compute(&element, &secret);
    if !ciphertext.auth_hash().matches(&expected) {
        return Err(CoreError::Authentication(
            "recovered plaintext does not match auth hash".into(),
        ));
    }
    debug!("decrypted value");
    Ok(Plaintext::from_element(*element))
}

/// Unwinds the transform blocks newest to oldest until the level-0 secret
/// `S = e(EK, g2)^sk` is reached.
fn recover_secret(ciphertext: &Ciphertext, private_key: &PrivateKey) -> CoreResult<Zeroizing<GtElement>> {
    let blocks = ciphertext.transform_blocks().as_slice();
    let scaled = |point: PublicKey| {
        pair((point.point() * private_key.scalar()).into_affine(), g2_generator())
    };

    let Some(last) = blocks.last() else {
        return Ok(Zeroizing::new(scaled(*ciphertext.ephemeral_public_key())));
    };

    // mask for block i is e(Q_i, g2)^(sk of the hop's recipient)
    let mut mask = Zeroizing::new(scaled(*last.random_transform_public_key()));
    for (index, block) in blocks.iter().enumerate().rev() {
        let temp_key = Zeroizing::new(
            block
                .random_transform_encrypted_temp_key()
                .element()
                .checked_div(&mask)?,
        );
        let previous_point = match index {
            0 => ciphertext.ephemeral_public_key(),
            _ => blocks[index - 1].random_transform_public_key(),
        };
        *mask = pair(previous_point.point(), hash_to_twist(&temp_key).into_affine())
            .checked_div(block.encrypted_temp_key().element())?;
    }
    Ok(mask)
}
