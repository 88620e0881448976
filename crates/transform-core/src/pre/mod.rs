//! The transform (multi-hop proxy re-encryption) protocol.
//!
//! ```text
//!  encrypt ──► level 0 ──transform──► level 1 ──transform──► … ──► decrypt
//!                          ▲                      ▲
//!             generate_transform_key   generate_transform_key
//! ```
//!
//! A value encrypted to A carries `EK = ek·G1` and `plaintext · S` with
//! `S = e(EK, g2)^skA`. Each hop appends one [`TransformBlock`] and never
//! touches the encrypted message, the auth hash, or earlier blocks. The
//! final recipient peels the blocks off newest first to get back to `S`.

mod decrypt;
mod encrypt;
mod transform;
mod transform_key;
mod value;

pub use decrypt::decrypt;
pub use encrypt::encrypt;
pub use transform::transform;
pub use transform_key::{
    augment_transform_key, generate_transform_key, transform_key_to_bytes, ReencryptionKey,
    TransformKey, REENCRYPTION_KEY_LEN, TRANSFORM_KEY_LEN,
};
pub use value::{
    Ciphertext, EncryptedMessage, EncryptedTempKey, EncryptedValue, HashedTempKey, TransformBlock,
    TransformChain, CIPHERTEXT_HEADER_LEN,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::keys::{generate_key_pair, generate_plaintext, KeyPair};
    use crate::random::OsRandom;
    use crate::sign::SigningKeypair;

    fn setup() -> (KeyPair, SigningKeypair) {
        (
            generate_key_pair(&OsRandom).unwrap(),
            SigningKeypair::generate(&OsRandom).unwrap(),
        )
    }

    #[test]
    fn test_level_zero_roundtrip() {
        let (alice, signing) = setup();
        let pt = generate_plaintext(&OsRandom).unwrap();
        let ev = encrypt(&OsRandom, &pt, &alice.public_key, &signing).unwrap();

        assert_eq!(ev.level(), 0);
        assert!(ev.verify());
        assert_eq!(decrypt(&ev, &alice.private_key).unwrap(), pt);
    }

    #[test]
    fn test_single_hop() {
        let (alice, signing) = setup();
        let bob = generate_key_pair(&OsRandom).unwrap();
        let pt = generate_plaintext(&OsRandom).unwrap();

        let ev = encrypt(&OsRandom, &pt, &alice.public_key, &signing).unwrap();
        let key = generate_transform_key(&OsRandom, &alice.private_key, &bob.public_key, &signing).unwrap();
        let moved = transform(&OsRandom, &ev, &key, &signing).unwrap();

        assert_eq!(moved.level(), 1);
        assert_eq!(decrypt(&moved, &bob.private_key).unwrap(), pt);
        // unchanged input still decrypts for alice
        assert_eq!(decrypt(&ev, &alice.private_key).unwrap(), pt);
    }

    #[test]
    fn test_wrong_key_is_authentication_error() {
        let (alice, signing) = setup();
        let eve = generate_key_pair(&OsRandom).unwrap();
        let pt = generate_plaintext(&OsRandom).unwrap();
        let ev = encrypt(&OsRandom, &pt, &alice.public_key, &signing).unwrap();

        assert!(matches!(
            decrypt(&ev, &eve.private_key),
            Err(CoreError::Authentication(_))
        ));
    }

    #[test]
    fn test_transform_preserves_header() {
        let (alice, signing) = setup();
        let bob = generate_key_pair(&OsRandom).unwrap();
        let pt = generate_plaintext(&OsRandom).unwrap();

        let ev = encrypt(&OsRandom, &pt, &alice.public_key, &signing).unwrap();
        let key = generate_transform_key(&OsRandom, &alice.private_key, &bob.public_key, &signing).unwrap();
        let moved = transform(&OsRandom, &ev, &key, &signing).unwrap();

        let (before, after) = (ev.payload(), moved.payload());
        assert_eq!(before.ephemeral_public_key(), after.ephemeral_public_key());
        assert_eq!(before.encrypted_message(), after.encrypted_message());
        assert_eq!(before.auth_hash(), after.auth_hash());
        assert_eq!(
            after.transform_blocks().last().unwrap().public_key(),
            key.payload().ephemeral_public_key()
        );
    }
}
