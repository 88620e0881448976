//! Signatures: Ed25519 authenticates engine structures, Schnorr over G1
//! signs arbitrary messages with PRE keys.
//!
//! Engine outputs move through a typestate: a payload is built as
//! [`Unsigned`], becomes [`Signed`] when sealed with a [`SigningKeypair`],
//! and only `Signed` values are handed to callers or accepted as input. The
//! signed message is always the payload encoding followed by the 32-byte
//! public signing key, and the public key is derived from the keypair so the
//! two can never disagree.

mod ed25519;
mod schnorr;

pub use ed25519::{
    compute_ed25519_public_key, ed25519_sign, ed25519_verify, generate_ed25519_key_pair,
    Ed25519Signature, PublicSigningKey, SigningKeypair, PUBLIC_SIGNING_KEY_LEN, SIGNATURE_LEN,
    SIGNING_KEYPAIR_LEN,
};
pub use schnorr::{schnorr_sign, schnorr_verify, SchnorrSignature};

use crate::error::{CoreError, CoreResult};

/// A payload with a canonical byte encoding covered by its signature.
pub trait Signable {
    /// Canonical encoding, without the public signing key.
    fn signable_bytes(&self) -> Vec<u8>;
}

/// A payload that has not been sealed yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unsigned<T>(T);

impl<T: Signable> Unsigned<T> {
    pub fn new(payload: T) -> Self {
        Self(payload)
    }

    pub fn payload(&self) -> &T {
        &self.0
    }

    pub fn sign(self, keypair: &SigningKeypair) -> Signed<T> {
        let public_signing_key = keypair.public_key();
        let signature = keypair.sign(&signed_message(&self.0, &public_signing_key));
        Signed {
            payload: self.0,
            public_signing_key,
            signature,
        }
    }
}

/// A payload sealed with an Ed25519 signature. Immutable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signed<T> {
    payload: T,
    public_signing_key: PublicSigningKey,
    signature: Ed25519Signature,
}

impl<T: Signable> Signed<T> {
    /// Reassembles a value received from elsewhere. Nothing is checked here;
    /// engine operations verify before use.
    pub fn from_parts(payload: T, public_signing_key: PublicSigningKey, signature: Ed25519Signature) -> Self {
        Self {
            payload,
            public_signing_key,
            signature,
        }
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn public_signing_key(&self) -> &PublicSigningKey {
        &self.public_signing_key
    }

    pub fn signature(&self) -> &Ed25519Signature {
        &self.signature
    }

    pub fn into_parts(self) -> (T, PublicSigningKey, Ed25519Signature) {
        (self.payload, self.public_signing_key, self.signature)
    }

    /// The exact bytes the signature covers.
    pub fn signed_bytes(&self) -> Vec<u8> {
        signed_message(&self.payload, &self.public_signing_key)
    }

    pub fn verify(&self) -> bool {
        self.public_signing_key
            .verify(&self.signed_bytes(), &self.signature)
    }

    /// The payload, if and only if the signature holds.
    pub(crate) fn verified(&self) -> CoreResult<&T> {
        if !self.verify() {
            return Err(CoreError::SignatureVerification(
                "Ed25519 signature does not match payload".into(),
            ));
        }
        Ok(&self.payload)
    }
}

fn signed_message<T: Signable>(payload: &T, public_signing_key: &PublicSigningKey) -> Vec<u8> {
    let mut message = payload.signable_bytes();
    message.extend_from_slice(public_signing_key.as_bytes());
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::OsRandom;

    #[derive(Clone, Debug, PartialEq, Eq)]
    struct Note(Vec<u8>);

    impl Signable for Note {
        fn signable_bytes(&self) -> Vec<u8> {
            self.0.clone()
        }
    }

    #[test]
    fn test_sign_then_verify() {
        let kp = SigningKeypair::generate(&OsRandom).unwrap();
        let signed = Unsigned::new(Note(b"payload".to_vec())).sign(&kp);
        assert!(signed.verify());
        assert_eq!(signed.public_signing_key(), &kp.public_key());
        assert_eq!(signed.verified().unwrap(), &Note(b"payload".to_vec()));
    }

    #[test]
    fn test_signed_bytes_end_with_signing_key() {
        let kp = SigningKeypair::generate(&OsRandom).unwrap();
        let signed = Unsigned::new(Note(vec![1, 2, 3])).sign(&kp);
        let bytes = signed.signed_bytes();
        assert_eq!(&bytes[..3], &[1, 2, 3]);
        assert_eq!(&bytes[3..], kp.public_key().as_bytes());
    }

    #[test]
    fn test_swapped_payload_fails() {
        let kp = SigningKeypair::generate(&OsRandom).unwrap();
        let signed = Unsigned::new(Note(b"payload".to_vec())).sign(&kp);
        let (_, psk, sig) = signed.into_parts();
        let forged = Signed::from_parts(Note(b"pay1oad".to_vec()), psk, sig);
        assert!(!forged.verify());
        assert!(matches!(
            forged.verified(),
            Err(CoreError::SignatureVerification(_))
        ));
    }

    #[test]
    fn test_swapped_signing_key_fails() {
        let kp = SigningKeypair::generate(&OsRandom).unwrap();
        let other = SigningKeypair::generate(&OsRandom).unwrap();
        let signed = Unsigned::new(Note(b"payload".to_vec())).sign(&kp);
        let (payload, _, sig) = signed.into_parts();
        assert!(!Signed::from_parts(payload, other.public_key(), sig).verify());
    }
}
