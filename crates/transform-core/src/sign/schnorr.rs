//! Schnorr signatures over G1, keyed by PRE keypairs.
//!
//! A signature is `r ‖ s` where `r` is the x-coordinate of the commitment
//! `k · G1` and `s = k + c · sk` with `c = Hs(r ‖ public_key ‖ message)`.
//! Verification also supports split keys: given an augmenting private key
//! `a`, a signature made by the holder of `sk - a` under the combined public
//! key is accepted as well.

use ark_bn254::{Fq, Fr, G1Affine, G1Projective};
use ark_ec::{AffineRepr, CurveGroup};
use zeroize::Zeroizing;

use crate::error::{CoreError, CoreResult};
use crate::group::{field_from_be, field_to_be, PrivateKey, PublicKey, FIELD_ELEMENT_LEN};
use crate::hash::challenge_scalar;
use crate::random::{random_scalar, RandomSource};

pub const SCHNORR_SIGNATURE_LEN: usize = 2 * FIELD_ELEMENT_LEN;

/// A Schnorr signature over G1. Never interchangeable with
/// [`Ed25519Signature`](super::Ed25519Signature).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchnorrSignature([u8; SCHNORR_SIGNATURE_LEN]);

impl SchnorrSignature {
    pub const LEN: usize = SCHNORR_SIGNATURE_LEN;

    pub fn new(bytes: [u8; SCHNORR_SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> CoreResult<Self> {
        let bytes: [u8; SCHNORR_SIGNATURE_LEN] = bytes.try_into().map_err(|_| {
            CoreError::wrong_length("Schnorr signature", SCHNORR_SIGNATURE_LEN, bytes.len())
        })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; SCHNORR_SIGNATURE_LEN] {
        &self.0
    }

    pub fn to_bytes(&self) -> [u8; SCHNORR_SIGNATURE_LEN] {
        self.0
    }

    fn split(&self) -> ([u8; FIELD_ELEMENT_LEN], [u8; FIELD_ELEMENT_LEN]) {
        let mut r = [0u8; FIELD_ELEMENT_LEN];
        let mut s = [0u8; FIELD_ELEMENT_LEN];
        r.copy_from_slice(&self.0[..FIELD_ELEMENT_LEN]);
        s.copy_from_slice(&self.0[FIELD_ELEMENT_LEN..]);
        (r, s)
    }
}

/// Signs `message`. `public_key` is bound into the challenge; for split keys
/// pass the augmented (combined) public key.
pub fn schnorr_sign<R: RandomSource + ?Sized>(
    random: &R,
    private_key: &PrivateKey,
    public_key: &PublicKey,
    message: &[u8],
) -> CoreResult<SchnorrSignature> {
    // the nonce reveals the private key given the signature
    let nonce = Zeroizing::new(random_scalar(random)?);
    // nonce is non-zero, so the commitment is never the identity
    let commitment = (G1Affine::generator() * *nonce).into_affine();
    let r = field_to_be(&commitment.x);
    let c = challenge_scalar(&r, &public_key.to_bytes(), message);
    let s = *nonce + c * private_key.scalar();

    let mut out = [0u8; SCHNORR_SIGNATURE_LEN];
    out[..FIELD_ELEMENT_LEN].copy_from_slice(&r);
    out[FIELD_ELEMENT_LEN..].copy_from_slice(&field_to_be(&s));
    Ok(SchnorrSignature(out))
}

/// Checks a signature against `public_key`, or against the unaugmented key
/// `public_key - augmenting_private_key · G1` when an augmenting key is given.
pub fn schnorr_verify(
    public_key: &PublicKey,
    augmenting_private_key: Option<&PrivateKey>,
    message: &[u8],
    signature: &SchnorrSignature,
) -> bool {
    let (r_bytes, s_bytes) = signature.split();
    let (Some(r), Some(s)) = (field_from_be::<Fq>(&r_bytes), field_from_be::<Fr>(&s_bytes)) else {
        return false;
    };
    let c = challenge_scalar(&r_bytes, &public_key.to_bytes(), message);
    let commitment_matches = |signer: G1Projective| {
        let commitment = (G1Affine::generator() * s - signer * c).into_affine();
        !commitment.is_zero() && commitment.x == r
    };

    let combined = public_key.point().into_group();
    if commitment_matches(combined) {
        return true;
    }
    match augmenting_private_key {
        Some(augmenting) => commitment_matches(combined - G1Affine::generator() * augmenting.scalar()),
        None => false,
    }
}
