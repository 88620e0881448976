//! BN254 group arithmetic.
//!
//! Public keys live in G1, hashed temp keys in G2, and plaintexts, shared
//! secrets and temp keys in the pairing target group GT. Every element has a
//! fixed big-endian encoding; parsing validates before anything is computed.

mod gt;
mod pairing;
mod points;
mod scalar;

use ark_ff::{BigInt, BigInteger, PrimeField};

pub use gt::GtElement;
pub(crate) use pairing::{g2_generator, gt_generator, pair};
pub use points::{PublicKey, TwistPoint};
pub use scalar::PrivateKey;

/// Width of one big-endian base field or scalar field element.
pub const FIELD_ELEMENT_LEN: usize = 32;
pub const PRIVATE_KEY_LEN: usize = FIELD_ELEMENT_LEN;
pub const PUBLIC_KEY_LEN: usize = 2 * FIELD_ELEMENT_LEN;
pub const TWIST_POINT_LEN: usize = 4 * FIELD_ELEMENT_LEN;
pub const GT_ELEMENT_LEN: usize = 12 * FIELD_ELEMENT_LEN;

fn bigint_from_be(bytes: &[u8; FIELD_ELEMENT_LEN]) -> BigInt<4> {
    let mut limbs = [0u64; 4];
    for (i, chunk) in bytes.chunks_exact(8).enumerate() {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        limbs[3 - i] = u64::from_be_bytes(word);
    }
    BigInt::new(limbs)
}

/// Parses a canonical (fully reduced) big-endian field element.
pub(crate) fn field_from_be<F>(bytes: &[u8; FIELD_ELEMENT_LEN]) -> Option<F>
where
    F: PrimeField<BigInt = BigInt<4>>,
{
    F::from_bigint(bigint_from_be(bytes))
}

pub(crate) fn field_to_be<F>(value: &F) -> [u8; FIELD_ELEMENT_LEN]
where
    F: PrimeField<BigInt = BigInt<4>>,
{
    let mut out = [0u8; FIELD_ELEMENT_LEN];
    out.copy_from_slice(&value.into_bigint().to_bytes_be());
    out
}

/// Splits a fixed-width buffer into its 32-byte coordinates.
pub(crate) fn field_chunks(bytes: &[u8]) -> impl Iterator<Item = [u8; FIELD_ELEMENT_LEN]> + '_ {
    bytes.chunks_exact(FIELD_ELEMENT_LEN).map(|chunk| {
        let mut out = [0u8; FIELD_ELEMENT_LEN];
        out.copy_from_slice(chunk);
        out
    })
}
