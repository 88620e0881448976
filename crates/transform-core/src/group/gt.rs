use ark_bn254::{Fq, Fq12, Fq2, Fq6, Fr};
use ark_ff::{Field, One, PrimeField, Zero};
use zeroize::Zeroize;

use super::{field_chunks, field_from_be, field_to_be, gt_generator, FIELD_ELEMENT_LEN, GT_ELEMENT_LEN};
use crate::error::{CoreError, CoreResult};
use crate::random::{random_scalar, RandomSource};

/// A non-zero element of `Fq12`, the field holding the pairing target group.
///
/// Parsed values are only checked for canonical coordinates, so ciphertext
/// components survive tampering long enough to fail authentication instead
/// of parsing. Plaintexts additionally require [`GtElement::is_in_target_group`].
///
/// Temp keys and masks are `GtElement`s too; hold those in
/// `Zeroizing` so they are wiped when dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GtElement(Fq12);

impl GtElement {
    pub const LEN: usize = GT_ELEMENT_LEN;

    pub fn from_bytes(bytes: &[u8]) -> CoreResult<Self> {
        if bytes.len() != GT_ELEMENT_LEN {
            return Err(CoreError::wrong_length("GT element", GT_ELEMENT_LEN, bytes.len()));
        }
        let c = field_chunks(bytes)
            .map(|chunk| {
                field_from_be::<Fq>(&chunk).ok_or_else(|| {
                    CoreError::Validation("GT coefficient is not a canonical field element".into())
                })
            })
            .collect::<CoreResult<Vec<Fq>>>()?;
        let value = Fq12::new(
            Fq6::new(Fq2::new(c[0], c[1]), Fq2::new(c[2], c[3]), Fq2::new(c[4], c[5])),
            Fq6::new(Fq2::new(c[6], c[7]), Fq2::new(c[8], c[9]), Fq2::new(c[10], c[11])),
        );
        if value.is_zero() {
            return Err(CoreError::Validation("GT element is zero".into()));
        }
        Ok(Self(value))
    }

    pub fn to_bytes(&self) -> [u8; GT_ELEMENT_LEN] {
        let coefficients = [
            self.0.c0.c0.c0,
            self.0.c0.c0.c1,
            self.0.c0.c1.c0,
            self.0.c0.c1.c1,
            self.0.c0.c2.c0,
            self.0.c0.c2.c1,
            self.0.c1.c0.c0,
            self.0.c1.c0.c1,
            self.0.c1.c1.c0,
            self.0.c1.c1.c1,
            self.0.c1.c2.c0,
            self.0.c1.c2.c1,
        ];
        let mut out = [0u8; GT_ELEMENT_LEN];
        for (slot, coefficient) in out.chunks_exact_mut(FIELD_ELEMENT_LEN).zip(coefficients.iter()) {
            slot.copy_from_slice(&field_to_be(coefficient));
        }
        out
    }

    /// True when the element has order dividing r, i.e. lies in GT proper.
    pub fn is_in_target_group(&self) -> bool {
        self.0.pow(Fr::MODULUS) == Fq12::one()
    }

    /// `e(g1, g2)^r` for a fresh non-zero `r`.
    pub(crate) fn random<R: RandomSource + ?Sized>(random: &R) -> CoreResult<Self> {
        let exponent = random_scalar(random)?;
        Ok(gt_generator().pow(exponent))
    }

    pub(crate) fn from_field(value: Fq12) -> Self {
        Self(value)
    }

    pub(crate) fn pow(&self, exponent: Fr) -> Self {
        Self(self.0.pow(exponent.into_bigint()))
    }

    pub(crate) fn mul(&self, other: &GtElement) -> Self {
        Self(self.0 * other.0)
    }

    pub(crate) fn checked_div(&self, other: &GtElement) -> CoreResult<Self> {
        let inverse = other
            .0
            .inverse()
            .ok_or_else(|| CoreError::Validation("division by a zero GT element".into()))?;
        Ok(Self(self.0 * inverse))
    }
}

impl Zeroize for GtElement {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::OsRandom;

    #[test]
    fn test_zeroize_clears_element() {
        let mut value = GtElement::random(&OsRandom).unwrap();
        value.zeroize();
        assert!(value.0.is_zero());
        assert_eq!(value.to_bytes(), [0u8; GT_ELEMENT_LEN]);
    }

    #[test]
    fn test_bytes_roundtrip() {
        let value = GtElement::random(&OsRandom).unwrap();
        let bytes = value.to_bytes();
        assert_eq!(bytes.len(), 384);
        assert_eq!(GtElement::from_bytes(&bytes).unwrap(), value);
    }

    #[test]
    fn test_random_is_in_target_group() {
        let value = GtElement::random(&OsRandom).unwrap();
        assert!(value.is_in_target_group());
    }

    #[test]
    fn test_flipped_byte_leaves_target_group() {
        let value = GtElement::random(&OsRandom).unwrap();
        let mut bytes = value.to_bytes();
        bytes[200] ^= 0x01;
        let tampered = GtElement::from_bytes(&bytes).unwrap();
        assert!(!tampered.is_in_target_group());
    }

    #[test]
    fn test_zero_and_non_canonical_rejected() {
        assert!(GtElement::from_bytes(&[0u8; 384]).is_err());
        assert!(GtElement::from_bytes(&[0xff; 384]).is_err());
        assert!(GtElement::from_bytes(&[1u8; 100]).is_err());
    }

    #[test]
    fn test_division_inverts_multiplication() {
        let a = GtElement::random(&OsRandom).unwrap();
        let b = GtElement::random(&OsRandom).unwrap();
        assert_eq!(a.mul(&b).checked_div(&b).unwrap(), a);
    }
}
