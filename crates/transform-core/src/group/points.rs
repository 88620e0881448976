use ark_bn254::{Fq, Fq2, G1Affine, G1Projective, G2Affine, G2Projective};
use ark_ec::{AffineRepr, CurveGroup};

use super::{field_chunks, field_from_be, field_to_be, FIELD_ELEMENT_LEN, PUBLIC_KEY_LEN, TWIST_POINT_LEN};
use crate::error::{CoreError, CoreResult};

fn coordinate(bytes: [u8; FIELD_ELEMENT_LEN], what: &str) -> CoreResult<Fq> {
    field_from_be(&bytes)
        .ok_or_else(|| CoreError::InvalidKey(format!("{what} coordinate is not a canonical field element")))
}

/// A PRE public key: a G1 point that is never the identity.
///
/// Encoded as `x ‖ y`, each coordinate 32 bytes big-endian.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PublicKey {
    point: G1Affine,
}

impl PublicKey {
    pub const LEN: usize = PUBLIC_KEY_LEN;

    /// Builds a key from its affine coordinates, rejecting anything off the
    /// curve or outside the prime-order subgroup.
    pub fn new(x: [u8; FIELD_ELEMENT_LEN], y: [u8; FIELD_ELEMENT_LEN]) -> CoreResult<Self> {
        let point = G1Affine::new_unchecked(coordinate(x, "public key x")?, coordinate(y, "public key y")?);
        if !point.is_on_curve() || !point.is_in_correct_subgroup_assuming_on_curve() {
            return Err(CoreError::InvalidKey("public key is not a point on G1".into()));
        }
        Ok(Self { point })
    }

    pub fn from_bytes(bytes: &[u8]) -> CoreResult<Self> {
        if bytes.len() != PUBLIC_KEY_LEN {
            return Err(CoreError::wrong_length("public key", PUBLIC_KEY_LEN, bytes.len()));
        }
        let mut coords = field_chunks(bytes);
        match (coords.next(), coords.next()) {
            (Some(x), Some(y)) => Self::new(x, y),
            _ => Err(CoreError::wrong_length("public key", PUBLIC_KEY_LEN, bytes.len())),
        }
    }

    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LEN] {
        let (x, y) = self.bytes_x_y();
        let mut out = [0u8; PUBLIC_KEY_LEN];
        out[..FIELD_ELEMENT_LEN].copy_from_slice(&x);
        out[FIELD_ELEMENT_LEN..].copy_from_slice(&y);
        out
    }

    pub fn bytes_x_y(&self) -> ([u8; FIELD_ELEMENT_LEN], [u8; FIELD_ELEMENT_LEN]) {
        (field_to_be(&self.point.x), field_to_be(&self.point.y))
    }

    /// Point addition. Keys that cancel out are rejected.
    pub fn augment(&self, other: &PublicKey) -> CoreResult<PublicKey> {
        Self::from_point(self.point.into_group() + other.point.into_group())
    }

    pub(crate) fn from_point(point: G1Projective) -> CoreResult<Self> {
        let point = point.into_affine();
        if point.is_zero() {
            return Err(CoreError::InvalidKey("public key is the identity".into()));
        }
        Ok(Self { point })
    }

    pub(crate) fn point(&self) -> G1Affine {
        self.point
    }
}

/// A point on the G2 twist, used for hashed temp keys.
///
/// Encoded as `x.c0 ‖ x.c1 ‖ y.c0 ‖ y.c1`; the identity is all zeros.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TwistPoint {
    point: G2Affine,
}

impl TwistPoint {
    pub const LEN: usize = TWIST_POINT_LEN;

    pub fn from_bytes(bytes: &[u8]) -> CoreResult<Self> {
        if bytes.len() != TWIST_POINT_LEN {
            return Err(CoreError::wrong_length("twist point", TWIST_POINT_LEN, bytes.len()));
        }
        if bytes.iter().all(|b| *b == 0) {
            return Ok(Self {
                point: G2Affine::zero(),
            });
        }
        let coords = field_chunks(bytes)
            .map(|chunk| coordinate(chunk, "twist point"))
            .collect::<CoreResult<Vec<Fq>>>()?;
        let x = Fq2::new(coords[0], coords[1]);
        let y = Fq2::new(coords[2], coords[3]);
        let point = G2Affine::new_unchecked(x, y);
        if !point.is_on_curve() || !point.is_in_correct_subgroup_assuming_on_curve() {
            return Err(CoreError::InvalidKey("twist point is not in G2".into()));
        }
        Ok(Self { point })
    }

    pub fn to_bytes(&self) -> [u8; TWIST_POINT_LEN] {
        let mut out = [0u8; TWIST_POINT_LEN];
        if self.point.is_zero() {
            return out;
        }
        let coords = [self.point.x.c0, self.point.x.c1, self.point.y.c0, self.point.y.c1];
        for (slot, coord) in out.chunks_exact_mut(FIELD_ELEMENT_LEN).zip(coords.iter()) {
            slot.copy_from_slice(&field_to_be(coord));
        }
        out
    }

    pub(crate) fn from_point(point: G2Projective) -> Self {
        Self {
            point: point.into_affine(),
        }
    }

    pub(crate) fn point(&self) -> G2Affine {
        self.point
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::PrivateKey;
    use crate::random::OsRandom;

    fn random_public_key() -> PublicKey {
        let sk = PrivateKey::random(&OsRandom).unwrap();
        PublicKey::from_point(G1Affine::generator() * sk.scalar()).unwrap()
    }

    #[test]
    fn test_public_key_bytes_roundtrip() {
        let pk = random_public_key();
        let bytes = pk.to_bytes();
        assert_eq!(bytes.len(), 64);
        assert_eq!(PublicKey::from_bytes(&bytes).unwrap(), pk);

        let (x, y) = pk.bytes_x_y();
        assert_eq!(PublicKey::new(x, y).unwrap(), pk);
    }

    #[test]
    fn test_public_key_rejects_off_curve() {
        let pk = random_public_key();
        let mut bytes = pk.to_bytes();
        bytes[63] ^= 1;
        assert!(matches!(PublicKey::from_bytes(&bytes), Err(CoreError::InvalidKey(_))));
        assert!(matches!(PublicKey::from_bytes(&[0u8; 64]), Err(CoreError::InvalidKey(_))));
        assert!(matches!(PublicKey::from_bytes(&[0u8; 63]), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_augment_inverse_is_identity_error() {
        let pk = random_public_key();
        let negated = PublicKey::from_point(-pk.point().into_group()).unwrap();
        assert!(matches!(pk.augment(&negated), Err(CoreError::InvalidKey(_))));
    }

    #[test]
    fn test_twist_point_roundtrip_and_identity() {
        let point = TwistPoint::from_point(G2Affine::generator() * ark_bn254::Fr::from(7u64));
        let bytes = point.to_bytes();
        assert_eq!(bytes.len(), 128);
        assert_eq!(TwistPoint::from_bytes(&bytes).unwrap(), point);

        let identity = TwistPoint::from_bytes(&[0u8; 128]).unwrap();
        assert_eq!(identity.to_bytes(), [0u8; 128]);

        let mut bad = bytes;
        bad[127] ^= 1;
        assert!(TwistPoint::from_bytes(&bad).is_err());
    }
}
