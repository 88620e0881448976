use std::sync::OnceLock;

use ark_bn254::{Bn254, G1Affine, G2Affine};
use ark_ec::pairing::Pairing;
use ark_ec::AffineRepr;

use super::GtElement;

/// Optimal-ate pairing `e: G1 × G2 → GT`.
pub(crate) fn pair(p: G1Affine, q: G2Affine) -> GtElement {
    GtElement::from_field(Bn254::pairing(p, q).0)
}

pub(crate) fn g2_generator() -> G2Affine {
    G2Affine::generator()
}

/// `e(g1, g2)`, computed once.
pub(crate) fn gt_generator() -> GtElement {
    static GENERATOR: OnceLock<GtElement> = OnceLock::new();
    *GENERATOR.get_or_init(|| pair(G1Affine::generator(), G2Affine::generator()))
}
