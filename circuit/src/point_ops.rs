//! Twisted-Edwards point gadgets used by the verification circuit.

use ark_ec::twisted_edwards::TECurveConfig;
use ark_ec::AffineRepr;
use ark_ed_on_bn254::constraints::EdwardsVar;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::{Namespace, SynthesisError};
use curve::{generator, Affine, BaseField, EdwardsConfig};

/// Allocate a point from its affine coordinates.
///
/// Coordinates are taken as given; on-curve membership is the codec's job.
pub fn alloc_point(
    cs: impl Into<Namespace<BaseField>>,
    point: Option<Affine>,
    mode: AllocationMode,
) -> Result<EdwardsVar, SynthesisError> {
    let ns = cs.into();
    let cs = ns.cs();
    let x = FpVar::new_variable(
        cs.clone(),
        || point.map(|p| p.x).ok_or(SynthesisError::AssignmentMissing),
        mode,
    )?;
    let y = FpVar::new_variable(
        cs,
        || point.map(|p| p.y).ok_or(SynthesisError::AssignmentMissing),
        mode,
    )?;
    Ok(EdwardsVar::new(x, y))
}

/// Enforce `a*x^2 + y^2 = 1 + d*x^2*y^2`.
pub fn enforce_on_curve(point: &EdwardsVar) -> Result<(), SynthesisError> {
    let x2 = point.x.square()?;
    let y2 = point.y.square()?;
    let lhs = &x2 * EdwardsConfig::COEFF_A + &y2;
    let rhs = FpVar::one() + x2 * &y2 * EdwardsConfig::COEFF_D;
    lhs.enforce_equal(&rhs)
}

/// Compute `[a]G + [b]P` with a joint double-and-add over the bits of both
/// scalars, most significant first.
///
/// Each step selects one of {O, G, P, G + P}; G is a circuit constant.
pub fn double_base_scalar_mul(
    a: &FpVar<BaseField>,
    b: &FpVar<BaseField>,
    point: &EdwardsVar,
) -> Result<EdwardsVar, SynthesisError> {
    let zero = EdwardsVar::zero();
    let g = EdwardsVar::constant(generator().into_group());
    let g_plus_p = g.clone() + point;

    let a_bits = a.to_bits_le()?;
    let b_bits = b.to_bits_le()?;

    let mut acc = EdwardsVar::zero();
    for (a_bit, b_bit) in a_bits.iter().zip(&b_bits).rev() {
        let without_p = EdwardsVar::conditionally_select(a_bit, &g, &zero)?;
        let with_p = EdwardsVar::conditionally_select(a_bit, &g_plus_p, point)?;
        let addend = EdwardsVar::conditionally_select(b_bit, &with_p, &without_p)?;
        acc = acc.double()? + addend;
    }
    Ok(acc)
}

/// Multiply by the cofactor with `doublings` successive doublings.
pub fn clear_cofactor(point: &EdwardsVar, doublings: u32) -> Result<EdwardsVar, SynthesisError> {
    (0..doublings).try_fold(point.clone(), |acc, _| acc.double())
}

/// Enforce that `point` is the identity (0, 1).
pub fn enforce_identity(point: &EdwardsVar) -> Result<(), SynthesisError> {
    point.x.enforce_equal(&FpVar::zero())?;
    point.y.enforce_equal(&FpVar::one())
}
