use ark_ec::{AffineRepr, Group};
use ark_ff::{BigInteger, PrimeField, Zero};

use crate::{generator, Affine, BaseField, Projective};

/// Compute `a * G + b * P` with a joint double-and-add over both scalars.
///
/// Scalars are base-field elements, the representation the verification
/// circuit works with; they are not reduced modulo the subgroup order.
pub fn double_scalar_mul_basepoint(a: &BaseField, b: &BaseField, point: &Affine) -> Projective {
    let g = generator().into_group();
    let p = point.into_group();
    let g_plus_p = g + p;

    let a_bits = a.into_bigint().to_bits_be();
    let b_bits = b.into_bigint().to_bits_be();

    let mut result = Projective::zero();
    for (a_bit, b_bit) in a_bits.into_iter().zip(b_bits) {
        result.double_in_place();
        match (a_bit, b_bit) {
            (true, true) => result += g_plus_p,
            (true, false) => result += g,
            (false, true) => result += p,
            (false, false) => {}
        }
    }

    result
}
