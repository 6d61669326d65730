//! Twisted-Edwards point primitives over the BN254 scalar field.
//!
//! This crate wraps the Baby Jubjub curve from `ark-ed-on-bn254` with the
//! pieces the signature scheme and the verification circuit share: explicit
//! curve identifiers, the compressed point codec, cofactor clearing and a
//! native double-base scalar multiplication. The curve arithmetic itself is
//! consumed from arkworks, not reimplemented here.

mod codec;
mod cofactor;
mod curve_id;
mod errors;
mod msm;
mod random;

pub use ark_ed_on_bn254::{
    EdwardsAffine as Affine, EdwardsConfig, EdwardsProjective as Projective, Fq as BaseField,
    Fr as ScalarField,
};
pub use codec::{compress, decode_point, decompress, encode_point, is_lexicographically_largest};
pub use cofactor::{clear_cofactor, cofactor_doublings, curve_cofactor};
pub use curve_id::CurveId;
pub use errors::CodecError;
pub use msm::double_scalar_mul_basepoint;
pub use random::{random_point, RandomField};

/// Size in bytes of a compressed point on the supported curve.
pub const POINT_SIZE: usize = 32;

/// Size in bytes of a field element of the supported curve.
pub const FIELD_SIZE: usize = 32;

/// Canonical base point of the prime-order subgroup.
pub fn generator() -> Affine {
    <EdwardsConfig as ark_ec::twisted_edwards::TECurveConfig>::GENERATOR
}
