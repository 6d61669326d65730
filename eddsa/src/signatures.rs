//! Signature type, wire codec and the challenge hash.

use ark_ff::{BigInteger, PrimeField};
use curve::{compress, decode_point, Affine, BaseField, CodecError, CurveId, FIELD_SIZE};

use crate::constants::SIG_SIZE;
use crate::errors::EddsaError;
use crate::mimc::hash_elements;

/// An EdDSA signature `(R, S)`.
///
/// `S` is kept as a base-field element, the form the verification circuit
/// consumes it in. Signatures issued by [`crate::SigningKey`] always carry
/// `S` reduced modulo the subgroup order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// The commitment point R = [r]G.
    pub r: Affine,
    /// The response S = r + h * sk mod l.
    pub s: BaseField,
}

impl Signature {
    /// Serialize as `compress(R) || S`, S in big-endian order.
    pub fn to_bytes(&self) -> [u8; SIG_SIZE] {
        let mut out = [0u8; SIG_SIZE];
        out[..FIELD_SIZE].copy_from_slice(&compress(&self.r));
        out[FIELD_SIZE..].copy_from_slice(&self.s.into_bigint().to_bytes_be());
        out
    }

    /// Decode a signature on `curve`.
    ///
    /// Only R is validated; S is read as a big-endian integer and reduced
    /// into the base field without a range check.
    pub fn from_bytes(curve: CurveId, bytes: &[u8]) -> Result<Self, EddsaError> {
        curve.ensure_supported()?;
        let expected = curve.signature_width();
        if bytes.len() != expected {
            return Err(EddsaError::MalformedSignature(CodecError::InvalidLength {
                expected,
                actual: bytes.len(),
            }));
        }

        let (r_bytes, s_bytes) = bytes.split_at(curve.point_width());
        let r = decode_point(curve, r_bytes).map_err(EddsaError::MalformedSignature)?;
        let s = BaseField::from_be_bytes_mod_order(s_bytes);
        Ok(Self { r, s })
    }
}

/// Challenge `H(R.x, R.y, A.x, A.y, m)`.
pub fn hash_challenge(r: &Affine, a: &Affine, message: &BaseField) -> BaseField {
    hash_elements(&[r.x, r.y, a.x, a.y, *message])
}
