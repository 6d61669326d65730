//! Compressed point encoding.
//!
//! A point is stored as its Y coordinate in little-endian order. The most
//! significant bit of the last byte is the sign flag: it is set when X is
//! lexicographically largest, i.e. greater than `(p - 1) / 2`.

use ark_ec::twisted_edwards::TECurveConfig;
use ark_ff::{BigInteger, Field, One, PrimeField, Zero};
use tracing::debug;

use crate::{Affine, BaseField, CodecError, CurveId, EdwardsConfig, POINT_SIZE};

const SIGN_MASK: u8 = 0x80;

/// Encode a point on the given curve into its compressed form.
pub fn encode_point(curve: CurveId, point: &Affine) -> Result<Vec<u8>, CodecError> {
    curve.ensure_supported()?;
    if !point.is_on_curve() {
        return Err(CodecError::MalformedPoint("point is not on the curve"));
    }
    Ok(compress(point).to_vec())
}

/// Decode a compressed point on the given curve.
///
/// The buffer must be exactly the curve's point width.
pub fn decode_point(curve: CurveId, bytes: &[u8]) -> Result<Affine, CodecError> {
    curve.ensure_supported()?;
    let expected = curve.point_width();
    if bytes.len() != expected {
        return Err(CodecError::InvalidLength {
            expected,
            actual: bytes.len(),
        });
    }
    decompress(bytes)
}

/// Compress a point without curve checks.
pub fn compress(point: &Affine) -> [u8; POINT_SIZE] {
    let mut out = [0u8; POINT_SIZE];
    out.copy_from_slice(&point.y.into_bigint().to_bytes_le());
    if is_lexicographically_largest(&point.x) {
        out[POINT_SIZE - 1] |= SIGN_MASK;
    }
    out
}

/// Recover a point from its compressed form.
pub fn decompress(bytes: &[u8]) -> Result<Affine, CodecError> {
    if bytes.len() != POINT_SIZE {
        return Err(CodecError::InvalidLength {
            expected: POINT_SIZE,
            actual: bytes.len(),
        });
    }

    let mut y_bytes = [0u8; POINT_SIZE];
    y_bytes.copy_from_slice(bytes);
    let negative = y_bytes[POINT_SIZE - 1] & SIGN_MASK != 0;
    y_bytes[POINT_SIZE - 1] &= !SIGN_MASK;

    let y = BaseField::from_le_bytes_mod_order(&y_bytes);
    if y.into_bigint().to_bytes_le() != y_bytes {
        return Err(CodecError::MalformedPoint("y coordinate out of field range"));
    }

    let mut x = recover_x(&y)?;
    if x.is_zero() && negative {
        return Err(CodecError::MalformedPoint("sign flag set for x = 0"));
    }
    if is_lexicographically_largest(&x) != negative {
        x = -x;
    }

    let point = Affine::new_unchecked(x, y);
    if !point.is_on_curve() {
        return Err(CodecError::MalformedPoint("point is not on the curve"));
    }
    debug!(negative, "decoded compressed point");
    Ok(point)
}

/// Whether `x` lies in the upper half of the field, `x > (p - 1) / 2`.
pub fn is_lexicographically_largest(x: &BaseField) -> bool {
    x.into_bigint() > BaseField::MODULUS_MINUS_ONE_DIV_TWO
}

// x^2 = (1 - y^2) / (a - d*y^2)
fn recover_x(y: &BaseField) -> Result<BaseField, CodecError> {
    let y2 = y.square();
    let num = BaseField::one() - y2;
    let den = EdwardsConfig::COEFF_A - EdwardsConfig::COEFF_D * y2;
    let den_inv = den
        .inverse()
        .ok_or(CodecError::MalformedPoint("degenerate y coordinate"))?;
    (num * den_inv)
        .sqrt()
        .ok_or(CodecError::MalformedPoint("y coordinate has no matching x"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generator, random_point};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generator_round_trip() {
        let g = generator();
        let bytes = encode_point(CurveId::Bn254, &g).expect("encode");
        assert_eq!(bytes.len(), 32);
        let decoded = decode_point(CurveId::Bn254, &bytes).expect("decode");
        assert_eq!(decoded, g);
    }

    #[test]
    fn test_random_points_round_trip() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..32 {
            let p = random_point(&mut rng);
            let decoded = decompress(&compress(&p)).expect("decode");
            assert_eq!(decoded, p);
        }
    }

    #[test]
    fn test_negated_point_flips_sign_bit() {
        let g = generator();
        let a = compress(&g);
        let b = compress(&-g);
        assert_eq!(a[..31], b[..31]);
        assert_eq!(a[31] ^ b[31], SIGN_MASK);
    }

    #[test]
    fn test_identity_round_trip() {
        let id = Affine::new_unchecked(BaseField::zero(), BaseField::one());
        let bytes = compress(&id);
        assert_eq!(bytes[0], 1);
        assert_eq!(decompress(&bytes).expect("decode"), id);
    }

    #[test]
    fn test_identity_with_sign_flag_rejected() {
        let id = Affine::new_unchecked(BaseField::zero(), BaseField::one());
        let mut bytes = compress(&id);
        bytes[31] |= SIGN_MASK;
        assert!(matches!(
            decompress(&bytes),
            Err(CodecError::MalformedPoint(_))
        ));
    }

    #[test]
    fn test_wrong_length_rejected() {
        let bytes = compress(&generator());
        assert_eq!(
            decode_point(CurveId::Bn254, &bytes[..31]),
            Err(CodecError::InvalidLength {
                expected: 32,
                actual: 31
            })
        );
    }

    #[test]
    fn test_unsupported_curve_rejected() {
        let bytes = compress(&generator());
        assert_eq!(
            decode_point(CurveId::Bls12_381, &bytes),
            Err(CodecError::UnsupportedCurve(CurveId::Bls12_381))
        );
    }

    #[test]
    fn test_out_of_range_y_rejected() {
        // 2^255 - 1 with the sign bit cleared is still above the modulus.
        let mut bytes = [0xffu8; 32];
        bytes[31] = 0x7f;
        assert_eq!(
            decompress(&bytes),
            Err(CodecError::MalformedPoint("y coordinate out of field range"))
        );
    }

    #[test]
    fn test_some_y_values_have_no_point() {
        let rejected = (2u64..64)
            .map(|y| {
                let mut bytes = [0u8; 32];
                bytes[..8].copy_from_slice(&y.to_le_bytes());
                decompress(&bytes)
            })
            .filter(|r| r.is_err())
            .count();
        assert!(rejected > 0);
    }
}
