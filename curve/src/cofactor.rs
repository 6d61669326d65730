use ark_ec::{CurveConfig, Group};
use tracing::warn;

use crate::{CodecError, EdwardsConfig, Projective};

/// Number of doublings that multiply a point by `cofactor`.
///
/// Only the cofactors of the twisted-Edwards families in use are handled.
pub fn cofactor_doublings(cofactor: u64) -> Result<u32, CodecError> {
    match cofactor {
        4 => Ok(2),
        8 => Ok(3),
        other => {
            warn!(cofactor = other, "curve cofactor is not implemented");
            Err(CodecError::UnimplementedCofactor(other))
        }
    }
}

/// Cofactor of the supported curve as declared by the curve library.
pub fn curve_cofactor() -> Result<u64, CodecError> {
    match <EdwardsConfig as CurveConfig>::COFACTOR {
        [cofactor] => Ok(*cofactor),
        _ => Err(CodecError::UnimplementedCofactor(u64::MAX)),
    }
}

/// Multiply `point` by the cofactor through repeated doubling.
pub fn clear_cofactor(point: &Projective, doublings: u32) -> Projective {
    (0..doublings).fold(*point, |acc, _| acc.double())
}
