//! Error types for the point codec.

use thiserror::Error;

use crate::CurveId;

/// Errors raised while encoding or decoding curve points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The curve identifier names a family this build does not implement.
    #[error("unsupported curve: {0}")]
    UnsupportedCurve(CurveId),

    /// The input buffer does not have the width the curve requires.
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// The bytes do not describe a point on the curve.
    #[error("malformed point: {0}")]
    MalformedPoint(&'static str),

    /// The curve cofactor is not one the verification equation knows how to clear.
    #[error("unimplemented cofactor: {0}")]
    UnimplementedCofactor(u64),
}
