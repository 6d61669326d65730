//! Error types for the EdDSA-MiMC signature scheme.

use curve::CodecError;
use thiserror::Error;

/// Errors that can occur while building messages, keys and signatures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EddsaError {
    /// A point or key failed to decode.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The R component of a signature failed to decode, or the buffer has the
    /// wrong width. The S component is never range checked.
    #[error("malformed signature: {0}")]
    MalformedSignature(#[source] CodecError),

    /// Hex text could not be decoded.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Messages must contain at least one byte.
    #[error("message is empty")]
    EmptyMessage,

    /// The message does not fit in a single field element.
    #[error("message is {0} bytes, at most 32 fit in a field element")]
    MessageTooLong(usize),

    /// The message, read as a big-endian integer, is not below the modulus.
    #[error("message is not a canonical field element")]
    MessageOutOfField,

    /// Attendance dates are written `YYYYMMDD`.
    #[error("invalid date `{0}`, expected YYYYMMDD")]
    InvalidDate(String),

    /// Hash input that is neither a short value nor a list of field elements.
    #[error("invalid hash input: {0}")]
    InvalidHashInput(&'static str),
}
