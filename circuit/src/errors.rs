//! Error types for circuit construction, the proof pipeline and encoding.

use ark_serialize::SerializationError;
use curve::CodecError;
use eddsa::EddsaError;
use thiserror::Error;

/// Errors raised while resolving and synthesizing a circuit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CircuitError {
    /// Unsupported curve or unimplemented cofactor.
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("invalid fixed message: {0}")]
    InvalidFixedMessage(#[source] EddsaError),

    /// A circuit that hides the public key must be bound to a signer.
    #[error("message-only disclosure requires a configured signer")]
    MissingSigner,

    #[error("invalid signer key: {0}")]
    InvalidSigner(#[source] EddsaError),

    #[error("synthesis failed: {0}")]
    Synthesis(String),
}

/// Errors raised by compile, setup, prove and verify.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("circuit compilation failed: {0}")]
    CircuitCompilation(#[from] CircuitError),

    #[error("setup failed: {0}")]
    Setup(String),

    /// The assignment does not satisfy the circuit; the signature is invalid
    /// for the given key and message. Retrying cannot succeed.
    #[error("witness does not satisfy the circuit: {0}")]
    Witness(String),

    #[error("proving failed: {0}")]
    Proving(String),

    /// A proof was produced but the verifier rejected it.
    #[error("proof verification failed")]
    VerificationFailed,

    /// The public witness does not match the verifying key. This is a
    /// configuration inconsistency, not a bad request.
    #[error("public witness has {actual} elements, verifying key expects {expected}")]
    WitnessCountMismatch { expected: usize, actual: usize },

    /// Any encoding failure other than a witness count mismatch.
    #[error(transparent)]
    Encoding(EncodingError),

    #[error("failed to write verifier contract: {0}")]
    Export(#[from] std::io::Error),

    #[error("key store: {0}")]
    KeyStore(#[from] SerializationError),

    /// Stored keys were set up for a different circuit.
    #[error("stored keys do not match the circuit: {0}")]
    KeyMismatch(String),
}

impl From<EncodingError> for PipelineError {
    fn from(err: EncodingError) -> Self {
        match err {
            EncodingError::WitnessCountMismatch { expected, actual } => {
                PipelineError::WitnessCountMismatch { expected, actual }
            }
            other => PipelineError::Encoding(other),
        }
    }
}

/// Errors raised while converting proofs and witnesses to EVM calldata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("raw proof is {0} bytes, expected at least 256")]
    ProofTooShort(usize),

    #[error("malformed public witness: {0}")]
    MalformedWitness(&'static str),

    #[error("public witness has {actual} elements, verifying key expects {expected}")]
    WitnessCountMismatch { expected: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoder_count_mismatch_maps_to_pipeline() {
        let err = PipelineError::from(EncodingError::WitnessCountMismatch {
            expected: 6,
            actual: 1,
        });
        assert!(matches!(
            err,
            PipelineError::WitnessCountMismatch {
                expected: 6,
                actual: 1
            }
        ));

        let err = PipelineError::from(EncodingError::ProofTooShort(10));
        assert!(matches!(
            err,
            PipelineError::Encoding(EncodingError::ProofTooShort(10))
        ));
    }

    #[test]
    fn test_circuit_errors_compare_by_value() {
        let hex_error = EddsaError::InvalidHex(hex::FromHexError::OddLength);
        assert_eq!(
            CircuitError::InvalidSigner(hex_error.clone()),
            CircuitError::InvalidSigner(hex_error)
        );
        assert_ne!(CircuitError::MissingSigner, CircuitError::Synthesis(String::new()));
    }
}
