//! Circuit configuration and its resolved form.

use ark_r1cs_std::alloc::AllocationMode;
use curve::{cofactor_doublings, Affine, BaseField, CurveId};
use eddsa::{Message, VerifyingKey};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::CircuitError;

/// User-facing description of the verification circuit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitConfig {
    #[serde(default)]
    pub curve: CurveId,
    #[serde(default)]
    pub message: MessagePolicy,
    #[serde(default)]
    pub disclosure: Disclosure,
    /// Hex of the compressed public key every proof must be made under.
    /// Required for [`Disclosure::MessageOnly`], optional otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer: Option<String>,
}

/// Whether the circuit accepts any signed message or exactly one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessagePolicy {
    #[default]
    Arbitrary,
    /// Additionally constrain the message to equal `expected`, given as text.
    Fixed { expected: String },
}

/// Which inputs the proof discloses.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disclosure {
    /// Public key, signature and message are public inputs, in the order
    /// A.x, A.y, R.x, R.y, S, m.
    #[default]
    Full,
    /// Only the message is public. The public key is the configured signer,
    /// fixed as a circuit constant; R and S are private witness.
    MessageOnly,
}

impl Disclosure {
    pub const fn public_input_count(self) -> usize {
        match self {
            Disclosure::Full => 6,
            Disclosure::MessageOnly => 1,
        }
    }

    pub(crate) const fn signature_mode(self) -> AllocationMode {
        match self {
            Disclosure::Full => AllocationMode::Input,
            Disclosure::MessageOnly => AllocationMode::Witness,
        }
    }
}

/// A configuration with every parameter checked and resolved.
///
/// Holding one guarantees the curve is supported and its cofactor can be
/// cleared, so the circuit it describes is never under-constrained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CircuitShape {
    curve: CurveId,
    cofactor_doublings: u32,
    expected_message: Option<BaseField>,
    disclosure: Disclosure,
    signer: Option<Affine>,
}

impl CircuitShape {
    pub fn resolve(config: &CircuitConfig) -> Result<Self, CircuitError> {
        Self::with_cofactor(config, config.curve.cofactor())
    }

    pub(crate) fn with_cofactor(config: &CircuitConfig, cofactor: u64) -> Result<Self, CircuitError> {
        if let Err(err) = config.curve.ensure_supported() {
            warn!(curve = %config.curve, "no circuit for curve");
            return Err(err.into());
        }
        let cofactor_doublings = cofactor_doublings(cofactor)?;

        let expected_message = match &config.message {
            MessagePolicy::Arbitrary => None,
            MessagePolicy::Fixed { expected } => Some(
                Message::try_from(expected.as_str())
                    .map_err(CircuitError::InvalidFixedMessage)?
                    .element(),
            ),
        };

        let signer = config
            .signer
            .as_deref()
            .map(|key| VerifyingKey::from_hex(config.curve, key))
            .transpose()
            .map_err(CircuitError::InvalidSigner)?
            .map(|key| *key.point());
        if config.disclosure == Disclosure::MessageOnly && signer.is_none() {
            return Err(CircuitError::MissingSigner);
        }

        Ok(Self {
            curve: config.curve,
            cofactor_doublings,
            expected_message,
            disclosure: config.disclosure,
            signer,
        })
    }

    pub fn curve(&self) -> CurveId {
        self.curve
    }

    pub fn cofactor_doublings(&self) -> u32 {
        self.cofactor_doublings
    }

    pub fn expected_message(&self) -> Option<BaseField> {
        self.expected_message
    }

    pub fn disclosure(&self) -> Disclosure {
        self.disclosure
    }

    /// The public key the circuit is bound to, if any.
    pub fn signer(&self) -> Option<Affine> {
        self.signer
    }
}
