//! The EdDSA verification circuit.
//!
//! Given A, (R, S) and m the circuit enforces
//!
//! ```text
//! h  = MiMC(R.x, R.y, A.x, A.y, m)
//! Q  = [S]G - [h]A          (on curve)
//! Q' = R - Q
//! [cofactor]Q' = (0, 1)
//! ```
//!
//! and optionally `m == expected` for the fixed-message variant. When a
//! signer is configured A must equal it; with message-only disclosure A is
//! that signer as a circuit constant.

use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::prelude::*;
use ark_relations::ns;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError};
use ark_ed_on_bn254::constraints::EdwardsVar;
use curve::BaseField;

use crate::config::{CircuitShape, Disclosure};
use crate::mimc_gadget::hash_vars;
use crate::point_ops::{
    alloc_point, clear_cofactor, double_base_scalar_mul, enforce_identity, enforce_on_curve,
};
use crate::signature_witness::SignatureWitness;

#[derive(Clone, Debug)]
pub struct EddsaCircuit {
    shape: CircuitShape,
    witness: Option<SignatureWitness>,
}

impl EddsaCircuit {
    /// A circuit without values, for compilation and setup.
    pub fn blank(shape: CircuitShape) -> Self {
        Self {
            shape,
            witness: None,
        }
    }

    pub fn new(shape: CircuitShape, witness: SignatureWitness) -> Self {
        Self {
            shape,
            witness: Some(witness),
        }
    }

    pub fn shape(&self) -> &CircuitShape {
        &self.shape
    }
}

impl ConstraintSynthesizer<BaseField> for EddsaCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<BaseField>) -> Result<(), SynthesisError> {
        let w = self.witness;
        let mode = self.shape.disclosure().signature_mode();

        // allocation order fixes the public input order: A, R, S, m
        let a = match (self.shape.disclosure(), self.shape.signer()) {
            (Disclosure::MessageOnly, Some(signer)) => {
                alloc_point(ns!(cs, "public_key"), Some(signer), AllocationMode::Constant)?
            }
            (Disclosure::MessageOnly, None) => return Err(SynthesisError::Unsatisfiable),
            (Disclosure::Full, signer) => {
                let a = alloc_point(ns!(cs, "public_key"), w.map(|w| w.public_key), mode)?;
                if let Some(signer) = signer {
                    let bound = alloc_point(cs.clone(), Some(signer), AllocationMode::Constant)?;
                    a.enforce_equal(&bound)?;
                }
                a
            }
        };
        let r = alloc_point(ns!(cs, "r"), w.map(|w| w.r), mode)?;
        let s = FpVar::new_variable(
            ns!(cs, "s"),
            || w.map(|w| w.s).ok_or(SynthesisError::AssignmentMissing),
            mode,
        )?;
        let m = FpVar::new_input(ns!(cs, "message"), || {
            w.map(|w| w.message).ok_or(SynthesisError::AssignmentMissing)
        })?;

        if let Some(expected) = self.shape.expected_message() {
            m.enforce_equal(&FpVar::constant(expected))?;
        }

        enforce_signature(&a, &r, &s, &m, self.shape.cofactor_doublings())
    }
}

/// Enforce that (R, S) is a valid signature on `m` under `a`.
pub fn enforce_signature(
    a: &EdwardsVar,
    r: &EdwardsVar,
    s: &FpVar<BaseField>,
    m: &FpVar<BaseField>,
    cofactor_doublings: u32,
) -> Result<(), SynthesisError> {
    let h = hash_vars(&[
        r.x.clone(),
        r.y.clone(),
        a.x.clone(),
        a.y.clone(),
        m.clone(),
    ])?;

    let q = double_base_scalar_mul(s, &h, &a.negate()?)?;
    enforce_on_curve(&q)?;

    let residue = q.negate()? + r;
    let residue = clear_cofactor(&residue, cofactor_doublings)?;
    enforce_identity(&residue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CircuitConfig, MessagePolicy};
    use ark_relations::r1cs::ConstraintSystem;
    use eddsa::{Message, SigningKey};

    fn bound_to(seed: u8, disclosure: Disclosure) -> CircuitConfig {
        CircuitConfig {
            disclosure,
            signer: Some(SigningKey::from_seed(&[seed; 32]).verifying_key().to_hex()),
            ..CircuitConfig::default()
        }
    }

    fn witness(text: &str) -> SignatureWitness {
        witness_from(11, text)
    }

    fn witness_from(seed: u8, text: &str) -> SignatureWitness {
        let sk = SigningKey::from_seed(&[seed; 32]);
        let msg = Message::try_from(text).expect("message");
        SignatureWitness::new(&sk.sign(&msg), &sk.verifying_key(), &msg)
    }

    fn satisfied(config: &CircuitConfig, witness: SignatureWitness) -> bool {
        let shape = CircuitShape::resolve(config).expect("shape");
        let cs = ConstraintSystem::<BaseField>::new_ref();
        EddsaCircuit::new(shape, witness)
            .generate_constraints(cs.clone())
            .expect("synthesize");
        cs.is_satisfied().expect("satisfied")
    }

    #[test]
    fn test_valid_signature_satisfies() {
        let config = CircuitConfig::default();
        assert!(satisfied(&config, witness("20240515alice123MOD01")));
    }

    #[test]
    fn test_public_input_count() {
        for disclosure in [Disclosure::Full, Disclosure::MessageOnly] {
            let config = bound_to(11, disclosure);
            let shape = CircuitShape::resolve(&config).expect("shape");
            let cs = ConstraintSystem::<BaseField>::new_ref();
            EddsaCircuit::new(shape, witness("hello"))
                .generate_constraints(cs.clone())
                .expect("synthesize");
            // the constant one is instance variable zero
            assert_eq!(cs.num_instance_variables() - 1, disclosure.public_input_count());
            assert!(cs.is_satisfied().expect("satisfied"));
        }
    }

    #[test]
    fn test_altered_message_unsatisfied() {
        let mut w = witness("20240515alice123MOD01");
        w.message += BaseField::from(1u64);
        assert!(!satisfied(&CircuitConfig::default(), w));
    }

    #[test]
    fn test_swapped_key_unsatisfied() {
        let mut w = witness("20240515alice123MOD01");
        w.public_key = *SigningKey::from_seed(&[12u8; 32]).verifying_key().point();
        assert!(!satisfied(&CircuitConfig::default(), w));
    }

    #[test]
    fn test_fixed_message_policy() {
        let config = CircuitConfig {
            message: MessagePolicy::Fixed {
                expected: "20240515alice123MOD01".to_string(),
            },
            ..CircuitConfig::default()
        };
        assert!(satisfied(&config, witness("20240515alice123MOD01")));
        assert!(!satisfied(&config, witness("20240516alice123MOD01")));
    }

    #[test]
    fn test_signer_binding_rejects_other_keys() {
        for disclosure in [Disclosure::Full, Disclosure::MessageOnly] {
            let config = bound_to(11, disclosure);
            assert!(satisfied(&config, witness_from(11, "20240515alice123MOD01")));
            assert!(!satisfied(&config, witness_from(12, "20240515mallory1MOD01")));
        }
    }

    #[test]
    fn test_message_only_ignores_witness_key() {
        // the key is a constant, so a witness carrying another key still
        // has to hold a signature by the configured signer
        let config = bound_to(11, Disclosure::MessageOnly);
        let mut w = witness_from(11, "20240515alice123MOD01");
        w.public_key = *SigningKey::from_seed(&[12u8; 32]).verifying_key().point();
        assert!(satisfied(&config, w));
    }

    #[test]
    fn test_blank_circuit_synthesizes_in_setup_mode() {
        let shape = CircuitShape::resolve(&CircuitConfig::default()).expect("shape");
        let cs = ConstraintSystem::<BaseField>::new_ref();
        cs.set_mode(ark_relations::r1cs::SynthesisMode::Setup);
        EddsaCircuit::blank(shape)
            .generate_constraints(cs.clone())
            .expect("synthesize");
        assert!(cs.num_constraints() > 0);
    }
}
