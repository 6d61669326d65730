//! Compile, setup, prove and verify.
//!
//! Compilation and setup happen once; the resulting artifacts are immutable
//! and shared by every proving and verification call.

use std::time::Instant;

use ark_bn254::Bn254;
use ark_groth16::{Groth16, PreparedVerifyingKey, Proof, ProvingKey, VerifyingKey};
use ark_relations::r1cs::{
    ConstraintSynthesizer, ConstraintSystem, OptimizationGoal, SynthesisMode,
};
use ark_snark::{CircuitSpecificSetupSNARK, SNARK};
use curve::BaseField;
use rand::{CryptoRng, RngCore};
use tracing::{debug, info, warn};

use crate::config::{CircuitConfig, CircuitShape};
use crate::eddsa_circuit::EddsaCircuit;
use crate::errors::{CircuitError, PipelineError};
use crate::signature_witness::{PublicWitness, SignatureWitness};

/// A compiled circuit: its resolved shape and constraint statistics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledCircuit {
    shape: CircuitShape,
    num_constraints: usize,
    num_public_inputs: usize,
    num_witness_variables: usize,
}

impl CompiledCircuit {
    pub fn shape(&self) -> &CircuitShape {
        &self.shape
    }

    pub fn num_constraints(&self) -> usize {
        self.num_constraints
    }

    /// Public inputs, not counting the constant one.
    pub fn num_public_inputs(&self) -> usize {
        self.num_public_inputs
    }

    pub fn num_witness_variables(&self) -> usize {
        self.num_witness_variables
    }
}

/// Synthesize the circuit described by `config` without values.
///
/// Deterministic for a fixed configuration. Every failure is a
/// [`PipelineError::CircuitCompilation`]: an unsupported curve, an
/// unimplemented cofactor or a bad signer carry the [`CircuitError`] from
/// resolution, synthesis problems carry [`CircuitError::Synthesis`].
pub fn compile(config: &CircuitConfig) -> Result<CompiledCircuit, PipelineError> {
    let shape = CircuitShape::resolve(config)?;

    let cs = ConstraintSystem::<BaseField>::new_ref();
    cs.set_optimization_goal(OptimizationGoal::Constraints);
    cs.set_mode(SynthesisMode::Setup);
    EddsaCircuit::blank(shape.clone())
        .generate_constraints(cs.clone())
        .map_err(|e| CircuitError::Synthesis(e.to_string()))?;
    cs.finalize();

    let compiled = CompiledCircuit {
        num_constraints: cs.num_constraints(),
        num_public_inputs: cs.num_instance_variables() - 1,
        num_witness_variables: cs.num_witness_variables(),
        shape,
    };

    if compiled.num_constraints == 0 {
        return Err(CircuitError::Synthesis("circuit has no constraints".to_string()).into());
    }
    let expected = compiled.shape.disclosure().public_input_count();
    if compiled.num_public_inputs != expected {
        return Err(CircuitError::Synthesis(format!(
            "circuit allocates {} public inputs, expected {expected}",
            compiled.num_public_inputs
        ))
        .into());
    }

    info!(
        constraints = compiled.num_constraints,
        public_inputs = compiled.num_public_inputs,
        witnesses = compiled.num_witness_variables,
        "compiled verification circuit"
    );
    Ok(compiled)
}

/// Run the Groth16 setup for a compiled circuit.
pub fn setup<R: RngCore + CryptoRng>(
    compiled: &CompiledCircuit,
    rng: &mut R,
) -> Result<(ProvingKey<Bn254>, VerifyingKey<Bn254>), PipelineError> {
    let start = Instant::now();
    let (pk, vk) = Groth16::<Bn254>::circuit_specific_setup(
        EddsaCircuit::blank(compiled.shape.clone()),
        rng,
    )
    .map_err(|e| PipelineError::Setup(e.to_string()))?;

    let declared = public_input_count(&vk);
    if declared != compiled.num_public_inputs {
        return Err(PipelineError::Setup(format!(
            "verifying key declares {declared} public inputs, circuit has {}",
            compiled.num_public_inputs
        )));
    }

    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        public_inputs = declared,
        "groth16 setup complete"
    );
    Ok((pk, vk))
}

/// Prove that `witness` satisfies the circuit.
///
/// The assignment is checked against the constraints first, so an invalid
/// signature is reported as [`PipelineError::Witness`] instead of yielding a
/// proof that fails verification.
pub fn prove<R: RngCore + CryptoRng>(
    pk: &ProvingKey<Bn254>,
    compiled: &CompiledCircuit,
    witness: &SignatureWitness,
    rng: &mut R,
) -> Result<Proof<Bn254>, PipelineError> {
    let circuit = EddsaCircuit::new(compiled.shape.clone(), *witness);
    check_satisfied(circuit.clone())?;

    let start = Instant::now();
    let proof = Groth16::<Bn254>::prove(pk, circuit, rng)
        .map_err(|e| PipelineError::Proving(e.to_string()))?;
    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        "generated proof"
    );
    Ok(proof)
}

/// Verify a proof against a prepared verifying key.
///
/// Fails closed: a proof the verifier cannot process is reported as
/// `Ok(false)`. A public witness of the wrong length is a configuration error.
pub fn verify(
    pvk: &PreparedVerifyingKey<Bn254>,
    proof: &Proof<Bn254>,
    public: &PublicWitness,
) -> Result<bool, PipelineError> {
    let expected = public_input_count(&pvk.vk);
    if public.len() != expected {
        return Err(PipelineError::WitnessCountMismatch {
            expected,
            actual: public.len(),
        });
    }

    match Groth16::<Bn254>::verify_with_processed_vk(pvk, public.elements(), proof) {
        Ok(true) => {
            debug!("proof accepted");
            Ok(true)
        }
        Ok(false) => {
            warn!("proof rejected");
            Ok(false)
        }
        Err(err) => {
            warn!(error = %err, "proof could not be verified");
            Ok(false)
        }
    }
}

/// Prepare a verifying key for repeated verification.
pub fn prepare(vk: &VerifyingKey<Bn254>) -> Result<PreparedVerifyingKey<Bn254>, PipelineError> {
    Groth16::<Bn254>::process_vk(vk).map_err(|e| PipelineError::Setup(e.to_string()))
}

/// Number of public inputs a verifying key accepts.
pub fn public_input_count(vk: &VerifyingKey<Bn254>) -> usize {
    vk.gamma_abc_g1.len().saturating_sub(1)
}

fn check_satisfied(circuit: EddsaCircuit) -> Result<(), PipelineError> {
    let cs = ConstraintSystem::<BaseField>::new_ref();
    cs.set_optimization_goal(OptimizationGoal::Constraints);
    circuit
        .generate_constraints(cs.clone())
        .map_err(|e| PipelineError::Witness(e.to_string()))?;
    cs.finalize();

    match cs.which_is_unsatisfied() {
        Ok(None) => Ok(()),
        Ok(Some(constraint)) => {
            warn!(constraint = %constraint, "assignment does not satisfy the circuit");
            Err(PipelineError::Witness(format!(
                "unsatisfied constraint {constraint}"
            )))
        }
        Err(err) => Err(PipelineError::Witness(err.to_string())),
    }
}
