//! Process-wide prover state.

use std::path::Path;

use ark_bn254::Bn254;
use ark_groth16::{PreparedVerifyingKey, Proof, ProvingKey, VerifyingKey};
use rand::{CryptoRng, RngCore};
use tracing::{info, warn};

use crate::config::CircuitConfig;
use crate::errors::PipelineError;
use crate::ethereum::{encode, EthereumProof};
use crate::keystore::{load_keys, save_keys};
use crate::pipeline::{self, CompiledCircuit};
use crate::signature_witness::{PublicWitness, SignatureWitness};
use crate::solidity::export_solidity;

/// Compiled circuit and Groth16 keys, built once and then only read.
///
/// The context has no way to be re-initialized: proofs from one context are
/// always verified with the keys they were made for. Keys can be stored and
/// loaded so that separate processes share one setup. It is `Send + Sync`
/// and meant to be shared across request handlers.
pub struct ProverContext {
    config: CircuitConfig,
    compiled: CompiledCircuit,
    proving_key: ProvingKey<Bn254>,
    verifying_key: VerifyingKey<Bn254>,
    prepared: PreparedVerifyingKey<Bn254>,
}

impl ProverContext {
    /// Compile the circuit and run setup.
    pub fn initialize<R: RngCore + CryptoRng>(
        config: CircuitConfig,
        rng: &mut R,
    ) -> Result<Self, PipelineError> {
        let compiled = pipeline::compile(&config)?;
        let (proving_key, _) = pipeline::setup(&compiled, rng)?;
        Self::assemble(config, compiled, proving_key)
    }

    /// Compile the circuit and load the keys stored for it at `path`.
    pub fn load(config: CircuitConfig, path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let compiled = pipeline::compile(&config)?;
        let proving_key = load_keys(&compiled, path)?;
        Self::assemble(config, compiled, proving_key)
    }

    /// Load the keys at `path`, or run setup once and store them there.
    ///
    /// Every process sharing `path` proves and exports with the same keys.
    pub fn load_or_initialize<R: RngCore + CryptoRng>(
        config: CircuitConfig,
        path: impl AsRef<Path>,
        rng: &mut R,
    ) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(config, path);
        }
        let ctx = Self::initialize(config, rng)?;
        ctx.save(path)?;
        Ok(ctx)
    }

    /// Store this context's keys at `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PipelineError> {
        save_keys(&self.compiled, &self.proving_key, path)
    }

    fn assemble(
        config: CircuitConfig,
        compiled: CompiledCircuit,
        proving_key: ProvingKey<Bn254>,
    ) -> Result<Self, PipelineError> {
        let verifying_key = proving_key.vk.clone();
        let prepared = pipeline::prepare(&verifying_key)?;
        info!(
            curve = %config.curve,
            disclosure = ?config.disclosure,
            "prover context ready"
        );
        Ok(Self {
            config,
            compiled,
            proving_key,
            verifying_key,
            prepared,
        })
    }

    pub fn config(&self) -> &CircuitConfig {
        &self.config
    }

    pub fn compiled(&self) -> &CompiledCircuit {
        &self.compiled
    }

    pub fn verifying_key(&self) -> &VerifyingKey<Bn254> {
        &self.verifying_key
    }

    /// Public inputs of `witness` under this context's disclosure.
    pub fn public_witness(&self, witness: &SignatureWitness) -> PublicWitness {
        witness.public_witness(self.config.disclosure)
    }

    pub fn prove<R: RngCore + CryptoRng>(
        &self,
        witness: &SignatureWitness,
        rng: &mut R,
    ) -> Result<Proof<Bn254>, PipelineError> {
        pipeline::prove(&self.proving_key, &self.compiled, witness, rng)
    }

    pub fn verify(&self, proof: &Proof<Bn254>, public: &PublicWitness) -> Result<bool, PipelineError> {
        pipeline::verify(&self.prepared, proof, public)
    }

    pub fn encode(
        &self,
        proof: &Proof<Bn254>,
        public: &PublicWitness,
    ) -> Result<EthereumProof, PipelineError> {
        Ok(encode(&self.verifying_key, proof, public)?)
    }

    /// Prove, verify and encode in one step.
    pub fn attest<R: RngCore + CryptoRng>(
        &self,
        witness: &SignatureWitness,
        rng: &mut R,
    ) -> Result<EthereumProof, PipelineError> {
        let proof = self.prove(witness, rng)?;
        let public = self.public_witness(witness);
        if !self.verify(&proof, &public)? {
            warn!("freshly generated proof was rejected");
            return Err(PipelineError::VerificationFailed);
        }
        self.encode(&proof, &public)
    }

    /// Write the Solidity verifier for this context's verifying key.
    pub fn export_verifier(&self, path: impl AsRef<Path>) -> Result<(), PipelineError> {
        export_solidity(&self.verifying_key, path)
    }
}
