//! # Zero-Knowledge EdDSA Signature Verification Circuit
//!
//! Groth16 proofs over BN254 that an EdDSA-MiMC signature on Baby Jubjub is
//! valid, plus the adapters that hand those proofs to an EVM verifier.
//!
//! ## Verification Equation
//!
//! ```text
//! h  = MiMC(R.x, R.y, A.x, A.y, m)
//! Q  = [S]G - [h]A
//! [8](R - Q) = O
//! ```
//!
//! The circuit asserts Q is on the curve and the cofactor-cleared residue is
//! the identity `(0, 1)`. Optionally the message is pinned to a constant
//! (see [`MessagePolicy`]).
//!
//! ## Pipeline
//!
//! 1. [`compile`] resolves a [`CircuitConfig`] and synthesizes the circuit.
//! 2. [`setup`] derives the Groth16 proving and verifying keys.
//! 3. [`prove`] checks the assignment and produces a proof.
//! 4. [`verify`] checks a proof; it fails closed.
//! 5. [`encode`] turns a proof and public witness into `verifyProof` calldata.
//!
//! [`ProverContext`] bundles steps 1 and 2 into a one-time initialization and
//! serves the rest concurrently. [`ProverContext::load_or_initialize`] keeps
//! the keys on disk so proofs and the exported verifier stay paired across
//! runs.
//!
//! ```rust,ignore
//! use circuit::{CircuitConfig, ProverContext, SignatureWitness};
//! use eddsa::{Message, SigningKey};
//! use rand::thread_rng;
//!
//! let ctx = ProverContext::initialize(CircuitConfig::default(), &mut thread_rng())?;
//!
//! let sk = SigningKey::generate(&mut thread_rng());
//! let msg = Message::try_from("20240515alice123MOD01")?;
//! let witness = SignatureWitness::new(&sk.sign(&msg), &sk.verifying_key(), &msg);
//!
//! let calldata = ctx.attest(&witness, &mut thread_rng())?;
//! println!("{}", serde_json::to_string(&calldata.to_json())?);
//! ```
//!
//! ## Public Inputs
//!
//! With [`Disclosure::Full`] the public inputs are A.x, A.y, R.x, R.y, S, m.
//! With [`Disclosure::MessageOnly`] only m is public and A is fixed to the
//! configured [`CircuitConfig::signer`].

mod config;
mod context;
mod eddsa_circuit;
mod errors;
mod ethereum;
mod keystore;
mod mimc_gadget;
mod pipeline;
mod point_ops;
mod signature_witness;
mod solidity;


pub use config::{CircuitConfig, CircuitShape, Disclosure, MessagePolicy};
pub use context::ProverContext;
pub use eddsa_circuit::{enforce_signature, EddsaCircuit};
pub use errors::{CircuitError, EncodingError, PipelineError};
pub use ethereum::{
    encode, encode_raw, EthereumProof, EthereumProofJson, ToRawBytes, PROOF_INTS, RAW_PROOF_SIZE,
};
pub use keystore::{load_keys, save_keys, DEFAULT_KEYS_PATH};
pub use mimc_gadget::hash_vars;
pub use pipeline::{
    compile, prepare, prove, public_input_count, setup, verify, CompiledCircuit,
};
pub use point_ops::{
    alloc_point, clear_cofactor, double_base_scalar_mul, enforce_identity, enforce_on_curve,
};
pub use signature_witness::{PublicWitness, SignatureWitness, WITNESS_HEADER_SIZE};
pub use solidity::{export_solidity, write_solidity, DEFAULT_CONTRACT_PATH};

// Re-export commonly used types
pub use ark_bn254::Bn254;
pub use ark_groth16::{PreparedVerifyingKey, Proof, ProvingKey, VerifyingKey};
pub use curve::{Affine, BaseField, CurveId};
pub use eddsa::{Message, Signature, SigningKey};
