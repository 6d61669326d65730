//! Conversion of proofs and public witnesses into EVM verifier calldata.

use ark_bn254::{Bn254, Fq};
use ark_ff::{BigInteger, PrimeField};
use ark_groth16::{Proof, VerifyingKey};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::EncodingError;
use crate::pipeline::public_input_count;
use crate::signature_witness::{PublicWitness, WITNESS_HEADER_SIZE};

/// Number of integers describing a proof.
pub const PROOF_INTS: usize = 8;

/// Bytes of the raw proof consumed by the encoder.
pub const RAW_PROOF_SIZE: usize = 32 * PROOF_INTS;

const WORD: usize = 32;

/// Raw proof serialization in the coordinate order the pairing precompile
/// expects: A.x, A.y, B.x.c1, B.x.c0, B.y.c1, B.y.c0, C.x, C.y.
pub trait ToRawBytes {
    fn to_raw_bytes(&self) -> [u8; RAW_PROOF_SIZE];
}

impl ToRawBytes for Proof<Bn254> {
    fn to_raw_bytes(&self) -> [u8; RAW_PROOF_SIZE] {
        let words: [&Fq; PROOF_INTS] = [
            &self.a.x,
            &self.a.y,
            &self.b.x.c1,
            &self.b.x.c0,
            &self.b.y.c1,
            &self.b.y.c0,
            &self.c.x,
            &self.c.y,
        ];
        let mut out = [0u8; RAW_PROOF_SIZE];
        for (chunk, word) in out.chunks_exact_mut(WORD).zip(words) {
            chunk.copy_from_slice(&word.into_bigint().to_bytes_be());
        }
        out
    }
}

/// Proof and public inputs as integers for `verifyProof`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EthereumProof {
    pub proof: [BigUint; PROOF_INTS],
    pub inputs: Vec<BigUint>,
}

/// JSON form of [`EthereumProof`], integers as decimal strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EthereumProofJson {
    pub eth_proof: Vec<String>,
    pub input: Vec<String>,
}

impl EthereumProof {
    pub fn to_json(&self) -> EthereumProofJson {
        EthereumProofJson {
            eth_proof: self.proof.iter().map(BigUint::to_string).collect(),
            input: self.inputs.iter().map(BigUint::to_string).collect(),
        }
    }
}

/// Encode a proof and its public witness for the EVM verifier.
pub fn encode(
    vk: &VerifyingKey<Bn254>,
    proof: &Proof<Bn254>,
    public: &PublicWitness,
) -> Result<EthereumProof, EncodingError> {
    encode_raw(vk, &proof.to_raw_bytes(), &public.to_bytes())
}

/// Encode from serialized forms.
///
/// Only the first 256 bytes of `raw_proof` are read; anything after the
/// three proof points is ignored. The witness header is stripped and the
/// remainder must hold exactly as many elements as `vk` declares.
pub fn encode_raw(
    vk: &VerifyingKey<Bn254>,
    raw_proof: &[u8],
    public_witness: &[u8],
) -> Result<EthereumProof, EncodingError> {
    if raw_proof.len() < RAW_PROOF_SIZE {
        return Err(EncodingError::ProofTooShort(raw_proof.len()));
    }
    if raw_proof.len() > RAW_PROOF_SIZE {
        debug!(
            dropped = raw_proof.len() - RAW_PROOF_SIZE,
            "ignoring trailing proof bytes"
        );
    }
    let proof = std::array::from_fn(|i| BigUint::from_bytes_be(&raw_proof[i * WORD..(i + 1) * WORD]));

    if public_witness.len() < WITNESS_HEADER_SIZE {
        return Err(EncodingError::MalformedWitness("truncated header"));
    }
    let body = &public_witness[WITNESS_HEADER_SIZE..];
    if body.len() % WORD != 0 {
        return Err(EncodingError::MalformedWitness(
            "body is not a whole number of elements",
        ));
    }

    let expected = public_input_count(vk);
    let actual = body.len() / WORD;
    if actual != expected {
        return Err(EncodingError::WitnessCountMismatch { expected, actual });
    }
    let inputs = body.chunks_exact(WORD).map(BigUint::from_bytes_be).collect();

    Ok(EthereumProof { proof, inputs })
}
