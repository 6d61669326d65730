//! Groth16 keys on disk.
//!
//! A key file starts with a fingerprint of the compiled circuit followed by
//! the proving key, which embeds the verifying key. Loading checks the
//! fingerprint against the circuit compiled from the current configuration.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use ark_bn254::Bn254;
use ark_groth16::ProvingKey;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, SerializationError};
use curve::{Affine, BaseField};
use tracing::{info, warn};

use crate::errors::PipelineError;
use crate::pipeline::{public_input_count, CompiledCircuit};

/// Default location of the stored keys.
pub const DEFAULT_KEYS_PATH: &str = "./attest.keys";

#[derive(Debug, PartialEq, Eq)]
struct Fingerprint {
    constraints: u64,
    public_inputs: u64,
    expected_message: Option<BaseField>,
    signer: Option<Affine>,
}

impl Fingerprint {
    fn of(compiled: &CompiledCircuit) -> Self {
        Self {
            constraints: compiled.num_constraints() as u64,
            public_inputs: compiled.num_public_inputs() as u64,
            expected_message: compiled.shape().expected_message(),
            signer: compiled.shape().signer(),
        }
    }

    fn write<W: Write>(&self, mut out: W) -> Result<(), SerializationError> {
        self.constraints.serialize_uncompressed(&mut out)?;
        self.public_inputs.serialize_uncompressed(&mut out)?;
        self.expected_message.serialize_uncompressed(&mut out)?;
        self.signer.serialize_uncompressed(&mut out)
    }

    fn read<R: Read>(mut input: R) -> Result<Self, SerializationError> {
        Ok(Self {
            constraints: u64::deserialize_uncompressed(&mut input)?,
            public_inputs: u64::deserialize_uncompressed(&mut input)?,
            expected_message: Option::<BaseField>::deserialize_uncompressed(&mut input)?,
            signer: Option::<Affine>::deserialize_uncompressed(&mut input)?,
        })
    }
}

/// Write `pk` for `compiled` to `path`, replacing any existing file.
pub fn save_keys(
    compiled: &CompiledCircuit,
    pk: &ProvingKey<Bn254>,
    path: impl AsRef<Path>,
) -> Result<(), PipelineError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(SerializationError::IoError)?;
    let mut out = BufWriter::new(file);
    Fingerprint::of(compiled).write(&mut out)?;
    pk.serialize_uncompressed(&mut out)?;
    out.flush().map_err(SerializationError::IoError)?;
    info!(path = %path.display(), "stored groth16 keys");
    Ok(())
}

/// Read the proving key stored for `compiled` at `path`.
///
/// Fails with [`PipelineError::KeyMismatch`] when the file was written for a
/// different circuit.
pub fn load_keys(
    compiled: &CompiledCircuit,
    path: impl AsRef<Path>,
) -> Result<ProvingKey<Bn254>, PipelineError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(SerializationError::IoError)?;
    let mut input = BufReader::new(file);

    let stored = Fingerprint::read(&mut input)?;
    let current = Fingerprint::of(compiled);
    if stored != current {
        warn!(path = %path.display(), ?stored, ?current, "stored keys belong to another circuit");
        return Err(PipelineError::KeyMismatch(format!(
            "{} was set up for {} constraints and {} public inputs, circuit has {} and {}",
            path.display(),
            stored.constraints,
            stored.public_inputs,
            current.constraints,
            current.public_inputs
        )));
    }

    // written by save_keys; the points were produced by setup
    let pk = ProvingKey::<Bn254>::deserialize_uncompressed_unchecked(&mut input)?;
    let declared = public_input_count(&pk.vk);
    if declared != compiled.num_public_inputs() {
        return Err(PipelineError::KeyMismatch(format!(
            "verifying key declares {declared} public inputs, circuit has {}",
            compiled.num_public_inputs()
        )));
    }

    info!(path = %path.display(), "loaded groth16 keys");
    Ok(pk)
}
