use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use circuit::{CircuitConfig, DEFAULT_CONTRACT_PATH, DEFAULT_KEYS_PATH};
use eddsa::{SigningKey, SEED_SIZE};
use serde::{Deserialize, Serialize};

/// Settings of the attestation service, stored as TOML.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Where the Solidity verifier is written.
    #[serde(default = "default_contract_path")]
    pub contract_path: PathBuf,
    /// Where the Groth16 keys are stored after the first setup.
    #[serde(default = "default_keys_path")]
    pub keys_path: PathBuf,
    #[serde(default)]
    pub circuit: CircuitConfig,
    /// Hex-encoded 32-byte seed of the attendance signing key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer_seed: Option<String>,
}

fn default_contract_path() -> PathBuf {
    PathBuf::from(DEFAULT_CONTRACT_PATH)
}

fn default_keys_path() -> PathBuf {
    PathBuf::from(DEFAULT_KEYS_PATH)
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            contract_path: default_contract_path(),
            keys_path: default_keys_path(),
            circuit: CircuitConfig::default(),
            signer_seed: None,
        }
    }
}

impl ServiceConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("unable to read config {}", path.display()))?;
        toml::from_str(&content).context("unable to parse config")
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;
        let encoded = toml::to_string_pretty(self).context("unable to encode config")?;
        fs::write(path, encoded)?;
        Ok(())
    }

    /// The signing key derived from `signer_seed`.
    pub fn signing_key(&self) -> Result<SigningKey> {
        let seed = self
            .signer_seed
            .as_deref()
            .context("config has no signer_seed")?;
        let bytes = hex::decode(seed).context("signer_seed is not valid hex")?;
        let seed: [u8; SEED_SIZE] = bytes
            .try_into()
            .map_err(|b: Vec<u8>| anyhow::anyhow!("signer_seed is {} bytes, expected 32", b.len()))?;
        Ok(SigningKey::from_seed(&seed))
    }
}
