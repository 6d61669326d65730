//! attest CLI
//!
//! Signs attendance records and turns their signatures into Groth16 proofs
//! that an EVM verifier contract accepts.
//!
//! ## Usage
//! ```bash
//! # Write a config with a fresh signing key
//! attest generate-config --path attest.toml
//!
//! # Sign an attendance record
//! attest sign --date 20240515 --user-id alice123 --module MOD01 > signed.json
//!
//! # Prove the signature and export the matching verifier
//! attest prove --input signed.json --export
//!
//! # Re-export the verifier later; it matches every proof made with the
//! # keys stored at keys_path
//! attest export-verifier
//! ```

mod config;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use circuit::{CircuitConfig, ProverContext, SignatureWitness};
use eddsa::{AttendanceRecord, SignedAttendance, SigningKey, SEED_SIZE};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ServiceConfig;

#[derive(Parser)]
#[command(name = "attest")]
#[command(about = "Attendance signatures proven with Groth16", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config with a freshly generated signer seed
    GenerateConfig {
        #[arg(short, long, default_value = "attest.toml")]
        path: PathBuf,
    },

    /// Sign an attendance record and print it as JSON
    Sign {
        #[arg(short, long, default_value = "attest.toml")]
        config: PathBuf,

        /// Date as YYYYMMDD
        #[arg(long)]
        date: String,

        #[arg(long)]
        user_id: String,

        #[arg(long)]
        module: String,
    },

    /// Prove a signed attendance record and print the verifier calldata
    Prove {
        #[arg(short, long, default_value = "attest.toml")]
        config: PathBuf,

        /// Signed attendance JSON
        #[arg(short, long)]
        input: PathBuf,

        /// Also write the verifier contract for the stored keys
        #[arg(long)]
        export: bool,
    },

    /// Write the Solidity verifier for the stored keys, running setup if none exist
    ExportVerifier {
        #[arg(short, long, default_value = "attest.toml")]
        config: PathBuf,

        /// Output file (default: contract_path from the config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::GenerateConfig { path } => generate_config(&path),
        Commands::Sign {
            config,
            date,
            user_id,
            module,
        } => sign(&config, date, user_id, module),
        Commands::Prove {
            config,
            input,
            export,
        } => prove(&config, &input, export),
        Commands::ExportVerifier { config, output } => export_verifier(&config, output),
    }
}

fn generate_config(path: &Path) -> Result<()> {
    let mut seed = [0u8; SEED_SIZE];
    OsRng.fill_bytes(&mut seed);
    let signer = SigningKey::from_seed(&seed).verifying_key();
    let config = ServiceConfig {
        signer_seed: Some(hex::encode(seed)),
        circuit: CircuitConfig {
            signer: Some(signer.to_hex()),
            ..CircuitConfig::default()
        },
        ..ServiceConfig::default()
    };
    config.save(path)?;
    info!(path = %path.display(), "wrote config");
    Ok(())
}

fn sign(config: &Path, date: String, user_id: String, module: String) -> Result<()> {
    let config = ServiceConfig::load(config)?;
    let key = config.signing_key()?;
    let record = AttendanceRecord::new(date, user_id, module)?;
    let signed = SignedAttendance::sign(&record, &key)?;
    info!(public_key = %signed.public_key, "signed attendance record");
    println!("{}", serde_json::to_string_pretty(&signed)?);
    Ok(())
}

fn prove(config: &Path, input: &Path, export: bool) -> Result<()> {
    let config = ServiceConfig::load(config)?;
    let content = fs::read_to_string(input)
        .with_context(|| format!("unable to read {}", input.display()))?;
    let signed: SignedAttendance =
        serde_json::from_str(&content).context("unable to parse signed attendance")?;

    let (key, signature, message) = signed.decode(config.circuit.curve)?;
    let witness = SignatureWitness::new(&signature, &key, &message);

    let ctx = context(&config)?;
    if export {
        ctx.export_verifier(&config.contract_path)?;
    }
    let calldata = ctx.attest(&witness, &mut OsRng)?;
    println!("{}", serde_json::to_string(&calldata.to_json())?);
    Ok(())
}

fn export_verifier(config: &Path, output: Option<PathBuf>) -> Result<()> {
    let config = ServiceConfig::load(config)?;
    let ctx = context(&config)?;
    let path = output.unwrap_or(config.contract_path);
    ctx.export_verifier(&path)?;
    Ok(())
}

/// The prover context for `config`, sharing keys through `keys_path`.
fn context(config: &ServiceConfig) -> Result<ProverContext> {
    ProverContext::load_or_initialize(config.circuit.clone(), &config.keys_path, &mut OsRng)
        .with_context(|| format!("unable to prepare keys at {}", config.keys_path.display()))
}
