//! Sizes and hash parameters of the EdDSA-MiMC scheme over Baby Jubjub.

/// Size of a compressed verifying key in bytes.
pub const PK_SIZE: usize = 32;

/// Size of a signature `compress(R) || S` in bytes.
pub const SIG_SIZE: usize = 64;

/// Size of the seed a signing key is derived from.
pub const SEED_SIZE: usize = 32;

/// Longest message, in bytes, that still fits one field element.
pub const MESSAGE_MAX_SIZE: usize = 32;

/// Width of one MiMC input block, a big-endian field element.
pub const BLOCK_SIZE: usize = 32;

/// Number of rounds of the MiMC permutation over the BN254 scalar field.
pub const MIMC_ROUNDS: usize = 110;

/// Seed the MiMC round constants are derived from.
pub(crate) const MIMC_SEED: &[u8] = b"seed";
