//! EdDSA over Baby Jubjub with MiMC as the challenge hash.
//!
//! This is the signature scheme whose verification the `circuit` crate
//! proves. It implements:
//! - Key derivation from a 32-byte seed through BLAKE2b-512
//! - Deterministic signing with the MiMC challenge `H(R.x, R.y, A.x, A.y, m)`
//! - Native verification following the same steps as the circuit
//! - Attendance records whose `date || user_id || module` text is the message
//!
//! # Example
//!
//! ```
//! use eddsa::{AttendanceRecord, SigningKey};
//!
//! let sk = SigningKey::from_seed(&[7u8; 32]);
//! let vk = sk.verifying_key();
//!
//! let record = AttendanceRecord::new("20240515", "alice123", "MOD01").expect("record");
//! let message = record.message().expect("message");
//!
//! let signature = sk.sign(&message);
//! assert!(vk.verify(&message, &signature).expect("verify"));
//! ```
//!
//! Messages are limited to one field element: at most 32 bytes whose
//! big-endian value is below the BN254 scalar field modulus.

mod constants;
mod errors;
mod keys;
mod message;
mod mimc;
mod signatures;


pub use constants::{BLOCK_SIZE, MESSAGE_MAX_SIZE, MIMC_ROUNDS, PK_SIZE, SEED_SIZE, SIG_SIZE};
pub use errors::EddsaError;
pub use keys::{SigningKey, VerifyingKey};
pub use message::{AttendanceRecord, Message, SignedAttendance};
pub use mimc::{hash_elements, round_constants, Mimc};
pub use signatures::{hash_challenge, Signature};
