//! MiMC hash over the BN254 scalar field in Miyaguchi-Preneel mode.
//!
//! The permutation is `x -> (x + k + c_i)^5` iterated over 110 round
//! constants. Constants come from iterated Keccak-256 starting at the seed
//! `"seed"`, each digest read as a big-endian integer and reduced.

use std::sync::OnceLock;

use ark_ff::{BigInteger, Field, PrimeField, Zero};
use curve::BaseField;
use sha3::{Digest, Keccak256};

use crate::constants::{BLOCK_SIZE, MIMC_ROUNDS, MIMC_SEED};
use crate::errors::EddsaError;

/// Round constants shared by the native hash and the circuit gadget.
pub fn round_constants() -> &'static [BaseField] {
    static CONSTANTS: OnceLock<Vec<BaseField>> = OnceLock::new();
    CONSTANTS.get_or_init(|| {
        // the seed is hashed once before the first constant is drawn
        let mut rnd = Keccak256::digest(MIMC_SEED);
        (0..MIMC_ROUNDS)
            .map(|_| {
                rnd = Keccak256::digest(rnd);
                BaseField::from_be_bytes_mod_order(&rnd)
            })
            .collect()
    })
}

/// Incremental MiMC hasher.
///
/// Input is buffered as field elements and compressed on [`Mimc::sum`].
#[derive(Clone, Debug, Default)]
pub struct Mimc {
    data: Vec<BaseField>,
}

impl Mimc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb raw bytes.
    ///
    /// Input shorter than a block is left-padded with zeros to one element.
    /// Longer input must be a whole number of blocks, each a canonical
    /// big-endian field element.
    pub fn write(&mut self, bytes: &[u8]) -> Result<(), EddsaError> {
        if bytes.is_empty() {
            return Ok(());
        }
        if bytes.len() < BLOCK_SIZE {
            let mut block = [0u8; BLOCK_SIZE];
            block[BLOCK_SIZE - bytes.len()..].copy_from_slice(bytes);
            return self.write_block(&block);
        }
        if bytes.len() % BLOCK_SIZE != 0 {
            return Err(EddsaError::InvalidHashInput(
                "input length must be a multiple of 32 bytes",
            ));
        }
        // validate everything before absorbing anything
        let elements = bytes
            .chunks_exact(BLOCK_SIZE)
            .map(canonical_element)
            .collect::<Result<Vec<_>, _>>()?;
        self.data.extend(elements);
        Ok(())
    }

    pub fn write_element(&mut self, element: BaseField) {
        self.data.push(element);
    }

    /// Digest of everything absorbed so far. The hasher is left untouched.
    pub fn sum(&self) -> BaseField {
        self.data.iter().fold(BaseField::zero(), |h, m| {
            encrypt(*m, h) + h + m
        })
    }

    pub fn reset(&mut self) {
        self.data.clear();
    }

    fn write_block(&mut self, block: &[u8]) -> Result<(), EddsaError> {
        self.data.push(canonical_element(block)?);
        Ok(())
    }
}

/// Hash a sequence of field elements.
pub fn hash_elements(elements: &[BaseField]) -> BaseField {
    let mut hasher = Mimc::new();
    for element in elements {
        hasher.write_element(*element);
    }
    hasher.sum()
}

// Keyed permutation E_h(m).
fn encrypt(m: BaseField, h: BaseField) -> BaseField {
    let m = round_constants().iter().fold(m, |m, c| {
        let t = m + h + c;
        t.square().square() * t
    });
    m + h
}

fn canonical_element(block: &[u8]) -> Result<BaseField, EddsaError> {
    let element = BaseField::from_be_bytes_mod_order(block);
    if element.into_bigint().to_bytes_be() != block {
        return Err(EddsaError::InvalidHashInput(
            "block is not a canonical field element",
        ));
    }
    Ok(element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ff::One;

    #[test]
    fn test_round_constants_are_stable() {
        let constants = round_constants();
        assert_eq!(constants.len(), MIMC_ROUNDS);
        assert!(std::ptr::eq(constants, round_constants()));

        let first = Keccak256::digest(Keccak256::digest(b"seed"));
        assert_eq!(constants[0], BaseField::from_be_bytes_mod_order(&first));
        assert_ne!(constants[0], constants[1]);
    }

    #[test]
    fn test_empty_hash_is_zero() {
        assert!(Mimc::new().sum().is_zero());
        let mut hasher = Mimc::new();
        hasher.write(&[]).expect("write");
        assert!(hasher.sum().is_zero());
    }

    #[test]
    fn test_short_input_is_left_padded() {
        let mut hasher = Mimc::new();
        hasher.write(&[0x01, 0x02]).expect("write");
        assert_eq!(
            hasher.sum(),
            hash_elements(&[BaseField::from(0x0102u64)])
        );
    }

    #[test]
    fn test_block_writes_match_elements() {
        let a = BaseField::from(7u64);
        let b = -BaseField::one();
        let mut bytes = a.into_bigint().to_bytes_be();
        bytes.extend(b.into_bigint().to_bytes_be());

        let mut hasher = Mimc::new();
        hasher.write(&bytes).expect("write");
        assert_eq!(hasher.sum(), hash_elements(&[a, b]));

        hasher.reset();
        assert!(hasher.sum().is_zero());
    }

    #[test]
    fn test_rejects_ragged_input() {
        let mut hasher = Mimc::new();
        assert!(matches!(
            hasher.write(&[1u8; 33]),
            Err(EddsaError::InvalidHashInput(_))
        ));
        assert!(hasher.sum().is_zero());
    }

    #[test]
    fn test_rejects_non_canonical_block() {
        let mut hasher = Mimc::new();
        assert!(matches!(
            hasher.write(&[0xffu8; 32]),
            Err(EddsaError::InvalidHashInput(_))
        ));
    }

    #[test]
    fn test_order_matters() {
        let a = BaseField::from(1u64);
        let b = BaseField::from(2u64);
        assert_ne!(hash_elements(&[a, b]), hash_elements(&[b, a]));
    }
}
