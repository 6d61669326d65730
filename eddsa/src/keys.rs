//! Signing and verifying keys.

use core::fmt;

use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{BigInteger, PrimeField};
use curve::{
    clear_cofactor, cofactor_doublings, compress, curve_cofactor, decode_point,
    double_scalar_mul_basepoint, generator, Affine, BaseField, CurveId, ScalarField,
};
use rand::{CryptoRng, Rng};
use tracing::debug;

use crate::constants::{PK_SIZE, SEED_SIZE};
use crate::errors::EddsaError;
use crate::message::Message;
use crate::signatures::{hash_challenge, Signature};

/// A secret signing key derived from a 32-byte seed.
///
/// The seed is expanded with BLAKE2b-512. The lower half is pruned and read
/// as the secret scalar; the upper half seeds the deterministic nonces.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey {
    seed: [u8; SEED_SIZE],
    scalar: ScalarField,
    nonce_source: [u8; 32],
    verifying_key: VerifyingKey,
}

/// A public verifying key, the point A = [sk]G.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VerifyingKey {
    point: Affine,
}

impl SigningKey {
    pub fn from_seed(seed: &[u8; SEED_SIZE]) -> Self {
        let expanded = blake2b_simd::blake2b(seed);
        let expanded = expanded.as_bytes();

        let mut nonce_source = [0u8; 32];
        nonce_source.copy_from_slice(&expanded[32..64]);

        let mut scalar_bytes = [0u8; 32];
        scalar_bytes.copy_from_slice(&expanded[..32]);
        scalar_bytes[0] &= 0xf8;
        scalar_bytes[31] &= 0x7f;
        scalar_bytes[31] |= 0x40;
        scalar_bytes.reverse();
        let scalar = ScalarField::from_be_bytes_mod_order(&scalar_bytes);

        let point = (generator().into_group() * scalar).into_affine();
        Self {
            seed: *seed,
            scalar,
            nonce_source,
            verifying_key: VerifyingKey { point },
        }
    }

    /// Generate a key from a fresh random seed.
    pub fn generate<R: Rng + CryptoRng + ?Sized>(rng: &mut R) -> Self {
        let mut seed = [0u8; SEED_SIZE];
        rng.fill_bytes(&mut seed);
        Self::from_seed(&seed)
    }

    pub fn seed(&self) -> &[u8; SEED_SIZE] {
        &self.seed
    }

    pub fn verifying_key(&self) -> VerifyingKey {
        self.verifying_key
    }

    /// Sign `message`.
    ///
    /// Signing is deterministic: the nonce is
    /// `BLAKE2b-512(nonce_source || message)[..32]` read big-endian.
    pub fn sign(&self, message: &Message) -> Signature {
        let mut state = blake2b_simd::Params::new().hash_length(64).to_state();
        state.update(&self.nonce_source);
        state.update(message.as_bytes());
        let nonce = ScalarField::from_be_bytes_mod_order(&state.finalize().as_bytes()[..32]);

        let r = (generator().into_group() * nonce).into_affine();
        let h = hash_challenge(&r, &self.verifying_key.point, &message.element());
        let h = ScalarField::from_le_bytes_mod_order(&h.into_bigint().to_bytes_le());
        let s = nonce + h * self.scalar;

        // S < l < p, so the conversion is exact
        let s = BaseField::from_le_bytes_mod_order(&s.into_bigint().to_bytes_le());
        Signature { r, s }
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}

impl VerifyingKey {
    pub fn point(&self) -> &Affine {
        &self.point
    }

    pub fn to_bytes(&self) -> [u8; PK_SIZE] {
        compress(&self.point)
    }

    pub fn from_bytes(curve: CurveId, bytes: &[u8]) -> Result<Self, EddsaError> {
        let point = decode_point(curve, bytes)?;
        Ok(Self { point })
    }

    /// Lowercase hex of the compressed key.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn from_hex(curve: CurveId, text: &str) -> Result<Self, EddsaError> {
        Self::from_bytes(curve, &hex::decode(text)?)
    }

    /// Verify `signature` over `message` natively.
    ///
    /// Runs the same steps as the verification circuit:
    /// `Q = [S]G - [h]A`, `Q' = R - Q`, clear the cofactor, expect the
    /// identity.
    pub fn verify(&self, message: &Message, signature: &Signature) -> Result<bool, EddsaError> {
        let doublings = cofactor_doublings(curve_cofactor()?)?;
        let h = hash_challenge(&signature.r, &self.point, &message.element());

        let q = double_scalar_mul_basepoint(&signature.s, &h, &-self.point);
        let residue = clear_cofactor(&(signature.r.into_group() - q), doublings);

        let valid = residue.into_affine().is_zero();
        debug!(valid, "verified signature natively");
        Ok(valid)
    }
}

impl From<&SigningKey> for VerifyingKey {
    fn from(sk: &SigningKey) -> Self {
        sk.verifying_key()
    }
}
