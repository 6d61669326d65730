//! Concrete assignments for the verification circuit and their public part.

use ark_ff::{BigInteger, PrimeField};
use curve::{Affine, BaseField, CurveId, FIELD_SIZE};
use eddsa::{EddsaError, Message, Signature, VerifyingKey};

use crate::config::Disclosure;
use crate::errors::EncodingError;

/// Size of the public witness header: public, secret and total counts.
pub const WITNESS_HEADER_SIZE: usize = 12;

/// Witness data binding a key, a signature and a message to the circuit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SignatureWitness {
    /// The public key A
    pub public_key: Affine,
    /// The signature commitment point R
    pub r: Affine,
    /// The signature scalar S
    pub s: BaseField,
    /// The message as a field element
    pub message: BaseField,
}

impl SignatureWitness {
    pub fn new(signature: &Signature, public_key: &VerifyingKey, message: &Message) -> Self {
        Self {
            public_key: *public_key.point(),
            r: signature.r,
            s: signature.s,
            message: message.element(),
        }
    }

    /// Build a witness from wire encodings: compressed key, `R || S`, and
    /// raw message bytes.
    pub fn decode(
        curve: CurveId,
        public_key: &[u8],
        signature: &[u8],
        message: &[u8],
    ) -> Result<Self, EddsaError> {
        let public_key = VerifyingKey::from_bytes(curve, public_key)?;
        let signature = Signature::from_bytes(curve, signature)?;
        let message = Message::from_bytes(message)?;
        Ok(Self::new(&signature, &public_key, &message))
    }

    /// The values disclosed as public inputs, in allocation order.
    pub fn public_witness(&self, disclosure: Disclosure) -> PublicWitness {
        let elements = match disclosure {
            Disclosure::Full => vec![
                self.public_key.x,
                self.public_key.y,
                self.r.x,
                self.r.y,
                self.s,
                self.message,
            ],
            Disclosure::MessageOnly => vec![self.message],
        };
        PublicWitness { elements }
    }
}

/// Ordered public inputs of one proof.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicWitness {
    elements: Vec<BaseField>,
}

impl PublicWitness {
    pub fn new(elements: Vec<BaseField>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[BaseField] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Header of three big-endian u32 (public, secret = 0, total), then each
    /// element as 32 big-endian bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let count = self.elements.len() as u32;
        let mut out = Vec::with_capacity(WITNESS_HEADER_SIZE + FIELD_SIZE * self.elements.len());
        out.extend_from_slice(&count.to_be_bytes());
        out.extend_from_slice(&0u32.to_be_bytes());
        out.extend_from_slice(&count.to_be_bytes());
        for element in &self.elements {
            out.extend_from_slice(&element.into_bigint().to_bytes_be());
        }
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EncodingError> {
        if bytes.len() < WITNESS_HEADER_SIZE {
            return Err(EncodingError::MalformedWitness("truncated header"));
        }
        let (header, body) = bytes.split_at(WITNESS_HEADER_SIZE);
        let read_u32 = |i: usize| {
            let mut word = [0u8; 4];
            word.copy_from_slice(&header[4 * i..4 * i + 4]);
            u32::from_be_bytes(word) as usize
        };
        let (public, secret, total) = (read_u32(0), read_u32(1), read_u32(2));

        if secret != 0 || total != public {
            return Err(EncodingError::MalformedWitness("inconsistent header counts"));
        }
        if body.len() != public * FIELD_SIZE {
            return Err(EncodingError::MalformedWitness(
                "body length does not match header",
            ));
        }

        let elements = body
            .chunks_exact(FIELD_SIZE)
            .map(|chunk| {
                let element = BaseField::from_be_bytes_mod_order(chunk);
                if element.into_bigint().to_bytes_be() == chunk {
                    Ok(element)
                } else {
                    Err(EncodingError::MalformedWitness("non-canonical element"))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { elements })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eddsa::SigningKey;

    fn sample() -> SignatureWitness {
        let sk = SigningKey::from_seed(&[1u8; 32]);
        let msg = Message::try_from("20240515alice123MOD01").expect("message");
        SignatureWitness::new(&sk.sign(&msg), &sk.verifying_key(), &msg)
    }

    #[test]
    fn test_public_witness_order() {
        let w = sample();
        let full = w.public_witness(Disclosure::Full);
        assert_eq!(
            full.elements(),
            &[w.public_key.x, w.public_key.y, w.r.x, w.r.y, w.s, w.message]
        );
        assert_eq!(w.public_witness(Disclosure::MessageOnly).elements(), &[w.message]);
    }

    #[test]
    fn test_public_witness_bytes() {
        let public = sample().public_witness(Disclosure::Full);
        let bytes = public.to_bytes();
        assert_eq!(bytes.len(), 12 + 6 * 32);
        assert_eq!(&bytes[..12], &[0, 0, 0, 6, 0, 0, 0, 0, 0, 0, 0, 6]);
        assert_eq!(PublicWitness::from_bytes(&bytes), Ok(public));
    }

    #[test]
    fn test_public_witness_rejects_bad_headers() {
        let bytes = sample().public_witness(Disclosure::MessageOnly).to_bytes();
        assert_eq!(
            PublicWitness::from_bytes(&bytes[..11]),
            Err(EncodingError::MalformedWitness("truncated header"))
        );

        let mut secret = bytes.clone();
        secret[7] = 1;
        assert!(PublicWitness::from_bytes(&secret).is_err());

        assert!(PublicWitness::from_bytes(&bytes[..bytes.len() - 1]).is_err());
    }

    #[test]
    fn test_decode_from_wire() {
        let sk = SigningKey::from_seed(&[1u8; 32]);
        let msg = Message::try_from("20240515alice123MOD01").expect("message");
        let sig = sk.sign(&msg);
        let decoded = SignatureWitness::decode(
            CurveId::Bn254,
            &sk.verifying_key().to_bytes(),
            &sig.to_bytes(),
            msg.as_bytes(),
        )
        .expect("decode");
        assert_eq!(decoded, sample());
    }
}
