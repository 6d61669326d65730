//! Attendance messages and the signed attendance record.

use ark_ff::{BigInteger, PrimeField};
use chrono::NaiveDate;
use curve::{BaseField, CurveId};
use serde::{Deserialize, Serialize};

use crate::constants::MESSAGE_MAX_SIZE;
use crate::errors::EddsaError;
use crate::keys::{SigningKey, VerifyingKey};
use crate::signatures::Signature;

const DATE_FORMAT: &str = "%Y%m%d";

/// A signable message: 1 to 32 bytes read as one big-endian field element.
///
/// Input that does not fit the field is rejected, never truncated or reduced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    bytes: Vec<u8>,
    element: BaseField,
}

impl Message {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EddsaError> {
        if bytes.is_empty() {
            return Err(EddsaError::EmptyMessage);
        }
        if bytes.len() > MESSAGE_MAX_SIZE {
            return Err(EddsaError::MessageTooLong(bytes.len()));
        }

        let mut padded = [0u8; MESSAGE_MAX_SIZE];
        padded[MESSAGE_MAX_SIZE - bytes.len()..].copy_from_slice(bytes);
        let element = BaseField::from_be_bytes_mod_order(&padded);
        if element.into_bigint().to_bytes_be() != padded {
            return Err(EddsaError::MessageOutOfField);
        }

        Ok(Self {
            bytes: bytes.to_vec(),
            element,
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The message as a field element, the form hashed and proven.
    pub fn element(&self) -> BaseField {
        self.element
    }
}

impl TryFrom<&str> for Message {
    type Error = EddsaError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        Self::from_bytes(text.as_bytes())
    }
}

/// One attendance event: who attended which module on which day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub user_id: String,
    pub date: String,
    pub module: String,
}

impl AttendanceRecord {
    pub fn new(
        date: impl Into<String>,
        user_id: impl Into<String>,
        module: impl Into<String>,
    ) -> Result<Self, EddsaError> {
        let record = Self {
            user_id: user_id.into(),
            date: date.into(),
            module: module.into(),
        };
        record.validate()?;
        Ok(record)
    }

    /// Check the date is a real calendar day written as exactly `YYYYMMDD`.
    pub fn validate(&self) -> Result<(), EddsaError> {
        let well_formed = self.date.len() == 8 && self.date.bytes().all(|b| b.is_ascii_digit());
        if !well_formed || NaiveDate::parse_from_str(&self.date, DATE_FORMAT).is_err() {
            return Err(EddsaError::InvalidDate(self.date.clone()));
        }
        Ok(())
    }

    /// Signed message `date || user_id || module`.
    pub fn message(&self) -> Result<Message, EddsaError> {
        self.validate()?;
        let text = format!("{}{}{}", self.date, self.user_id, self.module);
        Message::from_bytes(text.as_bytes())
    }
}

/// A signed attendance record as exchanged in JSON, key and signature in hex.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedAttendance {
    pub user_id: String,
    pub date: String,
    pub module: String,
    pub public_key: String,
    pub signature: String,
}

impl SignedAttendance {
    pub fn sign(record: &AttendanceRecord, key: &SigningKey) -> Result<Self, EddsaError> {
        let message = record.message()?;
        let signature = key.sign(&message);
        Ok(Self {
            user_id: record.user_id.clone(),
            date: record.date.clone(),
            module: record.module.clone(),
            public_key: key.verifying_key().to_hex(),
            signature: hex::encode(signature.to_bytes()),
        })
    }

    pub fn record(&self) -> AttendanceRecord {
        AttendanceRecord {
            user_id: self.user_id.clone(),
            date: self.date.clone(),
            module: self.module.clone(),
        }
    }

    /// Decode the key, signature and message carried by this record.
    pub fn decode(&self, curve: CurveId) -> Result<(VerifyingKey, Signature, Message), EddsaError> {
        let key = VerifyingKey::from_hex(curve, &self.public_key)?;
        let signature = Signature::from_bytes(curve, &hex::decode(&self.signature)?)?;
        let message = self.record().message()?;
        Ok((key, signature, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ff::One;

    #[test]
    fn test_message_is_big_endian() {
        let m = Message::from_bytes(&[0x01, 0x00]).expect("message");
        assert_eq!(m.element(), BaseField::from(256u64));
        assert_eq!(m.as_bytes(), &[0x01, 0x00]);
    }

    #[test]
    fn test_message_bounds() {
        assert_eq!(Message::from_bytes(&[]), Err(EddsaError::EmptyMessage));
        assert_eq!(
            Message::from_bytes(&[1u8; 33]),
            Err(EddsaError::MessageTooLong(33))
        );
        assert!(Message::from_bytes(&[0x30u8; 32]).is_ok());
        assert_eq!(
            Message::from_bytes(&[0xffu8; 32]),
            Err(EddsaError::MessageOutOfField)
        );
    }

    #[test]
    fn test_largest_canonical_message() {
        let max = -BaseField::one();
        let bytes = max.into_bigint().to_bytes_be();
        assert_eq!(Message::from_bytes(&bytes).expect("message").element(), max);

        let modulus = BaseField::MODULUS.to_bytes_be();
        assert_eq!(
            Message::from_bytes(&modulus),
            Err(EddsaError::MessageOutOfField)
        );
    }

    #[test]
    fn test_record_message_concatenates_fields() {
        let record = AttendanceRecord::new("20240515", "alice123", "MOD01").expect("record");
        let message = record.message().expect("message");
        assert_eq!(message.as_bytes(), b"20240515alice123MOD01");
    }

    #[test]
    fn test_record_rejects_bad_dates() {
        for date in ["2024-05-15", "20241315", "2024051", "20240230", "２０２４０５１５"] {
            assert_eq!(
                AttendanceRecord::new(date, "alice123", "MOD01"),
                Err(EddsaError::InvalidDate(date.to_string()))
            );
        }
    }

    #[test]
    fn test_record_json_uses_camel_case() {
        let json = r#"{"userId":"bob","date":"20240101","module":"M2"}"#;
        let record: AttendanceRecord = serde_json::from_str(json).expect("json");
        assert_eq!(record.user_id, "bob");
        assert!(record.validate().is_ok());
    }
}
