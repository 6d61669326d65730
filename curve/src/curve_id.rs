use core::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::CodecError;

/// Identifier of a twisted-Edwards curve family.
///
/// Every codec and circuit operation takes the curve explicitly; widths are
/// never inferred from buffer lengths alone.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveId {
    /// Baby Jubjub, embedded in the BN254 scalar field.
    #[default]
    Bn254,
    /// Jubjub, embedded in the BLS12-381 scalar field.
    Bls12_381,
    /// Edwards curve embedded in the BLS12-377 scalar field.
    Bls12_377,
    /// Edwards curve embedded in the BW6-761 scalar field.
    Bw6_761,
    /// Edwards curve embedded in the BLS24-315 scalar field.
    Bls24_315,
    /// Edwards curve embedded in the BLS24-317 scalar field.
    Bls24_317,
    /// Edwards curve embedded in the BW6-633 scalar field.
    Bw6_633,
}

impl CurveId {
    /// Width in bytes of a compressed point.
    pub const fn point_width(self) -> usize {
        match self {
            CurveId::Bw6_761 => 48,
            CurveId::Bw6_633 => 40,
            _ => 32,
        }
    }

    /// Width in bytes of the signature scalar S.
    pub const fn scalar_width(self) -> usize {
        self.point_width()
    }

    /// Width in bytes of a compressed signature `R || S`.
    pub const fn signature_width(self) -> usize {
        self.point_width() + self.scalar_width()
    }

    /// Cofactor of the curve group.
    pub const fn cofactor(self) -> u64 {
        match self {
            CurveId::Bls12_377 => 4,
            _ => 8,
        }
    }

    /// Whether this build can decode points and prove signatures on the curve.
    pub const fn is_supported(self) -> bool {
        matches!(self, CurveId::Bn254)
    }

    pub fn ensure_supported(self) -> Result<(), CodecError> {
        if self.is_supported() {
            Ok(())
        } else {
            Err(CodecError::UnsupportedCurve(self))
        }
    }
}

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CurveId::Bn254 => "bn254",
            CurveId::Bls12_381 => "bls12_381",
            CurveId::Bls12_377 => "bls12_377",
            CurveId::Bw6_761 => "bw6_761",
            CurveId::Bls24_315 => "bls24_315",
            CurveId::Bls24_317 => "bls24_317",
            CurveId::Bw6_633 => "bw6_633",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths() {
        assert_eq!(CurveId::Bn254.point_width(), 32);
        assert_eq!(CurveId::Bn254.signature_width(), 64);
        assert_eq!(CurveId::Bw6_761.point_width(), 48);
        assert_eq!(CurveId::Bw6_633.signature_width(), 80);
    }

    #[test]
    fn test_only_bn254_supported() {
        assert!(CurveId::Bn254.ensure_supported().is_ok());
        assert_eq!(
            CurveId::Bls12_377.ensure_supported(),
            Err(CodecError::UnsupportedCurve(CurveId::Bls12_377))
        );
    }

    #[test]
    fn test_cofactors() {
        assert_eq!(CurveId::Bn254.cofactor(), 8);
        assert_eq!(CurveId::Bls12_377.cofactor(), 4);
    }
}
