use ark_ec::{AffineRepr, CurveGroup};
use ark_std::UniformRand;
use rand::Rng;

use crate::{generator, Affine, BaseField, ScalarField};

/// Helper trait for sampling random field elements.
pub trait RandomField: Sized {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

impl RandomField for BaseField {
    #[inline]
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        <Self as UniformRand>::rand(rng)
    }
}

impl RandomField for ScalarField {
    #[inline]
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        <Self as UniformRand>::rand(rng)
    }
}

/// Sample a uniformly random point of the prime-order subgroup.
pub fn random_point<R: Rng + ?Sized>(rng: &mut R) -> Affine {
    (generator().into_group() * ScalarField::random(rng)).into_affine()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ec::CurveConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_points_are_in_subgroup() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..8 {
            let p = random_point(&mut rng);
            assert!(p.is_on_curve());
            assert!(p.is_in_correct_subgroup_assuming_on_curve());
        }
        assert_eq!(<crate::EdwardsConfig as CurveConfig>::COFACTOR, &[8]);
    }
}
