//! In-circuit MiMC, constraint for constraint the native hash in `eddsa`.

use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::SynthesisError;
use curve::BaseField;
use eddsa::round_constants;

/// Hash field variables with MiMC in Miyaguchi-Preneel mode.
pub fn hash_vars(elements: &[FpVar<BaseField>]) -> Result<FpVar<BaseField>, SynthesisError> {
    let mut h = FpVar::zero();
    for m in elements {
        let e = encrypt(m, &h)?;
        h = e + &h + m;
    }
    Ok(h)
}

// Three constraints per round: two squarings and one product.
fn encrypt(
    m: &FpVar<BaseField>,
    h: &FpVar<BaseField>,
) -> Result<FpVar<BaseField>, SynthesisError> {
    let mut x = m.clone();
    for c in round_constants() {
        let t = &x + h + *c;
        let t4 = t.square()?.square()?;
        x = t4 * &t;
    }
    Ok(x + h)
}
