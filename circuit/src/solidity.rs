//! Solidity verifier export.
//!
//! The generated contract checks
//! `e(-A, B) * e(alpha, beta) * e(vk_x, gamma) * e(C, delta) == 1`
//! with the BN254 precompiles (0x06 add, 0x07 mul, 0x08 pairing).

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use ark_bn254::{Bn254, Fq, G1Affine, G2Affine};
use ark_ff::{BigInteger, PrimeField};
use ark_groth16::VerifyingKey;
use num_bigint::BigUint;
use tracing::info;

use crate::errors::PipelineError;
use crate::pipeline::public_input_count;

/// Default location of the exported contract.
pub const DEFAULT_CONTRACT_PATH: &str = "./contract.sol";

/// Write the verifier contract for `vk` to `path`, replacing any existing file.
pub fn export_solidity(vk: &VerifyingKey<Bn254>, path: impl AsRef<Path>) -> Result<(), PipelineError> {
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path)?);
    write_solidity(vk, &mut out)?;
    out.flush()?;
    info!(path = %path.display(), "exported verifier contract");
    Ok(())
}

/// Render the verifier contract for `vk`.
pub fn write_solidity<W: Write>(vk: &VerifyingKey<Bn254>, out: &mut W) -> io::Result<()> {
    let inputs = public_input_count(vk);

    writeln!(out, "// SPDX-License-Identifier: MIT")?;
    writeln!(out, "pragma solidity ^0.8.0;")?;
    writeln!(out)?;
    writeln!(out, "/// Groth16 verifier for the EdDSA signature circuit.")?;
    writeln!(out, "contract Verifier {{")?;
    writeln!(
        out,
        "    uint256 constant PRIME_Q = {};",
        BigUint::from_bytes_be(&Fq::MODULUS.to_bytes_be())
    )?;
    writeln!(
        out,
        "    uint256 constant SNARK_SCALAR_FIELD = {};",
        BigUint::from_bytes_be(&ark_bn254::Fr::MODULUS.to_bytes_be())
    )?;
    writeln!(out)?;
    write_g1(out, "ALPHA", &vk.alpha_g1)?;
    write_g2(out, "BETA", &vk.beta_g2)?;
    write_g2(out, "GAMMA", &vk.gamma_g2)?;
    write_g2(out, "DELTA", &vk.delta_g2)?;
    for (i, point) in vk.gamma_abc_g1.iter().enumerate() {
        write_g1(out, &format!("IC{i}"), point)?;
    }
    writeln!(out)?;

    writeln!(
        out,
        "    function verifyProof(uint256[8] calldata proof, uint256[{inputs}] calldata input) public view returns (bool) {{"
    )?;
    writeln!(out, "        uint256[2] memory vkX = [IC0_X, IC0_Y];")?;
    for i in 1..=inputs {
        writeln!(
            out,
            "        require(input[{j}] < SNARK_SCALAR_FIELD, \"input out of field\");",
            j = i - 1
        )?;
        writeln!(
            out,
            "        vkX = ecAdd(vkX, ecMul([IC{i}_X, IC{i}_Y], input[{j}]));",
            j = i - 1
        )?;
    }
    writeln!(out)?;
    writeln!(out, "        uint256[24] memory p;")?;
    writeln!(out, "        p[0] = proof[0];")?;
    writeln!(out, "        p[1] = (PRIME_Q - (proof[1] % PRIME_Q)) % PRIME_Q;")?;
    writeln!(out, "        p[2] = proof[2];")?;
    writeln!(out, "        p[3] = proof[3];")?;
    writeln!(out, "        p[4] = proof[4];")?;
    writeln!(out, "        p[5] = proof[5];")?;
    write_pair(out, 6, "ALPHA_X", "ALPHA_Y", "BETA")?;
    write_pair(out, 12, "vkX[0]", "vkX[1]", "GAMMA")?;
    write_pair(out, 18, "proof[6]", "proof[7]", "DELTA")?;
    writeln!(out)?;
    writeln!(out, "        uint256[1] memory result;")?;
    writeln!(out, "        bool success;")?;
    writeln!(out, "        assembly {{")?;
    writeln!(out, "            success := staticcall(gas(), 0x08, p, 768, result, 0x20)")?;
    writeln!(out, "        }}")?;
    writeln!(out, "        return success && result[0] == 1;")?;
    writeln!(out, "    }}")?;
    writeln!(out)?;

    writeln!(
        out,
        "    function ecAdd(uint256[2] memory a, uint256[2] memory b) internal view returns (uint256[2] memory r) {{"
    )?;
    writeln!(out, "        uint256[4] memory args = [a[0], a[1], b[0], b[1]];")?;
    writeln!(out, "        bool success;")?;
    writeln!(out, "        assembly {{")?;
    writeln!(out, "            success := staticcall(gas(), 0x06, args, 0x80, r, 0x40)")?;
    writeln!(out, "        }}")?;
    writeln!(out, "        require(success, \"ecAdd failed\");")?;
    writeln!(out, "    }}")?;
    writeln!(out)?;
    writeln!(
        out,
        "    function ecMul(uint256[2] memory a, uint256 s) internal view returns (uint256[2] memory r) {{"
    )?;
    writeln!(out, "        uint256[3] memory args = [a[0], a[1], s];")?;
    writeln!(out, "        bool success;")?;
    writeln!(out, "        assembly {{")?;
    writeln!(out, "            success := staticcall(gas(), 0x07, args, 0x60, r, 0x40)")?;
    writeln!(out, "        }}")?;
    writeln!(out, "        require(success, \"ecMul failed\");")?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}")
}

fn decimal(f: &Fq) -> BigUint {
    BigUint::from_bytes_be(&f.into_bigint().to_bytes_be())
}

fn write_g1<W: Write>(out: &mut W, name: &str, p: &G1Affine) -> io::Result<()> {
    writeln!(out, "    uint256 constant {name}_X = {};", decimal(&p.x))?;
    writeln!(out, "    uint256 constant {name}_Y = {};", decimal(&p.y))
}

// EIP-197 orders Fq2 coordinates as (c1, c0).
fn write_g2<W: Write>(out: &mut W, name: &str, p: &G2Affine) -> io::Result<()> {
    writeln!(out, "    uint256 constant {name}_X1 = {};", decimal(&p.x.c1))?;
    writeln!(out, "    uint256 constant {name}_X0 = {};", decimal(&p.x.c0))?;
    writeln!(out, "    uint256 constant {name}_Y1 = {};", decimal(&p.y.c1))?;
    writeln!(out, "    uint256 constant {name}_Y0 = {};", decimal(&p.y.c0))
}

fn write_pair<W: Write>(out: &mut W, at: usize, x: &str, y: &str, g2: &str) -> io::Result<()> {
    writeln!(out, "        p[{}] = {x};", at)?;
    writeln!(out, "        p[{}] = {y};", at + 1)?;
    writeln!(out, "        p[{}] = {g2}_X1;", at + 2)?;
    writeln!(out, "        p[{}] = {g2}_X0;", at + 3)?;
    writeln!(out, "        p[{}] = {g2}_Y1;", at + 4)?;
    writeln!(out, "        p[{}] = {g2}_Y0;", at + 5)
}
