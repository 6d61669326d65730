//! Example proving and verifying an attendance signature end to end.

use ark_serialize::CanonicalSerialize;
use circuit::{CircuitConfig, Disclosure, ProverContext, SignatureWitness};
use eddsa::{AttendanceRecord, SignedAttendance, SigningKey};
use rand::thread_rng;
use std::time::Instant;

fn main() {
    let mut rng = thread_rng();
    let signing_key = SigningKey::generate(&mut rng);

    let record = AttendanceRecord::new("20240515", "alice123", "MOD01").expect("record");
    let signed = SignedAttendance::sign(&record, &signing_key).expect("sign");
    let (verifying_key, signature, message) =
        signed.decode(circuit::CurveId::Bn254).expect("decode");
    let witness = SignatureWitness::new(&signature, &verifying_key, &message);

    let config = CircuitConfig {
        disclosure: Disclosure::MessageOnly,
        signer: Some(signing_key.verifying_key().to_hex()),
        ..CircuitConfig::default()
    };

    let setup_start = Instant::now();
    let ctx = ProverContext::initialize(config, &mut rng).expect("initialize");
    let setup_time = setup_start.elapsed();

    println!("Constraints: {}", ctx.compiled().num_constraints());
    println!("Public inputs: {}", ctx.compiled().num_public_inputs());

    let prove_start = Instant::now();
    let proof = ctx.prove(&witness, &mut rng).expect("prove");
    let prove_time = prove_start.elapsed();

    let public = ctx.public_witness(&witness);
    let verify_start = Instant::now();
    assert!(ctx.verify(&proof, &public).expect("verify"));
    let verify_time = verify_start.elapsed();

    let calldata = ctx.encode(&proof, &public).expect("encode");

    println!("Setup time: {:?}", setup_time);
    println!("Proving time: {:?}", prove_time);
    println!("Proof size (bytes): {}", proof.compressed_size());
    println!("Verification time: {:?}", verify_time);
    println!(
        "{}",
        serde_json::to_string_pretty(&calldata.to_json()).expect("json")
    );
}
