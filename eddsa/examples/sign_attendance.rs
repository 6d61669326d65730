use curve::CurveId;
use eddsa::{AttendanceRecord, SignedAttendance, SigningKey};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    let mut rng = StdRng::seed_from_u64(42);
    let sk = SigningKey::generate(&mut rng);

    let record = AttendanceRecord::new("20240515", "alice123", "MOD01").expect("record");
    let signed = SignedAttendance::sign(&record, &sk).expect("sign");
    let json = serde_json::to_string_pretty(&signed).expect("json");
    println!("{json}");

    let parsed: SignedAttendance = serde_json::from_str(&json).expect("parse");
    let (vk, sig, msg) = parsed.decode(CurveId::Bn254).expect("decode");
    assert!(vk.verify(&msg, &sig).expect("verify"));
}
