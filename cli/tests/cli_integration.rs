/// Integration tests for the `cli` binary: the known-answer scenarios
/// SPEC_FULL.md lists under "Concrete end-to-end scenarios", driven
/// through the actual command-line surface rather than the library API.
use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn a51_known_answer_test() {
    Command::cargo_bin("cli")
        .unwrap()
        .args(["a51", "0xEFCDAB8967452312", "0x000134"])
        .assert()
        .success()
        .stdout(predicate::str::contains("14D3AA960BFA0546ADB861569CA30"))
        .stdout(predicate::str::contains("93F4D68D757ED949B4CBE41B7C6B"));
}

#[test]
fn a52_known_answer_test() {
    Command::cargo_bin("cli")
        .unwrap()
        .args(["a52", "0xFFFFFFFFFFFFFC00", "0x21"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3D144B2B04D64DD91182DC8B6B754"));
}

#[test]
fn oversized_frame_counter_is_a_domain_error() {
    Command::cargo_bin("cli")
        .unwrap()
        .args(["a51", "0", "4194304"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("frame counter out of range"));
}

fn send_key_of(key: &str, frame: &str) -> String {
    let output = Command::cargo_bin("cli")
        .unwrap()
        .args(["a52", key, frame])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let line = stdout
        .lines()
        .find(|l| l.starts_with("send_key"))
        .expect("a52 prints a send_key line");
    line.rsplit('=').next().unwrap().trim().to_string()
}

#[test]
fn attack_full_search_recovers_a_known_session_key() {
    // F1 = 0x1F0084 with bit 11 cleared, F2 = same with bit 11 set, same
    // as the `core-lib` unit test of the same name: recover k1/k2 via the
    // binary itself rather than hardcoding precomputed keystream hex.
    let key = "0xFAF3DF3FA6698C0C";
    let f1: u32 = 0x1F_0084 & !(1 << 11);
    let f2: u32 = f1 | (1 << 11);

    let k1 = send_key_of(key, &f1.to_string());
    let k2 = send_key_of(key, &f2.to_string());

    Command::cargo_bin("cli")
        .unwrap()
        .args([
            "attack",
            "--k1", &k1,
            "--k2", &k2,
            "--f1", &f1.to_string(),
            "--f2", &f2.to_string(),
            "--workers", "4",
        ])
        .timeout(std::time::Duration::from_secs(120))
        .assert()
        .success()
        .stdout(predicate::str::contains("FAF3DF3FA6698C0C"));
}
