/// Slow, end-to-end GWW attack scenarios: the full 2^17-candidate parallel
/// search, exercised here rather than in `core-lib`'s own unit tests
/// because a complete scan takes long enough to be worth keeping off the
/// default `cargo test` fast path for the library crate. See
/// SPEC_FULL.md section 8, "GWW attack full search" and "Empty search".
use common::gww_kat_inputs;
use core_lib::error::AttackOutcome;
use core_lib::gww::{search, AttackConfig, AttackInput};
use core_lib::Keystream;

#[test]
fn full_search_recovers_a_known_session_key() {
    let (k1, k2, f1, f2, _r4) = gww_kat_inputs();
    let input = AttackInput { k1: &k1, k2: &k2, f1, f2 };

    let outcome = search(&input, AttackConfig::with_workers(4)).expect("valid attack arguments");
    assert_eq!(outcome, AttackOutcome::Found(common::GWW_KAT_KEY));
}

#[test]
fn full_search_exhausts_without_a_match_for_unrelated_keystreams() {
    let (_k1, k2, f1, f2, _r4) = gww_kat_inputs();
    let unrelated_k1 = Keystream::from_bits([true; 114]);
    let input = AttackInput { k1: &unrelated_k1, k2: &k2, f1, f2 };

    let outcome = search(&input, AttackConfig::with_workers(4)).expect("valid attack arguments");
    assert_eq!(outcome, AttackOutcome::NotFound);
}
