/// core-lib/src/gww/attack.rs
///
/// The Goldberg-Wagner-Wegman known-keystream attack against A5/2: given
/// two 114-bit keystreams produced under frame counters differing only
/// in logical bit 11, recover R1..R3's pre-warmup state via a 64-unknown
/// GF(2) linear system, then the 64-bit session key via a second, fixed
/// linear system. See SPEC_FULL.md section 4.5 and DESIGN.md.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, info, instrument, trace};

use crate::a52::{RegisterState, A52};
use crate::error::{AttackOutcome, DomainError};
use crate::gww::matrix::{solve, GfMatrix};
use crate::gww::registers::GwwRegisters;
use crate::lfsr::{reverse_clock, Lfsr, RegisterSpec, R1, R2, R3, R4};
use crate::types::{FrameCounter, Keystream, R4Candidate, SessionKey};

/// Observed keystream, frame-counter difference, and candidate
/// R4-search fan-out for one attack run.
pub struct AttackInput<'a> {
    pub k1: &'a Keystream,
    pub k2: &'a Keystream,
    pub f1: FrameCounter,
    pub f2: FrameCounter,
}

const FRAME_COUNTER_DIFFERENCE: u32 = 0x800;
const FRAME_BITS: u32 = 22;
const R4_CANDIDATES: u32 = 1 << 17;

fn check_arguments(f1: FrameCounter, f2: FrameCounter) -> Result<(), DomainError> {
    if f1.get() ^ f2.get() != FRAME_COUNTER_DIFFERENCE {
        return Err(DomainError::FrameCounterXorMismatch(f1.get() ^ f2.get()));
    }
    Ok(())
}

/// Driver configuration for [`search`]. Defaults to one worker per
/// available CPU, falling back to a single worker on platforms where
/// that cannot be determined, mirroring the reference attack's own
/// worker-pool sizing.
#[derive(Debug, Clone, Copy)]
pub struct AttackConfig {
    pub workers: usize,
    /// Log a progress line every `progress_interval` candidates a
    /// worker checks. `None` disables progress logging entirely.
    pub progress_interval: Option<u32>,
}

impl AttackConfig {
    #[must_use]
    pub fn with_workers(workers: usize) -> Self {
        Self { workers: workers.max(1), ..Self::default() }
    }
}

impl Default for AttackConfig {
    fn default() -> Self {
        let workers = std::thread::available_parallelism().map_or(1, std::num::NonZero::get);
        Self { workers, progress_interval: Some(4096) }
    }
}

/// Pack a 114-bit big-endian value (as produced by [`A52::send_keystream`])
/// into a bit array for row-by-row processing.
#[must_use]
pub fn unpack_114(v: u128) -> [bool; 114] {
    let mut out = [false; 114];
    for (i, bit) in out.iter_mut().enumerate() {
        *bit = (v >> (113 - i)) & 1 != 0;
    }
    out
}

/// Run the attack against a single R4 candidate. Returns the session key
/// on success.
///
/// # Errors
/// Returns [`DomainError`] if `f1`/`f2` do not differ in exactly bit 11.
pub fn try_r4(
    r4_candidate: R4Candidate,
    input: &AttackInput<'_>,
) -> Result<AttackOutcome, DomainError> {
    check_arguments(input.f1, input.f2)?;
    Ok(match perform_attack(r4_candidate.get(), input) {
        Some(key) => AttackOutcome::Found(key),
        None => AttackOutcome::NotFound,
    })
}

fn perform_attack(r4_candidate: u32, input: &AttackInput<'_>) -> Option<u64> {
    let r4_init = Lfsr::new(R4, r4_candidate);
    let mut r4 = r4_init;
    let mut symbolic = GwwRegisters::new(input.f1.get(), input.f2.get());
    for _ in 0..99 {
        symbolic.clock_with_r4(&mut r4);
    }

    let mut matrix = GfMatrix::new(114, 64);
    let mut b = vec![false; 114];
    let k1 = input.k1.bits();
    let k2 = input.k2.bits();
    for row in 0..114 {
        symbolic.clock_with_r4(&mut r4);
        let (xr, xc) = symbolic.r1.g_delta();
        let (yr, yc) = symbolic.r2.g_delta();
        let (zr, zc) = symbolic.r3.g_delta();
        let combined = xr | (yr << 19) | (zr << 41);
        matrix.set_row(row, combined);
        b[row] = (k1[row] ^ k2[row]) ^ xc ^ yc ^ zc;
    }

    let solved = solve(&matrix, &b)?;
    check_gauss_solution(&solved.solutions, r4_init, k1, input.f1)
}

/// Build an `Lfsr` from a raw-cell (physical-index) bit slice: entry `i`
/// is this register's physical cell `i`, matching the layout a Gauss
/// solution slice or a reverse-clocked register state is in.
fn lfsr_from_raw_cells(spec: RegisterSpec, raw: &[bool]) -> Lfsr {
    let length = spec.length;
    let mut state = 0u32;
    for (i, &bit) in raw.iter().enumerate() {
        if bit {
            state |= 1 << (length as usize - 1 - i);
        }
    }
    Lfsr::new(spec, state)
}

fn raw_cells(lfsr: &Lfsr, length: u8) -> Vec<bool> {
    (0..length).map(|i| lfsr.logical_bit(length - 1 - i)).collect()
}

fn reverse_frame_counter(r1: &mut Lfsr, r2: &mut Lfsr, r3: &mut Lfsr, f: FrameCounter) {
    for i in (0..FRAME_BITS).rev() {
        let bit = (f.get() >> i) & 1 != 0;
        reverse_clock(r1, bit);
        reverse_clock(r2, bit);
        reverse_clock(r3, bit);
    }
}

/// Column `c` of the session-key matrix is key logical position
/// `63 - c`; invert that to rebuild the 64-bit key from a Gauss
/// solution over the session-key system.
fn key_from_solution(bits: &[bool]) -> u64 {
    let mut key = 0u64;
    for (c, &bit) in bits.iter().enumerate() {
        if bit {
            key |= 1 << (63 - c);
        }
    }
    key
}

fn check_session_key(key: u64, frame_counter: FrameCounter, k1: &[bool; 114]) -> bool {
    let mut session = A52::new(SessionKey::from(key), frame_counter);
    unpack_114(session.send_keystream()) == *k1
}

/// For each candidate pre-warmup register solution, verify it against
/// `k1`, then recover the session key by trying all 8 possible
/// pre-force values of the three force-bit cells (the linear system
/// never constrains them, since the force-bit invariant isn't one of
/// its equations) and reverse-clocking the 22-cycle frame mix.
fn check_gauss_solution(
    solutions: &[Vec<bool>],
    r4_init: Lfsr,
    k1: &[bool; 114],
    f1: FrameCounter,
) -> Option<u64> {
    let session_key_matrix = GfMatrix::build_session_key_matrix();

    for solution in solutions {
        let r1_cells = &solution[0..19];
        let r2_cells = &solution[19..41];
        let r3_cells = &solution[41..64];

        let mut verify = A52::from_registers(RegisterState {
            r1: lfsr_from_raw_cells(R1, r1_cells).state(),
            r2: lfsr_from_raw_cells(R2, r2_cells).state(),
            r3: lfsr_from_raw_cells(R3, r3_cells).state(),
            r4: r4_init.state(),
        });
        verify.warmup();
        if unpack_114(verify.send_keystream()) != *k1 {
            continue;
        }

        for combo in 0..8u8 {
            let mut r1 = lfsr_from_raw_cells(R1, r1_cells);
            let mut r2 = lfsr_from_raw_cells(R2, r2_cells);
            let mut r3 = lfsr_from_raw_cells(R3, r3_cells);
            r1.set_logical_bit(R1.force_bit, combo & 1 != 0);
            r2.set_logical_bit(R2.force_bit, (combo >> 1) & 1 != 0);
            r3.set_logical_bit(R3.force_bit, (combo >> 2) & 1 != 0);
            reverse_frame_counter(&mut r1, &mut r2, &mut r3, f1);

            let mut b = raw_cells(&r1, 19);
            b.extend(raw_cells(&r2, 22));
            b.extend(raw_cells(&r3, 23));

            let Some(key_solved) = solve(&session_key_matrix, &b) else {
                continue;
            };
            for key_bits in &key_solved.solutions {
                let key = key_from_solution(key_bits);
                if check_session_key(key, f1, k1) {
                    return Some(key);
                }
            }
        }
    }
    None
}

/// Run the full parallel search over all `2^17` R4 candidates (filtered
/// to those with the force-bit already 1, same invariant a real R4 must
/// satisfy). One worker owns one contiguous sub-range; the first worker
/// to verify a solution flips a shared flag the others poll between
/// candidates.
///
/// # Errors
/// Returns [`DomainError`] if `f1`/`f2` do not differ in exactly bit 11.
#[instrument(skip(input))]
pub fn search(input: &AttackInput<'_>, config: AttackConfig) -> Result<AttackOutcome, DomainError> {
    check_arguments(input.f1, input.f2)?;
    let workers = config.workers.max(1);
    let steps = R4_CANDIDATES / workers as u32;
    info!(workers, candidates = R4_CANDIDATES, "starting GWW search");

    let found = Arc::new(AtomicBool::new(false));
    let result: Arc<Mutex<Option<u64>>> = Arc::new(Mutex::new(None));

    std::thread::scope(|scope| {
        for w in 0..workers {
            let start = steps * w as u32;
            let end = if w == workers - 1 { R4_CANDIDATES } else { start + steps };
            let found = Arc::clone(&found);
            let result = Arc::clone(&result);
            scope.spawn(move || {
                for candidate in start..end {
                    if found.load(Ordering::SeqCst) {
                        return;
                    }
                    if (candidate >> 10) & 1 != 1 {
                        continue;
                    }
                    if config.progress_interval.is_some_and(|n| candidate % n == 0) {
                        debug!(worker = w, candidate, "still searching");
                    }
                    match perform_attack(candidate, input) {
                        Some(key) => {
                            *result.lock().expect("result mutex poisoned") = Some(key);
                            found.store(true, Ordering::SeqCst);
                            return;
                        }
                        None => trace!(worker = w, candidate, "candidate missed"),
                    }
                }
            });
        }
    });

    let outcome = match *result.lock().expect("result mutex poisoned") {
        Some(key) => AttackOutcome::Found(key),
        None => AttackOutcome::NotFound,
    };
    info!(found = outcome.key().is_some(), "search finished");
    Ok(outcome)
}

/// Re-derive the true pre-warmup R4 state from a session already
/// constructed with a known key and frame counter, for building "R4
/// given" test fixtures. Outside test-vector construction the attack
/// never has access to the true R4 — that's the entire premise of the
/// search this module performs — so this is not part of the library's
/// normal surface.
#[cfg(any(test, feature = "testing"))]
#[must_use]
pub fn recover_r4_for_testing(key: SessionKey, frame_counter: FrameCounter) -> u32 {
    let (_, initial) = A52::new_capturing_initial_state(key, frame_counter);
    initial.r4
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_counters() -> (FrameCounter, FrameCounter) {
        // SPEC_FULL.md's "GWW attack with R4 given" scenario: bit 11
        // cleared for f1, set for f2.
        let base = 0x1F_0084 & !(1 << 11);
        let f1 = FrameCounter::new(base).unwrap();
        let f2 = FrameCounter::new(base | (1 << 11)).unwrap();
        (f1, f2)
    }

    #[test]
    fn attack_recovers_the_session_key_when_r4_is_known() {
        let key = SessionKey::from(0xFAF3_DF3F_A669_8C0C);
        let (f1, f2) = frame_counters();

        let r4 = recover_r4_for_testing(key, f1);
        let mut session1 = A52::new(key, f1);
        let k1 = Keystream::from_bits(unpack_114(session1.send_keystream()));
        let mut session2 = A52::new(key, f2);
        let k2 = Keystream::from_bits(unpack_114(session2.send_keystream()));

        let input = AttackInput { k1: &k1, k2: &k2, f1, f2 };
        let recovered = try_r4(R4Candidate::new(r4).unwrap(), &input).unwrap();
        assert_eq!(recovered, AttackOutcome::Found(key.get()));
    }

    #[test]
    fn rejects_frame_counters_that_do_not_differ_by_2048() {
        let k1 = Keystream::from_bits([false; 114]);
        let k2 = Keystream::from_bits([false; 114]);
        let f1 = FrameCounter::new(0).unwrap();
        let f2 = FrameCounter::new(1).unwrap();
        let input = AttackInput { k1: &k1, k2: &k2, f1, f2 };
        let err = try_r4(R4Candidate::new(0).unwrap(), &input).unwrap_err();
        assert_eq!(err, DomainError::FrameCounterXorMismatch(1));
    }

    // The full 2^17-candidate parallel search is exercised end-to-end in
    // the `tests` integration crate rather than here — it is too slow for
    // a unit test that runs on every `cargo test`.

    #[test]
    fn empty_search_reports_no_key_for_unrelated_keystreams() {
        let k1 = Keystream::from_bits([true; 114]);
        let k2 = Keystream::from_bits([false; 114]);
        let (f1, f2) = frame_counters();
        let input = AttackInput { k1: &k1, k2: &k2, f1, f2 };
        // A single, arbitrary candidate: random/independent keystreams
        // should not satisfy the linear system's consistency check.
        let candidate = R4Candidate::new(1 << 10).unwrap();
        assert_eq!(try_r4(candidate, &input).unwrap(), AttackOutcome::NotFound);
    }
}
