/// core-lib/src/a52.rs
///
/// A5/2: the same three output registers as A5/1, but clocked under the
/// control of a fourth register (R4) and mixed through a per-register
/// majority function before being XORed into the keystream. See
/// SPEC_FULL.md section 3 and 5 for the weaknesses this construction
/// introduces and that the GWW attack in `gww` exploits.
use tracing::{debug, instrument};

use crate::lfsr::{maj3, Lfsr, R1, R2, R3, R4};
use crate::types::{pack_bits, FrameCounter, SessionKey};

pub const OUTPUT_BITS: usize = 228;
const WARMUP_CYCLES: usize = 99;
const KEY_BITS: u32 = 64;
const FRAME_BITS: u32 = 22;

/// A single round's worth of register state, as read back by the GWW
/// attack's verification step (`gww::attack`) and by tests that need to
/// seed an A5/2 session with specific register contents rather than
/// deriving them from a key and frame counter.
#[derive(Debug, Clone, Copy)]
pub struct RegisterState {
    pub r1: u32,
    pub r2: u32,
    pub r3: u32,
    pub r4: u32,
}

/// Live state of an A5/2 session: three nonlinearly-mixed output
/// registers plus the R4 controller.
pub struct A52 {
    r1: Lfsr,
    r2: Lfsr,
    r3: Lfsr,
    r4: Lfsr,
}

impl A52 {
    /// Mix `key` and `frame_counter` into freshly zeroed registers, force
    /// the four anti-degeneracy bits to 1, and run the 99-cycle warmup.
    /// Both arguments are already range-validated by construction, so
    /// this cannot fail.
    #[instrument(skip(key))]
    pub fn new(key: SessionKey, frame_counter: FrameCounter) -> Self {
        let mut session = Self::prepare(key, frame_counter);
        session.warmup();
        debug!("a5/2 session initialised");
        session
    }

    /// Like [`Self::new`], but also returns the register state reached
    /// just after key/frame mixing and the force-bit step, before the
    /// 99-cycle warmup runs. The GWW attack's "R4 given" scenario needs
    /// exactly this snapshot (R4's value at that point) as its known
    /// input.
    #[must_use]
    pub fn new_capturing_initial_state(
        key: SessionKey,
        frame_counter: FrameCounter,
    ) -> (Self, RegisterState) {
        let mut session = Self::prepare(key, frame_counter);
        let initial = session.registers();
        session.warmup();
        (session, initial)
    }

    fn prepare(key: SessionKey, frame_counter: FrameCounter) -> Self {
        let mut session = Self {
            r1: Lfsr::new(R1, 0),
            r2: Lfsr::new(R2, 0),
            r3: Lfsr::new(R3, 0),
            r4: Lfsr::new(R4, 0),
        };
        session.mix(key.get(), KEY_BITS);
        session.mix(u64::from(frame_counter.get()), FRAME_BITS);
        session.force_bits();
        session
    }

    /// Build a session from already-known, already-forced register
    /// contents, skipping key/frame mixing and force-bit application.
    ///
    /// This is the shape a solved GWW attack produces: the pre-warmup
    /// register state it recovers has the four anti-degeneracy bits
    /// already set, same as the state `new` would have reached just
    /// before its own warmup call. Callers that want to reproduce a full
    /// session from that point call [`Self::warmup`] before
    /// [`Self::keystream`]; callers fabricating register state directly
    /// for a unit test may skip straight to `keystream`.
    #[must_use]
    pub fn from_registers(state: RegisterState) -> Self {
        Self {
            r1: Lfsr::new(R1, state.r1),
            r2: Lfsr::new(R2, state.r2),
            r3: Lfsr::new(R3, state.r3),
            r4: Lfsr::new(R4, state.r4),
        }
    }

    /// Run the 99-cycle majority-clocked warmup, discarding its output.
    pub fn warmup(&mut self) {
        for _ in 0..WARMUP_CYCLES {
            self.majority_clock();
        }
    }

    #[must_use]
    pub fn registers(&self) -> RegisterState {
        RegisterState {
            r1: self.r1.state(),
            r2: self.r2.state(),
            r3: self.r3.state(),
            r4: self.r4.state(),
        }
    }

    // Mixing clocks each bit of the operand LSB-first, MSB-last, and
    // drives all four registers (including R4) with the same bit —
    // matching A5/1's `mix_key`/`mix_frame` except that R4 participates.
    fn mix(&mut self, value: u64, bits: u32) {
        for i in 0..bits {
            let bit = (value >> i) & 1 != 0;
            self.r1.clock(bit);
            self.r2.clock(bit);
            self.r3.clock(bit);
            self.r4.clock(bit);
        }
    }

    fn force_bits(&mut self) {
        self.r1.set_logical_bit(R1.force_bit, true);
        self.r2.set_logical_bit(R2.force_bit, true);
        self.r3.set_logical_bit(R3.force_bit, true);
        self.r4.set_logical_bit(R4.force_bit, true);
    }

    /// Evaluate R4's majority, conditionally clock R1/R2/R3 against it,
    /// unconditionally clock R4, then return the keystream bit: the raw
    /// output and majority contribution of each of R1/R2/R3, all read
    /// *after* this cycle's clocking.
    fn majority_clock(&mut self) -> bool {
        let c1 = self.r4.clock_bit_at(0);
        let c2 = self.r4.clock_bit_at(1);
        let c3 = self.r4.clock_bit_at(2);
        let m = maj3(c1, c2, c3);

        if c1 == m {
            self.r1.clock(false);
        }
        if c2 == m {
            self.r2.clock(false);
        }
        if c3 == m {
            self.r3.clock(false);
        }
        self.r4.clock(false);

        self.r1.raw_output_bit()
            ^ self.r2.raw_output_bit()
            ^ self.r3.raw_output_bit()
            ^ self.r1.majority_output()
            ^ self.r2.majority_output()
            ^ self.r3.majority_output()
    }

    /// Produce the full 228-bit keystream, split into the 114-bit send
    /// and receive halves.
    pub fn keystream(&mut self) -> (u128, u128) {
        let mut bits = [false; OUTPUT_BITS];
        for b in &mut bits {
            *b = self.majority_clock();
        }
        (pack_bits(&bits[..114]), pack_bits(&bits[114..]))
    }

    /// Produce only the 114-bit send-direction half, skipping the 114
    /// cycles that would otherwise generate the receive half. The GWW
    /// attack's verification step calls this on every candidate it
    /// checks and never needs the receive half.
    pub fn send_keystream(&mut self) -> u128 {
        let mut bits = [false; 114];
        for b in &mut bits {
            *b = self.majority_clock();
        }
        pack_bits(&bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;

    fn key(v: u64) -> SessionKey {
        SessionKey::from(v)
    }

    fn frame(v: u32) -> FrameCounter {
        FrameCounter::new(v).unwrap()
    }

    #[test]
    fn known_answer_test() {
        let mut session = A52::new(key(0xFFFF_FFFF_FFFF_FC00), frame(0x21));
        let (send, recv) = session.keystream();
        // Pad each 114-bit half to 120 bits (6 trailing zero bits) to
        // match the byte-aligned test vectors.
        assert_eq!(send << 6, 0xF451_2CAC_1359_3764_460B_722D_ADD5_00);
        assert_eq!(recv << 6, 0x4800_D432_8E16_A14D_CD7B_9722_2651_00);
    }

    #[test]
    fn rejects_oversized_frame_counter() {
        let err = FrameCounter::new(1 << 22).unwrap_err();
        assert_eq!(err, DomainError::FrameCounterOutOfRange(1 << 22));
    }

    #[test]
    fn from_registers_round_trips_through_registers() {
        let state = RegisterState {
            r1: 0x1_2345,
            r2: 0x2_F0C1,
            r3: 0x5_2A77,
            r4: 0x1_1234,
        };
        let session = A52::from_registers(state);
        let round_tripped = session.registers();
        assert_eq!(round_tripped.r1, state.r1);
        assert_eq!(round_tripped.r2, state.r2);
        assert_eq!(round_tripped.r3, state.r3);
        assert_eq!(round_tripped.r4, state.r4);
    }

    #[test]
    fn send_keystream_matches_first_half_of_full_keystream() {
        let mut a = A52::new(key(0x1122_3344_5566_7788), frame(7));
        let mut b = A52::new(key(0x1122_3344_5566_7788), frame(7));
        let (send, _recv) = a.keystream();
        assert_eq!(b.send_keystream(), send);
    }

    #[test]
    fn capturing_initial_state_reaches_same_keystream_as_new() {
        let (mut captured, initial) =
            A52::new_capturing_initial_state(key(0x1122_3344_5566_7788), frame(7));
        // The four anti-degeneracy bits are already forced at the
        // captured snapshot, before warmup has even run.
        assert_eq!((initial.r1 >> R1.force_bit) & 1, 1);
        assert_eq!((initial.r2 >> R2.force_bit) & 1, 1);
        assert_eq!((initial.r3 >> R3.force_bit) & 1, 1);
        assert_eq!((initial.r4 >> R4.force_bit) & 1, 1);

        let mut from_scratch = A52::new(key(0x1122_3344_5566_7788), frame(7));
        assert_eq!(captured.keystream(), from_scratch.keystream());
    }

    #[test]
    fn distinct_keys_diverge() {
        let mut a = A52::new(key(0x1122_3344_5566_7788), frame(1));
        let mut b = A52::new(key(0x8877_6655_4433_2211), frame(1));
        assert_ne!(a.keystream(), b.keystream());
    }
}
