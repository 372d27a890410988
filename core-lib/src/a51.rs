/// core-lib/src/a51.rs
///
/// A5/1: three-register majority-clocked LFSR stream cipher with no
/// nonlinear output mixing. See SPEC_FULL.md section 3 for the keystream
/// generation lifecycle this mirrors.
use tracing::{debug, instrument};

use crate::lfsr::{maj3, Lfsr, R1, R2, R3};
use crate::types::{pack_bits, FrameCounter, SessionKey};

/// Number of keystream bits produced per frame: 114 for the mobile-to-
/// network direction followed by 114 for network-to-mobile.
pub const OUTPUT_BITS: usize = 228;
const WARMUP_CYCLES: usize = 100;
const KEY_BITS: u32 = 64;
const FRAME_BITS: u32 = 22;

/// Live state of an A5/1 session: three majority-clocked registers.
pub struct A51 {
    r1: Lfsr,
    r2: Lfsr,
    r3: Lfsr,
}

impl A51 {
    /// Mix `key` and `frame_counter` into freshly zeroed registers and
    /// run the 100-cycle warmup, producing a session ready to emit
    /// keystream bits. Both arguments are already range-validated by
    /// construction, so this cannot fail.
    #[instrument(skip(key))]
    pub fn new(key: SessionKey, frame_counter: FrameCounter) -> Self {
        let mut session = Self {
            r1: Lfsr::new(R1, 0),
            r2: Lfsr::new(R2, 0),
            r3: Lfsr::new(R3, 0),
        };
        session.mix_key(key.get());
        session.mix_frame(frame_counter.get());
        for _ in 0..WARMUP_CYCLES {
            session.majority_clock();
        }
        debug!("a5/1 session initialised");
        session
    }

    // Mixing clocks each bit of the operand in ascending shift order:
    // LSB first, MSB last. This matches the validated reference
    // implementation and is *not* the natural MSB-first reading order
    // `spec.md` uses elsewhere for displaying bit strings.
    fn mix_key(&mut self, key: u64) {
        for i in 0..KEY_BITS {
            let bit = (key >> i) & 1 != 0;
            self.r1.clock(bit);
            self.r2.clock(bit);
            self.r3.clock(bit);
        }
    }

    fn mix_frame(&mut self, frame_counter: u32) {
        for i in 0..FRAME_BITS {
            let bit = (frame_counter >> i) & 1 != 0;
            self.r1.clock(bit);
            self.r2.clock(bit);
            self.r3.clock(bit);
        }
    }

    /// Clock the majority-selected subset of registers once and return
    /// the combined output bit: the XOR of each register's raw output
    /// bit *after* this cycle's conditional clock has been applied (a
    /// register that didn't clock this cycle simply keeps its prior
    /// value there).
    fn majority_clock(&mut self) -> bool {
        let c1 = self.r1.clock_bit_at(0);
        let c2 = self.r2.clock_bit_at(0);
        let c3 = self.r3.clock_bit_at(0);
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
        self.r1.raw_output_bit() ^ self.r2.raw_output_bit() ^ self.r3.raw_output_bit()
    }

    /// Produce the full 228-bit keystream as a big-endian bit string
    /// (MSB first), split into the 114-bit send and receive halves.
    pub fn keystream(&mut self) -> (u128, u128) {
        let mut bits = [false; OUTPUT_BITS];
        for b in &mut bits {
            *b = self.majority_clock();
        }
        let send = pack_bits(&bits[..114]);
        let recv = pack_bits(&bits[114..]);
        (send, recv)
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
        let mut session = A51::new(key(0xEFCD_AB89_6745_2312), frame(0x0001_34));
        let (send, recv) = session.keystream();
        assert_eq!(send, 0x14D3_AA96_0BFA_0546_ADB8_6156_9CA3_0);
        assert_eq!(recv, 0x093F_4D68_D757_ED94_9B4C_BE41_B7C6_B);
    }

    #[test]
    fn rejects_oversized_frame_counter() {
        let err = FrameCounter::new(1 << 22).unwrap_err();
        assert_eq!(err, DomainError::FrameCounterOutOfRange(1 << 22));
    }

    #[test]
    fn distinct_frame_counters_diverge() {
        let mut a = A51::new(key(0x1122_3344_5566_7788), frame(1));
        let mut b = A51::new(key(0x1122_3344_5566_7788), frame(2));
        assert_ne!(a.keystream(), b.keystream());
    }
}
