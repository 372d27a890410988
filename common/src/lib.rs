/// common/src/lib.rs
///
/// Known-answer test vectors shared between `core-lib`'s unit tests, the
/// `cli` crate's integration tests, and the `tests` end-to-end harness, so
/// all three check against the same numbers.
use core_lib::gww::{recover_r4_for_testing, unpack_114};
use core_lib::{A52, FrameCounter, Keystream, SessionKey};

/// A5/1: K = 0xEFCDAB8967452312, F = 0x000134.
pub const A51_KAT_KEY: u64 = 0xEFCD_AB89_6745_2312;
pub const A51_KAT_FRAME: u32 = 0x0001_34;
pub const A51_KAT_SEND: u128 = 0x14D3_AA96_0BFA_0546_ADB8_6156_9CA3_0;
pub const A51_KAT_RECV: u128 = 0x093F_4D68_D757_ED94_9B4C_BE41_B7C6_B;

/// A5/2: K = 0xFFFFFFFFFFFFFC00, F = 0x21 (114-bit halves right-padded to
/// 120 bits in the published test vector).
pub const A52_KAT_KEY: u64 = 0xFFFF_FFFF_FFFF_FC00;
pub const A52_KAT_FRAME: u32 = 0x21;
pub const A52_KAT_SEND_PADDED: u128 = 0xF451_2CAC_1359_3764_460B_722D_ADD5_00;
pub const A52_KAT_RECV_PADDED: u128 = 0x4800_D432_8E16_A14D_CD7B_9722_2651_00;

/// The GWW "R4 given" / "full search" scenario: a session key and a pair
/// of frame counters differing only in bit 11.
pub const GWW_KAT_KEY: u64 = 0xFAF3_DF3F_A669_8C0C;
pub const GWW_KAT_FRAME_BASE: u32 = 0x1F_0084;

/// The two frame counters the GWW known-answer scenario attacks: `base`
/// with bit 11 cleared and set respectively.
#[must_use]
pub fn gww_kat_frame_counters() -> (FrameCounter, FrameCounter) {
    let base = GWW_KAT_FRAME_BASE & !(1 << 11);
    let f1 = FrameCounter::new(base).expect("KAT frame counter fits in 22 bits");
    let f2 = FrameCounter::new(base | (1 << 11)).expect("KAT frame counter fits in 22 bits");
    (f1, f2)
}

/// Run A5/2 under both halves of [`gww_kat_frame_counters`] with
/// [`GWW_KAT_KEY`], returning the `(k1, k2, f1, f2)` tuple the attack
/// expects, plus R4's pre-warmup state as recovered for the "R4 given"
/// scenario.
pub fn gww_kat_inputs() -> (Keystream, Keystream, FrameCounter, FrameCounter, u32) {
    let (f1, f2) = gww_kat_frame_counters();
    let key = SessionKey::from(GWW_KAT_KEY);

    let r4 = recover_r4_for_testing(key, f1);

    let mut session1 = A52::new(key, f1);
    let k1 = Keystream::from_bits(unpack_114(session1.send_keystream()));
    let mut session2 = A52::new(key, f2);
    let k2 = Keystream::from_bits(unpack_114(session2.send_keystream()));
    (k1, k2, f1, f2, r4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_counters_differ_by_bit_eleven() {
        let (f1, f2) = gww_kat_frame_counters();
        assert_eq!(f1.get() ^ f2.get(), 1 << 11);
    }
}
