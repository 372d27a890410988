/// core-lib/src/error.rs
use thiserror::Error;

/// Errors surfaced to callers when an input violates a declared range or
/// the attack's frame-counter precondition.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    #[error("session key out of range: must fit in 64 bits")]
    KeyOutOfRange,
    #[error("frame counter out of range: {0:#08X} does not fit in 22 bits")]
    FrameCounterOutOfRange(u32),
    #[error("keystream out of range: must fit in 114 bits")]
    KeystreamOutOfRange,
    #[error("R4 candidate out of range: {0:#06X} does not fit in 17 bits")]
    R4CandidateOutOfRange(u32),
    #[error("frame counters must differ in exactly bit 11 (f1 XOR f2 = 0x800), got {0:#08X}")]
    FrameCounterXorMismatch(u32),
}

/// Outcome of a completed GWW attack search.
///
/// `NotFound` is not an error condition — exhausting the R4 search space
/// without a verified match is an expected, non-exceptional result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    Found(u64),
    NotFound,
}

impl AttackOutcome {
    #[must_use]
    pub const fn key(self) -> Option<u64> {
        match self {
            Self::Found(k) => Some(k),
            Self::NotFound => None,
        }
    }
}

/// Internal, worker-local signal that a candidate R4 (or a candidate
/// session-key solution derived from it) did not pan out. Never escapes
/// the attack module; it is not a `std::error::Error` and is not meant to
/// be propagated with `?` past `gww::attack`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AttackMiss {
    UnsolvableSystem,
    VerificationFailed,
}
