/// core-lib/src/lib.rs
pub mod a51;
pub mod a52;
pub mod error;
pub mod gww;
pub mod lfsr;
pub mod types;

pub use a51::A51;
pub use a52::A52;
pub use error::DomainError;
pub use types::{FrameCounter, Keystream, R4Candidate, SessionKey};
