/// core-lib/src/gww/mod.rs
///
/// The Goldberg-Wagner-Wegman known-keystream attack against A5/2:
/// precomputed dependency tables (`tables`), the symbolic register
/// algebra used to build the attack's linear system (`registers`), a
/// small dense GF(2) solver (`matrix`), and the attack driver itself
/// (`attack`). See SPEC_FULL.md section 4 and DESIGN.md.
pub mod attack;
pub mod matrix;
pub mod registers;
pub mod tables;

pub use attack::{search, try_r4, unpack_114, AttackConfig, AttackInput};
pub use matrix::{solve, GfMatrix, Solved};
pub use registers::{GwwRegister, GwwRegisters, SymbolicSpec};

#[cfg(any(test, feature = "testing"))]
pub use attack::recover_r4_for_testing;
