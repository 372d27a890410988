/// core-lib/src/gww/registers.rs
///
/// Symbolic counterpart of the A5/2 output registers (R1..R3), used to
/// build the linear system the GWW attack solves. Each cell holds a
/// *set* of variable indices rather than a concrete bit; clocking a
/// symbolic register XORs the tapped cells' sets together the same way
/// the concrete `Lfsr::clock` XORs tapped bits. See SPEC_FULL.md section
/// 4.4 and DESIGN.md for the per-register `x_delta_products` /
/// `delta_delta_products` closed-form derivation.
use crate::gww::tables::{R1_FC, R2_FC, R3_FC};
use crate::lfsr::{maj3, Lfsr, R1, R2, R3};

/// Static description of one symbolic register's structure: independent
/// of any particular attack's `f1`/`f2`.
pub struct SymbolicSpec {
    pub length: usize,
    pub taps: &'static [u8],
    /// `(x_pos, delta_pos)` pairs contributing the linear part of this
    /// register's majority-delta row: for each pair, every variable
    /// present in the cell at logical position `x_pos` picks up a term
    /// of `delta[delta_pos]`.
    pub x_delta_products: &'static [(u8, u8)],
    /// `(p, q)` pairs contributing the quadratic constant term of this
    /// register's majority-delta: `delta[p] * delta[q]`, summed mod 2.
    pub delta_delta_products: &'static [(u8, u8)],
    /// Per-(physical)-cell mask of which of the 22 frame-counter bit
    /// positions were XORed into that cell by the frame-mix phase.
    pub fc_positions: &'static [u32],
}

pub const R1_SYM: SymbolicSpec = SymbolicSpec {
    length: 19,
    taps: R1.taps,
    x_delta_products: &[(14, 12), (14, 15), (12, 14), (12, 15), (15, 14), (15, 12)],
    delta_delta_products: &[(14, 12), (14, 15), (12, 15), (12, 12), (15, 15), (18, 18)],
    fc_positions: &R1_FC,
};

pub const R2_SYM: SymbolicSpec = SymbolicSpec {
    length: 22,
    taps: R2.taps,
    x_delta_products: &[(16, 9), (16, 13), (9, 16), (9, 13), (13, 16), (13, 9)],
    delta_delta_products: &[(16, 9), (16, 13), (9, 13), (9, 9), (13, 13), (21, 21)],
    fc_positions: &R2_FC,
};

pub const R3_SYM: SymbolicSpec = SymbolicSpec {
    length: 23,
    taps: R3.taps,
    x_delta_products: &[(13, 16), (13, 18), (16, 13), (16, 18), (18, 13), (18, 16)],
    delta_delta_products: &[(13, 16), (13, 18), (16, 18), (16, 16), (18, 18), (22, 22)],
    fc_positions: &R3_FC,
};

/// One symbolic register. Cells are stored physically (physical index 0
/// is the oldest cell, as in the concrete `Lfsr`'s own literature
/// convention — see `lfsr.rs`'s module doc), each cell a bitmask over
/// variable indices `0..length`. At construction cell `i` holds exactly
/// variable `i`; clocking XORs the tapped cells together and shifts.
pub struct GwwRegister {
    spec: &'static SymbolicSpec,
    cells: Vec<u32>,
    f1: u32,
    f2: u32,
}

impl GwwRegister {
    #[must_use]
    pub fn new(spec: &'static SymbolicSpec, f1: u32, f2: u32) -> Self {
        let cells = (0..spec.length as u32).map(|i| 1u32 << i).collect();
        Self { spec, cells, f1, f2 }
    }

    /// Variable-set bitmask at logical position `p`.
    fn get_bit(&self, p: u8) -> u32 {
        self.cells[self.spec.length - 1 - p as usize]
    }

    /// Clock once: XOR the tapped cells' variable sets into a new cell
    /// at the newest (physical) position, dropping the oldest cell.
    pub fn clock(&mut self) {
        let mut feedback = 0u32;
        for &t in self.spec.taps {
            feedback ^= self.get_bit(t);
        }
        self.cells.remove(0);
        self.cells.push(feedback);
    }

    /// Per-(physical)-cell delta: the known, purely f1/f2-derived
    /// difference between this register's value under `f1` and under
    /// `f2`, assuming both runs started from the same 64 symbolic
    /// unknowns (see DESIGN.md for why this fiction is sound).
    fn calculate_deltas(&self) -> Vec<bool> {
        self.cells
            .iter()
            .map(|&mask| {
                let mut delta = false;
                for v in 0..self.spec.length {
                    if mask & (1 << v) != 0 {
                        let fc = self.spec.fc_positions[v];
                        for p in 0..22 {
                            if fc & (1 << p) != 0 {
                                delta ^= ((self.f1 >> p) & 1) != ((self.f2 >> p) & 1);
                            }
                        }
                    }
                }
                delta
            })
            .collect()
    }

    /// This register's contribution to the GWW attack row at the
    /// current cycle: a `length`-wide variable mask (bit `v` set means
    /// variable `v` appears in this row) plus a constant bit, both
    /// derived from the majority-delta algebra in DESIGN.md.
    #[must_use]
    pub fn g_delta(&self) -> (u64, bool) {
        let delta = self.calculate_deltas();
        let delta_raw = |logical: u8| delta[self.spec.length - 1 - logical as usize];

        let mut row = 0u64;
        for &(x_pos, d_pos) in self.spec.x_delta_products {
            if delta_raw(d_pos) {
                row ^= u64::from(self.get_bit(x_pos));
            }
        }
        let mut constant = false;
        for &(p, q) in self.spec.delta_delta_products {
            constant ^= delta_raw(p) && delta_raw(q);
        }
        (row, constant)
    }
}

/// The three symbolic output registers, clocked in lockstep with a
/// concrete R4 controller exactly as the real A5/2 engine clocks
/// R1..R3 — see `A52::majority_clock`.
pub struct GwwRegisters {
    pub r1: GwwRegister,
    pub r2: GwwRegister,
    pub r3: GwwRegister,
}

impl GwwRegisters {
    #[must_use]
    pub fn new(f1: u32, f2: u32) -> Self {
        Self {
            r1: GwwRegister::new(&R1_SYM, f1, f2),
            r2: GwwRegister::new(&R2_SYM, f1, f2),
            r3: GwwRegister::new(&R3_SYM, f1, f2),
        }
    }

    /// Mirror of `A52::majority_clock`'s clocking discipline, applied to
    /// the symbolic registers instead of concrete ones. `r4` is
    /// concrete: its initial state is the candidate under test.
    pub fn clock_with_r4(&mut self, r4: &mut Lfsr) {
        let c1 = r4.clock_bit_at(0);
        let c2 = r4.clock_bit_at(1);
        let c3 = r4.clock_bit_at(2);
        let m = maj3(c1, c2, c3);

        if c1 == m {
            self.r1.clock();
        }
        if c2 == m {
            self.r2.clock();
        }
        if c3 == m {
            self.r3.clock();
        }
        r4.clock(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_register_cells_hold_singleton_variables() {
        let reg = GwwRegister::new(&R1_SYM, 0, 0);
        for i in 0..19u8 {
            assert_eq!(reg.get_bit(i), 1 << (18 - i));
        }
    }

    #[test]
    fn identical_frame_counters_produce_zero_deltas() {
        let reg = GwwRegister::new(&R1_SYM, 0x1F_0084, 0x1F_0084);
        assert!(reg.calculate_deltas().iter().all(|&d| !d));
        let (_, constant) = reg.g_delta();
        assert!(!constant);
    }

    #[test]
    fn clocking_merges_tapped_variable_sets() {
        let mut reg = GwwRegister::new(&R1_SYM, 0, 0);
        reg.clock();
        // R1 taps = [13, 16, 17, 18]; after one clock the newest cell
        // (physical index length-1) holds the XOR of those four
        // singleton variable sets.
        let expected = (1u32 << 13) ^ (1u32 << 16) ^ (1u32 << 17) ^ (1u32 << 18);
        assert_eq!(*reg.cells.last().unwrap(), expected);
    }

    #[test]
    fn clock_with_r4_advances_majority_selected_registers() {
        let mut symbolic = GwwRegisters::new(0x1F_0084, 0x1F_0884);
        let mut r4 = Lfsr::new(crate::lfsr::R4, 0x1_A3F0);
        let before_r4 = r4.state();
        symbolic.clock_with_r4(&mut r4);
        assert_ne!(r4.state(), before_r4);
    }
}
