/// core-lib/src/gww/tables.rs
///
/// Precomputed dependency masks for the 64-cycle key-mix (`SK`) and
/// 22-cycle frame-mix (`FC`) used by the symbolic register set and the
/// session-key matrix solve. Entry `REG_SK[i]` is a 64-bit mask of which
/// session-key bits were XORed into cell `i` of the register by the time
/// key-mixing finishes (frame-mixing not yet applied); `REG_FC[i]` is the
/// analogous 22-bit mask for frame-counter bits XORed in during the
/// 22-cycle frame mix that follows. Both tables are indexed by physical
/// cell `i`; the entry at the physical cell that ends up holding the
/// register's force-bit is zeroed out, since that cell's value is
/// overwritten to 1 regardless of what key/frame bits reached it.
///
/// Derived by direct bitmask simulation of the tap structure in §4.1 —
/// these tables depend only on register length and taps, so they are
/// unaffected by the majority-parameter correction recorded in
/// DESIGN.md.
pub const R1_SK: [u64; 19] = [
    0x9150_4039_0004_0000,
    0xc8a8_201c_8002_0000,
    0xe454_100e_4001_0000,
    0x0,
    0x7915_0403_9000_4000,
    0xbc8a_8201_c800_2000,
    0xde45_4100_e400_1000,
    0x6f22_a080_7200_0800,
    0x3791_5040_3900_0400,
    0x9bc8_a820_1c80_0200,
    0x4de4_5410_0e40_0100,
    0x26f2_2a08_0720_0080,
    0x9379_1504_0390_0040,
    0x49bc_8a82_01c8_0020,
    0x24de_4541_00e4_0010,
    0x126f_22a0_8072_0008,
    0x0937_9150_4039_0004,
    0x049b_c8a8_201c_8002,
    0x024d_e454_100e_4001,
];

pub const R1_FC: [u32; 19] = [
    0x4_0000,
    0x2_0000,
    0x1_0000,
    0x0,
    0x4000,
    0x2000,
    0x1000,
    0x0800,
    0x0400,
    0x0200,
    0x0100,
    0x20_0080,
    0x10_0040,
    0x08_0020,
    0x24_0010,
    0x32_0008,
    0x39_0004,
    0x1c_8002,
    0x0e_4001,
];

pub const R2_SK: [u64; 22] = [
    0x8000_0c00_0020_0000,
    0x4000_0600_0010_0000,
    0xa000_0300_0008_0000,
    0x5000_0180_0004_0000,
    0x2800_00c0_0002_0000,
    0x0,
    0x0a00_0030_0000_8000,
    0x0500_0018_0000_4000,
    0x0280_000c_0000_2000,
    0x0140_0006_0000_1000,
    0x00a0_0003_0000_0800,
    0x0050_0001_8000_0400,
    0x0028_0000_c000_0200,
    0x0014_0000_6000_0100,
    0x000a_0000_3000_0080,
    0x0005_0000_1800_0040,
    0x0002_8000_0c00_0020,
    0x0001_4000_0600_0010,
    0x0000_a000_0300_0008,
    0x0000_5000_1800_0004,
    0x0000_2800_0c00_0002,
    0x8000_1400_0060_0001,
];

pub const R2_FC: [u32; 22] = [
    0x20_0000,
    0x10_0000,
    0x08_0000,
    0x04_0000,
    0x02_0000,
    0x0,
    0x8000,
    0x4000,
    0x2000,
    0x1000,
    0x0800,
    0x0400,
    0x0200,
    0x0100,
    0x0080,
    0x0040,
    0x0020,
    0x0010,
    0x0008,
    0x0004,
    0x0002,
    0x20_0001,
];

pub const R3_SK: [u64; 23] = [
    0x7840_7840_4040_0000,
    0xbc20_3c20_2020_0000,
    0x5e10_1e10_1010_0000,
    0xaf08_0f08_0808_0000,
    0x0,
    0xabc2_03c2_0202_0000,
    0x55e1_01e1_0101_0000,
    0xaaf0_80f0_8080_8000,
    0x5578_4078_4040_4000,
    0xaabc_203c_2020_2000,
    0x555e_101e_1010_1000,
    0xaaaf_080f_0808_0800,
    0xd557_8407_8404_0400,
    0x6aab_c203_c202_0200,
    0xb555_e101_e101_0100,
    0xdaaa_f080_f080_8080,
    0x6d55_7840_7840_4040,
    0x36aa_bc20_3c20_2020,
    0x1b55_5e10_1e10_1010,
    0x0daa_af08_0f08_0808,
    0x06d5_5784_0784_0404,
    0x036a_abc2_03c2_0202,
    0x81b5_55e1_01e1_0101,
];

pub const R3_FC: [u32; 23] = [
    0x0,
    0x20_0000,
    0x10_0000,
    0x08_0000,
    0x0,
    0x02_0000,
    0x01_0000,
    0x8000,
    0x4000,
    0x20_2000,
    0x10_1000,
    0x08_0800,
    0x04_0400,
    0x02_0200,
    0x01_0100,
    0x8080,
    0x4040,
    0x20_2020,
    0x10_1010,
    0x08_0808,
    0x04_0404,
    0x02_0202,
    0x21_0101,
];
