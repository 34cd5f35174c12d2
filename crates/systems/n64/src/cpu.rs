//! Register file and the flavor-text ALU.
//!
//! None of this executes code. Two registers are picked, combined with one of
//! ten operations, and the result is written back so the next pick has
//! something to chew on.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Registers shown in CPU activity lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum Register {
    PC,
    R1,
    R2,
    R3,
    R4,
    FLAGS,
    SP,
    RA,
}

impl Register {
    pub const ALL: [Register; 8] = [
        Register::PC,
        Register::R1,
        Register::R2,
        Register::R3,
        Register::R4,
        Register::FLAGS,
        Register::SP,
        Register::RA,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Register::PC => "PC",
            Register::R1 => "R1",
            Register::R2 => "R2",
            Register::R3 => "R3",
            Register::R4 => "R4",
            Register::FLAGS => "FLAGS",
            Register::SP => "SP",
            Register::RA => "RA",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Register values, all zero at power-on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterFile {
    values: [i64; 8],
}

impl RegisterFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, reg: Register) -> i64 {
        self.values[reg.index()]
    }

    pub fn set(&mut self, reg: Register, value: i64) {
        self.values[reg.index()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Register, i64)> + '_ {
        Register::ALL.iter().map(move |&r| (r, self.get(r)))
    }
}

impl Serialize for RegisterFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Register::ALL.len()))?;
        for (reg, value) in self.iter() {
            map.serialize_entry(reg.name(), &value)?;
        }
        map.end()
    }
}

/// Operations the CPU activity step can pick from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuOp {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    Rol,
}

impl CpuOp {
    pub const ALL: [CpuOp; 10] = [
        CpuOp::Add,
        CpuOp::Sub,
        CpuOp::Mul,
        CpuOp::Div,
        CpuOp::And,
        CpuOp::Or,
        CpuOp::Xor,
        CpuOp::Shl,
        CpuOp::Shr,
        CpuOp::Rol,
    ];

    pub fn mnemonic(self) -> &'static str {
        match self {
            CpuOp::Add => "ADD",
            CpuOp::Sub => "SUB",
            CpuOp::Mul => "MUL",
            CpuOp::Div => "DIV",
            CpuOp::And => "AND",
            CpuOp::Or => "OR",
            CpuOp::Xor => "XOR",
            CpuOp::Shl => "SHL",
            CpuOp::Shr => "SHR",
            CpuOp::Rol => "ROL",
        }
    }

    /// Combine `x` and `y`. Returns `None` only for a division by zero.
    ///
    /// Arithmetic wraps at 64 bits. Division rounds toward negative infinity.
    /// Shift amounts are taken modulo 32, and ROL is a 32-bit rotate.
    pub fn apply(self, x: i64, y: i64) -> Option<i64> {
        let shift = y.rem_euclid(32) as u32;
        let value = match self {
            CpuOp::Add => x.wrapping_add(y),
            CpuOp::Sub => x.wrapping_sub(y),
            CpuOp::Mul => x.wrapping_mul(y),
            CpuOp::Div => {
                if y == 0 {
                    return None;
                }
                floor_div(x, y)
            }
            CpuOp::And => x & y,
            CpuOp::Or => x | y,
            CpuOp::Xor => x ^ y,
            CpuOp::Shl => x.wrapping_shl(shift),
            CpuOp::Shr => x >> shift,
            CpuOp::Rol => (x.wrapping_shl(shift) | (x >> (32 - shift))) & 0xFFFF_FFFF,
        };
        Some(value)
    }
}

impl fmt::Display for CpuOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

fn floor_div(x: i64, y: i64) -> i64 {
    let q = x.wrapping_div(y);
    if x.wrapping_rem(y) != 0 && ((x < 0) != (y < 0)) {
        q - 1
    } else {
        q
    }
}

/// Signed hex with a `0x` prefix, e.g. `-0x1f`
pub fn format_hex(value: i64) -> String {
    if value < 0 {
        format!("-{:#x}", value.unsigned_abs())
    } else {
        format!("{:#x}", value)
    }
}

/// One CPU activity pick. `result` is `None` when the op was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuEvent {
    pub op: CpuOp,
    pub dst: Register,
    pub src: Register,
    pub result: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registers_start_at_zero() {
        let regs = RegisterFile::new();
        assert!(regs.iter().all(|(_, v)| v == 0));
        assert_eq!(regs.iter().count(), 8);
    }

    #[test]
    fn test_register_set_get() {
        let mut regs = RegisterFile::new();
        regs.set(Register::SP, 0xFFFF);
        assert_eq!(regs.get(Register::SP), 0xFFFF);
        assert_eq!(regs.get(Register::RA), 0);
    }

    #[test]
    fn test_register_file_serializes_by_name() {
        let mut regs = RegisterFile::new();
        regs.set(Register::R3, -4);
        let v = serde_json::to_value(&regs).unwrap();
        assert_eq!(v["R3"], -4);
        assert_eq!(v["FLAGS"], 0);
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(CpuOp::Add.apply(3, 4), Some(7));
        assert_eq!(CpuOp::Sub.apply(3, 4), Some(-1));
        assert_eq!(CpuOp::Mul.apply(-3, 4), Some(-12));
        assert_eq!(CpuOp::Add.apply(i64::MAX, 1), Some(i64::MIN));
    }

    #[test]
    fn test_div_floors_and_skips_zero() {
        assert_eq!(CpuOp::Div.apply(10, 0), None);
        assert_eq!(CpuOp::Div.apply(7, 2), Some(3));
        assert_eq!(CpuOp::Div.apply(-7, 2), Some(-4));
        assert_eq!(CpuOp::Div.apply(7, -2), Some(-4));
        assert_eq!(CpuOp::Div.apply(-8, 2), Some(-4));
        assert_eq!(CpuOp::Div.apply(i64::MIN, -1), Some(i64::MIN));
    }

    #[test]
    fn test_bitwise() {
        assert_eq!(CpuOp::And.apply(0b1100, 0b1010), Some(0b1000));
        assert_eq!(CpuOp::Or.apply(0b1100, 0b1010), Some(0b1110));
        assert_eq!(CpuOp::Xor.apply(0b1100, 0b1010), Some(0b0110));
    }

    #[test]
    fn test_shifts_use_amount_mod_32() {
        assert_eq!(CpuOp::Shl.apply(1, 4), Some(16));
        assert_eq!(CpuOp::Shl.apply(1, 36), Some(16));
        assert_eq!(CpuOp::Shr.apply(256, 4), Some(16));
        assert_eq!(CpuOp::Shr.apply(-16, 2), Some(-4));
        // -1 mod 32 is 31
        assert_eq!(CpuOp::Shl.apply(1, -1), Some(1 << 31));
    }

    #[test]
    fn test_rol_is_32_bit() {
        assert_eq!(CpuOp::Rol.apply(0x8000_0001, 1), Some(0x0000_0003));
        assert_eq!(CpuOp::Rol.apply(0x1234, 0), Some(0x1234));
        // Bits above 32 fold back in, then get masked off
        assert_eq!(CpuOp::Rol.apply(0x1_0000_1234, 0), Some(0x1235));
    }

    #[test]
    fn test_format_hex() {
        assert_eq!(format_hex(0), "0x0");
        assert_eq!(format_hex(255), "0xff");
        assert_eq!(format_hex(-31), "-0x1f");
    }
}
