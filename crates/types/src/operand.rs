use core::fmt;

use crate::error::DecodeError;

/// How LOAD interprets its `src1` operand. Selected by the `src2` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum AddressingMode {
    /// `src1` is a data-memory address: R[dst] = memory[src1]
    Direct = 0,
    /// `src1` is a register holding the address: R[dst] = memory[R[src1]]
    Indirect = 1,
    /// `src1` is the value itself: R[dst] = src1
    Immediate = 2,
}

impl TryFrom<u32> for AddressingMode {
    type Error = DecodeError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(AddressingMode::Direct),
            1 => Ok(AddressingMode::Indirect),
            2 => Ok(AddressingMode::Immediate),
            other => Err(DecodeError::UnknownAddressingMode(other)),
        }
    }
}

impl From<AddressingMode> for u32 {
    fn from(mode: AddressingMode) -> u32 {
        mode as u32
    }
}

/// Status flags, numbered the way CHECK_FLAG addresses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Flag {
    /// ZF: last CMP found its operands equal
    Zero = 0,
    /// CF: ADD carried out of 32 bits, or SUB borrowed
    Carry = 1,
    /// NF: bit 31 of the last arithmetic result
    Negative = 2,
    /// OF: MUL product did not fit in 32 bits
    Overflow = 3,
    /// DF: DIV by zero
    DivisionFault = 4,
}

impl Flag {
    pub const ALL: [Flag; 5] = [
        Flag::Zero,
        Flag::Carry,
        Flag::Negative,
        Flag::Overflow,
        Flag::DivisionFault,
    ];

    pub fn short_name(self) -> &'static str {
        match self {
            Flag::Zero => "ZF",
            Flag::Carry => "CF",
            Flag::Negative => "NF",
            Flag::Overflow => "OF",
            Flag::DivisionFault => "DF",
        }
    }
}

impl TryFrom<u32> for Flag {
    type Error = DecodeError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Flag::ALL
            .get(raw as usize)
            .copied()
            .ok_or(DecodeError::UnknownFlag(raw))
    }
}

impl From<Flag> for u32 {
    fn from(flag: Flag) -> u32 {
        flag as u32
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}
