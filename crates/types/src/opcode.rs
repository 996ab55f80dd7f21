use core::fmt;
use core::str::FromStr;

use crate::error::DecodeError;

/// The closed set of operations the machine understands.
///
/// Every instruction shares the same three-operand shape, so the opcode is
/// the only thing that decides how `dst`, `src1` and `src2` are read:
///
/// - MEMORY: `Load`, `Store`
/// - ARITHMETIC: `Add`, `Sub`, `Mul`, `Div` (these own the status flags)
/// - COMPARE: `Cmp` (owns the zero flag)
/// - CONTROL FLOW: `Jmp`, `Halt`
/// - REGISTER: `Mov`, `CheckFlag`
///
/// The numeric tag is the declaration order and is stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Opcode {
    /// Stop execution.
    Halt = 0,
    /// dst = value selected by the addressing mode in `src2`.
    Load = 1,
    /// memory[dst] = R[src1]
    Store = 2,
    /// R[dst] = R[src1] + R[src2]
    Add = 3,
    /// R[dst] = R[src1] - R[src2]
    Sub = 4,
    /// R[dst] = R[src1] * R[src2]
    Mul = 5,
    /// R[dst] = R[src1] / R[src2]
    Div = 6,
    /// ZF = R[src1] == R[src2]
    Cmp = 7,
    /// Jump to `dst`, unconditionally (`src1 == 0`) or if ZF (`src1 == 1`).
    Jmp = 8,
    /// R[dst] = R[src1]
    Mov = 9,
    /// R[dst] = flag[src1]
    CheckFlag = 10,
}

impl Opcode {
    pub const ALL: [Opcode; 11] = [
        Opcode::Halt,
        Opcode::Load,
        Opcode::Store,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Div,
        Opcode::Cmp,
        Opcode::Jmp,
        Opcode::Mov,
        Opcode::CheckFlag,
    ];

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Halt => "HALT",
            Opcode::Load => "LOAD",
            Opcode::Store => "STORE",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::Div => "DIV",
            Opcode::Cmp => "CMP",
            Opcode::Jmp => "JMP",
            Opcode::Mov => "MOV",
            Opcode::CheckFlag => "CHECK_FLAG",
        }
    }
}

impl TryFrom<u32> for Opcode {
    type Error = DecodeError;

    fn try_from(tag: u32) -> Result<Self, Self::Error> {
        Opcode::ALL
            .get(tag as usize)
            .copied()
            .ok_or(DecodeError::UnknownOpcode(tag))
    }
}

impl From<Opcode> for u32 {
    fn from(op: Opcode) -> u32 {
        op as u32
    }
}

impl FromStr for Opcode {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Opcode::ALL
            .iter()
            .copied()
            .find(|op| op.mnemonic() == upper)
            .ok_or_else(|| DecodeError::UnknownMnemonic(s.trim().to_string()))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
