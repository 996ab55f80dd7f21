use core::fmt;

use crate::opcode::Opcode;
use crate::operand::{AddressingMode, Flag};

/// A single machine instruction.
///
/// All instructions share one shape: an opcode plus three unsigned 32-bit
/// operands. What an operand means (register index, data-memory address,
/// literal, jump target) depends on the opcode:
///
/// | opcode       | dst            | src1               | src2            |
/// |--------------|----------------|--------------------|-----------------|
/// | `LOAD`       | register       | addr / reg / value | addressing mode |
/// | `STORE`      | memory address | register           | unused          |
/// | `ADD`..`DIV` | register       | register           | register        |
/// | `CMP`        | unused         | register           | register        |
/// | `JMP`        | target index   | 0 = always, 1 = ZF | unused          |
/// | `MOV`        | register       | register           | unused          |
/// | `CHECK_FLAG` | register       | flag index         | unused          |
///
/// Nothing is validated here. Programs are plain data; the engine decides
/// at execution time whether an operand is usable.
///
/// The position of an instruction in its program is its address, and jump
/// targets are absolute positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub dst: u32,
    pub src1: u32,
    pub src2: u32,
}

impl Instruction {
    pub const fn new(opcode: Opcode, dst: u32, src1: u32, src2: u32) -> Self {
        Self { opcode, dst, src1, src2 }
    }

    pub const fn halt() -> Self {
        Self::new(Opcode::Halt, 0, 0, 0)
    }

    /// R[dst] = memory[addr]
    pub const fn load_direct(dst: u32, addr: u32) -> Self {
        Self::new(Opcode::Load, dst, addr, AddressingMode::Direct as u32)
    }

    /// R[dst] = memory[R[reg]]
    pub const fn load_indirect(dst: u32, reg: u32) -> Self {
        Self::new(Opcode::Load, dst, reg, AddressingMode::Indirect as u32)
    }

    /// R[dst] = value
    pub const fn load_immediate(dst: u32, value: u32) -> Self {
        Self::new(Opcode::Load, dst, value, AddressingMode::Immediate as u32)
    }

    /// memory[addr] = R[src]
    pub const fn store(addr: u32, src: u32) -> Self {
        Self::new(Opcode::Store, addr, src, 0)
    }

    pub const fn add(dst: u32, lhs: u32, rhs: u32) -> Self {
        Self::new(Opcode::Add, dst, lhs, rhs)
    }

    pub const fn sub(dst: u32, lhs: u32, rhs: u32) -> Self {
        Self::new(Opcode::Sub, dst, lhs, rhs)
    }

    pub const fn mul(dst: u32, lhs: u32, rhs: u32) -> Self {
        Self::new(Opcode::Mul, dst, lhs, rhs)
    }

    pub const fn div(dst: u32, lhs: u32, rhs: u32) -> Self {
        Self::new(Opcode::Div, dst, lhs, rhs)
    }

    pub const fn cmp(lhs: u32, rhs: u32) -> Self {
        Self::new(Opcode::Cmp, 0, lhs, rhs)
    }

    pub const fn jmp(target: u32) -> Self {
        Self::new(Opcode::Jmp, target, 0, 0)
    }

    /// Jump to `target` if the last CMP set ZF.
    pub const fn jmp_if_equal(target: u32) -> Self {
        Self::new(Opcode::Jmp, target, 1, 0)
    }

    pub const fn mov(dst: u32, src: u32) -> Self {
        Self::new(Opcode::Mov, dst, src, 0)
    }

    pub const fn check_flag(dst: u32, flag: Flag) -> Self {
        Self::new(Opcode::CheckFlag, dst, flag as u32, 0)
    }

    pub fn pretty_print(&self) -> String {
        fn reg(r: u32) -> String {
            format!("r{}", r)
        }

        let Instruction { opcode, dst, src1, src2 } = *self;
        match opcode {
            Opcode::Halt => "halt".to_string(),
            Opcode::Load => match AddressingMode::try_from(src2) {
                Ok(AddressingMode::Direct) => format!("load  {}, [{}]", reg(dst), src1),
                Ok(AddressingMode::Indirect) => format!("load  {}, [{}]", reg(dst), reg(src1)),
                Ok(AddressingMode::Immediate) => format!("load  {}, #{}", reg(dst), src1),
                Err(_) => format!("load  {}, {} (mode {}?)", reg(dst), src1, src2),
            },
            Opcode::Store => format!("store [{}], {}", dst, reg(src1)),
            Opcode::Add => format!("add   {}, {}, {}", reg(dst), reg(src1), reg(src2)),
            Opcode::Sub => format!("sub   {}, {}, {}", reg(dst), reg(src1), reg(src2)),
            Opcode::Mul => format!("mul   {}, {}, {}", reg(dst), reg(src1), reg(src2)),
            Opcode::Div => format!("div   {}, {}, {}", reg(dst), reg(src1), reg(src2)),
            Opcode::Cmp => format!("cmp   {}, {}", reg(src1), reg(src2)),
            Opcode::Jmp => match src1 {
                0 => format!("jmp   {}", dst),
                1 => format!("jeq   {}", dst),
                cond => format!("jmp   {} (cond {}?)", dst, cond),
            },
            Opcode::Mov => format!("mov   {}, {}", reg(dst), reg(src1)),
            Opcode::CheckFlag => match Flag::try_from(src1) {
                Ok(flag) => format!("flag  {}, {}", reg(dst), flag),
                Err(_) => format!("flag  {}, {}?", reg(dst), src1),
            },
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty_print())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_fill_operands_without_validation() {
        assert_eq!(
            Instruction::load_indirect(4, 99),
            Instruction::new(Opcode::Load, 4, 99, 1)
        );
        assert_eq!(
            Instruction::check_flag(5, Flag::Carry),
            Instruction::new(Opcode::CheckFlag, 5, 1, 0)
        );
        assert_eq!(Instruction::jmp_if_equal(7), Instruction::new(Opcode::Jmp, 7, 1, 0));
        // out-of-range operands are fine to build
        let wild = Instruction::add(1000, 2000, 3000);
        assert_eq!(wild.dst, 1000);
    }

    #[test]
    fn pretty_print_shows_addressing_mode() {
        assert_eq!(Instruction::load_direct(0, 100).pretty_print(), "load  r0, [100]");
        assert_eq!(Instruction::load_indirect(4, 0).pretty_print(), "load  r4, [r0]");
        assert_eq!(Instruction::load_immediate(2, 1).pretty_print(), "load  r2, #1");
        assert_eq!(Instruction::store(102, 2).to_string(), "store [102], r2");
        assert_eq!(Instruction::jmp_if_equal(11).to_string(), "jeq   11");
    }
}
