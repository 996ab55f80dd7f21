use types::{AddressingMode, Instruction, Opcode};

use crate::diagnostics::Diagnostics;
use crate::fault::Fault;
use crate::global::Config;
use crate::memory::DataMemory;
use crate::registers::RegisterFile;
use crate::status::StatusRegister;

/// What the dispatcher should do with the program counter once an
/// instruction has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Next,
    Jump(u32),
    Halt,
}

/// The execution core: program counter, register file and status register.
///
/// The CPU does not own the program or data memory; the `VM` lends them to
/// `step` on each cycle, the same way it lends the diagnostics sink.
///
/// FAILURE MODEL: nothing in here panics or returns an error to the caller.
/// Each opcode handler returns `Result<Control, Fault>`, where a `Fault`
/// means "this instruction had no effect". `step` reports the fault and
/// moves on to the next instruction.
#[derive(Debug, Clone, Default)]
pub struct CPU {
    /// Index of the next instruction to fetch.
    pub(crate) pc: u32,
    pub(crate) regs: RegisterFile,
    pub(crate) status: StatusRegister,
    /// Instructions fetched since the last load/reset.
    pub(crate) steps: u64,
}

impl CPU {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero counter, registers and flags.
    pub fn reset(&mut self) {
        self.pc = 0;
        self.regs.clear();
        self.status.clear();
        self.steps = 0;
    }

    pub fn pc(&self) -> u32 {
        self.pc
    }

    pub fn status(&self) -> StatusRegister {
        self.status
    }

    pub fn registers(&self) -> [u32; Config::REGISTER_COUNT] {
        self.regs.snapshot()
    }

    /// Executes a single fetch-decode-execute cycle.
    ///
    /// 1. If the counter is past the end of the program there is nothing to
    ///    do and the machine is halted.
    /// 2. Fetch the instruction and advance the counter, so during execution
    ///    the counter already points one past the current instruction.
    /// 3. Dispatch on the opcode.
    /// 4. HALT parks the counter at the program length.
    ///
    /// Returns true while there is more to execute.
    pub fn step(
        &mut self,
        program: &[Instruction],
        memory: &mut DataMemory,
        diag: &mut dyn Diagnostics,
    ) -> bool {
        let at = self.pc;
        let Some(&instr) = program.get(at as usize) else {
            return false;
        };
        self.pc = at.wrapping_add(1);
        self.steps += 1;
        diag.on_instruction(at, &instr);

        match self.execute(&instr, at, program.len(), memory, diag) {
            Ok(Control::Next) => {}
            Ok(Control::Jump(target)) => {
                diag.on_jump(at, target);
                self.pc = target;
            }
            Ok(Control::Halt) => {
                self.pc = u32::try_from(program.len()).unwrap_or(u32::MAX);
                diag.on_halt(at);
                return false;
            }
            Err(fault) => diag.on_fault(at, &instr, &fault),
        }

        (self.pc as usize) < program.len()
    }

    fn execute(
        &mut self,
        instr: &Instruction,
        at: u32,
        program_len: usize,
        memory: &mut DataMemory,
        diag: &mut dyn Diagnostics,
    ) -> Result<Control, Fault> {
        let Instruction { opcode, dst, src1, src2 } = *instr;
        match opcode {
            Opcode::Halt => return Ok(Control::Halt),
            Opcode::Load => self.load(dst, src1, src2, memory)?,
            Opcode::Store => {
                // memory[dst] = R[src1]
                let value = self.regs.read(src1)?;
                memory.store(dst, value)?;
            }
            Opcode::Add => {
                // Widen to 64 bits so the carry out of bit 31 is visible.
                let (a, b) = self.operands(dst, src1, src2)?;
                let wide = a as u64 + b as u64;
                let result = wide as u32;
                self.regs.write(dst, result)?;
                self.status.set_carry(wide > u32::MAX as u64);
                self.status.set_negative(sign_bit(result));
            }
            Opcode::Sub => {
                // Wraps like two's-complement subtraction; CF records the borrow.
                let (a, b) = self.operands(dst, src1, src2)?;
                let result = a.wrapping_sub(b);
                self.regs.write(dst, result)?;
                self.status.set_carry(a < b);
                self.status.set_negative(sign_bit(result));
            }
            Opcode::Mul => {
                let (a, b) = self.operands(dst, src1, src2)?;
                let wide = a as u64 * b as u64;
                let result = wide as u32;
                self.regs.write(dst, result)?;
                self.status.set_overflow(wide > u32::MAX as u64);
                self.status.set_negative(sign_bit(result));
            }
            Opcode::Div => {
                let (dividend, divisor) = self.operands(dst, src1, src2)?;
                // Unsigned division neither overflows nor carries.
                self.status.set_overflow(false);
                self.status.set_carry(false);
                if divisor == 0 {
                    // R[dst] keeps its old value.
                    self.status.set_division_fault(true);
                    diag.on_fault(at, instr, &Fault::DivisionByZero);
                } else {
                    let quotient = dividend / divisor;
                    self.regs.write(dst, quotient)?;
                    self.status.set_division_fault(false);
                    self.status.set_negative(sign_bit(quotient));
                }
            }
            Opcode::Cmp => {
                // An invalid operand compares as "not equal" rather than
                // leaving ZF alone.
                let pair = self
                    .regs
                    .read(src1)
                    .and_then(|a| self.regs.read(src2).map(|b| (a, b)));
                match pair {
                    Ok((a, b)) => self.status.set_zero(a == b),
                    Err(fault) => {
                        self.status.set_zero(false);
                        diag.on_fault(at, instr, &fault);
                    }
                }
            }
            Opcode::Jmp => {
                // dst is an absolute instruction index.
                if dst as usize >= program_len {
                    return Err(Fault::JumpOutOfRange { target: dst, len: program_len });
                }
                let taken = match src1 {
                    0 => true,
                    1 => self.status.zero(),
                    _ => false,
                };
                if taken {
                    return Ok(Control::Jump(dst));
                }
            }
            Opcode::Mov => {
                let value = self.regs.read(src1)?;
                self.regs.write(dst, value)?;
            }
            Opcode::CheckFlag => {
                self.regs.check(dst)?;
                let value = self.status.read_index(src1);
                self.regs.write(dst, value)?;
            }
        }
        Ok(Control::Next)
    }

    /// LOAD with the addressing mode selected by `src2`.
    fn load(&mut self, dst: u32, src1: u32, src2: u32, memory: &DataMemory) -> Result<(), Fault> {
        self.regs.check(dst)?;
        let mode = AddressingMode::try_from(src2).map_err(|_| Fault::InvalidAddressingMode(src2))?;
        let value = match mode {
            AddressingMode::Direct => memory.load(src1)?,
            AddressingMode::Indirect => {
                let addr = self.regs.read(src1)?;
                memory.load(addr)?
            }
            AddressingMode::Immediate => src1,
        };
        self.regs.write(dst, value)
    }

    /// Validates a three-register instruction and reads both sources.
    /// Nothing is written unless all three indices are usable.
    fn operands(&self, dst: u32, src1: u32, src2: u32) -> Result<(u32, u32), Fault> {
        self.regs.check(dst)?;
        Ok((self.regs.read(src1)?, self.regs.read(src2)?))
    }
}

fn sign_bit(value: u32) -> bool {
    value >> 31 == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::NoopDiagnostics;

    fn run(cpu: &mut CPU, program: &[Instruction], memory: &mut DataMemory) {
        let mut diag = NoopDiagnostics;
        while cpu.step(program, memory, &mut diag) {}
    }

    #[test]
    fn step_advances_pc_before_execute() {
        let program = [Instruction::load_immediate(0, 5), Instruction::halt()];
        let mut memory = DataMemory::new(4);
        let mut cpu = CPU::new();
        let mut diag = NoopDiagnostics;

        assert!(cpu.step(&program, &mut memory, &mut diag));
        assert_eq!(cpu.pc(), 1);
        assert_eq!(cpu.registers()[0], 5);

        assert!(!cpu.step(&program, &mut memory, &mut diag));
        assert_eq!(cpu.pc(), 2);
        assert_eq!(cpu.steps, 2);
    }

    #[test]
    fn step_on_empty_program_does_nothing() {
        let mut memory = DataMemory::new(4);
        let mut cpu = CPU::new();
        assert!(!cpu.step(&[], &mut memory, &mut NoopDiagnostics));
        assert_eq!(cpu.pc(), 0);
        assert_eq!(cpu.steps, 0);
    }

    #[test]
    fn invalid_destination_leaves_flags_alone() {
        let program = [
            Instruction::load_immediate(0, u32::MAX),
            Instruction::load_immediate(1, 1),
            Instruction::add(16, 0, 1),
        ];
        let mut memory = DataMemory::new(4);
        let mut cpu = CPU::new();
        run(&mut cpu, &program, &mut memory);
        assert_eq!(cpu.status(), StatusRegister::default());
    }

    #[test]
    fn sign_bit_reads_bit_31() {
        assert!(sign_bit(0x8000_0000));
        assert!(!sign_bit(0x7FFF_FFFF));
    }
}
