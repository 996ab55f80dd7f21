use types::Instruction;

use crate::fault::Fault;

/// Pluggable diagnostics sink. The VM reports what it executes and every
/// instruction it had to skip, without changing its own behaviour.
/// All methods default to no-op.
///
/// `pc` is always the index of the instruction being executed, not the
/// already-advanced program counter.
pub trait Diagnostics: std::fmt::Debug {
    /// Called after fetch, before the instruction runs.
    fn on_instruction(&mut self, _pc: u32, _instr: &Instruction) {}

    /// Called when a JMP transfers control.
    fn on_jump(&mut self, _from: u32, _to: u32) {}

    /// Called when an instruction was skipped or degraded: bad register or
    /// memory operand, bad addressing mode, out-of-range jump, CMP on
    /// invalid registers, division by zero.
    fn on_fault(&mut self, _pc: u32, _instr: &Instruction, _fault: &Fault) {}

    /// Called when HALT executes.
    fn on_halt(&mut self, _pc: u32) {}
}

/// Default sink: discards everything.
#[derive(Debug, Default)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {}

/// Verbose trace to the console: instructions on stdout, faults on stderr.
#[derive(Debug, Default)]
pub struct ConsoleDiagnostics;

impl Diagnostics for ConsoleDiagnostics {
    fn on_instruction(&mut self, pc: u32, instr: &Instruction) {
        println!("PC = 0x{:08x}, Instr = {}", pc, instr.pretty_print());
    }

    fn on_jump(&mut self, from: u32, to: u32) {
        println!("Jumping from 0x{:08x} to 0x{:08x}", from, to);
    }

    fn on_fault(&mut self, pc: u32, instr: &Instruction, fault: &Fault) {
        eprintln!("🚨 {} at PC = 0x{:08x} ({})", fault, pc, instr.pretty_print());
    }

    fn on_halt(&mut self, pc: u32) {
        println!("HALT at PC = 0x{:08x}", pc);
    }
}
