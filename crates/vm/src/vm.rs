use std::mem;

use types::Instruction;

use crate::cpu::CPU;
use crate::diagnostics::{Diagnostics, NoopDiagnostics};
use crate::global::Config;
use crate::memory::DataMemory;
use crate::status::StatusRegister;

/// Where the machine is in its lifecycle.
///
/// A freshly loaded or reset machine is `Ready` at counter 0 (unless the
/// program is empty). It becomes `Halted` when HALT runs or the counter
/// walks off the end of the program, and only `load_program`/`reset` bring
/// it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecState {
    Ready,
    Halted,
}

/// The whole machine: CPU, program memory, data memory and the
/// diagnostics sink. One instance per concurrent run; nothing is shared
/// between instances.
#[derive(Debug)]
pub struct VM {
    pub(crate) cpu: CPU,
    pub(crate) program: Vec<Instruction>,
    pub(crate) memory: DataMemory,
    program_capacity: usize,
    diagnostics: Box<dyn Diagnostics>,
}

impl VM {
    /// `program_size` is informational only and allocates nothing; the
    /// loaded program decides the real length. `data_size` fixes the data
    /// memory for good.
    pub fn new(program_size: usize, data_size: usize) -> Self {
        Self::with_diagnostics(program_size, data_size, Box::new(NoopDiagnostics))
    }

    pub fn with_diagnostics(
        program_size: usize,
        data_size: usize,
        diagnostics: Box<dyn Diagnostics>,
    ) -> Self {
        Self {
            cpu: CPU::new(),
            program: Vec::new(),
            memory: DataMemory::new(data_size),
            program_capacity: program_size,
            diagnostics,
        }
    }

    /// Swap the diagnostics sink, returning the previous one.
    pub fn set_diagnostics(&mut self, diagnostics: Box<dyn Diagnostics>) -> Box<dyn Diagnostics> {
        mem::replace(&mut self.diagnostics, diagnostics)
    }

    /// Replace the program and reset counter, registers and flags.
    /// Data memory is left as it is.
    pub fn load_program(&mut self, program: &[Instruction]) {
        self.program.clear();
        self.program.extend_from_slice(program);
        self.cpu.reset();
    }

    /// Zero counter, registers and flags. The program and data memory are
    /// untouched.
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Run until HALT or until the counter leaves the program.
    ///
    /// There is no step limit: a program that loops forever keeps this call
    /// busy forever. See `run_with_limit` for a bounded run.
    pub fn run(&mut self) {
        while self.step() {}
    }

    /// Execute a single instruction. Returns false once the machine is
    /// halted.
    pub fn step(&mut self) -> bool {
        self.cpu
            .step(&self.program, &mut self.memory, self.diagnostics.as_mut())
    }

    pub fn state(&self) -> ExecState {
        if (self.cpu.pc() as usize) < self.program.len() {
            ExecState::Ready
        } else {
            ExecState::Halted
        }
    }

    /// Out-of-range addresses are ignored.
    pub fn set_memory_value(&mut self, address: u32, value: u32) {
        let _ = self.memory.store(address, value);
    }

    /// Out-of-range addresses read as 0.
    pub fn get_memory_value(&self, address: u32) -> u32 {
        self.memory.load(address).unwrap_or(0)
    }

    /// A copy of the flags; changing it does not affect the machine.
    pub fn status_register(&self) -> StatusRegister {
        self.cpu.status()
    }

    pub fn pc(&self) -> u32 {
        self.cpu.pc()
    }

    pub fn registers(&self) -> [u32; Config::REGISTER_COUNT] {
        self.cpu.registers()
    }

    pub fn program(&self) -> &[Instruction] {
        &self.program
    }

    pub fn program_capacity(&self) -> usize {
        self.program_capacity
    }

    pub fn data_size(&self) -> usize {
        self.memory.size()
    }

    /// Instructions executed since the last load or reset.
    pub fn steps_executed(&self) -> u64 {
        self.cpu.steps
    }
}

impl Default for VM {
    fn default() -> Self {
        Self::new(Config::DEFAULT_PROGRAM_SIZE, Config::DEFAULT_DATA_SIZE)
    }
}
