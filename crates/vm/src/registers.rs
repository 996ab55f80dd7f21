use crate::fault::Fault;
use crate::global::Config;

/// General-purpose register file, R0..R15.
///
/// Every access is bounds-checked and reports `Fault::RegisterOutOfRange`
/// instead of panicking, so a bad operand can be skipped by the CPU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [u32; Config::REGISTER_COUNT],
}

impl RegisterFile {
    pub fn new() -> Self {
        Self {
            regs: [0; Config::REGISTER_COUNT],
        }
    }

    pub const fn len(&self) -> usize {
        Config::REGISTER_COUNT
    }

    /// Confirms `index` names a register, returning it as a slot index.
    pub fn check(&self, index: u32) -> Result<usize, Fault> {
        let slot = index as usize;
        if slot < self.regs.len() {
            Ok(slot)
        } else {
            Err(Fault::RegisterOutOfRange(index))
        }
    }

    pub fn read(&self, index: u32) -> Result<u32, Fault> {
        let slot = self.check(index)?;
        Ok(self.regs[slot])
    }

    pub fn write(&mut self, index: u32, value: u32) -> Result<(), Fault> {
        let slot = self.check(index)?;
        self.regs[slot] = value;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.regs = [0; Config::REGISTER_COUNT];
    }

    pub fn snapshot(&self) -> [u32; Config::REGISTER_COUNT] {
        self.regs
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}
