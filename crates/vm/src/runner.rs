use crate::vm::{ExecState, VM};

/// Why a bounded run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// HALT executed or the program ran out.
    Halted,
    /// `max_steps` instructions executed and the machine is still ready.
    StepLimit,
}

impl VM {
    /// Like `run`, but gives up after `max_steps` instructions.
    pub fn run_with_limit(&mut self, max_steps: u64) -> RunOutcome {
        for _ in 0..max_steps {
            if !self.step() {
                return RunOutcome::Halted;
            }
        }
        match self.state() {
            ExecState::Halted => RunOutcome::Halted,
            ExecState::Ready => RunOutcome::StepLimit,
        }
    }

    pub fn dump_registers(&self) -> String {
        let mut out = String::from("Registers:\n");
        for (i, val) in self.registers().iter().enumerate() {
            out.push_str(&format!("r{:02} = 0x{:08x} ({})\n", i, val, val));
        }
        out.push_str(&format!("pc  = {}\n", self.pc()));
        out.push_str(&format!("flags: {}\n", self.status_register()));
        out
    }

    /// Render cells `[start, end)`, eight per line. Returns None when the
    /// range does not fit in data memory.
    pub fn dump_memory(&self, start: usize, end: usize) -> Option<String> {
        let cells = self.memory.mem_slice(start, end)?;
        let mut out = String::from("--- Memory Dump ---\n");
        for (row, chunk) in cells.chunks(8).enumerate() {
            let words: Vec<String> = chunk.iter().map(|w| format!("{:08x}", w)).collect();
            out.push_str(&format!("{:08x}  {}\n", start + row * 8, words.join(" ")));
        }
        out.push_str("-------------------\n");
        Some(out)
    }
}
