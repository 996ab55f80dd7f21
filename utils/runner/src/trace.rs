use std::cell::RefCell;
use std::rc::Rc;

use colored::*;
use serde::Serialize;
use types::Instruction;
use vm::{Diagnostics, Fault};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEntry {
    Instruction { pc: u32, instr: String },
    Jump { from: u32, to: u32 },
    Fault { pc: u32, instr: String, fault: String },
    Halt { pc: u32 },
}

pub type TraceLog = Rc<RefCell<Vec<TraceEntry>>>;

/// Diagnostics sink for the driver.
///
/// Faults and HALT are always recorded. Executed instructions and jumps are
/// only recorded with `--trace`, since a long run would otherwise keep one
/// entry per step.
#[derive(Debug)]
pub struct TraceRecorder {
    log: TraceLog,
    verbose: bool,
}

impl TraceRecorder {
    pub fn new(verbose: bool) -> (Self, TraceLog) {
        let log = TraceLog::default();
        let recorder = Self {
            log: Rc::clone(&log),
            verbose,
        };
        (recorder, log)
    }
}

impl Diagnostics for TraceRecorder {
    fn on_instruction(&mut self, pc: u32, instr: &Instruction) {
        if self.verbose {
            self.log.borrow_mut().push(TraceEntry::Instruction {
                pc,
                instr: instr.pretty_print(),
            });
        }
    }

    fn on_jump(&mut self, from: u32, to: u32) {
        if self.verbose {
            self.log.borrow_mut().push(TraceEntry::Jump { from, to });
        }
    }

    fn on_fault(&mut self, pc: u32, instr: &Instruction, fault: &Fault) {
        self.log.borrow_mut().push(TraceEntry::Fault {
            pc,
            instr: instr.pretty_print(),
            fault: fault.to_string(),
        });
    }

    fn on_halt(&mut self, pc: u32) {
        self.log.borrow_mut().push(TraceEntry::Halt { pc });
    }
}

pub fn print_trace(entries: &[TraceEntry]) {
    for entry in entries {
        match entry {
            TraceEntry::Instruction { pc, instr } => {
                println!("  {} {}", format!("[{:04}]", pc).dimmed(), instr);
            }
            TraceEntry::Jump { from, to } => {
                println!("  {}", format!("       ↪ jump {} -> {}", from, to).cyan());
            }
            TraceEntry::Fault { pc, instr, fault } => {
                println!("  {} {} {}", format!("[{:04}]", pc).dimmed(), instr, format!("⚠️  {}", fault).yellow());
            }
            TraceEntry::Halt { pc } => {
                println!("  {}", format!("       ⏹ HALT at {}", pc).green());
            }
        }
    }
}
