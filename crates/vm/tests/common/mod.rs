use std::cell::RefCell;
use std::rc::Rc;

use vm::types::Instruction;
use vm::{Diagnostics, Fault, VM};

#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(dead_code)]
pub enum Event {
    Instruction(u32),
    Jump(u32, u32),
    Fault(u32, Fault),
    Halt(u32),
}

/// Diagnostics sink that records everything into a shared log so tests can
/// inspect it after the VM has taken ownership of the sink.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    pub events: Rc<RefCell<Vec<Event>>>,
}

impl Diagnostics for RecordingDiagnostics {
    fn on_instruction(&mut self, pc: u32, _instr: &Instruction) {
        self.events.borrow_mut().push(Event::Instruction(pc));
    }

    fn on_jump(&mut self, from: u32, to: u32) {
        self.events.borrow_mut().push(Event::Jump(from, to));
    }

    fn on_fault(&mut self, pc: u32, _instr: &Instruction, fault: &Fault) {
        self.events.borrow_mut().push(Event::Fault(pc, *fault));
    }

    fn on_halt(&mut self, pc: u32) {
        self.events.borrow_mut().push(Event::Halt(pc));
    }
}

/// VM with default sizes and a recording sink attached.
#[allow(dead_code)]
pub fn recording_vm() -> (VM, Rc<RefCell<Vec<Event>>>) {
    let sink = RecordingDiagnostics::default();
    let events = Rc::clone(&sink.events);
    let vm = VM::with_diagnostics(256, 1024, Box::new(sink));
    (vm, events)
}

/// Faults recorded so far, without their PCs.
#[allow(dead_code)]
pub fn faults(events: &Rc<RefCell<Vec<Event>>>) -> Vec<Fault> {
    events
        .borrow()
        .iter()
        .filter_map(|e| match e {
            Event::Fault(_, f) => Some(*f),
            _ => None,
        })
        .collect()
}

/// Loads two values into R0/R1 via memory[100]/[101], applies `op` into R2
/// and stores R2 into memory[102].
#[allow(dead_code)]
pub fn binary_op_program(op: Instruction) -> Vec<Instruction> {
    vec![
        Instruction::load_direct(0, 100),
        Instruction::load_direct(1, 101),
        op,
        Instruction::store(102, 2),
        Instruction::halt(),
    ]
}
