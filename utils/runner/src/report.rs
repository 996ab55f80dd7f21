use colored::*;
use serde::Serialize;
use vm::{RunOutcome, StatusRegister, VM};

use crate::trace::TraceEntry;

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub name: String,
    pub outcome: Outcome,
    pub steps: u64,
    pub pc: u32,
    pub registers: Vec<u32>,
    pub flags: FlagReport,
    pub memory: Vec<MemoryCell>,
    pub faults: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub trace: Vec<TraceEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Halted,
    StepLimit,
}

impl From<RunOutcome> for Outcome {
    fn from(outcome: RunOutcome) -> Self {
        match outcome {
            RunOutcome::Halted => Outcome::Halted,
            RunOutcome::StepLimit => Outcome::StepLimit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlagReport {
    pub zf: bool,
    pub cf: bool,
    pub nf: bool,
    pub of: bool,
    pub df: bool,
    pub bits: u32,
}

impl From<StatusRegister> for FlagReport {
    fn from(sr: StatusRegister) -> Self {
        Self {
            zf: sr.zero(),
            cf: sr.carry(),
            nf: sr.negative(),
            of: sr.overflow(),
            df: sr.division_fault(),
            bits: sr.bits(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemoryCell {
    pub address: u32,
    pub value: u32,
}

impl RunReport {
    /// Snapshot the machine after a run.
    pub fn capture(
        name: &str,
        vm: &VM,
        outcome: RunOutcome,
        watch: &[u32],
        trace: Vec<TraceEntry>,
    ) -> Self {
        let faults = trace
            .iter()
            .filter(|e| matches!(e, TraceEntry::Fault { .. }))
            .count();
        Self {
            name: name.to_string(),
            outcome: outcome.into(),
            steps: vm.steps_executed(),
            pc: vm.pc(),
            registers: vm.registers().to_vec(),
            flags: vm.status_register().into(),
            memory: watch
                .iter()
                .map(|&address| MemoryCell {
                    address,
                    value: vm.get_memory_value(address),
                })
                .collect(),
            faults,
            trace,
        }
    }
}

pub fn print_report(report: &RunReport, show_trace: bool) {
    println!();
    println!("{} {}", "🔷".bold(), report.name.yellow().bold());

    if show_trace && !report.trace.is_empty() {
        println!("  {}", "Trace:".bold());
        crate::trace::print_trace(&report.trace);
    }

    let outcome = match report.outcome {
        Outcome::Halted => "halted".green(),
        Outcome::StepLimit => "step limit reached".red(),
    };
    println!("  Outcome: {} after {} steps (pc = {})", outcome, report.steps, report.pc);

    let f = &report.flags;
    println!(
        "  Flags:   ZF={} CF={} NF={} OF={} DF={}",
        f.zf as u8, f.cf as u8, f.nf as u8, f.of as u8, f.df as u8
    );

    if report.faults > 0 {
        println!("  Faults:  {}", report.faults.to_string().yellow());
    }

    for cell in &report.memory {
        println!("  ✅ mem[{}] = {}", cell.address, cell.value.to_string().green());
    }
}
