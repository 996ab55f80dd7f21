use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::fs;
use std::path::PathBuf;

use types::Instruction;
use vm::{Config, RunOutcome, VM};

mod listing;
mod report;
mod trace;

use report::RunReport;
use trace::TraceRecorder;

/// Runs demo programs or program listings on the register VM
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Program memory capacity (informational)
    #[arg(long, default_value_t = Config::DEFAULT_PROGRAM_SIZE)]
    program_size: usize,

    /// Number of data memory cells
    #[arg(long, default_value_t = Config::DEFAULT_DATA_SIZE)]
    data_size: usize,

    /// Stop after this many instructions (default: run until HALT)
    #[arg(long)]
    max_steps: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Print every executed instruction
    #[arg(short, long)]
    trace: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the built-in demo programs
    Demo {
        #[arg(value_enum, default_value_t = Demo::All)]
        which: Demo,

        /// Fibonacci input n
        #[arg(long, default_value_t = 6)]
        fib: u32,

        /// Factorial input n
        #[arg(long, default_value_t = 5)]
        fact: u32,

        /// Values for the running sum
        #[arg(long, value_delimiter = ',', default_values_t = [10, 20, 30, 40])]
        list: Vec<u32>,
    },
    /// Run a program listing from a file
    Run { listing: PathBuf },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Demo {
    Fibonacci,
    Factorial,
    Sum,
    All,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let mut vm = VM::new(args.program_size, args.data_size);

    let reports = match &args.command {
        Command::Demo { which, fib, fact, list } => {
            check_demo_memory(args.data_size, *which, list.len())?;
            run_demos(&mut vm, &args, *which, *fib, *fact, list)
        }
        Command::Run { listing: path } => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read listing {}", path.display()))?;
            let parsed = listing::parse_listing(&content)?;
            for &(addr, value) in &parsed.data {
                vm.set_memory_value(addr, value);
            }
            let name = path.display().to_string();
            vec![execute(&mut vm, &args, &name, &parsed.program, &parsed.watch)]
        }
    };

    match args.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        Format::Text => {
            println!("{}", "Register VM Runner v0.1.0".bold().blue());
            println!("{}", "=====================================".blue());
            for report in &reports {
                report::print_report(report, args.trace);
            }
            if let Command::Run { .. } = args.command {
                println!();
                print!("{}", vm.dump_registers());
            }
        }
    }

    Ok(())
}

/// Load `program` into `vm`, run it and capture the result.
fn execute(vm: &mut VM, args: &Args, name: &str, program: &[Instruction], watch: &[u32]) -> RunReport {
    let (recorder, log) = TraceRecorder::new(args.trace);
    vm.set_diagnostics(Box::new(recorder));
    vm.load_program(program);

    let outcome = match args.max_steps {
        Some(limit) => vm.run_with_limit(limit),
        None => {
            vm.run();
            RunOutcome::Halted
        }
    };

    let trace = log.borrow().clone();
    RunReport::capture(name, vm, outcome, watch, trace)
}

// Fixed demo layout in data memory.
const FIB_INPUT: u32 = 100;
const FACT_INPUT: u32 = 200;
const SUM_PTR: u32 = 300;
const SUM_ARRAY: u32 = 400;

/// The demos write to fixed addresses; a data memory too small for them
/// would silently drop the inputs and report a wrong result.
fn check_demo_memory(data_size: usize, which: Demo, list_len: usize) -> Result<()> {
    let needed = match which {
        Demo::Fibonacci => FIB_INPUT as usize + 2,
        Demo::Factorial => FACT_INPUT as usize + 2,
        Demo::Sum | Demo::All => (SUM_ARRAY as usize + list_len).max(SUM_PTR as usize + 3),
    };
    if data_size < needed {
        bail!(
            "demo {:?} needs at least {} data cells, --data-size is {}",
            which,
            needed,
            data_size
        );
    }
    Ok(())
}

/// Runs the demos back to back on one machine, resetting in between.
fn run_demos(vm: &mut VM, args: &Args, which: Demo, fib: u32, fact: u32, list: &[u32]) -> Vec<RunReport> {
    let mut reports = Vec::new();

    if matches!(which, Demo::Fibonacci | Demo::All) {
        vm.set_memory_value(FIB_INPUT, fib);
        vm.set_memory_value(FIB_INPUT + 1, 0);
        let program = programs::fibonacci(FIB_INPUT, FIB_INPUT + 1);
        reports.push(execute(vm, args, &format!("Fibonacci({})", fib), &program, &[FIB_INPUT + 1]));
        vm.reset();
    }

    if matches!(which, Demo::Factorial | Demo::All) {
        vm.set_memory_value(FACT_INPUT, fact);
        vm.set_memory_value(FACT_INPUT + 1, 0);
        let program = programs::factorial(FACT_INPUT, FACT_INPUT + 1);
        reports.push(execute(vm, args, &format!("Factorial({})", fact), &program, &[FACT_INPUT + 1]));
        vm.reset();
    }

    if matches!(which, Demo::Sum | Demo::All) {
        vm.set_memory_value(SUM_PTR, SUM_ARRAY);
        vm.set_memory_value(SUM_PTR + 1, list.len() as u32);
        vm.set_memory_value(SUM_PTR + 2, 0);
        for (i, &value) in list.iter().enumerate() {
            vm.set_memory_value(SUM_ARRAY + i as u32, value);
        }
        let program = programs::sum_list(SUM_PTR, SUM_PTR + 1, SUM_PTR + 2);
        reports.push(execute(vm, args, &format!("Sum of {:?}", list), &program, &[SUM_PTR + 2]));
        vm.reset();
    }

    reports
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_memory_must_hold_the_fixed_layout() {
        assert!(check_demo_memory(Config::DEFAULT_DATA_SIZE, Demo::All, 4).is_ok());
        assert!(check_demo_memory(102, Demo::Fibonacci, 0).is_ok());
        assert!(check_demo_memory(101, Demo::Fibonacci, 0).is_err());
        assert!(check_demo_memory(202, Demo::Factorial, 0).is_ok());
        assert!(check_demo_memory(404, Demo::Sum, 4).is_ok());
        assert!(check_demo_memory(403, Demo::Sum, 4).is_err());
        assert!(check_demo_memory(303, Demo::Sum, 0).is_err());
        assert!(check_demo_memory(1024, Demo::All, 700).is_err());
    }

    #[test]
    fn too_small_data_size_is_an_error() {
        let args = Args::try_parse_from(["runner", "--data-size", "50", "demo", "fibonacci"]).unwrap();
        let Command::Demo { which, list, .. } = &args.command else {
            panic!("expected demo subcommand");
        };
        let err = check_demo_memory(args.data_size, *which, list.len()).unwrap_err();
        assert!(err.to_string().contains("needs at least 102"));
    }
}
