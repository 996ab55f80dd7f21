// external
pub extern crate types;

// exports
pub mod cpu;
pub mod diagnostics;
pub mod fault;
pub mod global;
pub mod memory;
pub mod registers;
pub mod runner;
pub mod status;
pub mod vm;

pub use diagnostics::{ConsoleDiagnostics, Diagnostics, NoopDiagnostics};
pub use fault::Fault;
pub use global::Config;
pub use runner::RunOutcome;
pub use status::StatusRegister;
pub use vm::{ExecState, VM};
