//! Demo programs for the VM.
//!
//! Each producer is a pure function: it takes the data-memory addresses the
//! caller wants to use and returns a fixed instruction sequence. The caller
//! seeds memory, loads the program, runs it and reads the result back.

pub mod factorial;
pub mod fibonacci;
pub mod sum_list;

pub use factorial::factorial;
pub use fibonacci::fibonacci;
pub use sum_list::sum_list;
