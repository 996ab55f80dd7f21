use thiserror::Error;

/// Why an instruction could not take effect.
///
/// Faults are internal: the CPU turns every one of them into a no-op for the
/// offending instruction and hands it to the diagnostics sink. They never
/// reach the caller of `VM::run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("register index {0} out of range")]
    RegisterOutOfRange(u32),
    #[error("data memory address {0} out of range")]
    MemoryOutOfRange(u32),
    #[error("invalid addressing mode {0}")]
    InvalidAddressingMode(u32),
    #[error("jump target {target} outside program of {len} instructions")]
    JumpOutOfRange { target: u32, len: usize },
    #[error("division by zero")]
    DivisionByZero,
}
