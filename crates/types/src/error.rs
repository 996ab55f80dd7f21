use thiserror::Error;

/// Errors raised while building instructions from raw tags or text.
///
/// These only ever happen at construction time. Once an `Instruction`
/// exists, the engine never fails on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unknown opcode tag {0}")]
    UnknownOpcode(u32),
    #[error("unknown mnemonic '{0}'")]
    UnknownMnemonic(String),
    #[error("unknown addressing mode {0}")]
    UnknownAddressingMode(u32),
    #[error("unknown flag index {0}")]
    UnknownFlag(u32),
}
