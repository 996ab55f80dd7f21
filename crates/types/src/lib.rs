pub mod opcode;
pub use opcode::Opcode;

pub mod instruction;
pub use instruction::Instruction;

// operand encodings for LOAD and CHECK_FLAG
pub mod operand;
pub use operand::{AddressingMode, Flag};

pub mod error;
pub use error::DecodeError;
