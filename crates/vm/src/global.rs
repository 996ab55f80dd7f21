/// Machine-wide constants.
pub struct Config;

impl Config {
    /// Size of the register file (R0..R15).
    pub const REGISTER_COUNT: usize = 16;
    /// Informational program capacity used by `VM::default()`.
    pub const DEFAULT_PROGRAM_SIZE: usize = 256;
    /// Data memory cells allocated by `VM::default()`.
    pub const DEFAULT_DATA_SIZE: usize = 1024;
}
