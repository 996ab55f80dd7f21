use std::fmt;

use types::Flag;

/// The five condition flags.
///
/// Callers only ever see copies of this (see `VM::status_register`); the
/// flags change solely as a side effect of ADD, SUB, MUL, DIV and CMP, and
/// each opcode only touches the flags it owns:
///
/// | flag | written by          |
/// |------|---------------------|
/// | ZF   | CMP                 |
/// | CF   | ADD, SUB, DIV       |
/// | NF   | ADD, SUB, MUL, DIV  |
/// | OF   | MUL, DIV            |
/// | DF   | DIV                 |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusRegister {
    zf: bool,
    cf: bool,
    nf: bool,
    of: bool,
    df: bool,
}

impl StatusRegister {
    pub fn zero(&self) -> bool {
        self.zf
    }

    pub fn carry(&self) -> bool {
        self.cf
    }

    pub fn negative(&self) -> bool {
        self.nf
    }

    pub fn overflow(&self) -> bool {
        self.of
    }

    pub fn division_fault(&self) -> bool {
        self.df
    }

    pub fn get(&self, flag: Flag) -> bool {
        match flag {
            Flag::Zero => self.zf,
            Flag::Carry => self.cf,
            Flag::Negative => self.nf,
            Flag::Overflow => self.of,
            Flag::DivisionFault => self.df,
        }
    }

    /// Flag value by CHECK_FLAG index; unknown indices read as 0.
    pub fn read_index(&self, index: u32) -> u32 {
        Flag::try_from(index).map_or(0, |flag| self.get(flag) as u32)
    }

    /// Packed view: ZF is bit 0 through DF at bit 4.
    pub fn bits(&self) -> u32 {
        Flag::ALL
            .iter()
            .fold(0, |acc, &flag| acc | ((self.get(flag) as u32) << flag as u32))
    }

    pub(crate) fn set_zero(&mut self, on: bool) {
        self.zf = on;
    }

    pub(crate) fn set_carry(&mut self, on: bool) {
        self.cf = on;
    }

    pub(crate) fn set_negative(&mut self, on: bool) {
        self.nf = on;
    }

    pub(crate) fn set_overflow(&mut self, on: bool) {
        self.of = on;
    }

    pub(crate) fn set_division_fault(&mut self, on: bool) {
        self.df = on;
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for StatusRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = Flag::ALL
            .iter()
            .map(|&flag| format!("{}={}", flag, self.get(flag) as u8))
            .collect();
        f.write_str(&parts.join(" "))
    }
}
