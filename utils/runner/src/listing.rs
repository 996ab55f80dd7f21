use anyhow::{bail, Context, Result};
use regex::Regex;
use types::{Instruction, Opcode};

/// A parsed program listing: the instructions plus the memory the program
/// expects to find and the cells worth reporting afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    pub program: Vec<Instruction>,
    /// `.data ADDR VALUE`
    pub data: Vec<(u32, u32)>,
    /// `.watch ADDR`
    pub watch: Vec<u32>,
}

/// Parse a text listing.
///
/// One item per line; `;` or `#` starts a comment.
///
/// ```text
/// .data  100 5
/// .data  101 7
/// .watch 102
/// LOAD  0, 100, 0     ; r0 = mem[100]
/// LOAD  1, 101, 0
/// ADD   2, 0, 1
/// STORE 102, 2
/// HALT
/// ```
///
/// Operands are decimal or `0x` hex, missing ones default to 0.
pub fn parse_listing(content: &str) -> Result<Listing> {
    let data_re = Regex::new(r"^\.data\s+(\S+)\s+(\S+)$")?;
    let watch_re = Regex::new(r"^\.watch\s+(\S+)$")?;
    let instr_re = Regex::new(r"^([A-Za-z_]+)(?:\s+(.*))?$")?;

    let mut listing = Listing::default();

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(captures) = data_re.captures(line) {
            let addr = parse_number(&captures[1]).with_context(|| format!("line {}", line_no))?;
            let value = parse_number(&captures[2]).with_context(|| format!("line {}", line_no))?;
            listing.data.push((addr, value));
        } else if let Some(captures) = watch_re.captures(line) {
            let addr = parse_number(&captures[1]).with_context(|| format!("line {}", line_no))?;
            listing.watch.push(addr);
        } else if let Some(captures) = instr_re.captures(line) {
            let opcode: Opcode = captures[1]
                .parse()
                .with_context(|| format!("line {}", line_no))?;
            let operands = match captures.get(2) {
                Some(m) => parse_operands(m.as_str()).with_context(|| format!("line {}", line_no))?,
                None => [0; 3],
            };
            listing
                .program
                .push(Instruction::new(opcode, operands[0], operands[1], operands[2]));
        } else {
            bail!("line {}: cannot parse {:?}", line_no, line);
        }
    }

    Ok(listing)
}

fn strip_comment(line: &str) -> &str {
    match line.find([';', '#']) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_operands(text: &str) -> Result<[u32; 3]> {
    let mut operands = [0u32; 3];
    let fields: Vec<&str> = text.split(',').map(str::trim).collect();
    if fields.len() > 3 {
        bail!("expected at most 3 operands, found {}", fields.len());
    }
    for (slot, field) in operands.iter_mut().zip(fields) {
        *slot = parse_number(field)?;
    }
    Ok(operands)
}

fn parse_number(text: &str) -> Result<u32> {
    let value = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => text.parse::<u32>(),
    };
    value.with_context(|| format!("invalid number {:?}", text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_directives_and_instructions() {
        let src = "\
; add two cells
.data 100 5
.data 101 0x7
.watch 102

LOAD 0, 100, 0   # direct
load 1, 101
ADD 2, 0, 1
STORE 102, 2
HALT
";
        let listing = parse_listing(src).unwrap();
        assert_eq!(listing.data, vec![(100, 5), (101, 7)]);
        assert_eq!(listing.watch, vec![102]);
        assert_eq!(
            listing.program,
            vec![
                Instruction::load_direct(0, 100),
                Instruction::load_direct(1, 101),
                Instruction::add(2, 0, 1),
                Instruction::store(102, 2),
                Instruction::halt(),
            ]
        );
    }

    #[test]
    fn check_flag_mnemonic() {
        let listing = parse_listing("CHECK_FLAG 3, 1").unwrap();
        assert_eq!(listing.program, vec![Instruction::new(Opcode::CheckFlag, 3, 1, 0)]);
    }

    #[test]
    fn operands_are_not_validated() {
        // the engine decides what to do with these at run time
        let listing = parse_listing("ADD 99, 0xffffffff, 16").unwrap();
        assert_eq!(listing.program[0], Instruction::add(99, u32::MAX, 16));
    }

    #[test]
    fn bundled_demo_listing_runs() {
        let listing = parse_listing(include_str!("../../../demos/carry.lst")).unwrap();
        let mut vm = vm::VM::default();
        for &(addr, value) in &listing.data {
            vm.set_memory_value(addr, value);
        }
        vm.load_program(&listing.program);
        vm.run();
        assert_eq!(listing.watch, vec![102, 103]);
        assert_eq!(vm.get_memory_value(102), 0x10);
        assert_eq!(vm.get_memory_value(103), 1);
    }

    #[test]
    fn reports_the_failing_line() {
        let err = parse_listing("HALT\nFROB 1, 2").unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));

        let err = parse_listing("LOAD 1, x, 0").unwrap_err();
        assert!(format!("{:#}", err).contains("line 1"));

        assert!(parse_listing("ADD 1, 2, 3, 4").is_err());
        assert!(parse_listing(".data 100").is_err());
    }
}
