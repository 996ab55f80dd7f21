use types::{Flag, Instruction};

const PTR: u32 = 0;
const COUNT: u32 = 1;
const SUM: u32 = 2;
const ONE: u32 = 3;
const ELEM: u32 = 4;
const CARRY: u32 = 5;
const ZERO: u32 = 7;

const LOOP: u32 = 5;
const DONE: u32 = 15;

/// Sums a list of words into `memory[result_addr]`.
///
/// `memory[array_ptr_addr]` holds the address of the first element and
/// `memory[length_addr]` the number of elements. An empty list sums to 0.
///
/// The carry is checked after every addition. On the first carry the
/// program stops early, stores the wrapped partial sum and halts with CF
/// still set, so the caller can tell a wrapped result from a real one.
pub fn sum_list(array_ptr_addr: u32, length_addr: u32, result_addr: u32) -> Vec<Instruction> {
    vec![
        Instruction::load_direct(PTR, array_ptr_addr),
        Instruction::load_direct(COUNT, length_addr),
        Instruction::load_immediate(SUM, 0),
        Instruction::load_immediate(ONE, 1),
        Instruction::load_immediate(ZERO, 0),
        // LOOP
        Instruction::cmp(COUNT, ZERO),
        Instruction::jmp_if_equal(DONE),
        Instruction::load_indirect(ELEM, PTR),
        Instruction::add(SUM, SUM, ELEM),
        Instruction::check_flag(CARRY, Flag::Carry),
        Instruction::cmp(CARRY, ONE),
        Instruction::jmp_if_equal(DONE),
        Instruction::add(PTR, PTR, ONE),
        Instruction::sub(COUNT, COUNT, ONE),
        Instruction::jmp(LOOP),
        // DONE
        Instruction::store(result_addr, SUM),
        Instruction::halt(),
    ]
}
