use types::{Flag, Instruction};

const N: u32 = 0;
const ONE: u32 = 1;
const PREV: u32 = 2;
const CURR: u32 = 3;
const I: u32 = 4;
const NEXT: u32 = 5;
const CARRY: u32 = 6;

const LOOP: u32 = 7;
const ZERO_CASE: u32 = 17;
const STORE: u32 = 18;
const HALT: u32 = 19;

/// `memory[result_addr] = F(memory[input_addr])` with F(0) = 0, F(1) = 1.
///
/// Keeps the pair `(F(i-1), F(i))` in `r2`/`r3` and walks `i` up to `n`.
/// F(47) is the largest term that fits in 32 bits; for larger inputs the
/// addition carries and the program halts without storing, leaving CF set.
///
/// ```text
///  0  load  r0, [input]
///  1  load  r1, #1
///  2  load  r2, #0
///  3  load  r3, #1
///  4  load  r4, #1
///  5  cmp   r0, r2        n == 0?
///  6  jeq   17
///  7  cmp   r4, r0        loop: i == n?
///  8  jeq   18
///  9  add   r5, r2, r3
/// 10  flag  r6, CF
/// 11  cmp   r6, r1
/// 12  jeq   19            carried
/// 13  mov   r2, r3
/// 14  mov   r3, r5
/// 15  add   r4, r4, r1
/// 16  jmp   7
/// 17  mov   r3, r2
/// 18  store [result], r3
/// 19  halt
/// ```
pub fn fibonacci(input_addr: u32, result_addr: u32) -> Vec<Instruction> {
    vec![
        Instruction::load_direct(N, input_addr),
        Instruction::load_immediate(ONE, 1),
        Instruction::load_immediate(PREV, 0),
        Instruction::load_immediate(CURR, 1),
        Instruction::load_immediate(I, 1),
        Instruction::cmp(N, PREV),
        Instruction::jmp_if_equal(ZERO_CASE),
        // LOOP
        Instruction::cmp(I, N),
        Instruction::jmp_if_equal(STORE),
        Instruction::add(NEXT, PREV, CURR),
        Instruction::check_flag(CARRY, Flag::Carry),
        Instruction::cmp(CARRY, ONE),
        Instruction::jmp_if_equal(HALT),
        Instruction::mov(PREV, CURR),
        Instruction::mov(CURR, NEXT),
        Instruction::add(I, I, ONE),
        Instruction::jmp(LOOP),
        // ZERO_CASE
        Instruction::mov(CURR, PREV),
        // STORE
        Instruction::store(result_addr, CURR),
        // HALT
        Instruction::halt(),
    ]
}
