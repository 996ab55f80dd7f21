use types::Instruction;

// register roles
const RESULT: u32 = 0;
const N: u32 = 1;
const ONE: u32 = 2;
const ZERO: u32 = 3;

const LOOP: u32 = 6;
const DONE: u32 = 11;

/// `memory[result_addr] = memory[input_addr]!`
///
/// 0! and 1! are both 1. The product is accumulated with MUL, so an input
/// whose factorial does not fit in 32 bits stores the wrapped product and
/// leaves OF set from the last multiplication that overflowed.
///
/// ```text
///  0  load  r0, #1
///  1  load  r1, [input]
///  2  load  r2, #1
///  3  load  r3, #0
///  4  cmp   r1, r3        n == 0?
///  5  jeq   11
///  6  cmp   r1, r2        loop: n == 1?
///  7  jeq   11
///  8  mul   r0, r0, r1
///  9  sub   r1, r1, r2
/// 10  jmp   6
/// 11  store [result], r0
/// 12  halt
/// ```
pub fn factorial(input_addr: u32, result_addr: u32) -> Vec<Instruction> {
    vec![
        Instruction::load_immediate(RESULT, 1),
        Instruction::load_direct(N, input_addr),
        Instruction::load_immediate(ONE, 1),
        Instruction::load_immediate(ZERO, 0),
        Instruction::cmp(N, ZERO),
        Instruction::jmp_if_equal(DONE),
        // LOOP
        Instruction::cmp(N, ONE),
        Instruction::jmp_if_equal(DONE),
        Instruction::mul(RESULT, RESULT, N),
        Instruction::sub(N, N, ONE),
        Instruction::jmp(LOOP),
        // DONE
        Instruction::store(result_addr, RESULT),
        Instruction::halt(),
    ]
}
