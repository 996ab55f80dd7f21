use once_cell::sync::Lazy;
use programs::{factorial, fibonacci, sum_list};
use types::{Flag, Instruction};
use vm::VM;

const INPUT: u32 = 100;
const RESULT: u32 = 101;

const ARRAY_PTR: u32 = 300;
const LENGTH: u32 = 301;
const SUM: u32 = 302;
const ARRAY: u32 = 400;

/// One end-to-end run of a demo program.
struct ProgramCase {
    name: &'static str,
    build: fn() -> Vec<Instruction>,
    /// (address, value) pairs written before the run
    memory: Vec<(u32, u32)>,
    result_addr: u32,
    /// None when the program is expected to halt without storing
    expected: Option<u32>,
    flag: Option<Flag>,
}

fn factorial_case(n: u32, expected: Option<u32>, flag: Option<Flag>) -> ProgramCase {
    ProgramCase {
        name: "factorial",
        build: || factorial(INPUT, RESULT),
        memory: vec![(INPUT, n)],
        result_addr: RESULT,
        expected,
        flag,
    }
}

fn fibonacci_case(n: u32, expected: Option<u32>, flag: Option<Flag>) -> ProgramCase {
    ProgramCase {
        name: "fibonacci",
        build: || fibonacci(INPUT, RESULT),
        memory: vec![(INPUT, n)],
        result_addr: RESULT,
        expected,
        flag,
    }
}

fn sum_case(values: &[u32], expected: u32, flag: Option<Flag>) -> ProgramCase {
    let mut memory = vec![(ARRAY_PTR, ARRAY), (LENGTH, values.len() as u32)];
    memory.extend(values.iter().enumerate().map(|(i, &v)| (ARRAY + i as u32, v)));
    ProgramCase {
        name: "sum_list",
        build: || sum_list(ARRAY_PTR, LENGTH, SUM),
        memory,
        result_addr: SUM,
        expected: Some(expected),
        flag,
    }
}

static CASES: Lazy<Vec<ProgramCase>> = Lazy::new(|| {
    vec![
        factorial_case(0, Some(1), None),
        factorial_case(1, Some(1), None),
        factorial_case(2, Some(2), None),
        factorial_case(5, Some(120), None),
        factorial_case(12, Some(479_001_600), None),
        // 13! = 6227020800 does not fit
        factorial_case(13, None, Some(Flag::Overflow)),
        fibonacci_case(0, Some(0), None),
        fibonacci_case(1, Some(1), None),
        fibonacci_case(2, Some(1), None),
        fibonacci_case(5, Some(5), None),
        fibonacci_case(6, Some(8), None),
        fibonacci_case(10, Some(55), None),
        fibonacci_case(47, Some(2_971_215_073), None),
        fibonacci_case(48, None, Some(Flag::Carry)),
        sum_case(&[10, 20, 30], 60, None),
        sum_case(&[10, 20, 30, 40], 100, None),
        sum_case(&[42], 42, None),
        sum_case(&[0, 0, 0, 0], 0, None),
        sum_case(&[], 0, None),
        sum_case(&[u32::MAX - 10, 20], 9, Some(Flag::Carry)),
    ]
});

fn run_case(vm: &mut VM, case: &ProgramCase) {
    for &(addr, value) in &case.memory {
        vm.set_memory_value(addr, value);
    }
    vm.load_program(&(case.build)());
    vm.run();
}

#[test]
fn test_program_cases() {
    for case in CASES.iter() {
        let mut vm = VM::new(512, 512);
        run_case(&mut vm, case);

        if let Some(expected) = case.expected {
            assert_eq!(
                vm.get_memory_value(case.result_addr),
                expected,
                "{} with memory {:?}",
                case.name,
                case.memory
            );
        }
        if let Some(flag) = case.flag {
            assert!(
                vm.status_register().get(flag),
                "{} with memory {:?} should leave {} set",
                case.name,
                case.memory,
                flag
            );
        }
    }
}

#[test]
fn test_factorial_overflow_stores_wrapped_product() {
    let mut vm = VM::default();
    run_case(&mut vm, &factorial_case(13, None, None));
    assert_eq!(vm.get_memory_value(RESULT), 6_227_020_800u64 as u32);
    assert!(vm.status_register().overflow());
}

#[test]
fn test_fibonacci_overflow_leaves_result_untouched() {
    let mut vm = VM::default();
    vm.set_memory_value(RESULT, 0xAAAA);
    run_case(&mut vm, &fibonacci_case(48, None, None));
    assert_eq!(vm.get_memory_value(RESULT), 0xAAAA);
    assert!(vm.status_register().carry());
}

#[test]
fn test_programs_share_one_machine() {
    // the three demos back to back on one VM, as the driver runs them
    let mut vm = VM::new(512, 512);

    vm.set_memory_value(100, 6);
    vm.load_program(&fibonacci(100, 101));
    vm.run();
    assert_eq!(vm.get_memory_value(101), 8);
    vm.reset();

    vm.set_memory_value(200, 5);
    vm.load_program(&factorial(200, 201));
    vm.run();
    assert_eq!(vm.get_memory_value(201), 120);
    vm.reset();

    for (i, v) in [10, 20, 30, 40].into_iter().enumerate() {
        vm.set_memory_value(400 + i as u32, v);
    }
    vm.set_memory_value(300, 400);
    vm.set_memory_value(301, 4);
    vm.load_program(&sum_list(300, 301, 302));
    vm.run();
    assert_eq!(vm.get_memory_value(302), 100);

    // earlier results survive later runs
    assert_eq!(vm.get_memory_value(101), 8);
    assert_eq!(vm.get_memory_value(201), 120);
}

#[test]
fn test_programs_always_halt() {
    for case in CASES.iter() {
        let mut vm = VM::default();
        for &(addr, value) in &case.memory {
            vm.set_memory_value(addr, value);
        }
        vm.load_program(&(case.build)());
        assert_eq!(
            vm.run_with_limit(10_000),
            vm::RunOutcome::Halted,
            "{} did not halt",
            case.name
        );
    }
}
