//! Integration tests for the two-pass assembler, independent of the
//! compiler front end: hand-written assembly text in, either an encoded
//! word or an executed register value out.

mod support;

use rvcc::assembler::assemble;
use rvcc::AssembleError;
use support::cpu::Cpu;

#[test]
fn addi_a0_zero_negative_one_bit_pattern() {
    let words = assemble("addi a0, zero, -1").unwrap();
    assert_eq!(words, vec![0b1111_1111_1111_00000_000_01010_0010011]);
}

#[test]
fn pseudo_li_and_ret_execute_to_completion() {
    let words = assemble("li a0, 7\nret").unwrap();
    let cpu = Cpu::run(&words);
    assert_eq!(cpu.get(10), 7);
}

#[test]
fn backward_branch_loop_counts_to_five() {
    let src = "\
li t0, 0
li t1, 5
loop:
beq t0, t1, done
addi t0, t0, 1
j loop
done:
mv a0, t0
ret
";
    let words = assemble(src).unwrap();
    let cpu = Cpu::run(&words);
    assert_eq!(cpu.get(10), 5);
}

#[test]
fn seqz_uses_the_actual_source_register_not_zero() {
    // seqz t0, t1 with t1 == 0 should set t0 to 1
    let words = assemble("li t1, 0\nseqz t0, t1\nmv a0, t0\nret").unwrap();
    let cpu = Cpu::run(&words);
    assert_eq!(cpu.get(10), 1);

    // and with t1 != 0 it should set t0 to 0
    let words = assemble("li t1, 9\nseqz t0, t1\nmv a0, t0\nret").unwrap();
    let cpu = Cpu::run(&words);
    assert_eq!(cpu.get(10), 0);
}

#[test]
fn load_store_round_trip_through_the_stack() {
    let src = "\
addi sp, sp, -16
li t0, 123
sw t0, 0(sp)
lw a0, 0(sp)
addi sp, sp, 16
ret
";
    let words = assemble(src).unwrap();
    let cpu = Cpu::run(&words);
    assert_eq!(cpu.get(10), 123);
}

#[test]
fn mul_and_div_compute_correctly() {
    let words = assemble("li t0, 6\nli t1, 7\nmul a0, t0, t1\nret").unwrap();
    assert_eq!(Cpu::run(&words).get(10), 42);

    let words = assemble("li t0, 20\nli t1, 4\ndiv a0, t0, t1\nret").unwrap();
    assert_eq!(Cpu::run(&words).get(10), 5);
}

#[test]
fn undefined_label_is_reported() {
    let err = assemble("beqz t0, nowhere").unwrap_err();
    assert!(matches!(err, AssembleError::UndefinedLabel { name } if name == "nowhere"));
}

#[test]
fn unknown_mnemonic_is_reported() {
    assert!(matches!(
        assemble("nope a0, a1, a2").unwrap_err(),
        AssembleError::UnknownMnemonic { .. }
    ));
}
