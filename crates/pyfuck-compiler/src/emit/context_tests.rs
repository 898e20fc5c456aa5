use pyfuck_bytecode::{CompareOp, Constant, Instruction, Opcode, STACK_SIZE};

use super::EmissionContext;
use crate::Error;
use crate::options::CompileOptions;

fn ops(ctx: &EmissionContext) -> Vec<(Opcode, u32)> {
    ctx.instructions()
        .iter()
        .map(|i| (i.opcode, i.arg))
        .collect()
}

fn names(ctx: &EmissionContext) -> Vec<&str> {
    ctx.names().iter().map(String::as_str).collect()
}

#[test]
fn increment_pointer_template() {
    let mut ctx = EmissionContext::new();
    ctx.increment_pointer(3).unwrap();

    assert_eq!(
        ops(&ctx),
        [
            (Opcode::LoadName, 0),
            (Opcode::LoadConst, 0),
            (Opcode::InplaceAdd, 0),
            (Opcode::StoreName, 0),
        ]
    );
    assert_eq!(names(&ctx), ["pointer"]);
    assert_eq!(ctx.consts().get(0), Some(&Constant::Int(3)));
}

#[test]
fn decrement_pointer_uses_subtract() {
    let mut ctx = EmissionContext::new();
    ctx.decrement_pointer(2).unwrap();

    assert_eq!(ctx.instructions()[2].opcode, Opcode::InplaceSubtract);
    assert_eq!(ctx.consts().get(0), Some(&Constant::Int(2)));
}

#[test]
fn cell_update_wraps_modulo_256() {
    let mut ctx = EmissionContext::new();
    ctx.decrement_cell(1).unwrap();

    assert_eq!(
        ops(&ctx),
        [
            (Opcode::LoadName, 0),
            (Opcode::LoadName, 1),
            (Opcode::DupTopTwo, 0),
            (Opcode::BinarySubscr, 0),
            (Opcode::LoadConst, 0),
            (Opcode::InplaceSubtract, 0),
            (Opcode::LoadConst, 1),
            (Opcode::InplaceModulo, 0),
            (Opcode::RotThree, 0),
            (Opcode::StoreSubscr, 0),
        ]
    );
    assert_eq!(names(&ctx), ["memory", "pointer"]);
    assert_eq!(ctx.consts().get(1), Some(&Constant::Int(256)));
    assert_eq!(ctx.max_stack_depth(), 4);
}

#[test]
fn output_template() {
    let mut ctx = EmissionContext::new();
    ctx.output_cell().unwrap();

    assert_eq!(
        ops(&ctx),
        [
            (Opcode::LoadName, 0),
            (Opcode::LoadMethod, 1),
            (Opcode::LoadName, 2),
            (Opcode::LoadName, 3),
            (Opcode::LoadName, 4),
            (Opcode::BinarySubscr, 0),
            (Opcode::CallFunction, 1),
            (Opcode::CallMethod, 1),
            (Opcode::PopTop, 0),
        ]
    );
    assert_eq!(names(&ctx), ["stdout", "write", "chr", "memory", "pointer"]);
    assert!(ctx.consts().is_empty());
    assert_eq!(ctx.max_stack_depth(), 5);
}

#[test]
fn input_template() {
    let mut ctx = EmissionContext::new();
    ctx.input_cell().unwrap();

    assert_eq!(
        ops(&ctx),
        [
            (Opcode::LoadName, 0),
            (Opcode::LoadName, 1),
            (Opcode::LoadMethod, 2),
            (Opcode::LoadConst, 0),
            (Opcode::CallMethod, 1),
            (Opcode::CallFunction, 1),
            (Opcode::LoadName, 3),
            (Opcode::LoadName, 4),
            (Opcode::StoreSubscr, 0),
        ]
    );
    assert_eq!(names(&ctx), ["ord", "stdin", "read", "memory", "pointer"]);
    assert_eq!(ctx.consts().get(0), Some(&Constant::Int(1)));
}

#[test]
fn init_program_binds_runtime() {
    let mut ctx = EmissionContext::new();
    ctx.init_program(&CompileOptions::default()).unwrap();

    assert_eq!(ctx.instructions().len(), 17);
    assert_eq!(names(&ctx), ["sys", "stdin", "stdout", "memory", "pointer"]);
    let consts: Vec<&Constant> = ctx.consts().iter().collect();
    assert_eq!(
        consts,
        [
            &Constant::Int(0),
            &Constant::from("stdin"),
            &Constant::from("stdout"),
            &Constant::Int(512),
        ]
    );
}

#[test]
fn init_program_honors_memory_cells() {
    let mut ctx = EmissionContext::new();
    let options = CompileOptions::default().with_memory_cells(30_000);
    ctx.init_program(&options).unwrap();

    assert_eq!(ctx.consts().get(3), Some(&Constant::Int(30_000)));
}

#[test]
fn every_template_is_stack_neutral() {
    let mut ctx = EmissionContext::new();
    ctx.init_program(&CompileOptions::default()).unwrap();
    ctx.increment_pointer(1).unwrap();
    ctx.decrement_pointer(1).unwrap();
    ctx.increment_cell(1).unwrap();
    ctx.decrement_cell(1).unwrap();
    ctx.input_cell().unwrap();
    ctx.loop_start(0);
    ctx.output_cell().unwrap();
    ctx.loop_end(1).unwrap();
    ctx.terminate().unwrap();

    let depth: i64 = ctx
        .instructions()
        .iter()
        .map(|i| i.opcode.stack_effect(i.arg))
        .sum();
    assert_eq!(depth, 0);
    assert_eq!(ctx.max_stack_depth(), 5);
    assert!(ctx.max_stack_depth() <= STACK_SIZE);
}

#[test]
fn loop_jumps_back_to_start() {
    let mut ctx = EmissionContext::new();
    ctx.increment_cell(1).unwrap();
    ctx.loop_start(1);
    ctx.decrement_cell(1).unwrap();
    ctx.loop_end(3).unwrap();

    let tail: Vec<(Opcode, u32)> = ops(&ctx).split_off(20);
    assert_eq!(
        tail,
        [
            (Opcode::LoadName, 0),
            (Opcode::LoadName, 1),
            (Opcode::BinarySubscr, 0),
            (Opcode::LoadConst, 2),
            (Opcode::CompareOp, CompareOp::Equal as u32),
            (Opcode::PopJumpIfFalse, 10),
        ]
    );
    assert_eq!(ctx.consts().get(2), Some(&Constant::Int(0)));
    assert_eq!(ctx.loop_depth(), 0);
}

#[test]
fn loop_target_counts_words_not_instructions() {
    let mut ctx = EmissionContext::new();
    // Push the constant pool past one byte of index.
    for n in 0..300 {
        ctx.increment_pointer(n).unwrap();
    }
    let instructions = ctx.instructions().len() as u32;
    let start = ctx.code_units();
    assert!(start > instructions);

    ctx.loop_start(0);
    ctx.output_cell().unwrap();
    ctx.loop_end(1).unwrap();

    let last = ctx.instructions().last().copied().unwrap();
    assert_eq!(last, Instruction::new(Opcode::PopJumpIfFalse, start));
    assert_eq!(ctx.code().len(), ctx.code_units() as usize * 2);
}

#[test]
fn loop_end_without_start() {
    let mut ctx = EmissionContext::new();
    let err = ctx.loop_end(5).unwrap_err();

    assert_eq!(err, Error::UnbalancedLoop { offset: 5 });
    assert!(ctx.instructions().is_empty());
}

#[test]
fn terminate_reports_innermost_open_loop() {
    let mut ctx = EmissionContext::new();
    ctx.loop_start(0);
    ctx.loop_start(1);
    ctx.loop_start(2);
    ctx.loop_end(3).unwrap();

    assert_eq!(ctx.loop_depth(), 2);
    assert_eq!(ctx.terminate(), Err(Error::UnclosedLoop { offset: 1 }));
}

#[test]
fn terminate_returns_none() {
    let mut ctx = EmissionContext::new();
    ctx.terminate().unwrap();

    assert_eq!(
        ops(&ctx),
        [(Opcode::LoadConst, 0), (Opcode::ReturnValue, 0)]
    );
    assert_eq!(ctx.consts().get(0), Some(&Constant::None));
}

#[test]
fn append_op_and_append_instruction_agree() {
    let mut a = EmissionContext::new();
    let mut b = EmissionContext::new();
    a.append_op(Opcode::Nop, 300);
    b.append_instruction(Instruction::new(Opcode::Nop, 300));

    assert_eq!(a.instructions(), b.instructions());
    assert_eq!(a.code_units(), 2);
    assert_eq!(a.code(), [144, 1, 9, 44]);
}
