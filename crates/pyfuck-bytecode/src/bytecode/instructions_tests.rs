//! Tests for instruction encoding and decoding.

use super::error::EncodeError;
use super::instructions::{Instruction, decode};
use super::module::ModuleError;
use super::opcode::Opcode;

#[test]
fn single_byte_operand_is_one_word() {
    let i = Instruction::new(Opcode::LoadConst, 7);
    assert_eq!(i.to_bytes(), vec![100, 7]);
    assert_eq!(i.code_units(), 1);
    assert_eq!(i.size(), 2);
}

#[test]
fn no_arg_opcode_encodes_zero_operand() {
    let i = Instruction::new(Opcode::ReturnValue, 0);
    assert_eq!(i.to_bytes(), vec![83, 0]);
}

#[test]
fn operand_300_gets_one_extension() {
    // 300 = 1 * 256 + 44
    let i = Instruction::new(Opcode::LoadName, 300);
    assert_eq!(i.to_bytes(), vec![144, 1, 101, 44]);
    assert_eq!(i.code_units(), 2);
}

#[test]
fn operand_boundaries() {
    assert_eq!(Instruction::new(Opcode::LoadConst, 255).to_bytes(), vec![100, 255]);
    assert_eq!(
        Instruction::new(Opcode::LoadConst, 256).to_bytes(),
        vec![144, 1, 100, 0]
    );
    assert_eq!(
        Instruction::new(Opcode::LoadConst, 65535).to_bytes(),
        vec![144, 255, 100, 255]
    );
}

#[test]
fn wide_operands_chain_extensions_most_significant_first() {
    let i = Instruction::new(Opcode::PopJumpIfFalse, 0x01_02_03);
    assert_eq!(i.to_bytes(), vec![144, 1, 144, 2, 114, 3]);
    assert_eq!(i.code_units(), 3);

    let i = Instruction::new(Opcode::LoadConst, 0xAABB_CCDD);
    assert_eq!(
        i.to_bytes(),
        vec![144, 0xAA, 144, 0xBB, 144, 0xCC, 100, 0xDD]
    );
    assert_eq!(i.code_units(), 4);
}

#[test]
fn negative_operand_is_rejected() {
    assert_eq!(
        Instruction::try_new(Opcode::LoadConst, -1),
        Err(EncodeError::OperandOverflow(-1))
    );
    assert_eq!(
        Instruction::try_new(Opcode::LoadConst, 1 << 32),
        Err(EncodeError::OperandOverflow(1 << 32))
    );
    assert_eq!(
        Instruction::try_new(Opcode::LoadConst, 300),
        Ok(Instruction::new(Opcode::LoadConst, 300))
    );
}

#[test]
fn decode_folds_prefixes() {
    let mut code = Vec::new();
    Instruction::new(Opcode::LoadConst, 1).encode_into(&mut code);
    Instruction::new(Opcode::LoadName, 300).encode_into(&mut code);
    Instruction::new(Opcode::PopJumpIfFalse, 0x01_02_03).encode_into(&mut code);
    Instruction::new(Opcode::ReturnValue, 0).encode_into(&mut code);

    let decoded = decode(&code).unwrap();
    let summary: Vec<_> = decoded
        .iter()
        .map(|d| (d.offset, d.opcode, d.arg, d.prefixes))
        .collect();
    assert_eq!(
        summary,
        vec![
            (0, Opcode::LoadConst, 1, 0),
            (1, Opcode::LoadName, 300, 1),
            (3, Opcode::PopJumpIfFalse, 0x01_02_03, 2),
            (6, Opcode::ReturnValue, 0, 0),
        ]
    );
}

#[test]
fn decode_rejects_odd_length() {
    assert_eq!(decode(&[100]), Err(ModuleError::TruncatedCode(1)));
}

#[test]
fn decode_rejects_dangling_prefix() {
    assert_eq!(decode(&[144, 1]), Err(ModuleError::TruncatedCode(2)));
}

#[test]
fn decode_rejects_unknown_opcode() {
    assert_eq!(decode(&[0xFF, 0]), Err(ModuleError::UnknownOpcode(0xFF)));
}
