//! Human-readable disassembly for debugging.
//!
//! Sections: `[module]` metadata, `[consts]`, `[names]`, then `[code]` with one
//! line per logical instruction (EXTENDED_ARG prefixes folded in). Lines that
//! are jump targets carry a `>>` marker, as in `dis`.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::colors::Colors;

use super::instructions::{Decoded, decode};
use super::module::{CodeObject, Module, ModuleError};
use super::opcode::{ArgKind, CompareOp};

/// Column width of the mnemonic; fits `POP_JUMP_IF_FALSE`.
const NAME_WIDTH: usize = 17;

/// Generate a human-readable dump of a loaded module.
pub fn dump(module: &Module, colors: Colors) -> Result<String, ModuleError> {
    let code = module.code();
    let instructions = decode(&code.code)?;

    let mut out = String::new();
    dump_meta(&mut out, module, &colors);
    dump_consts(&mut out, code, &colors);
    dump_names(&mut out, code, &colors);
    dump_code(&mut out, code, &instructions, &colors);
    Ok(out)
}

/// Digits needed to print indices `0..count`.
fn width_for_count(count: usize) -> usize {
    count.saturating_sub(1).max(1).ilog10() as usize + 1
}

fn dump_meta(out: &mut String, module: &Module, c: &Colors) {
    let code = module.code();
    let magic = module.header().magic;

    writeln!(out, "{}[module]{}", c.section, c.reset).unwrap();
    writeln!(
        out,
        "magic    {:02x}{:02x}{:02x}{:02x}",
        magic[0], magic[1], magic[2], magic[3]
    )
    .unwrap();
    writeln!(out, "name     {}", code.name).unwrap();
    writeln!(out, "filename {}", code.filename).unwrap();
    writeln!(out, "stack    {}", code.stack_size).unwrap();
    writeln!(out, "flags    {:#x}", code.flags).unwrap();
    out.push('\n');
}

fn dump_consts(out: &mut String, code: &CodeObject, c: &Colors) {
    let w = width_for_count(code.consts.len());
    writeln!(out, "{}[consts]{}", c.section, c.reset).unwrap();
    for (i, value) in code.consts.iter().enumerate() {
        writeln!(out, "C{i:0w$} {}{value}{}", c.literal, c.reset).unwrap();
    }
    out.push('\n');
}

fn dump_names(out: &mut String, code: &CodeObject, c: &Colors) {
    let w = width_for_count(code.names.len());
    writeln!(out, "{}[names]{}", c.section, c.reset).unwrap();
    for (i, name) in code.names.iter().enumerate() {
        writeln!(out, "N{i:0w$} {}{name}{}", c.literal, c.reset).unwrap();
    }
    out.push('\n');
}

fn dump_code(out: &mut String, code: &CodeObject, instructions: &[Decoded], c: &Colors) {
    let targets: BTreeSet<u32> = instructions
        .iter()
        .filter(|i| i.opcode.arg_kind() == ArgKind::Jump)
        .map(|i| i.arg)
        .collect();

    let total_words = code.code.len() / 2;
    let w = width_for_count(total_words);

    writeln!(out, "{}[code]{}", c.section, c.reset).unwrap();
    for instr in instructions {
        let marker = if targets.contains(&instr.offset) {
            ">>"
        } else {
            "  "
        };
        let mut line = format!("{}{marker} {:>w$}{}  ", c.comment, instr.offset, c.reset);

        if !instr.opcode.has_arg() {
            write!(line, "{}{}{}", c.opcode, instr.opcode.name(), c.reset).unwrap();
            writeln!(out, "{line}").unwrap();
            continue;
        }

        write!(
            line,
            "{}{:<NAME_WIDTH$}{} {}",
            c.opcode,
            instr.opcode.name(),
            c.reset,
            instr.arg
        )
        .unwrap();

        if let Some(comment) = describe_arg(code, instr) {
            write!(line, "  {}; {comment}{}", c.comment, c.reset).unwrap();
        }
        writeln!(out, "{line}").unwrap();
    }
}

/// Resolve an operand to what it refers to.
fn describe_arg(code: &CodeObject, instr: &Decoded) -> Option<String> {
    let index = instr.arg as usize;
    match instr.opcode.arg_kind() {
        ArgKind::Const => Some(match code.consts.get(index) {
            Some(value) => value.to_string(),
            None => "<invalid const>".to_string(),
        }),
        ArgKind::Name => Some(match code.names.get(index) {
            Some(name) => name.clone(),
            None => "<invalid name>".to_string(),
        }),
        ArgKind::Compare => Some(match u8::try_from(instr.arg).ok().and_then(CompareOp::from_u8) {
            Some(op) => op.symbol().to_string(),
            None => "<invalid compare>".to_string(),
        }),
        ArgKind::Jump => Some(format!("to {}", instr.arg)),
        ArgKind::Count | ArgKind::Extended | ArgKind::None => None,
    }
}
