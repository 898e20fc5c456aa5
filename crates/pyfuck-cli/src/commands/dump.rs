use std::fs;
use std::path::PathBuf;

use pyfuck_bytecode::{Colors, Module, dump};

use super::compile::compile_source;
use super::source_loader::load_source;
use super::{CommandError, fail};

/// What to disassemble.
pub enum DumpInput {
    /// Compile this Brainfuck file first.
    Source(PathBuf),
    /// Load an existing module.
    Pyc(PathBuf),
}

pub struct DumpArgs {
    pub input: DumpInput,
    pub cells: u32,
    pub json: bool,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    match render(&args) {
        Ok(out) => print!("{out}"),
        Err(err) => fail(&err, args.color),
    }
}

/// Produce the listing (or JSON) for the requested input.
pub fn render(args: &DumpArgs) -> Result<String, CommandError> {
    let bytes = match &args.input {
        DumpInput::Source(path) => compile_source(&load_source(path)?, args.cells)?,
        DumpInput::Pyc(path) => fs::read(path).map_err(|source| CommandError::Read {
            path: path.clone(),
            source,
        })?,
    };

    let module = Module::load(&bytes)?;
    if args.json {
        let mut out = serde_json::to_string_pretty(&module)?;
        out.push('\n');
        return Ok(out);
    }

    Ok(dump(&module, Colors::new(args.color))?)
}
