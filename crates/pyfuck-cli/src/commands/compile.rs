use std::fs;
use std::path::{Path, PathBuf};

use pyfuck_compiler::CompileOptions;

use super::source_loader::{Source, load_source};
use super::{CommandError, fail};

pub struct CompileArgs {
    pub source_path: PathBuf,
    pub output: PathBuf,
    pub cells: u32,
    pub color: bool,
}

pub fn run(args: CompileArgs) {
    match execute(&args) {
        Ok(size) => tracing::info!(output = %args.output.display(), size, "wrote module"),
        Err(err) => fail(&err, args.color),
    }
}

/// Compile and write the module; returns the number of bytes written.
///
/// The output file is only touched once compilation has fully succeeded.
pub fn execute(args: &CompileArgs) -> Result<usize, CommandError> {
    let source = load_source(&args.source_path)?;
    let bytes = compile_source(&source, args.cells)?;
    write_output(&args.output, &bytes)?;
    Ok(bytes.len())
}

pub(crate) fn compile_source(source: &Source, cells: u32) -> Result<Vec<u8>, CommandError> {
    let options = CompileOptions::default()
        .with_memory_cells(cells)
        .with_filename(source.module_filename());
    pyfuck_compiler::compile(&source.text, &options).map_err(|error| CommandError::Compile {
        error,
        name: source.name.clone(),
        text: source.text.clone(),
    })
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<(), CommandError> {
    fs::write(path, bytes).map_err(|source| CommandError::Write {
        path: path.to_path_buf(),
        source,
    })
}
