//! Brainfuck compiler targeting CPython 3.10 module files.
//!
//! This crate provides the compilation pipeline:
//! - `source` - run-length tokenizer and the operator dispatch
//! - `emit` - emission context, constant/name pools, container writer
//! - `diagnostics` - rendering loop errors against the source
//! - `options` - compile-time configuration

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod emit;
pub mod options;
pub mod source;


use pyfuck_bytecode::EncodeError;

pub use diagnostics::DiagnosticsPrinter;
pub use emit::{ContainerWriter, EmissionContext};
pub use options::CompileOptions;

/// Errors that can occur during compilation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An operand, length or value does not fit the container format.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// A `]` with no open loop.
    #[error("unmatched `]` at offset {offset}")]
    UnbalancedLoop { offset: usize },

    /// A `[` still open at end of input.
    #[error("unclosed `[` at offset {offset}")]
    UnclosedLoop { offset: usize },

    /// A value the constant pool cannot hold.
    #[error("unsupported constant type: {0}")]
    UnsupportedConstant(&'static str),
}

impl Error {
    /// Byte offset in the source the error points at, if any.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::UnbalancedLoop { offset } | Self::UnclosedLoop { offset } => Some(*offset),
            Self::Encode(_) | Self::UnsupportedConstant(_) => None,
        }
    }
}

/// Result type for compilation.
pub type Result<T> = std::result::Result<T, Error>;

/// Compile Brainfuck source text into a complete `.pyc` image.
///
/// Either the whole image is produced or an error is returned; there is no
/// partial output.
pub fn compile(source: &str, options: &CompileOptions) -> Result<Vec<u8>> {
    let tokens = source::tokenize(source)?;
    tracing::debug!(
        bytes = source.len(),
        tokens = tokens.len(),
        "tokenized source"
    );

    let mut ctx = EmissionContext::new();
    ctx.init_program(options)?;
    source::translate(&tokens, &mut ctx)?;
    ctx.terminate()?;
    tracing::debug!(
        instructions = ctx.instructions().len(),
        words = ctx.code_units(),
        consts = ctx.consts().len(),
        names = ctx.names().len(),
        max_stack = ctx.max_stack_depth(),
        "emitted code"
    );

    let bytes = ContainerWriter::new(options).write(&ctx)?;
    tracing::debug!(size = bytes.len(), "serialized module");
    Ok(bytes)
}
