//! `.pyc` container format for CPython 3.10.
//!
//! Layout: 16-byte module header, then one marshalled code object.
//! See `header` for the header fields and `marshal` for the object encoding.

mod constants;
mod dump;
mod error;
mod header;
mod instructions;
mod marshal;
mod module;
mod opcode;
mod value;

#[cfg(test)]
mod instructions_tests;

pub use constants::{CO_NOFREE, FLAG_REF, HEADER_SIZE, MAGIC, STACK_SIZE, TypeTag, WORD_SIZE};
pub use dump::dump;
pub use error::EncodeError;
pub use header::Header;
pub use instructions::{Decoded, Instruction, decode};
pub use marshal::MarshalWriter;
pub use module::{CodeObject, Module, ModuleError};
pub use opcode::{ArgKind, CompareOp, Opcode};
pub use value::Constant;
