//! Serialization of a finished emission context into a `.pyc` image.
//!
//! Layout: 16-byte header, then one marshalled module code object. Only the
//! interned/referenceable objects (the code object and every string) enter the
//! reference table; tuples and scalars are written untagged.

use pyfuck_bytecode::{CO_NOFREE, Header, MarshalWriter, STACK_SIZE};

use crate::Result;
use crate::options::CompileOptions;

use super::context::EmissionContext;

/// `co_firstlineno` of the emitted module; there is no line table to anchor.
const FIRST_LINE: i32 = -1;

const NO_NAMES: [&str; 0] = [];

/// Writes one module image. Each call to [`write`](Self::write) starts a fresh
/// reference table.
pub struct ContainerWriter<'o> {
    options: &'o CompileOptions,
}

impl<'o> ContainerWriter<'o> {
    pub fn new(options: &'o CompileOptions) -> Self {
        Self { options }
    }

    pub fn write(&self, ctx: &EmissionContext) -> Result<Vec<u8>> {
        debug_assert!(
            ctx.max_stack_depth() <= STACK_SIZE,
            "stack depth {} exceeds declared {STACK_SIZE}",
            ctx.max_stack_depth()
        );

        let mut w = MarshalWriter::with_prefix(&Header::default().to_bytes());

        w.write_code_tag();
        w.write_u32(0); // argcount
        w.write_u32(0); // posonlyargcount
        w.write_u32(0); // kwonlyargcount
        w.write_u32(0); // nlocals
        w.write_u32(STACK_SIZE);
        w.write_u32(CO_NOFREE);

        w.write_bytes(&ctx.code())?;
        w.write_simple_tuple(ctx.consts().iter())?;
        w.write_name_tuple(ctx.names().iter())?;

        // varnames, freevars, cellvars
        for _ in 0..3 {
            w.write_name_tuple(NO_NAMES)?;
        }

        w.write_short_str(&self.options.filename)?;
        w.write_interned_str(&self.options.unit_name)?;
        w.write_i32(FIRST_LINE);
        w.write_bytes(&[])?;

        tracing::debug!(refs = w.refs().len(), "marshalled code object");
        Ok(w.into_bytes())
    }
}
