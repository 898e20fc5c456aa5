//! Drive an emission context from a token stream.

use crate::Result;
use crate::emit::EmissionContext;

use super::token::{Op, Token};

/// Emit the program body for `tokens`.
///
/// Init and terminate bracketing is left to the caller.
pub fn translate(tokens: &[Token], ctx: &mut EmissionContext) -> Result<()> {
    for token in tokens {
        match token.op {
            Op::Right => ctx.increment_pointer(token.count)?,
            Op::Left => ctx.decrement_pointer(token.count)?,
            Op::Increment => ctx.increment_cell(token.count)?,
            Op::Decrement => ctx.decrement_cell(token.count)?,
            Op::Output => {
                for _ in &token.offsets {
                    ctx.output_cell()?;
                }
            }
            Op::Input => {
                for _ in &token.offsets {
                    ctx.input_cell()?;
                }
            }
            Op::LoopStart => {
                for &offset in &token.offsets {
                    ctx.loop_start(offset);
                }
            }
            Op::LoopEnd => {
                for &offset in &token.offsets {
                    ctx.loop_end(offset)?;
                }
            }
        }
    }
    Ok(())
}
