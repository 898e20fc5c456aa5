//! Source text handling: run-length tokenizer and operator dispatch.
//!
//! Only the eight operator characters carry meaning; everything else is a
//! comment and is dropped before runs are formed, so `+ +` is one run of two.

mod token;
mod translate;

#[cfg(test)]
mod translate_tests;

pub use token::{Op, Token, tokenize};
pub use translate::translate;
