//! Operator alphabet and run-length tokenization.

use std::ops::Range;

use pyfuck_bytecode::EncodeError;

/// One of the eight source operators.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Op {
    /// `>`
    Right,
    /// `<`
    Left,
    /// `+`
    Increment,
    /// `-`
    Decrement,
    /// `.`
    Output,
    /// `,`
    Input,
    /// `[`
    LoopStart,
    /// `]`
    LoopEnd,
}

impl Op {
    pub fn from_char(c: char) -> Option<Self> {
        Some(match c {
            '>' => Self::Right,
            '<' => Self::Left,
            '+' => Self::Increment,
            '-' => Self::Decrement,
            '.' => Self::Output,
            ',' => Self::Input,
            '[' => Self::LoopStart,
            ']' => Self::LoopEnd,
            _ => return None,
        })
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Right => '>',
            Self::Left => '<',
            Self::Increment => '+',
            Self::Decrement => '-',
            Self::Output => '.',
            Self::Input => ',',
            Self::LoopStart => '[',
            Self::LoopEnd => ']',
        }
    }

    /// Whether a run folds into one parameterized emission.
    ///
    /// I/O and loop brackets have per-character effects and are emitted once
    /// per occurrence.
    pub fn is_foldable(self) -> bool {
        matches!(
            self,
            Self::Right | Self::Left | Self::Increment | Self::Decrement
        )
    }
}

/// A run of one operator.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Token {
    pub op: Op,
    /// Number of occurrences in the run, at least 1.
    pub count: u32,
    /// Byte offset of every occurrence, in source order.
    pub offsets: Vec<usize>,
}

impl Token {
    /// Byte range from the first occurrence to just past the last.
    pub fn span(&self) -> Range<usize> {
        match (self.offsets.first(), self.offsets.last()) {
            (Some(&start), Some(&end)) => start..end + 1,
            _ => 0..0,
        }
    }

    /// Extend the run by one occurrence at `offset`.
    pub fn push(&mut self, offset: usize) -> Result<(), EncodeError> {
        self.count = self
            .count
            .checked_add(1)
            .ok_or(EncodeError::OperandOverflow(i64::from(u32::MAX) + 1))?;
        self.offsets.push(offset);
        Ok(())
    }
}

/// Filter `source` to operator characters and group consecutive repeats.
///
/// Fails only if a single run outgrows the 32-bit repeat count.
pub fn tokenize(source: &str) -> Result<Vec<Token>, EncodeError> {
    let mut tokens: Vec<Token> = Vec::new();

    for (offset, c) in source.char_indices() {
        let Some(op) = Op::from_char(c) else {
            continue;
        };

        match tokens.last_mut() {
            Some(last) if last.op == op => last.push(offset)?,
            _ => tokens.push(Token {
                op,
                count: 1,
                offsets: vec![offset],
            }),
        }
    }

    Ok(tokens)
}
