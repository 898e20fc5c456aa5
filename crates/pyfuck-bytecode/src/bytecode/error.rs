//! Error types for bytecode encoding.

/// A value does not fit the width the format reserves for it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// Operand is negative or wider than 32 bits.
    #[error("operand out of range: {0} (expected 0..=4294967295)")]
    OperandOverflow(i64),

    /// Short strings carry a one-byte length.
    #[error("string too long: {0} bytes (max 255)")]
    StringTooLong(usize),

    /// Small tuples carry a one-byte arity.
    #[error("tuple too large: {0} elements (max 255)")]
    TupleTooLarge(usize),

    /// Integers are written as signed 32-bit values.
    #[error("integer out of range: {0} (expected a signed 32-bit value)")]
    IntOutOfRange(i64),

    /// Short strings are encoded as ASCII.
    #[error("string is not ASCII: {0:?}")]
    NonAsciiString(String),

    /// Simple tuples hold only scalar constants.
    #[error("unsupported constant type: tuple nested inside a simple tuple")]
    NestedTuple,
}
