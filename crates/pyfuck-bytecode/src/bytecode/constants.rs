//! Bytecode format constants.

/// Magic bytes identifying a CPython 3.10 `.pyc` file (format number 3439).
pub const MAGIC: [u8; 4] = [0x6f, 0x0d, 0x0d, 0x0a];

/// Module header size in bytes (magic + flags + timestamp + source size).
pub const HEADER_SIZE: usize = 16;

/// Instruction word size in bytes: one opcode byte and one operand byte.
pub const WORD_SIZE: usize = 2;

/// Operand stack size written into the code object header.
///
/// Every operator template is stack-neutral and the deepest one peaks at 5,
/// so a fixed bound is enough.
pub const STACK_SIZE: u32 = 8;

/// `co_flags` value for a module-level unit (CO_NOFREE).
pub const CO_NOFREE: u32 = 0x40;

/// Marks an object as registered in the marshal reference table.
pub const FLAG_REF: u8 = 0x80;

/// Marshal type tags (low seven bits; `FLAG_REF` is or-ed in separately).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum TypeTag {
    None = b'N',
    False = b'F',
    True = b'T',
    Int = b'i',
    Bytes = b's',
    SmallTuple = b')',
    Code = b'c',
    Ref = b'r',
    ShortAscii = b'z',
    ShortAsciiInterned = b'Z',
}

impl TypeTag {
    /// Decode a tag byte, ignoring `FLAG_REF`.
    pub fn from_u8(v: u8) -> Option<Self> {
        let tag = match v & !FLAG_REF {
            b'N' => Self::None,
            b'F' => Self::False,
            b'T' => Self::True,
            b'i' => Self::Int,
            b's' => Self::Bytes,
            b')' => Self::SmallTuple,
            b'c' => Self::Code,
            b'r' => Self::Ref,
            b'z' => Self::ShortAscii,
            b'Z' => Self::ShortAsciiInterned,
            _ => return None,
        };
        Some(tag)
    }

    /// Tag byte with `FLAG_REF` set.
    pub fn with_ref(self) -> u8 {
        self as u8 | FLAG_REF
    }
}
