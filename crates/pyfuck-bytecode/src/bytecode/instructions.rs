//! Instruction words and the operand encoder.
//!
//! Every instruction is one or more 2-byte words. Operands above 255 are split
//! across EXTENDED_ARG prefix words, most significant byte first; the word
//! carrying the opcode holds the low byte.

use super::constants::WORD_SIZE;
use super::error::EncodeError;
use super::module::ModuleError;
use super::opcode::Opcode;

/// A logical instruction: an opcode and its full-width operand.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Instruction {
    pub opcode: Opcode,
    pub arg: u32,
}

impl Instruction {
    pub fn new(opcode: Opcode, arg: u32) -> Self {
        Self { opcode, arg }
    }

    /// Build from a signed operand, rejecting values the format cannot carry.
    pub fn try_new(opcode: Opcode, arg: i64) -> Result<Self, EncodeError> {
        let arg = u32::try_from(arg).map_err(|_| EncodeError::OperandOverflow(arg))?;
        Ok(Self::new(opcode, arg))
    }

    /// Number of words this instruction occupies, prefixes included.
    pub fn code_units(&self) -> u32 {
        match self.arg {
            0..=0xFF => 1,
            0x100..=0xFFFF => 2,
            0x1_0000..=0xFF_FFFF => 3,
            _ => 4,
        }
    }

    /// Size in bytes, prefixes included.
    pub fn size(&self) -> usize {
        self.code_units() as usize * WORD_SIZE
    }

    /// Append the encoded words to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        if self.arg > 0xFF {
            Instruction::new(Opcode::ExtendedArg, self.arg >> 8).encode_into(out);
        }
        out.push(self.opcode as u8);
        out.push((self.arg & 0xFF) as u8);
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size());
        self.encode_into(&mut out);
        out
    }
}

/// An instruction recovered from a code string.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Decoded {
    /// Word offset of the first word (the outermost prefix, if any).
    pub offset: u32,
    pub opcode: Opcode,
    pub arg: u32,
    /// Number of EXTENDED_ARG words folded into `arg`.
    pub prefixes: u32,
}

/// Decode a code string, folding EXTENDED_ARG prefixes into their instruction.
pub fn decode(code: &[u8]) -> Result<Vec<Decoded>, ModuleError> {
    if code.len() % WORD_SIZE != 0 {
        return Err(ModuleError::TruncatedCode(code.len()));
    }

    let mut out = Vec::with_capacity(code.len() / WORD_SIZE);
    let mut start = 0u32;
    let mut ext = 0u32;
    let mut prefixes = 0u32;

    for (i, word) in code.chunks_exact(WORD_SIZE).enumerate() {
        let opcode = Opcode::from_u8(word[0]).ok_or(ModuleError::UnknownOpcode(word[0]))?;
        let arg = ext | u32::from(word[1]);

        if opcode == Opcode::ExtendedArg {
            if prefixes == 0 {
                start = i as u32;
            }
            prefixes += 1;
            ext = arg << 8;
            continue;
        }

        let offset = if prefixes == 0 { i as u32 } else { start };
        out.push(Decoded {
            offset,
            opcode,
            arg,
            prefixes,
        });
        ext = 0;
        prefixes = 0;
    }

    if prefixes != 0 {
        return Err(ModuleError::TruncatedCode(code.len()));
    }

    Ok(out)
}
