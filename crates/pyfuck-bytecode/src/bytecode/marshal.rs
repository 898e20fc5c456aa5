//! Marshal object writer.
//!
//! Writes the subset of CPython's marshal format a module code object needs.
//! Objects written with `FLAG_REF` are appended to the reference table in the
//! order they are written; a reader resolves later back-references purely by
//! table index, so that order must never change.

use super::constants::TypeTag;
use super::error::EncodeError;
use super::value::Constant;

/// Byte sink plus the reference table for one serialized object graph.
///
/// Create a fresh writer per compilation; indices continue from wherever the
/// previous object graph left off otherwise.
#[derive(Debug, Default)]
pub struct MarshalWriter {
    buf: Vec<u8>,
    /// Tag byte of every referenceable object, indexed by reference number.
    refs: Vec<u8>,
}

impl MarshalWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing buffer (e.g. one holding the module header).
    pub fn with_prefix(prefix: &[u8]) -> Self {
        Self {
            buf: prefix.to_vec(),
            refs: Vec::new(),
        }
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The reference table: one tag byte per registered object.
    pub fn refs(&self) -> &[u8] {
        &self.refs
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Register the object just written; returns its reference index.
    fn register(&mut self, tag: u8) -> u32 {
        self.refs.push(tag);
        (self.refs.len() - 1) as u32
    }

    pub fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    pub fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Code object tag. Registered before its fields, matching the reader's
    /// reserve-then-fill order.
    pub fn write_code_tag(&mut self) -> u32 {
        let tag = TypeTag::Code.with_ref();
        self.write_u8(tag);
        self.register(tag)
    }

    pub fn write_none(&mut self) {
        self.write_u8(TypeTag::None as u8);
    }

    pub fn write_bool(&mut self, v: bool) {
        let tag = if v { TypeTag::True } else { TypeTag::False };
        self.write_u8(tag as u8);
    }

    pub fn write_int(&mut self, v: i64) -> Result<(), EncodeError> {
        let v = i32::try_from(v).map_err(|_| EncodeError::IntOutOfRange(v))?;
        self.write_u8(TypeTag::Int as u8);
        self.write_i32(v);
        Ok(())
    }

    /// Byte string with a 4-byte length.
    pub fn write_bytes(&mut self, b: &[u8]) -> Result<(), EncodeError> {
        let len = u32::try_from(b.len()).map_err(|_| EncodeError::OperandOverflow(b.len() as i64))?;
        self.write_u8(TypeTag::Bytes as u8);
        self.write_u32(len);
        self.write_raw(b);
        Ok(())
    }

    /// Interned short ASCII string (`Z`), registered in the reference table.
    pub fn write_interned_str(&mut self, s: &str) -> Result<u32, EncodeError> {
        self.write_short_ascii(TypeTag::ShortAsciiInterned, s)
    }

    /// Plain short ASCII string (`z`), registered in the reference table.
    pub fn write_short_str(&mut self, s: &str) -> Result<u32, EncodeError> {
        self.write_short_ascii(TypeTag::ShortAscii, s)
    }

    fn write_short_ascii(&mut self, kind: TypeTag, s: &str) -> Result<u32, EncodeError> {
        if s.len() > 255 {
            return Err(EncodeError::StringTooLong(s.len()));
        }
        if !s.is_ascii() {
            return Err(EncodeError::NonAsciiString(s.to_owned()));
        }
        let tag = kind.with_ref();
        self.write_u8(tag);
        self.write_u8(s.len() as u8);
        self.write_raw(s.as_bytes());
        Ok(self.register(tag))
    }

    /// One scalar constant. Strings go out interned.
    pub fn write_constant(&mut self, value: &Constant) -> Result<(), EncodeError> {
        match value {
            Constant::None => self.write_none(),
            Constant::Bool(v) => self.write_bool(*v),
            Constant::Int(v) => self.write_int(*v)?,
            Constant::Str(s) => {
                self.write_interned_str(s)?;
            }
            Constant::Bytes(b) => self.write_bytes(b)?,
            Constant::Tuple(_) => return Err(EncodeError::NestedTuple),
        }
        Ok(())
    }

    /// Small tuple of scalar constants. Not registered in the reference table.
    pub fn write_simple_tuple<'c, I>(&mut self, elements: I) -> Result<(), EncodeError>
    where
        I: IntoIterator<Item = &'c Constant>,
        I::IntoIter: ExactSizeIterator,
    {
        let elements = elements.into_iter();
        self.write_tuple_head(elements.len())?;
        for element in elements {
            self.write_constant(element)?;
        }
        Ok(())
    }

    /// Small tuple of identifiers, each an interned string.
    pub fn write_name_tuple<I, S>(&mut self, names: I) -> Result<(), EncodeError>
    where
        I: IntoIterator<Item = S>,
        I::IntoIter: ExactSizeIterator,
        S: AsRef<str>,
    {
        let names = names.into_iter();
        self.write_tuple_head(names.len())?;
        for name in names {
            self.write_interned_str(name.as_ref())?;
        }
        Ok(())
    }

    fn write_tuple_head(&mut self, len: usize) -> Result<(), EncodeError> {
        if len > 255 {
            return Err(EncodeError::TupleTooLarge(len));
        }
        self.write_u8(TypeTag::SmallTuple as u8);
        self.write_u8(len as u8);
        Ok(())
    }
}
