//! Loading `.pyc` bytes back into an inspectable module.
//!
//! The reader understands the marshal subset `MarshalWriter` produces, plus
//! back-references (`r`), so files written by CPython itself load as long as
//! they stay within the same object kinds.

use serde::Serialize;

use super::constants::{FLAG_REF, HEADER_SIZE, TypeTag};
use super::header::Header;
use super::value::Constant;

/// Error loading a module.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModuleError {
    #[error("file too small: {0} bytes (minimum 16)")]
    FileTooSmall(usize),
    #[error("invalid magic: expected 6f 0d 0d 0a (CPython 3.10)")]
    InvalidMagic,
    #[error("unexpected end of data at offset {0}")]
    UnexpectedEof(usize),
    #[error("unknown marshal type {0:#04x}")]
    UnknownType(u8),
    #[error("invalid back-reference {0}")]
    InvalidRef(u32),
    #[error("string is not valid UTF-8")]
    InvalidUtf8,
    #[error("{0} trailing bytes after code object")]
    TrailingBytes(usize),
    #[error("expected {expected}, found {found}")]
    Unexpected {
        expected: &'static str,
        found: &'static str,
    },
    #[error("unknown opcode {0}")]
    UnknownOpcode(u8),
    #[error("code string of {0} bytes ends mid-instruction")]
    TruncatedCode(usize),
    #[error("objects nested more than {0} levels deep")]
    NestingTooDeep(usize),
}

/// Deepest container nesting the reader follows. Emitted modules use two
/// levels (code object, then its tuples).
pub const MAX_NESTING: usize = 64;

/// A module-level code object, field order as marshalled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CodeObject {
    pub arg_count: u32,
    pub posonly_arg_count: u32,
    pub kwonly_arg_count: u32,
    pub nlocals: u32,
    pub stack_size: u32,
    pub flags: u32,
    #[serde(serialize_with = "serialize_hex")]
    pub code: Vec<u8>,
    pub consts: Vec<Constant>,
    pub names: Vec<String>,
    pub varnames: Vec<String>,
    pub freevars: Vec<String>,
    pub cellvars: Vec<String>,
    pub filename: String,
    pub name: String,
    pub first_line: i32,
    #[serde(serialize_with = "serialize_hex")]
    pub line_table: Vec<u8>,
}

fn serialize_hex<S: serde::Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    s.serialize_str(&hex)
}

/// A loaded `.pyc` file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Module {
    #[serde(skip)]
    header: Header,
    code: CodeObject,
}

impl Module {
    /// Parse a complete `.pyc` image.
    pub fn load(bytes: &[u8]) -> Result<Self, ModuleError> {
        let header = Header::from_bytes(bytes).ok_or(ModuleError::FileTooSmall(bytes.len()))?;
        if !header.validate_magic() {
            return Err(ModuleError::InvalidMagic);
        }

        let mut reader = Reader::new(bytes, HEADER_SIZE);
        let code = match reader.read_object()? {
            Object::Code(code) => *code,
            other => {
                return Err(ModuleError::Unexpected {
                    expected: "code object",
                    found: other.kind(),
                });
            }
        };

        let rest = bytes.len() - reader.pos;
        if rest != 0 {
            return Err(ModuleError::TrailingBytes(rest));
        }

        Ok(Self { header, code })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn code(&self) -> &CodeObject {
        &self.code
    }
}

/// Any object the reader can produce.
#[derive(Clone, Debug)]
enum Object {
    Const(Constant),
    Code(Box<CodeObject>),
}

impl Object {
    fn kind(&self) -> &'static str {
        match self {
            Self::Const(c) => c.kind(),
            Self::Code(_) => "code",
        }
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
    /// Reference table; `None` marks a slot reserved by an object still being read.
    refs: Vec<Option<Object>>,
    /// Containers currently open.
    depth: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8], pos: usize) -> Self {
        Self {
            bytes,
            pos,
            refs: Vec::new(),
            depth: 0,
        }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], ModuleError> {
        let end = self.pos + n;
        if end > self.bytes.len() {
            return Err(ModuleError::UnexpectedEof(self.pos));
        }
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8, ModuleError> {
        Ok(self.take(1)?[0])
    }

    fn u32(&mut self) -> Result<u32, ModuleError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn i32(&mut self) -> Result<i32, ModuleError> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn read_object(&mut self) -> Result<Object, ModuleError> {
        let raw = self.u8()?;
        let tag = TypeTag::from_u8(raw).ok_or(ModuleError::UnknownType(raw))?;
        let flagged = raw & FLAG_REF != 0;

        let object = match tag {
            TypeTag::None => Object::Const(Constant::None),
            TypeTag::False => Object::Const(Constant::Bool(false)),
            TypeTag::True => Object::Const(Constant::Bool(true)),
            TypeTag::Int => Object::Const(Constant::Int(i64::from(self.i32()?))),
            TypeTag::Bytes => {
                let len = self.u32()? as usize;
                Object::Const(Constant::Bytes(self.take(len)?.to_vec()))
            }
            TypeTag::ShortAscii | TypeTag::ShortAsciiInterned => {
                let len = self.u8()? as usize;
                let text = std::str::from_utf8(self.take(len)?)
                    .map_err(|_| ModuleError::InvalidUtf8)?;
                Object::Const(Constant::Str(text.to_owned()))
            }
            // Containers take their reference slot before their children.
            TypeTag::SmallTuple => {
                let len = self.u8()? as usize;
                let slot = flagged.then(|| self.reserve());
                self.descend()?;
                let mut items = Vec::with_capacity(len);
                for _ in 0..len {
                    items.push(self.read_constant()?);
                }
                self.depth -= 1;
                let tuple = Object::Const(Constant::Tuple(items));
                if let Some(slot) = slot {
                    self.refs[slot] = Some(tuple.clone());
                }
                return Ok(tuple);
            }
            TypeTag::Ref => {
                let index = self.u32()?;
                return self
                    .refs
                    .get(index as usize)
                    .cloned()
                    .flatten()
                    .ok_or(ModuleError::InvalidRef(index));
            }
            TypeTag::Code => {
                let slot = flagged.then(|| self.reserve());
                self.descend()?;
                let code = Object::Code(Box::new(self.read_code()?));
                self.depth -= 1;
                if let Some(slot) = slot {
                    self.refs[slot] = Some(code.clone());
                }
                return Ok(code);
            }
        };

        if flagged {
            self.refs.push(Some(object.clone()));
        }
        Ok(object)
    }

    fn descend(&mut self) -> Result<(), ModuleError> {
        if self.depth == MAX_NESTING {
            return Err(ModuleError::NestingTooDeep(MAX_NESTING));
        }
        self.depth += 1;
        Ok(())
    }

    fn reserve(&mut self) -> usize {
        self.refs.push(None);
        self.refs.len() - 1
    }

    fn read_constant(&mut self) -> Result<Constant, ModuleError> {
        match self.read_object()? {
            Object::Const(c) => Ok(c),
            Object::Code(_) => Err(ModuleError::Unexpected {
                expected: "constant",
                found: "code",
            }),
        }
    }

    fn read_bytes(&mut self) -> Result<Vec<u8>, ModuleError> {
        match self.read_constant()? {
            Constant::Bytes(b) => Ok(b),
            other => Err(ModuleError::Unexpected {
                expected: "bytes",
                found: other.kind(),
            }),
        }
    }

    fn read_str(&mut self) -> Result<String, ModuleError> {
        match self.read_constant()? {
            Constant::Str(s) => Ok(s),
            other => Err(ModuleError::Unexpected {
                expected: "str",
                found: other.kind(),
            }),
        }
    }

    fn read_tuple(&mut self) -> Result<Vec<Constant>, ModuleError> {
        match self.read_constant()? {
            Constant::Tuple(items) => Ok(items),
            other => Err(ModuleError::Unexpected {
                expected: "tuple",
                found: other.kind(),
            }),
        }
    }

    fn read_str_tuple(&mut self) -> Result<Vec<String>, ModuleError> {
        self.read_tuple()?
            .into_iter()
            .map(|item| match item {
                Constant::Str(s) => Ok(s),
                other => Err(ModuleError::Unexpected {
                    expected: "str",
                    found: other.kind(),
                }),
            })
            .collect()
    }

    fn read_code(&mut self) -> Result<CodeObject, ModuleError> {
        Ok(CodeObject {
            arg_count: self.u32()?,
            posonly_arg_count: self.u32()?,
            kwonly_arg_count: self.u32()?,
            nlocals: self.u32()?,
            stack_size: self.u32()?,
            flags: self.u32()?,
            code: self.read_bytes()?,
            consts: self.read_tuple()?,
            names: self.read_str_tuple()?,
            varnames: self.read_str_tuple()?,
            freevars: self.read_str_tuple()?,
            cellvars: self.read_str_tuple()?,
            filename: self.read_str()?,
            name: self.read_str()?,
            first_line: self.i32()?,
            line_table: self.read_bytes()?,
        })
    }
}
