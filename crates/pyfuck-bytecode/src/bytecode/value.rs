//! Simple constant values referenced from code objects.

use std::fmt;

use serde::Serialize;

/// A constant as stored in a code object's `co_consts`.
///
/// Equality is structural and typed: `Int(1)` and `Bool(true)` are distinct.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Constant {
    None,
    Bool(bool),
    Int(i64),
    Str(String),
    Bytes(Vec<u8>),
    Tuple(Vec<Constant>),
}

impl Constant {
    /// Human-readable kind name, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Str(_) => "str",
            Self::Bytes(_) => "bytes",
            Self::Tuple(_) => "tuple",
        }
    }

    /// Whether the value can live in a simple (flat) tuple.
    pub fn is_simple(&self) -> bool {
        !matches!(self, Self::Tuple(_))
    }
}

/// Python `repr()`-style rendering.
impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Str(s) => write!(f, "'{}'", s.escape_default()),
            Self::Bytes(b) => write!(f, "b'{}'", b.escape_ascii()),
            Self::Tuple(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl From<i64> for Constant {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for Constant {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<bool> for Constant {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Constant {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<String> for Constant {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Vec<u8>> for Constant {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}
