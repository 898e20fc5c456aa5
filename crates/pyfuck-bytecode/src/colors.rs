//! Terminal styling for the disassembly dump.

/// ANSI escape sequences per dump element. Empty strings disable styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colors {
    /// `[consts]`-style section titles.
    pub section: &'static str,
    /// Opcode mnemonics.
    pub opcode: &'static str,
    /// Constant values and identifiers.
    pub literal: &'static str,
    /// Offsets, jump markers and `;` comments.
    pub comment: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::PLAIN
    }
}

impl Colors {
    pub const ANSI: Self = Self {
        section: "\x1b[1;34m",
        opcode: "\x1b[34m",
        literal: "\x1b[32m",
        comment: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const PLAIN: Self = Self {
        section: "",
        opcode: "",
        literal: "",
        comment: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ANSI } else { Self::PLAIN }
    }
}
