//! Compile-time configuration.

/// Cells in the memory buffer when nothing else is requested.
pub const DEFAULT_MEMORY_CELLS: u32 = 512;

/// Options for a single compilation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileOptions {
    /// Size of the zero-filled memory buffer allocated at program start.
    pub memory_cells: u32,
    /// `co_filename` of the produced code object.
    pub filename: String,
    /// `co_name` of the produced code object.
    pub unit_name: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            memory_cells: DEFAULT_MEMORY_CELLS,
            filename: "<brainfuck>".to_owned(),
            unit_name: "<module>".to_owned(),
        }
    }
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_memory_cells(mut self, cells: u32) -> Self {
        self.memory_cells = cells;
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn with_unit_name(mut self, name: impl Into<String>) -> Self {
        self.unit_name = name.into();
        self
    }
}
