pub mod compile;
pub mod dump;
pub mod source_loader;

#[cfg(test)]
mod compile_tests;

use std::path::PathBuf;

use pyfuck_bytecode::ModuleError;

/// Failures a command reports before exiting non-zero.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Compile error with the source it points into, for annotated rendering.
    #[error("{error}")]
    Compile {
        error: pyfuck_compiler::Error,
        name: String,
        text: String,
    },

    #[error("invalid module: {0}")]
    Module(#[from] ModuleError),

    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CommandError {
    /// Render for stderr. Compile errors get a source excerpt.
    pub fn render(&self, color: bool) -> String {
        match self {
            Self::Compile { error, name, text } => {
                let mut out = error.printer().source(text).path(name).colored(color).render();
                out.push('\n');
                out
            }
            other => format!("error: {other}\n"),
        }
    }
}

/// Print `err` and exit with status 1.
pub fn fail(err: &CommandError, color: bool) -> ! {
    eprint!("{}", err.render(color));
    std::process::exit(1);
}
