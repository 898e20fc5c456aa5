use std::fs;
use std::io::{self, Read};
use std::path::Path;

use super::CommandError;

/// Longest `co_filename` a short string can carry.
const MAX_FILENAME: usize = 255;

/// Source text plus the name diagnostics report it under.
pub struct Source {
    pub name: String,
    pub text: String,
}

impl Source {
    /// `name` reduced to what `co_filename` can hold: ASCII, at most 255 bytes.
    /// Every non-ASCII character becomes `?`.
    pub fn module_filename(&self) -> String {
        self.name
            .chars()
            .map(|c| if c.is_ascii() { c } else { '?' })
            .take(MAX_FILENAME)
            .collect()
    }
}

pub fn load_source(path: &Path) -> Result<Source, CommandError> {
    if path.as_os_str() == "-" {
        return load_stdin();
    }

    let text = fs::read_to_string(path).map_err(|source| CommandError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());
    Ok(Source { name, text })
}

fn load_stdin() -> Result<Source, CommandError> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .map_err(|source| CommandError::Read {
            path: "<stdin>".into(),
            source,
        })?;
    Ok(Source {
        name: "<stdin>".to_owned(),
        text,
    })
}
