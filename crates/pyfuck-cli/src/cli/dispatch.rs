//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs that mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors
//! - `Into<*Args>` impls to bridge dispatch → command handlers

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::compile::CompileArgs;
use crate::commands::dump::{DumpArgs, DumpInput};

pub struct CompileParams {
    pub source_path: PathBuf,
    pub output: PathBuf,
    pub cells: u32,
    pub color: ColorChoice,
}

impl CompileParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m
                .get_one::<PathBuf>("source_path")
                .cloned()
                .unwrap_or_default(),
            output: m
                .get_one::<PathBuf>("output")
                .cloned()
                .unwrap_or_else(|| PathBuf::from("out.pyc")),
            cells: parse_cells(m),
            color: parse_color(m),
        }
    }
}

impl From<CompileParams> for CompileArgs {
    fn from(p: CompileParams) -> Self {
        Self {
            source_path: p.source_path,
            output: p.output,
            cells: p.cells,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub source_path: Option<PathBuf>,
    pub pyc_path: Option<PathBuf>,
    pub cells: u32,
    pub json: bool,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            pyc_path: m.get_one::<PathBuf>("pyc_path").cloned(),
            cells: parse_cells(m),
            json: m.get_flag("json"),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        // `--pyc` wins; clap rejects giving both.
        let input = match (p.pyc_path, p.source_path) {
            (Some(path), _) => DumpInput::Pyc(path),
            (None, path) => DumpInput::Source(path.unwrap_or_default()),
        };
        Self {
            input,
            cells: p.cells,
            json: p.json,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_cells(m: &ArgMatches) -> u32 {
    m.get_one::<u32>("cells")
        .copied()
        .unwrap_or(pyfuck_compiler::options::DEFAULT_MEMORY_CELLS)
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

/// Log level requested by `-v` occurrences.
pub fn verbosity(m: &ArgMatches) -> u8 {
    m.get_one::<u8>("verbose").copied().unwrap_or(0)
}
