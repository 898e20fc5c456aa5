//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Brainfuck source file (positional, `-` for stdin).
pub fn source_path_arg() -> Arg {
    Arg::new("source_path")
        .value_name("SOURCE")
        .value_parser(value_parser!(PathBuf))
        .help("Brainfuck source file (- for stdin)")
}

/// Existing module file to inspect (--pyc).
pub fn pyc_path_arg() -> Arg {
    Arg::new("pyc_path")
        .long("pyc")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .conflicts_with("source_path")
        .help("Inspect an existing .pyc file instead of compiling")
}

/// Write output to file (-o/--output).
pub fn output_file_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .default_value("out.pyc")
        .value_parser(value_parser!(PathBuf))
        .help("Write the compiled module to FILE")
}

/// Memory size of the compiled program (--cells).
pub fn cells_arg() -> Arg {
    Arg::new("cells")
        .long("cells")
        .value_name("N")
        .default_value("512")
        .value_parser(value_parser!(u32).range(1..))
        .help("Number of memory cells")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Output JSON (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print the code object as JSON")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .global(true)
        .help("Verbosity level (-v for debug logs, -vv for trace logs)")
}
