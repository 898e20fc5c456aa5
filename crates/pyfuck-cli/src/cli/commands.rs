//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("pyfuck")
        .about("Compile Brainfuck to CPython 3.10 bytecode")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(compile_command())
        .subcommand(dump_command())
}

/// Compile a source file into a `.pyc` module.
pub fn compile_command() -> Command {
    Command::new("compile")
        .about("Compile a Brainfuck program into a .pyc module")
        .override_usage(
            "\
  pyfuck compile <SOURCE> [-o <FILE>] [--cells <N>]",
        )
        .after_help(
            r#"EXAMPLES:
  pyfuck compile hello.bf               # writes out.pyc
  pyfuck compile hello.bf -o hello.pyc  # choose the output file
  pyfuck compile hello.bf --cells 30000 # larger memory
  python3.10 out.pyc                    # run the result"#,
        )
        .arg(source_path_arg().required(true))
        .arg(output_file_arg())
        .arg(cells_arg())
        .arg(color_arg())
}

/// Disassemble a compiled module.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Show the bytecode of a program or an existing .pyc")
        .override_usage(
            "\
  pyfuck dump <SOURCE> [--cells <N>]
  pyfuck dump --pyc <FILE>",
        )
        .after_help(
            r#"EXAMPLES:
  pyfuck dump hello.bf                  # compile and disassemble
  pyfuck dump --pyc out.pyc             # disassemble an existing module
  pyfuck dump hello.bf --json           # code object as JSON"#,
        )
        .arg(source_path_arg().required_unless_present("pyc_path"))
        .arg(pyc_path_arg())
        .arg(cells_arg())
        .arg(json_arg())
        .arg(color_arg())
}
