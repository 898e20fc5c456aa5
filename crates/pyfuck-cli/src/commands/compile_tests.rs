use std::fs;

use pyfuck_bytecode::{MAGIC, Module};

use super::CommandError;
use super::compile::{CompileArgs, execute};
use super::source_loader::Source;

fn args(dir: &tempfile::TempDir, source: &str, cells: u32) -> CompileArgs {
    let source_path = dir.path().join("prog.bf");
    fs::write(&source_path, source).unwrap();
    CompileArgs {
        source_path,
        output: dir.path().join("prog.pyc"),
        cells,
        color: false,
    }
}

#[test]
fn writes_loadable_module() {
    let dir = tempfile::tempdir().unwrap();
    let args = args(&dir, "++++++++[>++++++++<-]>+.", 512);

    let size = execute(&args).unwrap();
    let bytes = fs::read(&args.output).unwrap();
    assert_eq!(bytes.len(), size);
    assert_eq!(&bytes[..4], &MAGIC);

    let module = Module::load(&bytes).unwrap();
    assert_eq!(module.code().filename, "prog.bf");
}

#[test]
fn cells_option_sizes_memory() {
    let dir = tempfile::tempdir().unwrap();
    let args = args(&dir, "", 30000);

    execute(&args).unwrap();
    let module = Module::load(&fs::read(&args.output).unwrap()).unwrap();
    assert!(module.code().consts.contains(&pyfuck_bytecode::Constant::Int(30000)));
}

#[test]
fn failed_compile_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let args = args(&dir, "+[\n-]]", 512);

    let err = execute(&args).unwrap_err();
    assert!(!args.output.exists());
    assert!(matches!(
        err,
        CommandError::Compile {
            error: pyfuck_compiler::Error::UnbalancedLoop { offset: 5 },
            ..
        }
    ));

    let rendered = err.render(false);
    assert!(rendered.contains("error: unmatched `]` at offset 5"));
    assert!(rendered.contains("prog.bf:2:3"));
}

#[test]
fn non_ascii_file_name_compiles() {
    let dir = tempfile::tempdir().unwrap();
    let source_path = dir.path().join("héllo.bf");
    fs::write(&source_path, "+.").unwrap();
    let args = CompileArgs {
        source_path,
        output: dir.path().join("hello.pyc"),
        cells: 512,
        color: false,
    };

    execute(&args).unwrap();
    let module = Module::load(&fs::read(&args.output).unwrap()).unwrap();
    let filename = &module.code().filename;
    assert!(filename.is_ascii());
    assert!(filename.starts_with('h') && filename.ends_with("?llo.bf"));
}

#[test]
fn non_ascii_name_still_shown_in_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    let source_path = dir.path().join("ünbalanced.bf");
    fs::write(&source_path, "+]").unwrap();
    let args = CompileArgs {
        source_path,
        output: dir.path().join("out.pyc"),
        cells: 512,
        color: false,
    };

    let rendered = execute(&args).unwrap_err().render(false);
    assert!(rendered.contains("nbalanced.bf:1:2"));
    assert!(!rendered.contains("?nbalanced.bf"));
}

#[test]
fn module_filename_is_capped() {
    let source = Source {
        name: format!("{}é.bf", "a".repeat(300)),
        text: String::new(),
    };

    let filename = source.module_filename();
    assert_eq!(filename.len(), 255);
    assert!(filename.bytes().all(|b| b == b'a'));

    let short = Source {
        name: "ñ-ü.bf".to_owned(),
        text: String::new(),
    };
    assert_eq!(short.module_filename(), "?-?.bf");
}

#[test]
fn missing_source_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let args = CompileArgs {
        source_path: dir.path().join("missing.bf"),
        output: dir.path().join("out.pyc"),
        cells: 512,
        color: false,
    };

    let err = execute(&args).unwrap_err();
    assert!(matches!(err, CommandError::Read { .. }));
    assert!(err.render(false).starts_with("error: failed to read"));
}
