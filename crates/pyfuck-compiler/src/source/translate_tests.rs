use indoc::indoc;
use pyfuck_bytecode::{Constant, Opcode};

use super::{tokenize, translate};
use crate::Error;
use crate::emit::EmissionContext;

fn body(source: &str) -> crate::Result<EmissionContext> {
    let mut ctx = EmissionContext::new();
    translate(&tokenize(source)?, &mut ctx)?;
    Ok(ctx)
}

fn count(ctx: &EmissionContext, opcode: Opcode) -> usize {
    ctx.instructions()
        .iter()
        .filter(|i| i.opcode == opcode)
        .count()
}

#[test]
fn runs_fold_into_single_emissions() {
    let ctx = body(">>>+++").unwrap();

    // One pointer template (4) and one cell template (10).
    assert_eq!(ctx.instructions().len(), 14);
    assert_eq!(count(&ctx, Opcode::InplaceAdd), 2);
    let consts: Vec<&Constant> = ctx.consts().iter().collect();
    assert_eq!(consts, [&Constant::Int(3), &Constant::Int(256)]);
}

#[test]
fn io_runs_emit_per_character() {
    let ctx = body(",,...").unwrap();

    assert_eq!(count(&ctx, Opcode::CallFunction), 5);
    assert_eq!(count(&ctx, Opcode::LoadMethod), 5);
}

#[test]
fn balanced_loops_close() {
    let ctx = body(indoc! {"
        ++[>++[>+<-]<-]
        [[]]
    "})
    .unwrap();

    assert_eq!(ctx.loop_depth(), 0);
    assert_eq!(count(&ctx, Opcode::PopJumpIfFalse), 4);
}

#[test]
fn excess_loop_end_reports_its_offset() {
    assert_eq!(
        body("]").unwrap_err(),
        Error::UnbalancedLoop { offset: 0 }
    );
    assert_eq!(
        body("+[-]]").unwrap_err(),
        Error::UnbalancedLoop { offset: 4 }
    );
    assert_eq!(
        body("[ comment ]]").unwrap_err(),
        Error::UnbalancedLoop { offset: 11 }
    );
}

#[test]
fn open_loops_are_left_for_terminate() {
    let mut ctx = body("+[[-]").unwrap();

    assert_eq!(ctx.loop_depth(), 1);
    assert_eq!(
        ctx.terminate().unwrap_err(),
        Error::UnclosedLoop { offset: 1 }
    );
}

#[test]
fn comment_only_source_emits_nothing() {
    for source in ["", "just a comment", "\n\t "] {
        let ctx = body(source).unwrap();
        assert!(ctx.instructions().is_empty());
        assert!(ctx.consts().is_empty());
        assert!(ctx.names().is_empty());
    }
}
