//! Stack-effect balance of `if` branches.
//!
//! Uses the declared opcode effects. A branch that calls a word or contains
//! its own control flow has no statically known effect and is not checked.

use nanoforth_bytecode::Opcode;
use rowan::TextRange;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::ir::Item;

/// Net data-stack change of a straight-line item sequence.
///
/// `None` when the sequence calls, jumps, or returns.
pub fn net_effect(items: &[Item]) -> Option<i32> {
    let mut net = 0;
    for item in items {
        match item {
            Item::Op(Opcode::Jmp | Opcode::CJmp | Opcode::Call | Opcode::CCall | Opcode::Return) => {
                return None;
            }
            Item::Op(op) => net += op.stack_effect().net(),
            // operands of `__lit`, already counted by the opcode
            Item::Imm(_) | Item::Ref(_) => {}
            Item::Def(_) => return None,
        }
    }
    Some(net)
}

/// Warn when both branches have known but different net effects.
pub fn check_branch_balance(
    taken: &[Item],
    fallthrough: &[Item],
    range: TextRange,
    diag: &mut Diagnostics,
) {
    let (Some(a), Some(b)) = (net_effect(taken), net_effect(fallthrough)) else {
        return;
    };
    if a == b {
        return;
    }

    diag.report(DiagnosticKind::BranchEffectMismatch, range)
        .message(format!(
            "`if` branch {}, `else` branch {}",
            describe(a),
            describe(b)
        ))
        .emit();
}

fn describe(net: i32) -> String {
    match net {
        0 => "leaves the stack depth unchanged".to_string(),
        n if n > 0 => format!("pushes {n}"),
        n => format!("pops {}", -n),
    }
}
