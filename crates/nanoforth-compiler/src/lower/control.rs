//! Control-flow lowering: `if`/`else`/`then` and `do`/`loop`.

use nanoforth_bytecode::Opcode;
use rowan::TextRange;

use super::Lowerer;
use crate::analyze::stack_effect;
use crate::ir::{Item, Label, LabelRef, TempKind};
use crate::parser::ast::{Do, If};

use Opcode::*;

fn label_ref(label: &Label, range: TextRange) -> Item {
    Item::Ref(LabelRef {
        label: label.clone(),
        range,
    })
}

impl Lowerer<'_> {
    pub(super) fn lower_if(&mut self, node: &If) -> Vec<Item> {
        let range = node.as_cst().text_range();
        let taken_branch = self.lower_block(node.then_block());

        let Some(else_branch) = node.else_branch() else {
            return self.lower_if_then(taken_branch, range);
        };

        let fallthrough = self.lower_block(else_branch.body());
        stack_effect::check_branch_balance(&taken_branch, &fallthrough, range, self.diag);
        self.lower_if_else(taken_branch, fallthrough, range)
    }

    /// `if B then`: negate the condition and jump over `B` when it was zero.
    fn lower_if_then(&mut self, body: Vec<Item>, range: TextRange) -> Vec<Item> {
        let end = self.labels.fresh(TempKind::End);

        let mut out = vec![
            Item::Op(Lit),
            Item::Imm(0),
            Item::Op(Eq),
            Item::Op(Lit),
            label_ref(&end, range),
            Item::Op(CJmp),
        ];
        out.extend(body);
        out.push(Item::Def(end));
        out
    }

    /// `if A else B then`: jump to `A` on a non-zero condition, fall through
    /// into `B` otherwise. Both meet at the end label.
    fn lower_if_else(&mut self, taken: Vec<Item>, fallthrough: Vec<Item>, range: TextRange) -> Vec<Item> {
        let taken_label = self.labels.fresh(TempKind::Taken);
        let end = self.labels.fresh(TempKind::End);

        let mut out = vec![Item::Op(Lit), label_ref(&taken_label, range), Item::Op(CJmp)];
        out.extend(fallthrough);
        out.extend([Item::Op(Lit), label_ref(&end, range), Item::Op(Jmp)]);
        out.push(Item::Def(taken_label));
        out.extend(taken);
        out.push(Item::Def(end));
        out
    }

    /// `limit start do B loop`, post-test.
    ///
    /// Both bounds live on the return stack while `B` runs. After the body the
    /// index is incremented and the loop repeats while `limit > index`, so `B`
    /// always runs at least once.
    pub(super) fn lower_do(&mut self, node: &Do) -> Vec<Item> {
        let range = node.as_cst().text_range();
        let body = self.lower_block(node.body());
        let start = self.labels.fresh(TempKind::Loop);

        let mut out = vec![Item::Def(start.clone())];
        out.extend([Swap, ToR, ToR].map(Item::Op));
        out.extend(body);
        // ( -- limit index+1 ), keeping a copy of both for the test
        out.extend([FromR, FromR, Swap, Lit].map(Item::Op));
        out.push(Item::Imm(1));
        out.extend(
            [Add, Dup, ToR, Swap, Dup, ToR, Swap, FromR, FromR, Gt, Lit].map(Item::Op),
        );
        out.push(label_ref(&start, range));
        out.extend([CJmp, Drop, Drop].map(Item::Op));
        out
    }
}
