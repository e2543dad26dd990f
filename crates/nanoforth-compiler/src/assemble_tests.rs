use nanoforth_bytecode::Opcode;

use crate::assemble::assemble;
use crate::ir::{Item, Label};
use crate::lower::WordTable;

fn word(name: &str, body: &[Item]) -> Vec<Item> {
    let mut items = vec![Item::Def(Label::Word(name.to_string()))];
    items.extend_from_slice(body);
    items.push(Item::Op(Opcode::Return));
    items
}

#[test]
fn main_first_then_stop_then_words() {
    let mut words = WordTable::new();
    words.insert("b".to_string(), word("b", &[Item::Op(Opcode::Dup)]));
    words.insert("a".to_string(), word("a", &[]));
    let main = vec![Item::Op(Opcode::Lit), Item::Imm(1)];

    let out = assemble(&main, &words);
    let shown: Vec<_> = out.iter().map(|i| i.to_string()).collect();
    assert_eq!(
        shown,
        vec![
            "o __lit", "n 1", "o stop", "l b", "o dup", "o __return", "l a", "o __return",
        ]
    );
}

#[test]
fn empty_program_is_just_stop() {
    let out = assemble(&[], &WordTable::new());
    assert_eq!(out, vec![Item::Op(Opcode::Stop)]);
}
