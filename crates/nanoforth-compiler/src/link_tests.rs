use nanoforth_bytecode::{Cell, Opcode};
use rowan::TextRange;

use crate::diagnostics::Diagnostics;
use crate::ir::{Item, Label, LabelRef, TempKind};
use crate::link::{LinkError, link};

fn word(name: &str) -> Label {
    Label::Word(name.to_string())
}

#[test]
fn definitions_take_no_space() {
    let items = vec![
        Item::Op(Opcode::Lit),
        Item::word_ref("f", TextRange::empty(0.into())),
        Item::Op(Opcode::Call),
        Item::Op(Opcode::Stop),
        Item::Def(word("f")),
        Item::Op(Opcode::Dup),
        Item::Op(Opcode::Return),
    ];

    let linked = link(&items).unwrap();
    assert_eq!(
        linked.cells,
        vec![
            Cell::Op(Opcode::Lit),
            Cell::Imm(4),
            Cell::Op(Opcode::Call),
            Cell::Op(Opcode::Stop),
            Cell::Op(Opcode::Dup),
            Cell::Op(Opcode::Return),
        ]
    );
    assert_eq!(linked.symbols.address_of("f"), Some(4));
}

#[test]
fn backward_and_forward_references() {
    let start = Label::Temp {
        kind: TempKind::Loop,
        id: 1,
    };
    let end = Label::Temp {
        kind: TempKind::End,
        id: 2,
    };
    let range = TextRange::empty(0.into());
    let items = vec![
        Item::Def(start.clone()),
        Item::Op(Opcode::Lit),
        Item::Ref(LabelRef {
            label: end.clone(),
            range,
        }),
        Item::Op(Opcode::Lit),
        Item::Ref(LabelRef {
            label: start,
            range,
        }),
        Item::Def(end),
        Item::Op(Opcode::Stop),
    ];

    let linked = link(&items).unwrap();
    assert_eq!(linked.cells[1], Cell::Imm(4));
    assert_eq!(linked.cells[3], Cell::Imm(0));
    assert_eq!(linked.symbols.address_of("$loop1"), Some(0));
    assert_eq!(linked.symbols.address_of("$end2"), Some(4));
}

#[test]
fn labels_may_share_an_address() {
    let items = vec![
        Item::Def(word("a")),
        Item::Def(word("b")),
        Item::Op(Opcode::Nop),
    ];
    let linked = link(&items).unwrap();
    let names: Vec<_> = linked.symbols.names_at(0).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn undefined_label_names_symbol() {
    let items = vec![
        Item::Op(Opcode::Lit),
        Item::word_ref("triple", TextRange::new(3.into(), 9.into())),
        Item::Op(Opcode::Call),
    ];

    let err = link(&items).unwrap_err();
    assert!(matches!(&err, LinkError::UndefinedLabel(r) if r.label == word("triple")));
    insta::assert_snapshot!(err.to_string(), @"undefined label `triple`");

    let mut diag = Diagnostics::new();
    err.report(&mut diag);
    insta::assert_snapshot!(diag.printer().render(), @"error at 3..9: `triple` is not defined");
}

#[test]
fn only_ops_and_immediates_survive() {
    let items = vec![
        Item::Def(word("x")),
        Item::Op(Opcode::Lit),
        Item::Imm(-9),
    ];
    let linked = link(&items).unwrap();
    assert_eq!(linked.cells, vec![Cell::Op(Opcode::Lit), Cell::Imm(-9)]);
}
