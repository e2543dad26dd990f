use nanoforth_core::Colors;

use super::cell::Cell;
use super::listing::{listing, width_for_count};
use super::opcode::Opcode;
use super::symbols::Symbols;

fn double_program() -> (Vec<Cell>, Symbols) {
    // 21 double stop : double dup + ;
    let cells = vec![
        Cell::Op(Opcode::Lit),
        Cell::Imm(21),
        Cell::Op(Opcode::Lit),
        Cell::Imm(6),
        Cell::Op(Opcode::Call),
        Cell::Op(Opcode::Stop),
        Cell::Op(Opcode::Dup),
        Cell::Op(Opcode::Add),
        Cell::Op(Opcode::Return),
    ];
    let symbols = [("double", 6)].into_iter().collect();
    (cells, symbols)
}

#[test]
fn width() {
    assert_eq!(width_for_count(0), 4);
    assert_eq!(width_for_count(10), 4);
    assert_eq!(width_for_count(10_000), 4);
    assert_eq!(width_for_count(10_001), 5);
}

#[test]
fn labels_at_targets_and_definitions() {
    let (cells, symbols) = double_program();
    let out = listing(&cells, &symbols, Colors::OFF);

    assert_eq!(
        out,
        concat!(
            "  0000  o __lit\n",
            "  0001  n 21\n",
            "  0002  o __lit\n",
            "  0003  n 6 (> double)\n",
            "  0004  o __call\n",
            "  0005  o stop\n",
            "  0006  o dup (double)\n",
            "  0007  o +\n",
            "  0008  o __return\n",
        )
    );
}

#[test]
fn shared_address_lists_every_label() {
    let cells = vec![
        Cell::Op(Opcode::Lit),
        Cell::Imm(2),
        Cell::Op(Opcode::Stop),
    ];
    let symbols = [("$else1", 2), ("$end1", 2)].into_iter().collect();

    assert_eq!(
        listing(&cells, &symbols, Colors::OFF),
        concat!(
            "  0000  o __lit\n",
            "  0001  n 2 (> $else1, $end1)\n",
            "  0002  o stop ($else1, $end1)\n",
        )
    );
}

#[test]
fn unknown_cells_do_not_panic() {
    let cells = vec![Cell::Unknown(99), Cell::Imm(-4)];
    assert_eq!(
        listing(&cells, &Symbols::new(), Colors::OFF),
        "  0000  o unknown (99)\n  0001  n -4\n"
    );
}

#[test]
fn colored_output_wraps_fields() {
    let cells = vec![Cell::Op(Opcode::Dup)];
    let out = listing(&cells, &Symbols::new(), Colors::ON);
    assert_eq!(out, "  \x1b[2m0000\x1b[0m  o \x1b[34mdup\x1b[0m\n");
}
