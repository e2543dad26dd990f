use super::{Lowered, lower};
use crate::diagnostics::Diagnostics;
use crate::ir::Item;
use crate::parser::Parser;

fn lower_source(source: &str) -> (Lowered, Diagnostics) {
    let res = Parser::new(source).parse().unwrap();
    assert!(!res.diagnostics.has_errors(), "{source}");
    let mut diag = Diagnostics::new();
    let lowered = lower(&res.root, &mut diag);
    (lowered, diag)
}

fn show(items: &[Item]) -> String {
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn main_of(source: &str) -> String {
    let (lowered, diag) = lower_source(source);
    assert!(!diag.has_errors(), "{}", diag.printer().render());
    show(&lowered.main)
}

#[test]
fn number_literal() {
    insta::assert_snapshot!(main_of("42"), @r"
    o __lit
    n 42
    ");
}

#[test]
fn max_literal_fits() {
    insta::assert_snapshot!(main_of("2147483647"), @r"
    o __lit
    n 2147483647
    ");
}

#[test]
fn oversized_literal_is_rejected() {
    let (_, diag) = lower_source("2147483648");
    insta::assert_snapshot!(
        diag.printer().render(),
        @"error at 0..10: integer literal `2147483648` does not fit in 32 bits (hint: literals must fit in a signed 32-bit cell)"
    );
}

#[test]
fn mnemonics_lower_to_bare_opcodes() {
    insta::assert_snapshot!(main_of("dup >r r> /% << syscall1 __lit"), @r"
    o dup
    o >r
    o r>
    o /%
    o <<
    o syscall1
    o __lit
    ");
}

#[test]
fn unknown_word_lowers_to_call() {
    insta::assert_snapshot!(main_of("21 double"), @r"
    o __lit
    n 21
    o __lit
    r double
    o __call
    ");
}

#[test]
fn definition_goes_to_word_table() {
    let (lowered, diag) = lower_source(": double ( n -- n*2 ) dup + ; 21 double");
    assert!(diag.is_empty());
    assert_eq!(lowered.words.len(), 1);
    insta::assert_snapshot!(show(&lowered.words["double"]), @r"
    l double
    o dup
    o +
    o __return
    ");
}

#[test]
fn empty_definition_still_returns() {
    let (lowered, _) = lower_source(": nothing ( -- ) ;");
    insta::assert_snapshot!(show(&lowered.words["nothing"]), @r"
    l nothing
    o __return
    ");
}

#[test]
fn word_table_keeps_definition_order() {
    let (lowered, _) = lower_source(": c ( ) ; : a ( ) ; : b ( ) ;");
    let names: Vec<_> = lowered.words.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["c", "a", "b"]);
}

#[test]
fn duplicate_definition() {
    let (lowered, diag) = lower_source(": a ( ) 1 ; : a ( ) 2 ;");
    insta::assert_snapshot!(
        diag.printer().render(),
        @"error at 14..15: `a` is already defined (related: first defined here at 2..3)"
    );
    // first definition wins
    assert_eq!(show(&lowered.words["a"]), "l a\no __lit\nn 1\no __return");
}

#[test]
fn if_then() {
    insta::assert_snapshot!(main_of("1 if 99 then"), @r"
    o __lit
    n 1
    o __lit
    n 0
    o ==
    o __lit
    r $end1
    o __cjmp
    o __lit
    n 99
    l $end1
    ");
}

#[test]
fn if_else_then() {
    insta::assert_snapshot!(main_of("0 if 1 else 2 then"), @r"
    o __lit
    n 0
    o __lit
    r $taken1
    o __cjmp
    o __lit
    n 2
    o __lit
    r $end2
    o __jmp
    l $taken1
    o __lit
    n 1
    l $end2
    ");
}

#[test]
fn do_loop() {
    insta::assert_snapshot!(main_of("5 5 do 7 loop"), @r"
    o __lit
    n 5
    o __lit
    n 5
    l $loop1
    o swap
    o >r
    o >r
    o __lit
    n 7
    o r>
    o r>
    o swap
    o __lit
    n 1
    o +
    o dup
    o >r
    o swap
    o dup
    o >r
    o swap
    o r>
    o r>
    o >
    o __lit
    r $loop1
    o __cjmp
    o drop
    o drop
    ");
}

#[test]
fn nested_labels_are_distinct() {
    let out = main_of("1 if 0 if 2 then then");
    assert!(out.contains("l $end1"));
    assert!(out.contains("l $end2"));
    // inner construct is lowered first
    assert!(out.find("l $end1").unwrap() < out.find("l $end2").unwrap());
}

#[test]
fn lowering_is_reproducible() {
    let source = "1 if 2 else 3 then 4 0 do 1 loop";
    assert_eq!(main_of(source), main_of(source));
}

#[test]
fn definitions_do_not_appear_in_main() {
    let (lowered, _) = lower_source(": f ( ) 1 ; f");
    assert_eq!(
        show(&lowered.main),
        "o __lit\nr f\no __call"
    );
}

#[test]
fn unbalanced_branches_warn_only() {
    let (_, diag) = lower_source("1 if 1 2 else 3 then");
    assert!(!diag.has_errors());
    assert_eq!(diag.warning_count(), 1);
}

#[test]
fn branches_with_calls_are_not_checked() {
    let (_, diag) = lower_source("1 if 1 2 else f then");
    assert!(diag.is_empty());
}
