use indoc::indoc;
use nanoforth_bytecode::{Cell, Image, Opcode};
use nanoforth_core::Colors;
use nanoforth_vm::{Recorder, VM};

use super::{DEFAULT_PARSE_MAX_DEPTH, ProgramBuilder, compile};
use crate::Error;

fn run(source: &str) -> Vec<i32> {
    let compiled = compile(source).unwrap();
    run_image(&compiled.image)
}

fn run_image(image: &Image) -> Vec<i32> {
    VM::builder()
        .build()
        .execute(image, &mut Recorder::default())
        .unwrap()
        .stack
}

#[track_caller]
fn compile_err(source: &str) -> Error {
    match compile(source) {
        Ok(_) => panic!("expected {source:?} to fail"),
        Err(e) => e,
    }
}

fn render(err: &Error) -> String {
    err.diagnostics().unwrap().printer().render()
}

#[test]
fn double_leaves_42() {
    assert_eq!(run(": double ( n -- n*2 ) dup + ; 21 double"), vec![42]);
}

#[test]
fn if_then_runs_on_nonzero() {
    assert_eq!(run("1 if 99 then"), vec![99]);
}

#[test]
fn if_then_skips_on_zero() {
    assert_eq!(run("0 if 99 then"), Vec::<i32>::new());
}

#[test]
fn if_else_picks_else_on_zero() {
    assert_eq!(run("0 if 1 else 2 then"), vec![2]);
}

#[test]
fn if_else_picks_if_on_nonzero() {
    assert_eq!(run("1 if 1 else 2 then"), vec![1]);
}

#[test]
fn do_loop_body_runs_once() {
    assert_eq!(run("5 5 do 7 loop"), vec![7]);
}

#[test]
fn do_loop_counts_up_to_limit() {
    assert_eq!(run("3 0 do 7 loop"), vec![7, 7, 7]);
}

#[test]
fn nested_control_in_words() {
    let source = indoc! {r"
        \ `-1` is an ordinary word name
        : -1 ( -- n ) 0 1 - ;
        : abs ( n -- |n| ) dup 0 < if 0 swap - then ;
        : sign ( n -- s ) dup 0 < if drop -1 else 0 > then ;
        0 7 - abs 7 abs 0 sign
    "};
    assert_eq!(run(source), vec![7, 7, 0]);
}

#[test]
fn words_call_each_other() {
    let source = indoc! {"
        : square ( n -- n*n ) dup * ;
        : quad ( n -- n^4 ) square square ;
        3 quad
    "};
    assert_eq!(run(source), vec![81]);
}

#[test]
fn address_zero_is_first_main_instruction() {
    let compiled = compile(": w ( -- ) 1 ; 5").unwrap();
    assert_eq!(compiled.cells[0], Cell::Op(Opcode::Lit));
    assert_eq!(compiled.cells[1], Cell::Imm(5));
    assert_eq!(compiled.cells[2], Cell::Op(Opcode::Stop));
}

#[test]
fn empty_program_is_just_stop() {
    let compiled = compile("").unwrap();
    assert_eq!(compiled.cells, vec![Cell::Op(Opcode::Stop)]);
    assert_eq!(compiled.image.words(), &[0x01]);
}

#[test]
fn each_word_ends_with_one_return() {
    let compiled = compile(": a ( -- ) 1 ; : b ( -- ) a a ; : c ( -- ) ;").unwrap();
    let mut bounds: Vec<usize> = ["a", "b", "c"]
        .iter()
        .map(|name| compiled.symbols.address_of(name).unwrap() as usize)
        .collect();
    bounds.push(compiled.cells.len());

    for range in bounds.windows(2) {
        let body = &compiled.cells[range[0]..range[1]];
        let returns = body
            .iter()
            .filter(|c| **c == Cell::Op(Opcode::Return))
            .count();
        assert_eq!(returns, 1, "{body:?}");
        assert_eq!(body.last(), Some(&Cell::Op(Opcode::Return)));
    }

    // `c` is empty: its label sits right on its `__return`.
    assert_eq!(bounds[2], compiled.cells.len() - 1);
}

#[test]
fn listing_shows_labels() {
    let compiled = compile(": double ( n -- n*2 ) dup + ; 21 double").unwrap();
    assert_eq!(
        compiled.listing(Colors::OFF),
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
fn emitted_image_matches_cells() {
    let compiled = compile("1 2 +").unwrap();
    assert_eq!(compiled.image.words(), &[0x02, 1, 0x02, 2, 0x0f, 0x01]);
    let bytes = compiled.image.to_bytes();
    assert_eq!(bytes.len(), 24);
    assert_eq!(&bytes[0..4], &2i32.to_ne_bytes());
}

#[test]
fn duplicate_definition_fails() {
    let err = compile_err(": a ( -- ) 1 ; : a ( -- ) 2 ;");
    assert!(matches!(err, Error::LowerError(_)));
    insta::assert_snapshot!(
        render(&err),
        @"error at 17..18: `a` is already defined (related: first defined here at 2..3)"
    );
}

#[test]
fn undefined_word_fails_at_link() {
    let err = compile_err("1 triple");
    assert!(matches!(err, Error::LinkError(_)));
    insta::assert_snapshot!(render(&err), @"error at 2..8: `triple` is not defined");
}

#[test]
fn syntax_error_fails_at_parse() {
    let err = compile_err("1 then");
    assert!(matches!(err, Error::ParseError(_)));
    assert_eq!(err.diagnostics().unwrap().error_count(), 1);
}

#[test]
fn branch_mismatch_is_only_a_warning() {
    let compiled = compile("1 2 if 3 else drop then").unwrap();
    assert_eq!(compiled.warnings.warning_count(), 1);
    assert!(!compiled.warnings.has_errors());
    let text = compiled.warnings.printer().render();
    assert!(text.contains("`if` branch pushes 1, `else` branch pops 1"), "{text}");
    assert_eq!(run_image(&compiled.image), vec![1, 3]);
}

#[test]
fn stages_are_inspectable() {
    let source = "1 if 2 then";
    let parsed = ProgramBuilder::new(source).parse().unwrap();
    assert!(parsed.diagnostics().is_empty());
    assert_eq!(parsed.source(), source);
    insta::assert_snapshot!(parsed.dump_cst(), @r#"
    Root
      Number
        Integer "1"
      If
        KwIf "if"
        Block
          Number
            Integer "2"
        KwThen "then"
    "#);

    let lowered = parsed.lower().unwrap();
    assert!(lowered.words().is_empty());
    insta::assert_snapshot!(lowered.dump_items(), @r"
    o __lit
    n 1
    o __lit
    n 0
    o ==
    o __lit
    r $end1
    o __cjmp
    o __lit
    n 2
    l $end1
    o stop
    ");

    let linked = lowered.link().unwrap();
    assert_eq!(linked.cells().len(), 11);
    assert_eq!(linked.symbols().address_of("$end1"), Some(10));
    assert_eq!(linked.emit().len(), 11);
}

#[test]
fn parse_fuel_is_configurable() {
    let res = ProgramBuilder::new("1 2 3 4 5").with_exec_fuel(3).parse();
    assert!(matches!(res, Err(Error::ExecFuelExhausted)));

    let parsed = ProgramBuilder::new("1 2 3 4 5")
        .with_exec_fuel(5)
        .parse()
        .unwrap();
    assert_eq!(parsed.parser_fuel_consumed(), 5);
}

#[test]
fn recursion_limit_is_configurable() {
    let source = "1 if 1 if 1 if then then then";
    let res = ProgramBuilder::new(source).with_recursion_limit(2).parse();
    assert!(matches!(res, Err(Error::RecursionLimitExceeded)));
    assert!(ProgramBuilder::new(source).with_recursion_limit(3).parse().is_ok());
}

#[test]
fn mnemonic_words_compile_to_opcodes() {
    let compiled = compile("7 __lit 8").unwrap();
    assert_eq!(
        compiled.cells,
        vec![
            Cell::Op(Opcode::Lit),
            Cell::Imm(7),
            Cell::Op(Opcode::Lit),
            Cell::Op(Opcode::Lit),
            Cell::Imm(8),
            Cell::Op(Opcode::Stop),
        ]
    );
}

fn nested_ifs(depth: u32) -> String {
    let depth = depth as usize;
    format!("{}7{}", "1 if ".repeat(depth), " then".repeat(depth))
}

#[test]
fn nesting_at_the_default_limit_compiles() {
    assert_eq!(run(&nested_ifs(DEFAULT_PARSE_MAX_DEPTH)), vec![7]);
}

#[test]
fn nesting_past_the_default_limit_is_an_error() {
    let err = compile_err(&nested_ifs(DEFAULT_PARSE_MAX_DEPTH + 1));
    assert!(matches!(err, Error::RecursionLimitExceeded), "{err:?}");
    assert!(err.diagnostics().is_none());
}
