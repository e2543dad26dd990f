use nanoforth_bytecode::{Cell, Image, Opcode as O, Symbols};
use nanoforth_core::Colors;

use super::{PrintTracer, Recorder, VM, Verbosity};

/// `4 call stop | nine: 9 return`
fn call_nine() -> (Image, Symbols) {
    let cells = [
        Cell::Op(O::Lit),
        Cell::Imm(4),
        Cell::Op(O::Call),
        Cell::Op(O::Stop),
        Cell::Op(O::Lit),
        Cell::Imm(9),
        Cell::Op(O::Return),
    ];
    let symbols = [("nine", 4)].into_iter().collect();
    (Image::from_cells(&cells), symbols)
}

fn trace(verbosity: Verbosity) -> String {
    let (image, symbols) = call_nine();
    let mut tracer = PrintTracer::new(image.len(), &symbols, verbosity, Colors::OFF);
    VM::builder()
        .build()
        .execute_with(&image, &mut Recorder::default(), &mut tracer)
        .unwrap();
    tracer.lines().join("\n")
}

#[test]
fn default_shows_instructions_and_labels() {
    assert_eq!(
        trace(Verbosity::Default),
        concat!(
            "  0000  __lit 4 (> nine)\n",
            "  0002  __call\n",
            "nine:\n",
            "  0004  __lit 9\n",
            "  0006  __return\n",
            "  0003  stop\n",
            "  halted after 5 steps",
        )
    );
}

#[test]
fn verbose_adds_stack_and_calls() {
    assert_eq!(
        trace(Verbosity::Verbose),
        concat!(
            "  0000  __lit 4 (> nine)\n",
            "        stack [4]\n",
            "  0002  __call\n",
            "        -> nine\n",
            "        stack []\n",
            "nine:\n",
            "  0004  __lit 9\n",
            "        stack [9]\n",
            "  0006  __return\n",
            "        <- 3\n",
            "        stack [9]\n",
            "  0003  stop\n",
            "  halted after 5 steps",
        )
    );
}

#[test]
fn very_verbose_adds_return_stack() {
    let out = trace(Verbosity::VeryVerbose);
    assert!(out.contains("        -> nine\n        stack []\n        rstack [3]\n"), "{out}");
}

#[test]
fn syscalls_are_always_traced() {
    let cells = [
        Cell::Op(O::Lit),
        Cell::Imm(5),
        Cell::Op(O::Lit),
        Cell::Imm(1),
        Cell::Op(O::Syscall1),
        Cell::Op(O::Stop),
    ];
    let image = Image::from_cells(&cells);
    let symbols = Symbols::new();
    let mut tracer = PrintTracer::new(image.len(), &symbols, Verbosity::Default, Colors::OFF);
    VM::builder()
        .build()
        .execute_with(&image, &mut Recorder::default(), &mut tracer)
        .unwrap();
    assert_eq!(tracer.lines()[3], "        syscall 1 [5]");
}

#[test]
fn colored_label_header() {
    let (image, symbols) = call_nine();
    let mut tracer = PrintTracer::new(image.len(), &symbols, Verbosity::Default, Colors::ON);
    VM::builder()
        .build()
        .execute_with(&image, &mut Recorder::default(), &mut tracer)
        .unwrap();
    assert_eq!(tracer.lines()[2], "\x1b[34mnine\x1b[0m:");
}
