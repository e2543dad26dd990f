use nanoforth_bytecode::{Cell, Image, Opcode as O};

use super::{Console, RuntimeError, Syscalls, VM};

#[test]
fn console_prints_and_newlines() {
    let mut console = Console::new(Vec::new(), Vec::new());
    console.syscall(1, &[42]).unwrap();
    console.syscall(0, &[]).unwrap();
    console.syscall(1, &[-3]).unwrap();
    let (out, err) = console.into_inner();
    assert_eq!(String::from_utf8(out).unwrap(), "42\n-3");
    assert!(err.is_empty());
}

#[test]
fn console_reports_unsupported_numbers() {
    let mut console = Console::new(Vec::new(), Vec::new());
    console.syscall(9, &[1, 2]).unwrap();
    console.syscall(1, &[]).unwrap();
    let (out, err) = console.into_inner();
    assert!(out.is_empty());
    assert_eq!(
        String::from_utf8(err).unwrap(),
        "unsupported syscall 9\nsyscall 1 called without an argument\n"
    );
}

#[test]
fn console_from_running_image() {
    let cells = [
        Cell::Op(O::Lit),
        Cell::Imm(7),
        Cell::Op(O::Lit),
        Cell::Imm(1),
        Cell::Op(O::Syscall1),
        Cell::Op(O::Lit),
        Cell::Imm(0),
        Cell::Op(O::Syscall0),
        Cell::Op(O::Stop),
    ];
    let mut console = Console::new(Vec::new(), Vec::new());
    VM::builder()
        .build()
        .execute(&Image::from_cells(&cells), &mut console)
        .unwrap();
    let (out, _) = console.into_inner();
    assert_eq!(String::from_utf8(out).unwrap(), "7\n");
}

struct Failing;

impl Syscalls for Failing {
    fn syscall(&mut self, number: i32, _args: &[i32]) -> Result<(), RuntimeError> {
        Err(RuntimeError::Syscall {
            number,
            message: "host refused".to_string(),
        })
    }
}

#[test]
fn host_errors_abort_execution() {
    let cells = [
        Cell::Op(O::Lit),
        Cell::Imm(3),
        Cell::Op(O::Syscall0),
        Cell::Op(O::Stop),
    ];
    let err = VM::builder()
        .build()
        .execute(&Image::from_cells(&cells), &mut Failing)
        .unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"syscall 3 failed: host refused");
}
