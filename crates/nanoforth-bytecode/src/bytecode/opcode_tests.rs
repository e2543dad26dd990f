//! Tests for the opcode table.

use super::opcode::{Opcode, OpcodeError};

#[test]
fn values_are_dense_and_ordered() {
    for (i, op) in Opcode::ALL.iter().enumerate() {
        assert_eq!(op.code() as usize, i, "{op:?}");
    }
}

#[test]
fn contract_values() {
    assert_eq!(Opcode::Nop.code(), 0x00);
    assert_eq!(Opcode::Stop.code(), 0x01);
    assert_eq!(Opcode::Lit.code(), 0x02);
    assert_eq!(Opcode::ToR.code(), 0x06);
    assert_eq!(Opcode::CJmp.code(), 0x09);
    assert_eq!(Opcode::Call.code(), 0x0a);
    assert_eq!(Opcode::Return.code(), 0x0c);
    assert_eq!(Opcode::Add.code(), 0x0f);
    assert_eq!(Opcode::Eq.code(), 0x13);
    assert_eq!(Opcode::Gt.code(), 0x16);
    assert_eq!(Opcode::Shift.code(), 0x1a);
    assert_eq!(Opcode::Syscall4.code(), 0x1f);
}

#[test]
fn mnemonic_roundtrip() {
    for op in Opcode::ALL {
        assert_eq!(Opcode::from_mnemonic(op.mnemonic()), Some(op));
    }
}

#[test]
fn from_mnemonic_is_exact() {
    assert_eq!(Opcode::from_mnemonic("+"), Some(Opcode::Add));
    assert_eq!(Opcode::from_mnemonic(">r"), Some(Opcode::ToR));
    assert_eq!(Opcode::from_mnemonic("DUP"), None);
    assert_eq!(Opcode::from_mnemonic("dup2"), None);
    assert_eq!(Opcode::from_mnemonic("lit"), None);
}

#[test]
fn try_from_rejects_out_of_range() {
    assert_eq!(Opcode::try_from(0x16), Ok(Opcode::Gt));
    assert_eq!(Opcode::try_from(0x20), Err(OpcodeError(0x20)));
    assert_eq!(Opcode::try_from(-1), Err(OpcodeError(-1)));
}

#[test]
fn stack_effects() {
    assert_eq!(Opcode::Lit.stack_effect().net(), 1);
    assert_eq!(Opcode::Dup.stack_effect().net(), 1);
    assert_eq!(Opcode::Add.stack_effect().net(), -1);
    assert_eq!(Opcode::DivMod.stack_effect().net(), 0);
    assert_eq!(Opcode::CJmp.stack_effect().net(), -2);
    assert_eq!(Opcode::Syscall3.stack_effect().net(), -4);

    let to_r = Opcode::ToR.stack_effect();
    assert_eq!((to_r.net(), to_r.net_return()), (-1, 1));
    let from_r = Opcode::FromR.stack_effect();
    assert_eq!((from_r.net(), from_r.net_return()), (1, -1));
    assert_eq!(Opcode::Return.stack_effect().net_return(), -1);
}

#[test]
fn only_lit_has_operand() {
    let with_operand: Vec<_> = Opcode::ALL.into_iter().filter(|op| op.has_operand()).collect();
    assert_eq!(with_operand, vec![Opcode::Lit]);
}

#[test]
fn syscall_arity() {
    assert_eq!(Opcode::Syscall0.syscall_arity(), Some(0));
    assert_eq!(Opcode::Syscall4.syscall_arity(), Some(4));
    assert_eq!(Opcode::Add.syscall_arity(), None);
}

#[test]
fn error_display() {
    insta::assert_snapshot!(OpcodeError(0x2a).to_string(), @"unknown opcode 0x2a");
}
