//! Two-pass label resolution.
//!
//! Pass 1 drops label definitions and records where each one lands.
//! Pass 2 replaces every reference with the recorded address.

use std::collections::HashMap;

use nanoforth_bytecode::{Cell, Symbols};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::ir::{Item, Label, LabelRef};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    #[error("undefined label `{}`", .0.label)]
    UndefinedLabel(LabelRef),
}

impl LinkError {
    /// Report this error at the source range that caused it.
    pub fn report(&self, diag: &mut Diagnostics) {
        match self {
            LinkError::UndefinedLabel(r) => diag
                .report(DiagnosticKind::UndefinedReference, r.range)
                .message(r.label.to_string())
                .emit(),
        }
    }
}

/// A fully resolved program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Linked {
    pub cells: Vec<Cell>,
    pub symbols: Symbols,
}

/// A cell whose value may still be a label.
enum Slot<'a> {
    Ready(Cell),
    Pending(&'a LabelRef),
}

pub fn link(items: &[Item]) -> Result<Linked, LinkError> {
    let mut addresses: HashMap<&Label, u32> = HashMap::new();
    let mut symbols = Symbols::new();
    let mut slots: Vec<Slot> = Vec::with_capacity(items.len());

    for item in items {
        let slot = match item {
            Item::Def(label) => {
                let addr = slots.len() as u32;
                addresses.entry(label).or_insert(addr);
                symbols.insert(label.to_string(), addr);
                continue;
            }
            Item::Op(op) => Slot::Ready(Cell::Op(*op)),
            Item::Imm(v) => Slot::Ready(Cell::Imm(*v)),
            Item::Ref(r) => Slot::Pending(r),
        };
        slots.push(slot);
    }

    let cells = slots
        .into_iter()
        .map(|slot| match slot {
            Slot::Ready(cell) => Ok(cell),
            Slot::Pending(r) => addresses
                .get(&r.label)
                .map(|&addr| Cell::Imm(addr as i32))
                .ok_or_else(|| LinkError::UndefinedLabel(r.clone())),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Linked { cells, symbols })
}
