//! Tagged items: the compiler's intermediate form between lowering and linking.

use std::fmt;

use nanoforth_bytecode::Opcode;
use rowan::TextRange;

/// Role of a compiler-generated label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TempKind {
    /// Target of the taken branch of a two-armed `if`.
    Taken,
    /// Join point after an `if`.
    End,
    /// Head of a `do` loop.
    Loop,
}

impl TempKind {
    fn prefix(self) -> &'static str {
        match self {
            TempKind::Taken => "taken",
            TempKind::End => "end",
            TempKind::Loop => "loop",
        }
    }
}

/// A symbolic address.
///
/// Temporary labels live in their own namespace, so no source word can
/// collide with them.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Label {
    Word(String),
    Temp { kind: TempKind, id: u32 },
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Word(name) => f.write_str(name),
            Label::Temp { kind, id } => write!(f, "${}{}", kind.prefix(), id),
        }
    }
}

/// A label use, remembering which source produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelRef {
    pub label: Label,
    pub range: TextRange,
}

/// One element of a lowered item stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Item {
    Op(Opcode),
    Imm(i32),
    /// Resolved to an immediate by the linker.
    Ref(LabelRef),
    /// Zero-width marker; dropped by the linker.
    Def(Label),
}

impl Item {
    pub fn word_ref(name: impl Into<String>, range: TextRange) -> Self {
        Item::Ref(LabelRef {
            label: Label::Word(name.into()),
            range,
        })
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Op(op) => write!(f, "o {op}"),
            Item::Imm(v) => write!(f, "n {v}"),
            Item::Ref(r) => write!(f, "r {}", r.label),
            Item::Def(label) => write!(f, "l {label}"),
        }
    }
}

/// Source of fresh temporary labels. One per compilation.
#[derive(Clone, Debug, Default)]
pub struct LabelGen {
    count: u32,
}

impl LabelGen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh(&mut self, kind: TempKind) -> Label {
        self.count += 1;
        Label::Temp {
            kind,
            id: self.count,
        }
    }
}
