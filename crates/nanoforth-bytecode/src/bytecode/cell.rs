//! Resolved program cells.

use std::fmt;

use super::opcode::Opcode;

/// One 32-bit word of a linked program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Op(Opcode),
    Imm(i32),
    /// Opcode slot holding a value with no mnemonic. Only produced when
    /// decoding images we did not build.
    Unknown(i32),
}

impl Cell {
    /// The word written to the image.
    #[inline]
    pub fn to_word(self) -> i32 {
        match self {
            Cell::Op(op) => op.code() as i32,
            Cell::Imm(v) | Cell::Unknown(v) => v,
        }
    }

    pub fn opcode(self) -> Option<Opcode> {
        match self {
            Cell::Op(op) => Some(op),
            _ => None,
        }
    }
}

impl From<Opcode> for Cell {
    fn from(op: Opcode) -> Self {
        Cell::Op(op)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Op(op) => write!(f, "{op}"),
            Cell::Imm(v) => write!(f, "{v}"),
            Cell::Unknown(v) => write!(f, "unknown ({v})"),
        }
    }
}
