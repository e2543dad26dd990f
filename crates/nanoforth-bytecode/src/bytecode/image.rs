//! Flat image codec.
//!
//! An image is a sequence of 32-bit signed words in host-native byte order.
//! There is no header, magic number or trailer; the word at index 0 is the
//! entry point and every jump/call target is a word index.

use super::cell::Cell;
use super::opcode::Opcode;

/// Bytes per image word.
pub const WORD_SIZE: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    #[error("image length {len} is not a multiple of {WORD_SIZE} bytes")]
    Truncated { len: usize },
}

/// A compiled program, ready to be written out or executed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Image {
    words: Vec<i32>,
}

impl Image {
    pub fn new(words: Vec<i32>) -> Self {
        Self { words }
    }

    pub fn from_cells(cells: &[Cell]) -> Self {
        Self::new(cells.iter().map(|c| c.to_word()).collect())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageError> {
        if bytes.len() % WORD_SIZE != 0 {
            return Err(ImageError::Truncated { len: bytes.len() });
        }

        let words = bytes
            .chunks_exact(WORD_SIZE)
            .map(|chunk| i32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();
        Ok(Self { words })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.words.len() * WORD_SIZE);
        for word in &self.words {
            out.extend_from_slice(&word.to_ne_bytes());
        }
        out
    }

    pub fn words(&self) -> &[i32] {
        &self.words
    }

    #[inline]
    pub fn get(&self, addr: usize) -> Option<i32> {
        self.words.get(addr).copied()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Recover cells from raw words.
    ///
    /// The word after `__lit` is an immediate; every other word is an opcode
    /// slot. A trailing `__lit` decodes as the bare opcode.
    pub fn decode(&self) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(self.words.len());
        let mut operand_next = false;

        for &word in &self.words {
            if operand_next {
                cells.push(Cell::Imm(word));
                operand_next = false;
                continue;
            }

            match Opcode::try_from(word) {
                Ok(op) => {
                    operand_next = op.has_operand();
                    cells.push(Cell::Op(op));
                }
                Err(_) => cells.push(Cell::Unknown(word)),
            }
        }

        cells
    }
}

impl From<Vec<i32>> for Image {
    fn from(words: Vec<i32>) -> Self {
        Self::new(words)
    }
}
