//! Flat 32-bit bytecode: opcodes, cells, images, symbols and listings.

mod cell;
mod image;
mod listing;
mod opcode;
mod symbols;

#[cfg(test)]
mod listing_tests;
#[cfg(test)]
mod opcode_tests;
#[cfg(test)]
mod symbols_tests;

pub use cell::Cell;
pub use image::{Image, ImageError, WORD_SIZE};
pub use listing::{listing, width_for_count};
pub use opcode::{Opcode, OpcodeError, StackEffect};
pub use symbols::Symbols;
