//! Bytecode format for NanoForth.
//!
//! This crate contains:
//! - The opcode table shared by the compiler and any VM (bit-exact contract)
//! - Resolved cells and the flat image codec (no header, native byte order)
//! - The label symbol table produced by linking
//! - The human-readable listing (disassembly)

pub mod bytecode;

pub use bytecode::{
    Cell, Image, ImageError, Opcode, OpcodeError, StackEffect, Symbols, WORD_SIZE, listing,
    width_for_count,
};
