//! Program layout: main sequence, `stop`, then every word.

use nanoforth_bytecode::Opcode;

use crate::ir::Item;
use crate::lower::WordTable;

/// Concatenate the main sequence and the word table into one stream.
///
/// The first main item always lands at address 0, whatever is defined.
pub fn assemble(main: &[Item], words: &WordTable) -> Vec<Item> {
    let word_len: usize = words.values().map(Vec::len).sum();
    let mut out = Vec::with_capacity(main.len() + 1 + word_len);

    out.extend_from_slice(main);
    out.push(Item::Op(Opcode::Stop));
    for items in words.values() {
        out.extend_from_slice(items);
    }
    out
}
