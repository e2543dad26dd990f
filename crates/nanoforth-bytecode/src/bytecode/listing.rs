//! Human-readable listing of linked cells.
//!
//! One line per cell:
//!
//! ```text
//!   0000  o __lit
//!   0001  n 5 (> double)
//!   0005  o dup (double)
//! ```
//!
//! `o` marks an opcode slot, `n` an immediate. Immediates equal to a label
//! address are annotated `(> name)`; label definition sites get `(name)`.
//! The listing is informational only.

use std::fmt::Write as _;

use nanoforth_core::Colors;

use super::cell::Cell;
use super::symbols::Symbols;

/// Digits needed to print every index below `count`, never fewer than four.
pub fn width_for_count(count: usize) -> usize {
    let max = count.saturating_sub(1);
    let digits = if max == 0 { 1 } else { max.ilog10() as usize + 1 };
    digits.max(4)
}

pub fn listing(cells: &[Cell], symbols: &Symbols, colors: Colors) -> String {
    let c = colors;
    let width = width_for_count(cells.len());
    let mut out = String::new();

    for (addr, cell) in cells.iter().enumerate() {
        let addr = addr as u32;
        let _ = write!(out, "  {}{addr:0width$}{}  ", c.dim, c.reset);

        match cell {
            Cell::Op(op) => {
                let _ = write!(out, "o {}", c.paint(c.blue, op.mnemonic()));
            }
            Cell::Imm(value) => {
                let _ = write!(out, "n {}", c.paint(c.green, value));
                if let Ok(target) = u32::try_from(*value) {
                    let names = join(symbols.names_at(target));
                    if !names.is_empty() {
                        let _ = write!(out, " {}", c.paint(c.dim, format!("(> {names})")));
                    }
                }
            }
            Cell::Unknown(value) => {
                let _ = write!(out, "o unknown ({value})");
            }
        }

        let defined = join(symbols.names_at(addr));
        if !defined.is_empty() {
            let _ = write!(out, " {}", c.paint(c.dim, format!("({defined})")));
        }
        out.push('\n');
    }

    out
}

fn join<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}
