//! Image emission.

use nanoforth_bytecode::Image;

use crate::link::Linked;

/// One 32-bit word per cell. Write it out with [`Image::to_bytes`].
pub fn emit(linked: &Linked) -> Image {
    Image::from_cells(&linked.cells)
}
