//! Static checks over lowered items.

pub mod stack_effect;
