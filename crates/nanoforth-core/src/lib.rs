#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Shared helpers for the NanoForth toolchain.
//!
//! Kept dependency-free so that the bytecode, compiler and VM crates can all
//! render listings and traces with the same palette.

mod colors;


pub use colors::Colors;
