//! NanoForth compiler: parser, lowering, linker, and image emitter.
//!
//! This crate provides the compilation pipeline for NanoForth programs:
//! - `parser` - lexer, CST, and typed AST
//! - `lower` - AST to tagged items, word table
//! - `analyze` - static checks over lowered items
//! - `assemble` / `link` / `emit` - layout, label resolution, image output
//! - `diagnostics` - error reporting
//! - `program` - high-level staged facade

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analyze;
pub mod assemble;
pub mod diagnostics;
pub mod emit;
pub mod ir;
pub mod link;
pub mod lower;
pub mod parser;
pub mod program;

#[cfg(test)]
mod assemble_tests;
#[cfg(test)]
mod link_tests;

pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use program::{
    Compiled, ProgramBuilder, ProgramLinked, ProgramLowered, ProgramParsed, compile,
};

/// Errors that can occur during compilation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Execution fuel exhausted (too many parser operations).
    #[error("execution limit exceeded")]
    ExecFuelExhausted,

    /// Recursion fuel exhausted (control blocks nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    #[error("parsing failed with {} errors", .0.error_count())]
    ParseError(Diagnostics),

    #[error("lowering failed with {} errors", .0.error_count())]
    LowerError(Diagnostics),

    #[error("linking failed with {} errors", .0.error_count())]
    LinkError(Diagnostics),
}

impl Error {
    /// Diagnostics carried by the error, if any.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Error::ParseError(d) | Error::LowerError(d) | Error::LinkError(d) => Some(d),
            Error::ExecFuelExhausted | Error::RecursionLimitExceeded => None,
        }
    }
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, Error>;
