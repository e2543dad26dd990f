//! Parser infrastructure for NanoForth.
//!
//! # Architecture
//!
//! This parser produces a lossless concrete syntax tree (CST) via Rowan's green tree builder:
//!
//! - Tokens carry spans; text is sliced from the source only when building tree nodes
//! - Whitespace and comments attach as leading trivia of the next node or token
//! - Open `:`/`if`/`else`/`do` constructs decide who owns a terminator
//!
//! The grammar is accept/reject. The parser still always produces a tree and
//! keeps going after an error so that every problem is reported at once, but
//! any error diagnostic aborts compilation.
//!
//! Hitting the token or nesting limit returns an actual error immediately.

pub mod ast;
pub mod cst;
pub mod lexer;

mod core;
mod grammar;
mod printer;


pub use ast::{Block, Call, Def, Do, Else, If, Number, Root, Stmt};
pub use cst::{SyntaxKind, SyntaxNode, SyntaxToken};
pub use lexer::{Token, lex, token_text};
pub use printer::CstPrinter;

pub use core::{ParseResult, Parser};
