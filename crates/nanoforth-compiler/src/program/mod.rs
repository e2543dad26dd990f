//! Staged compilation facade.
//!
//! Each stage owns the output of the previous one, so a program can be
//! inspected at any point:
//!
//! ```text
//! ProgramBuilder::new(src) -> parse() -> ProgramParsed
//!                          -> lower() -> ProgramLowered
//!                          -> link()  -> ProgramLinked -> emit()
//! ```
//!
//! Any error diagnostic stops the pipeline. Warnings travel along and end up
//! in [`Compiled::warnings`].

#[cfg(test)]
mod program_tests;

use nanoforth_bytecode::{Cell, Image, Symbols, listing};
use nanoforth_core::Colors;

use crate::assemble::assemble;
use crate::diagnostics::Diagnostics;
use crate::emit::emit;
use crate::ir::Item;
use crate::link::{Linked, link};
use crate::lower::{Lowered, WordTable, lower};
use crate::parser::{CstPrinter, Parser, Root};
use crate::{Error, Result};

const DEFAULT_PARSE_FUEL: u32 = 1_000_000;
/// Parsing, lowering and tree teardown all recurse once per nested block;
/// this depth stays well inside a 2 MiB thread stack.
const DEFAULT_PARSE_MAX_DEPTH: u32 = 256;

pub struct ProgramConfig {
    pub parse_fuel: u32,
    pub parse_max_depth: u32,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            parse_fuel: DEFAULT_PARSE_FUEL,
            parse_max_depth: DEFAULT_PARSE_MAX_DEPTH,
        }
    }
}

pub struct ProgramBuilder<'src> {
    source: &'src str,
    config: ProgramConfig,
}

impl<'src> ProgramBuilder<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            config: ProgramConfig::default(),
        }
    }

    pub fn with_exec_fuel(mut self, fuel: u32) -> Self {
        self.config.parse_fuel = fuel;
        self
    }

    pub fn with_recursion_limit(mut self, limit: u32) -> Self {
        self.config.parse_max_depth = limit;
        self
    }

    pub fn parse(self) -> Result<ProgramParsed<'src>> {
        let res = Parser::new(self.source)
            .with_exec_fuel(self.config.parse_fuel)
            .with_recursion_limit(self.config.parse_max_depth)
            .parse()?;

        if res.diagnostics.has_errors() {
            return Err(Error::ParseError(res.diagnostics));
        }

        Ok(ProgramParsed {
            source: self.source,
            root: res.root,
            diag: res.diagnostics,
            fuel_consumed: res.fuel_consumed,
        })
    }
}

#[derive(Debug)]
pub struct ProgramParsed<'src> {
    source: &'src str,
    root: Root,
    diag: Diagnostics,
    fuel_consumed: u32,
}

impl<'src> ProgramParsed<'src> {
    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn root(&self) -> &Root {
        &self.root
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diag
    }

    pub fn parser_fuel_consumed(&self) -> u32 {
        self.fuel_consumed
    }

    pub fn dump_cst(&self) -> String {
        CstPrinter::new(self.root.as_cst()).dump()
    }

    pub fn dump_cst_full(&self) -> String {
        CstPrinter::new(self.root.as_cst())
            .with_trivia(true)
            .with_spans(true)
            .dump()
    }

    pub fn lower(mut self) -> Result<ProgramLowered<'src>> {
        let lowered = lower(&self.root, &mut self.diag);
        if self.diag.has_errors() {
            return Err(Error::LowerError(self.diag));
        }

        Ok(ProgramLowered {
            source: self.source,
            lowered,
            diag: self.diag,
        })
    }
}

#[derive(Debug)]
pub struct ProgramLowered<'src> {
    source: &'src str,
    lowered: Lowered,
    diag: Diagnostics,
}

impl<'src> ProgramLowered<'src> {
    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn main(&self) -> &[Item] {
        &self.lowered.main
    }

    pub fn words(&self) -> &WordTable {
        &self.lowered.words
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diag
    }

    /// The assembled stream: main, `stop`, then each word.
    pub fn items(&self) -> Vec<Item> {
        assemble(&self.lowered.main, &self.lowered.words)
    }

    pub fn dump_items(&self) -> String {
        let mut out = String::new();
        for item in self.items() {
            out.push_str(&item.to_string());
            out.push('\n');
        }
        out
    }

    pub fn link(mut self) -> Result<ProgramLinked<'src>> {
        match link(&self.items()) {
            Ok(linked) => Ok(ProgramLinked {
                source: self.source,
                linked,
                diag: self.diag,
            }),
            Err(err) => {
                err.report(&mut self.diag);
                Err(Error::LinkError(self.diag))
            }
        }
    }
}

#[derive(Debug)]
pub struct ProgramLinked<'src> {
    source: &'src str,
    linked: Linked,
    diag: Diagnostics,
}

impl<'src> ProgramLinked<'src> {
    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn cells(&self) -> &[Cell] {
        &self.linked.cells
    }

    pub fn symbols(&self) -> &Symbols {
        &self.linked.symbols
    }

    pub fn warnings(&self) -> Diagnostics {
        self.diag.warnings()
    }

    pub fn listing(&self, colors: Colors) -> String {
        listing(&self.linked.cells, &self.linked.symbols, colors)
    }

    pub fn emit(&self) -> Image {
        emit(&self.linked)
    }

    pub fn into_compiled(self) -> Compiled {
        let image = emit(&self.linked);
        Compiled {
            image,
            warnings: self.diag.warnings(),
            cells: self.linked.cells,
            symbols: self.linked.symbols,
        }
    }
}

/// Everything a successful compilation produces.
#[derive(Debug, Clone)]
pub struct Compiled {
    pub image: Image,
    pub cells: Vec<Cell>,
    pub symbols: Symbols,
    pub warnings: Diagnostics,
}

impl Compiled {
    pub fn listing(&self, colors: Colors) -> String {
        listing(&self.cells, &self.symbols, colors)
    }
}

/// Run the whole pipeline with default limits.
pub fn compile(source: &str) -> Result<Compiled> {
    ProgramBuilder::new(source)
        .parse()?
        .lower()?
        .link()
        .map(ProgramLinked::into_compiled)
}
