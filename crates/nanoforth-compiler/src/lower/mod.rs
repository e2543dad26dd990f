//! AST lowering: typed AST to tagged item sequences.
//!
//! Each construct lowers independently, children first, and the results are
//! concatenated. Top-level statements form the main sequence; every
//! definition becomes an entry in the word table. Word names are not checked
//! here: calls lower to symbolic references that the linker resolves.

mod control;

#[cfg(test)]
mod lower_tests;

use indexmap::IndexMap;
use nanoforth_bytecode::Opcode;
use rowan::TextRange;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::ir::{Item, Label, LabelGen};
use crate::parser::ast::{Block, Call, Def, Number, Root, Stmt};

/// Word name to its lowered sequence, in definition order.
pub type WordTable = IndexMap<String, Vec<Item>>;

/// Output of lowering a whole program.
#[derive(Debug, Clone, Default)]
pub struct Lowered {
    pub main: Vec<Item>,
    pub words: WordTable,
}

/// Lower a parsed program. Errors are reported into `diag`; the returned
/// items are only meaningful when no error was reported.
pub fn lower(root: &Root, diag: &mut Diagnostics) -> Lowered {
    let mut lowerer = Lowerer::new(diag);
    let mut main = Vec::new();

    for node in root.as_cst().children() {
        if let Some(def) = Def::cast(node.clone()) {
            lowerer.lower_def(&def);
        } else if let Some(stmt) = Stmt::cast(node) {
            main.extend(lowerer.lower_stmt(&stmt));
        }
    }

    Lowered {
        main,
        words: lowerer.words,
    }
}

pub(crate) struct Lowerer<'d> {
    pub(super) labels: LabelGen,
    pub(super) diag: &'d mut Diagnostics,
    words: WordTable,
    def_sites: IndexMap<String, TextRange>,
}

impl<'d> Lowerer<'d> {
    fn new(diag: &'d mut Diagnostics) -> Self {
        Self {
            labels: LabelGen::new(),
            diag,
            words: WordTable::new(),
            def_sites: IndexMap::new(),
        }
    }

    /// `[Def(name), body.., __return]`, registered under `name`.
    fn lower_def(&mut self, def: &Def) {
        let Some(name_token) = def.name() else {
            return;
        };
        let name = name_token.text().to_string();
        let range = name_token.text_range();

        if let Some(&first) = self.def_sites.get(&name) {
            self.diag
                .report(DiagnosticKind::DuplicateDefinition, range)
                .message(&name)
                .related_to("first defined here", first)
                .emit();
            return;
        }

        let mut items = vec![Item::Def(Label::Word(name.clone()))];
        items.extend(self.lower_block(def.body()));
        items.push(Item::Op(Opcode::Return));

        self.def_sites.insert(name.clone(), range);
        self.words.insert(name, items);
    }

    pub(super) fn lower_block(&mut self, block: Option<Block>) -> Vec<Item> {
        let Some(block) = block else {
            return Vec::new();
        };
        block
            .stmts()
            .flat_map(|stmt| self.lower_stmt(&stmt))
            .collect()
    }

    fn lower_stmt(&mut self, stmt: &Stmt) -> Vec<Item> {
        match stmt {
            Stmt::Number(n) => self.lower_number(n),
            Stmt::Call(c) => self.lower_call(c),
            Stmt::If(node) => self.lower_if(node),
            Stmt::Do(node) => self.lower_do(node),
        }
    }

    /// `[__lit, Imm(v)]`. Literals above `i32::MAX` are rejected.
    fn lower_number(&mut self, number: &Number) -> Vec<Item> {
        let Some(token) = number.token() else {
            return Vec::new();
        };
        match token.text().parse::<i32>() {
            Ok(value) => vec![Item::Op(Opcode::Lit), Item::Imm(value)],
            Err(_) => {
                self.diag
                    .report(DiagnosticKind::IntegerOverflow, token.text_range())
                    .message(token.text())
                    .emit();
                Vec::new()
            }
        }
    }

    /// A mnemonic lowers to its bare opcode; anything else to a call.
    fn lower_call(&mut self, call: &Call) -> Vec<Item> {
        let Some(token) = call.name() else {
            return Vec::new();
        };
        let name = token.text();

        if let Some(op) = Opcode::from_mnemonic(name) {
            return vec![Item::Op(op)];
        }

        vec![
            Item::Op(Opcode::Lit),
            Item::word_ref(name, token.text_range()),
            Item::Op(Opcode::Call),
        ]
    }
}
