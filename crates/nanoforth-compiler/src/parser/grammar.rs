//! Grammar productions for NanoForth.
//!
//! ```text
//! root   = (def | stmt)* EOF
//! def    = ':' Word DefComment block ';'
//! block  = stmt*
//! stmt   = if | do | Integer | Word
//! if     = 'if' block ('else' block)? 'then'
//! do     = 'do' block 'loop'
//! ```
//!
//! Every open construct sits on the delimiter stack, so a terminator that
//! belongs to an outer construct closes the inner ones (each reporting itself
//! unclosed) instead of being swallowed as a stray token.

use super::core::Parser;
use super::cst::token_sets::{DEF_END, DO_END, ELSE_END, IF_END, STMT_FIRST, TERMINATORS};
use super::cst::{SyntaxKind, TokenSet};
use crate::diagnostics::DiagnosticKind;

fn opener_of(terminator: SyntaxKind) -> &'static str {
    match terminator {
        SyntaxKind::Semicolon => "`:`",
        SyntaxKind::KwElse | SyntaxKind::KwThen => "`if`",
        SyntaxKind::KwLoop => "`do`",
        _ => "opener",
    }
}

impl Parser<'_> {
    pub(super) fn parse_root(&mut self) {
        self.start_root();
        self.parse_stmts(TokenSet::EMPTY, true);
        self.finish_root();
    }

    /// Statement sequence up to (not including) one of `end`, an outer
    /// construct's terminator, or EOF.
    fn parse_stmts(&mut self, end: TokenSet, top_level: bool) {
        while !self.should_stop() {
            let Some(kind) = self.peek() else {
                break;
            };
            if end.contains(kind) {
                break;
            }

            match kind {
                SyntaxKind::Integer => self.parse_leaf(SyntaxKind::Number),
                SyntaxKind::Word => self.parse_leaf(SyntaxKind::Call),
                SyntaxKind::KwIf => self.parse_if(),
                SyntaxKind::KwDo => self.parse_do(),
                SyntaxKind::Colon if top_level => self.parse_def(),
                SyntaxKind::Colon => self.error_and_bump(DiagnosticKind::NestedDefinition, None),
                _ if TERMINATORS.contains(kind) => {
                    if self.owns(kind) {
                        break;
                    }
                    let msg = format!("{} without matching {}", kind.describe(), opener_of(kind));
                    self.error_and_bump(DiagnosticKind::UnmatchedTerminator, Some(msg));
                }
                SyntaxKind::DefComment => self.error_and_bump(DiagnosticKind::StrayStackComment, None),
                _ => {
                    let msg = format!("`{}`", self.text());
                    self.error_and_bump(DiagnosticKind::UnexpectedToken, Some(msg));
                }
            }
        }
    }

    fn parse_block(&mut self, end: TokenSet) {
        self.start_node(SyntaxKind::Block);
        self.parse_stmts(end, false);
        self.finish_node();
    }

    /// A single token wrapped in a `Number` or `Call` node.
    fn parse_leaf(&mut self, node: SyntaxKind) {
        self.start_node(node);
        self.bump();
        self.finish_node();
    }

    /// `: name ( stack comment ) body ;`
    fn parse_def(&mut self) {
        debug_assert!(self.at(SyntaxKind::Colon));
        self.open(SyntaxKind::Colon);
        self.start_node(SyntaxKind::Def);
        self.bump();

        if self.at(SyntaxKind::Word) {
            self.start_node(SyntaxKind::DefName);
            self.bump();
            self.finish_node();
        } else if self.at_any(STMT_FIRST.union(TokenSet::single(SyntaxKind::Colon))) {
            let msg = self.peek().map(|k| format!("found {}", k.describe()));
            self.error_and_bump(DiagnosticKind::ExpectedDefName, msg);
        } else {
            self.error(DiagnosticKind::ExpectedDefName, None);
        }

        if !self.eat(SyntaxKind::DefComment) {
            self.error(DiagnosticKind::ExpectedStackComment, None);
        }

        self.parse_block(DEF_END);

        let closed = self.eat(SyntaxKind::Semicolon);
        if let Some(open) = self.close()
            && !closed
        {
            self.error_unclosed(
                DiagnosticKind::UnterminatedDefinition,
                "definition never ends",
                "definition starts here",
                &open,
            );
        }
        self.finish_node();
    }

    /// `if A then` | `if A else B then`
    fn parse_if(&mut self) {
        debug_assert!(self.at(SyntaxKind::KwIf));
        if !self.open(SyntaxKind::KwIf) {
            return;
        }

        self.start_node(SyntaxKind::If);
        self.bump();
        self.parse_block(IF_END);

        if self.at(SyntaxKind::KwElse) {
            self.reopen_as_else();
            self.start_node(SyntaxKind::Else);
            self.bump();
            self.parse_block(ELSE_END);
            self.finish_node();
        }

        let closed = self.eat(SyntaxKind::KwThen);
        if let Some(open) = self.close()
            && !closed
        {
            self.error_unclosed(
                DiagnosticKind::UnclosedIf,
                "`if` never closed",
                "`if` opened here",
                &open,
            );
        }
        self.finish_node();
    }

    /// `do B loop`
    fn parse_do(&mut self) {
        debug_assert!(self.at(SyntaxKind::KwDo));
        if !self.open(SyntaxKind::KwDo) {
            return;
        }

        self.start_node(SyntaxKind::Do);
        self.bump();
        self.parse_block(DO_END);

        let closed = self.eat(SyntaxKind::KwLoop);
        if let Some(open) = self.close()
            && !closed
        {
            self.error_unclosed(
                DiagnosticKind::UnclosedDo,
                "`do` never closed",
                "`do` opened here",
                &open,
            );
        }
        self.finish_node();
    }
}
