//! Parser state: token cursor, open constructs, fuel.

use rowan::{GreenNodeBuilder, TextRange, TextSize};

use super::ast::Root;
use super::cst::token_sets::{DEF_END, DO_END, ELSE_END, IF_END};
use super::cst::{SyntaxKind, SyntaxNode, TokenSet};
use super::lexer::{Token, lex, token_text};
use crate::Error;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Output of a parse that ran to completion. May still hold syntax errors.
#[derive(Debug)]
pub struct ParseResult {
    pub root: Root,
    pub diagnostics: Diagnostics,
    pub fuel_consumed: u32,
}

/// A construct whose terminator has not been reached.
#[derive(Debug, Clone, Copy)]
pub(super) struct OpenDelimiter {
    pub kind: SyntaxKind,
    /// Where the construct was opened. An `else` keeps the span of its `if`.
    pub span: TextRange,
}

impl OpenDelimiter {
    fn terminators(&self) -> TokenSet {
        match self.kind {
            SyntaxKind::Colon => DEF_END,
            SyntaxKind::KwIf => IF_END,
            SyntaxKind::KwElse => ELSE_END,
            SyntaxKind::KwDo => DO_END,
            _ => TokenSet::EMPTY,
        }
    }

    fn nests(&self) -> bool {
        self.kind != SyntaxKind::Colon
    }
}

/// Tokens before `emitted` are already in the tree; `next` is the first
/// significant token at or after it. Trivia in between is attached to
/// whatever node or token is built next.
struct Cursor<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    emitted: usize,
    next: usize,
    open: Vec<OpenDelimiter>,
}

impl<'src> Cursor<'src> {
    fn new(source: &'src str) -> Self {
        let tokens = lex(source);
        let next = skip_trivia(&tokens, 0);
        Self {
            source,
            tokens,
            emitted: 0,
            next,
            open: Vec::with_capacity(8),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.next)
    }

    fn flush_trivia(&mut self, builder: &mut GreenNodeBuilder<'static>) {
        for token in &self.tokens[self.emitted..self.next] {
            builder.token(token.kind.into(), token_text(self.source, token));
        }
        self.emitted = self.next;
    }

    fn advance(&mut self, builder: &mut GreenNodeBuilder<'static>) {
        self.flush_trivia(builder);
        let Some(token) = self.tokens.get(self.next) else {
            return;
        };
        builder.token(token.kind.into(), token_text(self.source, token));
        self.emitted = self.next + 1;
        self.next = skip_trivia(&self.tokens, self.emitted);
    }

    /// Whether some enclosing construct ends at `kind`.
    fn owns(&self, kind: SyntaxKind) -> bool {
        self.open.iter().any(|d| d.terminators().contains(kind))
    }

    fn nesting(&self) -> u32 {
        self.open.iter().filter(|d| d.nests()).count() as u32
    }
}

fn skip_trivia(tokens: &[Token], from: usize) -> usize {
    tokens[from..]
        .iter()
        .position(|t| !t.kind.is_trivia())
        .map_or(tokens.len(), |offset| from + offset)
}

pub struct Parser<'src> {
    cursor: Cursor<'src>,
    builder: GreenNodeBuilder<'static>,
    diagnostics: Diagnostics,
    last_error_at: Option<TextSize>,
    fuel_limit: Option<u32>,
    fuel_used: u32,
    max_depth: Option<u32>,
    fatal: Option<Error>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
            builder: GreenNodeBuilder::new(),
            diagnostics: Diagnostics::new(),
            last_error_at: None,
            fuel_limit: None,
            fuel_used: 0,
            max_depth: None,
            fatal: None,
        }
    }

    /// Maximum number of tokens consumed.
    pub fn with_exec_fuel(mut self, limit: u32) -> Self {
        self.fuel_limit = Some(limit);
        self
    }

    /// Maximum nesting of `if`/`else` and `do` blocks.
    pub fn with_recursion_limit(mut self, limit: u32) -> Self {
        self.max_depth = Some(limit);
        self
    }

    /// Returns `Err` only when a limit is hit; syntax errors land in the diagnostics.
    pub fn parse(mut self) -> Result<ParseResult, Error> {
        self.parse_root();
        if let Some(err) = self.fatal {
            return Err(err);
        }
        let root = Root::cast(SyntaxNode::new_root(self.builder.finish()))
            .expect("parse_root always builds a Root node");
        Ok(ParseResult {
            root,
            diagnostics: self.diagnostics,
            fuel_consumed: self.fuel_used,
        })
    }

    pub(super) fn peek(&self) -> Option<SyntaxKind> {
        self.cursor.peek().map(|t| t.kind)
    }

    pub(super) fn at(&self, kind: SyntaxKind) -> bool {
        self.peek() == Some(kind)
    }

    pub(super) fn at_any(&self, set: TokenSet) -> bool {
        self.peek().is_some_and(|kind| set.contains(kind))
    }

    pub(super) fn span(&self) -> TextRange {
        self.cursor.peek().map_or_else(
            || TextRange::empty(TextSize::of(self.cursor.source)),
            |t| t.span,
        )
    }

    pub(super) fn text(&self) -> &'src str {
        self.cursor
            .peek()
            .map_or("", |t| token_text(self.cursor.source, t))
    }

    pub(super) fn should_stop(&self) -> bool {
        self.peek().is_none() || self.fatal.is_some()
    }

    pub(super) fn owns(&self, kind: SyntaxKind) -> bool {
        self.cursor.owns(kind)
    }

    /// The root wraps leading trivia, so nothing is flushed before it opens.
    pub(super) fn start_root(&mut self) {
        self.builder.start_node(SyntaxKind::Root.into());
    }

    pub(super) fn finish_root(&mut self) {
        self.cursor.flush_trivia(&mut self.builder);
        self.builder.finish_node();
    }

    pub(super) fn start_node(&mut self, kind: SyntaxKind) {
        self.cursor.flush_trivia(&mut self.builder);
        self.builder.start_node(kind.into());
    }

    pub(super) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    pub(super) fn bump(&mut self) {
        debug_assert!(self.peek().is_some(), "bump called at EOF");
        match self.fuel_limit {
            Some(limit) if self.fuel_used >= limit => self.fail(Error::ExecFuelExhausted),
            _ => self.fuel_used += 1,
        }
        self.cursor.advance(&mut self.builder);
    }

    pub(super) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if !self.at(kind) {
            return false;
        }
        self.bump();
        true
    }

    /// Open a construct terminated by one of its delimiters. Fails, setting
    /// the fatal error, when `if`/`do` nesting reaches the limit.
    pub(super) fn open(&mut self, kind: SyntaxKind) -> bool {
        let delimiter = OpenDelimiter {
            kind,
            span: self.span(),
        };
        if let Some(limit) = self.max_depth
            && delimiter.nests()
            && self.cursor.nesting() >= limit
        {
            self.fail(Error::RecursionLimitExceeded);
            return false;
        }
        self.cursor.open.push(delimiter);
        true
    }

    /// The first limit hit wins.
    fn fail(&mut self, err: Error) {
        if self.fatal.is_none() {
            self.fatal = Some(err);
        }
    }

    /// The innermost `if` continues as an `else`.
    pub(super) fn reopen_as_else(&mut self) {
        if let Some(top) = self.cursor.open.last_mut() {
            top.kind = SyntaxKind::KwElse;
        }
    }

    pub(super) fn close(&mut self) -> Option<OpenDelimiter> {
        self.cursor.open.pop()
    }

    /// Report at the current token, at most once per position.
    pub(super) fn error(&mut self, kind: DiagnosticKind, detail: Option<String>) {
        let range = self.span();
        if self.last_error_at.replace(range.start()) == Some(range.start()) {
            return;
        }
        let builder = self.diagnostics.report(kind, range);
        match detail {
            Some(detail) => builder.message(detail).emit(),
            None => builder.emit(),
        }
    }

    /// Report, then wrap the offending token in an `Error` node.
    pub(super) fn error_and_bump(&mut self, kind: DiagnosticKind, detail: Option<String>) {
        self.error(kind, detail);
        if self.peek().is_some() {
            self.start_node(SyntaxKind::Error);
            self.bump();
            self.finish_node();
        }
    }

    /// Covers the whole construct so errors reported inside it get suppressed.
    pub(super) fn error_unclosed(
        &mut self,
        kind: DiagnosticKind,
        message: &str,
        related: &str,
        open: &OpenDelimiter,
    ) {
        let current = self.span();
        if self.last_error_at.replace(current.start()) == Some(current.start()) {
            return;
        }
        self.diagnostics
            .report(kind, TextRange::new(open.span.start(), current.end()))
            .message(message)
            .related_to(related, open.span)
            .emit();
    }
}
