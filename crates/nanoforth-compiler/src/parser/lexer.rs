//! Lexer for NanoForth source.
//!
//! Tokens are spans over the source; text is sliced out with [`token_text`].
//! Characters logos cannot match end up in `Garbage` tokens, one per
//! unbroken run, so a stray `)` or an unterminated `(` is reported once.

use logos::Logos;
use rowan::{TextRange, TextSize};

use super::cst::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();

    for (result, range) in SyntaxKind::lexer(source).spanned() {
        let span = TextRange::new(
            TextSize::from(range.start as u32),
            TextSize::from(range.end as u32),
        );
        let kind = match result {
            Ok(kind) => kind,
            Err(()) => {
                let joins = |t: &Token| t.kind == SyntaxKind::Garbage && t.span.end() == span.start();
                match tokens.last_mut() {
                    Some(last) if joins(last) => {
                        last.span = last.span.cover(span);
                    }
                    _ => tokens.push(Token {
                        kind: SyntaxKind::Garbage,
                        span,
                    }),
                }
                continue;
            }
        };
        tokens.push(Token { kind, span });
    }

    tokens
}

#[inline]
pub fn token_text<'s>(source: &'s str, token: &Token) -> &'s str {
    &source[token.span]
}
