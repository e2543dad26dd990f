//! Syntax kinds for NanoForth.
//!
//! `SyntaxKind` serves dual roles: token kinds (from lexer) and node kinds (from parser).
//! Logos derives token recognition; node kinds lack token/regex attributes.
//! `ForthLang` implements Rowan's `Language` trait for tree construction.

use logos::Logos;
use rowan::Language;

/// All token and node kinds. Tokens first, then nodes, then `__LAST` sentinel.
/// `#[repr(u16)]` enables safe transmute in `kind_from_raw`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token(":")]
    Colon = 0,

    #[token(";")]
    Semicolon,

    /// Keywords match only as whole tokens: `iffy` lexes as a `Word`.
    #[token("if")]
    KwIf,

    #[token("else")]
    KwElse,

    #[token("then")]
    KwThen,

    #[token("do")]
    KwDo,

    #[token("loop")]
    KwLoop,

    /// Digits only. `12ab` is longer as a `Word`, so it lexes as one.
    #[regex(r"[0-9]+", priority = 3)]
    Integer,

    /// Any run of characters except `: ; ( ) \` and whitespace.
    #[regex(r"[^:;()\\\s]+", allow_greedy = true)]
    Word,

    /// `( n -- n*2 )` after a definition name.
    #[regex(r"\([^)]*\)", allow_greedy = true)]
    DefComment,

    #[regex(r"[ \t\r\x0B\x0C]+")]
    Whitespace,

    #[token("\n")]
    #[token("\r\n")]
    Newline,

    #[regex(r"\\[^\n]*", allow_greedy = true)]
    LineComment,

    /// Coalesced unrecognized characters
    Garbage,
    Error,

    // --- Node kinds (non-terminals) ---
    Root,
    Def,
    DefName,
    Block,
    If,
    Else,
    Do,
    Number,
    Call,

    // Must be last - used for bounds checking in `kind_from_raw`
    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace | Newline | LineComment)
    }

    /// Human-readable spelling for diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            Colon => "`:`",
            Semicolon => "`;`",
            KwIf => "`if`",
            KwElse => "`else`",
            KwThen => "`then`",
            KwDo => "`do`",
            KwLoop => "`loop`",
            Integer => "number",
            Word => "word",
            DefComment => "stack comment",
            _ => "token",
        }
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    #[inline]
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language tag for Rowan's tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ForthLang {}

impl Language for ForthLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 < __LAST as u16);
        // SAFETY: We've verified the value is in bounds, and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<ForthLang>;
pub type SyntaxToken = rowan::SyntaxToken<ForthLang>;

/// 64-bit bitset of `SyntaxKind`s for O(1) membership testing.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u64);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet(0);

    /// Panics at compile time if any kind's discriminant >= 64.
    #[inline]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u64;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 64, "SyntaxKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn single(kind: SyntaxKind) -> Self {
        let kind = kind as u16;
        assert!(kind < 64, "SyntaxKind value exceeds TokenSet capacity");
        TokenSet(1 << kind)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        if kind >= 64 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for i in 0..64u16 {
            if self.0 & (1 << i) != 0 && i < __LAST as u16 {
                // SAFETY: bounds checked against `__LAST` above
                let kind: SyntaxKind = unsafe { std::mem::transmute(i) };
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

/// Pre-defined token sets for the parser.
pub mod token_sets {
    use super::*;

    /// FIRST set of a statement.
    pub const STMT_FIRST: TokenSet = TokenSet::new(&[Integer, Word, KwIf, KwDo]);

    /// Tokens that end some enclosing construct.
    pub const TERMINATORS: TokenSet = TokenSet::new(&[Semicolon, KwElse, KwThen, KwLoop]);

    pub const DEF_END: TokenSet = TokenSet::single(Semicolon);
    pub const IF_END: TokenSet = TokenSet::new(&[KwElse, KwThen]);
    pub const ELSE_END: TokenSet = TokenSet::single(KwThen);
    pub const DO_END: TokenSet = TokenSet::single(KwLoop);
}
