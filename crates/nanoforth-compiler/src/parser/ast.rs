//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides typed accessors.
//! Cast is infallible for correct `SyntaxKind` - validation happens elsewhere.

use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(Root, Root);
ast_node!(Def, Def);
ast_node!(Block, Block);
ast_node!(If, If);
ast_node!(Else, Else);
ast_node!(Do, Do);
ast_node!(Number, Number);
ast_node!(Call, Call);

/// Statement: anything that may appear in a block or at the top level.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stmt {
    Number(Number),
    Call(Call),
    If(If),
    Do(Do),
}

impl Stmt {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::Number => Number::cast(node).map(Stmt::Number),
            SyntaxKind::Call => Call::cast(node).map(Stmt::Call),
            SyntaxKind::If => If::cast(node).map(Stmt::If),
            SyntaxKind::Do => Do::cast(node).map(Stmt::Do),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Stmt::Number(n) => n.as_cst(),
            Stmt::Call(n) => n.as_cst(),
            Stmt::If(n) => n.as_cst(),
            Stmt::Do(n) => n.as_cst(),
        }
    }
}

fn token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|t| t.kind() == kind)
}

impl Root {
    pub fn defs(&self) -> impl Iterator<Item = Def> + '_ {
        self.0.children().filter_map(Def::cast)
    }

    /// Top-level statements, in source order. Definitions are skipped.
    pub fn stmts(&self) -> impl Iterator<Item = Stmt> + '_ {
        self.0.children().filter_map(Stmt::cast)
    }
}

impl Def {
    pub fn name(&self) -> Option<SyntaxToken> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::DefName)
            .and_then(|n| token(&n, SyntaxKind::Word))
    }

    /// The `( ... )` stack comment. Informational only.
    pub fn comment(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::DefComment)
    }

    pub fn body(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }
}

impl Block {
    pub fn stmts(&self) -> impl Iterator<Item = Stmt> + '_ {
        self.0.children().filter_map(Stmt::cast)
    }
}

impl If {
    /// Runs when the condition is non-zero.
    pub fn then_block(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }

    pub fn else_branch(&self) -> Option<Else> {
        self.0.children().find_map(Else::cast)
    }

    pub fn else_block(&self) -> Option<Block> {
        self.else_branch().and_then(|e| e.body())
    }
}

impl Else {
    pub fn body(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }
}

impl Do {
    pub fn body(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }
}

impl Number {
    pub fn token(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Integer)
    }
}

impl Call {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Word)
    }
}
