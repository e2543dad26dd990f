use std::fmt::Write;

use rowan::{NodeOrToken, TextRange};

use super::cst::SyntaxNode;

/// Indented dump of a CST, one node or token per line.
pub struct CstPrinter<'a> {
    root: &'a SyntaxNode,
    trivia: bool,
    spans: bool,
}

impl<'a> CstPrinter<'a> {
    pub fn new(root: &'a SyntaxNode) -> Self {
        Self {
            root,
            trivia: false,
            spans: false,
        }
    }

    pub fn with_trivia(mut self, value: bool) -> Self {
        self.trivia = value;
        self
    }

    pub fn with_spans(mut self, value: bool) -> Self {
        self.spans = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.format_node(self.root, 0, &mut out);
        out
    }

    fn format_node(&self, node: &SyntaxNode, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        writeln!(w, "{}{:?}{}", prefix, node.kind(), self.span_str(node.text_range()))?;

        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Node(n) => self.format_node(&n, indent + 1, w)?,
                NodeOrToken::Token(t) => {
                    if self.trivia || !t.kind().is_trivia() {
                        writeln!(
                            w,
                            "{}  {:?}{} {:?}",
                            prefix,
                            t.kind(),
                            self.span_str(t.text_range()),
                            t.text()
                        )?;
                    }
                }
            }
        }
        Ok(())
    }

    fn span_str(&self, range: TextRange) -> String {
        if !self.spans {
            return String::new();
        }
        format!(" [{}..{}]", u32::from(range.start()), u32::from(range.end()))
    }
}
