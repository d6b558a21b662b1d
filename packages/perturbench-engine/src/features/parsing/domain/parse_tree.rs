//! Parsed tree bound to the buffer it was parsed from

use tree_sitter::{Node, Tree};

use super::language_id::LanguageId;
use super::walker::AstWalker;
use crate::shared::utils::tree_sitter::node_text;

/// Syntax tree plus its source
///
/// Node offsets are only meaningful against `source`; a tree is dropped
/// as soon as the level that parsed it has computed its replacements.
pub struct ParseTree<'src> {
    tree: Tree,
    source: &'src str,
    language: LanguageId,
}

impl<'src> ParseTree<'src> {
    pub(crate) fn new(tree: Tree, source: &'src str, language: LanguageId) -> Self {
        Self {
            tree,
            source,
            language,
        }
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn language(&self) -> LanguageId {
        self.language
    }

    /// Fresh pre-order walk from the root
    pub fn walk(&self) -> AstWalker<'_> {
        AstWalker::new(self.root())
    }

    pub fn text(&self, node: &Node) -> &'src str {
        node_text(node, self.source)
    }

    pub fn has_errors(&self) -> bool {
        self.root().has_error()
    }
}
