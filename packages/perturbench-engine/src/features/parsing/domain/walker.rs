//! Iterative pre-order traversal
//!
//! Uses an explicit stack so tree depth is bounded by heap, not by the
//! thread's call stack. Children are pushed in reverse to keep document order.

use tree_sitter::Node;

/// Single-use pre-order iterator over a subtree
pub struct AstWalker<'tree> {
    stack: Vec<Node<'tree>>,
}

impl<'tree> AstWalker<'tree> {
    pub fn new(root: Node<'tree>) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'tree> Iterator for AstWalker<'tree> {
    type Item = Node<'tree>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        for i in (0..current.child_count()).rev() {
            if let Some(child) = current.child(i) {
                self.stack.push(child);
            }
        }
        Some(current)
    }
}
