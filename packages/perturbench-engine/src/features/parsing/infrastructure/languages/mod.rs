//! Language-specific node kinds and naming predicates

pub mod c;
pub mod java;
pub mod javascript;
pub mod python;

use tree_sitter::Node;

/// Whether `node` is the `field` child of its parent and the parent kind is one of `kinds`
#[inline]
pub(crate) fn is_field_of(node: &Node, field: &str, kinds: &[&str]) -> bool {
    node.parent().map_or(false, |parent| {
        kinds.contains(&parent.kind()) && parent.child_by_field_name(field) == Some(*node)
    })
}
