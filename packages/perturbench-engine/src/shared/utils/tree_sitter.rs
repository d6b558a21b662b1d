//! Tree-sitter Utility Functions
//!
//! Node lookup, text extraction and line-layout helpers used by every
//! obfuscation level.

use tree_sitter::Node;

// ═══════════════════════════════════════════════════════════════════════════
// Node Traversal Utilities
// ═══════════════════════════════════════════════════════════════════════════

/// Find a direct child node by kind
#[inline]
pub fn find_child_by_kind<'tree>(node: Node<'tree>, kind: &str) -> Option<Node<'tree>> {
    (0..node.child_count())
        .filter_map(|i| node.child(i))
        .find(|child| child.kind() == kind)
}

/// All direct children, named or not
#[inline]
pub fn children<'tree>(node: Node<'tree>) -> Vec<Node<'tree>> {
    (0..node.child_count()).filter_map(|i| node.child(i)).collect()
}

/// Named children that are not comments
pub fn named_statements<'tree>(node: Node<'tree>) -> Vec<Node<'tree>> {
    children(node)
        .into_iter()
        .filter(|c| c.is_named() && !c.kind().ends_with("comment"))
        .collect()
}

/// Find all descendants (node included) whose kind is in `kinds`, in document order
pub fn find_descendants_by_kinds<'tree>(node: Node<'tree>, kinds: &[&str]) -> Vec<Node<'tree>> {
    let mut result = Vec::new();
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        if kinds.contains(&current.kind()) {
            result.push(current);
        }
        for i in (0..current.child_count()).rev() {
            if let Some(child) = current.child(i) {
                stack.push(child);
            }
        }
    }
    result
}

/// Nearest ancestor whose kind is in `kinds`
pub fn find_ancestor_by_kinds<'tree>(node: Node<'tree>, kinds: &[&str]) -> Option<Node<'tree>> {
    let mut current = node.parent();
    while let Some(parent) = current {
        if kinds.contains(&parent.kind()) {
            return Some(parent);
        }
        current = parent.parent();
    }
    None
}

/// First ERROR or MISSING node in pre-order
pub fn first_error_node<'tree>(root: Node<'tree>) -> Option<Node<'tree>> {
    let mut stack = vec![root];
    while let Some(current) = stack.pop() {
        if current.is_error() || current.is_missing() {
            return Some(current);
        }
        if !current.has_error() {
            continue;
        }
        for i in (0..current.child_count()).rev() {
            if let Some(child) = current.child(i) {
                stack.push(child);
            }
        }
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
// Text Extraction Utilities
// ═══════════════════════════════════════════════════════════════════════════

/// Extract text content from a node
#[inline]
pub fn node_text<'src>(node: &Node, source: &'src str) -> &'src str {
    &source[node.start_byte()..node.end_byte()]
}

// ═══════════════════════════════════════════════════════════════════════════
// Line Layout Utilities
// ═══════════════════════════════════════════════════════════════════════════

/// Byte offset of the start of the line containing `offset`
#[inline]
pub fn line_start(source: &str, offset: usize) -> usize {
    source[..offset].rfind('\n').map_or(0, |i| i + 1)
}

/// Leading whitespace of the line containing `offset`
pub fn line_indent(source: &str, offset: usize) -> &str {
    let start = line_start(source, offset);
    let rest = &source[start..];
    let width = rest
        .bytes()
        .take_while(|b| *b == b' ' || *b == b'\t')
        .count();
    &rest[..width]
}

/// Whether only whitespace precedes `offset` on its line
pub fn starts_line(source: &str, offset: usize) -> bool {
    source[line_start(source, offset)..offset]
        .bytes()
        .all(|b| b == b' ' || b == b'\t')
}

/// Start of the spaces and tabs that end right at `offset`
pub fn gap_start(source: &str, offset: usize) -> usize {
    source[..offset].trim_end_matches([' ', '\t']).len()
}

/// Byte offsets of every line start inside `[start, end)`, excluding `start`'s own line
pub fn line_starts_within(source: &str, start: usize, end: usize) -> Vec<usize> {
    source[start..end]
        .match_indices('\n')
        .map(|(i, _)| start + i + 1)
        .filter(|&offset| offset < end)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_helpers() {
        let src = "def f():\n    x = 1\n\n    return x\n";
        let x = src.find("x = 1").unwrap();
        assert_eq!(line_start(src, x), 9);
        assert_eq!(line_indent(src, x), "    ");
        assert!(starts_line(src, x));
        assert!(!starts_line(src, x + 2));

        let starts = line_starts_within(src, 0, src.len());
        assert_eq!(starts, vec![9, 19, 20]);

        let inline = "if ok: \t go()";
        assert_eq!(gap_start(inline, inline.find("go").unwrap()), 6);
        assert_eq!(gap_start(src, x), x);
    }

    #[test]
    fn test_node_lookup_on_c_tree() {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&tree_sitter_c::language()).unwrap();
        let src = "int main() { return 0; }";
        let tree = parser.parse(src, None).unwrap();
        let root = tree.root_node();

        let returns = find_descendants_by_kinds(root, &["return_statement"]);
        assert_eq!(returns.len(), 1);
        assert_eq!(node_text(&returns[0], src), "return 0;");

        let func = find_ancestor_by_kinds(returns[0], &["function_definition"]).unwrap();
        assert!(find_child_by_kind(func, "compound_statement").is_some());
        assert!(first_error_node(root).is_none());
    }

    #[test]
    fn test_first_error_node() {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&tree_sitter_c::language()).unwrap();
        let tree = parser.parse("int main( { return 0; }", None).unwrap();
        assert!(first_error_node(tree.root_node()).is_some());
    }
}
