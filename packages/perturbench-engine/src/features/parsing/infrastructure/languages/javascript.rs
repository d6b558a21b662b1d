//! JavaScript-specific tree-sitter configuration

use tree_sitter::Node;

use super::is_field_of;
use crate::shared::utils::tree_sitter::find_ancestor_by_kinds;

/// JavaScript node kinds for quick lookup
pub mod node_kinds {
    pub const PROGRAM: &str = "program";
    pub const FUNCTION_DECLARATION: &str = "function_declaration";
    pub const GENERATOR_FUNCTION_DECLARATION: &str = "generator_function_declaration";
    pub const FUNCTION_EXPRESSION: &str = "function_expression";
    pub const CLASS_DECLARATION: &str = "class_declaration";
    pub const CLASS: &str = "class";
    pub const CLASS_BODY: &str = "class_body";
    pub const STATEMENT_BLOCK: &str = "statement_block";
    pub const IF_STATEMENT: &str = "if_statement";
    pub const WHILE_STATEMENT: &str = "while_statement";
    pub const STRING: &str = "string";
    pub const TEMPLATE_STRING: &str = "template_string";
    pub const IMPORT_STATEMENT: &str = "import_statement";
    pub const EXPORT_STATEMENT: &str = "export_statement";
    pub const EXPORT_CLAUSE: &str = "export_clause";
    pub const EXPRESSION_STATEMENT: &str = "expression_statement";
    pub const HASH_BANG_LINE: &str = "hash_bang_line";
    pub const SHORTHAND_PROPERTY_IDENTIFIER: &str = "shorthand_property_identifier";
    pub const SHORTHAND_PROPERTY_IDENTIFIER_PATTERN: &str =
        "shorthand_property_identifier_pattern";
}

const DECLARATIONS: &[&str] = &[
    node_kinds::FUNCTION_DECLARATION,
    node_kinds::GENERATOR_FUNCTION_DECLARATION,
    node_kinds::FUNCTION_EXPRESSION,
    node_kinds::CLASS_DECLARATION,
    node_kinds::CLASS,
];

pub fn is_declared_name(node: &Node) -> bool {
    is_field_of(node, "name", DECLARATIONS)
}

/// `{ a }` in a literal or pattern, where one token is both key and binding
pub fn is_shorthand_property(node: &Node) -> bool {
    matches!(
        node.kind(),
        node_kinds::SHORTHAND_PROPERTY_IDENTIFIER
            | node_kinds::SHORTHAND_PROPERTY_IDENTIFIER_PATTERN
    )
}

pub fn in_exempt_context(node: &Node) -> bool {
    find_ancestor_by_kinds(
        *node,
        &[node_kinds::IMPORT_STATEMENT, node_kinds::EXPORT_CLAUSE],
    )
    .is_some()
}

/// `"use strict";` style directive at the head of a program or function body
pub fn is_directive(statement: &Node) -> bool {
    statement.kind() == node_kinds::EXPRESSION_STATEMENT
        && statement.named_child_count() == 1
        && statement
            .named_child(0)
            .map_or(false, |c| c.kind() == node_kinds::STRING)
}
