//! Python-specific tree-sitter configuration

use tree_sitter::Node;

use super::is_field_of;
use crate::shared::utils::tree_sitter::find_ancestor_by_kinds;

/// Python node kinds for quick lookup
pub mod node_kinds {
    pub const MODULE: &str = "module";
    pub const FUNCTION_DEF: &str = "function_definition";
    pub const CLASS_DEF: &str = "class_definition";
    pub const IDENTIFIER: &str = "identifier";
    pub const ATTRIBUTE: &str = "attribute";
    pub const BLOCK: &str = "block";
    pub const IF_STATEMENT: &str = "if_statement";
    pub const WHILE_STATEMENT: &str = "while_statement";
    pub const ELSE_CLAUSE: &str = "else_clause";
    pub const EXPRESSION_STATEMENT: &str = "expression_statement";
    pub const STRING: &str = "string";
    pub const CONCATENATED_STRING: &str = "concatenated_string";
    pub const IMPORT_STATEMENT: &str = "import_statement";
    pub const IMPORT_FROM_STATEMENT: &str = "import_from_statement";
    pub const FUTURE_IMPORT_STATEMENT: &str = "future_import_statement";
    pub const COMMENT: &str = "comment";
    pub const CASE_CLAUSE: &str = "case_clause";
    pub const KEYWORD_ARGUMENT: &str = "keyword_argument";
}

const DECLARATIONS: &[&str] = &[node_kinds::FUNCTION_DEF, node_kinds::CLASS_DEF];

const IMPORTS: &[&str] = &[
    node_kinds::IMPORT_STATEMENT,
    node_kinds::IMPORT_FROM_STATEMENT,
    node_kinds::FUTURE_IMPORT_STATEMENT,
];

/// Name of a function or class definition
pub fn is_declared_name(node: &Node) -> bool {
    is_field_of(node, "name", DECLARATIONS)
}

/// Attribute name in `obj.name`; only the object side is a variable
pub fn is_member_name(node: &Node) -> bool {
    is_field_of(node, "attribute", &[node_kinds::ATTRIBUTE])
}

/// `name` in a `name=value` call argument
pub fn is_keyword_argument_name(node: &Node) -> bool {
    is_field_of(node, "name", &[node_kinds::KEYWORD_ARGUMENT])
}

pub fn in_exempt_context(node: &Node) -> bool {
    find_ancestor_by_kinds(*node, IMPORTS).is_some()
}

/// Docstring: a bare string expression as the first statement of a body
pub fn is_docstring(statement: &Node) -> bool {
    statement.kind() == node_kinds::EXPRESSION_STATEMENT
        && statement.named_child_count() == 1
        && statement.named_child(0).map_or(false, |c| {
            matches!(c.kind(), node_kinds::STRING | node_kinds::CONCATENATED_STRING)
        })
}
