//! C-specific tree-sitter configuration

use tree_sitter::Node;

use super::is_field_of;
use crate::shared::utils::tree_sitter::find_ancestor_by_kinds;

/// C node kinds for quick lookup
pub mod node_kinds {
    pub const TRANSLATION_UNIT: &str = "translation_unit";
    pub const FUNCTION_DEFINITION: &str = "function_definition";
    pub const FUNCTION_DECLARATOR: &str = "function_declarator";
    pub const COMPOUND_STATEMENT: &str = "compound_statement";
    pub const IF_STATEMENT: &str = "if_statement";
    pub const WHILE_STATEMENT: &str = "while_statement";
    pub const FOR_STATEMENT: &str = "for_statement";
    pub const STRING_LITERAL: &str = "string_literal";
    pub const CONCATENATED_STRING: &str = "concatenated_string";
    pub const PREPROC_INCLUDE: &str = "preproc_include";
    pub const PREPROC_DEF: &str = "preproc_def";
    pub const PREPROC_FUNCTION_DEF: &str = "preproc_function_def";
    pub const PREPROC_ARG: &str = "preproc_arg";
    pub const INIT_DECLARATOR: &str = "init_declarator";
    pub const ARRAY_DECLARATOR: &str = "array_declarator";
    pub const DECLARATION: &str = "declaration";
    pub const CASE_STATEMENT: &str = "case_statement";
}

/// Function names (definitions and prototypes) and macro names
pub fn is_declared_name(node: &Node) -> bool {
    is_field_of(node, "declarator", &[node_kinds::FUNCTION_DECLARATOR])
        || is_field_of(
            node,
            "name",
            &[node_kinds::PREPROC_DEF, node_kinds::PREPROC_FUNCTION_DEF],
        )
}

pub fn in_exempt_context(node: &Node) -> bool {
    find_ancestor_by_kinds(
        *node,
        &[node_kinds::PREPROC_INCLUDE, node_kinds::PREPROC_FUNCTION_DEF],
    )
    .is_some()
}
