//! Java-specific tree-sitter configuration

use tree_sitter::Node;

use super::is_field_of;
use crate::shared::utils::tree_sitter::find_ancestor_by_kinds;

/// Java node kinds for quick lookup
pub mod node_kinds {
    pub const PROGRAM: &str = "program";
    pub const CLASS_DECLARATION: &str = "class_declaration";
    pub const INTERFACE_DECLARATION: &str = "interface_declaration";
    pub const ENUM_DECLARATION: &str = "enum_declaration";
    pub const RECORD_DECLARATION: &str = "record_declaration";
    pub const ANNOTATION_TYPE_DECLARATION: &str = "annotation_type_declaration";
    pub const METHOD_DECLARATION: &str = "method_declaration";
    pub const CONSTRUCTOR_DECLARATION: &str = "constructor_declaration";
    pub const CLASS_BODY: &str = "class_body";
    pub const ENUM_BODY: &str = "enum_body";
    pub const BLOCK: &str = "block";
    pub const CONSTRUCTOR_BODY: &str = "constructor_body";
    pub const SWITCH_BLOCK: &str = "switch_block";
    pub const METHOD_INVOCATION: &str = "method_invocation";
    pub const FIELD_ACCESS: &str = "field_access";
    pub const ANNOTATION: &str = "annotation";
    pub const MARKER_ANNOTATION: &str = "marker_annotation";
    pub const IF_STATEMENT: &str = "if_statement";
    pub const WHILE_STATEMENT: &str = "while_statement";
    pub const STRING_LITERAL: &str = "string_literal";
    pub const PACKAGE_DECLARATION: &str = "package_declaration";
    pub const IMPORT_DECLARATION: &str = "import_declaration";
    pub const SWITCH_LABEL: &str = "switch_label";
}

const DECLARATIONS: &[&str] = &[
    node_kinds::CLASS_DECLARATION,
    node_kinds::INTERFACE_DECLARATION,
    node_kinds::ENUM_DECLARATION,
    node_kinds::RECORD_DECLARATION,
    node_kinds::ANNOTATION_TYPE_DECLARATION,
    node_kinds::METHOD_DECLARATION,
    node_kinds::CONSTRUCTOR_DECLARATION,
];

pub fn is_declared_name(node: &Node) -> bool {
    is_field_of(node, "name", DECLARATIONS)
}

/// Invoked method name, accessed field name or annotation name
///
/// The receiver `object` of an invocation is a variable and stays eligible.
pub fn is_member_name(node: &Node) -> bool {
    is_field_of(node, "name", &[node_kinds::METHOD_INVOCATION])
        || is_field_of(node, "field", &[node_kinds::FIELD_ACCESS])
        || is_field_of(
            node,
            "name",
            &[node_kinds::ANNOTATION, node_kinds::MARKER_ANNOTATION],
        )
}

pub fn in_exempt_context(node: &Node) -> bool {
    find_ancestor_by_kinds(
        *node,
        &[
            node_kinds::PACKAGE_DECLARATION,
            node_kinds::IMPORT_DECLARATION,
            node_kinds::ANNOTATION,
            node_kinds::MARKER_ANNOTATION,
        ],
    )
    .is_some()
}
