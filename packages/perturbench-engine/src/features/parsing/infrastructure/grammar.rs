//! Grammar registry
//!
//! Process-wide, read-only table of tree-sitter languages. Parsers are
//! created per call, so a `&'static Grammar` can be shared freely across
//! worker threads.

use once_cell::sync::Lazy;
use tree_sitter::{Language, Node, Parser};

use super::languages::{c, java, javascript, python};
use crate::errors::{ObfuscationError, Result};
use crate::features::parsing::domain::{LanguageId, ParseTree, PreservedKeywordSet};
use crate::shared::utils::tree_sitter::first_error_node;

/// Parser capability and naming rules for one language
pub struct Grammar {
    id: LanguageId,
    language: Language,
}

impl Grammar {
    fn new(id: LanguageId) -> Self {
        let language = match id {
            LanguageId::Python => tree_sitter_python::language(),
            LanguageId::Java => tree_sitter_java::language(),
            LanguageId::JavaScript => tree_sitter_javascript::language(),
            LanguageId::C => tree_sitter_c::language(),
        };
        Self { id, language }
    }

    pub fn id(&self) -> LanguageId {
        self.id
    }

    /// Parse strictly: any ERROR or MISSING node is a `ParseFailure`
    pub fn parse<'src>(&self, code: &'src str) -> Result<ParseTree<'src>> {
        self.parse_with(code, false)
    }

    pub fn parse_with<'src>(&self, code: &'src str, allow_error_trees: bool) -> Result<ParseTree<'src>> {
        let mut parser = Parser::new();
        parser.set_language(&self.language).map_err(|e| {
            ObfuscationError::parse_failure(self.id, 0, 0, format!("grammar load failed: {}", e))
        })?;

        let tree = parser
            .parse(code, None)
            .ok_or_else(|| ObfuscationError::parse_failure(self.id, 0, 0, "parser returned no tree"))?;

        if !allow_error_trees && tree.root_node().has_error() {
            let (row, column, detail) = match first_error_node(tree.root_node()) {
                Some(node) if node.is_missing() => (
                    node.start_position().row,
                    node.start_position().column,
                    format!("missing '{}'", node.kind()),
                ),
                Some(node) => (
                    node.start_position().row,
                    node.start_position().column,
                    "unexpected syntax".to_string(),
                ),
                None => (0, 0, "syntax error".to_string()),
            };
            return Err(ObfuscationError::parse_failure(self.id, row, column, detail));
        }

        Ok(ParseTree::new(tree, code, self.id))
    }

    /// Plain identifiers only; type, field and property identifiers are separate kinds
    pub fn is_identifier(&self, node: &Node) -> bool {
        node.kind() == "identifier"
    }

    /// Name being declared by a class, function, method or macro
    pub fn is_declared_name(&self, node: &Node) -> bool {
        match self.id {
            LanguageId::Python => python::is_declared_name(node),
            LanguageId::Java => java::is_declared_name(node),
            LanguageId::JavaScript => javascript::is_declared_name(node),
            LanguageId::C => c::is_declared_name(node),
        }
    }

    /// Member accessed through a receiver (`obj.name`, `obj.name()`)
    pub fn is_member_name(&self, node: &Node) -> bool {
        match self.id {
            LanguageId::Python => python::is_member_name(node),
            LanguageId::Java => java::is_member_name(node),
            LanguageId::JavaScript | LanguageId::C => false,
        }
    }

    /// Occurrence whose spelling another namespace depends on: member names
    /// and JavaScript shorthand properties. Every identifier sharing its text
    /// keeps its name, so `this.count` and `int count;` stay in step.
    pub fn is_pinned_name(&self, node: &Node) -> bool {
        match self.id {
            LanguageId::JavaScript => javascript::is_shorthand_property(node),
            _ => self.is_member_name(node),
        }
    }

    /// Keyword name at a call site, bound by whichever function is called
    pub fn is_keyword_argument_name(&self, node: &Node) -> bool {
        match self.id {
            LanguageId::Python => python::is_keyword_argument_name(node),
            _ => false,
        }
    }

    /// Inside an import, package, export list or include directive
    pub fn in_exempt_context(&self, node: &Node) -> bool {
        match self.id {
            LanguageId::Python => python::in_exempt_context(node),
            LanguageId::Java => java::in_exempt_context(node),
            LanguageId::JavaScript => javascript::in_exempt_context(node),
            LanguageId::C => c::in_exempt_context(node),
        }
    }

    /// Node kinds whose text the grammar leaves unparsed (macro bodies)
    pub fn opaque_text_kinds(&self) -> &'static [&'static str] {
        match self.id {
            LanguageId::C => &[c::node_kinds::PREPROC_ARG],
            _ => &[],
        }
    }

    /// Fresh copy of the base preserved set
    pub fn preserved_keywords(&self) -> PreservedKeywordSet {
        PreservedKeywordSet::for_language(self.id)
    }
}

/// All supported grammars
pub struct GrammarRegistry {
    grammars: Vec<Grammar>,
}

impl GrammarRegistry {
    fn new() -> Self {
        Self {
            grammars: LanguageId::ALL.iter().map(|&id| Grammar::new(id)).collect(),
        }
    }

    pub fn get(&self, id: LanguageId) -> &Grammar {
        // ALL and the enum share declaration order
        &self.grammars[id as usize]
    }

    /// Look a grammar up by its language tag
    pub fn by_tag(&self, tag: &str) -> Result<&Grammar> {
        let id: LanguageId = tag.parse()?;
        Ok(self.get(id))
    }
}

static REGISTRY: Lazy<GrammarRegistry> = Lazy::new(GrammarRegistry::new);

pub fn registry() -> &'static GrammarRegistry {
    &REGISTRY
}

/// Grammar for a language
pub fn grammar(id: LanguageId) -> &'static Grammar {
    REGISTRY.get(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::AstWalker;

    fn find<'t>(tree: &'t ParseTree<'_>, text: &str, nth: usize) -> Node<'t> {
        AstWalker::new(tree.root())
            .filter(|n| n.kind() == "identifier" && tree.text(n) == text)
            .nth(nth)
            .unwrap()
    }

    #[test]
    fn test_registry_order_matches_ids() {
        for id in LanguageId::ALL {
            assert_eq!(grammar(id).id(), id);
        }
        assert!(matches!(
            registry().by_tag("cobol"),
            Err(ObfuscationError::UnsupportedLanguage(_))
        ));
    }

    #[test]
    fn test_parse_failure_reports_position() {
        let err = grammar(LanguageId::Java)
            .parse("class A { void f( { } }")
            .err()
            .unwrap();
        assert!(matches!(
            err,
            ObfuscationError::ParseFailure { language: LanguageId::Java, line: 1, .. }
        ));
    }

    #[test]
    fn test_error_trees_allowed_on_request() {
        let tree = grammar(LanguageId::C)
            .parse_with("int main( { return 0; }", true)
            .unwrap();
        assert!(tree.has_errors());
    }

    #[test]
    fn test_python_declared_and_member_names() {
        let g = grammar(LanguageId::Python);
        let tree = g.parse("def foo(x):\n    return x.bar(x)\n").unwrap();
        assert!(g.is_declared_name(&find(&tree, "foo", 0)));
        assert!(!g.is_declared_name(&find(&tree, "x", 0)));
        assert!(g.is_member_name(&find(&tree, "bar", 0)));
        assert!(!g.is_member_name(&find(&tree, "x", 1)));
    }

    #[test]
    fn test_java_invocation_receiver_is_not_member() {
        let g = grammar(LanguageId::Java);
        let tree = g
            .parse("class A { void run() { items.add(item); } }")
            .unwrap();
        assert!(g.is_declared_name(&find(&tree, "A", 0)));
        assert!(g.is_declared_name(&find(&tree, "run", 0)));
        assert!(!g.is_member_name(&find(&tree, "items", 0)));
        assert!(g.is_member_name(&find(&tree, "add", 0)));
    }

    #[test]
    fn test_javascript_shorthand_properties_are_pinned() {
        let g = grammar(LanguageId::JavaScript);
        let tree = g.parse("const { a } = o;\nconst p = { a, b: a };\n").unwrap();
        let shorthand: Vec<&str> = AstWalker::new(tree.root())
            .filter(|n| g.is_pinned_name(n))
            .map(|n| tree.text(&n))
            .collect();
        assert_eq!(shorthand, vec!["a", "a"]);
        assert!(!g.is_pinned_name(&find(&tree, "a", 0)));
    }

    #[test]
    fn test_c_prototypes_and_includes() {
        let g = grammar(LanguageId::C);
        let tree = g
            .parse("#include <stdio.h>\nint helper(int n);\nint helper(int n) { return n; }\n")
            .unwrap();
        assert!(g.is_declared_name(&find(&tree, "helper", 0)));
        assert!(g.is_declared_name(&find(&tree, "helper", 1)));
        assert!(!g.is_declared_name(&find(&tree, "n", 0)));
    }

    #[test]
    fn test_python_import_context() {
        let g = grammar(LanguageId::Python);
        let tree = g.parse("import os\nos.getcwd()\n").unwrap();
        assert!(g.in_exempt_context(&find(&tree, "os", 0)));
        assert!(!g.in_exempt_context(&find(&tree, "os", 1)));
    }
}
