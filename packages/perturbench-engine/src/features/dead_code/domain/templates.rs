//! Inert statement templates
//!
//! Templates are written with relative indentation: the first line carries
//! none, later lines are indented relative to it. `{name}` is replaced by a
//! fresh identifier at render time.

use serde::Serialize;

use crate::features::parsing::LanguageId;

/// Where a template is about to be inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertionContext {
    /// Statement position inside a function body or block
    Block,
    /// Member position inside a class body
    ClassBody,
    /// File scope
    TopLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    FalseBranch,
    FalseLoop,
    UnusedFunction,
    UnusedMacro,
    InertInitializer,
}

#[derive(Debug, Clone, Copy)]
pub struct DeadCodeTemplate {
    pub kind: TemplateKind,
    pub source: &'static str,
}

impl DeadCodeTemplate {
    const fn new(kind: TemplateKind, source: &'static str) -> Self {
        Self { kind, source }
    }

    pub fn needs_name(&self) -> bool {
        self.source.contains("{name}")
    }

    /// Render with `indent` prefixed to every line after the first
    pub fn render(&self, indent: &str, name: &str) -> String {
        let filled = self.source.replace("{name}", name);
        let mut out = String::with_capacity(filled.len() + indent.len() * 2);
        for (i, line) in filled.split('\n').enumerate() {
            if i > 0 {
                out.push('\n');
                out.push_str(indent);
            }
            out.push_str(line);
        }
        out
    }
}

use TemplateKind::*;

const PYTHON: &[DeadCodeTemplate] = &[
    DeadCodeTemplate::new(FalseBranch, "if False:\n    print(\"Unreachable\")"),
    DeadCodeTemplate::new(FalseLoop, "while False:\n    pass"),
    DeadCodeTemplate::new(UnusedFunction, "def {name}():\n    return None"),
];

const JAVA_BLOCK: &[DeadCodeTemplate] = &[
    DeadCodeTemplate::new(
        FalseBranch,
        "if (false) { System.out.println(\"Unreachable\"); }",
    ),
    DeadCodeTemplate::new(
        FalseLoop,
        "for (int {name} = 0; {name} < 0; {name}++) { break; }",
    ),
];

const JAVA_CLASS_BODY: &[DeadCodeTemplate] = &[
    DeadCodeTemplate::new(UnusedFunction, "private void {name}() { return; }"),
    DeadCodeTemplate::new(
        InertInitializer,
        "{ if (false) { System.out.println(\"Unreachable\"); } }",
    ),
];

const JAVASCRIPT_BLOCK: &[DeadCodeTemplate] = &[
    DeadCodeTemplate::new(FalseBranch, "if (false) { console.log(\"Unreachable\"); }"),
    DeadCodeTemplate::new(FalseLoop, "while (false) { break; }"),
    DeadCodeTemplate::new(UnusedFunction, "function {name}() { return; }"),
];

const JAVASCRIPT_CLASS_BODY: &[DeadCodeTemplate] =
    &[DeadCodeTemplate::new(UnusedFunction, "{name}() { return; }")];

const C_BLOCK: &[DeadCodeTemplate] = &[
    DeadCodeTemplate::new(FalseBranch, "if (0) { printf(\"Unreachable\\n\"); }"),
    DeadCodeTemplate::new(FalseLoop, "while (0) { break; }"),
    DeadCodeTemplate::new(UnusedMacro, "#define {name}(x) (x)"),
];

const C_TOP_LEVEL: &[DeadCodeTemplate] = &[
    DeadCodeTemplate::new(UnusedFunction, "void {name}() { return; }"),
    DeadCodeTemplate::new(UnusedMacro, "#define {name}(x) (x)"),
];

/// Catalog for a language and insertion context
pub fn templates(language: LanguageId, context: InsertionContext) -> &'static [DeadCodeTemplate] {
    match (language, context) {
        (LanguageId::Python, _) => PYTHON,
        (LanguageId::Java, InsertionContext::ClassBody) => JAVA_CLASS_BODY,
        (LanguageId::Java, _) => JAVA_BLOCK,
        (LanguageId::JavaScript, InsertionContext::ClassBody) => JAVASCRIPT_CLASS_BODY,
        (LanguageId::JavaScript, _) => JAVASCRIPT_BLOCK,
        (LanguageId::C, InsertionContext::TopLevel) => C_TOP_LEVEL,
        (LanguageId::C, _) => C_BLOCK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_relative_indent() {
        let rendered = PYTHON[0].render("        ", "_unused");
        assert_eq!(rendered, "if False:\n            print(\"Unreachable\")");

        let f = PYTHON[2].render("    ", "_abc");
        assert_eq!(f, "def _abc():\n        return None");
        assert!(PYTHON[2].needs_name());
        assert!(!PYTHON[1].needs_name());
    }

    #[test]
    fn test_macro_only_in_c() {
        for lang in LanguageId::ALL {
            for ctx in [
                InsertionContext::Block,
                InsertionContext::ClassBody,
                InsertionContext::TopLevel,
            ] {
                let has_macro = templates(lang, ctx)
                    .iter()
                    .any(|t| t.kind == TemplateKind::UnusedMacro);
                assert_eq!(has_macro, lang == LanguageId::C);
            }
        }
    }

    #[test]
    fn test_c_functions_only_at_file_scope() {
        assert!(templates(LanguageId::C, InsertionContext::Block)
            .iter()
            .all(|t| t.kind != TemplateKind::UnusedFunction));
        assert!(templates(LanguageId::C, InsertionContext::TopLevel)
            .iter()
            .any(|t| t.kind == TemplateKind::UnusedFunction));
    }
}
