//! Level 1: budget-limited identifier renaming
//!
//! Renaming runs over one flat namespace per call. A name used in two
//! unrelated scopes gets the same replacement in both, and declarations of
//! classes, functions, methods and macros are never renamed.

use rustc_hash::FxHashSet;
use tracing::debug;
use tree_sitter::Node;

use crate::errors::Result;
use crate::features::parsing::{grammar, identifier_tokens, Grammar, ParseTree, PreservedKeywordSet};
use crate::features::renaming::domain::{BudgetUsage, IdentifierMap};
use crate::shared::models::{ReplacementSet, SourceUnit};
use crate::shared::Entropy;

/// Result of one renaming call
#[derive(Debug, Clone)]
pub struct RenameOutcome {
    pub code: String,
    pub mapping: IdentifierMap,
    /// Distinct eligible names in the input
    pub renamable: usize,
    pub budget: BudgetUsage,
}

/// Identifier occurrences eligible for renaming, in document order
struct Candidates<'src> {
    occurrences: Vec<(usize, usize, &'src str)>,
    distinct: Vec<&'src str>,
    /// Every identifier-shaped token of the buffer plus preserved names
    taken: FxHashSet<String>,
}

#[derive(Debug, Clone, Default)]
pub struct IdentifierRenamer {
    allow_error_trees: bool,
}

impl IdentifierRenamer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow_error_trees(mut self, allow: bool) -> Self {
        self.allow_error_trees = allow;
        self
    }

    /// Rename up to `budget` distinct identifiers (`None` renames all)
    pub fn rename(
        &self,
        unit: &SourceUnit,
        budget: Option<usize>,
        entropy: &mut Entropy,
    ) -> Result<RenameOutcome> {
        let g = grammar(unit.language());
        let tree = g.parse_with(unit.code(), self.allow_error_trees)?;
        let Candidates {
            occurrences,
            distinct,
            mut taken,
        } = collect_candidates(g, &tree);

        let usage = BudgetUsage::resolve(budget, distinct.len());
        if usage.is_clamped() {
            debug!(?usage, "rename budget clamped");
        }

        let mut mapping = IdentifierMap::new();
        for original in distinct.iter().take(usage.effective()) {
            let fresh = entropy.unique_name(&mut taken)?;
            mapping.insert(original, &fresh)?;
        }

        let mut replacements = ReplacementSet::new();
        for &(start, end, name) in &occurrences {
            if let Some(generated) = mapping.get(name) {
                replacements.replace(start, end, generated);
            }
        }
        let code = replacements.apply(unit.code())?;

        debug!(
            language = %unit.language(),
            renamed = mapping.len(),
            occurrences = replacements.len(),
            "level 1 applied"
        );

        Ok(RenameOutcome {
            code,
            mapping,
            renamable: distinct.len(),
            budget: usage,
        })
    }

    /// Number of distinct identifiers a call with unlimited budget would rename
    pub fn count_renamable(&self, unit: &SourceUnit) -> Result<usize> {
        let g = grammar(unit.language());
        let tree = g.parse_with(unit.code(), self.allow_error_trees)?;
        Ok(collect_candidates(g, &tree).distinct.len())
    }
}

fn collect_candidates<'src>(g: &Grammar, tree: &ParseTree<'src>) -> Candidates<'src> {
    let source = tree.source();

    let mut preserved: PreservedKeywordSet = g.preserved_keywords();
    preserved.extend_from_imports(source, g.id());

    let mut declared: FxHashSet<&str> = FxHashSet::default();
    // Spellings also used outside the local namespace (`self.total`, `{ a }`)
    let mut pinned: FxHashSet<&str> = FxHashSet::default();
    let mut identifiers: Vec<Node> = Vec::new();
    for node in tree.walk() {
        if g.opaque_text_kinds().contains(&node.kind()) {
            for token in identifier_tokens(tree.text(&node)) {
                preserved.insert(token);
            }
        }
        if g.is_pinned_name(&node) {
            pinned.insert(tree.text(&node));
        }
        if !g.is_identifier(&node) {
            continue;
        }
        if g.is_declared_name(&node) {
            declared.insert(tree.text(&node));
        }
        identifiers.push(node);
    }

    let eligible = |node: &Node| -> bool {
        let name = tree.text(node);
        !declared.contains(name)
            && !pinned.contains(name)
            && !g.in_exempt_context(node)
            && !preserved.contains(name)
            && !name.starts_with("__")
            && !is_constant_name(name)
    };

    // Keyword-argument names only follow a binding the sample itself makes
    let mut bound: FxHashSet<&str> = FxHashSet::default();
    let mut keyword_args: FxHashSet<usize> = FxHashSet::default();
    for node in &identifiers {
        if g.is_keyword_argument_name(node) {
            keyword_args.insert(node.start_byte());
        } else if eligible(node) {
            bound.insert(tree.text(node));
        }
    }

    let mut occurrences = Vec::new();
    let mut distinct = Vec::new();
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for node in &identifiers {
        let name = tree.text(node);
        if !eligible(node) {
            continue;
        }
        if keyword_args.contains(&node.start_byte()) && !bound.contains(name) {
            continue;
        }
        if seen.insert(name) {
            distinct.push(name);
        }
        occurrences.push((node.start_byte(), node.end_byte(), name));
    }

    let taken: FxHashSet<String> = identifier_tokens(source)
        .chain(preserved.names())
        .map(str::to_string)
        .collect();

    Candidates {
        occurrences,
        distinct,
        taken,
    }
}

/// Constant convention: at least one uppercase letter and no lowercase ones
fn is_constant_name(name: &str) -> bool {
    name.chars().any(|c| c.is_uppercase()) && !name.chars().any(|c| c.is_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::LanguageId;
    use pretty_assertions::assert_eq;

    fn unit(code: &str, language: LanguageId) -> SourceUnit {
        SourceUnit::new(code, language)
    }

    #[test]
    fn test_python_budget_two_renames_parameters_only() {
        let src = unit("def foo(x):\n    y = x + 1\n    return y\n", LanguageId::Python);
        let mut entropy = Entropy::sequential("_v");
        let out = IdentifierRenamer::new()
            .rename(&src, Some(2), &mut entropy)
            .unwrap();

        assert_eq!(out.code, "def foo(_v0):\n    _v1 = _v0 + 1\n    return _v1\n");
        assert_eq!(out.mapping.get("x"), Some("_v0"));
        assert_eq!(out.mapping.get("y"), Some("_v1"));
        assert!(!out.mapping.contains("foo"));
        assert_eq!(out.budget, BudgetUsage::Within { requested: 2 });
    }

    #[test]
    fn test_zero_budget_is_identity() {
        for (code, lang) in [
            ("def f(a):\n    return a\n", LanguageId::Python),
            ("class A { int f(int a) { return a; } }", LanguageId::Java),
            ("function f(a) { return a; }", LanguageId::JavaScript),
            ("int f(int a) { return a; }", LanguageId::C),
        ] {
            let out = IdentifierRenamer::new()
                .rename(&unit(code, lang), Some(0), &mut Entropy::seeded(3))
                .unwrap();
            assert_eq!(out.code, code);
            assert!(out.mapping.is_empty());
        }
    }

    #[test]
    fn test_budget_clamps_to_available() {
        let src = unit("int f(int a, int b) { return a + b; }", LanguageId::C);
        let out = IdentifierRenamer::new()
            .rename(&src, Some(10), &mut Entropy::seeded(1))
            .unwrap();
        assert_eq!(out.mapping.len(), 2);
        assert_eq!(
            out.budget,
            BudgetUsage::Clamped {
                requested: 10,
                available: 2
            }
        );
    }

    #[test]
    fn test_preserved_and_conventional_names_survive() {
        let code = "import math\nMAX = 3\n__hidden = 1\ndef g(v):\n    print(len(v), math.pi, MAX)\n";
        let out = IdentifierRenamer::new()
            .rename(&unit(code, LanguageId::Python), None, &mut Entropy::sequential("_n"))
            .unwrap();
        let renamed: Vec<&str> = out.mapping.iter().map(|(o, _)| o).collect();
        assert_eq!(renamed, vec!["v"]);
        assert!(out.code.contains("print(len(_n0), math.pi, MAX)"));
    }

    #[test]
    fn test_java_receiver_renamed_method_name_kept() {
        let code = "class A { void run(Box items) { items.add(\"x\"); } }";
        let out = IdentifierRenamer::new()
            .rename(&unit(code, LanguageId::Java), None, &mut Entropy::sequential("_r"))
            .unwrap();
        assert_eq!(
            out.code,
            "class A { void run(Box _r0) { _r0.add(\"x\"); } }"
        );
    }

    /// Every occurrence of a name maps the same way, or none of them change
    fn assert_consistent(code: &str, out: &RenameOutcome, name: &str) {
        match out.mapping.get(name) {
            Some(new) => assert!(
                !out.code.contains(name),
                "{name} renamed to {new} but still present in:\n{}",
                out.code
            ),
            None => assert_eq!(
                out.code.matches(name).count(),
                code.matches(name).count(),
                "{name} partially renamed in:\n{}",
                out.code
            ),
        }
    }

    #[test]
    fn test_java_field_used_through_this_keeps_one_name() {
        let code = "class Counter {\n    private int count;\n    Counter(int start) { this.count = start; }\n    int next() { count += 1; return this.count; }\n}\n";
        let out = IdentifierRenamer::new()
            .rename(&unit(code, LanguageId::Java), None, &mut Entropy::sequential("_f"))
            .unwrap();
        assert_consistent(code, &out, "count");
        assert!(out.code.contains("this.count = _f0;"));
        assert_eq!(out.mapping.get("start"), Some("_f0"));
        grammar(LanguageId::Java).parse(&out.code).unwrap();
    }

    #[test]
    fn test_python_class_attribute_matches_self_access() {
        let code = "class Acc:\n    total = 0\n    def add(self, n):\n        self.total += n\n        return self.total\n";
        let out = IdentifierRenamer::new()
            .rename(&unit(code, LanguageId::Python), None, &mut Entropy::sequential("_p"))
            .unwrap();
        assert_consistent(code, &out, "total");
        assert!(out.code.contains("    total = 0\n"));
        assert!(out.mapping.contains("n"));
    }

    #[test]
    fn test_javascript_shorthand_bindings_stay_consistent() {
        let code = "function f(o) {\n  const { a, b } = o;\n  const c = a + b;\n  return { c };\n}\n";
        let out = IdentifierRenamer::new()
            .rename(&unit(code, LanguageId::JavaScript), None, &mut Entropy::sequential("_s"))
            .unwrap();
        for name in ["a", "b", "c"] {
            assert!(!out.mapping.contains(name), "{name} must keep its spelling");
            assert_consistent(code, &out, name);
        }
        assert!(out.code.contains("return { c };"));
        assert_eq!(out.mapping.get("o"), Some("_s0"));
    }

    #[test]
    fn test_c_function_names_stay_consistent() {
        let code = "int sq(int n);\nint sq(int n) { return n * n; }\nint main() { int k = sq(4); return k; }\n";
        let out = IdentifierRenamer::new()
            .rename(&unit(code, LanguageId::C), None, &mut Entropy::sequential("_c"))
            .unwrap();
        assert!(out.code.contains("int sq(int _c0);"));
        assert!(out.code.contains("int _c1 = sq(4); return _c1;"));
        assert_eq!(out.renamable, 2);
    }

    #[test]
    fn test_generated_names_avoid_existing_identifiers() {
        let src = unit("def f(a):\n    _g0 = a\n    return _g0\n", LanguageId::Python);
        let out = IdentifierRenamer::new()
            .rename(&src, Some(1), &mut Entropy::sequential("_g"))
            .unwrap();
        assert_eq!(out.mapping.get("a"), Some("_g1"));
    }

    #[test]
    fn test_keyword_arguments_follow_local_bindings() {
        let code = "def f(step):\n    return step\nf(step=2)\nprint(1, end='')\n";
        let out = IdentifierRenamer::new()
            .rename(&unit(code, LanguageId::Python), None, &mut Entropy::sequential("_k"))
            .unwrap();
        assert_eq!(
            out.code,
            "def f(_k0):\n    return _k0\nf(_k0=2)\nprint(1, end='')\n"
        );
    }

    #[test]
    fn test_count_renamable_matches_unlimited_rename() {
        let src = unit(
            "function add(a, b) { const total = a + b; return total; }",
            LanguageId::JavaScript,
        );
        let renamer = IdentifierRenamer::new();
        let count = renamer.count_renamable(&src).unwrap();
        let out = renamer.rename(&src, None, &mut Entropy::seeded(5)).unwrap();
        assert_eq!(count, 3);
        assert_eq!(out.mapping.len(), count);
    }

    #[test]
    fn test_malformed_input_is_a_parse_failure() {
        let src = unit("def f(:\n", LanguageId::Python);
        let err = IdentifierRenamer::new()
            .rename(&src, Some(1), &mut Entropy::seeded(0))
            .unwrap_err();
        assert!(matches!(
            err,
            crate::errors::ObfuscationError::ParseFailure { .. }
        ));
    }
}
