//! Level 2: dead-code injection
//!
//! Python receives one template at the head of every function body.
//! Brace languages receive `templates_per_block` templates before the last
//! closing brace of a block or class body; a trailing jump statement moves
//! the insertion point above it so the new code stays reachable.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::errors::Result;
use crate::features::dead_code::domain::{templates, InsertionContext, TemplateKind};
use crate::features::parsing::infrastructure::languages::python;
use crate::features::parsing::{grammar, identifier_tokens, LanguageId, ParseTree};
use crate::shared::models::{ReplacementSet, SourceUnit};
use crate::shared::utils::tree_sitter::{
    find_descendants_by_kinds, gap_start, line_indent, line_start, named_statements, starts_line,
};
use crate::shared::Entropy;

const INDENT: &str = "    ";

const JUMP_STATEMENTS: &[&str] = &[
    "return_statement",
    "throw_statement",
    "break_statement",
    "continue_statement",
    "goto_statement",
];

#[derive(Debug, Clone)]
pub struct InjectionOutcome {
    pub code: String,
    pub inserted: Vec<(InsertionContext, TemplateKind)>,
}

#[derive(Debug, Clone)]
pub struct DeadCodeInjector {
    templates_per_block: usize,
    allow_error_trees: bool,
}

impl Default for DeadCodeInjector {
    fn default() -> Self {
        Self {
            templates_per_block: 2,
            allow_error_trees: false,
        }
    }
}

/// Per-call state shared by the planning helpers
struct Plan<'e> {
    language: LanguageId,
    entropy: &'e mut Entropy,
    taken: FxHashSet<String>,
    replacements: ReplacementSet,
    inserted: Vec<(InsertionContext, TemplateKind)>,
}

impl Plan<'_> {
    /// Pick and render one template, drawing a fresh name when it needs one
    fn render(&mut self, context: InsertionContext, indent: &str) -> Result<String> {
        let catalog = templates(self.language, context);
        let template = catalog[self.entropy.pick(catalog.len())];
        let name = if template.needs_name() {
            self.entropy.unique_name(&mut self.taken)?
        } else {
            String::new()
        };
        self.inserted.push((context, template.kind));
        Ok(template.render(indent, &name))
    }
}

impl DeadCodeInjector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn templates_per_block(mut self, count: usize) -> Self {
        self.templates_per_block = count.max(1);
        self
    }

    pub fn allow_error_trees(mut self, allow: bool) -> Self {
        self.allow_error_trees = allow;
        self
    }

    pub fn inject(&self, unit: &SourceUnit, entropy: &mut Entropy) -> Result<InjectionOutcome> {
        let tree = grammar(unit.language()).parse_with(unit.code(), self.allow_error_trees)?;
        let mut plan = Plan {
            language: unit.language(),
            entropy,
            taken: identifier_tokens(unit.code()).map(str::to_string).collect(),
            replacements: ReplacementSet::new(),
            inserted: Vec::new(),
        };

        match unit.language() {
            LanguageId::Python => plan_python(&tree, &mut plan)?,
            _ => self.plan_braced(&tree, &mut plan)?,
        }

        let code = plan.replacements.apply(unit.code())?;
        debug!(
            language = %unit.language(),
            inserted = plan.inserted.len(),
            "level 2 applied"
        );
        Ok(InjectionOutcome {
            code,
            inserted: plan.inserted,
        })
    }

    fn plan_braced(&self, tree: &ParseTree, plan: &mut Plan) -> Result<()> {
        let source = tree.source();
        let (block_kinds, class_kinds) = container_kinds(plan.language);

        let closing = tree
            .walk()
            .filter(|n| n.kind() == "}")
            .filter(|n| {
                n.parent().map_or(false, |p| {
                    block_kinds.contains(&p.kind()) || class_kinds.contains(&p.kind())
                })
            })
            .last();

        let Some(brace) = closing else {
            return append_top_level(source, plan, self.templates_per_block);
        };
        let Some(container) = brace.parent() else {
            return append_top_level(source, plan, self.templates_per_block);
        };

        let context = if class_kinds.contains(&container.kind()) {
            InsertionContext::ClassBody
        } else {
            InsertionContext::Block
        };

        let anchor = match context {
            InsertionContext::Block => named_statements(container)
                .last()
                .copied()
                .filter(|s| JUMP_STATEMENTS.contains(&s.kind()))
                .unwrap_or(brace),
            _ => brace,
        };
        let offset = anchor.start_byte();
        let anchor_indent = line_indent(source, offset).to_string();

        if starts_line(source, offset) {
            let body_indent = if anchor == brace {
                format!("{}{}", anchor_indent, INDENT)
            } else {
                anchor_indent
            };
            let mut text = String::new();
            for _ in 0..self.templates_per_block {
                text.push_str(&body_indent);
                text.push_str(&plan.render(context, &body_indent)?);
                text.push('\n');
            }
            plan.replacements.insert(line_start(source, offset), text);
        } else {
            let body_indent = format!("{}{}", anchor_indent, INDENT);
            let mut text = String::new();
            for _ in 0..self.templates_per_block {
                text.push('\n');
                text.push_str(&body_indent);
                text.push_str(&plan.render(context, &body_indent)?);
            }
            text.push('\n');
            text.push_str(&anchor_indent);
            plan.replacements.insert(offset, text);
        }
        Ok(())
    }
}

fn plan_python(tree: &ParseTree, plan: &mut Plan) -> Result<()> {
    let source = tree.source();
    let defs = find_descendants_by_kinds(tree.root(), &[python::node_kinds::FUNCTION_DEF]);
    if defs.is_empty() {
        return append_top_level(source, plan, 1);
    }

    for def in defs {
        let Some(body) = def.child_by_field_name("body") else {
            continue;
        };
        let stmts = named_statements(body);
        let Some(first) = stmts.first().copied() else {
            continue;
        };

        if !starts_line(source, body.start_byte()) {
            // Inline body: move it onto its own line under the template
            let indent = format!("{}{}", line_indent(source, def.start_byte()), INDENT);
            let rendered = plan.render(InsertionContext::Block, &indent)?;
            let text = format!("\n{indent}{rendered}\n{indent}");
            plan.replacements
                .replace(gap_start(source, body.start_byte()), body.start_byte(), text);
        } else if python::is_docstring(&first) {
            let indent = line_indent(source, first.start_byte()).to_string();
            let rendered = plan.render(InsertionContext::Block, &indent)?;
            plan.replacements
                .insert(first.end_byte(), format!("\n{indent}{rendered}"));
        } else {
            let indent = line_indent(source, body.start_byte()).to_string();
            let rendered = plan.render(InsertionContext::Block, &indent)?;
            plan.replacements
                .insert(body.start_byte(), format!("{rendered}\n{indent}"));
        }
    }
    Ok(())
}

/// Append templates at file scope
fn append_top_level(source: &str, plan: &mut Plan, count: usize) -> Result<()> {
    let mut text = String::new();
    if !source.is_empty() && !source.ends_with('\n') {
        text.push('\n');
    }
    for _ in 0..count {
        text.push_str(&plan.render(InsertionContext::TopLevel, "")?);
        text.push('\n');
    }
    plan.replacements.insert(source.len(), text);
    Ok(())
}

fn container_kinds(language: LanguageId) -> (&'static [&'static str], &'static [&'static str]) {
    match language {
        LanguageId::Java => (&["block", "constructor_body"], &["class_body"]),
        LanguageId::JavaScript => (&["statement_block"], &["class_body"]),
        LanguageId::C => (&["compound_statement"], &[]),
        LanguageId::Python => (&[], &[]),
    }
}
