//! Brace-delimited languages (C, Java, JavaScript)
//!
//! - `if (c)` becomes `if (T && (c))`
//! - `while (c) B` becomes `while (T) { if (!(c)) break; B }`
//! - C only: `for (i; c; u) B` becomes `for (i; 1; u) { if (!(c)) break; B }`
//!
//! `T` is `1` for C and `true` elsewhere.

use tree_sitter::Node;

use super::transformer::Rewrite;
use crate::features::parsing::{LanguageId, ParseTree};

fn block_kind(language: LanguageId) -> &'static str {
    match language {
        LanguageId::C => "compound_statement",
        LanguageId::JavaScript => "statement_block",
        _ => "block",
    }
}

pub(crate) fn plan(tree: &ParseTree, language: LanguageId, rewrite: &mut Rewrite) {
    let truthy = if language == LanguageId::C { "1" } else { "true" };

    for node in tree.walk() {
        if !matches!(
            node.kind(),
            "if_statement" | "while_statement" | "for_statement"
        ) || rewrite.is_shadowed(&node)
        {
            continue;
        }

        match node.kind() {
            "if_statement" => {
                let Some(condition) = node.child_by_field_name("condition") else {
                    continue;
                };
                let text = tree.text(&condition);
                rewrite.replace_node(&condition, format!("({} && {})", truthy, text));
                rewrite.stats.ifs += 1;
            }
            "while_statement" => {
                let (Some(condition), Some(body)) = (
                    node.child_by_field_name("condition"),
                    node.child_by_field_name("body"),
                ) else {
                    continue;
                };
                let guard = format!("if (!{}) break;", tree.text(&condition));
                rewrite.replace_node(&condition, format!("({})", truthy));
                guard_body(rewrite, body, &guard, block_kind(language));
                rewrite.stats.whiles += 1;
            }
            "for_statement" if language == LanguageId::C => {
                let (Some(condition), Some(body)) = (
                    node.child_by_field_name("condition"),
                    node.child_by_field_name("body"),
                ) else {
                    continue;
                };
                let guard = format!("if (!({})) break;", tree.text(&condition));
                rewrite.replace_node(&condition, truthy.to_string());
                guard_body(rewrite, body, &guard, block_kind(language));
                rewrite.stats.fors += 1;
            }
            _ => {}
        }
    }
}

/// Put `guard` first in the loop body, adding braces when the body has none
fn guard_body(rewrite: &mut Rewrite, body: Node, guard: &str, block_kind: &str) {
    if body.kind() == block_kind {
        let open = body.child(0).map_or(body.start_byte() + 1, |brace| brace.end_byte());
        rewrite.replacements.insert(open, format!(" {}", guard));
    } else {
        rewrite
            .replacements
            .insert(body.start_byte(), format!("{{ {} ", guard));
        rewrite.replacements.insert(body.end_byte(), " }");
    }
}
