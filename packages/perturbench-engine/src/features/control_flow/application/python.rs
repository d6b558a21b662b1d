//! Python rewrites
//!
//! `if c:` without `elif`/`else` turns into
//!
//! ```text
//! if True:
//!     if not (c):
//!         pass
//!     else:
//!         <body, one level deeper>
//! ```
//!
//! An `if` with alternatives only gets `True and (c)` as its condition, and
//! `while c:` becomes `while True:` with an `if not (c): break` guard.
//! `while ... else` is left alone since `break` would skip the `else`.

use tracing::debug;
use tree_sitter::Node;

use super::transformer::Rewrite;
use crate::features::parsing::ParseTree;
use crate::shared::models::ByteSpan;
use crate::shared::utils::tree_sitter::{
    find_descendants_by_kinds, gap_start, line_indent, line_starts_within, named_statements, starts_line,
};

const INDENT: &str = "    ";

/// Where a block's generated header goes and how deep it sits
struct BlockLayout {
    anchor: usize,
    inline: bool,
    indent: String,
}

pub(crate) fn plan(tree: &ParseTree, rewrite: &mut Rewrite) {
    let source = tree.source();
    let strings: Vec<ByteSpan> = find_descendants_by_kinds(tree.root(), &["string"])
        .iter()
        .map(ByteSpan::of)
        .collect();
    let mut reindent: Vec<(usize, usize)> = Vec::new();

    for node in tree.walk() {
        match node.kind() {
            "if_statement" => {
                let (Some(condition), Some(block)) = (
                    node.child_by_field_name("condition"),
                    node.child_by_field_name("consequence"),
                ) else {
                    continue;
                };
                if node.child_by_field_name("alternative").is_some() {
                    let depth = enclosing_wrapped_ifs(tree, node);
                    let base = format!(
                        "{}{}",
                        line_indent(source, node.start_byte()),
                        INDENT.repeat(depth)
                    );
                    let text = condition_text(tree, condition, &base, &strings);
                    rewrite.replace_node(&condition, format!("True and ({})", text));
                    rewrite.stats.ifs += 1;
                    continue;
                }
                let Some(layout) = layout(tree, node, block) else {
                    continue;
                };
                let b = &layout.indent;
                let text = condition_text(tree, condition, b, &strings);
                let header = format!("if not ({text}):\n{b}{INDENT}pass\n{b}else:\n{b}{INDENT}");

                rewrite.replace_node(&condition, "True".to_string());
                if layout.inline {
                    rewrite.replacements.replace(
                        gap_start(source, layout.anchor),
                        layout.anchor,
                        format!("\n{b}{header}"),
                    );
                } else {
                    rewrite.replacements.insert(layout.anchor, header);
                    reindent.push((layout.anchor, block.end_byte()));
                }
                rewrite.stats.ifs += 1;
            }
            "while_statement" => {
                if node.child_by_field_name("alternative").is_some() {
                    debug!(line = node.start_position().row + 1, "while-else left unchanged");
                    rewrite.stats.skipped += 1;
                    continue;
                }
                let (Some(condition), Some(block)) = (
                    node.child_by_field_name("condition"),
                    node.child_by_field_name("body"),
                ) else {
                    continue;
                };
                let Some(layout) = layout(tree, node, block) else {
                    continue;
                };
                let b = &layout.indent;
                let text = condition_text(tree, condition, b, &strings);
                let guard = format!("if not ({text}):\n{b}{INDENT}break\n{b}");

                rewrite.replace_node(&condition, "True".to_string());
                if layout.inline {
                    rewrite.replacements.replace(
                        gap_start(source, layout.anchor),
                        layout.anchor,
                        format!("\n{b}{guard}"),
                    );
                } else {
                    rewrite.replacements.insert(layout.anchor, guard);
                }
                rewrite.stats.whiles += 1;
            }
            _ => {}
        }
    }

    // Body lines after the first move one level deeper; the first line is
    // already placed by the header text.
    for (start, end) in reindent {
        for offset in line_starts_within(source, start, end) {
            if is_blank_line(source, offset)
                || strings.iter().any(|s| s.strictly_contains(offset))
                || rewrite.splits_replacement(offset)
            {
                continue;
            }
            rewrite.replacements.insert(offset, INDENT);
        }
    }
}

fn layout(tree: &ParseTree, statement: Node, block: Node) -> Option<BlockLayout> {
    let source = tree.source();
    let first = named_statements(block).first().copied()?;
    let anchor = first.start_byte();
    let inline = !starts_line(source, anchor);

    let mut indent = if inline {
        format!("{}{}", line_indent(source, statement.start_byte()), INDENT)
    } else {
        line_indent(source, anchor).to_string()
    };
    for _ in 0..enclosing_wrapped_ifs(tree, statement) {
        indent.push_str(INDENT);
    }

    Some(BlockLayout {
        anchor,
        inline,
        indent,
    })
}

/// Ancestor ifs whose bodies get re-indented around `node`
fn enclosing_wrapped_ifs(tree: &ParseTree, node: Node) -> usize {
    let source = tree.source();
    let span = ByteSpan::of(&node);
    let mut depth = 0;
    let mut current = node.parent();
    while let Some(ancestor) = current {
        if ancestor.kind() == "if_statement" && ancestor.child_by_field_name("alternative").is_none() {
            let wraps = ancestor
                .child_by_field_name("consequence")
                .and_then(|block| named_statements(block).first().copied().map(|f| (block, f)))
                .map_or(false, |(block, first)| {
                    starts_line(source, first.start_byte())
                        && ByteSpan::of(&block).contains_span(&span)
                });
            if wraps {
                depth += 1;
            }
        }
        current = ancestor.parent();
    }
    depth
}

/// Condition text with continuation lines moved two levels below `indent`;
/// a continuation shallower than its enclosing block does not re-parse.
fn condition_text(tree: &ParseTree, condition: Node, indent: &str, strings: &[ByteSpan]) -> String {
    let source = tree.source();
    let (start, end) = (condition.start_byte(), condition.end_byte());
    let mut out = String::with_capacity(end - start);
    let mut cursor = start;
    for offset in line_starts_within(source, start, end) {
        if strings.iter().any(|s| s.strictly_contains(offset)) {
            continue;
        }
        out.push_str(&source[cursor..offset]);
        out.push_str(indent);
        out.push_str(INDENT);
        out.push_str(INDENT);
        let rest = &source[offset..end];
        cursor = offset + rest.len() - rest.trim_start_matches([' ', '\t']).len();
    }
    out.push_str(&source[cursor..end]);
    out
}

fn is_blank_line(source: &str, offset: usize) -> bool {
    source[offset..]
        .split('\n')
        .next()
        .map_or(true, |line| line.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use crate::features::control_flow::ControlFlowTransformer;
    use crate::features::parsing::{grammar, LanguageId};
    use crate::shared::models::SourceUnit;
    use pretty_assertions::assert_eq;

    fn transform(code: &str) -> String {
        let out = ControlFlowTransformer::new()
            .transform(&SourceUnit::new(code, LanguageId::Python))
            .unwrap();
        assert!(grammar(LanguageId::Python).parse(&out.code).is_ok(), "{}", out.code);
        out.code
    }

    #[test]
    fn test_plain_if_gets_nested_shape() {
        let code = "def f(x):\n    if x > 0:\n        x = 1\n        y = 2\n    return x\n";
        assert_eq!(
            transform(code),
            "def f(x):\n    if True:\n        if not (x > 0):\n            pass\n        else:\n            x = 1\n            y = 2\n    return x\n"
        );
    }

    #[test]
    fn test_if_with_else_keeps_chain() {
        let code = "if a:\n    b()\nelif c:\n    d()\nelse:\n    e()\n";
        assert_eq!(
            transform(code),
            "if True and (a):\n    b()\nelif c:\n    d()\nelse:\n    e()\n"
        );
    }

    #[test]
    fn test_while_guard() {
        let code = "while n > 1:\n    n -= 1\n";
        assert_eq!(
            transform(code),
            "while True:\n    if not (n > 1):\n        break\n    n -= 1\n"
        );
    }

    #[test]
    fn test_while_else_is_skipped() {
        let code = "while n:\n    n -= 1\nelse:\n    done()\n";
        let out = ControlFlowTransformer::new()
            .transform(&SourceUnit::new(code, LanguageId::Python))
            .unwrap();
        assert_eq!(out.code, code);
        assert_eq!(out.stats.skipped, 1);
    }

    #[test]
    fn test_nested_ifs_stack_indentation() {
        let code = "if a:\n    if b:\n        x()\n";
        assert_eq!(
            transform(code),
            "if True:\n    if not (a):\n        pass\n    else:\n        if True:\n            if not (b):\n                pass\n            else:\n                x()\n"
        );
    }

    #[test]
    fn test_inline_if_body() {
        let code = "if ready: go()\n";
        assert_eq!(
            transform(code),
            "if True:\n    if not (ready):\n        pass\n    else:\n        go()\n"
        );
    }

    #[test]
    fn test_inline_while_body_drops_gap() {
        let code = "while n:   n -= 1\n";
        assert_eq!(
            transform(code),
            "while True:\n    if not (n):\n        break\n    n -= 1\n"
        );
    }

    #[test]
    fn test_multiline_string_inside_body_untouched() {
        let code = "if a:\n    s = \"\"\"one\ntwo\"\"\"\n    t = 1\n";
        assert_eq!(
            transform(code),
            "if True:\n    if not (a):\n        pass\n    else:\n        s = \"\"\"one\ntwo\"\"\"\n        t = 1\n"
        );
    }

    #[test]
    fn test_multiline_condition_of_nested_if() {
        let code = "if a:\n    while (b and\n           c):\n        step()\n";
        let expected = format!(
            "if True:\n    if not (a):\n        pass\n    else:\n        while True:\n            if not ((b and\n{}c)):\n                break\n            step()\n",
            " ".repeat(20)
        );
        assert_eq!(transform(code), expected);
    }

    #[test]
    fn test_multiline_condition_with_else_under_wrapped_if() {
        let code = "if a:\n    if (b or\n            c):\n        x()\n    else:\n        y()\n";
        let out = transform(code);
        assert!(out.contains(&format!("if True and ((b or\n{}c)):\n", " ".repeat(16))));
        assert!(out.ends_with("            x()\n        else:\n            y()\n"));
    }

    #[test]
    fn test_continuation_inside_string_is_kept() {
        let code = "if a:\n    while s == \"\"\"x\ny\"\"\":\n        s = ''\n";
        let out = transform(code);
        assert!(out.contains("if not (s == \"\"\"x\ny\"\"\"):"));
    }
}
