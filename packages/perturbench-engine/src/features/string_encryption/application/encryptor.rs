//! Level 4: string-literal encryption
//!
//! Each eligible literal becomes `_decrypt("<xor payload>"[, key])` and the
//! routine is injected once per file, only when something was encrypted.

use serde::Serialize;
use tracing::{debug, warn};
use tree_sitter::Node;

use crate::errors::{ObfuscationError, Result};
use crate::features::parsing::infrastructure::languages::{c, java, javascript, python};
use crate::features::parsing::{grammar, identifier_tokens, LanguageId, ParseTree};
use crate::features::string_encryption::domain::{
    decode, decrypt_call, decrypt_routine, encode, SkipReason, XorCipher, C_HEADERS, DECRYPT_FN,
};
use crate::shared::models::{ByteSpan, ReplacementSet, SourceUnit};
use crate::shared::utils::tree_sitter::{
    find_ancestor_by_kinds, find_descendants_by_kinds, line_indent, line_start, named_statements,
    starts_line,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLiteral {
    pub span: ByteSpan,
    pub line: usize,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EncryptionReport {
    pub encrypted: usize,
    pub skipped: Vec<SkippedLiteral>,
}

#[derive(Debug, Clone)]
pub struct EncryptionOutcome {
    pub code: String,
    pub report: EncryptionReport,
}

#[derive(Debug, Clone, Default)]
pub struct StringEncryptor {
    cipher: XorCipher,
    allow_error_trees: bool,
}

impl StringEncryptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, key: u8) -> Self {
        self.cipher = XorCipher::new(key);
        self
    }

    pub fn allow_error_trees(mut self, allow: bool) -> Self {
        self.allow_error_trees = allow;
        self
    }

    pub fn key(&self) -> u8 {
        self.cipher.key()
    }

    pub fn encrypt(&self, unit: &SourceUnit) -> Result<EncryptionOutcome> {
        let language = unit.language();
        let tree = grammar(language).parse_with(unit.code(), self.allow_error_trees)?;
        let mut replacements = ReplacementSet::new();
        let mut report = EncryptionReport::default();
        let mut covered: Vec<ByteSpan> = Vec::new();

        for node in tree.walk() {
            if !literal_kinds(language).contains(&node.kind()) {
                continue;
            }
            let span = ByteSpan::of(&node);
            if covered.iter().any(|c| c.contains_span(&span)) {
                continue;
            }
            covered.push(span);

            match self.encrypted_call(&tree, node) {
                Ok(call) => {
                    replacements.replace(span.start, span.end, call);
                    report.encrypted += 1;
                }
                Err(reason) => {
                    let line = node.start_position().row + 1;
                    if reason.is_content_flag() {
                        warn!(%language, line, ?reason, "string literal left unencrypted");
                    }
                    report.skipped.push(SkippedLiteral { span, line, reason });
                }
            }
        }

        if report.encrypted > 0 {
            if identifier_tokens(unit.code()).any(|t| t == DECRYPT_FN) {
                return Err(ObfuscationError::NameCollision {
                    generated: DECRYPT_FN.to_string(),
                    existing: DECRYPT_FN.to_string(),
                });
            }
            let (offset, text) = self.injection(&tree)?;
            replacements.insert(offset, text);
        }

        let code = replacements.apply(unit.code())?;
        debug!(
            %language,
            encrypted = report.encrypted,
            skipped = report.skipped.len(),
            "level 4 applied"
        );
        Ok(EncryptionOutcome { code, report })
    }

    fn encrypted_call(&self, tree: &ParseTree, node: Node) -> std::result::Result<String, SkipReason> {
        let language = tree.language();
        if let Some(reason) = skip_context(node, language) {
            return Err(reason);
        }
        let plain = literal_bytes(tree, node)?;
        if language == LanguageId::C {
            if plain.contains(&0) {
                return Err(SkipReason::NulByte);
            }
            if plain.contains(&self.cipher.key()) {
                return Err(SkipReason::KeyByte);
            }
        }
        let encoded = encode(&self.cipher.apply(&plain), language);
        Ok(decrypt_call(language, &encoded, self.cipher.key()))
    }

    /// Offset and text of the routine insertion
    fn injection(&self, tree: &ParseTree) -> Result<(usize, String)> {
        let language = tree.language();
        let source = tree.source();
        let routine = decrypt_routine(language, self.cipher.key());
        let statements = named_statements(tree.root());

        match language {
            LanguageId::Python => {
                let header = statements
                    .iter()
                    .take_while(|s| {
                        python::is_docstring(s)
                            || s.kind() == python::node_kinds::FUTURE_IMPORT_STATEMENT
                    })
                    .last();
                Ok(after_or_before(source, header, statements.first(), &routine, 2))
            }
            LanguageId::JavaScript => {
                let header = statements
                    .iter()
                    .take_while(|s| {
                        s.kind() == javascript::node_kinds::HASH_BANG_LINE
                            || javascript::is_directive(s)
                    })
                    .last();
                Ok(after_or_before(source, header, statements.first(), &routine, 1))
            }
            LanguageId::C => {
                let includes: Vec<Node> = statements
                    .iter()
                    .copied()
                    .take_while(|s| s.kind() == c::node_kinds::PREPROC_INCLUDE)
                    .collect();
                let present: Vec<&str> = find_descendants_by_kinds(
                    tree.root(),
                    &[c::node_kinds::PREPROC_INCLUDE],
                )
                .iter()
                .filter_map(|inc| inc.child_by_field_name("path"))
                .map(|path| tree.text(&path))
                .collect();
                let mut text = String::new();
                for header in C_HEADERS.iter().filter(|h| !present.contains(*h)) {
                    text.push_str(&format!("#include {}\n", header));
                }
                text.push('\n');
                text.push_str(&routine);
                Ok(after_or_before(source, includes.last(), statements.first(), &text, 1))
            }
            LanguageId::Java => {
                let brace = tree
                    .walk()
                    .filter(|n| n.kind() == "}")
                    .filter(|n| {
                        n.parent()
                            .map_or(false, |p| p.kind() == java::node_kinds::CLASS_BODY)
                    })
                    .last()
                    .ok_or(ObfuscationError::NoInjectionPoint {
                        language,
                        what: "string decryption routine",
                    })?;
                let offset = brace.start_byte();
                let brace_indent = line_indent(source, offset);
                let body_indent = format!("{}    ", brace_indent);
                let indented = indent_lines(&routine, &body_indent);
                if starts_line(source, offset) {
                    Ok((line_start(source, offset), format!("\n{}\n", indented)))
                } else {
                    Ok((offset, format!("\n{}\n{}", indented, brace_indent)))
                }
            }
        }
    }
}

fn literal_kinds(language: LanguageId) -> &'static [&'static str] {
    match language {
        LanguageId::Python => &[
            python::node_kinds::CONCATENATED_STRING,
            python::node_kinds::STRING,
        ],
        LanguageId::Java => &[java::node_kinds::STRING_LITERAL],
        LanguageId::JavaScript => &[javascript::node_kinds::STRING],
        LanguageId::C => &[
            c::node_kinds::CONCATENATED_STRING,
            c::node_kinds::STRING_LITERAL,
        ],
    }
}

/// Runtime bytes of a literal, joining concatenated parts
fn literal_bytes(tree: &ParseTree, node: Node) -> std::result::Result<Vec<u8>, SkipReason> {
    let language = tree.language();
    let part_kind = match (language, node.kind()) {
        (LanguageId::Python, python::node_kinds::CONCATENATED_STRING) => python::node_kinds::STRING,
        (LanguageId::C, c::node_kinds::CONCATENATED_STRING) => c::node_kinds::STRING_LITERAL,
        _ => return decode(tree.text(&node), language),
    };

    let mut bytes = Vec::new();
    for part in named_statements(node) {
        if part.kind() != part_kind {
            return Err(SkipReason::MacroOperand);
        }
        bytes.extend(decode(tree.text(&part), language)?);
    }
    Ok(bytes)
}

/// Positions where a call expression is not allowed or changes meaning
fn skip_context(node: Node, language: LanguageId) -> Option<SkipReason> {
    let parent = node.parent()?;
    match language {
        LanguageId::Python => {
            if python::is_docstring(&parent) {
                Some(SkipReason::Docstring)
            } else if find_ancestor_by_kinds(node, &["case_pattern"]).is_some() {
                Some(SkipReason::ConstantContext)
            } else {
                None
            }
        }
        LanguageId::Java => find_ancestor_by_kinds(
            node,
            &[
                java::node_kinds::ANNOTATION,
                java::node_kinds::MARKER_ANNOTATION,
                java::node_kinds::SWITCH_LABEL,
            ],
        )
        .map(|_| SkipReason::ConstantContext),
        LanguageId::JavaScript => {
            if javascript::is_directive(&parent) {
                return Some(SkipReason::Directive);
            }
            let is_key = parent.child_by_field_name("key") == Some(node)
                || parent.child_by_field_name("name") == Some(node)
                || parent.child_by_field_name("property") == Some(node);
            let is_module_source = parent.child_by_field_name("source") == Some(node)
                || find_ancestor_by_kinds(node, &[javascript::node_kinds::IMPORT_STATEMENT])
                    .is_some();
            (is_key || is_module_source).then_some(SkipReason::ConstantContext)
        }
        LanguageId::C => {
            if find_ancestor_by_kinds(node, &[c::node_kinds::PREPROC_INCLUDE]).is_some()
                || find_ancestor_by_kinds(node, &[c::node_kinds::FUNCTION_DEFINITION]).is_none()
            {
                return Some(SkipReason::ConstantContext);
            }
            let array_init = find_ancestor_by_kinds(node, &[c::node_kinds::INIT_DECLARATOR])
                .and_then(|d| d.child_by_field_name("declarator"))
                .map_or(false, |d| d.kind() == c::node_kinds::ARRAY_DECLARATOR);
            let static_local = find_ancestor_by_kinds(node, &[c::node_kinds::DECLARATION])
                .map_or(false, |decl| {
                    named_statements(decl)
                        .iter()
                        .any(|child| child.kind() == "storage_class_specifier")
                });
            (array_init || static_local).then_some(SkipReason::ConstantContext)
        }
    }
}

/// Insert after `header` when present, else above the first statement
fn after_or_before(
    source: &str,
    header: Option<&Node>,
    first: Option<&Node>,
    text: &str,
    blank_lines: usize,
) -> (usize, String) {
    let gap = "\n".repeat(blank_lines);
    match (header, first) {
        (Some(h), _) => {
            let end = h.end_byte();
            if source[..end].ends_with('\n') {
                return (end, format!("{text}\n"));
            }
            match source[end..].find('\n') {
                Some(i) if source[end..end + i].trim().is_empty() => {
                    (end + i + 1, format!("{gap}{text}\n"))
                }
                _ => (end, format!("\n{gap}{text}\n")),
            }
        }
        (None, Some(f)) => (line_start(source, f.start_byte()), format!("{text}\n{gap}")),
        (None, None) => (source.len(), format!("{text}\n")),
    }
}

fn indent_lines(text: &str, indent: &str) -> String {
    text.lines()
        .map(|line| format!("{}{}", indent, line))
        .collect::<Vec<_>>()
        .join("\n")
}
