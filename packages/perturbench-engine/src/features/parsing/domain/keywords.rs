//! Preserved identifier sets
//!
//! A language's base set holds reserved words plus the runtime and library
//! names a sample can reference without declaring. Each renaming call takes
//! its own copy and grows it from the sample's import lines; the base set is
//! never modified.

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;

use super::language_id::LanguageId;

static IDENTIFIER_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").expect("identifier regex is valid"));

const PYTHON_PRESERVED: &[&str] = &[
    // keywords and builtin types
    "def", "return", "class", "if", "elif", "else", "while", "for", "in", "not", "and", "or",
    "is", "lambda", "with", "as", "try", "except", "finally", "raise", "yield", "global",
    "nonlocal", "pass", "break", "continue", "import", "from", "del", "assert", "async",
    "await", "print", "int", "float", "str", "bool", "bytes", "list", "dict", "set", "tuple",
    "object", "type", "List", "Tuple", "Dict", "Set", "Optional", "Float", "ndarray", "array",
    // builtin functions
    "len", "range", "enumerate", "zip", "map", "filter", "sorted", "reversed", "sum", "min",
    "max", "abs", "round", "pow", "divmod", "open", "input", "isinstance", "issubclass",
    "super", "iter", "next", "any", "all", "hasattr", "getattr", "setattr", "ord", "chr",
    "hex", "bin", "oct", "format", "repr", "id", "hash", "callable", "vars", "frozenset",
    "Exception", "ValueError", "TypeError", "KeyError", "IndexError", "StopIteration",
    "ZeroDivisionError", "RuntimeError", "NotImplementedError",
    // builtin keyword arguments
    "end", "sep", "key", "reverse", "default", "encoding",
];

const JAVA_PRESERVED: &[&str] = &[
    "public", "private", "protected", "class", "static", "final", "void", "abstract",
    "String", "System", "out", "err", "in", "Math", "Integer", "Long", "Double", "Float",
    "Boolean", "Character", "Byte", "Short", "Object", "StringBuilder", "StringBuffer",
    "Exception", "RuntimeException", "IllegalArgumentException", "Thread", "Arrays",
    "Collections", "List", "ArrayList", "Map", "HashMap", "Set", "HashSet", "Scanner",
    "Iterator", "Objects", "length", "main", "args",
];

const JAVASCRIPT_PRESERVED: &[&str] = &[
    "let", "var", "try", "func", "export", "finally", "double", "char", "abstract", "const",
    "for", "while", "else", "return", "console", "require", "module", "exports",
    "arguments", "undefined", "NaN", "Infinity", "Math", "JSON", "Object", "Array",
    "String", "Number", "Boolean", "Promise", "Date", "Map", "Set", "Error", "RegExp",
    "Symbol", "parseInt", "parseFloat", "isNaN", "setTimeout", "setInterval",
    "clearTimeout", "document", "window", "process", "globalThis",
];

const C_PRESERVED: &[&str] = &[
    "int", "char", "void", "return", "if", "else", "while", "for", "struct", "typedef",
    "printf", "scanf", "malloc", "calloc", "realloc", "free", "puts", "putchar", "getchar",
    "fprintf", "sprintf", "snprintf", "sscanf", "fgets", "fopen", "fclose", "strlen",
    "strcpy", "strncpy", "strcmp", "strncmp", "strcat", "strchr", "strstr", "memset",
    "memcpy", "memmove", "memcmp", "exit", "abs", "sqrt", "pow", "atoi", "qsort",
    "stdin", "stdout", "stderr", "main", "size_t", "bool", "true", "false",
];

/// Identifiers a renaming call must leave untouched
#[derive(Debug, Clone, Default)]
pub struct PreservedKeywordSet {
    names: FxHashSet<String>,
}

impl PreservedKeywordSet {
    /// Base set for a language
    pub fn for_language(language: LanguageId) -> Self {
        let base = match language {
            LanguageId::Python => PYTHON_PRESERVED,
            LanguageId::Java => JAVA_PRESERVED,
            LanguageId::JavaScript => JAVASCRIPT_PRESERVED,
            LanguageId::C => C_PRESERVED,
        };
        Self {
            names: base.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Add every identifier-shaped token on lines carrying an import marker
    ///
    /// Returns the number of names that were not already preserved.
    pub fn extend_from_imports(&mut self, code: &str, language: LanguageId) -> usize {
        let mut added = 0;
        for line in code.lines().filter(|l| is_import_line(l, language)) {
            for token in identifier_tokens(line) {
                if self.names.insert(token.to_string()) {
                    added += 1;
                }
            }
        }
        added
    }
}

/// Every identifier-shaped token in `text`
pub fn identifier_tokens(text: &str) -> impl Iterator<Item = &str> {
    IDENTIFIER_TOKEN.find_iter(text).map(|m| m.as_str())
}

fn is_import_line(line: &str, language: LanguageId) -> bool {
    match language {
        LanguageId::Python | LanguageId::Java => line.contains("import "),
        LanguageId::JavaScript => line.contains("import ") || line.contains("require("),
        LanguageId::C => line.trim_start().starts_with("#include"),
    }
}
