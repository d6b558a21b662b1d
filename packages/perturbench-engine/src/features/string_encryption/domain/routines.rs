//! Decryption routines injected alongside encrypted literals

use crate::features::parsing::LanguageId;

pub const DECRYPT_FN: &str = "_decrypt";

/// Source of the decryption routine, unindented
pub fn decrypt_routine(language: LanguageId, key: u8) -> String {
    match language {
        LanguageId::Python => format!(
            "def {DECRYPT_FN}(s: str, key: int = {key}) -> str:\n    return ''.join(chr(ord(c) ^ key) for c in s)"
        ),
        LanguageId::Java => format!(
            "private static String {DECRYPT_FN}(String s, int key) {{\n    StringBuilder sb = new StringBuilder();\n    for (char c : s.toCharArray()) {{\n        sb.append((char) (c ^ key));\n    }}\n    return sb.toString();\n}}"
        ),
        LanguageId::JavaScript => format!(
            "function {DECRYPT_FN}(s, key) {{\n  return s.split('').map((c) => String.fromCharCode(c.charCodeAt(0) ^ key)).join('');\n}}"
        ),
        LanguageId::C => format!(
            "char *{DECRYPT_FN}(const char *s, int key) {{\n    size_t n = strlen(s);\n    char *out = malloc(n + 1);\n    for (size_t i = 0; i < n; i++) {{\n        out[i] = (char) (s[i] ^ key);\n    }}\n    out[n] = '\\0';\n    return out;\n}}"
        ),
    }
}

/// Call expression replacing one literal; Python relies on the default key
pub fn decrypt_call(language: LanguageId, encoded: &str, key: u8) -> String {
    match language {
        LanguageId::Python => format!("{DECRYPT_FN}({encoded})"),
        _ => format!("{DECRYPT_FN}({encoded}, {key})"),
    }
}

/// Headers the C routine needs
pub const C_HEADERS: &[&str] = &["<stdlib.h>", "<string.h>"];
