//! String literal decoding and re-encoding
//!
//! A literal's source text is decoded into the bytes the program sees at
//! runtime. Anything that cannot be represented as plain ASCII bytes is
//! reported through [`SkipReason`] instead of being guessed at.

use serde::Serialize;

use crate::features::parsing::LanguageId;

/// Why a literal was left unencrypted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Content outside 7-bit ASCII
    NonAscii,
    /// `\u`, `\U` or `\N{...}` escape
    UnicodeEscape,
    /// f-string, bytes literal or wide/UTF C literal
    Prefixed,
    /// Java `"""` text block
    TextBlock,
    /// C content containing the key byte (would encrypt to NUL)
    KeyByte,
    /// C content containing NUL
    NulByte,
    /// C concatenation with a macro operand
    MacroOperand,
    /// Position where only a constant expression is legal
    ConstantContext,
    /// Python docstring or bare string statement
    Docstring,
    /// JavaScript directive prologue
    Directive,
}

impl SkipReason {
    /// Content problems are worth a warning; context skips are expected
    pub fn is_content_flag(&self) -> bool {
        !matches!(
            self,
            SkipReason::ConstantContext | SkipReason::Docstring | SkipReason::Directive
        )
    }
}

pub type DecodeResult = std::result::Result<Vec<u8>, SkipReason>;

// ═══════════════════════════════════════════════════════════════════════════
// Decoding
// ═══════════════════════════════════════════════════════════════════════════

/// Runtime bytes of a single (non-concatenated) literal
pub fn decode(text: &str, language: LanguageId) -> DecodeResult {
    let chars = match language {
        LanguageId::Python => decode_python(text)?,
        LanguageId::Java => decode_java(text)?,
        LanguageId::JavaScript => decode_javascript(text)?,
        LanguageId::C => decode_c(text)?,
    };
    chars
        .into_iter()
        .map(|c| u8::try_from(c).ok().filter(u8::is_ascii).ok_or(SkipReason::NonAscii))
        .collect()
}

fn decode_python(text: &str) -> std::result::Result<Vec<u32>, SkipReason> {
    let prefix_len = text.find(|c: char| c == '"' || c == '\'').unwrap_or(0);
    let prefix = text[..prefix_len].to_ascii_lowercase();
    if prefix.contains('f') || prefix.contains('b') {
        return Err(SkipReason::Prefixed);
    }
    let body = &text[prefix_len..];
    let quote = if body.starts_with("\"\"\"") || body.starts_with("'''") {
        3
    } else {
        1
    };
    let content = strip_quotes(body, quote)?;
    if prefix.contains('r') {
        return Ok(content.chars().map(u32::from).collect());
    }

    let mut cursor = Cursor::new(content);
    let mut out = Vec::with_capacity(content.len());
    while let Some(c) = cursor.bump() {
        if c != '\\' {
            out.push(u32::from(c));
            continue;
        }
        match cursor.bump() {
            None => out.push(u32::from('\\')),
            Some('\n') => {}
            Some('\r') => {
                cursor.eat('\n');
            }
            Some(c @ ('\\' | '\'' | '"')) => out.push(u32::from(c)),
            Some('a') => out.push(7),
            Some('b') => out.push(8),
            Some('f') => out.push(12),
            Some('n') => out.push(10),
            Some('r') => out.push(13),
            Some('t') => out.push(9),
            Some('v') => out.push(11),
            Some(d @ '0'..='7') => out.push(cursor.octal(d, 3)),
            Some('x') => out.push(cursor.hex(2, 2).ok_or(SkipReason::UnicodeEscape)?),
            Some('N' | 'u' | 'U') => return Err(SkipReason::UnicodeEscape),
            Some(other) => {
                out.push(u32::from('\\'));
                out.push(u32::from(other));
            }
        }
    }
    Ok(out)
}

fn decode_java(text: &str) -> std::result::Result<Vec<u32>, SkipReason> {
    if text.starts_with("\"\"\"") {
        return Err(SkipReason::TextBlock);
    }
    let content = strip_quotes(text, 1)?;
    let mut cursor = Cursor::new(content);
    let mut out = Vec::with_capacity(content.len());
    while let Some(c) = cursor.bump() {
        if c != '\\' {
            out.push(u32::from(c));
            continue;
        }
        match cursor.bump() {
            None => out.push(u32::from('\\')),
            Some('b') => out.push(8),
            Some('t') => out.push(9),
            Some('n') => out.push(10),
            Some('f') => out.push(12),
            Some('r') => out.push(13),
            Some('s') => out.push(32),
            Some(d @ '0'..='3') => out.push(cursor.octal(d, 3)),
            Some(d @ '4'..='7') => out.push(cursor.octal(d, 2)),
            Some('u') => return Err(SkipReason::UnicodeEscape),
            Some(other) => out.push(u32::from(other)),
        }
    }
    Ok(out)
}

fn decode_javascript(text: &str) -> std::result::Result<Vec<u32>, SkipReason> {
    let content = strip_quotes(text, 1)?;
    let mut cursor = Cursor::new(content);
    let mut out = Vec::with_capacity(content.len());
    while let Some(c) = cursor.bump() {
        if c != '\\' {
            out.push(u32::from(c));
            continue;
        }
        match cursor.bump() {
            None => out.push(u32::from('\\')),
            Some('\n') | Some('\u{2028}') | Some('\u{2029}') => {}
            Some('\r') => {
                cursor.eat('\n');
            }
            Some('b') => out.push(8),
            Some('f') => out.push(12),
            Some('n') => out.push(10),
            Some('r') => out.push(13),
            Some('t') => out.push(9),
            Some('v') => out.push(11),
            Some(d @ '0'..='7') => out.push(cursor.octal(d, 3)),
            Some('x') => out.push(cursor.hex(2, 2).ok_or(SkipReason::UnicodeEscape)?),
            Some('u') => return Err(SkipReason::UnicodeEscape),
            Some(other) => out.push(u32::from(other)),
        }
    }
    Ok(out)
}

fn decode_c(text: &str) -> std::result::Result<Vec<u32>, SkipReason> {
    if !text.starts_with('"') {
        return Err(SkipReason::Prefixed);
    }
    let content = strip_quotes(text, 1)?;
    let mut cursor = Cursor::new(content);
    let mut out = Vec::with_capacity(content.len());
    while let Some(c) = cursor.bump() {
        if c != '\\' {
            out.push(u32::from(c));
            continue;
        }
        match cursor.bump() {
            None => out.push(u32::from('\\')),
            Some('\n') => {}
            Some('\r') => {
                cursor.eat('\n');
            }
            Some('a') => out.push(7),
            Some('b') => out.push(8),
            Some('f') => out.push(12),
            Some('n') => out.push(10),
            Some('r') => out.push(13),
            Some('t') => out.push(9),
            Some('v') => out.push(11),
            Some(d @ '0'..='7') => out.push(cursor.octal(d, 3)),
            Some('x') => out.push(cursor.hex(1, usize::MAX).ok_or(SkipReason::NonAscii)?),
            Some('u' | 'U') => return Err(SkipReason::UnicodeEscape),
            Some(other) => out.push(u32::from(other)),
        }
    }
    Ok(out)
}

fn strip_quotes(text: &str, quote_len: usize) -> std::result::Result<&str, SkipReason> {
    if text.len() < quote_len * 2 {
        return Err(SkipReason::Prefixed);
    }
    text.get(quote_len..text.len() - quote_len)
        .ok_or(SkipReason::NonAscii)
}

/// Character cursor over literal content
struct Cursor<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Cursor<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            chars: content.chars().peekable(),
        }
    }

    fn bump(&mut self) -> Option<char> {
        self.chars.next()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.chars.peek() == Some(&expected) {
            self.chars.next();
            true
        } else {
            false
        }
    }

    /// Octal escape whose first digit was already consumed
    fn octal(&mut self, first: char, max_digits: usize) -> u32 {
        let mut value = first.to_digit(8).unwrap_or(0);
        for _ in 1..max_digits {
            match self.chars.peek().and_then(|c| c.to_digit(8)) {
                Some(d) => {
                    value = value * 8 + d;
                    self.chars.next();
                }
                None => break,
            }
        }
        value
    }

    /// Between `min` and `max` hex digits; `None` on too few or overflow
    fn hex(&mut self, min: usize, max: usize) -> Option<u32> {
        let mut value: u32 = 0;
        let mut digits = 0;
        while digits < max {
            let Some(d) = self.chars.peek().and_then(|c| c.to_digit(16)) else {
                break;
            };
            value = value.checked_mul(16)?.checked_add(d)?;
            digits += 1;
            self.chars.next();
        }
        (digits >= min).then_some(value)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Encoding
// ═══════════════════════════════════════════════════════════════════════════

/// Double-quoted literal whose runtime value is exactly `bytes`
pub fn encode(bytes: &[u8], language: LanguageId) -> String {
    let mut out = String::with_capacity(bytes.len() + 2);
    out.push('"');
    for &b in bytes {
        match b {
            b'"' => out.push_str("\\\""),
            b'\\' => out.push_str("\\\\"),
            b'?' if language == LanguageId::C => out.push_str("\\?"),
            0x20..=0x7e => out.push(b as char),
            _ => match language {
                LanguageId::Python | LanguageId::JavaScript => {
                    out.push_str(&format!("\\x{:02x}", b))
                }
                LanguageId::Java | LanguageId::C => out.push_str(&format!("\\{:03o}", b)),
            },
        }
    }
    out.push('"');
    out
}
