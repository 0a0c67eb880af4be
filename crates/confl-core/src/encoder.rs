//! Document encoders: block-style YAML and pretty JSON.
//!
//! The YAML encoder writes a small, predictable subset:
//!
//! - **Mappings by indentation**: two spaces per level, `key:` then children
//! - **Empty mappings**: `key: {}` (and `{}` for an empty document)
//! - **Integers**: bare
//! - **Text**: plain only for a conservative character set, single-quoted when
//!   it could be read back as another type or breaks plain-scalar rules,
//!   double-quoted when it holds tabs, controls or Unicode line breaks
//!
//! Output has no trailing newline and no trailing spaces on any line.
//!
//! # Example
//! ```
//! use confl_core::{parse, to_yaml};
//! let doc = parse("struct app {\n  name = 'demo',\n  port = 8080,\n}").unwrap();
//! assert_eq!(to_yaml(&doc), "app:\n  name: demo\n  port: 8080");
//! ```

use crate::error::Result;
use crate::types::{Document, FieldValue, StructValue};

/// Output formats a document can be rendered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Yaml,
    Json,
}

impl Format {
    pub fn render(self, document: &Document) -> Result<String> {
        match self {
            Format::Yaml => Ok(to_yaml(document)),
            Format::Json => to_json(document),
        }
    }
}

/// Render a document as pretty-printed JSON, keys in source order.
pub fn to_json(document: &Document) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Render a document as block-style YAML.
pub fn to_yaml(document: &Document) -> String {
    let mut out = String::new();
    if document.is_empty() {
        out.push_str("{}");
        return out;
    }
    for (name, fields) in document.iter() {
        if !out.is_empty() {
            out.push('\n');
        }
        encode_string(name, &mut out);
        if fields.is_empty() {
            out.push_str(": {}");
        } else {
            out.push(':');
            encode_fields(fields, &mut out);
        }
    }
    out
}

/// Emit the fields of a top-level struct, each on its own line, walking nested
/// structs with an explicit stack so depth never grows the call stack.
fn encode_fields(fields: &StructValue, out: &mut String) {
    let mut stack = vec![fields.into_iter()];
    while let Some(entries) = stack.last_mut() {
        let Some((key, value)) = entries.next() else {
            stack.pop();
            continue;
        };
        out.push('\n');
        out.push_str(&make_indent(stack.len()));
        encode_string(key, out);
        match value {
            FieldValue::Integer(n) => {
                out.push_str(": ");
                out.push_str(&n.to_string());
            }
            FieldValue::Text(s) => {
                out.push_str(": ");
                encode_string(s, out);
            }
            FieldValue::Struct(nested) if nested.is_empty() => out.push_str(": {}"),
            FieldValue::Struct(nested) => {
                out.push(':');
                stack.push(nested.into_iter());
            }
        }
    }
}

/// Emit a key or text value, quoting unless a plain scalar reads back as the
/// same string.
fn encode_string(s: &str, out: &mut String) {
    if s.chars().any(needs_escape) {
        encode_double_quoted(s, out);
    } else if needs_quoting(s) {
        out.push('\'');
        out.push_str(&s.replace('\'', "''"));
        out.push('\'');
    } else {
        out.push_str(s);
    }
}

/// Characters only a double-quoted scalar can carry: tabs and other controls,
/// the Unicode line breaks (NEL, LS, PS), and anything outside YAML's
/// printable set.
fn needs_escape(c: char) -> bool {
    c.is_control()
        || matches!(c, '\u{2028}' | '\u{2029}' | '\u{FEFF}' | '\u{FFFE}' | '\u{FFFF}')
}

fn encode_double_quoted(s: &str, out: &mut String) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{85}' => out.push_str("\\N"),
            '\u{2028}' => out.push_str("\\L"),
            '\u{2029}' => out.push_str("\\P"),
            c if needs_escape(c) => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Determine if a string must be quoted so a YAML reader gets a string back.
///
/// Plain output is reserved for text built only from letters, digits, spaces
/// and `_ - . / ' ( ) @ + $`, that does not start with an indicator, a space or
/// anything number-like, and that is not a YAML 1.1 boolean or null. Everything
/// else is quoted; that covers `=` and `<<`, which YAML 1.1 readers resolve to
/// special tags, and any `:` or `#` that could end a plain scalar.
fn needs_quoting(s: &str) -> bool {
    if s.is_empty() || s != s.trim() {
        return true;
    }
    if is_reserved_word(s) || looks_numeric(s) {
        return true;
    }
    if s.starts_with(|c: char| "-?:,[]{}#&*!|>'\"%@`.+$(".contains(c)) {
        return true;
    }
    !s.chars().all(is_plain_char)
}

fn is_plain_char(c: char) -> bool {
    c.is_alphanumeric() || c == ' ' || "_-./'()@+$".contains(c)
}

fn is_reserved_word(s: &str) -> bool {
    const RESERVED: &[&str] = &[
        "true", "false", "yes", "no", "on", "off", "y", "n", "null", "~",
    ];
    RESERVED.iter().any(|w| w.eq_ignore_ascii_case(s))
}

/// Anything starting like a number (`12`, `+3`, `.5`, `0x1F`, `1_000`,
/// `2024-01-01`) or spelling a special float (`.inf`, `.NaN`, `inf`).
/// Over-quoting is harmless, so any leading digit counts.
fn looks_numeric(s: &str) -> bool {
    let lower = s.to_ascii_lowercase();
    if matches!(
        lower.trim_start_matches(['+', '-']),
        ".inf" | ".nan" | "inf" | "infinity" | "nan"
    ) {
        return true;
    }
    let bytes = s.as_bytes();
    match bytes[0] {
        b'0'..=b'9' => true,
        b'+' | b'-' | b'.' => bytes
            .get(1)
            .is_some_and(|b| b.is_ascii_digit() || *b == b'.'),
        _ => false,
    }
}

/// Generate a 2-space-per-level indentation string.
fn make_indent(depth: usize) -> String {
    "  ".repeat(depth)
}
