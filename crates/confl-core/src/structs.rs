//! Struct parser.
//!
//! A struct runs from its header line to the `}` that brings the brace depth
//! back to zero. [`parse_struct`] returns the struct together with the number
//! of physical lines it covered, so the caller can resume on the line right
//! after the closing brace. Nested structs recurse and report their own span
//! the same way.

use crate::constants::ConstantTable;
use crate::error::{ConflError, Result};
use crate::eval::evaluate;
use crate::line::{classify, Line, LinePos, Shape};
use crate::types::{FieldValue, StructValue};

/// Deepest struct nesting accepted, counting the top-level struct as 1.
pub const MAX_NESTING_DEPTH: usize = 128;

/// A struct read from source, with its line span.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedStruct {
    pub name: String,
    pub value: StructValue,
    /// Lines from the header through the closing brace, inclusive.
    pub consumed: usize,
}

/// Parse the struct whose header is at `start`.
///
/// Both header forms (`Name = struct {` and `struct Name {`) are accepted and
/// parse identically from the next line on. Field expressions are evaluated
/// against `constants` as they are met. Nesting deeper than
/// [`MAX_NESTING_DEPTH`] is a syntax error at the offending header.
pub fn parse_struct(
    lines: &[&str],
    start: LinePos,
    constants: &ConstantTable,
) -> Result<ParsedStruct> {
    parse_struct_at(lines, start, constants, 1)
}

fn parse_struct_at(
    lines: &[&str],
    start: LinePos,
    constants: &ConstantTable,
    level: usize,
) -> Result<ParsedStruct> {
    let header = lines.get(start.index()).copied().unwrap_or_default();
    let name = match classify(header) {
        Line::StructHeader { name, .. } => name,
        _ => {
            return Err(ConflError::syntax(
                start.line_number(),
                format!("Invalid struct declaration: {}", header.trim()),
            ))
        }
    };

    let mut fields = StructValue::new();
    let mut depth = 1usize;
    let mut pos = start.next();

    while let Some(&raw) = lines.get(pos.index()) {
        match classify(raw) {
            Line::CloseBrace => {
                depth -= 1;
                if depth == 0 {
                    return Ok(ParsedStruct {
                        name: name.to_string(),
                        value: fields,
                        consumed: start.lines_through(pos),
                    });
                }
            }
            Line::OpenBrace => depth += 1,
            Line::Blank | Line::Comment => {}
            Line::StructHeader { .. } => {
                if level >= MAX_NESTING_DEPTH {
                    return Err(ConflError::syntax(
                        pos.line_number(),
                        format!("Struct nesting too deep: more than {MAX_NESTING_DEPTH} levels"),
                    ));
                }
                let nested = parse_struct_at(lines, pos, constants, level + 1)?;
                pos = pos.advance(nested.consumed);
                fields.insert(nested.name, FieldValue::Struct(nested.value));
                continue;
            }
            Line::Field { key, value } => {
                let scalar = evaluate(value, constants)
                    .map_err(|e| ConflError::value(pos.line_number(), e))?;
                fields.insert(key, FieldValue::from(scalar));
            }
            Line::Malformed(Shape::StructHeader) => {
                return Err(ConflError::syntax(
                    pos.line_number(),
                    format!("Invalid struct declaration: {}", raw.trim()),
                ));
            }
            Line::Constant { .. } | Line::Malformed(_) | Line::Unknown => {
                return Err(ConflError::syntax(
                    pos.line_number(),
                    format!("Invalid key-value pair: {}", raw.trim()),
                ));
            }
        }
        pos = pos.next();
    }

    Err(ConflError::syntax(
        start.line_number(),
        format!("Struct {name} is not properly closed with '}}'"),
    ))
}
