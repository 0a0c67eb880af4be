//! Top-level scanner: walks the source line by line and builds the [`Document`].
//!
//! Constant declarations are single lines and move the cursor by one. A struct
//! header hands off to [`parse_struct`], and the cursor then jumps past the
//! whole struct. Blank lines, comments, and anything unrecognized are skipped.

use crate::constants::ConstantTable;
use crate::error::{ConflError, Result};
use crate::eval::evaluate;
use crate::line::{classify, Line, LinePos, Shape};
use crate::structs::parse_struct;
use crate::types::Document;

/// Reusable parser handle.
///
/// Every call to [`Parser::parse`] starts from an empty constant table. The
/// table built by the most recent call stays readable through
/// [`Parser::constants`], including after a failed parse (it then holds the
/// constants declared before the failing line).
#[derive(Debug, Clone, Default)]
pub struct Parser {
    constants: ConstantTable,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a complete source text into a document.
    pub fn parse(&mut self, text: &str) -> Result<Document> {
        let mut constants = ConstantTable::new();
        let result = scan(text, &mut constants);
        self.constants = constants;
        result
    }

    /// Constants from the most recent [`parse`](Self::parse) call.
    pub fn constants(&self) -> &ConstantTable {
        &self.constants
    }
}

/// Parse a complete source text into a document with a throwaway [`Parser`].
pub fn parse(text: &str) -> Result<Document> {
    Parser::new().parse(text)
}

fn scan(text: &str, constants: &mut ConstantTable) -> Result<Document> {
    let lines: Vec<&str> = text.lines().collect();
    let mut document = Document::new();
    let mut pos = LinePos::START;

    while let Some(&raw) = lines.get(pos.index()) {
        pos = match classify(raw) {
            Line::Constant { name, expr } => {
                let value =
                    evaluate(expr, constants).map_err(|e| ConflError::value(pos.line_number(), e))?;
                constants.define(name, value);
                pos.next()
            }
            Line::Malformed(Shape::Constant) => {
                return Err(ConflError::syntax(
                    pos.line_number(),
                    format!("Invalid constant declaration: {}", raw.trim()),
                ));
            }
            Line::StructHeader { .. } => {
                let parsed = parse_struct(&lines, pos, constants)?;
                document.insert(parsed.name, parsed.value);
                pos.advance(parsed.consumed)
            }
            // a `=` line outside any struct can only be a (bad) struct header
            Line::Field { .. } | Line::Malformed(Shape::StructHeader | Shape::Field) => {
                return Err(ConflError::syntax(
                    pos.line_number(),
                    format!("Invalid struct declaration: {}", raw.trim()),
                ));
            }
            Line::Blank | Line::Comment | Line::OpenBrace | Line::CloseBrace | Line::Unknown => {
                pos.next()
            }
        };
    }

    Ok(document)
}
