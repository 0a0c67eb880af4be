//! Line classifier.
//!
//! Every physical line is trimmed and sorted into exactly one [`Line`] variant.
//! Well-formed variants carry their captures as slices of the input, so the
//! scanner and struct parser never re-match a line.
//!
//! Classification order matters where shapes overlap:
//!
//! 1. blank, `*>` comment, lone `{` / `}`
//! 2. struct header (`Name = struct {` or `struct Name {`), ahead of fields
//!    since both contain `=`
//! 3. field `key = value,`
//! 4. constant `name <- expr;`
//! 5. malformed versions of 2 to 4, recognized by their markers
//! 6. anything else

/// Which header grammar opened a struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderForm {
    /// `Name = struct {`
    Assign,
    /// `struct Name {`
    Declare,
}

/// What a malformed line looked like it was trying to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Constant,
    StructHeader,
    Field,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Comment,
    OpenBrace,
    CloseBrace,
    Constant { name: &'a str, expr: &'a str },
    StructHeader { name: &'a str, form: HeaderForm },
    Field { key: &'a str, value: &'a str },
    Malformed(Shape),
    Unknown,
}

pub const COMMENT_MARKER: &str = "*>";
pub const ASSIGN_MARKER: &str = "<-";
pub const STRUCT_KEYWORD: &str = "struct";

/// Classify one physical line. Surrounding whitespace is ignored.
pub fn classify(raw: &str) -> Line<'_> {
    let line = raw.trim();

    if line.is_empty() {
        return Line::Blank;
    }
    if line.starts_with(COMMENT_MARKER) {
        return Line::Comment;
    }
    match line {
        "{" => return Line::OpenBrace,
        "}" => return Line::CloseBrace,
        _ => {}
    }

    if let Some(header) = parse_header(line) {
        return header;
    }
    if let Some(field) = parse_field(line) {
        return field;
    }
    if let Some(constant) = parse_constant(line) {
        return constant;
    }

    if line.contains(ASSIGN_MARKER) {
        return Line::Malformed(Shape::Constant);
    }
    if looks_like_header(line) {
        return Line::Malformed(Shape::StructHeader);
    }
    if line.contains('=') {
        return Line::Malformed(Shape::Field);
    }
    Line::Unknown
}

/// `Name = struct {` or `struct Name {`, optionally followed by a `*>` comment.
fn parse_header(line: &str) -> Option<Line<'_>> {
    let line = match line.split_once(COMMENT_MARKER) {
        Some((head, _)) => head.trim_end(),
        None => line,
    };
    let body = line.strip_suffix('{')?.trim_end();

    if let Some(rest) = strip_keyword(body, STRUCT_KEYWORD) {
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let name = rest.trim_start();
        return is_identifier(name).then_some(Line::StructHeader {
            name,
            form: HeaderForm::Declare,
        });
    }

    let (lhs, rhs) = body.split_once('=')?;
    let name = lhs.trim();
    let rest = strip_keyword(rhs.trim_start(), STRUCT_KEYWORD)?;
    if !is_identifier(name) || !rest.trim().is_empty() {
        return None;
    }
    Some(Line::StructHeader {
        name,
        form: HeaderForm::Assign,
    })
}

/// `key = value,`. The trailing comma is required.
fn parse_field(line: &str) -> Option<Line<'_>> {
    let (lhs, rhs) = line.split_once('=')?;
    let key = lhs.trim();
    if !is_identifier(key) {
        return None;
    }
    let value = rhs.trim().strip_suffix(',')?.trim();
    Some(Line::Field { key, value })
}

/// `name <- expr;` with a lowercase-only name and a non-empty expression.
fn parse_constant(line: &str) -> Option<Line<'_>> {
    let (lhs, rhs) = line.split_once(ASSIGN_MARKER)?;
    let name = lhs.trim();
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_lowercase()) {
        return None;
    }
    let expr = rhs.trim().strip_suffix(';')?.trim();
    if expr.is_empty() {
        return None;
    }
    Some(Line::Constant { name, expr })
}

fn looks_like_header(line: &str) -> bool {
    if strip_keyword(line, STRUCT_KEYWORD).is_some() {
        return true;
    }
    line.split_once('=')
        .is_some_and(|(_, rhs)| strip_keyword(rhs.trim_start(), STRUCT_KEYWORD).is_some())
}

/// Strip `keyword` from the front of `s` if it stands as a whole word.
fn strip_keyword<'a>(s: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = s.strip_prefix(keyword)?;
    match rest.chars().next() {
        Some(c) if is_identifier_char(c) => None,
        _ => Some(rest),
    }
}

/// Struct and field names: ASCII letters, digits, underscore.
pub fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_identifier_char)
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Position of a physical line in the source, 0-based.
///
/// Positions are plain values: a parser takes one in and hands back how many
/// lines it consumed, and the caller computes its own next position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct LinePos(usize);

impl LinePos {
    pub const START: LinePos = LinePos(0);

    pub fn new(index: usize) -> Self {
        LinePos(index)
    }

    pub fn index(self) -> usize {
        self.0
    }

    /// 1-based line number for messages.
    pub fn line_number(self) -> usize {
        self.0 + 1
    }

    pub fn next(self) -> Self {
        self.advance(1)
    }

    pub fn advance(self, lines: usize) -> Self {
        LinePos(self.0 + lines)
    }

    /// Number of lines from `self` through `end`, both inclusive.
    pub fn lines_through(self, end: LinePos) -> usize {
        end.0 - self.0 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trivia() {
        assert_eq!(classify(""), Line::Blank);
        assert_eq!(classify("   \t"), Line::Blank);
        assert_eq!(classify("  *> note <- a = struct {"), Line::Comment);
        assert_eq!(classify("  { "), Line::OpenBrace);
        assert_eq!(classify("}"), Line::CloseBrace);
    }

    #[test]
    fn both_header_forms() {
        assert_eq!(
            classify("server = struct {"),
            Line::StructHeader {
                name: "server",
                form: HeaderForm::Assign
            }
        );
        assert_eq!(
            classify("Net_2=struct{"),
            Line::StructHeader {
                name: "Net_2",
                form: HeaderForm::Assign
            }
        );
        assert_eq!(
            classify("  struct myStruct {"),
            Line::StructHeader {
                name: "myStruct",
                form: HeaderForm::Declare
            }
        );
    }

    #[test]
    fn header_may_carry_trailing_comment() {
        assert_eq!(
            classify("struct a { *> note"),
            Line::StructHeader {
                name: "a",
                form: HeaderForm::Declare
            }
        );
        assert_eq!(
            classify("inner = struct {*> nested"),
            Line::StructHeader {
                name: "inner",
                form: HeaderForm::Assign
            }
        );
        assert_eq!(
            classify("struct a *> {"),
            Line::Malformed(Shape::StructHeader)
        );
    }

    #[test]
    fn header_wins_over_field() {
        // contains '=' but is a nested struct opener
        assert!(matches!(
            classify("inner = struct {"),
            Line::StructHeader { .. }
        ));
    }

    #[test]
    fn malformed_headers() {
        assert_eq!(classify("struct {"), Line::Malformed(Shape::StructHeader));
        assert_eq!(classify("struct a b {"), Line::Malformed(Shape::StructHeader));
        assert_eq!(classify("x = struct"), Line::Malformed(Shape::StructHeader));
        assert_eq!(classify("struct Foo"), Line::Malformed(Shape::StructHeader));
        assert_eq!(classify("structure"), Line::Unknown);
    }

    #[test]
    fn fields() {
        assert_eq!(
            classify("a = 15,"),
            Line::Field {
                key: "a",
                value: "15"
            }
        );
        assert_eq!(
            classify("b='x = struct {',"),
            Line::Field {
                key: "b",
                value: "'x = struct {'"
            }
        );
        assert_eq!(
            classify("c = $x 3 mod$ ,"),
            Line::Field {
                key: "c",
                value: "$x 3 mod$"
            }
        );
        assert_eq!(classify("b = 'value'"), Line::Malformed(Shape::Field));
        assert_eq!(classify("a b = 1,"), Line::Malformed(Shape::Field));
    }

    #[test]
    fn constants() {
        assert_eq!(
            classify("x <- 125;"),
            Line::Constant {
                name: "x",
                expr: "125"
            }
        );
        assert_eq!(
            classify("y<-$x 10 +$;"),
            Line::Constant {
                name: "y",
                expr: "$x 10 +$"
            }
        );
        assert_eq!(classify("X <- 1;"), Line::Malformed(Shape::Constant));
        assert_eq!(classify("x <- 1"), Line::Malformed(Shape::Constant));
        assert_eq!(classify("x1 <- 1;"), Line::Malformed(Shape::Constant));
        assert_eq!(classify("x <- ;"), Line::Malformed(Shape::Constant));
    }

    #[test]
    fn everything_else_is_unknown() {
        assert_eq!(classify("hello world"), Line::Unknown);
        assert_eq!(classify("a,"), Line::Unknown);
    }
}
