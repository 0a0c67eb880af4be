use confl_core::{parse, ConflError, ErrorKind, EvalError, FieldValue, Parser, Scalar};

fn int(n: i64) -> FieldValue {
    FieldValue::Integer(n)
}

fn text(s: &str) -> FieldValue {
    FieldValue::Text(s.to_string())
}

// ============================================================================
// Struct headers and nesting
// ============================================================================

#[test]
fn assign_and_declare_forms_parse_identically() {
    let assign = parse("cfg = struct {\n  a = 1,\n  b = 'x',\n}").unwrap();
    let declare = parse("struct cfg {\n  a = 1,\n  b = 'x',\n}").unwrap();
    assert_eq!(assign, declare);
}

#[test]
fn nested_structs_in_both_forms() {
    let src = "
        struct server {
            name = 'edge',
            net = struct {
                port = 8080,
                struct tls {
                    enabled = 1,
                }
            }
            retries = 3,
        }
    ";
    let doc = parse(src).unwrap();

    assert_eq!(doc.get_path("server.name"), Some(&text("edge")));
    assert_eq!(doc.get_path("server.net.port"), Some(&int(8080)));
    assert_eq!(doc.get_path("server.net.tls.enabled"), Some(&int(1)));
    assert_eq!(doc.get_path("server.retries"), Some(&int(3)));

    let server = doc.get("server").unwrap();
    let keys: Vec<&str> = server.keys().collect();
    assert_eq!(keys, ["name", "net", "retries"]);
}

#[test]
fn scanner_resumes_on_line_after_closing_brace() {
    // the constant sits directly after the first closing brace
    let src = "struct a {\n  x = 1,\n}\nn <- 5;\nstruct b {\n  y = $n 1 +$,\n}";
    let mut parser = Parser::new();
    let doc = parser.parse(src).unwrap();

    assert_eq!(doc.len(), 2);
    assert_eq!(parser.constants().get("n"), Some(&Scalar::Integer(5)));
    assert_eq!(doc.get_path("b.y"), Some(&int(6)));
}

#[test]
fn multiple_top_level_structs_keep_source_order() {
    let doc = parse("struct z {\n}\nstruct a {\n}\nstruct m {\n}").unwrap();
    let names: Vec<&str> = doc.keys().collect();
    assert_eq!(names, ["z", "a", "m"]);
    assert!(doc.get("a").unwrap().is_empty());
}

#[test]
fn header_with_struct_in_field_text_is_still_a_field() {
    let doc = parse("struct s {\n  note = 'x = struct {',\n}").unwrap();
    assert_eq!(doc.get_path("s.note"), Some(&text("x = struct {")));
}

#[test]
fn header_with_trailing_comment() {
    let src = "struct a { *> top\n  inner = struct { *> nested\n    x = 1,\n  }\n}";
    let doc = parse(src).unwrap();
    assert_eq!(doc.get_path("a.inner.x"), Some(&int(1)));
}

/// Lowercase-only constant name for an index: 0 -> "a", 25 -> "z", 26 -> "ba".
fn letters(mut i: usize) -> String {
    let mut name = vec![b'a' + (i % 26) as u8];
    i /= 26;
    while i > 0 {
        name.push(b'a' + (i % 26) as u8);
        i /= 26;
    }
    name.reverse();
    String::from_utf8(name).unwrap()
}

#[test]
fn thousands_of_fields_and_constants() {
    let n = 20_000;
    let mut src = String::new();
    for i in 0..n {
        src.push_str(&format!("{} <- {i};\n", letters(i)));
    }
    let last = letters(n - 1);
    src.push_str("struct big {\n");
    for i in 0..n {
        src.push_str(&format!("  f{i} = ${last} {i} +$,\n"));
    }
    src.push_str("}\n");

    let mut parser = Parser::new();
    let doc = parser.parse(&src).unwrap();
    let big = doc.get("big").unwrap();
    assert_eq!(parser.constants().len(), n);
    assert_eq!(big.len(), n);
    assert_eq!(big.keys().next(), Some("f0"));
    let last_value = (n - 1 + n - 1) as i64;
    assert_eq!(big.get(&format!("f{}", n - 1)), Some(&int(last_value)));
}

#[test]
fn duplicate_field_last_write_wins() {
    let doc = parse("struct s {\n  a = 1,\n  b = 2,\n  a = 3,\n}").unwrap();
    let s = doc.get("s").unwrap();
    assert_eq!(s.get("a"), Some(&int(3)));
    let keys: Vec<&str> = s.keys().collect();
    assert_eq!(keys, ["a", "b"]);
}

// ============================================================================
// Lenient top level
// ============================================================================

#[test]
fn unrecognized_top_level_lines_are_skipped() {
    let src = "just some words\n}\n{\nstruct s {\n  a = 1,\n}\ntrailing text";
    let doc = parse(src).unwrap();
    assert_eq!(doc.len(), 1);
    assert_eq!(doc.get_path("s.a"), Some(&int(1)));
}

#[test]
fn empty_source_is_an_empty_document() {
    assert!(parse("").unwrap().is_empty());
    assert!(parse("\n\n   \n*> only a comment\n").unwrap().is_empty());
}

#[test]
fn crlf_line_endings() {
    let doc = parse("x <- 2;\r\nstruct s {\r\n  a = $x 2 +$,\r\n}\r\n").unwrap();
    assert_eq!(doc.get_path("s.a"), Some(&int(4)));
}

// ============================================================================
// Constants
// ============================================================================

#[test]
fn text_constants_can_be_referenced() {
    let doc = parse("name <- 'edge';\nstruct s {\n  n = $name$,\n}").unwrap();
    assert_eq!(doc.get_path("s.n"), Some(&text("edge")));
}

#[test]
fn redeclared_constant_takes_the_last_value() {
    let mut parser = Parser::new();
    parser
        .parse("x <- 1;\nstruct a {\n  v = $x$,\n}\nx <- 2;")
        .map(|doc| assert_eq!(doc.get_path("a.v"), Some(&int(1))))
        .unwrap();
    assert_eq!(parser.constants().get("x"), Some(&Scalar::Integer(2)));
}

#[test]
fn forward_reference_is_an_unknown_token() {
    let err = parse("y <- $x 1 +$;\nx <- 1;").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Value);
    assert!(matches!(
        err,
        ConflError::Value {
            line: 1,
            source: EvalError::UnknownToken(ref t)
        } if t == "x"
    ));
}

#[test]
fn each_parse_starts_with_fresh_constants() {
    let mut parser = Parser::new();
    parser.parse("x <- 1;").unwrap();
    assert!(parser.constants().contains("x"));

    let err = parser.parse("y <- $x 1 +$;").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Value);
    assert!(!parser.constants().contains("x"));
}

#[test]
fn constants_before_a_failure_stay_inspectable() {
    let mut parser = Parser::new();
    assert!(parser.parse("a <- 1;\nb <- 2;\nc <- ?;").is_err());
    assert_eq!(parser.constants().len(), 2);
}

#[test]
fn malformed_constant_declarations() {
    for src in ["X <- 1;", "x <- 1", "x2 <- 5;", "x <- ;"] {
        let err = parse(src).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax, "{src}");
        assert_eq!(
            err.to_string(),
            format!("Syntax error at line 1: Invalid constant declaration: {src}")
        );
    }
}

// ============================================================================
// Errors inside structs
// ============================================================================

#[test]
fn field_value_errors_carry_the_field_line() {
    let src = "struct s {\n  a = 1,\n  b = $1 +$,\n}";
    let err = parse(src).unwrap_err();
    assert_eq!(err.line(), Some(3));
    assert_eq!(
        err.to_string(),
        "Value error at line 3: Invalid expression: 1 +"
    );
}

#[test]
fn bare_word_inside_struct_is_rejected() {
    let err = parse("struct s {\n  oops\n}").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(
        err.to_string(),
        "Syntax error at line 2: Invalid key-value pair: oops"
    );
}

#[test]
fn constant_declaration_inside_struct_is_rejected() {
    let err = parse("struct s {\n  x <- 1;\n}").unwrap_err();
    assert!(err.to_string().contains("Invalid key-value pair: x <- 1;"));
}

#[test]
fn bad_nested_header_is_rejected() {
    let err = parse("struct s {\n  inner = struct\n  }\n}").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Syntax error at line 2: Invalid struct declaration: inner = struct"
    );
}

#[test]
fn top_level_assignment_is_a_bad_struct_declaration() {
    let err = parse("a = 15,").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert!(err.to_string().contains("Invalid struct declaration: a = 15,"));
}

#[test]
fn deep_nesting_is_an_error_not_a_crash() {
    let levels = 20_000;
    let mut src = String::new();
    for i in 0..levels {
        src.push_str(&format!("struct s{i} {{\n"));
    }
    for _ in 0..levels {
        src.push_str("}\n");
    }
    let err = parse(&src).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(err.line(), Some(129));
    assert!(err.to_string().contains("Struct nesting too deep"));
}

#[test]
fn lone_dollar_is_an_empty_expression() {
    let err = parse("struct s {\n  a = $,\n}").unwrap_err();
    assert_eq!(err.to_string(), "Value error at line 2: Invalid expression: ");
}

#[test]
fn nested_unclosed_struct_reports_innermost_header() {
    let err = parse("struct outer {\n  inner = struct {\n    a = 1,\n").unwrap_err();
    assert_eq!(err.line(), Some(2));
    assert!(err.to_string().contains("Struct inner is not properly closed"));
}
