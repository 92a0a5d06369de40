use openscad_ast::{parse, parse_from_cst, parse_strict, print, Expr, Item, ParseError, Span, SpanlessEq, Stmt, SyntaxNode};

#[test]
fn invalid_dot_index_is_syntax_error() {
    let err = parse("echo(object.1);").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { .. }), "got {err:?}");
}

#[test]
fn empty_source_is_empty_ast() {
    for source in ["", "   \n\t", "// only a comment\n", "/* block */"] {
        let ast = parse(source).unwrap();
        assert!(ast.items.is_empty());
        assert!(ast.context.modules.is_empty());
        assert_eq!(ast.context.scopes.len(), 1);
        assert_eq!(print(&ast), "");
    }
}

#[test]
fn empty_for_parens_is_semantic_error() {
    let err = parse_strict("for () cube(1);").unwrap_err();
    assert!(matches!(err, ParseError::Semantic { .. }), "got {err:?}");
}

#[test]
fn leftmost_syntax_error_wins() {
    let source = "cube(1);\nsphere(;\ncylinder(";
    let err = parse(source).unwrap_err();
    let ParseError::Syntax { span, .. } = &err else {
        panic!("expected syntax error, got {err:?}");
    };
    assert_eq!(span.start_row, 1);
    assert!(span.start_byte < source.rfind("cylinder").unwrap());
}

#[test]
fn declaration_as_child_is_syntax_error() {
    for source in ["translate([1, 0, 0]) x = 1;", "if (a) module m() cube(1);", "for (i = [1]) include <a.scad>"] {
        let err = parse(source).unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }), "{source}: {err:?}");
    }
}

#[test]
fn deeply_nested_expression_converts_and_prints() {
    let depth = 2_000;
    let source = format!("x = {}1{};", "(".repeat(depth), ")".repeat(depth));
    let ast = parse(&source).unwrap();
    let Item::VarDecl(decl) = &ast.items[0] else {
        panic!("expected declaration");
    };
    let mut levels = 0;
    let mut current = &decl.value_expr;
    while let Expr::Paren { inner, .. } = current {
        levels += 1;
        current = inner;
    }
    assert_eq!(levels, depth);
    assert_eq!(print(&ast).trim_end(), source);
}

#[test]
fn deeply_nested_expression_clones_compares_and_drops() {
    let depth = 2_000;
    let source = format!("x = {}-y{};", "(".repeat(depth), ")".repeat(depth));
    let ast = parse(&source).unwrap();
    let copy = ast.clone();
    assert!(copy == ast);
    assert!(copy.spanless_eq(&ast));

    let Item::VarDecl(decl) = &ast.items[0] else {
        panic!("expected declaration");
    };
    let value = decl.value_expr.clone();
    assert_eq!(value, decl.value_expr);
    drop(value);
    drop(copy);
}

#[test]
fn irregular_assert_arguments_convert() {
    for source in [
        "assert(condition = a, condition = b);",
        "assert();",
        "x = assert(message = \"m\") 1;",
        "assert(a, \"m\", extra, level = 2) cube(1);",
    ] {
        let ast = parse(source).unwrap_or_else(|err| panic!("{source}: {err:?}"));
        assert!(ast.spanless_eq(&parse(&print(&ast)).unwrap()), "{source}");
    }
    assert!(matches!(
        parse_strict("assert(condition = a, condition = b);"),
        Err(ParseError::Semantic { .. })
    ));
}

#[test]
fn deeply_nested_statements_roundtrip() {
    let depth = 1_000;
    let source = format!("{}cube(1);", "translate([1, 0, 0]) ".repeat(depth));
    let ast = parse(&source).unwrap();
    assert!(ast.spanless_eq(&parse(&print(&ast)).unwrap()));
}

#[test]
fn multiline_spans_track_rows_and_columns() {
    let source = "cube(1);\n  sphere(\n    2\n  );";
    let ast = parse(source).unwrap();
    let Item::Stmt(stmt @ Stmt::TransformChain { .. }) = &ast.items[1] else {
        panic!("expected transform chain");
    };
    let span = openscad_ast::Spanned::span(stmt);
    assert_eq!((span.start_row, span.start_col), (1, 2));
    assert_eq!(span.end_row, 3);
    assert!(source[span.range()].starts_with("sphere(\n    2\n  )"));
}

#[test]
fn unicode_string_spans_are_byte_based() {
    let source = "s = \"héllo\"; t = 1;";
    let ast = parse(source).unwrap();
    let Item::VarDecl(second) = &ast.items[1] else {
        panic!("expected declaration");
    };
    assert_eq!(second.span.start_byte, source.find("t =").unwrap());
}

// =============================================================================
// FOREIGN CST
// =============================================================================

/// Minimal CST from an outside producer.
struct FakeNode {
    kind: &'static str,
    span: Span,
    field: Option<&'static str>,
    children: Vec<FakeNode>,
}

impl FakeNode {
    fn new(kind: &'static str, bytes: std::ops::Range<usize>, children: Vec<FakeNode>) -> Self {
        let span = Span::new(bytes.clone(), (0, bytes.start), (0, bytes.end));
        Self {
            kind,
            span,
            field: None,
            children,
        }
    }
}

impl SyntaxNode for FakeNode {
    fn kind(&self) -> &str {
        self.kind
    }

    fn span(&self) -> Span {
        self.span.clone()
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn field(&self) -> Option<&str> {
        self.field
    }

    fn is_error(&self) -> bool {
        self.kind == "ERROR"
    }

    fn is_missing(&self) -> bool {
        false
    }
}

#[test]
fn unknown_node_kind_is_unsupported() {
    let source = "mystery;";
    let root = FakeNode::new("source_file", 0..8, vec![FakeNode::new("mystery_statement", 0..8, vec![])]);
    let err = parse_from_cst(&root, source).unwrap_err();
    let ParseError::Unsupported { node_type, span } = &err else {
        panic!("expected unsupported, got {err:?}");
    };
    assert_eq!(node_type, "mystery_statement");
    assert_eq!(span.range(), 0..8);
}

#[test]
fn unknown_root_kind_is_unsupported() {
    let root = FakeNode::new("translation_unit", 0..0, vec![]);
    let err = parse_from_cst(&root, "").unwrap_err();
    assert!(matches!(err, ParseError::Unsupported { ref node_type, .. } if node_type == "translation_unit"));
}

#[test]
fn foreign_error_node_is_syntax_error() {
    let source = "@@@";
    let root = FakeNode::new("source_file", 0..3, vec![FakeNode::new("ERROR", 0..3, vec![])]);
    let err = parse_from_cst(&root, source).unwrap_err();
    assert!(matches!(err, ParseError::Syntax { .. }), "got {err:?}");
    assert!(err.to_string().contains("@@@"));
}

#[test]
fn foreign_cst_with_known_kinds_converts() {
    let source = "cube();";
    let mut name = FakeNode::new("identifier", 0..4, vec![]);
    name.field = Some("name");
    let mut arguments = FakeNode::new("arguments", 4..6, vec![]);
    arguments.field = Some("arguments");
    let call = FakeNode::new("module_call", 0..7, vec![name, arguments]);
    let root = FakeNode::new("source_file", 0..7, vec![call]);

    let ast = parse_from_cst(&root, source).unwrap();
    assert!(ast.spanless_eq(&parse(source).unwrap()));
}
