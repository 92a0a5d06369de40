use indoc::indoc;
use openscad_ast::{
    parse, print, validate, walk_expr, walk_item, walk_stmt, Ast, Expr, Item, Span, Spanned, Stmt, Visitor,
};
use rayon::prelude::*;

const PROGRAM: &str = indoc! {r#"
    $fn = 24;
    module post(h = 10, r = 1) {
      translate([0, 0, h / 2]) cylinder(h = h, r = r, center = true);
      if (h > 5) %sphere(r * 2); else cube(r);
    }
    function ring(n) = [for (i = [0 : n - 1]) let (a = 360 * i / n) [cos(a), sin(a)]];
    for (p = ring(6)) translate([p[0], p[1], 0]) post();
    intersection() {
      cube(4, center = true);
      rotate([0, 0, 45]) cube(4, center = true);
    }
    v = [each [1, 2], if (true) 3 else 4, function (x) x + 1];
"#};

/// Checks that every node lies inside its parent's span.
#[derive(Default)]
struct Containment {
    parents: Vec<Span>,
    checked: usize,
    escapes: Vec<String>,
}

impl Containment {
    fn enter(&mut self, span: &Span, what: &str) {
        self.checked += 1;
        if let Some(parent) = self.parents.last() {
            if !parent.contains(span) {
                self.escapes.push(format!("{what} {span} outside {parent}"));
            }
        }
        self.parents.push(span.clone());
    }
}

impl Visitor for Containment {
    fn visit_item(&mut self, item: &Item) {
        self.enter(item.span(), "item");
        walk_item(self, item);
        self.parents.pop();
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        self.enter(stmt.span(), "statement");
        walk_stmt(self, stmt);
        self.parents.pop();
    }

    fn visit_expr(&mut self, expr: &Expr) {
        self.enter(expr.span(), "expression");
        walk_expr(self, expr);
        self.parents.pop();
    }
}

#[test]
fn child_spans_nest_inside_parents() {
    let ast = parse(PROGRAM).unwrap();
    let mut check = Containment::default();
    check.visit_ast(&ast);
    assert!(check.checked > 50, "visited only {} nodes", check.checked);
    assert!(check.escapes.is_empty(), "{:#?}", check.escapes);
}

#[test]
fn root_span_covers_source() {
    let ast = parse(PROGRAM).unwrap();
    assert_eq!(ast.span.range(), 0..PROGRAM.len());
    assert_eq!(ast.context.scopes[0].span, ast.span);
}

#[test]
fn leaf_spans_carry_their_text() {
    let ast = parse("translate([1.5, 0, 0]) cube(size);").unwrap();
    let Item::Stmt(Stmt::TransformChain { name, args, tail, .. }) = &ast.items[0] else {
        panic!("expected transform chain");
    };
    assert_eq!(name.span.text.as_deref(), Some("translate"));
    let Expr::List { elements, .. } = args[0].value() else {
        panic!("expected list");
    };
    assert_eq!(elements[0].span().text.as_deref(), Some("1.5"));
    let Stmt::TransformChain { args, .. } = tail.as_ref() else {
        panic!("expected nested call");
    };
    assert_eq!(args[0].value().span().text.as_deref(), Some("size"));
}

/// Counts calls by name; one instance per thread.
#[derive(Default)]
struct CallCounter {
    calls: usize,
}

impl Visitor for CallCounter {
    fn visit_stmt(&mut self, stmt: &Stmt) {
        if matches!(stmt, Stmt::TransformChain { .. }) {
            self.calls += 1;
        }
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        if matches!(expr, Expr::Call { .. }) {
            self.calls += 1;
        }
        walk_expr(self, expr);
    }
}

fn count_calls(ast: &Ast) -> usize {
    let mut counter = CallCounter::default();
    counter.visit_ast(ast);
    counter.calls
}

#[test]
fn one_tree_serves_many_threads() {
    let ast = parse(PROGRAM).unwrap();
    let printed = print(&ast);
    let calls = count_calls(&ast);
    assert!(calls > 0);

    let results: Vec<(String, usize, bool)> = (0..32)
        .into_par_iter()
        .map(|_| (print(&ast), count_calls(&ast), validate(&ast).is_ok()))
        .collect();

    for (text, count, valid) in results {
        assert_eq!(text, printed);
        assert_eq!(count, calls);
        assert!(valid);
    }
}
