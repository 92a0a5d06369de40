//! # Printer
//!
//! Deterministic unparser from AST back to OpenSCAD source.
//!
//! Output is normalized: one item per line, blocks indented, single spaces
//! around binary operators. Comments and original layout are not kept,
//! but structure is: parsing the printed text gives back the same tree
//! (compared with [`crate::SpanlessEq`]).
//!
//! ```rust
//! let ast = openscad_ast::parse("translate([1,2,3])cube(1);").unwrap();
//! assert_eq!(openscad_ast::print(&ast), "translate([1, 2, 3]) cube(1);\n");
//! ```

use crate::ast::*;
use crate::visitor::Visitor;
use config::constants::{PrinterConfig, STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};

/// Literal that re-lexes to positive infinity.
const INFINITY_LITERAL: &str = "1e400";

/// Print `ast` with the default configuration.
pub fn print(ast: &Ast) -> String {
    print_with(ast, &PrinterConfig::default())
}

/// Print `ast` with an explicit indent width and trailing-newline policy.
pub fn print_with(ast: &Ast, config: &PrinterConfig) -> String {
    let mut printer = Printer {
        out: String::new(),
        depth: 0,
        config,
    };
    printer.visit_ast(ast);
    if !config.trailing_newline && printer.out.ends_with('\n') {
        printer.out.pop();
    }
    printer.out
}

struct Printer<'c> {
    out: String,
    depth: usize,
    config: &'c PrinterConfig,
}

impl Visitor for Printer<'_> {
    fn visit_item(&mut self, item: &Item) {
        self.indent();
        self.item(item);
        self.out.push('\n');
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        self.stmt(stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        self.expr(expr);
    }
}

impl Printer<'_> {
    fn indent(&mut self) {
        let width = self.depth * self.config.indent_width;
        self.out.extend(std::iter::repeat(' ').take(width));
    }

    // =========================================================================
    // ITEMS
    // =========================================================================

    fn item(&mut self, item: &Item) {
        match item {
            Item::ModuleDef(def) => {
                self.out.push_str("module ");
                self.out.push_str(def.name.as_str());
                self.params(&def.params);
                self.out.push(' ');
                self.block(&def.body_items);
            }
            Item::FunctionDef(def) => {
                self.out.push_str("function ");
                self.out.push_str(def.name.as_str());
                self.params(&def.params);
                self.out.push_str(" = ");
                self.visit_expr(&def.body_expr);
                self.out.push(';');
            }
            Item::VarDecl(decl) => {
                self.out.push_str(decl.name.as_str());
                self.out.push_str(" = ");
                self.visit_expr(&decl.value_expr);
                self.out.push(';');
            }
            Item::Stmt(stmt) => self.visit_stmt(stmt),
        }
    }

    /// `{`, one item per line, `}` at the current indentation.
    fn block(&mut self, items: &[Item]) {
        if items.is_empty() {
            self.out.push_str("{}");
            return;
        }
        self.out.push_str("{\n");
        self.depth += 1;
        for item in items {
            self.visit_item(item);
        }
        self.depth -= 1;
        self.indent();
        self.out.push('}');
    }

    // =========================================================================
    // STATEMENTS
    // =========================================================================

    fn stmt(&mut self, stmt: &Stmt) {
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || match stmt {
            Stmt::TransformChain { name, args, tail, .. } => {
                self.out.push_str(name.as_str());
                self.args(args);
                self.tail(tail);
            }
            Stmt::UnionBlock { items, .. } => self.block(items),
            Stmt::ForBlock { bindings, body, .. } => self.bound("for", bindings, body),
            Stmt::IntersectionForBlock { bindings, body, .. } => self.bound("intersection_for", bindings, body),
            Stmt::LetBlock { bindings, body, .. } => self.bound("let", bindings, body),
            Stmt::AssignBlock { assignments, body, .. } => self.bound("assign", assignments, body),
            Stmt::IfBlock {
                cond,
                then_branch,
                else_branch,
                ..
            } => {
                self.out.push_str("if (");
                self.visit_expr(cond);
                self.out.push_str(") ");
                self.visit_stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.out.push_str(" else ");
                    self.visit_stmt(else_branch);
                }
            }
            Stmt::Include { path, .. } => {
                self.out.push_str("include <");
                self.out.push_str(path);
                self.out.push('>');
            }
            Stmt::Use { path, .. } => {
                self.out.push_str("use <");
                self.out.push_str(path);
                self.out.push('>');
            }
            Stmt::AssertStmt { args, body, .. } => {
                self.out.push_str("assert");
                self.args(args);
                self.tail(body);
            }
            Stmt::Modified { modifier, stmt, .. } => {
                self.out.push_str(modifier.as_str());
                self.visit_stmt(stmt);
            }
            Stmt::Empty(_) => self.out.push(';'),
        })
    }

    /// Child of a call: `;` when empty, otherwise a space and the statement.
    fn tail(&mut self, tail: &Stmt) {
        if tail.is_empty() {
            self.out.push(';');
        } else {
            self.out.push(' ');
            self.visit_stmt(tail);
        }
    }

    fn bound(&mut self, keyword: &str, bindings: &[Assignment], body: &Stmt) {
        self.out.push_str(keyword);
        self.out.push_str(" (");
        self.assignments(bindings);
        self.out.push_str(") ");
        self.visit_stmt(body);
    }

    // =========================================================================
    // EXPRESSIONS
    // =========================================================================

    fn expr(&mut self, expr: &Expr) {
        stacker::maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || match expr {
            Expr::Literal { value, .. } => self.literal(value),
            Expr::Ident(name) | Expr::SpecialIdent(name) => self.out.push_str(name.as_str()),
            Expr::Call { callee, args, .. } => {
                self.visit_expr(callee);
                self.args(args);
            }
            Expr::Index { base, index, .. } => {
                self.visit_expr(base);
                self.out.push('[');
                self.visit_expr(index);
                self.out.push(']');
            }
            Expr::DotIndex { base, field, .. } => {
                self.visit_expr(base);
                // `1.x` would lex as the number `1.`
                if base.as_number().is_some() {
                    self.out.push(' ');
                }
                self.out.push('.');
                self.out.push_str(field.as_str());
            }
            Expr::Unary { op, operand, .. } => {
                self.out.push_str(op.as_str());
                self.visit_expr(operand);
            }
            Expr::Binary { op, left, right, .. } => {
                self.visit_expr(left);
                self.out.push(' ');
                self.out.push_str(op.as_str());
                self.out.push(' ');
                self.visit_expr(right);
            }
            Expr::Ternary {
                cond,
                then_branch,
                else_branch,
                ..
            } => {
                self.visit_expr(cond);
                self.out.push_str(" ? ");
                self.visit_expr(then_branch);
                self.out.push_str(" : ");
                self.visit_expr(else_branch);
            }
            Expr::Paren { inner, .. } => {
                self.out.push('(');
                self.visit_expr(inner);
                self.out.push(')');
            }
            Expr::LetExpr { bindings, body, .. } => {
                self.out.push_str("let (");
                self.assignments(bindings);
                self.out.push_str(") ");
                self.visit_expr(body);
            }
            Expr::AssertExpr { args, body, .. } => {
                self.out.push_str("assert");
                self.args(args);
                self.optional_body(body.as_deref());
            }
            Expr::EchoExpr { args, body, .. } => {
                self.out.push_str("echo");
                self.args(args);
                self.optional_body(body.as_deref());
            }
            Expr::List { elements, .. } => {
                self.out.push('[');
                self.comma_separated(elements, |p, e| p.visit_expr(e));
                self.out.push(']');
            }
            Expr::Range { start, step, end, .. } => {
                self.out.push('[');
                self.visit_expr(start);
                if let Some(step) = step {
                    self.out.push_str(" : ");
                    self.visit_expr(step);
                }
                self.out.push_str(" : ");
                self.visit_expr(end);
                self.out.push(']');
            }
            Expr::FunctionLit { params, body, .. } => {
                self.out.push_str("function");
                self.params(params);
                self.out.push(' ');
                self.visit_expr(body);
            }
            Expr::Each { expr, .. } => {
                self.out.push_str("each ");
                self.visit_expr(expr);
            }
            Expr::ListComp { binds, clauses, body, .. } => {
                self.for_binds(binds);
                for clause in clauses {
                    self.out.push(' ');
                    match clause {
                        CompClause::For { binds, .. } => self.for_binds(binds),
                        CompClause::If { cond, .. } => {
                            self.out.push_str("if (");
                            self.visit_expr(cond);
                            self.out.push(')');
                        }
                        CompClause::Let { bindings, .. } => {
                            self.out.push_str("let (");
                            self.assignments(bindings);
                            self.out.push(')');
                        }
                    }
                }
                self.out.push(' ');
                self.visit_expr(body);
            }
            Expr::CompIf {
                cond,
                then_branch,
                else_branch,
                ..
            } => {
                self.out.push_str("if (");
                self.visit_expr(cond);
                self.out.push_str(") ");
                self.visit_expr(then_branch);
                if let Some(else_branch) = else_branch {
                    self.out.push_str(" else ");
                    self.visit_expr(else_branch);
                }
            }
        })
    }

    fn optional_body(&mut self, body: Option<&Expr>) {
        if let Some(body) = body {
            self.out.push(' ');
            self.visit_expr(body);
        }
    }

    fn for_binds(&mut self, binds: &ForBinds) {
        self.out.push_str("for (");
        match binds {
            ForBinds::Assigns(assigns) => self.assignments(assigns),
            ForBinds::CStyle { init, cond, update } => {
                self.assignments(init);
                self.out.push_str("; ");
                self.visit_expr(cond);
                self.out.push_str("; ");
                self.assignments(update);
            }
        }
        self.out.push(')');
    }

    fn literal(&mut self, literal: &Literal) {
        match literal {
            Literal::Number(n) => self.number(*n),
            Literal::String(s) => {
                self.out.push('"');
                escape_into(&mut self.out, s);
                self.out.push('"');
            }
            Literal::Bool(b) => self.out.push_str(if *b { "true" } else { "false" }),
            Literal::Undef => self.out.push_str("undef"),
        }
    }

    /// Shortest decimal that parses back to the same `f64`.
    fn number(&mut self, n: f64) {
        if n.is_infinite() {
            if n < 0.0 {
                self.out.push('-');
            }
            self.out.push_str(INFINITY_LITERAL);
        } else {
            self.out.push_str(&n.to_string());
        }
    }

    // =========================================================================
    // LISTS
    // =========================================================================

    fn comma_separated<T>(&mut self, items: &[T], mut each: impl FnMut(&mut Self, &T)) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            each(self, item);
        }
    }

    fn args(&mut self, args: &[Arg]) {
        self.out.push('(');
        self.comma_separated(args, |p, arg| match arg {
            Arg::Positional(value) => p.visit_expr(value),
            Arg::Named { name, value, .. } => {
                p.out.push_str(name.as_str());
                p.out.push_str(" = ");
                p.visit_expr(value);
            }
        });
        self.out.push(')');
    }

    fn params(&mut self, params: &[Param]) {
        self.out.push('(');
        self.comma_separated(params, |p, param| {
            p.out.push_str(param.name.as_str());
            if let Some(default) = &param.default_expr {
                p.out.push_str(" = ");
                p.visit_expr(default);
            }
        });
        self.out.push(')');
    }

    fn assignments(&mut self, assignments: &[Assignment]) {
        self.comma_separated(assignments, |p, a| {
            p.out.push_str(a.name.as_str());
            p.out.push_str(" = ");
            p.visit_expr(&a.value);
        });
    }
}

fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use indoc::indoc;

    fn reprint(source: &str) -> String {
        print(&parse(source).unwrap())
    }

    #[test]
    fn test_normalizes_whitespace() {
        assert_eq!(reprint("cube(  10 ,center=true) ;"), "cube(10, center = true);\n");
        assert_eq!(reprint("x=1+2*3;"), "x = 1 + 2 * 3;\n");
    }

    #[test]
    fn test_blocks_are_indented() {
        let printed = reprint("module m(a=1){if(a)cube(a);else{sphere(1);}}");
        assert_eq!(
            printed,
            indoc! {"
                module m(a = 1) {
                  if (a) cube(a); else {
                    sphere(1);
                  }
                }
            "}
        );
    }

    #[test]
    fn test_custom_indent_and_no_trailing_newline() {
        let ast = parse("union(){cube(1);}").unwrap();
        let config = PrinterConfig::new(4, false).unwrap();
        assert_eq!(print_with(&ast, &config), "union() {\n    cube(1);\n}");
    }

    #[test]
    fn test_expressions() {
        assert_eq!(reprint("x=-(a+b)^2;"), "x = -(a + b) ^ 2;\n");
        assert_eq!(reprint("x=a?b:c;"), "x = a ? b : c;\n");
        assert_eq!(reprint("x=[0:2:10];"), "x = [0 : 2 : 10];\n");
        assert_eq!(reprint("x=v[0].y;"), "x = v[0].y;\n");
        assert_eq!(reprint("f=function(x)x*2;"), "f = function(x) x * 2;\n");
        assert_eq!(reprint("x=let(a=1)a;"), "x = let (a = 1) a;\n");
    }

    #[test]
    fn test_comprehension() {
        assert_eq!(
            reprint("x=[for(i=v)if(i>0)let(j=i)each j];"),
            "x = [for (i = v) if (i > 0) let (j = i) each j];\n"
        );
        assert_eq!(
            reprint("x=[for(i=0;i<3;i=i+1)i];"),
            "x = [for (i = 0; i < 3; i = i + 1) i];\n"
        );
    }

    #[test]
    fn test_strings_are_reescaped() {
        assert_eq!(reprint(r#"s = "a\"b\\c\nd\x41";"#), "s = \"a\\\"b\\\\c\\ndA\";\n");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(reprint("x = [1.50, .5, 1e3, 1e400];"), "x = [1.5, 0.5, 1000, 1e400];\n");
    }

    #[test]
    fn test_statements() {
        assert_eq!(reprint("include <a.scad>"), "include <a.scad>\n");
        assert_eq!(reprint("#translate([1,0,0])cube(1);"), "#translate([1, 0, 0]) cube(1);\n");
        assert_eq!(reprint("assert(x,\"m\");"), "assert(x, \"m\");\n");
        assert_eq!(reprint("for(i=[0:3])let(r=i)sphere(r);"), "for (i = [0 : 3]) let (r = i) sphere(r);\n");
        assert_eq!(reprint("union(){}"), "union() {}\n");
    }
}
