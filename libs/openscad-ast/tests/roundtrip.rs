//! `parse(print(ast))` must reproduce `ast` up to spans, for hand-written
//! programs and for randomly generated ones.

use indoc::indoc;
use openscad_ast::{parse, print, print_with, SpanlessEq};
use config::constants::PrinterConfig;
use quickcheck::{Arbitrary, Gen, QuickCheck, TestResult};

fn assert_roundtrip(source: &str) {
    let ast = parse(source).unwrap_or_else(|err| panic!("{err}\n{source}"));
    let printed = print(&ast);
    let again = parse(&printed).unwrap_or_else(|err| panic!("{err}\n{printed}"));
    assert!(ast.spanless_eq(&again), "round trip changed the tree:\n{printed}");
    assert_eq!(print(&again), printed, "printing is not a fixed point");
}

#[test]
fn statements_roundtrip() {
    assert_roundtrip(indoc! {r#"
        include <lib/shapes.scad>
        use <util.scad>
        $fn = 48;
        size = [10, 20, 30];
        module box(s = size, center = false) {
          cube(s, center = center);
          children();
        }
        function area(w, h = 1) = w * h;
        difference() {
          box();
          #translate([1, 1, -1]) cylinder(r = 2, h = 40);
          !%*sphere(5);
        }
        for (i = [0 : 2 : 10], j = [1, 2]) translate([i, j, 0]) cube(1);
        intersection_for(a = [0, 90]) rotate(a) cube(5, true);
        if (size[0] > 5) cube(1); else if (size[1] > 5) sphere(1); else ;
        let (w = 2, h = w * 2) square([w, h]);
        assign(r = 3) circle(r);
        assert(true, "always") cube(1);
        assert(size != undef);
        assert(message = "named", condition = ok);
        assert(a, condition = b, extra) sphere(1);
        { cube(1); }
        ;
    "#});
}

#[test]
fn expressions_roundtrip() {
    assert_roundtrip(indoc! {r#"
        a = -1 + +2 * 3 ^ 2 % 4 - !true;
        b = (1 + 2) * 3;
        c = a < b && b <= 3 || a >= b && a > 0 || a == b || a != b;
        d = c ? "yes" : a ? "maybe" : "no";
        e = size.x + size[1] + f(1, z = 2)(3)[0];
        g = let (p = 1, q = p + 1) p * q;
        h = assert(g > 0, "positive") echo("g", g) g;
        i = function (x, y = 2) x + y;
        j = [1 : 5];
        k = [0 : 0.5 : 2];
        l = "quote \" back \\ tab \t line \n done";
        m = [];
        n = 1e400;
        o = 1.5.x;
        p = $fn + $t;
    "#});
}

#[test]
fn comprehensions_roundtrip() {
    assert_roundtrip(indoc! {r#"
        a = [for (i = [0 : 3]) i * i];
        b = [for (i = [0 : 3]) if (i % 2 == 0) i];
        c = [for (i = [0 : 3]) if (i > 1) i else -i];
        d = [for (i = [0 : 3]) let (j = i + 1) for (k = [0 : j]) [i, k]];
        e = [for (i = 0; i < 4; i = i + 1) i];
        f = [each [1, 2], if (true) 3, let (x = 4) x, 5];
        g = [for (i = [0 : 2]) each [i, i]];
        h = [for (i = [1, 2]) if (i > 1) if (i > 2) i else 0];
    "#});
}

#[test]
fn context_survives_roundtrip() {
    let source = "module m(a) cube(a); module m(b) sphere(b); function f() = 1; $fn = 8; $fn = 16;";
    let ast = parse(source).unwrap();
    let again = parse(&print(&ast)).unwrap();
    assert!(ast.context.spanless_eq(&again.context));
    assert_eq!(again.context.modules["m"].params[0].name.as_str(), "b");
}

#[test]
fn custom_indent_roundtrips() {
    let source = "union() { difference() { cube(2); sphere(1); } }";
    let ast = parse(source).unwrap();
    let config = PrinterConfig::new(4, false).unwrap();
    let printed = print_with(&ast, &config);
    assert!(!printed.ends_with('\n'));
    assert!(ast.spanless_eq(&parse(&printed).unwrap()));
}

// =============================================================================
// GENERATED PROGRAMS
// =============================================================================

/// A random OpenSCAD program built from a small grammar. Generated text is
/// usually valid; the rest is discarded by the property.
#[derive(Clone, Debug)]
struct Program(String);

impl Arbitrary for Program {
    fn arbitrary(g: &mut Gen) -> Self {
        let count = below(g, 4) + 1;
        let items: Vec<_> = (0..count).map(|_| item(g, 3)).collect();
        Program(items.join("\n"))
    }
}

fn below(g: &mut Gen, n: usize) -> usize {
    usize::arbitrary(g) % n
}

fn pick(g: &mut Gen, options: &[&str]) -> String {
    g.choose(options).copied().unwrap_or(options[0]).to_string()
}

fn ident(g: &mut Gen) -> String {
    pick(g, &["a", "b", "size", "r", "v"])
}

fn atom(g: &mut Gen) -> String {
    match below(g, 6) {
        0 => pick(g, &["0", "1", "2.5", ".5", "10", "1e3", "3."]),
        1 => pick(g, &[r#""""#, r#""text""#, r#""a\"b""#, r#""tab\there""#, r#""\x41""#]),
        2 => pick(g, &["true", "false", "undef"]),
        3 => pick(g, &["$fn", "$t", "$children"]),
        _ => ident(g),
    }
}

fn expr(g: &mut Gen, depth: usize) -> String {
    if depth == 0 {
        return atom(g);
    }
    let d = depth - 1;
    match below(g, 14) {
        0 | 1 => {
            let op = pick(g, &["+", "-", "*", "/", "%", "^", "<", "<=", "==", "!=", "&&", "||"]);
            format!("{} {op} {}", expr(g, d), expr(g, d))
        }
        2 => {
            let op = pick(g, &["-", "!", "+"]);
            if bool::arbitrary(g) {
                format!("{op}{}", atom(g))
            } else {
                format!("{op}({})", expr(g, d))
            }
        }
        3 => format!("{} ? {} : {}", expr(g, d), expr(g, d), expr(g, d)),
        4 => format!("({})", expr(g, d)),
        5 => format!("{}({})", ident(g), args(g, d)),
        6 => format!("{}[{}]", ident(g), expr(g, d)),
        7 => format!("{}.{}", ident(g), pick(g, &["x", "y", "z"])),
        8 => {
            let count = below(g, 4);
            let elements: Vec<_> = (0..count).map(|_| expr(g, d)).collect();
            format!("[{}]", elements.join(", "))
        }
        9 => {
            if bool::arbitrary(g) {
                format!("[{} : {}]", atom(g), atom(g))
            } else {
                format!("[{} : {} : {}]", atom(g), atom(g), atom(g))
            }
        }
        10 => format!("let ({}) {}", assignments(g, d), expr(g, d)),
        11 => format!("[{}]", comprehension(g, d)),
        12 => format!("function ({}) {}", params(g, d), expr(g, d)),
        _ => atom(g),
    }
}

fn comprehension(g: &mut Gen, depth: usize) -> String {
    let head = if below(g, 4) == 0 {
        "for (i = 0; i < 3; i = i + 1)".to_string()
    } else {
        format!("for ({})", assignments(g, depth))
    };
    format!("{head} {}", comp_body(g, depth))
}

fn comp_body(g: &mut Gen, depth: usize) -> String {
    if depth == 0 {
        return atom(g);
    }
    let d = depth - 1;
    match below(g, 7) {
        0 => format!("if ({}) {}", expr(g, d), comp_body(g, d)),
        1 => format!("if ({}) {} else {}", expr(g, d), expr(g, d), expr(g, d)),
        2 => format!("let ({}) {}", assignments(g, d), comp_body(g, d)),
        3 => format!("each {}", expr(g, d)),
        4 => comprehension(g, d),
        _ => expr(g, d),
    }
}

fn args(g: &mut Gen, depth: usize) -> String {
    let count = below(g, 3);
    let args: Vec<_> = (0..count)
        .map(|_| {
            if bool::arbitrary(g) {
                format!("{} = {}", ident(g), expr(g, depth))
            } else {
                expr(g, depth)
            }
        })
        .collect();
    args.join(", ")
}

fn assignments(g: &mut Gen, depth: usize) -> String {
    let count = below(g, 2) + 1;
    let binds: Vec<_> = (0..count)
        .map(|_| format!("{} = {}", ident(g), expr(g, depth)))
        .collect();
    binds.join(", ")
}

fn params(g: &mut Gen, depth: usize) -> String {
    let count = below(g, 3);
    let params: Vec<_> = (0..count)
        .map(|_| {
            if bool::arbitrary(g) {
                format!("{} = {}", ident(g), expr(g, depth))
            } else {
                ident(g)
            }
        })
        .collect();
    params.join(", ")
}

fn item(g: &mut Gen, depth: usize) -> String {
    match below(g, 8) {
        0 => format!("{} = {};", ident(g), expr(g, depth)),
        1 => format!("$fn = {};", expr(g, depth)),
        2 => format!("module {}({}) {}", ident(g), params(g, depth), stmt(g, depth)),
        3 => format!("function {}({}) = {};", ident(g), params(g, depth), expr(g, depth)),
        4 => pick(g, &["include <a.scad>", "use <lib/b.scad>"]),
        _ => stmt(g, depth),
    }
}

fn stmt(g: &mut Gen, depth: usize) -> String {
    if depth == 0 {
        return format!("{}({});", pick(g, &["cube", "sphere", "children"]), args(g, 0));
    }
    let d = depth - 1;
    match below(g, 12) {
        0 => format!("translate([{}, 0, 0]) {}", expr(g, d), stmt(g, d)),
        1 => {
            let count = below(g, 3);
            let items: Vec<_> = (0..count).map(|_| item(g, d)).collect();
            format!("{}() {{ {} }}", pick(g, &["union", "difference"]), items.join(" "))
        }
        2 => format!("for ({}) {}", assignments(g, d), stmt(g, d)),
        3 => format!("if ({}) {}", expr(g, d), stmt(g, d)),
        4 => format!("if ({}) {} else {}", expr(g, d), stmt(g, d), stmt(g, d)),
        5 => format!("let ({}) {}", assignments(g, d), stmt(g, d)),
        6 => format!("assign({}) {}", assignments(g, d), stmt(g, d)),
        7 => format!("intersection_for({}) {}", assignments(g, d), stmt(g, d)),
        8 => format!("{}{}", pick(g, &["#", "!", "%", "*"]), stmt(g, d)),
        9 => {
            if bool::arbitrary(g) {
                format!("assert({}, \"msg\") {}", expr(g, d), stmt(g, d))
            } else {
                format!("assert({});", expr(g, d))
            }
        }
        10 => ";".to_string(),
        _ => format!("{}({});", pick(g, &["cube", "sphere", "cylinder"]), args(g, d)),
    }
}

fn print_then_parse_is_identity(program: Program) -> TestResult {
    let Ok(ast) = parse(&program.0) else {
        return TestResult::discard();
    };
    let printed = print(&ast);
    match parse(&printed) {
        Ok(again) => TestResult::from_bool(ast.spanless_eq(&again) && print(&again) == printed),
        Err(err) => TestResult::error(format!("{err}\n--- printed ---\n{printed}")),
    }
}

#[test]
fn generated_programs_roundtrip() {
    QuickCheck::new()
        .tests(200)
        .quickcheck(print_then_parse_is_identity as fn(Program) -> TestResult);
}

#[test]
fn generator_mostly_yields_valid_programs() {
    let mut g = Gen::new(10);
    let valid = (0..100)
        .filter(|_| parse(&Program::arbitrary(&mut g).0).is_ok())
        .count();
    assert!(valid > 50, "only {valid} of 100 generated programs parsed");
}
