//! # Operator Transformation
//!
//! Transforms unary, binary and ternary expressions. Precedence and
//! associativity are already settled by the CST's nesting.

use super::{required, Converter};
use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::cst::SyntaxNode;
use crate::error::ParseError;

impl<'s> Converter<'s> {
    /// `left op right`
    pub(crate) fn convert_binary<N: SyntaxNode>(&mut self, node: &N) -> Result<Expr, ParseError> {
        let op_node = required(node, "operator")?;
        let symbol = op_node.text(self.source);
        let op = BinaryOp::from_str(symbol)
            .ok_or_else(|| ParseError::syntax(format!("unknown binary operator '{symbol}'"), op_node.span()))?;

        let left = self.convert_expr(required(node, "left")?)?;
        let right = self.convert_expr(required(node, "right")?)?;

        Ok(Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
            span: node.span(),
        })
    }

    /// `op operand` for `!`, `-` and `+`.
    pub(crate) fn convert_unary<N: SyntaxNode>(&mut self, node: &N) -> Result<Expr, ParseError> {
        let op_node = required(node, "operator")?;
        let symbol = op_node.text(self.source);
        let op = UnaryOp::from_str(symbol)
            .ok_or_else(|| ParseError::syntax(format!("unknown unary operator '{symbol}'"), op_node.span()))?;

        Ok(Expr::Unary {
            op,
            operand: Box::new(self.convert_expr(required(node, "operand")?)?),
            span: node.span(),
        })
    }

    /// `cond ? then : else`
    pub(crate) fn convert_ternary<N: SyntaxNode>(&mut self, node: &N) -> Result<Expr, ParseError> {
        let cond = self.convert_expr(required(node, "condition")?)?;
        let then_branch = self.convert_expr(required(node, "consequence")?)?;
        let else_branch = self.convert_expr(required(node, "alternative")?)?;

        Ok(Expr::Ternary {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
            span: node.span(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::parse;

    fn value_of(source: &str) -> Expr {
        match parse(source).unwrap().items.remove(0) {
            Item::VarDecl(decl) => decl.value_expr,
            other => panic!("expected declaration, got {other:?}"),
        }
    }

    #[test]
    fn test_precedence_nesting() {
        let Expr::Binary { op, right, .. } = value_of("x = 1 + 2 * 3;") else {
            panic!("expected binary");
        };
        assert_eq!(op, BinaryOp::Add);
        assert!(matches!(*right, Expr::Binary { op: BinaryOp::Mul, .. }));
    }

    #[test]
    fn test_power_is_right_associative() {
        let Expr::Binary { op, left, right, .. } = value_of("x = 2 ^ 3 ^ 2;") else {
            panic!("expected binary");
        };
        assert_eq!(op, BinaryOp::Pow);
        assert_eq!(left.as_number(), Some(2.0));
        assert!(matches!(*right, Expr::Binary { op: BinaryOp::Pow, .. }));
    }

    #[test]
    fn test_negation_wraps_power() {
        let Expr::Unary { op, operand, .. } = value_of("x = -2 ^ 2;") else {
            panic!("expected unary");
        };
        assert_eq!(op, UnaryOp::Neg);
        assert!(matches!(*operand, Expr::Binary { op: BinaryOp::Pow, .. }));
    }

    #[test]
    fn test_logical_and_comparison() {
        let Expr::Binary { op, left, .. } = value_of("x = a < b && !c || d;") else {
            panic!("expected binary");
        };
        assert_eq!(op, BinaryOp::Or);
        let Expr::Binary { op, left, right, .. } = *left else {
            panic!("expected and");
        };
        assert_eq!(op, BinaryOp::And);
        assert!(matches!(*left, Expr::Binary { op: BinaryOp::Lt, .. }));
        assert!(matches!(*right, Expr::Unary { op: UnaryOp::Not, .. }));
    }

    #[test]
    fn test_ternary() {
        let Expr::Ternary { else_branch, .. } = value_of("x = a ? 1 : b ? 2 : 3;") else {
            panic!("expected ternary");
        };
        assert!(matches!(*else_branch, Expr::Ternary { .. }));
    }
}
