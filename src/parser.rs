//! Postfix (reverse Polish) parser for boolean expressions.
//!
//! Tokens are `NOT`, `AND`, `OR`, `XOR`, `NAND`, `NOR`, the constants `0` and
//! `1`, and variable names (any other token). Operands are pushed on a stack;
//! an operator pops its operands and pushes the combined expression. For
//! binary operators the most recently pushed operand is the right one:
//!
//! ```
//! use robdd_equiv::expr::Expr;
//! use robdd_equiv::parser::parse_postfix;
//!
//! let e = parse_postfix(["A", "B", "OR", "C", "AND"]).unwrap();
//! assert_eq!(e, Expr::and(Expr::or(Expr::var("A"), Expr::var("B")), Expr::var("C")));
//! ```

use std::str::FromStr;

use log::debug;

use crate::error::{BddError, Result};
use crate::expr::Expr;
use crate::op::Operator;

/// Parse a single postfix token stream into an expression tree.
///
/// Fails with [`BddError::MalformedExpression`] if an operator finds too few
/// operands on the stack, or if the stream does not leave exactly one
/// expression behind.
pub fn parse_postfix<'a, I>(tokens: I) -> Result<Expr>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut stack: Vec<Expr> = Vec::new();

    for token in tokens {
        let expr = match Operator::from_str(token) {
            Ok(op) if stack.len() < op.arity() => return Err(underflow(op, stack.len())),
            Ok(Operator::Not) => Expr::not(stack.pop().ok_or_else(|| underflow(Operator::Not, 0))?),
            Ok(op) => match (stack.pop(), stack.pop()) {
                (Some(rhs), Some(lhs)) => Expr::binary(op, lhs, rhs),
                _ => return Err(underflow(op, 1)),
            },
            Err(_) => match token {
                "0" => Expr::Const(false),
                "1" => Expr::Const(true),
                name => Expr::var(name),
            },
        };
        stack.push(expr);
    }

    debug!("parse_postfix: {} item(s) left on the stack", stack.len());
    match stack.len() {
        1 => Ok(stack.remove(0)),
        0 => Err(BddError::MalformedExpression("empty expression".to_string())),
        n => Err(BddError::MalformedExpression(format!(
            "{} operands left without an operator",
            n
        ))),
    }
}

fn underflow(op: Operator, found: usize) -> BddError {
    BddError::MalformedExpression(format!(
        "'{}' needs {} operand(s), found {}",
        op,
        op.arity(),
        found
    ))
}

/// Parse whitespace-separated postfix tokens, e.g. `"A B AND NOT"`.
impl FromStr for Expr {
    type Err = BddError;

    fn from_str(s: &str) -> Result<Self> {
        parse_postfix(s.split_whitespace())
    }
}
