//! Boolean expression trees.
//!
//! An [`Expr`] is the input of the diagram builder. It can be written by hand
//! with the constructors below, or parsed from postfix notation (see
//! [`parser`][crate::parser]):
//!
//! ```
//! use robdd_equiv::expr::Expr;
//!
//! let by_hand = Expr::not(Expr::and(Expr::var("A"), Expr::var("B")));
//! let parsed: Expr = "A B AND NOT".parse().unwrap();
//! assert_eq!(by_hand, parsed);
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::mem;

use crate::error::Result;
use crate::op::Operator;

/// An expression tree.
///
/// Every traversal below runs on an explicit stack, dropping included, so
/// trees of any depth are safe to handle.
#[derive(Debug)]
pub enum Expr {
    /// Constant leaf, `0` or `1`.
    Const(bool),
    /// Variable leaf.
    Var(String),
    /// Negation.
    Not(Box<Expr>),
    /// Binary operator applied to the left and right operands.
    Binary(Operator, Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn constant(value: bool) -> Self {
        Expr::Const(value)
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(value: Self) -> Self {
        Expr::Not(Box::new(value))
    }

    pub fn binary(op: Operator, lhs: Self, rhs: Self) -> Self {
        Expr::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    pub fn and(lhs: Self, rhs: Self) -> Self {
        Expr::binary(Operator::And, lhs, rhs)
    }

    pub fn or(lhs: Self, rhs: Self) -> Self {
        Expr::binary(Operator::Or, lhs, rhs)
    }

    pub fn xor(lhs: Self, rhs: Self) -> Self {
        Expr::binary(Operator::Xor, lhs, rhs)
    }

    pub fn nand(lhs: Self, rhs: Self) -> Self {
        Expr::binary(Operator::Nand, lhs, rhs)
    }

    pub fn nor(lhs: Self, rhs: Self) -> Self {
        Expr::binary(Operator::Nor, lhs, rhs)
    }

    /// All nodes of the tree in post-order: left operand, right operand, operator.
    fn post_order(&self) -> Vec<&Expr> {
        let mut order = Vec::new();
        let mut stack = vec![self];
        while let Some(expr) = stack.pop() {
            order.push(expr);
            match expr {
                Expr::Const(_) | Expr::Var(_) => {}
                Expr::Not(e) => stack.push(e),
                Expr::Binary(_, l, r) => {
                    stack.push(l);
                    stack.push(r);
                }
            }
        }
        order.reverse();
        order
    }

    /// Names of all variables occurring in the expression, sorted.
    pub fn variables(&self) -> BTreeSet<&str> {
        self.post_order()
            .into_iter()
            .filter_map(|expr| match expr {
                Expr::Var(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        self.post_order().len()
    }

    /// Evaluate the expression directly, looking up variables with `valuation`.
    pub fn eval<F>(&self, valuation: &F) -> Result<bool>
    where
        F: Fn(&str) -> Result<bool>,
    {
        let mut values: Vec<bool> = Vec::new();
        for expr in self.post_order() {
            let value = match expr {
                Expr::Const(value) => *value,
                Expr::Var(name) => valuation(name)?,
                Expr::Not(_) => {
                    let a = values.pop().ok_or_else(|| Operator::Not.arity_error())?;
                    Operator::Not.eval(a, None)?
                }
                Expr::Binary(op, _, _) => match (values.pop(), values.pop()) {
                    (Some(b), Some(a)) => op.eval(a, Some(b))?,
                    _ => return Err(op.arity_error()),
                },
            };
            values.push(value);
        }
        values.pop().ok_or_else(|| Operator::Not.arity_error())
    }

    /// Tokens of the expression in postfix order.
    pub fn to_postfix(&self) -> Vec<String> {
        self.post_order()
            .into_iter()
            .map(|expr| match expr {
                Expr::Const(value) => (if *value { "1" } else { "0" }).to_string(),
                Expr::Var(name) => name.clone(),
                Expr::Not(_) => Operator::Not.to_string(),
                Expr::Binary(op, _, _) => op.to_string(),
            })
            .collect()
    }

    /// Detach the operands, leaving constant leaves in their place.
    fn take_operands(&mut self, into: &mut Vec<Expr>) {
        match self {
            Expr::Const(_) | Expr::Var(_) => {}
            Expr::Not(e) => into.push(mem::replace(&mut **e, Expr::Const(false))),
            Expr::Binary(_, l, r) => {
                into.push(mem::replace(&mut **l, Expr::Const(false)));
                into.push(mem::replace(&mut **r, Expr::Const(false)));
            }
        }
    }
}

impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_operands(&mut pending);
        // Each popped node is emptied before it goes out of scope.
        while let Some(mut expr) = pending.pop() {
            expr.take_operands(&mut pending);
        }
    }
}

impl Clone for Expr {
    fn clone(&self) -> Self {
        let mut built: Vec<Expr> = Vec::new();
        for expr in self.post_order() {
            let copy = match expr {
                Expr::Const(value) => Expr::Const(*value),
                Expr::Var(name) => Expr::Var(name.clone()),
                Expr::Not(_) => {
                    let e = built.pop().unwrap_or(Expr::Const(false));
                    Expr::not(e)
                }
                Expr::Binary(op, _, _) => {
                    let r = built.pop().unwrap_or(Expr::Const(false));
                    let l = built.pop().unwrap_or(Expr::Const(false));
                    Expr::binary(*op, l, r)
                }
            };
            built.push(copy);
        }
        built.pop().unwrap_or(Expr::Const(false))
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some(pair) = stack.pop() {
            match pair {
                (Expr::Const(a), Expr::Const(b)) if a == b => {}
                (Expr::Var(a), Expr::Var(b)) if a == b => {}
                (Expr::Not(a), Expr::Not(b)) => stack.push((&**a, &**b)),
                (Expr::Binary(p, la, ra), Expr::Binary(q, lb, rb)) if p == q => {
                    stack.push((&**la, &**lb));
                    stack.push((&**ra, &**rb));
                }
                _ => return false,
            }
        }
        true
    }
}

impl Eq for Expr {}

enum Piece<'a> {
    Expr(&'a Expr),
    Text(&'static str),
    Op(Operator),
}

/// Infix rendering with every binary node parenthesized.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![Piece::Expr(self)];
        while let Some(piece) = stack.pop() {
            match piece {
                Piece::Text(text) => f.write_str(text)?,
                Piece::Op(op) => write!(f, " {} ", op)?,
                Piece::Expr(Expr::Const(value)) => write!(f, "{}", *value as u8)?,
                Piece::Expr(Expr::Var(name)) => f.write_str(name)?,
                Piece::Expr(Expr::Not(e)) => {
                    f.write_str("NOT ")?;
                    stack.push(Piece::Expr(e));
                }
                Piece::Expr(Expr::Binary(op, l, r)) => {
                    f.write_str("(")?;
                    stack.push(Piece::Text(")"));
                    stack.push(Piece::Expr(r));
                    stack.push(Piece::Op(*op));
                    stack.push(Piece::Expr(l));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BddError;

    fn example() -> Expr {
        // (A AND B) OR NOT C
        Expr::or(
            Expr::and(Expr::var("A"), Expr::var("B")),
            Expr::not(Expr::var("C")),
        )
    }

    #[test]
    fn test_display() {
        assert_eq!(example().to_string(), "((A AND B) OR NOT C)");
        assert_eq!(Expr::constant(true).to_string(), "1");
    }

    #[test]
    fn test_postfix() {
        assert_eq!(
            example().to_postfix(),
            ["A", "B", "AND", "C", "NOT", "OR"]
        );
    }

    #[test]
    fn test_variables_and_size() {
        let e = example();
        assert_eq!(e.variables().into_iter().collect::<Vec<_>>(), ["A", "B", "C"]);
        assert_eq!(e.size(), 6);
    }

    #[test]
    fn test_eval() {
        let e = example();
        let valuation = |a: bool, b: bool, c: bool| {
            move |name: &str| match name {
                "A" => Ok(a),
                "B" => Ok(b),
                "C" => Ok(c),
                _ => Err(BddError::UnknownVariable(name.to_string())),
            }
        };
        assert_eq!(e.eval(&valuation(true, true, true)), Ok(true));
        assert_eq!(e.eval(&valuation(false, true, true)), Ok(false));
        assert_eq!(e.eval(&valuation(false, false, false)), Ok(true));

        let unknown = Expr::var("Z");
        assert!(unknown.eval(&valuation(true, true, true)).is_err());
    }

    #[test]
    fn test_clone_and_eq() {
        let e = example();
        assert_eq!(e.clone(), e);
        assert_ne!(Expr::and(Expr::var("A"), Expr::var("B")), Expr::or(Expr::var("A"), Expr::var("B")));
        assert_ne!(Expr::not(Expr::var("A")), Expr::var("A"));
        assert_ne!(Expr::constant(true), Expr::constant(false));
    }

    /// Left-nested `((A XOR B) XOR A) XOR ...` with `depth` operators.
    fn deep(depth: usize) -> Expr {
        let mut e = Expr::var("A");
        for i in 0..depth {
            e = Expr::xor(e, Expr::var(if i % 2 == 0 { "B" } else { "A" }));
        }
        e
    }

    #[test]
    fn test_deep_tree() {
        let depth = 200_000;
        let e = deep(depth);

        assert_eq!(e.size(), 2 * depth + 1);
        assert_eq!(e.to_postfix().len(), 2 * depth + 1);
        assert_eq!(e.variables().len(), 2);
        assert!(e.to_string().starts_with("(((("));

        let valuation = |name: &str| -> Result<bool> { Ok(name == "A") };
        assert_eq!(e.eval(&valuation), Ok(true));

        let copy = e.clone();
        assert!(copy == e);
        drop(copy);
        // `e` is dropped here as well.
    }
}
