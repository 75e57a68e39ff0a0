//! Building diagrams from expression trees.
//!
//! The tree is first flattened into an arena in breadth-first order, so every
//! node's operands sit at larger indices than the node itself. Folding the
//! arena from the back then visits operands before operators, which builds
//! the diagram bottom-up without recursing on the (possibly deep) tree.

use std::collections::VecDeque;

use log::debug;

use crate::error::Result;
use crate::expr::Expr;
use crate::op::Operator;
use crate::reference::Ref;
use crate::session::Session;

/// One flattened expression node; operands are arena indices.
#[derive(Debug)]
enum Step<'a> {
    Const(bool),
    Var(&'a str),
    Not(usize),
    Binary(Operator, usize, usize),
}

/// Flatten `expr` so that operands always follow their operator.
fn flatten(expr: &Expr) -> Vec<Step<'_>> {
    let mut frontier: VecDeque<&Expr> = VecDeque::from([expr]);
    let mut steps: Vec<Step<'_>> = Vec::new();

    while let Some(expr) = frontier.pop_front() {
        // A queued operand will land at `steps.len() + frontier.len()`.
        let step = match expr {
            Expr::Const(value) => Step::Const(*value),
            Expr::Var(name) => Step::Var(name),
            Expr::Not(e) => {
                frontier.push_back(e);
                Step::Not(steps.len() + frontier.len())
            }
            Expr::Binary(op, l, r) => {
                frontier.push_back(l);
                let l = steps.len() + frontier.len();
                frontier.push_back(r);
                let r = steps.len() + frontier.len();
                Step::Binary(*op, l, r)
            }
        };
        steps.push(step);
    }

    steps
}

impl Session {
    /// Build the diagram of `expr`.
    ///
    /// Constants become terminals, variables become elementary test nodes,
    /// and every operator is applied to the diagrams of its operands.
    ///
    /// # Examples
    ///
    /// ```
    /// use robdd_equiv::expr::Expr;
    /// use robdd_equiv::session::Session;
    ///
    /// let s = Session::new("A B C".parse().unwrap());
    /// let f = s.build(&"A B AND C OR".parse().unwrap()).unwrap();
    /// let g = s.build(&"C A B AND OR".parse().unwrap()).unwrap();
    /// assert_eq!(f, g);
    /// ```
    pub fn build(&self, expr: &Expr) -> Result<Ref> {
        let steps = flatten(expr);
        debug!("build(expr of {} nodes)", steps.len());
        let mut results: Vec<Ref> = vec![Ref::ZERO; steps.len()];

        for (i, step) in steps.iter().enumerate().rev() {
            results[i] = match *step {
                Step::Const(value) => Ref::constant(value),
                Step::Var(name) => self.mk_var(name)?,
                Step::Not(a) => self.apply(Operator::Not, results[a], None)?,
                Step::Binary(op, a, b) => self.apply(op, results[a], Some(results[b]))?,
            };
        }

        debug!("build: -> {}", results[0]);
        Ok(results[0])
    }

    /// Decide whether two expressions denote the same boolean function.
    ///
    /// Both are built in this session, so the answer is a ref comparison.
    pub fn equivalent(&self, lhs: &Expr, rhs: &Expr) -> Result<bool> {
        let f = self.build(lhs)?;
        let g = self.build(rhs)?;
        Ok(f == g)
    }
}
