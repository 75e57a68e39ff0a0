//! The `apply` algorithm.
//!
//! Composes diagrams under a boolean operator by simultaneous Shannon
//! expansion on the topmost variable of the operands:
//!
//! ```text
//! f op g = ite(x, f|x=1 op g|x=1, f|x=0 op g|x=0)
//! ```
//!
//! where `x` is the earliest variable (in the session's ordering) tested at
//! the root of `f` or `g`. An operand whose root does not test `x` is its own
//! cofactor. When both operands are terminals, the operator's truth table
//! gives the answer directly.
//!
//! Every `(operator, f, g)` triple is computed at most once per session: the
//! result is stored in the computed table before the triple is left. Thus
//! for operands of `m` and `n` nodes there are at most `m·n` computations.
//!
//! The expansion is driven by an explicit stack instead of native recursion,
//! so the call stack stays flat no matter how many variables are involved.

use log::debug;

use crate::cache::OpKey;
use crate::error::Result;
use crate::node::Node;
use crate::op::Operator;
use crate::reference::Ref;
use crate::session::Session;
use crate::types::Var;

enum Frame {
    /// Compute the result for the key (or fetch it from the cache).
    Expand(OpKey),
    /// Both cofactor results are on the result stack; join them at `Var`.
    Combine(OpKey, Var),
}

enum Expansion {
    Leaf(Ref),
    Branch { variable: Var, low: OpKey, high: OpKey },
}

impl Session {
    /// Return the cofactors of `node` with respect to `v`, which must not
    /// come after the variable at the root of `node`.
    fn top_cofactors(&self, node: Ref, v: Var) -> (Ref, Ref) {
        match self.node(node) {
            Node::Decision { variable, low, high } if variable == v => (low, high),
            _ => (node, node),
        }
    }

    fn expand(&self, key: OpKey) -> Result<Expansion> {
        let OpKey { op, f, g } = key;

        let g = match g {
            None => {
                return Ok(match self.node(f) {
                    Node::Terminal(a) => Expansion::Leaf(Ref::constant(op.eval(a, None)?)),
                    Node::Decision { variable, low, high } => Expansion::Branch {
                        variable,
                        low: OpKey::new(op, low, None),
                        high: OpKey::new(op, high, None),
                    },
                })
            }
            Some(g) => g,
        };

        let m = match (self.node(f), self.node(g)) {
            (Node::Terminal(a), Node::Terminal(b)) => {
                return Ok(Expansion::Leaf(Ref::constant(op.eval(a, Some(b))?)));
            }
            (Node::Terminal(_), Node::Decision { variable, .. }) => variable,
            (Node::Decision { variable, .. }, Node::Terminal(_)) => variable,
            (Node::Decision { variable: i, .. }, Node::Decision { variable: j, .. }) => i.min(j),
        };
        debug!("min variable = {}", m);

        let (f0, f1) = self.top_cofactors(f, m);
        let (g0, g1) = self.top_cofactors(g, m);

        Ok(Expansion::Branch {
            variable: m,
            low: OpKey::new(op, f0, Some(g0)),
            high: OpKey::new(op, f1, Some(g1)),
        })
    }

    /// Apply `op` to `f` (and `g`, for binary operators).
    ///
    /// # Examples
    ///
    /// ```
    /// use robdd_equiv::op::Operator;
    /// use robdd_equiv::session::Session;
    ///
    /// let s = Session::new("A B".parse().unwrap());
    /// let a = s.mk_var("A").unwrap();
    /// let b = s.mk_var("B").unwrap();
    /// let f = s.apply(Operator::Nand, a, Some(b)).unwrap();
    /// let na = s.apply(Operator::Not, a, None).unwrap();
    /// let nb = s.apply(Operator::Not, b, None).unwrap();
    /// assert_eq!(f, s.apply(Operator::Or, na, Some(nb)).unwrap());
    /// ```
    pub fn apply(&self, op: Operator, f: Ref, g: Option<Ref>) -> Result<Ref> {
        debug!("apply(op = {}, f = {}, g = {:?})", op, f, g);

        if op.arity() != 1 + g.is_some() as usize {
            return Err(op.arity_error());
        }
        self.try_node(f)?;
        if let Some(g) = g {
            self.try_node(g)?;
        }

        let mut stack = vec![Frame::Expand(OpKey::new(op, f, g))];
        let mut results: Vec<Ref> = Vec::new();

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Expand(key) => {
                    let cached = self.cache.borrow_mut().get(&key).copied();
                    if let Some(res) = cached {
                        debug!("cache: {:?} -> {}", key, res);
                        results.push(res);
                        continue;
                    }
                    match self.expand(key)? {
                        Expansion::Leaf(res) => {
                            debug!("computed: {:?} -> {}", key, res);
                            self.cache.borrow_mut().insert(key, res);
                            results.push(res);
                        }
                        Expansion::Branch { variable, low, high } => {
                            // Low cofactor is popped (and thus finished) first.
                            stack.push(Frame::Combine(key, variable));
                            stack.push(Frame::Expand(high));
                            stack.push(Frame::Expand(low));
                        }
                    }
                }
                Frame::Combine(key, variable) => {
                    let n = results.len();
                    let (low, high) = (results[n - 2], results[n - 1]);
                    results.truncate(n - 2);
                    let res = self.mk_node(variable, low, high)?;
                    debug!("computed: {:?} -> {}", key, res);
                    self.cache.borrow_mut().insert(key, res);
                    results.push(res);
                }
            }
        }

        debug_assert_eq!(results.len(), 1);
        Ok(results[0])
    }

    pub fn apply_not(&self, f: Ref) -> Result<Ref> {
        self.apply(Operator::Not, f, None)
    }

    pub fn apply_and(&self, f: Ref, g: Ref) -> Result<Ref> {
        self.apply(Operator::And, f, Some(g))
    }

    pub fn apply_or(&self, f: Ref, g: Ref) -> Result<Ref> {
        self.apply(Operator::Or, f, Some(g))
    }

    pub fn apply_xor(&self, f: Ref, g: Ref) -> Result<Ref> {
        self.apply(Operator::Xor, f, Some(g))
    }

    pub fn apply_nand(&self, f: Ref, g: Ref) -> Result<Ref> {
        self.apply(Operator::Nand, f, Some(g))
    }

    pub fn apply_nor(&self, f: Ref, g: Ref) -> Result<Ref> {
        self.apply(Operator::Nor, f, Some(g))
    }
}
