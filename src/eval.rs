//! Evaluating diagrams under assignments.
//!
//! Assignments are indexed by variable rank: `assignment[v.index()]` is the
//! value of the variable `v` of the session's ordering.

use crate::node::Node;
use crate::reference::Ref;
use crate::session::Session;
use crate::types::Var;

/// Largest ordering [`Session::truth_table`] enumerates (`2^24` rows).
pub const MAX_TRUTH_TABLE_VARS: usize = 24;

impl Session {
    /// Follow `f` down to a terminal, choosing edges with `valuation`.
    pub fn eval_with<F>(&self, f: Ref, valuation: F) -> bool
    where
        F: Fn(Var) -> bool,
    {
        let mut current = f;
        loop {
            match self.node(current) {
                Node::Terminal(value) => return value,
                Node::Decision { variable, low, high } => {
                    current = if valuation(variable) { high } else { low };
                }
            }
        }
    }

    /// Value of `f` under `assignment`.
    ///
    /// # Panics
    ///
    /// Panics if `assignment` is shorter than the ordering and the walk reaches
    /// a variable it does not cover.
    pub fn eval(&self, f: Ref, assignment: &[bool]) -> bool {
        self.eval_with(f, |v| assignment[v.index()])
    }

    /// All `2^n` values of `f`, where `n` is the number of ordered variables.
    ///
    /// Row `i` assigns bit `k` of `i` to the variable of rank `k`, so the first
    /// variable alternates fastest. Returns `None` when `n` exceeds
    /// [`MAX_TRUTH_TABLE_VARS`]; use [`Session::sat_count`] for such orderings.
    pub fn truth_table(&self, f: Ref) -> Option<Vec<bool>> {
        let n = self.ordering().len();
        if n > MAX_TRUTH_TABLE_VARS {
            return None;
        }

        Some(
            (0..1usize << n)
                .map(|row| self.eval_with(f, |v| (row >> v.index()) & 1 == 1))
                .collect(),
        )
    }
}
