//! Type-safe wrapper for decision variables.
//!
//! A [`Var`] is the position of a variable in the session's
//! [`VariableOrdering`][crate::ordering::VariableOrdering]. Since the ordering
//! is fixed for the whole session, the position doubles as the variable's
//! identity, and comparing two `Var`s compares their precedence directly.
use std::fmt;

/// A variable, identified by its rank in the ordering (0-indexed).
///
/// # Invariants
///
/// - Rank 0 is the topmost variable (closest to the root)
/// - Ranks increase downward toward the terminals
/// - A decision node's variable is strictly smaller than the variables of its decision children
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(u32);

impl Var {
    /// Creates a variable at the given rank.
    pub const fn new(rank: u32) -> Self {
        Var(rank)
    }

    /// Returns the rank as a `u32`.
    pub const fn id(self) -> u32 {
        self.0
    }

    /// Returns the rank as a `usize`, suitable for indexing.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

impl From<Var> for u32 {
    fn from(var: Var) -> Self {
        var.0
    }
}

impl From<Var> for usize {
    fn from(var: Var) -> Self {
        var.index()
    }
}
