//! Errors raised while building diagrams.

use thiserror::Error;

use crate::reference::Ref;
use crate::types::Var;

/// Everything that can go wrong while constructing or comparing diagrams.
///
/// Construction is deterministic, so none of these are retryable: a failed
/// build is simply abandoned. Nodes canonicalized before the failure stay in
/// the session's table, unreferenced.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum BddError {
    /// A terminal was requested with a value other than 0 or 1.
    #[error("invalid terminal value {0}, expected 0 or 1")]
    InvalidTerminal(u32),

    /// A token that is not one of `NOT`, `AND`, `OR`, `XOR`, `NAND`, `NOR`.
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    /// A postfix stream or expression tree that does not describe exactly one formula.
    #[error("malformed expression: {0}")]
    MalformedExpression(String),

    /// A variable name missing from the session's ordering.
    #[error("unknown variable '{0}'")]
    UnknownVariable(String),

    /// The same name appears twice in an ordering.
    #[error("duplicate variable '{0}' in ordering")]
    DuplicateVariable(String),

    /// A decision node whose child tests a variable that does not come later in the ordering.
    #[error("ordering violation: node on {parent} has a child on {child}")]
    OrderingViolation { parent: Var, child: Var },

    /// A reference that does not point into this session's node table.
    #[error("reference {0} does not belong to this session")]
    InvalidRef(Ref),
}

pub type Result<T, E = BddError> = std::result::Result<T, E>;
