//! Boolean operators understood by [`apply`][crate::session::Session::apply].

use std::fmt;
use std::str::FromStr;

use crate::error::{BddError, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Operator {
    Not,
    And,
    Or,
    Xor,
    Nand,
    Nor,
}

impl Operator {
    pub const ALL: [Operator; 6] = [
        Operator::Not,
        Operator::And,
        Operator::Or,
        Operator::Xor,
        Operator::Nand,
        Operator::Nor,
    ];

    /// The token naming this operator in postfix input.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Not => "NOT",
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Xor => "XOR",
            Operator::Nand => "NAND",
            Operator::Nor => "NOR",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            Operator::Not => 1,
            _ => 2,
        }
    }

    pub fn is_unary(self) -> bool {
        self.arity() == 1
    }

    /// All binary operators here are symmetric in their operands.
    pub fn is_commutative(self) -> bool {
        !self.is_unary()
    }

    /// Evaluate the truth table on terminal values.
    ///
    /// `b` must be present exactly for binary operators.
    pub fn eval(self, a: bool, b: Option<bool>) -> Result<bool> {
        match (self, b) {
            (Operator::Not, None) => Ok(!a),
            (Operator::And, Some(b)) => Ok(a & b),
            (Operator::Or, Some(b)) => Ok(a | b),
            (Operator::Xor, Some(b)) => Ok(a ^ b),
            (Operator::Nand, Some(b)) => Ok(!(a & b)),
            (Operator::Nor, Some(b)) => Ok(!(a | b)),
            _ => Err(self.arity_error()),
        }
    }

    pub(crate) fn arity_error(self) -> BddError {
        BddError::MalformedExpression(format!(
            "{} expects {} operand{}",
            self,
            self.arity(),
            if self.arity() == 1 { "" } else { "s" }
        ))
    }
}

impl FromStr for Operator {
    type Err = BddError;

    fn from_str(s: &str) -> Result<Self> {
        Operator::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| BddError::UnknownOperator(s.to_string()))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
