use crate::reference::Ref;
use crate::types::Var;
use crate::utils::{pairing3, MyHash};

/// A node of a decision diagram.
///
/// Nodes are immutable once stored; children are referenced by arena index.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Node {
    /// Constant leaf, 0 or 1.
    Terminal(bool),
    /// Test of `variable`: follow `low` when it is 0, `high` when it is 1.
    Decision { variable: Var, low: Ref, high: Ref },
}

impl Node {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Node::Terminal(_))
    }

    /// The tested variable, `None` for terminals.
    pub fn variable(&self) -> Option<Var> {
        match *self {
            Node::Terminal(_) => None,
            Node::Decision { variable, .. } => Some(variable),
        }
    }

    /// The terminal value, `None` for decision nodes.
    pub fn value(&self) -> Option<bool> {
        match *self {
            Node::Terminal(value) => Some(value),
            Node::Decision { .. } => None,
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::Terminal(false)
    }
}

impl MyHash for Node {
    fn hash(&self) -> u64 {
        match *self {
            Node::Terminal(value) => value as u64,
            Node::Decision { variable, low, high } => pairing3(
                variable.id() as u64 + 1,
                low.get() as u64,
                high.get() as u64,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_accessors() {
        let node = Node::Decision {
            variable: Var::new(2),
            low: Ref::ZERO,
            high: Ref::ONE,
        };
        assert!(!node.is_terminal());
        assert_eq!(node.variable(), Some(Var::new(2)));
        assert_eq!(node.value(), None);

        let leaf = Node::Terminal(true);
        assert!(leaf.is_terminal());
        assert_eq!(leaf.variable(), None);
        assert_eq!(leaf.value(), Some(true));
    }

    #[test]
    fn test_node_hash_distinguishes_children() {
        let a = Node::Decision {
            variable: Var::new(0),
            low: Ref::ZERO,
            high: Ref::ONE,
        };
        let b = Node::Decision {
            variable: Var::new(0),
            low: Ref::ONE,
            high: Ref::ZERO,
        };
        assert_ne!(MyHash::hash(&a), MyHash::hash(&b));
    }
}
