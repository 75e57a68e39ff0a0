//! The construction session: node table, apply cache and variable ordering.
//!
//! Every diagram is built inside a [`Session`]. The session hash-conses its
//! nodes, so two diagrams built in the same session represent the same
//! boolean function exactly when their [`Ref`]s are equal. This is what turns
//! equivalence checking into a single integer comparison.
//!
//! Sessions are independent: each one owns its own table and cache, and refs
//! from one session mean nothing in another. To compare diagrams from two
//! sessions, either rebuild both in one session (preferred), or use
//! [`Session::structurally_equal`].

use std::cell::RefCell;
use std::cmp::min;
use std::collections::{BTreeSet, HashSet};
use std::fmt::Debug;

use log::debug;

use crate::cache::ApplyCache;
use crate::error::{BddError, Result};
use crate::node::Node;
use crate::ordering::VariableOrdering;
use crate::reference::Ref;
use crate::table::Table;
use crate::types::Var;

pub struct Session {
    ordering: VariableOrdering,
    pub(crate) nodes: RefCell<Table<Node>>,
    pub(crate) cache: RefCell<ApplyCache>,
}

impl Session {
    /// Create a session over the given ordering with default capacity.
    pub fn new(ordering: VariableOrdering) -> Self {
        Self::with_capacity(ordering, 16)
    }

    /// Create a session with room for `2^bits` nodes before reallocating.
    ///
    /// `bits` is a sizing hint in `0..=31`; large values are capped when
    /// memory is reserved.
    pub fn with_capacity(ordering: VariableOrdering, bits: usize) -> Self {
        assert!(bits <= 31, "Table bits should be in the range 0..=31");

        let mut nodes = Table::new(bits);

        // Allocate the terminal nodes at their fixed slots:
        let zero = nodes.add(Node::Terminal(false));
        assert_eq!(zero, Ref::ZERO.index());
        let one = nodes.add(Node::Terminal(true));
        assert_eq!(one, Ref::ONE.index());

        Self {
            ordering,
            nodes: RefCell::new(nodes),
            cache: RefCell::new(ApplyCache::new(min(bits, 16))),
        }
    }
}

impl Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cache = self.cache.borrow();
        f.debug_struct("Session")
            .field("ordering", &self.ordering.to_string())
            .field("nodes", &self.nodes.borrow().len())
            .field("cache_entries", &cache.len())
            .field("cache_hits", &cache.hits())
            .field("cache_misses", &cache.misses())
            .finish()
    }
}

// Statistics
impl Session {
    pub fn ordering(&self) -> &VariableOrdering {
        &self.ordering
    }

    /// Number of nodes allocated so far, terminals included.
    pub fn num_nodes(&self) -> usize {
        self.nodes.borrow().len()
    }

    pub fn cache_hits(&self) -> usize {
        self.cache.borrow().hits()
    }

    /// Number of distinct `apply` computations performed so far.
    pub fn cache_misses(&self) -> usize {
        self.cache.borrow().misses()
    }

    pub fn cache_len(&self) -> usize {
        self.cache.borrow().len()
    }
}

// Node table
impl Session {
    pub fn zero(&self) -> Ref {
        Ref::ZERO
    }
    pub fn one(&self) -> Ref {
        Ref::ONE
    }

    /// Return the node behind `node`, or [`BddError::InvalidRef`] if it is not from this session.
    pub fn try_node(&self, node: Ref) -> Result<Node> {
        self.nodes
            .borrow()
            .get(node.index())
            .copied()
            .ok_or(BddError::InvalidRef(node))
    }

    /// Return the canonical terminal for `value`, which must be 0 or 1.
    pub fn mk_terminal(&self, value: u32) -> Result<Ref> {
        match value {
            0 => Ok(Ref::ZERO),
            1 => Ok(Ref::ONE),
            _ => Err(BddError::InvalidTerminal(value)),
        }
    }

    /// Return the unique node testing `v` with the given children.
    ///
    /// Redundant tests are eliminated: when `low == high`, `low` itself is
    /// returned. Otherwise an existing node with the same triple is reused,
    /// or a new one is registered.
    pub fn mk_node(&self, v: Var, low: Ref, high: Ref) -> Result<Ref> {
        debug!("mk(v = {}, low = {}, high = {})", v, low, high);

        if v.index() >= self.ordering.len() {
            return Err(BddError::UnknownVariable(format!("rank {}", v.id())));
        }
        let low_node = self.try_node(low)?;
        let high_node = self.try_node(high)?;

        // Handle duplicates
        if low == high {
            debug!("mk: duplicates {} == {}", low, high);
            return Ok(low);
        }

        for child in [low_node, high_node] {
            if let Some(child_var) = child.variable() {
                if child_var <= v {
                    return Err(BddError::OrderingViolation {
                        parent: v,
                        child: child_var,
                    });
                }
            }
        }

        let i = self.nodes.borrow_mut().put(Node::Decision {
            variable: v,
            low,
            high,
        });
        Ok(Ref::new(i as u32))
    }

    /// Name-level node constructor.
    ///
    /// With no variable, a terminal is requested and its value is taken from
    /// `high`, which must then be a terminal. With a variable name, the name is
    /// resolved through the ordering and the call goes to [`Session::mk_node`].
    pub fn make(&self, variable: Option<&str>, low: Ref, high: Ref) -> Result<Ref> {
        match variable {
            None => match self.try_node(high)? {
                Node::Terminal(value) => self.mk_terminal(value as u32),
                Node::Decision { .. } => Err(BddError::InvalidTerminal(high.get())),
            },
            Some(name) => {
                let v = self.ordering.rank(name)?;
                self.mk_node(v, low, high)
            }
        }
    }

    /// Return the elementary test node for the variable `name`.
    pub fn mk_var(&self, name: &str) -> Result<Ref> {
        self.make(Some(name), Ref::ZERO, Ref::ONE)
    }
}

// Traversal accessors
impl Session {
    /// Return the node behind `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` does not belong to this session.
    pub fn node(&self, node: Ref) -> Node {
        self.nodes.borrow()[node.index()]
    }

    pub fn is_zero(&self, node: Ref) -> bool {
        node == Ref::ZERO
    }
    pub fn is_one(&self, node: Ref) -> bool {
        node == Ref::ONE
    }
    pub fn is_terminal(&self, node: Ref) -> bool {
        self.node(node).is_terminal()
    }

    /// Value of a terminal, `None` for decision nodes.
    pub fn terminal_value(&self, node: Ref) -> Option<bool> {
        self.node(node).value()
    }

    /// Variable tested by a decision node, `None` for terminals.
    pub fn variable(&self, node: Ref) -> Option<Var> {
        self.node(node).variable()
    }

    /// Name of the variable tested by a decision node.
    pub fn variable_name(&self, node: Ref) -> Option<&str> {
        self.variable(node).and_then(|v| self.ordering.name(v))
    }

    /// Child followed when the tested variable is 0.
    pub fn low(&self, node: Ref) -> Option<Ref> {
        match self.node(node) {
            Node::Decision { low, .. } => Some(low),
            Node::Terminal(_) => None,
        }
    }

    /// Child followed when the tested variable is 1.
    pub fn high(&self, node: Ref) -> Option<Ref> {
        match self.node(node) {
            Node::Decision { high, .. } => Some(high),
            Node::Terminal(_) => None,
        }
    }

    /// All nodes reachable from `roots`, terminals included.
    ///
    /// Shared sub-diagrams are visited once.
    pub fn descendants(&self, roots: impl IntoIterator<Item = Ref>) -> BTreeSet<Ref> {
        let mut visited = BTreeSet::new();
        let mut stack: Vec<Ref> = roots.into_iter().collect();

        while let Some(node) = stack.pop() {
            if visited.insert(node) {
                if let Node::Decision { low, high, .. } = self.node(node) {
                    stack.push(low);
                    stack.push(high);
                }
            }
        }

        visited
    }

    /// Number of nodes in the diagram rooted at `f`, terminals included.
    pub fn size(&self, f: Ref) -> usize {
        self.descendants([f]).len()
    }

    pub fn to_bracket_string(&self, node: Ref) -> String {
        match self.node(node) {
            Node::Terminal(false) => "(0)".to_string(),
            Node::Terminal(true) => "(1)".to_string(),
            Node::Decision { variable, low, high } => format!(
                "{}:({}, {}, {})",
                node,
                self.ordering.name(variable).unwrap_or("?"),
                self.to_bracket_string(high),
                self.to_bracket_string(low)
            ),
        }
    }

    /// Compare `f` from this session with `g` from `other` by structure.
    ///
    /// Decision nodes match when they test variables of the same name and
    /// their children match pairwise. Each node pair is compared once, but the
    /// cost still grows with the size of the diagrams; when possible, build
    /// both expressions in one session and compare refs instead.
    pub fn structurally_equal(&self, f: Ref, other: &Session, g: Ref) -> bool {
        let mut visited = HashSet::new();
        let mut stack = vec![(f, g)];

        while let Some((a, b)) = stack.pop() {
            if !visited.insert((a, b)) {
                continue;
            }
            match (self.node(a), other.node(b)) {
                (Node::Terminal(x), Node::Terminal(y)) => {
                    if x != y {
                        return false;
                    }
                }
                (
                    Node::Decision {
                        variable: va,
                        low: la,
                        high: ha,
                    },
                    Node::Decision {
                        variable: vb,
                        low: lb,
                        high: hb,
                    },
                ) => {
                    if self.ordering.name(va) != other.ordering.name(vb) {
                        return false;
                    }
                    stack.push((la, lb));
                    stack.push((ha, hb));
                }
                _ => return false,
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn session() -> Session {
        Session::new("A B C".parse().unwrap())
    }

    #[test]
    fn test_terminals() {
        let s = session();

        assert_eq!(s.mk_terminal(0), Ok(s.zero()));
        assert_eq!(s.mk_terminal(1), Ok(s.one()));
        assert_eq!(s.mk_terminal(2), Err(BddError::InvalidTerminal(2)));

        assert!(s.is_terminal(s.zero()));
        assert!(s.is_zero(s.zero()));
        assert!(!s.is_one(s.zero()));
        assert_eq!(s.terminal_value(s.one()), Some(true));
        assert_eq!(s.variable(s.one()), None);
        assert_eq!(s.low(s.one()), None);
        assert_eq!(s.high(s.zero()), None);
    }

    #[test]
    fn test_var() {
        let s = session();

        let a = s.mk_var("A").unwrap();
        assert_eq!(s.variable(a), Some(Var::new(0)));
        assert_eq!(s.variable_name(a), Some("A"));
        assert_eq!(s.low(a), Some(s.zero()));
        assert_eq!(s.high(a), Some(s.one()));
        assert_eq!(s.terminal_value(a), None);
        assert_eq!(s.mk_var("A"), Ok(a));
    }

    #[test]
    fn test_unknown_variable() {
        let s = session();
        assert_eq!(
            s.mk_var("D"),
            Err(BddError::UnknownVariable("D".to_string()))
        );
        assert_eq!(
            s.mk_node(Var::new(3), s.zero(), s.one()),
            Err(BddError::UnknownVariable("rank 3".to_string()))
        );
    }

    #[test]
    fn test_reduction() {
        let s = session();
        let c = s.mk_var("C").unwrap();
        for v in 0..3 {
            assert_eq!(s.mk_node(Var::new(v), c, c), Ok(c));
            assert_eq!(s.mk_node(Var::new(v), s.one(), s.one()), Ok(s.one()));
        }
    }

    #[test]
    fn test_hash_consing() {
        let s = session();
        let c = s.mk_var("C").unwrap();
        let n1 = s.mk_node(Var::new(0), s.zero(), c).unwrap();
        let size = s.num_nodes();
        let n2 = s.mk_node(Var::new(0), s.zero(), c).unwrap();
        assert_eq!(n1, n2);
        assert_eq!(s.num_nodes(), size);
    }

    #[test]
    fn test_ordering_violation() {
        let s = session();
        let a = s.mk_var("A").unwrap();
        let result = s.mk_node(Var::new(2), s.zero(), a);
        assert_eq!(
            result,
            Err(BddError::OrderingViolation {
                parent: Var::new(2),
                child: Var::new(0),
            })
        );
        // Same variable on parent and child is also rejected.
        assert!(s.mk_node(Var::new(0), a, s.one()).is_err());
    }

    #[test]
    fn test_foreign_ref() {
        let s = session();
        let bogus = Ref::new(1000);
        assert_eq!(s.try_node(bogus), Err(BddError::InvalidRef(bogus)));
        assert_eq!(
            s.mk_node(Var::new(0), s.zero(), bogus),
            Err(BddError::InvalidRef(bogus))
        );
    }

    #[test]
    fn test_make() {
        let s = session();
        assert_eq!(s.make(None, s.zero(), s.one()), Ok(s.one()));
        assert_eq!(s.make(None, s.one(), s.zero()), Ok(s.zero()));
        let b = s.mk_var("B").unwrap();
        assert_eq!(
            s.make(None, s.zero(), b),
            Err(BddError::InvalidTerminal(b.get()))
        );
        assert_eq!(s.make(Some("B"), s.zero(), s.one()), Ok(b));
        assert!(s.make(Some("Q"), s.zero(), s.one()).is_err());
    }

    #[test]
    fn test_descendants() {
        let s = session();
        let c = s.mk_var("C").unwrap();
        let b = s.mk_node(Var::new(1), c, s.one()).unwrap();
        let a = s.mk_node(Var::new(0), b, c).unwrap();

        let all = s.descendants([a]);
        assert_eq!(all.len(), 5);
        assert!(all.contains(&s.zero()));
        assert!(all.contains(&s.one()));
        assert_eq!(s.size(c), 3);
        assert_eq!(s.size(s.one()), 1);
    }

    #[test]
    fn test_bracket_string() {
        let s = session();
        let a = s.mk_var("A").unwrap();
        assert_eq!(s.to_bracket_string(a), format!("{}:(A, (1), (0))", a));
    }

    #[test]
    fn test_structurally_equal() {
        let s1 = session();
        let s2 = Session::new("A B C".parse().unwrap());

        // Allocate an unrelated node first, so refs differ between sessions.
        s2.mk_var("C").unwrap();

        let b1 = s1.mk_var("B").unwrap();
        let f1 = s1.mk_node(Var::new(0), b1, s1.one()).unwrap();
        let b2 = s2.mk_var("B").unwrap();
        let f2 = s2.mk_node(Var::new(0), b2, s2.one()).unwrap();
        assert_ne!(f1, f2);
        assert!(s1.structurally_equal(f1, &s2, f2));
        assert!(!s1.structurally_equal(f1, &s2, b2));
        assert!(!s1.structurally_equal(s1.one(), &s2, s2.zero()));
    }

    #[test]
    fn test_large_capacity_hint() {
        let s = Session::with_capacity("A B C".parse().unwrap(), 31);
        assert_eq!(s.num_nodes(), 2);
        assert!(s.mk_var("C").is_ok());
    }

    #[test]
    fn test_debug() {
        let s = session();
        let dbg = format!("{:?}", s);
        assert!(dbg.starts_with("Session"));
        assert!(dbg.contains("nodes: 2"));
    }
}
