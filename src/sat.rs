//! Satisfiability queries: model counting and witness extraction.

use std::collections::HashMap;

use num_bigint::BigUint;

use crate::node::Node;
use crate::reference::Ref;
use crate::session::Session;
use crate::types::Var;

impl Session {
    /// Returns one satisfying assignment of `f`, if any exists.
    ///
    /// The assignment lists the variables tested along one path to the
    /// `1` terminal, from the root down. Variables not listed are free.
    ///
    /// Returns `None` if `f` is the constant false function.
    pub fn one_sat(&self, f: Ref) -> Option<Vec<(Var, bool)>> {
        if self.is_zero(f) {
            return None;
        }

        let mut path = Vec::new();
        let mut current = f;

        // In a reduced diagram every non-zero node reaches the 1 terminal.
        while let Node::Decision { variable, low, high } = self.node(current) {
            if !self.is_zero(high) {
                path.push((variable, true));
                current = high;
            } else {
                path.push((variable, false));
                current = low;
            }
        }

        Some(path)
    }

    /// Number of assignments to all ordered variables under which `f` is true.
    pub fn sat_count(&self, f: Ref) -> BigUint {
        let max = BigUint::from(1u32) << self.ordering().len();
        let mut counts: HashMap<Ref, BigUint> = HashMap::new();

        // Children are always allocated before their parents, so ascending
        // ref order visits every node after both of its children.
        for node in self.descendants([f]) {
            let count = match self.node(node) {
                Node::Terminal(false) => BigUint::ZERO,
                Node::Terminal(true) => max.clone(),
                Node::Decision { low, high, .. } => (&counts[&low] + &counts[&high]) >> 1,
            };
            counts.insert(node, count);
        }

        counts.remove(&f).unwrap_or_default()
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
    fn test_one_sat() {
        let s = session();

        // A AND NOT B AND NOT C
        let f = s.build(&"A B NOT AND C NOT AND".parse().unwrap()).unwrap();
        let model = s.one_sat(f).unwrap();
        assert_eq!(
            model,
            [(Var::new(0), true), (Var::new(1), false), (Var::new(2), false)]
        );
        assert!(s.eval(f, &[true, false, false]));

        let g = s.apply_and(f, s.apply_not(f).unwrap()).unwrap();
        assert_eq!(s.one_sat(g), None);
        assert_eq!(s.one_sat(s.one()), Some(vec![]));
    }

    #[test]
    fn test_one_sat_is_model() {
        let s = session();
        let f = s.build(&"A B XOR C NAND".parse().unwrap()).unwrap();
        let model = s.one_sat(f).unwrap();

        let mut assignment = [false; 3];
        for (v, value) in model {
            assignment[v.index()] = value;
        }
        assert!(s.eval(f, &assignment));
    }

    #[test]
    fn test_sat_count_terminal() {
        let s = session();
        assert_eq!(s.sat_count(s.zero()), BigUint::ZERO);
        assert_eq!(s.sat_count(s.one()), BigUint::from(8u32));
    }

    #[test]
    fn test_sat_count_var() {
        let s = session();
        for name in ["A", "B", "C"] {
            let x = s.mk_var(name).unwrap();
            assert_eq!(s.sat_count(x), BigUint::from(4u32));
        }
    }

    #[test]
    fn test_sat_count_formulas() {
        let s = session();
        let count = |text: &str| s.sat_count(s.build(&text.parse().unwrap()).unwrap());

        assert_eq!(count("A B AND"), BigUint::from(2u32));
        assert_eq!(count("A B OR"), BigUint::from(6u32));
        assert_eq!(count("A B C AND AND"), BigUint::from(1u32));
        assert_eq!(count("A B C OR OR NOT"), BigUint::from(1u32));
        assert_eq!(count("A B XOR C XOR"), BigUint::from(4u32));
    }

    #[test]
    fn test_sat_count_matches_truth_table() {
        let s = session();
        let f = s.build(&"A C AND B NOR".parse().unwrap()).unwrap();
        let ones = s.truth_table(f).unwrap().into_iter().filter(|&x| x).count();
        assert_eq!(s.sat_count(f), BigUint::from(ones));
    }

    #[test]
    fn test_sat_count_many_variables() {
        let names: Vec<String> = (0..100).map(|i| format!("x{}", i)).collect();
        let s = Session::new(crate::ordering::VariableOrdering::new(names).unwrap());
        let x = s.mk_var("x42").unwrap();
        assert_eq!(s.sat_count(x), BigUint::from(1u32) << 99);
    }
}
