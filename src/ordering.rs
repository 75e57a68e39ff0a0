//! Variable ordering.
//!
//! A [`VariableOrdering`] fixes, once and for all, which variable a diagram
//! tests first. It is a duplicate-free list of names; a name's position in
//! the list is its [`Var`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{BddError, Result};
use crate::types::Var;

/// An immutable total order over variable names.
///
/// # Examples
///
/// ```
/// use robdd_equiv::ordering::VariableOrdering;
///
/// let ordering: VariableOrdering = "A B C".parse().unwrap();
/// assert_eq!(ordering.len(), 3);
/// assert!(ordering.rank("A").unwrap() < ordering.rank("C").unwrap());
/// assert!(ordering.rank("D").is_err());
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct VariableOrdering {
    names: Vec<String>,
    ranks: HashMap<String, Var>,
}

impl VariableOrdering {
    /// Create an ordering from names, topmost first.
    ///
    /// Fails with [`BddError::DuplicateVariable`] if a name repeats.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordering = VariableOrdering {
            names: Vec::new(),
            ranks: HashMap::new(),
        };
        for name in names {
            let name = name.into();
            if ordering.ranks.contains_key(&name) {
                return Err(BddError::DuplicateVariable(name));
            }
            let var = Var::new(ordering.names.len() as u32);
            ordering.ranks.insert(name.clone(), var);
            ordering.names.push(name);
        }
        Ok(ordering)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ranks.contains_key(name)
    }

    /// Look up the variable for `name`.
    pub fn rank(&self, name: &str) -> Result<Var> {
        self.ranks
            .get(name)
            .copied()
            .ok_or_else(|| BddError::UnknownVariable(name.to_string()))
    }

    /// Name of the variable at `var`, if it is part of this ordering.
    pub fn name(&self, var: Var) -> Option<&str> {
        self.names.get(var.index()).map(String::as_str)
    }

    /// Iterate over `(variable, name)` pairs, topmost first.
    pub fn iter(&self) -> impl Iterator<Item = (Var, &str)> + '_ {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (Var::new(i as u32), name.as_str()))
    }
}

impl FromStr for VariableOrdering {
    type Err = BddError;

    /// Parse whitespace-separated names, e.g. `"A B C"`.
    fn from_str(s: &str) -> Result<Self> {
        VariableOrdering::new(s.split_whitespace())
    }
}

impl fmt::Display for VariableOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks() {
        let ordering = VariableOrdering::new(["A", "B", "C"]).unwrap();
        assert_eq!(ordering.rank("A"), Ok(Var::new(0)));
        assert_eq!(ordering.rank("B"), Ok(Var::new(1)));
        assert_eq!(ordering.rank("C"), Ok(Var::new(2)));
        assert_eq!(ordering.name(Var::new(1)), Some("B"));
        assert_eq!(ordering.name(Var::new(3)), None);
    }

    #[test]
    fn test_unknown_variable() {
        let ordering = VariableOrdering::new(["A"]).unwrap();
        assert!(!ordering.contains("Z"));
        assert_eq!(
            ordering.rank("Z"),
            Err(BddError::UnknownVariable("Z".to_string()))
        );
    }

    #[test]
    fn test_duplicate_variable() {
        let result = VariableOrdering::new(["A", "B", "A"]);
        assert_eq!(result, Err(BddError::DuplicateVariable("A".to_string())));
    }

    #[test]
    fn test_parse_and_display() {
        let ordering: VariableOrdering = "  x  y\tz ".parse().unwrap();
        assert_eq!(ordering.len(), 3);
        assert_eq!(ordering.to_string(), "x y z");
        let names: Vec<&str> = ordering.iter().map(|(_, name)| name).collect();
        assert_eq!(names, ["x", "y", "z"]);
    }

    #[test]
    fn test_empty() {
        let ordering: VariableOrdering = "".parse().unwrap();
        assert!(ordering.is_empty());
    }
}
