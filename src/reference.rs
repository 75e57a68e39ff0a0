use std::fmt::{Display, Formatter};

/// Handle to a node in a [`Session`][crate::session::Session].
///
/// A `Ref` is the node's index in the session's arena. Within one session,
/// two diagrams are the same boolean function exactly when their refs are
/// equal. Refs from different sessions must never be mixed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Ref(u32);

impl Ref {
    /// The constant-false terminal, always at index 0.
    pub const ZERO: Ref = Ref(0);
    /// The constant-true terminal, always at index 1.
    pub const ONE: Ref = Ref(1);

    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Return the terminal for the given boolean.
    pub const fn constant(value: bool) -> Self {
        if value {
            Self::ONE
        } else {
            Self::ZERO
        }
    }

    /// Return the internal representation of the reference.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Return the index of the reference.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn is_terminal(self) -> bool {
        self.0 <= 1
    }
}

impl Display for Ref {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminals() {
        assert_eq!(Ref::constant(false), Ref::ZERO);
        assert_eq!(Ref::constant(true), Ref::ONE);
        assert!(Ref::ZERO.is_terminal());
        assert!(Ref::ONE.is_terminal());
        assert!(!Ref::new(2).is_terminal());
    }

    #[test]
    fn test_display() {
        assert_eq!(Ref::new(7).to_string(), "@7");
    }
}
