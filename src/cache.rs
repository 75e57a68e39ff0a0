//! Computed table for `apply`.
//!
//! A lossless cache backed by [`HashMap`]: an entry is never evicted while the
//! session lives, which is what bounds `apply` to one computation per
//! distinct `(operator, operands)` key.

use std::collections::HashMap;
use std::hash::Hash;

use crate::op::Operator;
use crate::reference::Ref;

/// A cache backed by [`HashMap`], counting hits and misses.
#[derive(Debug, Clone)]
pub struct Cache<K, V> {
    map: HashMap<K, V>,
    hits: usize,
    misses: usize,
}

impl<K, V> Cache<K, V> {
    /// Create a new cache with room for `2^bits` entries before reallocating.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Cache bits should be in the range 0..=31");
        Self {
            map: HashMap::with_capacity(1 << bits),
            hits: 0,
            misses: 0,
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Get the number of cache hits.
    pub fn hits(&self) -> usize {
        self.hits
    }
    /// Get the number of cache misses.
    pub fn misses(&self) -> usize {
        self.misses
    }
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq,
{
    /// Get the cached result.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match self.map.get(key) {
            Some(v) => {
                self.hits += 1;
                Some(v)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Insert a result into the cache.
    pub fn insert(&mut self, key: K, value: V) {
        self.map.insert(key, value);
    }
}

/// Key of an `apply` computation.
///
/// For commutative operators the operands are stored in ascending order, so
/// `f op g` and `g op f` share one entry.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct OpKey {
    pub op: Operator,
    pub f: Ref,
    pub g: Option<Ref>,
}

impl OpKey {
    pub fn new(op: Operator, f: Ref, g: Option<Ref>) -> Self {
        match g {
            Some(g) if op.is_commutative() && g < f => OpKey { op, f: g, g: Some(f) },
            _ => OpKey { op, f, g },
        }
    }
}

pub type ApplyCache = Cache<OpKey, Ref>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache() {
        let mut cache = Cache::<(u64, u64), i32>::new(3);

        cache.insert((1, 2), 3);
        cache.insert((2, 3), 1);
        cache.insert((1, 3), 2);

        assert_eq!(cache.get(&(1, 2)), Some(&3));
        assert_eq!(cache.get(&(2, 3)), Some(&1));
        assert_eq!(cache.get(&(1, 3)), Some(&2));
        assert_eq!(cache.get(&(2, 1)), None);
        assert_eq!(cache.get(&(3, 3)), None);

        assert_eq!(cache.hits(), 3);
        assert_eq!(cache.misses(), 2);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_op_key_normalization() {
        let a = Ref::new(5);
        let b = Ref::new(3);
        assert_eq!(
            OpKey::new(Operator::And, a, Some(b)),
            OpKey::new(Operator::And, b, Some(a))
        );
        assert_ne!(
            OpKey::new(Operator::And, a, Some(b)),
            OpKey::new(Operator::Or, a, Some(b))
        );
        let key = OpKey::new(Operator::Not, a, None);
        assert_eq!(key.f, a);
        assert_eq!(key.g, None);
    }
}
