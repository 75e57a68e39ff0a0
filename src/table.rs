//! Hash-consing arena.
//!
//! Values live in a dense `Vec`, addressed by their index, which never
//! changes. Values inserted through [`Table::put`] are additionally threaded
//! into bucket chains (separate chaining, intrusive `next` links), so that
//! putting an equal value again returns the existing index instead of a copy.
//!
//! Nothing is ever removed: the table only grows, and the bucket array is
//! doubled whenever the chains get too long on average.

use std::cmp::min;
use std::ops::Index;

use crate::utils::MyHash;

/// Average chain length that triggers doubling the bucket array.
const MAX_LOAD: usize = 2;

/// Upper bound on the up-front allocation, in bits.
const MAX_RESERVE_BITS: usize = 20;

#[derive(Debug, Clone)]
struct Entry<T> {
    value: T,
    /// Index of the next cell in the same bucket, or 0 at the end of the chain.
    next: usize,
    /// Whether the cell takes part in hash-consing.
    hashed: bool,
}

#[derive(Debug, Clone)]
pub struct Table<T> {
    data: Vec<Entry<T>>,
    buckets: Vec<usize>,
    bitmask: u64,
}

impl<T> Table<T> {
    /// Create a new table with room for `2^bits` values before reallocating.
    ///
    /// The table still grows past that size; `bits` is only a hint, and at
    /// most `2^20` cells are reserved up front.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Table bits should be in the range 0..=31");

        let buckets_bits = min(bits, 16);
        let buckets_size = 1 << buckets_bits;

        Self {
            data: Vec::with_capacity(1 << min(bits, MAX_RESERVE_BITS)),
            buckets: vec![0; buckets_size],
            bitmask: (buckets_size - 1) as u64,
        }
    }

    /// Get the number of stored values.
    pub fn len(&self) -> usize {
        self.data.len()
    }
    /// Check whether the table holds no values.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    /// Get the number of buckets.
    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Get the reference to the value at the given index, if it exists.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index).map(|entry| &entry.value)
    }
    /// Get the reference to the value at the given index.
    pub fn value(&self, index: usize) -> &T {
        &self.data[index].value
    }
    /// Get the index of the next cell in the same bucket.
    pub fn next(&self, index: usize) -> usize {
        self.data[index].next
    }

    /// Add a value without registering it for hash-consing, and return its index.
    ///
    /// Used for values that have a fixed, well-known index (e.g. terminals).
    pub fn add(&mut self, value: T) -> usize {
        let index = self.data.len();
        self.data.push(Entry {
            value,
            next: 0,
            hashed: false,
        });
        index
    }
}

impl<T> Table<T>
where
    T: MyHash,
{
    fn bucket_index(&self, value: &T) -> usize {
        (value.hash() & self.bitmask) as usize
    }

    /// Find the index of a value previously stored with [`Table::put`].
    pub fn find(&self, value: &T) -> Option<usize>
    where
        T: Eq,
    {
        let mut index = self.buckets[self.bucket_index(value)];
        while index != 0 {
            if &self.data[index].value == value {
                return Some(index);
            }
            index = self.data[index].next;
        }
        None
    }

    /// Put a value into the table and return its index.
    ///
    /// If an equal value was put before, its index is returned and nothing is stored.
    pub fn put(&mut self, value: T) -> usize
    where
        T: Eq,
    {
        if let Some(index) = self.find(&value) {
            return index;
        }

        let bucket_index = self.bucket_index(&value);
        let index = self.add(value);
        let entry = &mut self.data[index];
        entry.hashed = true;
        entry.next = self.buckets[bucket_index];
        // Index 0 is reserved as the end-of-chain marker.
        debug_assert_ne!(index, 0, "first table cell cannot be hashed");
        self.buckets[bucket_index] = index;

        if self.data.len() > self.buckets.len() * MAX_LOAD {
            self.grow();
        }

        index
    }

    /// Double the bucket array and relink every hashed cell.
    fn grow(&mut self) {
        let buckets_size = self.buckets.len() * 2;
        log::debug!("Growing unique table to {} buckets", buckets_size);

        self.buckets = vec![0; buckets_size];
        self.bitmask = (buckets_size - 1) as u64;

        for index in 0..self.data.len() {
            if !self.data[index].hashed {
                continue;
            }
            let bucket_index = self.bucket_index(&self.data[index].value);
            self.data[index].next = self.buckets[bucket_index];
            self.buckets[bucket_index] = index;
        }
    }
}

impl<T> Index<usize> for Table<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.value(index)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
    struct Item(i32);

    impl MyHash for Item {
        fn hash(&self) -> u64 {
            self.0.unsigned_abs() as u64
        }
    }

    #[test]
    fn test_add() {
        let mut table = Table::new(2);
        let index = table.add(Item(42));
        assert_eq!(index, 0);
        assert_eq!(table[index], Item(42));
        assert_eq!(table.next(index), 0);
        assert_eq!(table.find(&Item(42)), None);
    }

    #[test]
    fn test_put() {
        let mut table = Table::new(2);
        table.add(Item(0));
        let index1 = table.put(Item(5));
        let index2 = table.put(Item(-5));
        assert_ne!(index1, index2);
        assert_eq!(table[index1], Item(5));
        assert_eq!(table[index2], Item(-5));
        // Same bucket: the newer cell heads the chain.
        assert_eq!(table.next(index2), index1);
    }

    #[test]
    fn test_put_is_idempotent() {
        let mut table = Table::new(2);
        table.add(Item(0));
        let index = table.put(Item(7));
        assert_eq!(table.put(Item(7)), index);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_grow_keeps_indices() {
        let mut table = Table::new(1);
        table.add(Item(0));
        let indices: Vec<usize> = (1..=100).map(|i| table.put(Item(i))).collect();
        assert!(table.num_buckets() > 2);
        for (i, &index) in (1..=100).zip(indices.iter()) {
            assert_eq!(table[index], Item(i));
            assert_eq!(table.find(&Item(i)), Some(index));
            assert_eq!(table.put(Item(i)), index);
        }
        assert_eq!(table.len(), 101);
    }

    #[test]
    fn test_large_hint_is_capped() {
        let mut table = Table::<Item>::new(31);
        assert!(table.is_empty());
        table.add(Item(0));
        assert_eq!(table.put(Item(3)), 1);
    }

    #[test]
    fn test_get_out_of_range() {
        let table = Table::<Item>::new(2);
        assert!(table.is_empty());
        assert_eq!(table.get(0), None);
    }
}
