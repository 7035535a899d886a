//! Fixed-capacity document sets backed by a bit vector.
//!
//! Both clustering strategies compare document sets pairwise when merging
//! clusters, so the set is a plain bitmap sized to the number of documents
//! of one clustering invocation. Every set taking part in a binary operation
//! must have the same capacity.

use bit_vec::BitVec;

use crate::error::{Result, SheafError};

/// A set of document indices in `0..capacity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSet {
    bits: BitVec,
}

impl DocumentSet {
    /// Create an empty set able to hold indices below `capacity`.
    pub fn new(capacity: usize) -> Self {
        DocumentSet {
            bits: BitVec::from_elem(capacity, false),
        }
    }

    /// Create a set from a sequence of indices.
    pub fn from_indices<I>(capacity: usize, indices: I) -> Result<Self>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut set = DocumentSet::new(capacity);
        for index in indices {
            set.insert(index)?;
        }
        Ok(set)
    }

    /// Add a document. Returns `true` if it was not present before.
    pub fn insert(&mut self, document: usize) -> Result<bool> {
        if document >= self.bits.len() {
            return Err(SheafError::internal(format!(
                "Document index {document} out of range for a set of {} documents",
                self.bits.len()
            )));
        }

        let present = self.contains(document);
        if !present {
            self.bits.set(document, true);
        }
        Ok(!present)
    }

    /// Check if a document belongs to this set.
    pub fn contains(&self, document: usize) -> bool {
        self.bits.get(document).unwrap_or(false)
    }

    /// Number of documents in the set.
    pub fn len(&self) -> usize {
        self.bits
            .blocks()
            .map(|block| block.count_ones() as usize)
            .sum()
    }

    /// Check if the set holds no documents.
    pub fn is_empty(&self) -> bool {
        self.bits.none()
    }

    /// The largest index this set can hold, plus one.
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Add every document of `other` to this set.
    pub fn union_with(&mut self, other: &DocumentSet) {
        self.bits.or(&other.bits);
    }

    /// Keep only the documents also present in `other`.
    pub fn intersect_with(&mut self, other: &DocumentSet) {
        self.bits.and(&other.bits);
    }

    /// Size of the intersection with `other`, without allocating.
    pub fn intersection_count(&self, other: &DocumentSet) -> usize {
        self.bits
            .blocks()
            .zip(other.bits.blocks())
            .map(|(a, b)| (a & b).count_ones() as usize)
            .sum()
    }

    /// Iterate over member documents in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(index, set)| set.then_some(index))
    }

    /// Collect member documents into a vector, ascending.
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_contains() {
        let mut set = DocumentSet::new(10);
        assert!(set.is_empty());
        assert!(set.insert(3).unwrap());
        assert!(!set.insert(3).unwrap());
        assert!(set.contains(3));
        assert!(!set.contains(4));
        assert!(!set.contains(100));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_insert_out_of_range() {
        let mut set = DocumentSet::new(2);
        assert!(matches!(set.insert(2), Err(SheafError::Internal(_))));
    }

    #[test]
    fn test_set_operations() {
        let a = DocumentSet::from_indices(70, [1, 2, 3, 65]).unwrap();
        let b = DocumentSet::from_indices(70, [2, 3, 4, 65, 69]).unwrap();

        assert_eq!(a.intersection_count(&b), 3);

        let mut union = a.clone();
        union.union_with(&b);
        assert_eq!(union.to_vec(), vec![1, 2, 3, 4, 65, 69]);

        let mut intersection = a.clone();
        intersection.intersect_with(&b);
        assert_eq!(intersection.to_vec(), vec![2, 3, 65]);
        assert_eq!(intersection.len(), 3);
    }

    #[test]
    fn test_zero_capacity() {
        let set = DocumentSet::new(0);
        assert_eq!(set.len(), 0);
        assert!(set.is_empty());
        assert_eq!(set.iter().count(), 0);
    }
}
