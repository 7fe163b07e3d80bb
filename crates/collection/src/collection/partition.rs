//! Filtering, set algebra and slicing

use std::collections::HashSet;
use std::hash::Hash;

use super::Collection;
use crate::error::{CollectionError, CollectionResult};

impl<T> Collection<T> {
    /// Keeps only the items matching `predicate`, preserving order.
    pub fn filter<P>(&mut self, predicate: P) -> &mut Self
    where
        P: FnMut(&T) -> bool,
    {
        self.items.retain(predicate);
        self
    }

    // ==================== Set Algebra ====================

    /// Removes every item that also occurs in `other`.
    pub fn except<O>(&mut self, other: &O) -> &mut Self
    where
        T: PartialEq,
        O: AsRef<[T]> + ?Sized,
    {
        let other = other.as_ref();
        self.items.retain(|item| !other.contains(item));
        self
    }

    /// Removes every item whose key occurs among the keys of `other`.
    pub fn except_by<O, K, F>(&mut self, other: &O, mut key: F) -> &mut Self
    where
        O: AsRef<[T]> + ?Sized,
        K: Eq + Hash,
        F: FnMut(&T) -> K,
    {
        let excluded: HashSet<K> = other.as_ref().iter().map(&mut key).collect();
        self.items.retain(|item| !excluded.contains(&key(item)));
        self
    }

    /// Keeps only the items that also occur in `other`.
    pub fn intersect<O>(&mut self, other: &O) -> &mut Self
    where
        T: PartialEq,
        O: AsRef<[T]> + ?Sized,
    {
        let other = other.as_ref();
        self.items.retain(|item| other.contains(item));
        self
    }

    /// Keeps only the items whose key occurs among the keys of `other`.
    pub fn intersect_by<O, K, F>(&mut self, other: &O, mut key: F) -> &mut Self
    where
        O: AsRef<[T]> + ?Sized,
        K: Eq + Hash,
        F: FnMut(&T) -> K,
    {
        let wanted: HashSet<K> = other.as_ref().iter().map(&mut key).collect();
        self.items.retain(|item| wanted.contains(&key(item)));
        self
    }

    // ==================== Slicing ====================
    //
    // Counts past either end clamp, they never fail.

    /// Drops the first `n` items.
    pub fn skip(&mut self, n: usize) -> &mut Self {
        let n = n.min(self.items.len());
        self.items.drain(..n);
        self
    }

    /// Keeps the first `n` items.
    pub fn take(&mut self, n: usize) -> &mut Self {
        self.items.truncate(n);
        self
    }

    /// Drops the last `n` items.
    pub fn skip_last(&mut self, n: usize) -> &mut Self {
        let keep = self.items.len().saturating_sub(n);
        self.items.truncate(keep);
        self
    }

    /// Keeps the last `n` items.
    pub fn take_last(&mut self, n: usize) -> &mut Self {
        let cut = self.items.len().saturating_sub(n);
        self.items.drain(..cut);
        self
    }

    /// Drops items from the start while `predicate(item, index)` holds.
    pub fn skip_while<P>(&mut self, predicate: P) -> &mut Self
    where
        P: FnMut(&T, usize) -> bool,
    {
        let cut = self.leading_run(predicate);
        self.items.drain(..cut);
        self
    }

    /// Keeps items from the start while `predicate(item, index)` holds.
    pub fn take_while<P>(&mut self, predicate: P) -> &mut Self
    where
        P: FnMut(&T, usize) -> bool,
    {
        let cut = self.leading_run(predicate);
        self.items.truncate(cut);
        self
    }

    /// Length of the prefix satisfying `predicate`.
    fn leading_run<P>(&self, mut predicate: P) -> usize
    where
        P: FnMut(&T, usize) -> bool,
    {
        self.items
            .iter()
            .enumerate()
            .position(|(index, item)| !predicate(item, index))
            .unwrap_or(self.items.len())
    }

    /// Splits into consecutive collections of at most `size` items.
    ///
    /// Unlike the rest of this family the receiver is left unchanged.
    /// Every chunk keeps the receiver's kind and limits.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `size` is zero
    pub fn chunk(&self, size: usize) -> CollectionResult<Vec<Self>>
    where
        T: Clone,
    {
        if size == 0 {
            return Err(CollectionError::invalid_argument(
                "size",
                "chunk size must be positive",
            ));
        }
        Ok(self
            .items
            .chunks(size)
            .map(|chunk| self.derived(self.kind.clone(), chunk.to_vec()))
            .collect())
    }
}
