//! In-place mutation and ordering

use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::Hash;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use super::Collection;
use crate::error::{CollectionError, CollectionResult};

impl<T> Collection<T> {
    // ==================== Insertion ====================

    /// Appends one item after validating it.
    ///
    /// # Errors
    ///
    /// `InvalidItem` if the kind rejects `item`, `LimitExceeded` if the
    /// collection is full
    pub fn push(&mut self, item: T) -> CollectionResult<&mut Self> {
        self.append([item])
    }

    /// Appends `items` in call order.
    ///
    /// The whole batch is validated first; on any rejection nothing is
    /// appended.
    ///
    /// # Errors
    ///
    /// `InvalidItem` for the first rejected item, `LimitExceeded` if the
    /// result would be too long
    pub fn append<I>(&mut self, items: I) -> CollectionResult<&mut Self>
    where
        I: IntoIterator<Item = T>,
    {
        let at = self.items.len();
        self.insert_validated(at, items.into_iter().collect())?;
        Ok(self)
    }

    /// Inserts `items` at the front; the first argument ends up first.
    ///
    /// # Errors
    ///
    /// Same as [`append`](Self::append)
    pub fn prepend<I>(&mut self, items: I) -> CollectionResult<&mut Self>
    where
        I: IntoIterator<Item = T>,
    {
        self.insert_validated(0, items.into_iter().collect())?;
        Ok(self)
    }

    /// Removes the first item equal to `item`.
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` if no item is equal
    pub fn remove(&mut self, item: &T) -> CollectionResult<&mut Self>
    where
        T: PartialEq,
    {
        let position = self
            .items
            .iter()
            .position(|candidate| candidate == item)
            .ok_or(CollectionError::ItemNotFound)?;
        self.items.remove(position);
        Ok(self)
    }

    /// Appends all items of `other` after the current ones.
    ///
    /// `other` must be of the receiver's kind or a subkind of it. Incoming
    /// items are validated against the receiver's kind as well.
    ///
    /// # Errors
    ///
    /// - `IncompatibleCollectionKind` if `other`'s kind is not covariant
    /// - `InvalidItem` / `LimitExceeded` as for [`append`](Self::append)
    pub fn concat(&mut self, other: &Self) -> CollectionResult<&mut Self>
    where
        T: Clone,
    {
        if !other.kind.is_subkind_of(&self.kind) {
            debug!(
                expected = %self.kind,
                actual = %other.kind,
                "concat refused: incompatible kinds"
            );
            return Err(CollectionError::incompatible_kind(
                self.kind.name(),
                other.kind.name(),
            ));
        }
        let at = self.items.len();
        self.insert_validated(at, other.items.clone())?;
        Ok(self)
    }

    // ==================== Reordering ====================

    /// Uniformly permutes the items using the thread-local generator.
    pub fn shuffle(&mut self) -> &mut Self {
        self.shuffle_with(&mut rand::rng())
    }

    /// Uniformly permutes the items (Fisher-Yates) using `rng`.
    pub fn shuffle_with<R>(&mut self, rng: &mut R) -> &mut Self
    where
        R: Rng + ?Sized,
    {
        self.items.shuffle(rng);
        self
    }

    /// Reverses the order of the items.
    pub fn reverse(&mut self) -> &mut Self {
        self.items.reverse();
        self
    }

    // ==================== Deduplication ====================

    /// Keeps the first occurrence of every item.
    pub fn distinct(&mut self) -> &mut Self
    where
        T: PartialEq,
    {
        let items = std::mem::take(&mut self.items);
        let mut kept: Vec<T> = Vec::with_capacity(items.len());
        for item in items {
            if !kept.contains(&item) {
                kept.push(item);
            }
        }
        self.items = kept;
        self
    }

    /// Keeps the first item seen for every key.
    pub fn distinct_by<K, F>(&mut self, mut key: F) -> &mut Self
    where
        K: Eq + Hash,
        F: FnMut(&T) -> K,
    {
        let mut seen = HashSet::new();
        self.items.retain(|item| seen.insert(key(item)));
        self
    }

    // ==================== Sorting ====================

    /// Sorts ascending by natural order.
    ///
    /// The sort is unstable: equal items may be reordered.
    pub fn sort(&mut self) -> &mut Self
    where
        T: Ord,
    {
        self.items.sort_unstable();
        self
    }

    /// Sorts descending by natural order (unstable).
    pub fn sort_descending(&mut self) -> &mut Self
    where
        T: Ord,
    {
        self.items.sort_unstable_by(|a, b| b.cmp(a));
        self
    }

    /// Sorts with a comparator (stable).
    ///
    /// Floats have no total natural order; use `f64::total_cmp` here.
    pub fn sort_by<F>(&mut self, compare: F) -> &mut Self
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.items.sort_by(compare);
        self
    }

    /// Sorts ascending by a derived key (stable).
    pub fn sort_by_key<K, F>(&mut self, key: F) -> &mut Self
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        self.items.sort_by_key(key);
        self
    }

    /// Sorts descending by a derived key (stable).
    pub fn sort_by_key_descending<K, F>(&mut self, mut key: F) -> &mut Self
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        self.items.sort_by(|a, b| key(b).cmp(&key(a)));
        self
    }
}
