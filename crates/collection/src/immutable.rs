//! Copy-on-write collection
//!
//! [`ImmutableCollection`] offers the mutating operations of
//! [`Collection`] with `&self` receivers: each call copies the items,
//! applies the operation to the copy and returns it, leaving the receiver
//! untouched. Read-only operations are reached through `Deref`.
//!
//! ```rust
//! use ordo_collection::{ImmutableCollection, kinds};
//!
//! let base = ImmutableCollection::typed(kinds::integer(), vec![3, 1, 2])?;
//! let sorted = base.sort();
//! let grown = sorted.push(4)?;
//!
//! assert_eq!(base.to_vec(), vec![3, 1, 2]);
//! assert_eq!(sorted.to_vec(), vec![1, 2, 3]);
//! assert_eq!(grown.to_vec(), vec![1, 2, 3, 4]);
//! # Ok::<(), ordo_collection::CollectionError>(())
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::ops::Deref;

use rand::Rng;

use crate::collection::Collection;
use crate::error::CollectionResult;
use crate::kind::Kind;
use crate::limits::CollectionLimits;

/// Collection whose mutating operations return a modified copy.
#[derive(Debug)]
pub struct ImmutableCollection<T> {
    inner: Collection<T>,
}

impl<T> ImmutableCollection<T> {
    /// Empty collection of the top kind.
    pub fn new() -> Self {
        Self {
            inner: Collection::new(),
        }
    }

    /// Empty collection of `kind`.
    pub fn empty(kind: Kind<T>) -> Self {
        Self {
            inner: Collection::empty(kind),
        }
    }

    /// Wraps `items` without validation (top kind, unlimited).
    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            inner: Collection::from_vec(items),
        }
    }

    /// See [`Collection::typed`].
    ///
    /// # Errors
    ///
    /// `InvalidItem` or `LimitExceeded`, as for `Collection::typed`
    pub fn typed<I>(kind: Kind<T>, items: I) -> CollectionResult<Self>
    where
        I: IntoIterator<Item = T>,
    {
        Collection::typed(kind, items).map(Self::from)
    }

    /// See [`Collection::with_limits`].
    pub fn with_limits<I>(kind: Kind<T>, items: I, limits: CollectionLimits) -> CollectionResult<Self>
    where
        I: IntoIterator<Item = T>,
    {
        Collection::with_limits(kind, items, limits).map(Self::from)
    }

    /// Unwraps into the in-place collection.
    pub fn into_mutable(self) -> Collection<T> {
        self.inner
    }
}

impl<T: Clone> ImmutableCollection<T> {
    fn derive<F>(&self, op: F) -> Self
    where
        F: FnOnce(&mut Collection<T>) -> &mut Collection<T>,
    {
        let mut next = self.inner.clone();
        op(&mut next);
        Self { inner: next }
    }

    fn try_derive<F>(&self, op: F) -> CollectionResult<Self>
    where
        F: FnOnce(&mut Collection<T>) -> CollectionResult<&mut Collection<T>>,
    {
        let mut next = self.inner.clone();
        op(&mut next)?;
        Ok(Self { inner: next })
    }

    // ==================== Insertion ====================

    /// Copy with `item` appended.
    ///
    /// # Errors
    ///
    /// As for [`Collection::push`]
    pub fn push(&self, item: T) -> CollectionResult<Self> {
        self.try_derive(|c| c.push(item))
    }

    /// Copy with `items` appended.
    ///
    /// # Errors
    ///
    /// As for [`Collection::append`]
    pub fn append<I>(&self, items: I) -> CollectionResult<Self>
    where
        I: IntoIterator<Item = T>,
    {
        self.try_derive(|c| c.append(items))
    }

    /// Copy with `items` inserted at the front.
    ///
    /// # Errors
    ///
    /// As for [`Collection::prepend`]
    pub fn prepend<I>(&self, items: I) -> CollectionResult<Self>
    where
        I: IntoIterator<Item = T>,
    {
        self.try_derive(|c| c.prepend(items))
    }

    /// Copy without the first item equal to `item`.
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` if no item is equal
    pub fn remove(&self, item: &T) -> CollectionResult<Self>
    where
        T: PartialEq,
    {
        self.try_derive(|c| c.remove(item))
    }

    /// Copy with the items of `other` appended.
    ///
    /// # Errors
    ///
    /// As for [`Collection::concat`]
    pub fn concat(&self, other: &Collection<T>) -> CollectionResult<Self> {
        self.try_derive(|c| c.concat(other))
    }

    // ==================== Reordering ====================
    //
    // Each method below returns a copy with the same-named `Collection`
    // operation applied.

    #[must_use = "immutable methods return a new instance"]
    pub fn shuffle(&self) -> Self {
        self.derive(Collection::shuffle)
    }

    #[must_use = "immutable methods return a new instance"]
    pub fn shuffle_with<R>(&self, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        self.derive(|c| c.shuffle_with(rng))
    }

    #[must_use = "immutable methods return a new instance"]
    pub fn reverse(&self) -> Self {
        self.derive(Collection::reverse)
    }

    #[must_use = "immutable methods return a new instance"]
    pub fn distinct(&self) -> Self
    where
        T: PartialEq,
    {
        self.derive(Collection::distinct)
    }

    #[must_use = "immutable methods return a new instance"]
    pub fn distinct_by<K, F>(&self, key: F) -> Self
    where
        K: Eq + Hash,
        F: FnMut(&T) -> K,
    {
        self.derive(|c| c.distinct_by(key))
    }

    #[must_use = "immutable methods return a new instance"]
    pub fn sort(&self) -> Self
    where
        T: Ord,
    {
        self.derive(Collection::sort)
    }

    #[must_use = "immutable methods return a new instance"]
    pub fn sort_descending(&self) -> Self
    where
        T: Ord,
    {
        self.derive(Collection::sort_descending)
    }

    #[must_use = "immutable methods return a new instance"]
    pub fn sort_by<F>(&self, compare: F) -> Self
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.derive(|c| c.sort_by(compare))
    }

    #[must_use = "immutable methods return a new instance"]
    pub fn sort_by_key<K, F>(&self, key: F) -> Self
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        self.derive(|c| c.sort_by_key(key))
    }

    #[must_use = "immutable methods return a new instance"]
    pub fn sort_by_key_descending<K, F>(&self, key: F) -> Self
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        self.derive(|c| c.sort_by_key_descending(key))
    }

    // ==================== Partitioning ====================

    #[must_use = "immutable methods return a new instance"]
    pub fn filter<P>(&self, predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        self.derive(|c| c.filter(predicate))
    }

    #[must_use = "immutable methods return a new instance"]
    pub fn except<O>(&self, other: &O) -> Self
    where
        T: PartialEq,
        O: AsRef<[T]> + ?Sized,
    {
        self.derive(|c| c.except(other))
    }

    #[must_use = "immutable methods return a new instance"]
    pub fn except_by<O, K, F>(&self, other: &O, key: F) -> Self
    where
        O: AsRef<[T]> + ?Sized,
        K: Eq + Hash,
        F: FnMut(&T) -> K,
    {
        self.derive(|c| c.except_by(other, key))
    }

    #[must_use = "immutable methods return a new instance"]
    pub fn intersect<O>(&self, other: &O) -> Self
    where
        T: PartialEq,
        O: AsRef<[T]> + ?Sized,
    {
        self.derive(|c| c.intersect(other))
    }

    #[must_use = "immutable methods return a new instance"]
    pub fn intersect_by<O, K, F>(&self, other: &O, key: F) -> Self
    where
        O: AsRef<[T]> + ?Sized,
        K: Eq + Hash,
        F: FnMut(&T) -> K,
    {
        self.derive(|c| c.intersect_by(other, key))
    }

    #[must_use = "immutable methods return a new instance"]
    pub fn skip(&self, n: usize) -> Self {
        self.derive(|c| c.skip(n))
    }

    #[must_use = "immutable methods return a new instance"]
    pub fn take(&self, n: usize) -> Self {
        self.derive(|c| c.take(n))
    }

    #[must_use = "immutable methods return a new instance"]
    pub fn skip_last(&self, n: usize) -> Self {
        self.derive(|c| c.skip_last(n))
    }

    #[must_use = "immutable methods return a new instance"]
    pub fn take_last(&self, n: usize) -> Self {
        self.derive(|c| c.take_last(n))
    }

    #[must_use = "immutable methods return a new instance"]
    pub fn skip_while<P>(&self, predicate: P) -> Self
    where
        P: FnMut(&T, usize) -> bool,
    {
        self.derive(|c| c.skip_while(predicate))
    }

    #[must_use = "immutable methods return a new instance"]
    pub fn take_while<P>(&self, predicate: P) -> Self
    where
        P: FnMut(&T, usize) -> bool,
    {
        self.derive(|c| c.take_while(predicate))
    }
}

impl<T> Collection<T> {
    /// Switches to the copy-on-write policy.
    pub fn into_immutable(self) -> ImmutableCollection<T> {
        ImmutableCollection::from(self)
    }
}

// ==================== Trait Implementations ====================

impl<T> Deref for ImmutableCollection<T> {
    type Target = Collection<T>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T> From<Collection<T>> for ImmutableCollection<T> {
    fn from(inner: Collection<T>) -> Self {
        Self { inner }
    }
}

impl<T> From<ImmutableCollection<T>> for Collection<T> {
    fn from(collection: ImmutableCollection<T>) -> Self {
        collection.inner
    }
}

impl<T> Default for ImmutableCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for ImmutableCollection<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: PartialEq> PartialEq for ImmutableCollection<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> AsRef<[T]> for ImmutableCollection<T> {
    fn as_ref(&self) -> &[T] {
        self.inner.as_slice()
    }
}

impl<T> fmt::Display for ImmutableCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl<T> FromIterator<T> for ImmutableCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(Collection::from_iter(iter))
    }
}

impl<T> IntoIterator for ImmutableCollection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ImmutableCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CollectionError;
    use crate::kinds;
    use pretty_assertions::assert_eq;

    fn base() -> ImmutableCollection<i64> {
        ImmutableCollection::typed(kinds::integer(), vec![4, 1, 3, 1, 2]).unwrap()
    }

    #[test]
    fn test_operations_leave_receiver_untouched() {
        let original = base();
        let changed = original
            .sort()
            .distinct()
            .skip(1)
            .append([10])
            .unwrap()
            .prepend([0])
            .unwrap();

        assert_eq!(changed.to_vec(), vec![0, 2, 3, 4, 10]);
        assert_eq!(original.to_vec(), vec![4, 1, 3, 1, 2]);
    }

    #[test]
    fn test_failed_insert_returns_error_only() {
        let positives = ImmutableCollection::typed(kinds::positive_integer(), vec![1]).unwrap();
        let err = positives.push(-1).unwrap_err();
        assert!(matches!(err, CollectionError::InvalidItem { .. }));
        assert_eq!(positives.to_vec(), vec![1]);
    }

    #[test]
    fn test_concat_accepts_both_policies() {
        let integers = base();
        let positives = Collection::typed(kinds::positive_integer(), vec![7]).unwrap();
        assert_eq!(integers.concat(&positives).unwrap().len(), 6);

        let more = ImmutableCollection::typed(kinds::integer(), vec![8]).unwrap();
        assert_eq!(integers.concat(&more).unwrap().last(), Ok(&8));
        assert_eq!(integers.len(), 5);
    }

    #[test]
    fn test_reads_go_through_deref() {
        let c = base();
        assert_eq!(c.first(), Ok(&4));
        assert_eq!(c[2], 3);
        assert_eq!(c.sum(), 11.0);
        assert_eq!(c.chunk(2).unwrap().len(), 3);
        assert_eq!(c.to_string(), "integer[5]");
    }

    #[test]
    fn test_partitioning_copies() {
        let c = base();
        assert_eq!(c.filter(|n| *n > 2).to_vec(), vec![4, 3]);
        assert_eq!(c.except(&[1]).to_vec(), vec![4, 3, 2]);
        assert_eq!(c.intersect(&[1, 2]).to_vec(), vec![1, 1, 2]);
        assert_eq!(c.take_last(2).to_vec(), vec![1, 2]);
        assert_eq!(c.take_while(|n, _| *n > 2).to_vec(), vec![4]);
        assert_eq!(c.skip_while(|n, _| *n > 2).to_vec(), vec![1, 3, 1, 2]);
        assert_eq!(c.remove(&1).unwrap().to_vec(), vec![4, 3, 1, 2]);
        assert_eq!(c.len(), 5);
    }

    #[test]
    fn test_policy_conversions() {
        let mut mutable = base().into_mutable();
        mutable.reverse();
        let frozen = mutable.into_immutable();
        assert_eq!(frozen.to_vec(), vec![2, 1, 3, 1, 4]);
        assert_eq!(frozen.reverse().to_vec(), vec![4, 1, 3, 1, 2]);
    }
}
