//! Strongly-typed collection with chainable operations
//!
//! [`Collection`] owns an ordered, zero-indexed sequence of items of one
//! [`Kind`]. Every item is checked by the kind's validators on the way in
//! (construction, `push`, `append`, `prepend`, `concat`), so a collection
//! never holds an item its kind rejects.
//!
//! Mutating operations act in place and return `&mut Self` for chaining.
//! For copy-on-write semantics see [`ImmutableCollection`](crate::ImmutableCollection).
//!
//! ```rust
//! use ordo_collection::{Collection, kinds};
//!
//! let mut numbers = Collection::typed(kinds::integer(), vec![5, 2, 1, 3, 4])?;
//! numbers.sort().skip(1).take(3);
//! assert_eq!(numbers.to_vec(), vec![2, 3, 4]);
//! # Ok::<(), ordo_collection::CollectionError>(())
//! ```

mod access;
mod generate;
mod mutation;
mod partition;
mod projection;

use std::fmt;
use std::ops::Index;

use tracing::{debug, trace};

use crate::error::{CollectionError, CollectionResult};
use crate::kind::{ItemContext, Kind};
use crate::limits::CollectionLimits;

/// Ordered, validated sequence of `T`.
#[derive(Debug)]
pub struct Collection<T> {
    items: Vec<T>,
    kind: Kind<T>,
    limits: CollectionLimits,
}

impl<T> Collection<T> {
    // ==================== Constructors ====================

    /// Creates an empty collection of the top kind.
    #[inline]
    pub fn new() -> Self {
        Self::empty(Kind::any())
    }

    /// Creates an empty collection of `kind`.
    #[inline]
    pub fn empty(kind: Kind<T>) -> Self {
        Self {
            items: Vec::new(),
            kind,
            limits: CollectionLimits::default(),
        }
    }

    /// Wraps `items` in a collection of the top kind.
    ///
    /// Nothing is validated, the top kind accepts every value. The result
    /// is [`unlimited`](CollectionLimits::unlimited); use
    /// [`with_limits`](Self::with_limits) for a bounded collection.
    #[inline]
    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            items,
            kind: Kind::any(),
            limits: CollectionLimits::unlimited(),
        }
    }

    /// Builds a collection of `kind` from `items`.
    ///
    /// Every item is validated in order with its index. The first
    /// rejection aborts construction, no collection is produced.
    ///
    /// # Errors
    ///
    /// - `InvalidItem` if an item fails the kind's validators
    /// - `LimitExceeded` if `items` is longer than the default limit
    pub fn typed<I>(kind: Kind<T>, items: I) -> CollectionResult<Self>
    where
        I: IntoIterator<Item = T>,
    {
        Self::with_limits(kind, items, CollectionLimits::default())
    }

    /// Like [`typed`](Self::typed) with explicit limits.
    ///
    /// Oversized input is rejected after at most `max_len + 1` items have
    /// been read.
    pub fn with_limits<I>(kind: Kind<T>, items: I, limits: CollectionLimits) -> CollectionResult<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let items = items.into_iter();
        limits.check_len(items.size_hint().0)?;
        let items: Vec<T> = items.take(limits.max_len.saturating_add(1)).collect();
        limits.check_len(items.len())?;
        validate_batch(&kind, &items, 0, &items)?;
        trace!(kind = %kind, len = items.len(), "collection created");
        Ok(Self {
            items,
            kind,
            limits,
        })
    }

    /// Builds a derived collection that shares this collection's limits.
    ///
    /// Items are trusted: they are either a subset of validated items or
    /// belong to the top kind.
    pub(crate) fn derived<U>(&self, kind: Kind<U>, items: Vec<U>) -> Collection<U> {
        Collection {
            items,
            kind,
            limits: self.limits,
        }
    }

    // ==================== Basic Properties ====================

    /// Number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Number of items (LINQ spelling of [`len`](Self::len)).
    #[inline]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Element kind.
    #[inline]
    pub fn kind(&self) -> &Kind<T> {
        &self.kind
    }

    /// Size limits.
    #[inline]
    pub fn limits(&self) -> CollectionLimits {
        self.limits
    }

    /// Items as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Items for a structured-data encoder.
    #[inline]
    pub fn to_serializable(&self) -> &[T] {
        &self.items
    }

    /// Consumes the collection, returning its items.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// Iterator over the current items.
    ///
    /// Each call starts from the beginning.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    // ==================== Indexed Access ====================

    /// Item at `index`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `index >= len()`
    pub fn get(&self, index: usize) -> CollectionResult<&T> {
        self.items
            .get(index)
            .ok_or_else(|| CollectionError::index_out_of_bounds(index, self.items.len()))
    }

    /// Direct index assignment is not part of the collection contract.
    ///
    /// Always fails with `UnsupportedOperation`, use the named operations.
    #[allow(clippy::unused_self, clippy::needless_pass_by_ref_mut)]
    pub fn set_at(&mut self, index: usize, item: T) -> CollectionResult<()> {
        let _ = (index, item);
        Err(CollectionError::unsupported("index assignment"))
    }

    /// Direct index deletion is not part of the collection contract.
    ///
    /// Always fails with `UnsupportedOperation`, use [`remove`](Self::remove)
    /// or the partitioning operations.
    #[allow(clippy::unused_self, clippy::needless_pass_by_ref_mut)]
    pub fn delete_at(&mut self, index: usize) -> CollectionResult<()> {
        let _ = index;
        Err(CollectionError::unsupported("index deletion"))
    }

    // ==================== Validation ====================

    /// Inserts `batch` at `at`, keeping the collection unchanged if any
    /// item is rejected.
    ///
    /// Validators see the prospective sequence as the owner, the same view
    /// construction gives them.
    fn insert_validated(&mut self, at: usize, batch: Vec<T>) -> CollectionResult<()> {
        let count = batch.len();
        self.limits.check_len(self.items.len() + count)?;

        drop(self.items.splice(at..at, batch));
        let inserted = at..at + count;
        if let Err(err) = validate_batch(&self.kind, &self.items[inserted.clone()], at, &self.items) {
            self.items.drain(inserted);
            return Err(err);
        }
        Ok(())
    }
}

/// Checks every item of `batch` against `kind`, reporting `offset + i` as
/// the position within `owner`.
fn validate_batch<T>(kind: &Kind<T>, batch: &[T], offset: usize, owner: &[T]) -> CollectionResult<()> {
    for (i, item) in batch.iter().enumerate() {
        let index = offset + i;
        if let Err(source) = kind.check(item, ItemContext::new(Some(index), owner)) {
            debug!(kind = %kind, index, code = %source.code, "item rejected");
            return Err(CollectionError::invalid_item(kind.name(), Some(index), source));
        }
    }
    Ok(())
}

// ==================== Trait Implementations ====================

impl<T> Default for Collection<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            kind: self.kind.clone(),
            limits: self.limits,
        }
    }
}

impl<T: PartialEq> PartialEq for Collection<T> {
    fn eq(&self, other: &Self) -> bool {
        self.kind.name() == other.kind.name() && self.items == other.items
    }
}

impl<T: PartialEq> PartialEq<Vec<T>> for Collection<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        &self.items == other
    }
}

impl<T: PartialEq> PartialEq<[T]> for Collection<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.items == other
    }
}

impl<T> Index<usize> for Collection<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index >= len()`; use [`Collection::get`] for a fallible read.
    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl<T> AsRef<[T]> for Collection<T> {
    fn as_ref(&self) -> &[T] {
        &self.items
    }
}

impl<T> fmt::Display for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.kind, self.items.len())
    }
}

impl<T> From<Vec<T>> for Collection<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

impl<T> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
