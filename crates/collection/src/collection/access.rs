//! Element access and quantifiers

use std::cmp::Ordering;

use rand::Rng;
use rand::seq::SliceRandom;

use super::Collection;
use crate::error::{CollectionError, CollectionResult};

impl<T> Collection<T> {
    fn ensure_not_empty(&self) -> CollectionResult<()> {
        if self.items.is_empty() {
            return Err(CollectionError::EmptyCollection);
        }
        Ok(())
    }

    // ==================== First ====================

    /// First item.
    ///
    /// # Errors
    ///
    /// Returns `EmptyCollection` if there are no items
    pub fn first(&self) -> CollectionResult<&T> {
        self.items.first().ok_or(CollectionError::EmptyCollection)
    }

    /// First item matching `predicate`.
    ///
    /// # Errors
    ///
    /// `EmptyCollection` if there are no items, `NoPredicateResult` if
    /// nothing matches
    pub fn first_where<P>(&self, mut predicate: P) -> CollectionResult<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.ensure_not_empty()?;
        self.items
            .iter()
            .find(|item| predicate(item))
            .ok_or(CollectionError::NoPredicateResult)
    }

    /// First item, or `default` when empty.
    pub fn first_or<'a>(&'a self, default: &'a T) -> &'a T {
        self.items.first().unwrap_or(default)
    }

    /// First item matching `predicate`, or `default`.
    pub fn first_or_where<'a, P>(&'a self, default: &'a T, mut predicate: P) -> &'a T
    where
        P: FnMut(&T) -> bool,
    {
        self.items
            .iter()
            .find(|item| predicate(item))
            .unwrap_or(default)
    }

    /// First item, if any.
    pub fn first_or_none(&self) -> Option<&T> {
        self.items.first()
    }

    /// First item matching `predicate`, if any.
    pub fn first_or_none_where<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().find(|item| predicate(item))
    }

    // ==================== Last ====================

    /// Last item.
    ///
    /// # Errors
    ///
    /// Returns `EmptyCollection` if there are no items
    pub fn last(&self) -> CollectionResult<&T> {
        self.items.last().ok_or(CollectionError::EmptyCollection)
    }

    /// Last item matching `predicate`.
    pub fn last_where<P>(&self, mut predicate: P) -> CollectionResult<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.ensure_not_empty()?;
        self.items
            .iter()
            .rev()
            .find(|item| predicate(item))
            .ok_or(CollectionError::NoPredicateResult)
    }

    /// Last item, or `default` when empty.
    pub fn last_or<'a>(&'a self, default: &'a T) -> &'a T {
        self.items.last().unwrap_or(default)
    }

    /// Last item matching `predicate`, or `default`.
    pub fn last_or_where<'a, P>(&'a self, default: &'a T, mut predicate: P) -> &'a T
    where
        P: FnMut(&T) -> bool,
    {
        self.items
            .iter()
            .rev()
            .find(|item| predicate(item))
            .unwrap_or(default)
    }

    /// Last item, if any.
    pub fn last_or_none(&self) -> Option<&T> {
        self.items.last()
    }

    /// Last item matching `predicate`, if any.
    pub fn last_or_none_where<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().rev().find(|item| predicate(item))
    }

    // ==================== Single ====================

    /// The only item.
    ///
    /// # Errors
    ///
    /// `EmptyCollection` if there are no items, `TooManyItems` if there is
    /// more than one
    pub fn single(&self) -> CollectionResult<&T> {
        match self.items.as_slice() {
            [] => Err(CollectionError::EmptyCollection),
            [only] => Ok(only),
            items => Err(CollectionError::TooManyItems { count: items.len() }),
        }
    }

    /// The only item matching `predicate`.
    ///
    /// # Errors
    ///
    /// `EmptyCollection`, `NoPredicateResult` on zero matches,
    /// `TooManyPredicateResults` on several
    pub fn single_where<P>(&self, predicate: P) -> CollectionResult<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.ensure_not_empty()?;
        self.single_match(predicate)?
            .ok_or(CollectionError::NoPredicateResult)
    }

    /// The only item, or `default` when empty.
    ///
    /// # Errors
    ///
    /// Returns `TooManyItems` if there is more than one item
    pub fn single_or<'a>(&'a self, default: &'a T) -> CollectionResult<&'a T> {
        match self.items.as_slice() {
            [] => Ok(default),
            [only] => Ok(only),
            items => Err(CollectionError::TooManyItems { count: items.len() }),
        }
    }

    /// The only item matching `predicate`, or `default` on zero matches.
    ///
    /// # Errors
    ///
    /// Returns `TooManyPredicateResults` on several matches
    pub fn single_or_where<'a, P>(&'a self, default: &'a T, predicate: P) -> CollectionResult<&'a T>
    where
        P: FnMut(&T) -> bool,
    {
        Ok(self.single_match(predicate)?.unwrap_or(default))
    }

    fn single_match<P>(&self, mut predicate: P) -> CollectionResult<Option<&T>>
    where
        P: FnMut(&T) -> bool,
    {
        let mut matches = self.items.iter().filter(|item| predicate(item));
        let Some(found) = matches.next() else {
            return Ok(None);
        };
        let rest = matches.count();
        if rest > 0 {
            return Err(CollectionError::TooManyPredicateResults { count: rest + 1 });
        }
        Ok(Some(found))
    }

    // ==================== Search ====================

    /// Whether an item equal to `needle` is present.
    pub fn contains(&self, needle: &T) -> bool
    where
        T: PartialEq,
    {
        self.items.contains(needle)
    }

    /// Whether `comparer(item, needle)` holds for some item.
    pub fn contains_by<U, F>(&self, needle: &U, mut comparer: F) -> bool
    where
        U: ?Sized,
        F: FnMut(&T, &U) -> bool,
    {
        self.items.iter().any(|item| comparer(item, needle))
    }

    // ==================== Min / Max ====================

    /// Smallest item by natural order; the first one wins on ties.
    ///
    /// Incomparable values (e.g. NaN) are skipped; the result is NaN only
    /// when every item is.
    ///
    /// # Errors
    ///
    /// Returns `EmptyCollection` if there are no items
    pub fn min(&self) -> CollectionResult<&T>
    where
        T: PartialOrd,
    {
        extreme(self.items.iter(), Ordering::Less).ok_or(CollectionError::EmptyCollection)
    }

    /// Largest item by natural order; the first one wins on ties.
    pub fn max(&self) -> CollectionResult<&T>
    where
        T: PartialOrd,
    {
        extreme(self.items.iter(), Ordering::Greater).ok_or(CollectionError::EmptyCollection)
    }

    /// Smallest value produced by `selector`.
    pub fn min_of<V, F>(&self, selector: F) -> CollectionResult<V>
    where
        V: PartialOrd,
        F: FnMut(&T) -> V,
    {
        extreme(self.items.iter().map(selector), Ordering::Less)
            .ok_or(CollectionError::EmptyCollection)
    }

    /// Largest value produced by `selector`.
    pub fn max_of<V, F>(&self, selector: F) -> CollectionResult<V>
    where
        V: PartialOrd,
        F: FnMut(&T) -> V,
    {
        extreme(self.items.iter().map(selector), Ordering::Greater)
            .ok_or(CollectionError::EmptyCollection)
    }

    // ==================== Random ====================

    /// `count` distinct items drawn uniformly without replacement.
    ///
    /// With `preserve_order` the items come back in collection order,
    /// otherwise in random order. The collection is not modified.
    ///
    /// # Errors
    ///
    /// `EmptyCollection` if there are no items, `InvalidArgument` unless
    /// `1 <= count <= len()`
    pub fn random(&self, count: usize, preserve_order: bool) -> CollectionResult<Vec<T>>
    where
        T: Clone,
    {
        self.random_with(&mut rand::rng(), count, preserve_order)
    }

    /// [`random`](Self::random) with a caller-supplied generator.
    pub fn random_with<R>(&self, rng: &mut R, count: usize, preserve_order: bool) -> CollectionResult<Vec<T>>
    where
        T: Clone,
        R: Rng + ?Sized,
    {
        self.ensure_not_empty()?;
        let len = self.items.len();
        if count == 0 || count > len {
            return Err(CollectionError::invalid_argument(
                "count",
                format!("must be within 1..={len}, got {count}"),
            ));
        }

        let mut indexes = rand::seq::index::sample(&mut *rng, len, count).into_vec();
        if preserve_order {
            indexes.sort_unstable();
        } else {
            indexes.shuffle(rng);
        }
        Ok(indexes.into_iter().map(|i| self.items[i].clone()).collect())
    }

    // ==================== Quantifiers ====================

    /// Whether every item satisfies `predicate`; true when empty.
    pub fn all<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().all(predicate)
    }

    /// Whether the collection has any item.
    pub fn any(&self) -> bool {
        !self.items.is_empty()
    }

    /// Whether some item satisfies `predicate`.
    pub fn any_where<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().any(predicate)
    }

    /// Calls `action` on every item in order, returning the receiver.
    pub fn for_each<F>(&self, action: F) -> &Self
    where
        F: FnMut(&T),
    {
        self.items.iter().for_each(action);
        self
    }
}

/// First element that is strictly `wanted` relative to all before it.
///
/// Values incomparable with themselves (NaN) are only kept while nothing
/// comparable has been seen.
fn extreme<V, I>(iter: I, wanted: Ordering) -> Option<V>
where
    V: PartialOrd,
    I: Iterator<Item = V>,
{
    iter.reduce(|best, candidate| {
        let replace = match candidate.partial_cmp(&best) {
            Some(order) => order == wanted,
            None => is_unordered(&best) && !is_unordered(&candidate),
        };
        if replace { candidate } else { best }
    })
}

fn is_unordered<V: PartialOrd>(value: &V) -> bool {
    value.partial_cmp(value).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rstest::rstest;

    fn numbers() -> Collection<i64> {
        Collection::typed(kinds::integer(), vec![1, 2, 3, 4, 5, 6]).unwrap()
    }

    #[test]
    fn test_first_and_last() {
        let c = numbers();
        assert_eq!(c.first(), Ok(&1));
        assert_eq!(c.last(), Ok(&6));
        assert_eq!(c.first_where(|n| n % 2 == 0), Ok(&2));
        assert_eq!(c.last_where(|n| n % 2 == 1), Ok(&5));
        assert_eq!(c.first_where(|n| *n > 10), Err(CollectionError::NoPredicateResult));
        assert_eq!(c.last_where(|n| *n > 10), Err(CollectionError::NoPredicateResult));
    }

    #[test]
    fn test_first_on_empty() {
        let c = Collection::<i64>::new();
        assert_eq!(c.first(), Err(CollectionError::EmptyCollection));
        assert_eq!(c.first_where(|_| true), Err(CollectionError::EmptyCollection));
        assert_eq!(c.last(), Err(CollectionError::EmptyCollection));
        assert_eq!(c.first_or(&7), &7);
        assert_eq!(c.last_or_none(), None);
    }

    #[test]
    fn test_or_default_variants() {
        let c = numbers();
        assert_eq!(c.first_or(&0), &1);
        assert_eq!(c.first_or_where(&0, |n| *n > 4), &5);
        assert_eq!(c.first_or_where(&0, |n| *n > 40), &0);
        assert_eq!(c.last_or(&0), &6);
        assert_eq!(c.last_or_where(&0, |n| *n < 3), &2);
        assert_eq!(c.first_or_none_where(|n| *n > 40), None);
        assert_eq!(c.last_or_none_where(|n| *n < 3), Some(&2));
    }

    #[rstest]
    #[case(vec![1], Ok(&1))]
    #[case(vec![], Err(CollectionError::EmptyCollection))]
    #[case(vec![1, 2, 3, 1], Err(CollectionError::TooManyItems { count: 4 }))]
    fn test_single(#[case] items: Vec<i64>, #[case] expected: CollectionResult<&i64>) {
        let c = Collection::from_vec(items);
        assert_eq!(c.single(), expected);
    }

    #[test]
    fn test_single_where() {
        let c = Collection::from_vec(vec![1, 2, 3]);
        assert_eq!(c.single_where(|n| *n == 2), Ok(&2));
        assert_eq!(c.single_where(|n| *n == 4), Err(CollectionError::NoPredicateResult));
        assert_eq!(
            c.single_where(|n| *n > 1),
            Err(CollectionError::TooManyPredicateResults { count: 2 })
        );
    }

    #[test]
    fn test_single_or() {
        let empty = Collection::<i32>::new();
        assert_eq!(empty.single_or(&9), Ok(&9));

        let c = Collection::from_vec(vec![1, 2, 3]);
        assert_eq!(c.single_or(&9), Err(CollectionError::TooManyItems { count: 3 }));
        assert_eq!(c.single_or_where(&9, |n| *n == 4), Ok(&9));
        assert_eq!(c.single_or_where(&9, |n| *n == 3), Ok(&3));
        assert!(matches!(
            c.single_or_where(&9, |n| *n != 2),
            Err(CollectionError::TooManyPredicateResults { count: 2 })
        ));
    }

    #[test]
    fn test_contains() {
        let words = Collection::from_vec(vec!["Apple".to_string(), "pear".to_string()]);
        assert!(words.contains(&"pear".to_string()));
        assert!(!words.contains(&"apple".to_string()));
        assert!(words.contains_by("apple", |item, needle| item.eq_ignore_ascii_case(needle)));
    }

    #[test]
    fn test_min_max() {
        let c = Collection::from_vec(vec![3.5, -1.0, 8.25, 2.0]);
        assert_eq!(c.min(), Ok(&-1.0));
        assert_eq!(c.max(), Ok(&8.25));

        let words = Collection::from_vec(vec!["ccc", "a", "bb"]);
        assert_eq!(words.min_of(|w| w.len()), Ok(1));
        assert_eq!(words.max_of(|w| w.len()), Ok(3));

        let empty = Collection::<f64>::new();
        assert_eq!(empty.min(), Err(CollectionError::EmptyCollection));
        assert_eq!(empty.max_of(|x| *x), Err(CollectionError::EmptyCollection));
    }

    #[test]
    fn test_min_ignores_nan() {
        let c = Collection::from_vec(vec![2.0, f64::NAN, 1.0]);
        assert_eq!(c.min(), Ok(&1.0));
    }

    #[rstest]
    #[case::leading(vec![f64::NAN, 1.0, 2.0])]
    #[case::trailing(vec![1.0, 2.0, f64::NAN])]
    #[case::repeated(vec![f64::NAN, f64::NAN, 2.0, f64::NAN, 1.0])]
    fn test_min_max_skip_nan_anywhere(#[case] items: Vec<f64>) {
        let c = Collection::from_vec(items);
        assert_eq!(c.min(), Ok(&1.0));
        assert_eq!(c.max(), Ok(&2.0));
        assert_eq!(c.min_of(|x| *x), Ok(1.0));
        assert_eq!(c.max_of(|x| *x), Ok(2.0));
    }

    #[test]
    fn test_min_of_all_nan_is_nan() {
        let c = Collection::from_vec(vec![f64::NAN, f64::NAN]);
        assert!(c.min().unwrap().is_nan());
        assert!(c.max_of(|x| *x).unwrap().is_nan());
    }

    #[test]
    fn test_random_without_replacement() {
        let c = numbers();
        let mut rng = StdRng::seed_from_u64(42);
        for count in 1..=c.len() {
            let mut picked = c.random_with(&mut rng, count, false).unwrap();
            assert_eq!(picked.len(), count);
            picked.sort_unstable();
            picked.dedup();
            assert_eq!(picked.len(), count);
            assert!(picked.iter().all(|n| c.contains(n)));
        }
        assert_eq!(c.to_vec(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_random_preserves_order() {
        let c = numbers();
        let mut rng = StdRng::seed_from_u64(7);
        let picked = c.random_with(&mut rng, 4, true).unwrap();
        assert!(picked.windows(2).all(|w| w[0] < w[1]));

        let all = c.random(6, true).unwrap();
        assert_eq!(all, c.to_vec());
    }

    #[rstest]
    #[case(0)]
    #[case(7)]
    fn test_random_count_out_of_range(#[case] count: usize) {
        let err = numbers().random(count, false).unwrap_err();
        assert_eq!(err.code(), "COLLECTION_INVALID_ARGUMENT");
    }

    #[test]
    fn test_random_on_empty() {
        let c = Collection::<i64>::new();
        assert_eq!(c.random(1, false), Err(CollectionError::EmptyCollection));
    }

    #[test]
    fn test_quantifiers() {
        let c = numbers();
        assert!(c.all(|n| *n > 0));
        assert!(!c.all(|n| *n > 1));
        assert!(c.any());
        assert!(c.any_where(|n| *n == 6));
        assert!(!c.any_where(|n| *n == 7));

        let empty = Collection::<i64>::new();
        assert!(empty.all(|_| false));
        assert!(!empty.any());
        assert!(!empty.any_where(|_| true));
    }

    #[test]
    fn test_for_each_returns_receiver() {
        let c = numbers();
        let mut seen = Vec::new();
        let same = c.for_each(|n| seen.push(*n));
        assert_eq!(seen, c.to_vec());
        assert_eq!(same.len(), 6);
    }
}
