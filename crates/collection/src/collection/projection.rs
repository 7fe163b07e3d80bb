//! Aggregation, projection, grouping and conversion

use std::hash::Hash;

use indexmap::IndexMap;
use num_traits::ToPrimitive;
use tracing::debug;

use super::{Collection, validate_batch};
use crate::error::{CollectionError, CollectionResult};
use crate::kind::Kind;
use crate::registry::KindRegistry;

/// Lossy numeric view; unrepresentable values become NaN.
fn as_f64<V: ToPrimitive>(value: &V) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

impl<T> Collection<T> {
    // ==================== Aggregation ====================

    /// Floating-point total of the items; `0.0` when empty.
    pub fn sum(&self) -> f64
    where
        T: ToPrimitive,
    {
        self.items.iter().map(as_f64).sum()
    }

    /// Floating-point total of `selector` over the items; `0.0` when empty.
    pub fn sum_of<V, F>(&self, mut selector: F) -> f64
    where
        V: ToPrimitive,
        F: FnMut(&T) -> V,
    {
        self.items.iter().map(|item| as_f64(&selector(item))).sum()
    }

    /// Arithmetic mean of the items.
    ///
    /// # Errors
    ///
    /// Returns `EmptyCollection` if there are no items
    pub fn average(&self) -> CollectionResult<f64>
    where
        T: ToPrimitive,
    {
        self.mean(self.sum())
    }

    /// Arithmetic mean of `selector` over the items.
    ///
    /// # Errors
    ///
    /// Returns `EmptyCollection` if there are no items
    pub fn average_of<V, F>(&self, selector: F) -> CollectionResult<f64>
    where
        V: ToPrimitive,
        F: FnMut(&T) -> V,
    {
        self.mean(self.sum_of(selector))
    }

    fn mean(&self, total: f64) -> CollectionResult<f64> {
        if self.items.is_empty() {
            return Err(CollectionError::EmptyCollection);
        }
        Ok(total / self.items.len() as f64)
    }

    /// Left fold: `seed = f(seed, item)` for every item in order.
    pub fn aggregate<A, F>(&self, seed: A, f: F) -> A
    where
        F: FnMut(A, &T) -> A,
    {
        self.items.iter().fold(seed, f)
    }

    // ==================== Projection ====================

    /// Maps every item through `selector(item, index)`.
    ///
    /// The result is of the top kind: the receiver's validators do not
    /// constrain projected values.
    pub fn select<U, F>(&self, mut selector: F) -> Collection<U>
    where
        F: FnMut(&T, usize) -> U,
    {
        let items = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| selector(item, index))
            .collect();
        self.derived(Kind::any(), items)
    }

    /// Flattens the sequences produced by `selector`, item-major.
    ///
    /// # Errors
    ///
    /// Returns `LimitExceeded` once the flattened output outgrows the
    /// receiver's limits
    pub fn select_many<U, I, F>(&self, selector: F) -> CollectionResult<Collection<U>>
    where
        I: IntoIterator<Item = U>,
        F: FnMut(&T) -> I,
    {
        self.select_many_with(selector, |_, sub| sub)
    }

    /// Flattens the sequences produced by `selector`, combining every
    /// sub-item with its parent through `result`.
    ///
    /// # Errors
    ///
    /// Same as [`select_many`](Self::select_many)
    pub fn select_many_with<S, I, U, F, R>(
        &self,
        mut selector: F,
        mut result: R,
    ) -> CollectionResult<Collection<U>>
    where
        I: IntoIterator<Item = S>,
        F: FnMut(&T) -> I,
        R: FnMut(&T, S) -> U,
    {
        let mut items = Vec::new();
        for item in &self.items {
            for sub in selector(item) {
                self.limits.check_len(items.len() + 1)?;
                items.push(result(item, sub));
            }
        }
        Ok(self.derived(Kind::any(), items))
    }

    /// Groups items by key.
    ///
    /// Keys keep first-seen order, items keep insertion order within their
    /// group. Every group has the receiver's kind.
    pub fn group_by<K, F>(&self, mut key: F) -> IndexMap<K, Self>
    where
        T: Clone,
        K: Eq + Hash,
        F: FnMut(&T) -> K,
    {
        let mut groups: IndexMap<K, Vec<T>> = IndexMap::new();
        for item in &self.items {
            groups.entry(key(item)).or_default().push(item.clone());
        }
        groups
            .into_iter()
            .map(|(k, items)| (k, self.derived(self.kind.clone(), items)))
            .collect()
    }

    /// Inner join on equal keys.
    ///
    /// Nested-loop semantics: output is ordered by receiver item, then by
    /// `other` item, and duplicate keys fan out.
    ///
    /// # Errors
    ///
    /// Returns `LimitExceeded` if the fan-out outgrows the receiver's limits
    pub fn join<S, O, K, U, KF, OKF, R>(
        &self,
        other: &S,
        key: KF,
        other_key: OKF,
        result: R,
    ) -> CollectionResult<Collection<U>>
    where
        S: AsRef<[O]> + ?Sized,
        K: PartialEq,
        KF: FnMut(&T) -> K,
        OKF: FnMut(&O) -> K,
        R: FnMut(&T, &O) -> U,
    {
        self.join_by(other, key, other_key, result, |a, b| a == b)
    }

    /// Inner join with a custom key comparer `(key, other_key)`.
    pub fn join_by<S, O, K, U, KF, OKF, R, C>(
        &self,
        other: &S,
        mut key: KF,
        other_key: OKF,
        mut result: R,
        mut comparer: C,
    ) -> CollectionResult<Collection<U>>
    where
        S: AsRef<[O]> + ?Sized,
        KF: FnMut(&T) -> K,
        OKF: FnMut(&O) -> K,
        R: FnMut(&T, &O) -> U,
        C: FnMut(&K, &K) -> bool,
    {
        let other = other.as_ref();
        let other_keys: Vec<K> = other.iter().map(other_key).collect();
        let mut rows = Vec::new();
        for item in &self.items {
            let k = key(item);
            for (candidate, candidate_key) in other.iter().zip(&other_keys) {
                if comparer(&k, candidate_key) {
                    self.limits.check_len(rows.len() + 1)?;
                    rows.push(result(item, candidate));
                }
            }
        }
        Ok(self.derived(Kind::any(), rows))
    }

    // ==================== Conversion ====================

    /// Snapshot of the items in order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.clone()
    }

    /// Copies the items into a new collection of `target`.
    ///
    /// Every item is re-validated against `target`; the receiver's kind
    /// does not need to be related to it.
    ///
    /// # Errors
    ///
    /// `InvalidItem` for the first item `target` rejects
    pub fn to_collection(&self, target: &Kind<T>) -> CollectionResult<Self>
    where
        T: Clone,
    {
        validate_batch(target, &self.items, 0, &self.items)?;
        Ok(self.derived(target.clone(), self.items.clone()))
    }

    /// Like [`to_collection`](Self::to_collection) with the target kind
    /// resolved by name.
    ///
    /// # Errors
    ///
    /// - `UnknownTargetKind` if `name` is not known to `registry`
    /// - `IncompatibleTargetKind` if `name` is a type but not a collection kind
    /// - `InvalidItem` as for `to_collection`
    pub fn to_collection_named(&self, registry: &KindRegistry<T>, name: &str) -> CollectionResult<Self>
    where
        T: Clone,
    {
        let target = registry.resolve(name).inspect_err(|err| {
            debug!(from = %self.kind, to = name, code = err.code(), "conversion refused");
        })?;
        self.to_collection(&target)
    }
}
