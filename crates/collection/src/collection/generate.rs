//! Generated sequences: numeric and alphabetic ranges, repetition

use super::Collection;
use crate::error::{CollectionError, CollectionResult};
use crate::kind::Kind;
use crate::kinds;
use crate::limits::CollectionLimits;

impl Collection<i64> {
    /// Integers from `start` towards `end` (exclusive) in steps of `step`.
    ///
    /// A negative `step` counts down. A range that moves away from `end`
    /// is empty.
    ///
    /// ```rust
    /// use ordo_collection::Collection;
    ///
    /// assert_eq!(Collection::range(0, 10, 3)?.to_vec(), vec![0, 3, 6, 9]);
    /// assert_eq!(Collection::range(5, 0, -2)?.to_vec(), vec![5, 3, 1]);
    /// # Ok::<(), ordo_collection::CollectionError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `step` is zero, `LimitExceeded` if the range is
    /// longer than the default limit
    pub fn range(start: i64, end: i64, step: i64) -> CollectionResult<Self> {
        if step == 0 {
            return Err(CollectionError::invalid_argument("step", "step must not be zero"));
        }

        let span = i128::from(end) - i128::from(start);
        let step_wide = i128::from(step);
        let len = if span != 0 && (span > 0) == (step > 0) {
            (span.abs() - 1) / step_wide.abs() + 1
        } else {
            0
        };
        let len = usize::try_from(len).unwrap_or(usize::MAX);

        let limits = CollectionLimits::default();
        limits.check_len(len)?;

        // Every generated value lies between start and end, so it fits in i64.
        let items = (0..len).map(|i| (i128::from(start) + step_wide * i as i128) as i64);
        Self::with_limits(kinds::integer(), items, limits)
    }
}

impl Collection<char> {
    /// Characters from `start` to `end`, both inclusive.
    ///
    /// Descends when `start > end`. Code points that are not valid
    /// characters (surrogates) are skipped.
    pub fn char_range(start: char, end: char) -> CollectionResult<Self> {
        let items: Vec<char> = if start <= end {
            (start..=end).collect()
        } else {
            (end..=start).rev().collect()
        };
        Self::typed(kinds::character(), items)
    }
}

impl<T: Clone> Collection<T> {
    /// `count` copies of `value`, validated against `kind`.
    ///
    /// # Errors
    ///
    /// `InvalidItem` if `kind` rejects `value`, `LimitExceeded` if `count`
    /// is above the default limit
    pub fn repeat(kind: Kind<T>, value: T, count: usize) -> CollectionResult<Self> {
        let limits = CollectionLimits::default();
        limits.check_len(count)?;
        Self::with_limits(kind, std::iter::repeat_n(value, count), limits)
    }
}
