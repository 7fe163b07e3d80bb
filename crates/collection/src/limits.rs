//! Collection size limits
//!
//! Limits bound how large a collection may grow through construction and
//! insertion, guarding against accidental memory blow-ups.

use crate::error::{CollectionError, CollectionResult};

/// Configurable limits for collection growth
///
/// # Example
///
/// ```
/// use ordo_collection::CollectionLimits;
///
/// let limits = CollectionLimits::default();
/// assert_eq!(limits.max_len, 1_000_000);
///
/// let strict = CollectionLimits::strict();
/// assert_eq!(strict.max_len, 10_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollectionLimits {
    /// Maximum number of items
    pub max_len: usize,
}

impl Default for CollectionLimits {
    fn default() -> Self {
        Self {
            max_len: 1_000_000, // 1M items
        }
    }
}

impl CollectionLimits {
    /// Limits with an explicit maximum length
    pub const fn with_max_len(max_len: usize) -> Self {
        Self { max_len }
    }

    /// Permissive limits for trusted environments
    pub const fn permissive() -> Self {
        Self {
            max_len: 10_000_000,
        }
    }

    /// Strict limits for untrusted input
    pub const fn strict() -> Self {
        Self { max_len: 10_000 }
    }

    /// No limits (use with caution!)
    pub const fn unlimited() -> Self {
        Self {
            max_len: usize::MAX,
        }
    }

    /// Check a prospective collection length
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::LimitExceeded` if `len > max_len`
    pub fn check_len(&self, len: usize) -> CollectionResult<()> {
        if len > self.max_len {
            return Err(CollectionError::limit_exceeded(
                "max_len",
                self.max_len,
                len,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_ordered() {
        assert!(CollectionLimits::strict().max_len < CollectionLimits::default().max_len);
        assert!(CollectionLimits::default().max_len < CollectionLimits::permissive().max_len);
        assert_eq!(CollectionLimits::unlimited().max_len, usize::MAX);
    }

    #[test]
    fn test_check_len() {
        let limits = CollectionLimits::with_max_len(3);
        assert!(limits.check_len(3).is_ok());

        let err = limits.check_len(4).unwrap_err();
        assert_eq!(
            err,
            CollectionError::LimitExceeded {
                limit: "max_len".into(),
                max: 3,
                actual: 4,
            }
        );
    }
}
