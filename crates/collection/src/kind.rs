//! Element kinds and item validation
//!
//! A [`Kind`] is the first-class identity of what a collection may hold:
//! a name, a lineage used for covariance checks, and a chain of
//! [`ItemValidator`]s run on every item that enters the collection.
//!
//! ```rust
//! use ordo_collection::kind::{Kind, ValidationError};
//!
//! let even = Kind::with_validator("even", |n: &i64, _ctx| {
//!     if n % 2 == 0 {
//!         Ok(())
//!     } else {
//!         Err(ValidationError::new("even", "must be even"))
//!     }
//! });
//! assert!(even.accepts(&4));
//! assert!(!even.accepts(&3));
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Name of the top kind that accepts every value.
pub const MIXED: &str = "mixed";

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// Why a single item was rejected.
///
/// `code` is stable and machine-readable; `params` carry the values that
/// were checked (typically the offending value itself).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    /// Error code for programmatic handling, e.g. `"positive"`.
    pub code: Cow<'static, str>,

    /// Human-readable message.
    pub message: Cow<'static, str>,

    /// Ordered key-value parameters.
    pub params: Vec<(Cow<'static, str>, Cow<'static, str>)>,
}

impl ValidationError {
    /// Creates a new validation error with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            params: Vec::new(),
        }
    }

    /// Adds a parameter to the error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Looks up a parameter by key.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_ref())
    }
}

// ============================================================================
// VALIDATOR STRATEGY
// ============================================================================

/// Where an item is being validated.
pub struct ItemContext<'a, T> {
    index: Option<usize>,
    owner: &'a [T],
}

impl<'a, T> ItemContext<'a, T> {
    /// Context for an item at `index` within `owner`.
    pub fn new(index: Option<usize>, owner: &'a [T]) -> Self {
        Self { index, owner }
    }

    /// Context with no position and no owner.
    pub fn detached() -> Self {
        Self {
            index: None,
            owner: &[],
        }
    }

    /// Position the item will occupy, if known.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Items of the owning collection as they will be once the item is
    /// accepted, including the item itself at [`index`](Self::index).
    pub fn owner(&self) -> &'a [T] {
        self.owner
    }
}

impl<T> Clone for ItemContext<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ItemContext<'_, T> {}

impl<T> fmt::Debug for ItemContext<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemContext")
            .field("index", &self.index)
            .field("owner_len", &self.owner.len())
            .finish()
    }
}

/// Per-item check supplied by a concrete kind.
///
/// Implemented for every `Fn(&T, ItemContext<'_, T>) -> Result<(), ValidationError>`
/// closure, so most kinds never name this trait.
pub trait ItemValidator<T>: Send + Sync {
    /// Validates one item.
    fn validate(&self, item: &T, ctx: ItemContext<'_, T>) -> Result<(), ValidationError>;
}

impl<T, F> ItemValidator<T> for F
where
    F: Fn(&T, ItemContext<'_, T>) -> Result<(), ValidationError> + Send + Sync,
{
    fn validate(&self, item: &T, ctx: ItemContext<'_, T>) -> Result<(), ValidationError> {
        self(item, ctx)
    }
}

// ============================================================================
// KIND
// ============================================================================

struct KindInner<T> {
    name: Cow<'static, str>,
    /// Own name first, then ancestors nearest first.
    lineage: Vec<Cow<'static, str>>,
    /// Ancestors' validators first.
    validators: Vec<Arc<dyn ItemValidator<T>>>,
}

/// Identity and constraint of a collection's elements.
///
/// Cloning is cheap (reference-counted).
pub struct Kind<T> {
    inner: Arc<KindInner<T>>,
}

impl<T> Kind<T> {
    /// The top kind: accepts everything, every kind is a subkind of it.
    pub fn any() -> Self {
        Self::new(MIXED)
    }

    /// A named kind without constraints.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        let name = name.into();
        Self {
            inner: Arc::new(KindInner {
                lineage: vec![name.clone()],
                name,
                validators: Vec::new(),
            }),
        }
    }

    /// A named root kind checked by `validator`.
    pub fn with_validator<F>(name: impl Into<Cow<'static, str>>, validator: F) -> Self
    where
        F: Fn(&T, ItemContext<'_, T>) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        Self::with_item_validator(name, validator)
    }

    /// A named root kind checked by a validator object.
    pub fn with_item_validator<V>(name: impl Into<Cow<'static, str>>, validator: V) -> Self
    where
        V: ItemValidator<T> + 'static,
    {
        let name = name.into();
        Self {
            inner: Arc::new(KindInner {
                lineage: vec![name.clone()],
                name,
                validators: vec![Arc::new(validator)],
            }),
        }
    }

    /// A subkind of `parent`.
    ///
    /// Items must pass every validator of `parent` and then `validator`.
    pub fn derive<F>(name: impl Into<Cow<'static, str>>, parent: &Kind<T>, validator: F) -> Self
    where
        F: Fn(&T, ItemContext<'_, T>) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        let name = name.into();
        let mut lineage = Vec::with_capacity(parent.inner.lineage.len() + 1);
        lineage.push(name.clone());
        lineage.extend(parent.inner.lineage.iter().cloned());

        let mut validators = parent.inner.validators.clone();
        validators.push(Arc::new(validator));

        Self {
            inner: Arc::new(KindInner {
                name,
                lineage,
                validators,
            }),
        }
    }

    /// A kind whose lineage is supplied by the caller (e.g. a type registry).
    pub(crate) fn from_lineage<F>(lineage: Vec<Cow<'static, str>>, validator: F) -> Self
    where
        F: Fn(&T, ItemContext<'_, T>) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        let name = lineage
            .first()
            .cloned()
            .unwrap_or(Cow::Borrowed(MIXED));
        Self {
            inner: Arc::new(KindInner {
                name,
                lineage,
                validators: vec![Arc::new(validator)],
            }),
        }
    }

    /// Kind name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Own name followed by ancestors.
    pub fn lineage(&self) -> impl Iterator<Item = &str> {
        self.inner.lineage.iter().map(AsRef::as_ref)
    }

    /// Whether this is the unconstrained top kind.
    pub fn is_any(&self) -> bool {
        self.inner.name == MIXED && self.inner.validators.is_empty()
    }

    /// Whether items of this kind may enter a collection of `other`.
    ///
    /// True for the same kind, any descendant, and always when `other`
    /// is the top kind.
    ///
    /// Kinds are identified by name, so names must be unique per item
    /// type: a second kind named `"integer"` counts as [`kinds::integer`].
    /// Items are still re-validated on insertion, a name clash never lets
    /// a rejected item in.
    ///
    /// [`kinds::integer`]: crate::kinds::integer
    pub fn is_subkind_of(&self, other: &Kind<T>) -> bool {
        other.is_any() || self.inner.lineage.iter().any(|n| n == other.name())
    }

    /// Runs the validator chain against one item.
    pub fn check(&self, item: &T, ctx: ItemContext<'_, T>) -> Result<(), ValidationError> {
        self.inner
            .validators
            .iter()
            .try_for_each(|v| v.validate(item, ctx))
    }

    /// Whether a detached item would be accepted.
    pub fn accepts(&self, item: &T) -> bool {
        self.check(item, ItemContext::detached()).is_ok()
    }
}

impl<T> Clone for Kind<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for Kind<T> {
    fn default() -> Self {
        Self::any()
    }
}

impl<T> PartialEq for Kind<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner.lineage == other.inner.lineage
    }
}

impl<T> Eq for Kind<T> {}

impl<T> fmt::Debug for Kind<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kind")
            .field("name", &self.inner.name)
            .field("lineage", &self.inner.lineage)
            .field("validators", &self.inner.validators.len())
            .finish()
    }
}

impl<T> fmt::Display for Kind<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positive() -> Kind<i64> {
        Kind::with_validator("positive", |n: &i64, _ctx| {
            if *n > 0 {
                Ok(())
            } else {
                Err(ValidationError::new("positive", "must be positive")
                    .with_param("value", n.to_string()))
            }
        })
    }

    #[test]
    fn test_any_accepts_everything() {
        let kind = Kind::<i64>::any();
        assert!(kind.is_any());
        assert!(kind.accepts(&-1));
        assert_eq!(kind.name(), MIXED);
    }

    #[test]
    fn test_validator_reports_param() {
        let err = positive().check(&-3, ItemContext::detached()).unwrap_err();
        assert_eq!(err.code, "positive");
        assert_eq!(err.param("value"), Some("-3"));
        assert_eq!(err.param("missing"), None);
    }

    #[test]
    fn test_derive_chains_parent_validators() {
        let small_positive = Kind::derive("small_positive", &positive(), |n: &i64, _ctx| {
            if *n < 10 {
                Ok(())
            } else {
                Err(ValidationError::new("small", "must be below 10"))
            }
        });

        assert!(small_positive.accepts(&5));
        assert_eq!(
            small_positive
                .check(&-5, ItemContext::detached())
                .unwrap_err()
                .code,
            "positive"
        );
        assert_eq!(
            small_positive
                .check(&50, ItemContext::detached())
                .unwrap_err()
                .code,
            "small"
        );
        assert_eq!(
            small_positive.lineage().collect::<Vec<_>>(),
            vec!["small_positive", "positive"]
        );
    }

    #[test]
    fn test_subkind_relation() {
        let parent = positive();
        let child = Kind::derive("child", &parent, |_: &i64, _ctx| Ok(()));
        let unrelated = Kind::<i64>::new("unrelated");

        assert!(child.is_subkind_of(&parent));
        assert!(parent.is_subkind_of(&parent));
        assert!(!parent.is_subkind_of(&child));
        assert!(!unrelated.is_subkind_of(&parent));
        assert!(unrelated.is_subkind_of(&Kind::any()));
    }

    #[test]
    fn test_context_exposes_owner() {
        let unique = Kind::with_validator("unique", |n: &i64, ctx: ItemContext<'_, i64>| {
            if ctx.owner().contains(n) {
                Err(ValidationError::new("unique", "already present"))
            } else {
                Ok(())
            }
        });
        let owner = [1, 2, 3];
        assert!(unique.check(&2, ItemContext::new(Some(3), &owner)).is_err());
        assert!(unique.check(&4, ItemContext::new(Some(3), &owner)).is_ok());
    }
}
