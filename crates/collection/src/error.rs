//! Collection error types
//!
//! Every fallible collection operation returns [`CollectionError`]. The
//! variants describe programmer/logic errors, none of them are retryable.

use thiserror::Error;

use crate::kind::ValidationError;

// ============================================================================
// MAIN ERROR TYPE
// ============================================================================

/// Collection operation errors
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// Operation requires at least one item
    #[error("Collection is empty")]
    EmptyCollection,

    /// A predicate matched nothing
    #[error("No item matches the predicate")]
    NoPredicateResult,

    /// `single` found more than one item
    #[error("Collection contains more than one item ({count})")]
    TooManyItems { count: usize },

    /// `single_where` found more than one match
    #[error("More than one item matches the predicate ({count})")]
    TooManyPredicateResults { count: usize },

    /// Item rejected by the collection's validator
    #[error("Invalid item{} for kind '{kind}': {source}", fmt_index(.index))]
    InvalidItem {
        kind: String,
        index: Option<usize>,
        #[source]
        source: ValidationError,
    },

    /// `remove` target is absent
    #[error("Item not found in collection")]
    ItemNotFound,

    /// Argument collection is not the same kind or a subkind
    #[error("Cannot merge collection of kind '{actual}' into '{expected}'")]
    IncompatibleCollectionKind { expected: String, actual: String },

    /// Named target resolves to a type that is not a collection kind
    #[error("Target '{target}' is not a collection kind")]
    IncompatibleTargetKind { target: String },

    /// Named target cannot be resolved
    #[error("Unknown target kind '{name}'")]
    UnknownTargetKind { name: String },

    /// Argument outside its domain
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    /// Direct index write/delete
    #[error("Operation '{operation}' is not supported, use the named collection operations")]
    UnsupportedOperation { operation: String },

    /// Read outside `0..len`
    #[error("Index {index} out of bounds (length: {length})")]
    IndexOutOfBounds { index: usize, length: usize },

    /// Configured size limit exceeded
    #[error("{limit} exceeded: {actual} > {max}")]
    LimitExceeded {
        limit: String,
        max: usize,
        actual: usize,
    },
}

fn fmt_index(index: &Option<usize>) -> String {
    index.map(|i| format!(" at index {i}")).unwrap_or_default()
}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl CollectionError {
    /// Create an invalid item error
    pub fn invalid_item(
        kind: impl Into<String>,
        index: Option<usize>,
        source: ValidationError,
    ) -> Self {
        Self::InvalidItem {
            kind: kind.into(),
            index,
            source,
        }
    }

    /// Create an incompatible collection kind error
    pub fn incompatible_kind(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::IncompatibleCollectionKind {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an incompatible target kind error
    pub fn incompatible_target(target: impl Into<String>) -> Self {
        Self::IncompatibleTargetKind {
            target: target.into(),
        }
    }

    /// Create an unknown target kind error
    pub fn unknown_target(name: impl Into<String>) -> Self {
        Self::UnknownTargetKind { name: name.into() }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an unsupported operation error
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            operation: operation.into(),
        }
    }

    /// Create an index out of bounds error
    pub fn index_out_of_bounds(index: usize, length: usize) -> Self {
        Self::IndexOutOfBounds { index, length }
    }

    /// Create a limit exceeded error
    pub fn limit_exceeded(limit: impl Into<String>, max: usize, actual: usize) -> Self {
        Self::LimitExceeded {
            limit: limit.into(),
            max,
            actual,
        }
    }
}

// ============================================================================
// ERROR CLASSIFICATION
// ============================================================================

impl CollectionError {
    /// Get error code for monitoring
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyCollection => "COLLECTION_EMPTY",
            Self::NoPredicateResult => "COLLECTION_NO_PREDICATE_RESULT",
            Self::TooManyItems { .. } => "COLLECTION_TOO_MANY_ITEMS",
            Self::TooManyPredicateResults { .. } => "COLLECTION_TOO_MANY_PREDICATE_RESULTS",
            Self::InvalidItem { .. } => "COLLECTION_INVALID_ITEM",
            Self::ItemNotFound => "COLLECTION_ITEM_NOT_FOUND",
            Self::IncompatibleCollectionKind { .. } => "COLLECTION_INCOMPATIBLE_KIND",
            Self::IncompatibleTargetKind { .. } => "COLLECTION_INCOMPATIBLE_TARGET",
            Self::UnknownTargetKind { .. } => "COLLECTION_UNKNOWN_TARGET",
            Self::InvalidArgument { .. } => "COLLECTION_INVALID_ARGUMENT",
            Self::UnsupportedOperation { .. } => "COLLECTION_UNSUPPORTED_OPERATION",
            Self::IndexOutOfBounds { .. } => "COLLECTION_INDEX_OUT_OF_BOUNDS",
            Self::LimitExceeded { .. } => "COLLECTION_LIMIT_EXCEEDED",
        }
    }

    /// Check if this is a client error (caller's fault)
    ///
    /// Only configured limits are environmental, everything else is a
    /// misuse of the API or bad input.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::LimitExceeded { .. })
    }

    /// Check if the error reports a missing element
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Self::EmptyCollection | Self::NoPredicateResult)
    }
}

// ============================================================================
// RESULT TYPE
// ============================================================================

/// Result type alias for collection operations
pub type CollectionResult<T> = Result<T, CollectionError>;
