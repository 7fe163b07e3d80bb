//! Prelude module for convenient imports.
//!
//! ```rust
//! use ordo_collection::prelude::*;
//!
//! let words = Collection::typed(kinds::non_empty_string(), vec!["a".to_string()])?;
//! assert_eq!(words.count(), 1);
//! # Ok::<(), CollectionError>(())
//! ```

pub use crate::collection::Collection;
pub use crate::error::{CollectionError, CollectionResult};
pub use crate::immutable::ImmutableCollection;
pub use crate::kind::{ItemContext, ItemValidator, Kind, ValidationError};
pub use crate::kinds;
pub use crate::limits::CollectionLimits;
pub use crate::registry::{Classified, KindRegistry, TypeRegistry};

#[cfg(feature = "serde")]
pub use crate::serialization::KindSeed;
