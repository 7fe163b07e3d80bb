//! # ordo-collection
//!
//! Strongly-typed, validated collections with chainable LINQ-style
//! operations: element access, partitioning, ordering, set algebra,
//! aggregation, projection and quantifiers.
//!
//! ## Quick Start
//!
//! ```rust
//! use ordo_collection::prelude::*;
//!
//! let mut scores = Collection::typed(kinds::positive_integer(), vec![7, 3, 9, 3])?;
//! scores.distinct().sort_descending().take(2);
//! assert_eq!(scores.to_vec(), vec![9, 7]);
//! assert_eq!(scores.sum(), 16.0);
//!
//! // Items are validated on every way in.
//! assert!(scores.push(0).is_err());
//! # Ok::<(), CollectionError>(())
//! ```
//!
//! ## Kinds
//!
//! Every collection has a [`Kind`]: a name, a lineage and the validators
//! its items must pass. A collection of a subkind may be concatenated into
//! a collection of its parent kind, never the reverse. Built-in kinds live
//! in [`kinds`]; class hierarchies are described with a [`TypeRegistry`].
//!
//! ## Mutation policies
//!
//! - [`Collection`] mutates in place and returns `&mut Self` for chaining.
//! - [`ImmutableCollection`] returns a modified copy from every mutating
//!   operation and leaves the receiver untouched.
//!
//! ## Features
//!
//! - `serde` (default): `Serialize`/`Deserialize` for both collection
//!   types and the validating [`serialization::KindSeed`].

// `CollectionError::InvalidItem` carries the full `ValidationError`;
// boxing it would only add an allocation on the error path.
#![allow(clippy::result_large_err)]

pub mod collection;
pub mod error;
pub mod immutable;
pub mod kind;
pub mod kinds;
pub mod limits;
pub mod prelude;
pub mod registry;
#[cfg(feature = "serde")]
pub mod serialization;

pub use collection::Collection;
pub use error::{CollectionError, CollectionResult};
pub use immutable::ImmutableCollection;
pub use kind::{ItemContext, ItemValidator, Kind, ValidationError};
pub use limits::CollectionLimits;
pub use registry::{Classified, KindRegistry, TypeRegistry};
