//! Named type hierarchy and collection-kind lookup
//!
//! [`TypeRegistry`] records which type names exist and who their parent
//! is. Class kinds use it to accept "instances of a type or its subtypes".
//! [`KindRegistry`] layers named collection kinds on top so a target kind
//! can be resolved from a string at call time.

use std::borrow::Cow;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{CollectionError, CollectionResult};
use crate::kind::Kind;

// ============================================================================
// CLASSIFIED
// ============================================================================

/// Items that report the name of their runtime type.
pub trait Classified {
    /// Registered type name of this value.
    fn class_name(&self) -> &str;
}

impl<C: Classified + ?Sized> Classified for &C {
    fn class_name(&self) -> &str {
        (**self).class_name()
    }
}

impl<C: Classified + ?Sized> Classified for Box<C> {
    fn class_name(&self) -> &str {
        (**self).class_name()
    }
}

impl<C: Classified + ?Sized> Classified for Arc<C> {
    fn class_name(&self) -> &str {
        (**self).class_name()
    }
}

// ============================================================================
// TYPE REGISTRY
// ============================================================================

/// Single-inheritance type hierarchy keyed by name.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    /// name -> parent
    types: IndexMap<String, Option<String>>,
}

impl TypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type without a parent.
    pub fn register_root(&mut self, name: impl Into<String>) -> CollectionResult<&mut Self> {
        self.insert(name.into(), None)
    }

    /// Registers `name` as a direct subtype of `parent`.
    ///
    /// Fails with `UnknownTargetKind` if `parent` is not registered.
    pub fn register_subtype(
        &mut self,
        name: impl Into<String>,
        parent: &str,
    ) -> CollectionResult<&mut Self> {
        if !self.contains(parent) {
            return Err(CollectionError::unknown_target(parent));
        }
        self.insert(name.into(), Some(parent.to_owned()))
    }

    fn insert(&mut self, name: String, parent: Option<String>) -> CollectionResult<&mut Self> {
        if self.types.contains_key(&name) {
            return Err(CollectionError::invalid_argument(
                "name",
                format!("type '{name}' is already registered"),
            ));
        }
        self.types.insert(name, parent);
        Ok(self)
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Direct parent of `name`.
    pub fn parent(&self, name: &str) -> Option<&str> {
        self.types.get(name).and_then(|p| p.as_deref())
    }

    /// `name` followed by its ancestors, nearest first.
    pub fn lineage(&self, name: &str) -> Option<Vec<&str>> {
        let (first, _) = self.types.get_key_value(name)?;
        let mut chain = vec![first.as_str()];
        let mut current = first.as_str();
        while let Some(parent) = self.parent(current) {
            chain.push(parent);
            current = parent;
        }
        Some(chain)
    }

    /// Whether `name` is `ancestor` or (transitively) derives from it.
    pub fn is_subtype(&self, name: &str, ancestor: &str) -> bool {
        self.lineage(name)
            .is_some_and(|chain| chain.contains(&ancestor))
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub(crate) fn owned_lineage(&self, name: &str) -> Option<Vec<Cow<'static, str>>> {
        self.lineage(name).map(|chain| {
            chain
                .into_iter()
                .map(|n| Cow::Owned(n.to_owned()))
                .collect()
        })
    }
}

// ============================================================================
// KIND REGISTRY
// ============================================================================

/// Collection kinds resolvable by name.
#[derive(Debug, Clone)]
pub struct KindRegistry<T> {
    types: TypeRegistry,
    kinds: IndexMap<String, Kind<T>>,
}

impl<T> KindRegistry<T> {
    /// Registry over a type hierarchy.
    pub fn new(types: TypeRegistry) -> Self {
        Self {
            types,
            kinds: IndexMap::new(),
        }
    }

    /// Registers `kind` under its own name, replacing any previous entry.
    pub fn register(&mut self, kind: Kind<T>) -> &mut Self {
        self.kinds.insert(kind.name().to_owned(), kind);
        self
    }

    /// The underlying type hierarchy.
    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// Resolves a collection kind by name.
    ///
    /// - registered kind → the kind
    /// - known type that is not a collection kind → `IncompatibleTargetKind`
    /// - anything else → `UnknownTargetKind`
    pub fn resolve(&self, name: &str) -> CollectionResult<Kind<T>> {
        if let Some(kind) = self.kinds.get(name) {
            return Ok(kind.clone());
        }
        if self.types.contains(name) {
            return Err(CollectionError::incompatible_target(name));
        }
        Err(CollectionError::unknown_target(name))
    }

    /// Registered kind names in registration order.
    pub fn kind_names(&self) -> impl Iterator<Item = &str> {
        self.kinds.keys().map(String::as_str)
    }
}

impl<T> Default for KindRegistry<T> {
    fn default() -> Self {
        Self::new(TypeRegistry::new())
    }
}
