//! Serde support for collections
//!
//! Both collection types serialize as a plain sequence of their items.
//! Deserializing `Collection<T>` directly yields a top-kind collection;
//! use [`KindSeed`] to deserialize into a specific kind so every item is
//! validated on the way in.
//!
//! ```rust
//! use ordo_collection::{kinds, serialization::KindSeed};
//! use serde::de::DeserializeSeed;
//!
//! let mut de = serde_json::Deserializer::from_str("[1, 2, 3]");
//! let numbers = KindSeed::new(kinds::positive_integer()).deserialize(&mut de)?;
//! assert_eq!(numbers.to_vec(), vec![1, 2, 3]);
//! # Ok::<(), serde_json::Error>(())
//! ```

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, DeserializeSeed, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::collection::Collection;
use crate::immutable::ImmutableCollection;
use crate::kind::Kind;
use crate::limits::CollectionLimits;

impl<T: Serialize> Serialize for Collection<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for item in self.to_serializable() {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

impl<T: Serialize> Serialize for ImmutableCollection<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (**self).serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Collection<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        KindSeed::new(Kind::any()).deserialize(deserializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ImmutableCollection<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Collection::deserialize(deserializer).map(Self::from)
    }
}

/// Deserializes a sequence into a collection of a given kind.
///
/// The length limit is enforced while reading, before the remaining
/// input is consumed.
#[derive(Debug, Clone)]
pub struct KindSeed<T> {
    kind: Kind<T>,
    limits: CollectionLimits,
}

impl<T> KindSeed<T> {
    /// Seed for `kind` with default limits.
    pub fn new(kind: Kind<T>) -> Self {
        Self::with_limits(kind, CollectionLimits::default())
    }

    /// Seed for `kind` with explicit limits.
    pub fn with_limits(kind: Kind<T>, limits: CollectionLimits) -> Self {
        Self { kind, limits }
    }
}

impl<'de, T: Deserialize<'de>> DeserializeSeed<'de> for KindSeed<T> {
    type Value = Collection<T>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(SeqVisitor {
            seed: self,
            marker: PhantomData,
        })
    }
}

struct SeqVisitor<T> {
    seed: KindSeed<T>,
    marker: PhantomData<fn() -> T>,
}

impl<'de, T: Deserialize<'de>> Visitor<'de> for SeqVisitor<T> {
    type Value = Collection<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a sequence of {} items", self.seed.kind)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let KindSeed { kind, limits } = self.seed;
        let capacity = seq.size_hint().unwrap_or(0).min(limits.max_len).min(4096);
        let mut items = Vec::with_capacity(capacity);

        while let Some(item) = seq.next_element::<T>()? {
            limits
                .check_len(items.len() + 1)
                .map_err(de::Error::custom)?;
            items.push(item);
        }

        Collection::with_limits(kind, items, limits).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_serializes_as_plain_sequence() {
        let c = Collection::typed(kinds::integer(), vec![1, 2, 3]).unwrap();
        assert_eq!(serde_json::to_string(&c).unwrap(), "[1,2,3]");
        assert_eq!(serde_json::to_string(&c.clone().into_immutable()).unwrap(), "[1,2,3]");
    }

    #[test]
    fn test_plain_deserialize_is_mixed() {
        let c: Collection<String> = serde_json::from_str(r#"["a","b"]"#).unwrap();
        assert!(c.kind().is_any());
        assert_eq!(c.to_vec(), vec!["a", "b"]);
    }

    #[test]
    fn test_seed_validates_items() {
        let mut de = serde_json::Deserializer::from_str("[3, -1]");
        let err = KindSeed::new(kinds::positive_integer())
            .deserialize(&mut de)
            .unwrap_err();
        assert!(err.to_string().contains("positive_integer"), "{err}");
    }

    #[test]
    fn test_seed_enforces_limits() {
        let mut de = serde_json::Deserializer::from_str("[1, 2, 3]");
        let err = KindSeed::with_limits(kinds::integer(), CollectionLimits::with_max_len(2))
            .deserialize(&mut de)
            .unwrap_err();
        assert!(err.to_string().contains("max_len"), "{err}");
    }
}
