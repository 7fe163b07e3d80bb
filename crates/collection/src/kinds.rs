//! Built-in element kinds
//!
//! The primitive kinds (`boolean`, `integer`, `float`, `string`,
//! `character`) carry no validator: the item type already rules out
//! foreign values. Refined kinds derive from them and add a check.
//!
//! | Kind | Item type | Parent | Rejects |
//! |------|-----------|--------|---------|
//! | `boolean` | `bool` | | |
//! | `integer` | `i64` | | |
//! | `positive_integer` | `i64` | `integer` | `<= 0` |
//! | `float` | `f64` | | |
//! | `finite_float` | `f64` | `float` | NaN, infinities |
//! | `string` | `String` | | |
//! | `non_empty_string` | `String` | `string` | `""` |
//! | `character` | `char` | | |
//! | [`class_of`] | `T: Classified` | | other types |

use std::sync::Arc;

use crate::error::{CollectionError, CollectionResult};
use crate::kind::{ItemContext, Kind, ValidationError};
use crate::registry::{Classified, TypeRegistry};

/// Booleans.
pub fn boolean() -> Kind<bool> {
    Kind::new("boolean")
}

/// Signed 64-bit integers.
pub fn integer() -> Kind<i64> {
    Kind::new("integer")
}

/// Integers greater than zero; a subkind of [`integer`].
pub fn positive_integer() -> Kind<i64> {
    Kind::derive("positive_integer", &integer(), |n: &i64, _ctx| {
        if *n > 0 {
            Ok(())
        } else {
            Err(ValidationError::new("positive", "must be greater than zero")
                .with_param("value", n.to_string()))
        }
    })
}

/// 64-bit floats.
pub fn float() -> Kind<f64> {
    Kind::new("float")
}

/// Floats that are neither NaN nor infinite; a subkind of [`float`].
pub fn finite_float() -> Kind<f64> {
    Kind::derive("finite_float", &float(), |x: &f64, _ctx| {
        if x.is_finite() {
            Ok(())
        } else {
            Err(ValidationError::new("finite", "must be a finite number")
                .with_param("value", x.to_string()))
        }
    })
}

/// Owned strings.
pub fn string() -> Kind<String> {
    Kind::new("string")
}

/// Strings with at least one character; a subkind of [`string`].
pub fn non_empty_string() -> Kind<String> {
    Kind::derive("non_empty_string", &string(), |s: &String, _ctx| {
        if s.is_empty() {
            Err(ValidationError::new("non_empty", "must not be empty"))
        } else {
            Ok(())
        }
    })
}

/// Unicode scalar values.
pub fn character() -> Kind<char> {
    Kind::new("character")
}

/// Instances of the registered type `name` or any of its subtypes.
///
/// The kind's lineage mirrors the type hierarchy, so a `class_of("Dog")`
/// collection may be concatenated into a `class_of("Animal")` one.
/// The registry is snapshotted; later registrations are not seen.
///
/// # Errors
///
/// Returns `UnknownTargetKind` if `name` is not registered
pub fn class_of<T: Classified>(types: &TypeRegistry, name: &str) -> CollectionResult<Kind<T>> {
    let lineage = types
        .owned_lineage(name)
        .ok_or_else(|| CollectionError::unknown_target(name))?;
    let snapshot = Arc::new(types.clone());
    let target = name.to_owned();

    Ok(Kind::from_lineage(
        lineage,
        move |item: &T, _ctx: ItemContext<'_, T>| {
            let class = item.class_name();
            if snapshot.is_subtype(class, &target) {
                Ok(())
            } else {
                Err(
                    ValidationError::new("class", format!("must be an instance of '{target}'"))
                        .with_param("class", class.to_owned()),
                )
            }
        },
    ))
}
