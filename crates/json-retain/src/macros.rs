//! The [`retain!`](crate::retain) mapping-declaration macro.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{DecodeError, EncodeError};

/// Serializes one field value, attributing failures to its wire-key.
#[doc(hidden)]
pub fn to_field_value<T: Serialize>(key: &'static str, field: &T) -> Result<Value, EncodeError> {
    serde_json::to_value(field).map_err(|source| EncodeError::Field { key, source })
}

/// Deserializes one field value, attributing failures to its wire-key.
#[doc(hidden)]
pub fn from_field_value<T: DeserializeOwned>(
    key: &'static str,
    value: Value,
) -> Result<T, DecodeError> {
    serde_json::from_value(value).map_err(|source| DecodeError::Field { key, source })
}

/// Declares a record's wire-key mapping and implements [`Retain`] for it.
///
/// The record is an ordinary struct declared separately; the macro lists
/// which of its fields travel under which wire-key, which field holds the
/// [`UnknownFieldStore`], and (optionally) which fields are deliberately
/// excluded from the wire in both directions:
///
/// ```
/// use json_retain::UnknownFieldStore;
///
/// #[derive(Debug, Default)]
/// struct Page {
///     title: String,
///     slug: String,
///     render_cache: Option<String>,
///     extra: UnknownFieldStore,
/// }
///
/// json_retain::retain! {
///     Page {
///         store: extra,
///         fields: {
///             "title" => title,
///             "slug" => slug,
///         },
///         skip: { render_cache },
///     }
/// }
///
/// let page: Page = json_retain::from_str(r#"{"title":"Hi","x":1}"#).unwrap();
/// assert_eq!(page.title, "Hi");
/// assert!(page.extra.contains_key("x"));
/// ```
///
/// Fields that appear in neither `fields` nor `skip` behave exactly like
/// skipped ones (no wire-key, never serialized, never written on decode);
/// the `skip` section is the explicit marker and also checks at compile
/// time that the named fields exist. The store field must not be listed
/// under `fields`; it is not a normal wire field.
///
/// Bindings keep the listed order. Duplicate wire-keys are reported as a
/// [`MappingError`](crate::MappingError) when the mapping is first resolved,
/// before any decode or encode runs.
///
/// [`Retain`]: crate::Retain
/// [`UnknownFieldStore`]: crate::UnknownFieldStore
#[macro_export]
macro_rules! retain {
    (@impl $record:ty, $store:ident, [ $( $key:literal => $field:ident ),* ], [ $( $skip:ident ),* ]) => {
        impl $crate::Retain for $record {
            const BINDINGS: &'static [$crate::FieldBinding<Self>] = &[
                $(
                    $crate::FieldBinding::new(
                        $key,
                        |record| $crate::to_field_value($key, &record.$field),
                        |record, value| {
                            record.$field = $crate::from_field_value($key, value)?;
                            Ok(())
                        },
                    ),
                )*
            ];

            fn unknown_fields(&self) -> &$crate::UnknownFieldStore {
                &self.$store
            }

            fn unknown_fields_mut(&mut self) -> &mut $crate::UnknownFieldStore {
                &mut self.$store
            }
        }

        $(
            const _: fn(&$record) = |record| {
                let _ = &record.$skip;
            };
        )*
    };
    (
        $record:ty {
            store: $store:ident,
            fields: {
                $( $key:literal => $field:ident ),* $(,)?
            } $(,)?
        }
    ) => {
        $crate::retain!(@impl $record, $store, [ $( $key => $field ),* ], [ ]);
    };
    (
        $record:ty {
            store: $store:ident,
            fields: {
                $( $key:literal => $field:ident ),* $(,)?
            },
            skip: {
                $( $skip:ident ),* $(,)?
            } $(,)?
        }
    ) => {
        $crate::retain!(@impl $record, $store, [ $( $key => $field ),* ], [ $( $skip ),* ]);
    };
}
