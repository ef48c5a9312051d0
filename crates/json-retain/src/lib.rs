//! json-retain: lossless partial-schema JSON (de)serialization.
//!
//! An application declares typed fields for only the parts of a payload it
//! actively uses; every other field is captured in an [`UnknownFieldStore`]
//! on decode and re-emitted unchanged on encode, unless the application
//! modified the typed value in between. Round-tripping a payload through a
//! partial schema loses nothing.
//!
//! ```
//! use json_retain::{Retain, UnknownFieldStore};
//!
//! #[derive(Debug, Default)]
//! struct Page {
//!     title: String,
//!     slug: String,
//!     extra: UnknownFieldStore,
//! }
//!
//! json_retain::retain! {
//!     Page {
//!         store: extra,
//!         fields: {
//!             "title" => title,
//!             "slug" => slug,
//!         },
//!     }
//! }
//!
//! let mut page: Page = json_retain::from_str(
//!     r#"{"title":"Contact Us","slug":"contact","icon":"email"}"#,
//! )?;
//! page.slug = "contact-us".to_string();
//!
//! let out = page.encode_json_value()?;
//! assert_eq!(out, serde_json::json!({
//!     "title": "Contact Us",
//!     "slug": "contact-us",
//!     "icon": "email",
//! }));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The decode path parses the payload once into an ordered object, writes
//! each bound wire-key's value into its typed field through the base serde
//! decoder, and replaces the store wholesale with the full object. Codecs
//! that implicitly dispatch through a type's own custom decode hook need a
//! structurally-identical shadow type here to avoid re-entering that hook;
//! serde's explicit invocation model makes the direct call safe, and this
//! crate takes that route (see [`Retain`] for the longer discussion).
//!
//! Key order in encoded output follows store insertion order but is
//! documented as unspecified; JSON objects are semantically unordered.

mod error;
mod mapping;
mod macros;
mod retain;
mod store;

pub use error::{DecodeError, EncodeError, MappingError};
pub use mapping::{FieldBinding, FieldMapping, ReadField, WriteField};
pub use retain::{from_slice, from_str, from_value, Retain};
pub use store::UnknownFieldStore;

#[doc(hidden)]
pub use macros::{from_field_value, to_field_value};
