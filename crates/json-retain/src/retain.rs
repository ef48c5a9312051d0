//! The [`Retain`] trait: decode and encode orchestration.

use serde_json::Value;

use crate::error::{json_kind, DecodeError, EncodeError};
use crate::mapping::{FieldBinding, FieldMapping};
use crate::store::UnknownFieldStore;

/// A record that types only the fields it uses and retains the rest.
///
/// Implementations come from the [`retain!`](crate::retain) macro, which
/// generates the binding table and store accessors from a field listing.
/// The provided methods carry the whole decode/encode cycle:
///
/// - [`decode_json`](Retain::decode_json) populates the typed fields from a
///   payload and replaces the unknown-field store wholesale with every
///   top-level key of that payload (typed keys included).
/// - [`encode_json`](Retain::encode_json) overlays the current typed-field
///   values onto the store at their wire-keys, then serializes the store,
///   so mutated fields show up in the output while unknown fields are
///   re-emitted verbatim.
///
/// serde dispatches (de)serialization through explicit calls rather than
/// implicit per-type hooks, so the decode path here simply invokes the base
/// structural decoder per field; no structurally-identical shadow type is
/// needed to break a dispatch cycle, the way it is in codecs that always
/// route through a type's own custom decode hook.
///
/// Decoding in place offers no atomicity: on error the record may be
/// partially overwritten. [`from_slice`], [`from_str`], and [`from_value`]
/// decode into a fresh `Default` record instead and only hand it over on
/// success.
///
/// There is no internal locking; a single record must not be decoded and
/// encoded concurrently without external synchronization. The binding table
/// itself is a `const` and freely shared.
pub trait Retain: Sized + 'static {
    /// Wire-key bindings for every typed field, in declaration order.
    ///
    /// The unknown-field store holder and any skipped fields are absent
    /// from this table; they never travel as normal fields.
    const BINDINGS: &'static [FieldBinding<Self>];

    /// The record's unknown-field store.
    fn unknown_fields(&self) -> &UnknownFieldStore;

    fn unknown_fields_mut(&mut self) -> &mut UnknownFieldStore;

    /// Decodes a JSON payload into both the typed fields and the store.
    fn decode_json(&mut self, bytes: &[u8]) -> Result<(), DecodeError> {
        let value: Value = serde_json::from_slice(bytes)?;
        self.decode_json_value(value)
    }

    /// Like [`decode_json`](Retain::decode_json), for an already-parsed value.
    ///
    /// The top-level value must be an object. Each bound wire-key present in
    /// the object is deserialized into its typed field with conservative
    /// conversion (no lossy numeric coercion, `null` only into optional
    /// fields); absent keys leave the field untouched. The store is then
    /// replaced with the full object, so it holds a superset of the typed
    /// fields.
    fn decode_json_value(&mut self, value: Value) -> Result<(), DecodeError> {
        let mapping = FieldMapping::<Self>::resolve()?;
        let object = match value {
            Value::Object(object) => object,
            other => return Err(DecodeError::NotAnObject(json_kind(&other))),
        };
        for binding in mapping.iter() {
            if let Some(field_value) = object.get(binding.wire_key()) {
                binding.write(self, field_value.clone())?;
            }
        }
        *self.unknown_fields_mut() = UnknownFieldStore::from(object);
        Ok(())
    }

    /// Writes every typed field's current value into the store at its
    /// wire-key, overwriting whatever was stored there.
    ///
    /// Called by the encode methods; exposed so the post-overlay store can
    /// be inspected directly.
    fn overlay_fields(&mut self) -> Result<(), EncodeError> {
        let mapping = FieldMapping::<Self>::resolve()?;
        let mut overlays = Vec::with_capacity(mapping.len());
        for binding in mapping.iter() {
            overlays.push((binding.wire_key(), binding.read(self)?));
        }
        let store = self.unknown_fields_mut();
        for (wire_key, field_value) in overlays {
            store.insert(wire_key, field_value);
        }
        Ok(())
    }

    /// Encodes the record as JSON bytes: current typed-field values plus
    /// every retained unknown field.
    ///
    /// Output key order is unspecified; JSON objects are unordered.
    fn encode_json(&mut self) -> Result<Vec<u8>, EncodeError> {
        self.overlay_fields()?;
        Ok(serde_json::to_vec(self.unknown_fields())?)
    }

    /// Like [`encode_json`](Retain::encode_json), producing a `String`.
    fn encode_json_string(&mut self) -> Result<String, EncodeError> {
        self.overlay_fields()?;
        Ok(serde_json::to_string(self.unknown_fields())?)
    }

    /// Like [`encode_json`](Retain::encode_json), producing a parsed value.
    fn encode_json_value(&mut self) -> Result<Value, EncodeError> {
        self.overlay_fields()?;
        Ok(Value::Object(self.unknown_fields().as_map().clone()))
    }
}

/// Decodes a fresh record from JSON bytes.
///
/// On error nothing is handed back, so the caller observes no partial state.
pub fn from_slice<T: Retain + Default>(bytes: &[u8]) -> Result<T, DecodeError> {
    let mut record = T::default();
    record.decode_json(bytes)?;
    Ok(record)
}

/// Decodes a fresh record from a JSON string.
pub fn from_str<T: Retain + Default>(text: &str) -> Result<T, DecodeError> {
    from_slice(text.as_bytes())
}

/// Decodes a fresh record from an already-parsed JSON value.
pub fn from_value<T: Retain + Default>(value: Value) -> Result<T, DecodeError> {
    let mut record = T::default();
    record.decode_json_value(value)?;
    Ok(record)
}
