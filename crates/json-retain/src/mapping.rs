//! Wire-key bindings and per-type field mappings.

use std::fmt;

use serde_json::Value;

use crate::error::{DecodeError, EncodeError, MappingError};
use crate::retain::Retain;

/// Serializes a field's current value to a raw JSON value.
pub type ReadField<T> = fn(&T) -> Result<Value, EncodeError>;

/// Deserializes a raw JSON value into a field.
pub type WriteField<T> = fn(&mut T, Value) -> Result<(), DecodeError>;

/// One typed field's association with its wire-key.
///
/// Bindings are const-constructible so the [`retain!`](crate::retain) macro
/// can lay out a whole record's bindings in a `const` slice at compile time.
pub struct FieldBinding<T> {
    wire_key: &'static str,
    read: ReadField<T>,
    write: WriteField<T>,
}

impl<T> FieldBinding<T> {
    pub const fn new(wire_key: &'static str, read: ReadField<T>, write: WriteField<T>) -> Self {
        Self {
            wire_key,
            read,
            write,
        }
    }

    /// The key this field uses in the JSON representation.
    pub fn wire_key(&self) -> &'static str {
        self.wire_key
    }

    /// Reads the field's current value out of `record` as a JSON value.
    pub fn read(&self, record: &T) -> Result<Value, EncodeError> {
        (self.read)(record)
    }

    /// Writes `value` into the field on `record`.
    pub fn write(&self, record: &mut T, value: Value) -> Result<(), DecodeError> {
        (self.write)(record, value)
    }
}

// Manual impls: fn pointers are Copy regardless of `T`.
impl<T> Clone for FieldBinding<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldBinding<T> {}

impl<T> fmt::Debug for FieldBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBinding")
            .field("wire_key", &self.wire_key)
            .finish()
    }
}

/// The validated, ordered list of wire-key bindings for one record type.
///
/// A pure function of the type: resolution is deterministic, side-effect
/// free, and safe to redo concurrently. Conflicting bindings are rejected
/// here, before any decode or encode touches a payload.
pub struct FieldMapping<T: 'static> {
    bindings: &'static [FieldBinding<T>],
}

impl<T> Clone for FieldMapping<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldMapping<T> {}

impl<T> fmt::Debug for FieldMapping<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.bindings).finish()
    }
}

impl<T: Retain> FieldMapping<T> {
    /// Resolves the mapping declared by `T`'s [`Retain`] impl.
    pub fn resolve() -> Result<Self, MappingError> {
        Self::new(T::BINDINGS)
    }
}

impl<T> FieldMapping<T> {
    /// Validates an explicit binding list.
    pub fn new(bindings: &'static [FieldBinding<T>]) -> Result<Self, MappingError> {
        for (i, binding) in bindings.iter().enumerate() {
            let key = binding.wire_key();
            if bindings[..i].iter().any(|prev| prev.wire_key() == key) {
                return Err(MappingError::DuplicateWireKey(key));
            }
        }
        Ok(Self { bindings })
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldBinding<T>> {
        self.bindings.iter()
    }

    /// Declared wire-keys, in binding order.
    pub fn wire_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.bindings.iter().map(|b| b.wire_key())
    }
}
