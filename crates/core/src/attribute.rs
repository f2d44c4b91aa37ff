//! Attribute storage: the draft (mutation context) and by-name access.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::entity::Frozen;
use crate::error::{EntityError, EntityResult};

/// Dynamic attribute value used for by-name reads and writes.
pub type AttributeValue = serde_json::Value;

/// Frozen attribute storage of the entity type `T`.
///
/// Only this crate can build one, and only for the type whose `create` or
/// `update` produced it, so an entity value cannot be assembled with a struct
/// literal or from another entity type's storage. Individual attributes are
/// never writable through it; the declaring module can at most move a whole
/// storage between two values of the same entity type, which amounts to
/// reassigning the binding.
pub struct Sealed<T: Frozen>(T::Draft);

impl<T: Frozen> Sealed<T> {
    pub(crate) fn new(draft: T::Draft) -> Self {
        Self(draft)
    }

    /// Read-only access to the sealed attribute values.
    pub fn get(&self) -> &T::Draft {
        &self.0
    }
}

impl<T: Frozen> PartialEq for Sealed<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

/// The declared attribute set of an entity, implemented by its draft type.
///
/// Generated by [`entity!`](crate::entity). A draft is the unfrozen form of an
/// entity: every declared attribute is a public field on it.
pub trait Attributes: Default + Clone + PartialEq + core::fmt::Debug {
    /// Name of the entity this draft belongs to (used in error messages).
    const ENTITY: &'static str;

    /// Declared attribute names, in declaration order.
    const NAMES: &'static [&'static str];

    /// Returns whether `name` is a declared attribute.
    fn declares(name: &str) -> bool {
        Self::NAMES.contains(&name)
    }

    /// Reads an attribute by name.
    fn read_attribute(&self, name: &str) -> EntityResult<AttributeValue>;

    /// Writes an attribute by name.
    fn write_attribute(&mut self, name: &str, value: AttributeValue) -> EntityResult<()>;
}

/// Encodes a typed attribute value for by-name reads.
#[doc(hidden)]
pub fn encode<V: Serialize>(
    entity: &'static str,
    attribute: &str,
    value: &V,
) -> EntityResult<AttributeValue> {
    serde_json::to_value(value).map_err(|e| EntityError::invalid_value(entity, attribute, e))
}

/// Decodes a by-name write into the attribute's type.
#[doc(hidden)]
pub fn decode<V: DeserializeOwned>(
    entity: &'static str,
    attribute: &str,
    value: AttributeValue,
) -> EntityResult<V> {
    serde_json::from_value(value).map_err(|e| EntityError::invalid_value(entity, attribute, e))
}
