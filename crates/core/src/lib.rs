//! `ironclad-core` — immutable entity building blocks.
//!
//! Entities are declared with [`entity!`], built with [`Entity::create`] and
//! derived with [`Entity::update`]. Nothing else can produce or modify one.
//! This crate contains **pure domain** primitives (no infrastructure concerns).

#[macro_use]
mod macros;

pub mod attribute;
pub mod entity;
pub mod error;

/// Items referenced by `entity!` expansions; not part of the public API.
#[doc(hidden)]
pub mod __private {
    /// Marks types declared through `entity!`.
    pub trait Generated {}

    /// Proof that `Frozen::freeze` is called by this crate's lifecycle.
    pub struct FreezeToken(pub(crate) ());
}

pub use attribute::{AttributeValue, Attributes, Sealed};
pub use entity::{Entity, Frozen};
pub use error::{DomainError, DomainResult, EntityError, EntityResult};
