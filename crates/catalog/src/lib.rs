//! Catalog domain module.
//!
//! Products and trading parties modelled as immutable entities: every state
//! change yields a new value through `ironclad-core`'s `update`, and each
//! value is validated before it is handed out (no IO, no storage).

pub mod party;
pub mod product;

pub use party::{ContactInfo, Party, PartyDraft, PartyKind, PartyStatus};
pub use product::{PricingMetadata, Product, ProductDraft, ProductStatus};
