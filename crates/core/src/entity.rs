//! Entity lifecycle: `create`, `update`, freezing and validation.
//!
//! An entity is an immutable value. Its attributes live in a *draft* (see
//! [`Attributes`]) which is only writable while a `create`/`update` closure
//! runs. When the closure returns the draft is sealed into the entity type,
//! the entity's `validate` hook runs, and the frozen value is handed back.

use crate::__private::{FreezeToken, Generated};
use crate::attribute::{AttributeValue, Attributes, Sealed};
use crate::error::{EntityError, EntityResult};

/// Frozen storage of an entity, generated by [`entity!`](crate::entity).
///
/// Only types declared with `entity!` implement it:
///
/// ```compile_fail
/// use ironclad_core::{entity, Frozen, Sealed};
///
/// entity! {
///     pub struct Account: AccountDraft {
///         attributes { balance: i64 }
///     }
/// }
///
/// pub struct Rogue;
///
/// impl Frozen for Rogue {
///     type Draft = AccountDraft;
///
///     fn freeze(_: Sealed<Self>, _: ironclad_core::__private::FreezeToken) -> Self {
///         Rogue
///     }
///
///     fn as_draft(&self) -> &AccountDraft {
///         unimplemented!()
///     }
/// }
/// ```
pub trait Frozen: Sized + Generated {
    /// The entity's mutation context.
    type Draft: Attributes;

    /// Wraps sealed storage into the entity type.
    ///
    /// Only callable from this crate: nothing else can build a `FreezeToken`.
    #[doc(hidden)]
    fn freeze(sealed: Sealed<Self>, token: FreezeToken) -> Self;

    /// Read-only view of the entity's attribute values.
    fn as_draft(&self) -> &Self::Draft;
}

/// An immutable domain value built only through `create` and `update`.
///
/// ```
/// use ironclad_core::{entity, Entity, EntityError};
/// use serde_json::json;
///
/// entity! {
///     pub struct Person: PersonDraft {
///         attributes { name: Option<String>, test: bool }
///     }
/// }
///
/// impl Entity for Person {
///     type Error = EntityError;
/// }
///
/// let person = Person::create_with(
///     [("name", json!("A")), ("test", json!(true))],
///     |p| p.name = Some("B".to_string()),
/// )?;
/// assert_eq!(person.name().as_deref(), Some("B"));
/// assert!(*person.test());
/// # Ok::<(), EntityError>(())
/// ```
pub trait Entity: Frozen {
    /// Failure type of `create`/`update`.
    ///
    /// Whatever `validate` returns reaches the caller unchanged; attribute
    /// errors from the entity base are converted with `From`.
    type Error: From<EntityError>;

    /// Checks the final attribute values of a freshly frozen instance.
    ///
    /// Runs once per `create` and once per `update`. An error aborts the
    /// operation and no instance is returned.
    fn validate(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Declared attribute names of this entity type.
    fn attribute_names() -> &'static [&'static str] {
        <Self::Draft as Attributes>::NAMES
    }

    /// Builds a new instance from default attribute values and a configuration closure.
    fn create<F>(configure: F) -> Result<Self, Self::Error>
    where
        F: FnOnce(&mut Self::Draft),
    {
        Self::try_create(|draft| {
            configure(draft);
            Ok(())
        })
    }

    /// Like [`Entity::create`], with a closure that can abort the operation.
    fn try_create<F>(configure: F) -> Result<Self, Self::Error>
    where
        F: FnOnce(&mut Self::Draft) -> Result<(), Self::Error>,
    {
        Self::try_create_with(core::iter::empty::<(&str, AttributeValue)>(), configure)
    }

    /// Builds a new instance from an initial name/value mapping, then the closure.
    ///
    /// Values written by the closure override values from `initial`.
    fn create_with<I, K, F>(initial: I, configure: F) -> Result<Self, Self::Error>
    where
        I: IntoIterator<Item = (K, AttributeValue)>,
        K: AsRef<str>,
        F: FnOnce(&mut Self::Draft),
    {
        Self::try_create_with(initial, |draft| {
            configure(draft);
            Ok(())
        })
    }

    /// Like [`Entity::create_with`], with a closure that can abort the operation.
    fn try_create_with<I, K, F>(initial: I, configure: F) -> Result<Self, Self::Error>
    where
        I: IntoIterator<Item = (K, AttributeValue)>,
        K: AsRef<str>,
        F: FnOnce(&mut Self::Draft) -> Result<(), Self::Error>,
    {
        let mut draft = Self::Draft::default();
        for (name, value) in initial {
            let name = name.as_ref();
            draft.write_attribute(name, value).map_err(|err| {
                tracing::debug!(
                    entity = <Self::Draft as Attributes>::ENTITY,
                    attribute = name,
                    "initial attribute rejected"
                );
                <Self::Error as From<EntityError>>::from(err)
            })?;
        }
        configure(&mut draft)?;
        seal_and_validate::<Self>(draft)
    }

    /// Derives a new instance from this one; attributes the closure leaves alone keep their values.
    ///
    /// `self` is never modified, including when validation rejects the result.
    fn update<F>(&self, configure: F) -> Result<Self, Self::Error>
    where
        F: FnOnce(&mut Self::Draft),
    {
        self.try_update(|draft| {
            configure(draft);
            Ok(())
        })
    }

    /// Like [`Entity::update`], with a closure that can abort the operation.
    fn try_update<F>(&self, configure: F) -> Result<Self, Self::Error>
    where
        F: FnOnce(&mut Self::Draft) -> Result<(), Self::Error>,
    {
        let mut draft = self.as_draft().clone();
        configure(&mut draft)?;
        seal_and_validate::<Self>(draft)
    }

    /// Reads an attribute by name.
    fn attribute(&self, name: &str) -> EntityResult<AttributeValue> {
        self.as_draft().read_attribute(name)
    }

    /// By-name writer for a frozen entity; it always fails.
    ///
    /// Undeclared names report [`EntityError::UnknownAttribute`], declared ones
    /// [`EntityError::Frozen`].
    fn write_attribute(&self, name: &str, _value: AttributeValue) -> EntityResult<()> {
        let entity = <Self::Draft as Attributes>::ENTITY;
        if !<Self::Draft as Attributes>::declares(name) {
            return Err(EntityError::unknown_attribute(entity, name));
        }
        Err(EntityError::frozen(entity, name))
    }
}

fn seal_and_validate<T: Entity>(draft: T::Draft) -> Result<T, T::Error> {
    let entity = T::freeze(Sealed::new(draft), FreezeToken(()));
    tracing::trace!(entity = <T::Draft as Attributes>::ENTITY, "entity frozen");

    // Frozen before validation: a rejected value is dropped, never retried.
    if let Err(err) = entity.validate() {
        tracing::debug!(
            entity = <T::Draft as Attributes>::ENTITY,
            "entity rejected by validation"
        );
        return Err(err);
    }
    Ok(entity)
}
