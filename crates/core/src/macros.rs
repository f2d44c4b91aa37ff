//! `entity!`: attribute declaration for immutable entities.

/// Declares an immutable entity and its mutation context.
///
/// ```text
/// entity! {
///     pub struct Name: NameDraft {
///         attributes { a: A, b: B }
///         attributes { c: C }
///     }
/// }
/// ```
///
/// generates:
///
/// - `NameDraft`, the mutation context: one public field per attribute, handed
///   out as `&mut NameDraft` to `create`/`update` closures;
/// - `Name`, the frozen entity, with a read accessor `fn a(&self) -> &A` per
///   attribute and no way to write one;
/// - by-name access ([`Attributes`](crate::Attributes)) over `serde_json::Value`.
///
/// `attributes` blocks accumulate; declaring no attributes is fine. Attribute
/// types must implement `Default` (the value before anything is written),
/// `Clone`, `PartialEq`, `Debug`, `Serialize` and `DeserializeOwned`.
/// The concrete type still needs an `impl Entity` to pick its error type and,
/// optionally, a `validate` hook.
///
/// Entity values can only come out of `create`/`update`:
///
/// ```compile_fail
/// use ironclad_core::{entity, Frozen, Sealed};
///
/// entity! {
///     pub struct Person: PersonDraft {
///         attributes { name: Option<String> }
///     }
/// }
///
/// // `Sealed` has no public constructor.
/// let sealed: Sealed<Person> = Sealed::new(PersonDraft::default());
/// ```
///
/// and the storage sealed for one entity type cannot be frozen into another,
/// even when both share a draft shape:
///
/// ```compile_fail
/// use ironclad_core::{entity, Entity, EntityError, Frozen};
///
/// entity! {
///     pub struct Account: AccountDraft {
///         attributes { balance: i64 }
///     }
/// }
///
/// entity! {
///     pub struct Ledger: LedgerDraft {
///         attributes { balance: i64 }
///     }
/// }
///
/// impl Entity for Ledger {
///     type Error = EntityError;
/// }
///
/// let Ledger { sealed } = Ledger::create(|l| l.balance = -5).unwrap();
/// let account: Account = Frozen::freeze(sealed, todo!());
/// ```
///
/// Attributes of a frozen entity cannot be assigned:
///
/// ```compile_fail
/// use ironclad_core::{entity, Entity, EntityError};
///
/// entity! {
///     pub struct Person: PersonDraft {
///         attributes { name: Option<String> }
///     }
/// }
///
/// impl Entity for Person {
///     type Error = EntityError;
/// }
///
/// let mut person = Person::create(|_| {}).unwrap();
/// person.name = Some("X".to_string());
/// ```
///
/// Inside the closure only the draft's public surface is reachable; private
/// helpers of the declaring module stay private:
///
/// ```compile_fail
/// mod people {
///     use ironclad_core::{entity, Entity, EntityError};
///
///     entity! {
///         pub struct Person: PersonDraft {
///             attributes { name: Option<String> }
///         }
///     }
///
///     impl Entity for Person {
///         type Error = EntityError;
///     }
///
///     impl PersonDraft {
///         fn secret(&self) -> u8 {
///             7
///         }
///     }
/// }
///
/// use ironclad_core::Entity;
///
/// let person = people::Person::create(|p| {
///     p.secret();
/// });
/// ```
///
/// And methods that were never declared do not exist:
///
/// ```compile_fail
/// use ironclad_core::{entity, Entity, EntityError};
///
/// entity! {
///     pub struct Person: PersonDraft {
///         attributes { name: Option<String> }
///     }
/// }
///
/// impl Entity for Person {
///     type Error = EntityError;
/// }
///
/// let person = Person::create(|_| {}).unwrap();
/// person.nickname();
/// ```
#[macro_export]
macro_rules! entity {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident : $draft:ident {
            $(
                attributes {
                    $(
                        $(#[$attr_meta:meta])*
                        $attr:ident : $ty:ty
                    ),* $(,)?
                }
            )*
        }
    ) => {
        #[doc = concat!(
            "Mutation context of [`", stringify!($name), "`]: writable only inside `create`/`update`."
        )]
        #[derive(Debug, Default, Clone, PartialEq)]
        $vis struct $draft {
            $($(
                $(#[$attr_meta])*
                pub $attr: $ty,
            )*)*
        }

        $(#[$meta])*
        $vis struct $name {
            sealed: $crate::Sealed<$name>,
        }

        impl $name {
            $($(
                $(#[$attr_meta])*
                pub fn $attr(&self) -> &$ty {
                    &self.sealed.get().$attr
                }
            )*)*
        }

        impl $crate::__private::Generated for $name {}

        impl $crate::Frozen for $name {
            type Draft = $draft;

            fn freeze(
                sealed: $crate::Sealed<$name>,
                _token: $crate::__private::FreezeToken,
            ) -> Self {
                Self { sealed }
            }

            fn as_draft(&self) -> &$draft {
                self.sealed.get()
            }
        }

        impl ::core::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.debug_struct(stringify!($name))
                    $($(.field(stringify!($attr), &self.sealed.get().$attr))*)*
                    .finish()
            }
        }

        impl ::core::cmp::PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.sealed == other.sealed
            }
        }

        impl $crate::Attributes for $draft {
            const ENTITY: &'static str = stringify!($name);

            const NAMES: &'static [&'static str] = &[$($(stringify!($attr),)*)*];

            fn read_attribute(
                &self,
                name: &str,
            ) -> $crate::EntityResult<$crate::AttributeValue> {
                match name {
                    $($(
                        stringify!($attr) => {
                            $crate::attribute::encode(stringify!($name), name, &self.$attr)
                        }
                    )*)*
                    _ => Err($crate::EntityError::unknown_attribute(stringify!($name), name)),
                }
            }

            #[allow(unused_variables)]
            fn write_attribute(
                &mut self,
                name: &str,
                value: $crate::AttributeValue,
            ) -> $crate::EntityResult<()> {
                match name {
                    $($(
                        stringify!($attr) => {
                            self.$attr = $crate::attribute::decode(stringify!($name), name, value)?;
                            Ok(())
                        }
                    )*)*
                    _ => Err($crate::EntityError::unknown_attribute(stringify!($name), name)),
                }
            }
        }
    };
}
