//! Entity and domain error model.

use thiserror::Error;

/// Result type used by the entity lifecycle.
pub type EntityResult<T> = Result<T, EntityError>;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Failure raised by the entity base itself.
///
/// Validation failures are *not* represented here: they belong to the concrete
/// entity's `Entity::Error` and pass through `create`/`update` untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntityError {
    /// A by-name read or write targeted a name that is not a declared attribute.
    #[error("unknown attribute `{attribute}` for `{entity}`")]
    UnknownAttribute {
        entity: &'static str,
        attribute: String,
    },

    /// A write was attempted on an entity outside its mutation context.
    #[error(
        "cannot modify `{attribute}` on a frozen `{entity}`: use `{entity}::create` or `{entity}::update` instead"
    )]
    Frozen {
        entity: &'static str,
        attribute: String,
    },

    /// A by-name value could not be converted to or from the attribute's type.
    #[error("invalid value for `{entity}.{attribute}`: {reason}")]
    InvalidAttributeValue {
        entity: &'static str,
        attribute: String,
        reason: String,
    },
}

impl EntityError {
    pub fn unknown_attribute(entity: &'static str, attribute: impl Into<String>) -> Self {
        Self::UnknownAttribute {
            entity,
            attribute: attribute.into(),
        }
    }

    pub fn frozen(entity: &'static str, attribute: impl Into<String>) -> Self {
        Self::Frozen {
            entity,
            attribute: attribute.into(),
        }
    }

    pub fn invalid_value(
        entity: &'static str,
        attribute: impl Into<String>,
        reason: impl core::fmt::Display,
    ) -> Self {
        Self::InvalidAttributeValue {
            entity,
            attribute: attribute.into(),
            reason: reason.to_string(),
        }
    }

    /// Name of the attribute the error refers to.
    pub fn attribute(&self) -> &str {
        match self {
            Self::UnknownAttribute { attribute, .. }
            | Self::Frozen { attribute, .. }
            | Self::InvalidAttributeValue { attribute, .. } => attribute,
        }
    }
}

/// Domain-level error.
///
/// A ready-made `Entity::Error` for domain crates: business rule failures from
/// `validate` plus whatever the entity base reports.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// The entity base rejected an attribute access.
    #[error(transparent)]
    Entity(#[from] EntityError),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frozen_message_points_at_factories() {
        let err = EntityError::frozen("Person", "name");
        assert_eq!(
            err.to_string(),
            "cannot modify `name` on a frozen `Person`: use `Person::create` or `Person::update` instead"
        );
        assert_eq!(err.attribute(), "name");
    }

    #[test]
    fn entity_errors_convert_into_domain_errors_verbatim() {
        let err = EntityError::unknown_attribute("Person", "nickname");
        let domain: DomainError = err.clone().into();
        assert_eq!(domain, DomainError::Entity(err.clone()));
        assert_eq!(domain.to_string(), err.to_string());
    }
}
