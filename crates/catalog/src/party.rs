use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ironclad_core::{DomainError, DomainResult, Entity, entity};

/// Party kind: customer or supplier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyKind {
    #[default]
    Customer,
    Supplier,
}

/// Party status lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyStatus {
    #[default]
    Active,
    Suspended,
}

/// Contact information for a party.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl ContactInfo {
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }
}

entity! {
    /// Entity: Party (customer or supplier).
    pub struct Party: PartyDraft {
        attributes {
            kind: PartyKind,
            name: String,
            contact: ContactInfo,
            status: PartyStatus,
            /// When the party was first registered.
            registered_at: Option<DateTime<Utc>>,
            /// Human-readable reason of the latest suspension.
            suspension_reason: Option<String>,
        }
    }
}

impl Entity for Party {
    type Error = DomainError;

    fn validate(&self) -> DomainResult<()> {
        if self.name().trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if let Some(email) = &self.contact().email
            && !email.contains('@')
        {
            return Err(DomainError::validation(format!(
                "invalid email address: {email:?}"
            )));
        }
        if self.registered_at().is_none() {
            return Err(DomainError::invariant("party must have a registration time"));
        }
        if *self.status() == PartyStatus::Active && self.suspension_reason().is_some() {
            return Err(DomainError::invariant(
                "active parties cannot carry a suspension reason",
            ));
        }
        Ok(())
    }
}

impl Party {
    /// Register a new, active party.
    pub fn register(
        kind: PartyKind,
        name: impl Into<String>,
        contact: Option<ContactInfo>,
        registered_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.into();
        Self::create(|p| {
            p.kind = kind;
            p.name = name;
            p.contact = contact.unwrap_or_default();
            p.registered_at = Some(registered_at);
        })
    }

    /// Invariant helper: whether this party is allowed to transact.
    ///
    /// Suspended parties cannot transact.
    pub fn can_transact(&self) -> bool {
        *self.status() == PartyStatus::Active
    }

    /// Returns a copy with new details; `None` keeps the existing value.
    pub fn update_details(
        &self,
        name: Option<String>,
        contact: Option<ContactInfo>,
    ) -> DomainResult<Self> {
        self.update(|p| {
            if let Some(name) = name {
                p.name = name;
            }
            if let Some(contact) = contact {
                p.contact = contact;
            }
        })
    }

    /// Returns a suspended copy of this party.
    pub fn suspend(&self, reason: Option<String>) -> DomainResult<Self> {
        if *self.status() == PartyStatus::Suspended {
            return Err(DomainError::invariant("party is already suspended"));
        }
        tracing::debug!(party = %self.name(), "suspending party");
        self.update(|p| {
            p.status = PartyStatus::Suspended;
            p.suspension_reason = reason;
        })
    }

    /// Returns an active copy of a suspended party.
    pub fn reinstate(&self) -> DomainResult<Self> {
        if *self.status() == PartyStatus::Active {
            return Err(DomainError::invariant("party is not suspended"));
        }
        self.update(|p| {
            p.status = PartyStatus::Active;
            p.suspension_reason = None;
        })
    }
}
