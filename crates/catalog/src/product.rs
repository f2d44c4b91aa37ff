use serde::{Deserialize, Serialize};

use ironclad_core::{DomainError, DomainResult, Entity, entity};

/// Product status lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Draft,
    Active,
    Archived,
}

/// Optional pricing metadata (no accounting yet).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingMetadata {
    pub base_price: Option<u64>, // Price in smallest currency unit (e.g., cents)
    pub currency: Option<String>, // ISO currency code (e.g., "USD", "EUR")
}

impl PricingMetadata {
    pub fn new(base_price: u64, currency: impl Into<String>) -> Self {
        Self {
            base_price: Some(base_price),
            currency: Some(currency.into()),
        }
    }
}

entity! {
    /// Entity: Product.
    pub struct Product: ProductDraft {
        attributes {
            sku: String,
            name: String,
        }
        attributes {
            status: ProductStatus,
            pricing: PricingMetadata,
        }
    }
}

impl Entity for Product {
    type Error = DomainError;

    fn validate(&self) -> DomainResult<()> {
        if self.name().trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        if self.sku().trim().is_empty() {
            return Err(DomainError::validation("SKU cannot be empty"));
        }

        // SKU uniqueness needs a catalog-wide view and is checked by callers.

        let pricing = self.pricing();
        if let Some(currency) = &pricing.currency {
            let is_iso = currency.len() == 3 && currency.chars().all(|c| c.is_ascii_uppercase());
            if !is_iso {
                return Err(DomainError::validation(format!(
                    "currency must be a 3-letter ISO code, got {currency:?}"
                )));
            }
        }
        if pricing.base_price.is_some() && pricing.currency.is_none() {
            return Err(DomainError::validation("base price requires a currency"));
        }

        Ok(())
    }
}

impl Product {
    /// Register a new product in `Draft` status.
    pub fn register(
        sku: impl Into<String>,
        name: impl Into<String>,
        pricing: Option<PricingMetadata>,
    ) -> DomainResult<Self> {
        let (sku, name) = (sku.into(), name.into());
        Self::create(|p| {
            p.sku = sku;
            p.name = name;
            p.pricing = pricing.unwrap_or_default();
        })
    }

    /// Check if product can be sold (must be Active, not Archived).
    pub fn can_be_sold(&self) -> bool {
        *self.status() == ProductStatus::Active
    }

    /// Returns an `Active` copy of this product.
    pub fn activate(&self) -> DomainResult<Self> {
        match self.status() {
            ProductStatus::Active => Err(DomainError::invariant("product is already active")),
            ProductStatus::Archived => Err(DomainError::invariant(
                "archived products cannot be activated",
            )),
            ProductStatus::Draft => {
                tracing::debug!(sku = %self.sku(), "activating product");
                self.update(|p| p.status = ProductStatus::Active)
            }
        }
    }

    /// Returns an `Archived` copy of this product.
    pub fn archive(&self) -> DomainResult<Self> {
        if *self.status() == ProductStatus::Archived {
            return Err(DomainError::invariant("product is already archived"));
        }
        tracing::debug!(sku = %self.sku(), "archiving product");
        self.update(|p| p.status = ProductStatus::Archived)
    }

    /// Returns a copy of this product with new pricing.
    pub fn reprice(&self, pricing: PricingMetadata) -> DomainResult<Self> {
        if *self.status() == ProductStatus::Archived {
            return Err(DomainError::invariant("archived products cannot be repriced"));
        }
        self.update(|p| p.pricing = pricing)
    }
}
