use chrono::{DateTime, Utc};

use catalog_core::{DomainError, DomainResult, Entity, ProductId};

/// Entity: Product.
///
/// # Invariants
/// - `name` is never empty.
/// - `price` is finite and strictly greater than zero.
/// - `id` and `created_at` never change after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    name: String,
    price: f64,
    created_at: DateTime<Utc>,
}

impl Product {
    /// Validate and construct a new product with a freshly allocated id.
    pub fn new(name: impl Into<String>, price: f64) -> DomainResult<Self> {
        let name = name.into();
        check(&name, price)?;

        Ok(Self {
            id: ProductId::new(),
            name,
            price,
            created_at: Utc::now(),
        })
    }

    /// Rehydrate a product read back from storage.
    ///
    /// The stored values are revalidated; a corrupted row never yields a `Product`.
    pub fn restore(
        id: ProductId,
        name: impl Into<String>,
        price: f64,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.into();
        check(&name, price)?;

        Ok(Self {
            id,
            name,
            price,
            created_at,
        })
    }

    /// Re-run the construction checks against the current state.
    pub fn validate(&self) -> DomainResult<()> {
        check(&self.name, self.price)
    }

    /// Replace name and price.
    ///
    /// The candidate state is validated first; on error the product is left untouched.
    pub fn update(&mut self, name: impl Into<String>, price: f64) -> DomainResult<()> {
        let name = name.into();
        check(&name, price)?;

        self.name = name;
        self.price = price;
        Ok(())
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

// First failing check wins: name, then zero price, then negative/non-finite price.
fn check(name: &str, price: f64) -> DomainResult<()> {
    if name.is_empty() {
        return Err(DomainError::NameRequired);
    }
    if price == 0.0 {
        return Err(DomainError::PriceRequired);
    }
    if price < 0.0 || !price.is_finite() {
        return Err(DomainError::InvalidPrice);
    }
    Ok(())
}
