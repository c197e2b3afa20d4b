//! Catalog domain types shared by the storage and API layers.

use rust_decimal::Decimal;

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub code: String,
    pub name: String,
}

/// Input for creating a [`Category`]; the id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub code: String,
    pub name: String,
}

impl NewCategory {
    /// Returns `true` when both code and name are non-empty.
    ///
    /// Emptiness is the only validation applied before persistence; code
    /// uniqueness is enforced by the relational schema.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.code.is_empty() && !self.name.is_empty()
    }
}

/// A purchasable variant of a [`Product`], e.g. a specific pack size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub id: i64,
    pub product_id: i64,
    pub name: String,
    pub sku: String,
    /// `None` (or an explicit zero) means the variant inherits the parent
    /// product's price.
    pub price: Option<Decimal>,
}

impl Variant {
    /// The price displayed for this variant: its own price, unless that price
    /// is absent or exactly zero, in which case the parent product's price
    /// applies.
    #[must_use]
    pub fn effective_price(&self, product_price: Decimal) -> Decimal {
        match self.price {
            Some(price) if !price.is_zero() => price,
            _ => product_price,
        }
    }
}

/// A catalog product with its category and variants eagerly attached.
///
/// Partial loading is not part of the contract: every fetch path returns the
/// category and the full variant collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: i64,
    pub code: String,
    /// Stored with two fractional digits (`NUMERIC(10,2)` in the schema).
    pub price: Decimal,
    pub category: Category,
    pub variants: Vec<Variant>,
}
