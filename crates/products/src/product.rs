use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Entity, ProductId, ValueObject};

/// Highest rating a product can carry.
pub const MAX_RATING: f64 = 5.0;

/// Price in the catalog currency, stored as whole cents.
///
/// On the wire a price is a plain decimal number (`199.99`). Comparisons against
/// decimal bounds go through [`Price::as_decimal`], which yields the same `f64` as
/// the decimal literal would.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub struct Price {
    cents: u64,
}

impl ValueObject for Price {}

impl Price {
    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    /// Build a price from a decimal amount, rounding to the nearest cent.
    pub fn from_decimal(amount: f64) -> DomainResult<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(DomainError::validation(format!(
                "price must be a non-negative number, got {amount}"
            )));
        }
        let cents = (amount * 100.0).round();
        if cents > u64::MAX as f64 {
            return Err(DomainError::validation("price is out of range"));
        }
        Ok(Self {
            cents: cents as u64,
        })
    }

    pub fn cents(&self) -> u64 {
        self.cents
    }

    pub fn as_decimal(&self) -> f64 {
        self.cents as f64 / 100.0
    }
}

impl From<Price> for f64 {
    fn from(value: Price) -> Self {
        value.as_decimal()
    }
}

impl TryFrom<f64> for Price {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_decimal(value)
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

/// Input for [`Product::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: String,
    pub image_url: String,
    pub in_stock: bool,
    pub rating: f64,
    pub review_count: u32,
}

/// An immutable catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    name: String,
    description: String,
    price: Price,
    category: String,
    image_url: String,
    in_stock: bool,
    rating: f64,
    review_count: u32,
}

impl Product {
    /// Validate and build a product.
    pub fn new(input: NewProduct) -> DomainResult<Self> {
        if !input.rating.is_finite() || !(0.0..=MAX_RATING).contains(&input.rating) {
            return Err(DomainError::validation(format!(
                "rating must be within [0, {MAX_RATING}], got {}",
                input.rating
            )));
        }
        if input.category.is_empty() {
            return Err(DomainError::validation("category must not be empty"));
        }

        Ok(Self {
            id: input.id,
            name: input.name,
            description: input.description,
            price: input.price,
            category: input.category,
            image_url: input.image_url,
            in_stock: input.in_stock,
            rating: input.rating,
            review_count: input.review_count,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn in_stock(&self) -> bool {
        self.in_stock
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn review_count(&self) -> u32 {
        self.review_count
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
