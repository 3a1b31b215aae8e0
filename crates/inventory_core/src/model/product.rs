//! Product domain model.
//!
//! # Responsibility
//! - Define the product record, its closed category set and the mutable
//!   field bundle accepted by store writes.
//! - Provide validation shared by every write path.
//!
//! # Invariants
//! - `id` and `created_at` never change after creation.
//! - `updated_at >= created_at`.
//! - `price` is finite and non-negative; `quantity` is unsigned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Minimum product name length, counted in chars after trimming.
pub const NAME_MIN_CHARS: usize = 2;
/// Maximum product name length, counted in chars after trimming.
pub const NAME_MAX_CHARS: usize = 100;
/// Maximum description length in chars.
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Stable identifier for a stored product.
pub type ProductId = Uuid;

/// Closed set of product categories.
///
/// Declaration order is the canonical order used by category rollups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Electronics,
    Clothing,
    Home,
    Books,
    Sports,
    Beauty,
    Toys,
    Automotive,
    Food,
    Other,
}

impl Category {
    /// Every category in canonical order.
    pub const ALL: [Category; 10] = [
        Category::Electronics,
        Category::Clothing,
        Category::Home,
        Category::Books,
        Category::Sports,
        Category::Beauty,
        Category::Toys,
        Category::Automotive,
        Category::Food,
        Category::Other,
    ];

    /// Wire token for this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Electronics => "electronics",
            Self::Clothing => "clothing",
            Self::Home => "home",
            Self::Books => "books",
            Self::Sports => "sports",
            Self::Beauty => "beauty",
            Self::Toys => "toys",
            Self::Automotive => "automotive",
            Self::Food => "food",
            Self::Other => "other",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a category token is outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError(pub String);

impl Display for ParseCategoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown product category `{}`", self.0)
    }
}

impl Error for ParseCategoryError {}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| ParseCategoryError(value.to_string()))
    }
}

/// Field-level validation failures for product writes.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductValidationError {
    /// The nil UUID cannot identify a stored product.
    NilId,
    /// Trimmed name length is outside `NAME_MIN_CHARS..=NAME_MAX_CHARS`.
    NameLength { chars: usize },
    /// Description exceeds `DESCRIPTION_MAX_CHARS`.
    DescriptionTooLong { chars: usize },
    /// Price is negative, NaN or infinite.
    InvalidPrice(f64),
    /// `updated_at` is earlier than `created_at`.
    TimestampsOutOfOrder,
}

impl Display for ProductValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "product id must not be nil"),
            Self::NameLength { chars } => write!(
                f,
                "product name must have {NAME_MIN_CHARS}..={NAME_MAX_CHARS} chars, got {chars}"
            ),
            Self::DescriptionTooLong { chars } => write!(
                f,
                "product description must have at most {DESCRIPTION_MAX_CHARS} chars, got {chars}"
            ),
            Self::InvalidPrice(price) => {
                write!(f, "product price must be a finite value >= 0, got {price}")
            }
            Self::TimestampsOutOfOrder => write!(f, "product updated_at must be >= created_at"),
        }
    }
}

impl Error for ProductValidationError {}

/// Mutable product fields accepted by create and full update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: u32,
    pub category: Category,
    /// Defaults to `true` when absent on the wire.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl ProductInput {
    /// Creates an active input with an empty description.
    pub fn new(name: impl Into<String>, price: f64, quantity: u32, category: Category) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            price,
            quantity,
            category,
            active: true,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the active flag.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Validates field-level invariants.
    ///
    /// # Errors
    /// - `NameLength` when the trimmed name is too short or too long.
    /// - `DescriptionTooLong` when the description exceeds its cap.
    /// - `InvalidPrice` when the price is negative or not finite.
    pub fn validate(&self) -> Result<(), ProductValidationError> {
        let name_chars = self.name.trim().chars().count();
        if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&name_chars) {
            return Err(ProductValidationError::NameLength { chars: name_chars });
        }

        let description_chars = self.description.chars().count();
        if description_chars > DESCRIPTION_MAX_CHARS {
            return Err(ProductValidationError::DescriptionTooLong {
                chars: description_chars,
            });
        }

        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ProductValidationError::InvalidPrice(self.price));
        }

        Ok(())
    }
}

/// Canonical stored inventory record.
///
/// Values handed out by the store are owned clones; mutating them never
/// reaches the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: u32,
    pub category: Category,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Builds a fresh record with both timestamps set to `now`.
    pub(crate) fn from_input(id: ProductId, input: ProductInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            quantity: input.quantity,
            category: input.category,
            active: input.active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites every mutable field, keeping `id` and `created_at`.
    pub(crate) fn replace_fields(&mut self, input: ProductInput, now: DateTime<Utc>) {
        self.name = input.name;
        self.description = input.description;
        self.price = input.price;
        self.quantity = input.quantity;
        self.category = input.category;
        self.active = input.active;
        self.updated_at = now;
    }

    /// Returns the mutable fields of this record.
    pub fn to_input(&self) -> ProductInput {
        ProductInput {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            quantity: self.quantity,
            category: self.category,
            active: self.active,
        }
    }

    /// Stock is available only for active products with positive quantity.
    pub fn is_in_stock(&self) -> bool {
        self.quantity > 0 && self.active
    }

    /// Value of the units on hand.
    pub fn inventory_value(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    /// Price rendered with two decimals, e.g. `$ 12.50`.
    pub fn display_price(&self) -> String {
        format!("$ {:.2}", self.price)
    }
}
