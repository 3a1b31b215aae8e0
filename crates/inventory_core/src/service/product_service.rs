//! Product use-case service.
//!
//! # Responsibility
//! - Normalize create/update requests before they reach the store.
//! - Merge partial updates onto the current record.
//! - Apply listing limits on top of the store's pagination.
//!
//! # Invariants
//! - Service APIs never bypass store validation.
//! - Names and descriptions are trimmed; inner whitespace is kept as given.
//! - Page sizes above `MAX_PAGE_SIZE` fall back to `DEFAULT_PAGE_SIZE`.

use crate::model::product::{Category, Product, ProductId, ProductInput, ProductValidationError};
use crate::query::filter::{Page, PageRequest, ProductFilter, DEFAULT_PAGE_SIZE};
use crate::query::stats::InventoryStatistics;
use crate::store::product_store::{ProductRepository, StoreError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Largest page size a listing request may ask for.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Service error for product use-cases.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// Target product does not exist.
    ProductNotFound(ProductId),
    /// Requested quantity is negative or out of range.
    InvalidQuantity(i64),
    /// Request fields violate product invariants.
    Validation(ProductValidationError),
    /// Any other store failure.
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProductNotFound(id) => write!(f, "product not found: {id}"),
            Self::InvalidQuantity(quantity) => {
                write!(f, "quantity must be >= 0, got {quantity}")
            }
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => Self::ProductNotFound(id),
            StoreError::InvalidQuantity(quantity) => Self::InvalidQuantity(quantity),
            StoreError::Validation(err) => Self::Validation(err),
            other => Self::Store(other),
        }
    }
}

impl From<ProductValidationError> for ServiceError {
    fn from(value: ProductValidationError) -> Self {
        Self::Validation(value)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Request model for creating a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub quantity: i64,
    pub category: Category,
    /// `None` means active.
    pub active: Option<bool>,
}

/// Partial update; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
    pub category: Option<Category>,
    pub active: Option<bool>,
}

/// Product service facade over store implementations.
pub struct ProductService<R: ProductRepository> {
    repo: R,
}

impl<R: ProductRepository> ProductService<R> {
    /// Creates a service using the provided store implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Borrows the underlying store.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Creates one product with a generated id.
    ///
    /// # Errors
    /// - `InvalidQuantity` for a negative quantity.
    /// - `Validation` for name, description or price violations.
    pub fn create_product(&self, request: CreateProductRequest) -> ServiceResult<Product> {
        let input = ProductInput {
            name: normalize_text(&request.name),
            description: normalize_text(&request.description),
            price: request.price,
            quantity: to_quantity(request.quantity)?,
            category: request.category,
            active: request.active.unwrap_or(true),
        };
        Ok(self.repo.create(input)?)
    }

    /// Gets one product by id.
    pub fn get_product(&self, id: ProductId) -> ServiceResult<Product> {
        Ok(self.repo.get_by_id(id)?)
    }

    /// Lists every product as a single page, newest first.
    pub fn list_products(&self) -> Page<Product> {
        Page::single(self.repo.get_all())
    }

    /// Lists one page of products matching `filter`.
    ///
    /// Oversized pages fall back to `DEFAULT_PAGE_SIZE`; the store applies
    /// the remaining page/size coercions.
    pub fn search_products(&self, filter: &ProductFilter, page: i64, size: i64) -> Page<Product> {
        let size = if size > MAX_PAGE_SIZE {
            i64::from(DEFAULT_PAGE_SIZE)
        } else {
            size
        };
        self.repo.query(filter, PageRequest::new(page, size))
    }

    /// Merges `request` onto the current record and stores the result.
    ///
    /// The read and the write are separate store calls; a concurrent delete
    /// in between surfaces as `ProductNotFound`.
    pub fn update_product(
        &self,
        id: ProductId,
        request: UpdateProductRequest,
    ) -> ServiceResult<Product> {
        let mut input = self.repo.get_by_id(id)?.to_input();

        if let Some(name) = request.name {
            input.name = normalize_text(&name);
        }
        if let Some(description) = request.description {
            input.description = normalize_text(&description);
        }
        if let Some(price) = request.price {
            input.price = price;
        }
        if let Some(quantity) = request.quantity {
            input.quantity = to_quantity(quantity)?;
        }
        if let Some(category) = request.category {
            input.category = category;
        }
        if let Some(active) = request.active {
            input.active = active;
        }

        Ok(self.repo.update(id, input)?)
    }

    /// Replaces only the stock quantity.
    pub fn update_stock(&self, id: ProductId, quantity: i64) -> ServiceResult<Product> {
        Ok(self.repo.update_stock(id, quantity)?)
    }

    /// Hard-deletes one product.
    pub fn delete_product(&self, id: ProductId) -> ServiceResult<()> {
        Ok(self.repo.delete(id)?)
    }

    pub fn products_by_category(&self, category: Category) -> Page<Product> {
        Page::single(self.repo.by_category(category))
    }

    pub fn active_products(&self) -> Page<Product> {
        Page::single(self.repo.active_products())
    }

    pub fn in_stock_products(&self) -> Page<Product> {
        Page::single(self.repo.in_stock_products())
    }

    /// Aggregate report with per-category rollups and rankings.
    pub fn statistics(&self) -> InventoryStatistics {
        self.repo.statistics()
    }
}

fn to_quantity(quantity: i64) -> ServiceResult<u32> {
    u32::try_from(quantity).map_err(|_| ServiceError::InvalidQuantity(quantity))
}

/// Trims leading and trailing whitespace.
pub fn normalize_text(value: &str) -> String {
    value.trim().to_string()
}
