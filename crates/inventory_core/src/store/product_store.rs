//! Product store contract and in-memory implementation.
//!
//! # Responsibility
//! - Provide CRUD, filtered listing and statistics over the live set.
//! - Guard the set with a single reader/writer lock.
//!
//! # Invariants
//! - Reads hold a shared lock for one full scan; writes hold the exclusive
//!   lock for one single-record mutation.
//! - Mutation timestamps are strictly increasing per store.
//! - Guards are scoped to the call and released before returning.

use crate::model::product::{Category, Product, ProductId, ProductInput, ProductValidationError};
use crate::query::filter::{filter_sorted, paginate, Page, PageRequest, ProductFilter};
use crate::query::stats::{self, InventoryStatistics};
use chrono::{DateTime, Duration, Utc};
use log::{debug, info};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure kinds reported by store operations.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Input violated a field-level invariant.
    Validation(ProductValidationError),
    /// No live record has this id.
    NotFound(ProductId),
    /// Create supplied an id already present.
    DuplicateId(ProductId),
    /// Stock update requested a quantity outside `0..=u32::MAX`.
    InvalidQuantity(i64),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "product not found: {id}"),
            Self::DuplicateId(id) => write!(f, "product already exists: {id}"),
            Self::InvalidQuantity(quantity) => {
                write!(f, "invalid stock quantity {quantity}: must be >= 0")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) | Self::DuplicateId(_) | Self::InvalidQuantity(_) => None,
        }
    }
}

impl From<ProductValidationError> for StoreError {
    fn from(value: ProductValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Consumer-facing product store contract.
pub trait ProductRepository {
    /// Inserts a record under a freshly generated id.
    fn create(&self, input: ProductInput) -> StoreResult<Product>;
    /// Inserts a record under a caller-supplied id.
    fn create_with_id(&self, id: ProductId, input: ProductInput) -> StoreResult<Product>;
    /// Copy of one record.
    fn get_by_id(&self, id: ProductId) -> StoreResult<Product>;
    /// Every record, newest first.
    fn get_all(&self) -> Vec<Product>;
    /// Filtered, ordered page of records.
    fn query(&self, filter: &ProductFilter, request: PageRequest) -> Page<Product>;
    /// Replaces every mutable field, preserving `id` and `created_at`.
    fn update(&self, id: ProductId, replacement: ProductInput) -> StoreResult<Product>;
    /// Replaces only `quantity`.
    fn update_stock(&self, id: ProductId, quantity: i64) -> StoreResult<Product>;
    /// Removes one record permanently.
    fn delete(&self, id: ProductId) -> StoreResult<()>;
    /// Aggregate report and rankings from one consistent snapshot.
    fn statistics(&self) -> InventoryStatistics;

    /// Every record of one category, newest first.
    fn by_category(&self, category: Category) -> Vec<Product> {
        self.filtered(&ProductFilter::category(category))
    }

    /// Every active record, newest first.
    fn active_products(&self) -> Vec<Product> {
        self.filtered(&ProductFilter {
            active_only: true,
            ..ProductFilter::default()
        })
    }

    /// Every in-stock record, newest first.
    fn in_stock_products(&self) -> Vec<Product> {
        self.filtered(&ProductFilter {
            in_stock_only: true,
            ..ProductFilter::default()
        })
    }

    /// Every matching record, newest first, without pagination.
    fn filtered(&self, filter: &ProductFilter) -> Vec<Product>;
}

impl<R: ProductRepository + ?Sized> ProductRepository for Arc<R> {
    fn create(&self, input: ProductInput) -> StoreResult<Product> {
        (**self).create(input)
    }

    fn create_with_id(&self, id: ProductId, input: ProductInput) -> StoreResult<Product> {
        (**self).create_with_id(id, input)
    }

    fn get_by_id(&self, id: ProductId) -> StoreResult<Product> {
        (**self).get_by_id(id)
    }

    fn get_all(&self) -> Vec<Product> {
        (**self).get_all()
    }

    fn query(&self, filter: &ProductFilter, request: PageRequest) -> Page<Product> {
        (**self).query(filter, request)
    }

    fn update(&self, id: ProductId, replacement: ProductInput) -> StoreResult<Product> {
        (**self).update(id, replacement)
    }

    fn update_stock(&self, id: ProductId, quantity: i64) -> StoreResult<Product> {
        (**self).update_stock(id, quantity)
    }

    fn delete(&self, id: ProductId) -> StoreResult<()> {
        (**self).delete(id)
    }

    fn statistics(&self) -> InventoryStatistics {
        (**self).statistics()
    }

    fn filtered(&self, filter: &ProductFilter) -> Vec<Product> {
        (**self).filtered(filter)
    }
}

#[derive(Default)]
struct StoreState {
    products: HashMap<ProductId, Product>,
    last_stamp: Option<DateTime<Utc>>,
}

/// Wall-clock time, bumped past the previous stamp when the clock has not
/// advanced.
fn next_stamp(last_stamp: &mut Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now();
    let stamp = match *last_stamp {
        Some(last) if now <= last => last + Duration::microseconds(1),
        _ => now,
    };
    *last_stamp = Some(stamp);
    stamp
}

/// Thread-safe in-memory product store.
///
/// Share one instance by reference or through `Arc`; there is no global
/// state.
#[derive(Default)]
pub struct InMemoryProductStore {
    state: RwLock<StoreState>,
}

impl InMemoryProductStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with existing records.
    ///
    /// Records keep their ids and timestamps and pass the same checks as
    /// `create_with_id`.
    ///
    /// # Errors
    /// - `Validation` for a nil id, invalid fields or `updated_at < created_at`.
    /// - `DuplicateId` when two records share an id.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> StoreResult<Self> {
        let mut state = StoreState::default();
        for product in products {
            if product.id.is_nil() {
                return Err(ProductValidationError::NilId.into());
            }
            product.to_input().validate()?;
            if product.updated_at < product.created_at {
                return Err(ProductValidationError::TimestampsOutOfOrder.into());
            }
            if state.products.contains_key(&product.id) {
                return Err(StoreError::DuplicateId(product.id));
            }
            state.last_stamp = state.last_stamp.max(Some(product.updated_at));
            state.products.insert(product.id, product);
        }
        info!(
            "event=store_open module=store status=ok seeded={}",
            state.products.len()
        );
        Ok(Self {
            state: RwLock::new(state),
        })
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.state.read().products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&self, id: ProductId, input: ProductInput) -> StoreResult<Product> {
        if id.is_nil() {
            return Err(ProductValidationError::NilId.into());
        }
        input.validate()?;

        let mut guard = self.state.write();
        let state = &mut *guard;
        if state.products.contains_key(&id) {
            debug!("event=product_create module=store status=error error_code=duplicate_id id={id}");
            return Err(StoreError::DuplicateId(id));
        }
        let now = next_stamp(&mut state.last_stamp);
        let product = Product::from_input(id, input, now);
        state.products.insert(id, product.clone());
        debug!("event=product_create module=store status=ok id={id}");
        Ok(product)
    }
}

impl ProductRepository for InMemoryProductStore {
    fn create(&self, input: ProductInput) -> StoreResult<Product> {
        self.insert(Uuid::new_v4(), input)
    }

    fn create_with_id(&self, id: ProductId, input: ProductInput) -> StoreResult<Product> {
        self.insert(id, input)
    }

    fn get_by_id(&self, id: ProductId) -> StoreResult<Product> {
        self.state
            .read()
            .products
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn get_all(&self) -> Vec<Product> {
        self.filtered(&ProductFilter::default())
    }

    fn query(&self, filter: &ProductFilter, request: PageRequest) -> Page<Product> {
        let state = self.state.read();
        paginate(state.products.values(), filter, request)
    }

    fn filtered(&self, filter: &ProductFilter) -> Vec<Product> {
        let state = self.state.read();
        filter_sorted(state.products.values(), filter)
    }

    fn update(&self, id: ProductId, replacement: ProductInput) -> StoreResult<Product> {
        replacement.validate()?;

        let mut guard = self.state.write();
        let state = &mut *guard;
        let product = state
            .products
            .get_mut(&id)
            .ok_or(StoreError::NotFound(id))?;
        product.replace_fields(replacement, next_stamp(&mut state.last_stamp));
        debug!("event=product_update module=store status=ok id={id}");
        Ok(product.clone())
    }

    fn update_stock(&self, id: ProductId, quantity: i64) -> StoreResult<Product> {
        let quantity = u32::try_from(quantity).map_err(|_| StoreError::InvalidQuantity(quantity))?;

        let mut guard = self.state.write();
        let state = &mut *guard;
        let product = state
            .products
            .get_mut(&id)
            .ok_or(StoreError::NotFound(id))?;
        product.quantity = quantity;
        product.updated_at = next_stamp(&mut state.last_stamp);
        debug!("event=product_stock_update module=store status=ok id={id} quantity={quantity}");
        Ok(product.clone())
    }

    fn delete(&self, id: ProductId) -> StoreResult<()> {
        let mut state = self.state.write();
        match state.products.remove(&id) {
            Some(_) => {
                debug!("event=product_delete module=store status=ok id={id}");
                Ok(())
            }
            None => Err(StoreError::NotFound(id)),
        }
    }

    fn statistics(&self) -> InventoryStatistics {
        let started_at = Instant::now();
        let report = {
            let state = self.state.read();
            let snapshot: Vec<&Product> = state.products.values().collect();
            stats::compute_statistics(&snapshot)
        };
        debug!(
            "event=statistics module=store status=ok products={} duration_ms={}",
            report.total_products,
            started_at.elapsed().as_millis()
        );
        report
    }
}
