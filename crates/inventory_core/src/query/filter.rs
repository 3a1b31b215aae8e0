//! Filter predicates and pagination.
//!
//! # Invariants
//! - All predicates are conjunctive; absent predicates match everything.
//! - Results are ordered by `created_at DESC, id ASC`.
//! - A page beyond the last one is empty but still reports true totals.

use crate::model::product::{Category, Product};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Page size used when the caller asks for zero or a negative size.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Optional conjunctive predicate set for filtered listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFilter {
    pub category: Option<Category>,
    /// Inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    pub max_price: Option<f64>,
    #[serde(default)]
    pub active_only: bool,
    #[serde(default)]
    pub in_stock_only: bool,
    /// Case-insensitive substring matched against name or description.
    pub text: Option<String>,
}

impl ProductFilter {
    /// Filter restricted to one category.
    pub fn category(category: Category) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    /// Returns whether `product` satisfies every supplied predicate.
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_with_needle(product, self.needle().as_deref())
    }

    fn needle(&self) -> Option<String> {
        self.text
            .as_deref()
            .filter(|text| !text.is_empty())
            .map(str::to_lowercase)
    }

    fn matches_with_needle(&self, product: &Product, needle: Option<&str>) -> bool {
        if self.category.is_some_and(|category| product.category != category) {
            return false;
        }
        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }
        if self.active_only && !product.active {
            return false;
        }
        if self.in_stock_only && !product.is_in_stock() {
            return false;
        }
        if let Some(needle) = needle {
            let in_name = product.name.to_lowercase().contains(needle);
            if !in_name && !product.description.to_lowercase().contains(needle) {
                return false;
            }
        }
        true
    }
}

/// Raw page coordinates as supplied by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: i64,
    pub size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            size: i64::from(DEFAULT_PAGE_SIZE),
        }
    }
}

impl PageRequest {
    pub fn new(page: i64, size: i64) -> Self {
        Self { page, size }
    }

    /// Coerces `page < 1` to 1 and `size <= 0` to `DEFAULT_PAGE_SIZE`.
    pub fn normalized(self) -> (u32, u32) {
        let page = u32::try_from(self.page.max(1)).unwrap_or(u32::MAX);
        let size = if self.size <= 0 {
            DEFAULT_PAGE_SIZE
        } else {
            u32::try_from(self.size).unwrap_or(u32::MAX)
        };
        (page, size)
    }
}

/// One page of results plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Number of matches across all pages.
    pub total_items: usize,
    pub page: u32,
    pub page_size: u32,
    /// `ceil(total_items / page_size)`.
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    /// Wraps an unpaginated result as a single page.
    pub fn single(items: Vec<T>) -> Self {
        let total_items = items.len();
        Self {
            items,
            total_items,
            page: 1,
            page_size: u32::try_from(total_items).unwrap_or(u32::MAX),
            total_pages: 1,
            has_next: false,
            has_previous: false,
        }
    }
}

/// Listing order: most recently created first, then `id` ascending.
pub fn newest_first(a: &Product, b: &Product) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.id.cmp(&b.id))
}

fn matching_sorted<'a, I>(records: I, filter: &ProductFilter) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    let needle = filter.needle();
    let mut matched: Vec<&Product> = records
        .into_iter()
        .filter(|product| filter.matches_with_needle(product, needle.as_deref()))
        .collect();
    matched.sort_by(|a, b| newest_first(a, b));
    matched
}

/// Clones every matching product out of `records`, newest first.
pub fn filter_sorted<'a, I>(records: I, filter: &ProductFilter) -> Vec<Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    matching_sorted(records, filter)
        .into_iter()
        .cloned()
        .collect()
}

/// Filters, orders and slices `records` into one page.
///
/// Only the requested slice is cloned.
pub fn paginate<'a, I>(records: I, filter: &ProductFilter, request: PageRequest) -> Page<Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    let (page, page_size) = request.normalized();
    let matched = matching_sorted(records, filter);

    let total_items = matched.len();
    let size = page_size as usize;
    let total_pages = total_items.div_ceil(size);
    let start = (page as usize - 1).saturating_mul(size);
    let items = if start >= total_items {
        Vec::new()
    } else {
        let end = start.saturating_add(size).min(total_items);
        matched[start..end].iter().map(|product| (*product).clone()).collect()
    };

    Page {
        items,
        total_items,
        page,
        page_size,
        total_pages,
        has_next: (page as usize) < total_pages,
        has_previous: page > 1,
    }
}

#[cfg(test)]
mod tests {
    use super::{PageRequest, ProductFilter, DEFAULT_PAGE_SIZE};
    use crate::model::product::{Category, Product, ProductInput};
    use chrono::Utc;
    use uuid::Uuid;

    fn product(name: &str, description: &str) -> Product {
        let input = ProductInput::new(name, 10.0, 1, Category::Books).with_description(description);
        Product::from_input(Uuid::new_v4(), input, Utc::now())
    }

    #[test]
    fn normalized_coerces_out_of_range_values() {
        assert_eq!(PageRequest::new(0, 0).normalized(), (1, DEFAULT_PAGE_SIZE));
        assert_eq!(PageRequest::new(-4, -1).normalized(), (1, DEFAULT_PAGE_SIZE));
        assert_eq!(PageRequest::new(3, 25).normalized(), (3, 25));
    }

    #[test]
    fn text_matches_name_or_description_ignoring_case() {
        let filter = ProductFilter {
            text: Some("CLEAN".to_string()),
            ..ProductFilter::default()
        };
        assert!(filter.matches(&product("Clean Code", "")));
        assert!(filter.matches(&product("Refactoring", "keeps code clean")));
        assert!(!filter.matches(&product("Dune", "desert planet")));
    }

    #[test]
    fn empty_text_imposes_no_constraint() {
        let filter = ProductFilter {
            text: Some(String::new()),
            ..ProductFilter::default()
        };
        assert!(filter.matches(&product("Dune", "")));
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let filter = ProductFilter {
            min_price: Some(10.0),
            max_price: Some(10.0),
            ..ProductFilter::default()
        };
        assert!(filter.matches(&product("Dune", "")));
    }
}
