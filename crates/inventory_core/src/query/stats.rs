//! Statistics rollups and top-N rankings.
//!
//! # Invariants
//! - Average prices are weighted by quantity (`value / quantity`) and are 0
//!   when the quantity sum is 0.
//! - `min_price`/`max_price` are `None` for an empty snapshot.
//! - Category rollups list only present categories, in `Category::ALL` order.
//! - Ranking ties are broken by `id` ascending.

use crate::model::product::{Category, Product};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Number of entries in each ranking.
pub const RANKING_SIZE: usize = 5;

/// Aggregate report over the whole live set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryStatistics {
    pub total_products: usize,
    pub active_products: usize,
    pub inactive_products: usize,
    pub in_stock_products: usize,
    pub out_of_stock_products: usize,
    /// Sum of `price * quantity`.
    pub total_inventory_value: f64,
    pub total_quantity: u64,
    pub average_price: f64,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub by_category: Vec<CategoryStatistics>,
    pub rankings: Rankings,
}

/// Rollup restricted to one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStatistics {
    pub category: Category,
    pub total_products: usize,
    pub active_products: usize,
    pub in_stock_products: usize,
    pub total_value: f64,
    pub total_quantity: u64,
    pub average_price: f64,
}

/// Top-N views, each at most `RANKING_SIZE` long.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rankings {
    pub most_expensive: Vec<Product>,
    pub cheapest: Vec<Product>,
    pub most_stocked: Vec<Product>,
}

#[derive(Default)]
struct Accumulator {
    total: usize,
    active: usize,
    in_stock: usize,
    value: f64,
    quantity: u64,
}

impl Accumulator {
    fn add(&mut self, product: &Product) {
        self.total += 1;
        if product.active {
            self.active += 1;
        }
        if product.is_in_stock() {
            self.in_stock += 1;
        }
        self.value += product.inventory_value();
        self.quantity += u64::from(product.quantity);
    }

    fn average_price(&self) -> f64 {
        weighted_average(self.value, self.quantity)
    }
}

fn weighted_average(value: f64, quantity: u64) -> f64 {
    if quantity == 0 {
        0.0
    } else {
        value / quantity as f64
    }
}

/// Computes the full report from one snapshot in a single aggregation pass.
pub fn compute_statistics(products: &[&Product]) -> InventoryStatistics {
    let mut overall = Accumulator::default();
    let mut per_category: BTreeMap<Category, Accumulator> = BTreeMap::new();
    let mut min_price: Option<f64> = None;
    let mut max_price: Option<f64> = None;

    for product in products {
        overall.add(product);
        per_category.entry(product.category).or_default().add(product);
        min_price = Some(min_price.map_or(product.price, |min| min.min(product.price)));
        max_price = Some(max_price.map_or(product.price, |max| max.max(product.price)));
    }

    let by_category = per_category
        .into_iter()
        .map(|(category, acc)| CategoryStatistics {
            category,
            total_products: acc.total,
            active_products: acc.active,
            in_stock_products: acc.in_stock,
            total_value: acc.value,
            total_quantity: acc.quantity,
            average_price: acc.average_price(),
        })
        .collect();

    InventoryStatistics {
        total_products: overall.total,
        active_products: overall.active,
        inactive_products: overall.total - overall.active,
        in_stock_products: overall.in_stock,
        out_of_stock_products: overall.total - overall.in_stock,
        total_inventory_value: overall.value,
        total_quantity: overall.quantity,
        average_price: overall.average_price(),
        min_price,
        max_price,
        by_category,
        rankings: compute_rankings(products),
    }
}

/// Builds the three top-N rankings.
pub fn compute_rankings(products: &[&Product]) -> Rankings {
    Rankings {
        most_expensive: top_n(products, RANKING_SIZE, |a, b| b.price.total_cmp(&a.price)),
        cheapest: top_n(products, RANKING_SIZE, |a, b| a.price.total_cmp(&b.price)),
        most_stocked: top_n(products, RANKING_SIZE, |a, b| b.quantity.cmp(&a.quantity)),
    }
}

/// Returns clones of the first `n` products under `key_order`, ties by id.
pub fn top_n<F>(products: &[&Product], n: usize, key_order: F) -> Vec<Product>
where
    F: Fn(&Product, &Product) -> Ordering,
{
    let mut ranked: Vec<&Product> = products.to_vec();
    ranked.sort_by(|a, b| key_order(a, b).then_with(|| a.id.cmp(&b.id)));
    ranked.into_iter().take(n).cloned().collect()
}
