//! CLI smoke entry point.
//!
//! # Responsibility
//! - Seed an in-memory store with the sample catalog.
//! - Print a listing, one filtered page and the statistics report as JSON.
//!
//! # Environment
//! - `INVENTORY_LOG_LEVEL`: log level, defaults to the build-mode default.
//! - `INVENTORY_LOG_DIR`: absolute log directory; logging is off when unset.

use inventory_core::{
    Category, CreateProductRequest, InMemoryProductStore, ProductFilter, ProductService,
};
use log::info;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    if let Ok(log_dir) = std::env::var("INVENTORY_LOG_DIR") {
        let level = std::env::var("INVENTORY_LOG_LEVEL")
            .unwrap_or_else(|_| inventory_core::default_log_level().to_string());
        inventory_core::init_logging(&level, &log_dir)?;
    }

    let service = ProductService::new(InMemoryProductStore::new());
    for request in sample_catalog() {
        service.create_product(request)?;
    }
    info!(
        "event=seed module=cli status=ok products={}",
        service.repository().len()
    );

    println!("inventory_core version={}", inventory_core::core_version());
    for product in service.list_products().items {
        println!(
            "{} | {:<32} | {:>12} | qty={:<3} | {}",
            product.id,
            product.name,
            product.display_price(),
            product.quantity,
            product.category
        );
    }

    let in_stock_electronics = ProductFilter {
        category: Some(Category::Electronics),
        in_stock_only: true,
        ..ProductFilter::default()
    };
    let page = service.search_products(&in_stock_electronics, 1, 10);
    println!("{}", serde_json::to_string_pretty(&page)?);

    println!("{}", serde_json::to_string_pretty(&service.statistics())?);
    Ok(())
}

fn sample_catalog() -> Vec<CreateProductRequest> {
    vec![
        item(
            "Samsung Galaxy S24",
            "6.1 inch smartphone with 50MP camera and 5G",
            2299.99,
            25,
            Category::Electronics,
            true,
        ),
        item(
            "Dell Inspiron Notebook",
            "Intel i7 notebook with 16GB RAM and 512GB SSD",
            3499.99,
            10,
            Category::Electronics,
            true,
        ),
        item(
            "Nike Dri-FIT T-Shirt",
            "Sports shirt with sweat-wicking fabric",
            89.99,
            50,
            Category::Clothing,
            true,
        ),
        item(
            "Clean Code",
            "A handbook of agile software craftsmanship by Robert C. Martin",
            65.90,
            30,
            Category::Books,
            true,
        ),
        item(
            "Mountain Bike",
            "21-speed bicycle for trails",
            1299.99,
            8,
            Category::Sports,
            true,
        ),
        item(
            "Hugo Boss Eau de Toilette",
            "100ml fragrance",
            189.99,
            0,
            Category::Beauty,
            false,
        ),
        item(
            "Three-Seat Sofa",
            "Comfortable living room sofa",
            899.99,
            5,
            Category::Home,
            true,
        ),
    ]
}

fn item(
    name: &str,
    description: &str,
    price: f64,
    quantity: i64,
    category: Category,
    active: bool,
) -> CreateProductRequest {
    CreateProductRequest {
        name: name.to_string(),
        description: description.to_string(),
        price,
        quantity,
        category,
        active: Some(active),
    }
}
