use inventory_core::{
    Category, InMemoryProductStore, PageRequest, ProductFilter, ProductInput, ProductRepository,
    ProductService,
};
use std::sync::Arc;
use std::thread;

const THREADS: usize = 8;
const CREATES_PER_THREAD: usize = 50;
const DELETES_PER_THREAD: usize = 20;

#[test]
fn interleaved_creates_deletes_and_reads_keep_count_consistent() {
    let store = InMemoryProductStore::new();

    thread::scope(|scope| {
        for worker in 0..THREADS {
            let store = &store;
            scope.spawn(move || {
                let mut mine = Vec::new();
                for n in 0..CREATES_PER_THREAD {
                    let input =
                        ProductInput::new(format!("w{worker} item {n}"), 1.0, 1, Category::Other);
                    mine.push(store.create(input).unwrap().id);

                    let _ = store.get_all();
                    let _ = store.statistics();
                }
                for id in mine.iter().take(DELETES_PER_THREAD) {
                    store.delete(*id).unwrap();
                    let _ = store.query(&ProductFilter::default(), PageRequest::new(1, 5));
                }
                for id in mine.iter().skip(DELETES_PER_THREAD) {
                    assert!(store.get_by_id(*id).is_ok());
                }
            });
        }
    });

    let expected = THREADS * (CREATES_PER_THREAD - DELETES_PER_THREAD);
    assert_eq!(store.get_all().len(), expected);
    assert_eq!(store.statistics().total_products, expected);
}

#[test]
fn statistics_snapshot_is_internally_consistent_under_writers() {
    let store = Arc::new(InMemoryProductStore::new());

    let writers: Vec<_> = (0..4)
        .map(|worker| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for n in 0..100 {
                    let product = store
                        .create(ProductInput::new(format!("w{worker} {n}"), 2.0, 3, Category::Toys))
                        .unwrap();
                    if n % 2 == 0 {
                        store.delete(product.id).unwrap();
                    }
                }
            })
        })
        .collect();

    for _ in 0..50 {
        let stats = store.statistics();
        assert_eq!(stats.total_quantity, 3 * stats.total_products as u64);
        let rollup: usize = stats.by_category.iter().map(|c| c.total_products).sum();
        assert_eq!(rollup, stats.total_products);
    }

    for writer in writers {
        writer.join().unwrap();
    }
    assert_eq!(store.len(), 4 * 50);
}

#[test]
fn shared_service_over_arc_store_sees_every_write() {
    let store = Arc::new(InMemoryProductStore::new());
    let service = ProductService::new(Arc::clone(&store));

    thread::scope(|scope| {
        for worker in 0..4 {
            let store = Arc::clone(&store);
            scope.spawn(move || {
                for n in 0..25 {
                    store
                        .create(ProductInput::new(format!("w{worker} {n}"), 1.0, 1, Category::Food))
                        .unwrap();
                }
            });
        }
    });

    assert_eq!(service.list_products().total_items, 100);
}
