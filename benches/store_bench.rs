//! Benchmarks for the Inmomarket store and search paths
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use inmomarket::listings::{ListingService, PropertyFilter, PropertySort};
use inmomarket::store::{Category, Location, MarketStore, Property, PublicationStatus};
use std::sync::Arc;

async fn seeded_store(properties: usize) -> Arc<MarketStore> {
    let store = Arc::new(MarketStore::in_memory());

    let category = store
        .categories()
        .insert(|id| Category {
            id,
            name: "Casa".to_string(),
            description: String::new(),
            active: true,
        })
        .await;
    let location = store
        .locations()
        .insert(|id| Location {
            id,
            city: "Medellín".to_string(),
            city_description: String::new(),
            department: "Antioquia".to_string(),
            department_description: String::new(),
            active: true,
        })
        .await;

    for i in 0..properties {
        store
            .properties()
            .insert(|id| Property {
                id,
                name: format!("Propiedad {}", i),
                description: String::new(),
                rooms: (i % 6) as u8 + 1,
                baths: (i % 3) as u8 + 1,
                price: 100_000_000 + (i as u64 * 1_000_000),
                category_id: category.id,
                location_id: location.id,
                seller_id: (i % 20) as u32 + 1,
                status: PublicationStatus::Published,
                active_since: chrono::Utc::now(),
            })
            .await;
    }

    store
}

fn bench_store(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let mut group = c.benchmark_group("store");

    group.bench_function("insert_single", |b| {
        b.iter_custom(|iters| {
            rt.block_on(async {
                let store = seeded_store(0).await;
                let start = std::time::Instant::now();

                for i in 0..iters {
                    store
                        .properties()
                        .insert(|id| Property {
                            id,
                            name: format!("Propiedad {}", i),
                            description: String::new(),
                            rooms: 3,
                            baths: 2,
                            price: 100,
                            category_id: 1,
                            location_id: 1,
                            seller_id: 1,
                            status: PublicationStatus::Published,
                            active_since: chrono::Utc::now(),
                        })
                        .await;
                }

                start.elapsed()
            })
        });
    });

    group.bench_function("get_by_id_10k", |b| {
        b.iter_custom(|iters| {
            rt.block_on(async {
                let store = seeded_store(10_000).await;
                let start = std::time::Instant::now();

                for i in 0..iters {
                    let id = (i % 10_000) as u32 + 1;
                    let _ = store.properties().get(black_box(id)).await.unwrap();
                }

                start.elapsed()
            })
        });
    });

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let mut group = c.benchmark_group("search");

    for size in [100_usize, 1_000, 10_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("filter_and_sort_{}", size), |b| {
            b.iter_custom(|iters| {
                rt.block_on(async {
                    let store = seeded_store(size).await;
                    let listings = ListingService::new(store);
                    let filter = PropertyFilter {
                        min_rooms: Some(3),
                        max_price: Some(105_000_000),
                        sort: Some(PropertySort::PriceAsc),
                        ..Default::default()
                    };

                    let start = std::time::Instant::now();

                    for _ in 0..iters {
                        let _ = listings.search(black_box(&filter)).await;
                    }

                    start.elapsed()
                })
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_store, bench_search);
criterion_main!(benches);
