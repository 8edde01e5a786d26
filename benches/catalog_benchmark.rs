use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{seq::SliceRandom, thread_rng, Rng};
use std::sync::Arc;
use std::thread;
use watch_rental_core::catalog::{self, FilterSpec};
use watch_rental_core::models::{Availability, NewRentalItem, RentalItem, RentalPeriod};
use watch_rental_core::{quote, CatalogStore, DateSelection};

const BRANDS: [&str; 6] = ["Rolex", "Omega", "Audemars Piguet", "Patek Philippe", "IWC", "TAG Heuer"];
const PERIODS: [RentalPeriod; 3] = [RentalPeriod::Day, RentalPeriod::Week, RentalPeriod::Month];

fn random_item(rng: &mut impl Rng) -> NewRentalItem {
    let brand = BRANDS.choose(rng).unwrap();
    NewRentalItem {
        brand: brand.to_string(),
        model: format!("Model {}", rng.gen_range(1..1000)),
        price: rng.gen_range(50.0..1000.0),
        rental_period: *PERIODS.choose(rng).unwrap(),
        description: format!("A {} watch in excellent condition.", brand),
        availability: Availability {
            from: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            to: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
        },
        featured: rng.gen_bool(0.1),
        ..Default::default()
    }
}

fn random_catalog(size: usize) -> Vec<RentalItem> {
    let mut rng = thread_rng();
    (0..size)
        .map(|i| RentalItem::from_new(i.to_string(), random_item(&mut rng)))
        .collect()
}

pub fn filter_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_filter");

    for size in [100, 1_000, 10_000].iter() {
        let items = random_catalog(*size);
        let spec = FilterSpec {
            brand: Some("o".to_string()),
            price_min: Some(100.0),
            price_max: Some(800.0),
            search_term: Some("excellent".to_string()),
            ..Default::default()
        };

        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |b, items| {
            b.iter(|| black_box(catalog::display(items, &spec)));
        });
    }

    group.finish();
}

// Concurrent readers and listing writers against one store
pub fn store_benchmark(c: &mut Criterion) {
    c.bench_function("catalog_store_mixed", |b| {
        b.iter(|| {
            let store = Arc::new(CatalogStore::new(random_catalog(200)));

            let mut handles = vec![];
            for _ in 0..4 {
                let store = Arc::clone(&store);
                handles.push(thread::spawn(move || {
                    let mut rng = thread_rng();
                    for _ in 0..100 {
                        if rng.gen_bool(0.2) {
                            store.add(random_item(&mut rng));
                        } else {
                            let _ = store.display(&FilterSpec::default());
                        }
                    }
                }));
            }

            for handle in handles {
                handle.join().unwrap();
            }

            black_box(store.stats())
        });
    });
}

pub fn quote_benchmark(c: &mut Criterion) {
    let selection = DateSelection::new(
        NaiveDate::from_ymd_opt(2023, 6, 1),
        NaiveDate::from_ymd_opt(2023, 8, 15),
    );

    c.bench_function("booking_quote", |b| {
        b.iter(|| black_box(quote(black_box(125.0), RentalPeriod::Week, &selection)))
    });
}

criterion_group!(benches, filter_benchmark, store_benchmark, quote_benchmark);
criterion_main!(benches);
