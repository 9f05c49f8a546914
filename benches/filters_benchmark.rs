use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{seq::SliceRandom, thread_rng, Rng};
use travel_marketplace::catalog::{filter_accommodations, DemoCatalog};
use travel_marketplace::filters::{FilterState, QueryParams};

const AMENITIES: &[&str] = &["wifi", "pool", "spa", "parking", "kitchen", "breakfast", "gym"];
const CATEGORIES: &[&str] = &["food", "adventure", "culture", "cruise", "history"];

// Random but valid query strings for both modes
fn random_queries(count: usize) -> Vec<String> {
    let mut rng = thread_rng();
    (0..count)
        .map(|i| {
            let mut params = QueryParams::new();
            if i % 2 == 0 {
                params.push("mode", "hotels");
                params.push("rooms", rng.gen_range(1..4).to_string());
                params.push("priceMax", rng.gen_range(100..1000).to_string());
                let amount = rng.gen_range(0..4);
                let picked: Vec<&str> = AMENITIES
                    .choose_multiple(&mut rng, amount)
                    .copied()
                    .collect();
                params.push("amenities", picked.join(","));
            } else {
                params.push("mode", "tours");
                params.push("adults", rng.gen_range(1..6).to_string());
                let amount = rng.gen_range(0..3);
                let picked: Vec<&str> = CATEGORIES
                    .choose_multiple(&mut rng, amount)
                    .copied()
                    .collect();
                params.push("category", picked.join(","));
                params.push("startDate", format!("2025-06-{:02}", rng.gen_range(1..29)));
            }
            params.to_string()
        })
        .collect()
}

pub fn filters_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_state");

    for size in [10, 100, 1000].iter() {
        let queries = random_queries(*size);

        group.bench_with_input(BenchmarkId::new("hydrate", size), &queries, |b, queries| {
            b.iter(|| {
                for query in queries {
                    black_box(FilterState::from_query_str(query));
                }
            })
        });

        let states: Vec<FilterState> = queries
            .iter()
            .map(|q| FilterState::from_query_str(q))
            .collect();
        group.bench_with_input(BenchmarkId::new("serialize", size), &states, |b, states| {
            b.iter(|| {
                for state in states {
                    black_box(state.to_query_params().to_string());
                }
            })
        });
    }

    let demo = DemoCatalog::builtin();
    let state = FilterState::from_query_str("mode=hotels&amenities=wifi&priceMax=700&sort=price-low");
    group.bench_function("filter_demo_accommodations", |b| {
        b.iter(|| black_box(filter_accommodations(demo.accommodations(), state.hotels())))
    });

    group.finish();
}

criterion_group!(benches, filters_benchmark);
criterion_main!(benches);
