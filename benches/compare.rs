use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use heroclash::{compare, Hero, HeroEngine, HeroId, InMemoryHeroStore, Powerstat, Powerstats, Selection};

fn make_roster(n: u64) -> Vec<Hero> {
    (1..=n)
        .map(|id| {
            let mut stats = Powerstats::new();
            for (i, stat) in Powerstat::ALL.into_iter().enumerate() {
                let v = (id * 7 + i as u64 * 13) % 101;
                // Every third hero carries string-typed stats, as real feeds do.
                if id % 3 == 0 {
                    stats.set(stat, v.to_string().as_str());
                } else {
                    stats.set(stat, v as i64);
                }
            }
            Hero::new(id, format!("hero-{id}")).with_powerstats(stats)
        })
        .collect()
}

fn bench_compare(c: &mut Criterion) {
    let roster = make_roster(2);
    let (a, b) = (&roster[0], &roster[1]);

    let mut group = c.benchmark_group("compare");
    group.throughput(Throughput::Elements(1));
    group.bench_function("pure", |bencher| {
        bencher.iter(|| compare(black_box(a), black_box(b)));
    });
    group.finish();
}

fn bench_engine(c: &mut Criterion) {
    let store = InMemoryHeroStore::from_heroes(make_roster(731)).unwrap();
    let engine = HeroEngine::new(Arc::new(store));

    let mut group = c.benchmark_group("engine");
    group.throughput(Throughput::Elements(1));
    group.bench_function("compare_raw", |bencher| {
        bencher.iter(|| engine.compare_raw(black_box(Some("12")), black_box(Some("600"))).unwrap());
    });
    group.bench_function("compare_selection", |bencher| {
        let selection = Selection::new().toggle(HeroId::new(3)).toggle(HeroId::new(4));
        bencher.iter(|| engine.compare_selection(black_box(&selection)).unwrap());
    });
    group.finish();
}

fn bench_selection(c: &mut Criterion) {
    let ids: Vec<HeroId> = (1..=64).map(HeroId::new).collect();
    c.bench_function("selection/toggle_64", |bencher| {
        bencher.iter(|| {
            ids.iter()
                .fold(Selection::new(), |selection, &id| selection.toggle(id))
        });
    });
}

criterion_group!(benches, bench_compare, bench_engine, bench_selection);
criterion_main!(benches);
