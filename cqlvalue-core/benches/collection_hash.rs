use cqlvalue_core::{Map, ScalarKind, Set, Value};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn build_map(size: i32) -> Map {
    let mut map = Map::new(ScalarKind::Int.into(), ScalarKind::Varchar.into());
    for i in 0..size {
        map.set(i, format!("value-{}", i)).unwrap();
    }
    map
}

fn build_set(size: i32) -> Set {
    let mut set = Set::new(ScalarKind::Bigint.into());
    for i in 0..size {
        set.add(i64::from(i) * 7919).unwrap();
    }
    set
}

fn benchmark_cached_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_hash");

    for size in [10, 100, 1000].iter() {
        let map = build_map(*size);
        map.hash_code();
        group.bench_with_input(BenchmarkId::new("map", size), &map, |b, map| {
            b.iter(|| black_box(map.hash_code()));
        });
    }

    group.finish();
}

fn benchmark_dirty_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("dirty_hash");

    for size in [10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::new("map", size), size, |b, &size| {
            let mut map = build_map(size);
            b.iter(|| {
                map.set(0, "touched").unwrap();
                black_box(map.hash_code())
            });
        });
        group.bench_with_input(BenchmarkId::new("set", size), size, |b, &size| {
            let mut set = build_set(size);
            b.iter(|| {
                set.remove(0i64).unwrap();
                set.add(0i64).unwrap();
                black_box(set.hash_code())
            });
        });
    }

    group.finish();
}

fn benchmark_nested_lookup(c: &mut Criterion) {
    let mut outer = Set::new(cqlvalue_core::TypeTag::set(ScalarKind::Bigint.into()));
    for i in 0..100 {
        outer.add(build_set(i)).unwrap();
    }
    let needle = Value::from(build_set(50));

    c.bench_function("nested_set_contains", |b| {
        b.iter(|| black_box(outer.contains(needle.clone()).unwrap()));
    });
}

criterion_group!(
    benches,
    benchmark_cached_hash,
    benchmark_dirty_hash,
    benchmark_nested_lookup
);

criterion_main!(benches);
