use std::hash::RandomState;
use std::hint::black_box;

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use serde_json::Value;
use serde_json::json;

type OrderedMap<K, V> = linked_ordered_map::ordered_map::OrderedMap<K, V, RandomState>;
type IndexMap<K, V> = indexmap::IndexMap<K, V, RandomState>;

const SIZES: &[usize] = &[10000];

fn bench_set_at_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_at_end");

    for &size in SIZES {
        group.throughput(criterion::Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("ordered_map", size), &size, |b, &size| {
            b.iter(|| {
                let mut map: OrderedMap<usize, usize> = OrderedMap::default();
                for i in 0..size {
                    map.set(black_box(i), black_box(i * 2));
                }
                map
            })
        });

        group.bench_with_input(
            BenchmarkId::new("ordered_map_preallocated", size),
            &size,
            |b, &size| {
                b.iter(|| {
                    let mut map: OrderedMap<usize, usize> =
                        OrderedMap::with_capacity_and_hasher(size, RandomState::default());
                    for i in 0..size {
                        map.set(black_box(i), black_box(i * 2));
                    }
                    map
                })
            },
        );

        group.bench_with_input(BenchmarkId::new("indexmap", size), &size, |b, &size| {
            b.iter(|| {
                let mut map = IndexMap::default();
                for i in 0..size {
                    map.insert(black_box(i), black_box(i * 2));
                }
                map
            })
        });
    }

    group.finish();
}

fn bench_delete_from_middle(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete_from_middle");

    for &size in SIZES {
        group.throughput(criterion::Throughput::Elements((size / 2) as u64));

        group.bench_with_input(BenchmarkId::new("ordered_map", size), &size, |b, &size| {
            b.iter_batched(
                || (0..size).map(|i| (i, i * 2)).collect::<OrderedMap<_, _>>(),
                |mut map| {
                    for i in (size / 4)..(size * 3 / 4) {
                        black_box(map.delete(&i));
                    }
                    map
                },
                criterion::BatchSize::LargeInput,
            )
        });

        group.bench_with_input(
            BenchmarkId::new("indexmap_shift_remove", size),
            &size,
            |b, &size| {
                b.iter_batched(
                    || (0..size).map(|i| (i, i * 2)).collect::<IndexMap<_, _>>(),
                    |mut map| {
                        for i in (size / 4)..(size * 3 / 4) {
                            black_box(map.shift_remove(&i));
                        }
                        map
                    },
                    criterion::BatchSize::LargeInput,
                )
            },
        );
    }

    group.finish();
}

fn bench_move_to_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("move_to_front");

    for &size in SIZES {
        group.throughput(criterion::Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("ordered_map", size), &size, |b, &size| {
            let mut map: OrderedMap<usize, usize> = (0..size).map(|i| (i, i)).collect();
            b.iter(|| {
                for i in (0..size).rev() {
                    map.move_to_front(black_box(&i)).ok();
                }
            })
        });

        group.bench_with_input(
            BenchmarkId::new("indexmap_move_index", size),
            &size,
            |b, &size| {
                let mut map: IndexMap<usize, usize> = (0..size).map(|i| (i, i)).collect();
                b.iter(|| {
                    for i in (0..size).rev() {
                        if let Some(index) = map.get_index_of(black_box(&i)) {
                            map.move_index(index, 0);
                        }
                    }
                })
            },
        );
    }

    group.finish();
}

fn bench_random_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_access");

    for &size in SIZES {
        group.throughput(criterion::Throughput::Elements(size as u64));
        let keys: Vec<usize> = (0..size).map(|i| (i * 7919) % size).collect();

        group.bench_with_input(BenchmarkId::new("ordered_map", size), &size, |b, &size| {
            let map: OrderedMap<usize, usize> = (0..size).map(|i| (i, i * 2)).collect();
            b.iter(|| {
                let mut sum = 0;
                for key in &keys {
                    sum += map.get(black_box(key)).copied().unwrap_or_default();
                }
                sum
            })
        });

        group.bench_with_input(BenchmarkId::new("indexmap", size), &size, |b, &size| {
            let map: IndexMap<usize, usize> = (0..size).map(|i| (i, i * 2)).collect();
            b.iter(|| {
                let mut sum = 0;
                for key in &keys {
                    sum += map.get(black_box(key)).copied().unwrap_or_default();
                }
                sum
            })
        });
    }

    group.finish();
}

fn bench_iteration_sparse(c: &mut Criterion) {
    let mut group = c.benchmark_group("iteration_sparse");

    for &size in SIZES {
        group.throughput(criterion::Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("ordered_map", size), &size, |b, &size| {
            let mut map: OrderedMap<usize, usize> = (0..size).map(|i| (i, i * 2)).collect();
            for i in (0..size).step_by(3) {
                map.delete(&i);
            }

            b.iter(|| {
                let mut sum = 0;
                for (key, value) in map.iter() {
                    sum += black_box(*key) + black_box(*value);
                }
                sum
            })
        });

        group.bench_with_input(BenchmarkId::new("indexmap", size), &size, |b, &size| {
            let mut map: IndexMap<usize, usize> = (0..size).map(|i| (i, i * 2)).collect();
            for i in (0..size).step_by(3) {
                map.shift_remove(&i);
            }

            b.iter(|| {
                let mut sum = 0;
                for (key, value) in map.iter() {
                    sum += black_box(*key) + black_box(*value);
                }
                sum
            })
        });
    }

    group.finish();
}

fn sample_int_keyed() -> OrderedMap<i32, Value> {
    let mut map = OrderedMap::default();
    map.set(1, json!("bar"));
    map.set(7, json!("baz"));
    map.set(2, json!(28));
    map.set(3, json!(100));
    map.set(4, json!("baz"));
    map.set(5, json!("28"));
    map.set(6, json!("100"));
    map.set(8, json!("baz"));
    map
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    let map = sample_int_keyed();

    group.bench_function("json", |b| {
        b.iter(|| linked_ordered_map::json::to_string(black_box(&map)))
    });

    group.bench_function("yaml", |b| {
        b.iter(|| linked_ordered_map::yaml::to_string(black_box(&map)))
    });

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    let text = r#"{"1":"bar","7":"baz","2":28,"3":100,"4":"baz","5":"28","6":"100","8":"baz"}"#;

    group.bench_function("json", |b| {
        b.iter(|| {
            linked_ordered_map::json::from_str::<OrderedMap<i32, Value>>(black_box(text))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_set_at_end,
    bench_delete_from_middle,
    bench_move_to_front,
    bench_random_access,
    bench_iteration_sparse,
    bench_encode,
    bench_decode,
);
criterion_main!(benches);
