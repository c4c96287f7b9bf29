use commonware_collections::{segmented::Config, LongHashSet, LongList, NZUsize};
use criterion::{criterion_group, BatchSize, Criterion};
use std::hint::black_box;

fn bench_list_push(c: &mut Criterion) {
    for capacity in [1 << 10, 1 << 16, LongList::<u64>::DEFAULT_BLOCK_CAPACITY] {
        let cfg = Config {
            block_capacity: NZUsize!(capacity),
        };
        c.bench_function(
            &format!("{}/fn=list_push items=1000000 capacity={capacity}", module_path!()),
            |b| {
                b.iter_batched(
                    || LongList::with_config(cfg),
                    |mut list| {
                        for i in 0..1_000_000u64 {
                            list.push(i);
                        }
                        list
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

fn bench_list_get(c: &mut Criterion) {
    let mut list = LongList::with_config(Config {
        block_capacity: NZUsize!(1 << 12),
    });
    list.extend(0..1_000_000u64);
    c.bench_function(&format!("{}/fn=list_get items=1000000", module_path!()), |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for i in (0..1_000_000u64).step_by(97) {
                sum += *list.get(black_box(i)).unwrap();
            }
            sum
        });
    });
}

fn bench_set_contains(c: &mut Criterion) {
    for capacity in [1 << 10, 1 << 16] {
        let mut set = LongHashSet::with_config(Config {
            block_capacity: NZUsize!(capacity),
        });
        set.extend(0..100_000u64);
        c.bench_function(
            &format!("{}/fn=set_contains items=100000 capacity={capacity}", module_path!()),
            |b| {
                b.iter(|| set.contains(black_box(&99_999)));
            },
        );
    }
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = bench_list_push, bench_list_get, bench_set_contains,
}
