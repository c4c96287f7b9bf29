use commonware_collections::Bitfield;
use criterion::{criterion_group, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

fn bench_set_range(c: &mut Criterion) {
    for len in [1 << 10, 1 << 16, 1 << 22] {
        let mut field = Bitfield::new(len);
        c.bench_function(&format!("{}/fn=set_range len={len}", module_path!()), |b| {
            b.iter(|| {
                field.set_range(black_box(3), black_box(len - 5)).unwrap();
                field.reset_range(black_box(3), black_box(len - 5)).unwrap();
            });
        });
    }
}

fn bench_set_bits(c: &mut Criterion) {
    for density in [0.001, 0.1, 0.5] {
        let mut rng = StdRng::seed_from_u64(0);
        let len = 1 << 20;
        let bools: Vec<bool> = (0..len).map(|_| rng.gen_bool(density)).collect();
        let field = Bitfield::from_bools(&bools);
        c.bench_function(
            &format!("{}/fn=set_bits len={len} density={density}", module_path!()),
            |b| {
                b.iter(|| black_box(&field).set_bits().count());
            },
        );
    }
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = bench_set_range, bench_set_bits,
}
