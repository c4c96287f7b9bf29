use criterion::criterion_main;

mod bitfield;
mod segmented;

criterion_main!(
    bitfield::benches,
    priority_queue::benches,
    segmented::benches,
);
