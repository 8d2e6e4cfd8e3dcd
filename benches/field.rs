#[macro_use]
extern crate criterion;
extern crate mandelcycle;

use criterion::Criterion;
use mandelcycle::{compute_field, map_frame, SamplingRect};

fn escape_field(c: &mut Criterion) {
    c.bench_function("compute_field 200x200 x100", |b| {
        let rect = SamplingRect::standard();
        b.iter(|| compute_field(&rect, 200, 200, 100).unwrap())
    });
}

fn cycle_frame(c: &mut Criterion) {
    let field = compute_field(&SamplingRect::standard(), 200, 200, 100).unwrap();
    c.bench_function("map_frame 200x200", move |b| {
        let mut k = 0u64;
        b.iter(|| {
            k += 1;
            map_frame(&field, k, 100).unwrap()
        })
    });
}

criterion_group!(benches, escape_field, cycle_frame);
criterion_main!(benches);
