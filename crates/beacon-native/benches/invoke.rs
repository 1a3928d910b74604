//! Benchmark capability dispatch through the export surface
//!
//! Run with: cargo bench -p beacon-native

use beacon_native::{hello, initialize, CallContext, Exports, Value, HELLO};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_invoke(c: &mut Criterion) {
    let exports = initialize(Exports::new()).unwrap();
    let cap = *exports.get(HELLO).unwrap();
    let args = [Value::from("ignored"), Value::from(123), Value::Null];

    let mut group = c.benchmark_group("hello");
    group.bench_function("direct", |b| b.iter(|| hello(black_box(&CallContext::empty()))));
    group.bench_function("capability", |b| {
        b.iter(|| cap.invoke(black_box(&CallContext::empty())))
    });
    group.bench_function("capability_with_args", |b| {
        b.iter(|| cap.invoke(black_box(&CallContext::new(&args))))
    });
    group.bench_function("lookup_and_invoke", |b| {
        b.iter(|| exports.get(black_box(HELLO)).map(|c| c.invoke(&CallContext::empty())))
    });
    group.finish();
}

criterion_group!(benches, bench_invoke);
criterion_main!(benches);
