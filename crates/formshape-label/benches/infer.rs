//! Label inference throughput.
//!
//! Run with: cargo bench -p formshape-label

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use formshape_label::infer_label;

const IDENTIFIERS: &[&str] = &[
    "email",
    "firstName",
    "homePageUrl",
    "XMLHttpRequest",
    "billing_address_line2",
    "isHTML5Compatible",
];

fn bench_infer(c: &mut Criterion) {
    let mut group = c.benchmark_group("infer_label");
    for identifier in IDENTIFIERS {
        group.bench_with_input(
            BenchmarkId::from_parameter(identifier),
            identifier,
            |b, identifier| b.iter(|| infer_label(black_box(identifier))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_infer);
criterion_main!(benches);
