//! Error tree construction for large field arrays.
//!
//! Run with: cargo bench -p formshape-error

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use formshape_error::{FieldPath, FlatError, KnownPaths, build_error_tree};

fn submission(items: usize) -> (Vec<FlatError>, KnownPaths) {
    let mut errors = vec![FlatError::new(FieldPath::key("items"), "Too many items")];
    let mut known = KnownPaths::new();
    for i in 0..items {
        known.insert(format!("items.{i}.name"));
        known.insert(format!("items.{i}.email"));
        if i % 3 == 0 {
            let mut path = FieldPath::key("items");
            path.push_index(i);
            path.push_key("email");
            errors.push(FlatError::new(path, "Invalid email"));
        }
    }
    (errors, known)
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_error_tree");
    for items in [10, 100, 1000] {
        let (errors, known) = submission(items);
        group.bench_with_input(BenchmarkId::from_parameter(items), &items, |b, _| {
            b.iter(|| build_error_tree(black_box(errors.clone()), black_box(&known)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build);
criterion_main!(benches);
