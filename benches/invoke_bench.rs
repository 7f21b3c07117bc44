//! Benchmarks for cached vs uncached symbol invocation

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dynload::DynamicLibrary;

type IntAdd = extern "C" fn(i32, i32) -> i32;

/// Benchmark invoke (cache hit after first call) against invoke_uncached
/// (fresh resolution every call)
fn bench_invoke(c: &mut Criterion) {
    let path = env!("DYNLOAD_FIXTURE");
    if path.is_empty() {
        eprintln!("payload library not built; skipping invoke benchmarks");
        return;
    }
    let lib = DynamicLibrary::load(path).expect("payload library should load");

    let mut group = c.benchmark_group("invoke");

    // Warm up the cache so the loop measures the hit path.
    let _ = unsafe { lib.invoke::<IntAdd>("intAdd", (1, 1)) };

    group.bench_function("cached", |b| {
        b.iter(|| {
            let sum =
                unsafe { lib.invoke::<IntAdd>("intAdd", (black_box(2), black_box(3))) }.unwrap();
            black_box(sum)
        })
    });

    group.bench_function("uncached", |b| {
        b.iter(|| {
            let sum = unsafe {
                lib.invoke_uncached::<IntAdd>("intAdd", (black_box(2), black_box(3)))
            }
            .unwrap();
            black_box(sum)
        })
    });

    group.bench_function("resolved_once", |b| {
        let add = unsafe { lib.get::<IntAdd>("intAdd").unwrap() };
        b.iter(|| black_box((*add)(black_box(2), black_box(3))))
    });

    group.finish();
}

criterion_group!(benches, bench_invoke);
criterion_main!(benches);
