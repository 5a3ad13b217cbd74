//! Benchmarks for the call-site hot path.
//!
//! After the first pass through a call site, every later pass only reads an already
//! published handle from its slot. These benchmarks compare that read for the two slot
//! strategies and measure a whole task with the disabled collector.

#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use itt_scope::{DisabledCollector, Domain, OnceSlot, ScopedTask, SpinSlot, StringHandle, task};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

static ONCE_SLOT: OnceSlot<StringHandle> = OnceSlot::new();
static SPIN_SLOT: SpinSlot<StringHandle> = SpinSlot::new();

static BENCH: Domain = Domain::new("bench");

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("slot_lookup");

    // Publish the handles before measuring so only the hot path is timed.
    _ = ONCE_SLOT.get_or_create(|| StringHandle::from_raw(1));
    _ = SPIN_SLOT.get_or_create(|| StringHandle::from_raw(1));

    group.bench_function("once_slot_ready", |b| {
        b.iter(|| black_box(&ONCE_SLOT).get_or_create(|| StringHandle::from_raw(2)));
    });

    group.bench_function("spin_slot_ready", |b| {
        b.iter(|| black_box(&SPIN_SLOT).get_or_create(|| StringHandle::from_raw(2)));
    });

    group.finish();

    let mut group = c.benchmark_group("disabled_task");

    group.bench_function("macro", |b| {
        b.iter(|| {
            let task = task!(BENCH, "bench_task");
            black_box(&task);
        });
    });

    let collector = DisabledCollector::new();

    group.bench_function("explicit_collector", |b| {
        b.iter(|| {
            let task = ScopedTask::begin_in(
                &collector,
                black_box(BENCH.resolve_in(&collector)),
                black_box(StringHandle::NULL),
            );
            black_box(&task);
        });
    });

    group.finish();
}
