//! Integration tests for installing an owned collector from many threads at once.
//!
//! This file installs its own collector, so it lives in its own test binary.

#![cfg(feature = "enable")]

use std::sync::atomic::{AtomicUsize, Ordering};

use itt_scope::{
    Collector, DisabledCollector, DomainHandle, Error, IntervalId, MarkerScope, StringHandle,
    TrackGroupHandle, TrackHandle, set_boxed_collector,
};
use testing::{race_on_threads, with_watchdog};

static DROPPED: AtomicUsize = AtomicUsize::new(0);

/// Discards every event and counts how many instances have been dropped.
#[derive(Debug)]
struct DropCountingCollector {
    inner: DisabledCollector,
}

impl Drop for DropCountingCollector {
    fn drop(&mut self) {
        DROPPED.fetch_add(1, Ordering::Relaxed);
    }
}

impl Collector for DropCountingCollector {
    fn create_domain(&self, name: &str) -> DomainHandle {
        self.inner.create_domain(name)
    }

    fn create_string_handle(&self, name: &str) -> StringHandle {
        self.inner.create_string_handle(name)
    }

    fn create_track_group(&self, name: Option<StringHandle>) -> TrackGroupHandle {
        self.inner.create_track_group(name)
    }

    fn create_track(&self, group: TrackGroupHandle, name: StringHandle) -> TrackHandle {
        self.inner.create_track(group, name)
    }

    fn set_track(&self, track: Option<TrackHandle>) {
        self.inner.set_track(track);
    }

    fn task_begin(&self, domain: DomainHandle, id: IntervalId, name: StringHandle) {
        self.inner.task_begin(domain, id, name);
    }

    fn task_end(&self, domain: DomainHandle) {
        self.inner.task_end(domain);
    }

    fn region_begin(&self, domain: DomainHandle, id: IntervalId, name: StringHandle) {
        self.inner.region_begin(domain, id, name);
    }

    fn region_end(&self, domain: DomainHandle, id: IntervalId) {
        self.inner.region_end(domain, id);
    }

    fn metadata_add_double(
        &self,
        domain: DomainHandle,
        id: Option<IntervalId>,
        name: StringHandle,
        value: f64,
    ) {
        self.inner.metadata_add_double(domain, id, name, value);
    }

    fn metadata_add_int64(
        &self,
        domain: DomainHandle,
        id: Option<IntervalId>,
        name: StringHandle,
        value: i64,
    ) {
        self.inner.metadata_add_int64(domain, id, name, value);
    }

    fn metadata_add_str(
        &self,
        domain: DomainHandle,
        id: Option<IntervalId>,
        name: StringHandle,
        value: &str,
    ) {
        self.inner.metadata_add_str(domain, id, name, value);
    }

    fn marker(&self, domain: DomainHandle, name: StringHandle, scope: MarkerScope) {
        self.inner.marker(domain, name, scope);
    }
}

#[test]
fn concurrent_installation_keeps_only_the_winner() {
    const THREADS: usize = 16;

    let results = with_watchdog(|| {
        race_on_threads(THREADS, || {
            set_boxed_collector(Box::new(DropCountingCollector {
                inner: DisabledCollector::new(),
            }))
        })
    });

    let installed = results.iter().filter(|result| result.is_ok()).count();
    let rejected = results
        .iter()
        .filter(|result| matches!(result, Err(Error::CollectorAlreadySet)))
        .count();

    assert_eq!(installed, 1);
    assert_eq!(rejected, THREADS - 1);

    // Every rejected collector was dropped. The installed one lives until the process exits.
    assert_eq!(DROPPED.load(Ordering::Relaxed), THREADS - 1);
}
