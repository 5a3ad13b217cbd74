//! Integration tests for a process that never installs a collector.
//!
//! Nothing in this file installs a collector, so every instrumented call is a silent no-op
//! and the first instrumented call fixes the process on the disabled collector.

use itt_scope::{
    Domain, Error, LogCollector, MarkerScope, arg, collector, counter, function_task, marker,
    region, set_boxed_collector, task, track,
};
#[cfg(not(feature = "enable"))]
use itt_scope::set_collector;

static QUIET: Domain = Domain::new("tests.quiet");

#[test]
fn instrumentation_is_a_no_op() {
    let work = task!(QUIET, "work");
    arg!(work, "count", 42);
    arg!(work, "peer", "10.0.0.1");

    {
        let _region = region!(QUIET, "inner");
        let _track = track!("group", "track");

        marker!(QUIET, "event", MarkerScope::Global);
        counter!(QUIET, "depth", 1.5);
    }

    let _function = function_task!(QUIET);

    // Handles from the disabled collector are null and stay null.
    assert!(QUIET.handle().is_null());
    assert!(work.id().domain_part() == 0 && work.id().name_part() == 0);
}

#[test]
fn late_installation_fails() {
    _ = collector();

    let result = set_boxed_collector(Box::new(LogCollector::new()));

    assert!(matches!(
        result,
        Err(Error::CollectorAlreadySet | Error::Disabled)
    ));
}

#[cfg(not(feature = "enable"))]
#[test]
fn installation_without_enable_feature_is_disabled() {
    static COLLECTOR: LogCollector = LogCollector::new();

    assert!(matches!(
        set_collector(&COLLECTOR),
        Err(Error::Disabled)
    ));
    assert!(matches!(
        set_boxed_collector(Box::new(LogCollector::new())),
        Err(Error::Disabled)
    ));
}
