//! Integration tests for the `log` rendering of instrumentation events.
//!
//! A capturing logger and a `LogCollector` are installed process-wide. Each test uses its own
//! domain name and only inspects the records that mention it.

#![cfg(feature = "enable")]

use std::sync::{Mutex, Once};

use itt_scope::{
    Domain, LogCollector, MarkerScope, ScopedTrackBinding, Track, arg, counter, marker, region,
    set_collector, task, track,
};
use log::{Level, LevelFilter, Log, Metadata, Record};

const TARGET: &str = "itt_scope_tests";
const DIAGNOSTICS_TARGET: &str = "itt_scope::diagnostics";

#[derive(Debug)]
struct CapturedRecord {
    target: String,
    level: Level,
    message: String,
}

#[derive(Debug)]
struct CapturingLogger {
    records: Mutex<Vec<CapturedRecord>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        self.records
            .lock()
            .expect("logger lock poisoned")
            .push(CapturedRecord {
                target: record.target().to_owned(),
                level: record.level(),
                message: record.args().to_string(),
            });
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    records: Mutex::new(Vec::new()),
};

static COLLECTOR: LogCollector = LogCollector::builder()
    .target(TARGET)
    .level(Level::Debug)
    .build();

fn install() {
    static INSTALL: Once = Once::new();

    INSTALL.call_once(|| {
        log::set_logger(&LOGGER).expect("nothing else installs a logger in this process");
        log::set_max_level(LevelFilter::Trace);

        set_collector(&COLLECTOR).expect("nothing else installs a collector in this process");
    });
}

/// Messages emitted to `target` that mention `needle`, in emission order.
fn messages(target: &str, needle: &str) -> Vec<String> {
    LOGGER
        .records
        .lock()
        .expect("logger lock poisoned")
        .iter()
        .filter(|record| record.target == target && record.message.contains(needle))
        .map(|record| record.message.clone())
        .collect()
}

#[test]
fn records_use_configured_level() {
    static LEVELS: Domain = Domain::new("log.levels");

    install();

    marker!(LEVELS, "tick", MarkerScope::Task);

    let levels = LOGGER
        .records
        .lock()
        .expect("logger lock poisoned")
        .iter()
        .filter(|record| record.target == TARGET && record.message.starts_with("log.levels:"))
        .map(|record| record.level)
        .collect::<Vec<_>>();

    assert_eq!(levels, vec![Level::Debug]);
}

#[test]
fn installation_is_logged() {
    install();

    let installed = messages(DIAGNOSTICS_TARGET, "installed collector");
    assert_eq!(installed.len(), 1);
}

#[test]
fn task_with_arguments_is_rendered() {
    static NETWORK: Domain = Domain::new("log.network");

    install();

    {
        let receive = task!(NETWORK, "receive_packets");
        arg!(receive, "count", 42);
        arg!(receive, "peer", "10.0.0.1");
    }

    assert_eq!(
        messages(TARGET, "log.network:"),
        vec![
            "log.network: task 'receive_packets' begins on track 'default'",
            "log.network: 'receive_packets' argument 'count' = 42 on track 'default'",
            "log.network: 'receive_packets' argument 'peer' = '10.0.0.1' on track 'default'",
            "log.network: task ends on track 'default'",
        ]
    );
}

#[test]
fn region_names_its_identifier() {
    static STORAGE: Domain = Domain::new("log.storage");

    install();

    drop(region!(STORAGE, "compact"));

    let rendered = messages(TARGET, "log.storage:");

    assert_eq!(rendered.len(), 2);
    assert!(
        rendered[0].starts_with("log.storage: region 'compact' begins on track 'default' (id ")
    );
    assert!(
        rendered[1].starts_with("log.storage: region 'compact' ends on track 'default' (id ")
    );

    // Both records carry the same identifier.
    let id = |message: &str| message.rsplit_once("(id ").map(|(_, id)| id.to_owned());
    assert_eq!(id(&rendered[0]), id(&rendered[1]));
}

#[test]
fn markers_and_counters_follow_bound_track() {
    static RENDER: Domain = Domain::new("log.render");

    install();

    {
        let _track = track!("renderer", "gpu");
        marker!(RENDER, "frame_presented", MarkerScope::Thread);
        counter!(RENDER, "queue_depth", 3_u32);
    }

    marker!(RENDER, "idle", MarkerScope::Global);

    assert_eq!(
        messages(TARGET, "log.render:"),
        vec![
            "log.render: thread marker 'frame_presented' on track 'renderer/gpu'",
            "log.render: 'queue_depth' = 3 on track 'renderer/gpu'",
            "log.render: global marker 'idle' on track 'default'",
        ]
    );
}

#[test]
fn nested_binding_is_reported() {
    static OUTER: Track = Track::new("nested_outer");
    static INNER: Track = Track::new("nested_inner");

    install();

    let _outer = ScopedTrackBinding::bind(&OUTER);
    {
        let _inner = ScopedTrackBinding::bind(&INNER);
    }

    let warnings = LOGGER
        .records
        .lock()
        .expect("logger lock poisoned")
        .iter()
        .filter(|record| {
            record.target == DIAGNOSTICS_TARGET
                && record.level == Level::Warn
                && record.message.contains("nested track binding")
        })
        .count();

    assert!(warnings >= 1);
}
