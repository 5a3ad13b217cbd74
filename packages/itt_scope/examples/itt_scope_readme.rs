//! Example that demonstrates the usage shown in the crate documentation.
//!
//! Events are rendered through the `log` facade by a `LogCollector` and printed by `env_logger`.

use std::thread;

use itt_scope::{
    Domain, LogCollector, MarkerScope, arg, counter, function_task, marker, region,
    set_collector, task, track,
};
use log::LevelFilter;

static NETWORK: Domain = Domain::new("example.network");
static RENDER: Domain = Domain::new("example.render");

static COLLECTOR: LogCollector = LogCollector::new();

fn receive_packets(count: i64) {
    let receive = task!(NETWORK, "receive_packets");
    arg!(receive, "count", count);
    arg!(receive, "peer", "10.0.0.1");

    let _decode = region!(NETWORK, "decode");
    arg!(receive, "ratio", 0.75_f32);
}

fn present_frame(queue_depth: u32) {
    let _task = function_task!(RENDER);
    let _track = track!("renderer", "gpu");

    marker!(RENDER, "frame_presented", MarkerScope::Thread);
    counter!(RENDER, "queue_depth", queue_depth);
}

fn main() {
    println!("=== itt_scope README Example ===");

    env_logger::Builder::new()
        .filter_level(LevelFilter::Trace)
        .init();

    // Fails with `Error::Disabled` when built without the `enable` feature.
    if let Err(error) = set_collector(&COLLECTOR) {
        log::warn!("instrumentation stays off: {error}");
    }

    receive_packets(42);

    thread::spawn(|| present_frame(3))
        .join()
        .expect("render thread panicked");

    marker!(RENDER, "shutdown", MarkerScope::Global);
}
