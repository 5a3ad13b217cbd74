#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Scoped profiler instrumentation: tasks, regions, markers, counters and named tracks.
//!
//! This crate maps convenience macros and RAII guards onto the primitives of an instrumentation
//! API in the style of Intel ITT: domains, interned string handles, task and region intervals,
//! metadata attached to intervals, markers, counters and virtual tracks. The primitives
//! themselves are provided by a [`Collector`], which is the thing that actually talks to a
//! profiler (or to the `log` facade, or to nothing at all). [`IttCollector`] talks to Intel ITT
//! and [`LogCollector`] renders events as `log` records.
//!
//! # Declaring a domain
//!
//! Every interval, marker and counter belongs to a domain. Declare one per module as a static:
//!
//! ```
//! use itt_scope::Domain;
//!
//! static NETWORK: Domain = Domain::new("app.network");
//! ```
//!
//! # Scoped intervals
//!
//! A task is a short-lived interval that nests strictly on one thread. A region may outlive
//! simple call stack nesting. Both are closed when the guard returned by the macro is dropped,
//! on every exit path from the enclosing block.
//!
//! ```
//! use itt_scope::{Domain, arg, region, task};
//!
//! static NETWORK: Domain = Domain::new("app.network");
//!
//! fn receive_packets(count: i64) {
//!     let receive = task!(NETWORK, "receive_packets");
//!     arg!(receive, "count", count);
//!     arg!(receive, "ratio", 0.75_f32);
//!     arg!(receive, "peer", "10.0.0.1");
//!
//!     let _decode = region!(NETWORK, "decode");
//!     // ...
//! }
//! # receive_packets(42);
//! ```
//!
//! Argument values are recorded as exactly one of three kinds: floating point values become
//! `f64`, integers become `i64` and strings are recorded as strings. See [`Argument`].
//! Counter samples accept any primitive number and are always recorded as `f64`. See
//! [`CounterValue`].
//!
//! # Markers, counters and tracks
//!
//! ```
//! use itt_scope::{Domain, MarkerScope, counter, marker, track};
//!
//! static RENDER: Domain = Domain::new("app.render");
//!
//! fn present_frame(queue_depth: u32) {
//!     // Events on this thread go to the "gpu" track of the "renderer" group until the
//!     // binding is dropped.
//!     let _track = track!("renderer", "gpu");
//!
//!     marker!(RENDER, "frame_presented", MarkerScope::Thread);
//!     counter!(RENDER, "queue_depth", queue_depth);
//! }
//! # present_frame(3);
//! ```
//!
//! # Installing a collector
//!
//! Until a collector is installed, all instrumentation is a silent no-op. Install one once,
//! before the first instrumented call:
//!
//! ```
//! use itt_scope::{Error, LogCollector, set_boxed_collector};
//!
//! match set_boxed_collector(Box::new(LogCollector::new())) {
//!     // Without the `enable` feature there is nothing to install into.
//!     Ok(()) | Err(Error::Disabled) => {}
//!     Err(error) => panic!("collector was not installed: {error}"),
//! }
//! ```
//!
//! The first instrumented call fixes the process-wide collector. If nothing was installed by
//! then, the process stays on the [`DisabledCollector`] for its entire lifetime and later
//! installation attempts fail with [`Error::CollectorAlreadySet`].
//!
//! # Handle resolution
//!
//! Each call site resolves the names it uses into collector handles exactly once per process,
//! even when many threads reach the call site at the same time. Handles are never released;
//! they live in static storage until the process exits. See [`HandleSlot`] for the available
//! strategies.
//!
//! # Failure policy
//!
//! Instrumentation never alters the control flow of the instrumented program. Collector
//! failures (such as returning a null handle) degrade to missing trace data, never to a panic
//! or an error surfaced at the call site.
//!
//! # Cargo features
//!
//! * `enable` (default) - routes instrumentation to the installed collector. Without it,
//!   everything compiles and runs as a no-op.
//! * `spin_wait` - call-site slots use [`SpinSlot`] instead of [`OnceSlot`].
//! * `ittapi` - [`IttCollector`] calls into the Intel ITT static part, so that an attached
//!   profiler such as `VTune` receives the events. Without it, [`IttCollector`] discards
//!   everything.

mod argument;
mod collector;
mod constants;
mod counter_value;
mod disabled;
mod emit;
mod error;
mod handles;
mod interner;
mod interval;
#[cfg_attr(not(feature = "ittapi"), path = "itt_stub.rs")]
mod itt;
mod itt_collector;
mod log_collector;
mod macros;
mod names;
mod registry;
mod sealed;
mod slot;
mod track_binding;

pub use argument::*;
pub use collector::*;
pub(crate) use constants::*;
pub use counter_value::*;
pub use disabled::*;
pub use emit::*;
pub use error::*;
pub use handles::*;
pub(crate) use interner::*;
pub use interval::*;
pub use itt_collector::*;
pub use log_collector::*;
pub use names::*;
pub use registry::*;
pub(crate) use sealed::*;
pub use slot::*;
pub use track_binding::*;

/// Implementation details of the call-site macros. Not part of the public API.
#[doc(hidden)]
pub mod __private {
    /// Returns the path of the function that encloses the marker type `T`, which the
    /// `function_task!` macro declares inside the instrumented function.
    #[must_use]
    pub fn function_name<T>() -> &'static str {
        let marker_path = ::std::any::type_name::<T>();

        marker_path
            .rsplit_once("::")
            .map_or(marker_path, |(function_path, _)| function_path)
    }
}
