use std::fmt::Debug;

use crate::{DomainHandle, IntervalId, StringHandle, TrackGroupHandle, TrackHandle};

/// The instrumentation API that receives the events produced by this crate.
///
/// A collector owns everything about the meaning of the events: how names are interned,
/// how intervals are rendered, how metadata is attributed and how tracks are correlated
/// across threads. This crate only decides when each primitive is called.
///
/// # Contract
///
/// * Creation methods may be called concurrently from any thread. A collector should return
///   the same handle when asked to create the same name twice, although this crate itself
///   only asks once per call site.
/// * Creation methods may return the null handle (e.g. when the collector is not active).
///   The null handle will be passed back into the other methods, which should ignore it.
/// * Every other method may be called concurrently from any thread once the handles it
///   receives have been created.
/// * None of the methods may panic. Instrumented code has no way to handle a failure.
///
/// Collectors are typically installed process-wide via [`set_collector()`][1] or
/// [`set_boxed_collector()`][2] but every operation in this crate also has a variant that
/// accepts an explicit collector.
///
/// [1]: crate::set_collector
/// [2]: crate::set_boxed_collector
#[cfg_attr(test, mockall::automock)]
pub trait Collector: Debug + Send + Sync + 'static {
    /// Creates (or looks up) the domain with the given name.
    fn create_domain(&self, name: &str) -> DomainHandle;

    /// Interns a string, returning a handle that identifies it.
    fn create_string_handle(&self, name: &str) -> StringHandle;

    /// Creates a track group (a virtual process).
    ///
    /// A group without a name stands for the current process.
    fn create_track_group(&self, name: Option<StringHandle>) -> TrackGroupHandle;

    /// Creates a track (a virtual thread) inside a track group.
    fn create_track(&self, group: TrackGroupHandle, name: StringHandle) -> TrackHandle;

    /// Sets the track that subsequent events on the current thread are attributed to.
    ///
    /// `None` restores the default attribution to the real thread.
    fn set_track(&self, track: Option<TrackHandle>);

    /// Opens a task on the current thread.
    fn task_begin(&self, domain: DomainHandle, id: IntervalId, name: StringHandle);

    /// Closes the innermost open task of the domain on the current thread.
    fn task_end(&self, domain: DomainHandle);

    /// Opens a region.
    fn region_begin(&self, domain: DomainHandle, id: IntervalId, name: StringHandle);

    /// Closes the region identified by `id`.
    fn region_end(&self, domain: DomainHandle, id: IntervalId);

    /// Attaches a floating point value to an interval or, without an interval,
    /// records it as a sample of the domain.
    fn metadata_add_double(
        &self,
        domain: DomainHandle,
        id: Option<IntervalId>,
        name: StringHandle,
        value: f64,
    );

    /// Attaches an integer value to an interval or, without an interval,
    /// records it as a sample of the domain.
    fn metadata_add_int64(
        &self,
        domain: DomainHandle,
        id: Option<IntervalId>,
        name: StringHandle,
        value: i64,
    );

    /// Attaches a string value to an interval or, without an interval,
    /// records it against the domain.
    fn metadata_add_str(
        &self,
        domain: DomainHandle,
        id: Option<IntervalId>,
        name: StringHandle,
        value: &str,
    );

    /// Records an instantaneous event.
    fn marker(&self, domain: DomainHandle, name: StringHandle, scope: MarkerScope);
}

/// How far the effect of a marker reaches.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[expect(
    clippy::exhaustive_enums,
    reason = "the set of scopes is fixed by the instrumentation model"
)]
pub enum MarkerScope {
    /// The marker applies to everything being profiled.
    Global,

    /// The marker applies to the current process (or the bound track group).
    Process,

    /// The marker applies to the current thread (or the bound track).
    Thread,

    /// The marker lasts until the next task-scoped marker on the same thread.
    Task,
}

impl MarkerScope {
    /// A short lowercase name for the scope, suitable for display.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Process => "process",
            Self::Thread => "thread",
            Self::Task => "task",
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use static_assertions::assert_obj_safe;

    use super::*;

    assert_obj_safe!(Collector);

    #[test]
    fn marker_scope_names() {
        assert_eq!(MarkerScope::Global.as_str(), "global");
        assert_eq!(MarkerScope::Process.as_str(), "process");
        assert_eq!(MarkerScope::Thread.as_str(), "thread");
        assert_eq!(MarkerScope::Task.as_str(), "task");
    }
}
