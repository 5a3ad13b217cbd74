use std::ffi::CString;

use crate::{
    Collector, DIAGNOSTICS_LOG_TARGET, DomainHandle, IntervalId, MarkerScope, StringHandle,
    TrackGroupHandle, TrackHandle, itt,
};

/// A collector that forwards every primitive to the Intel ITT API.
///
/// Handles are the addresses of the objects that the ITT static part creates, so a profiler
/// attached to the process (such as `VTune`) sees the same domains, tasks, regions, metadata,
/// markers and tracks that the instrumented code declares. When no profiler is attached, the
/// static part returns null objects and this collector behaves like
/// [`DisabledCollector`][crate::DisabledCollector].
///
/// The native backend is only compiled with the `ittapi` feature of this crate. Without it,
/// every creation method returns the null handle.
///
/// Names that contain a NUL byte cannot be passed to ITT and resolve to the null handle.
/// Events whose domain is the null handle are discarded.
///
/// # Example
///
/// ```
/// use itt_scope::{Error, IttCollector, set_collector};
///
/// static COLLECTOR: IttCollector = IttCollector::new();
///
/// match set_collector(&COLLECTOR) {
///     Ok(()) | Err(Error::Disabled) => {}
///     Err(error) => panic!("collector was not installed: {error}"),
/// }
/// ```
#[derive(Clone, Copy, Debug, Default)]
#[non_exhaustive]
pub struct IttCollector;

impl IttCollector {
    /// Creates a new instance of the collector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Whether this build calls into the ITT static part, as opposed to discarding everything.
    #[must_use]
    pub const fn is_native() -> bool {
        cfg!(feature = "ittapi")
    }
}

fn c_string(name: &str) -> Option<CString> {
    CString::new(name)
        .inspect_err(|_| {
            log::debug!(
                target: DIAGNOSTICS_LOG_TARGET,
                "{name:?} contains a NUL byte and cannot be passed to ITT"
            );
        })
        .ok()
}

impl Collector for IttCollector {
    fn create_domain(&self, name: &str) -> DomainHandle {
        c_string(name).map_or(DomainHandle::NULL, |name| itt::create_domain(&name))
    }

    fn create_string_handle(&self, name: &str) -> StringHandle {
        c_string(name).map_or(StringHandle::NULL, |name| {
            itt::create_string_handle(&name)
        })
    }

    fn create_track_group(&self, name: Option<StringHandle>) -> TrackGroupHandle {
        // A named group whose name failed to resolve would otherwise merge into the process.
        if name.is_some_and(StringHandle::is_null) {
            return TrackGroupHandle::NULL;
        }

        itt::create_track_group(name)
    }

    fn create_track(&self, group: TrackGroupHandle, name: StringHandle) -> TrackHandle {
        if group.is_null() || name.is_null() {
            return TrackHandle::NULL;
        }

        itt::create_track(group, name)
    }

    fn set_track(&self, track: Option<TrackHandle>) {
        // Binding the null track would return the thread to its own track, same as unbinding.
        itt::set_track(track.filter(|track| !track.is_null()));
    }

    fn task_begin(&self, domain: DomainHandle, id: IntervalId, name: StringHandle) {
        if !domain.is_null() {
            itt::task_begin(domain, id, name);
        }
    }

    fn task_end(&self, domain: DomainHandle) {
        if !domain.is_null() {
            itt::task_end(domain);
        }
    }

    fn region_begin(&self, domain: DomainHandle, id: IntervalId, name: StringHandle) {
        if !domain.is_null() {
            itt::region_begin(domain, id, name);
        }
    }

    fn region_end(&self, domain: DomainHandle, id: IntervalId) {
        if !domain.is_null() {
            itt::region_end(domain, id);
        }
    }

    fn metadata_add_double(
        &self,
        domain: DomainHandle,
        id: Option<IntervalId>,
        name: StringHandle,
        value: f64,
    ) {
        if !domain.is_null() && !name.is_null() {
            itt::metadata_add_double(domain, id, name, value);
        }
    }

    fn metadata_add_int64(
        &self,
        domain: DomainHandle,
        id: Option<IntervalId>,
        name: StringHandle,
        value: i64,
    ) {
        if !domain.is_null() && !name.is_null() {
            itt::metadata_add_int64(domain, id, name, value);
        }
    }

    fn metadata_add_str(
        &self,
        domain: DomainHandle,
        id: Option<IntervalId>,
        name: StringHandle,
        value: &str,
    ) {
        if domain.is_null() || name.is_null() {
            return;
        }

        if let Some(value) = c_string(value) {
            itt::metadata_add_str(domain, id, name, &value);
        }
    }

    fn marker(&self, domain: DomainHandle, name: StringHandle, scope: MarkerScope) {
        if !domain.is_null() {
            itt::marker(domain, name, scope);
        }
    }
}
