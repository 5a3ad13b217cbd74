use crate::{
    Collector, DomainHandle, IntervalId, MarkerScope, StringHandle, TrackGroupHandle, TrackHandle,
};

/// A collector that discards everything.
///
/// Every creation method returns the null handle and every other method does nothing. This is
/// the collector in effect until another one is installed, as well as the only collector when
/// the `enable` feature of this crate is disabled.
#[derive(Clone, Copy, Debug, Default)]
#[non_exhaustive]
pub struct DisabledCollector;

impl DisabledCollector {
    /// Creates a new instance of the collector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// The shared instance returned by [`collector()`][crate::collector] when nothing else is active.
pub(crate) static DISABLED_COLLECTOR: DisabledCollector = DisabledCollector::new();

#[cfg_attr(test, mutants::skip)] // Everything here is a no-op, there is nothing to mutate.
impl Collector for DisabledCollector {
    fn create_domain(&self, _name: &str) -> DomainHandle {
        DomainHandle::NULL
    }

    fn create_string_handle(&self, _name: &str) -> StringHandle {
        StringHandle::NULL
    }

    fn create_track_group(&self, _name: Option<StringHandle>) -> TrackGroupHandle {
        TrackGroupHandle::NULL
    }

    fn create_track(&self, _group: TrackGroupHandle, _name: StringHandle) -> TrackHandle {
        TrackHandle::NULL
    }

    fn set_track(&self, _track: Option<TrackHandle>) {}

    fn task_begin(&self, _domain: DomainHandle, _id: IntervalId, _name: StringHandle) {}

    fn task_end(&self, _domain: DomainHandle) {}

    fn region_begin(&self, _domain: DomainHandle, _id: IntervalId, _name: StringHandle) {}

    fn region_end(&self, _domain: DomainHandle, _id: IntervalId) {}

    fn metadata_add_double(
        &self,
        _domain: DomainHandle,
        _id: Option<IntervalId>,
        _name: StringHandle,
        _value: f64,
    ) {
    }

    fn metadata_add_int64(
        &self,
        _domain: DomainHandle,
        _id: Option<IntervalId>,
        _name: StringHandle,
        _value: i64,
    ) {
    }

    fn metadata_add_str(
        &self,
        _domain: DomainHandle,
        _id: Option<IntervalId>,
        _name: StringHandle,
        _value: &str,
    ) {
    }

    fn marker(&self, _domain: DomainHandle, _name: StringHandle, _scope: MarkerScope) {}
}
