use crate::{
    Collector, CounterValue, Domain, DomainHandle, Label, MarkerScope, StringHandle, collector,
};

/// Records an instantaneous event named `name` in `domain`, using the process-wide collector.
///
/// Usually called via the [`marker!`][crate::marker] macro.
pub fn marker(domain: &Domain, name: &Label, scope: MarkerScope) {
    let collector = collector();

    marker_in(
        collector,
        domain.resolve_in(collector),
        name.resolve_in(collector),
        scope,
    );
}

/// Records an instantaneous event using the given collector and already resolved handles.
#[cfg_attr(test, mutants::skip)] // Trivial forwarder.
pub fn marker_in(
    collector: &dyn Collector,
    domain: DomainHandle,
    name: StringHandle,
    scope: MarkerScope,
) {
    collector.marker(domain, name, scope);
}

/// Records a sample of the counter named `name` in `domain`, using the process-wide collector.
///
/// The value is recorded as a double precision floating point number, see [`CounterValue`].
/// The collector timestamps the sample.
///
/// Usually called via the [`counter!`][crate::counter] macro.
pub fn counter(domain: &Domain, name: &Label, value: impl CounterValue) {
    let collector = collector();

    counter_in(
        collector,
        domain.resolve_in(collector),
        name.resolve_in(collector),
        value.into_counter_value(),
    );
}

/// Records a counter sample using the given collector and already resolved handles.
///
/// A counter sample is a double precision metadata entry that is not attached to any interval.
pub fn counter_in(collector: &dyn Collector, domain: DomainHandle, name: StringHandle, value: f64) {
    collector.metadata_add_double(domain, None, name, value);
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::MockCollector;

    const DOMAIN: DomainHandle = DomainHandle::from_raw(1);
    const NAME: StringHandle = StringHandle::from_raw(2);

    #[test]
    fn marker_passes_scope_through() {
        let mut collector = MockCollector::new();

        for scope in [
            MarkerScope::Global,
            MarkerScope::Process,
            MarkerScope::Thread,
            MarkerScope::Task,
        ] {
            collector
                .expect_marker()
                .with(eq(DOMAIN), eq(NAME), eq(scope))
                .once()
                .return_const(());
        }

        marker_in(&collector, DOMAIN, NAME, MarkerScope::Global);
        marker_in(&collector, DOMAIN, NAME, MarkerScope::Process);
        marker_in(&collector, DOMAIN, NAME, MarkerScope::Thread);
        marker_in(&collector, DOMAIN, NAME, MarkerScope::Task);
    }

    #[test]
    fn counter_is_domain_level_double() {
        let mut collector = MockCollector::new();
        collector
            .expect_metadata_add_double()
            .withf(|domain, id, name, value| {
                *domain == DOMAIN
                    && id.is_none()
                    && *name == NAME
                    && value.to_bits() == 17.0_f64.to_bits()
            })
            .once()
            .return_const(());

        counter_in(&collector, DOMAIN, NAME, 17.0);
    }

    #[test]
    fn counter_does_not_touch_intervals() {
        let mut collector = MockCollector::new();
        collector.expect_metadata_add_double().return_const(());
        collector.expect_metadata_add_int64().never();
        collector.expect_task_begin().never();
        collector.expect_region_begin().never();

        counter_in(&collector, DOMAIN, NAME, 1.0);
    }
}
