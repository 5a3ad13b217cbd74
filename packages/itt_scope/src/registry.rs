#[cfg(feature = "enable")]
use std::sync::OnceLock;

use crate::{Collector, DISABLED_COLLECTOR, Error, Result};
#[cfg(feature = "enable")]
use crate::DIAGNOSTICS_LOG_TARGET;

// Written once, either by an explicit installation or by the first lookup.
#[cfg(feature = "enable")]
static GLOBAL_COLLECTOR: OnceLock<&'static dyn Collector> = OnceLock::new();

/// Installs the process-wide collector.
///
/// This can succeed at most once per process and only before the first instrumented call.
///
/// # Errors
///
/// Returns [`Error::CollectorAlreadySet`] if a collector was already installed or if an
/// instrumented call already fixed the process on the default (disabled) collector.
///
/// Returns [`Error::Disabled`] if the crate was built without the `enable` feature.
///
/// # Example
///
/// ```
/// use itt_scope::{Error, LogCollector, set_collector};
///
/// static COLLECTOR: LogCollector = LogCollector::new();
///
/// match set_collector(&COLLECTOR) {
///     Ok(()) | Err(Error::Disabled) => {}
///     Err(error) => panic!("collector was not installed: {error}"),
/// }
/// ```
#[cfg(feature = "enable")]
pub fn set_collector(collector: &'static dyn Collector) -> Result<()> {
    if GLOBAL_COLLECTOR.set(collector).is_err() {
        return Err(Error::CollectorAlreadySet);
    }

    log::info!(target: DIAGNOSTICS_LOG_TARGET, "installed collector {collector:?}");

    Ok(())
}

/// Installs the process-wide collector.
///
/// This can succeed at most once per process and only before the first instrumented call.
///
/// # Errors
///
/// Always returns [`Error::Disabled`] because the crate was built without the `enable` feature.
#[cfg(not(feature = "enable"))]
#[cfg_attr(test, mutants::skip)]
pub fn set_collector(collector: &'static dyn Collector) -> Result<()> {
    _ = collector;
    Err(Error::Disabled)
}

/// Installs the process-wide collector, taking ownership of it.
///
/// The collector lives until the process exits.
///
/// # Errors
///
/// Same as [`set_collector()`]. On failure the collector is dropped.
pub fn set_boxed_collector(collector: Box<dyn Collector>) -> Result<()> {
    #[cfg(feature = "enable")]
    {
        let mut installed = false;

        // Only the initializer that wins leaks its collector. A losing closure is dropped
        // without running, which drops the box it captured.
        let active = GLOBAL_COLLECTOR.get_or_init(|| {
            installed = true;
            Box::leak(collector)
        });

        if !installed {
            return Err(Error::CollectorAlreadySet);
        }

        log::info!(target: DIAGNOSTICS_LOG_TARGET, "installed collector {active:?}");

        Ok(())
    }

    #[cfg(not(feature = "enable"))]
    {
        drop(collector);
        Err(Error::Disabled)
    }
}

/// Returns the process-wide collector.
///
/// If no collector has been installed yet, this fixes the process on the
/// [`DisabledCollector`][crate::DisabledCollector] permanently.
#[must_use]
#[inline]
pub fn collector() -> &'static dyn Collector {
    #[cfg(feature = "enable")]
    {
        *GLOBAL_COLLECTOR.get_or_init(|| &DISABLED_COLLECTOR)
    }

    #[cfg(not(feature = "enable"))]
    {
        &DISABLED_COLLECTOR
    }
}

// Tests that install a collector live in `tests/` because the installation is process-wide.
#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::DisabledCollector;

    #[test]
    fn unit_tests_run_without_installed_collector() {
        // Nothing in the unit test binary installs a collector, so the first lookup
        // fixes the process on the disabled collector.
        let active = collector();

        assert!(active.create_string_handle("anything").is_null());
        assert!(matches!(
            set_boxed_collector(Box::new(DisabledCollector::new())),
            Err(Error::CollectorAlreadySet | Error::Disabled)
        ));
    }
}
