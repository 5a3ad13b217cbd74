/// Log target used by [`LogCollector`][crate::LogCollector] unless configured otherwise.
pub(crate) const DEFAULT_LOG_TARGET: &str = "itt_scope";

/// Log target for diagnostics about the instrumentation layer itself.
pub(crate) const DIAGNOSTICS_LOG_TARGET: &str = "itt_scope::diagnostics";

/// How events are attributed when the thread has no bound track.
pub(crate) const UNBOUND_TRACK_LABEL: &str = "default";

/// Placeholder for names the collector has never handed out.
pub(crate) const UNKNOWN_NAME_LABEL: &str = "<unknown>";
