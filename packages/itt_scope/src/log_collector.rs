use std::fmt::Display;
use std::sync::{Mutex, PoisonError};
use std::thread::{self, ThreadId};

use foldhash::{HashMap, HashMapExt};
use log::Level;

use crate::{
    Collector, DEFAULT_LOG_TARGET, DomainHandle, Interner, IntervalId, MarkerScope, StringHandle,
    TrackGroupHandle, TrackHandle, UNBOUND_TRACK_LABEL, UNKNOWN_NAME_LABEL,
};

/// A collector that renders every event as a record of the `log` facade.
///
/// Names are interned in memory and handed out as non-null handles, so every call site
/// resolves successfully. Events are attributed to the track bound on the emitting thread,
/// or to the `default` track when no track is bound.
///
/// Records are only rendered if the configured target and level are enabled in the
/// installed logger.
///
/// # Example
///
/// ```
/// use itt_scope::{Error, LogCollector, set_collector};
///
/// static COLLECTOR: LogCollector = LogCollector::builder()
///     .target("profiling")
///     .level(log::Level::Debug)
///     .build();
///
/// match set_collector(&COLLECTOR) {
///     Ok(()) | Err(Error::Disabled) => {}
///     Err(error) => panic!("collector was not installed: {error}"),
/// }
/// ```
#[derive(Debug)]
pub struct LogCollector {
    target: &'static str,
    level: Level,

    // Created on first use so that the collector itself can be constructed in a const context.
    tables: Mutex<Option<NameTables>>,
}

impl LogCollector {
    /// Creates a collector that logs at `Trace` level to the `itt_scope` target.
    #[must_use]
    pub const fn new() -> Self {
        Self::builder().build()
    }

    /// Starts configuring a collector.
    pub const fn builder() -> LogCollectorBuilder {
        LogCollectorBuilder {
            target: DEFAULT_LOG_TARGET,
            level: Level::Trace,
        }
    }

    /// The log target that records are emitted to.
    #[must_use]
    pub const fn target(&self) -> &'static str {
        self.target
    }

    /// The level that records are emitted at.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    fn with_tables<R>(&self, f: impl FnOnce(&mut NameTables) -> R) -> R {
        // A panic while holding the lock can only leave an interner with an unused label,
        // which is harmless. Collectors must never panic, so we carry on.
        let mut tables = self.tables.lock().unwrap_or_else(PoisonError::into_inner);

        f(tables.get_or_insert_with(NameTables::new))
    }

    fn emit(&self, domain: DomainHandle, describe: impl FnOnce(&NameTables, &str) -> String) {
        if domain.is_null() || !log::log_enabled!(target: self.target, self.level) {
            return;
        }

        let thread = thread::current().id();

        let message = self.with_tables(|tables| {
            let track = tables.track_label(thread);
            let body = describe(tables, &track);

            format!("{}: {body}", tables.domain_label(domain))
        });

        log::log!(target: self.target, self.level, "{message}");
    }

    fn emit_metadata(
        &self,
        domain: DomainHandle,
        id: Option<IntervalId>,
        name: StringHandle,
        value: &dyn Display,
    ) {
        self.emit(domain, |tables, track| {
            let name = tables.string_label(name);

            match id {
                Some(id) => format!(
                    "'{}' argument '{name}' = {value} on {track}",
                    tables.string_label(StringHandle::from_raw(id.name_part()))
                ),
                None => format!("'{name}' = {value} on {track}"),
            }
        });
    }
}

impl Default for LogCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Configures a [`LogCollector`].
#[derive(Debug)]
#[must_use]
pub struct LogCollectorBuilder {
    target: &'static str,
    level: Level,
}

impl LogCollectorBuilder {
    /// Sets the log target that records are emitted to.
    pub const fn target(mut self, target: &'static str) -> Self {
        self.target = target;
        self
    }

    /// Sets the level that records are emitted at.
    pub const fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Creates the collector.
    #[must_use]
    pub const fn build(self) -> LogCollector {
        LogCollector {
            target: self.target,
            level: self.level,
            tables: Mutex::new(None),
        }
    }
}

impl Collector for LogCollector {
    fn create_domain(&self, name: &str) -> DomainHandle {
        DomainHandle::from_raw(
            self.with_tables(|tables| tables.domains.intern(name.to_owned(), || name.to_owned())),
        )
    }

    fn create_string_handle(&self, name: &str) -> StringHandle {
        StringHandle::from_raw(
            self.with_tables(|tables| tables.strings.intern(name.to_owned(), || name.to_owned())),
        )
    }

    fn create_track_group(&self, name: Option<StringHandle>) -> TrackGroupHandle {
        TrackGroupHandle::from_raw(self.with_tables(|tables| {
            let NameTables {
                strings, groups, ..
            } = tables;

            groups.intern(name, || {
                // The unnamed group is the current process and adds nothing to track labels.
                name.map_or_else(String::new, |name| {
                    strings.label(name.as_raw()).unwrap_or(UNKNOWN_NAME_LABEL).to_owned()
                })
            })
        }))
    }

    fn create_track(&self, group: TrackGroupHandle, name: StringHandle) -> TrackHandle {
        TrackHandle::from_raw(self.with_tables(|tables| {
            let NameTables {
                strings,
                groups,
                tracks,
                ..
            } = tables;

            tracks.intern((group, name), || {
                let name = strings.label(name.as_raw()).unwrap_or(UNKNOWN_NAME_LABEL);

                match groups.label(group.as_raw()) {
                    Some("") => name.to_owned(),
                    Some(group) => format!("{group}/{name}"),
                    None => format!("{UNKNOWN_NAME_LABEL}/{name}"),
                }
            })
        }))
    }

    fn set_track(&self, track: Option<TrackHandle>) {
        let thread = thread::current().id();

        self.with_tables(|tables| match track {
            Some(track) => {
                tables.bound_tracks.insert(thread, track);
            }
            None => {
                tables.bound_tracks.remove(&thread);
            }
        });
    }

    fn task_begin(&self, domain: DomainHandle, _id: IntervalId, name: StringHandle) {
        self.emit(domain, |tables, track| {
            format!("task '{}' begins on {track}", tables.string_label(name))
        });
    }

    fn task_end(&self, domain: DomainHandle) {
        self.emit(domain, |_, track| format!("task ends on {track}"));
    }

    fn region_begin(&self, domain: DomainHandle, id: IntervalId, name: StringHandle) {
        self.emit(domain, |tables, track| {
            format!(
                "region '{}' begins on {track} (id {}:{})",
                tables.string_label(name),
                id.domain_part(),
                id.name_part()
            )
        });
    }

    fn region_end(&self, domain: DomainHandle, id: IntervalId) {
        self.emit(domain, |tables, track| {
            format!(
                "region '{}' ends on {track} (id {}:{})",
                tables.string_label(StringHandle::from_raw(id.name_part())),
                id.domain_part(),
                id.name_part()
            )
        });
    }

    fn metadata_add_double(
        &self,
        domain: DomainHandle,
        id: Option<IntervalId>,
        name: StringHandle,
        value: f64,
    ) {
        self.emit_metadata(domain, id, name, &value);
    }

    fn metadata_add_int64(
        &self,
        domain: DomainHandle,
        id: Option<IntervalId>,
        name: StringHandle,
        value: i64,
    ) {
        self.emit_metadata(domain, id, name, &value);
    }

    fn metadata_add_str(
        &self,
        domain: DomainHandle,
        id: Option<IntervalId>,
        name: StringHandle,
        value: &str,
    ) {
        self.emit_metadata(domain, id, name, &format_args!("'{value}'"));
    }

    fn marker(&self, domain: DomainHandle, name: StringHandle, scope: MarkerScope) {
        self.emit(domain, |tables, track| {
            format!(
                "{} marker '{}' on {track}",
                scope.as_str(),
                tables.string_label(name)
            )
        });
    }
}

/// Everything a [`LogCollector`] has handed out, plus the track bound on each thread.
#[derive(Debug)]
struct NameTables {
    domains: Interner<String>,
    strings: Interner<String>,
    groups: Interner<Option<StringHandle>>,
    tracks: Interner<(TrackGroupHandle, StringHandle)>,

    bound_tracks: HashMap<ThreadId, TrackHandle>,
}

impl NameTables {
    fn new() -> Self {
        Self {
            domains: Interner::new(),
            strings: Interner::new(),
            groups: Interner::new(),
            tracks: Interner::new(),
            bound_tracks: HashMap::new(),
        }
    }

    fn domain_label(&self, domain: DomainHandle) -> &str {
        self.domains
            .label(domain.as_raw())
            .unwrap_or(UNKNOWN_NAME_LABEL)
    }

    fn string_label(&self, name: StringHandle) -> &str {
        self.strings.label(name.as_raw()).unwrap_or(UNKNOWN_NAME_LABEL)
    }

    fn track_label(&self, thread: ThreadId) -> String {
        let label = self.bound_tracks.get(&thread).map_or(UNBOUND_TRACK_LABEL, |track| {
            self.tracks.label(track.as_raw()).unwrap_or(UNKNOWN_NAME_LABEL)
        });

        format!("track '{label}'")
    }
}
