use std::fmt;

use crate::{
    Collector, DIAGNOSTICS_LOG_TARGET, DomainHandle, HandleSlot, StringHandle, TrackHandle,
    collector,
};

/// A named domain, resolved into a collector handle on first use.
///
/// Declare domains as static variables, typically one per module:
///
/// ```
/// use itt_scope::{Domain, task};
///
/// static STORAGE: Domain = Domain::new("app.storage");
///
/// fn flush() {
///     let _task = task!(STORAGE, "flush");
/// }
/// # flush();
/// ```
///
/// The handle is created by the first collector that resolves it and is then reused for
/// the lifetime of the process.
pub struct Domain {
    name: &'static str,
    slot: HandleSlot<DomainHandle>,
}

impl Domain {
    /// Declares a domain with the given name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            slot: HandleSlot::new(),
        }
    }

    /// The name of the domain.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Resolves the domain using the process-wide collector.
    #[must_use]
    pub fn handle(&self) -> DomainHandle {
        self.resolve_in(collector())
    }

    /// Resolves the domain using the given collector, unless it has already been resolved.
    #[must_use]
    pub fn resolve_in(&self, collector: &dyn Collector) -> DomainHandle {
        self.slot.get_or_create(|| {
            let handle = collector.create_domain(self.name);
            report_if_null(handle.is_null(), "domain", self.name);
            handle
        })
    }
}

impl fmt::Debug for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Domain")
            .field("name", &self.name)
            .field("slot", &self.slot)
            .finish()
    }
}

/// Where the text of a label comes from.
#[derive(Clone, Copy)]
enum LabelText {
    Fixed(&'static str),
    Computed(fn() -> &'static str),
}

/// A string resolved into a collector handle on first use.
///
/// Labels name intervals, interval arguments, markers and counters. The call-site macros
/// declare one static label per name they are given, so there is usually no need to
/// create them directly.
///
/// ```
/// use itt_scope::{Domain, Label, ScopedTask};
///
/// static QUERIES: Domain = Domain::new("app.queries");
/// static EXECUTE: Label = Label::new("execute");
///
/// let _task = ScopedTask::begin(&QUERIES, &EXECUTE);
/// ```
pub struct Label {
    text: LabelText,
    slot: HandleSlot<StringHandle>,
}

impl Label {
    /// Declares a label with fixed text.
    #[must_use]
    pub const fn new(text: &'static str) -> Self {
        Self {
            text: LabelText::Fixed(text),
            slot: HandleSlot::new(),
        }
    }

    /// Declares a label whose text is produced by a function when it is first needed.
    ///
    /// This is useful when the text is not available as a constant, such as the name of
    /// the enclosing function.
    #[must_use]
    pub const fn computed(text: fn() -> &'static str) -> Self {
        Self {
            text: LabelText::Computed(text),
            slot: HandleSlot::new(),
        }
    }

    /// The text of the label.
    #[must_use]
    pub fn text(&self) -> &'static str {
        match self.text {
            LabelText::Fixed(text) => text,
            LabelText::Computed(text) => text(),
        }
    }

    /// Resolves the label using the process-wide collector.
    #[must_use]
    pub fn handle(&self) -> StringHandle {
        self.resolve_in(collector())
    }

    /// Resolves the label using the given collector, unless it has already been resolved.
    #[must_use]
    pub fn resolve_in(&self, collector: &dyn Collector) -> StringHandle {
        self.slot.get_or_create(|| {
            let text = self.text();
            let handle = collector.create_string_handle(text);
            report_if_null(handle.is_null(), "string", text);
            handle
        })
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Label")
            .field("text", &self.text())
            .field("slot", &self.slot)
            .finish()
    }
}

/// A named track (virtual thread) inside a named track group (virtual process),
/// resolved into a collector handle on first use.
///
/// ```
/// use itt_scope::{ScopedTrackBinding, Track};
///
/// static DECODER: Track = Track::in_group("media", "decoder");
///
/// let _binding = ScopedTrackBinding::bind(&DECODER);
/// ```
pub struct Track {
    group: Option<&'static str>,
    name: &'static str,
    slot: HandleSlot<TrackHandle>,
}

impl Track {
    /// Declares a track that belongs to the current process.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            group: None,
            name,
            slot: HandleSlot::new(),
        }
    }

    /// Declares a track that belongs to the named track group.
    ///
    /// An empty group name means the current process, same as [`Track::new()`].
    #[must_use]
    pub const fn in_group(group: &'static str, name: &'static str) -> Self {
        Self {
            group: if group.is_empty() { None } else { Some(group) },
            name,
            slot: HandleSlot::new(),
        }
    }

    /// The name of the track group, or `None` for the current process.
    #[must_use]
    pub const fn group(&self) -> Option<&'static str> {
        self.group
    }

    /// The name of the track.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Resolves the track using the process-wide collector.
    #[must_use]
    pub fn handle(&self) -> TrackHandle {
        self.resolve_in(collector())
    }

    /// Resolves the track using the given collector, unless it has already been resolved.
    ///
    /// Resolving a track creates its group, the string handles for both names and the
    /// track itself. Only the track handle is kept.
    #[must_use]
    pub fn resolve_in(&self, collector: &dyn Collector) -> TrackHandle {
        self.slot.get_or_create(|| {
            let group_name = self
                .group
                .map(|group| collector.create_string_handle(group));
            let group = collector.create_track_group(group_name);
            let name = collector.create_string_handle(self.name);

            let handle = collector.create_track(group, name);
            report_if_null(handle.is_null(), "track", self.name);
            handle
        })
    }
}

impl fmt::Debug for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Track")
            .field("group", &self.group)
            .field("name", &self.name)
            .field("slot", &self.slot)
            .finish()
    }
}

#[cfg_attr(test, mutants::skip)] // Diagnostics only.
fn report_if_null(is_null: bool, kind: &str, name: &str) {
    if is_null {
        log::debug!(
            target: DIAGNOSTICS_LOG_TARGET,
            "collector returned a null {kind} handle for '{name}'; events using it are dropped"
        );
    }
}
