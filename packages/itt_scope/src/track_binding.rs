use std::cell::Cell;
use std::marker::PhantomData;
use std::thread;

use crate::{Collector, DIAGNOSTICS_LOG_TARGET, Track, TrackHandle, collector};

thread_local! {
    static BINDING_ACTIVE: Cell<bool> = const { Cell::new(false) };
}

/// Attributes events of the current thread to a named track until dropped.
///
/// Dropping the binding unconditionally resets the thread to the default track. Bindings are
/// not a stack: if a second binding is created on a thread that already has one, dropping the
/// inner binding resets the thread to the default track rather than to the outer binding.
/// Such nested use is reported as a warning via the `log` facade.
///
/// Usually created via the [`track!`][crate::track] macro.
///
/// # Example
///
/// ```
/// use itt_scope::{Domain, MarkerScope, ScopedTrackBinding, Track, marker};
///
/// static IO: Domain = Domain::new("app.io");
/// static DISK: Track = Track::in_group("storage", "disk");
///
/// {
///     let _binding = ScopedTrackBinding::bind(&DISK);
///     marker!(IO, "flushed", MarkerScope::Thread); // Attributed to the "disk" track.
/// }
///
/// marker!(IO, "idle", MarkerScope::Thread); // Attributed to the default track.
/// ```
///
/// # Thread safety
///
/// This type is single-threaded. The binding applies to the thread that created it.
#[derive(Debug)]
#[must_use = "the track binding ends when this value is dropped"]
pub struct ScopedTrackBinding<'c> {
    collector: &'c dyn Collector,
    track: TrackHandle,

    _single_threaded: PhantomData<*const ()>,
}

impl ScopedTrackBinding<'static> {
    /// Binds the current thread to `track`, using the process-wide collector.
    pub fn bind(track: &Track) -> Self {
        let collector = collector();

        Self::bind_in(collector, track.resolve_in(collector))
    }
}

impl<'c> ScopedTrackBinding<'c> {
    /// Binds the current thread to an already resolved track, using the given collector.
    pub fn bind_in(collector: &'c dyn Collector, track: TrackHandle) -> Self {
        if BINDING_ACTIVE.replace(true) {
            log::warn!(
                target: DIAGNOSTICS_LOG_TARGET,
                "nested track binding on thread {:?}; the outer binding will not be restored",
                thread::current().id()
            );
        }

        collector.set_track(Some(track));

        Self {
            collector,
            track,
            _single_threaded: PhantomData,
        }
    }

    /// The track the thread is bound to.
    #[must_use]
    pub fn track(&self) -> TrackHandle {
        self.track
    }
}

impl Drop for ScopedTrackBinding<'_> {
    fn drop(&mut self) {
        self.collector.set_track(None);
        BINDING_ACTIVE.set(false);
    }
}
