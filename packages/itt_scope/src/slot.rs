use std::fmt;
use std::marker::PhantomData;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};
use std::thread;

use scopeguard::ScopeGuard;

use crate::RawHandle;

/// The slot type used by every call site in this crate.
///
/// This is [`OnceSlot`] unless the `spin_wait` feature is enabled, in which case it is
/// [`SpinSlot`]. Both guarantee that the creation function runs at most once per slot that
/// completes initialization and that no caller ever observes a partially created handle.
#[cfg(not(feature = "spin_wait"))]
pub type HandleSlot<H> = OnceSlot<H>;

/// The slot type used by every call site in this crate.
///
/// This is [`OnceSlot`] unless the `spin_wait` feature is enabled, in which case it is
/// [`SpinSlot`]. Both guarantee that the creation function runs at most once per slot that
/// completes initialization and that no caller ever observes a partially created handle.
#[cfg(feature = "spin_wait")]
pub type HandleSlot<H> = SpinSlot<H>;

/// A write-once handle slot that relies on the standard library's lazy initialization.
///
/// Racing first callers block inside [`OnceLock`] until the winner's creation function
/// returns. After that, every access is a plain read.
///
/// # Example
///
/// ```
/// use itt_scope::{OnceSlot, StringHandle};
///
/// static GREETING: OnceSlot<StringHandle> = OnceSlot::new();
///
/// let first = GREETING.get_or_create(|| StringHandle::from_raw(42));
/// let second = GREETING.get_or_create(|| StringHandle::from_raw(99));
///
/// assert_eq!(first, second);
/// ```
pub struct OnceSlot<H> {
    handle: OnceLock<H>,
}

impl<H> OnceSlot<H>
where
    H: RawHandle,
{
    /// Creates an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            handle: OnceLock::new(),
        }
    }

    /// Returns the handle in the slot, calling `create` to produce it if the slot is empty.
    ///
    /// If several threads call this on an empty slot at the same time, exactly one of them
    /// calls `create` and all of them receive its result.
    #[inline]
    pub fn get_or_create<F>(&self, create: F) -> H
    where
        F: FnOnce() -> H,
    {
        *self.handle.get_or_init(create)
    }

    /// Returns the handle in the slot if it has been created.
    #[must_use]
    #[inline]
    pub fn get(&self) -> Option<H> {
        self.handle.get().copied()
    }
}

impl<H> Default for OnceSlot<H>
where
    H: RawHandle,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for OnceSlot<H>
where
    H: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnceSlot")
            .field("handle", &self.handle.get())
            .finish()
    }
}

const EMPTY: u8 = 0;
const CREATING: u8 = 1;
const READY: u8 = 2;

/// A write-once handle slot that gates creation with a compare-and-swap and makes racing
/// threads spin (yielding the processor) until the handle is published.
///
/// This avoids any lock: the only state is one atomic byte and one atomic word. Creation
/// is expected to be fast and happens at most once per slot, so the busy wait is short.
///
/// There is no timeout on the wait. If the creation function never returns, every other
/// thread that reaches the slot waits forever. If the creation function panics, the slot
/// returns to its empty state and the next caller tries again.
///
/// A null handle returned by the creation function is published like any other handle.
///
/// # Example
///
/// ```
/// use itt_scope::{SpinSlot, TrackHandle};
///
/// static GPU_TRACK: SpinSlot<TrackHandle> = SpinSlot::new();
///
/// let first = GPU_TRACK.get_or_create(|| TrackHandle::from_raw(7));
/// let second = GPU_TRACK.get_or_create(|| TrackHandle::from_raw(8));
///
/// assert_eq!(first, second);
/// ```
pub struct SpinSlot<H> {
    state: AtomicU8,
    raw: AtomicU64,

    _handle: PhantomData<fn() -> H>,
}

impl<H> SpinSlot<H>
where
    H: RawHandle,
{
    /// Creates an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(EMPTY),
            raw: AtomicU64::new(0),
            _handle: PhantomData,
        }
    }

    /// Returns the handle in the slot, calling `create` to produce it if the slot is empty.
    ///
    /// If several threads call this on an empty slot at the same time, exactly one of them
    /// calls `create` and the others yield until its result is published.
    #[inline]
    pub fn get_or_create<F>(&self, create: F) -> H
    where
        F: FnOnce() -> H,
    {
        match self.get() {
            Some(handle) => handle,
            None => self.create_or_wait(create),
        }
    }

    /// Returns the handle in the slot if it has been created.
    #[must_use]
    #[inline]
    pub fn get(&self) -> Option<H> {
        // Acquire pairs with the Release store of READY, making the raw value visible.
        (self.state.load(Ordering::Acquire) == READY)
            .then(|| H::from_raw(self.raw.load(Ordering::Relaxed)))
    }

    #[cold]
    fn create_or_wait<F>(&self, create: F) -> H
    where
        F: FnOnce() -> H,
    {
        let mut create = Some(create);

        loop {
            match self
                .state
                .compare_exchange(EMPTY, CREATING, Ordering::Acquire, Ordering::Acquire)
            {
                Ok(_) => {
                    let create = create
                        .take()
                        .expect("only the thread that wins the race creates, and it creates once");

                    return self.create(create);
                }
                Err(READY) => {
                    return H::from_raw(self.raw.load(Ordering::Relaxed));
                }
                Err(_) => {
                    while self.state.load(Ordering::Acquire) == CREATING {
                        thread::yield_now();
                    }

                    // Either READY (next iteration returns it) or EMPTY because the
                    // winner panicked (next iteration competes again).
                }
            }
        }
    }

    fn create<F>(&self, create: F) -> H
    where
        F: FnOnce() -> H,
    {
        // If `create` unwinds, the slot goes back to EMPTY so waiters do not spin forever.
        let rollback = scopeguard::guard(&self.state, |state| {
            state.store(EMPTY, Ordering::Release);
        });

        let handle = create();

        self.raw.store(handle.into_raw(), Ordering::Relaxed);

        let state = ScopeGuard::into_inner(rollback);
        state.store(READY, Ordering::Release);

        handle
    }
}

impl<H> Default for SpinSlot<H>
where
    H: RawHandle,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for SpinSlot<H>
where
    H: RawHandle + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpinSlot").field("handle", &self.get()).finish()
    }
}
