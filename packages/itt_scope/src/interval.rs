use std::marker::PhantomData;

use crate::{
    Argument, ArgValue, Collector, Domain, DomainHandle, IntervalId, Label, Sealed, StringHandle,
    collector,
};

/// Distinguishes the two kinds of [`ScopedInterval`].
///
/// This trait is sealed and can only be implemented in the `itt_scope` crate.
#[expect(private_bounds, reason = "intentionally sealed trait")]
pub trait IntervalKind: IntervalKindPrivate + Sealed {}

/// Privately accessible functionality expected from implementations of `IntervalKind`.
pub(crate) trait IntervalKindPrivate {
    fn begin(collector: &dyn Collector, domain: DomainHandle, id: IntervalId, name: StringHandle);

    fn end(collector: &dyn Collector, domain: DomainHandle, id: IntervalId);
}

/// A short-lived interval that nests strictly within the current interval of its thread.
///
/// The collector tracks the open task of each thread, so closing a task only names its domain.
#[derive(Debug)]
#[non_exhaustive]
pub struct Task;

impl Sealed for Task {}
impl IntervalKind for Task {}
impl IntervalKindPrivate for Task {
    fn begin(collector: &dyn Collector, domain: DomainHandle, id: IntervalId, name: StringHandle) {
        collector.task_begin(domain, id, name);
    }

    fn end(collector: &dyn Collector, domain: DomainHandle, _id: IntervalId) {
        collector.task_end(domain);
    }
}

/// An interval that may outlive simple call stack nesting.
///
/// Closing a region names both its domain and its identifier.
#[derive(Debug)]
#[non_exhaustive]
pub struct Region;

impl Sealed for Region {}
impl IntervalKind for Region {}
impl IntervalKindPrivate for Region {
    fn begin(collector: &dyn Collector, domain: DomainHandle, id: IntervalId, name: StringHandle) {
        collector.region_begin(domain, id, name);
    }

    fn end(collector: &dyn Collector, domain: DomainHandle, id: IntervalId) {
        collector.region_end(domain, id);
    }
}

/// A [`ScopedInterval`] that opens a task.
pub type ScopedTask<'c> = ScopedInterval<'c, Task>;

/// A [`ScopedInterval`] that opens a region.
pub type ScopedRegion<'c> = ScopedInterval<'c, Region>;

/// An open task or region, closed when dropped.
///
/// The interval is opened when the value is created and closed exactly once when it is
/// dropped, whichever way the enclosing scope is exited: falling through, returning early,
/// breaking out of a loop or unwinding from a panic.
///
/// Usually created via the [`task!`][crate::task] and [`region!`][crate::region] macros.
///
/// # Example
///
/// ```
/// use itt_scope::{Domain, Label, ScopedRegion};
///
/// static JOBS: Domain = Domain::new("app.jobs");
/// static COMPILE: Label = Label::new("compile");
/// static UNITS: Label = Label::new("units");
///
/// fn compile(units: u32) -> Result<(), String> {
///     let region = ScopedRegion::begin(&JOBS, &COMPILE);
///     region.arg(&UNITS, units);
///
///     if units == 0 {
///         // The region is closed here too.
///         return Err("nothing to compile".to_string());
///     }
///
///     Ok(())
/// }
/// # compile(3).unwrap();
/// ```
///
/// # Thread safety
///
/// This type is single-threaded. Intervals are opened and closed on the same thread.
#[derive(Debug)]
#[must_use = "the interval is closed when this value is dropped"]
pub struct ScopedInterval<'c, K>
where
    K: IntervalKind,
{
    collector: &'c dyn Collector,
    domain: DomainHandle,
    id: IntervalId,

    _kind: PhantomData<K>,
    _single_threaded: PhantomData<*const ()>,
}

impl<K> ScopedInterval<'static, K>
where
    K: IntervalKind,
{
    /// Opens an interval named `name` in `domain`, using the process-wide collector.
    pub fn begin(domain: &Domain, name: &Label) -> Self {
        let collector = collector();

        Self::begin_in(collector, domain.resolve_in(collector), name.resolve_in(collector))
    }
}

impl<'c, K> ScopedInterval<'c, K>
where
    K: IntervalKind,
{
    /// Opens an interval using the given collector and already resolved handles.
    pub fn begin_in(collector: &'c dyn Collector, domain: DomainHandle, name: StringHandle) -> Self {
        let id = IntervalId::new(domain, name);

        K::begin(collector, domain, id, name);

        Self {
            collector,
            domain,
            id,
            _kind: PhantomData,
            _single_threaded: PhantomData,
        }
    }

    /// The domain the interval belongs to.
    #[must_use]
    pub fn domain(&self) -> DomainHandle {
        self.domain
    }

    /// The identifier of the interval.
    #[must_use]
    pub fn id(&self) -> IntervalId {
        self.id
    }

    /// Attaches a named value to the interval.
    ///
    /// Any number of arguments may be attached while the interval is open.
    /// See [`Argument`] for how values are coerced.
    pub fn add_arg<'a>(&self, name: StringHandle, value: impl Argument<'a>) {
        match value.into_arg_value() {
            ArgValue::Double(value) => {
                self.collector
                    .metadata_add_double(self.domain, Some(self.id), name, value);
            }
            ArgValue::Int64(value) => {
                self.collector
                    .metadata_add_int64(self.domain, Some(self.id), name, value);
            }
            ArgValue::Str(value) => {
                self.collector
                    .metadata_add_str(self.domain, Some(self.id), name, value);
            }
        }
    }

    /// Attaches a value to the interval, naming it with a label resolved by the
    /// collector of this interval.
    pub fn arg<'a>(&self, name: &Label, value: impl Argument<'a>) {
        self.add_arg(name.resolve_in(self.collector), value);
    }
}

impl<K> Drop for ScopedInterval<'_, K>
where
    K: IntervalKind,
{
    fn drop(&mut self) {
        K::end(self.collector, self.domain, self.id);
    }
}
