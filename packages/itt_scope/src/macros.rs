//! Call-site macros.
//!
//! Every macro declares its own static [`Label`][crate::Label] (and [`Track`][crate::Track])
//! inside the expansion, so each call site resolves its names once per process and reuses
//! the handles on every later pass.

/// Returns a `&'static Label` owned by the call site.
///
/// The label is resolved into a collector handle the first time it is used and reused
/// afterwards.
///
/// # Example
///
/// ```
/// use itt_scope::{Domain, ScopedTask, label};
///
/// static STORAGE: Domain = Domain::new("app.storage");
///
/// let _task = ScopedTask::begin(&STORAGE, label!("compact"));
/// ```
#[macro_export]
macro_rules! label {
    ($name:expr $(,)?) => {{
        static LABEL: $crate::Label = $crate::Label::new($name);
        &LABEL
    }};
}

/// Opens a task in a domain, returning a guard that closes it when dropped.
///
/// # Example
///
/// ```
/// use itt_scope::{Domain, task};
///
/// static NETWORK: Domain = Domain::new("app.network");
///
/// fn connect() {
///     let _task = task!(NETWORK, "connect");
///     // The task is closed at the end of the function.
/// }
/// # connect();
/// ```
#[macro_export]
macro_rules! task {
    ($domain:expr, $name:expr $(,)?) => {
        $crate::ScopedTask::begin(&$domain, $crate::label!($name))
    };
}

/// Opens a region in a domain, returning a guard that closes it when dropped.
///
/// # Example
///
/// ```
/// use itt_scope::{Domain, region};
///
/// static NETWORK: Domain = Domain::new("app.network");
///
/// let _region = region!(NETWORK, "handshake");
/// ```
#[macro_export]
macro_rules! region {
    ($domain:expr, $name:expr $(,)?) => {
        $crate::ScopedRegion::begin(&$domain, $crate::label!($name))
    };
}

/// Opens a task named after the enclosing function.
///
/// The source file and line of the call site are attached to the task as the
/// `__file__` and `__line__` arguments.
///
/// # Example
///
/// ```
/// use itt_scope::{Domain, function_task};
///
/// static JOBS: Domain = Domain::new("app.jobs");
///
/// fn rebuild_index() {
///     // Named after the path of `rebuild_index`.
///     let _task = function_task!(JOBS);
/// }
/// # rebuild_index();
/// ```
#[macro_export]
macro_rules! function_task {
    ($domain:expr $(,)?) => {{
        struct __FunctionMarker;

        static NAME: $crate::Label =
            $crate::Label::computed($crate::__private::function_name::<__FunctionMarker>);

        let task = $crate::ScopedTask::begin(&$domain, &NAME);
        task.arg($crate::label!("__file__"), ::core::file!());
        task.arg($crate::label!("__line__"), ::core::line!());
        task
    }};
}

/// Attaches a named argument to an open task or region.
///
/// See [`Argument`][crate::Argument] for the accepted value types.
///
/// # Example
///
/// ```
/// use itt_scope::{Domain, arg, task};
///
/// static NETWORK: Domain = Domain::new("app.network");
///
/// let receive = task!(NETWORK, "receive");
/// arg!(receive, "bytes", 1500_u32);
/// arg!(receive, "peer", "10.0.0.1");
/// ```
#[macro_export]
macro_rules! arg {
    ($interval:expr, $name:expr, $value:expr $(,)?) => {
        $interval.arg($crate::label!($name), $value)
    };
}

/// Records an instantaneous event in a domain.
///
/// # Example
///
/// ```
/// use itt_scope::{Domain, MarkerScope, marker};
///
/// static RENDER: Domain = Domain::new("app.render");
///
/// marker!(RENDER, "vsync", MarkerScope::Global);
/// ```
#[macro_export]
macro_rules! marker {
    ($domain:expr, $name:expr, $scope:expr $(,)?) => {
        $crate::marker(&$domain, $crate::label!($name), $scope)
    };
}

/// Records a sample of a named counter in a domain.
///
/// # Example
///
/// ```
/// use itt_scope::{Domain, counter};
///
/// static RENDER: Domain = Domain::new("app.render");
///
/// counter!(RENDER, "frame_time_ms", 16.6);
/// ```
#[macro_export]
macro_rules! counter {
    ($domain:expr, $name:expr, $value:expr $(,)?) => {
        $crate::counter(&$domain, $crate::label!($name), $value)
    };
}

/// Binds the current thread to a named track, returning a guard that resets the thread
/// to the default track when dropped.
///
/// With one argument the track belongs to the current process. With two, the first
/// argument names the track group.
///
/// # Example
///
/// ```
/// use itt_scope::track;
///
/// {
///     let _track = track!("uploader");
/// }
///
/// {
///     let _track = track!("media", "decoder");
/// }
/// ```
#[macro_export]
macro_rules! track {
    ($name:expr $(,)?) => {{
        static TRACK: $crate::Track = $crate::Track::new($name);
        $crate::ScopedTrackBinding::bind(&TRACK)
    }};
    ($group:expr, $name:expr $(,)?) => {{
        static TRACK: $crate::Track = $crate::Track::in_group($group, $name);
        $crate::ScopedTrackBinding::bind(&TRACK)
    }};
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::ptr;

    use crate::{Label, __private};

    fn call_site() -> &'static Label {
        label!("call_site")
    }

    #[test]
    fn label_is_static_per_call_site() {
        assert!(ptr::eq(call_site(), call_site()));

        let first = label!("same_text");
        let second = label!("same_text");

        assert!(!ptr::eq(first, second));
        assert_eq!(first.text(), second.text());
    }

    #[test]
    fn function_name_strips_marker_type() {
        struct Marker;

        let name = __private::function_name::<Marker>();

        assert!(
            name.ends_with("macros::tests::function_name_strips_marker_type"),
            "unexpected function name: {name}"
        );
    }
}
