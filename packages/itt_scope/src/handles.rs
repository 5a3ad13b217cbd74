use crate::Sealed;

/// A handle type that can be stored in a [`HandleSlot`][crate::HandleSlot].
///
/// Every handle is an opaque `u64` token chosen by the [`Collector`][crate::Collector]
/// that created it. The raw value `0` is reserved for the null handle.
///
/// This trait is sealed and can only be implemented in the `itt_scope` crate.
#[expect(private_bounds, reason = "intentionally sealed trait")]
pub trait RawHandle: Copy + Sealed {
    /// Reconstructs the handle from its raw token.
    fn from_raw(raw: u64) -> Self;

    /// Returns the raw token of the handle.
    fn into_raw(self) -> u64;
}

macro_rules! define_handle {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
        pub struct $name {
            raw: u64,
        }

        impl $name {
            /// The null handle. Operations that receive it are ignored by well-behaved collectors.
            pub const NULL: Self = Self { raw: 0 };

            /// Creates a handle from the raw token chosen by a collector.
            #[must_use]
            pub const fn from_raw(raw: u64) -> Self {
                Self { raw }
            }

            /// Returns the raw token of this handle.
            #[must_use]
            pub const fn as_raw(self) -> u64 {
                self.raw
            }

            /// Whether this is the null handle.
            #[must_use]
            pub const fn is_null(self) -> bool {
                self.raw == 0
            }
        }

        impl Sealed for $name {}

        impl RawHandle for $name {
            #[cfg_attr(test, mutants::skip)] // Trivial forwarder.
            fn from_raw(raw: u64) -> Self {
                Self::from_raw(raw)
            }

            #[cfg_attr(test, mutants::skip)] // Trivial forwarder.
            fn into_raw(self) -> u64 {
                self.as_raw()
            }
        }
    };
}

define_handle!(
    /// Identifies a domain: the namespace that groups intervals, markers and counters.
    DomainHandle
);

define_handle!(
    /// Identifies an interned string, used to name intervals, arguments, markers,
    /// counters, tracks and track groups.
    StringHandle
);

define_handle!(
    /// Identifies a track group, which acts as a virtual process for the tracks inside it.
    TrackGroupHandle
);

define_handle!(
    /// Identifies a track, which acts as a virtual thread that events can be attributed to.
    TrackHandle
);

/// Identifies one open interval to the collector.
///
/// The identifier is derived from the domain and the name of the interval, so the same name
/// within the same domain always produces the same identifier. This lets the collector
/// correlate repeated executions of the same labeled operation, while identifiers bound to
/// different domains never collide.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct IntervalId {
    domain: u64,
    name: u64,
}

impl IntervalId {
    /// Derives the identifier of an interval with the given name in the given domain.
    #[must_use]
    pub const fn new(domain: DomainHandle, name: StringHandle) -> Self {
        Self {
            domain: domain.as_raw(),
            name: name.as_raw(),
        }
    }

    /// The raw domain part of the identifier.
    #[must_use]
    pub const fn domain_part(self) -> u64 {
        self.domain
    }

    /// The raw name part of the identifier.
    #[must_use]
    pub const fn name_part(self) -> u64 {
        self.name
    }
}
