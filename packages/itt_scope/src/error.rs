use thiserror::Error;

/// Errors that can occur when configuring the instrumentation layer.
///
/// Instrumentation operations themselves never fail; only installing a collector can.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The process-wide collector is already fixed, either by an earlier installation or
    /// by an instrumented call that happened before any collector was installed.
    #[error(
        "the process-wide collector is already fixed by an earlier installation or by the first instrumented call"
    )]
    CollectorAlreadySet,

    /// The crate was built without the `enable` feature, so no collector can be installed.
    #[error("instrumentation is disabled because the `enable` feature is not active")]
    Disabled,
}

/// A specialized `Result` type for instrumentation setup, returning the crate's
/// [`Error`] type as the error value.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, Debug);

    #[test]
    fn errors_describe_themselves() {
        assert!(Error::CollectorAlreadySet.to_string().contains("already fixed"));
        assert!(Error::Disabled.to_string().contains("`enable`"));
    }
}
