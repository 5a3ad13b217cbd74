/// Prevents traits from being implemented outside this crate.
pub(crate) trait Sealed {}
