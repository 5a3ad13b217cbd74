//! Stands in for `itt.rs` when the `ittapi` feature is disabled.
//!
//! Creation returns the null handle and every event is discarded.

use std::ffi::CStr;

use crate::{DomainHandle, IntervalId, MarkerScope, StringHandle, TrackGroupHandle, TrackHandle};

#[cfg_attr(test, mutants::skip)] // Nothing to mutate.
pub(crate) fn create_domain(name: &CStr) -> DomainHandle {
    _ = name;
    DomainHandle::NULL
}

#[cfg_attr(test, mutants::skip)] // Nothing to mutate.
pub(crate) fn create_string_handle(name: &CStr) -> StringHandle {
    _ = name;
    StringHandle::NULL
}

#[cfg_attr(test, mutants::skip)] // Nothing to mutate.
pub(crate) fn create_track_group(name: Option<StringHandle>) -> TrackGroupHandle {
    _ = name;
    TrackGroupHandle::NULL
}

#[cfg_attr(test, mutants::skip)] // Nothing to mutate.
pub(crate) fn create_track(group: TrackGroupHandle, name: StringHandle) -> TrackHandle {
    _ = (group, name);
    TrackHandle::NULL
}

pub(crate) fn set_track(track: Option<TrackHandle>) {
    _ = track;
}

pub(crate) fn task_begin(domain: DomainHandle, id: IntervalId, name: StringHandle) {
    _ = (domain, id, name);
}

pub(crate) fn task_end(domain: DomainHandle) {
    _ = domain;
}

pub(crate) fn region_begin(domain: DomainHandle, id: IntervalId, name: StringHandle) {
    _ = (domain, id, name);
}

pub(crate) fn region_end(domain: DomainHandle, id: IntervalId) {
    _ = (domain, id);
}

pub(crate) fn metadata_add_double(
    domain: DomainHandle,
    id: Option<IntervalId>,
    name: StringHandle,
    value: f64,
) {
    _ = (domain, id, name, value);
}

pub(crate) fn metadata_add_int64(
    domain: DomainHandle,
    id: Option<IntervalId>,
    name: StringHandle,
    value: i64,
) {
    _ = (domain, id, name, value);
}

pub(crate) fn metadata_add_str(
    domain: DomainHandle,
    id: Option<IntervalId>,
    name: StringHandle,
    value: &CStr,
) {
    _ = (domain, id, name, value);
}

pub(crate) fn marker(domain: DomainHandle, name: StringHandle, marker_scope: MarkerScope) {
    _ = (domain, name, marker_scope);
}
