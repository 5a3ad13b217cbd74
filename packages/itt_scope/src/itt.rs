//! Calls into the Intel ITT static part, translating between crate handles and ITT pointers.
//!
//! Only compiled with the `ittapi` feature. `itt_stub.rs` provides the same functions as
//! no-ops otherwise, so that callers do not need their own `#[cfg]` flags.
//!
//! Each ITT entry point is a function pointer that the static part fills in when it first
//! initializes. A missing entry point turns the call into a no-op.

use std::ffi::{CStr, c_void};
use std::ptr;

#[cfg(windows)]
use ittapi_sys::{
    __itt_domain_createA_ptr__3_0 as DOMAIN_CREATE,
    __itt_metadata_str_addA_ptr__3_0 as METADATA_STR_ADD,
    __itt_string_handle_createA_ptr__3_0 as STRING_HANDLE_CREATE,
};
#[cfg(not(windows))]
use ittapi_sys::{
    __itt_domain_create_ptr__3_0 as DOMAIN_CREATE,
    __itt_metadata_str_add_ptr__3_0 as METADATA_STR_ADD,
    __itt_string_handle_create_ptr__3_0 as STRING_HANDLE_CREATE,
};
use ittapi_sys::{
    __itt_domain, __itt_id, __itt_marker_ptr__3_0 as MARKER,
    __itt_metadata_add_ptr__3_0 as METADATA_ADD, __itt_metadata_type,
    __itt_region_begin_ptr__3_0 as REGION_BEGIN, __itt_region_end_ptr__3_0 as REGION_END,
    __itt_scope, __itt_set_track_ptr__3_0 as SET_TRACK,
    __itt_task_begin_ptr__3_0 as TASK_BEGIN, __itt_task_end_ptr__3_0 as TASK_END,
    __itt_track_create_ptr__3_0 as TRACK_CREATE,
    __itt_track_group_create_ptr__3_0 as TRACK_GROUP_CREATE, __itt_track_group_type,
    __itt_track_type,
};

use crate::{DomainHandle, IntervalId, MarkerScope, StringHandle, TrackGroupHandle, TrackHandle};

// Values of the corresponding enumerations in `ittnotify.h`.
const METADATA_S64: __itt_metadata_type = 2;
const METADATA_DOUBLE: __itt_metadata_type = 8;
const TRACK_GROUP_TYPE_NORMAL: __itt_track_group_type = 0;
const TRACK_TYPE_NORMAL: __itt_track_type = 0;
const SCOPE_GLOBAL: __itt_scope = 1;
const SCOPE_TRACK_GROUP: __itt_scope = 2;
const SCOPE_TRACK: __itt_scope = 3;
const SCOPE_TASK: __itt_scope = 4;

const NULL_ID: __itt_id = __itt_id {
    d1: 0,
    d2: 0,
    d3: 0,
};

// ITT objects are allocated by the static part and never freed, so their addresses are
// valid handles for the rest of the process.
fn to_raw<T>(pointer: *mut T) -> u64 {
    u64::try_from(pointer.expose_provenance()).unwrap_or_default()
}

fn from_raw<T>(raw: u64) -> *mut T {
    usize::try_from(raw).map_or(ptr::null_mut(), ptr::with_exposed_provenance_mut)
}

fn domain_ptr(domain: DomainHandle) -> *const __itt_domain {
    from_raw::<__itt_domain>(domain.as_raw()).cast_const()
}

// Same layout as `__itt_id_make(domain, name)` except that both parts are handles.
fn interval_id(id: IntervalId) -> __itt_id {
    __itt_id {
        d1: id.domain_part(),
        d2: id.name_part(),
        d3: 0,
    }
}

fn metadata_id(id: Option<IntervalId>) -> __itt_id {
    id.map_or(NULL_ID, interval_id)
}

const fn scope(scope: MarkerScope) -> __itt_scope {
    match scope {
        MarkerScope::Global => SCOPE_GLOBAL,
        MarkerScope::Process => SCOPE_TRACK_GROUP,
        MarkerScope::Thread => SCOPE_TRACK,
        MarkerScope::Task => SCOPE_TASK,
    }
}

pub(crate) fn create_domain(name: &CStr) -> DomainHandle {
    // SAFETY: Reading the entry point has no side effects. Only the static part writes it.
    let Some(create) = (unsafe { DOMAIN_CREATE }) else {
        return DomainHandle::NULL;
    };

    // SAFETY: `name` is NUL-terminated and outlives the call.
    let domain = unsafe { create(name.as_ptr()) };

    DomainHandle::from_raw(to_raw(domain))
}

pub(crate) fn create_string_handle(name: &CStr) -> StringHandle {
    // SAFETY: Reading the entry point has no side effects. Only the static part writes it.
    let Some(create) = (unsafe { STRING_HANDLE_CREATE }) else {
        return StringHandle::NULL;
    };

    // SAFETY: `name` is NUL-terminated and outlives the call.
    let handle = unsafe { create(name.as_ptr()) };

    StringHandle::from_raw(to_raw(handle))
}

pub(crate) fn create_track_group(name: Option<StringHandle>) -> TrackGroupHandle {
    // SAFETY: Reading the entry point has no side effects. Only the static part writes it.
    let Some(create) = (unsafe { TRACK_GROUP_CREATE }) else {
        return TrackGroupHandle::NULL;
    };

    // A null name stands for the current process.
    let name = from_raw(name.map_or(0, StringHandle::as_raw));

    // SAFETY: `name` is null or a string handle created by the static part.
    let group = unsafe { create(name, TRACK_GROUP_TYPE_NORMAL) };

    TrackGroupHandle::from_raw(to_raw(group))
}

pub(crate) fn create_track(group: TrackGroupHandle, name: StringHandle) -> TrackHandle {
    // SAFETY: Reading the entry point has no side effects. Only the static part writes it.
    let Some(create) = (unsafe { TRACK_CREATE }) else {
        return TrackHandle::NULL;
    };

    // SAFETY: Both pointers are null or objects created by the static part.
    let track = unsafe {
        create(
            from_raw(group.as_raw()),
            from_raw(name.as_raw()),
            TRACK_TYPE_NORMAL,
        )
    };

    TrackHandle::from_raw(to_raw(track))
}

pub(crate) fn set_track(track: Option<TrackHandle>) {
    // SAFETY: Reading the entry point has no side effects. Only the static part writes it.
    let Some(set) = (unsafe { SET_TRACK }) else {
        return;
    };

    // SAFETY: The track is null (meaning the thread's own track) or created by the static part.
    unsafe { set(from_raw(track.map_or(0, TrackHandle::as_raw))) }
}

pub(crate) fn task_begin(domain: DomainHandle, id: IntervalId, name: StringHandle) {
    // SAFETY: Reading the entry point has no side effects. Only the static part writes it.
    let Some(begin) = (unsafe { TASK_BEGIN }) else {
        return;
    };

    // SAFETY: The caller only passes a non-null domain and the name is null or a string handle.
    unsafe {
        begin(
            domain_ptr(domain),
            interval_id(id),
            NULL_ID,
            from_raw(name.as_raw()),
        );
    }
}

pub(crate) fn task_end(domain: DomainHandle) {
    // SAFETY: Reading the entry point has no side effects. Only the static part writes it.
    let Some(end) = (unsafe { TASK_END }) else {
        return;
    };

    // SAFETY: The caller only passes a non-null domain.
    unsafe { end(domain_ptr(domain)) }
}

pub(crate) fn region_begin(domain: DomainHandle, id: IntervalId, name: StringHandle) {
    // SAFETY: Reading the entry point has no side effects. Only the static part writes it.
    let Some(begin) = (unsafe { REGION_BEGIN }) else {
        return;
    };

    // SAFETY: The caller only passes a non-null domain and the name is null or a string handle.
    unsafe {
        begin(
            domain_ptr(domain),
            interval_id(id),
            NULL_ID,
            from_raw(name.as_raw()),
        );
    }
}

pub(crate) fn region_end(domain: DomainHandle, id: IntervalId) {
    // SAFETY: Reading the entry point has no side effects. Only the static part writes it.
    let Some(end) = (unsafe { REGION_END }) else {
        return;
    };

    // SAFETY: The caller only passes a non-null domain.
    unsafe { end(domain_ptr(domain), interval_id(id)) }
}

pub(crate) fn metadata_add_double(
    domain: DomainHandle,
    id: Option<IntervalId>,
    name: StringHandle,
    value: f64,
) {
    let mut value = value;

    // SAFETY: Reading the entry point has no side effects. Only the static part writes it.
    let Some(add) = (unsafe { METADATA_ADD }) else {
        return;
    };

    // SAFETY: The caller only passes non-null handles. `value` holds the one double that
    // the call reads and outlives it.
    unsafe {
        add(
            domain_ptr(domain),
            metadata_id(id),
            from_raw(name.as_raw()),
            METADATA_DOUBLE,
            1,
            ptr::from_mut(&mut value).cast::<c_void>(),
        );
    }
}

pub(crate) fn metadata_add_int64(
    domain: DomainHandle,
    id: Option<IntervalId>,
    name: StringHandle,
    value: i64,
) {
    let mut value = value;

    // SAFETY: Reading the entry point has no side effects. Only the static part writes it.
    let Some(add) = (unsafe { METADATA_ADD }) else {
        return;
    };

    // SAFETY: The caller only passes non-null handles. `value` holds the one integer that
    // the call reads and outlives it.
    unsafe {
        add(
            domain_ptr(domain),
            metadata_id(id),
            from_raw(name.as_raw()),
            METADATA_S64,
            1,
            ptr::from_mut(&mut value).cast::<c_void>(),
        );
    }
}

pub(crate) fn metadata_add_str(
    domain: DomainHandle,
    id: Option<IntervalId>,
    name: StringHandle,
    value: &CStr,
) {
    // SAFETY: Reading the entry point has no side effects. Only the static part writes it.
    let Some(add) = (unsafe { METADATA_STR_ADD }) else {
        return;
    };

    // SAFETY: The caller only passes non-null handles. `value` is NUL-terminated, which a
    // length of zero tells the static part to rely on.
    unsafe {
        add(
            domain_ptr(domain),
            metadata_id(id),
            from_raw(name.as_raw()),
            value.as_ptr(),
            0,
        );
    }
}

pub(crate) fn marker(domain: DomainHandle, name: StringHandle, marker_scope: MarkerScope) {
    // SAFETY: Reading the entry point has no side effects. Only the static part writes it.
    let Some(mark) = (unsafe { MARKER }) else {
        return;
    };

    // SAFETY: The caller only passes a non-null domain and the name is null or a string handle.
    unsafe {
        mark(
            domain_ptr(domain),
            NULL_ID,
            from_raw(name.as_raw()),
            scope(marker_scope),
        );
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn raw_handles_are_addresses() {
        let mut target = 0_u8;
        let pointer = ptr::from_mut(&mut target);

        let raw = to_raw(pointer);

        assert_ne!(raw, 0);
        assert_eq!(from_raw::<u8>(raw), pointer);
        assert!(from_raw::<u8>(0).is_null());
    }

    #[test]
    fn interval_ids_carry_both_handles() {
        let id = interval_id(IntervalId::new(
            DomainHandle::from_raw(3),
            StringHandle::from_raw(5),
        ));

        assert_eq!((id.d1, id.d2, id.d3), (3, 5, 0));

        let domain_level = metadata_id(None);
        assert_eq!((domain_level.d1, domain_level.d2, domain_level.d3), (0, 0, 0));
    }

    #[test]
    fn marker_scopes_map_to_itt_scopes() {
        assert_eq!(scope(MarkerScope::Global), SCOPE_GLOBAL);
        assert_eq!(scope(MarkerScope::Process), SCOPE_TRACK_GROUP);
        assert_eq!(scope(MarkerScope::Thread), SCOPE_TRACK);
        assert_eq!(scope(MarkerScope::Task), SCOPE_TASK);
    }
}
