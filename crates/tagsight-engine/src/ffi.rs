//! C-ABI surface of the engine.
//!
//! Object lifetimes follow the AprilTag C library: the caller creates a
//! family and a detector, registers the family, and destroys the detector
//! before the family. Every list returned by `tsg_detector_detect` must be
//! handed back to `tsg_detections_destroy`, including empty ones.

use std::ffi::c_int;
use std::panic::{self, AssertUnwindSafe};
use std::ptr;

use tagsight_core::GrayImageView;

use crate::{DetectorConfig, TagDetector, TagFamily, TagRecord};

/// Raster descriptor: `buf` addresses at least `stride * height` bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct ImageU8 {
    pub width: i32,
    pub height: i32,
    pub stride: i32,
    pub buf: *mut u8,
}

impl ImageU8 {
    /// Borrow the described pixels; `None` for a null buffer or an invalid layout.
    ///
    /// # Safety
    /// `buf` must be valid for reads of `stride * height` bytes for `'a`.
    pub unsafe fn view<'a>(&self) -> Option<GrayImageView<'a>> {
        if self.buf.is_null() {
            return None;
        }
        let width = usize::try_from(self.width).ok()?;
        let height = usize::try_from(self.height).ok()?;
        let stride = usize::try_from(self.stride).ok()?;
        let len = stride.checked_mul(height)?;
        let data = std::slice::from_raw_parts(self.buf as *const u8, len);
        GrayImageView::new(width, height, stride, data).ok()
    }
}

/// Heap-allocated detection records.
#[repr(C)]
#[derive(Debug)]
pub struct DetectionList {
    size: c_int,
    records: *mut TagRecord,
}

impl DetectionList {
    fn into_raw(records: Vec<TagRecord>) -> *mut DetectionList {
        let Ok(size) = c_int::try_from(records.len()) else {
            return ptr::null_mut();
        };
        let records = Box::into_raw(records.into_boxed_slice()) as *mut TagRecord;
        Box::into_raw(Box::new(DetectionList { size, records }))
    }
}

/// Creates the tag36h11 family.
#[no_mangle]
pub extern "C" fn tsg_tag36h11_create() -> *mut TagFamily {
    match panic::catch_unwind(|| Box::new(TagFamily::tag36h11())) {
        Ok(family) => Box::into_raw(family),
        Err(_) => ptr::null_mut(),
    }
}

/// # Safety
///
/// - `family` must be a pointer returned by `tsg_tag36h11_create`, or null
///   (no-op).
/// - Every detector the family was registered with must already be destroyed.
#[no_mangle]
pub unsafe extern "C" fn tsg_tag36h11_destroy(family: *mut TagFamily) {
    if !family.is_null() {
        drop(Box::from_raw(family));
    }
}

/// Creates a detector. A null `config` selects the defaults.
///
/// # Safety
///
/// `config` must be null or point to an initialized `DetectorConfig`.
#[no_mangle]
pub unsafe extern "C" fn tsg_detector_create(config: *const DetectorConfig) -> *mut TagDetector {
    let config = config.as_ref().copied().unwrap_or_default();
    match panic::catch_unwind(|| Box::new(TagDetector::new(config))) {
        Ok(det) => Box::into_raw(det),
        Err(_) => ptr::null_mut(),
    }
}

/// Registers `family` with `detector`. Returns 0 on success, -1 otherwise.
///
/// # Safety
///
/// - `detector` must be a live pointer returned by `tsg_detector_create`.
/// - `family` must be a live pointer returned by `tsg_tag36h11_create` that
///   outlives `detector`.
#[no_mangle]
pub unsafe extern "C" fn tsg_detector_add_family(
    detector: *mut TagDetector,
    family: *const TagFamily,
) -> c_int {
    let Some(det) = detector.as_mut() else {
        return -1;
    };
    if det.add_family(family) {
        0
    } else {
        -1
    }
}

/// Runs detection. Returns null if an argument is invalid or detection failed.
///
/// # Safety
///
/// - `detector` must be a live pointer returned by `tsg_detector_create`.
/// - `image` must point to an `ImageU8` whose `buf` is readable for
///   `stride * height` bytes for the duration of the call.
/// - `detector` must not be used concurrently from multiple threads.
#[no_mangle]
pub unsafe extern "C" fn tsg_detector_detect(
    detector: *mut TagDetector,
    image: *const ImageU8,
) -> *mut DetectionList {
    let (Some(det), Some(image)) = (detector.as_ref(), image.as_ref()) else {
        return ptr::null_mut();
    };
    let Some(view) = image.view() else {
        return ptr::null_mut();
    };
    match panic::catch_unwind(AssertUnwindSafe(|| det.detect(&view))) {
        Ok(records) => DetectionList::into_raw(records),
        Err(_) => ptr::null_mut(),
    }
}

/// # Safety
///
/// - `detector` must be a pointer returned by `tsg_detector_create`, or null
///   (no-op).
/// - After this call, `detector` is invalid and must not be used again.
#[no_mangle]
pub unsafe extern "C" fn tsg_detector_destroy(detector: *mut TagDetector) {
    if !detector.is_null() {
        drop(Box::from_raw(detector));
    }
}

/// Number of records in `list`; 0 for null.
///
/// # Safety
///
/// `list` must be null or a live pointer returned by `tsg_detector_detect`.
#[no_mangle]
pub unsafe extern "C" fn tsg_detections_size(list: *const DetectionList) -> c_int {
    list.as_ref().map_or(0, |l| l.size)
}

/// Record `index` of `list`, or null when out of range.
///
/// # Safety
///
/// `list` must be null or a live pointer returned by `tsg_detector_detect`.
/// The record is borrowed from `list` and dies with it.
#[no_mangle]
pub unsafe extern "C" fn tsg_detections_get(
    list: *const DetectionList,
    index: c_int,
) -> *const TagRecord {
    match list.as_ref() {
        Some(l) if (0..l.size).contains(&index) => l.records.add(index as usize),
        _ => ptr::null(),
    }
}

/// # Safety
///
/// - `list` must be a pointer returned by `tsg_detector_detect`, or null
///   (no-op).
/// - After this call, `list` and every record borrowed from it are invalid.
#[no_mangle]
pub unsafe extern "C" fn tsg_detections_destroy(list: *mut DetectionList) {
    if list.is_null() {
        return;
    }
    let list = Box::from_raw(list);
    let records = ptr::slice_from_raw_parts_mut(list.records, list.size as usize);
    drop(Box::from_raw(records));
}
