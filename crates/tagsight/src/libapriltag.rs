//! [`TagEngine`] over the AprilTag 3 C library (`libapriltag`).
//!
//! Only `max_hamming` of [`DetectorConfig`] applies here: it becomes the
//! `bits_corrected` argument of family registration. AprilTag 3 dropped the
//! per-detection `goodness` field, so records report `0.0` for it.

#![allow(non_camel_case_types)]

use std::ffi::{c_char, c_int, c_void};
use std::ptr;

use log::debug;
use tagsight_engine::ffi::ImageU8;
use tagsight_engine::builtins::TAG36H11;
use tagsight_engine::DetectorConfig;

use crate::engine::{RawRecord, RecordSource, TagEngine};
use crate::raster::NativeRaster;
use crate::DetectError;

#[repr(C)]
pub struct apriltag_family_t {
    _private: [u8; 0],
}

#[repr(C)]
pub struct apriltag_detector_t {
    _private: [u8; 0],
}

#[repr(C)]
struct zarray_t {
    el_sz: usize,
    size: c_int,
    alloc: c_int,
    data: *mut c_char,
}

#[repr(C)]
struct apriltag_detection_t {
    family: *mut apriltag_family_t,
    id: c_int,
    hamming: c_int,
    decision_margin: f32,
    h: *mut c_void,
    c: [f64; 2],
    p: [[f64; 2]; 4],
}

// `image_u8_t` has the same layout as `ImageU8`.
type image_u8_t = ImageU8;

#[link(name = "apriltag")]
extern "C" {
    fn tag36h11_create() -> *mut apriltag_family_t;
    fn tag36h11_destroy(tf: *mut apriltag_family_t);
    fn apriltag_detector_create() -> *mut apriltag_detector_t;
    fn apriltag_detector_add_family_bits(
        td: *mut apriltag_detector_t,
        fam: *mut apriltag_family_t,
        bits_corrected: c_int,
    );
    fn apriltag_detector_detect(td: *mut apriltag_detector_t, im_orig: *mut image_u8_t)
        -> *mut zarray_t;
    fn apriltag_detections_destroy(detections: *mut zarray_t);
    fn apriltag_detector_destroy(td: *mut apriltag_detector_t);
}

/// Family and detector instance of `libapriltag`, owned together.
#[derive(Debug)]
pub struct LibAprilTag {
    family: *mut apriltag_family_t,
    detector: *mut apriltag_detector_t,
}

// SAFETY: both handles are uniquely owned; the library keeps per-detector
// state only, and `&mut self` serializes calls.
unsafe impl Send for LibAprilTag {}

/// A `zarray_t` of detection pointers, borrowed until released.
#[derive(Debug)]
pub struct LibAprilTagResults {
    detections: *mut zarray_t,
}

impl RecordSource for LibAprilTagResults {
    fn len(&self) -> usize {
        // SAFETY: `detections` is live until `release_results`.
        unsafe { self.detections.as_ref() }
            .and_then(|z| usize::try_from(z.size).ok())
            .unwrap_or(0)
    }

    fn record(&self, index: usize) -> Option<RawRecord> {
        if index >= self.len() {
            return None;
        }
        // SAFETY: `zarray_get` is inline in the C headers, so read the element
        // the same way: `data` holds `size` elements of `el_sz` bytes, each a
        // `apriltag_detection_t *`.
        let det = unsafe {
            let z = self.detections.as_ref()?;
            if z.el_sz != std::mem::size_of::<*mut apriltag_detection_t>() {
                return None;
            }
            let slot = z.data.add(index * z.el_sz) as *const *mut apriltag_detection_t;
            (*slot).as_ref()?
        };
        Some(RawRecord {
            id: det.id,
            hamming: det.hamming,
            goodness: 0.0,
            decision_margin: det.decision_margin,
            center: det.c,
            corners: det.p,
        })
    }
}

impl TagEngine for LibAprilTag {
    type Results = LibAprilTagResults;

    fn create(config: &DetectorConfig) -> Result<Self, DetectError> {
        if config.max_hamming > TAG36H11.max_correction_bits {
            return Err(DetectError::Engine {
                message: format!(
                    "max_hamming {} exceeds what tag36h11 can correct",
                    config.max_hamming
                ),
            });
        }
        // SAFETY: plain constructors with no preconditions.
        let family = unsafe { tag36h11_create() };
        if family.is_null() {
            return Err(DetectError::Allocation { what: "tag family" });
        }
        let detector = unsafe { apriltag_detector_create() };
        if detector.is_null() {
            // SAFETY: `family` is live and not registered anywhere.
            unsafe { tag36h11_destroy(family) };
            return Err(DetectError::Allocation {
                what: "detector instance",
            });
        }

        // SAFETY: both handles are live; `family` outlives `detector`.
        unsafe {
            apriltag_detector_add_family_bits(detector, family, c_int::from(config.max_hamming))
        };
        debug!(
            "libapriltag engine created (bits corrected {})",
            config.max_hamming
        );
        Ok(Self { family, detector })
    }

    fn detect(&mut self, raster: &NativeRaster) -> Result<LibAprilTagResults, DetectError> {
        if self.is_closed() {
            return Err(DetectError::Closed);
        }
        // The library takes a mutable pointer but only reads the image.
        let image = raster.descriptor() as *const image_u8_t as *mut image_u8_t;
        // SAFETY: `detector` is live and `image` points into `raster`'s buffer.
        let detections = unsafe { apriltag_detector_detect(self.detector, image) };
        if detections.is_null() {
            return Err(DetectError::Engine {
                message: "apriltag_detector_detect returned null".to_string(),
            });
        }
        Ok(LibAprilTagResults { detections })
    }

    fn release_results(&mut self, results: LibAprilTagResults) {
        // SAFETY: consumes the array returned by `apriltag_detector_detect`.
        unsafe { apriltag_detections_destroy(results.detections) };
    }

    fn close(&mut self) {
        if !self.detector.is_null() {
            // SAFETY: live handle, destroyed once and then cleared.
            unsafe { apriltag_detector_destroy(self.detector) };
            self.detector = ptr::null_mut();
        }
        if !self.family.is_null() {
            // SAFETY: the detector that referenced the family is gone.
            unsafe { tag36h11_destroy(self.family) };
            self.family = ptr::null_mut();
            debug!("libapriltag engine closed");
        }
    }

    fn is_closed(&self) -> bool {
        self.detector.is_null()
    }
}

impl Drop for LibAprilTag {
    fn drop(&mut self) {
        self.close();
    }
}
