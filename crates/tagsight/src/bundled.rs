//! [`TagEngine`] over the bundled pure-Rust engine, driven through its C-ABI.

use std::ptr;

use log::debug;
use tagsight_engine::ffi::{
    tsg_detections_destroy, tsg_detections_get, tsg_detections_size, tsg_detector_add_family,
    tsg_detector_create, tsg_detector_destroy, tsg_detector_detect, tsg_tag36h11_create,
    tsg_tag36h11_destroy, DetectionList,
};
use tagsight_engine::{DetectorConfig, TagDetector, TagFamily};

use crate::engine::{RawRecord, RecordSource, TagEngine};
use crate::raster::NativeRaster;
use crate::DetectError;

/// Family and detector instance of the bundled engine, owned together.
#[derive(Debug)]
pub struct BundledEngine {
    family: *mut TagFamily,
    detector: *mut TagDetector,
}

// SAFETY: both pointers are uniquely owned by this value and the engine keeps
// no thread-local state; `&mut self` on every call rules out shared use.
unsafe impl Send for BundledEngine {}

/// A detection list borrowed from the bundled engine until released.
#[derive(Debug)]
pub struct BundledResults {
    list: *mut DetectionList,
}

impl RecordSource for BundledResults {
    fn len(&self) -> usize {
        // SAFETY: `list` is live until `release_results`.
        let size = unsafe { tsg_detections_size(self.list) };
        usize::try_from(size).unwrap_or(0)
    }

    fn record(&self, index: usize) -> Option<RawRecord> {
        let index = i32::try_from(index).ok()?;
        // SAFETY: `list` is live; the record is copied out before returning.
        let rec = unsafe { tsg_detections_get(self.list, index).as_ref() }?;
        Some(RawRecord {
            id: rec.id,
            hamming: rec.hamming,
            goodness: rec.goodness,
            decision_margin: rec.decision_margin,
            center: rec.c,
            corners: rec.p,
        })
    }
}

impl TagEngine for BundledEngine {
    type Results = BundledResults;

    fn create(config: &DetectorConfig) -> Result<Self, DetectError> {
        let family = tsg_tag36h11_create();
        if family.is_null() {
            return Err(DetectError::Allocation { what: "tag family" });
        }

        // SAFETY: `config` is a valid reference for the duration of the call.
        let detector = unsafe { tsg_detector_create(config) };
        if detector.is_null() {
            // SAFETY: `family` came from `tsg_tag36h11_create` and is not
            // registered anywhere.
            unsafe { tsg_tag36h11_destroy(family) };
            return Err(DetectError::Allocation {
                what: "detector instance",
            });
        }

        // From here on `Drop` releases both handles in the right order.
        let engine = Self { family, detector };
        // SAFETY: both handles are live and `family` outlives `detector`.
        if unsafe { tsg_detector_add_family(detector, family) } != 0 {
            return Err(DetectError::Engine {
                message: format!(
                    "tag36h11 family registration failed (max_hamming {})",
                    config.max_hamming
                ),
            });
        }

        debug!("bundled engine created: {config:?}");
        Ok(engine)
    }

    fn detect(&mut self, raster: &NativeRaster) -> Result<BundledResults, DetectError> {
        if self.is_closed() {
            return Err(DetectError::Closed);
        }
        // SAFETY: `detector` is live and the descriptor points into a buffer
        // owned by `raster`, which outlives the call.
        let list = unsafe { tsg_detector_detect(self.detector, raster.descriptor()) };
        if list.is_null() {
            return Err(DetectError::Engine {
                message: format!(
                    "bundled engine rejected {}x{} raster",
                    raster.width(),
                    raster.height()
                ),
            });
        }
        Ok(BundledResults { list })
    }

    fn release_results(&mut self, results: BundledResults) {
        // SAFETY: `results.list` came from `tsg_detector_detect` and is
        // consumed here.
        unsafe { tsg_detections_destroy(results.list) };
    }

    fn close(&mut self) {
        if !self.detector.is_null() {
            // SAFETY: live handle, destroyed once and then cleared.
            unsafe { tsg_detector_destroy(self.detector) };
            self.detector = ptr::null_mut();
        }
        if !self.family.is_null() {
            // SAFETY: the only detector using the family is gone.
            unsafe { tsg_tag36h11_destroy(self.family) };
            self.family = ptr::null_mut();
            debug!("bundled engine closed");
        }
    }

    fn is_closed(&self) -> bool {
        self.detector.is_null()
    }
}

impl Drop for BundledEngine {
    fn drop(&mut self) {
        self.close();
    }
}
