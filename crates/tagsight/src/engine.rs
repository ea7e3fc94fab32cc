//! The contract between a detection session and the engine that decodes tags.
//!
//! An engine owns a family handle and an instance handle. Each `detect` call
//! hands back a native result collection that stays owned by the engine's
//! allocator until it is returned through `release_results`.

use tagsight_engine::DetectorConfig;

use crate::raster::NativeRaster;
use crate::DetectError;

/// One record read out of a native result collection, with the engine's
/// native integer and float types.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawRecord {
    pub id: i32,
    pub hamming: i32,
    pub goodness: f32,
    pub decision_margin: f32,
    pub center: [f64; 2],
    pub corners: [[f64; 2]; 4],
}

/// Indexed read access to a native result collection.
pub trait RecordSource {
    fn len(&self) -> usize;

    /// Record `index`, or `None` if the engine returned no record there.
    fn record(&self, index: usize) -> Option<RawRecord>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A tag-detection engine with explicitly managed native resources.
///
/// Implementations release the instance before the family in `close`, make
/// `close` idempotent, and call it from `Drop`.
pub trait TagEngine {
    type Results: RecordSource;

    /// Allocate the family, then the instance, and register the family.
    /// On failure nothing stays allocated.
    fn create(config: &DetectorConfig) -> Result<Self, DetectError>
    where
        Self: Sized;

    /// Synchronous detection over `raster`. Returns [`DetectError::Closed`]
    /// after `close`.
    fn detect(&mut self, raster: &NativeRaster) -> Result<Self::Results, DetectError>;

    /// Give a result collection back to the engine. Called exactly once per
    /// successful `detect`, even for empty collections.
    fn release_results(&mut self, results: Self::Results);

    fn close(&mut self);

    fn is_closed(&self) -> bool;
}
