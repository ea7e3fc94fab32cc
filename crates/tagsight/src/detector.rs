//! The detection session facade.

use log::debug;
use serde::{Deserialize, Serialize};
use tagsight_core::GrayImageView;
use tagsight_engine::DetectorConfig;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::bundled::BundledEngine;
use crate::engine::TagEngine;
use crate::raster::NativeRaster;
use crate::translate::translate_results;
use crate::{DetectError, Finding};

/// Parameters for [`Detector::with_params`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    pub engine: DetectorConfig,
}

/// A tag36h11 detection session.
///
/// Owns one engine (family plus instance). `find` needs `&mut self`, so a
/// detector serves one caller at a time; use one detector per thread, or put
/// it behind a `Mutex`.
#[derive(Debug)]
pub struct Detector<E: TagEngine = BundledEngine> {
    engine: E,
}

impl Detector<BundledEngine> {
    /// Detector over the bundled engine with default parameters.
    pub fn create() -> Result<Self, DetectError> {
        Self::with_params(&DetectorParams::default())
    }

    pub fn with_params(params: &DetectorParams) -> Result<Self, DetectError> {
        Ok(Self::with_engine(BundledEngine::create(&params.engine)?))
    }
}

impl<E: TagEngine> Detector<E> {
    /// Wrap an already created engine.
    pub fn with_engine(engine: E) -> Self {
        Self { engine }
    }

    /// Release the engine's native resources. Calling it again is a no-op.
    pub fn close(&mut self) {
        self.engine.close();
    }

    pub fn is_closed(&self) -> bool {
        self.engine.is_closed()
    }

    /// Detect all tags in `image`.
    ///
    /// The pixels are copied into a per-call foreign buffer and the engine's
    /// result collection is released before returning, on success and on
    /// error. Findings keep the engine's order.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, image),
            fields(width = image.width(), height = image.height())
        )
    )]
    pub fn find(&mut self, image: &GrayImageView<'_>) -> Result<Vec<Finding>, DetectError> {
        if self.engine.is_closed() {
            return Err(DetectError::Closed);
        }

        let raster = NativeRaster::from_gray(image)?;
        let results = self.engine.detect(&raster)?;
        let findings = translate_results(&mut self.engine, results)?;

        debug!(
            "{}x{} image: {} tag(s)",
            image.width(),
            image.height(),
            findings.len()
        );
        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{RawRecord, RecordSource};
    use std::cell::Cell;
    use std::rc::Rc;
    use tagsight_core::GrayImage;

    /// Engine replaying a fixed record list and counting releases.
    struct Scripted {
        records: Vec<RawRecord>,
        released: Rc<Cell<usize>>,
        closed: bool,
    }

    struct ScriptedResults(Vec<RawRecord>);

    impl RecordSource for ScriptedResults {
        fn len(&self) -> usize {
            self.0.len()
        }
        fn record(&self, index: usize) -> Option<RawRecord> {
            self.0.get(index).copied()
        }
    }

    impl TagEngine for Scripted {
        type Results = ScriptedResults;

        fn create(_: &DetectorConfig) -> Result<Self, DetectError> {
            Ok(Self {
                records: Vec::new(),
                released: Rc::default(),
                closed: false,
            })
        }
        fn detect(&mut self, _: &NativeRaster) -> Result<ScriptedResults, DetectError> {
            Ok(ScriptedResults(self.records.clone()))
        }
        fn release_results(&mut self, _: ScriptedResults) {
            self.released.set(self.released.get() + 1);
        }
        fn close(&mut self) {
            self.closed = true;
        }
        fn is_closed(&self) -> bool {
            self.closed
        }
    }

    fn record(id: i32) -> RawRecord {
        RawRecord {
            id,
            hamming: 0,
            goodness: 0.0,
            decision_margin: 10.0,
            center: [id as f64, 0.0],
            corners: [[0.0; 2]; 4],
        }
    }

    fn scripted(records: Vec<RawRecord>) -> (Detector<Scripted>, Rc<Cell<usize>>) {
        let mut engine = Scripted::create(&DetectorConfig::default()).expect("scripted");
        engine.records = records;
        let released = engine.released.clone();
        (Detector::with_engine(engine), released)
    }

    #[test]
    fn findings_keep_engine_order_and_results_are_released_once() {
        let (mut det, released) = scripted(vec![record(9), record(2), record(5)]);
        let img = GrayImage::filled(4, 4, 0).expect("img");

        let ids: Vec<u32> = det
            .find(&img.view())
            .expect("find")
            .iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(ids, vec![9, 2, 5]);
        assert_eq!(released.get(), 1);

        det.find(&img.view()).expect("find");
        assert_eq!(released.get(), 2);
    }

    #[test]
    fn bad_record_still_releases_results() {
        let (mut det, released) = scripted(vec![record(1), record(-4), record(3)]);
        let img = GrayImage::filled(4, 4, 0).expect("img");

        let err = det.find(&img.view()).unwrap_err();
        assert!(matches!(
            err,
            DetectError::InvalidRecord {
                index: 1,
                field: "id",
                ..
            }
        ));
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn empty_collection_is_released_too() {
        let (mut det, released) = scripted(Vec::new());
        let img = GrayImage::filled(4, 4, 0).expect("img");
        assert!(det.find(&img.view()).expect("find").is_empty());
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn find_after_close_fails() {
        let mut det = Detector::create().expect("detector");
        det.close();
        det.close();
        let img = GrayImage::filled(4, 4, 0).expect("img");
        assert!(matches!(det.find(&img.view()), Err(DetectError::Closed)));
    }

    #[test]
    fn params_round_trip_through_json() {
        let mut params = DetectorParams::default();
        params.engine.max_hamming = 1;
        params.engine.min_side_px = 20.0;
        let json = serde_json::to_string(&params).expect("serialize");
        let back: DetectorParams = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, params);
    }
}
