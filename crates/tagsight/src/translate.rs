//! Copying native detection records into owned [`Finding`]s.

use log::warn;
use nalgebra::Point2;

use crate::engine::{RawRecord, RecordSource, TagEngine};
use crate::{DetectError, Finding};

/// Guard returning a native result collection to its engine exactly once,
/// on every exit path.
pub struct NativeResults<'e, E: TagEngine> {
    engine: &'e mut E,
    results: Option<E::Results>,
}

impl<'e, E: TagEngine> NativeResults<'e, E> {
    pub fn new(engine: &'e mut E, results: E::Results) -> Self {
        Self {
            engine,
            results: Some(results),
        }
    }

    /// Release now instead of at scope exit.
    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        if let Some(results) = self.results.take() {
            self.engine.release_results(results);
        }
    }

    fn source(&self) -> Option<&E::Results> {
        self.results.as_ref()
    }
}

impl<E: TagEngine> Drop for NativeResults<'_, E> {
    fn drop(&mut self) {
        self.release_inner();
    }
}

/// Translate every record of `results`, in native order, then release them.
pub fn translate_results<E: TagEngine>(
    engine: &mut E,
    results: E::Results,
) -> Result<Vec<Finding>, DetectError> {
    let guard = NativeResults::new(engine, results);
    let findings = match guard.source() {
        Some(src) => translate_records(src)?,
        None => Vec::new(),
    };
    guard.release();
    Ok(findings)
}

fn translate_records<S: RecordSource>(src: &S) -> Result<Vec<Finding>, DetectError> {
    let n = src.len();
    let mut out = Vec::with_capacity(n);
    for index in 0..n {
        let raw = src.record(index).ok_or_else(|| DetectError::Engine {
            message: format!("record {index} of {n} is missing"),
        })?;
        let finding = translate_record(index, &raw).inspect_err(|e| warn!("{e}"))?;
        out.push(finding);
    }
    Ok(out)
}

/// Convert one native record; negative ids or Hamming counts are rejected.
pub fn translate_record(index: usize, raw: &RawRecord) -> Result<Finding, DetectError> {
    let id = u32::try_from(raw.id).map_err(|_| DetectError::InvalidRecord {
        index,
        field: "id",
        value: raw.id.into(),
    })?;
    let hamming = u32::try_from(raw.hamming).map_err(|_| DetectError::InvalidRecord {
        index,
        field: "hamming",
        value: raw.hamming.into(),
    })?;

    let point = |p: [f64; 2]| Point2::new(p[0], p[1]);
    Ok(Finding {
        id,
        hamming,
        goodness: raw.goodness,
        decision_margin: raw.decision_margin,
        center: point(raw.center),
        corners: raw.corners.map(point),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: i32, hamming: i32) -> RawRecord {
        RawRecord {
            id,
            hamming,
            goodness: 0.5,
            decision_margin: 42.0,
            center: [10.25, 20.75],
            corners: [[1.0, 2.0], [3.0, 4.0], [5.0, 6.0], [7.0, 8.0]],
        }
    }

    #[test]
    fn fields_are_carried_over() {
        let f = translate_record(0, &raw(17, 1)).expect("valid");
        assert_eq!((f.id, f.hamming), (17, 1));
        assert_eq!(f.goodness, 0.5);
        assert_eq!(f.decision_margin, 42.0);
        assert_eq!(f.center, Point2::new(10.25, 20.75));
        assert_eq!(f.corners.len(), 4);
        assert_eq!(f.corners[3], Point2::new(7.0, 8.0));
    }

    #[test]
    fn negative_values_are_rejected() {
        match translate_record(3, &raw(-1, 0)) {
            Err(DetectError::InvalidRecord {
                index: 3,
                field: "id",
                value: -1,
            }) => {}
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            translate_record(0, &raw(5, -2)),
            Err(DetectError::InvalidRecord {
                field: "hamming",
                ..
            })
        ));
    }
}
