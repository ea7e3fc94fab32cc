//! Engine-side family and detector objects behind the C-ABI surface.

use log::{debug, trace};
use tagsight_core::GrayImageView;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::builtins::TAG36H11;
use crate::decode::QuadDecoder;
use crate::quad::find_quads;
use crate::threshold::{adaptive_dark_mask, auto_radius};
use crate::{DetectorConfig, Dictionary, Matcher};

/// A tag family: the dictionary a detector decodes against.
#[derive(Debug)]
pub struct TagFamily {
    dict: Dictionary,
}

impl TagFamily {
    pub fn tag36h11() -> Self {
        Self { dict: TAG36H11 }
    }

    pub fn dictionary(&self) -> Dictionary {
        self.dict
    }
}

/// One detection as laid out for foreign callers.
///
/// Geometry in pixels; `p` wraps counter-clockwise in the tag frame starting
/// at the bottom-left corner.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct TagRecord {
    /// Family the tag was decoded against; borrowed from the detector.
    pub family: *const TagFamily,
    pub id: i32,
    pub hamming: i32,
    pub goodness: f32,
    pub decision_margin: f32,
    pub c: [f64; 2],
    pub p: [[f64; 2]; 4],
}

/// Detector instance.
///
/// Holds a non-owning pointer to its registered family, which must outlive it.
#[derive(Debug)]
pub struct TagDetector {
    config: DetectorConfig,
    family: *const TagFamily,
    matcher: Option<Matcher>,
}

impl TagDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            family: std::ptr::null(),
            matcher: None,
        }
    }

    /// Register `family`, replacing any earlier one.
    ///
    /// Returns `false` for a null family, or when `max_hamming` asks for more
    /// corrected bits than the family's `max_correction_bits`.
    ///
    /// # Safety
    /// `family` must point to a live `TagFamily` that stays alive until this
    /// detector is destroyed.
    pub unsafe fn add_family(&mut self, family: *const TagFamily) -> bool {
        let Some(fam) = family.as_ref() else {
            return false;
        };
        let Some(matcher) = Matcher::new(fam.dictionary(), self.config.max_hamming) else {
            return false;
        };
        debug!(
            "registered family {} ({} codes, max hamming {})",
            fam.dictionary().name,
            fam.dictionary().codes.len(),
            self.config.max_hamming
        );
        self.family = family;
        self.matcher = Some(matcher);
        true
    }

    /// Detect tags in `img`. Records come out in raster order of each
    /// tag's first dark pixel; no family registered means no records.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, img), fields(w = img.width(), h = img.height()))
    )]
    pub fn detect(&self, img: &GrayImageView<'_>) -> Vec<TagRecord> {
        let Some(matcher) = &self.matcher else {
            return Vec::new();
        };
        let cfg = &self.config;

        let radius = match cfg.threshold_radius {
            0 => auto_radius(img.width(), img.height()),
            r => r as usize,
        };
        let offset = cfg.min_contrast / 2;
        let mask = adaptive_dark_mask(img, radius, offset);

        let min_side = cfg.min_side_px.max(1.0) as f64;
        let quads = find_quads(&mask, img.width(), img.height(), min_side);
        trace!("{} candidate quads (threshold radius {radius})", quads.len());

        let mut decoder = QuadDecoder::new(matcher, cfg.min_border_score, cfg.min_contrast);
        let records: Vec<TagRecord> = quads
            .iter()
            .filter_map(|q| decoder.decode(img, q))
            .map(|tag| TagRecord {
                family: self.family,
                id: tag.id as i32,
                hamming: tag.hamming as i32,
                goodness: tag.border_score,
                decision_margin: tag.decision_margin,
                c: [tag.center.x, tag.center.y],
                p: tag.corners.map(|p| [p.x, p.y]),
            })
            .collect();

        debug!(
            "{}x{} image: {} quads, {} tags",
            img.width(),
            img.height(),
            quads.len(),
            records.len()
        );
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render_tag;
    use tagsight_core::GrayImage;

    fn paste(dst: &mut GrayImage, src: &GrayImage, x0: usize, y0: usize) {
        let view = src.view();
        for y in 0..src.height() {
            for (x, &v) in view.row(y).iter().enumerate() {
                dst.set(x0 + x, y0 + y, v);
            }
        }
    }

    fn detector_with_family(family: &TagFamily) -> TagDetector {
        let mut det = TagDetector::new(DetectorConfig::default());
        // SAFETY: `family` outlives the detector in every test below.
        assert!(unsafe { det.add_family(family) });
        det
    }

    #[test]
    fn without_family_nothing_is_detected() {
        let img = render_tag(5, 8).expect("tag");
        let det = TagDetector::new(DetectorConfig::default());
        assert!(det.detect(&img.view()).is_empty());
    }

    #[test]
    fn max_hamming_beyond_the_family_limit_is_refused() {
        let family = TagFamily::tag36h11();
        let config = DetectorConfig {
            max_hamming: family.dictionary().max_correction_bits + 1,
            ..DetectorConfig::default()
        };
        let mut det = TagDetector::new(config);
        // SAFETY: `family` outlives `det`.
        assert!(!unsafe { det.add_family(&family) });
        assert!(det.detect(&render_tag(5, 8).expect("tag").view()).is_empty());
    }

    #[test]
    fn single_rendered_tag_is_found() {
        let family = TagFamily::tag36h11();
        let det = detector_with_family(&family);

        let px = 8;
        let tag = render_tag(123, px).expect("tag");
        let mut canvas = GrayImage::filled(200, 160, 255).expect("canvas");
        paste(&mut canvas, &tag, 40, 30);

        let records = det.detect(&canvas.view());
        assert_eq!(records.len(), 1);
        let r = records[0];
        assert_eq!(r.id, 123);
        assert_eq!(r.hamming, 0);
        assert!(r.goodness >= 0.99);
        assert!(r.decision_margin > 50.0);
        assert_eq!(r.family, &family as *const TagFamily);

        // tag spans cells 1..9 of the rendered image
        let center = (40.0 + 5.0 * px as f64 - 0.5, 30.0 + 5.0 * px as f64 - 0.5);
        assert!((r.c[0] - center.0).abs() < 1.0, "cx {}", r.c[0]);
        assert!((r.c[1] - center.1).abs() < 1.0, "cy {}", r.c[1]);

        // bottom-left first, then counter-clockwise in the tag frame
        let lo = 40.0 + px as f64 - 0.5;
        let hi = 40.0 + 9.0 * px as f64 - 0.5;
        let top = 30.0 + px as f64 - 0.5;
        let bottom = 30.0 + 9.0 * px as f64 - 0.5;
        let expected = [[lo, bottom], [hi, bottom], [hi, top], [lo, top]];
        for (got, want) in r.p.iter().zip(expected.iter()) {
            assert!((got[0] - want[0]).abs() < 1.0 && (got[1] - want[1]).abs() < 1.0);
        }
    }

    #[test]
    fn rotated_tag_reports_upright_corner_order() {
        let family = TagFamily::tag36h11();
        let det = detector_with_family(&family);

        // rotate the rendered tag a quarter turn clockwise on screen
        let tag = render_tag(7, 8).expect("tag");
        let side = tag.width();
        let mut rotated = GrayImage::filled(side, side, 255).expect("img");
        for y in 0..side {
            for x in 0..side {
                rotated.set(side - 1 - y, x, tag.view().get(x, y));
            }
        }
        let mut canvas = GrayImage::filled(160, 160, 255).expect("canvas");
        paste(&mut canvas, &rotated, 40, 40);

        let records = det.detect(&canvas.view());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 7);

        // the upright bottom-left corner now sits at the top-left on screen
        let bl = records[0].p[0];
        assert!((bl[0] - 47.5).abs() < 1.0 && (bl[1] - 47.5).abs() < 1.0, "{bl:?}");
    }

    #[test]
    fn records_follow_raster_order() {
        let family = TagFamily::tag36h11();
        let det = detector_with_family(&family);

        let mut canvas = GrayImage::filled(320, 200, 255).expect("canvas");
        paste(&mut canvas, &render_tag(9, 6).expect("tag"), 200, 20);
        paste(&mut canvas, &render_tag(4, 6).expect("tag"), 20, 100);

        let ids: Vec<i32> = det.detect(&canvas.view()).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![9, 4]);
    }

    #[test]
    fn blank_image_has_no_records() {
        let family = TagFamily::tag36h11();
        let det = detector_with_family(&family);
        let canvas = GrayImage::filled(64, 48, 90).expect("canvas");
        assert!(det.detect(&canvas.view()).is_empty());
    }
}
