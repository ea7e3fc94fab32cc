use serde::{Deserialize, Serialize};

/// Detector tuning passed across the C-ABI to `tsg_detector_create`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Largest number of corrected payload bits accepted as a match; at most
    /// the family's `max_correction_bits` (5 for tag36h11).
    pub max_hamming: u8,
    /// Minimal black contrast below the local mean for a pixel to count as dark.
    pub min_contrast: u8,
    /// Local-mean window radius in pixels; 0 picks one from the image size.
    pub threshold_radius: u32,
    /// Minimal side length of a candidate quad, in pixels.
    pub min_side_px: f32,
    /// Required fraction of border cells read as black.
    pub min_border_score: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            max_hamming: 2,
            min_contrast: 20,
            threshold_radius: 0,
            min_side_px: 12.0,
            min_border_score: 0.85,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: DetectorConfig =
            serde_json::from_str(r#"{ "max_hamming": 0 }"#).expect("valid json");
        assert_eq!(cfg.max_hamming, 0);
        assert_eq!(cfg.min_side_px, 12.0);
        assert_eq!(cfg.min_border_score, 0.85);
    }
}
