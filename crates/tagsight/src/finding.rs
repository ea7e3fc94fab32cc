use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// One decoded tag, owned and independent of any engine resources.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Decoded tag id within tag36h11.
    pub id: u32,
    /// Number of payload bits the engine corrected.
    pub hamming: u32,
    /// Engine-specific quality score.
    pub goodness: f32,
    /// Quality of the binary decoding; higher is better.
    pub decision_margin: f32,
    /// Tag center in image pixels.
    pub center: Point2<f64>,
    /// Tag corners in image pixels, in the order the engine reported them.
    pub corners: [Point2<f64>; 4],
}
