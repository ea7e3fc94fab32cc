//! Reading the cell grid inside a candidate quad.

use nalgebra::Point2;
use tagsight_core::{homography_from_4pt, sample_bilinear, GrayImageView, Homography};

use crate::quad::Quad;
use crate::threshold::otsu_threshold_from_samples;
use crate::Matcher;

// Sub-sample offsets inside one cell; the outer 30% on each side is skipped.
const CELL_TAPS: [f64; 3] = [0.3, 0.5, 0.7];

/// A quad whose payload matched a dictionary code.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct DecodedTag {
    pub id: u32,
    pub hamming: u8,
    /// Fraction of border cells read as black.
    pub border_score: f32,
    pub decision_margin: f32,
    pub center: Point2<f64>,
    /// Bottom-left, bottom-right, top-right, top-left in the tag's upright frame.
    pub corners: [Point2<f64>; 4],
}

/// Reusable cell reader; keeps its sample buffers between quads.
pub(crate) struct QuadDecoder<'a> {
    matcher: &'a Matcher,
    min_border_score: f32,
    min_contrast: u8,
    cells: usize,
    scratch_cells: Vec<u8>,
    scratch_thr: Vec<u8>,
}

impl<'a> QuadDecoder<'a> {
    pub fn new(matcher: &'a Matcher, min_border_score: f32, min_contrast: u8) -> Self {
        let cells = matcher.dictionary().grid_cells();
        Self {
            matcher,
            min_border_score,
            min_contrast,
            cells,
            scratch_cells: Vec::with_capacity(cells * cells),
            scratch_thr: Vec::with_capacity((cells + 2) * (cells + 2)),
        }
    }

    pub fn decode(&mut self, img: &GrayImageView<'_>, quad: &Quad) -> Option<DecodedTag> {
        let n = self.cells as f64;
        let grid = [
            Point2::new(0.0, 0.0),
            Point2::new(n, 0.0),
            Point2::new(n, n),
            Point2::new(0.0, n),
        ];
        let h = homography_from_4pt(&grid, &quad.corners)?;

        self.sample(img, &h);

        let (lo, hi) = self
            .scratch_thr
            .iter()
            .fold((u8::MAX, u8::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if hi.saturating_sub(lo) < self.min_contrast {
            return None;
        }
        let thr = otsu_threshold_from_samples(&self.scratch_thr);

        let obs = read_cells(&self.scratch_cells, self.cells, thr);
        if obs.border_score < self.min_border_score {
            return None;
        }

        let m = self.matcher.match_code(obs.code)?;

        let corners = UPRIGHT_CORNERS
            .map(|(u, v)| h.apply(observed_from_upright(u * n, v * n, n, m.rotation)));
        let center = h.apply(Point2::new(0.5 * n, 0.5 * n));

        Some(DecodedTag {
            id: m.id,
            hamming: m.hamming,
            border_score: obs.border_score,
            decision_margin: obs.decision_margin,
            center,
            corners,
        })
    }

    // Cell means go to `scratch_cells`; the threshold set adds the quiet-zone
    // ring one cell outside the border, where it lies inside the image.
    fn sample(&mut self, img: &GrayImageView<'_>, h: &Homography) {
        self.scratch_cells.clear();
        self.scratch_thr.clear();

        let cells = self.cells as i32;
        for cy in -1..=cells {
            for cx in -1..=cells {
                let inside = (0..cells).contains(&cx) && (0..cells).contains(&cy);
                if inside {
                    let v = cell_mean(img, h, cx, cy);
                    self.scratch_cells.push(v);
                    self.scratch_thr.push(v);
                } else if cell_in_image(img, h, cx, cy) {
                    self.scratch_thr.push(cell_mean(img, h, cx, cy));
                }
            }
        }
    }
}

// Corners of the upright tag in unit grid coordinates, emitted
// bottom-left, bottom-right, top-right, top-left.
const UPRIGHT_CORNERS: [(f64, f64); 4] = [(0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)];

/// Map a point of the upright tag grid into the observed grid, given the
/// rotation reported by the matcher (`observed == rotate(upright, rot)`).
fn observed_from_upright(u: f64, v: f64, n: f64, rot: u8) -> Point2<f64> {
    match rot & 3 {
        0 => Point2::new(u, v),
        1 => Point2::new(n - v, u),
        2 => Point2::new(n - u, n - v),
        _ => Point2::new(v, n - u),
    }
}

#[derive(Clone, Copy, Debug)]
struct CellObservation {
    code: u64,
    border_score: f32,
    decision_margin: f32,
}

/// Binarize an `n x n` cell grid: border ring score, payload bits
/// (the `Dictionary::grid_code` layout) and the weaker class's mean
/// distance to `thr`.
fn read_cells(samples: &[u8], cells: usize, thr: u8) -> CellObservation {
    let bits = cells - 2;
    let mut border_black = 0u32;
    let mut border_total = 0u32;
    let mut code = 0u64;
    let (mut black_sum, mut black_n) = (0f32, 0u32);
    let (mut white_sum, mut white_n) = (0f32, 0u32);

    for cy in 0..cells {
        for cx in 0..cells {
            let m = samples[cy * cells + cx];
            let is_black = m < thr;
            let is_border = cx == 0 || cy == 0 || cx + 1 == cells || cy + 1 == cells;
            if is_border {
                border_total += 1;
                border_black += is_black as u32;
                continue;
            }

            let dist = (m as f32 - thr as f32).abs();
            if is_black {
                code |= 1u64 << ((cy - 1) * bits + (cx - 1));
                black_sum += dist;
                black_n += 1;
            } else {
                white_sum += dist;
                white_n += 1;
            }
        }
    }

    let black = (black_n > 0).then(|| black_sum / black_n as f32);
    let white = (white_n > 0).then(|| white_sum / white_n as f32);
    let decision_margin = match (black, white) {
        (Some(b), Some(w)) => b.min(w),
        (Some(v), None) | (None, Some(v)) => v,
        (None, None) => 0.0,
    };

    CellObservation {
        code,
        border_score: border_black as f32 / border_total.max(1) as f32,
        decision_margin,
    }
}

fn cell_mean(img: &GrayImageView<'_>, h: &Homography, cx: i32, cy: i32) -> u8 {
    let mut sum = 0f32;
    for fy in CELL_TAPS {
        for fx in CELL_TAPS {
            let q = h.apply(Point2::new(cx as f64 + fx, cy as f64 + fy));
            sum += sample_bilinear(img, q.x as f32, q.y as f32);
        }
    }
    (sum / (CELL_TAPS.len() * CELL_TAPS.len()) as f32).round() as u8
}

fn cell_in_image(img: &GrayImageView<'_>, h: &Homography, cx: i32, cy: i32) -> bool {
    let q = h.apply(Point2::new(cx as f64 + 0.5, cy as f64 + 0.5));
    let max_x = (img.width() - 1) as f64;
    let max_y = (img.height() - 1) as f64;
    (0.0..=max_x).contains(&q.x) && (0.0..=max_y).contains(&q.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upright_mapping_matches_code_rotation() {
        // A point at the centre of payload bit (bx, by) must land on the
        // cell that `rotate_code` moves that bit to.
        let n = 6usize;
        for rot in 0..4u8 {
            for by in 0..n {
                for bx in 0..n {
                    let code = 1u64 << (by * n + bx);
                    let rotated = crate::matcher::rotate_code(code, n, rot);
                    let idx = rotated.trailing_zeros() as usize;
                    let (ox, oy) = (idx % n, idx / n);

                    let p = observed_from_upright(bx as f64 + 1.5, by as f64 + 1.5, 8.0, rot);
                    assert!((p.x - (ox as f64 + 1.5)).abs() < 1e-12, "rot {rot}");
                    assert!((p.y - (oy as f64 + 1.5)).abs() < 1e-12, "rot {rot}");
                }
            }
        }
    }

    #[test]
    fn reads_border_and_payload() {
        let cells = 8;
        let mut samples = vec![0u8; cells * cells];
        // payload bit (0,0) white, everything else black
        samples[cells + 1] = 250;
        let obs = read_cells(&samples, cells, 128);
        assert_eq!(obs.border_score, 1.0);
        assert_eq!(obs.code, ((1u64 << 36) - 1) & !1);
        assert!((obs.decision_margin - 122.0).abs() < 1e-4);
    }
}
