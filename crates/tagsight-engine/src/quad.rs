//! Dark connected components and quadrilateral fitting.
//!
//! Pixel centers sit on integer coordinates, the convention `sample_bilinear`
//! uses, so a pixel covers `[x - 0.5, x + 0.5)`.

use std::collections::VecDeque;
use std::f64::consts::FRAC_1_SQRT_2;

use nalgebra::{Point2, Vector2};

// Components smaller than this cannot carry a readable 8x8 cell grid.
const MIN_COMPONENT_PIXELS: usize = 24;
const MIN_FILL: f64 = 0.3;
const MAX_FILL: f64 = 1.15;
const MAX_SIDE_RATIO: f64 = 4.0;

/// Candidate tag outline, wound clockwise on screen (positive shoelace area
/// with y pointing down).
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Quad {
    pub corners: [Point2<f64>; 4],
}

/// Extract quads from a dark mask, in raster order of each component's first pixel.
pub(crate) fn find_quads(mask: &[bool], width: usize, height: usize, min_side: f64) -> Vec<Quad> {
    debug_assert_eq!(mask.len(), width * height);

    let mut visited = vec![false; width * height];
    let mut queue = VecDeque::new();
    let mut pixels: Vec<(u32, u32)> = Vec::new();
    let mut out = Vec::new();

    for y0 in 0..height {
        for x0 in 0..width {
            let idx0 = y0 * width + x0;
            if visited[idx0] || !mask[idx0] {
                continue;
            }

            visited[idx0] = true;
            queue.push_back((x0, y0));
            pixels.clear();
            let (mut min_x, mut min_y, mut max_x, mut max_y) = (x0, y0, x0, y0);

            while let Some((x, y)) = queue.pop_front() {
                pixels.push((x as u32, y as u32));
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);

                let neighbors = [
                    (x.wrapping_sub(1), y),
                    (x + 1, y),
                    (x, y.wrapping_sub(1)),
                    (x, y + 1),
                ];
                for (nx, ny) in neighbors {
                    if nx >= width || ny >= height {
                        continue;
                    }
                    let nidx = ny * width + nx;
                    if visited[nidx] || !mask[nidx] {
                        continue;
                    }
                    visited[nidx] = true;
                    queue.push_back((nx, ny));
                }
            }

            if pixels.len() < MIN_COMPONENT_PIXELS {
                continue;
            }
            let bw = (max_x - min_x + 1) as f64;
            let bh = (max_y - min_y + 1) as f64;
            if bw < min_side || bh < min_side {
                continue;
            }

            if let Some(quad) = fit_quad(&pixels, min_side) {
                out.push(quad);
            }
        }
    }

    out
}

/// Fit a quadrilateral to a component from its extreme points.
///
/// The first corner is the pixel farthest from the centroid, the third the
/// pixel farthest from the first, and the other two the pixels farthest on
/// either side of the diagonal between them.
pub(crate) fn fit_quad(pixels: &[(u32, u32)], min_side: f64) -> Option<Quad> {
    if pixels.is_empty() {
        return None;
    }

    let pts = || pixels.iter().map(|&(x, y)| Point2::new(x as f64, y as f64));
    let n = pixels.len() as f64;
    let sum = pts().fold(Vector2::zeros(), |acc, p| acc + p.coords);
    let centroid = Point2::from(sum / n);

    let c0 = farthest_from(pts(), centroid)?;
    let c2 = farthest_from(pts(), c0)?;
    let diag = c2 - c0;
    let diag_len = diag.norm();
    if diag_len < min_side {
        return None;
    }

    let mut c1 = (f64::NEG_INFINITY, c0);
    let mut c3 = (f64::INFINITY, c0);
    for p in pts() {
        let cross = diag.x * (p.y - c0.y) - diag.y * (p.x - c0.x);
        if cross > c1.0 {
            c1 = (cross, p);
        }
        if cross < c3.0 {
            c3 = (cross, p);
        }
    }

    let min_offset = 0.5 * min_side * diag_len;
    if c1.0 < min_offset || -c3.0 < min_offset {
        return None;
    }

    let mut corners = [c0, c1.1, c2, c3.1];
    if shoelace(&corners) < 0.0 {
        corners.swap(1, 3);
    }

    // Extreme pixel centers sit half a pixel inside the true outline.
    for c in &mut corners {
        let dir = *c - centroid;
        let len = dir.norm();
        if len > 0.0 {
            *c += dir * (FRAC_1_SQRT_2 / len);
        }
    }

    let quad = Quad { corners };
    if !quad.is_plausible(n, min_side) {
        return None;
    }
    Some(quad)
}

impl Quad {
    fn is_plausible(&self, pixel_count: f64, min_side: f64) -> bool {
        let c = &self.corners;
        let mut shortest = f64::INFINITY;
        let mut longest = 0.0f64;
        for i in 0..4 {
            let a = c[i];
            let b = c[(i + 1) % 4];
            let next = c[(i + 2) % 4];
            let e0 = b - a;
            let e1 = next - b;
            if e0.x * e1.y - e0.y * e1.x <= 0.0 {
                return false;
            }
            let len = e0.norm();
            shortest = shortest.min(len);
            longest = longest.max(len);
        }
        if shortest < min_side || longest > MAX_SIDE_RATIO * shortest {
            return false;
        }

        let area = 0.5 * shoelace(c);
        let fill = pixel_count / area;
        (MIN_FILL..=MAX_FILL).contains(&fill)
    }
}

fn farthest_from(
    pts: impl Iterator<Item = Point2<f64>>,
    origin: Point2<f64>,
) -> Option<Point2<f64>> {
    let mut best: Option<(f64, Point2<f64>)> = None;
    for p in pts {
        let d = (p - origin).norm_squared();
        if best.is_none_or(|(bd, _)| d > bd) {
            best = Some((d, p));
        }
    }
    best.map(|(_, p)| p)
}

// Twice the signed area; positive for clockwise-on-screen winding.
fn shoelace(c: &[Point2<f64>; 4]) -> f64 {
    (0..4)
        .map(|i| {
            let a = c[i];
            let b = c[(i + 1) % 4];
            a.x * b.y - b.x * a.y
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_mask(w: usize, h: usize, x0: usize, y0: usize, side: usize) -> Vec<bool> {
        let mut mask = vec![false; w * h];
        for y in y0..y0 + side {
            for x in x0..x0 + side {
                mask[y * w + x] = true;
            }
        }
        mask
    }

    #[test]
    fn axis_aligned_square_fits_pixel_edges() {
        let mask = square_mask(60, 50, 10, 12, 30);
        let quads = find_quads(&mask, 60, 50, 12.0);
        assert_eq!(quads.len(), 1);

        let mut xs: Vec<f64> = quads[0].corners.iter().map(|c| c.x).collect();
        let mut ys: Vec<f64> = quads[0].corners.iter().map(|c| c.y).collect();
        xs.sort_by(f64::total_cmp);
        ys.sort_by(f64::total_cmp);
        assert!((xs[0] - 9.5).abs() < 1e-9 && (xs[3] - 39.5).abs() < 1e-9);
        assert!((ys[0] - 11.5).abs() < 1e-9 && (ys[3] - 41.5).abs() < 1e-9);
        assert!(shoelace(&quads[0].corners) > 0.0);
    }

    #[test]
    fn ring_component_is_a_quad() {
        let mut mask = square_mask(40, 40, 5, 5, 24);
        for y in 9..25 {
            for x in 9..25 {
                mask[y * 40 + x] = false;
            }
        }
        assert_eq!(find_quads(&mask, 40, 40, 12.0).len(), 1);
    }

    #[test]
    fn small_and_elongated_blobs_are_rejected() {
        let tiny = square_mask(30, 30, 2, 2, 6);
        assert!(find_quads(&tiny, 30, 30, 12.0).is_empty());

        let mut bar = vec![false; 80 * 20];
        for y in 5..9 {
            for x in 5..75 {
                bar[y * 80 + x] = true;
            }
        }
        assert!(find_quads(&bar, 80, 20, 12.0).is_empty());
    }

    #[test]
    fn l_shape_fails_the_fill_or_convexity_check() {
        let mut mask = vec![false; 50 * 50];
        for y in 5..45 {
            for x in 5..12 {
                mask[y * 50 + x] = true;
            }
        }
        for y in 38..45 {
            for x in 5..45 {
                mask[y * 50 + x] = true;
            }
        }
        assert!(find_quads(&mask, 50, 50, 12.0).is_empty());
    }
}
