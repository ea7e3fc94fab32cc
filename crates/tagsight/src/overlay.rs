//! Diagnostic crosshairs over detected tags.

use std::ops::DerefMut;

use image::{ImageBuffer, Pixel};
use nalgebra::Point2;

use crate::Finding;

/// Length of each crosshair arm pair, in pixels.
pub const MARK_LEN: i32 = 14;

/// A drawable surface addressed by signed pixel coordinates.
///
/// `draw_findings` does no clipping, so implementations must accept
/// coordinates outside their bounds.
pub trait Surface {
    type Color: Copy;

    fn set(&mut self, x: i32, y: i32, color: Self::Color);
}

/// Writes outside the buffer are dropped.
impl<P, C> Surface for ImageBuffer<P, C>
where
    P: Pixel,
    C: DerefMut<Target = [P::Subpixel]>,
{
    type Color = P;

    fn set(&mut self, x: i32, y: i32, color: P) {
        if x < 0 || y < 0 || x as u32 >= self.width() || y as u32 >= self.height() {
            return;
        }
        self.put_pixel(x as u32, y as u32, color);
    }
}

/// Draw a `MARK_LEN` horizontal and vertical line through each center (in
/// `center_color`) and each corner (in `corner_color`).
///
/// Coordinates are truncated toward zero; lines start at `coord - 7`.
pub fn draw_findings<S: Surface>(
    surface: &mut S,
    findings: &[Finding],
    center_color: S::Color,
    corner_color: S::Color,
) {
    for finding in findings {
        draw_mark(surface, finding.center, center_color);
        for &corner in &finding.corners {
            draw_mark(surface, corner, corner_color);
        }
    }
}

// `as` saturates for coordinates beyond `i32` (NaN becomes 0); the arm
// offsets saturate as well.
fn draw_mark<S: Surface>(surface: &mut S, p: Point2<f64>, color: S::Color) {
    let x = p.x as i32;
    let y = p.y as i32;
    let half = MARK_LEN / 2;
    for i in 0..MARK_LEN {
        surface.set(x.saturating_sub(half).saturating_add(i), y, color);
    }
    for i in 0..MARK_LEN {
        surface.set(x, y.saturating_sub(half).saturating_add(i), color);
    }
}
