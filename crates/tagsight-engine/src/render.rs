//! Synthetic tag36h11 markers.

use tagsight_core::GrayImage;

use crate::builtins::TAG36H11;

/// White cells around the black border.
pub const QUIET_CELLS: usize = 1;

/// Render tag36h11 marker `id` with `px_per_cell` pixels per cell.
///
/// The image is `(6 + 2 + 2 * QUIET_CELLS) * px_per_cell` pixels square: a
/// white quiet zone, the black border, then the payload cells, laid out as
/// AprilTag's own renderer draws them.
/// Returns `None` for unknown ids or a zero cell size.
pub fn render_tag(id: u32, px_per_cell: usize) -> Option<GrayImage> {
    let code = TAG36H11.grid_code(id)?;
    if px_per_cell == 0 {
        return None;
    }

    let bits = TAG36H11.marker_size;
    let cells = bits + 2 + 2 * QUIET_CELLS;
    let side = cells * px_per_cell;
    let mut img = GrayImage::filled(side, side, 255).ok()?;

    for cy in 0..cells {
        for cx in 0..cells {
            let Some(black) = cell_is_black(code, bits, cx, cy) else {
                continue;
            };
            if !black {
                continue;
            }
            for yy in 0..px_per_cell {
                for xx in 0..px_per_cell {
                    img.set(cx * px_per_cell + xx, cy * px_per_cell + yy, 0);
                }
            }
        }
    }

    Some(img)
}

// `None` for quiet-zone cells.
fn cell_is_black(code: u64, bits: usize, cx: usize, cy: usize) -> Option<bool> {
    let last = bits + 2 * QUIET_CELLS + 1;
    if cx < QUIET_CELLS || cy < QUIET_CELLS || cx > last - QUIET_CELLS || cy > last - QUIET_CELLS {
        return None;
    }
    let (gx, gy) = (cx - QUIET_CELLS, cy - QUIET_CELLS);
    if gx == 0 || gy == 0 || gx == bits + 1 || gy == bits + 1 {
        return Some(true);
    }
    let idx = (gy - 1) * bits + (gx - 1);
    Some((code >> idx) & 1 == 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_has_quiet_zone_border_and_payload() {
        let px = 4;
        let img = render_tag(0, px).expect("id 0 exists");
        assert_eq!(img.width(), 10 * px);

        let view = img.view();
        // quiet zone
        assert_eq!(view.get(1, 1), 255);
        // border cell (1, 1)
        assert_eq!(view.get(px + 1, px + 1), 0);

        // published layout: bit i at (bit_x, bit_y) of the 8x8 grid, MSB
        // first, white when set
        let code = TAG36H11.code(0).expect("id 0");
        for i in 0..36 {
            let gx = TAG36H11.bit_x[i] as usize + QUIET_CELLS;
            let gy = TAG36H11.bit_y[i] as usize + QUIET_CELLS;
            let white = (code >> (35 - i)) & 1 == 1;
            let v = view.get(gx * px + px / 2, gy * px + px / 2);
            assert_eq!(v, if white { 255 } else { 0 }, "bit {i}");
        }
    }

    #[test]
    fn unknown_id_or_zero_cell_is_rejected() {
        assert!(render_tag(587, 4).is_none());
        assert!(render_tag(3, 0).is_none());
    }
}
