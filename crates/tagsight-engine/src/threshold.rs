//! Binarization helpers: the image-wide adaptive mask and the per-tag Otsu
//! threshold used while reading cells.

use tagsight_core::GrayImageView;

/// Window radius used when `threshold_radius` is 0.
pub(crate) fn auto_radius(width: usize, height: usize) -> usize {
    (width.min(height) / 16).clamp(4, 64)
}

/// Mark pixels darker than their local mean by more than `offset`.
///
/// The mean is taken over a `(2r+1)^2` window clipped to the image and
/// computed from an integral image, so the cost is independent of `r`.
/// A uniform image yields an all-false mask.
pub(crate) fn adaptive_dark_mask(img: &GrayImageView<'_>, radius: usize, offset: u8) -> Vec<bool> {
    let (w, h) = (img.width(), img.height());
    let iw = w + 1;
    let mut integral = vec![0u64; iw * (h + 1)];
    for y in 0..h {
        let mut row_sum = 0u64;
        for (x, &v) in img.row(y).iter().enumerate() {
            row_sum += v as u64;
            integral[(y + 1) * iw + x + 1] = integral[y * iw + x + 1] + row_sum;
        }
    }

    let offset = offset as u64;
    let mut mask = vec![false; w * h];
    for y in 0..h {
        let y0 = y.saturating_sub(radius);
        let y1 = (y + radius + 1).min(h);
        for (x, &v) in img.row(y).iter().enumerate() {
            let x0 = x.saturating_sub(radius);
            let x1 = (x + radius + 1).min(w);
            let area = ((x1 - x0) * (y1 - y0)) as u64;
            let sum = integral[y1 * iw + x1] + integral[y0 * iw + x0]
                - integral[y0 * iw + x1]
                - integral[y1 * iw + x0];
            // v < mean - offset, kept in integers
            mask[y * w + x] = (v as u64 + offset) * area < sum;
        }
    }
    mask
}

/// Otsu threshold over a set of sample intensities.
pub(crate) fn otsu_threshold_from_samples(samples: &[u8]) -> u8 {
    if samples.is_empty() {
        return 127;
    }

    let (min_v, max_v) = samples
        .iter()
        .fold((u8::MAX, u8::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if min_v == max_v {
        return min_v;
    }

    let mut hist = [0u32; 256];
    for &v in samples {
        hist[v as usize] += 1;
    }
    if hist.iter().filter(|&&h| h > 0).count() <= 2 {
        return ((min_v as u16 + max_v as u16 + 1) / 2) as u8;
    }

    let total = samples.len() as f64;
    let sum_total: f64 = hist
        .iter()
        .enumerate()
        .map(|(i, &h)| i as f64 * h as f64)
        .sum();

    let mut sum_b = 0f64;
    let mut w_b = 0f64;
    let mut best_var = -1f64;
    let mut best_t = 127u8;

    for (t, &h) in hist.iter().enumerate() {
        w_b += h as f64;
        if w_b < 1.0 {
            continue;
        }
        let w_f = total - w_b;
        if w_f < 1.0 {
            break;
        }

        sum_b += t as f64 * h as f64;
        let m_b = sum_b / w_b;
        let m_f = (sum_total - sum_b) / w_f;

        let var_between = w_b * w_f * (m_b - m_f) * (m_b - m_f);
        if var_between > best_var {
            best_var = var_between;
            // samples at or below `t` form the dark class
            best_t = (t as u8).saturating_add(1);
        }
    }

    best_t
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagsight_core::GrayImage;

    #[test]
    fn uniform_image_has_no_dark_pixels() {
        let img = GrayImage::filled(32, 24, 128).expect("valid");
        let mask = adaptive_dark_mask(&img.view(), 5, 10);
        assert!(mask.iter().all(|&d| !d));
    }

    #[test]
    fn dark_square_on_white_is_marked() {
        let mut img = GrayImage::filled(40, 40, 230).expect("valid");
        for y in 10..20 {
            for x in 10..20 {
                img.set(x, y, 20);
            }
        }
        let mask = adaptive_dark_mask(&img.view(), 8, 10);
        assert!(mask[15 * 40 + 15]);
        assert!(mask[10 * 40 + 10]);
        assert!(!mask[5 * 40 + 5]);
        assert!(!mask[15 * 40 + 25]);
    }

    #[test]
    fn otsu_splits_bimodal_samples() {
        let mut samples = vec![20u8; 30];
        samples.extend(std::iter::repeat_n(25u8, 10));
        samples.extend(std::iter::repeat_n(220u8, 40));
        samples.extend(std::iter::repeat_n(210u8, 5));
        let t = otsu_threshold_from_samples(&samples);
        assert!(t > 25 && t <= 210, "threshold {t}");
    }

    #[test]
    fn otsu_two_levels_uses_midpoint() {
        let t = otsu_threshold_from_samples(&[0, 0, 255, 255]);
        assert_eq!(t, 128);
        assert_eq!(otsu_threshold_from_samples(&[9, 9, 9]), 9);
    }
}
