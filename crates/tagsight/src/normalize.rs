//! Grayscale normalization of caller images.

use image::{DynamicImage, GenericImageView, Pixel};
use tagsight_core::{GrayImageView, ImageError};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::DetectError;

/// A grayscale image that is either the caller's own buffer or a converted copy.
#[derive(Debug)]
pub enum Normalized<'a> {
    /// The input already was 8-bit luma; no pixels were copied.
    Borrowed(&'a image::GrayImage),
    Owned(image::GrayImage),
}

impl Normalized<'_> {
    pub fn as_image(&self) -> &image::GrayImage {
        match self {
            Self::Borrowed(img) => img,
            Self::Owned(img) => img,
        }
    }

    pub fn is_borrowed(&self) -> bool {
        matches!(self, Self::Borrowed(_))
    }

    /// Raster view for [`crate::Detector::find`].
    pub fn view(&self) -> Result<GrayImageView<'_>, ImageError> {
        gray_view(self.as_image())
    }
}

/// View an `image::GrayImage` as a packed `tagsight-core` raster.
pub fn gray_view(img: &image::GrayImage) -> Result<GrayImageView<'_>, ImageError> {
    GrayImageView::packed(img.width() as usize, img.height() as usize, img.as_raw())
}

/// Bring any decoded image into 8-bit grayscale.
///
/// `ImageLuma8` input is returned borrowed. Everything else goes through
/// [`grayscale_from_pixels`] (16-bit and float images are first reduced to
/// 8-bit RGBA).
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(img), fields(w = img.width(), h = img.height()))
)]
pub fn normalize_to_grayscale(img: &DynamicImage) -> Result<Normalized<'_>, DetectError> {
    if img.width() == 0 || img.height() == 0 {
        return Err(ImageError::Empty {
            width: img.width() as usize,
            height: img.height() as usize,
        }
        .into());
    }

    let gray = match img {
        DynamicImage::ImageLuma8(gray) => return Ok(Normalized::Borrowed(gray)),
        DynamicImage::ImageLumaA8(buf) => grayscale_from_pixels(buf)?,
        DynamicImage::ImageRgb8(buf) => grayscale_from_pixels(buf)?,
        DynamicImage::ImageRgba8(buf) => grayscale_from_pixels(buf)?,
        other => grayscale_from_pixels(&other.to_rgba8())?,
    };
    Ok(Normalized::Owned(gray))
}

/// Convert any 8-bit image to luma with BT.601 weights on alpha-premultiplied
/// channels: `Y = (19595 R + 38470 G + 7471 B + 32768) >> 16`.
pub fn grayscale_from_pixels<I, P>(img: &I) -> Result<image::GrayImage, DetectError>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = u8>,
{
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(ImageError::Empty {
            width: w as usize,
            height: h as usize,
        }
        .into());
    }

    let mut out = image::GrayImage::new(w, h);
    for (x, y, px) in img.pixels() {
        let [r, g, b, a] = px.to_rgba().0;
        out.put_pixel(x, y, image::Luma([luma_bt601(r, g, b, a)]));
    }
    Ok(out)
}

#[inline]
fn luma_bt601(r: u8, g: u8, b: u8, a: u8) -> u8 {
    let pm = |c: u8| (c as u32 * a as u32 + 127) / 255;
    let y = (19595 * pm(r) + 38470 * pm(g) + 7471 * pm(b) + 32768) >> 16;
    y as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, LumaA, Rgb, Rgba};

    #[test]
    fn luma8_input_is_borrowed_not_copied() {
        let gray = image::GrayImage::from_pixel(5, 4, Luma([77]));
        let ptr = gray.as_raw().as_ptr();
        let dynamic = DynamicImage::ImageLuma8(gray);

        let normalized = normalize_to_grayscale(&dynamic).expect("gray");
        assert!(normalized.is_borrowed());
        assert_eq!(normalized.as_image().as_raw().as_ptr(), ptr);
    }

    #[test]
    fn rgb_uses_bt601_weights() {
        let mut rgb = image::RgbImage::new(3, 1);
        rgb.put_pixel(0, 0, Rgb([255, 0, 0]));
        rgb.put_pixel(1, 0, Rgb([0, 255, 0]));
        rgb.put_pixel(2, 0, Rgb([255, 255, 255]));

        let dynamic = DynamicImage::ImageRgb8(rgb);
        let normalized = normalize_to_grayscale(&dynamic).expect("gray");
        assert!(!normalized.is_borrowed());
        let g = normalized.as_image();
        assert_eq!(g.get_pixel(0, 0).0[0], 76);
        assert_eq!(g.get_pixel(1, 0).0[0], 150);
        assert_eq!(g.get_pixel(2, 0).0[0], 255);
    }

    #[test]
    fn transparent_pixels_become_black() {
        let rgba = image::RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 0]));
        let g = grayscale_from_pixels(&rgba).expect("gray");
        assert!(g.pixels().all(|p| p.0[0] == 0));

        let half = image::GrayAlphaImage::from_pixel(1, 1, LumaA([200, 128]));
        let g = grayscale_from_pixels(&half).expect("gray");
        assert_eq!(g.get_pixel(0, 0).0[0], 100);
    }

    #[test]
    fn empty_image_is_rejected() {
        let empty = DynamicImage::ImageRgb8(image::RgbImage::new(0, 3));
        assert!(matches!(
            normalize_to_grayscale(&empty),
            Err(DetectError::InvalidImage(ImageError::Empty { .. }))
        ));
    }
}
