//! Strided 8-bit grayscale rasters.
//!
//! Every constructor checks the layout invariant `stride >= width` and
//! `data.len() >= stride * height`, so downstream code (the raster bridge,
//! the engine) can index rows without re-validating.

/// Layout violations detected while building a grayscale raster.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageError {
    #[error("image has no pixels (width={width}, height={height})")]
    Empty { width: usize, height: usize },

    #[error("row stride {stride} is smaller than the image width {width}")]
    StrideTooSmall { stride: usize, width: usize },

    #[error("pixel buffer too small (expected at least {expected} bytes, got {got})")]
    BufferTooSmall { expected: usize, got: usize },

    #[error("image dimensions overflow (stride={stride}, height={height})")]
    Overflow { stride: usize, height: usize },
}

/// Check a `(width, height, stride)` layout against a buffer length.
///
/// Returns the number of bytes the layout addresses (`stride * height`).
pub fn check_layout(
    width: usize,
    height: usize,
    stride: usize,
    len: usize,
) -> Result<usize, ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::Empty { width, height });
    }
    if stride < width {
        return Err(ImageError::StrideTooSmall { stride, width });
    }
    let expected = stride
        .checked_mul(height)
        .ok_or(ImageError::Overflow { stride, height })?;
    if len < expected {
        return Err(ImageError::BufferTooSmall { expected, got: len });
    }
    Ok(expected)
}

/// Borrowed grayscale raster.
#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    width: usize,
    height: usize,
    stride: usize,
    data: &'a [u8],
}

impl<'a> GrayImageView<'a> {
    pub fn new(
        width: usize,
        height: usize,
        stride: usize,
        data: &'a [u8],
    ) -> Result<Self, ImageError> {
        check_layout(width, height, stride, data.len())?;
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    /// View over a tightly packed buffer (`stride == width`).
    pub fn packed(width: usize, height: usize, data: &'a [u8]) -> Result<Self, ImageError> {
        Self::new(width, height, width, data)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The whole backing slice, including any row padding.
    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Bytes addressed by the layout: `stride * height`.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.stride * self.height
    }

    /// The `width` visible pixels of row `y`.
    #[inline]
    pub fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.stride + x]
    }

    /// Pixel lookup that reads outside the image as black.
    #[inline]
    pub fn get_or_black(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return 0;
        }
        self.get(x as usize, y as usize)
    }

    /// Copy into an owned, tightly packed image.
    pub fn to_packed(&self) -> GrayImage {
        let mut data = Vec::with_capacity(self.width * self.height);
        for y in 0..self.height {
            data.extend_from_slice(self.row(y));
        }
        GrayImage {
            width: self.width,
            height: self.height,
            stride: self.width,
            data,
        }
    }
}

/// Owned grayscale raster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    width: usize,
    height: usize,
    stride: usize,
    data: Vec<u8>,
}

impl GrayImage {
    /// Packed image filled with a constant intensity.
    pub fn filled(width: usize, height: usize, value: u8) -> Result<Self, ImageError> {
        let len = check_layout(width, height, width, usize::MAX)?;
        Ok(Self {
            width,
            height,
            stride: width,
            data: vec![value; len],
        })
    }

    pub fn from_raw(
        width: usize,
        height: usize,
        stride: usize,
        data: Vec<u8>,
    ) -> Result<Self, ImageError> {
        check_layout(width, height, stride, data.len())?;
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        self.data[y * self.stride + x] = value;
    }

    #[inline]
    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            stride: self.stride,
            data: &self.data,
        }
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

/// Bilinear sample; pixels outside the image read as black.
#[inline]
pub fn sample_bilinear(src: &GrayImageView<'_>, x: f32, y: f32) -> f32 {
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = src.get_or_black(x0, y0) as f32;
    let p10 = src.get_or_black(x0 + 1, y0) as f32;
    let p01 = src.get_or_black(x0, y0 + 1) as f32;
    let p11 = src.get_or_black(x0 + 1, y0 + 1) as f32;

    let a = p00 + fx * (p10 - p00);
    let b = p01 + fx * (p11 - p01);
    a + fy * (b - a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_short_layouts() {
        assert_eq!(
            GrayImageView::packed(0, 4, &[]).unwrap_err(),
            ImageError::Empty {
                width: 0,
                height: 4
            }
        );
        assert_eq!(
            GrayImageView::new(4, 2, 3, &[0; 8]).unwrap_err(),
            ImageError::StrideTooSmall {
                stride: 3,
                width: 4
            }
        );
        assert_eq!(
            GrayImageView::new(4, 2, 6, &[0; 10]).unwrap_err(),
            ImageError::BufferTooSmall {
                expected: 12,
                got: 10
            }
        );
    }

    #[test]
    fn strided_rows_skip_padding() {
        // 3x2 image with one padding byte per row.
        let data = [1, 2, 3, 99, 4, 5, 6, 99];
        let view = GrayImageView::new(3, 2, 4, &data).expect("valid layout");
        assert_eq!(view.row(0), &[1, 2, 3]);
        assert_eq!(view.row(1), &[4, 5, 6]);
        assert_eq!(view.get(2, 1), 6);
        assert_eq!(view.byte_len(), 8);

        let packed = view.to_packed();
        assert_eq!(packed.stride(), 3);
        assert_eq!(packed.data(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn bilinear_interpolates_between_pixels() {
        let img = GrayImage::from_raw(2, 1, 2, vec![0, 100]).expect("valid layout");
        let v = sample_bilinear(&img.view(), 0.5, 0.0);
        assert!((v - 50.0).abs() < 1e-4);
        assert_eq!(img.view().get_or_black(-1, 0), 0);
    }
}
