//! Foreign raster buffers handed to the engine.
//!
//! The engine reads pixels through a raw `ImageU8` descriptor, so every call
//! gets its own heap copy of the image. [`NativeRaster`] owns that copy and
//! frees it when dropped, whichever way the detection call exits.

use std::alloc::{self, Layout};
use std::ptr::NonNull;

use log::trace;
use tagsight_core::GrayImageView;
use tagsight_engine::ffi::ImageU8;

use crate::DetectError;

/// A single-owner byte buffer allocated outside Rust's collection types.
pub struct ForeignBuffer {
    ptr: NonNull<u8>,
    len: usize,
}

impl ForeignBuffer {
    /// Allocate `bytes.len()` bytes and copy `bytes` into them.
    pub fn copy_from(bytes: &[u8]) -> Result<Self, DetectError> {
        let len = bytes.len();
        if len == 0 {
            return Ok(Self {
                ptr: NonNull::dangling(),
                len,
            });
        }

        let layout = Layout::array::<u8>(len).map_err(|_| DetectError::Allocation {
            what: "raster buffer",
        })?;
        // SAFETY: `layout` has a non-zero size.
        let raw = unsafe { alloc::alloc(layout) };
        let ptr = NonNull::new(raw).ok_or(DetectError::Allocation {
            what: "raster buffer",
        })?;
        // SAFETY: `ptr` is a fresh allocation of `len` bytes that cannot
        // overlap `bytes`.
        unsafe { std::ptr::copy_nonoverlapping(bytes.as_ptr(), ptr.as_ptr(), len) };

        #[cfg(test)]
        live::inc();
        Ok(Self { ptr, len })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    pub fn as_slice(&self) -> &[u8] {
        // SAFETY: `ptr` is valid for `len` initialized bytes (or dangling with
        // `len == 0`).
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl Drop for ForeignBuffer {
    fn drop(&mut self) {
        if self.len == 0 {
            return;
        }
        if let Ok(layout) = Layout::array::<u8>(self.len) {
            // SAFETY: allocated in `copy_from` with this exact layout.
            unsafe { alloc::dealloc(self.ptr.as_ptr(), layout) };
            #[cfg(test)]
            live::dec();
        }
    }
}

impl std::fmt::Debug for ForeignBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForeignBuffer")
            .field("len", &self.len)
            .finish()
    }
}

/// A grayscale raster in the engine's wire layout, backed by a private copy
/// of the pixels.
#[derive(Debug)]
pub struct NativeRaster {
    descriptor: ImageU8,
    // `descriptor.buf` points into this buffer.
    buffer: ForeignBuffer,
}

impl NativeRaster {
    /// Copy `view` (all `stride * height` bytes, row padding included) into a
    /// fresh foreign buffer and describe it.
    pub fn from_gray(view: &GrayImageView<'_>) -> Result<Self, DetectError> {
        let too_large = || DetectError::RasterTooLarge {
            width: view.width(),
            height: view.height(),
            stride: view.stride(),
        };
        let width = i32::try_from(view.width()).map_err(|_| too_large())?;
        let height = i32::try_from(view.height()).map_err(|_| too_large())?;
        let stride = i32::try_from(view.stride()).map_err(|_| too_large())?;

        let mut buffer = ForeignBuffer::copy_from(&view.data()[..view.byte_len()])?;
        let descriptor = ImageU8 {
            width,
            height,
            stride,
            buf: buffer.as_mut_ptr(),
        };
        trace!(
            "raster {}x{} stride {} ({} bytes)",
            width,
            height,
            stride,
            buffer.len()
        );

        Ok(Self { descriptor, buffer })
    }

    /// Descriptor valid for as long as `self` is alive.
    #[inline]
    pub fn descriptor(&self) -> &ImageU8 {
        &self.descriptor
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.descriptor.width as usize
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.descriptor.height as usize
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.descriptor.stride as usize
    }

    /// The copied bytes, `stride * height` long.
    pub fn bytes(&self) -> &[u8] {
        self.buffer.as_slice()
    }
}

// Live-allocation counter for the leak tests; per thread so parallel tests
// do not interfere.
#[cfg(test)]
pub(crate) mod live {
    use std::cell::Cell;

    thread_local! {
        static LIVE: Cell<isize> = const { Cell::new(0) };
    }

    pub fn inc() {
        LIVE.with(|c| c.set(c.get() + 1));
    }

    pub fn dec() {
        LIVE.with(|c| c.set(c.get() - 1));
    }

    pub fn count() -> isize {
        LIVE.with(Cell::get)
    }
}
