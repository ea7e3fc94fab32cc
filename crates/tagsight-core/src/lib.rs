//! Core types shared by the `tagsight-*` workspace.
//!
//! This crate is intentionally small: strided grayscale rasters, the
//! four-point homography used to sample tag cells, and a minimal logger.
//! It does *not* depend on any image-decoding crate.

mod homography;
mod image;
mod logger;

pub use homography::{homography_from_4pt, Homography};
pub use image::{check_layout, sample_bilinear, GrayImage, GrayImageView, ImageError};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_from_env, init_with_level, level_from_str, LOG_ENV_VAR};
