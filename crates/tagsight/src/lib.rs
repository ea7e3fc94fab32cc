//! AprilTag 36h11 detection sessions.
//!
//! A [`Detector`] owns a tag-detection engine, copies each input image into
//! the engine's raster layout, runs detection and turns the engine's native
//! records into owned [`Finding`]s. Native memory (the per-call raster copy
//! and the result collection) is released on every exit path.
//!
//! ## Quickstart
//!
//! ```no_run
//! use tagsight::{draw_findings, normalize_to_grayscale, Detector};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = image::open("tags.png")?;
//! let gray = normalize_to_grayscale(&img)?;
//!
//! let mut detector = Detector::create()?;
//! let findings = detector.find(&gray.view()?)?;
//! for f in &findings {
//!     println!("tag {} at ({:.1}, {:.1})", f.id, f.center.x, f.center.y);
//! }
//!
//! let mut overlay = img.to_rgb8();
//! draw_findings(&mut overlay, &findings, image::Rgb([255, 0, 0]), image::Rgb([0, 255, 0]));
//! detector.close();
//! # Ok(())
//! # }
//! ```
//!
//! ## Engines
//! - [`BundledEngine`]: the pure-Rust engine from `tagsight-engine`, used by
//!   default.
//! - `LibAprilTag` (feature `libapriltag`): the AprilTag 3 C library.
//! - Anything else implementing [`TagEngine`], via [`Detector::with_engine`].

pub use tagsight_core as core;
pub use tagsight_engine::DetectorConfig;

pub mod bundled;
mod detector;
pub mod engine;
mod error;
mod finding;
#[cfg(feature = "libapriltag")]
pub mod libapriltag;
mod normalize;
mod overlay;
pub mod raster;
pub mod translate;

pub use bundled::BundledEngine;
pub use detector::{Detector, DetectorParams};
pub use engine::{RawRecord, RecordSource, TagEngine};
pub use error::DetectError;
pub use finding::Finding;
#[cfg(feature = "libapriltag")]
pub use libapriltag::LibAprilTag;
pub use normalize::{grayscale_from_pixels, gray_view, normalize_to_grayscale, Normalized};
pub use overlay::{draw_findings, Surface, MARK_LEN};

/// Install a `tracing` subscriber and forward `log` records into it.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    tagsight_core::init_tracing(json);
    // no-op when the subscriber already bridged `log`
    let _ = tracing_log::LogTracer::init();
}
