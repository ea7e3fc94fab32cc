//! Bundled tag36h11 detection engine.
//!
//! The engine is meant to be driven through [`ffi`], a C-ABI surface shaped
//! like the AprilTag C library: callers own raw family, detector and result
//! pointers and release them explicitly. The Rust types behind those
//! pointers are public so that tests and benchmarks can poke at them.
//!
//! ```
//! use tagsight_engine::{render_tag, DetectorConfig, TagDetector, TagFamily};
//!
//! let family = TagFamily::tag36h11();
//! let mut detector = TagDetector::new(DetectorConfig::default());
//! // SAFETY: `family` outlives `detector`.
//! assert!(unsafe { detector.add_family(&family) });
//!
//! let tag = render_tag(3, 8).unwrap();
//! let records = detector.detect(&tag.view());
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].id, 3);
//! ```

pub mod builtins;
mod config;
mod decode;
mod detector;
mod dictionary;
pub mod ffi;
mod matcher;
mod quad;
mod render;
mod threshold;

pub use config::DetectorConfig;
pub use detector::{TagDetector, TagFamily, TagRecord};
pub use dictionary::Dictionary;
pub use matcher::{rotate_code, Match, Matcher};
pub use render::{render_tag, QUIET_CELLS};
