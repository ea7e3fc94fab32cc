//! Detect tag36h11 markers in an image, print them as JSON and write an
//! overlay PNG.
//!
//! ```text
//! cargo run -p tagsight --example detect_tags -- tags.png [overlay.png]
//! ```
//!
//! Without an input path a synthetic scene with three tags is used. Set
//! `TAGSIGHT_LOG=debug` for per-call engine logs.

use std::{env, path::PathBuf};

use image::{DynamicImage, GrayImage, Luma, Rgb};
use log::info;
use tagsight::{draw_findings, normalize_to_grayscale, Detector};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let mut args = env::args().skip(1);
    let input = args.next().map(PathBuf::from);
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tagsight_overlay.png"));

    let img = match &input {
        Some(path) => image::open(path)?,
        None => DynamicImage::ImageLuma8(synthetic_scene()?),
    };
    info!("input {}x{}", img.width(), img.height());

    let gray = normalize_to_grayscale(&img)?;
    let mut detector = Detector::create()?;
    let findings = detector.find(&gray.view()?)?;
    detector.close();

    println!("{}", serde_json::to_string_pretty(&findings)?);

    let mut overlay = img.to_rgb8();
    draw_findings(&mut overlay, &findings, Rgb([255, 0, 0]), Rgb([0, 255, 0]));
    overlay.save(&output)?;
    info!("wrote overlay to {}", output.display());

    Ok(())
}

fn init_logging() {
    #[cfg(feature = "tracing")]
    tagsight::init_tracing(false);
    #[cfg(not(feature = "tracing"))]
    {
        // level from TAGSIGHT_LOG, `info` when unset
        let _ = tagsight::core::init_from_env();
    }
}

fn synthetic_scene() -> Result<GrayImage, Box<dyn std::error::Error>> {
    let mut canvas = GrayImage::from_pixel(480, 320, Luma([235]));
    for (id, x0, y0) in [(0u32, 30u32, 40u32), (17, 190, 90), (230, 340, 30)] {
        let tag = tagsight_engine::render_tag(id, 12).ok_or("unknown tag id")?;
        let view = tag.view();
        for y in 0..tag.height() {
            for (x, &v) in view.row(y).iter().enumerate() {
                canvas.put_pixel(x0 + x as u32, y0 + y as u32, Luma([v]));
            }
        }
    }
    Ok(canvas)
}
