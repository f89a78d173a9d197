//! Bright-pixel point cloud for the frontend face animation.
//!
//! The source image is shrunk to a fixed width, turned to grayscale, and every
//! pixel brighter than [`BRIGHTNESS_THRESHOLD`] becomes one point. Points are
//! centered on the image midpoint and divided by the larger dimension, so the
//! cloud keeps the aspect ratio of the picture.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use image::{DynamicImage, GenericImageView, GrayImage, Luma, imageops::FilterType};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::ExtractError;

pub const TARGET_WIDTH: u32 = 120;
pub const BRIGHTNESS_THRESHOLD: u8 = 50;
pub const DEFAULT_INPUT: &str = "image.png";
pub const DEFAULT_OUTPUT: &str = "mudo-frontend/face_points.json";

/// Normalized `(x, y)`, written to JSON as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point(pub f64, pub f64);

impl Point {
    pub fn x(&self) -> f64 {
        self.0
    }

    pub fn y(&self) -> f64 {
        self.1
    }
}

/// Ties go to the even digit, so `0.40625` becomes `0.4062`.
fn round4(v: f64) -> f64 {
    (v * 10_000.0).round_ties_even() / 10_000.0
}

/// ITU-R 601-2 luma in 16-bit fixed point, rounded.
pub fn luma(rgb: [u8; 3]) -> u8 {
    let [r, g, b] = rgb.map(u32::from);
    ((r * 19_595 + g * 38_470 + b * 7_471 + 0x8000) >> 16) as u8
}

fn to_gray(img: &DynamicImage) -> GrayImage {
    let rgb = img.to_rgb8();
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        Luma([luma(rgb.get_pixel(x, y).0)])
    })
}

/// Size after scaling to [`TARGET_WIDTH`]. Height is truncated like an
/// integer cast and never drops below one row.
pub fn target_size(width: u32, height: u32) -> (u32, u32) {
    let aspect = height as f64 / width as f64;
    let target_height = (TARGET_WIDTH as f64 * aspect) as u32;
    (TARGET_WIDTH, target_height.max(1))
}

pub fn extract_points(img: &DynamicImage) -> Vec<Point> {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Vec::new();
    }

    let (tw, th) = target_size(w, h);
    let gray = to_gray(&img.resize_exact(tw, th, FilterType::CatmullRom));

    let (width, height) = (gray.width() as f64, gray.height() as f64);
    let max_dim = width.max(height);

    gray.enumerate_pixels()
        .filter(|(_, _, px)| px.0[0] > BRIGHTNESS_THRESHOLD)
        .map(|(x, y, _)| {
            Point(
                round4((x as f64 - width / 2.0) / max_dim),
                round4((y as f64 - height / 2.0) / max_dim),
            )
        })
        .collect()
}

pub fn write_points(path: &Path, points: &[Point]) -> Result<(), ExtractError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, points)?;
    writer.flush()?;
    Ok(())
}

pub fn try_run(input: &Path, output: &Path) -> Result<usize, ExtractError> {
    if !input.exists() {
        return Err(ExtractError::MissingInput(input.to_path_buf()));
    }
    let img = image::open(input)?;
    let points = extract_points(&img);
    write_points(output, &points)?;
    Ok(points.len())
}

/// Batch entry point. Failures are logged and reported as `None`; the output
/// file is left alone unless the image was read successfully.
pub fn run(input: &Path, output: &Path) -> Option<usize> {
    match try_run(input, output) {
        Ok(count) => {
            info!("Successfully wrote {} points to {}", count, output.display());
            Some(count)
        }
        Err(e @ ExtractError::MissingInput(_)) => {
            warn!("{}", e);
            None
        }
        Err(e) => {
            error!("{}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn uniform(width: u32, height: u32, value: u8) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([value; 3])))
    }

    #[test]
    fn black_image_has_no_points() {
        assert!(extract_points(&uniform(300, 200, 0)).is_empty());
    }

    #[test]
    fn white_image_fills_the_grid() {
        let points = extract_points(&uniform(240, 120, 255));
        assert_eq!(points.len(), 120 * 60);
        assert!(points.iter().all(|p| (-0.5..=0.5).contains(&p.x())));
        assert!(points.iter().all(|p| (-0.5..=0.5).contains(&p.y())));
    }

    #[test]
    fn points_are_row_major() {
        let points = extract_points(&uniform(120, 120, 255));
        assert_eq!(points[0], Point(-0.5, -0.5));
        assert_eq!(points[1], Point(round4(-59.0 / 120.0), -0.5));
        assert_eq!(points[120], Point(-0.5, round4(-59.0 / 120.0)));
        assert_eq!(*points.last().unwrap(), Point(round4(59.0 / 120.0), round4(59.0 / 120.0)));
    }

    #[test]
    fn threshold_is_strict() {
        assert!(extract_points(&uniform(120, 60, BRIGHTNESS_THRESHOLD)).is_empty());
        assert_eq!(extract_points(&uniform(120, 60, BRIGHTNESS_THRESHOLD + 1)).len(), 120 * 60);
    }

    #[test]
    fn single_bright_pixel_is_found() {
        let mut img = GrayImage::from_pixel(120, 60, Luma([0]));
        img.put_pixel(90, 15, Luma([255]));
        let points = extract_points(&DynamicImage::ImageLuma8(img));
        assert_eq!(points, vec![Point(0.25, -0.125)]);
    }

    #[test]
    fn target_height_truncates() {
        assert_eq!(target_size(240, 120), (120, 60));
        assert_eq!(target_size(100, 75), (120, 90));
        assert_eq!(target_size(7, 10), (120, 171));
        assert_eq!(target_size(10_000, 10), (120, 1));
    }

    #[test]
    fn coordinates_have_four_decimals() {
        assert_eq!(round4(1.0 / 3.0), 0.3333);
        assert_eq!(round4(-0.491_666), -0.4917);
    }

    #[test]
    fn exact_ties_round_to_even() {
        assert_eq!(round4(0.40625), 0.4062);
        assert_eq!(round4(-0.40625), -0.4062);
        assert_eq!(round4(0.03125), 0.0312);
        assert_eq!(round4(0.21875), 0.2188);
    }

    #[test]
    fn tall_image_rows_round_to_even() {
        let points = extract_points(&uniform(120, 576, 255));
        assert_eq!(points.len(), 120 * 576);
        // Row 522 sits at 234 / 576 = 0.40625.
        assert_eq!(points[522 * 120].y(), 0.4062);
    }

    #[test]
    fn luma_uses_601_weights() {
        assert_eq!(luma([255, 255, 255]), 255);
        assert_eq!(luma([0, 0, 0]), 0);
        assert_eq!(luma([200, 0, 0]), 60);
        assert_eq!(luma([0, 0, 255]), 29);
        assert_eq!(luma([0, 100, 0]), 59);
        assert_eq!(luma([77, 77, 77]), 77);
    }

    #[test]
    fn saturated_red_is_bright_enough() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(120, 60, Rgb([200, 0, 0])));
        assert_eq!(extract_points(&img).len(), 120 * 60);
    }

    #[test]
    fn saturated_blue_is_dropped() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(120, 60, Rgb([0, 0, 255])));
        assert!(extract_points(&img).is_empty());
    }

    #[test]
    fn point_serializes_as_pair() {
        let json = serde_json::to_string(&vec![Point(0.1, -0.25)]).unwrap();
        assert_eq!(json, "[[0.1,-0.25]]");
    }
}
