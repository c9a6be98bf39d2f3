//! PNG import/export and the previous-frame warm-start artifact
//!
//! Targets load as H×W×3 float arrays in [0,1]; canvases export clamped back
//! to 8-bit RGB. The previous-frame artifact is deliberately forgiving: any
//! failure to load it simply means a cold start.

use crate::io::error::{DecomposeError, Result};
use image::RgbImage;
use ndarray::Array3;
use std::path::Path;

/// Load an image file as an H×W×3 float array with values in [0,1]
///
/// Alpha channels are dropped; grayscale sources expand to three equal
/// channels via the RGB conversion.
///
/// # Errors
///
/// Returns [`DecomposeError::ImageLoad`] when the file cannot be read or
/// decoded.
pub fn load_image(path: &Path) -> Result<Array3<f32>> {
    let rgb = image::open(path)
        .map_err(|e| DecomposeError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?
        .to_rgb8();
    Ok(rgb_to_array(&rgb))
}

/// Convert an 8-bit RGB image to a float array in [0,1]
pub fn rgb_to_array(rgb: &RgbImage) -> Array3<f32> {
    let (width, height) = rgb.dimensions();
    Array3::from_shape_fn((height as usize, width as usize, 3), |(i, j, c)| {
        f32::from(rgb.get_pixel(j as u32, i as u32).0[c]) / 255.0
    })
}

/// Convert a float canvas to an 8-bit RGB image, clamping into [0,1]
pub fn array_to_rgb(canvas: &Array3<f32>) -> RgbImage {
    let (rows, cols, _) = canvas.dim();
    RgbImage::from_fn(cols as u32, rows as u32, |x, y| {
        let pixel = |c: usize| {
            let v = canvas[[y as usize, x as usize, c]].clamp(0.0, 1.0);
            (v * 255.0).round() as u8
        };
        image::Rgb([pixel(0), pixel(1), pixel(2)])
    })
}

/// Export a canvas as a PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns [`DecomposeError::FileSystem`] when the parent directory cannot
/// be created, [`DecomposeError::ImageExport`] when encoding or writing
/// fails.
pub fn export_canvas_png(canvas: &Array3<f32>, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| DecomposeError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }
    array_to_rgb(canvas)
        .save(output_path)
        .map_err(|e| DecomposeError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}

/// Load a previously persisted canvas, if one is usable
///
/// Absent, unreadable, or undecodable artifacts all yield `None`; the
/// decomposer's cold-start branch handles the rest (including a shape
/// mismatch against the target). This is the tolerant read of a
/// collaborator-owned artifact, not an error path.
pub fn load_previous_canvas(path: &Path) -> Option<Array3<f32>> {
    let decoded = image::open(path).ok()?;
    Some(rgb_to_array(&decoded.to_rgb8()))
}
