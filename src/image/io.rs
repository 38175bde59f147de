//! I/O helpers for RGB images and JSON.
//!
//! - `load_rgb_image`: read a PNG/JPEG/etc. into an owned 8-bit RGB buffer.
//! - `resize_by_fraction`: shrink an owned buffer by an integer-like fraction.
//! - `list_images`: collect image files with a given extension in a folder.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::ImageRgb8;
use image::imageops::{self, FilterType};
use image::RgbImage;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Owned 8-bit RGB buffer with borrowed view conversion.
#[derive(Clone, Debug)]
pub struct RgbImageU8 {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbImageU8 {
    /// Construct an owned, tightly packed RGB buffer given raw bytes.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, String> {
        if data.len() != width * height * ImageRgb8::CHANNELS {
            return Err(format!(
                "RGB buffer length {} does not match {}x{}",
                data.len(),
                width,
                height
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_view(&self) -> ImageRgb8<'_> {
        ImageRgb8::packed(self.width, self.height, &self.data)
    }
}

/// Load an image from disk and convert to 8-bit RGB.
pub fn load_rgb_image(path: &Path) -> Result<RgbImageU8, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    RgbImageU8::new(width, height, img.into_raw())
}

/// Shrink `source` to `(w / fraction, h / fraction)` with area-style filtering.
///
/// A fraction `<= 1` returns the image unchanged.
pub fn resize_by_fraction(source: &RgbImageU8, fraction: f32) -> Result<RgbImageU8, String> {
    if !fraction.is_finite() || fraction <= 1.0 {
        return Ok(source.clone());
    }
    let target_w = ((source.width as f32 / fraction) as u32).max(1);
    let target_h = ((source.height as f32 / fraction) as u32).max(1);
    let buffer = RgbImage::from_raw(
        source.width as u32,
        source.height as u32,
        source.data.clone(),
    )
    .ok_or_else(|| "Failed to create image buffer".to_string())?;
    let resized = imageops::resize(&buffer, target_w, target_h, FilterType::Triangle);
    RgbImageU8::new(target_w as usize, target_h as usize, resized.into_raw())
}

/// Files in `dir` whose name ends with `extension`, sorted by name.
pub fn list_images(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, String> {
    let entries =
        fs::read_dir(dir).map_err(|e| format!("Failed to read dir {}: {e}", dir.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| format!("Failed to read dir {}: {e}", dir.display()))?;
        let path = entry.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(extension));
        if path.is_file() && matches {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
