// Screenshot capture
//
// Writes the current front frame buffer to a timestamped PNG.

use crate::ppu::frame::{FrameBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors from screenshot capture
#[derive(Debug)]
pub enum ScreenshotError {
    /// I/O error creating the directory or file
    Io(io::Error),

    /// PNG encoding error
    PngEncoding(png::EncodingError),
}

impl std::fmt::Display for ScreenshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenshotError::Io(e) => write!(f, "I/O error: {}", e),
            ScreenshotError::PngEncoding(e) => write!(f, "PNG encoding error: {}", e),
        }
    }
}

impl std::error::Error for ScreenshotError {}

impl From<io::Error> for ScreenshotError {
    fn from(e: io::Error) -> Self {
        ScreenshotError::Io(e)
    }
}

impl From<png::EncodingError> for ScreenshotError {
    fn from(e: png::EncodingError) -> Self {
        ScreenshotError::PngEncoding(e)
    }
}

/// Save the frame buffer as a PNG under `directory/<rom name>/`
///
/// Returns the path of the written file.
pub fn save_screenshot(
    frame: &FrameBuffer,
    directory: &Path,
    rom_path: Option<&Path>,
) -> Result<PathBuf, ScreenshotError> {
    let target_dir = match rom_path.and_then(|p| p.file_stem()) {
        Some(stem) => directory.join(stem),
        None => directory.join("default"),
    };
    fs::create_dir_all(&target_dir)?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let file_path = target_dir.join(format!("screenshot_{}.png", timestamp));

    let file = fs::File::create(&file_path)?;
    let mut encoder = png::Encoder::new(
        io::BufWriter::new(file),
        SCREEN_WIDTH as u32,
        SCREEN_HEIGHT as u32,
    );
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(frame.data())?;

    Ok(file_path)
}
