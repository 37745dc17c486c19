//! Path-level operations: load a carrier PNG, run the pipeline, save.

use std::path::Path;

use crate::media::image::PixelBuffer;
use crate::pipeline::{CapacityReport, HideOptions, Pipeline};
use crate::result::Result;

/// Hide a message in the image at `carrier` and write the result to `target`.
pub fn hide_file(
    carrier: &Path,
    target: &Path,
    message: &str,
    password: &str,
    options: HideOptions,
) -> Result<CapacityReport> {
    let mut buffer = PixelBuffer::from_file(carrier)?;
    let report = Pipeline::new().hide(&mut buffer, message, password, options)?;
    buffer.save_as(target)?;

    Ok(report)
}

/// Reveal the message hidden in the image at `secret`.
pub fn reveal_file(secret: &Path, password: &str) -> Result<String> {
    let buffer = PixelBuffer::from_file(secret)?;
    Pipeline::new().reveal(&buffer, password)
}

/// Bit capacity of the image at `carrier`, for pre-flight estimation.
pub fn capacity_of(carrier: &Path) -> Result<usize> {
    Ok(PixelBuffer::from_file(carrier)?.capacity_bits())
}
