//! The carrier image abstraction.
//!
//! Everything above this module works on a [`PixelBuffer`]: an owned slab of
//! interleaved RGBA bytes. PNG container parsing stays behind `from_file` /
//! `save_as`, the embedding code never sees it.

use std::path::Path;

use image::RgbaImage;

use crate::error::StegError;
use crate::result::Result;

pub mod lsb;

pub use lsb::{embed, extract, WritePlan};

/// Owned, mutable RGBA pixel data of a carrier image.
///
/// Invariant: `data.len() == width * height * 4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn from_image(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            data: image.into_raw(),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        // a missing or unreadable path is an io failure, not a broken image
        std::fs::File::open(path.as_ref()).map_err(|source| StegError::ReadError { source })?;

        let image = image::open(path.as_ref())
            .map_err(|_| StegError::InvalidImageMedia)?
            .to_rgba8();

        Ok(Self::from_image(image))
    }

    pub fn save_as(&self, path: impl AsRef<Path>) -> Result<()> {
        image::save_buffer(
            path.as_ref(),
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
        )
        .map_err(|err| match err {
            image::ImageError::IoError(source) => StegError::WriteError { source },
            _ => StegError::ImageEncodingError,
        })
    }

    pub fn into_image(self) -> RgbaImage {
        RgbaImage::from_raw(self.width, self.height, self.data)
            .expect("pixel buffer invariant broken: data length != width * height * 4")
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Number of embeddable bits: 3 candidate channels (R, G, B) per pixel.
    pub fn capacity_bits(&self) -> usize {
        self.data.len() / 4 * 3
    }
}
