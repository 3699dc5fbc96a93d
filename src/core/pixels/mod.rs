//! # Pixels Module
//!
//! Decoded pixel input for the engine.
//!
//! A [`PixelBuffer`] owns row-major 8-bit samples with a fixed channel
//! layout. The engine never looks at channels directly: it first reduces the
//! buffer to a [`LumaPlane`] of `f64` intensities.

use crate::error::InvalidInputError;
use serde::{Deserialize, Serialize};

/// Luminance weights for red, green and blue (ITU-R BT.601).
pub const LUMA_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];

/// Sample layout of a pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channels {
    /// One intensity sample
    Gray,
    /// Intensity followed by alpha
    GrayAlpha,
    /// Red, green, blue
    Rgb,
    /// Red, green, blue, alpha
    Rgba,
}

impl Channels {
    /// Map a raw channel count to a layout
    pub fn from_count(count: u8) -> Result<Self, InvalidInputError> {
        match count {
            1 => Ok(Channels::Gray),
            2 => Ok(Channels::GrayAlpha),
            3 => Ok(Channels::Rgb),
            4 => Ok(Channels::Rgba),
            other => Err(InvalidInputError::UnsupportedChannels(other)),
        }
    }

    /// Number of bytes per pixel
    pub fn count(&self) -> u8 {
        match self {
            Channels::Gray => 1,
            Channels::GrayAlpha => 2,
            Channels::Rgb => 3,
            Channels::Rgba => 4,
        }
    }

    fn luminance(&self, pixel: &[u8]) -> f64 {
        match self {
            Channels::Gray | Channels::GrayAlpha => pixel[0] as f64,
            Channels::Rgb | Channels::Rgba => {
                LUMA_WEIGHTS[0] * pixel[0] as f64
                    + LUMA_WEIGHTS[1] * pixel[1] as f64
                    + LUMA_WEIGHTS[2] * pixel[2] as f64
            }
        }
    }
}

/// Owned, immutable decoded image.
///
/// Invariant: `data.len() == width * height * channels`, width and height > 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: Channels,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer, validating dimensions against the data length
    pub fn new(
        width: u32,
        height: u32,
        channels: Channels,
        data: Vec<u8>,
    ) -> Result<Self, InvalidInputError> {
        validate_layout(width, height, channels.count(), data.len())?;

        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Create a single-channel buffer
    pub fn gray(width: u32, height: u32, data: Vec<u8>) -> Result<Self, InvalidInputError> {
        Self::new(width, height, Channels::Gray, data)
    }

    /// Create an interleaved RGB buffer
    pub fn rgb(width: u32, height: u32, data: Vec<u8>) -> Result<Self, InvalidInputError> {
        Self::new(width, height, Channels::Rgb, data)
    }

    /// Create an interleaved RGBA buffer
    pub fn rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, InvalidInputError> {
        Self::new(width, height, Channels::Rgba, data)
    }

    /// Build a buffer by evaluating `f(x, y)` for every pixel of a gray image
    pub fn gray_from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> u8,
    ) -> Result<Self, InvalidInputError> {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self::gray(width, height, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Raw interleaved samples
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Reduce to one intensity value per pixel
    pub fn to_luma_plane(&self) -> LumaPlane {
        let stride = self.channels.count() as usize;
        let values = self
            .data
            .chunks_exact(stride)
            .map(|pixel| self.channels.luminance(pixel))
            .collect();

        LumaPlane {
            width: self.width as usize,
            height: self.height as usize,
            values,
        }
    }
}

/// Check that `len` bytes describe a `width x height` image of `channels`.
pub(crate) fn validate_layout(
    width: u32,
    height: u32,
    channels: u8,
    len: usize,
) -> Result<(), InvalidInputError> {
    if width == 0 || height == 0 {
        return Err(InvalidInputError::ZeroDimension { width, height });
    }

    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels as usize));

    match expected {
        Some(expected) if expected == len => Ok(()),
        expected => Err(InvalidInputError::LengthMismatch {
            width,
            height,
            channels,
            expected: expected.unwrap_or(usize::MAX),
            actual: len,
        }),
    }
}

/// Row-major grid of intensities
#[derive(Debug, Clone, PartialEq)]
pub struct LumaPlane {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) values: Vec<f64>,
}

impl LumaPlane {
    /// Wrap precomputed values. Returns `None` if the length does not match.
    pub fn from_values(width: usize, height: usize, values: Vec<f64>) -> Option<Self> {
        (width > 0 && height > 0 && values.len() == width * height).then_some(Self {
            width,
            height,
            values,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.values[y * self.width + x]
    }

    /// One row of the plane
    pub fn row(&self, y: usize) -> &[f64] {
        &self.values[y * self.width..(y + 1) * self.width]
    }
}
