//! In-memory conversion between `image` crate buffers and [`Buffer`]
//!
//! No decoding happens here: callers bring already-decoded pixels.

use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage, RgbaImage};

use crate::error::{Error, Result};
use crate::models::Buffer;

fn widen(raw: &[u8], shape: &[usize]) -> Buffer {
    Buffer::from_parts(shape.to_vec(), raw.iter().map(|&v| f64::from(v)).collect())
}

impl From<&GrayImage> for Buffer {
    fn from(img: &GrayImage) -> Self {
        widen(img.as_raw(), &[img.height() as usize, img.width() as usize])
    }
}

impl From<&RgbImage> for Buffer {
    fn from(img: &RgbImage) -> Self {
        widen(img.as_raw(), &[img.height() as usize, img.width() as usize, 3])
    }
}

impl From<&RgbaImage> for Buffer {
    fn from(img: &RgbaImage) -> Self {
        widen(img.as_raw(), &[img.height() as usize, img.width() as usize, 4])
    }
}

fn narrow(samples: &[f64], scale: f64) -> Vec<u8> {
    samples
        .iter()
        .map(|&v| (v * scale).round().clamp(0.0, 255.0) as u8)
        .collect()
}

fn dims_u32(buffer: &Buffer) -> Result<(u32, u32)> {
    let to_u32 = |v: usize| {
        u32::try_from(v).map_err(|_| Error::DimensionError(format!("dimension {v} exceeds u32")))
    };
    Ok((to_u32(buffer.width())?, to_u32(buffer.height())?))
}

impl Buffer {
    /// Convert a rank 2 buffer to 8-bit grayscale.
    ///
    /// Samples are multiplied by `scale`, rounded and clamped to `0..=255`;
    /// use `255.0` for normalized filter output and `1.0` for raw pixels.
    pub fn to_luma8(&self, scale: f64) -> Result<GrayImage> {
        if self.rank() != 2 {
            return Err(Error::DimensionError(format!(
                "grayscale export needs a rank 2 buffer, got shape {:?}",
                self.shape()
            )));
        }
        let (w, h) = dims_u32(self)?;
        ImageBuffer::<Luma<u8>, Vec<u8>>::from_raw(w, h, narrow(self.data(), scale))
            .ok_or_else(|| Error::DimensionError("pixel count does not match shape".to_string()))
    }

    /// Convert a `height x width x 3` buffer to 8-bit RGB; see [`Buffer::to_luma8`]
    pub fn to_rgb8(&self, scale: f64) -> Result<RgbImage> {
        if self.rank() != 3 || self.channels() != 3 {
            return Err(Error::DimensionError(format!(
                "RGB export needs a height x width x 3 buffer, got shape {:?}",
                self.shape()
            )));
        }
        let (w, h) = dims_u32(self)?;
        ImageBuffer::<Rgb<u8>, Vec<u8>>::from_raw(w, h, narrow(self.data(), scale))
            .ok_or_else(|| Error::DimensionError("pixel count does not match shape".to_string()))
    }
}
