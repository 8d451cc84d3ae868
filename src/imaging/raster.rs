//! In-memory raster buffers.
//!
//! A [`RasterImage`] is either a single-channel gray buffer or a
//! three-channel color buffer. Color buffers carry their [`ChannelOrder`]
//! explicitly: the backend decodes uploads as RGB, but callers holding
//! BGR-ordered samples (camera frames, other libraries) can wrap them as-is.
//! Encoding always writes RGB, so a BGR buffer is reordered at that boundary
//! and nowhere else.
//!
//! Width and height are never zero; every constructor checks.

use super::backend::{Dimensions, ImagingError};
use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use serde::{Deserialize, Serialize};

/// Order of the three samples within a color pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Bgr,
}

impl ChannelOrder {
    /// Positions of the red, green and blue samples within a pixel.
    pub fn rgb_indices(self) -> [usize; 3] {
        match self {
            ChannelOrder::Rgb => [0, 1, 2],
            ChannelOrder::Bgr => [2, 1, 0],
        }
    }

    /// Arrange an RGB triple in this order.
    pub fn arrange(self, rgb: [u8; 3]) -> [u8; 3] {
        let [r, g, b] = rgb;
        match self {
            ChannelOrder::Rgb => [r, g, b],
            ChannelOrder::Bgr => [b, g, r],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RasterImage {
    Gray(GrayImage),
    Color { order: ChannelOrder, pixels: RgbImage },
}

fn check_dimensions(width: u32, height: u32) -> Result<(), ImagingError> {
    if width == 0 || height == 0 {
        return Err(ImagingError::InvalidInput(format!(
            "image has zero size ({width}x{height})"
        )));
    }
    Ok(())
}

impl RasterImage {
    pub fn from_gray(pixels: GrayImage) -> Result<Self, ImagingError> {
        check_dimensions(pixels.width(), pixels.height())?;
        Ok(RasterImage::Gray(pixels))
    }

    pub fn from_color(pixels: RgbImage, order: ChannelOrder) -> Result<Self, ImagingError> {
        check_dimensions(pixels.width(), pixels.height())?;
        Ok(RasterImage::Color { order, pixels })
    }

    /// Wrap raw interleaved samples. `channels` must be 1 or 3; `order` is
    /// ignored for gray data.
    pub fn from_samples(
        width: u32,
        height: u32,
        channels: u8,
        order: ChannelOrder,
        samples: Vec<u8>,
    ) -> Result<Self, ImagingError> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize * channels as usize;
        if samples.len() != expected {
            return Err(ImagingError::InvalidInput(format!(
                "expected {expected} samples for {width}x{height}x{channels}, got {}",
                samples.len()
            )));
        }
        match channels {
            1 => GrayImage::from_raw(width, height, samples)
                .map(RasterImage::Gray)
                .ok_or_else(|| ImagingError::InvalidInput("bad gray buffer".into())),
            3 => RgbImage::from_raw(width, height, samples)
                .map(|pixels| RasterImage::Color { order, pixels })
                .ok_or_else(|| ImagingError::InvalidInput("bad color buffer".into())),
            n => Err(ImagingError::InvalidInput(format!(
                "unsupported channel count {n}"
            ))),
        }
    }

    /// Fails with `InvalidInput` if the buffer was built around the
    /// constructors with a zero dimension.
    pub fn ensure_non_empty(&self) -> Result<(), ImagingError> {
        let dims = self.dimensions();
        check_dimensions(dims.width, dims.height)
    }

    pub fn dimensions(&self) -> Dimensions {
        let (width, height) = match self {
            RasterImage::Gray(pixels) => pixels.dimensions(),
            RasterImage::Color { pixels, .. } => pixels.dimensions(),
        };
        Dimensions { width, height }
    }

    pub fn channels(&self) -> u8 {
        match self {
            RasterImage::Gray(_) => 1,
            RasterImage::Color { .. } => 3,
        }
    }

    /// Channel order of a color buffer, `None` for gray.
    pub fn order(&self) -> Option<ChannelOrder> {
        match self {
            RasterImage::Gray(_) => None,
            RasterImage::Color { order, .. } => Some(*order),
        }
    }

    pub fn is_gray(&self) -> bool {
        matches!(self, RasterImage::Gray(_))
    }

    /// Interleaved samples in buffer order.
    pub fn samples(&self) -> &[u8] {
        match self {
            RasterImage::Gray(pixels) => pixels.as_raw(),
            RasterImage::Color { pixels, .. } => pixels.as_raw(),
        }
    }

    /// Apply `f` to every sample, keeping shape and channel order.
    pub fn map_samples(&self, f: impl Fn(u8) -> u8) -> RasterImage {
        match self {
            RasterImage::Gray(pixels) => {
                let mut out = pixels.clone();
                for sample in out.iter_mut() {
                    *sample = f(*sample);
                }
                RasterImage::Gray(out)
            }
            RasterImage::Color { order, pixels } => {
                let mut out = pixels.clone();
                for sample in out.iter_mut() {
                    *sample = f(*sample);
                }
                RasterImage::Color {
                    order: *order,
                    pixels: out,
                }
            }
        }
    }

    /// Three-channel copy in RGB order; gray is replicated into all channels.
    pub fn to_rgb_pixels(&self) -> RgbImage {
        match self {
            RasterImage::Gray(pixels) => RgbImage::from_fn(pixels.width(), pixels.height(), |x, y| {
                let Luma([v]) = *pixels.get_pixel(x, y);
                Rgb([v, v, v])
            }),
            RasterImage::Color {
                order: ChannelOrder::Rgb,
                pixels,
            } => pixels.clone(),
            RasterImage::Color {
                order: ChannelOrder::Bgr,
                pixels,
            } => RgbImage::from_fn(pixels.width(), pixels.height(), |x, y| {
                let Rgb([b, g, r]) = *pixels.get_pixel(x, y);
                Rgb([r, g, b])
            }),
        }
    }

    /// Display-ready image for the codec: gray stays single-channel, color
    /// is reordered to RGB.
    pub fn to_dynamic(&self) -> DynamicImage {
        match self {
            RasterImage::Gray(pixels) => DynamicImage::ImageLuma8(pixels.clone()),
            RasterImage::Color { .. } => DynamicImage::ImageRgb8(self.to_rgb_pixels()),
        }
    }
}
