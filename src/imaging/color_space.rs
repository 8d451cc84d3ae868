//! Color-space conversions: RGB reorder, grayscale, binary threshold.

use super::backend::ImagingError;
use super::calculations::{BINARY_THRESHOLD, luma, threshold};
use super::raster::{ChannelOrder, RasterImage};
use image::{GrayImage, Luma};

/// Reorder a color buffer into RGB. An RGB buffer comes back as a copy; a
/// gray buffer is expanded into three equal channels.
pub fn to_rgb(image: &RasterImage) -> Result<RasterImage, ImagingError> {
    image.ensure_non_empty()?;
    log::debug!("to_rgb: {:?} -> rgb", image.order());
    RasterImage::from_color(image.to_rgb_pixels(), ChannelOrder::Rgb)
}

/// Reduce to a single luma channel. Gray input is returned unchanged, so
/// applying this twice equals applying it once.
pub fn to_grayscale(image: &RasterImage) -> Result<RasterImage, ImagingError> {
    image.ensure_non_empty()?;
    match image {
        RasterImage::Gray(pixels) => Ok(RasterImage::Gray(pixels.clone())),
        RasterImage::Color { order, pixels } => {
            let [ri, gi, bi] = order.rgb_indices();
            let gray = GrayImage::from_fn(pixels.width(), pixels.height(), |x, y| {
                let p = pixels.get_pixel(x, y).0;
                Luma([luma(p[ri], p[gi], p[bi])])
            });
            RasterImage::from_gray(gray)
        }
    }
}

/// Grayscale, then `255` where the sample is at least [`BINARY_THRESHOLD`]
/// and `0` elsewhere.
pub fn to_binary(image: &RasterImage) -> Result<RasterImage, ImagingError> {
    to_binary_with(image, BINARY_THRESHOLD)
}

/// [`to_binary`] with an explicit cut-off.
pub fn to_binary_with(image: &RasterImage, cutoff: u8) -> Result<RasterImage, ImagingError> {
    let gray = to_grayscale(image)?;
    Ok(gray.map_samples(|sample| threshold(sample, cutoff)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn gradient(order: ChannelOrder) -> RasterImage {
        let pixels = RgbImage::from_fn(16, 16, |x, y| {
            Rgb([(x * 16) as u8, (y * 16) as u8, ((x + y) * 8) as u8])
        });
        RasterImage::from_color(pixels, order).unwrap()
    }

    #[test]
    fn to_rgb_swaps_bgr_channels() {
        let image =
            RasterImage::from_samples(2, 1, 3, ChannelOrder::Bgr, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let rgb = to_rgb(&image).unwrap();
        assert_eq!(rgb.order(), Some(ChannelOrder::Rgb));
        assert_eq!(rgb.samples(), &[3, 2, 1, 6, 5, 4]);
    }

    #[test]
    fn to_rgb_on_rgb_is_a_copy() {
        let image = gradient(ChannelOrder::Rgb);
        assert_eq!(to_rgb(&image).unwrap(), image);
    }

    #[test]
    fn grayscale_has_one_channel() {
        let gray = to_grayscale(&gradient(ChannelOrder::Rgb)).unwrap();
        assert_eq!(gray.channels(), 1);
        assert_eq!(gray.dimensions().width, 16);
    }

    #[test]
    fn grayscale_honors_channel_order() {
        let rgb = RasterImage::from_samples(1, 1, 3, ChannelOrder::Rgb, vec![255, 0, 0]).unwrap();
        let bgr = RasterImage::from_samples(1, 1, 3, ChannelOrder::Bgr, vec![0, 0, 255]).unwrap();
        assert_eq!(to_grayscale(&rgb).unwrap().samples(), &[76]);
        assert_eq!(to_grayscale(&bgr).unwrap().samples(), &[76]);
    }

    #[test]
    fn grayscale_is_idempotent() {
        let once = to_grayscale(&gradient(ChannelOrder::Bgr)).unwrap();
        let twice = to_grayscale(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn binary_contains_only_extremes() {
        let binary = to_binary(&gradient(ChannelOrder::Rgb)).unwrap();
        assert_eq!(binary.channels(), 1);
        assert!(binary.samples().iter().all(|&s| s == 0 || s == 255));
        assert!(binary.samples().contains(&0));
        assert!(binary.samples().contains(&255));
    }

    #[test]
    fn binary_threshold_is_inclusive_at_127() {
        let image =
            RasterImage::from_samples(3, 1, 1, ChannelOrder::Rgb, vec![126, 127, 128]).unwrap();
        let binary = to_binary(&image).unwrap();
        assert_eq!(binary.samples(), &[0, 255, 255]);
    }

    #[test]
    fn binary_with_custom_cutoff() {
        let image = RasterImage::from_samples(2, 1, 1, ChannelOrder::Rgb, vec![10, 20]).unwrap();
        assert_eq!(to_binary_with(&image, 15).unwrap().samples(), &[0, 255]);
    }

    #[test]
    fn empty_buffer_is_invalid_input() {
        let empty = RasterImage::Gray(GrayImage::new(0, 0));
        assert!(matches!(to_binary(&empty), Err(ImagingError::InvalidInput(_))));
        assert!(matches!(to_rgb(&empty), Err(ImagingError::InvalidInput(_))));
    }
}
