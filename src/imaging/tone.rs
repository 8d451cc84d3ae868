//! Linear tone adjustments.
//!
//! Both adjusters work per sample, independent of position and channel, and
//! saturate at `0` and `255`.

use super::backend::ImagingError;
use super::calculations::{gain_for_level, offset_sample, scale_sample};
use super::raster::RasterImage;
use std::ops::RangeInclusive;

/// Accepted brightness offsets.
pub const BRIGHTNESS_RANGE: RangeInclusive<i32> = -100..=100;

/// Accepted contrast slider levels.
pub const CONTRAST_RANGE: RangeInclusive<i32> = -100..=100;

/// `clamp(sample + delta, 0, 255)` for every sample.
pub fn adjust_brightness(image: &RasterImage, delta: i32) -> Result<RasterImage, ImagingError> {
    image.ensure_non_empty()?;
    if !BRIGHTNESS_RANGE.contains(&delta) {
        return Err(ImagingError::InvalidInput(format!(
            "brightness {delta} is outside {}..={}",
            BRIGHTNESS_RANGE.start(),
            BRIGHTNESS_RANGE.end()
        )));
    }
    log::debug!("adjust_brightness: delta={delta}");
    Ok(image.map_samples(|sample| offset_sample(sample, delta)))
}

/// Gain for a contrast slider level: `level / 127 + 1`.
pub fn contrast_gain(level: i32) -> Result<f32, ImagingError> {
    if !CONTRAST_RANGE.contains(&level) {
        return Err(ImagingError::InvalidInput(format!(
            "contrast {level} is outside {}..={}",
            CONTRAST_RANGE.start(),
            CONTRAST_RANGE.end()
        )));
    }
    Ok(gain_for_level(level))
}

/// `clamp(round(sample * gain), 0, 255)` for every sample.
pub fn adjust_contrast(image: &RasterImage, gain: f32) -> Result<RasterImage, ImagingError> {
    image.ensure_non_empty()?;
    if !gain.is_finite() || gain < 0.0 {
        return Err(ImagingError::InvalidInput(format!(
            "contrast gain {gain} must be a finite, non-negative number"
        )));
    }
    log::debug!("adjust_contrast: gain={gain:.4}");
    Ok(image.map_samples(|sample| scale_sample(sample, gain)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::ChannelOrder;
    use image::{Rgb, RgbImage};

    const PROBES: [u8; 5] = [0, 1, 127, 254, 255];

    fn single(sample: u8) -> RasterImage {
        RasterImage::from_samples(1, 1, 1, ChannelOrder::Rgb, vec![sample]).unwrap()
    }

    #[test]
    fn brightness_matches_saturating_formula_exhaustively() {
        for delta in BRIGHTNESS_RANGE {
            for sample in PROBES {
                let out = adjust_brightness(&single(sample), delta).unwrap();
                let expected = (i32::from(sample) + delta).clamp(0, 255) as u8;
                assert_eq!(out.samples(), &[expected], "sample={sample} delta={delta}");
            }
        }
    }

    #[test]
    fn contrast_matches_rounded_formula_exhaustively() {
        for level in CONTRAST_RANGE {
            let gain = contrast_gain(level).unwrap();
            for sample in PROBES {
                let out = adjust_contrast(&single(sample), gain).unwrap();
                let expected = (f32::from(sample) * gain).round().clamp(0.0, 255.0) as u8;
                assert_eq!(out.samples(), &[expected], "sample={sample} level={level}");
            }
        }
    }

    #[test]
    fn gray_square_brightened_by_fifty() {
        let image = RasterImage::from_color(
            RgbImage::from_pixel(4, 4, Rgb([128, 128, 128])),
            ChannelOrder::Rgb,
        )
        .unwrap();
        let out = adjust_brightness(&image, 50).unwrap();
        assert_eq!(out.samples().len(), 48);
        assert!(out.samples().iter().all(|&s| s == 178));
    }

    #[test]
    fn brightness_outside_slider_range_is_rejected() {
        let image = single(128);
        assert!(matches!(
            adjust_brightness(&image, 200),
            Err(ImagingError::InvalidInput(_))
        ));
        assert!(matches!(
            adjust_brightness(&image, -101),
            Err(ImagingError::InvalidInput(_))
        ));
    }

    #[test]
    fn brightness_saturates_at_top_of_range() {
        let out = adjust_brightness(&single(254), 100).unwrap();
        assert_eq!(out.samples(), &[255]);
    }

    #[test]
    fn contrast_level_outside_range_is_rejected() {
        assert!(contrast_gain(101).is_err());
        assert!(contrast_gain(-101).is_err());
        assert_eq!(contrast_gain(0).unwrap(), 1.0);
    }

    #[test]
    fn contrast_rejects_bad_gain() {
        let image = single(10);
        assert!(adjust_contrast(&image, -0.5).is_err());
        assert!(adjust_contrast(&image, f32::NAN).is_err());
        assert!(adjust_contrast(&image, f32::INFINITY).is_err());
    }

    #[test]
    fn neutral_contrast_is_identity() {
        let image = RasterImage::from_samples(1, 2, 3, ChannelOrder::Bgr, vec![0, 50, 100, 150, 200, 255])
            .unwrap();
        assert_eq!(adjust_contrast(&image, 1.0).unwrap(), image);
    }

    #[test]
    fn adjusters_do_not_touch_input() {
        let image = single(100);
        let before = image.clone();
        let _ = adjust_brightness(&image, 40).unwrap();
        let _ = adjust_contrast(&image, 1.5).unwrap();
        assert_eq!(image, before);
    }
}
