//! Parameter types for encoding.
//!
//! These structs describe *what* the download should look like, not *how* the
//! codec produces it. They are the interface between the request layer (which
//! picks the format from config) and the [`backend`](super::backend).
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality (1–100, default 90). Clamped on construction.
//! - [`OutputFormat`]: PNG (lossless, default) or JPEG.
//! - [`EncodeParams`]: Format plus quality; quality is ignored for PNG.

use serde::{Deserialize, Serialize};

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// Encoded format of the downloadable result.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }
}

/// Parameters for one encode call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EncodeParams {
    pub format: OutputFormat,
    pub quality: Quality,
}

impl EncodeParams {
    pub fn png() -> Self {
        Self::default()
    }

    pub fn jpeg(quality: u32) -> Self {
        Self {
            format: OutputFormat::Jpeg,
            quality: Quality::new(quality),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn quality_default_is_90() {
        assert_eq!(Quality::default().value(), 90);
    }

    #[test]
    fn png_is_the_default_format() {
        let params = EncodeParams::png();
        assert_eq!(params.format, OutputFormat::Png);
        assert_eq!(params.format.extension(), "png");
        assert_eq!(params.format.mime_type(), "image/png");
    }

    #[test]
    fn jpeg_params_carry_quality() {
        let params = EncodeParams::jpeg(400);
        assert_eq!(params.format.extension(), "jpg");
        assert_eq!(params.quality.value(), 100);
    }
}
