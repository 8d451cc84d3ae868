//! Pure Rust codec backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG) | `image::load_from_memory` → `to_rgb8` |
//! | Encode → PNG | `DynamicImage::write_to` with `ImageFormat::Png` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder::new_with_quality` |
//!
//! Uploads are always decoded to three RGB channels, whatever their stored
//! color type, so every transform starts from the same shape.

use super::backend::{ImageBackend, ImagingError};
use super::params::{EncodeParams, OutputFormat};
use super::raster::{ChannelOrder, RasterImage};
use image::ImageFormat;
use image::codecs::jpeg::JpegEncoder;
use std::io::Cursor;
use std::path::Path;
use std::sync::LazyLock;

/// Upload extensions the form accepts and the decoders compiled in.
const UPLOAD_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
];

static ACCEPTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    UPLOAD_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the upload file extensions that have working decoders compiled in.
pub fn accepted_upload_extensions() -> &'static [&'static str] {
    &ACCEPTED_EXTENSIONS
}

/// Whether a path carries one of the [`accepted_upload_extensions`].
pub fn is_accepted_upload(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| {
            accepted_upload_extensions()
                .iter()
                .any(|ok| ok.eq_ignore_ascii_case(e))
        })
}

/// Pure Rust backend using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBackend for RustBackend {
    fn decode(&self, bytes: &[u8]) -> Result<RasterImage, ImagingError> {
        if bytes.is_empty() {
            return Err(ImagingError::Decode("upload is empty".into()));
        }
        let decoded =
            image::load_from_memory(bytes).map_err(|e| ImagingError::Decode(e.to_string()))?;
        log::debug!(
            "decoded {} bytes as {:?} {}x{}",
            bytes.len(),
            decoded.color(),
            decoded.width(),
            decoded.height()
        );
        RasterImage::from_color(decoded.to_rgb8(), ChannelOrder::Rgb)
    }

    fn encode(&self, image: &RasterImage, params: &EncodeParams) -> Result<Vec<u8>, ImagingError> {
        image.ensure_non_empty()?;
        let dynamic = image.to_dynamic();
        let mut buf = Vec::new();
        let result = match params.format {
            OutputFormat::Png => dynamic.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png),
            OutputFormat::Jpeg => {
                let quality = params.quality.value() as u8;
                dynamic.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality))
            }
        };
        result.map_err(|e| ImagingError::Encode(e.to_string()))?;
        log::debug!(
            "encoded {:?} as {} ({} bytes)",
            image.dimensions(),
            params.format.mime_type(),
            buf.len()
        );
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::EncodeParams;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    fn encode_png(pixels: &RgbImage) -> Vec<u8> {
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgb8(pixels.clone())
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn decodes_png_as_rgb() {
        let pixels = RgbImage::from_pixel(3, 2, Rgb([10, 20, 30]));
        let image = RustBackend::new().decode(&encode_png(&pixels)).unwrap();
        assert_eq!(image.order(), Some(ChannelOrder::Rgb));
        assert_eq!(image.dimensions().width, 3);
        assert_eq!(image.dimensions().height, 2);
        assert_eq!(&image.samples()[..3], &[10, 20, 30]);
    }

    #[test]
    fn gray_png_is_decoded_to_three_channels() {
        let mut buf = Vec::new();
        image::DynamicImage::ImageLuma8(GrayImage::from_pixel(2, 2, Luma([99])))
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        let image = RustBackend::new().decode(&buf).unwrap();
        assert_eq!(image.channels(), 3);
        assert!(image.samples().iter().all(|&s| s == 99));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let backend = RustBackend::new();
        assert!(matches!(
            backend.decode(&[0xFF, 0xFE, 0x00, 0x01]),
            Err(ImagingError::Decode(_))
        ));
        assert!(matches!(backend.decode(&[]), Err(ImagingError::Decode(_))));
    }

    #[test]
    fn png_round_trip_preserves_bgr_pixels_in_display_order() {
        let backend = RustBackend::new();
        let bgr = RasterImage::from_samples(1, 1, 3, ChannelOrder::Bgr, vec![1, 2, 3]).unwrap();
        let bytes = backend.encode(&bgr, &EncodeParams::png()).unwrap();
        let decoded = backend.decode(&bytes).unwrap();
        assert_eq!(decoded.samples(), &[3, 2, 1]);
    }

    #[test]
    fn encodes_gray_as_jpeg() {
        let gray = RasterImage::from_gray(GrayImage::from_pixel(8, 8, Luma([128]))).unwrap();
        let bytes = RustBackend::new()
            .encode(&gray, &EncodeParams::jpeg(90))
            .unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn accepted_extensions_cover_the_upload_form() {
        assert!(is_accepted_upload(Path::new("photo.JPG")));
        assert!(is_accepted_upload(Path::new("scan.png")));
        assert!(!is_accepted_upload(Path::new("clip.gif")));
        assert!(!is_accepted_upload(Path::new("noext")));
    }
}
