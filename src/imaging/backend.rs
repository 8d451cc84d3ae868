//! Codec backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two boundary operations every
//! backend must support: decode uploaded bytes into a [`RasterImage`] and
//! encode a [`RasterImage`] for download. The transforms in between are pure
//! functions and never touch a backend.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate's pure Rust codecs.

use super::params::EncodeParams;
use super::raster::RasterImage;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImagingError {
    #[error("Failed to decode image: {0}")]
    Decode(String),
    #[error("Failed to encode image: {0}")]
    Encode(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Upload is {size} bytes, the limit is {limit} bytes")]
    InputTooLarge { size: u64, limit: u64 },
}

/// Width and height of a raster, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for codec backends.
///
/// `Sync` so a host serving several requests can share one backend; every
/// call works on its own buffers.
pub trait ImageBackend: Sync {
    /// Decode uploaded bytes into a three-channel RGB raster.
    fn decode(&self, bytes: &[u8]) -> Result<RasterImage, ImagingError>;

    /// Encode a raster for download.
    fn encode(&self, image: &RasterImage, params: &EncodeParams) -> Result<Vec<u8>, ImagingError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::{ChannelOrder, OutputFormat};
    use image::{Rgb, RgbImage};
    use std::sync::Mutex;

    /// Mock backend that records operations without running any codec.
    #[derive(Default)]
    pub struct MockBackend {
        pub decode_results: Mutex<Vec<RasterImage>>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Decode(usize),
        Encode {
            width: u32,
            height: u32,
            channels: u8,
            format: OutputFormat,
            quality: u32,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_image(image: RasterImage) -> Self {
            Self {
                decode_results: Mutex::new(vec![image]),
                operations: Mutex::new(Vec::new()),
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }
    }

    impl ImageBackend for MockBackend {
        fn decode(&self, bytes: &[u8]) -> Result<RasterImage, ImagingError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Decode(bytes.len()));

            self.decode_results
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| ImagingError::Decode("No mock image".to_string()))
        }

        fn encode(
            &self,
            image: &RasterImage,
            params: &EncodeParams,
        ) -> Result<Vec<u8>, ImagingError> {
            let dims = image.dimensions();
            self.operations.lock().unwrap().push(RecordedOp::Encode {
                width: dims.width,
                height: dims.height,
                channels: image.channels(),
                format: params.format,
                quality: params.quality.value(),
            });
            Ok(image.samples().to_vec())
        }
    }

    fn gray_square() -> RasterImage {
        RasterImage::from_color(
            RgbImage::from_pixel(4, 4, Rgb([128, 128, 128])),
            ChannelOrder::Rgb,
        )
        .unwrap()
    }

    #[test]
    fn mock_records_decode() {
        let backend = MockBackend::with_image(gray_square());

        let image = backend.decode(&[1, 2, 3]).unwrap();
        assert_eq!(image.dimensions(), Dimensions { width: 4, height: 4 });

        let ops = backend.get_operations();
        assert_eq!(ops, vec![RecordedOp::Decode(3)]);
    }

    #[test]
    fn mock_decode_without_image_fails() {
        let backend = MockBackend::new();
        assert!(matches!(
            backend.decode(&[0]),
            Err(ImagingError::Decode(_))
        ));
    }

    #[test]
    fn mock_records_encode() {
        let backend = MockBackend::new();

        backend
            .encode(&gray_square(), &EncodeParams::jpeg(75))
            .unwrap();

        let ops = backend.get_operations();
        assert!(matches!(
            &ops[0],
            RecordedOp::Encode {
                width: 4,
                height: 4,
                channels: 3,
                format: OutputFormat::Jpeg,
                quality: 75,
            }
        ));
    }
}
