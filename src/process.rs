//! One upload, one transform, one download.
//!
//! [`process_upload`] is the whole interaction cycle: check the upload size,
//! decode, run the [`ProcessingRequest`], encode, and label the result with
//! its caption and download file name. Nothing is kept between calls.
//!
//! The backend is a parameter so tests can run the cycle against
//! [`MockBackend`](crate::imaging::backend::tests::MockBackend) without a
//! codec.

use crate::annotate::AnnotationError;
use crate::config::AppConfig;
use crate::imaging::{Dimensions, ImageBackend, ImagingError, RasterImage};
use crate::naming;
use crate::request::ProcessingRequest;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Request file error: {0}")]
    Request(#[from] toml::de::Error),
    #[error(transparent)]
    Imaging(#[from] ImagingError),
    #[error("Error applying annotation: {0}")]
    Annotation(#[from] AnnotationError),
}

/// An encoded result ready for download.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedImage {
    pub caption: &'static str,
    pub file_name: String,
    pub mime_type: &'static str,
    pub dimensions: Dimensions,
    pub channels: u8,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// Refuse oversized uploads, then decode.
pub fn decode_upload(
    backend: &impl ImageBackend,
    bytes: &[u8],
    config: &AppConfig,
) -> Result<RasterImage, ProcessError> {
    let size = bytes.len() as u64;
    let limit = config.limits.max_input_bytes;
    if size > limit {
        return Err(ImagingError::InputTooLarge { size, limit }.into());
    }
    Ok(backend.decode(bytes)?)
}

/// Run one request against uploaded bytes.
pub fn process_upload(
    backend: &impl ImageBackend,
    bytes: &[u8],
    request: &ProcessingRequest,
    config: &AppConfig,
) -> Result<ProcessedImage, ProcessError> {
    let image = decode_upload(backend, bytes, config)?;
    let result = request.apply(&image, &config.annotation)?;

    let params = config.encode_params();
    let encoded = backend.encode(&result, &params)?;

    let caption = request.caption();
    let processed = ProcessedImage {
        caption,
        file_name: naming::download_file_name(caption, params.format),
        mime_type: params.format.mime_type(),
        dimensions: result.dimensions(),
        channels: result.channels(),
        bytes: encoded,
    };
    log::info!(
        "{}: {}x{}, {} bytes",
        processed.caption,
        processed.dimensions.width,
        processed.dimensions.height,
        processed.bytes.len()
    );
    Ok(processed)
}

/// Read a saved [`ProcessingRequest`] from a TOML file.
pub fn load_request(path: &Path) -> Result<ProcessingRequest, ProcessError> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Write the download into `dir` under its file name.
pub fn write_result(processed: &ProcessedImage, dir: &Path) -> Result<PathBuf, ProcessError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(&processed.file_name);
    std::fs::write(&path, &processed.bytes)?;
    log::debug!("wrote {}", path.display());
    Ok(path)
}
