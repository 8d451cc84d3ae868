//! Image processing in pure Rust, built on the `image` crate.
//!
//! | Operation | Function |
//! |---|---|
//! | **Decode / encode** | [`ImageBackend`] via [`RustBackend`] |
//! | **RGB reorder** | [`to_rgb`] |
//! | **Grayscale** | [`to_grayscale`] (Rec.601 luma) |
//! | **Binary** | [`to_binary`] (threshold 127, inclusive) |
//! | **Brightness** | [`adjust_brightness`] (saturating offset) |
//! | **Contrast** | [`adjust_contrast`] (saturating gain) |
//!
//! The module is split into:
//! - **Calculations**: Pure per-sample arithmetic (unit testable)
//! - **Raster**: [`RasterImage`] and its channel order
//! - **Parameters**: Encoding format and quality
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Color space / Tone**: The transforms themselves, pure over a raster

pub mod backend;
pub mod calculations;
pub mod color_space;
mod params;
pub mod raster;
pub mod rust_backend;
pub mod tone;

pub use backend::{Dimensions, ImageBackend, ImagingError};
pub use color_space::{to_binary, to_binary_with, to_grayscale, to_rgb};
pub use params::{EncodeParams, OutputFormat, Quality};
pub use raster::{ChannelOrder, RasterImage};
pub use rust_backend::{RustBackend, accepted_upload_extensions, is_accepted_upload};
pub use tone::{BRIGHTNESS_RANGE, CONTRAST_RANGE, adjust_brightness, adjust_contrast, contrast_gain};
