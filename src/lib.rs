//! # imgtweak
//!
//! Apply one simple transform or annotation to an uploaded image and hand
//! back the result for download.
//!
//! # Architecture: One Request, One Transform
//!
//! Every interaction is a single pass with no state carried over:
//!
//! ```text
//! upload bytes  →  RasterImage  →  one transform  →  encoded bytes + caption
//!    (decode)                       (pure function)      (encode, name)
//! ```
//!
//! The transforms are pure functions over a [`imaging::RasterImage`]; they
//! never mutate their input and never touch a codec. Decoding and encoding
//! sit behind the [`imaging::ImageBackend`] trait, so the whole cycle can be
//! exercised in tests with a mock backend.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Raster model, codec backend, color-space and tone transforms |
//! | [`annotate`] | Color and coordinate parsing, stroke font, shape and text rendering, apply/clear session |
//! | [`request`] | [`request::ProcessingRequest`]: the selected mode and its form values, with size-derived defaults |
//! | [`process`] | Size check → decode → transform → encode → label |
//! | [`config`] | `imgtweak.toml` loading, validation and merging |
//! | [`naming`] | Download file names and labels from captions |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Explicit Channel Order
//!
//! A color raster carries its [`imaging::ChannelOrder`]. Uploads decode as
//! RGB; BGR buffers from elsewhere are wrapped as-is. Transforms and drawing
//! honor the order, and only encoding reorders to RGB. Annotation colors are
//! arranged to match the buffer, so red is red on either layout.
//!
//! ## Saturating Arithmetic
//!
//! Brightness and contrast clamp every sample to `0..=255`. Nothing wraps.
//!
//! ## No Evaluation of Form Text
//!
//! Coordinates typed into the annotation form are parsed as two integers
//! and nothing else. See [`annotate::parse_point`].
//!
//! ## Annotations Never Accumulate
//!
//! [`annotate::AnnotationSession`] always draws onto the pristine upload.
//! Applying a second annotation replaces the first; clearing restores the
//! upload.

pub mod annotate;
pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod process;
pub mod request;
