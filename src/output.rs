//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Info
//!
//! ```text
//! Image Dimensions
//!     Height Scale: 0 - 600
//!     Width Scale: 0 - 800
//!
//! Annotation Defaults
//!     Line: (100, 75) → (700, 525)
//!     Rectangle: (200, 150) → (600, 450)
//!     Circle: (400, 300), radius 200
//!     Text: (200, 300)
//! ```
//!
//! ## Result
//!
//! ```text
//! Grayscale Image (800x600, 1 channel)
//!     Download Grayscale Image → out/Grayscale Image.png
//!     image/png, 48213 bytes
//! ```
//!
//! # Architecture
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure and do no I/O.

use crate::config::AnnotationConfig;
use crate::imaging::Dimensions;
use crate::naming::download_label;
use crate::process::ProcessedImage;
use crate::request::{
    circle_default_center, line_defaults, rectangle_defaults, text_default_origin,
};
use serde::Serialize;
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Machine-readable form of the info report, for `info --json`.
#[derive(Debug, Serialize)]
pub struct InfoReport {
    pub width: u32,
    pub height: u32,
    /// Valid x coordinates, inclusive of the image edge as the form shows it.
    pub width_scale: [u32; 2],
    pub height_scale: [u32; 2],
}

impl InfoReport {
    pub fn new(dims: Dimensions) -> Self {
        Self {
            width: dims.width,
            height: dims.height,
            width_scale: [0, dims.width],
            height_scale: [0, dims.height],
        }
    }
}

/// Format the dimensions of an upload and the coordinates the annotation
/// form would pre-fill for it.
pub fn format_info(dims: Dimensions, defaults: &AnnotationConfig) -> Vec<String> {
    let (line_start, line_end) = line_defaults(dims);
    let (top_left, bottom_right) = rectangle_defaults(dims);
    vec![
        "Image Dimensions".to_string(),
        format!("{}Height Scale: 0 - {}", indent(1), dims.height),
        format!("{}Width Scale: 0 - {}", indent(1), dims.width),
        String::new(),
        "Annotation Defaults".to_string(),
        format!("{}Line: {} \u{2192} {}", indent(1), line_start, line_end),
        format!(
            "{}Rectangle: {} \u{2192} {}",
            indent(1),
            top_left,
            bottom_right
        ),
        format!(
            "{}Circle: {}, radius {}",
            indent(1),
            circle_default_center(dims),
            defaults.radius
        ),
        format!("{}Text: {}", indent(1), text_default_origin(dims)),
    ]
}

pub fn print_info(dims: Dimensions, defaults: &AnnotationConfig) {
    for line in format_info(dims, defaults) {
        println!("{}", line);
    }
}

/// Format a processed result and where it was written.
pub fn format_result(processed: &ProcessedImage, written_to: &Path) -> Vec<String> {
    let channels = match processed.channels {
        1 => "1 channel".to_string(),
        n => format!("{n} channels"),
    };
    vec![
        format!(
            "{} ({}x{}, {})",
            processed.caption, processed.dimensions.width, processed.dimensions.height, channels
        ),
        format!(
            "{}{} \u{2192} {}",
            indent(1),
            download_label(processed.caption),
            written_to.display()
        ),
        format!(
            "{}{}, {} bytes",
            indent(1),
            processed.mime_type,
            processed.bytes.len()
        ),
    ]
}

pub fn print_result(processed: &ProcessedImage, written_to: &Path) {
    for line in format_result(processed, written_to) {
        println!("{}", line);
    }
}
