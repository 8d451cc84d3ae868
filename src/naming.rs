//! Download names derived from a result's caption.
//!
//! The caption doubles as the file stem, so a grayscale result downloads as
//! `Grayscale Image.png` behind a "Download Grayscale Image" button. The
//! extension always matches the encoded format.

use crate::imaging::OutputFormat;

/// File name offered for download: the caption plus the format's extension.
pub fn download_file_name(caption: &str, format: OutputFormat) -> String {
    format!("{caption}.{}", format.extension())
}

/// Label of the download action.
pub fn download_label(caption: &str) -> String {
    format!("Download {caption}")
}
