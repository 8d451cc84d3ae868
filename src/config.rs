//! Application configuration.
//!
//! Handles loading, validating, and merging `imgtweak.toml`. Stock defaults
//! are overridden by a user file, either the one named with `--config` or
//! `imgtweak.toml` in the working directory.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [output]
//! format = "png"            # png or jpeg
//! quality = 90              # JPEG quality (1-100)
//!
//! [limits]
//! max_input_bytes = 209715200  # 200 MiB
//!
//! [annotation]
//! color = "#ff0000"
//! line_width = 4
//! radius = 200.0
//! text = "Annotation"
//! text_scale = 3.0
//! font = "Arial"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [annotation]
//! color = "#00ff00"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::annotate::{Color, FontFace};
use crate::imaging::{EncodeParams, OutputFormat, Quality};
use crate::request::{LINE_WIDTH_RANGE, TEXT_SCALE_RANGE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "imgtweak.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `imgtweak.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Download encoding.
    pub output: OutputConfig,
    /// Upload size guard.
    pub limits: LimitsConfig,
    /// Values pre-filled into the annotation form.
    pub annotation: AnnotationConfig,
}

impl AppConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.output.quality) {
            return Err(ConfigError::Validation(
                "output.quality must be 1-100".into(),
            ));
        }
        if self.limits.max_input_bytes == 0 {
            return Err(ConfigError::Validation(
                "limits.max_input_bytes must be non-zero".into(),
            ));
        }
        if !LINE_WIDTH_RANGE.contains(&self.annotation.line_width) {
            return Err(ConfigError::Validation(format!(
                "annotation.line_width must be {}-{}",
                LINE_WIDTH_RANGE.start(),
                LINE_WIDTH_RANGE.end()
            )));
        }
        if !self.annotation.radius.is_finite() || self.annotation.radius <= 0.0 {
            return Err(ConfigError::Validation(
                "annotation.radius must be positive".into(),
            ));
        }
        if !TEXT_SCALE_RANGE.contains(&self.annotation.text_scale) {
            return Err(ConfigError::Validation(format!(
                "annotation.text_scale must be {}-{}",
                TEXT_SCALE_RANGE.start(),
                TEXT_SCALE_RANGE.end()
            )));
        }
        Ok(())
    }

    pub fn encode_params(&self) -> EncodeParams {
        EncodeParams {
            format: self.output.format,
            quality: Quality::new(self.output.quality),
        }
    }
}

/// Download encoding settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// JPEG quality (1 = worst, 100 = best). Ignored for PNG.
    pub quality: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Png,
            quality: Quality::default().value(),
        }
    }
}

/// Upload limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    /// Uploads larger than this are refused before decoding.
    pub max_input_bytes: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: 200 * 1024 * 1024,
        }
    }
}

/// Annotation form defaults. Coordinates are not here: they depend on the
/// size of each upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnnotationConfig {
    pub color: Color,
    pub line_width: u32,
    pub radius: f32,
    pub text: String,
    pub text_scale: f32,
    pub font: FontFace,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            color: Color::RED,
            line_width: 4,
            radius: 200.0,
            text: "Annotation".to_string(),
            text_scale: 3.0,
            font: FontFace::Arial,
        }
    }
}

/// Stock defaults as a TOML value, the base layer for merging.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(AppConfig::default())?)
}

/// Recursively merge `overlay` into `base`. Tables merge key by key; any
/// other value in `overlay` replaces the one in `base`.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read `imgtweak.toml` from `dir` as a raw value, `None` if there is none.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return Ok(None);
    }
    read_toml(&config_path).map(Some)
}

fn read_toml(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Merge an optional overlay onto `base`, deserialize, and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<AppConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: AppConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the effective configuration.
///
/// An explicit path must exist. Without one, `imgtweak.toml` in the working
/// directory is used when present, stock defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let overlay = match explicit {
        Some(path) => {
            log::debug!("loading config from {}", path.display());
            Some(read_toml(path)?)
        }
        None => load_raw_config(Path::new("."))?,
    };
    resolve_config(stock_defaults_value()?, overlay)
}

/// A commented stock config, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# imgtweak configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Pass a file with --config, or place imgtweak.toml in the working directory.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Download encoding
# ---------------------------------------------------------------------------
[output]
# "png" (lossless) or "jpeg".
format = "png"

# JPEG quality (1 = worst, 100 = best). Ignored for PNG.
quality = 90

# ---------------------------------------------------------------------------
# Limits
# ---------------------------------------------------------------------------
[limits]
# Uploads larger than this many bytes are refused (200 MiB).
max_input_bytes = 209715200

# ---------------------------------------------------------------------------
# Annotation form defaults
# ---------------------------------------------------------------------------
[annotation]
# Stroke and text color as #RRGGBB.
color = "#ff0000"

# Stroke width in pixels (1-10). Also the weight of text.
line_width = 4

# Circle radius in pixels.
radius = 200.0

# Text drawn when none is given.
text = "Annotation"

# Text scale (0.1-10.0). At 1.0 capitals are 21 px tall.
text_scale = 3.0

# Arial, Times New Roman, Courier or Cursive. Unknown names fall back to Arial.
font = "Arial"
"##
}
