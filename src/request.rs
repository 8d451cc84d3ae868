//! Per-request processing parameters.
//!
//! A [`ProcessingRequest`] is everything one interaction needs: which mode
//! is selected and that mode's slider or form values. It is passed into the
//! transforms explicitly, and serializes to TOML so a request can be saved
//! and replayed with `imgtweak apply`:
//!
//! ```toml
//! mode = "annotation"
//!
//! [annotation]
//! kind = "circle"
//! center = "(120, 80)"
//! radius = 40.0
//! color = "#00ff00"
//! ```
//!
//! Annotation fields arrive as raw form text. [`AnnotationForm::resolve`]
//! turns them into a typed [`AnnotationDescriptor`], filling anything left
//! blank from the image size and the configured defaults.

use crate::annotate::{
    self, AnnotationDescriptor, AnnotationError, AnnotationKind, Color, FontFace, Point,
    parse_point,
};
use crate::config::AnnotationConfig;
use crate::imaging::{self, Dimensions, RasterImage};
use crate::process::ProcessError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Stroke width slider, in pixels.
pub const LINE_WIDTH_RANGE: RangeInclusive<u32> = 1..=10;

/// Text scale slider.
pub const TEXT_SCALE_RANGE: RangeInclusive<f32> = 0.1..=10.0;

/// The selectable processing options, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessingMode {
    Original,
    Rgb,
    Grayscale,
    Binary,
    Brightness,
    Contrast,
    Annotation,
}

impl ProcessingMode {
    pub const ALL: [ProcessingMode; 7] = [
        ProcessingMode::Original,
        ProcessingMode::Rgb,
        ProcessingMode::Grayscale,
        ProcessingMode::Binary,
        ProcessingMode::Brightness,
        ProcessingMode::Contrast,
        ProcessingMode::Annotation,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProcessingMode::Original => "Original",
            ProcessingMode::Rgb => "RGB",
            ProcessingMode::Grayscale => "Grayscale",
            ProcessingMode::Binary => "Binary",
            ProcessingMode::Brightness => "Brightness",
            ProcessingMode::Contrast => "Contrast",
            ProcessingMode::Annotation => "Annotation",
        }
    }

    /// Caption shown under the result; also the download file stem.
    pub fn caption(self) -> &'static str {
        match self {
            ProcessingMode::Original => "Original Image",
            ProcessingMode::Rgb => "RGB Image",
            ProcessingMode::Grayscale => "Grayscale Image",
            ProcessingMode::Binary => "Binary Image",
            ProcessingMode::Brightness => "Brightness Adjusted Image",
            ProcessingMode::Contrast => "Contrast Adjusted Image",
            ProcessingMode::Annotation => "Annotated Image",
        }
    }
}

impl fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One request: the selected mode and its parameters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ProcessingRequest {
    #[default]
    Original,
    Rgb,
    Grayscale,
    Binary,
    Brightness {
        /// Offset added to every sample, -100 to 100.
        delta: i32,
    },
    Contrast {
        /// Slider level, -100 to 100. Mapped to a gain by
        /// [`contrast_gain`](crate::imaging::contrast_gain).
        level: i32,
    },
    Annotation {
        #[serde(default)]
        annotation: AnnotationForm,
    },
}

impl ProcessingRequest {
    pub fn mode(&self) -> ProcessingMode {
        match self {
            ProcessingRequest::Original => ProcessingMode::Original,
            ProcessingRequest::Rgb => ProcessingMode::Rgb,
            ProcessingRequest::Grayscale => ProcessingMode::Grayscale,
            ProcessingRequest::Binary => ProcessingMode::Binary,
            ProcessingRequest::Brightness { .. } => ProcessingMode::Brightness,
            ProcessingRequest::Contrast { .. } => ProcessingMode::Contrast,
            ProcessingRequest::Annotation { .. } => ProcessingMode::Annotation,
        }
    }

    pub fn caption(&self) -> &'static str {
        self.mode().caption()
    }

    /// Run the selected transform on `image`. The input is never modified.
    pub fn apply(
        &self,
        image: &RasterImage,
        defaults: &AnnotationConfig,
    ) -> Result<RasterImage, ProcessError> {
        let result = match self {
            ProcessingRequest::Original => image.clone(),
            ProcessingRequest::Rgb => imaging::to_rgb(image)?,
            ProcessingRequest::Grayscale => imaging::to_grayscale(image)?,
            ProcessingRequest::Binary => imaging::to_binary(image)?,
            ProcessingRequest::Brightness { delta } => imaging::adjust_brightness(image, *delta)?,
            ProcessingRequest::Contrast { level } => {
                imaging::adjust_contrast(image, imaging::contrast_gain(*level)?)?
            }
            ProcessingRequest::Annotation { annotation } => {
                let (descriptor, color) = annotation.resolve(image.dimensions(), defaults)?;
                log::debug!("annotating with {descriptor:?} in {color}");
                annotate::render(image, &descriptor, color)?
            }
        };
        Ok(result)
    }
}

/// Raw annotation form fields. Blank fields take their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnnotationForm {
    pub kind: AnnotationKind,
    /// Line start or rectangle top-left, as `(x, y)`.
    pub start: Option<String>,
    /// Line end or rectangle bottom-right, as `(x, y)`.
    pub end: Option<String>,
    /// Circle center, as `(x, y)`.
    pub center: Option<String>,
    pub radius: Option<f32>,
    pub text: Option<String>,
    /// Text origin (bottom-left of the baseline), as `(x, y)`.
    pub position: Option<String>,
    pub font: Option<String>,
    pub width: Option<u32>,
    pub scale: Option<f32>,
    /// `#RRGGBB`.
    pub color: Option<String>,
}

/// `value * num / den`, truncated like an integer slider default.
fn fraction(value: u32, num: u64, den: u64) -> i32 {
    i32::try_from(u64::from(value) * num / den).unwrap_or(i32::MAX)
}

/// Pre-filled line endpoints: one eighth in from opposite corners.
pub fn line_defaults(dims: Dimensions) -> (Point, Point) {
    (
        Point::new(fraction(dims.width, 1, 8), fraction(dims.height, 1, 8)),
        Point::new(fraction(dims.width, 7, 8), fraction(dims.height, 7, 8)),
    )
}

/// Pre-filled rectangle corners: the middle half of the image.
pub fn rectangle_defaults(dims: Dimensions) -> (Point, Point) {
    (
        Point::new(fraction(dims.width, 1, 4), fraction(dims.height, 1, 4)),
        Point::new(fraction(dims.width, 3, 4), fraction(dims.height, 3, 4)),
    )
}

pub fn circle_default_center(dims: Dimensions) -> Point {
    Point::new(fraction(dims.width, 1, 2), fraction(dims.height, 1, 2))
}

pub fn text_default_origin(dims: Dimensions) -> Point {
    Point::new(fraction(dims.width, 1, 4), fraction(dims.height, 1, 2))
}

fn point_or(field: Option<&str>, default: Point) -> Result<Point, AnnotationError> {
    match field {
        Some(text) => Ok(parse_point(text)?),
        None => Ok(default),
    }
}

impl AnnotationForm {
    pub fn new(kind: AnnotationKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Turn the form into a descriptor and color for an image of `dims`.
    pub fn resolve(
        &self,
        dims: Dimensions,
        defaults: &AnnotationConfig,
    ) -> Result<(AnnotationDescriptor, Color), AnnotationError> {
        let color = match &self.color {
            Some(text) => Color::parse(text)?,
            None => defaults.color,
        };

        let width = self.width.unwrap_or(defaults.line_width);
        if !LINE_WIDTH_RANGE.contains(&width) {
            return Err(AnnotationError::OutOfRange {
                field: "line width",
                value: width.to_string(),
                range: format!("{}-{}", LINE_WIDTH_RANGE.start(), LINE_WIDTH_RANGE.end()),
            });
        }

        let descriptor = match self.kind {
            AnnotationKind::Line => {
                let (start, end) = line_defaults(dims);
                AnnotationDescriptor::Line {
                    start: point_or(self.start.as_deref(), start)?,
                    end: point_or(self.end.as_deref(), end)?,
                    width,
                }
            }
            AnnotationKind::Rectangle => {
                let (top_left, bottom_right) = rectangle_defaults(dims);
                AnnotationDescriptor::Rectangle {
                    top_left: point_or(self.start.as_deref(), top_left)?,
                    bottom_right: point_or(self.end.as_deref(), bottom_right)?,
                    width,
                }
            }
            AnnotationKind::Circle => AnnotationDescriptor::Circle {
                center: point_or(self.center.as_deref(), circle_default_center(dims))?,
                radius: self.radius.unwrap_or(defaults.radius),
                width,
            },
            AnnotationKind::Text => {
                let scale = self.scale.unwrap_or(defaults.text_scale);
                if !TEXT_SCALE_RANGE.contains(&scale) {
                    return Err(AnnotationError::OutOfRange {
                        field: "text scale",
                        value: scale.to_string(),
                        range: format!("{}-{}", TEXT_SCALE_RANGE.start(), TEXT_SCALE_RANGE.end()),
                    });
                }
                AnnotationDescriptor::Text {
                    content: self.text.clone().unwrap_or_else(|| defaults.text.clone()),
                    origin: point_or(self.position.as_deref(), text_default_origin(dims))?,
                    width,
                    scale,
                    font: self
                        .font
                        .as_deref()
                        .map(FontFace::from_name)
                        .unwrap_or(defaults.font),
                }
            }
        };
        descriptor.validate()?;
        Ok((descriptor, color))
    }
}
