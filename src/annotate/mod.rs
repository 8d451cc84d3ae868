//! Annotation rendering: one shape or text string drawn onto a copy of an
//! image.
//!
//! | Kind | Pen | Edges |
//! |---|---|---|
//! | [`AnnotationDescriptor::Line`] | round caps | anti-aliased |
//! | [`AnnotationDescriptor::Rectangle`] | square corners | hard (aliased) |
//! | [`AnnotationDescriptor::Circle`] | round | anti-aliased |
//! | [`AnnotationDescriptor::Text`] | stroke font | anti-aliased |
//!
//! Coordinates are pixel positions and may fall outside the image; drawing
//! clips. Free-form form input goes through [`parse`] first, nothing here
//! interprets text beyond the string being drawn.

mod canvas;
pub mod color;
pub mod font;
pub mod parse;
pub mod session;

pub use color::Color;
pub use font::{FontFace, StrokeFamily, TextExtent};
pub use parse::{ParseError, Point, parse_point, parse_positive, parse_radius};
pub use session::AnnotationSession;

use crate::imaging::RasterImage;
use canvas::{Canvas, Pen};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnnotationError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("stroke width must be at least 1, got {0}")]
    InvalidStrokeWidth(u32),
    #[error("radius must be a positive finite number, got {0}")]
    InvalidRadius(f32),
    #[error("text scale must be a positive finite number, got {0}")]
    InvalidTextScale(f32),
    #[error("{field} {value} is outside {range}")]
    OutOfRange {
        field: &'static str,
        value: String,
        range: String,
    },
    #[error("cannot annotate an empty image")]
    EmptyCanvas,
    #[error("drawing failed: {0}")]
    Canvas(String),
}

/// Shape selector offered by the annotation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    #[default]
    Line,
    Rectangle,
    Circle,
    Text,
}

/// One fully typed annotation.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationDescriptor {
    Line {
        start: Point,
        end: Point,
        width: u32,
    },
    Rectangle {
        top_left: Point,
        bottom_right: Point,
        width: u32,
    },
    Circle {
        center: Point,
        radius: f32,
        width: u32,
    },
    Text {
        content: String,
        /// Bottom-left corner of the first glyph, on the baseline.
        origin: Point,
        width: u32,
        scale: f32,
        font: FontFace,
    },
}

impl AnnotationDescriptor {
    pub fn kind(&self) -> AnnotationKind {
        match self {
            AnnotationDescriptor::Line { .. } => AnnotationKind::Line,
            AnnotationDescriptor::Rectangle { .. } => AnnotationKind::Rectangle,
            AnnotationDescriptor::Circle { .. } => AnnotationKind::Circle,
            AnnotationDescriptor::Text { .. } => AnnotationKind::Text,
        }
    }

    pub fn stroke_width(&self) -> u32 {
        match self {
            AnnotationDescriptor::Line { width, .. }
            | AnnotationDescriptor::Rectangle { width, .. }
            | AnnotationDescriptor::Circle { width, .. }
            | AnnotationDescriptor::Text { width, .. } => *width,
        }
    }

    /// Check the numeric fields. Coordinates are never out of range.
    pub fn validate(&self) -> Result<(), AnnotationError> {
        let width = self.stroke_width();
        if width == 0 {
            return Err(AnnotationError::InvalidStrokeWidth(width));
        }
        match self {
            AnnotationDescriptor::Circle { radius, .. }
                if !radius.is_finite() || *radius <= 0.0 =>
            {
                Err(AnnotationError::InvalidRadius(*radius))
            }
            AnnotationDescriptor::Text { scale, .. } if !scale.is_finite() || *scale <= 0.0 => {
                Err(AnnotationError::InvalidTextScale(*scale))
            }
            _ => Ok(()),
        }
    }
}

fn at(p: Point) -> (f32, f32) {
    (p.x as f32, p.y as f32)
}

/// Draw `descriptor` onto a copy of `image`. The input is never modified.
///
/// On a gray image the color is drawn as its luma and the result stays gray.
pub fn render(
    image: &RasterImage,
    descriptor: &AnnotationDescriptor,
    color: Color,
) -> Result<RasterImage, AnnotationError> {
    descriptor.validate()?;
    let mut canvas = Canvas::from_raster(image)?;

    let (path, pen) = match descriptor {
        AnnotationDescriptor::Line { start, end, width } => (
            canvas::polylines_path(&[vec![at(*start), at(*end)]]),
            Pen::smooth(*width),
        ),
        AnnotationDescriptor::Rectangle {
            top_left,
            bottom_right,
            width,
        } => (
            canvas::rectangle_path(at(*top_left), at(*bottom_right)),
            Pen::hard(*width),
        ),
        AnnotationDescriptor::Circle {
            center,
            radius,
            width,
        } => (canvas::circle_path(at(*center), *radius), Pen::smooth(*width)),
        AnnotationDescriptor::Text {
            content,
            origin,
            width,
            scale,
            font,
        } => {
            let strokes = font::layout(content, font.family(), at(*origin), *scale);
            (canvas::polylines_path(&strokes), Pen::smooth(*width))
        }
    };

    match path {
        Some(path) => canvas.stroke(&path, color, pen),
        // Zero-length shapes and empty strings leave the copy untouched.
        None => log::debug!("{:?} annotation has nothing to draw", descriptor.kind()),
    }
    canvas.into_raster()
}

/// Size of `content` drawn with `face` at `scale` by a pen of `width` pixels.
///
/// The pen extends half its width past every glyph edge, so the padded
/// extent is what actually gets painted.
pub fn measure_text(content: &str, face: FontFace, scale: f32, width: u32) -> TextExtent {
    let bare = font::measure_text(content, face.family(), scale);
    let pen = width as f32;
    TextExtent {
        width: bare.width + pen,
        height: bare.height + pen / 2.0,
        baseline: bare.baseline + pen / 2.0,
    }
}
