//! Bridge between [`RasterImage`] and a `tiny-skia` pixmap.
//!
//! The pixmap mirrors the raster's sample order (an RGB buffer stays RGB, a
//! BGR buffer stays BGR), so the paint color is arranged to match instead of
//! reordering pixels. Gray rasters are widened to three equal channels,
//! painted with the color's luma, and narrowed back.
//!
//! Every pixel is opaque, so premultiplied and straight alpha coincide and
//! the alpha channel is simply dropped on the way back.
//!
//! Integer coordinates name pixel centers, hence the half-pixel shift.

use super::AnnotationError;
use super::color::Color;
use super::font::Polyline;
use crate::imaging::{ChannelOrder, RasterImage};
use image::{GrayImage, RgbImage};
use tiny_skia::{IntSize, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, Stroke, Transform};

const PIXEL_CENTER: f32 = 0.5;

/// Pen settings for one stroke call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Pen {
    pub width: f32,
    pub anti_alias: bool,
    pub cap: LineCap,
    pub join: LineJoin,
}

impl Pen {
    /// Round caps and joins, anti-aliased: lines, circles and text.
    pub fn smooth(width: u32) -> Self {
        Self {
            width: width as f32,
            anti_alias: true,
            cap: LineCap::Round,
            join: LineJoin::Round,
        }
    }

    /// Square corners, hard edges: rectangles.
    pub fn hard(width: u32) -> Self {
        Self {
            width: width as f32,
            anti_alias: false,
            cap: LineCap::Square,
            join: LineJoin::Miter,
        }
    }
}

enum Layout {
    Gray,
    Color(ChannelOrder),
}

pub(crate) struct Canvas {
    pixmap: Pixmap,
    layout: Layout,
}

impl Canvas {
    /// Copy `image` into a fresh pixmap. The raster itself is never touched.
    pub fn from_raster(image: &RasterImage) -> Result<Self, AnnotationError> {
        let dims = image.dimensions();
        let size = IntSize::from_wh(dims.width, dims.height).ok_or(AnnotationError::EmptyCanvas)?;

        let (layout, data) = match image {
            RasterImage::Gray(pixels) => {
                let data: Vec<u8> = pixels.as_raw().iter().flat_map(|&v| [v, v, v, 255]).collect();
                (Layout::Gray, data)
            }
            RasterImage::Color { order, pixels } => {
                let data: Vec<u8> = pixels
                    .as_raw()
                    .chunks_exact(3)
                    .flat_map(|p| [p[0], p[1], p[2], 255])
                    .collect();
                (Layout::Color(*order), data)
            }
        };

        let pixmap = Pixmap::from_vec(data, size).ok_or_else(|| {
            AnnotationError::Canvas(format!("cannot allocate {}x{} canvas", dims.width, dims.height))
        })?;
        Ok(Self { pixmap, layout })
    }

    fn paint(&self, color: Color) -> [u8; 3] {
        match self.layout {
            Layout::Gray => {
                let v = color.luma();
                [v, v, v]
            }
            Layout::Color(order) => color.in_order(order),
        }
    }

    /// Stroke `path` with `pen`. Anything outside the canvas is clipped.
    pub fn stroke(&mut self, path: &Path, color: Color, pen: Pen) {
        let [c0, c1, c2] = self.paint(color);
        let mut paint = Paint::default();
        paint.set_color_rgba8(c0, c1, c2, 255);
        paint.anti_alias = pen.anti_alias;

        let stroke = Stroke {
            width: pen.width,
            line_cap: pen.cap,
            line_join: pen.join,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(path, &paint, &stroke, Transform::identity(), None);
    }

    /// Copy the pixmap back into a raster of the original shape and order.
    pub fn into_raster(self) -> Result<RasterImage, AnnotationError> {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        let data = self.pixmap.data();
        let raster = match self.layout {
            Layout::Gray => {
                let samples = data.chunks_exact(4).map(|p| p[0]).collect();
                GrayImage::from_raw(width, height, samples).map(RasterImage::Gray)
            }
            Layout::Color(order) => {
                let samples = data
                    .chunks_exact(4)
                    .flat_map(|p| [p[0], p[1], p[2]])
                    .collect();
                RgbImage::from_raw(width, height, samples)
                    .map(|pixels| RasterImage::Color { order, pixels })
            }
        };
        raster.ok_or_else(|| AnnotationError::Canvas("canvas size changed while drawing".into()))
    }
}

fn center(x: f32, y: f32) -> (f32, f32) {
    (x + PIXEL_CENTER, y + PIXEL_CENTER)
}

/// Open polylines. `None` if there is nothing to draw.
pub(crate) fn polylines_path(lines: &[Polyline]) -> Option<Path> {
    let mut pb = PathBuilder::new();
    for line in lines {
        let mut points = line.iter().map(|&(x, y)| center(x, y));
        let Some((x, y)) = points.next() else {
            continue;
        };
        pb.move_to(x, y);
        for (x, y) in points {
            pb.line_to(x, y);
        }
    }
    pb.finish()
}

/// Closed axis-aligned outline through two opposite corners, in any order.
pub(crate) fn rectangle_path(a: (f32, f32), b: (f32, f32)) -> Option<Path> {
    let (left, right) = (a.0.min(b.0), a.0.max(b.0));
    let (top, bottom) = (a.1.min(b.1), a.1.max(b.1));
    let (l, t) = center(left, top);
    let (r, b) = center(right, bottom);
    let mut pb = PathBuilder::new();
    pb.move_to(l, t);
    pb.line_to(r, t);
    pb.line_to(r, b);
    pb.line_to(l, b);
    pb.close();
    pb.finish()
}

pub(crate) fn circle_path(center_point: (f32, f32), radius: f32) -> Option<Path> {
    let (cx, cy) = center(center_point.0, center_point.1);
    PathBuilder::from_circle(cx, cy, radius)
}
