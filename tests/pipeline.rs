//! End-to-end runs of the upload cycle through the real codec backend.

use image::{DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage};
use imgtweak::annotate::{
    AnnotationDescriptor, AnnotationKind, AnnotationSession, Color, Point, render,
};
use imgtweak::config::AppConfig;
use imgtweak::imaging::{ChannelOrder, ImagingError, OutputFormat, RasterImage, RustBackend};
use imgtweak::process::{self, ProcessError};
use imgtweak::request::{AnnotationForm, ProcessingRequest};
use std::io::Cursor;
use tempfile::TempDir;

fn png_upload(width: u32, height: u32, fill: [u8; 3]) -> Vec<u8> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(fill)))
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

fn run(upload: &[u8], request: ProcessingRequest) -> process::ProcessedImage {
    process::process_upload(&RustBackend::new(), upload, &request, &AppConfig::default()).unwrap()
}

#[test]
fn grayscale_download_is_single_channel_png() {
    let upload = png_upload(40, 30, [200, 100, 50]);
    let result = run(&upload, ProcessingRequest::Grayscale);

    assert_eq!(result.file_name, "Grayscale Image.png");
    let decoded = image::load_from_memory(&result.bytes).unwrap();
    assert_eq!(decoded.dimensions(), (40, 30));
    assert_eq!(decoded.color(), image::ColorType::L8);
    // 0.299 * 200 + 0.587 * 100 + 0.114 * 50 = 124.2
    assert_eq!(decoded.to_luma8().get_pixel(0, 0).0, [124]);
}

#[test]
fn binary_download_is_black_and_white() {
    let upload = png_upload(8, 8, [127, 127, 127]);
    let result = run(&upload, ProcessingRequest::Binary);
    let decoded = image::load_from_memory(&result.bytes).unwrap().to_luma8();
    assert!(decoded.pixels().all(|p| p.0 == [255]));
}

#[test]
fn brightness_saturates() {
    let upload = png_upload(4, 4, [250, 10, 128]);
    let result = run(&upload, ProcessingRequest::Brightness { delta: 50 });
    assert_eq!(result.caption, "Brightness Adjusted Image");
    let decoded = image::load_from_memory(&result.bytes).unwrap().to_rgb8();
    assert_eq!(decoded.get_pixel(0, 0).0, [255, 60, 178]);
}

#[test]
fn contrast_saturates() {
    let upload = png_upload(4, 4, [200, 10, 0]);
    let result = run(&upload, ProcessingRequest::Contrast { level: 100 });
    let decoded = image::load_from_memory(&result.bytes).unwrap().to_rgb8();
    // gain = 100 / 127 + 1 ≈ 1.787
    assert_eq!(decoded.get_pixel(0, 0).0, [255, 18, 0]);
}

#[test]
fn annotation_draws_in_the_requested_color() {
    let upload = png_upload(64, 48, [0, 0, 0]);
    let request = ProcessingRequest::Annotation {
        annotation: AnnotationForm {
            start: Some("(8, 8)".into()),
            end: Some("(40, 30)".into()),
            width: Some(2),
            color: Some("#00ff00".into()),
            ..AnnotationForm::new(AnnotationKind::Rectangle)
        },
    };
    let result = run(&upload, request);
    assert_eq!(result.file_name, "Annotated Image.png");

    let decoded = image::load_from_memory(&result.bytes).unwrap().to_rgb8();
    assert_eq!(decoded.get_pixel(8, 8).0, [0, 255, 0]);
    assert_eq!(decoded.get_pixel(40, 20).0, [0, 255, 0]);
    assert_eq!(decoded.get_pixel(20, 20).0, [0, 0, 0]);
}

#[test]
fn default_annotation_uses_size_derived_points() {
    let upload = png_upload(80, 80, [255, 255, 255]);
    let result = run(
        &upload,
        ProcessingRequest::Annotation {
            annotation: AnnotationForm::new(AnnotationKind::Line),
        },
    );
    let decoded = image::load_from_memory(&result.bytes).unwrap().to_rgb8();
    // Default line runs (10, 10) → (70, 70) in red.
    let [r, g, b] = decoded.get_pixel(40, 40).0;
    assert_eq!(r, 255);
    assert!(g < 64 && b < 64, "got {g}, {b}");
    assert_eq!(decoded.get_pixel(70, 10).0, [255, 255, 255]);
}

#[test]
fn jpeg_output_when_configured() {
    let mut config = AppConfig::default();
    config.output.format = OutputFormat::Jpeg;
    let upload = png_upload(16, 16, [90, 90, 90]);
    let result = process::process_upload(
        &RustBackend::new(),
        &upload,
        &ProcessingRequest::Rgb,
        &config,
    )
    .unwrap();
    assert_eq!(result.file_name, "RGB Image.jpg");
    assert_eq!(result.mime_type, "image/jpeg");
    assert_eq!(
        image::guess_format(&result.bytes).unwrap(),
        ImageFormat::Jpeg
    );
}

#[test]
fn garbage_upload_is_a_decode_error() {
    let err = process::process_upload(
        &RustBackend::new(),
        b"definitely not an image",
        &ProcessingRequest::Original,
        &AppConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ProcessError::Imaging(ImagingError::Decode(_))));
}

#[test]
fn saved_request_replays() {
    let tmp = TempDir::new().unwrap();
    let request_path = tmp.path().join("request.toml");
    std::fs::write(
        &request_path,
        r##"
mode = "annotation"

[annotation]
kind = "circle"
center = "(16, 16)"
radius = 8.0
width = 2
color = "#0000ff"
"##,
    )
    .unwrap();

    let request = process::load_request(&request_path).unwrap();
    let result = run(&png_upload(32, 32, [0, 0, 0]), request);
    let path = process::write_result(&result, tmp.path()).unwrap();
    assert!(path.ends_with("Annotated Image.png"));

    let decoded = image::open(&path).unwrap().to_rgb8();
    assert!(decoded.get_pixel(24, 16).0[2] > 128);
    assert_eq!(decoded.get_pixel(16, 16).0, [0, 0, 0]);
}

#[test]
fn session_keeps_only_the_latest_annotation() {
    let original = RasterImage::from_color(RgbImage::new(32, 32), ChannelOrder::Bgr).unwrap();
    let mut session = AnnotationSession::new(original.clone());

    let first = AnnotationDescriptor::Line {
        start: Point::new(0, 4),
        end: Point::new(31, 4),
        width: 1,
    };
    let second = AnnotationDescriptor::Line {
        start: Point::new(0, 20),
        end: Point::new(31, 20),
        width: 1,
    };
    session.apply(&first, Color::RED).unwrap();
    session.apply(&second, Color::RED).unwrap();
    assert_eq!(
        session.current(),
        &render(&original, &second, Color::RED).unwrap()
    );

    session.clear();
    assert_eq!(session.current(), &original);
}
