//! End-to-end authoring scenarios: load → paint → extract.

#![allow(clippy::unwrap_used)]

use image::ImageEncoder;
use retouch_mask::{Comparator, MaskError, MaskSurface, Point, extract, types::Dimensions};

/// A 50%-gray photo stand-in encoded as PNG.
fn solid_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([128, 128, 128, 255]));
    let mut buf = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut buf);
    encoder
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgba8,
        )
        .unwrap();
    buf
}

#[test]
fn paint_and_extract_round_trip() {
    // 800x600 photo in a 400px container: scale 0.5, buffers 400x300.
    let mut surface = MaskSurface::new();
    surface.load(&solid_png(800, 600), 400).unwrap();
    assert_eq!(
        surface.display_dimensions(),
        Some(Dimensions {
            width: 400,
            height: 300
        })
    );

    // A single dot of radius 20 centered at (100, 100).
    surface.set_brush_radius(20.0);
    surface.begin_stroke(Point::new(100.0, 100.0));
    surface.end_stroke();

    let mask = extract::extract_mask(surface.stroke_layer().unwrap()).unwrap();
    let png = extract::encode_png(&mask).unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (400, 300));

    // Roughly circular white region around (100, 100), black elsewhere.
    assert_eq!(decoded.get_pixel(100, 100).0, [255, 255, 255, 255]);
    assert_eq!(decoded.get_pixel(100, 110).0, [255, 255, 255, 255]);
    assert_eq!(decoded.get_pixel(85, 100).0, [255, 255, 255, 255]);
    assert_eq!(decoded.get_pixel(140, 100).0, [0, 0, 0, 255]);
    assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0, 255]);
    assert_eq!(decoded.get_pixel(399, 299).0, [0, 0, 0, 255]);

    // Every pixel is strictly one of the two classes.
    for pixel in decoded.pixels() {
        assert!(pixel.0 == [0, 0, 0, 255] || pixel.0 == [255, 255, 255, 255]);
    }
}

#[test]
fn extraction_without_strokes_reports_empty() {
    let mut surface = MaskSurface::new();
    surface.load(&solid_png(800, 600), 400).unwrap();
    assert!(matches!(
        extract::extract_mask_png(&surface),
        Err(MaskError::EmptyMask)
    ));
}

#[test]
fn full_extraction_resamples_to_native_resolution() {
    let mut surface = MaskSurface::new();
    surface.load(&solid_png(800, 600), 400).unwrap();
    surface.begin_stroke(Point::new(100.0, 100.0));
    surface.continue_stroke(Point::new(150.0, 120.0));
    surface.end_stroke();

    let png = extract::extract_mask_png(&surface).unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    // Mask is delivered at the photo's native resolution, not display scale.
    assert_eq!(decoded.dimensions(), (800, 600));
    // The painted region scales up with the mask (display (100,100) is
    // native (200,200)).
    assert_eq!(decoded.get_pixel(200, 200).0, [255, 255, 255, 255]);
    assert_eq!(decoded.get_pixel(700, 500).0, [0, 0, 0, 255]);
}

#[test]
fn erase_everything_then_extract_reports_empty() {
    let mut surface = MaskSurface::new();
    surface.load(&solid_png(800, 600), 400).unwrap();
    surface.set_brush_radius(10.0);
    surface.begin_stroke(Point::new(50.0, 50.0));
    surface.continue_stroke(Point::new(80.0, 60.0));
    surface.end_stroke();

    surface.set_tool(retouch_mask::Tool::Eraser);
    surface.set_brush_radius(30.0);
    surface.begin_stroke(Point::new(50.0, 50.0));
    surface.continue_stroke(Point::new(80.0, 60.0));
    surface.end_stroke();

    assert!(matches!(
        extract::extract_mask_png(&surface),
        Err(MaskError::EmptyMask)
    ));
}

#[test]
fn comparator_drag_scenario() {
    let mut comparator = Comparator::new();
    assert!((comparator.reveal_percent() - 50.0).abs() < f64::EPSILON);

    // Drag the handle to the clientX corresponding to 20% of a 400px
    // container whose left edge sits at viewport x=100.
    comparator.drag_start();
    comparator.drag_move(180.0, 100.0, 400.0);
    assert!((comparator.reveal_percent() - 20.0).abs() < 1e-9);

    comparator.drag_end();
    // Position sticks after release.
    comparator.drag_move(350.0, 100.0, 400.0);
    assert!((comparator.reveal_percent() - 20.0).abs() < 1e-9);
}
