//! Stroke compositing into the RGBA stroke layer.
//!
//! Strokes are round-capped, round-joined thick line segments. They are
//! composited immediately — there is no retained stroke list and no
//! replay model. Painting uses union semantics: a covered pixel takes
//! the fixed brush color with its alpha capped at the brush alpha, so
//! overlapping strokes never stack beyond full coverage and only the
//! *set* of covered pixels matters for extraction. Erasing zeroes the
//! covered pixels outright, matching the canvas `destination-out`
//! behavior with an opaque source.

use image::{Rgba, RgbaImage};

use crate::types::{BRUSH_COLOR, Point};

/// Stamp a painted segment from `from` to `to` with the given radius.
///
/// Every pixel whose center lies within `radius` of the segment takes
/// [`BRUSH_COLOR`], with alpha `max(existing, brush)`. A zero-length
/// segment stamps a round dot. Coordinates outside the layer are safe;
/// the scan is clipped to the layer bounds.
pub fn paint_segment(layer: &mut RgbaImage, from: Point, to: Point, radius: f64) {
    stamp(layer, from, to, radius, |pixel| {
        let alpha = pixel.0[3].max(BRUSH_COLOR[3]);
        *pixel = Rgba([BRUSH_COLOR[0], BRUSH_COLOR[1], BRUSH_COLOR[2], alpha]);
    });
}

/// Stamp an erased segment from `from` to `to` with the given radius.
///
/// Covered pixels are zeroed in all four channels regardless of prior
/// content, so a fully erased layer is indistinguishable from a fresh
/// one (and extraction over it reports an empty mask).
pub fn erase_segment(layer: &mut RgbaImage, from: Point, to: Point, radius: f64) {
    stamp(layer, from, to, radius, |pixel| {
        *pixel = Rgba([0, 0, 0, 0]);
    });
}

/// Wipe the stroke layer to fully transparent.
pub fn clear(layer: &mut RgbaImage) {
    for pixel in layer.pixels_mut() {
        *pixel = Rgba([0, 0, 0, 0]);
    }
}

/// Apply `op` to every pixel whose center is within `radius` of the
/// segment `from`..`to`, scanning only the segment's bounding box
/// expanded by the radius and clipped to the layer.
fn stamp(
    layer: &mut RgbaImage,
    from: Point,
    to: Point,
    radius: f64,
    mut op: impl FnMut(&mut Rgba<u8>),
) {
    if radius <= 0.0 {
        return;
    }
    let (width, height) = (layer.width(), layer.height());

    let min_x = (from.x.min(to.x) - radius).floor().max(0.0);
    let max_x = (from.x.max(to.x) + radius).ceil();
    let min_y = (from.y.min(to.y) - radius).floor().max(0.0);
    let max_y = (from.y.max(to.y) + radius).ceil();

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (x0, y0) = (min_x as u32, min_y as u32);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (x1, y1) = (
        (max_x.max(0.0) as u32).min(width.saturating_sub(1)),
        (max_y.max(0.0) as u32).min(height.saturating_sub(1)),
    );
    if x0 > x1 || y0 > y1 || width == 0 || height == 0 {
        return;
    }

    let radius_sq = radius * radius;
    for y in y0..=y1 {
        for x in x0..=x1 {
            // Pixel centers sit at half-integer coordinates.
            let center = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            if distance_to_segment_squared(center, from, to) <= radius_sq {
                op(layer.get_pixel_mut(x, y));
            }
        }
    }
}

/// Squared distance from `p` to the closed segment `a`..`b`.
///
/// Degenerate segments (`a == b`) fall back to point distance, which is
/// what gives strokes their round caps and single-click dots.
fn distance_to_segment_squared(p: Point, a: Point, b: Point) -> f64 {
    let len_sq = a.distance_squared(b);
    if len_sq <= f64::EPSILON {
        return p.distance_squared(a);
    }
    let t = ((p.x - a.x) * (b.x - a.x) + (p.y - a.y) * (b.y - a.y)) / len_sq;
    let t = t.clamp(0.0, 1.0);
    let nearest = Point::new(
        t.mul_add(b.x - a.x, a.x),
        t.mul_add(b.y - a.y, a.y),
    );
    p.distance_squared(nearest)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn blank(width: u32, height: u32) -> RgbaImage {
        RgbaImage::new(width, height)
    }

    fn painted_count(layer: &RgbaImage) -> usize {
        layer.pixels().filter(|p| p.0[3] > 0).count()
    }

    #[test]
    fn dot_stamp_covers_disc() {
        let mut layer = blank(40, 40);
        let center = Point::new(20.0, 20.0);
        paint_segment(&mut layer, center, center, 5.0);

        // The pixel nearest the center is covered.
        assert!(layer.get_pixel(20, 20).0[3] > 0);
        // A pixel well outside the radius is not.
        assert_eq!(layer.get_pixel(30, 20).0[3], 0);

        // Coverage is roughly the area of a radius-5 disc (~78.5 px).
        let count = painted_count(&layer);
        assert!(
            (60..=100).contains(&count),
            "expected a disc-sized region, got {count} pixels"
        );
    }

    #[test]
    fn segment_stamp_covers_capsule() {
        let mut layer = blank(60, 20);
        paint_segment(
            &mut layer,
            Point::new(10.0, 10.0),
            Point::new(50.0, 10.0),
            3.0,
        );

        // Along the spine.
        assert!(layer.get_pixel(30, 10).0[3] > 0);
        // Round cap extends past the endpoint.
        assert!(layer.get_pixel(52, 10).0[3] > 0);
        // Perpendicular offset beyond the radius is clean.
        assert_eq!(layer.get_pixel(30, 15).0[3], 0);
    }

    #[test]
    fn paint_alpha_is_capped() {
        let mut layer = blank(20, 20);
        let center = Point::new(10.0, 10.0);
        // Overlapping strokes must not stack past the brush alpha.
        paint_segment(&mut layer, center, center, 4.0);
        paint_segment(&mut layer, center, center, 4.0);
        paint_segment(&mut layer, center, center, 4.0);

        assert_eq!(layer.get_pixel(10, 10).0[3], BRUSH_COLOR[3]);
    }

    #[test]
    fn erase_restores_transparency() {
        let mut layer = blank(20, 20);
        let center = Point::new(10.0, 10.0);
        paint_segment(&mut layer, center, center, 6.0);
        assert!(painted_count(&layer) > 0);

        // Erase with a larger radius over the same spot.
        erase_segment(&mut layer, center, center, 8.0);
        assert_eq!(painted_count(&layer), 0);
        // Every byte is zero, not just the alpha channel.
        assert!(layer.as_raw().iter().all(|&b| b == 0));
    }

    #[test]
    fn out_of_bounds_coordinates_are_safe() {
        let mut layer = blank(10, 10);
        paint_segment(
            &mut layer,
            Point::new(-100.0, -100.0),
            Point::new(-90.0, -90.0),
            5.0,
        );
        assert_eq!(painted_count(&layer), 0);

        // A segment straddling the edge paints only the in-bounds part.
        paint_segment(
            &mut layer,
            Point::new(-3.0, 5.0),
            Point::new(3.0, 5.0),
            2.0,
        );
        assert!(painted_count(&layer) > 0);
    }

    #[test]
    fn zero_radius_is_a_no_op() {
        let mut layer = blank(10, 10);
        paint_segment(&mut layer, Point::new(5.0, 5.0), Point::new(5.0, 5.0), 0.0);
        assert_eq!(painted_count(&layer), 0);
    }

    #[test]
    fn clear_wipes_everything() {
        let mut layer = blank(30, 30);
        paint_segment(
            &mut layer,
            Point::new(0.0, 0.0),
            Point::new(30.0, 30.0),
            10.0,
        );
        clear(&mut layer);
        assert!(layer.as_raw().iter().all(|&b| b == 0));
    }

    #[test]
    fn distance_to_segment_projects_and_clamps() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        // Perpendicular projection onto the interior.
        assert!((distance_to_segment_squared(Point::new(5.0, 3.0), a, b) - 9.0).abs() < 1e-9);
        // Beyond the endpoint, distance is to the endpoint.
        assert!((distance_to_segment_squared(Point::new(13.0, 4.0), a, b) - 25.0).abs() < 1e-9);
    }
}
