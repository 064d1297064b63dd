//! Display-scale layout for the authoring surface.
//!
//! The source image is rendered at the width of its container, not at
//! its native resolution. Both raster layers (image and stroke) are
//! allocated at these *display* dimensions and must always match —
//! [`crate::surface::MaskSurface`] enforces that by deriving both from
//! a single call to [`display_dimensions`] on every load and resize.

use crate::types::Dimensions;

/// Compute the displayed dimensions for a source image inside a
/// container of the given width.
///
/// `scale = container_width / natural.width`; the height follows the
/// aspect ratio. Both results are clamped to at least 1 pixel so a
/// degenerate container still yields allocatable buffers.
#[must_use]
pub fn display_dimensions(natural: Dimensions, container_width: u32) -> Dimensions {
    let width = container_width.max(1);
    let scale = f64::from(width) / f64::from(natural.width.max(1));
    let height = f64::from(natural.height) * scale;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Dimensions {
        width,
        height: (height.round() as u32).max(1),
    }
}

/// The ratio between displayed width and native width.
#[must_use]
pub fn display_scale(natural: Dimensions, container_width: u32) -> f64 {
    f64::from(container_width.max(1)) / f64::from(natural.width.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downscale_by_half() {
        let natural = Dimensions {
            width: 800,
            height: 600,
        };
        let display = display_dimensions(natural, 400);
        assert_eq!(
            display,
            Dimensions {
                width: 400,
                height: 300
            }
        );
        assert!((display_scale(natural, 400) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn upscale_preserves_aspect() {
        let natural = Dimensions {
            width: 200,
            height: 100,
        };
        let display = display_dimensions(natural, 600);
        assert_eq!(
            display,
            Dimensions {
                width: 600,
                height: 300
            }
        );
    }

    #[test]
    fn non_integral_height_rounds() {
        let natural = Dimensions {
            width: 3,
            height: 2,
        };
        // scale = 100/3, height = 2 * 100/3 = 66.66... -> 67
        let display = display_dimensions(natural, 100);
        assert_eq!(display.height, 67);
    }

    #[test]
    fn zero_container_clamps_to_one_pixel() {
        let natural = Dimensions {
            width: 800,
            height: 600,
        };
        let display = display_dimensions(natural, 0);
        assert_eq!(display.width, 1);
        assert!(display.height >= 1);
    }

    #[test]
    fn tiny_result_height_clamps_to_one() {
        let natural = Dimensions {
            width: 10_000,
            height: 1,
        };
        let display = display_dimensions(natural, 100);
        assert_eq!(display.height, 1);
    }
}
