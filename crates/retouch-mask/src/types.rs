//! Shared types for the retouch mask engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Re-export `RgbaImage` so downstream crates can reference raster
/// layers without depending on `image` directly.
pub use image::RgbaImage;

/// Fixed brush color: translucent white, the original canvas value
/// `rgba(255, 255, 255, 0.7)`.
///
/// Purely cosmetic — it exists so the user can see the painted overlay
/// while editing. Extraction only looks at whether a pixel's alpha is
/// non-zero, never at the color itself.
pub const BRUSH_COLOR: [u8; 4] = [255, 255, 255, 178];

/// Minimum brush radius in display-space pixels.
pub const MIN_BRUSH_RADIUS: f64 = 2.5;

/// Maximum brush radius in display-space pixels.
pub const MAX_BRUSH_RADIUS: f64 = 50.0;

/// Default brush radius in display-space pixels.
pub const DEFAULT_BRUSH_RADIUS: f64 = 20.0;

/// A 2D point in stroke-layer-local coordinates (pixels from the
/// layer's top-left corner).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (pixels from left edge).
    pub x: f64,
    /// Vertical position (pixels from top edge).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Avoids the square root for comparison purposes.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.mul_add(dx, dy * dy)
    }
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// The active drawing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tool {
    /// Paint translucent coverage into the stroke layer.
    Brush,
    /// Remove coverage (zero the covered pixels).
    Eraser,
}

impl Default for Tool {
    fn default() -> Self {
        Self::Brush
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Brush => f.write_str("Brush"),
            Self::Eraser => f.write_str("Eraser"),
        }
    }
}

/// Current tool configuration for one editing session.
///
/// A single mutable value set by the UI controls; takes effect on the
/// next stroke segment, not retroactively.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolState {
    /// The active tool.
    pub tool: Tool,
    /// Brush radius in display-space pixels, always within
    /// [`MIN_BRUSH_RADIUS`]..=[`MAX_BRUSH_RADIUS`].
    brush_radius: f64,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            brush_radius: DEFAULT_BRUSH_RADIUS,
        }
    }
}

impl ToolState {
    /// `const`-context default, used by `MaskSurface::new`.
    pub(crate) const fn new_default() -> Self {
        Self {
            tool: Tool::Brush,
            brush_radius: DEFAULT_BRUSH_RADIUS,
        }
    }

    /// The current brush radius in display-space pixels.
    #[must_use]
    pub const fn brush_radius(&self) -> f64 {
        self.brush_radius
    }

    /// Set the brush radius, clamping into the valid range.
    pub fn set_brush_radius(&mut self, radius: f64) {
        self.brush_radius = radius.clamp(MIN_BRUSH_RADIUS, MAX_BRUSH_RADIUS);
    }
}

/// Errors that can occur in the mask engine.
#[derive(Debug, thiserror::Error)]
pub enum MaskError {
    /// Failed to decode the uploaded source image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The uploaded image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// Drawing, resizing, or extraction was attempted before an image
    /// was loaded. Expected to be prevented by UI gating; surfaced as a
    /// typed error so callers can fail safely instead of crashing.
    #[error("no image loaded into the authoring surface")]
    SurfaceNotReady,

    /// Extraction was requested but no pixels have been painted.
    /// A frequent, expected state — callers should prompt the user to
    /// select a region, not treat this as a fault.
    #[error("no region selected: the mask is empty")]
    EmptyMask,

    /// PNG encoding of the extracted mask failed.
    #[error("PNG encoding failed: {0}")]
    PngEncode(String),
}
