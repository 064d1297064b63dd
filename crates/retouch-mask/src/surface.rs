//! The mask authoring surface.
//!
//! [`MaskSurface`] owns the two pixel-aligned raster layers for one
//! editing session: a read-only image layer showing the photo at
//! display scale, and a mutable stroke layer accumulating paint/erase
//! input. Both layers are allocated from a single
//! [`layout::display_dimensions`] result on every load and resize, so
//! they can never diverge in size.
//!
//! Drawing is an explicit state machine ([`DrawState`]) rather than an
//! `is_drawing` flag: a `continue_stroke` while idle is an absorbed
//! no-op, not a silently half-handled event.

use image::RgbaImage;
use image::imageops::FilterType;

use crate::layout;
use crate::stroke;
use crate::types::{Dimensions, MaskError, Point, Tool, ToolState};

/// Whether a drag gesture is currently laying down a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawState {
    /// No active stroke.
    Idle,
    /// A stroke is in progress; `last` is the previous pointer position
    /// in stroke-layer-local coordinates.
    Drawing {
        /// The previous point of the active stroke.
        last: Point,
    },
}

/// Surface lifecycle: nothing loaded, or both layers allocated.
enum SurfaceState {
    /// No image has been loaded yet.
    Unloaded,
    /// Layers are allocated and the image layer is drawn.
    Ready {
        /// The decoded source at native resolution, kept so resizes can
        /// re-render the image layer without compounding resampling loss.
        source: RgbaImage,
        /// The photo resampled to display dimensions. Read-only after load.
        image_layer: RgbaImage,
        /// Accumulated paint/erase coverage. Same dimensions as
        /// `image_layer`, always.
        stroke_layer: RgbaImage,
    },
}

/// The interactive mask authoring surface for one editing session.
///
/// Created unloaded; [`load`](Self::load) decodes an uploaded image and
/// allocates both layers at display scale. Replacing the image (calling
/// `load` again) discards the previous session's layers entirely.
pub struct MaskSurface {
    state: SurfaceState,
    draw: DrawState,
    tool: ToolState,
}

impl Default for MaskSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MaskSurface {
    /// Create an empty, unloaded surface.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: SurfaceState::Unloaded,
            draw: DrawState::Idle,
            tool: ToolState::new_default(),
        }
    }

    /// Decode `bytes` and (re)allocate both layers for a container of
    /// the given width.
    ///
    /// Any previous session content — including stroke coverage — is
    /// discarded.
    ///
    /// # Errors
    ///
    /// Returns [`MaskError::EmptyInput`] for zero-length input and
    /// [`MaskError::ImageDecode`] if the bytes are not a decodable
    /// raster image.
    pub fn load(&mut self, bytes: &[u8], container_width: u32) -> Result<(), MaskError> {
        if bytes.is_empty() {
            return Err(MaskError::EmptyInput);
        }
        let source = image::load_from_memory(bytes)?.to_rgba8();
        let natural = Dimensions {
            width: source.width(),
            height: source.height(),
        };
        let display = layout::display_dimensions(natural, container_width);

        let image_layer =
            image::imageops::resize(&source, display.width, display.height, FilterType::CatmullRom);
        let stroke_layer = RgbaImage::new(display.width, display.height);

        self.state = SurfaceState::Ready {
            source,
            image_layer,
            stroke_layer,
        };
        self.draw = DrawState::Idle;
        Ok(())
    }

    /// Recompute display dimensions for a new container width and
    /// reallocate both layers in lockstep.
    ///
    /// The image layer is re-rendered from the native-resolution source;
    /// stroke content is discarded (rescaling it across a dimension
    /// change is intentionally not attempted). An active stroke is
    /// aborted.
    ///
    /// # Errors
    ///
    /// Returns [`MaskError::SurfaceNotReady`] if no image is loaded.
    pub fn resize(&mut self, container_width: u32) -> Result<(), MaskError> {
        let SurfaceState::Ready {
            source,
            image_layer,
            stroke_layer,
        } = &mut self.state
        else {
            return Err(MaskError::SurfaceNotReady);
        };

        let natural = Dimensions {
            width: source.width(),
            height: source.height(),
        };
        let display = layout::display_dimensions(natural, container_width);

        *image_layer =
            image::imageops::resize(source, display.width, display.height, FilterType::CatmullRom);
        *stroke_layer = RgbaImage::new(display.width, display.height);
        self.draw = DrawState::Idle;
        Ok(())
    }

    /// Start a new stroke at `point` (stroke-layer-local coordinates).
    ///
    /// Stamps a dot immediately so a click without movement still
    /// paints. No-op when no image is loaded.
    pub fn begin_stroke(&mut self, point: Point) {
        let tool = self.tool;
        let Some(stroke_layer) = self.stroke_layer_mut() else {
            return;
        };
        apply_segment(stroke_layer, tool, point, point);
        self.draw = DrawState::Drawing { last: point };
    }

    /// Extend the active stroke to `point`.
    ///
    /// While idle (no `begin_stroke`, or the surface is unloaded) this
    /// is a silent no-op — the illegal transition is absorbed rather
    /// than surfaced.
    pub fn continue_stroke(&mut self, point: Point) {
        let DrawState::Drawing { last } = self.draw else {
            return;
        };
        let tool = self.tool;
        let Some(stroke_layer) = self.stroke_layer_mut() else {
            return;
        };
        apply_segment(stroke_layer, tool, last, point);
        self.draw = DrawState::Drawing { last: point };
    }

    /// Close the active stroke. Idempotent.
    pub fn end_stroke(&mut self) {
        self.draw = DrawState::Idle;
    }

    /// Whether a stroke is currently in progress.
    #[must_use]
    pub const fn is_drawing(&self) -> bool {
        matches!(self.draw, DrawState::Drawing { .. })
    }

    /// Select the active tool. Takes effect on the next segment.
    pub const fn set_tool(&mut self, tool: Tool) {
        self.tool.tool = tool;
    }

    /// Set the brush radius in display-space pixels (clamped).
    pub fn set_brush_radius(&mut self, radius: f64) {
        self.tool.set_brush_radius(radius);
    }

    /// The current tool configuration.
    #[must_use]
    pub const fn tool_state(&self) -> ToolState {
        self.tool
    }

    /// Wipe the stroke layer to fully transparent. No-op when unloaded.
    pub fn clear_mask(&mut self) {
        if let Some(stroke_layer) = self.stroke_layer_mut() {
            stroke::clear(stroke_layer);
        }
        self.draw = DrawState::Idle;
    }

    /// Whether an image has been loaded.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self.state, SurfaceState::Ready { .. })
    }

    /// Native dimensions of the loaded source image.
    #[must_use]
    pub fn natural_dimensions(&self) -> Option<Dimensions> {
        match &self.state {
            SurfaceState::Unloaded => None,
            SurfaceState::Ready { source, .. } => Some(Dimensions {
                width: source.width(),
                height: source.height(),
            }),
        }
    }

    /// Current display dimensions (shared by both layers).
    #[must_use]
    pub fn display_dimensions(&self) -> Option<Dimensions> {
        self.image_layer().map(|layer| Dimensions {
            width: layer.width(),
            height: layer.height(),
        })
    }

    /// The photo at display scale, for presentation.
    #[must_use]
    pub const fn image_layer(&self) -> Option<&RgbaImage> {
        match &self.state {
            SurfaceState::Unloaded => None,
            SurfaceState::Ready { image_layer, .. } => Some(image_layer),
        }
    }

    /// The accumulated stroke coverage, for presentation and extraction.
    #[must_use]
    pub const fn stroke_layer(&self) -> Option<&RgbaImage> {
        match &self.state {
            SurfaceState::Unloaded => None,
            SurfaceState::Ready { stroke_layer, .. } => Some(stroke_layer),
        }
    }

    fn stroke_layer_mut(&mut self) -> Option<&mut RgbaImage> {
        match &mut self.state {
            SurfaceState::Unloaded => None,
            SurfaceState::Ready { stroke_layer, .. } => Some(stroke_layer),
        }
    }
}

/// Stamp one segment with the configured tool and radius.
fn apply_segment(layer: &mut RgbaImage, tool: ToolState, from: Point, to: Point) {
    match tool.tool {
        Tool::Brush => stroke::paint_segment(layer, from, to, tool.brush_radius()),
        Tool::Eraser => stroke::erase_segment(layer, from, to, tool.brush_radius()),
    }
}
