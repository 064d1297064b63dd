//! retouch-mask: Pure raster mask authoring and extraction (sans-IO).
//!
//! Turns pointer gestures into a precise binary mask suitable for an
//! inpainting API: paint/erase strokes accumulate in a translucent
//! stroke layer aligned with the displayed photo, and extraction
//! binarizes that coverage into PNG bytes. Also owns the before/after
//! comparator's drag state.
//!
//! This crate has **no I/O dependencies** — it operates on in-memory
//! raster buffers and returns structured data. All browser interaction
//! (canvas presentation, pointer events, the edit-service call) lives
//! in `retouch-io`.

pub mod compare;
pub mod extract;
pub mod layout;
pub mod stroke;
pub mod surface;
pub mod types;

pub use compare::{Comparator, DragState};
pub use extract::{encode_png, extract_mask, extract_mask_png, resample_to_native, to_base64};
pub use surface::{DrawState, MaskSurface};
pub use types::{Dimensions, MaskError, Point, RgbaImage, Tool, ToolState};
