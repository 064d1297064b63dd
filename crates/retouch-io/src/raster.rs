//! Raster presentation: Blob URLs and `<canvas>` pixel transfer.
//!
//! Converts RGBA buffers from `retouch-mask` into browser-displayable
//! form, either as PNG Blob object URLs for `<img src>` or by writing
//! pixels straight into a `<canvas>` backing store via `putImageData`.

use image::{ImageEncoder, RgbaImage};
use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::BlobPropertyBag;

/// Errors that can occur during raster presentation.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    PngEncode(String),

    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for RasterError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

impl From<image::ImageError> for RasterError {
    fn from(err: image::ImageError) -> Self {
        Self::PngEncode(err.to_string())
    }
}

/// Encode an `RgbaImage` as a PNG Blob URL for use as an `<img src>`.
///
/// The returned URL must be revoked via [`revoke_blob_url`] when no
/// longer needed to avoid memory leaks.
///
/// # Errors
///
/// Returns [`RasterError::PngEncode`] if PNG encoding fails.
/// Returns [`RasterError::JsError`] if Blob or URL creation fails.
pub fn rgba_image_to_blob_url(image: &RgbaImage) -> Result<String, RasterError> {
    let mut png_bytes = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
    encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ExtendedColorType::Rgba8,
    )?;
    bytes_to_blob_url(&png_bytes, "image/png")
}

/// Create an object URL for already-encoded image bytes.
///
/// Used for edit-service results, which arrive as encoded PNG bytes.
/// The returned URL must be revoked via [`revoke_blob_url`].
///
/// # Errors
///
/// Returns [`RasterError::JsError`] if Blob or URL creation fails.
pub fn bytes_to_blob_url(bytes: &[u8], mime_type: &str) -> Result<String, RasterError> {
    let uint8_array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&uint8_array);

    let opts = BlobPropertyBag::new();
    opts.set_type(mime_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;

    let url = web_sys::Url::create_object_url_with_blob(&blob)?;
    Ok(url)
}

/// Revoke a Blob URL previously created by this module.
///
/// Best-effort: failures are silently ignored since the URL may have
/// already been revoked or garbage collected.
pub fn revoke_blob_url(url: &str) {
    let _ = web_sys::Url::revoke_object_url(url);
}

/// Write an RGBA buffer into the `<canvas>` with the given element id.
///
/// Resizes the canvas backing store to the buffer's dimensions (so one
/// CSS pixel maps to one buffer pixel when the canvas is styled at its
/// natural size) and transfers the pixels with `putImageData`.
///
/// # Errors
///
/// Returns [`RasterError::JsError`] if the element is missing, is not a
/// canvas, or any canvas API call fails.
pub fn present_to_canvas(canvas_id: &str, image: &RgbaImage) -> Result<(), RasterError> {
    let canvas = canvas_by_id(canvas_id)?;
    canvas.set_width(image.width());
    canvas.set_height(image.height());

    let context = canvas
        .get_context("2d")?
        .ok_or_else(|| RasterError::JsError(format!("no 2d context for #{canvas_id}")))?
        .dyn_into::<web_sys::CanvasRenderingContext2d>()
        .map_err(|_| RasterError::JsError("2d context has unexpected type".into()))?;

    let data = web_sys::ImageData::new_with_u8_clamped_array_and_sh(
        Clamped(image.as_raw()),
        image.width(),
        image.height(),
    )?;
    context.put_image_data(&data, 0.0, 0.0)?;
    Ok(())
}

/// On-screen box of an element, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRect {
    /// Distance from the viewport's left edge.
    pub left: f64,
    /// Distance from the viewport's top edge.
    pub top: f64,
    /// Rendered width.
    pub width: f64,
    /// Rendered height.
    pub height: f64,
}

/// Read an element's bounding client rect by id.
///
/// Used to convert viewport pointer coordinates into element-local
/// coordinates and to measure container widths for layout.
///
/// # Errors
///
/// Returns [`RasterError::JsError`] if the document or element is
/// unavailable.
pub fn element_rect(element_id: &str) -> Result<ElementRect, RasterError> {
    let element = element_by_id(element_id)?;
    let rect = element.get_bounding_client_rect();
    Ok(ElementRect {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    })
}

/// Look up a `<canvas>` element by id.
fn canvas_by_id(canvas_id: &str) -> Result<web_sys::HtmlCanvasElement, RasterError> {
    element_by_id(canvas_id)?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| RasterError::JsError(format!("#{canvas_id} is not a canvas")))
}

fn element_by_id(element_id: &str) -> Result<web_sys::Element, RasterError> {
    let window =
        web_sys::window().ok_or_else(|| RasterError::JsError("no global window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| RasterError::JsError("no document".into()))?;
    document
        .get_element_by_id(element_id)
        .ok_or_else(|| RasterError::JsError(format!("no element with id {element_id:?}")))
}
