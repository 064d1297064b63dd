//! Mask extraction: stroke coverage → strict binary mask → PNG bytes.
//!
//! The stroke layer is drawn with a translucent brush so the user sees
//! live feedback; the inpainting service expects exactly two classes of
//! pixel (edit vs. keep). Extraction bridges the two: it composites the
//! stroke layer over an opaque black buffer and then forces every pixel
//! with *any* alpha coverage to fully opaque white. Do not collapse this
//! into drawing in binary directly — the translucent live overlay is a
//! usability requirement.
//!
//! The mask is never retained; it is recomputed from the stroke layer
//! on every extraction request.

use base64::Engine as _;
use image::{ImageEncoder, Rgba, RgbaImage};
use image::imageops::FilterType;

use crate::surface::MaskSurface;
use crate::types::{Dimensions, MaskError};

/// Extract a strict binary mask from the stroke layer.
///
/// Every output pixel is exactly opaque black `(0,0,0,255)` (keep) or
/// opaque white `(255,255,255,255)` (edit), regardless of how much
/// partial or overlapping coverage produced the input alpha. The output
/// has the stroke layer's dimensions, i.e. *display* resolution.
///
/// # Errors
///
/// Returns [`MaskError::EmptyMask`] when every byte of the stroke layer
/// is zero — "no region selected" is an expected, frequent state that
/// callers surface as a user prompt, not a fault.
pub fn extract_mask(stroke_layer: &RgbaImage) -> Result<RgbaImage, MaskError> {
    if stroke_layer.as_raw().iter().all(|&b| b == 0) {
        return Err(MaskError::EmptyMask);
    }

    let mut mask = RgbaImage::from_pixel(
        stroke_layer.width(),
        stroke_layer.height(),
        Rgba([0, 0, 0, 255]),
    );
    for (mask_pixel, stroke_pixel) in mask.pixels_mut().zip(stroke_layer.pixels()) {
        if stroke_pixel.0[3] > 0 {
            *mask_pixel = Rgba([255, 255, 255, 255]);
        }
    }
    Ok(mask)
}

/// Resample a binary mask to the source image's native resolution.
///
/// The stroke layer lives at display scale, but the edit service pairs
/// the mask with the full-resolution original. Nearest-neighbor
/// resampling preserves binarity — no interpolated gray pixels.
#[must_use]
pub fn resample_to_native(mask: &RgbaImage, natural: Dimensions) -> RgbaImage {
    if mask.width() == natural.width && mask.height() == natural.height {
        return mask.clone();
    }
    image::imageops::resize(mask, natural.width, natural.height, FilterType::Nearest)
}

/// Encode an RGBA image as PNG bytes.
///
/// # Errors
///
/// Returns [`MaskError::PngEncode`] if the encoder fails.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, MaskError> {
    let mut png_bytes = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
    encoder
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| MaskError::PngEncode(e.to_string()))?;
    Ok(png_bytes)
}

/// Standard base64 of raw bytes, with no `data:` URL prefix.
#[must_use]
pub fn to_base64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Extract the current mask as PNG bytes at the source image's native
/// resolution: extract → resample-to-native → encode.
///
/// # Errors
///
/// Returns [`MaskError::SurfaceNotReady`] when no image is loaded
/// (defensive — the UI gates extraction, but the check must not be
/// load-bearing on that), [`MaskError::EmptyMask`] when nothing has
/// been painted, and [`MaskError::PngEncode`] on encoder failure.
pub fn extract_mask_png(surface: &MaskSurface) -> Result<Vec<u8>, MaskError> {
    let (Some(stroke_layer), Some(natural)) =
        (surface.stroke_layer(), surface.natural_dimensions())
    else {
        return Err(MaskError::SurfaceNotReady);
    };
    let mask = extract_mask(stroke_layer)?;
    let native = resample_to_native(&mask, natural);
    encode_png(&native)
}
