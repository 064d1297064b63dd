//! Mask authoring component: two stacked canvases plus tool controls.
//!
//! The lower canvas shows the photo at display scale; the upper one
//! shows the accumulated stroke coverage and receives pointer input.
//! All pixel state lives in a shared [`MaskSurface`] signal owned by
//! the app (extraction needs it at generate time); this component turns
//! pointer events into stroke calls and pushes the resulting buffers to
//! the canvases.
//!
//! Presentation failures (missing canvas, no 2d context) are logged to
//! the console and degrade to no-ops — a broken preview must not take
//! down the session.

use std::rc::Rc;

use dioxus::prelude::*;
use retouch_mask::{MaskSurface, Point, Tool};

use crate::listeners::WindowResizeListener;
use crate::raster;

/// Element id of the read-only photo canvas.
pub const IMAGE_CANVAS_ID: &str = "retouch-image-layer";

/// Element id of the stroke canvas (the pointer target).
pub const STROKE_CANVAS_ID: &str = "retouch-stroke-layer";

/// Element id of the container whose width drives display scale.
pub const SURFACE_CONTAINER_ID: &str = "retouch-editor-surface";

/// Props for the [`MaskEditor`] component.
#[derive(Props, Clone, PartialEq)]
pub struct MaskEditorProps {
    /// The shared authoring surface. The app owns it so extraction can
    /// read the stroke layer when the user hits Generate.
    surface: Signal<MaskSurface>,
    /// Raw bytes of the uploaded photo; a new value starts a new
    /// editing session.
    image_bytes: Signal<Option<Rc<Vec<u8>>>>,
}

/// Interactive mask painting over the uploaded photo.
#[component]
pub fn MaskEditor(props: MaskEditorProps) -> Element {
    let mut surface = props.surface;
    let image_bytes = props.image_bytes;

    // (Re)load the surface whenever a new photo arrives. Runs after the
    // canvases are mounted, so the container is measurable.
    //
    // Only `image_bytes` is read reactively. The surface itself is
    // accessed through `peek`: the pointer handlers write it on every
    // stroke segment, and a tracked read here would re-trigger the
    // load and wipe the accumulating stroke layer.
    use_effect(move || {
        let Some(bytes) = image_bytes() else {
            return;
        };
        let width = container_width();
        let result = surface.write().load(&bytes, width);
        match result {
            Ok(()) => present_all(&surface.peek()),
            Err(e) => log_warn(&format!("failed to load image: {e}")),
        }
    });

    // Window resizes recalibrate both layers for the component's
    // lifetime; the guard detaches the listener on unmount.
    let _resize_guard = use_hook(|| {
        Rc::new(
            WindowResizeListener::attach(move || {
                let width = container_width();
                let result = surface.write().resize(width);
                match result {
                    Ok(()) => present_all(&surface.read()),
                    Err(e) => log_warn(&format!("resize skipped: {e}")),
                }
            })
            .map_err(|e| log_warn(&format!("resize listener not attached: {e}")))
            .ok(),
        )
    });

    let tool = surface.read().tool_state().tool;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let brush_diameter = (surface.read().tool_state().brush_radius() * 2.0).round() as u32;

    rsx! {
        div { class: "mask-editor",
            // The measured container holds only the two canvases, so
            // the absolutely positioned stroke canvas covers exactly
            // the photo's box and its CSS pixels map 1:1 onto buffer
            // pixels.
            div { id: SURFACE_CONTAINER_ID, class: "editor-surface",
                canvas { id: IMAGE_CANVAS_ID, class: "editor-layer editor-photo" }
                canvas {
                    id: STROKE_CANVAS_ID,
                    class: "editor-layer editor-strokes",
                    style: "touch-action: none;",

                    onmousedown: move |evt| {
                        evt.prevent_default();
                        let coords = evt.element_coordinates();
                        surface.write().begin_stroke(Point::new(coords.x, coords.y));
                        present_strokes(&surface.read());
                    },
                    onmousemove: move |evt| {
                        if surface.read().is_drawing() {
                            let coords = evt.element_coordinates();
                            surface.write().continue_stroke(Point::new(coords.x, coords.y));
                            present_strokes(&surface.read());
                        }
                    },
                    onmouseup: move |_| surface.write().end_stroke(),
                    onmouseleave: move |_| surface.write().end_stroke(),

                    ontouchstart: move |evt| {
                        evt.prevent_default();
                        if let Some(point) = first_touch_point(&evt) {
                            surface.write().begin_stroke(point);
                            present_strokes(&surface.read());
                        }
                    },
                    ontouchmove: move |evt| {
                        evt.prevent_default();
                        if surface.read().is_drawing()
                            && let Some(point) = first_touch_point(&evt)
                        {
                            surface.write().continue_stroke(point);
                            present_strokes(&surface.read());
                        }
                    },
                    ontouchend: move |_| surface.write().end_stroke(),
                }
            }

            div { class: "tool-palette",
                button {
                    class: if tool == Tool::Brush { "tool-button active" } else { "tool-button" },
                    title: "Brush",
                    onclick: move |_| surface.write().set_tool(Tool::Brush),
                    BrushIcon {}
                }
                button {
                    class: if tool == Tool::Eraser { "tool-button active" } else { "tool-button" },
                    title: "Eraser",
                    onclick: move |_| surface.write().set_tool(Tool::Eraser),
                    EraserIcon {}
                }
                button {
                    class: "tool-button",
                    title: "Clear Mask",
                    onclick: move |_| {
                        surface.write().clear_mask();
                        present_strokes(&surface.read());
                    },
                    TrashIcon {}
                }
                input {
                    r#type: "range",
                    class: "brush-size",
                    title: "Brush size",
                    min: "5",
                    max: "100",
                    value: "{brush_diameter}",
                    oninput: move |evt| {
                        if let Ok(diameter) = evt.value().parse::<f64>() {
                            surface.write().set_brush_radius(diameter / 2.0);
                        }
                    },
                }
            }
        }
    }
}

/// Current width of the editor container, falling back to the stroke
/// canvas and then a fixed default when nothing is measurable yet.
fn container_width() -> u32 {
    let rect = raster::element_rect(SURFACE_CONTAINER_ID)
        .or_else(|_| raster::element_rect(STROKE_CANVAS_ID));
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    match rect {
        Ok(rect) if rect.width >= 1.0 => rect.width.round() as u32,
        _ => 640,
    }
}

/// The first active touch, in stroke-layer-local coordinates.
fn first_touch_point(evt: &TouchEvent) -> Option<Point> {
    let touch = evt.touches().into_iter().next()?;
    let client = touch.client_coordinates();
    let rect = raster::element_rect(STROKE_CANVAS_ID).ok()?;
    Some(Point::new(client.x - rect.left, client.y - rect.top))
}

/// Push both layers to their canvases (after load/resize).
fn present_all(surface: &MaskSurface) {
    if let Some(image) = surface.image_layer()
        && let Err(e) = raster::present_to_canvas(IMAGE_CANVAS_ID, image)
    {
        log_warn(&format!("photo layer not presented: {e}"));
    }
    present_strokes(surface);
}

/// Push the stroke layer to its canvas (after every stroke segment).
fn present_strokes(surface: &MaskSurface) {
    if let Some(strokes) = surface.stroke_layer()
        && let Err(e) = raster::present_to_canvas(STROKE_CANVAS_ID, strokes)
    {
        log_warn(&format!("stroke layer not presented: {e}"));
    }
}

fn log_warn(message: &str) {
    web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(message));
}

/// Brush glyph (inline SVG, stroke inherits `currentColor`).
#[component]
fn BrushIcon() -> Element {
    rsx! {
        svg {
            xmlns: "http://www.w3.org/2000/svg",
            class: "tool-icon",
            view_box: "0 0 24 24",
            fill: "none",
            stroke: "currentColor",
            stroke_width: "2",
            path {
                stroke_linecap: "round",
                stroke_linejoin: "round",
                d: "M9.53 16.122a3 3 0 0 0-5.78 1.128 2.25 2.25 0 0 1-2.4 2.245 4.5 4.5 0 0 0 8.4-2.245c0-.399-.078-.78-.22-1.128Zm0 0a15.998 15.998 0 0 0 3.388-1.62m-5.043-.025a15.994 15.994 0 0 1 1.622-3.395m3.42 3.42a15.995 15.995 0 0 0 4.764-4.648l3.876-5.814a1.151 1.151 0 0 0-1.597-1.597L14.146 6.32a15.996 15.996 0 0 0-4.649 4.763m3.42 3.42a6.776 6.776 0 0 0-3.42-3.42",
            }
        }
    }
}

/// Eraser glyph.
#[component]
fn EraserIcon() -> Element {
    rsx! {
        svg {
            xmlns: "http://www.w3.org/2000/svg",
            class: "tool-icon",
            view_box: "0 0 24 24",
            fill: "none",
            stroke: "currentColor",
            stroke_width: "2",
            path {
                stroke_linecap: "round",
                stroke_linejoin: "round",
                d: "m7 21-4.3-4.3c-1-1-1-2.5 0-3.4l9.6-9.6c1-1 2.5-1 3.4 0l5.6 5.6c1 1 1 2.5 0 3.4L13 21",
            }
            path { d: "M22 21H7" }
            path { d: "m5 11 9 9" }
        }
    }
}

/// Trash glyph for the clear-mask button.
#[component]
fn TrashIcon() -> Element {
    rsx! {
        svg {
            xmlns: "http://www.w3.org/2000/svg",
            class: "tool-icon",
            view_box: "0 0 24 24",
            fill: "none",
            stroke: "currentColor",
            stroke_width: "2",
            path {
                stroke_linecap: "round",
                stroke_linejoin: "round",
                d: "M19 7l-.867 12.142A2 2 0 0 1 16.138 21H7.862a2 2 0 0 1-1.995-1.858L5 7m5 4v6m4-6v6m1-10V4a1 1 0 0 0-1-1h-4a1 1 0 0 0-1 1v3M4 7h16",
            }
        }
    }
}
