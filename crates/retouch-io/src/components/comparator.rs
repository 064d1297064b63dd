//! Before/after comparison slider.
//!
//! Renders the original photo full-width with the edited result clipped
//! to the left `reveal_percent()` of the container, plus a draggable
//! divider handle. Drag state lives in [`retouch_mask::Comparator`];
//! this component wires pointer events to it.
//!
//! Pointer tracking is document-scoped: the listeners are acquired on
//! mount and released on unmount, and the state machine ignores moves
//! while idle. That way a fast pointer leaving the handle's hit area
//! never drops the drag, and repeated mounts never leak listeners.

use std::rc::Rc;

use dioxus::prelude::*;
use retouch_mask::Comparator;

use crate::listeners::DocumentDragListeners;
use crate::raster;

/// Element id of the comparator container (the drag coordinate frame).
pub const COMPARATOR_CONTAINER_ID: &str = "retouch-comparator";

/// Props for the [`BeforeAfter`] component.
#[derive(Props, Clone, PartialEq)]
pub struct BeforeAfterProps {
    /// Displayable URL of the original photo.
    original_url: String,
    /// Displayable URL of the edited result.
    edited_url: String,
}

/// Drag-to-reveal comparison of the original and edited images.
#[component]
pub fn BeforeAfter(props: BeforeAfterProps) -> Element {
    let mut comparator = use_signal(Comparator::new);

    // Document-level drag tracking for the component's lifetime. Moves
    // while no drag is active are absorbed by the state machine.
    let _drag_guard = use_hook(|| {
        Rc::new(
            DocumentDragListeners::attach(
                move |client_x| match raster::element_rect(COMPARATOR_CONTAINER_ID) {
                    Ok(rect) => {
                        comparator
                            .write()
                            .drag_move(client_x, rect.left, rect.width);
                    }
                    Err(e) => log_warn(&format!("comparator not measurable: {e}")),
                },
                move || comparator.write().drag_end(),
            )
            .map_err(|e| log_warn(&format!("drag listeners not attached: {e}")))
            .ok(),
        )
    });

    let position = comparator.read().reveal_percent();
    let clip = format!("clip-path: inset(0 {:.2}% 0 0);", 100.0 - position);
    let handle_left = format!("left: {position:.2}%;");

    rsx! {
        div {
            id: COMPARATOR_CONTAINER_ID,
            class: "comparator",
            style: "touch-action: none;",

            img {
                class: "comparator-image",
                src: "{props.original_url}",
                alt: "Original",
                draggable: "false",
            }
            div { class: "comparator-reveal", style: "{clip}",
                img {
                    class: "comparator-image",
                    src: "{props.edited_url}",
                    alt: "Edited",
                    draggable: "false",
                }
                span { class: "comparator-tag edited", "Edited" }
            }
            span { class: "comparator-tag original", "Original" }

            div {
                class: "comparator-handle",
                style: "{handle_left}",
                onmousedown: move |evt| {
                    evt.prevent_default();
                    comparator.write().drag_start();
                },
                ontouchstart: move |evt| {
                    evt.prevent_default();
                    comparator.write().drag_start();
                },
                div { class: "comparator-knob",
                    svg {
                        xmlns: "http://www.w3.org/2000/svg",
                        class: "comparator-arrows",
                        view_box: "0 0 24 24",
                        fill: "none",
                        stroke: "currentColor",
                        stroke_width: "3",
                        path {
                            stroke_linecap: "round",
                            stroke_linejoin: "round",
                            d: "M9 8l-4 4 4 4m6-8l4 4-4 4",
                        }
                    }
                }
            }
        }
    }
}

fn log_warn(message: &str) {
    web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(message));
}
