use std::rc::Rc;

use dioxus::prelude::*;
use retouch_io::{
    BeforeAfter, FileUpload, MaskEditor, PromptInput, StarredGallery, download, raster, service,
    storage,
};
use retouch_mask::{MaskError, MaskSurface, extract_mask_png, to_base64};

fn main() {
    dioxus::launch(app);
}

/// Root application component.
///
/// Manages the core application state via Dioxus signals and wires
/// together the upload, mask editor, prompt, comparator, and gallery
/// components.
#[allow(clippy::too_many_lines)]
fn app() -> Element {
    // --- Application state ---
    let mut surface = use_signal(MaskSurface::new);
    let mut image_bytes = use_signal(|| Option::<Rc<Vec<u8>>>::None);
    let mut image_mime = use_signal(|| "image/png");
    let mut original_url = use_signal(|| Option::<String>::None);
    let mut edited_png = use_signal(|| Option::<Rc<Vec<u8>>>::None);
    let mut edited_url = use_signal(|| Option::<String>::None);
    let mut prompt = use_signal(String::new);
    let mut busy = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let mut starred = use_signal(storage::load_starred);
    let mut show_gallery = use_signal(|| false);
    let mut generation = use_signal(|| 0u64);

    // --- File upload handler ---
    let on_upload = move |(bytes, _name): (Vec<u8>, String)| {
        let mime = service::sniff_mime(&bytes);
        match raster::bytes_to_blob_url(&bytes, mime) {
            Ok(url) => {
                if let Some(old) = original_url.take() {
                    raster::revoke_blob_url(&old);
                }
                original_url.set(Some(url));
            }
            Err(e) => log_warn(&format!("photo preview unavailable: {e}")),
        }
        if let Some(old) = edited_url.take() {
            raster::revoke_blob_url(&old);
        }
        edited_png.set(None);
        error.set(None);
        image_mime.set(mime);
        // MaskEditor reloads the surface when it sees the new bytes.
        image_bytes.set(Some(Rc::new(bytes)));
    };

    // --- Generate handler ---
    // Extracts the painted mask up front so validation errors surface
    // immediately, then spawns the remote edit. The generation counter
    // lets a Start Over or a re-submit invalidate in-flight work.
    let on_generate = move |_| {
        let text = prompt.peek().trim().to_owned();
        if text.is_empty() {
            error.set(Some("Describe the change you want to make.".into()));
            return;
        }
        let Some(bytes) = image_bytes.peek().clone() else {
            error.set(Some("Upload a photo first.".into()));
            return;
        };
        let mask_png = match extract_mask_png(&surface.peek()) {
            Ok(mask) => mask,
            Err(MaskError::EmptyMask) => {
                error.set(Some("Paint over the area you want to change first.".into()));
                return;
            }
            Err(e) => {
                error.set(Some(format!("{e}")));
                return;
            }
        };
        let mime = *image_mime.peek();

        generation += 1;
        let my_generation = *generation.peek();
        busy.set(true);
        error.set(None);

        spawn(async move {
            // Yield to the browser event loop so the busy indicator
            // paints before the request body is serialized.
            gloo_timers::future::TimeoutFuture::new(0).await;

            let config = service::ServiceConfig::default();
            let outcome = service::edit_image(&config, &bytes, mime, &mask_png, &text).await;

            // A newer submission or a reset supersedes this one.
            if *generation.peek() != my_generation {
                return;
            }

            match outcome {
                Ok(edited) => {
                    match raster::bytes_to_blob_url(&edited, service::sniff_mime(&edited)) {
                        Ok(url) => {
                            if let Some(old) = edited_url.take() {
                                raster::revoke_blob_url(&old);
                            }
                            edited_url.set(Some(url));
                        }
                        Err(e) => log_warn(&format!("result preview unavailable: {e}")),
                    }
                    edited_png.set(Some(Rc::new(edited)));
                }
                Err(e) => error.set(Some(format!("{e}"))),
            }
            busy.set(false);
        });
    };

    // --- Start over handler ---
    let on_start_over = move |_| {
        generation += 1;
        if let Some(old) = original_url.take() {
            raster::revoke_blob_url(&old);
        }
        if let Some(old) = edited_url.take() {
            raster::revoke_blob_url(&old);
        }
        surface.set(MaskSurface::new());
        image_bytes.set(None);
        edited_png.set(None);
        prompt.set(String::new());
        busy.set(false);
        error.set(None);
    };

    // --- Result actions ---
    let on_download = move |_| {
        if let Some(bytes) = edited_png.peek().clone()
            && let Err(e) = download::trigger_download(&bytes, "retouched.png", "image/png")
        {
            error.set(Some(format!("{e}")));
        }
    };

    // Data URL form of the current result, recomputed only when the
    // result changes. Re-encoding a multi-megabyte PNG as base64 on
    // every render is far too heavy.
    let edited_data_url = use_memo(move || {
        edited_png
            .read()
            .as_ref()
            .map(|bytes| format!("data:image/png;base64,{}", to_base64(bytes)))
    });

    let on_star = move |_| {
        let Some(data_url) = edited_data_url.peek().clone() else {
            return;
        };
        let mut list = starred.write();
        storage::toggle_starred(&mut list, &data_url);
        if let Err(e) = storage::save_starred(&list) {
            log_warn(&format!("starred images not saved: {e}"));
        }
    };

    let on_unstar = move |url: String| {
        let mut list = starred.write();
        storage::toggle_starred(&mut list, &url);
        if let Err(e) = storage::save_starred(&list) {
            log_warn(&format!("starred images not saved: {e}"));
        }
    };

    // Whether the currently displayed result is in the starred list.
    let is_starred = edited_data_url
        .read()
        .as_ref()
        .is_some_and(|url| starred.read().contains(url));
    let starred_count = starred.read().len();

    // --- Layout ---
    rsx! {
        style { dangerous_inner_html: include_str!("../assets/app.css") }

        div { class: "app",
            header { class: "app-header",
                div {
                    h1 { class: "app-title", "retouch" }
                    p { class: "app-tagline", "Paint over a photo, describe the change, compare the result" }
                }
                button {
                    class: "header-button",
                    onclick: move |_| show_gallery.set(true),
                    "Starred ({starred_count})"
                }
            }

            main { class: "app-main",
                if image_bytes.read().is_none() {
                    FileUpload { on_upload }
                } else {
                    MaskEditor { surface, image_bytes }

                    PromptInput {
                        prompt: prompt(),
                        on_change: move |text| prompt.set(text),
                    }

                    div { class: "action-row",
                        button {
                            class: "primary-button",
                            disabled: busy(),
                            onclick: on_generate,
                            if busy() { "Generating..." } else { "Generate" }
                        }
                        button {
                            class: "secondary-button",
                            onclick: on_start_over,
                            "Start over"
                        }
                    }

                    if let Some(ref err) = error() {
                        p { class: "error-text", "{err}" }
                    }

                    if let (Some(ref before), Some(ref after)) = (original_url(), edited_url()) {
                        section { class: "result-section",
                            h2 { class: "section-title", "Result" }
                            BeforeAfter {
                                original_url: before.clone(),
                                edited_url: after.clone(),
                            }
                            div { class: "action-row",
                                button {
                                    class: "secondary-button",
                                    onclick: on_download,
                                    "Download"
                                }
                                button {
                                    class: "secondary-button",
                                    onclick: on_star,
                                    if is_starred { "\u{2605} Starred" } else { "\u{2606} Star" }
                                }
                            }
                        }
                    }
                }
            }

            if show_gallery() {
                StarredGallery {
                    images: starred(),
                    on_close: move |()| show_gallery.set(false),
                    on_unstar,
                }
            }
        }
    }
}

fn log_warn(message: &str) {
    web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(message));
}
