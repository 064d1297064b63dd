//! Modal gallery of starred results.

use dioxus::prelude::*;

/// Props for the [`StarredGallery`] component.
#[derive(Props, Clone, PartialEq)]
pub struct StarredGalleryProps {
    /// Starred images as displayable data URLs, newest first.
    images: Vec<String>,
    /// Invoked when the user dismisses the gallery.
    on_close: EventHandler<()>,
    /// Invoked with the data URL of an image to unstar.
    on_unstar: EventHandler<String>,
}

/// Overlay listing every starred result with download and unstar
/// actions. Clicking the backdrop closes it; clicks inside the panel
/// do not propagate.
#[component]
pub fn StarredGallery(props: StarredGalleryProps) -> Element {
    rsx! {
        div {
            class: "gallery-backdrop",
            onclick: move |_| props.on_close.call(()),
            div {
                class: "gallery-panel",
                onclick: move |evt| evt.stop_propagation(),
                div { class: "gallery-header",
                    h2 { "Starred images" }
                    button {
                        class: "gallery-close",
                        onclick: move |_| props.on_close.call(()),
                        "\u{2715}"
                    }
                }
                if props.images.is_empty() {
                    p { class: "gallery-empty", "Nothing starred yet." }
                } else {
                    div { class: "gallery-grid",
                        for (index, url) in props.images.iter().cloned().enumerate() {
                            GalleryItem {
                                key: "{url}",
                                url,
                                index,
                                on_unstar: props.on_unstar,
                            }
                        }
                    }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct GalleryItemProps {
    url: String,
    index: usize,
    on_unstar: EventHandler<String>,
}

#[component]
fn GalleryItem(props: GalleryItemProps) -> Element {
    let unstar_url = props.url.clone();
    let ordinal = props.index + 1;
    rsx! {
        div { class: "gallery-item",
            img {
                class: "gallery-image",
                src: "{props.url}",
                alt: "Starred result {ordinal}",
            }
            div { class: "gallery-actions",
                a {
                    class: "gallery-action",
                    href: "{props.url}",
                    download: "starred-{ordinal}.png",
                    "Download"
                }
                button {
                    class: "gallery-action",
                    onclick: move |_| props.on_unstar.call(unstar_url.clone()),
                    "Unstar"
                }
            }
        }
    }
}
