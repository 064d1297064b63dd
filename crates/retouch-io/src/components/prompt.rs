//! Free-text prompt entry for the edit operation.

use dioxus::prelude::*;

/// Props for the [`PromptInput`] component.
#[derive(Props, Clone, PartialEq)]
pub struct PromptInputProps {
    /// Current prompt text.
    prompt: String,
    /// Fired with the full text on every edit.
    on_change: EventHandler<String>,
}

/// A labeled textarea describing what the selected region should become.
#[component]
pub fn PromptInput(props: PromptInputProps) -> Element {
    rsx! {
        div { class: "prompt-input",
            label { r#for: "prompt", class: "prompt-label",
                "Describe your edit"
            }
            textarea {
                id: "prompt",
                class: "prompt-textarea",
                rows: "3",
                placeholder: "e.g., replace the sky with a sunset",
                value: "{props.prompt}",
                oninput: move |evt| props.on_change.call(evt.value()),
            }
        }
    }
}
