//! Dioxus UI components for retouch.
//!
//! Provides the file upload button and drag overlay, the mask authoring
//! editor with its tool palette, the prompt input, the before/after
//! comparison slider, and the starred-images gallery.

mod comparator;
mod editor;
mod gallery;
mod prompt;
mod upload;

pub use comparator::BeforeAfter;
pub use comparator::COMPARATOR_CONTAINER_ID;
pub use editor::MaskEditor;
pub use gallery::StarredGallery;
pub use prompt::PromptInput;
pub use upload::FileUpload;
