//! retouch-io: Browser I/O and Dioxus component library.
//!
//! Handles file uploads, Blob downloads, canvas presentation of raster
//! layers, document-level pointer listeners, the remote edit service
//! client, starred-image persistence, and the reusable UI components
//! for the retouch web application.

pub mod components;
pub mod download;
pub mod listeners;
pub mod raster;
pub mod service;
pub mod storage;

pub use components::{BeforeAfter, FileUpload, MaskEditor, PromptInput, StarredGallery};
pub use listeners::{DocumentDragListeners, WindowResizeListener};
pub use service::{EditError, ServiceConfig};
