//! Starred-image persistence in `localStorage`.
//!
//! Starred results are stored as a JSON array of data URLs under one
//! key. Corrupt payloads are cleared rather than propagated — losing a
//! favorites list beats wedging the app on every load.

use wasm_bindgen::JsValue;

/// The `localStorage` key holding the starred-image list.
const STORAGE_KEY: &str = "starredImages";

/// Errors that can occur while persisting starred images.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A browser API call returned an error or storage is unavailable.
    #[error("storage API error: {0}")]
    JsError(String),

    /// The list could not be serialized.
    #[error("failed to serialize starred images: {0}")]
    Serialize(String),
}

impl From<JsValue> for StorageError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Load the starred-image list.
///
/// Returns an empty list when nothing is stored, when storage is
/// unavailable, or when the stored payload is corrupt (in which case
/// the bad entry is removed).
#[must_use]
pub fn load_starred() -> Vec<String> {
    let Ok(storage) = local_storage() else {
        return Vec::new();
    };
    let Ok(Some(raw)) = storage.get_item(STORAGE_KEY) else {
        return Vec::new();
    };
    match serde_json::from_str(&raw) {
        Ok(images) => images,
        Err(_) => {
            let _ = storage.remove_item(STORAGE_KEY);
            Vec::new()
        }
    }
}

/// Persist the starred-image list.
///
/// # Errors
///
/// Returns [`StorageError::Serialize`] if JSON encoding fails and
/// [`StorageError::JsError`] if storage is unavailable or the write is
/// rejected (e.g., quota exceeded).
pub fn save_starred(images: &[String]) -> Result<(), StorageError> {
    let raw = serde_json::to_string(images).map_err(|e| StorageError::Serialize(e.to_string()))?;
    let storage = local_storage()?;
    storage.set_item(STORAGE_KEY, &raw)?;
    Ok(())
}

/// Add `image` to the list if absent, remove it if present.
///
/// Returns `true` if the image is starred after the toggle. Pure —
/// persistence is the caller's follow-up via [`save_starred`].
pub fn toggle_starred(images: &mut Vec<String>, image: &str) -> bool {
    if let Some(index) = images.iter().position(|existing| existing == image) {
        images.remove(index);
        false
    } else {
        images.push(image.to_owned());
        true
    }
}

fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .ok_or_else(|| StorageError::JsError("no global window".into()))?
        .local_storage()?
        .ok_or_else(|| StorageError::JsError("localStorage unavailable".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut images = Vec::new();
        assert!(toggle_starred(&mut images, "a"));
        assert_eq!(images, vec!["a".to_owned()]);

        assert!(toggle_starred(&mut images, "b"));
        assert_eq!(images.len(), 2);

        // Toggling an existing entry removes it, preserving the rest.
        assert!(!toggle_starred(&mut images, "a"));
        assert_eq!(images, vec!["b".to_owned()]);
    }

    #[test]
    fn toggle_is_an_involution() {
        let mut images = vec!["x".to_owned()];
        toggle_starred(&mut images, "y");
        toggle_starred(&mut images, "y");
        assert_eq!(images, vec!["x".to_owned()]);
    }
}
