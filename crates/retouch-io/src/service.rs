//! Edit-service client: generative image editing over HTTP.
//!
//! Sends the original photo, the binary mask, and the user's prompt to
//! a Gemini-style `generateContent` endpoint and returns the edited
//! image bytes. The core treats this as one opaque operation — there
//! are no retries and no fallbacks; any failure surfaces as a single
//! [`EditError`] whose message the UI displays verbatim.
//!
//! Request/response body construction lives in pure functions so it can
//! be tested natively; only [`edit_image`] touches browser APIs.

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// The mask is always delivered as PNG, whatever the original's format.
pub const MASK_MIME_TYPE: &str = "image/png";

/// Errors from the edit operation.
///
/// Messages are user-facing: the app displays them without rewording.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    /// No API key was configured at build or run time.
    #[error("no API key configured for the edit service")]
    MissingApiKey,

    /// The request body could not be serialized.
    #[error("failed to build edit request: {0}")]
    Serialize(String),

    /// The network call failed or returned a non-success status.
    #[error("edit service request failed: {0}")]
    Http(String),

    /// The response body could not be parsed.
    #[error("unexpected edit service response: {0}")]
    InvalidResponse(String),

    /// The response parsed but contained no image part.
    #[error("no image data found in the edit service response")]
    NoImage,
}

impl From<JsValue> for EditError {
    fn from(value: JsValue) -> Self {
        Self::Http(format!("{value:?}"))
    }
}

/// Endpoint, model, and credentials for the edit service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Service origin, without a trailing slash.
    pub endpoint: String,
    /// Model identifier used in the request path.
    pub model: String,
    /// API key; `None` fails fast with [`EditError::MissingApiKey`].
    pub api_key: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com".to_owned(),
            model: "gemini-2.5-flash-image".to_owned(),
            api_key: option_env!("GEMINI_API_KEY").map(str::to_owned),
        }
    }
}

impl ServiceConfig {
    /// The full `generateContent` URL, including the key.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::MissingApiKey`] when no key is configured.
    pub fn request_url(&self) -> Result<String, EditError> {
        let key = self.api_key.as_deref().ok_or(EditError::MissingApiKey)?;
        Ok(format!(
            "{}/v1beta/models/{}:generateContent?key={key}",
            self.endpoint, self.model
        ))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: RequestContents<'a>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContents<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestPart<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: [&'static str; 1],
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    inline_data: Option<ResponseInlineData>,
}

#[derive(Deserialize)]
struct ResponseInlineData {
    data: String,
}

/// Build the JSON request body: original image part, mask part (PNG),
/// and text prompt, requesting an image response.
///
/// # Errors
///
/// Returns [`EditError::Serialize`] if JSON serialization fails.
pub fn build_request_body(
    original_bytes: &[u8],
    original_mime: &str,
    mask_png: &[u8],
    prompt: &str,
) -> Result<String, EditError> {
    let engine = &base64::engine::general_purpose::STANDARD;
    let request = GenerateRequest {
        contents: RequestContents {
            parts: vec![
                RequestPart {
                    inline_data: Some(InlineData {
                        mime_type: original_mime,
                        data: engine.encode(original_bytes),
                    }),
                    text: None,
                },
                RequestPart {
                    inline_data: Some(InlineData {
                        mime_type: MASK_MIME_TYPE,
                        data: engine.encode(mask_png),
                    }),
                    text: None,
                },
                RequestPart {
                    inline_data: None,
                    text: Some(prompt),
                },
            ],
        },
        generation_config: GenerationConfig {
            response_modalities: ["IMAGE"],
        },
    };
    serde_json::to_string(&request).map_err(|e| EditError::Serialize(e.to_string()))
}

/// Extract the first inline image from a `generateContent` response body.
///
/// # Errors
///
/// Returns [`EditError::InvalidResponse`] for unparseable JSON or
/// undecodable base64, and [`EditError::NoImage`] when no candidate
/// part carries inline image data.
pub fn image_from_response(body: &str) -> Result<Vec<u8>, EditError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| EditError::InvalidResponse(e.to_string()))?;

    let data = response
        .candidates
        .iter()
        .filter_map(|c| c.content.as_ref())
        .flat_map(|content| content.parts.iter())
        .find_map(|part| part.inline_data.as_ref().map(|inline| inline.data.as_str()))
        .ok_or(EditError::NoImage)?;

    base64::engine::general_purpose::STANDARD
        .decode(data)
        .map_err(|e| EditError::InvalidResponse(format!("undecodable image payload: {e}")))
}

/// Sniff an uploaded image's MIME type from its magic bytes.
///
/// Falls back to `image/png` for unrecognized input — the service
/// rejects genuinely undecodable data on its own.
#[must_use]
pub fn sniff_mime(bytes: &[u8]) -> &'static str {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [b'B', b'M', ..] => "image/bmp",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        _ => "image/png",
    }
}

/// Perform the edit operation: POST photo + mask + prompt, return the
/// edited image bytes.
///
/// # Errors
///
/// Any failure — missing key, network error, non-success status,
/// unparseable body, or a response without an image — is returned as a
/// single [`EditError`] for verbatim display.
#[allow(clippy::future_not_send)] // WASM is single-threaded; Send is not needed
pub async fn edit_image(
    config: &ServiceConfig,
    original_bytes: &[u8],
    original_mime: &str,
    mask_png: &[u8],
    prompt: &str,
) -> Result<Vec<u8>, EditError> {
    let url = config.request_url()?;
    let body = build_request_body(original_bytes, original_mime, mask_png, prompt)?;

    let window = web_sys::window().ok_or_else(|| EditError::Http("no global window".into()))?;

    let headers = web_sys::Headers::new()?;
    headers.set("Content-Type", "application/json")?;

    let init = web_sys::RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(&body));

    let response_value = JsFuture::from(window.fetch_with_str_and_init(&url, &init)).await?;
    let response: web_sys::Response = response_value
        .dyn_into()
        .map_err(|_| EditError::Http("fetch did not return a Response".into()))?;

    if !response.ok() {
        return Err(EditError::Http(format!(
            "edit service returned HTTP {}",
            response.status()
        )));
    }

    let text_value = JsFuture::from(response.text()?).await?;
    let text = text_value
        .as_string()
        .ok_or_else(|| EditError::InvalidResponse("response body is not text".into()))?;

    image_from_response(&text)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn request_url_requires_key() {
        let config = ServiceConfig {
            endpoint: "https://example.test".into(),
            model: "m".into(),
            api_key: None,
        };
        assert!(matches!(config.request_url(), Err(EditError::MissingApiKey)));

        let config = ServiceConfig {
            api_key: Some("k".into()),
            ..config
        };
        assert_eq!(
            config.request_url().unwrap(),
            "https://example.test/v1beta/models/m:generateContent?key=k"
        );
    }

    #[test]
    fn request_body_has_three_parts_in_order() {
        let body = build_request_body(b"orig", "image/jpeg", b"mask", "remove the lamp").unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();

        let parts = value["contents"]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[2]["text"], "remove the lamp");
        // Image parts carry no text key and the text part no inlineData.
        assert!(parts[0].get("text").is_none());
        assert!(parts[2].get("inlineData").is_none());

        assert_eq!(value["generationConfig"]["responseModalities"][0], "IMAGE");
    }

    #[test]
    fn request_body_base64_round_trips() {
        let body = build_request_body(b"\x00\x01\x02", "image/png", b"\xFF", "p").unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        let data = value["contents"]["parts"][0]["inlineData"]["data"]
            .as_str()
            .unwrap();
        assert_eq!(
            base64::engine::general_purpose::STANDARD
                .decode(data)
                .unwrap(),
            b"\x00\x01\x02"
        );
    }

    #[test]
    fn response_image_is_extracted() {
        let body = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "here you go" },
                        { "inlineData": { "mimeType": "image/png", "data": "aGVsbG8=" } }
                    ]
                }
            }]
        }"#;
        assert_eq!(image_from_response(body).unwrap(), b"hello");
    }

    #[test]
    fn response_without_image_part() {
        let body = r#"{ "candidates": [{ "content": { "parts": [{ "text": "sorry" }] } }] }"#;
        assert!(matches!(image_from_response(body), Err(EditError::NoImage)));
    }

    #[test]
    fn empty_and_invalid_responses() {
        assert!(matches!(
            image_from_response("{}"),
            Err(EditError::NoImage)
        ));
        assert!(matches!(
            image_from_response("not json"),
            Err(EditError::InvalidResponse(_))
        ));
    }

    #[test]
    fn bad_base64_in_response() {
        let body = r#"{ "candidates": [{ "content": { "parts": [
            { "inlineData": { "data": "!!not-base64!!" } }
        ] } }] }"#;
        assert!(matches!(
            image_from_response(body),
            Err(EditError::InvalidResponse(_))
        ));
    }

    #[test]
    fn mime_sniffing() {
        assert_eq!(sniff_mime(b"\x89PNG\r\n\x1a\n...."), "image/png");
        assert_eq!(sniff_mime(b"\xFF\xD8\xFF\xE0...."), "image/jpeg");
        assert_eq!(sniff_mime(b"BM...."), "image/bmp");
        assert_eq!(sniff_mime(b"RIFF\x00\x00\x00\x00WEBPVP8 "), "image/webp");
        // Unknown input falls back to PNG.
        assert_eq!(sniff_mime(b"????"), "image/png");
        assert_eq!(sniff_mime(b""), "image/png");
    }
}
