//! Captured camera frames.

use base64::{Engine, engine::general_purpose::STANDARD};

use super::AnalysisError;

/// A decoded camera capture.
///
/// The original string is kept for forwarding to a remote backend, which
/// expects the data URL exactly as the browser produced it.
#[derive(Clone)]
pub struct CapturedImage {
    encoded: String,
    mime_type: Option<String>,
    bytes: Vec<u8>,
}

impl std::fmt::Debug for CapturedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapturedImage")
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl CapturedImage {
    /// Parse a `data:image/...;base64,` URL or bare base64.
    pub fn parse(input: &str) -> Result<Self, AnalysisError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(AnalysisError::InvalidImage("empty payload".to_string()));
        }

        let (mime_type, payload) = match input.strip_prefix("data:") {
            Some(rest) => {
                let (header, payload) = rest.split_once(',').ok_or_else(|| {
                    AnalysisError::InvalidImage("data URL without payload".to_string())
                })?;
                let mime = header.strip_suffix(";base64").ok_or_else(|| {
                    AnalysisError::InvalidImage("data URL is not base64".to_string())
                })?;
                if !mime.starts_with("image/") {
                    return Err(AnalysisError::InvalidImage(format!(
                        "unsupported media type: {mime}"
                    )));
                }
                (Some(mime.to_string()), payload)
            }
            None => (None, input),
        };

        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| AnalysisError::InvalidImage(format!("invalid base64: {e}")))?;
        if bytes.is_empty() {
            return Err(AnalysisError::InvalidImage("image has no data".to_string()));
        }

        Ok(Self {
            encoded: input.to_string(),
            mime_type,
            bytes,
        })
    }

    /// The string as received.
    #[must_use]
    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    /// MIME type from the data URL header, if present.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}
