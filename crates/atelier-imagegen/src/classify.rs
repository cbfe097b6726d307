use base64::{Engine as _, engine::general_purpose::STANDARD};
use bytes::Bytes;
use http::StatusCode;
use serde_json::Value;

use crate::types::BackendOutcome;

/// Cap on how much of an error body ends up in logs
const ERROR_PREVIEW_LIMIT: usize = 300;

/// Decide what a backend response means
///
/// Takes the already-read body by value: the adapter performs the single
/// transport read, so a second read of the same response is
/// unrepresentable here.
pub fn classify(status: StatusCode, content_type: Option<&str>, body: Bytes) -> BackendOutcome {
    if !status.is_success() {
        return BackendOutcome::Failure {
            reason: format!("HTTP {}: {}", status.as_u16(), preview(&body)),
            retryable: matches!(
                status,
                StatusCode::SERVICE_UNAVAILABLE | StatusCode::TOO_MANY_REQUESTS
            ),
        };
    }

    let media_type = content_type
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase())
        .unwrap_or_default();

    if media_type.starts_with("image/") {
        if body.is_empty() {
            return BackendOutcome::Failure {
                reason: "empty image body".to_string(),
                retryable: true,
            };
        }
        return BackendOutcome::Success {
            bytes: body,
            mime: media_type,
        };
    }

    if media_type == "application/json" {
        return classify_json(&body);
    }

    BackendOutcome::Failure {
        reason: format!(
            "unrecognized content-type: {}",
            content_type.unwrap_or("<none>")
        ),
        retryable: false,
    }
}

/// Interpret a 2xx JSON body: explicit error, embedded base64 image, or
/// an unrecognized shape
fn classify_json(body: &Bytes) -> BackendOutcome {
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            return BackendOutcome::Failure {
                reason: format!("malformed JSON body: {e}"),
                retryable: false,
            };
        }
    };

    if let Some(error) = value.get("error") {
        let reason = error
            .as_str()
            .map_or_else(|| error.to_string(), str::to_owned);
        return BackendOutcome::Failure {
            reason,
            retryable: false,
        };
    }

    if let Some(encoded) = embedded_base64(&value) {
        return match STANDARD.decode(encoded.trim()) {
            Ok(bytes) => BackendOutcome::Success {
                bytes: bytes.into(),
                mime: "image/png".to_string(),
            },
            Err(e) => BackendOutcome::Failure {
                reason: format!("invalid base64 image payload: {e}"),
                retryable: false,
            },
        };
    }

    BackendOutcome::Failure {
        reason: "unrecognized JSON shape".to_string(),
        retryable: false,
    }
}

/// Base64 image fields used by the supported backend response shapes:
/// `image`, `images[0]`, and OpenAI-style `data[0].b64_json`
fn embedded_base64(value: &Value) -> Option<&str> {
    if let Some(image) = value.get("image").and_then(Value::as_str) {
        return Some(image);
    }
    if let Some(first) = value
        .get("images")
        .and_then(Value::as_array)
        .and_then(|images| images.first())
        .and_then(Value::as_str)
    {
        return Some(first);
    }
    value
        .get("data")?
        .as_array()?
        .first()?
        .get("b64_json")?
        .as_str()
}

fn preview(body: &Bytes) -> String {
    let text = String::from_utf8_lossy(body);
    text.trim().chars().take(ERROR_PREVIEW_LIMIT).collect()
}
