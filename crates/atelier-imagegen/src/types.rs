use base64::{Engine as _, engine::general_purpose::STANDARD};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Coarse quality tier selected by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// 512×512
    Fast,
    /// 768×768
    #[default]
    Standard,
    /// 1024×1024
    High,
}

impl Quality {
    /// Parse a quality name, folding unknown values to `Standard`
    pub fn from_name(name: &str) -> Self {
        match name {
            "fast" => Self::Fast,
            "high" => Self::High,
            _ => Self::Standard,
        }
    }

    /// Lowercase name as it appears on the wire
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Standard => "standard",
            Self::High => "high",
        }
    }

    /// Target dimensions for this tier
    pub const fn profile(self) -> QualityProfile {
        match self {
            Self::Fast => QualityProfile {
                width: 512,
                height: 512,
            },
            Self::Standard => QualityProfile {
                width: 768,
                height: 768,
            },
            Self::High => QualityProfile {
                width: 1024,
                height: 1024,
            },
        }
    }
}

// Hand-written so unknown wire values resolve to the standard tier instead
// of rejecting the request
impl<'de> Deserialize<'de> for Quality {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

/// Width/height pair associated with a quality tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityProfile {
    pub width: u32,
    pub height: u32,
}

/// A single inbound generation request
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    /// Natural-language description; must be non-empty after trimming
    #[serde(default)]
    pub prompt: String,
    /// Quality tier; absent or unrecognized values become `standard`
    #[serde(default)]
    pub quality: Quality,
    /// Optional prompt language tag (only "de" has defined behavior)
    #[serde(default)]
    pub language: Option<String>,
}

/// Result of one backend attempt, consumed immediately by the generator
#[derive(Debug)]
pub enum BackendOutcome {
    /// The backend produced an image
    Success {
        /// Raw image bytes
        bytes: Bytes,
        /// Media type of the bytes
        mime: String,
    },
    /// The attempt failed; the generator moves on to the next backend
    Failure {
        /// Human-readable failure description for the logs
        reason: String,
        /// Whether a later identical request could plausibly succeed
        retryable: bool,
    },
}

/// The produced image, before endpoint-specific serialization
///
/// The JSON endpoint embeds the bytes in a data URL; the binary endpoint
/// streams them with the media type as `Content-Type`.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub bytes: Bytes,
    pub mime: String,
}

impl ImagePayload {
    /// Encode the payload as a `data:` URL
    pub fn to_image_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

/// Outcome of a full generation pass, independent of response encoding
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    /// The image itself
    pub payload: ImagePayload,
    /// Provenance label: backend name, or "Demo Mode" for placeholders
    pub source: String,
    /// Optional note about degraded operation
    pub message: Option<String>,
}

impl GeneratedImage {
    /// Combine with the echoed request fields into the JSON response body
    pub fn into_result(self, prompt: String, quality: Quality) -> GenerationResult {
        GenerationResult {
            image_url: self.payload.to_image_url(),
            prompt,
            quality,
            source: self.source,
            message: self.message,
        }
    }
}

/// JSON body returned by the generation endpoint
#[derive(Debug, Serialize)]
pub struct GenerationResult {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    /// The caller's prompt, echoed exactly
    pub prompt: String,
    pub quality: Quality,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Report returned by the status endpoint
#[derive(Debug, Serialize)]
pub struct StatusReport {
    /// True when no backend has a usable credential
    pub demo_mode: bool,
    pub backends: Vec<BackendStatus>,
}

/// One configured backend's status entry
#[derive(Debug, Serialize)]
pub struct BackendStatus {
    pub name: String,
    pub endpoint: String,
    /// Whether a credential is configured (the value itself is never exposed)
    pub credential: bool,
}
