use indexmap::IndexMap;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

/// Top-level image generation configuration
///
/// Backend entries are tried in declaration order, so the table doubles as
/// the fallback priority list.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageGenConfig {
    /// Image generation backend configurations keyed by name
    #[serde(default)]
    pub backends: IndexMap<String, BackendConfig>,
}

/// Configuration for a single image generation backend
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Backend type
    #[serde(rename = "type")]
    pub backend_type: BackendType,
    /// Inference endpoint
    pub endpoint: Url,
    /// API credential; absent or empty means the backend is skipped
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Suffix appended to every prompt; empty disables enhancement
    #[serde(default = "default_prompt_suffix")]
    pub prompt_suffix: String,
    /// Negative prompt sent alongside the request
    #[serde(default)]
    pub negative_prompt: Option<String>,
    /// Number of inference steps
    #[serde(default = "default_inference_steps")]
    pub inference_steps: u32,
    /// Guidance scale
    #[serde(default = "default_guidance_scale")]
    pub guidance_scale: f64,
    /// Per-attempt timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl BackendConfig {
    /// The configured credential, treating an empty string as absent
    ///
    /// Empty strings occur when the key is injected via
    /// `{{ env.VAR | default("") }}` and the variable is unset.
    pub fn credential(&self) -> Option<&SecretString> {
        self.api_key
            .as_ref()
            .filter(|key| !key.expose_secret().is_empty())
    }
}

/// Supported image generation backend kinds
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendType {
    /// Hugging Face style inference endpoint (binary image or JSON body)
    Huggingface,
}

fn default_prompt_suffix() -> String {
    "high quality, detailed, professional".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_inference_steps() -> u32 {
    30
}

#[allow(clippy::missing_const_for_fn)]
fn default_guidance_scale() -> f64 {
    7.5
}

#[allow(clippy::missing_const_for_fn)]
fn default_timeout_seconds() -> u64 {
    60
}
