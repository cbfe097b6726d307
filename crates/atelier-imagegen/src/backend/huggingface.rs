use std::time::Duration;

use async_trait::async_trait;
use atelier_config::BackendConfig;
use http::header::CONTENT_TYPE;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use url::Url;

use super::ImageBackend;
use crate::{
    classify::classify,
    types::{BackendOutcome, QualityProfile},
};

/// Hugging Face style inference backend
///
/// Speaks the `api-inference` wire format: a JSON request with `inputs`
/// and generation `parameters`, answered with either raw image bytes or a
/// JSON body (error or base64-wrapped image).
pub(crate) struct HuggingfaceBackend {
    name: String,
    client: Client,
    endpoint: Url,
    api_key: Option<SecretString>,
    prompt_suffix: String,
    negative_prompt: Option<String>,
    inference_steps: u32,
    guidance_scale: f64,
}

impl HuggingfaceBackend {
    /// Build the backend from its configuration entry
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn from_config(name: String, config: &BackendConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build HTTP client for '{name}': {e}"))?;

        Ok(Self {
            name,
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.credential().cloned(),
            prompt_suffix: config.prompt_suffix.clone(),
            negative_prompt: config.negative_prompt.clone(),
            inference_steps: config.inference_steps,
            guidance_scale: config.guidance_scale,
        })
    }

    /// Append the configured quality-boosting suffix, if any
    fn enhanced_prompt(&self, prompt: &str) -> String {
        if self.prompt_suffix.is_empty() {
            prompt.to_string()
        } else {
            format!("{prompt}, {}", self.prompt_suffix)
        }
    }
}

/// Wire format for the inference request
#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: String,
    parameters: InferenceParameters<'a>,
}

#[derive(Serialize)]
struct InferenceParameters<'a> {
    width: u32,
    height: u32,
    num_inference_steps: u32,
    guidance_scale: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    negative_prompt: Option<&'a str>,
}

#[async_trait]
impl ImageBackend for HuggingfaceBackend {
    async fn attempt(&self, prompt: &str, profile: QualityProfile) -> BackendOutcome {
        let Some(ref api_key) = self.api_key else {
            return BackendOutcome::Failure {
                reason: "missing credential".to_string(),
                retryable: false,
            };
        };

        let wire_request = InferenceRequest {
            inputs: self.enhanced_prompt(prompt),
            parameters: InferenceParameters {
                width: profile.width,
                height: profile.height,
                num_inference_steps: self.inference_steps,
                guidance_scale: self.guidance_scale,
                negative_prompt: self.negative_prompt.as_deref(),
            },
        };

        tracing::debug!(
            backend = %self.name,
            width = profile.width,
            height = profile.height,
            "sending generation request"
        );

        let response = match self
            .client
            .post(self.endpoint.clone())
            .header(
                "Authorization",
                format!("Bearer {}", api_key.expose_secret()),
            )
            .json(&wire_request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                return BackendOutcome::Failure {
                    reason: format!("transport error: {e}"),
                    retryable: true,
                };
            }
        };

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        // The one and only read of the response body
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                return BackendOutcome::Failure {
                    reason: format!("failed to read response body: {e}"),
                    retryable: true,
                };
            }
        };

        classify(status, content_type.as_deref(), body)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn ready(&self) -> bool {
        self.api_key.is_some()
    }
}
