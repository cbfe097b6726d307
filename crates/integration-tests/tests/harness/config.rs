//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use atelier_config::{
    BackendConfig, BackendType, Config, CorsConfig, HealthConfig, ImageGenConfig, ServerConfig,
};
use secrecy::SecretString;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                    cors: None,
                },
                imagegen: ImageGenConfig::default(),
            },
        }
    }

    /// Add a Hugging Face style backend pointed at a mock, with a credential
    pub fn with_backend(self, name: &str, endpoint: &str) -> Self {
        self.push_backend(name, endpoint, Some(SecretString::from("test-key")))
    }

    /// Add a backend with no credential configured
    pub fn with_keyless_backend(self, name: &str, endpoint: &str) -> Self {
        self.push_backend(name, endpoint, None)
    }

    fn push_backend(mut self, name: &str, endpoint: &str, api_key: Option<SecretString>) -> Self {
        self.config.imagegen.backends.insert(
            name.to_owned(),
            BackendConfig {
                backend_type: BackendType::Huggingface,
                endpoint: endpoint.parse().expect("valid URL"),
                api_key,
                prompt_suffix: "high quality, detailed, professional".to_owned(),
                negative_prompt: None,
                inference_steps: 30,
                guidance_scale: 7.5,
                timeout_seconds: 5,
            },
        );
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = Some(config);
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
