use atelier_config::{BackendType, ImageGenConfig};

use crate::{
    backend::{ImageBackend, huggingface::HuggingfaceBackend},
    placeholder::placeholder,
    translate,
    types::{
        BackendOutcome, BackendStatus, GeneratedImage, GenerationRequest, ImagePayload,
        StatusReport,
    },
};

/// Source label attached to placeholder results
pub const DEMO_SOURCE: &str = "Demo Mode";

const DEMO_MESSAGE: &str =
    "Demo placeholder - configure a backend credential for real generation";

/// Fallback-chain generator over an ordered list of backends
///
/// Backends are attempted strictly in order, one at a time; the first
/// success wins. The chain always terminates in the placeholder, so
/// generation as a whole cannot fail.
pub struct Generator {
    backends: Vec<Box<dyn ImageBackend>>,
}

impl Generator {
    /// Generate an image for the request
    ///
    /// Infallible: exhaustion of the backend list (or an empty list, or no
    /// usable credentials) degrades to a locally rendered placeholder.
    pub async fn generate(&self, request: &GenerationRequest) -> GeneratedImage {
        let profile = request.quality.profile();
        let prompt = translate::normalize(&request.prompt, request.language.as_deref());

        if self.backends.iter().any(|backend| backend.ready()) {
            for backend in &self.backends {
                match backend.attempt(&prompt, profile).await {
                    BackendOutcome::Success { bytes, mime } => {
                        tracing::info!(backend = %backend.name(), "backend produced an image");
                        return GeneratedImage {
                            payload: ImagePayload { bytes, mime },
                            source: backend.name().to_owned(),
                            message: None,
                        };
                    }
                    BackendOutcome::Failure { reason, retryable } => {
                        tracing::warn!(
                            backend = %backend.name(),
                            %reason,
                            retryable,
                            "backend attempt failed, trying next"
                        );
                    }
                }
            }
            tracing::info!("all backends failed, degrading to placeholder");
        } else {
            tracing::info!("no backend credentials configured, using placeholder");
        }

        GeneratedImage {
            payload: placeholder(&request.prompt, profile),
            source: DEMO_SOURCE.to_owned(),
            message: Some(DEMO_MESSAGE.to_owned()),
        }
    }

    /// Report the configured backends and whether any is usable
    ///
    /// The credential value itself never appears in the report.
    pub fn status_report(&self) -> StatusReport {
        StatusReport {
            demo_mode: !self.backends.iter().any(|backend| backend.ready()),
            backends: self
                .backends
                .iter()
                .map(|backend| BackendStatus {
                    name: backend.name().to_owned(),
                    endpoint: backend.endpoint().to_string(),
                    credential: backend.ready(),
                })
                .collect(),
        }
    }
}

/// Builder for constructing the generator from configuration
pub struct GeneratorBuilder<'a> {
    config: &'a ImageGenConfig,
}

impl<'a> GeneratorBuilder<'a> {
    pub fn new(config: &'a ImageGenConfig) -> Self {
        Self { config }
    }

    /// Instantiate every configured backend, preserving config order
    ///
    /// # Errors
    ///
    /// Returns an error if a backend's HTTP client cannot be constructed
    pub fn build(self) -> anyhow::Result<Generator> {
        let mut backends: Vec<Box<dyn ImageBackend>> = Vec::new();

        for (name, backend_config) in &self.config.backends {
            tracing::debug!("initializing image backend: {name}");

            let backend: Box<dyn ImageBackend> = match backend_config.backend_type {
                BackendType::Huggingface => {
                    Box::new(HuggingfaceBackend::from_config(name.clone(), backend_config)?)
                }
            };

            backends.push(backend);
        }

        if backends.is_empty() {
            tracing::info!("no image backends configured, running in placeholder-only mode");
        } else {
            tracing::debug!("generator initialized with {} backend(s)", backends.len());
        }

        Ok(Generator { backends })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;
    use bytes::Bytes;
    use url::Url;

    use super::*;
    use crate::types::{Quality, QualityProfile};

    /// Scriptable in-process backend that counts its attempts
    struct StubBackend {
        name: String,
        endpoint: Url,
        ready: bool,
        succeed: bool,
        attempts: AtomicU32,
    }

    impl StubBackend {
        fn new(name: &str, ready: bool, succeed: bool) -> Self {
            Self {
                name: name.to_string(),
                endpoint: "https://stub.invalid/models/test".parse().expect("valid URL"),
                ready,
                succeed,
                attempts: AtomicU32::new(0),
            }
        }

        fn attempts(&self) -> u32 {
            self.attempts.load(Ordering::Relaxed)
        }
    }

    #[async_trait]
    impl ImageBackend for &StubBackend {
        async fn attempt(&self, _prompt: &str, _profile: QualityProfile) -> BackendOutcome {
            self.attempts.fetch_add(1, Ordering::Relaxed);
            if self.succeed {
                BackendOutcome::Success {
                    bytes: Bytes::from_static(b"\x89PNG fake"),
                    mime: "image/png".to_string(),
                }
            } else {
                BackendOutcome::Failure {
                    reason: "scripted failure".to_string(),
                    retryable: true,
                }
            }
        }

        fn name(&self) -> &str {
            &self.name
        }

        fn endpoint(&self) -> &Url {
            &self.endpoint
        }

        fn ready(&self) -> bool {
            self.ready
        }
    }

    fn generator(stubs: &[&'static StubBackend]) -> Generator {
        Generator {
            backends: stubs
                .iter()
                .map(|stub| Box::new(*stub) as Box<dyn ImageBackend>)
                .collect(),
        }
    }

    fn request(prompt: &str) -> GenerationRequest {
        GenerationRequest {
            prompt: prompt.to_string(),
            quality: Quality::Standard,
            language: None,
        }
    }

    #[tokio::test]
    async fn first_success_stops_the_chain() {
        let first: &'static StubBackend = Box::leak(Box::new(StubBackend::new("first", true, true)));
        let second: &'static StubBackend =
            Box::leak(Box::new(StubBackend::new("second", true, true)));

        let generated = generator(&[first, second]).generate(&request("a cat")).await;

        assert_eq!(generated.source, "first");
        assert_eq!(generated.payload.mime, "image/png");
        assert!(generated.message.is_none());
        assert_eq!(first.attempts(), 1);
        assert_eq!(second.attempts(), 0);
    }

    #[tokio::test]
    async fn failures_advance_to_the_next_backend() {
        let failing: &'static StubBackend =
            Box::leak(Box::new(StubBackend::new("failing", true, false)));
        let working: &'static StubBackend =
            Box::leak(Box::new(StubBackend::new("working", true, true)));
        let unused: &'static StubBackend =
            Box::leak(Box::new(StubBackend::new("unused", true, true)));

        let generated = generator(&[failing, working, unused])
            .generate(&request("a cat"))
            .await;

        assert_eq!(generated.source, "working");
        assert_eq!(failing.attempts(), 1);
        assert_eq!(working.attempts(), 1);
        assert_eq!(unused.attempts(), 0);
    }

    #[tokio::test]
    async fn exhaustion_degrades_to_placeholder() {
        let first: &'static StubBackend =
            Box::leak(Box::new(StubBackend::new("first", true, false)));
        let second: &'static StubBackend =
            Box::leak(Box::new(StubBackend::new("second", true, false)));

        let generated = generator(&[first, second]).generate(&request("a cat")).await;

        assert_eq!(generated.source, DEMO_SOURCE);
        assert_eq!(generated.payload.mime, "image/svg+xml");
        assert!(generated.message.is_some());
        assert_eq!(first.attempts(), 1);
        assert_eq!(second.attempts(), 1);
    }

    #[tokio::test]
    async fn no_ready_backend_skips_all_attempts() {
        let first: &'static StubBackend =
            Box::leak(Box::new(StubBackend::new("first", false, true)));
        let second: &'static StubBackend =
            Box::leak(Box::new(StubBackend::new("second", false, true)));

        let generated = generator(&[first, second]).generate(&request("a cat")).await;

        assert_eq!(generated.source, DEMO_SOURCE);
        assert_eq!(first.attempts(), 0);
        assert_eq!(second.attempts(), 0);
    }

    #[tokio::test]
    async fn empty_backend_list_is_demo_mode() {
        let generated = Generator { backends: Vec::new() }
            .generate(&request("a red apple on a table"))
            .await;

        assert_eq!(generated.source, DEMO_SOURCE);
        assert!(!generated.payload.to_image_url().is_empty());
    }

    #[tokio::test]
    async fn status_report_never_exposes_credentials() {
        let ready: &'static StubBackend = Box::leak(Box::new(StubBackend::new("ready", true, true)));
        let bare: &'static StubBackend = Box::leak(Box::new(StubBackend::new("bare", false, true)));

        let report = generator(&[ready, bare]).status_report();

        assert!(!report.demo_mode);
        assert_eq!(report.backends.len(), 2);
        assert!(report.backends[0].credential);
        assert!(!report.backends[1].credential);
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("api_key"));
    }
}
