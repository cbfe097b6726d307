pub(crate) mod huggingface;

use async_trait::async_trait;
use url::Url;

use crate::types::{BackendOutcome, QualityProfile};

/// Trait for image generation backend adapters
///
/// `attempt` never returns `Err` or panics: every failure path is folded
/// into [`BackendOutcome::Failure`] so the generator can always move on to
/// the next candidate.
#[async_trait]
pub(crate) trait ImageBackend: Send + Sync {
    /// Run one generation attempt for the given prompt and dimensions
    async fn attempt(&self, prompt: &str, profile: QualityProfile) -> BackendOutcome;

    /// Backend name for attribution and logs
    fn name(&self) -> &str;

    /// Configured inference endpoint
    fn endpoint(&self) -> &Url;

    /// Whether the backend can be attempted at all (credential present)
    fn ready(&self) -> bool;
}
