#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod backend;
mod classify;
mod error;
mod generator;
mod placeholder;
mod translate;
mod types;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
};

pub use error::{ApiError, Result};
pub use generator::{DEMO_SOURCE, Generator, GeneratorBuilder};
pub use types::{
    BackendStatus, GeneratedImage, GenerationRequest, GenerationResult, ImagePayload, Quality,
    QualityProfile, StatusReport,
};

/// Build the generator from configuration
///
/// # Errors
///
/// Returns an error if a backend fails to initialize
pub fn build_generator(config: &atelier_config::Config) -> anyhow::Result<Arc<Generator>> {
    let generator = Arc::new(
        GeneratorBuilder::new(&config.imagegen)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to initialize image backends: {e}"))?,
    );
    Ok(generator)
}

/// Create the endpoint router for image generation
pub fn endpoint_router() -> Router<Arc<Generator>> {
    Router::new()
        .route("/api/generate-image", post(generate_image))
        .route("/api/generate", post(generate_binary))
        .route("/api/status", get(status))
}

/// Handle generation requests, responding with a JSON result
async fn generate_image(
    State(generator): State<Arc<Generator>>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<GenerationResult>> {
    let request = validated(request)?;

    tracing::debug!(quality = request.quality.as_str(), "generation handler called");

    let generated = generator.generate(&request).await;

    tracing::debug!(source = %generated.source, "generation complete");

    Ok(Json(generated.into_result(request.prompt, request.quality)))
}

/// Handle generation requests, responding with raw image bytes
async fn generate_binary(
    State(generator): State<Arc<Generator>>,
    Json(request): Json<GenerationRequest>,
) -> Result<Response> {
    let request = validated(request)?;

    let generated = generator.generate(&request).await;
    let ImagePayload { bytes, mime } = generated.payload;

    Ok(([(header::CONTENT_TYPE, mime)], bytes).into_response())
}

/// Report configured backends and demo-mode state
async fn status(State(generator): State<Arc<Generator>>) -> Json<StatusReport> {
    Json(generator.status_report())
}

/// Reject prompts that are empty after trimming, before any backend work
fn validated(request: GenerationRequest) -> Result<GenerationRequest> {
    if request.prompt.trim().is_empty() {
        return Err(ApiError::InvalidRequest("prompt is required".to_string()));
    }
    Ok(request)
}
