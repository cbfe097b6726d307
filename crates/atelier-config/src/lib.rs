#![allow(clippy::must_use_candidate)]

pub mod cors;
mod env;
pub mod health;
pub mod imagegen;
mod loader;
pub mod server;

use serde::Deserialize;

pub use cors::*;
pub use health::*;
pub use imagegen::*;
pub use server::*;

/// Top-level Atelier configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Image generation backend configuration
    #[serde(default)]
    pub imagegen: ImageGenConfig,
}
