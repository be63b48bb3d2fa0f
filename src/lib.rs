//! tmdbgen - forum descriptions from TMDB metadata
//!
//! Resolves a TMDB movie or TV link into a [`metadata::NormalizedRecord`] by
//! querying several TMDB endpoints concurrently, then renders it into a
//! BBCode description with [`render::render`].

pub mod config;
pub mod error;
pub mod metadata;
pub mod render;
pub mod server;

pub use error::{Error, Result};

use metadata::Aggregator;
use render::RenderOptions;

/// Fetch `media_link` and render its description in one go.
pub async fn describe(
    aggregator: &Aggregator,
    media_link: &str,
    language: &str,
    season_number: Option<u32>,
    options: RenderOptions,
) -> Result<String> {
    let record = aggregator
        .fetch(media_link, language, season_number)
        .await?;
    Ok(render::render_with(&record, options))
}
