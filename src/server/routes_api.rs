use crate::render::RenderOptions;
use crate::server::error::ApiFailure;
use crate::server::AppContext;
use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::Deserialize;

pub fn api_routes() -> Router<AppContext> {
    Router::new().route("/introduction", get(introduction))
}

#[derive(Debug, Deserialize)]
pub struct IntroductionQuery {
    /// TMDB link, e.g. `https://www.themoviedb.org/tv/1399`
    pub media_link: String,
    /// Language code passed through to TMDB
    pub language: Option<String>,
    /// Season of a TV show (defaults to 1)
    pub season_number: Option<u32>,
    /// Set to `false` for plain text without markup
    pub bbcode: Option<bool>,
}

async fn introduction(
    State(ctx): State<AppContext>,
    Query(params): Query<IntroductionQuery>,
) -> Result<impl IntoResponse, ApiFailure> {
    let language = params
        .language
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(ctx.config.tmdb.default_language.as_str());
    let options = RenderOptions {
        bbcode: params.bbcode.unwrap_or(true),
    };

    let description = crate::describe(
        &ctx.aggregator,
        params.media_link.trim(),
        language,
        params.season_number,
        options,
    )
    .await?;

    tracing::info!(
        link = %params.media_link,
        language = %language,
        bytes = description.len(),
        "Generated introduction"
    );

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        description,
    ))
}
