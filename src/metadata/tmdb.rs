//! TMDB v3 session and response types.
//!
//! A [`TmdbSession`] is opened for one aggregation and dropped when it ends,
//! taking its connection pool with it. Requests authenticate with the bearer
//! "API Read Access Token" and may go through a configured proxy.
//!
//! Response bodies are decoded into the typed structs below. Every field is
//! optional on the wire: absent keys and explicit `null`s both decode to the
//! field's default.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::config::TmdbConfig;
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Authenticated, short-lived TMDB client.
pub struct TmdbSession {
    client: reqwest::Client,
    base_url: String,
}

impl TmdbSession {
    /// Build a client carrying the bearer token, proxy and timeout from `config`.
    pub fn open(config: &TmdbConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.access_token))
            .map_err(|e| Error::Internal(format!("invalid access token header: {e}")))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let mut builder = reqwest::Client::builder().default_headers(headers);

        // Only the configured proxy is used, never one picked up implicitly.
        builder = match config.proxy.as_deref() {
            Some(proxy) => builder.proxy(
                reqwest::Proxy::all(proxy)
                    .map_err(|e| Error::Internal(format!("invalid proxy {proxy:?}: {e}")))?,
            ),
            None => builder.no_proxy(),
        };

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| Error::Internal(format!("failed to build TMDB client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET `path` and return the raw body, whatever the HTTP status.
    ///
    /// TMDB reports bad ids as a JSON body with `success: false`, so error
    /// statuses are left for the caller to interpret. Only transport failures
    /// become [`Error::Connectivity`].
    pub async fn get(&self, path: &str, language: Option<&str>) -> Result<String> {
        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, language = ?language, "TMDB request");

        let mut request = self.client.get(&url);
        if let Some(language) = language {
            request = request.query(&[("language", language)]);
        }

        let resp = request.send().await.map_err(|e| transport_error(&url, e))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| transport_error(&url, e))?;

        debug!(url = %url, status = %status, bytes = body.len(), "TMDB response");
        Ok(body)
    }
}

fn transport_error(url: &str, e: reqwest::Error) -> Error {
    if e.is_builder() {
        Error::Internal(format!("failed to build TMDB request {url}: {e}"))
    } else {
        Error::Connectivity(format!("TMDB request failed {url}: {e}"))
    }
}

// ---------------------------------------------------------------------------
// Decoding helpers
// ---------------------------------------------------------------------------

/// Treat `null` the same as an absent key.
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a body that must be a non-empty JSON object not flagged `success: false`.
///
/// Returns `Ok(None)` for provider-reported failures and empty payloads so
/// the caller can decide how severe that is.
pub(crate) fn decode_object<T: DeserializeOwned>(body: &str) -> Result<Option<T>> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    let Some(object) = value.as_object() else {
        return Ok(None);
    };
    if object.is_empty() || reports_failure(&value) {
        return Ok(None);
    }
    Ok(Some(serde_json::from_value(value)?))
}

/// Lenient variant for secondary payloads: any failure yields `None`.
pub(crate) fn decode_lenient<T: DeserializeOwned>(what: &str, body: &str) -> Option<T> {
    match decode_object(body) {
        Ok(decoded) => decoded,
        Err(e) => {
            debug!(payload = what, error = %e, "Ignoring undecodable TMDB payload");
            None
        }
    }
}

/// Whether a payload carries TMDB's `"success": false` marker.
pub(crate) fn reports_failure(value: &serde_json::Value) -> bool {
    value.get("success").and_then(serde_json::Value::as_bool) == Some(false)
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// `/movie/{id}` or `/tv/{id}`; movie and TV field names both present.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct TmdbDetail {
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub original_title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub original_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub poster_path: String,
    #[serde(default, deserialize_with = "nullable")]
    pub release_date: String,
    #[serde(default, deserialize_with = "nullable")]
    pub first_air_date: String,
    #[serde(default, deserialize_with = "nullable")]
    pub overview: String,
    #[serde(default, deserialize_with = "nullable")]
    pub vote_average: f64,
    #[serde(default, deserialize_with = "nullable")]
    pub vote_count: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub number_of_episodes: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub production_countries: Vec<TmdbNamed>,
    #[serde(default, deserialize_with = "nullable")]
    pub genres: Vec<TmdbNamed>,
    #[serde(default, deserialize_with = "nullable")]
    pub spoken_languages: Vec<TmdbNamed>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TmdbNamed {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
}

/// `/{type}/{id}/credits`
#[derive(Debug, Default, Deserialize)]
pub(crate) struct TmdbCredits {
    #[serde(default, deserialize_with = "nullable")]
    pub cast: Vec<TmdbNamed>,
    #[serde(default, deserialize_with = "nullable")]
    pub crew: Vec<TmdbCrewMember>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TmdbCrewMember {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub job: String,
    #[serde(default, deserialize_with = "nullable")]
    pub department: String,
}

/// `/{type}/{id}/alternative_titles`. Movies list under `titles`, TV under `results`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct TmdbAlternativeTitles {
    #[serde(default, deserialize_with = "nullable")]
    pub titles: Vec<TmdbAlternativeTitle>,
    #[serde(default, deserialize_with = "nullable")]
    pub results: Vec<TmdbAlternativeTitle>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TmdbAlternativeTitle {
    #[serde(default, deserialize_with = "nullable")]
    pub iso_3166_1: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
}

/// `/{type}/{id}/external_ids`
#[derive(Debug, Default, Deserialize)]
pub(crate) struct TmdbExternalIds {
    #[serde(default, deserialize_with = "nullable")]
    pub imdb_id: String,
}

/// `/tv/{id}/season/{n}`
#[derive(Debug, Default, Deserialize)]
pub(crate) struct TmdbSeason {
    #[serde(default, deserialize_with = "nullable")]
    pub air_date: String,
    #[serde(default, deserialize_with = "nullable")]
    pub overview: String,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default, deserialize_with = "nullable")]
    pub episodes: Vec<TmdbEpisode>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TmdbEpisode {
    #[serde(default, deserialize_with = "nullable")]
    pub episode_number: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub air_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nulls_decode_as_defaults() {
        let detail: TmdbDetail = decode_object(
            r#"{"id": 1, "title": null, "genres": null, "vote_average": null, "overview": "x"}"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(detail.title, "");
        assert!(detail.genres.is_empty());
        assert_eq!(detail.vote_average, 0.0);
        assert_eq!(detail.overview, "x");
    }

    #[test]
    fn success_false_is_none() {
        let decoded: Option<TmdbDetail> = decode_object(
            r#"{"success": false, "status_code": 34, "status_message": "not found"}"#,
        )
        .unwrap();
        assert!(decoded.is_none());
    }

    #[test]
    fn empty_object_is_none() {
        let decoded: Option<TmdbDetail> = decode_object("{}").unwrap();
        assert!(decoded.is_none());
        let decoded: Option<TmdbDetail> = decode_object("[]").unwrap();
        assert!(decoded.is_none());
    }

    #[test]
    fn malformed_json_is_internal() {
        let err = decode_object::<TmdbDetail>("<html>").unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
    }

    #[test]
    fn lenient_swallows_garbage() {
        assert!(decode_lenient::<TmdbCredits>("credits", "not json").is_none());
        let credits: TmdbCredits =
            decode_lenient("credits", r#"{"cast": [{"name": "Song Kang-ho"}]}"#).unwrap();
        assert_eq!(credits.cast[0].name, "Song Kang-ho");
        assert!(credits.crew.is_empty());
    }

    #[test]
    fn season_keeps_missing_vote_average_distinct() {
        let season: TmdbSeason = decode_object(r#"{"air_date": "2011-04-17"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(season.vote_average, None);
        assert!(season.episodes.is_empty());
    }
}
