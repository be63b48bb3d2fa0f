//! Concurrent fan-out over the TMDB endpoints describing one title.
//!
//! For a movie four requests are issued (detail, credits, alternative titles,
//! external ids); a TV show adds the requested season. All of them run
//! concurrently on one [`TmdbSession`] and are joined before anything is
//! decoded. A transport failure on any of them fails the whole fetch and
//! drops the remaining in-flight requests together with the session.

use tracing::{debug, error, info, warn};

use super::link::{MediaReference, MediaType};
use super::record::{EpisodeName, NormalizedRecord, NO_OVERVIEW};
use super::tmdb::{
    decode_lenient, reports_failure, TmdbAlternativeTitles, TmdbCredits, TmdbDetail,
    TmdbExternalIds, TmdbNamed, TmdbSeason, TmdbSession,
};
use crate::config::TmdbConfig;
use crate::error::{Error, Result};

/// Leading cast members kept on the record.
pub const CAST_LIMIT: usize = 6;

/// Resolves media links into [`NormalizedRecord`]s.
///
/// Holds configuration only; every call to [`Aggregator::fetch`] opens its
/// own session, so one aggregator can serve any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct Aggregator {
    config: TmdbConfig,
}

/// Raw bodies of one fan-out, in request order.
#[derive(Debug)]
struct Payloads {
    detail: String,
    credits: String,
    alternative_titles: String,
    external_ids: String,
    season: Option<String>,
}

impl Aggregator {
    pub fn new(config: TmdbConfig) -> Self {
        Self { config }
    }

    /// Language used when the caller does not pass one.
    pub fn default_language(&self) -> &str {
        &self.config.default_language
    }

    /// Fetch and merge everything TMDB knows about `media_link`.
    ///
    /// `season_number` only matters for TV links and defaults to 1 there.
    pub async fn fetch(
        &self,
        media_link: &str,
        language: &str,
        season_number: Option<u32>,
    ) -> Result<NormalizedRecord> {
        let reference = MediaReference::parse(media_link, season_number).inspect_err(|e| {
            warn!(link = %media_link, error = %e, "Rejected media link");
        })?;

        info!(
            media_type = %reference.media_type,
            id = %reference.id,
            season = ?reference.season_number,
            language = %language,
            "Aggregating TMDB metadata"
        );

        let session = TmdbSession::open(&self.config)?;
        let payloads = fetch_payloads(&session, &reference, language)
            .await
            .inspect_err(|e| warn!(id = %reference.id, error = %e, "TMDB fan-out failed"))?;
        drop(session);

        build_record(&self.config, &reference, &payloads).inspect_err(|e| match e {
            Error::NotFound(_) => {
                warn!(id = %reference.id, error = %e, detail = %payloads.detail, "TMDB has no such title");
            }
            _ => error!(
                id = %reference.id,
                error = %e,
                detail = %payloads.detail,
                season = ?payloads.season,
                "Failed to build record from TMDB payloads"
            ),
        })
    }
}

async fn fetch_payloads(
    session: &TmdbSession,
    reference: &MediaReference,
    language: &str,
) -> Result<Payloads> {
    let base = reference.path();
    let credits_path = format!("{base}/credits");
    let alternative_titles_path = format!("{base}/alternative_titles");
    let external_ids_path = format!("{base}/external_ids");

    let season = async {
        match (reference.media_type, reference.season_number) {
            (MediaType::Tv, Some(number)) => {
                let path = format!("/tv/{}/season/{number}", reference.id);
                session.get(&path, Some(language)).await.map(Some)
            }
            _ => Ok(None),
        }
    };

    let (detail, credits, alternative_titles, external_ids, season) = futures::try_join!(
        session.get(&base, Some(language)),
        session.get(&credits_path, Some(language)),
        session.get(&alternative_titles_path, None),
        session.get(&external_ids_path, None),
        season,
    )?;

    Ok(Payloads {
        detail,
        credits,
        alternative_titles,
        external_ids,
        season,
    })
}

fn build_record(
    config: &TmdbConfig,
    reference: &MediaReference,
    payloads: &Payloads,
) -> Result<NormalizedRecord> {
    let value: serde_json::Value = serde_json::from_str(&payloads.detail)?;
    if reports_failure(&value) {
        return Err(Error::NotFound(format!(
            "{} reported success=false",
            reference.path()
        )));
    }
    if value.as_object().map_or(true, |o| o.is_empty()) {
        return Err(Error::NotFound(format!(
            "{} returned an empty payload",
            reference.path()
        )));
    }
    let detail: TmdbDetail = serde_json::from_value(value)?;

    let credits: TmdbCredits = decode_lenient("credits", &payloads.credits).unwrap_or_default();
    let alternative_titles: TmdbAlternativeTitles =
        decode_lenient("alternative_titles", &payloads.alternative_titles).unwrap_or_default();
    let external_ids: TmdbExternalIds =
        decode_lenient("external_ids", &payloads.external_ids).unwrap_or_default();

    let mut record = merge_detail(
        config,
        reference,
        detail,
        credits,
        alternative_titles,
        external_ids,
    );

    if reference.media_type == MediaType::Tv {
        match payloads
            .season
            .as_deref()
            .and_then(|body| decode_lenient::<TmdbSeason>("season", body))
        {
            Some(season) => apply_season(&mut record, season),
            None => debug!(id = %reference.id, "No season data, keeping series-level metadata"),
        }
    }

    Ok(record)
}

fn merge_detail(
    config: &TmdbConfig,
    reference: &MediaReference,
    detail: TmdbDetail,
    credits: TmdbCredits,
    alternative_titles: TmdbAlternativeTitles,
    external_ids: TmdbExternalIds,
) -> NormalizedRecord {
    let (title, original_title, release_date, episode_count) = match reference.media_type {
        MediaType::Tv => (
            detail.name,
            detail.original_name,
            detail.first_air_date,
            detail.number_of_episodes,
        ),
        MediaType::Movie => (detail.title, detail.original_title, detail.release_date, 0),
    };

    let poster_url = if detail.poster_path.is_empty() {
        String::new()
    } else {
        format!(
            "{}{}",
            config.image_base_url.trim_end_matches('/'),
            detail.poster_path
        )
    };

    let chinese_title = alternative_titles
        .titles
        .into_iter()
        .chain(alternative_titles.results)
        .find(|t| t.iso_3166_1 == "CN")
        .map(|t| t.title)
        .filter(|t| !t.is_empty());

    let directors = credits
        .crew
        .iter()
        .filter(|p| p.job == "Director")
        .map(|p| p.name.clone())
        .collect();
    let writers = credits
        .crew
        .iter()
        .filter(|p| p.department == "Writing")
        .map(|p| p.name.clone())
        .collect();
    let cast_total = credits.cast.len();
    let cast = credits
        .cast
        .into_iter()
        .take(CAST_LIMIT)
        .map(|p| p.name)
        .collect();

    NormalizedRecord {
        media_type: reference.media_type,
        year: year_of(&release_date),
        title,
        original_title,
        chinese_title,
        poster_url,
        country: first_name(detail.production_countries),
        genres: detail.genres.into_iter().map(|g| g.name).collect(),
        spoken_language: first_name(detail.spoken_languages),
        release_date,
        tmdb_url: reference.tmdb_url(),
        tmdb_rating: format!("{:.1}/{}", detail.vote_average, detail.vote_count),
        user_rating: format!("{:.1}/10", detail.vote_average),
        imdb_id: Some(external_ids.imdb_id).filter(|id| !id.is_empty()),
        season: reference.season_number,
        episode_count,
        overview: if detail.overview.is_empty() {
            NO_OVERVIEW.to_string()
        } else {
            detail.overview
        },
        directors,
        writers,
        cast,
        cast_total,
        episodes: Vec::new(),
    }
}

/// Let season-level data supersede the series-level values.
fn apply_season(record: &mut NormalizedRecord, season: TmdbSeason) {
    if !season.overview.is_empty() {
        record.overview = season.overview;
    }

    if let Some(average) = season.vote_average {
        record.tmdb_rating = format!("{average:?}");
    }

    let first_episode_air_date = season
        .episodes
        .first()
        .map(|e| e.air_date.as_str())
        .unwrap_or_default();
    if let Some(date) = [season.air_date.as_str(), first_episode_air_date]
        .into_iter()
        .find(|d| !d.is_empty())
    {
        record.release_date = date.to_string();
    }

    if !season.episodes.is_empty() {
        record.episode_count = season.episodes.len() as u32;
    }

    if !season.air_date.is_empty() {
        record.year = season.air_date.chars().take(4).collect();
    }

    record.episodes = season
        .episodes
        .into_iter()
        .map(|e| EpisodeName::new(e.episode_number.to_string(), e.name))
        .collect();
}

/// `"2019-05-30"` -> `"2019"`, empty -> `"Unknown"`.
fn year_of(date: &str) -> String {
    match date.split('-').next() {
        Some(year) if !year.is_empty() => year.to_string(),
        _ => "Unknown".to_string(),
    }
}

fn first_name(named: Vec<TmdbNamed>) -> String {
    named.into_iter().next().map(|n| n.name).unwrap_or_default()
}
