//! The merged, provider-agnostic view of one title.

use serde::Serialize;

use super::link::MediaType;

/// Placeholder used when neither the title nor its season has a synopsis.
pub const NO_OVERVIEW: &str = "暂无简介";

/// Everything the renderer needs about a single movie or TV season.
///
/// Built once per request by the aggregator and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    pub media_type: MediaType,
    pub title: String,
    pub original_title: String,
    /// First alternative title registered for mainland China.
    pub chinese_title: Option<String>,
    /// Full poster URL, empty when TMDB has no poster.
    pub poster_url: String,
    /// Four digits, or `"Unknown"`.
    pub year: String,
    /// First production country, empty when unknown.
    pub country: String,
    pub genres: Vec<String>,
    /// First spoken language, empty when unknown.
    pub spoken_language: String,
    pub release_date: String,
    pub tmdb_url: String,
    /// `"8.5/12000"` for titles; the bare season average after a season override.
    pub tmdb_rating: String,
    /// `"8.5/10"`
    pub user_rating: String,
    pub imdb_id: Option<String>,
    /// Effective season for TV, `None` for movies.
    pub season: Option<u32>,
    pub episode_count: u32,
    pub overview: String,
    pub directors: Vec<String>,
    pub writers: Vec<String>,
    /// Leading billed cast, at most six names.
    pub cast: Vec<String>,
    /// Number of cast members TMDB credits in total.
    pub cast_total: usize,
    /// Episode titles of the requested season, in provider order.
    pub episodes: Vec<EpisodeName>,
}

/// One `(episode number, episode title)` pair of a season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpisodeName {
    pub number: String,
    pub title: String,
}

impl EpisodeName {
    pub fn new(number: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            title: title.into(),
        }
    }
}

impl NormalizedRecord {
    /// Genres as shown to readers, e.g. `"剧情 / 喜剧"`.
    pub fn genres_line(&self) -> String {
        self.genres.join(" / ")
    }

    /// Season for display, `"N/A"` when there is none or it is 0.
    pub fn season_label(&self) -> String {
        self.season
            .filter(|&s| s != 0)
            .map(|s| s.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }

    /// Whether more cast members exist than are listed.
    pub fn has_more_cast(&self, shown: usize) -> bool {
        self.cast.len().max(self.cast_total) > shown
    }

    /// Empty record of the given kind; handy as a base for struct update syntax.
    pub fn empty(media_type: MediaType) -> Self {
        Self {
            media_type,
            title: String::new(),
            original_title: String::new(),
            chinese_title: None,
            poster_url: String::new(),
            year: "Unknown".to_string(),
            country: String::new(),
            genres: Vec::new(),
            spoken_language: String::new(),
            release_date: String::new(),
            tmdb_url: String::new(),
            tmdb_rating: "0.0/0".to_string(),
            user_rating: "0.0/10".to_string(),
            imdb_id: None,
            season: match media_type {
                MediaType::Tv => Some(1),
                MediaType::Movie => None,
            },
            episode_count: 0,
            overview: NO_OVERVIEW.to_string(),
            directors: Vec::new(),
            writers: Vec::new(),
            cast: Vec::new(),
            cast_total: 0,
            episodes: Vec::new(),
        }
    }
}
