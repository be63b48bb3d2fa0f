//! Parsing of TMDB media links into a [`MediaReference`].

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result};

static MEDIA_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(movie|tv)/(\d+)").unwrap());

/// Kind of title a link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    /// Path segment used by TMDB for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of the title requested by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaReference {
    pub media_type: MediaType,
    /// TMDB numeric id, kept in its textual form.
    pub id: String,
    /// Always `Some` for TV (defaulting to season 1), always `None` for movies.
    pub season_number: Option<u32>,
}

impl MediaReference {
    /// Parse a link such as `https://www.themoviedb.org/tv/1399-game-of-thrones?language=zh-CN`.
    ///
    /// The query string is ignored. Movies never carry a season, whatever
    /// `season_number` says.
    pub fn parse(link: &str, season_number: Option<u32>) -> Result<Self> {
        let path = link.split('?').next().unwrap_or_default();

        let captures = MEDIA_SEGMENT.captures(path).ok_or_else(|| {
            Error::InvalidLink(format!("no /movie/<id> or /tv/<id> segment in {link:?}"))
        })?;

        let media_type = match &captures[1] {
            "tv" => MediaType::Tv,
            _ => MediaType::Movie,
        };
        let id = captures[2].to_string();

        let season_number = match media_type {
            MediaType::Tv => Some(season_number.unwrap_or(1)),
            MediaType::Movie => None,
        };

        Ok(Self {
            media_type,
            id,
            season_number,
        })
    }

    /// Provider path of the title itself, e.g. `/tv/1399`.
    pub fn path(&self) -> String {
        format!("/{}/{}", self.media_type, self.id)
    }

    /// Public TMDB page of the title.
    pub fn tmdb_url(&self) -> String {
        format!("https://www.themoviedb.org/{}/{}", self.media_type, self.id)
    }
}
