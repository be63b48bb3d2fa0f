//! BBCode description template.
//!
//! [`render`] turns a [`NormalizedRecord`] into the text block posted to
//! forums: poster, aligned metadata lines, ratings and links, credits, the
//! episode list of a TV season and finally the synopsis.

pub mod align;

use std::sync::LazyLock;

use regex::Regex;

use crate::metadata::{MediaType, NormalizedRecord};
use crate::metadata::aggregator::CAST_LIMIT;
use crate::metadata::record::NO_OVERVIEW;
use align::{align_with, EPISODE_INDENT, LABEL_WIDTH};

/// Writers shown on the writers line.
pub const WRITER_LIMIT: usize = 2;
/// Episode lines listed after the first episode before the list is cut.
pub const EPISODE_LIMIT: usize = 30;

const ANIMATION_GENRES: [&str; 2] = ["动画", "Animation"];
const ACCENT_COLOR: &str = "#e77c8e";
const EPISODE_ELLIPSIS: &str = " ......";
const CAST_ELLIPSIS: &str = "　　　　　...";
const SYNOPSIS_INDENT: &str = "　　           ";

/// Titles TMDB uses for episodes nobody has named yet ("第5集", "Episode 5").
static PLACEHOLDER_EPISODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:第\s*\d+\s*集|Episode\s*\d+\s*$)").unwrap());

/// Switches for the template.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Emit BBCode markup (bold/colored labels, accent-colored episode titles).
    pub bbcode: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { bbcode: true }
    }
}

/// Render with BBCode enabled.
pub fn render(record: &NormalizedRecord) -> String {
    render_with(record, RenderOptions::default())
}

/// Render `record` into the final description.
pub fn render_with(record: &NormalizedRecord, options: RenderOptions) -> String {
    let bbcode = options.bbcode;
    let line = |label: &str, content: &str| align_with(label, content, LABEL_WIDTH, bbcode);

    let mut output = vec![
        format!("[img]{}[/img]\n", record.poster_url),
        line("◎译　　名", &display_title(record)),
        line("◎原　　名", &record.original_title),
        line("◎年　　代", &record.year),
        line("◎产　　地", or_na(&record.country)),
        line("◎类　　别", &record.genres_line()),
        line("◎语　　言", or_na(&record.spoken_language)),
        line("◎上映日期  ", &format!(" {}", record.release_date)),
    ];

    match record.imdb_id.as_deref() {
        Some(imdb_id) => output.extend([
            line("◎IMDb评分 ", &format!(" {}", record.user_rating)),
            line("◎TMDB评分 ", &format!(" {}", record.tmdb_rating)),
            line("◎IMDb链接 ", &format!(" {}", imdb_url(imdb_id))),
            line("◎TMDB链接 ", &format!(" {}", record.tmdb_url)),
        ]),
        None => output.extend([
            line("◎TMDB评分", &format!(" {}", record.tmdb_rating)),
            line("◎TMDB链接", &format!(" {}", record.tmdb_url)),
        ]),
    }

    output.push(line("◎编　　剧", &joined_or_na(&record.writers, WRITER_LIMIT)));
    output.push(line("◎主　　演", &joined_or_na(&record.cast, CAST_LIMIT)));
    if record.has_more_cast(CAST_LIMIT) {
        output.push(CAST_ELLIPSIS.to_string());
    }

    if record.media_type == MediaType::Tv {
        output.extend(episode_section(record, bbcode));
    }

    let overview = if record.overview.is_empty() {
        NO_OVERVIEW
    } else {
        record.overview.as_str()
    };
    output.push(line("◎简　　介", ""));
    output.push(format!("{SYNOPSIS_INDENT}{overview}"));

    output.join("\n")
}

/// IMDb title page for `imdb_id`.
pub fn imdb_url(imdb_id: &str) -> String {
    format!("https://www.imdb.com/title/{imdb_id}/")
}

/// Whether `title` is an unnamed-episode placeholder.
pub fn is_placeholder_episode(title: &str) -> bool {
    PLACEHOLDER_EPISODE.is_match(title)
}

fn display_title(record: &NormalizedRecord) -> String {
    match record.chinese_title.as_deref().filter(|t| !t.is_empty()) {
        Some(chinese) if !record.title.is_empty() && chinese != record.title => {
            format!("{chinese} / {}", record.title)
        }
        Some(chinese) => chinese.to_string(),
        None => record.title.clone(),
    }
}

fn or_na(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}

fn joined_or_na(names: &[String], limit: usize) -> String {
    if names.is_empty() {
        "N/A".to_string()
    } else {
        names
            .iter()
            .take(limit)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

fn accent(title: &str) -> String {
    format!("[color={ACCENT_COLOR}][b]{title}[/b][/color]")
}

/// Season, episode count, first episode name and the list of later episodes.
fn episode_section(record: &NormalizedRecord, bbcode: bool) -> Vec<String> {
    let line = |label: &str, content: &str| align_with(label, content, LABEL_WIDTH, bbcode);
    let animated = record
        .genres
        .iter()
        .any(|g| ANIMATION_GENRES.iter().any(|a| g.contains(a)));

    let mut lines = vec![
        line("◎季　　度", &format!("第 {} 季", record.season_label())),
        line("◎集　　数", &format!("共 {} 集", record.episode_count)),
    ];

    // A season may legitimately come back without any episodes.
    let Some((first, rest)) = record.episodes.split_first() else {
        return lines;
    };

    if !is_placeholder_episode(&first.title) {
        let title = if animated {
            accent(&first.title)
        } else {
            first.title.clone()
        };
        lines.push(line(
            "◎集　　名",
            &format!("第{:0>2}集:  {title}", first.number),
        ));
    }

    let mut listed = Vec::new();
    for (count, episode) in rest.iter().enumerate() {
        let placeholder = is_placeholder_episode(&episode.title);
        let value = if placeholder {
            EPISODE_ELLIPSIS
        } else {
            episode.title.as_str()
        };
        let value = if animated {
            accent(value)
        } else {
            value.to_string()
        };

        let mut content = format!(" 第{:0>2}集:  {value}", episode.number);
        if bbcode {
            content.insert(0, ' ');
        }
        listed.push(align_with("", &content, EPISODE_INDENT, bbcode));

        // Unnamed episodes from here on carry no information.
        if placeholder {
            break;
        }
        if count + 1 == EPISODE_LIMIT {
            listed.push(align_with("", EPISODE_ELLIPSIS, EPISODE_INDENT, bbcode));
            break;
        }
    }

    // A lone line is dropped; the block needs at least two.
    if listed.len() > 1 {
        lines.push(listed.join("\n"));
    }

    lines
}
