//! Benchmarks for description rendering
//!
//! Measures BBCode and plain-text rendering for a movie and for TV seasons of
//! increasing episode counts.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tmdbgen::metadata::{EpisodeName, MediaType, NormalizedRecord};
use tmdbgen::render::{render_with, RenderOptions};

fn movie() -> NormalizedRecord {
    let mut record = NormalizedRecord::empty(MediaType::Movie);
    record.title = "寄生虫".into();
    record.original_title = "기생충".into();
    record.poster_url =
        "https://image.tmdb.org/t/p/w600_and_h900_bestv2/7IiTTgloJzvGI1TAYymCfbfl3vT.jpg".into();
    record.year = "2019".into();
    record.country = "South Korea".into();
    record.genres = vec!["喜剧".into(), "惊悚".into(), "剧情".into()];
    record.spoken_language = "한국어/조선말".into();
    record.release_date = "2019-05-30".into();
    record.tmdb_url = "https://www.themoviedb.org/movie/496243".into();
    record.tmdb_rating = "8.5/12000".into();
    record.user_rating = "8.5/10".into();
    record.imdb_id = Some("tt6751668".into());
    record.overview = "全职无业游民金基泽一家四口住在狭窄的半地下室里。".repeat(4);
    record.directors = vec!["Bong Joon-ho".into()];
    record.writers = vec!["Bong Joon-ho".into(), "Han Jin-won".into()];
    record.cast = (1..=6).map(|i| format!("Actor {i}")).collect();
    record.cast_total = 40;
    record
}

fn season(episodes: usize) -> NormalizedRecord {
    let mut record = movie();
    record.media_type = MediaType::Tv;
    record.tmdb_url = "https://www.themoviedb.org/tv/1399".into();
    record.genres = vec!["动画".into(), "剧情".into()];
    record.season = Some(1);
    record.episode_count = episodes as u32;
    record.episodes = (1..=episodes)
        .map(|n| EpisodeName::new(n.to_string(), format!("第{n}话 标题")))
        .collect();
    record
}

fn bench_movie(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_movie");
    let record = movie();

    group.bench_function("bbcode", |b| {
        b.iter(|| render_with(black_box(&record), RenderOptions { bbcode: true }))
    });
    group.bench_function("plain", |b| {
        b.iter(|| render_with(black_box(&record), RenderOptions { bbcode: false }))
    });

    group.finish();
}

fn bench_season(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_season");

    for episodes in [1usize, 12, 30, 120] {
        let record = season(episodes);
        group.bench_with_input(BenchmarkId::from_parameter(episodes), &record, |b, record| {
            b.iter(|| render_with(black_box(record), RenderOptions::default()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_movie, bench_season);
criterion_main!(benches);
