//! Shared test harness for integration tests.
//!
//! Provides [`FakeTmdb`], a wiremock server answering the TMDB endpoints the
//! aggregator calls, and [`TestHarness`] which starts Axum on a random port
//! with an [`AppContext`] pointed at that fake.

#![allow(dead_code)]

use std::net::SocketAddr;

use serde_json::{json, Value};
use tmdbgen::config::{Config, TmdbConfig};
use tmdbgen::metadata::Aggregator;
use tmdbgen::server::{create_router, AppContext};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "test-token";

/// Fake TMDB API backed by wiremock.
pub struct FakeTmdb {
    pub server: MockServer,
}

impl FakeTmdb {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn config(&self) -> TmdbConfig {
        TmdbConfig::with_base_url(TOKEN, self.server.uri())
    }

    pub fn aggregator(&self) -> Aggregator {
        Aggregator::new(self.config())
    }

    /// Serve `body` for an authenticated GET of `route`.
    pub async fn mount(&self, route: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Like [`FakeTmdb::mount`], but only matching the given language and
    /// expecting exactly one call.
    pub async fn mount_localized(&self, route: &str, language: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .and(query_param("language", language))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Mount empty credits, alternative titles and external ids for `base`.
    pub async fn mount_empty_extras(&self, base: &str) {
        self.mount(&format!("{base}/credits"), json!({"cast": [], "crew": []}))
            .await;
        self.mount(&format!("{base}/alternative_titles"), json!({"results": []}))
            .await;
        self.mount(&format!("{base}/external_ids"), json!({"imdb_id": null}))
            .await;
    }

    /// The Parasite fixture: movie 496243 without an IMDb id.
    pub async fn mount_parasite(&self) {
        self.mount(
            "/movie/496243",
            json!({
                "id": 496243,
                "title": "Parasite",
                "original_title": "기생충",
                "release_date": "2019-05-30",
                "vote_average": 8.5,
                "vote_count": 12000,
                "poster_path": "/7IiTTgloJzvGI1TAYymCfbfl3vT.jpg",
                "overview": "Greed and class discrimination threaten the newly formed symbiotic relationship.",
                "genres": [{"id": 35, "name": "Comedy"}, {"id": 53, "name": "Thriller"}],
                "production_countries": [{"iso_3166_1": "KR", "name": "South Korea"}],
                "spoken_languages": [{"iso_639_1": "ko", "name": "한국어/조선말"}]
            }),
        )
        .await;
        self.mount(
            "/movie/496243/credits",
            json!({
                "cast": [
                    {"name": "Song Kang-ho"}, {"name": "Lee Sun-kyun"}, {"name": "Cho Yeo-jeong"},
                    {"name": "Choi Woo-shik"}, {"name": "Park So-dam"}, {"name": "Lee Jung-eun"},
                    {"name": "Jang Hye-jin"}, {"name": "Park Myung-hoon"}
                ],
                "crew": [
                    {"name": "Bong Joon-ho", "job": "Director", "department": "Directing"},
                    {"name": "Bong Joon-ho", "job": "Screenplay", "department": "Writing"},
                    {"name": "Han Jin-won", "job": "Screenplay", "department": "Writing"}
                ]
            }),
        )
        .await;
        self.mount(
            "/movie/496243/alternative_titles",
            json!({"id": 496243, "titles": [{"iso_3166_1": "US", "title": "Gisaengchung"}]}),
        )
        .await;
        self.mount("/movie/496243/external_ids", json!({"id": 496243, "imdb_id": null}))
            .await;
    }
}

/// Test harness wrapping an [`AppContext`] whose aggregator talks to a [`FakeTmdb`].
pub struct TestHarness {
    pub ctx: AppContext,
    pub tmdb: FakeTmdb,
}

impl TestHarness {
    pub async fn new() -> Self {
        let tmdb = FakeTmdb::start().await;
        let config = Config {
            tmdb: tmdb.config(),
            ..Config::default()
        };
        Self {
            ctx: AppContext::new(config),
            tmdb,
        }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        let harness = Self::new().await;
        let app = create_router(harness.ctx.clone(), None);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }
}

/// An address nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind random port");
    let addr = listener.local_addr().expect("failed to get local addr");
    drop(listener);
    format!("http://{addr}")
}
