use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub tmdb: TmdbConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the web front-end, served as an SPA when set
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    23333
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    /// TMDB "API Read Access Token", sent as a bearer token
    #[serde(default)]
    pub access_token: String,

    /// Optional HTTP(S) proxy for all TMDB traffic
    #[serde(default)]
    pub proxy: Option<String>,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Language passed to TMDB when the caller does not pick one
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Per-request timeout. Unset means the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_api_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}
fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w600_and_h900_bestv2".to_string()
}
fn default_language() -> String {
    "zh-CN".to_string()
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            proxy: None,
            api_base_url: default_api_base_url(),
            image_base_url: default_image_base_url(),
            default_language: default_language(),
            timeout_secs: None,
        }
    }
}

impl TmdbConfig {
    /// Config pointing at an arbitrary API root, used by tests against a fake provider.
    pub fn with_base_url(access_token: impl Into<String>, api_base_url: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }
}
