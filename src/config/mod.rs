mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    apply_env_overrides(&mut config);
    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./config.toml",
        "./tmdbgen.toml",
        "~/.config/tmdbgen/config.toml",
        "/etc/tmdbgen/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    // Fall back to defaults plus whatever the environment provides
    let mut config = Config::default();
    apply_env_overrides(&mut config);
    validate_config(&config)?;
    Ok(config)
}

/// Apply `ACCESS_TOKEN`, `HTTP_PROXY` and `SERVER_PORT` from the process environment
pub fn apply_env_overrides(config: &mut Config) {
    apply_overrides_from(config, |key| std::env::var(key).ok());
}

/// Apply overrides using an arbitrary variable lookup
pub fn apply_overrides_from<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(token) = lookup("ACCESS_TOKEN").filter(|t| !t.trim().is_empty()) {
        config.tmdb.access_token = token.trim().to_string();
    }

    if let Some(proxy) = lookup("HTTP_PROXY").filter(|p| !p.trim().is_empty()) {
        config.tmdb.proxy = Some(proxy.trim().to_string());
    }

    // Non-numeric ports are ignored rather than rejected
    if let Some(port) = lookup("SERVER_PORT") {
        let port = port.trim();
        match port.parse::<u16>() {
            Ok(parsed) if port.chars().all(|c| c.is_ascii_digit()) => {
                config.server.port = parsed;
            }
            _ => tracing::warn!("Ignoring invalid SERVER_PORT value: {:?}", port),
        }
    }
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if let Some(ref proxy) = config.tmdb.proxy {
        reqwest::Url::parse(proxy).with_context(|| format!("Invalid proxy URL: {proxy}"))?;
    }

    reqwest::Url::parse(&config.tmdb.api_base_url)
        .with_context(|| format!("Invalid TMDB API base URL: {}", config.tmdb.api_base_url))?;

    if let Some(ref dir) = config.server.static_dir {
        if !dir.exists() {
            tracing::warn!("Static directory does not exist: {:?}", dir);
        }
    }

    Ok(())
}

/// Fail when no TMDB access token is configured.
///
/// Loading a config without a token is fine (e.g. `validate`); anything that
/// talks to TMDB calls this first.
pub fn require_access_token(config: &Config) -> Result<()> {
    if config.tmdb.access_token.is_empty() {
        anyhow::bail!("ACCESS_TOKEN not set: configure tmdb.access_token or the ACCESS_TOKEN environment variable");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn env_overrides_token_and_proxy() {
        let mut config = Config::default();
        apply_overrides_from(
            &mut config,
            lookup(&[("ACCESS_TOKEN", " tok "), ("HTTP_PROXY", "http://proxy:3128")]),
        );
        assert_eq!(config.tmdb.access_token, "tok");
        assert_eq!(config.tmdb.proxy.as_deref(), Some("http://proxy:3128"));
    }

    #[test]
    fn numeric_port_override() {
        let mut config = Config::default();
        apply_overrides_from(&mut config, lookup(&[("SERVER_PORT", "8088")]));
        assert_eq!(config.server.port, 8088);
    }

    #[test]
    fn non_numeric_port_is_ignored() {
        let mut config = Config::default();
        apply_overrides_from(&mut config, lookup(&[("SERVER_PORT", "80a")]));
        assert_eq!(config.server.port, 23333);

        apply_overrides_from(&mut config, lookup(&[("SERVER_PORT", "-1")]));
        assert_eq!(config.server.port, 23333);
    }

    #[test]
    fn empty_token_does_not_clear_file_value() {
        let mut config = Config::default();
        config.tmdb.access_token = "from-file".into();
        apply_overrides_from(&mut config, lookup(&[("ACCESS_TOKEN", "")]));
        assert_eq!(config.tmdb.access_token, "from-file");
    }

    #[test]
    fn missing_token_is_rejected() {
        let config = Config::default();
        assert!(require_access_token(&config).is_err());
    }

    #[test]
    fn bad_proxy_fails_validation() {
        let mut config = Config::default();
        config.tmdb.proxy = Some("not a url".into());
        assert!(validate_config(&config).is_err());
    }
}
