mod cli;

use tmdbgen::{config, metadata::Aggregator, render::RenderOptions, server};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&std::path::Path>,
) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;
    config::require_access_token(&config)?;

    // Override host/port from CLI if specified
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting tmdbgen server");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );
    if let Some(ref proxy) = config.tmdb.proxy {
        tracing::info!("Routing TMDB traffic through proxy {}", proxy);
    }

    server::start_server(config).await
}

async fn generate(
    media_link: &str,
    language: Option<&str>,
    season: Option<u32>,
    plain: bool,
    config_path: Option<&std::path::Path>,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    config::require_access_token(&config)?;

    let aggregator = Aggregator::new(config.tmdb);
    let language = language.unwrap_or(aggregator.default_language()).to_string();
    let options = RenderOptions { bbcode: !plain };

    match tmdbgen::describe(&aggregator, media_link, &language, season, options).await {
        Ok(description) => {
            println!("{}", description);
            Ok(())
        }
        Err(e) => {
            tracing::debug!("Generation failed: {}", e);
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "tmdbgen=trace,tower_http=debug".to_string()
        } else {
            "tmdbgen=debug,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::Gen {
            media_link,
            language,
            season,
            plain,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(generate(
                &media_link,
                language.as_deref(),
                season,
                plain,
                cli.config.as_deref(),
            ))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("tmdbgen {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn validate_config(path: Option<&std::path::Path>) -> Result<()> {
    match path {
        Some(p) => println!("Validating config: {:?}", p),
        None => println!("No config file specified, using defaults and environment"),
    }

    let config = config::load_config_or_default(path)?;
    println!("✓ Configuration is valid");
    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  TMDB API: {}", config.tmdb.api_base_url);
    println!(
        "  Access token: {}",
        if config.tmdb.access_token.is_empty() {
            "missing"
        } else {
            "set"
        }
    );
    println!(
        "  Proxy: {}",
        config.tmdb.proxy.as_deref().unwrap_or("none")
    );
    println!("  Default language: {}", config.tmdb.default_language);
    if let Some(ref dir) = config.server.static_dir {
        println!("  Static dir: {:?}", dir);
    }

    Ok(())
}
