use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tmdbgen")]
#[command(author, version, about = "Generate forum descriptions from TMDB")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Start {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the description of a single title
    Gen {
        /// TMDB link, e.g. https://www.themoviedb.org/movie/550
        #[arg(required = true)]
        media_link: String,

        /// Language code passed to TMDB (defaults to the configured language)
        #[arg(short, long)]
        language: Option<String>,

        /// Season of a TV show
        #[arg(short, long)]
        season: Option<u32>,

        /// Output plain text without BBCode markup
        #[arg(long)]
        plain: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
