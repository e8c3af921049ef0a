use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use liverank::ranking::{platform_top, Platform};
use liverank::session::RankingBoard;
use liverank::Selection;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_IO: i32 = 1;
const EXIT_LOAD: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the integrated ranking (default if no subcommand)
    List {
        /// Show only the first N titles
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show each platform's own top list
    Platforms {
        /// Entries per platform
        #[arg(short, long, default_value_t = 5)]
        limit: usize,
    },
    /// List the weeks and genres present in the data
    Facets,
    /// Write the integrated ranking as CSV
    Export {
        /// Output file (defaults to a name derived from the selection)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "liverank")]
#[command(about = "Cross-platform OTT weekly top-10 leaderboard", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/liverank/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Read <platform>_top10.csv files from this directory
    #[arg(long, global = true, conflicts_with = "base_url")]
    data_dir: Option<PathBuf>,

    /// Fetch <platform>_top10.csv files from this base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Restrict to these platforms (comma-separated)
    #[arg(long = "platform", global = true, value_delimiter = ',')]
    platforms: Vec<Platform>,

    /// Restrict to these genres (comma-separated)
    #[arg(long = "genre", global = true, value_delimiter = ',')]
    genres: Vec<String>,

    /// Week to show (defaults to the most recent)
    #[arg(long, global = true)]
    week: Option<String>,

    /// Selection as a query string, e.g. "platforms=netflix,wavve&week=2024-03"
    #[arg(long, global = true)]
    query: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    /// Selection from --query, with explicit facet flags taking precedence
    fn selection(&self) -> Result<Selection, liverank::SelectionError> {
        let mut selection = match &self.query {
            Some(q) => Selection::from_query(q)?,
            None => Selection::default(),
        };
        if !self.platforms.is_empty() {
            selection.platforms = self.platforms.clone();
        }
        if !self.genres.is_empty() {
            selection.genres = self.genres.clone();
        }
        if self.week.is_some() {
            selection.week = self.week.clone();
        }
        Ok(selection)
    }
}

fn init_tracing(verbose: bool, log_level: Option<&str>) {
    let fallback = if verbose { "debug" } else { log_level.unwrap_or("warn") };
    let env_filter = if verbose {
        EnvFilter::new(fallback)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    // Both ring and aws-lc may be compiled in; pick one explicitly
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();
    let start_time = Instant::now();

    let selection = match cli.selection() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Selection error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Load config
    let source_override = cli.data_dir.is_some() || cli.base_url.is_some();
    let config_path = cli.config.clone().map(PathBuf::from);
    let mut config = match liverank::config::load_config(config_path, source_override) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    config.override_source(cli.data_dir.clone(), cli.base_url.clone());

    init_tracing(cli.verbose, config.log_level.as_deref());

    if let Err(errors) = liverank::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let (source, options) = match config.data_source().and_then(|s| Ok((s, config.load_options()?))) {
        Ok(pair) => pair,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Load every platform
    let mut board = RankingBoard::new();
    let ticket = board.begin_load();
    let outcome = liverank::fetch::load_all(&source, &options).await;
    let all_failed = outcome.all_failed();
    board.complete_load(&ticket, outcome);

    for failure in board.failed() {
        eprintln!("Could not load {}: {}", failure.platform, failure.message);
    }
    tracing::debug!(elapsed = ?start_time.elapsed(), records = board.records().len(), "records loaded");

    let view = board.view(&selection);
    let use_colors = liverank::output::should_use_colors();

    match cli.command.unwrap_or(Commands::List {
        limit: None,
        json: false,
    }) {
        Commands::List { limit, json } => {
            if json {
                match liverank::output::format_json(&view, limit) {
                    Ok(doc) => println!("{}", doc),
                    Err(e) => {
                        eprintln!("Failed to serialize rankings: {}", e);
                        std::process::exit(EXIT_IO);
                    }
                }
            } else {
                if let Some(week) = view.selection.week() {
                    println!("{} 주차", week);
                }
                println!("{}", liverank::output::format_summary(&view.summary, use_colors));
                println!();
                let shown = limit.unwrap_or(view.rankings.len()).min(view.rankings.len());
                println!(
                    "{}",
                    liverank::output::format_ranking_table(&view.rankings[..shown], use_colors)
                );
            }
        }
        Commands::Platforms { limit } => {
            let platforms: Vec<Platform> = if view.selection.platforms.is_empty() {
                Platform::ALL.to_vec()
            } else {
                view.selection.platforms.clone()
            };
            let sections: Vec<String> = platforms
                .into_iter()
                .map(|platform| {
                    let top = platform_top(&view.records, platform, limit);
                    liverank::output::format_platform_top(platform, &top, limit, use_colors)
                })
                .collect();
            println!("{}", sections.join("\n\n"));
        }
        Commands::Facets => {
            println!("{}", liverank::output::format_facets(&view.weeks, &view.genres));
        }
        Commands::Export { output } => {
            let path = output
                .unwrap_or_else(|| PathBuf::from(liverank::output::export_filename(&view.selection)));
            if let Err(e) = liverank::output::write_export(&path, &view.rankings) {
                eprintln!("Export failed: {:#}", e);
                std::process::exit(EXIT_IO);
            }
            println!("Exported {} titles to {}", view.rankings.len(), path.display());
        }
    }

    if all_failed {
        eprintln!("All platforms failed to load. Check the data source.");
        std::process::exit(EXIT_LOAD);
    }

    std::process::exit(EXIT_SUCCESS);
}
