use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mc_elo::api::routes::events::{event_detail, sorted_events};
use mc_elo::api::routes::leaderboard::search_leaderboard;
use mc_elo::api::routes::players::player_profile;
use mc_elo::api::{build_router, cors_layer, state::AppState};
use mc_elo::calculate::{EventSortKey, SortDirection};
use mc_elo::config::AppConfig;
use mc_elo::fetch::{AvatarFetcher, FetcherConfig};
use mc_elo::logos::LogoResolver;
use mc_elo::models::LeaderboardRecord;
use mc_elo::parse_duration;
use mc_elo::storage::{DataSet, JsonRecordReader, StorageConfig};

#[derive(Parser)]
#[command(name = "mc-elo")]
#[command(about = "ELO leaderboard for Minecraft event players")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Directory holding the JSON data files, avatars and logos
    #[arg(long)]
    public_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,

        /// Log all HTTP requests
        #[arg(long)]
        access_log: bool,
    },

    /// Print the leaderboard
    Leaderboard {
        /// Case-insensitive name filter
        #[arg(long, default_value = "")]
        search: String,

        /// Maximum rows to print
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print the event list
    Events {
        /// Case-insensitive name filter
        #[arg(long, default_value = "")]
        search: String,

        /// Sort key (date, rating)
        #[arg(long, default_value = "date")]
        sort: String,

        /// Sort direction (asc, desc)
        #[arg(long, default_value = "desc")]
        direction: String,

        /// Maximum rows to print
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show one event's results by slug
    Event { slug: String },

    /// Show one player's profile
    Player { name: String },

    /// Download player avatars into the public directory
    DownloadAvatars {
        /// Pause between requests (e.g., "100ms", "1s")
        #[arg(long)]
        delay: Option<String>,

        /// Avatar size in pixels
        #[arg(long)]
        size: Option<u32>,
    },
}

fn load_data(storage: &StorageConfig) -> Result<DataSet> {
    DataSet::load(storage)
        .with_context(|| format!("loading data from {}", storage.public_dir.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(dir) = cli.public_dir.clone() {
        config.public_dir = dir;
    }
    let log_level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting mc-elo v{}", env!("CARGO_PKG_VERSION"));

    let storage = StorageConfig::new(config.public_dir.clone());
    let logos = LogoResolver::with_overrides(config.logos.overrides.clone());

    match cli.command {
        Commands::Serve {
            host,
            port,
            access_log,
        } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let data = load_data(&storage)?;
            let state = AppState::new(storage, data, logos);
            let mut app = build_router(state).layer(cors_layer(&config.server.cors_origin)?);
            if access_log {
                app = app.layer(TraceLayer::new_for_http());
            }

            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Leaderboard: http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Leaderboard { search, limit } => {
            let data = load_data(&storage)?;
            let rows = search_leaderboard(&data, &search);
            for row in rows.iter().take(limit.unwrap_or(usize::MAX)) {
                println!("{:>5}  {:<24} {:>10}", row.rank, row.player_name, row.rating_display);
            }
            tracing::info!("{} players matched", rows.len());
        }
        Commands::Events {
            search,
            sort,
            direction,
            limit,
        } => {
            let key: EventSortKey = sort.parse().map_err(anyhow::Error::msg)?;
            let direction: SortDirection = direction.parse().map_err(anyhow::Error::msg)?;

            let data = load_data(&storage)?;
            let events = sorted_events(&data, &logos, &search, key, direction);
            for event in events.iter().take(limit.unwrap_or(usize::MAX)) {
                println!(
                    "{:<12} {:<40} {:>4} players  avg {:>8.2}  {}",
                    event.date.as_deref().unwrap_or("-"),
                    event.display_name,
                    event.participant_count,
                    event.average_rating,
                    event.difficulty
                );
            }
            tracing::info!("{} events matched", events.len());
        }
        Commands::Event { slug } => {
            let data = load_data(&storage)?;
            match event_detail(&data, &logos, &slug) {
                Some(detail) => println!("{}", serde_json::to_string_pretty(&detail)?),
                None => anyhow::bail!("Event not found: {}", slug),
            }
        }
        Commands::Player { name } => {
            let data = load_data(&storage)?;
            match player_profile(&data, &logos, &name) {
                Some(profile) => println!("{}", serde_json::to_string_pretty(&profile)?),
                None => anyhow::bail!("Player not found: {}", name),
            }
        }
        Commands::DownloadAvatars { delay, size } => {
            let delay = delay
                .map(|raw| parse_duration(&raw).with_context(|| format!("invalid delay: {}", raw)))
                .transpose()?;
            config.apply_avatar_overrides(delay, size)?;
            let fetcher_config =
                FetcherConfig::from_avatar_config(&config.avatars, storage.avatars_dir());

            // Only the leaderboard is needed here; the history file may not exist yet.
            let players = JsonRecordReader::<LeaderboardRecord>::new(storage.leaderboard_path())
                .read_all()?;
            let fetcher = AvatarFetcher::new(fetcher_config)?;
            let summary = fetcher.download_all(&players).await?;
            if summary.failed > 0 {
                tracing::warn!("{} avatars failed to download", summary.failed);
            }
        }
    }

    Ok(())
}
