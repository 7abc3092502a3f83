//! Avatar downloading.
//!
//! Fetches each leaderboard player's head avatar from the avatar service and
//! stores it as `{avatars_dir}/{player}.png`, where the site serves it from.
//! Players whose file already exists are skipped without a request.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{error, info, warn};
use url::Url;

use crate::config::AvatarConfig;
use crate::models::LeaderboardRecord;

/// Errors that can occur during fetching.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Player name not usable as a file name: {0:?}")]
    InvalidPlayerName(String),
}

/// Configuration for the avatar fetcher.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Avatar service base URL
    pub base_url: String,

    /// Avatar size in pixels
    pub size: u32,

    /// Directory avatars are written to
    pub output_dir: PathBuf,

    /// Request timeout
    pub timeout: Duration,

    /// Pause between requests
    pub request_delay: Duration,

    /// User agent string
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self::from_avatar_config(&AvatarConfig::default(), PathBuf::from("./public/avatars"))
    }
}

impl FetcherConfig {
    pub fn from_avatar_config(config: &AvatarConfig, output_dir: PathBuf) -> Self {
        Self {
            base_url: config.base_url.clone(),
            size: config.size,
            output_dir,
            timeout: config.timeout(),
            request_delay: config.delay(),
            user_agent: format!("mc-elo/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Outcome of a download run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DownloadSummary {
    pub downloaded: u32,
    /// Already present on disk
    pub skipped: u32,
    /// Avatar service answered with a non-success status
    pub missing: u32,
    pub failed: u32,
}

enum AvatarOutcome {
    Downloaded,
    Missing(u16),
}

/// HTTP client for the avatar service.
pub struct AvatarFetcher {
    client: Client,
    config: FetcherConfig,
}

impl AvatarFetcher {
    pub fn new(config: FetcherConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("mc-elo")),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    /// Avatar service URL for a player: `{base_url}/{player}/{size}`.
    pub fn avatar_url(&self, player_name: &str) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", self.config.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.config.base_url.clone()))?
            .pop_if_empty()
            .push(player_name)
            .push(&self.config.size.to_string());
        Ok(url)
    }

    /// Where a player's avatar is stored. Names that would leave the output
    /// directory are rejected.
    pub fn output_path(&self, player_name: &str) -> Result<PathBuf, FetchError> {
        let unsafe_name = player_name.is_empty()
            || player_name == "."
            || player_name == ".."
            || player_name.contains(|c| matches!(c, '/' | '\\' | '\0'));
        if unsafe_name {
            return Err(FetchError::InvalidPlayerName(player_name.to_string()));
        }
        Ok(self.config.output_dir.join(format!("{}.png", player_name)))
    }

    /// Download avatars for every player in order, one at a time.
    ///
    /// A failure for one player is logged and the run moves on.
    pub async fn download_all(
        &self,
        players: &[LeaderboardRecord],
    ) -> Result<DownloadSummary, FetchError> {
        info!(
            "Downloading avatars for {} players from {}",
            players.len(),
            self.config.base_url
        );
        fs::create_dir_all(&self.config.output_dir).await?;

        let mut summary = DownloadSummary::default();
        for player in players {
            let name = &player.player_name;
            let output_path = match self.output_path(name) {
                Ok(path) => path,
                Err(e) => {
                    warn!("Skipping avatar: {}", e);
                    summary.failed += 1;
                    continue;
                }
            };

            if output_path.exists() {
                info!("Avatar for {} already exists, skipping", name);
                summary.skipped += 1;
                continue;
            }

            match self.download_one(name, &output_path).await {
                Ok(AvatarOutcome::Downloaded) => {
                    info!("Downloaded avatar for {}", name);
                    summary.downloaded += 1;
                }
                Ok(AvatarOutcome::Missing(status)) => {
                    warn!("Avatar not found for {} (status {}), skipping", name, status);
                    summary.missing += 1;
                }
                Err(e) => {
                    error!("Failed to download avatar for {}: {}", name, e);
                    summary.failed += 1;
                }
            }

            tokio::time::sleep(self.config.request_delay).await;
        }

        info!(
            "Avatar download finished: {} downloaded, {} skipped, {} missing, {} failed",
            summary.downloaded, summary.skipped, summary.missing, summary.failed
        );
        Ok(summary)
    }

    async fn download_one(
        &self,
        player_name: &str,
        output_path: &Path,
    ) -> Result<AvatarOutcome, FetchError> {
        let url = self.avatar_url(player_name)?;
        let response = self.client.get(url.as_str()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Ok(AvatarOutcome::Missing(status.as_u16()));
        }

        let content = response.bytes().await?;
        let mut file = fs::File::create(output_path).await?;
        file.write_all(&content).await?;
        file.flush().await?;

        Ok(AvatarOutcome::Downloaded)
    }
}
