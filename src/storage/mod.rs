//! Source data access.
//!
//! The site is built from two JSON files in the public directory:
//! - `final_leaderboard.json`: current standings, one record per player
//! - `rating_history_full.json`: one record per (player, event) participation
//!
//! Both are read once into a [`DataSet`] that is shared, read-only, for the
//! life of the process.

mod dataset;
mod json;

pub use dataset::*;
pub use json::*;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading source data.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Unexpected document shape in {path}: expected an array or object of records")]
    UnexpectedShape { path: PathBuf },
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub public_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(public_dir: PathBuf) -> Self {
        Self { public_dir }
    }

    pub fn leaderboard_path(&self) -> PathBuf {
        self.public_dir.join("final_leaderboard.json")
    }

    pub fn history_path(&self) -> PathBuf {
        self.public_dir.join("rating_history_full.json")
    }

    pub fn avatars_dir(&self) -> PathBuf {
        self.public_dir.join("avatars")
    }

    pub fn logos_dir(&self) -> PathBuf {
        self.public_dir.join("logos")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./public"))
    }
}
