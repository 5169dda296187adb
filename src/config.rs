use crate::feeds::http::HttpFetcher;
use crate::feeds::local::DirFetcher;
use crate::feeds::ResourceFetcher;
use crate::ui::view_model::Projection;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_tweets_path")]
    pub tweets_path: String,
    #[serde(default = "default_annotations_path")]
    pub annotations_path: String,
    /// Read the JSON files from this directory instead of over HTTP.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_title")]
    pub title: String,
    /// Placeholder identity shown on every tweet card.
    #[serde(default = "default_author_name")]
    pub author_name: String,
    #[serde(default = "default_author_handle")]
    pub author_handle: String,
    #[serde(default)]
    pub projection: Projection,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_tweets_path() -> String {
    "/data/recent-tweets.json".to_string()
}

fn default_annotations_path() -> String {
    "/data/annotations.json".to_string()
}

fn default_title() -> String {
    "Tweet annotations".to_string()
}

fn default_author_name() -> String {
    "Donald J. Trump".to_string()
}

fn default_author_handle() -> String {
    "@realdonaldtrump".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            tweets_path: default_tweets_path(),
            annotations_path: default_annotations_path(),
            data_dir: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            author_name: default_author_name(),
            author_handle: default_author_handle(),
            projection: Projection::default(),
        }
    }
}

impl DataConfig {
    pub fn build_fetcher(&self) -> Arc<dyn ResourceFetcher> {
        match &self.data_dir {
            Some(dir) => Arc::new(DirFetcher::new(dir.clone())),
            None => Arc::new(HttpFetcher::new(
                self.base_url.clone(),
                self.tweets_path.clone(),
                self.annotations_path.clone(),
            )),
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tweetnotes").join("config.toml"))
    }

    /// Load from the default location, falling back to defaults when no
    /// config file exists.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
