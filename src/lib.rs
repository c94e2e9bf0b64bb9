//! Notion Epic Tracker
//!
//! Tracks Epics and their Tasks in a Notion workspace:
//! - Notion REST binding with a swappable store trait
//! - Exact-title resolution, status mutation, and dashboard aggregation
//! - Session logging on Epic pages
//! - MCP server exposing the operations as tools

pub mod mcp;
pub mod notion;
pub mod tracker;

#[cfg(test)]
pub(crate) mod test_helpers;

use anyhow::Result;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

// ============================================================================
// YAML config structs (deserialization targets)
// ============================================================================

/// Top-level YAML configuration file structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub notion: NotionYamlConfig,
}

/// Notion configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotionYamlConfig {
    /// Integration token. Usually supplied through `NOTION_TOKEN` instead.
    pub token: Option<String>,
    pub api_url: String,
    pub api_version: String,
    pub epic_data_source_id: String,
    pub task_data_source_id: String,
    pub task_database_id: String,
}

impl Default for NotionYamlConfig {
    fn default() -> Self {
        let collections = tracker::Collections::default();
        Self {
            token: None,
            api_url: notion::client::DEFAULT_API_URL.into(),
            api_version: notion::client::DEFAULT_API_VERSION.into(),
            epic_data_source_id: collections.epic_data_source_id,
            task_data_source_id: collections.task_data_source_id,
            task_database_id: collections.task_database_id,
        }
    }
}

// ============================================================================
// Runtime config (what the application actually uses)
// ============================================================================

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// None when unset; requests fail with a missing-token error instead
    pub notion_token: Option<String>,
    pub notion_api_url: String,
    pub notion_api_version: String,
    pub collections: tracker::Collections,
}

impl Config {
    /// Load configuration from environment variables and `config.yaml` in CWD.
    /// Equivalent to from_yaml_and_env(None).
    pub fn from_env() -> Result<Self> {
        Self::from_yaml_and_env(None)
    }

    /// Load configuration from an optional YAML file, then override with env vars.
    ///
    /// Priority: env var > YAML > default
    ///
    /// If `yaml_path` is None, tries "config.yaml" in CWD. If the file doesn't
    /// exist, falls back to pure env var / defaults.
    pub fn from_yaml_and_env(yaml_path: Option<&Path>) -> Result<Self> {
        let yaml = Self::load_yaml(yaml_path).notion;

        Ok(Self {
            notion_token: non_blank(std::env::var("NOTION_TOKEN").ok())
                .or_else(|| non_blank(yaml.token)),
            notion_api_url: std::env::var("NOTION_API_URL").unwrap_or(yaml.api_url),
            notion_api_version: std::env::var("NOTION_API_VERSION").unwrap_or(yaml.api_version),
            collections: tracker::Collections {
                epic_data_source_id: std::env::var("NOTION_EPIC_DS_ID")
                    .unwrap_or(yaml.epic_data_source_id),
                task_data_source_id: std::env::var("NOTION_TASK_DS_ID")
                    .unwrap_or(yaml.task_data_source_id),
                task_database_id: std::env::var("NOTION_TASK_DB_ID")
                    .unwrap_or(yaml.task_database_id),
            },
        })
    }

    /// Try to load and parse a YAML config file. Returns defaults on any failure.
    fn load_yaml(yaml_path: Option<&Path>) -> YamlConfig {
        let default_path = Path::new("config.yaml");
        let path = yaml_path.unwrap_or(default_path);

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    YamlConfig::default()
                }
            },
            Err(_) => {
                tracing::debug!(
                    "No config file at {}, using env vars / defaults",
                    path.display()
                );
                YamlConfig::default()
            }
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub tracker: tracker::EpicTracker,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wire the Notion client and the tracker from `config`
    pub fn new(config: Config) -> Self {
        let store: Arc<dyn notion::NotionStore> = Arc::new(notion::NotionClient::new(
            &config.notion_api_url,
            &config.notion_api_version,
            config.notion_token.clone(),
        ));
        Self::with_store(store, config)
    }

    /// Build state over an existing store
    pub fn with_store(store: Arc<dyn notion::NotionStore>, config: Config) -> Self {
        let tracker = tracker::EpicTracker::new(store, config.collections.clone());
        Self {
            tracker,
            config: Arc::new(config),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
