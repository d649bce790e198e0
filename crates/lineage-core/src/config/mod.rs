//! Configuration management with file persistence

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Lineage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseSection,
    pub server: ServerConfig,
    pub search: SearchConfig,
    pub registry: RegistryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Limit applied when a request does not specify one
    pub default_limit: u32,
    /// Upper bound for any requested limit
    pub max_limit: u32,
    /// Maximum number of collection queries in flight at once
    pub concurrency: usize,
    /// Overall deadline for one fan-out, in milliseconds
    pub deadline_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Optional TOML catalog replacing the built-in collection list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            path: None,
            max_connections: 5,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 100,
            concurrency: 8,
            deadline_ms: 5_000,
        }
    }
}

impl SearchConfig {
    /// Clamp a requested limit into `[1, max_limit]`, defaulting when absent
    pub fn effective_limit(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.default_limit)
            .clamp(1, self.max_limit.max(1))
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        let dir = if let Ok(custom_dir) = env::var("LINEAGE_CONFIG_DIR") {
            PathBuf::from(custom_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| anyhow!("Could not determine config directory"))?
                .join("lineage")
        };
        Ok(dir)
    }

    /// Get the config file path
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file, or defaults if it doesn't exist
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path()?;

        let mut config = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            Self::from_toml_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Config::default()
        };

        if let Ok(db_path) = env::var("LINEAGE_DATABASE") {
            config.database.path = Some(PathBuf::from(db_path));
        }

        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(contents).context("Invalid TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> anyhow::Result<()> {
        self.validate()?;

        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        let path = Self::config_path()?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.database.max_connections == 0 {
            return Err(anyhow!("database.max_connections must be at least 1"));
        }
        if self.search.max_limit == 0 {
            return Err(anyhow!("search.max_limit must be at least 1"));
        }
        if self.search.default_limit == 0 || self.search.default_limit > self.search.max_limit {
            return Err(anyhow!(
                "search.default_limit must be between 1 and search.max_limit ({})",
                self.search.max_limit
            ));
        }
        if self.search.concurrency == 0 {
            return Err(anyhow!("search.concurrency must be at least 1"));
        }
        if self.search.deadline_ms == 0 {
            return Err(anyhow!("search.deadline_ms must be at least 1"));
        }
        Ok(())
    }

    /// Get a configuration value by key
    pub fn get(&self, key: &str) -> anyhow::Result<String> {
        match key {
            "database.path" => Ok(self
                .database
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(default)".to_string())),
            "database.max_connections" => Ok(self.database.max_connections.to_string()),

            "server.bind" => Ok(self.server.bind.clone()),

            "search.default_limit" => Ok(self.search.default_limit.to_string()),
            "search.max_limit" => Ok(self.search.max_limit.to_string()),
            "search.concurrency" => Ok(self.search.concurrency.to_string()),
            "search.deadline_ms" => Ok(self.search.deadline_ms.to_string()),

            "registry.path" => Ok(self
                .registry
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(built-in catalog)".to_string())),

            _ => Err(anyhow!(
                "Unknown configuration key: {}. Use `lineage config list` to see available keys.",
                key
            )),
        }
    }

    /// Set a configuration value by key
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "database.path" => {
                self.database.path = Some(PathBuf::from(value));
            }
            "database.max_connections" => {
                self.database.max_connections = value
                    .parse()
                    .with_context(|| format!("Invalid max_connections value: {}", value))?;
            }

            "server.bind" => {
                value
                    .parse::<std::net::SocketAddr>()
                    .with_context(|| format!("Invalid bind address: {}", value))?;
                self.server.bind = value.to_string();
            }

            "search.default_limit" => {
                self.search.default_limit = value
                    .parse()
                    .with_context(|| format!("Invalid default_limit value: {}", value))?;
            }
            "search.max_limit" => {
                self.search.max_limit = value
                    .parse()
                    .with_context(|| format!("Invalid max_limit value: {}", value))?;
            }
            "search.concurrency" => {
                self.search.concurrency = value
                    .parse()
                    .with_context(|| format!("Invalid concurrency value: {}", value))?;
            }
            "search.deadline_ms" => {
                self.search.deadline_ms = value
                    .parse()
                    .with_context(|| format!("Invalid deadline_ms value: {}", value))?;
            }

            "registry.path" => {
                self.registry.path = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }

            _ => {
                return Err(anyhow!(
                    "Unknown configuration key: {}. Use `lineage config list` to see available keys.",
                    key
                ));
            }
        }
        self.validate()
    }

    /// List all configuration keys and their values
    pub fn list(&self) -> anyhow::Result<Vec<(String, String)>> {
        let keys = vec![
            "database.path",
            "database.max_connections",
            "server.bind",
            "search.default_limit",
            "search.max_limit",
            "search.concurrency",
            "search.deadline_ms",
            "registry.path",
        ];

        keys.into_iter()
            .map(|key| {
                let value = self.get(key)?;
                Ok((key.to_string(), value))
            })
            .collect()
    }

    /// Reset configuration to defaults
    pub fn reset() -> anyhow::Result<()> {
        let path = Self::config_path()?;
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove config file: {}", path.display()))?;
        }
        Ok(())
    }
}
