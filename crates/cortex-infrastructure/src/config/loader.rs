//! Configuration loader
//!
//! Handles loading configuration from various sources including
//! TOML files, environment variables, and default values.
//!
//! Uses Figment for configuration management, merging defaults with an
//! optional TOML file and prefixed environment variables.

use crate::config::AppConfig;
use crate::constants::*;
use crate::error_ext::ErrorContext;
use crate::logging::log_config_loaded;
use cortex_domain::error::{Error, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (if present)
    /// 3. Environment variables with prefix (e.g. `CORTEX_INDEXING_FILES_PER_BATCH`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        figment = figment.merge(Env::prefixed(&format!("{}_", self.env_prefix)).split("_"));

        let app_config: AppConfig = figment
            .extract()
            .context("Failed to extract configuration")?;

        self.validate_config(&app_config)?;

        Ok(app_config)
    }

    /// Reload configuration (useful for hot-reloading)
    pub fn reload(&self) -> Result<AppConfig> {
        self.load()
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Find default configuration file paths to try
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            current_dir.join(DEFAULT_CONFIG_FILENAME),
            current_dir
                .join(DEFAULT_CONFIG_DIR)
                .join(DEFAULT_CONFIG_FILENAME),
            dirs::config_dir()?
                .join(DEFAULT_CONFIG_DIR)
                .join(DEFAULT_CONFIG_FILENAME),
            dirs::home_dir()?
                .join(format!(".{}", DEFAULT_CONFIG_DIR))
                .join(DEFAULT_CONFIG_FILENAME),
        ];

        candidates.into_iter().find(|path| path.exists())
    }

    fn validate_config(&self, config: &AppConfig) -> Result<()> {
        validate_app_config(config)
    }
}

/// Validate application configuration
fn validate_app_config(config: &AppConfig) -> Result<()> {
    if config.indexing.files_per_batch == 0 {
        return Err(Error::Configuration {
            message: "indexing.files_per_batch cannot be 0".to_string(),
            source: None,
        });
    }
    if config.indexing.chunking.max_chunk_size == 0 {
        return Err(Error::Configuration {
            message: "indexing.chunking.max_chunk_size cannot be 0".to_string(),
            source: None,
        });
    }
    if config.catalog.busy_timeout_ms == 0 {
        return Err(Error::Configuration {
            message: "catalog.busy_timeout_ms cannot be 0".to_string(),
            source: None,
        });
    }
    if config.completion.rejection_timeout_secs == 0 {
        return Err(Error::Configuration {
            message: "completion.rejection_timeout_secs cannot be 0".to_string(),
            source: None,
        });
    }
    if config.cache.capacity == 0 {
        return Err(Error::Configuration {
            message: "cache.capacity cannot be 0".to_string(),
            source: None,
        });
    }
    Ok(())
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration builder for programmatic configuration
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Set indexing configuration
    pub fn with_indexing(mut self, indexing: crate::config::IndexingConfig) -> Self {
        self.config.indexing = indexing;
        self
    }

    /// Set completion pipeline configuration
    pub fn with_completion(mut self, completion: crate::config::CompletionConfig) -> Self {
        self.config.completion = completion;
        self
    }

    /// Set logging configuration
    pub fn with_logging(mut self, logging: crate::config::LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Set embedding provider configuration
    pub fn with_embedding(mut self, embedding: crate::config::EmbeddingConfig) -> Self {
        self.config.embedding = embedding;
        self
    }

    /// Set vector store provider configuration
    pub fn with_vector_store(mut self, vector_store: crate::config::VectorStoreConfig) -> Self {
        self.config.vector_store = vector_store;
        self
    }

    /// Set cache configuration
    pub fn with_cache(mut self, cache: crate::config::CacheConfig) -> Self {
        self.config.cache = cache;
        self
    }

    /// Build the configuration
    pub fn build(self) -> AppConfig {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = AppConfig::default();
        assert!(validate_app_config(&config).is_ok());
    }

    #[test]
    fn rejects_zero_batch_size() {
        let mut config = AppConfig::default();
        config.indexing.files_per_batch = 0;
        assert!(validate_app_config(&config).is_err());
    }

    #[test]
    fn builder_overrides_sections() {
        let config = ConfigBuilder::new()
            .with_indexing(crate::config::IndexingConfig {
                files_per_batch: 50,
                ..Default::default()
            })
            .build();
        assert_eq!(config.indexing.files_per_batch, 50);
    }
}
