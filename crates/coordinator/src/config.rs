use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::host_selector::{RandomHostSelector, RoundRobinHostSelector, WorkerHostPool};
use crate::traits::HostSelector;

/// Configuration error enumeration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl From<anyhow::Error> for ConfigError {
    fn from(err: anyhow::Error) -> Self {
        ConfigError::Configuration(err.to_string())
    }
}

/// Trait for configuration validation
pub trait ConfigValidator {
    fn validate(&self) -> ConfigResult<()>;
}

/// General validation utilities
pub struct ValidationUtils;

impl ValidationUtils {
    /// Validate that a string is not empty
    pub fn validate_not_empty(value: &str, field_name: &str) -> ConfigResult<()> {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "{field_name} cannot be empty"
            )));
        }
        Ok(())
    }

    /// Validate that a count stays within a sane range
    pub fn validate_count(count: usize, field_name: &str, max: usize) -> ConfigResult<()> {
        if count == 0 {
            return Err(ConfigError::Validation(format!(
                "{field_name} must be greater than 0"
            )));
        }
        if count > max {
            return Err(ConfigError::Validation(format!(
                "{field_name} must be less than or equal to {max}"
            )));
        }
        Ok(())
    }
}

/// Dispatch coordinator configuration
///
/// Environment overrides use the `DISPATCH` prefix, e.g.
/// `DISPATCH_SELECTION_STRATEGY`, `DISPATCH_MAX_CONCURRENT_DISPATCHES`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    pub selection_strategy: String,
    pub max_concurrent_dispatches: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            selection_strategy: "round_robin".to_string(),
            max_concurrent_dispatches: 100,
        }
    }
}

impl DispatchConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_path {
            if Path::new(path).exists() {
                builder = builder.add_source(File::new(path, FileFormat::Toml));
            } else {
                return Err(anyhow::anyhow!("配置文件不存在: {}", path));
            }
        } else {
            let default_paths = ["config/dispatch.toml", "dispatch.toml"];

            let mut config_file_found = false;
            for path in &default_paths {
                if Path::new(path).exists() {
                    builder = builder.add_source(File::new(path, FileFormat::Toml));
                    config_file_found = true;
                    break;
                }
            }

            if !config_file_found {
                builder = builder
                    .set_default("selection_strategy", "round_robin")?
                    .set_default("max_concurrent_dispatches", 100)?;
            }
        }

        builder = builder.add_source(Environment::with_prefix("DISPATCH").try_parsing(true));

        let config: DispatchConfig = builder
            .build()
            .context("构建配置失败")?
            .try_deserialize()
            .context("反序列化配置失败")?;

        config.validate()?;

        Ok(config)
    }

    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: DispatchConfig = toml::from_str(toml_str).context("解析TOML配置失败")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("序列化配置为TOML失败")
    }

    /// Build the host selector named by `selection_strategy` over the given pool
    pub fn build_host_selector(
        &self,
        pool: Arc<WorkerHostPool>,
    ) -> ConfigResult<Arc<dyn HostSelector>> {
        match self.selection_strategy.as_str() {
            "round_robin" => Ok(Arc::new(RoundRobinHostSelector::new(pool))),
            "random" => Ok(Arc::new(RandomHostSelector::new(pool))),
            other => Err(ConfigError::Validation(format!(
                "Invalid selection strategy: {other}. Valid options: [\"round_robin\", \"random\"]"
            ))),
        }
    }
}

impl ConfigValidator for DispatchConfig {
    fn validate(&self) -> ConfigResult<()> {
        ValidationUtils::validate_not_empty(&self.selection_strategy, "selection_strategy")?;

        let valid_strategies = ["round_robin", "random"];
        if !valid_strategies.contains(&self.selection_strategy.as_str()) {
            return Err(ConfigError::Validation(format!(
                "Invalid selection strategy: {}. Valid options: {:?}",
                self.selection_strategy, valid_strategies
            )));
        }

        ValidationUtils::validate_count(
            self.max_concurrent_dispatches,
            "max_concurrent_dispatches",
            10000,
        )?;

        Ok(())
    }
}
