//! Session configuration, read from the environment.

use std::path::PathBuf;

use thiserror::Error;

use briolka_cart::QuantityPolicy;
use briolka_catalog::CatalogLoadError;
use briolka_core::DomainError;
use briolka_observability::LogFormat;

pub const CATALOG_PATH_VAR: &str = "BRIOLKA_CATALOG_PATH";
pub const MAX_LINE_QUANTITY_VAR: &str = "BRIOLKA_MAX_LINE_QUANTITY";
pub const LOG_FORMAT_VAR: &str = "BRIOLKA_LOG_FORMAT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key}={value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogLoadError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// JSON catalog to load instead of the built-in collection.
    pub catalog_path: Option<PathBuf>,
    pub max_line_quantity: u32,
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            max_line_quantity: QuantityPolicy::DEFAULT_MAX_PER_LINE,
            log_format: LogFormat::default(),
        }
    }
}

impl StorefrontConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = get(CATALOG_PATH_VAR) {
            config.catalog_path = Some(PathBuf::from(path));
        }

        if let Some(raw) = get(MAX_LINE_QUANTITY_VAR) {
            config.max_line_quantity = match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        key: MAX_LINE_QUANTITY_VAR,
                        value: raw,
                        reason: "must be at least 1".to_string(),
                    });
                }
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        key: MAX_LINE_QUANTITY_VAR,
                        value: raw,
                        reason: e.to_string(),
                    });
                }
            };
        }

        if let Some(raw) = get(LOG_FORMAT_VAR) {
            config.log_format = raw.parse().map_err(|e: briolka_observability::UnknownLogFormat| {
                ConfigError::Invalid {
                    key: LOG_FORMAT_VAR,
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        Ok(config)
    }

    pub fn quantity_policy(&self) -> Result<QuantityPolicy, ConfigError> {
        Ok(QuantityPolicy::new(self.max_line_quantity)?)
    }
}
