use crate::filter::keywords::ROWS;
use crate::filter::{Filter, Relation};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

pub const DEFAULT_FALLBACK_FILTER: &str = "sort=name first=1 rows=10";
pub const DEFAULT_ROWS_PER_PAGE: i64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Used for resource types without an entry in `default_filters`.
    pub fallback_filter: String,
    pub rows_per_page: i64,
    /// Resource type (lower-case) to default filter string
    pub default_filters: BTreeMap<String, String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            fallback_filter: DEFAULT_FALLBACK_FILTER.to_string(),
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            default_filters: BTreeMap::from([(
                "result".to_string(),
                "apply_overrides=0 levels=hml rows=100 min_qod=70 first=1 sort-reverse=severity"
                    .to_string(),
            )]),
        }
    }
}

impl FilterConfig {
    pub fn fallback(&self) -> Filter {
        Filter::from_string(&self.fallback_filter)
    }

    /// Default filter for `resource_type`. A filter without `rows` gets the
    /// configured page size.
    pub fn default_filter(&self, resource_type: &str) -> Filter {
        let filter = self
            .default_filters
            .get(&resource_type.to_lowercase())
            .map(|text| Filter::from_string(text))
            .unwrap_or_else(|| self.fallback());

        if filter.has(ROWS) {
            filter
        } else {
            filter.set(ROWS, self.rows_per_page, Relation::Equal)
        }
    }

    /// The filter to send for `resource_type`: the user's filter completed
    /// with the default's extra keywords, or the default alone.
    pub fn resolve(&self, resource_type: &str, filter: Option<&Filter>) -> Filter {
        let defaults = self.default_filter(resource_type);
        match filter {
            Some(filter) => filter.merge_extra_keywords(&defaults),
            None => defaults,
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<FilterConfig, ConfigError> {
    if let Some(path) = path {
        load_config_from_path(path)
    } else {
        Ok(default_config().clone())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<FilterConfig, ConfigError> {
    let path_display = path.display().to_string();
    debug!("loading config from {path_display}");
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_display.clone(),
        source,
    })?;

    toml::from_str::<FilterConfig>(&raw).map_err(|source| ConfigError::Parse {
        path: path_display,
        source,
    })
}

pub fn default_config() -> &'static FilterConfig {
    static DEFAULT_CONFIG: LazyLock<FilterConfig> = LazyLock::new(FilterConfig::default);
    &DEFAULT_CONFIG
}
