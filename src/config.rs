//! Runtime configuration.
//!
//! Defaults point at the Art Institute of Chicago public API. Each setting
//! can be overridden with an `ARTWORKS_*` environment variable.

use std::num::NonZeroU32;
use std::time::Duration;

use log::LevelFilter;
use url::Url;

use crate::domain::entities::page::DEFAULT_PAGE_SIZE;
use crate::usecase::services::selection_controller::Shortfall;

pub const ENV_API_URL: &str = "ARTWORKS_API_URL";
pub const ENV_IIIF_URL: &str = "ARTWORKS_IIIF_URL";
pub const ENV_PAGE_SIZE: &str = "ARTWORKS_PAGE_SIZE";
pub const ENV_TIMEOUT_SECS: &str = "ARTWORKS_TIMEOUT_SECS";
pub const ENV_BULK_STRICT: &str = "ARTWORKS_BULK_STRICT";
pub const ENV_LOG: &str = "ARTWORKS_LOG";

const DEFAULT_API_URL: &str = "https://api.artic.edu/api/v1/";
const DEFAULT_IIIF_URL: &str = "https://www.artic.edu/iiif/2";

/// The API caps `limit` at 100.
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {message}")]
    InvalidUrl { var: &'static str, message: String },

    #[error("{var} must be a whole number between {min} and {max}, got {value:?}")]
    OutOfRange {
        var: &'static str,
        value: String,
        min: u64,
        max: u64,
    },

    #[error("{var} must be one of {expected}, got {value:?}")]
    InvalidChoice {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base of the REST API, always ending in `/`; `artworks` is joined onto it.
    pub api_base_url: String,
    pub iiif_base_url: String,
    pub default_page_size: NonZeroU32,
    pub page_size_options: Vec<NonZeroU32>,
    pub request_timeout: Duration,
    /// Character budget for the inscriptions column.
    pub inscription_budget: usize,
    pub thumbnail_width: u32,
    pub preview_width: u32,
    pub bulk_shortfall: Shortfall,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        let page_size_options = [12, 24, 48]
            .into_iter()
            .filter_map(NonZeroU32::new)
            .collect();
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            iiif_base_url: DEFAULT_IIIF_URL.to_string(),
            default_page_size: DEFAULT_PAGE_SIZE,
            page_size_options,
            request_timeout: Duration::from_secs(15),
            inscription_budget: 60,
            thumbnail_width: 200,
            preview_width: 843,
            bulk_shortfall: Shortfall::Truncate,
            log_level: LevelFilter::Info,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds a config from defaults plus whatever `lookup` returns.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let read = |var: &str| {
            lookup(var)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(value) = read(ENV_API_URL) {
            config.api_base_url = parse_base_url(ENV_API_URL, &value)?.to_string();
        }
        if let Some(value) = read(ENV_IIIF_URL) {
            let url = parse_base_url(ENV_IIIF_URL, &value)?;
            config.iiif_base_url = url.as_str().trim_end_matches('/').to_string();
        }
        if let Some(value) = read(ENV_PAGE_SIZE) {
            let size = parse_in_range(ENV_PAGE_SIZE, &value, 1, u64::from(MAX_PAGE_SIZE))?;
            let size = u32::try_from(size)
                .ok()
                .and_then(NonZeroU32::new)
                .unwrap_or(DEFAULT_PAGE_SIZE);
            config.default_page_size = size;
            if !config.page_size_options.contains(&size) {
                config.page_size_options.push(size);
                config.page_size_options.sort();
            }
        }
        if let Some(value) = read(ENV_TIMEOUT_SECS) {
            let secs = parse_in_range(ENV_TIMEOUT_SECS, &value, 1, 300)?;
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(value) = read(ENV_BULK_STRICT) {
            config.bulk_shortfall = match value.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => Shortfall::Reject,
                "0" | "false" | "no" => Shortfall::Truncate,
                _ => {
                    return Err(ConfigError::InvalidChoice {
                        var: ENV_BULK_STRICT,
                        value,
                        expected: "true/false",
                    })
                }
            };
        }
        if let Some(value) = read(ENV_LOG) {
            config.log_level = value.parse().map_err(|_| ConfigError::InvalidChoice {
                var: ENV_LOG,
                value: value.clone(),
                expected: "off/error/warn/info/debug/trace",
            })?;
        }

        Ok(config)
    }
}

fn parse_base_url(var: &'static str, value: &str) -> Result<Url, ConfigError> {
    // `Url::join` drops the last segment unless the base ends with a slash.
    let normalized = if value.ends_with('/') {
        value.to_string()
    } else {
        format!("{value}/")
    };
    Url::parse(&normalized).map_err(|err| ConfigError::InvalidUrl {
        var,
        message: err.to_string(),
    })
}

fn parse_in_range(var: &'static str, value: &str, min: u64, max: u64) -> Result<u64, ConfigError> {
    value
        .parse::<u64>()
        .ok()
        .filter(|parsed| (min..=max).contains(parsed))
        .ok_or_else(|| ConfigError::OutOfRange {
            var,
            value: value.to_string(),
            min,
            max,
        })
}
