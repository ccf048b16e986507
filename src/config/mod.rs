//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{num::NonZeroU32, path::Path, str::FromStr};

use clap::{Args, builder::BoolishValueParser};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "lensclub";
const ENV_PREFIX: &str = "LENSCLUB";
const DEFAULT_GALLERY_PAGE_SIZE: u32 = 10;
const DEFAULT_MEMBERS_PAGE_SIZE: u32 = 20;
const DEFAULT_EVENTS_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 1000;

/// Sent when `api.user_agent` is not configured.
pub const DEFAULT_USER_AGENT: &str = concat!("lensclub-admin/", env!("CARGO_PKG_VERSION"));

/// Command-line overrides; these win over files and environment.
#[derive(Debug, Args, Default, Clone)]
pub struct ClientOverrides {
    /// Backend base URL, e.g. <https://club.example.org/api>
    #[arg(long = "api-url", env = "LENSCLUB_API_URL", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Override the page size used by every listing.
    #[arg(long = "page-size", value_name = "COUNT", global = true)]
    pub page_size: Option<u32>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,
}

/// Fully-resolved client settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub lists: ListSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: Url,
    pub user_agent: String,
}

#[derive(Debug, Clone, Copy)]
pub struct ListSettings {
    pub gallery_page_size: NonZeroU32,
    pub members_page_size: NonZeroU32,
    pub events_page_size: NonZeroU32,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(config_file: Option<&Path>, overrides: &ClientOverrides) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = config_file {
        builder = builder.add_source(File::from(path).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(overrides);

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    api: RawApiSettings,
    lists: RawListSettings,
    logging: RawLoggingSettings,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &ClientOverrides) {
        if let Some(url) = overrides.api_url.as_ref() {
            self.api.base_url = Some(url.clone());
        }
        if let Some(size) = overrides.page_size {
            self.lists.gallery_page_size = Some(size);
            self.lists.members_page_size = Some(size);
            self.lists.events_page_size = Some(size);
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            api,
            lists,
            logging,
        } = raw;

        let api = build_api_settings(api)?;
        let lists = build_list_settings(lists)?;
        let logging = build_logging_settings(logging)?;

        Ok(Self {
            api,
            lists,
            logging,
        })
    }
}

fn build_api_settings(api: RawApiSettings) -> Result<ApiSettings, LoadError> {
    let raw_url = api
        .base_url
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            LoadError::invalid("api.base_url", "is required (use --api-url or LENSCLUB_API_URL)")
        })?;

    let base_url = Url::parse(&raw_url)
        .map_err(|err| LoadError::invalid("api.base_url", format!("failed to parse: {err}")))?;
    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(LoadError::invalid(
            "api.base_url",
            "scheme must be http or https",
        ));
    }

    let user_agent = api
        .user_agent
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

    Ok(ApiSettings {
        base_url,
        user_agent,
    })
}

fn build_list_settings(lists: RawListSettings) -> Result<ListSettings, LoadError> {
    Ok(ListSettings {
        gallery_page_size: page_size(
            lists.gallery_page_size.unwrap_or(DEFAULT_GALLERY_PAGE_SIZE),
            "lists.gallery_page_size",
        )?,
        members_page_size: page_size(
            lists.members_page_size.unwrap_or(DEFAULT_MEMBERS_PAGE_SIZE),
            "lists.members_page_size",
        )?,
        events_page_size: page_size(
            lists.events_page_size.unwrap_or(DEFAULT_EVENTS_PAGE_SIZE),
            "lists.events_page_size",
        )?,
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn page_size(value: u32, key: &'static str) -> Result<NonZeroU32, LoadError> {
    if value > MAX_PAGE_SIZE {
        return Err(LoadError::invalid(
            key,
            format!("must not exceed {MAX_PAGE_SIZE}"),
        ));
    }
    NonZeroU32::new(value).ok_or_else(|| LoadError::invalid(key, "must be greater than zero"))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawApiSettings {
    base_url: Option<String>,
    user_agent: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawListSettings {
    gallery_page_size: Option<u32>,
    members_page_size: Option<u32>,
    events_page_size: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[cfg(test)]
mod tests;
