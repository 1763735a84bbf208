use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

use crate::cloud::{is_hex_color, RenderOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigPathError {
    MissingHomeDirectory,
}

const APP_DIR: &str = "wordcloud-client";
const APP_CONFIG_FILE: &str = "config.json";
const ENDPOINT_ENV: &str = "WORDCLOUD_ENDPOINT";
const DEFAULT_AUTO_GENERATE_DELAY_MS: u64 = 400;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "no word cloud endpoint configured; set \"endpoint\" in {path} or WORDCLOUD_ENDPOINT"
    )]
    MissingEndpoint { path: String },
    #[error("invalid word cloud endpoint {endpoint:?}: expected an http(s) URL")]
    InvalidEndpoint { endpoint: String },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// On-disk shape of `config.json`; every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
struct RawAppConfig {
    #[serde(default)]
    endpoint: Option<String>,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
    #[serde(default)]
    background_color: Option<String>,
    #[serde(default)]
    color_scheme: Option<Vec<String>>,
    #[serde(default)]
    css_class: Option<String>,
    #[serde(default)]
    show_image: Option<bool>,
    #[serde(default)]
    auto_generate: Option<bool>,
    #[serde(default)]
    auto_generate_delay_ms: Option<u64>,
    #[serde(default)]
    request_timeout_secs: Option<u64>,
}

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub endpoint: Url,
    pub render: RenderOptions,
    pub css_class: String,
    pub show_image: bool,
    pub auto_generate: bool,
    pub auto_generate_delay: Duration,
    pub request_timeout: Duration,
}

pub fn load_app_config() -> ConfigResult<AppConfig> {
    let (xdg_config_home, home) = config_env_dirs();
    let endpoint_override = std::env::var(ENDPOINT_ENV).ok();
    load_app_config_with(
        xdg_config_home.as_deref(),
        home.as_deref(),
        endpoint_override.as_deref(),
    )
}

fn load_app_config_with(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
    endpoint_override: Option<&str>,
) -> ConfigResult<AppConfig> {
    let path = app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home).ok();
    let raw = path.as_deref().map(read_raw_config).unwrap_or_default();
    let display_path = path
        .as_deref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| format!("~/.config/{APP_DIR}/{APP_CONFIG_FILE}"));
    resolve_app_config(raw, endpoint_override, &display_path)
}

fn read_raw_config(path: &Path) -> RawAppConfig {
    if !path.exists() {
        return RawAppConfig::default();
    }
    match std::fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            RawAppConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            RawAppConfig::default()
        }
    }
}

fn resolve_app_config(
    raw: RawAppConfig,
    endpoint_override: Option<&str>,
    config_path: &str,
) -> ConfigResult<AppConfig> {
    let endpoint = endpoint_override
        .filter(|value| !value.trim().is_empty())
        .map(str::to_owned)
        .or(raw.endpoint)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEndpoint {
            path: config_path.to_string(),
        })?;
    let endpoint = parse_endpoint(endpoint.trim())?;

    let defaults = RenderOptions::default();
    let render = RenderOptions {
        width: positive_or_default(raw.width, defaults.width, "width"),
        height: positive_or_default(raw.height, defaults.height, "height"),
        background_color: match raw.background_color {
            Some(color) if is_hex_color(&color) => color.trim().to_string(),
            Some(color) => {
                tracing::warn!(value = %color, "invalid background_color; expected #RRGGBB");
                defaults.background_color
            }
            None => defaults.background_color,
        },
        color_scheme: resolve_color_scheme(raw.color_scheme, defaults.color_scheme),
    };

    Ok(AppConfig {
        endpoint,
        render,
        css_class: raw.css_class.unwrap_or_default().trim().to_string(),
        show_image: raw.show_image.unwrap_or(true),
        auto_generate: raw.auto_generate.unwrap_or(false),
        auto_generate_delay: Duration::from_millis(
            raw.auto_generate_delay_ms
                .unwrap_or(DEFAULT_AUTO_GENERATE_DELAY_MS),
        ),
        request_timeout: Duration::from_secs(
            raw.request_timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        ),
    })
}

fn parse_endpoint(value: &str) -> ConfigResult<Url> {
    let invalid = || ConfigError::InvalidEndpoint {
        endpoint: value.to_string(),
    };
    let url = Url::parse(value).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(invalid());
    }
    Ok(url)
}

fn positive_or_default(value: Option<u32>, default: u32, key: &'static str) -> u32 {
    match value {
        Some(0) => {
            tracing::warn!(key, "render dimension must be positive; using default");
            default
        }
        Some(value) => value,
        None => default,
    }
}

fn resolve_color_scheme(configured: Option<Vec<String>>, default: Vec<String>) -> Vec<String> {
    let Some(configured) = configured else {
        return default;
    };
    if configured.is_empty() {
        tracing::warn!("color_scheme is empty; using default palette");
        return default;
    }
    if let Some(invalid) = configured.iter().find(|color| !is_hex_color(color)) {
        tracing::warn!(value = %invalid, "invalid color_scheme entry; using default palette");
        return default;
    }
    configured
        .into_iter()
        .map(|color| color.trim().to_string())
        .collect()
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}
