use crate::error::ConfigError;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://stake.com/_api/graphql";
pub const DEFAULT_TOURNAMENT_SLUG: &str = "nba";
pub const DEFAULT_SHEET_NAME: &str = "Player Odds";
pub const DEFAULT_MARKET_KEYWORDS: [&str; 2] = ["Player", "Points"];

/// Base name of the optional settings file looked up in the working directory.
const DEFAULT_CONFIG_FILE: &str = "nba-odds";
const ENV_PREFIX: &str = "NBA_ODDS";

/// Excel refuses sheet names longer than this.
const MAX_SHEET_NAME_LEN: usize = 31;
const SHEET_NAME_FORBIDDEN: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub endpoint: String,
    pub tournament_slug: String,
    pub market_keywords: Vec<String>,
    pub sheet_name: String,
    pub output_dir: PathBuf,
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            tournament_slug: DEFAULT_TOURNAMENT_SLUG.to_string(),
            market_keywords: DEFAULT_MARKET_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            output_dir: PathBuf::from("."),
            request_timeout_secs: None,
            user_agent: concat!("nba-prop-odds/", env!("CARGO_PKG_VERSION")).to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Layer defaults, the settings file, then `NBA_ODDS_*` environment variables.
    ///
    /// An explicitly named file must exist; the default `nba-odds.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings: Settings = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("market_keywords"),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = url::Url::parse(&self.endpoint).map_err(|e| ConfigError::InvalidValue {
            field: "endpoint",
            reason: e.to_string(),
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "endpoint",
                reason: format!("unsupported scheme '{}'", endpoint.scheme()),
            });
        }

        if self.tournament_slug.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "tournament_slug",
                reason: "must not be empty".to_string(),
            });
        }

        if self.market_keywords.iter().all(|k| k.is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "market_keywords",
                reason: "at least one non-empty keyword is required".to_string(),
            });
        }

        if self.sheet_name.is_empty() || self.sheet_name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(ConfigError::InvalidValue {
                field: "sheet_name",
                reason: format!("must be 1 to {} characters", MAX_SHEET_NAME_LEN),
            });
        }
        if let Some(c) = self.sheet_name.chars().find(|c| SHEET_NAME_FORBIDDEN.contains(c)) {
            return Err(ConfigError::InvalidValue {
                field: "sheet_name",
                reason: format!("must not contain '{}'", c),
            });
        }
        if self.sheet_name.starts_with('\'') || self.sheet_name.ends_with('\'') {
            return Err(ConfigError::InvalidValue {
                field: "sheet_name",
                reason: "must not start or end with an apostrophe".to_string(),
            });
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
