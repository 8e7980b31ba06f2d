//! Runtime configuration.
//!
//! # Responsibility
//! - Resolve database, logging and validation settings from the environment,
//!   optionally layered over a `KEY=VALUE` file.
//!
//! # Invariants
//! - Environment variables override file values.
//! - Invalid values fail loading; they are never silently replaced.

use crate::logging::{default_log_level, normalize_level, normalize_log_dir};
use crate::service::field_validator::{FieldValidator, PositionScope};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_CONFIG_PATH: &str = "ROSTER_CONFIG_PATH";
pub const ENV_DB_PATH: &str = "ROSTER_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "ROSTER_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "ROSTER_LOG_DIR";
pub const ENV_POSITION_SCOPE: &str = "ROSTER_POSITION_SCOPE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub code: &'static str,
    pub message: String,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// `None` selects an in-memory database.
    pub db_path: Option<PathBuf>,
    pub log_level: &'static str,
    /// `None` leaves file logging disabled.
    pub log_dir: Option<PathBuf>,
    pub position_scope: PositionScope,
}

impl CoreConfig {
    /// Loads configuration from `ROSTER_CONFIG_PATH` (if set) and the process
    /// environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut merged = HashMap::new();

        if let Ok(config_path) = std::env::var(ENV_CONFIG_PATH) {
            let config_path = config_path.trim();
            if !config_path.is_empty() {
                merged.extend(parse_env_file(config_path)?);
            }
        }

        merged.extend(std::env::vars());

        Self::from_kv(&merged)
    }

    pub fn from_kv(kv: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let db_path = non_empty(kv.get(ENV_DB_PATH)).map(PathBuf::from);

        let log_level = match non_empty(kv.get(ENV_LOG_LEVEL)) {
            Some(value) => normalize_level(value).map_err(|message| ConfigError {
                code: "ERR_INVALID_LOG_LEVEL",
                message,
            })?,
            None => default_log_level(),
        };

        let log_dir = match non_empty(kv.get(ENV_LOG_DIR)) {
            Some(value) => Some(normalize_log_dir(value).map_err(|message| ConfigError {
                code: "ERR_INVALID_LOG_DIR",
                message,
            })?),
            None => None,
        };

        let position_scope = parse_position_scope(kv.get(ENV_POSITION_SCOPE))?;

        Ok(Self {
            db_path,
            log_level,
            log_dir,
            position_scope,
        })
    }

    /// Field validator configured with this position scope.
    pub fn validator(&self) -> FieldValidator {
        FieldValidator::new(self.position_scope)
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn parse_position_scope(value: Option<&String>) -> Result<PositionScope, ConfigError> {
    match non_empty(value).map(str::to_ascii_lowercase).as_deref() {
        None | Some("union") => Ok(PositionScope::Union),
        Some("sport") => Ok(PositionScope::Sport),
        Some(other) => Err(ConfigError {
            code: "ERR_INVALID_CONFIG",
            message: format!("{ENV_POSITION_SCOPE} must be `union` or `sport`, got `{other}`"),
        }),
    }
}

fn parse_env_file(path: &str) -> Result<HashMap<String, String>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|err| ConfigError {
        code: "ERR_CONFIG_FILE",
        message: format!("failed to read config file `{path}`: {err}"),
    })?;

    let mut kv = HashMap::new();
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            return Err(ConfigError {
                code: "ERR_CONFIG_FILE",
                message: format!("line {} of `{path}` is not KEY=VALUE", index + 1),
            });
        };
        kv.insert(key.trim().to_string(), strip_quotes(value.trim()));
    }

    Ok(kv)
}

fn strip_quotes(s: &str) -> String {
    let quoted = s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')));
    if quoted {
        s[1..s.len() - 1].to_string()
    } else {
        s.to_string()
    }
}
