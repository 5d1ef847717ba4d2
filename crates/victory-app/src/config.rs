// Configuration loading and parsing (config/league.toml).

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use victory_core::rules::{DEFAULT_IR_ELIGIBLE_STATUSES, DEFAULT_TIEBREAK_HORIZON};
use victory_core::LeagueRules;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub rules: LeagueRules,
    /// Directory holding week results and standings, relative to the base
    /// directory unless absolute.
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LeagueConfig {
    pub name: String,
    pub league_id: Option<String>,
    pub season: u32,
    pub rules_url: Option<String>,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            name: "Victory Points League".into(),
            league_id: None,
            season: 2024,
            rules_url: None,
        }
    }
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the whole league.toml file. Every section
/// is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LeagueFile {
    league: LeagueConfig,
    scoring: ScoringSection,
    compliance: ComplianceSection,
    storage: StorageSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct ScoringSection {
    tiebreak_horizon: usize,
}

impl Default for ScoringSection {
    fn default() -> Self {
        Self {
            tiebreak_horizon: DEFAULT_TIEBREAK_HORIZON,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct ComplianceSection {
    ir_eligible_statuses: Vec<String>,
}

impl Default for ComplianceSection {
    fn default() -> Self {
        Self {
            ir_eligible_statuses: DEFAULT_IR_ELIGIBLE_STATUSES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct StorageSection {
    data_dir: String,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            data_dir: "data".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/league.toml` under
/// `base_dir`. A missing file yields the built-in defaults.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let league_path = base_dir.join("config").join("league.toml");

    let file = if league_path.exists() {
        let text = read_file(&league_path)?;
        toml::from_str::<LeagueFile>(&text).map_err(|e| ConfigError::ParseError {
            path: league_path.clone(),
            source: e,
        })?
    } else {
        LeagueFile::default()
    };

    if file.storage.data_dir.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "storage.data_dir".into(),
            message: "must not be empty".into(),
        });
    }
    let data_dir = PathBuf::from(&file.storage.data_dir);
    let config = Config {
        league: file.league,
        rules: LeagueRules {
            tiebreak_horizon: file.scoring.tiebreak_horizon,
            ir_eligible_statuses: file.compliance.ir_eligible_statuses,
        },
        data_dir: if data_dir.is_absolute() {
            data_dir
        } else {
            base_dir.join(data_dir)
        },
    };

    validate(&config)?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.league.name.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "league.name".into(),
            message: "must not be empty".into(),
        });
    }

    if config.rules.tiebreak_horizon == 0 {
        return Err(ConfigError::ValidationError {
            field: "scoring.tiebreak_horizon".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.rules.ir_eligible_statuses.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "compliance.ir_eligible_statuses".into(),
            message: "must list at least one status".into(),
        });
    }

    if let Some(idx) = config
        .rules
        .ir_eligible_statuses
        .iter()
        .position(|s| s.trim().is_empty())
    {
        return Err(ConfigError::ValidationError {
            field: format!("compliance.ir_eligible_statuses[{idx}]"),
            message: "status must not be blank".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
