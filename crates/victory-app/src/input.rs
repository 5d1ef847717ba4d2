// Provider week documents: normalization into typed matchups and scores.
//
// The fetch side writes one JSON document per week. Providers are loose about
// types (team ids and point totals arrive as numbers or strings), so raw
// values are accepted here and converted strictly before reaching the core.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use victory_core::compliance::TeamRoster;
use victory_core::model::{Matchup, MatchupSide, WeekScoreEntry};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A normalized week of provider data.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekInput {
    pub week: u32,
    pub matchups: Vec<Matchup>,
    pub scores: Vec<WeekScoreEntry>,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed week document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed input in `{field}`: {message}")]
    Malformed { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Raw serde structs (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawWeekInput {
    week: Value,
    #[serde(default)]
    matchups: Vec<RawMatchup>,
    #[serde(default)]
    scores: Vec<RawScore>,
}

#[derive(Debug, Deserialize)]
struct RawMatchup {
    team1: RawSide,
    team2: RawSide,
}

#[derive(Debug, Deserialize)]
struct RawSide {
    team_id: Value,
    #[serde(default)]
    team_key: String,
    #[serde(alias = "name")]
    team_name: String,
    points: Value,
}

#[derive(Debug, Deserialize)]
struct RawScore {
    team_id: Value,
    #[serde(default)]
    team_key: String,
    #[serde(alias = "name")]
    team_name: String,
    score: Value,
    #[serde(default)]
    week: Option<Value>,
}

// ---------------------------------------------------------------------------
// Field conversion helpers
// ---------------------------------------------------------------------------

fn malformed(field: &str, message: impl Into<String>) -> InputError {
    InputError::Malformed {
        field: field.to_string(),
        message: message.into(),
    }
}

fn unexpected(field: &str, expected: &str, value: &Value) -> InputError {
    malformed(field, format!("expected {expected}, got {value}"))
}

/// A point total: a JSON number or a numeric string. Must be finite.
fn number_field(value: &Value, field: &str) -> Result<f64, InputError> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(unexpected(field, "a numeric score", value)),
    }
}

/// A team id: a non-empty string or an integer.
fn id_field(value: &Value, field: &str) -> Result<String, InputError> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Value::Number(n) if n.is_u64() || n.is_i64() => Ok(n.to_string()),
        _ => Err(unexpected(field, "a team id", value)),
    }
}

/// A week number: a positive integer or a string holding one.
fn week_field(value: &Value, field: &str) -> Result<u32, InputError> {
    let week = match value {
        Value::Number(n) => n.as_u64().and_then(|w| u32::try_from(w).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    match week {
        Some(w) if w > 0 => Ok(w),
        _ => Err(unexpected(field, "a week number", value)),
    }
}

fn side(raw: &RawSide, field: &str) -> Result<MatchupSide, InputError> {
    Ok(MatchupSide {
        team_id: id_field(&raw.team_id, &format!("{field}.team_id"))?,
        team_key: raw.team_key.clone(),
        team_name: raw.team_name.clone(),
        points: number_field(&raw.points, &format!("{field}.points"))?,
    })
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

/// Parse and normalize a week document from JSON text.
pub fn parse_week_input(text: &str) -> Result<WeekInput, InputError> {
    let raw: RawWeekInput = serde_json::from_str(text)?;
    let week = week_field(&raw.week, "week")?;

    let matchups = raw
        .matchups
        .iter()
        .enumerate()
        .map(|(i, m)| {
            Ok(Matchup {
                team1: side(&m.team1, &format!("matchups[{i}].team1"))?,
                team2: side(&m.team2, &format!("matchups[{i}].team2"))?,
            })
        })
        .collect::<Result<Vec<_>, InputError>>()?;

    let scores = raw
        .scores
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let entry_week = match &s.week {
                Some(value) => week_field(value, &format!("scores[{i}].week"))?,
                None => week,
            };
            Ok(WeekScoreEntry {
                team_id: id_field(&s.team_id, &format!("scores[{i}].team_id"))?,
                team_key: s.team_key.clone(),
                team_name: s.team_name.clone(),
                score: number_field(&s.score, &format!("scores[{i}].score"))?,
                week: entry_week,
            })
        })
        .collect::<Result<Vec<_>, InputError>>()?;

    Ok(WeekInput {
        week,
        matchups,
        scores,
    })
}

/// Read and normalize a week document from disk.
pub fn load_week_input(path: &Path) -> Result<WeekInput, InputError> {
    let text = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_week_input(&text)
}

/// Read IR rosters: either a bare array of teams or `{ "teams": [...] }`.
pub fn load_rosters(path: &Path) -> Result<Vec<TeamRoster>, InputError> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RosterDoc {
        Bare(Vec<TeamRoster>),
        Wrapped { teams: Vec<TeamRoster> },
    }

    let text = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let rosters = match serde_json::from_str::<RosterDoc>(&text)? {
        RosterDoc::Bare(teams) | RosterDoc::Wrapped { teams } => teams,
    };
    if let Some(idx) = rosters.iter().position(|r| r.team_id.trim().is_empty()) {
        let field = format!("teams[{idx}].team_id");
        return Err(malformed(&field, "must not be blank"));
    }
    Ok(rosters)
}
