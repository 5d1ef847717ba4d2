// Error types for the scoring engine.

use thiserror::Error;

/// Errors raised for input the engine refuses to score.
///
/// An all-zero or empty week is not an error; it is reported as `Ok(None)`
/// by [`crate::calculate_week_results`].
#[derive(Debug, Error, PartialEq)]
pub enum ScoringError {
    #[error("malformed input in `{field}`: {message}")]
    MalformedInput { field: String, message: String },

    #[error("team `{team_id}` appears more than once in week {week}")]
    DuplicateTeam { team_id: String, week: u32 },

    #[error("score entry for team `{team_id}` is for week {found}, expected week {expected}")]
    WeekMismatch {
        team_id: String,
        expected: u32,
        found: u32,
    },

    #[error("team `{team_id}` has a non-finite score ({value})")]
    NonFiniteScore { team_id: String, value: f64 },

    #[error("invalid league rules for `{field}`: {message}")]
    InvalidRules { field: String, message: String },
}

impl ScoringError {
    pub(crate) fn malformed(field: impl Into<String>, message: impl Into<String>) -> Self {
        ScoringError::MalformedInput {
            field: field.into(),
            message: message.into(),
        }
    }
}
