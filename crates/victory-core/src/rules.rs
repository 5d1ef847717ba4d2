// League rules passed explicitly into the engine's entry points.

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// Number of weeks in a full season; standings tiebreak keys are padded to
/// this many recent-week slots.
pub const DEFAULT_TIEBREAK_HORIZON: usize = 18;

/// Player statuses that may legally occupy an IR slot.
pub const DEFAULT_IR_ELIGIBLE_STATUSES: &[&str] = &[
    "IR",    // Injured Reserve
    "IR-R",  // Injured Reserve - Return
    "O",     // Out
    "PUP",   // Physically Unable to Perform
    "PUP-R", // Physically Unable to Perform - Return
    "NFI",   // Non-Football Injury
    "NFI-R", // Non-Football Injury - Return
    "SUSP",  // Suspended
    "NA",    // Not Active
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueRules {
    pub tiebreak_horizon: usize,
    pub ir_eligible_statuses: Vec<String>,
}

impl Default for LeagueRules {
    fn default() -> Self {
        Self {
            tiebreak_horizon: DEFAULT_TIEBREAK_HORIZON,
            ir_eligible_statuses: DEFAULT_IR_ELIGIBLE_STATUSES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl LeagueRules {
    pub fn validate(&self) -> Result<(), ScoringError> {
        if self.tiebreak_horizon == 0 {
            return Err(ScoringError::InvalidRules {
                field: "tiebreak_horizon".into(),
                message: "must be greater than 0".into(),
            });
        }
        if self.ir_eligible_statuses.is_empty() {
            return Err(ScoringError::InvalidRules {
                field: "ir_eligible_statuses".into(),
                message: "must list at least one status".into(),
            });
        }
        if let Some(blank) = self
            .ir_eligible_statuses
            .iter()
            .position(|s| s.trim().is_empty())
        {
            return Err(ScoringError::InvalidRules {
                field: format!("ir_eligible_statuses[{blank}]"),
                message: "status must not be blank".into(),
            });
        }
        Ok(())
    }
}
