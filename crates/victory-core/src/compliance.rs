// IR slot compliance: flag players stashed in an IR slot without an
// IR-eligible status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ScoringError;
use crate::rules::LeagueRules;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// A player currently occupying an IR slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrPlayer {
    pub name: String,
    pub player_key: String,
    /// Provider injury status, e.g. "IR", "O", "Q". Empty when healthy.
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub injury_note: Option<String>,
}

/// A team's roster as far as IR compliance cares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRoster {
    pub team_id: String,
    pub team_name: String,
    #[serde(default)]
    pub manager: String,
    #[serde(default)]
    pub ir_players: Vec<IrPlayer>,
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Why a player was flagged. Serialized in snake_case (`ineligible_status`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationType {
    IneligibleStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrViolation {
    pub player_name: String,
    pub player_key: String,
    pub current_status: String,
    pub eligible_statuses: Vec<String>,
    pub injury_note: Option<String>,
    pub violation_type: ViolationType,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamViolations {
    pub team_id: String,
    pub team_name: String,
    pub manager: String,
    pub violations: Vec<IrViolation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompliantTeam {
    pub team_id: String,
    pub team_name: String,
    pub manager: String,
    pub ir_players_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub total_violations: usize,
    pub teams_with_violations: usize,
    pub compliant_teams: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub week: u32,
    pub check_date: DateTime<Utc>,
    pub total_teams: usize,
    pub violations: Vec<TeamViolations>,
    pub compliant_teams: Vec<CompliantTeam>,
    pub summary: ComplianceSummary,
}

impl ComplianceReport {
    pub fn is_compliant(&self) -> bool {
        self.summary.total_violations == 0
    }
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

/// Whether `status` allows a player to sit in an IR slot.
///
/// Comparison is case-insensitive. Blank, `UNKNOWN` and `ACTIVE` statuses are
/// never eligible, whatever the configured list says.
pub fn is_ir_eligible(status: &str, eligible_statuses: &[String]) -> bool {
    let status = status.trim().to_uppercase();
    if status.is_empty() || status == "UNKNOWN" || status == "ACTIVE" {
        return false;
    }
    eligible_statuses
        .iter()
        .any(|eligible| eligible.trim().to_uppercase() == status)
}

/// Check every team's IR slots against the league's eligible statuses.
pub fn check_ir_compliance(
    rosters: &[TeamRoster],
    week: u32,
    rules: &LeagueRules,
    checked_at: DateTime<Utc>,
) -> Result<ComplianceReport, ScoringError> {
    rules.validate()?;

    let mut violations = Vec::new();
    let mut compliant_teams = Vec::new();

    for roster in rosters {
        let team_violations: Vec<IrViolation> = roster
            .ir_players
            .iter()
            .filter(|p| !is_ir_eligible(&p.status, &rules.ir_eligible_statuses))
            .map(|p| IrViolation {
                player_name: p.name.clone(),
                player_key: p.player_key.clone(),
                current_status: p.status.clone(),
                eligible_statuses: rules.ir_eligible_statuses.clone(),
                injury_note: p.injury_note.clone(),
                violation_type: ViolationType::IneligibleStatus,
                description: format!(
                    "Player {} has status '{}' which is not eligible for IR slot",
                    p.name, p.status
                ),
            })
            .collect();

        if team_violations.is_empty() {
            compliant_teams.push(CompliantTeam {
                team_id: roster.team_id.clone(),
                team_name: roster.team_name.clone(),
                manager: roster.manager.clone(),
                ir_players_count: roster.ir_players.len(),
            });
        } else {
            violations.push(TeamViolations {
                team_id: roster.team_id.clone(),
                team_name: roster.team_name.clone(),
                manager: roster.manager.clone(),
                violations: team_violations,
            });
        }
    }

    let summary = ComplianceSummary {
        total_violations: violations.iter().map(|t| t.violations.len()).sum(),
        teams_with_violations: violations.len(),
        compliant_teams: compliant_teams.len(),
    };
    info!(
        "IR compliance check for week {week}: {} violation(s) across {} team(s)",
        summary.total_violations, summary.teams_with_violations
    );

    Ok(ComplianceReport {
        week,
        check_date: checked_at,
        total_teams: rosters.len(),
        violations,
        compliant_teams,
        summary,
    })
}
