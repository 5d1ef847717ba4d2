// Week inputs, week results, and season standings records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// One side of a head-to-head matchup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupSide {
    pub team_id: String,
    pub team_key: String,
    pub team_name: String,
    pub points: f64,
}

/// A weekly head-to-head pairing. Byes are not modeled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    pub team1: MatchupSide,
    pub team2: MatchupSide,
}

impl Matchup {
    pub fn sides(&self) -> [&MatchupSide; 2] {
        [&self.team1, &self.team2]
    }
}

/// One team's score for one week. The full set for a week is the league-wide
/// ranking universe used for performance credit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekScoreEntry {
    pub team_id: String,
    pub team_key: String,
    pub team_name: String,
    pub score: f64,
    pub week: u32,
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Head-to-head outcome, serialized as `W`, `L` or `T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum H2hOutcome {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Loss,
    #[serde(rename = "T")]
    Tie,
}

impl H2hOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            H2hOutcome::Win => "W",
            H2hOutcome::Loss => "L",
            H2hOutcome::Tie => "T",
        }
    }
}

impl fmt::Display for H2hOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display form of performance credit: `W` for a full win, `L` for none,
/// `T(x.x)` for a split at the median boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum PerformanceOutcome {
    Win,
    Loss,
    Split(f64),
}

impl PerformanceOutcome {
    pub fn from_credit(credit: f64) -> Self {
        if credit == 1.0 {
            PerformanceOutcome::Win
        } else if credit == 0.0 {
            PerformanceOutcome::Loss
        } else {
            PerformanceOutcome::Split(credit)
        }
    }
}

impl fmt::Display for PerformanceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerformanceOutcome::Win => f.write_str("W"),
            PerformanceOutcome::Loss => f.write_str("L"),
            PerformanceOutcome::Split(credit) => write!(f, "T({credit:.1})"),
        }
    }
}

impl From<PerformanceOutcome> for String {
    fn from(outcome: PerformanceOutcome) -> Self {
        outcome.to_string()
    }
}

impl TryFrom<String> for PerformanceOutcome {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.as_str() {
            "W" => Ok(PerformanceOutcome::Win),
            "L" => Ok(PerformanceOutcome::Loss),
            other => other
                .strip_prefix("T(")
                .and_then(|rest| rest.strip_suffix(')'))
                .and_then(|credit| credit.parse::<f64>().ok())
                .map(PerformanceOutcome::Split)
                .ok_or_else(|| format!("unrecognized performance outcome `{other}`")),
        }
    }
}

// ---------------------------------------------------------------------------
// Week results
// ---------------------------------------------------------------------------

/// Combined head-to-head and performance record for one team in one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamWeekResult {
    pub team_id: String,
    pub team_name: String,
    pub team_key: String,
    pub week_score: f64,
    pub h2h_result: H2hOutcome,
    pub performance_result: PerformanceOutcome,
    pub h2h_wins: u32,
    pub h2h_losses: u32,
    pub h2h_ties: u32,
    pub performance_wins: f64,
    pub performance_losses: f64,
    pub total_wins: f64,
    pub total_losses: f64,
    pub victory_points: f64,
}

/// Week-level summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSummary {
    pub week: u32,
    pub total_teams: usize,
    pub highest_score: f64,
    pub lowest_score: f64,
    pub average_score: f64,
    /// Teams that went 2-0 (won both head-to-head and full performance credit).
    pub perfect_weeks: usize,
    /// Teams that went 0-2.
    pub winless_weeks: usize,
}

/// Everything computed for one week. Persisted once per week and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekResult {
    pub week: u32,
    pub date_calculated: DateTime<Utc>,
    /// Sorted by total wins descending, then week score descending.
    pub team_results: Vec<TeamWeekResult>,
    pub week_summary: WeekSummary,
}

impl WeekResult {
    /// True when every team in the result scored exactly zero, the signature
    /// of a week the provider had not posted yet.
    pub fn is_all_zero(&self) -> bool {
        self.team_results.iter().all(|t| t.week_score == 0.0)
    }
}

// ---------------------------------------------------------------------------
// Season standings
// ---------------------------------------------------------------------------

/// A team's score in a single week, kept for recency tiebreaks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeekScore {
    pub week: u32,
    pub score: f64,
}

/// Cumulative per-team season totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSeasonTotals {
    pub team_id: String,
    pub team_name: String,
    pub team_key: String,
    pub total_h2h_wins: u32,
    pub total_h2h_losses: u32,
    pub total_h2h_ties: u32,
    pub total_performance_wins: f64,
    pub total_performance_losses: f64,
    pub total_wins: f64,
    pub total_losses: f64,
    pub total_points: f64,
    pub weeks_played: u32,
    /// Week scores in ascending week order.
    pub score_history: Vec<WeekScore>,
    pub average_score: f64,
    pub win_percentage: f64,
    /// 1-based standings position; 0 until ranked.
    #[serde(default)]
    pub rank: usize,
}

impl TeamSeasonTotals {
    pub fn new(team_id: &str, team_name: &str, team_key: &str) -> Self {
        Self {
            team_id: team_id.to_string(),
            team_name: team_name.to_string(),
            team_key: team_key.to_string(),
            total_h2h_wins: 0,
            total_h2h_losses: 0,
            total_h2h_ties: 0,
            total_performance_wins: 0.0,
            total_performance_losses: 0.0,
            total_wins: 0.0,
            total_losses: 0.0,
            total_points: 0.0,
            weeks_played: 0,
            score_history: Vec::new(),
            average_score: 0.0,
            win_percentage: 0.0,
            rank: 0,
        }
    }
}

/// Season-level summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub total_weeks: usize,
    pub total_teams: usize,
    pub leader: String,
    pub leader_wins: f64,
    pub most_points: String,
    pub highest_total_points: f64,
}

/// Ranked season standings, rebuilt from all valid week results on every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonStandings {
    pub last_updated: DateTime<Utc>,
    pub weeks_included: usize,
    pub standings: Vec<TeamSeasonTotals>,
    pub season_summary: Option<SeasonSummary>,
}
