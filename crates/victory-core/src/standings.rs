// Season standings: tiebreak ordering, ranks, and the season summary.
//
// Priority, every component descending:
//   1. total wins (victory points)
//   2. total season points
//   3. most recent week's score, then the week before, and so on back
//      through the team's full history
// Recent-week slots are zero-padded out to the tiebreak horizon, so a team
// with fewer weeks played compares as if it scored zero in the missing weeks.
// Past the horizon, keys compare like tuples: when one key is a prefix of the
// other, the longer key ranks higher.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::error::ScoringError;
use crate::model::{SeasonStandings, SeasonSummary, TeamSeasonTotals, WeekResult};
use crate::rules::LeagueRules;
use crate::season::aggregate_season;

// ---------------------------------------------------------------------------
// Tiebreak key
// ---------------------------------------------------------------------------

/// Ordered list of comparison values for one team. Larger compares greater.
#[derive(Debug, Clone)]
pub struct TiebreakKey {
    values: Vec<f64>,
}

impl TiebreakKey {
    /// Build the key `[total_wins, total_points, recent scores...]`, with the
    /// recent-score section padded with `0.0` to at least `horizon` slots.
    pub fn for_team(totals: &TeamSeasonTotals, horizon: usize) -> Self {
        let mut recent = totals.score_history.clone();
        recent.sort_by(|a, b| b.week.cmp(&a.week));

        let slots = recent.len().max(horizon);
        let mut values = Vec::with_capacity(2 + slots);
        values.push(totals.total_wins);
        values.push(totals.total_points);
        values.extend(recent.iter().map(|w| w.score));
        values.resize(2 + slots, 0.0);

        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl Ord for TiebreakKey {
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.values.iter().zip(&other.values) {
            match a.partial_cmp(b).unwrap_or(Ordering::Equal) {
                Ordering::Equal => continue,
                decided => return decided,
            }
        }
        self.values.len().cmp(&other.values.len())
    }
}

impl PartialOrd for TiebreakKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for TiebreakKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TiebreakKey {}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Sort teams best-first by their tiebreak keys and assign 1-based ranks.
pub fn rank_teams(mut teams: Vec<TeamSeasonTotals>, horizon: usize) -> Vec<TeamSeasonTotals> {
    teams.sort_by_cached_key(|t| std::cmp::Reverse(TiebreakKey::for_team(t, horizon)));
    for (idx, team) in teams.iter_mut().enumerate() {
        team.rank = idx + 1;
    }
    teams
}

/// Leader and points leader for a ranked standings list.
pub fn summarize_season(
    standings: &[TeamSeasonTotals],
    total_weeks: usize,
) -> Option<SeasonSummary> {
    let leader = standings.first()?;
    let mut most_points = leader;
    for team in standings {
        if team.total_points > most_points.total_points {
            most_points = team;
        }
    }

    Some(SeasonSummary {
        total_weeks,
        total_teams: standings.len(),
        leader: leader.team_name.clone(),
        leader_wins: leader.total_wins,
        most_points: most_points.team_name.clone(),
        highest_total_points: most_points.total_points,
    })
}

/// Rebuild season standings from scratch out of every valid week result.
///
/// Weeks whose scores are all zero are ignored. Input order does not matter.
pub fn calculate_season_standings(
    weeks: &[WeekResult],
    rules: &LeagueRules,
    updated_at: DateTime<Utc>,
) -> Result<SeasonStandings, ScoringError> {
    rules.validate()?;

    let valid: Vec<WeekResult> = weeks
        .iter()
        .filter(|w| {
            let skip = w.is_all_zero();
            if skip {
                warn!("ignoring week {} in standings: all scores are zero", w.week);
            }
            !skip
        })
        .cloned()
        .collect();

    let totals = aggregate_season(&valid);
    let standings = rank_teams(totals, rules.tiebreak_horizon);
    let season_summary = summarize_season(&standings, valid.len());

    if let Some(summary) = &season_summary {
        info!(
            "standings through {} weeks: {} leads with {:.1} wins",
            valid.len(),
            summary.leader,
            summary.leader_wins
        );
    }

    Ok(SeasonStandings {
        last_updated: updated_at,
        weeks_included: valid.len(),
        standings,
        season_summary,
    })
}
