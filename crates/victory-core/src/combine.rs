// Combine head-to-head and performance outcomes into the weekly result.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::error::ScoringError;
use crate::head_to_head::resolve_head_to_head;
use crate::model::{
    H2hOutcome, Matchup, PerformanceOutcome, TeamWeekResult, WeekResult, WeekScoreEntry,
    WeekSummary,
};
use crate::performance::resolve_performance;
use crate::validate::{check_week_input, is_invalid_week_entries};

/// Score one week.
///
/// Returns `Ok(None)` when the week has no usable data (empty or all-zero
/// scores); such a week must not be persisted or aggregated. Malformed input
/// is returned as an error.
pub fn calculate_week_results(
    matchups: &[Matchup],
    entries: &[WeekScoreEntry],
    calculated_at: DateTime<Utc>,
) -> Result<Option<WeekResult>, ScoringError> {
    let week = check_week_input(matchups, entries)?;

    let Some(week) = week.filter(|_| !is_invalid_week_entries(entries)) else {
        warn!(
            "week {} has no usable scores (empty or all zero), skipping",
            entries.first().map_or(0, |e| e.week)
        );
        return Ok(None);
    };

    let h2h = resolve_head_to_head(matchups);
    let performance = resolve_performance(entries);
    let team_results = combine_results(&h2h, &performance, entries);
    let week_summary = summarize_week(week, &team_results);

    debug!(
        "week {week}: scored {} teams from {} matchups",
        team_results.len(),
        matchups.len()
    );

    Ok(Some(WeekResult {
        week,
        date_calculated: calculated_at,
        team_results,
        week_summary,
    }))
}

/// Merge per-team outcomes into ranked [`TeamWeekResult`]s.
///
/// Teams with a head-to-head outcome but no score entry are skipped. The
/// result is sorted by total wins descending, then week score descending.
pub fn combine_results(
    h2h: &BTreeMap<String, H2hOutcome>,
    performance: &BTreeMap<String, f64>,
    entries: &[WeekScoreEntry],
) -> Vec<TeamWeekResult> {
    let by_team: HashMap<&str, &WeekScoreEntry> =
        entries.iter().map(|e| (e.team_id.as_str(), e)).collect();

    let mut results = Vec::with_capacity(h2h.len());
    for (team_id, &outcome) in h2h {
        let (Some(entry), Some(&credit)) =
            (by_team.get(team_id.as_str()), performance.get(team_id))
        else {
            warn!("team {team_id} has a matchup result but no score entry, skipping");
            continue;
        };
        results.push(team_week_result(entry, outcome, credit));
    }

    results.sort_by(|a, b| {
        b.total_wins
            .partial_cmp(&a.total_wins)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                b.week_score
                    .partial_cmp(&a.week_score)
                    .unwrap_or(Ordering::Equal)
            })
    });
    results
}

fn team_week_result(entry: &WeekScoreEntry, outcome: H2hOutcome, credit: f64) -> TeamWeekResult {
    let h2h_wins = u32::from(outcome == H2hOutcome::Win);
    let h2h_losses = u32::from(outcome == H2hOutcome::Loss);
    let h2h_ties = u32::from(outcome == H2hOutcome::Tie);

    let performance_wins = credit;
    let performance_losses = 1.0 - credit;
    let total_wins = f64::from(h2h_wins) + performance_wins;
    let total_losses = f64::from(h2h_losses) + performance_losses;

    TeamWeekResult {
        team_id: entry.team_id.clone(),
        team_name: entry.team_name.clone(),
        team_key: entry.team_key.clone(),
        week_score: entry.score,
        h2h_result: outcome,
        performance_result: PerformanceOutcome::from_credit(credit),
        h2h_wins,
        h2h_losses,
        h2h_ties,
        performance_wins,
        performance_losses,
        total_wins,
        total_losses,
        victory_points: total_wins,
    }
}

/// High/low/average score and the 2-0 and 0-2 counts for a week.
pub fn summarize_week(week: u32, results: &[TeamWeekResult]) -> WeekSummary {
    let scores: Vec<f64> = results.iter().map(|t| t.week_score).collect();
    let (highest_score, lowest_score, average_score) = if scores.is_empty() {
        (0.0, 0.0, 0.0)
    } else {
        (
            scores.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            scores.iter().copied().fold(f64::INFINITY, f64::min),
            scores.iter().sum::<f64>() / scores.len() as f64,
        )
    };

    WeekSummary {
        week,
        total_teams: results.len(),
        highest_score,
        lowest_score,
        average_score,
        perfect_weeks: results.iter().filter(|t| t.total_wins == 2.0).count(),
        winless_weeks: results.iter().filter(|t| t.total_wins == 0.0).count(),
    }
}
