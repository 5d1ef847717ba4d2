// Season aggregation: fold week results into per-team running totals.

use std::collections::BTreeMap;

use tracing::debug;

use crate::model::{TeamSeasonTotals, WeekResult, WeekScore};

/// Accumulates week results into [`TeamSeasonTotals`].
///
/// Weeks must be folded in ascending week order; [`aggregate_season`] sorts
/// its input before folding. Derived fields (average score, win percentage)
/// are filled by [`SeasonAggregator::finish`].
#[derive(Debug, Default)]
pub struct SeasonAggregator {
    totals: BTreeMap<String, TeamSeasonTotals>,
    weeks_folded: usize,
}

impl SeasonAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one week's team results to the running totals.
    pub fn fold_week(&mut self, week: &WeekResult) {
        for result in &week.team_results {
            let totals = self
                .totals
                .entry(result.team_id.clone())
                .or_insert_with(|| {
                    TeamSeasonTotals::new(&result.team_id, &result.team_name, &result.team_key)
                });

            totals.total_h2h_wins += result.h2h_wins;
            totals.total_h2h_losses += result.h2h_losses;
            totals.total_h2h_ties += result.h2h_ties;
            totals.total_performance_wins += result.performance_wins;
            totals.total_performance_losses += result.performance_losses;
            totals.total_wins += result.total_wins;
            totals.total_losses += result.total_losses;
            totals.total_points += result.week_score;
            totals.weeks_played += 1;
            totals.score_history.push(WeekScore {
                week: week.week,
                score: result.week_score,
            });
        }
        self.weeks_folded += 1;
    }

    pub fn weeks_folded(&self) -> usize {
        self.weeks_folded
    }

    /// Compute derived statistics and return the totals in team-id order.
    pub fn finish(self) -> Vec<TeamSeasonTotals> {
        self.totals
            .into_values()
            .map(|mut totals| {
                if totals.weeks_played > 0 {
                    let weeks = f64::from(totals.weeks_played);
                    totals.average_score = totals.total_points / weeks;
                    // Each week is worth two wins at most.
                    totals.win_percentage = totals.total_wins / (weeks * 2.0);
                } else {
                    totals.average_score = 0.0;
                    totals.win_percentage = 0.0;
                }
                totals
            })
            .collect()
    }
}

/// Fold a set of week results, in ascending week order, into season totals.
pub fn aggregate_season(weeks: &[WeekResult]) -> Vec<TeamSeasonTotals> {
    let mut ordered: Vec<&WeekResult> = weeks.iter().collect();
    ordered.sort_by_key(|w| w.week);

    let mut aggregator = SeasonAggregator::new();
    for week in ordered {
        aggregator.fold_week(week);
    }
    debug!("aggregated {} weeks", aggregator.weeks_folded());
    aggregator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combine::calculate_week_results;
    use crate::model::{Matchup, MatchupSide, WeekScoreEntry};
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};

    fn scored_week(week: u32, scores: &[(&str, f64)]) -> WeekResult {
        let entries: Vec<WeekScoreEntry> = scores
            .iter()
            .map(|(id, score)| WeekScoreEntry {
                team_id: id.to_string(),
                team_key: format!("key.{id}"),
                team_name: format!("Team {id}"),
                score: *score,
                week,
            })
            .collect();
        let side = |e: &WeekScoreEntry| MatchupSide {
            team_id: e.team_id.clone(),
            team_key: e.team_key.clone(),
            team_name: e.team_name.clone(),
            points: e.score,
        };
        let matchups: Vec<Matchup> = entries
            .chunks(2)
            .map(|pair| Matchup {
                team1: side(&pair[0]),
                team2: side(&pair[1]),
            })
            .collect();
        let at = Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap();
        calculate_week_results(&matchups, &entries, at)
            .unwrap()
            .unwrap()
    }

    fn find<'a>(totals: &'a [TeamSeasonTotals], id: &str) -> &'a TeamSeasonTotals {
        totals.iter().find(|t| t.team_id == id).unwrap()
    }

    #[test]
    fn sums_counters_across_weeks() {
        let weeks = vec![
            scored_week(1, &[("a", 120.0), ("b", 90.0), ("c", 100.0), ("d", 80.0)]),
            scored_week(2, &[("a", 70.0), ("b", 95.0), ("c", 110.0), ("d", 60.0)]),
        ];
        let totals = aggregate_season(&weeks);
        assert_eq!(totals.len(), 4);

        // a: week 1 W + top half (2.0); week 2 L + bottom half (0.0)
        let a = find(&totals, "a");
        assert_eq!(a.total_h2h_wins, 1);
        assert_eq!(a.total_h2h_losses, 1);
        assert_relative_eq!(a.total_performance_wins, 1.0);
        assert_relative_eq!(a.total_wins, 2.0);
        assert_relative_eq!(a.total_losses, 2.0);
        assert_relative_eq!(a.total_points, 190.0);
        assert_relative_eq!(a.average_score, 95.0);
        assert_relative_eq!(a.win_percentage, 0.5);
        assert_eq!(a.weeks_played, 2);
    }

    #[test]
    fn wins_plus_losses_is_twice_weeks_played() {
        // No head-to-head ties; weeks 1 and 2 split performance credit.
        let weeks = vec![
            scored_week(1, &[("a", 100.0), ("b", 95.0), ("c", 100.0), ("d", 90.0)]),
            scored_week(2, &[("a", 91.0), ("b", 88.0), ("c", 91.0), ("d", 95.0)]),
            scored_week(3, &[("a", 50.0), ("b", 60.0), ("c", 70.0), ("d", 80.0)]),
        ];
        for team in aggregate_season(&weeks) {
            assert_eq!(team.total_h2h_ties, 0);
            assert_relative_eq!(
                team.total_wins + team.total_losses,
                2.0 * f64::from(team.weeks_played),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn tied_matchup_counts_toward_neither_wins_nor_losses() {
        let weeks = vec![
            scored_week(1, &[("a", 100.0), ("b", 100.0), ("c", 110.0), ("d", 90.0)]),
            scored_week(2, &[("a", 80.0), ("b", 85.0), ("c", 70.0), ("d", 75.0)]),
        ];
        let totals = aggregate_season(&weeks);

        let a = find(&totals, "a");
        assert_eq!(a.total_h2h_ties, 1);
        assert_eq!(a.total_h2h_wins + a.total_h2h_losses, 1);

        for team in &totals {
            assert_relative_eq!(
                team.total_wins + team.total_losses,
                2.0 * f64::from(team.weeks_played) - f64::from(team.total_h2h_ties),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn history_is_chronological_regardless_of_input_order() {
        let weeks = vec![
            scored_week(3, &[("a", 30.0), ("b", 1.0)]),
            scored_week(1, &[("a", 10.0), ("b", 1.0)]),
            scored_week(2, &[("a", 20.0), ("b", 1.0)]),
        ];
        let totals = aggregate_season(&weeks);
        let history: Vec<(u32, f64)> = find(&totals, "a")
            .score_history
            .iter()
            .map(|w| (w.week, w.score))
            .collect();
        assert_eq!(history, vec![(1, 10.0), (2, 20.0), (3, 30.0)]);
    }

    #[test]
    fn team_missing_a_week_plays_fewer_weeks() {
        let weeks = vec![
            scored_week(1, &[("a", 100.0), ("b", 90.0), ("c", 80.0), ("d", 70.0)]),
            scored_week(2, &[("a", 100.0), ("b", 90.0)]),
        ];
        let totals = aggregate_season(&weeks);
        assert_eq!(find(&totals, "a").weeks_played, 2);
        assert_eq!(find(&totals, "c").weeks_played, 1);
    }

    #[test]
    fn no_weeks_no_totals() {
        assert!(aggregate_season(&[]).is_empty());
    }
}
