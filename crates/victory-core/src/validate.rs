// Week input validation: structural checks and the unplayed-week sentinel.

use std::collections::HashSet;

use crate::error::ScoringError;
use crate::model::{Matchup, WeekScoreEntry};

/// Returns true when a week has no usable data: no scores at all, or every
/// score exactly zero (what the provider reports before a week is posted).
pub fn is_invalid_week<I>(scores: I) -> bool
where
    I: IntoIterator<Item = f64>,
{
    // `all` is vacuously true for an empty week.
    scores.into_iter().all(|score| score == 0.0)
}

/// Convenience wrapper over [`is_invalid_week`] for score entries.
pub fn is_invalid_week_entries(entries: &[WeekScoreEntry]) -> bool {
    is_invalid_week(entries.iter().map(|e| e.score))
}

/// Check that a week's records are well formed before scoring.
///
/// Score entries must have non-empty unique team ids, finite scores and a
/// single shared week number. Each team may appear in at most one matchup and
/// never against itself, and matchup points must be finite.
///
/// Returns the week number, or `None` when there are no score entries.
pub fn check_week_input(
    matchups: &[Matchup],
    entries: &[WeekScoreEntry],
) -> Result<Option<u32>, ScoringError> {
    let week = entries.first().map(|e| e.week);

    let mut seen = HashSet::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        if entry.team_id.trim().is_empty() {
            return Err(ScoringError::malformed(
                format!("scores[{idx}].team_id"),
                "team id must not be empty",
            ));
        }
        if !entry.score.is_finite() {
            return Err(ScoringError::NonFiniteScore {
                team_id: entry.team_id.clone(),
                value: entry.score,
            });
        }
        if let Some(expected) = week {
            if entry.week != expected {
                return Err(ScoringError::WeekMismatch {
                    team_id: entry.team_id.clone(),
                    expected,
                    found: entry.week,
                });
            }
        }
        if !seen.insert(entry.team_id.as_str()) {
            return Err(ScoringError::DuplicateTeam {
                team_id: entry.team_id.clone(),
                week: entry.week,
            });
        }
    }

    let mut paired = HashSet::with_capacity(matchups.len() * 2);
    for (idx, matchup) in matchups.iter().enumerate() {
        if matchup.team1.team_id == matchup.team2.team_id {
            return Err(ScoringError::malformed(
                format!("matchups[{idx}]"),
                format!("team `{}` is matched against itself", matchup.team1.team_id),
            ));
        }
        for (side_idx, side) in matchup.sides().into_iter().enumerate() {
            if side.team_id.trim().is_empty() {
                return Err(ScoringError::malformed(
                    format!("matchups[{idx}].team{}.team_id", side_idx + 1),
                    "team id must not be empty",
                ));
            }
            if !side.points.is_finite() {
                return Err(ScoringError::NonFiniteScore {
                    team_id: side.team_id.clone(),
                    value: side.points,
                });
            }
            if !paired.insert(side.team_id.as_str()) {
                return Err(ScoringError::DuplicateTeam {
                    team_id: side.team_id.clone(),
                    week: week.unwrap_or_default(),
                });
            }
        }
    }

    Ok(week)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MatchupSide;

    fn entry(team_id: &str, score: f64, week: u32) -> WeekScoreEntry {
        WeekScoreEntry {
            team_id: team_id.into(),
            team_key: format!("nfl.l.1.t.{team_id}"),
            team_name: format!("Team {team_id}"),
            score,
            week,
        }
    }

    fn side(team_id: &str, points: f64) -> MatchupSide {
        MatchupSide {
            team_id: team_id.into(),
            team_key: format!("nfl.l.1.t.{team_id}"),
            team_name: format!("Team {team_id}"),
            points,
        }
    }

    #[test]
    fn empty_week_is_invalid() {
        assert!(is_invalid_week(Vec::<f64>::new()));
        assert!(is_invalid_week_entries(&[]));
    }

    #[test]
    fn all_zero_week_is_invalid() {
        let entries = vec![entry("1", 0.0, 3), entry("2", 0.0, 3)];
        assert!(is_invalid_week_entries(&entries));
    }

    #[test]
    fn single_nonzero_score_makes_week_valid() {
        let entries = vec![entry("1", 0.0, 3), entry("2", 0.1, 3)];
        assert!(!is_invalid_week_entries(&entries));
    }

    #[test]
    fn check_returns_week_number() {
        let entries = vec![entry("1", 90.0, 4), entry("2", 80.0, 4)];
        let matchups = vec![Matchup {
            team1: side("1", 90.0),
            team2: side("2", 80.0),
        }];
        assert_eq!(check_week_input(&matchups, &entries), Ok(Some(4)));
        assert_eq!(check_week_input(&[], &[]), Ok(None));
    }

    #[test]
    fn rejects_duplicate_score_entry() {
        let entries = vec![entry("1", 90.0, 4), entry("1", 80.0, 4)];
        assert_eq!(
            check_week_input(&[], &entries),
            Err(ScoringError::DuplicateTeam {
                team_id: "1".into(),
                week: 4
            })
        );
    }

    #[test]
    fn rejects_mixed_weeks() {
        let entries = vec![entry("1", 90.0, 4), entry("2", 80.0, 5)];
        assert_eq!(
            check_week_input(&[], &entries),
            Err(ScoringError::WeekMismatch {
                team_id: "2".into(),
                expected: 4,
                found: 5
            })
        );
    }

    #[test]
    fn rejects_nan_score() {
        let entries = vec![entry("1", f64::NAN, 4)];
        assert!(matches!(
            check_week_input(&[], &entries),
            Err(ScoringError::NonFiniteScore { .. })
        ));
    }

    #[test]
    fn rejects_blank_team_id() {
        let entries = vec![entry(" ", 10.0, 4)];
        match check_week_input(&[], &entries).unwrap_err() {
            ScoringError::MalformedInput { field, .. } => assert_eq!(field, "scores[0].team_id"),
            other => panic!("expected MalformedInput, got: {other}"),
        }
    }

    #[test]
    fn rejects_team_in_two_matchups() {
        let matchups = vec![
            Matchup {
                team1: side("1", 90.0),
                team2: side("2", 80.0),
            },
            Matchup {
                team1: side("3", 70.0),
                team2: side("1", 90.0),
            },
        ];
        assert!(matches!(
            check_week_input(&matchups, &[]),
            Err(ScoringError::DuplicateTeam { .. })
        ));
    }

    #[test]
    fn rejects_self_matchup() {
        let matchups = vec![Matchup {
            team1: side("1", 90.0),
            team2: side("1", 90.0),
        }];
        match check_week_input(&matchups, &[]).unwrap_err() {
            ScoringError::MalformedInput { field, .. } => assert_eq!(field, "matchups[0]"),
            other => panic!("expected MalformedInput, got: {other}"),
        }
    }
}
