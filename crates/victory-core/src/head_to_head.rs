// Head-to-head matchup resolution.

use std::collections::BTreeMap;

use crate::model::{H2hOutcome, Matchup};

/// Resolve every matchup into a per-team outcome.
///
/// Points are compared with exact equality: only identical totals tie. Teams
/// that appear in no matchup are absent from the returned map.
pub fn resolve_head_to_head(matchups: &[Matchup]) -> BTreeMap<String, H2hOutcome> {
    let mut results = BTreeMap::new();

    for matchup in matchups {
        let (one, two) = (&matchup.team1, &matchup.team2);
        let (one_outcome, two_outcome) = if one.points > two.points {
            (H2hOutcome::Win, H2hOutcome::Loss)
        } else if two.points > one.points {
            (H2hOutcome::Loss, H2hOutcome::Win)
        } else {
            (H2hOutcome::Tie, H2hOutcome::Tie)
        };
        results.insert(one.team_id.clone(), one_outcome);
        results.insert(two.team_id.clone(), two_outcome);
    }

    results
}
