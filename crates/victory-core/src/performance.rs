// League-wide performance credit: top half of the week's scores earns a win.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::model::WeekScoreEntry;

/// Number of winning positions for a league of `team_count` teams.
///
/// Floor division: in an odd-sized league the middle team falls into the
/// bottom half.
pub fn top_half_size(team_count: usize) -> usize {
    team_count / 2
}

/// Compute each team's performance credit in `[0.0, 1.0]`.
///
/// Teams are ranked by score descending. Positions below [`top_half_size`]
/// win, the rest lose. Teams with exactly equal scores form a group; a group
/// that straddles the boundary shares its winning positions equally, so each
/// member receives `winning_positions / group_size`.
pub fn resolve_performance(entries: &[WeekScoreEntry]) -> BTreeMap<String, f64> {
    let mut ranked: Vec<&WeekScoreEntry> = entries.iter().collect();
    // Stable, so equal scores keep input order.
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let boundary = top_half_size(ranked.len());
    let mut credits = BTreeMap::new();

    let mut start = 0;
    while start < ranked.len() {
        let score = ranked[start].score;
        let end = ranked[start..]
            .iter()
            .position(|e| e.score != score)
            .map_or(ranked.len(), |offset| start + offset);
        let group = &ranked[start..end];

        let credit = if end <= boundary {
            1.0
        } else if start >= boundary {
            0.0
        } else {
            let winning_positions = boundary - start;
            winning_positions as f64 / group.len() as f64
        };

        for entry in group {
            credits.insert(entry.team_id.clone(), credit);
        }
        start = end;
    }

    credits
}
