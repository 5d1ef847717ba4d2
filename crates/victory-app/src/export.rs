// CSV export of season standings.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use victory_core::model::{SeasonStandings, TeamSeasonTotals};

use crate::store::StoreError;

/// One standings row as written to CSV.
#[derive(Debug, Serialize)]
struct StandingsRow<'a> {
    rank: usize,
    team: &'a str,
    record: String,
    h2h: String,
    performance: String,
    points: String,
    average: String,
    win_pct: String,
}

/// `W-L` with ties appended only when the team has any.
pub fn h2h_record(team: &TeamSeasonTotals) -> String {
    if team.total_h2h_ties > 0 {
        format!(
            "{}-{}-{}",
            team.total_h2h_wins, team.total_h2h_losses, team.total_h2h_ties
        )
    } else {
        format!("{}-{}", team.total_h2h_wins, team.total_h2h_losses)
    }
}

fn row(team: &TeamSeasonTotals) -> StandingsRow<'_> {
    StandingsRow {
        rank: team.rank,
        team: &team.team_name,
        record: format!("{:.1}-{:.1}", team.total_wins, team.total_losses),
        h2h: h2h_record(team),
        performance: format!(
            "{:.1}-{:.1}",
            team.total_performance_wins, team.total_performance_losses
        ),
        points: format!("{:.2}", team.total_points),
        average: format!("{:.2}", team.average_score),
        win_pct: format!("{:.3}", team.win_percentage),
    }
}

/// Write standings as CSV (with a header row) to any writer.
pub fn write_standings_csv<W: Write>(
    writer: W,
    standings: &SeasonStandings,
) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    for team in &standings.standings {
        wtr.serialize(row(team))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write standings CSV to `path`, creating parent directories.
pub fn export_standings_csv(path: &Path, standings: &SeasonStandings) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let file = std::fs::File::create(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_standings_csv(file, standings).map_err(|source| StoreError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn team(name: &str, rank: usize, ties: u32) -> TeamSeasonTotals {
        let mut t = TeamSeasonTotals::new(name, name, name);
        t.rank = rank;
        t.total_h2h_wins = 3;
        t.total_h2h_losses = 1;
        t.total_h2h_ties = ties;
        t.total_performance_wins = 2.5;
        t.total_performance_losses = 1.5 + f64::from(ties);
        t.total_wins = 5.5;
        t.total_losses = 2.5 + f64::from(ties);
        t.total_points = 456.789;
        t.weeks_played = 4 + ties;
        t.average_score = 114.19725;
        t.win_percentage = 0.6872;
        t
    }

    #[test]
    fn h2h_record_shows_ties_only_when_present() {
        assert_eq!(h2h_record(&team("A", 1, 0)), "3-1");
        assert_eq!(h2h_record(&team("A", 1, 2)), "3-1-2");
    }

    #[test]
    fn writes_header_and_rows_in_rank_order() {
        let standings = SeasonStandings {
            last_updated: Utc.with_ymd_and_hms(2024, 12, 30, 0, 0, 0).unwrap(),
            weeks_included: 4,
            standings: vec![team("Alpha", 1, 0), team("Beta", 2, 1)],
            season_summary: None,
        };
        let mut buf = Vec::new();
        write_standings_csv(&mut buf, &standings).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "rank,team,record,h2h,performance,points,average,win_pct"
        );
        assert_eq!(
            lines[1],
            "1,Alpha,5.5-2.5,3-1,2.5-1.5,456.79,114.20,0.687"
        );
        assert!(lines[2].starts_with("2,Beta,5.5-3.5,3-1-1,"));
        assert_eq!(lines.len(), 3);
    }
}
