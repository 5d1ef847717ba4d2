// Integration tests for the week/standings pipeline.
//
// These drive the public API end to end: provider JSON is normalized, scored,
// persisted, reloaded, and ranked, and the results are checked against the
// same computation done purely in memory.

use std::fs;
use std::path::PathBuf;

use approx::assert_relative_eq;
use chrono::{DateTime, TimeZone, Utc};
use victory_app::export::export_standings_csv;
use victory_app::input::{parse_week_input, WeekInput};
use victory_app::pipeline::{process_week, rebuild_standings, WeekOutcome};
use victory_app::store::WeekStore;
use victory_core::{calculate_season_standings, calculate_week_results, LeagueRules};

// ===========================================================================
// Test helpers
// ===========================================================================

fn scratch(name: &str) -> PathBuf {
    let tmp = std::env::temp_dir().join(name);
    let _ = fs::remove_dir_all(&tmp);
    tmp
}

fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, day, 6, 0, 0).unwrap()
}

/// Build a provider document for four teams paired 1v2 and 3v4. Scores are
/// written as strings for the second pairing to exercise normalization.
fn week_doc(week: u32, scores: [f64; 4]) -> WeekInput {
    let names = ["Alpha", "Bravo", "Charlie", "Delta"];
    let side = |i: usize| {
        let points = if i < 2 {
            format!("{}", scores[i])
        } else {
            format!("\"{}\"", scores[i])
        };
        format!(
            r#"{{ "team_id": {id}, "team_key": "449.l.7.t.{id}", "team_name": "{name}", "points": {points} }}"#,
            id = i + 1,
            name = names[i],
        )
    };
    let score = |i: usize| {
        format!(
            r#"{{ "team_id": "{id}", "team_key": "449.l.7.t.{id}", "team_name": "{name}", "score": {score}, "week": {week} }}"#,
            id = i + 1,
            name = names[i],
            score = scores[i],
        )
    };
    let text = format!(
        r#"{{ "week": {week},
              "matchups": [ {{ "team1": {}, "team2": {} }}, {{ "team1": {}, "team2": {} }} ],
              "scores": [ {}, {}, {}, {} ] }}"#,
        side(0),
        side(1),
        side(2),
        side(3),
        score(0),
        score(1),
        score(2),
        score(3),
    );
    parse_week_input(&text).expect("fixture document should parse")
}

fn ranked_names(standings: &victory_core::model::SeasonStandings) -> Vec<&str> {
    standings
        .standings
        .iter()
        .map(|t| t.team_name.as_str())
        .collect()
}

// ===========================================================================
// Season pipeline
// ===========================================================================

#[test]
fn persisted_season_matches_in_memory_computation() {
    let store = WeekStore::new(scratch("victory_it_roundtrip"));
    let rules = LeagueRules::default();
    let week1 = week_doc(1, [120.0, 100.0, 90.0, 80.0]);
    let week2 = week_doc(2, [70.0, 110.0, 105.0, 95.0]);

    process_week(&store, &week1, false, at(3)).unwrap();
    process_week(&store, &week2, false, at(10)).unwrap();
    let persisted = rebuild_standings(&store, &rules, at(11)).unwrap();

    let in_memory_weeks = vec![
        calculate_week_results(&week1.matchups, &week1.scores, at(3))
            .unwrap()
            .unwrap(),
        calculate_week_results(&week2.matchups, &week2.scores, at(10))
            .unwrap()
            .unwrap(),
    ];
    let in_memory = calculate_season_standings(&in_memory_weeks, &rules, at(11)).unwrap();

    assert_eq!(persisted, in_memory);
    assert_eq!(ranked_names(&persisted), vec!["Bravo", "Charlie", "Alpha", "Delta"]);

    let bravo = &persisted.standings[0];
    assert_eq!(bravo.rank, 1);
    assert_relative_eq!(bravo.total_wins, 3.0);
    assert_relative_eq!(bravo.total_points, 210.0);
    assert_relative_eq!(bravo.win_percentage, 0.75);

    let summary = persisted.season_summary.as_ref().unwrap();
    assert_eq!(summary.total_weeks, 2);
    assert_eq!(summary.leader, "Bravo");
    assert_eq!(summary.most_points, "Bravo");

    let _ = fs::remove_dir_all(store.dir());
}

#[test]
fn forced_reprocessing_does_not_double_count() {
    let store = WeekStore::new(scratch("victory_it_reprocess"));
    let rules = LeagueRules::default();
    let week1 = week_doc(1, [120.0, 100.0, 90.0, 80.0]);

    process_week(&store, &week1, false, at(3)).unwrap();
    let before = rebuild_standings(&store, &rules, at(4)).unwrap();

    let outcome = process_week(&store, &week1, true, at(5)).unwrap();
    assert!(matches!(outcome, WeekOutcome::Saved { week: 1, .. }));
    let after = rebuild_standings(&store, &rules, at(4)).unwrap();

    assert_eq!(after.weeks_included, 1);
    assert_eq!(before, after);

    let _ = fs::remove_dir_all(store.dir());
}

#[test]
fn all_zero_week_stays_out_of_the_season() {
    let store = WeekStore::new(scratch("victory_it_zero_week"));
    let rules = LeagueRules::default();

    process_week(&store, &week_doc(1, [120.0, 100.0, 90.0, 80.0]), false, at(3)).unwrap();
    let outcome = process_week(&store, &week_doc(2, [0.0; 4]), true, at(10)).unwrap();
    assert_eq!(outcome, WeekOutcome::Skipped { week: 2 });

    let standings = rebuild_standings(&store, &rules, at(11)).unwrap();
    assert_eq!(standings.weeks_included, 1);
    assert!(standings.standings.iter().all(|t| t.weeks_played == 1));

    let _ = fs::remove_dir_all(store.dir());
}

#[test]
fn csv_export_follows_rank_order() {
    let dir = scratch("victory_it_export");
    let store = WeekStore::new(dir.join("data"));
    let rules = LeagueRules::default();

    let week1 = week_doc(1, [120.0, 100.0, 90.0, 80.0]);
    let week2 = week_doc(2, [70.0, 110.0, 105.0, 95.0]);
    process_week(&store, &week1, false, at(3)).unwrap();
    process_week(&store, &week2, false, at(10)).unwrap();
    let standings = rebuild_standings(&store, &rules, at(11)).unwrap();

    let csv_path = dir.join("exports").join("standings.csv");
    export_standings_csv(&csv_path, &standings).unwrap();
    let text = fs::read_to_string(&csv_path).unwrap();
    let teams: Vec<&str> = text
        .lines()
        .skip(1)
        .filter_map(|line| line.split(',').nth(1))
        .collect();
    assert_eq!(teams, vec!["Bravo", "Charlie", "Alpha", "Delta"]);

    let _ = fs::remove_dir_all(&dir);
}
