// Orchestration: score a week, persist it, rebuild standings.
//
// Every run rebuilds standings from the persisted week documents rather than
// patching the previous standings, so reprocessing a week never double counts.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use tracing::{info, warn};
use victory_core::compliance::{check_ir_compliance, ComplianceReport};
use victory_core::model::SeasonStandings;
use victory_core::{calculate_season_standings, calculate_week_results, LeagueRules};

use crate::input::{load_rosters, WeekInput};
use crate::store::WeekStore;

/// What happened to a week handed to [`process_week`].
#[derive(Debug, Clone, PartialEq)]
pub enum WeekOutcome {
    /// Scored and written to `path`.
    Saved { week: u32, path: PathBuf },
    /// An artifact already existed and `force` was not set.
    Reused { week: u32, path: PathBuf },
    /// No usable scores; nothing was written.
    Skipped { week: u32 },
}

impl WeekOutcome {
    pub fn week(&self) -> u32 {
        match self {
            WeekOutcome::Saved { week, .. }
            | WeekOutcome::Reused { week, .. }
            | WeekOutcome::Skipped { week } => *week,
        }
    }
}

/// Score one week of provider data and persist the result.
///
/// An existing artifact is kept unless `force` is set. Invalid weeks
/// (empty or all-zero scores) are never written, even when forced.
pub fn process_week(
    store: &WeekStore,
    input: &WeekInput,
    force: bool,
    now: DateTime<Utc>,
) -> Result<WeekOutcome> {
    let week = input.week;

    if !force && store.has_week(week) {
        let path = store.week_path(week);
        info!(
            "Week {week} already processed at {}, reusing (pass --force to recompute)",
            path.display()
        );
        return Ok(WeekOutcome::Reused { week, path });
    }

    let result = calculate_week_results(&input.matchups, &input.scores, now)
        .with_context(|| format!("failed to score week {week}"))?;

    let Some(result) = result else {
        warn!("Week {week} has no valid scores, nothing saved");
        return Ok(WeekOutcome::Skipped { week });
    };

    if result.week != week {
        bail!(
            "week document says week {week} but its scores are for week {}",
            result.week
        );
    }

    let path = store
        .save_week(&result)
        .with_context(|| format!("failed to save week {week}"))?;
    Ok(WeekOutcome::Saved { week, path })
}

/// Rebuild season standings from every persisted week and save them.
///
/// Returns `Ok(None)`, leaving any saved standings untouched, when the store
/// holds no valid weeks yet.
pub fn refresh_standings(
    store: &WeekStore,
    rules: &LeagueRules,
    now: DateTime<Utc>,
) -> Result<Option<SeasonStandings>> {
    let weeks = store
        .load_all_weeks()
        .with_context(|| format!("failed to read week results from {}", store.dir().display()))?;

    if weeks.is_empty() {
        return Ok(None);
    }

    let standings = calculate_season_standings(&weeks, rules, now)
        .context("failed to calculate season standings")?;
    store
        .save_standings(&standings)
        .context("failed to save season standings")?;
    Ok(Some(standings))
}

/// Like [`refresh_standings`], but an empty store is an error.
pub fn rebuild_standings(
    store: &WeekStore,
    rules: &LeagueRules,
    now: DateTime<Utc>,
) -> Result<SeasonStandings> {
    match refresh_standings(store, rules, now)? {
        Some(standings) => Ok(standings),
        None => bail!("no valid week results found in {}", store.dir().display()),
    }
}

/// Run the IR compliance check over a roster file, optionally saving the
/// report next to the week results.
pub fn run_compliance(
    store: &WeekStore,
    rosters_path: &Path,
    week: u32,
    rules: &LeagueRules,
    save_report: bool,
    now: DateTime<Utc>,
) -> Result<(ComplianceReport, Option<PathBuf>)> {
    let rosters = load_rosters(rosters_path)
        .with_context(|| format!("failed to load rosters from {}", rosters_path.display()))?;

    let report = check_ir_compliance(&rosters, week, rules, now)
        .context("failed to run IR compliance check")?;

    let saved = if save_report {
        Some(
            store
                .save_compliance_report(&report)
                .context("failed to save IR compliance report")?,
        )
    } else {
        None
    };
    Ok((report, saved))
}
