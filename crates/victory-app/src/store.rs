// JSON persistence for week results, season standings, and reports.
//
// One document per week (`week_NN_results.json`), overwritten on
// reprocessing, plus a single `season_standings.json` replaced on every run.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{error, info, warn};
use victory_core::compliance::ComplianceReport;
use victory_core::model::{SeasonStandings, WeekResult};

pub const STANDINGS_FILE: &str = "season_standings.json";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("CSV error writing {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
}

/// File-backed store rooted at the data directory.
#[derive(Debug, Clone)]
pub struct WeekStore {
    dir: PathBuf,
}

impl WeekStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn week_path(&self, week: u32) -> PathBuf {
        self.dir.join(format!("week_{week:02}_results.json"))
    }

    pub fn standings_path(&self) -> PathBuf {
        self.dir.join(STANDINGS_FILE)
    }

    pub fn has_week(&self, week: u32) -> bool {
        self.week_path(week).is_file()
    }

    // ── Week results ─────────────────────────────────────────────────────────

    pub fn save_week(&self, week: &WeekResult) -> Result<PathBuf, StoreError> {
        let path = self.week_path(week.week);
        self.write_json(&path, week)?;
        info!("Saved week {} results to {}", week.week, path.display());
        Ok(path)
    }

    pub fn load_week(&self, week: u32) -> Result<Option<WeekResult>, StoreError> {
        let path = self.week_path(week);
        if !path.is_file() {
            return Ok(None);
        }
        read_json(&path).map(Some)
    }

    /// Load every persisted week, sorted by week number.
    ///
    /// Unreadable documents are logged and skipped, as are weeks whose
    /// scores are all zero. When two documents claim the same week, the
    /// first one in file-name order wins.
    pub fn load_all_weeks(&self) -> Result<Vec<WeekResult>, StoreError> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && is_week_file(path))
            .collect();
        paths.sort();

        let mut weeks: Vec<WeekResult> = Vec::with_capacity(paths.len());
        for path in paths {
            let week: WeekResult = match read_json(&path) {
                Ok(week) => week,
                Err(e) => {
                    error!("Failed to load {}: {}", path.display(), e);
                    continue;
                }
            };
            if week.team_results.is_empty() || week.is_all_zero() {
                info!("Skipping invalid week data from {}", path.display());
                continue;
            }
            if weeks.iter().any(|w| w.week == week.week) {
                warn!(
                    "Ignoring {}: week {} already loaded from another file",
                    path.display(),
                    week.week
                );
                continue;
            }
            weeks.push(week);
        }

        weeks.sort_by_key(|w| w.week);
        Ok(weeks)
    }

    // ── Standings ────────────────────────────────────────────────────────────

    pub fn save_standings(&self, standings: &SeasonStandings) -> Result<PathBuf, StoreError> {
        let path = self.standings_path();
        self.write_json(&path, standings)?;
        info!("Saved season standings to {}", path.display());
        Ok(path)
    }

    pub fn load_standings(&self) -> Result<Option<SeasonStandings>, StoreError> {
        let path = self.standings_path();
        if !path.is_file() {
            return Ok(None);
        }
        read_json(&path).map(Some)
    }

    // ── Reports ──────────────────────────────────────────────────────────────

    pub fn save_compliance_report(
        &self,
        report: &ComplianceReport,
    ) -> Result<PathBuf, StoreError> {
        let stamp = report.check_date.format("%Y%m%d_%H%M%S");
        let file_name = format!("ir_compliance_week_{:02}_{stamp}.json", report.week);
        let path = self.dir.join(file_name);
        self.write_json(&path, report)?;
        info!("Saved IR compliance report to {}", path.display());
        Ok(path)
    }

    /// Write any serializable document under the data directory.
    pub fn save_document<T: Serialize>(
        &self,
        file_name: &str,
        doc: &T,
    ) -> Result<PathBuf, StoreError> {
        let path = self.dir.join(file_name);
        self.write_json(&path, doc)?;
        Ok(path)
    }

    // ── Helpers ──────────────────────────────────────────────────────────────

    pub(crate) fn ensure_dir(&self) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })
    }

    fn write_json<T: Serialize>(&self, path: &Path, doc: &T) -> Result<(), StoreError> {
        self.ensure_dir()?;
        let text = serde_json::to_string_pretty(doc).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, text).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn is_week_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with("week_") && n.ends_with("_results.json"))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let text = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}
