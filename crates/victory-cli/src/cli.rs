// Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "victory",
    version,
    about = "Victory points standings for head-to-head leagues"
)]
pub struct Cli {
    /// Directory holding config/league.toml; relative data paths resolve here
    #[arg(long, global = true, env = "VICTORY_BASE_DIR", default_value = ".")]
    pub base_dir: PathBuf,

    /// Override the data directory from league.toml
    #[arg(long, global = true, env = "VICTORY_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the IR-eligible statuses (comma separated)
    #[arg(
        long,
        global = true,
        env = "IR_ELIGIBLE_STATUSES",
        value_delimiter = ','
    )]
    pub ir_statuses: Option<Vec<String>>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Score a week from a provider document, then rebuild standings
    Week {
        /// Week document written by the fetch step
        #[arg(long)]
        input: PathBuf,

        /// Recompute and overwrite an already processed week
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// Rebuild season standings from the stored week results
    Standings,

    /// Check IR slots against the eligible statuses
    IrCheck {
        /// Roster document (array of teams or {"teams": [...]})
        #[arg(long)]
        rosters: PathBuf,

        /// Week to label the report with; defaults to the latest stored week
        #[arg(long)]
        week: Option<u32>,

        /// Save the report as JSON in the data directory
        #[arg(long, default_value_t = false)]
        save_report: bool,
    },

    /// Export current standings as CSV
    Export {
        #[arg(long)]
        output: PathBuf,
    },

    /// Write website_config.json for the frontend
    SiteConfig,
}
