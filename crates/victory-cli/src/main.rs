// Victory points CLI entry point.
//
// Each subcommand loads config/league.toml (applying flag overrides), opens
// the week store in the data directory, and runs one pipeline step.

mod cli;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::info;
use victory_app::config::{self, Config};
use victory_app::export::export_standings_csv;
use victory_app::input::load_week_input;
use victory_app::pipeline::{self, WeekOutcome};
use victory_app::site_config::{build_website_config, WEBSITE_CONFIG_FILE};
use victory_app::store::WeekStore;
use victory_core::model::SeasonStandings;

use cli::{Cli, Command};

const DEFAULT_LOG_FILTER: &str = "warn,victory_core=info,victory_app=info,victory=info";

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let store = WeekStore::new(&config.data_dir);
    info!(
        "League '{}' (season {}), data in {}",
        config.league.name,
        config.league.season,
        store.dir().display()
    );

    match cli.command {
        Command::Week { input, force } => {
            let doc = load_week_input(&input)
                .with_context(|| format!("failed to read week document {}", input.display()))?;
            let outcome = pipeline::process_week(&store, &doc, force, Utc::now())?;
            match &outcome {
                WeekOutcome::Saved { week, path } => {
                    println!("Week {week} scored and saved to {}", path.display());
                }
                WeekOutcome::Reused { week, path } => {
                    println!(
                        "Week {week} already processed ({}); use --force to recompute",
                        path.display()
                    );
                }
                WeekOutcome::Skipped { week } => {
                    println!("Week {week} has no valid scores; nothing saved");
                }
            }
            match pipeline::refresh_standings(&store, &config.rules, Utc::now())? {
                Some(standings) => print_standings(&standings),
                None => println!("No valid weeks stored yet; standings not updated"),
            }
        }

        Command::Standings => {
            let standings = pipeline::rebuild_standings(&store, &config.rules, Utc::now())?;
            print_standings(&standings);
        }

        Command::IrCheck {
            rosters,
            week,
            save_report,
        } => {
            let week = match week {
                Some(week) => week,
                None => latest_week(&store)?,
            };
            let (report, saved) = pipeline::run_compliance(
                &store,
                &rosters,
                week,
                &config.rules,
                save_report,
                Utc::now(),
            )?;

            if report.is_compliant() {
                println!(
                    "Week {week}: all {} teams are IR compliant",
                    report.total_teams
                );
            } else {
                println!(
                    "Week {week}: {} violation(s) on {} team(s)",
                    report.summary.total_violations, report.summary.teams_with_violations
                );
                for team in &report.violations {
                    for v in &team.violations {
                        let status = if v.current_status.is_empty() {
                            "none"
                        } else {
                            v.current_status.as_str()
                        };
                        println!(
                            "  {}: {} (status {status})",
                            team.team_name, v.player_name
                        );
                    }
                }
            }
            if let Some(path) = saved {
                println!("Report saved to {}", path.display());
            }
        }

        Command::Export { output } => {
            let Some(standings) = store.load_standings()? else {
                bail!(
                    "no standings found in {}; run `victory standings` first",
                    store.dir().display()
                );
            };
            export_standings_csv(&output, &standings)
                .with_context(|| format!("failed to export standings to {}", output.display()))?;
            println!(
                "Exported {} teams to {}",
                standings.standings.len(),
                output.display()
            );
        }

        Command::SiteConfig => {
            let site = build_website_config(&config.league, Utc::now());
            let path = store
                .save_document(WEBSITE_CONFIG_FILE, &site)
                .context("failed to write website config")?;
            println!("Website config written to {}", path.display());
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays clean for command output. `RUST_LOG`
/// overrides the default filter.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config =
        config::load_config_from(&cli.base_dir).context("failed to load configuration")?;

    if let Some(dir) = &cli.data_dir {
        config.data_dir = if dir.is_absolute() {
            dir.clone()
        } else {
            cli.base_dir.join(dir)
        };
    }
    if let Some(statuses) = &cli.ir_statuses {
        config.rules.ir_eligible_statuses = statuses
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }

    config::validate(&config).context("invalid configuration")?;
    Ok(config)
}

fn latest_week(store: &WeekStore) -> Result<u32> {
    match store.load_all_weeks()?.last() {
        Some(week) => Ok(week.week),
        None => bail!("no stored weeks to infer the current week from; pass --week"),
    }
}

fn print_standings(standings: &SeasonStandings) {
    println!("Standings through {} week(s):", standings.weeks_included);
    for team in &standings.standings {
        println!(
            "{:>3}. {:<28} {:>5.1}-{:<5.1} {:>9.2} pts",
            team.rank, team.team_name, team.total_wins, team.total_losses, team.total_points
        );
    }
}
