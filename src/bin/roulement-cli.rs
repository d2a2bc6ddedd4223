#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use clap::{Parser, Subcommand};
use roulement::{load_config, render, Planner, SearchOptions};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de rotations hebdomadaires (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Générer les motifs et le planning déplié
    Generate {
        /// Fichier JSON de configuration (équipes + règles)
        #[arg(long)]
        config: String,
        /// Date de départ, idéalement un lundi (YYYY-MM-DD)
        #[arg(long)]
        start: String,
        /// Semaines à déplier ; défaut = PPCM des longueurs de motif
        #[arg(long)]
        weeks: Option<usize>,
        #[arg(long, default_value_t = 2)]
        min_weeks: usize,
        #[arg(long, default_value_t = 10)]
        max_weeks: usize,
        /// Fichier CSV de sortie
        #[arg(long)]
        out: String,
        /// Export JSON brut des motifs (optionnel)
        #[arg(long)]
        pattern_json: Option<String>,
    },

    /// Valider une configuration et afficher la faisabilité par équipe
    Check {
        #[arg(long)]
        config: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let code = match cli.cmd {
        Commands::Generate {
            config,
            start,
            weeks,
            min_weeks,
            max_weeks,
            out,
            pattern_json,
        } => {
            let config = load_config(&config)?;
            let start: NaiveDate = start
                .parse()
                .with_context(|| "start must be an ISO date, e.g., 2025-01-06")?;
            if start.weekday() != Weekday::Mon {
                eprintln!("Warning: start date is not a Monday; rows will begin mid-week.");
            }

            let planner = Planner::new(config);
            let opts = SearchOptions {
                min_weeks,
                max_weeks,
            };
            let outcomes = planner.solve_all(opts);

            let mut degraded = false;
            for outcome in &outcomes {
                let members = planner
                    .config()
                    .teams
                    .iter()
                    .find(|t| t.name == outcome.team)
                    .map(|t| t.people.len())
                    .unwrap_or(0);
                println!(
                    "Team '{}': repeating every {} weeks with {} members",
                    outcome.team, outcome.weeks, members
                );
                let d = &outcome.diagnostics;
                if !outcome.valid {
                    degraded = true;
                    eprintln!(
                        "Warning: team '{}' has no fully valid pattern within {} weeks; best effort emitted",
                        outcome.team, outcome.weeks
                    );
                }
                if d.understaffed_slots > 0 {
                    degraded = true;
                    eprintln!(
                        "Warning: team '{}' left {}/{} slots below minimum staffing",
                        outcome.team, d.understaffed_slots, d.total_slots
                    );
                }
                for note in &d.relaxed {
                    eprintln!("Note: team '{}': {}", outcome.team, note);
                }
            }

            let total_weeks = match weeks {
                Some(w) => w,
                None => {
                    let lengths: Vec<usize> = outcomes.iter().map(|o| o.weeks).collect();
                    let cycle = render::cycle_weeks(&lengths);
                    println!("Total weeks not provided; using repeat cycle length = {cycle}");
                    cycle
                }
            };

            render::write_schedule_csv(&out, start, total_weeks, &outcomes)?;
            if let Some(path) = pattern_json {
                render::write_pattern_json(path, &outcomes)?;
            }
            println!("Schedule written to {out}");

            // Code 2 = WARNING/INCOMPLETE
            if degraded {
                2
            } else {
                0
            }
        }
        Commands::Check { config } => {
            let config = load_config(&config)?;
            let planner = Planner::new(config);
            let mut all_ok = true;
            for (team, feasible) in planner.check_feasibility() {
                if feasible {
                    println!("Team '{team}': OK");
                } else {
                    all_ok = false;
                    println!("Team '{team}': minimum staffing incompatible with OFF bounds (will relax)");
                }
            }
            if all_ok {
                0
            } else {
                2
            }
        }
    };

    std::process::exit(code);
}
