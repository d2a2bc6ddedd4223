use crate::model::{Config, TeamConfig};
use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Charge une configuration JSON, normalise les bornes puis valide.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
    let mut config: Config = serde_json::from_slice(&data)
        .with_context(|| format!("parsing config {}", path.display()))?;
    normalize(&mut config);
    validate(&config)?;
    Ok(config)
}

/// Remplace les bornes hautes laissées à 0 par la taille de l'effectif.
pub fn normalize(config: &mut Config) {
    for team in &mut config.teams {
        let roster = team.people.len();
        if team.max_day_staff == 0 {
            team.max_day_staff = roster.max(team.min_day_staff);
        }
        if team.max_night_staff == 0 {
            team.max_night_staff = roster.max(team.min_night_staff);
        }
    }
}

/// Vérifie la cohérence d'une configuration avant toute allocation.
pub fn validate(config: &Config) -> Result<()> {
    if config.teams.is_empty() {
        bail!("config must contain at least one team");
    }
    for team in &config.teams {
        validate_team(team)?;
    }

    let r = &config.rules;
    if r.min_days_off > r.max_days_off {
        bail!("min_days_off cannot exceed max_days_off");
    }
    if r.max_shifts_in_row == 0 {
        bail!("max_shifts_in_row must be positive");
    }
    if r.weekly_hours_min < 0.0 || r.weekly_hours_max < 0.0 {
        bail!("weekly hours bounds must be non-negative");
    }
    if r.weekly_hours_max > 0.0 && r.weekly_hours_min > r.weekly_hours_max {
        bail!("weekly_hours_min cannot exceed weekly_hours_max");
    }
    if let Some(priority) = &r.priority {
        if priority.weekday > 6 {
            bail!("priority weekday must be in 0..=6");
        }
        if let Some(team_name) = &priority.team {
            if !config
                .teams
                .iter()
                .any(|t| t.name.eq_ignore_ascii_case(team_name))
            {
                bail!("priority targets unknown team '{team_name}'");
            }
        }
    }
    Ok(())
}

fn validate_team(team: &TeamConfig) -> Result<()> {
    if team.people.is_empty() {
        bail!("team '{}' must have at least one person", team.name);
    }
    let mut seen = HashSet::new();
    for person in &team.people {
        if !seen.insert(person) {
            bail!(
                "team '{}' lists person '{}' more than once",
                team.name,
                person.as_str()
            );
        }
    }
    let roster = team.people.len();
    if team.max_day_staff < team.min_day_staff {
        bail!("team '{}' max_day_staff must be >= min_day_staff", team.name);
    }
    if team.max_night_staff < team.min_night_staff {
        bail!(
            "team '{}' max_night_staff must be >= min_night_staff",
            team.name
        );
    }
    if team.max_day_staff > roster || team.max_night_staff > roster {
        bail!(
            "team '{}' max staffing cannot exceed roster size {}",
            team.name,
            roster
        );
    }
    if team.overfill_weekday > 6 {
        bail!("team '{}' overfill_weekday must be in 0..=6", team.name);
    }
    Ok(())
}
