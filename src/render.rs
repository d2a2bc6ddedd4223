use crate::engine::Outcome;
use crate::model::{ShiftKind, WEEKDAYS};
use anyhow::{bail, Context, Result};
use chrono::{Duration, NaiveDate};
use csv::WriterBuilder;
use std::collections::BTreeMap;
use std::path::Path;
use tempfile::NamedTempFile;

// Passe de rendu sans état : déplie les motifs acceptés sur un calendrier
// et les sérialise. Aucun état partagé avec le moteur.

/// Longueur de cycle par défaut : PPCM des longueurs de motif des équipes.
pub fn cycle_weeks(lengths: &[usize]) -> usize {
    lengths.iter().copied().fold(0, |acc, l| match (acc, l) {
        (0, l) => l,
        (acc, 0) => acc,
        (acc, l) => acc / gcd(acc, l) * l,
    })
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Export CSV du planning déplié sur `total_weeks` semaines.
///
/// Colonnes `week_index,date,weekday,team,shift_type,members` ; une ligne
/// JOUR et une ligne NUIT par équipe et par jour, membres joints par `;`.
/// Écriture atomique via fichier temporaire.
pub fn write_schedule_csv<P: AsRef<Path>>(
    path: P,
    start: NaiveDate,
    total_weeks: usize,
    outcomes: &[Outcome],
) -> Result<()> {
    let path = path.as_ref();
    if total_weeks == 0 {
        bail!("total_weeks must be positive");
    }

    let tmp = NamedTempFile::new_in(path.parent().unwrap_or_else(|| Path::new(".")))
        .with_context(|| "creating temp file")?;
    let mut w = WriterBuilder::new().from_writer(tmp);
    w.write_record(["week_index", "date", "weekday", "team", "shift_type", "members"])?;

    for week in 0..total_weeks {
        let week_start = start + Duration::weeks(week as i64);
        for outcome in outcomes {
            if outcome.pattern.is_empty() {
                continue;
            }
            let pattern_week = &outcome.pattern[week % outcome.pattern.len()];
            for day in &pattern_week.days {
                let date = week_start + Duration::days(day.weekday as i64);
                for kind in [ShiftKind::Day, ShiftKind::Night] {
                    let members: Vec<&str> = day
                        .members(kind)
                        .iter()
                        .map(|p| p.as_str())
                        .collect();
                    w.write_record([
                        week.to_string().as_str(),
                        date.format("%Y-%m-%d").to_string().as_str(),
                        WEEKDAYS[day.weekday.min(6)],
                        outcome.team.as_str(),
                        kind.as_str(),
                        members.join(";").as_str(),
                    ])?;
                }
            }
        }
    }

    w.flush()?;
    let tmp = w
        .into_inner()
        .map_err(|err| anyhow::anyhow!("finishing csv: {err}"))?;
    tmp.persist(path).with_context(|| "atomic rename")?;
    Ok(())
}

/// Export JSON brut des motifs, par équipe (jolie mise en forme).
pub fn write_pattern_json<P: AsRef<Path>>(path: P, outcomes: &[Outcome]) -> Result<()> {
    let path = path.as_ref();
    let patterns: BTreeMap<&str, _> = outcomes
        .iter()
        .map(|o| (o.team.as_str(), &o.pattern))
        .collect();
    let json = serde_json::to_vec_pretty(&patterns)?;

    let mut tmp = NamedTempFile::new_in(path.parent().unwrap_or_else(|| Path::new(".")))
        .with_context(|| "creating temp file")?;
    use std::io::Write;
    tmp.write_all(&json)?;
    tmp.flush()?;
    tmp.persist(path).with_context(|| "atomic rename")?;
    Ok(())
}
