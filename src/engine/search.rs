use super::feasibility::{precheck, relaxation_variants, strip_preferences};
use super::state::PersonState;
use super::types::{Diagnostics, Outcome, PlanError, SearchOptions};
use super::week::build_week;
use crate::model::{PersonId, RulesConfig, TeamConfig, WeekPlan};
use std::collections::BTreeMap;

/// Part acceptée de créneaux sous leur minimum sur l'ensemble du motif.
pub(crate) const MAX_UNDERSTAFFED_RATIO: f64 = 0.20;
/// Écart toléré entre moyennes d'heures hebdo en mode heures égales.
pub(crate) const EQUAL_HOURS_SPREAD: f64 = 0.5;

/// Une tentative complète sur une longueur de motif donnée.
pub(crate) struct Attempt {
    pub pattern: Vec<WeekPlan>,
    pub diagnostics: Diagnostics,
    /// Heures cumulées finales par personne, amorce comprise.
    pub final_hours: BTreeMap<PersonId, f64>,
}

/// Simule `weeks` semaines avec des états vierges (ou amorcés par `seed`).
///
/// En mode strict, un rejet hebdomadaire abandonne la tentative ; l'appelant
/// réessaie à la longueur suivante.
pub(crate) fn attempt(
    team: &TeamConfig,
    rules: &RulesConfig,
    weeks: usize,
    strict: bool,
    seed: Option<&BTreeMap<PersonId, f64>>,
) -> Result<Attempt, PlanError> {
    let mut states: BTreeMap<PersonId, PersonState> = team
        .people
        .iter()
        .map(|p| {
            let carried = seed.and_then(|s| s.get(p)).copied().unwrap_or(0.0);
            (p.clone(), PersonState::with_hours(carried))
        })
        .collect();

    let mut diagnostics = Diagnostics::default();
    let mut pattern = Vec::with_capacity(weeks);
    for week in 0..weeks {
        pattern.push(build_week(
            team,
            rules,
            &mut states,
            week,
            weeks,
            strict,
            &mut diagnostics,
        )?);
    }

    let final_hours: BTreeMap<PersonId, f64> =
        states.into_iter().map(|(p, s)| (p, s.hours)).collect();
    let (spread, min_avg) = hours_stats(&final_hours, weeks);
    diagnostics.hours_spread = spread;
    diagnostics.min_avg_hours = min_avg;

    Ok(Attempt {
        pattern,
        diagnostics,
        final_hours,
    })
}

/// (écart max-min, minimum) des moyennes d'heures hebdo par personne.
pub(crate) fn hours_stats(hours: &BTreeMap<PersonId, f64>, weeks: usize) -> (f64, f64) {
    if hours.is_empty() || weeks == 0 {
        return (0.0, 0.0);
    }
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for total in hours.values() {
        let avg = total / weeks as f64;
        lo = lo.min(avg);
        hi = hi.max(avg);
    }
    (hi - lo, lo)
}

fn accepts(rules: &RulesConfig, attempt: &Attempt) -> bool {
    if attempt.diagnostics.understaffed_ratio() > MAX_UNDERSTAFFED_RATIO {
        return false;
    }
    if rules.equal_hours && attempt.diagnostics.hours_spread > EQUAL_HOURS_SPREAD {
        return false;
    }
    true
}

/// Cherche la plus petite longueur de motif acceptable pour une équipe.
///
/// Longueurs croissantes d'abord, puis variantes relâchées (acceptées dès que
/// le plancher d'heures est atteint), enfin repli tolérant à la longueur
/// maximale : on produit toujours un motif, jamais un échec sec.
pub(crate) fn find_pattern(
    team: &TeamConfig,
    rules: &RulesConfig,
    opts: SearchOptions,
) -> Outcome {
    let mut relaxed = Vec::new();
    let rules = precheck(team, rules, &mut relaxed);

    for weeks in opts.min_weeks..=opts.max_weeks {
        let Ok(result) = attempt(team, &rules, weeks, true, None) else {
            continue;
        };
        if accepts(&rules, &result) {
            let mut diagnostics = result.diagnostics;
            diagnostics.relaxed = relaxed;
            return Outcome {
                team: team.name.clone(),
                weeks,
                pattern: result.pattern,
                diagnostics,
                valid: true,
            };
        }
    }

    if rules.auto_relax {
        for (label, variant) in relaxation_variants(&rules) {
            for weeks in opts.min_weeks..=opts.max_weeks {
                let Ok(result) = attempt(team, &variant, weeks, true, None) else {
                    continue;
                };
                if result.diagnostics.min_avg_hours >= variant.weekly_hours_min {
                    let mut diagnostics = result.diagnostics;
                    diagnostics.relaxed = relaxed.clone();
                    diagnostics.relaxed.push(label);
                    return Outcome {
                        team: team.name.clone(),
                        weeks,
                        pattern: result.pattern,
                        diagnostics,
                        valid: true,
                    };
                }
            }
        }
    }

    // Rien ne passe : meilleure tentative tolérante à la longueur maximale.
    lenient_fallback(team, &rules, opts, relaxed)
}

/// Dernier recours : motif produit en mode tolérant, marqué non valide.
fn lenient_fallback(
    team: &TeamConfig,
    rules: &RulesConfig,
    opts: SearchOptions,
    mut relaxed: Vec<String>,
) -> Outcome {
    let mut fallback = strip_preferences(rules);
    fallback.max_days_off = fallback.max_days_off.max(fallback.min_days_off);
    relaxed.push("lenient fallback at max pattern length".to_string());

    match attempt(team, &fallback, opts.max_weeks, false, None) {
        Ok(result) => {
            let mut diagnostics = result.diagnostics;
            diagnostics.relaxed = relaxed;
            Outcome {
                team: team.name.clone(),
                weeks: opts.max_weeks,
                pattern: result.pattern,
                diagnostics,
                valid: false,
            }
        }
        Err(_) => unreachable!("lenient attempts never reject"),
    }
}
