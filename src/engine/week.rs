use super::day::allocate_day;
use super::state::PersonState;
use super::types::{Diagnostics, PlanError};
use crate::model::{PersonId, RulesConfig, ShiftKind, TeamConfig, WeekPlan};
use std::collections::BTreeMap;

/// Tolérance sur les bornes de repos hebdomadaires du moteur horaire.
pub(crate) const OFF_TOLERANCE: u32 = 1;

/// Construit les 7 journées d'une semaine en faisant avancer les états.
///
/// En mode strict, un effectif de repos hors bornes rejette toute la
/// tentative de motif (erreur récupérable) ; en mode tolérant il devient un
/// constat et la semaine est émise quand même.
pub(crate) fn build_week(
    team: &TeamConfig,
    rules: &RulesConfig,
    states: &mut BTreeMap<PersonId, PersonState>,
    week: usize,
    pattern_weeks: usize,
    strict: bool,
    diagnostics: &mut Diagnostics,
) -> Result<WeekPlan, PlanError> {
    let mut days = Vec::with_capacity(7);
    let mut off_count: BTreeMap<&PersonId, u32> = team.people.iter().map(|p| (p, 0)).collect();

    for weekday in 0..7 {
        let plan = allocate_day(team, rules, states, weekday, pattern_weeks, diagnostics);
        for person in plan.members(ShiftKind::Off) {
            if let Some(count) = off_count.get_mut(person) {
                *count += 1;
            }
        }
        days.push(plan);
    }

    let min = rules.min_days_off.saturating_sub(OFF_TOLERANCE);
    let max = rules.max_days_off + OFF_TOLERANCE;
    for person in &team.people {
        let got = off_count.get(person).copied().unwrap_or(0);
        if got < min || got > max {
            if strict {
                return Err(PlanError::WeekRejected {
                    person: person.clone(),
                    week,
                    got,
                    min,
                    max,
                });
            }
            diagnostics.off_violations += 1;
        }
    }

    Ok(WeekPlan { week, days })
}
