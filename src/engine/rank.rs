use super::state::PersonState;
use crate::model::{PersonId, RulesConfig, ShiftKind, TeamConfig};
use std::collections::BTreeMap;

/// Le plafond d'heures autorise-t-il encore ce poste ?
///
/// Compare la moyenne projetée sur le motif complet (heures courantes plus
/// ce poste, divisées par le nombre de semaines) au plafond hebdomadaire.
pub(crate) fn within_hours_cap(
    state: &PersonState,
    shift_hours: f64,
    pattern_weeks: usize,
    rules: &RulesConfig,
) -> bool {
    if rules.weekly_hours_max <= 0.0 || pattern_weeks == 0 {
        return true;
    }
    (state.hours + shift_hours) / pattern_weeks as f64 <= rules.weekly_hours_max
}

/// Ordonne les candidats éligibles pour un type de poste, score croissant.
///
/// Score composite : longueur de la série du même type, +0.5 si la dernière
/// affectation était déjà de ce type, −2.0 pour les prioritaires du jour,
/// plus les heures cumulées en terme d'équité atténué. En mode heures égales,
/// les heures cumulées deviennent la clé primaire et la série la secondaire.
/// Égalités départagées par identifiant, ordre lexical.
pub(crate) fn rank_candidates(
    pool: &[PersonId],
    states: &BTreeMap<PersonId, PersonState>,
    team: &TeamConfig,
    rules: &RulesConfig,
    weekday: usize,
    pattern_weeks: usize,
    kind: ShiftKind,
) -> Vec<PersonId> {
    let shift_hours = team.shift_hours(kind);
    let mut scored: Vec<(f64, f64, &PersonId)> = Vec::with_capacity(pool.len());

    for person in pool {
        let Some(state) = states.get(person) else {
            continue;
        };
        if !state.can_take(kind, rules) {
            continue;
        }
        if !within_hours_cap(state, shift_hours, pattern_weeks, rules) {
            continue;
        }

        let streak = f64::from(state.streak_for(kind));
        let (primary, secondary) = if rules.equal_hours {
            (state.hours, streak)
        } else {
            let repeat = if state.last == Some(kind) { 0.5 } else { 0.0 };
            let bonus = match &rules.priority {
                Some(rule) if rule.applies(&team.name, weekday, person) => 2.0,
                _ => 0.0,
            };
            (streak + repeat - bonus + state.hours * 0.01, 0.0)
        };
        scored.push((primary, secondary, person));
    }

    scored.sort_by(|a, b| {
        a.0.total_cmp(&b.0)
            .then_with(|| a.1.total_cmp(&b.1))
            .then_with(|| Ord::cmp(a.2, b.2))
    });
    scored.into_iter().map(|(_, _, p)| p.clone()).collect()
}
