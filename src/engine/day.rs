use super::rank::{rank_candidates, within_hours_cap};
use super::state::PersonState;
use super::targets::daily_targets;
use super::types::Diagnostics;
use crate::model::{DayPlan, PersonId, RulesConfig, ShiftKind, TeamConfig};
use std::collections::BTreeMap;

/// Journal d'affectations annulables pour une journée.
///
/// Chaque affectation conserve l'état antérieur de la personne ; l'annuler
/// restaure cet état, heures comprises. Les invariants de partition et de
/// comptabilité d'heures tiennent donc à chaque étape des rattrapages.
struct DayLedger<'a> {
    team: &'a TeamConfig,
    rules: &'a RulesConfig,
    states: &'a mut BTreeMap<PersonId, PersonState>,
    pattern_weeks: usize,
    weekday: usize,
    applied: Vec<Applied>,
}

struct Applied {
    person: PersonId,
    kind: ShiftKind,
    before: PersonState,
}

impl<'a> DayLedger<'a> {
    fn new(
        team: &'a TeamConfig,
        rules: &'a RulesConfig,
        states: &'a mut BTreeMap<PersonId, PersonState>,
        pattern_weeks: usize,
        weekday: usize,
    ) -> Self {
        Self {
            team,
            rules,
            states,
            pattern_weeks,
            weekday,
            applied: Vec::new(),
        }
    }

    fn assign(&mut self, person: &PersonId, kind: ShiftKind) {
        let Some(state) = self.states.get_mut(person) else {
            return;
        };
        let before = state.clone();
        state.record(kind, self.rules);
        if kind.is_working() {
            state.hours += self.team.shift_hours(kind);
        }
        self.applied.push(Applied {
            person: person.clone(),
            kind,
            before,
        });
    }

    fn unassign(&mut self, person: &PersonId) {
        let Some(pos) = self.applied.iter().rposition(|a| &a.person == person) else {
            return;
        };
        let entry = self.applied.remove(pos);
        if let Some(state) = self.states.get_mut(person) {
            *state = entry.before;
        }
    }

    fn is_assigned(&self, person: &PersonId) -> bool {
        self.applied.iter().any(|a| &a.person == person)
    }

    fn assigned(&self, kind: ShiftKind) -> Vec<PersonId> {
        self.applied
            .iter()
            .filter(|a| a.kind == kind)
            .map(|a| a.person.clone())
            .collect()
    }

    fn count(&self, kind: ShiftKind) -> usize {
        self.applied.iter().filter(|a| a.kind == kind).count()
    }

    fn unassigned(&self) -> Vec<PersonId> {
        self.team
            .people
            .iter()
            .filter(|p| !self.is_assigned(p))
            .cloned()
            .collect()
    }

    fn rank(&self, pool: &[PersonId], kind: ShiftKind) -> Vec<PersonId> {
        rank_candidates(
            pool,
            &*self.states,
            self.team,
            self.rules,
            self.weekday,
            self.pattern_weeks,
            kind,
        )
    }

    fn eligible(&self, person: &PersonId, kind: ShiftKind) -> bool {
        let Some(state) = self.states.get(person) else {
            return false;
        };
        state.can_take(kind, self.rules)
            && within_hours_cap(
                state,
                self.team.shift_hours(kind),
                self.pattern_weeks,
                self.rules,
            )
    }

    fn hours_of(&self, person: &PersonId) -> f64 {
        self.states.get(person).map(|s| s.hours).unwrap_or(0.0)
    }

    /// Complète un type sous son minimum depuis le vivier de repos,
    /// heures cumulées croissantes.
    fn backfill(&mut self, kind: ShiftKind, min_staff: usize) {
        if self.count(kind) >= min_staff {
            return;
        }
        let mut pool = self.unassigned();
        pool.sort_by(|a, b| {
            self.hours_of(a)
                .total_cmp(&self.hours_of(b))
                .then_with(|| Ord::cmp(a, b))
        });
        for person in pool {
            if self.count(kind) >= min_staff {
                break;
            }
            if self.eligible(&person, kind) {
                self.assign(&person, kind);
            }
        }
    }

    /// Déplace des personnes du type opposé tant que son minimum survit.
    /// En mode heures égales on déplace la personne la plus chargée.
    fn rebalance(&mut self, kind: ShiftKind, min_staff: usize) {
        let (other, other_min) = match kind {
            ShiftKind::Day => (ShiftKind::Night, self.team.min_night_staff),
            ShiftKind::Night => (ShiftKind::Day, self.team.min_day_staff),
            ShiftKind::Off => return,
        };

        while self.count(kind) < min_staff && self.count(other) > other_min {
            let mut movers = self.assigned(other);
            if self.rules.equal_hours {
                movers.sort_by(|a, b| {
                    self.hours_of(b)
                        .total_cmp(&self.hours_of(a))
                        .then_with(|| Ord::cmp(a, b))
                });
            }

            let mut moved = false;
            for person in movers {
                self.unassign(&person);
                if self.eligible(&person, kind) {
                    self.assign(&person, kind);
                    moved = true;
                    break;
                }
                // Déplacement impossible : on rejoue l'affectation d'origine.
                self.assign(&person, other);
            }
            if !moved {
                break;
            }
        }
    }

    fn into_day_plan(self) -> DayPlan {
        let mut plan = DayPlan {
            weekday: self.weekday,
            day: Vec::new(),
            night: Vec::new(),
            off: Vec::new(),
        };
        for entry in self.applied {
            match entry.kind {
                ShiftKind::Day => plan.day.push(entry.person),
                ShiftKind::Night => plan.night.push(entry.person),
                ShiftKind::Off => plan.off.push(entry.person),
            }
        }
        plan
    }
}

/// Remplit la partition JOUR/NUIT/REPOS d'une journée.
///
/// Sélection gloutonne par score, puis rattrapage des minimums : d'abord
/// depuis le vivier de repos, ensuite en déplaçant depuis le type opposé.
/// Un minimum toujours insatisfait est un constat, pas un échec.
pub(crate) fn allocate_day(
    team: &TeamConfig,
    rules: &RulesConfig,
    states: &mut BTreeMap<PersonId, PersonState>,
    weekday: usize,
    pattern_weeks: usize,
    diagnostics: &mut Diagnostics,
) -> DayPlan {
    let (day_count, night_count) = daily_targets(team, rules, weekday);
    let mut ledger = DayLedger::new(team, rules, states, pattern_weeks, weekday);

    let day_picked = ledger.rank(&team.people, ShiftKind::Day);
    for person in day_picked.iter().take(day_count) {
        ledger.assign(person, ShiftKind::Day);
    }

    let rest = ledger.unassigned();
    let night_picked = ledger.rank(&rest, ShiftKind::Night);
    for person in night_picked.iter().take(night_count) {
        ledger.assign(person, ShiftKind::Night);
    }

    ledger.backfill(ShiftKind::Day, team.min_day_staff);
    ledger.backfill(ShiftKind::Night, team.min_night_staff);
    ledger.rebalance(ShiftKind::Day, team.min_day_staff);
    ledger.rebalance(ShiftKind::Night, team.min_night_staff);

    if ledger.count(ShiftKind::Day) + ledger.count(ShiftKind::Night) == 0
        && !team.people.is_empty()
    {
        force_one(&mut ledger);
        diagnostics.forced_assignments += 1;
    }

    diagnostics.total_slots += 2;
    if ledger.count(ShiftKind::Day) < team.min_day_staff {
        diagnostics.understaffed_slots += 1;
    }
    if ledger.count(ShiftKind::Night) < team.min_night_staff {
        diagnostics.understaffed_slots += 1;
    }

    for person in ledger.unassigned() {
        ledger.assign(&person, ShiftKind::Off);
    }

    ledger.into_day_plan()
}

/// Personne ne travaille : on impose une affectation, JOUR de préférence.
fn force_one(ledger: &mut DayLedger<'_>) {
    for kind in [ShiftKind::Day, ShiftKind::Night] {
        let ranked = ledger.rank(&ledger.team.people, kind);
        if let Some(person) = ranked.first() {
            ledger.assign(person, kind);
            return;
        }
    }
    // Aucun candidat éligible : on prend le moins chargé, en JOUR.
    let mut pool = ledger.team.people.to_vec();
    pool.sort_by(|a, b| {
        ledger
            .hours_of(a)
            .total_cmp(&ledger.hours_of(b))
            .then_with(|| Ord::cmp(a, b))
    });
    if let Some(person) = pool.first() {
        let person = person.clone();
        ledger.assign(&person, ShiftKind::Day);
    }
}
