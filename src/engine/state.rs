use crate::model::{RulesConfig, ShiftKind};

/// État d'une personne au fil d'une tentative d'allocation.
///
/// Créé vierge à chaque tentative (une par longueur de motif essayée),
/// mis à jour une fois par journée simulée, jamais réutilisé.
#[derive(Debug, Clone, Default)]
pub struct PersonState {
    pub last: Option<ShiftKind>,
    pub streak_kind: Option<ShiftKind>,
    pub streak_len: u32,
    /// Jours travaillés consécutifs, JOUR et NUIT confondus ; retombe à 0 au repos.
    pub working_streak: u32,
    /// Jours de repos obligatoires restants après une série de NUITS.
    pub cooldown: u32,
    /// Heures cumulées depuis le début de la tentative.
    pub hours: f64,
}

impl PersonState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Amorce une tentative avec des heures héritées d'autres équipes.
    pub fn with_hours(hours: f64) -> Self {
        Self {
            hours,
            ..Self::default()
        }
    }

    /// Les règles dures permettent-elles cette affectation aujourd'hui ?
    pub fn can_take(&self, kind: ShiftKind, rules: &RulesConfig) -> bool {
        if self.cooldown > 0 && kind != ShiftKind::Off {
            return false;
        }
        if kind.is_working() && self.working_streak >= rules.max_shifts_in_row {
            return false;
        }
        // Règle dure indépendante des séries : pas de JOUR au lendemain d'une NUIT.
        if kind == ShiftKind::Day
            && rules.no_day_after_night
            && self.last == Some(ShiftKind::Night)
        {
            return false;
        }
        true
    }

    /// Enregistre la journée. Le cooldown s'amorce uniquement au passage
    /// NUIT→REPOS quand il est nul, puis décroît à chaque jour de repos —
    /// le jour de repos qui l'amorce en consomme un.
    pub fn record(&mut self, kind: ShiftKind, rules: &RulesConfig) {
        let previous = self.last;

        if self.streak_kind == Some(kind) {
            self.streak_len += 1;
        } else {
            self.streak_kind = Some(kind);
            self.streak_len = 1;
        }
        self.last = Some(kind);

        if kind.is_working() {
            self.working_streak += 1;
        } else {
            self.working_streak = 0;
        }

        if kind == ShiftKind::Off {
            if previous == Some(ShiftKind::Night) && self.cooldown == 0 {
                self.cooldown = rules.night_cooldown_days;
            }
            if self.cooldown > 0 {
                self.cooldown -= 1;
            }
        }
    }

    /// Série en cours pour un type donné (0 si la série est d'un autre type).
    pub fn streak_for(&self, kind: ShiftKind) -> u32 {
        if self.streak_kind == Some(kind) {
            self.streak_len
        } else {
            0
        }
    }
}
