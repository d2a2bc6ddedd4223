use crate::model::{PersonId, WeekPlan};
use thiserror::Error;

/// Bornes de la recherche de motif.
#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    pub min_weeks: usize,
    pub max_weeks: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            min_weeks: 2,
            max_weeks: 10,
        }
    }
}

#[derive(Error, Debug)]
pub enum PlanError {
    /// Semaine invalide : relance la recherche au motif suivant.
    #[error("weekly OFF days for {person} in week {week} = {got} outside [{min}, {max}]")]
    WeekRejected {
        person: PersonId,
        week: usize,
        got: u32,
        min: u32,
        max: u32,
    },
    #[error("no valid repeating pattern within {max_weeks} weeks for team '{team}'")]
    SearchExhausted { team: String, max_weeks: usize },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Constats non bloquants accumulés pendant une tentative.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    /// Créneaux JOUR/NUIT restés sous leur minimum malgré les rattrapages.
    pub understaffed_slots: usize,
    pub total_slots: usize,
    /// Écart max-min des moyennes d'heures hebdo par personne.
    pub hours_spread: f64,
    /// Plus petite moyenne d'heures hebdo parmi l'effectif.
    pub min_avg_hours: f64,
    /// Dépassements des bornes de repos hebdo (mode tolérant uniquement).
    pub off_violations: usize,
    /// Relâchements appliqués, dans l'ordre.
    pub relaxed: Vec<String>,
    /// Affectations forcées pour éviter une journée entièrement au repos.
    pub forced_assignments: usize,
}

impl Diagnostics {
    pub fn understaffed_ratio(&self) -> f64 {
        if self.total_slots == 0 {
            0.0
        } else {
            self.understaffed_slots as f64 / self.total_slots as f64
        }
    }
}

/// Résultat d'une recherche : toujours un motif, valide ou non.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub team: String,
    pub weeks: usize,
    pub pattern: Vec<WeekPlan>,
    pub diagnostics: Diagnostics,
    /// Faux quand seul le repli tolérant a produit un motif.
    pub valid: bool,
}

impl Outcome {
    /// Variante stricte : un motif dégradé devient une erreur fatale.
    pub fn into_result(self) -> Result<Self, PlanError> {
        if self.valid {
            Ok(self)
        } else {
            Err(PlanError::SearchExhausted {
                team: self.team,
                max_weeks: self.weeks,
            })
        }
    }
}
