use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Noms des jours, index 0 = lundi.
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Identifiant fort pour Person
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonId(String);

impl PersonId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Nature d'une journée pour une personne.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftKind {
    #[serde(rename = "DAY")]
    Day,
    #[serde(rename = "NIGHT")]
    Night,
    #[serde(rename = "OFF")]
    Off,
}

impl ShiftKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ShiftKind::Day => "DAY",
            ShiftKind::Night => "NIGHT",
            ShiftKind::Off => "OFF",
        }
    }

    /// JOUR ou NUIT, par opposition au repos.
    pub fn is_working(self) -> bool {
        !matches!(self, ShiftKind::Off)
    }
}

/// Plage horaire d'un poste. `end <= start` signifie passage minuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Durée en heures, minuit franchi si nécessaire.
    pub fn duration_hours(&self) -> f64 {
        use chrono::Timelike;
        let start_secs = i64::from(self.start.num_seconds_from_midnight());
        let mut end_secs = i64::from(self.end.num_seconds_from_midnight());
        if end_secs <= start_secs {
            end_secs += 24 * 60 * 60;
        }
        (end_secs - start_secs) as f64 / 3600.0
    }
}

/// Équipe : effectif ordonné, horaires et bornes de staffing par type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamConfig {
    pub name: String,
    pub people: Vec<PersonId>,
    pub day_shift: TimeRange,
    pub night_shift: TimeRange,
    #[serde(default = "default_min_staff")]
    pub min_day_staff: usize,
    /// 0 = taille de l'effectif (normalisé au chargement).
    #[serde(default)]
    pub max_day_staff: usize,
    #[serde(default = "default_min_staff")]
    pub min_night_staff: usize,
    /// 0 = taille de l'effectif (normalisé au chargement).
    #[serde(default)]
    pub max_night_staff: usize,
    /// Jour de sur-staffing JOUR (0 = lundi), mercredi par défaut.
    #[serde(default = "default_overfill_weekday")]
    pub overfill_weekday: usize,
    #[serde(default)]
    pub overfill_count: usize,
}

impl TeamConfig {
    /// Durée du poste pour un type donné (0 pour REPOS).
    pub fn shift_hours(&self, kind: ShiftKind) -> f64 {
        match kind {
            ShiftKind::Day => self.day_shift.duration_hours(),
            ShiftKind::Night => self.night_shift.duration_hours(),
            ShiftKind::Off => 0.0,
        }
    }
}

/// Liste de priorité : membres favorisés un jour donné, sur une équipe donnée.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityRule {
    pub names: Vec<PersonId>,
    /// 0 = lundi ; vendredi par défaut.
    #[serde(default = "default_priority_weekday")]
    pub weekday: usize,
    /// `None` = toutes les équipes.
    #[serde(default)]
    pub team: Option<String>,
}

impl PriorityRule {
    /// La règle s'applique-t-elle à cette équipe, ce jour, cette personne ?
    pub fn applies(&self, team_name: &str, weekday: usize, person: &PersonId) -> bool {
        if self.weekday != weekday {
            return false;
        }
        if let Some(target) = &self.team {
            if !target.eq_ignore_ascii_case(team_name) {
                return false;
            }
        }
        self.names.contains(person)
    }
}

/// Règles communes à toutes les équipes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Jours travaillés consécutifs max, JOUR et NUIT confondus.
    #[serde(default = "default_max_shifts_in_row")]
    pub max_shifts_in_row: u32,
    #[serde(default = "default_min_days_off")]
    pub min_days_off: u32,
    #[serde(default = "default_max_days_off")]
    pub max_days_off: u32,
    #[serde(default = "default_true")]
    pub no_day_after_night: bool,
    #[serde(default)]
    pub priority: Option<PriorityRule>,
    /// Active le sur-staffing JOUR du jour `overfill_weekday` de l'équipe.
    #[serde(default = "default_true")]
    pub day_overfill: bool,
    /// Jours de repos imposés après une série de NUITS.
    #[serde(default)]
    pub night_cooldown_days: u32,
    #[serde(default = "default_weekly_hours_min")]
    pub weekly_hours_min: f64,
    /// Plafond d'heures hebdomadaires moyennes ; 0 = pas de plafond.
    #[serde(default = "default_weekly_hours_max")]
    pub weekly_hours_max: f64,
    /// Exige des moyennes d'heures convergentes entre personnes.
    #[serde(default)]
    pub equal_hours: bool,
    /// Autorise le relâchement des règles quand rien ne passe.
    #[serde(default = "default_true")]
    pub auto_relax: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            max_shifts_in_row: default_max_shifts_in_row(),
            min_days_off: default_min_days_off(),
            max_days_off: default_max_days_off(),
            no_day_after_night: true,
            priority: None,
            day_overfill: true,
            night_cooldown_days: 0,
            weekly_hours_min: default_weekly_hours_min(),
            weekly_hours_max: default_weekly_hours_max(),
            equal_hours: false,
            auto_relax: true,
        }
    }
}

fn default_min_staff() -> usize {
    1
}
fn default_overfill_weekday() -> usize {
    2
}
fn default_priority_weekday() -> usize {
    4
}
fn default_max_shifts_in_row() -> u32 {
    5
}
fn default_min_days_off() -> u32 {
    1
}
fn default_max_days_off() -> u32 {
    2
}
fn default_true() -> bool {
    true
}
fn default_weekly_hours_min() -> f64 {
    40.0
}
fn default_weekly_hours_max() -> f64 {
    48.0
}

/// Configuration complète : équipes + règles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub teams: Vec<TeamConfig>,
    #[serde(default)]
    pub rules: RulesConfig,
}

/// Affectations d'une journée : JOUR ∪ NUIT ∪ REPOS = effectif, exactement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    /// 0 = lundi .. 6 = dimanche.
    pub weekday: usize,
    pub day: Vec<PersonId>,
    pub night: Vec<PersonId>,
    pub off: Vec<PersonId>,
}

impl DayPlan {
    pub fn members(&self, kind: ShiftKind) -> &[PersonId] {
        match kind {
            ShiftKind::Day => &self.day,
            ShiftKind::Night => &self.night,
            ShiftKind::Off => &self.off,
        }
    }
}

/// Une semaine du motif : 7 journées dans l'ordre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekPlan {
    pub week: usize,
    pub days: Vec<DayPlan>,
}
