#![forbid(unsafe_code)]
//! Roulement — génération de rotations hebdomadaires répétables (sans BD).
//!
//! - Motifs JOUR/NUIT/REPOS par équipe, répétés toutes les N semaines.
//! - Séries, repos obligatoires après les nuits, équité d'heures.
//! - Recherche de la plus petite longueur de motif, relâchement en repli.
//! - Déterministe ; rendu CSV/JSON en dehors du moteur.

pub mod config;
pub mod engine;
pub mod model;
pub mod render;

pub use config::load_config;
pub use engine::{daily_targets, Diagnostics, Outcome, PersonState, PlanError, Planner, SearchOptions};
pub use model::{
    Config, DayPlan, PersonId, PriorityRule, RulesConfig, ShiftKind, TeamConfig, TimeRange,
    WeekPlan, WEEKDAYS,
};
