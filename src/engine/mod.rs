mod day;
mod feasibility;
mod rank;
mod search;
mod state;
mod targets;
mod types;
mod week;

pub use state::PersonState;
pub use targets::daily_targets;
pub use types::{Diagnostics, Outcome, PlanError, SearchOptions};

use crate::model::{Config, PersonId, TeamConfig};
use search::{attempt, hours_stats, EQUAL_HOURS_SPREAD, MAX_UNDERSTAFFED_RATIO};
use std::collections::BTreeMap;

/// Planner : encapsule une configuration et pilote la recherche de motifs.
#[derive(Debug, Clone)]
pub struct Planner {
    config: Config,
}

impl Planner {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Verdict du pré-contrôle statique, par équipe.
    pub fn check_feasibility(&self) -> Vec<(String, bool)> {
        self.config
            .teams
            .iter()
            .map(|t| {
                (
                    t.name.clone(),
                    feasibility::is_feasible(t, &self.config.rules),
                )
            })
            .collect()
    }

    /// Recherche indépendante pour une seule équipe.
    pub fn solve_team(&self, team: &TeamConfig, opts: SearchOptions) -> Outcome {
        search::find_pattern(team, &self.config.rules, opts)
    }

    /// Résout toutes les équipes.
    ///
    /// En mode heures égales multi-équipes, une même longueur d'essai est
    /// tentée pour toutes les équipes avec un registre d'heures partagé ;
    /// l'unité d'équité est la somme des heures d'une personne sur toutes
    /// ses équipes (à confirmer côté produit). Sans convergence, retour aux
    /// recherches indépendantes avec un constat.
    pub fn solve_all(&self, opts: SearchOptions) -> Vec<Outcome> {
        if self.config.rules.equal_hours && self.config.teams.len() > 1 {
            if let Some(outcomes) = self.solve_coordinated(opts) {
                return outcomes;
            }
        }
        self.config
            .teams
            .iter()
            .map(|team| {
                let mut outcome = self.solve_team(team, opts);
                if self.config.rules.equal_hours && self.config.teams.len() > 1 {
                    outcome
                        .diagnostics
                        .relaxed
                        .push("joint equal-hours search did not converge".to_string());
                }
                outcome
            })
            .collect()
    }

    /// Une longueur d'essai commune, registre d'heures inter-équipes partagé.
    fn solve_coordinated(&self, opts: SearchOptions) -> Option<Vec<Outcome>> {
        let rules = &self.config.rules;

        for weeks in opts.min_weeks..=opts.max_weeks {
            let mut ledger: BTreeMap<PersonId, f64> = BTreeMap::new();
            let mut trial = Vec::with_capacity(self.config.teams.len());
            let mut converged = true;

            for team in &self.config.teams {
                let mut relaxed = Vec::new();
                let team_rules = feasibility::precheck(team, rules, &mut relaxed);
                let Ok(result) = attempt(team, &team_rules, weeks, true, Some(&ledger)) else {
                    converged = false;
                    break;
                };
                if result.diagnostics.understaffed_ratio() > MAX_UNDERSTAFFED_RATIO {
                    converged = false;
                    break;
                }
                for (person, hours) in &result.final_hours {
                    ledger.insert(person.clone(), *hours);
                }
                trial.push((team.name.clone(), result, relaxed));
            }

            if !converged {
                continue;
            }
            let (spread, _) = hours_stats(&ledger, weeks);
            if spread > EQUAL_HOURS_SPREAD {
                continue;
            }

            return Some(
                trial
                    .into_iter()
                    .map(|(name, result, relaxed)| {
                        let mut diagnostics = result.diagnostics;
                        diagnostics.relaxed = relaxed;
                        diagnostics.hours_spread = spread;
                        Outcome {
                            team: name,
                            weeks,
                            pattern: result.pattern,
                            diagnostics,
                            valid: true,
                        }
                    })
                    .collect(),
            );
        }
        None
    }
}
