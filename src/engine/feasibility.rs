use crate::model::{RulesConfig, TeamConfig};

/// Moyenne de jours de repos hebdo impliquée par les minimums de staffing.
pub(crate) fn average_off_per_week(team: &TeamConfig) -> f64 {
    let roster = team.people.len();
    if roster == 0 {
        return 7.0;
    }
    let min_staffed = (team.min_day_staff + team.min_night_staff) as f64;
    7.0 - 7.0 * min_staffed / roster as f64
}

/// Les bornes de repos sont-elles atteignables avec ces minimums ?
pub(crate) fn is_feasible(team: &TeamConfig, rules: &RulesConfig) -> bool {
    let avg_off = average_off_per_week(team);
    avg_off >= f64::from(rules.min_days_off) && avg_off <= f64::from(rules.max_days_off)
}

/// Pré-contrôle statique : en cas d'infaisabilité, coupe le sur-staffing et
/// la liste de priorité avant de lancer la recherche.
pub(crate) fn precheck(
    team: &TeamConfig,
    rules: &RulesConfig,
    relaxed: &mut Vec<String>,
) -> RulesConfig {
    if is_feasible(team, rules) {
        return rules.clone();
    }
    relaxed.push("precheck: overfill and priority disabled".to_string());
    strip_preferences(rules)
}

/// Copie des règles sans sur-staffing ni priorités.
pub(crate) fn strip_preferences(rules: &RulesConfig) -> RulesConfig {
    let mut out = rules.clone();
    out.day_overfill = false;
    out.priority = None;
    out
}

/// Variantes de relâchement, de la moins à la plus permissive : préférences
/// coupées puis `max_days_off` ramené pas à pas vers `min_days_off`.
/// Chaque variante passe par le même contrôle d'acceptation que les règles
/// de base, ce qui la rend testable isolément.
pub(crate) fn relaxation_variants(rules: &RulesConfig) -> Vec<(String, RulesConfig)> {
    let mut variants = Vec::new();
    let stripped = strip_preferences(rules);
    if rules.day_overfill || rules.priority.is_some() {
        variants.push(("overfill and priority disabled".to_string(), stripped.clone()));
    }
    let mut max_off = rules.max_days_off;
    while max_off > rules.min_days_off {
        max_off -= 1;
        let mut variant = stripped.clone();
        variant.max_days_off = max_off;
        variants.push((format!("max_days_off lowered to {max_off}"), variant));
    }
    variants
}
