use crate::model::{RulesConfig, TeamConfig};

/// Effectifs cibles (JOUR, NUIT) pour un jour de semaine donné.
///
/// Part des minimums, distribue le reste de l'effectif jusqu'aux maximums,
/// applique le sur-staffing JOUR du jour configuré en ponctionnant la NUIT,
/// puis rabote NUIT d'abord si le total dépasse l'effectif.
pub fn daily_targets(team: &TeamConfig, rules: &RulesConfig, weekday: usize) -> (usize, usize) {
    let roster = team.people.len();
    if roster == 0 {
        return (0, 0);
    }

    let mut day = team.min_day_staff.min(roster);
    let mut night = team.min_night_staff.min(roster);

    let mut spare = roster.saturating_sub(day + night);
    let grow_day = spare.min(team.max_day_staff.saturating_sub(day));
    day += grow_day;
    spare -= grow_day;
    night += spare.min(team.max_night_staff.saturating_sub(night));

    // Sur-staffing : la NUIT finance le JOUR tant qu'elle reste à son minimum.
    if rules.day_overfill && weekday == team.overfill_weekday && team.overfill_count > day {
        let wanted = team.overfill_count - day;
        let available = night.saturating_sub(team.min_night_staff);
        let moved = wanted.min(available);
        night -= moved;
        day += moved;
    }

    while day + night > roster && night > team.min_night_staff {
        night -= 1;
    }
    while day + night > roster && day > team.min_day_staff {
        day -= 1;
    }
    if day + night > roster {
        night = night.min(roster.saturating_sub(day.min(roster)));
        day = day.min(roster);
    }

    // Jamais une journée entièrement au repos quand une borne le permet.
    if day + night == 0 && (team.max_day_staff > 0 || team.max_night_staff > 0) {
        if team.max_day_staff > 0 {
            day = 1;
        } else {
            night = 1;
        }
    }

    (day, night)
}
