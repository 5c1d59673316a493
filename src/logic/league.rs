//! League play: round-robin schedule (circle method) and standings.

use crate::models::{Match, Settings, Team, TeamId, TeamStanding};
use std::collections::HashMap;

/// Generate a round-robin schedule, optionally mirrored for home and away legs.
///
/// Circle method: with an odd team count a bye slot is appended so the working list has
/// even size `m`. Each of the `m - 1` rounds pairs position `i` with `m - 1 - i`; pairings
/// against the bye are rest days and are dropped. After a round the last slot moves to
/// index 1 while index 0 stays fixed. The mirrored pass continues the matchday numbering
/// with home and away swapped; every league fixture is leg 1, so the passes differ only by
/// matchday.
pub fn generate_league_schedule(teams: &[Team], double_leg: bool) -> Vec<Match> {
    // None is the rest slot.
    let mut table: Vec<Option<TeamId>> = teams.iter().map(|t| Some(t.id)).collect();
    if table.len() % 2 == 1 {
        table.push(None);
    }
    if table.len() < 2 {
        return Vec::new();
    }

    let rounds = table.len() as u32 - 1;
    let half = table.len() / 2;
    let mut matches = Vec::new();
    let mut match_number = 1u32;

    for round in 1..=rounds {
        for i in 0..half {
            if let (Some(home), Some(away)) = (table[i], table[table.len() - 1 - i]) {
                matches.push(Match::league(match_number, round, home, away));
                match_number += 1;
            }
        }
        if let Some(last) = table.pop() {
            table.insert(1, last);
        }
    }

    if double_leg {
        let first_pass = matches.len();
        for idx in 0..first_pass {
            let (round, home, away) = {
                let m = &matches[idx];
                (m.round, m.home, m.away)
            };
            if let (Some(home), Some(away)) = (home, away) {
                matches.push(Match::league(match_number, rounds + round, away.id, home.id));
                match_number += 1;
            }
        }
    }

    log::debug!("Generated {} league fixtures over {} matchdays", matches.len(), rounds);
    matches
}

/// Fold played matches into a ranked table.
///
/// Unplayed matches and matches whose sides are not (both) known teams are skipped. Rows are
/// ordered by points, then goal difference, then goals scored, all descending; remaining ties
/// keep team-list order. Bye teams never appear.
pub fn calculate_league_standings(
    teams: &[Team],
    matches: &[Match],
    settings: &Settings,
) -> Vec<TeamStanding> {
    let mut standings: Vec<TeamStanding> = teams
        .iter()
        .filter(|t| !t.is_bye())
        .map(TeamStanding::for_team)
        .collect();
    let index: HashMap<TeamId, usize> = standings
        .iter()
        .enumerate()
        .map(|(i, s)| (s.team_id, i))
        .collect();

    for m in matches.iter().filter(|m| m.is_played) {
        let (Some(home), Some(away)) = (m.home, m.away) else {
            continue;
        };
        let (Some(&h), Some(&a)) = (index.get(&home.id), index.get(&away.id)) else {
            continue;
        };
        let Some((home_goals, away_goals)) = m.score() else {
            continue;
        };
        standings[h].record(home_goals, away_goals, settings.win_points, settings.draw_points);
        standings[a].record(away_goals, home_goals, settings.win_points, settings.draw_points);
    }

    standings.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
            .then(b.goals_for.cmp(&a.goals_for))
    });
    standings
}
