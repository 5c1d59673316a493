//! Cup play: bracket generation with byes for team counts that are not a power of two.

use crate::models::{Leg, Match, Participant, Settings, Team};

/// Standard cup label for a round with `pair_count` ties.
pub fn round_name(pair_count: usize) -> String {
    match pair_count {
        1 => "Final".to_string(),
        2 => "Semi Final".to_string(),
        4 => "Quarter Final".to_string(),
        n => format!("Round of {}", n * 2),
    }
}

/// Pad the team list to the next power of two and lay it out as adjacent pairs.
///
/// Real teams keep their order. Bye slots take the away side of the last pairs so two
/// byes never meet in round 1 (there are always fewer byes than pairs).
pub fn seed_round_one(teams: &[Team]) -> Vec<(Participant, Participant)> {
    if teams.len() < 2 {
        return Vec::new();
    }
    let target = teams.len().next_power_of_two();
    let pair_count = target / 2;
    let byes = target - teams.len();
    let genuine = pair_count.saturating_sub(byes);

    let mut real = teams.iter().map(Team::participant);
    let mut next_real = || real.next().unwrap_or_else(|| Team::bye().participant());
    (0..pair_count)
        .map(|pair| {
            let home = next_real();
            let away = if pair < genuine {
                next_real()
            } else {
                Team::bye().participant()
            };
            (home, away)
        })
        .collect()
}

/// Build the matches of one bracket round from its pairs.
///
/// Ties involving a bye are auto-resolved and never get a second leg. Genuine ties get a
/// mirrored second leg sharing the match number when `double_leg` is set.
pub fn build_round(
    pairs: &[(Participant, Participant)],
    round: u32,
    first_match_number: u32,
    double_leg: bool,
) -> Vec<Match> {
    let name = round_name(pairs.len());
    let mut matches = Vec::with_capacity(pairs.len() * 2);
    for (offset, &(home, away)) in pairs.iter().enumerate() {
        let match_number = first_match_number + offset as u32;
        let mut first = Match::cup(match_number, round, name.clone(), Leg::First, home, away);
        if first.involves_bye() {
            first.resolve_as_bye();
            matches.push(first);
            continue;
        }
        matches.push(first);
        if double_leg {
            matches.push(Match::cup(match_number, round, name.clone(), Leg::Second, away, home));
        }
    }
    matches
}

/// Empty, locked shells for every round after `round` down to the final.
pub fn placeholder_rounds(
    round: u32,
    pair_count: usize,
    first_match_number: u32,
    double_leg: bool,
) -> Vec<Match> {
    let mut shells = Vec::new();
    let mut pairs = pair_count;
    let mut round = round;
    let mut match_number = first_match_number;
    while pairs > 1 {
        pairs /= 2;
        round += 1;
        let name = round_name(pairs);
        for _ in 0..pairs {
            shells.push(Match::placeholder(match_number, round, name.clone(), Leg::First));
            if double_leg {
                shells.push(Match::placeholder(match_number, round, name.clone(), Leg::Second));
            }
            match_number += 1;
        }
    }
    shells
}

/// Generate the full bracket: round 1 pairings plus placeholder shells for later rounds.
pub fn generate_cup_bracket(teams: &[Team], settings: &Settings) -> Vec<Match> {
    let pairs = seed_round_one(teams);
    if pairs.is_empty() {
        return Vec::new();
    }
    let mut matches = build_round(&pairs, 1, 1, settings.cup_double_leg);
    let next_number = pairs.len() as u32 + 1;
    matches.extend(placeholder_rounds(1, pairs.len(), next_number, settings.cup_double_leg));

    log::debug!(
        "Generated cup bracket for {} teams: {} round-one ties, {} matches total",
        teams.len(),
        pairs.len(),
        matches.len()
    );
    matches
}
