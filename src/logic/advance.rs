//! Cup round resolution: decide every tie of a round and seed the next one.

use crate::logic::cup::build_round;
use crate::models::{CompetitionError, Leg, Match, Participant, Settings, Team, TeamId};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Result of resolving a complete round.
#[derive(Clone, Debug, PartialEq)]
pub enum RoundOutcome {
    /// The round was the final.
    Champion(TeamId),
    /// Winners in bracket order (ghost-padded to an even count) and the matches built from them.
    NextRound {
        seeds: Vec<Participant>,
        matches: Vec<Match>,
    },
}

/// Both legs of one tie, grouped by match number.
#[derive(Default)]
struct Tie<'a> {
    match_number: u32,
    first: Option<&'a Match>,
    second: Option<&'a Match>,
}

fn group_ties(matches: &[Match]) -> Vec<Tie<'_>> {
    let mut ties: Vec<Tie<'_>> = Vec::new();
    let mut by_number: HashMap<u32, usize> = HashMap::new();
    for m in matches {
        let idx = *by_number.entry(m.match_number).or_insert_with(|| {
            ties.push(Tie {
                match_number: m.match_number,
                ..Tie::default()
            });
            ties.len() - 1
        });
        match m.leg {
            Leg::First => ties[idx].first = Some(m),
            Leg::Second => ties[idx].second = Some(m),
        }
    }
    ties
}

fn require_played(m: &Match) -> Result<(u32, u32), CompetitionError> {
    m.score()
        .filter(|_| m.is_played)
        .ok_or_else(|| CompetitionError::IncompleteRound {
            match_number: m.match_number,
            leg: m.leg.number(),
            round_name: m.round_name.clone(),
        })
}

/// Pick a side from (home, away) goals, falling back to a (home, away) shootout.
fn decide(
    match_number: u32,
    goals: (u64, u64),
    penalties: Option<(u32, u32)>,
    home: Participant,
    away: Participant,
) -> Result<Participant, CompetitionError> {
    match goals.0.cmp(&goals.1) {
        Ordering::Greater => return Ok(home),
        Ordering::Less => return Ok(away),
        Ordering::Equal => {}
    }
    match penalties.map(|(h, a)| h.cmp(&a)) {
        Some(Ordering::Greater) => Ok(home),
        Some(Ordering::Less) => Ok(away),
        _ => Err(CompetitionError::UndecidedTie {
            match_number,
            home_goals: goals.0,
            away_goals: goals.1,
        }),
    }
}

fn resolve_tie(tie: &Tie<'_>, settings: &Settings) -> Result<Participant, CompetitionError> {
    let first = tie.first.ok_or(CompetitionError::MissingLegData {
        match_number: tie.match_number,
    })?;
    let (home, away) = match (first.home, first.away) {
        (Some(home), Some(away)) => (home, away),
        // An unfed placeholder cannot be part of the round being resolved.
        _ => return Err(CompetitionError::InvalidState),
    };

    if home.is_bye() && away.is_bye() {
        return Ok(home);
    }
    if home.is_bye() {
        return Ok(away);
    }
    if away.is_bye() {
        return Ok(home);
    }

    match tie.second {
        None if settings.cup_double_leg => Err(CompetitionError::MissingLegData {
            match_number: tie.match_number,
        }),
        None => {
            let (home_goals, away_goals) = require_played(first)?;
            let goals = (u64::from(home_goals), u64::from(away_goals));
            decide(tie.match_number, goals, first.penalties(), home, away)
        }
        Some(second) => {
            let (l1_home, l1_away) = require_played(first)?;
            let (l2_home, l2_away) = require_played(second)?;
            // Leg 2 is played with sides swapped. Summed in u64 so any u32 score fits.
            let aggregate = (
                u64::from(l1_home) + u64::from(l2_away),
                u64::from(l1_away) + u64::from(l2_home),
            );
            let penalties = second
                .penalties()
                .map(|(h, a)| (a, h))
                .or_else(|| first.penalties());
            decide(tie.match_number, aggregate, penalties, home, away)
        }
    }
}

/// Resolve every tie of the current round.
///
/// Ghost ties advance their ghost, bye ties advance the real side, genuine ties need every
/// leg played and a decisive score, aggregate, or shootout. Ghost winners are then dropped;
/// one real winner left means a champion. Otherwise an odd winner count is padded with a
/// single ghost and the winners are paired in order into the next round's matches.
pub fn proceed_cup_round(
    current_round_matches: &[Match],
    teams: &[Team],
    settings: &Settings,
) -> Result<RoundOutcome, CompetitionError> {
    if current_round_matches.is_empty() {
        return Err(CompetitionError::InvalidState);
    }

    let mut winners = Vec::new();
    for tie in group_ties(current_round_matches) {
        winners.push(resolve_tie(&tie, settings)?);
    }

    let mut seeds: Vec<Participant> = winners.into_iter().filter(|w| !w.is_bye()).collect();
    if let Some(unknown) = seeds.iter().find(|s| !teams.iter().any(|t| t.id == s.id)) {
        return Err(CompetitionError::TeamNotFound(unknown.id));
    }
    match seeds.len() {
        0 => return Err(CompetitionError::InvalidState),
        1 => return Ok(RoundOutcome::Champion(seeds[0].id)),
        n if n % 2 == 1 => {
            log::warn!("Odd number of winners ({n}); padding next round with a ghost bye");
            seeds.push(Participant::ghost());
        }
        _ => {}
    }

    let pairs: Vec<(Participant, Participant)> =
        seeds.chunks_exact(2).map(|p| (p[0], p[1])).collect();
    let round = current_round_matches.iter().map(|m| m.round).max().unwrap_or(0) + 1;
    let first_number = current_round_matches
        .iter()
        .map(|m| m.match_number)
        .max()
        .unwrap_or(0)
        + 1;
    let matches = build_round(&pairs, round, first_number, settings.cup_double_leg);
    Ok(RoundOutcome::NextRound { seeds, matches })
}
