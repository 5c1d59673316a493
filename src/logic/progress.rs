//! Active phase: score entry, standings, cup round advancement and undo.

use crate::logic::advance::{proceed_cup_round, RoundOutcome};
use crate::logic::cup::placeholder_rounds;
use crate::logic::league::calculate_league_standings;
use crate::models::{
    Competition, CompetitionError, CompetitionType, Leg, Match, MatchId, Mode, Participant,
    RoundSnapshot, ScoreField, TeamStanding,
};
use std::collections::BTreeSet;

/// Set or clear one score/penalty field of a match. Locked matches are rejected.
pub fn update_score(
    competition: &mut Competition,
    match_id: MatchId,
    field: ScoreField,
    value: Option<u32>,
) -> Result<(), CompetitionError> {
    if competition.mode != Mode::Active {
        return Err(CompetitionError::InvalidState);
    }
    let m = competition
        .matches
        .iter_mut()
        .find(|m| m.id == match_id)
        .ok_or(CompetitionError::MatchNotFound(match_id))?;
    if m.locked {
        return Err(CompetitionError::MatchLocked {
            match_number: m.match_number,
        });
    }
    m.set_field(field, value);
    Ok(())
}

/// Current league table (league competitions only).
pub fn standings(competition: &Competition) -> Result<Vec<TeamStanding>, CompetitionError> {
    if competition.competition_type != CompetitionType::League {
        return Err(CompetitionError::InvalidState);
    }
    Ok(calculate_league_standings(
        &competition.teams,
        &competition.matches,
        &competition.settings,
    ))
}

/// A resolved round with the champion's name already looked up.
enum Advance {
    Champion(String),
    NextRound {
        seeds: Vec<Participant>,
        matches: Vec<Match>,
    },
}

/// Resolve the current cup round and either crown the champion or feed the next round.
///
/// Nothing changes when resolution fails. On success the prior match list is pushed onto
/// the undo history and the resolved round is locked.
pub fn next_cup_round(competition: &mut Competition) -> Result<(), CompetitionError> {
    if competition.mode != Mode::Active
        || competition.competition_type != CompetitionType::Cup
        || competition.is_finished()
    {
        return Err(CompetitionError::InvalidState);
    }

    let current_round = competition.current_round;
    let current: Vec<Match> = competition
        .matches
        .iter()
        .filter(|m| m.round == current_round)
        .cloned()
        .collect();
    let advance = match proceed_cup_round(&current, &competition.teams, &competition.settings)? {
        RoundOutcome::Champion(team_id) => Advance::Champion(
            competition
                .team(team_id)
                .map(|t| t.name.clone())
                .ok_or(CompetitionError::TeamNotFound(team_id))?,
        ),
        RoundOutcome::NextRound { seeds, matches } => Advance::NextRound { seeds, matches },
    };

    competition.history.push(RoundSnapshot {
        matches: competition.matches.clone(),
        current_round,
        cup_winner: competition.cup_winner.clone(),
    });

    match advance {
        Advance::Champion(name) => {
            for m in &mut competition.matches {
                m.locked = true;
            }
            log::info!("Cup \"{}\" won by {}", competition.name, name);
            competition.cup_winner = Some(name);
        }
        Advance::NextRound { seeds, matches } => {
            for m in competition.matches.iter_mut().filter(|m| m.round == current_round) {
                m.locked = true;
            }
            let next_round = current_round + 1;
            if !feed_placeholders(competition, next_round, &seeds) {
                replace_later_rounds(competition, current_round, matches);
            }
            competition.current_round = next_round;
            log::info!(
                "Cup \"{}\" advanced to round {} with {} teams",
                competition.name,
                next_round,
                seeds.iter().filter(|s| !s.is_bye()).count()
            );
        }
    }
    Ok(())
}

/// Fill the next round's shells with `seeds`. Returns false when the shells do not fit.
fn feed_placeholders(competition: &mut Competition, round: u32, seeds: &[Participant]) -> bool {
    let shells: Vec<&Match> = competition.matches.iter().filter(|m| m.round == round).collect();
    let numbers: BTreeSet<u32> = shells.iter().map(|m| m.match_number).collect();
    let unfed = shells.iter().all(|m| m.home.is_none() && m.away.is_none());
    if shells.is_empty() || !unfed || numbers.len() * 2 != seeds.len() {
        return false;
    }

    for (pair, number) in seeds.chunks_exact(2).zip(numbers) {
        let (home, away) = (pair[0], pair[1]);
        if home.is_bye() || away.is_bye() {
            // A bye tie has nothing to play twice.
            competition
                .matches
                .retain(|m| !(m.round == round && m.match_number == number && m.leg == Leg::Second));
        }
        for m in competition
            .matches
            .iter_mut()
            .filter(|m| m.round == round && m.match_number == number)
        {
            m.feed(home, away);
        }
    }
    true
}

/// Drop every round after `current_round` and rebuild from the freshly paired round.
fn replace_later_rounds(competition: &mut Competition, current_round: u32, next: Vec<Match>) {
    log::debug!("Rebuilding bracket after round {current_round}");
    competition.matches.retain(|m| m.round <= current_round);
    let pair_count = next.iter().filter(|m| m.leg == Leg::First).count();
    let next_number = next.iter().map(|m| m.match_number).max().unwrap_or(0) + 1;
    competition.matches.extend(next);
    competition.matches.extend(placeholder_rounds(
        current_round + 1,
        pair_count,
        next_number,
        competition.settings.cup_double_leg,
    ));
}

/// Restore the match list from right before the most recent round advance.
pub fn undo_last_round(competition: &mut Competition) -> Result<(), CompetitionError> {
    let snapshot = competition
        .history
        .pop()
        .ok_or(CompetitionError::NothingToUndo)?;
    competition.matches = snapshot.matches;
    competition.current_round = snapshot.current_round;
    competition.cup_winner = snapshot.cup_winner;
    log::info!(
        "Cup \"{}\" rolled back to round {}",
        competition.name,
        competition.current_round
    );
    Ok(())
}
