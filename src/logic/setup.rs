//! Setup phase: validate the team list and start the competition (Setup -> Active).

use crate::logic::cup::generate_cup_bracket;
use crate::logic::league::generate_league_schedule;
use crate::logic::shuffle::shuffle_array;
use crate::models::{
    Competition, CompetitionError, CompetitionType, Mode, ParticipantKind, SetupError, Team,
};
use std::collections::HashSet;

/// Fewest teams a competition can start with.
pub const MIN_TEAMS: usize = 2;

/// Check that a team list can start a competition.
///
/// Checks in order and reports the first failure: empty names, duplicate names
/// (trimmed, case-insensitive), fewer than two teams.
pub fn validate_setup(teams: &[Team]) -> Result<(), SetupError> {
    if teams.iter().any(|t| t.name.trim().is_empty()) {
        return Err(SetupError::EmptyName);
    }
    let mut seen = HashSet::new();
    for team in teams {
        if !seen.insert(team.name.trim().to_lowercase()) {
            return Err(SetupError::DuplicateName(team.name.trim().to_string()));
        }
    }
    if teams.len() < MIN_TEAMS {
        return Err(SetupError::NotEnoughTeams { required: MIN_TEAMS });
    }
    Ok(())
}

/// Randomize team order (Setup only). Cup pairings follow this order.
pub fn shuffle_teams(competition: &mut Competition) -> Result<(), CompetitionError> {
    if competition.mode != Mode::Setup {
        return Err(CompetitionError::InvalidState);
    }
    shuffle_array(&mut competition.teams);
    Ok(())
}

/// Start the competition: validate, generate fixtures, and switch to Active.
pub fn start_competition(competition: &mut Competition) -> Result<(), CompetitionError> {
    if competition.mode != Mode::Setup {
        return Err(CompetitionError::InvalidState);
    }
    if competition.name.trim().is_empty() {
        return Err(SetupError::EmptyCompetitionName.into());
    }
    validate_setup(&competition.teams)?;

    for team in &mut competition.teams {
        team.name = team.name.trim().to_string();
        team.kind = ParticipantKind::Real;
    }

    competition.matches = match competition.competition_type {
        CompetitionType::League => {
            generate_league_schedule(&competition.teams, competition.settings.double_leg)
        }
        CompetitionType::Cup => generate_cup_bracket(&competition.teams, &competition.settings),
    };
    competition.mode = Mode::Active;
    competition.current_round = 1;
    competition.cup_winner = None;
    competition.history.clear();

    log::info!(
        "Started {:?} \"{}\" with {} teams and {} matches",
        competition.competition_type,
        competition.name,
        competition.teams.len(),
        competition.matches.len()
    );
    Ok(())
}
