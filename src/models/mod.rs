//! Data structures for league and cup competitions: teams, matches, competition state.

mod competition;
mod game;
mod team;

pub use competition::{
    Competition, CompetitionError, CompetitionId, CompetitionType, Mode, RoundSnapshot, Settings,
    SetupError,
};
pub use game::{Leg, Match, MatchId, MatchKind, ScoreField};
pub use team::{FormResult, Participant, ParticipantKind, Team, TeamId, TeamStanding};
