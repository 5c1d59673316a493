//! League and cup competition manager: library with models and business logic.

pub mod logic;
pub mod models;

pub use logic::{
    build_round, calculate_league_standings, export_json, export_snapshot, generate_cup_bracket,
    generate_league_schedule, import_json, import_snapshot, import_teams_csv, infer_current_round,
    next_cup_round, placeholder_rounds, proceed_cup_round, round_name, seed_round_one,
    shuffle_array, shuffle_teams, shuffle_with, standings, standings_to_csv, start_competition,
    teams_from_csv, undo_last_round, update_score, validate_setup, RoundOutcome,
    SavedCompetition, MIN_TEAMS,
};
pub use models::{
    Competition, CompetitionError, CompetitionId, CompetitionType, FormResult, Leg, Match,
    MatchId, MatchKind, Mode, Participant, ParticipantKind, RoundSnapshot, ScoreField, Settings,
    SetupError, Team, TeamId, TeamStanding,
};
