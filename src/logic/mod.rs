//! Competition business logic: setup, league, cup, round progress, save/load.

mod advance;
mod cup;
mod league;
mod progress;
mod setup;
mod shuffle;
mod snapshot;
mod transfer;

pub use advance::{proceed_cup_round, RoundOutcome};
pub use cup::{build_round, generate_cup_bracket, placeholder_rounds, round_name, seed_round_one};
pub use league::{calculate_league_standings, generate_league_schedule};
pub use progress::{next_cup_round, standings, undo_last_round, update_score};
pub use setup::{shuffle_teams, start_competition, validate_setup, MIN_TEAMS};
pub use shuffle::{shuffle_array, shuffle_with};
pub use snapshot::{
    export_json, export_snapshot, import_json, import_snapshot, infer_current_round,
    SavedCompetition,
};
pub use transfer::{import_teams_csv, standings_to_csv, teams_from_csv};
