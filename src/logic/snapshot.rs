//! Save/load: a flat JSON snapshot of the whole competition.

use crate::models::{
    Competition, CompetitionError, CompetitionType, Match, Mode, Settings, Team,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// File shape shared with the shell's download/upload.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCompetition {
    pub competition_name: String,
    pub teams: Vec<Team>,
    pub settings: Settings,
    pub matches: Vec<Match>,
    pub mode: Mode,
    #[serde(default)]
    pub competition_type: CompetitionType,
    #[serde(default)]
    pub cup_winner: Option<String>,
    #[serde(default)]
    pub current_round: Option<u32>,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

/// Capture everything but the undo history.
pub fn export_snapshot(competition: &Competition) -> SavedCompetition {
    SavedCompetition {
        competition_name: competition.name.clone(),
        teams: competition.teams.clone(),
        settings: competition.settings,
        matches: competition.matches.clone(),
        mode: competition.mode,
        competition_type: competition.competition_type,
        cup_winner: competition.cup_winner.clone(),
        current_round: Some(competition.current_round),
        saved_at: Some(Utc::now()),
    }
}

pub fn export_json(competition: &Competition) -> Result<String, CompetitionError> {
    serde_json::to_string_pretty(&export_snapshot(competition))
        .map_err(|e| CompetitionError::CorruptFile(e.to_string()))
}

/// Rebuild a competition from a snapshot. The undo history starts empty.
pub fn import_snapshot(saved: SavedCompetition) -> Competition {
    let current_round = saved
        .current_round
        .filter(|r| *r > 0)
        .unwrap_or_else(|| infer_current_round(&saved.matches));
    Competition {
        id: Uuid::new_v4(),
        name: saved.competition_name,
        mode: saved.mode,
        competition_type: saved.competition_type,
        teams: saved.teams,
        settings: saved.settings,
        matches: saved.matches,
        current_round,
        cup_winner: saved.cup_winner,
        history: Vec::new(),
        created_at: saved.saved_at.unwrap_or_else(Utc::now),
    }
}

/// Parse a saved file. Any parse failure is reported as a corrupt file; nothing is recovered.
pub fn import_json(json: &str) -> Result<Competition, CompetitionError> {
    let saved: SavedCompetition =
        serde_json::from_str(json).map_err(|e| CompetitionError::CorruptFile(e.to_string()))?;
    Ok(import_snapshot(saved))
}

/// Highest round that still has an unlocked match with teams in it, or 1.
pub fn infer_current_round(matches: &[Match]) -> u32 {
    matches
        .iter()
        .filter(|m| !m.locked && m.home.is_some())
        .map(|m| m.round)
        .max()
        .unwrap_or(1)
}
