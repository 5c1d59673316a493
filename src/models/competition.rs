//! Competition state, settings and errors.

use crate::models::game::{Match, MatchId};
use crate::models::team::{Team, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Reasons a team list cannot start a competition.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum SetupError {
    #[error("Every team needs a name")]
    EmptyName,
    /// Carries the offending name as typed.
    #[error("Team name \"{0}\" is used more than once")]
    DuplicateName(String),
    #[error("Need at least {required} teams to start")]
    NotEnoughTeams { required: usize },
    #[error("The competition needs a name")]
    EmptyCompetitionName,
}

/// Errors that can occur during competition operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum CompetitionError {
    #[error(transparent)]
    SetupInvalid(#[from] SetupError),
    /// A genuine tie has a leg without a result.
    #[error("Match {match_number} (leg {leg}) of {round_name} has not been played yet")]
    IncompleteRound {
        match_number: u32,
        leg: u8,
        round_name: String,
    },
    /// Scores (or aggregate) are level and no decisive shootout was entered.
    #[error("Match {match_number} is tied {home_goals}-{away_goals}; enter the penalty shootout result")]
    UndecidedTie {
        match_number: u32,
        home_goals: u64,
        away_goals: u64,
    },
    #[error("Leg 2 of match {match_number} is missing")]
    MissingLegData { match_number: u32 },
    #[error("Invalid state for this action")]
    InvalidState,
    #[error("Match not found")]
    MatchNotFound(MatchId),
    #[error("Match {match_number} is locked")]
    MatchLocked { match_number: u32 },
    #[error("Team not found")]
    TeamNotFound(TeamId),
    #[error("No round to undo")]
    NothingToUndo,
    #[error("Corrupt file: {0}")]
    CorruptFile(String),
    #[error("CSV error: {0}")]
    Csv(String),
}

/// Unique identifier for a competition.
pub type CompetitionId = Uuid;

/// Lifecycle phase.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Editing teams and settings; nothing generated yet.
    #[default]
    Setup,
    /// Fixtures exist; scores are being entered.
    Active,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionType {
    #[default]
    League,
    Cup,
}

/// Scoring and format rules.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub win_points: u32,
    pub draw_points: u32,
    /// League: play every opponent home and away.
    pub double_leg: bool,
    /// Cup: every genuine tie has two legs.
    pub cup_double_leg: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            win_points: 3,
            draw_points: 1,
            double_leg: true,
            cup_double_leg: false,
        }
    }
}

/// Match list as it was right before a round advance.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub matches: Vec<Match>,
    pub current_round: u32,
    pub cup_winner: Option<String>,
}

/// Full competition state: teams, matches, settings and phase.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Competition {
    pub id: CompetitionId,
    pub name: String,
    pub mode: Mode,
    pub competition_type: CompetitionType,
    pub teams: Vec<Team>,
    pub settings: Settings,
    pub matches: Vec<Match>,
    /// Cup round currently collecting scores.
    pub current_round: u32,
    /// Champion's name once the final has been resolved.
    pub cup_winner: Option<String>,
    /// One entry per round advance, popped by undo.
    pub history: Vec<RoundSnapshot>,
    pub created_at: DateTime<Utc>,
}

impl Competition {
    /// Create a new competition in Setup mode with no teams.
    pub fn new(name: impl Into<String>, competition_type: CompetitionType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            mode: Mode::Setup,
            competition_type,
            teams: Vec::new(),
            settings: Settings::default(),
            matches: Vec::new(),
            current_round: 1,
            cup_winner: None,
            history: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Create a competition with initial teams. Still in Setup until started.
    pub fn with_teams(
        name: impl Into<String>,
        competition_type: CompetitionType,
        teams: Vec<Team>,
        settings: Settings,
    ) -> Self {
        Self {
            teams,
            settings,
            ..Self::new(name, competition_type)
        }
    }

    fn require_setup(&self) -> Result<(), CompetitionError> {
        if self.mode != Mode::Setup {
            return Err(CompetitionError::InvalidState);
        }
        Ok(())
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn get_match(&self, id: MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    /// Add a team (Setup only). Names are checked when the competition starts.
    pub fn add_team(&mut self, name: impl Into<String>) -> Result<TeamId, CompetitionError> {
        self.require_setup()?;
        let team = Team::new(name);
        let id = team.id;
        self.teams.push(team);
        Ok(id)
    }

    /// Add a team named "Team N", N one above the highest existing "Team <number>".
    pub fn add_default_team(&mut self) -> Result<TeamId, CompetitionError> {
        let highest = self
            .teams
            .iter()
            .filter_map(|t| default_team_number(&t.name))
            .max()
            .unwrap_or(0);
        self.add_team(format!("Team {}", highest + 1))
    }

    /// Rename a team (Setup only).
    pub fn rename_team(&mut self, team_id: TeamId, name: impl Into<String>) -> Result<(), CompetitionError> {
        self.require_setup()?;
        let team = self
            .teams
            .iter_mut()
            .find(|t| t.id == team_id)
            .ok_or(CompetitionError::TeamNotFound(team_id))?;
        team.name = name.into();
        Ok(())
    }

    /// Remove a team by id (Setup only).
    pub fn remove_team(&mut self, team_id: TeamId) -> Result<(), CompetitionError> {
        self.require_setup()?;
        let idx = self
            .teams
            .iter()
            .position(|t| t.id == team_id)
            .ok_or(CompetitionError::TeamNotFound(team_id))?;
        self.teams.remove(idx);
        Ok(())
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), CompetitionError> {
        self.require_setup()?;
        self.name = name.into();
        Ok(())
    }

    pub fn set_competition_type(&mut self, competition_type: CompetitionType) -> Result<(), CompetitionError> {
        self.require_setup()?;
        self.competition_type = competition_type;
        Ok(())
    }

    pub fn set_settings(&mut self, settings: Settings) -> Result<(), CompetitionError> {
        self.require_setup()?;
        self.settings = settings;
        Ok(())
    }

    /// Back to Setup with the same teams, name and settings. Matches, winner and history are dropped.
    pub fn reset(&mut self) {
        self.mode = Mode::Setup;
        self.matches.clear();
        self.current_round = 1;
        self.cup_winner = None;
        self.history.clear();
    }

    /// True once a cup champion has been declared.
    pub fn is_finished(&self) -> bool {
        self.cup_winner.is_some()
    }
}

fn default_team_number(name: &str) -> Option<u32> {
    let mut parts = name.split_whitespace();
    let prefix = parts.next()?;
    let number = parts.next()?;
    if parts.next().is_some() || !prefix.eq_ignore_ascii_case("team") {
        return None;
    }
    number.parse().ok()
}
