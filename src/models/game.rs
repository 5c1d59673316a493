//! Match (fixture), Leg and score fields for league and cup play.

use crate::models::team::{Participant, TeamId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Which leg of a tie this match is. League and single-leg cup matches are `First`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Leg {
    #[default]
    First,
    Second,
}

impl Leg {
    pub fn number(self) -> u8 {
        match self {
            Leg::First => 1,
            Leg::Second => 2,
        }
    }
}

/// Competition format this match belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    League,
    Cup,
}

/// A score or penalty field that the shell may edit.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreField {
    HomeScore,
    AwayScore,
    HomePen,
    AwayPen,
}

/// A single fixture.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// Shared by both legs of a cup tie.
    pub match_number: u32,
    /// Matchday (league) or bracket depth (cup), starting at 1.
    pub round: u32,
    pub round_name: String,
    #[serde(default)]
    pub leg: Leg,
    pub kind: MatchKind,
    /// None until a bracket placeholder is fed.
    pub home: Option<Participant>,
    pub away: Option<Participant>,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    #[serde(default)]
    pub home_pen: Option<u32>,
    #[serde(default)]
    pub away_pen: Option<u32>,
    pub is_played: bool,
    #[serde(default)]
    pub is_bye_match: bool,
    /// Locked matches reject score edits.
    #[serde(default)]
    pub locked: bool,
}

impl Match {
    fn blank(kind: MatchKind, match_number: u32, round: u32, round_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            match_number,
            round,
            round_name: round_name.into(),
            leg: Leg::First,
            kind,
            home: None,
            away: None,
            home_score: None,
            away_score: None,
            home_pen: None,
            away_pen: None,
            is_played: false,
            is_bye_match: false,
            locked: false,
        }
    }

    /// An unplayed league fixture.
    pub fn league(match_number: u32, round: u32, home: TeamId, away: TeamId) -> Self {
        Self {
            home: Some(Participant::real(home)),
            away: Some(Participant::real(away)),
            ..Self::blank(MatchKind::League, match_number, round, format!("Matchday {round}"))
        }
    }

    /// An unplayed cup match between two sides.
    pub fn cup(
        match_number: u32,
        round: u32,
        round_name: impl Into<String>,
        leg: Leg,
        home: Participant,
        away: Participant,
    ) -> Self {
        Self {
            leg,
            home: Some(home),
            away: Some(away),
            ..Self::blank(MatchKind::Cup, match_number, round, round_name)
        }
    }

    /// An empty, locked bracket slot waiting for the previous round's winners.
    pub fn placeholder(match_number: u32, round: u32, round_name: impl Into<String>, leg: Leg) -> Self {
        Self {
            leg,
            locked: true,
            ..Self::blank(MatchKind::Cup, match_number, round, round_name)
        }
    }

    /// Mark this match as an auto-resolved bye: the real side wins 3-0, a ghost pairing is 0-0.
    pub fn resolve_as_bye(&mut self) {
        let (home_score, away_score) = match (self.home_is_bye(), self.away_is_bye()) {
            (true, true) => (0, 0),
            (true, false) => (0, 3),
            _ => (3, 0),
        };
        self.home_score = Some(home_score);
        self.away_score = Some(away_score);
        self.home_pen = None;
        self.away_pen = None;
        self.is_played = true;
        self.is_bye_match = true;
        self.locked = true;
    }

    pub fn home_is_bye(&self) -> bool {
        self.home.is_some_and(|p| p.is_bye())
    }

    pub fn away_is_bye(&self) -> bool {
        self.away.is_some_and(|p| p.is_bye())
    }

    /// Either side is a bye.
    pub fn involves_bye(&self) -> bool {
        self.home_is_bye() || self.away_is_bye()
    }

    /// Both sides are byes: exists only to keep the bracket shape.
    pub fn is_ghost(&self) -> bool {
        self.home_is_bye() && self.away_is_bye()
    }

    /// Round label including the leg, e.g. "Semi Final (Leg 2)".
    pub fn display_name(&self) -> String {
        match (self.kind, self.leg) {
            (MatchKind::Cup, Leg::Second) => format!("{} (Leg 2)", self.round_name),
            _ => self.round_name.clone(),
        }
    }

    /// Both scores, when entered.
    pub fn score(&self) -> Option<(u32, u32)> {
        Some((self.home_score?, self.away_score?))
    }

    /// Both penalty scores, when entered.
    pub fn penalties(&self) -> Option<(u32, u32)> {
        Some((self.home_pen?, self.away_pen?))
    }

    /// Write one field and recompute `is_played`. Callers check `locked` first.
    pub fn set_field(&mut self, field: ScoreField, value: Option<u32>) {
        match field {
            ScoreField::HomeScore => self.home_score = value,
            ScoreField::AwayScore => self.away_score = value,
            ScoreField::HomePen => self.home_pen = value,
            ScoreField::AwayPen => self.away_pen = value,
        }
        if self.home_score.is_some() && self.away_score.is_some() {
            self.is_played = true;
        } else if !self.is_bye_match {
            self.is_played = false;
        }
    }

    /// Place two sides into this slot, swapping them for a second leg.
    pub fn feed(&mut self, home: Participant, away: Participant) {
        let (home, away) = match self.leg {
            Leg::First => (home, away),
            Leg::Second => (away, home),
        };
        self.home = Some(home);
        self.away = Some(away);
        self.home_score = None;
        self.away_score = None;
        self.home_pen = None;
        self.away_pen = None;
        self.is_played = false;
        self.is_bye_match = false;
        self.locked = false;
        if self.involves_bye() {
            self.resolve_as_bye();
        }
    }
}
