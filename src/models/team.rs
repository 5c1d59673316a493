//! Team, Participant and TeamStanding data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (used in matches and lookups).
pub type TeamId = Uuid;

/// Whether a slot is held by a real team or by generator padding.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantKind {
    #[default]
    Real,
    Bye,
}

/// A team taking part in the competition.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub kind: ParticipantKind,
}

impl Team {
    /// Create a real team with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind: ParticipantKind::Real,
        }
    }

    /// Synthetic padding team. Never stored in `Competition::teams`.
    pub fn bye() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: "BYE".to_string(),
            kind: ParticipantKind::Bye,
        }
    }

    pub fn is_bye(&self) -> bool {
        self.kind == ParticipantKind::Bye
    }

    /// The slot reference used by matches.
    pub fn participant(&self) -> Participant {
        Participant {
            id: self.id,
            kind: self.kind,
        }
    }
}

/// A team reference inside a match slot.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: TeamId,
    pub kind: ParticipantKind,
}

impl Participant {
    pub fn real(id: TeamId) -> Self {
        Self {
            id,
            kind: ParticipantKind::Real,
        }
    }

    /// A fresh ghost bye with its own id.
    pub fn ghost() -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: ParticipantKind::Bye,
        }
    }

    pub fn is_bye(&self) -> bool {
        self.kind == ParticipantKind::Bye
    }
}

/// Outcome letter in a team's form log.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum FormResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "D")]
    Draw,
    #[serde(rename = "L")]
    Loss,
}

impl FormResult {
    pub fn letter(self) -> char {
        match self {
            FormResult::Win => 'W',
            FormResult::Draw => 'D',
            FormResult::Loss => 'L',
        }
    }
}

/// One row of the league table.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team_id: TeamId,
    pub name: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    /// Totals are u64 so summing any number of u32 scores cannot overflow.
    pub goals_for: u64,
    pub goals_against: u64,
    pub goal_difference: i64,
    pub points: u64,
    pub form: Vec<FormResult>,
}

impl TeamStanding {
    pub fn for_team(team: &Team) -> Self {
        Self {
            team_id: team.id,
            name: team.name.clone(),
            ..Self::default()
        }
    }

    /// Record one played match from this team's perspective.
    pub fn record(&mut self, scored: u32, conceded: u32, win_points: u32, draw_points: u32) {
        self.played += 1;
        self.goals_for += u64::from(scored);
        self.goals_against += u64::from(conceded);
        self.goal_difference = self.goals_for as i64 - self.goals_against as i64;
        let result = match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => {
                self.won += 1;
                self.points += u64::from(win_points);
                FormResult::Win
            }
            std::cmp::Ordering::Less => {
                self.lost += 1;
                FormResult::Loss
            }
            std::cmp::Ordering::Equal => {
                self.drawn += 1;
                self.points += u64::from(draw_points);
                FormResult::Draw
            }
        };
        self.form.push(result);
    }

    /// Form log as a string such as "WWDL".
    pub fn form_string(&self) -> String {
        self.form.iter().map(|f| f.letter()).collect()
    }
}
