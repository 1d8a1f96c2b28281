use std::fmt::Display;

use crate::common::{Games, TeamId};
use crate::error::{EliminationError, Result};

/// One team's standing at the time the division file was written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamRecord {
    pub id: TeamId,
    pub name: String,
    pub wins: Games,
    pub losses: Games,
    /// Games left this season, including any against teams outside the division.
    pub remaining: Games,
    /// Games left against each division team, indexed by opponent id.
    pub against: Vec<Games>,
}

impl TeamRecord {
    pub fn new(
        id: TeamId,
        name: impl Into<String>,
        wins: Games,
        losses: Games,
        remaining: Games,
        against: Vec<Games>,
    ) -> Self {
        TeamRecord {
            id,
            name: name.into(),
            wins,
            losses,
            remaining,
            against,
        }
    }

    pub fn against(&self, opponent: TeamId) -> Result<Games> {
        self.against
            .get(opponent)
            .copied()
            .ok_or(EliminationError::UnknownTeam(opponent))
    }

    /// Most wins this team can still finish with.
    pub fn max_wins(&self) -> Games {
        self.wins + self.remaining
    }

    pub fn division_games(&self) -> Games {
        self.against.iter().sum()
    }
}

impl Display for TeamRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} \t {} wins \t {} losses \t {} remaining",
            self.name, self.wins, self.losses, self.remaining
        )
    }
}
