use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::debug;

use crate::common::{Games, TeamId};
use crate::error::{EliminationError, Result};
use crate::team::TeamRecord;

/// All teams of one division, indexed by id in file order.
///
/// Read-only once loaded; queries borrow it and build their own networks.
#[derive(Clone, Debug, Default)]
pub struct DivisionModel {
    teams: Vec<TeamRecord>,
}

impl DivisionModel {
    /// Builds a division from already constructed records, checking that ids are
    /// contiguous and that the schedule is symmetric.
    pub fn new(teams: Vec<TeamRecord>) -> Result<Self> {
        // as if read from a file with no blank lines
        let lines: Vec<usize> = (0..teams.len()).map(|id| id + 2).collect();
        Self::with_lines(teams, &lines)
    }

    // lines[id] is the source line team id was read from
    fn with_lines(teams: Vec<TeamRecord>, lines: &[usize]) -> Result<Self> {
        let division = DivisionModel { teams };
        division.validate(lines)?;
        Ok(division)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| EliminationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let division: DivisionModel = text.parse()?;
        debug!("loaded {} teams from {}", division.len(), path.display());
        Ok(division)
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn team(&self, id: TeamId) -> Result<&TeamRecord> {
        self.teams.get(id).ok_or(EliminationError::UnknownTeam(id))
    }

    pub fn teams(&self) -> impl Iterator<Item = &TeamRecord> + '_ {
        self.teams.iter()
    }

    pub fn team_ids(&self) -> impl Iterator<Item = TeamId> {
        0..self.teams.len()
    }

    pub fn find(&self, name: &str) -> Option<TeamId> {
        self.teams.iter().position(|team| team.name == name)
    }

    pub fn get_against(&self, team: TeamId, opponent: TeamId) -> Result<Games> {
        self.team(opponent)?;
        self.team(team)?.against(opponent)
    }

    /// Games left among every team except `excluded`.
    pub fn games_left_without(&self, excluded: TeamId) -> Games {
        let mut total = 0;
        for a in self.team_ids().filter(|&a| a != excluded) {
            for b in (a + 1..self.len()).filter(|&b| b != excluded) {
                total += self.teams[a].against[b];
            }
        }
        total
    }

    fn validate(&self, lines: &[usize]) -> Result<()> {
        let n = self.teams.len();
        // every win total and network capacity stays below n * total
        let mut total: Games = 0;
        for (id, team) in self.teams.iter().enumerate() {
            let line = lines[id];
            if team.id != id {
                return Err(EliminationError::malformed(
                    line,
                    format!("team {} has id {}, expected {}", team.name, team.id, id),
                ));
            }
            if team.against.len() != n {
                return Err(EliminationError::malformed(
                    line,
                    format!(
                        "{} lists games against {} teams, division has {}",
                        team.name,
                        team.against.len(),
                        n
                    ),
                ));
            }
            if team.wins < 0 || team.losses < 0 || team.remaining < 0 {
                return Err(EliminationError::malformed(line, "negative game count"));
            }
            if team.against[id] != 0 {
                return Err(EliminationError::malformed(
                    line,
                    format!("{} has games left against itself", team.name),
                ));
            }
            let best = team.wins.checked_add(team.remaining);
            let scheduled = team
                .against
                .iter()
                .try_fold(0 as Games, |acc, &games| acc.checked_add(games));
            total = match (best, scheduled, total.checked_add(best.unwrap_or(Games::MAX))) {
                (Some(_), Some(_), Some(total)) => total,
                _ => return Err(EliminationError::malformed(line, "game counts too large")),
            };
            if team.division_games() > team.remaining {
                return Err(EliminationError::malformed(
                    line,
                    format!(
                        "{} has {} division games left but only {} remaining",
                        team.name,
                        team.division_games(),
                        team.remaining
                    ),
                ));
            }
        }
        if total.checked_mul(n.max(1) as Games).is_none() {
            return Err(EliminationError::malformed(
                lines.last().copied().unwrap_or(1),
                "game counts too large",
            ));
        }
        for a in 0..n {
            for b in a + 1..n {
                let (ab, ba) = (self.teams[a].against[b], self.teams[b].against[a]);
                if ab < 0 || ab != ba {
                    return Err(EliminationError::malformed(
                        lines[b],
                        format!(
                            "asymmetric schedule: {} vs {} lists {} games, reverse lists {}",
                            self.teams[a].name, self.teams[b].name, ab, ba
                        ),
                    ));
                }
            }
        }
        Ok(())
    }
}

fn parse_count(token: &str, line: usize, column: &str) -> Result<Games> {
    let value: Games = token.parse().map_err(|_| {
        EliminationError::malformed(line, format!("{} must be an integer, found {:?}", column, token))
    })?;
    if value < 0 {
        return Err(EliminationError::malformed(
            line,
            format!("{} must not be negative, found {}", column, value),
        ));
    }
    Ok(value)
}

impl FromStr for DivisionModel {
    type Err = EliminationError;

    // first line is a header (team count) and is skipped, one team per following line:
    // name wins losses remaining g_0 .. g_{n-1}
    fn from_str(s: &str) -> Result<Self> {
        let mut lines = s.lines().enumerate();
        if lines.next().is_none() {
            return Err(EliminationError::malformed(1, "missing header line"));
        }
        let rows: Vec<(usize, Vec<&str>)> = lines
            .map(|(index, line)| (index + 1, line.split_whitespace().collect::<Vec<_>>()))
            .filter(|(_, tokens)| !tokens.is_empty())
            .collect();
        let n = rows.len();
        let mut teams = Vec::with_capacity(n);
        let mut lines = Vec::with_capacity(n);
        for (id, (line, tokens)) in rows.into_iter().enumerate() {
            lines.push(line);
            if tokens.len() != n + 4 {
                return Err(EliminationError::malformed(
                    line,
                    format!("expected {} columns, found {}", n + 4, tokens.len()),
                ));
            }
            let against = tokens[4..]
                .iter()
                .map(|token| parse_count(token, line, "games against"))
                .collect::<Result<Vec<_>>>()?;
            teams.push(TeamRecord::new(
                id,
                tokens[0],
                parse_count(tokens[1], line, "wins")?,
                parse_count(tokens[2], line, "losses")?,
                parse_count(tokens[3], line, "remaining")?,
                against,
            ));
        }
        DivisionModel::with_lines(teams, &lines)
    }
}

impl Display for DivisionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for team in &self.teams {
            writeln!(f, "{}: {} ", team.id, team)?;
        }
        Ok(())
    }
}
