use std::fmt::Display;

use log::{debug, trace};

use crate::common::{Method, TeamId};
use crate::division::DivisionModel;
use crate::error::Result;
use crate::flow::{max_flow, residual_teams, FlowSolver};
use crate::lp::{LpBackend, LpSolver, MinilpBackend};
use crate::network::FlowNetwork;
use crate::solver::FeasibilitySolver;
use crate::trivial::trivial_eliminator;

/// Why a team is out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Certificate {
    /// This rival already has more wins than the team can reach.
    Trivial { rival: TeamId },
    /// Between them these rivals must win more games than they can split
    /// without one of them passing the team.
    Subset { teams: Vec<TeamId> },
}

impl Certificate {
    pub fn teams(&self) -> Vec<TeamId> {
        match self {
            Certificate::Trivial { rival } => vec![*rival],
            Certificate::Subset { teams } => teams.clone(),
        }
    }
}

impl Display for Certificate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let teams: Vec<String> = self.teams().iter().map(|id| id.to_string()).collect();
        match self {
            Certificate::Trivial { .. } => write!(f, "trivially by {}", teams.join(", ")),
            Certificate::Subset { .. } => write!(f, "by {{{}}}", teams.join(", ")),
        }
    }
}

pub struct EliminationChecker<'a, B: LpBackend = MinilpBackend> {
    division: &'a DivisionModel,
    flow: FlowSolver,
    lp: LpSolver<B>,
}

impl<'a> EliminationChecker<'a, MinilpBackend> {
    pub fn new(division: &'a DivisionModel) -> Self {
        Self::with_lp_solver(division, LpSolver::new())
    }
}

impl<'a, B: LpBackend> EliminationChecker<'a, B> {
    pub fn with_lp_solver(division: &'a DivisionModel, lp: LpSolver<B>) -> Self {
        EliminationChecker {
            division,
            flow: FlowSolver,
            lp,
        }
    }

    pub fn division(&self) -> &DivisionModel {
        self.division
    }

    pub fn is_eliminated(&self, team: TeamId, method: Method) -> Result<bool> {
        if let Some(rival) = trivial_eliminator(self.division, team)? {
            trace!("team {} trivially eliminated by team {}", team, rival);
            return Ok(true);
        }
        let (network, _) = FlowNetwork::build(self.division, team)?;
        let eliminated = match method {
            Method::MaxFlow => self.flow.is_eliminated(&network)?,
            Method::LinearProgramming => self.lp.is_eliminated(&network)?,
        };
        debug!("team {} eliminated by {}: {}", team, method, eliminated);
        Ok(eliminated)
    }

    /// Same as [`is_eliminated`](Self::is_eliminated), with the method given by name.
    pub fn is_eliminated_by(&self, team: TeamId, method: &str) -> Result<bool> {
        self.is_eliminated(team, method.parse()?)
    }

    pub fn eliminated_teams(&self, method: Method) -> Result<Vec<TeamId>> {
        let mut out = Vec::new();
        for team in self.division.team_ids() {
            if self.is_eliminated(team, method)? {
                out.push(team);
            }
        }
        Ok(out)
    }

    /// `None` when `team` can still finish first.
    pub fn certificate(&self, team: TeamId) -> Result<Option<Certificate>> {
        if let Some(rival) = trivial_eliminator(self.division, team)? {
            return Ok(Some(Certificate::Trivial { rival }));
        }
        let (network, _) = FlowNetwork::build(self.division, team)?;
        let flow = max_flow(&network);
        if flow.value >= network.source_capacity() {
            return Ok(None);
        }
        Ok(Some(Certificate::Subset {
            teams: residual_teams(&network, &flow),
        }))
    }
}
