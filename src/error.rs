use std::path::PathBuf;

use thiserror::Error;

use crate::common::TeamId;

#[derive(Error, Debug)]
pub enum EliminationError {
    #[error("cannot read division file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed input on line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },

    #[error("team {0} does not exist in this division")]
    UnknownTeam(TeamId),

    #[error("unknown elimination method: {0:?}")]
    UnknownMethod(String),

    #[error("linear program has no feasible solution")]
    SolverInfeasible,

    #[error("linear program solver did not reach an optimum: {0}")]
    SolverNonconvergence(String),
}

impl EliminationError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        EliminationError::MalformedInput {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EliminationError>;
