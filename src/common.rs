use std::fmt::Display;
use std::str::FromStr;

use crate::error::EliminationError;

pub type TeamId = usize;

// wins, losses and games left; signed so win caps below zero stay representable
pub type Games = i64;

#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum Method {
    MaxFlow,
    LinearProgramming,
}

impl Method {
    pub const ALL: [Method; 2] = [Method::MaxFlow, Method::LinearProgramming];
}

impl Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::MaxFlow => write!(f, "max-flow"),
            Method::LinearProgramming => write!(f, "linear-programming"),
        }
    }
}

impl FromStr for Method {
    type Err = EliminationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "maxflow" | "networkflows" | "flow" => Ok(Method::MaxFlow),
            "linearprogramming" | "lp" => Ok(Method::LinearProgramming),
            _ => Err(EliminationError::UnknownMethod(s.to_owned())),
        }
    }
}

// unordered pair of distinct teams, stored smaller id first
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Pair {
    pub a: TeamId,
    pub b: TeamId,
}

impl Pair {
    pub fn new(x: TeamId, y: TeamId) -> Self {
        assert!(x != y);
        if x < y {
            Pair { a: x, b: y }
        } else {
            Pair { a: y, b: x }
        }
    }
}

impl Display for Pair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.a, self.b)
    }
}
