//! Mathematical elimination for a sports division.
//!
//! A team is eliminated when no outcome of the remaining games lets it finish
//! with at least as many wins as every other team. Besides the trivial check
//! (a rival already has more wins than the team can reach), elimination is
//! decided on a flow network built per query, either by exact max-flow or by
//! the equivalent linear program.
//!
//! ```no_run
//! use baseball_elimination::{DivisionModel, EliminationChecker, Method};
//!
//! let division = DivisionModel::from_path("data/teams4.txt")?;
//! let checker = EliminationChecker::new(&division);
//! for team in division.teams() {
//!     println!("{}: Eliminated? {}", team.name, checker.is_eliminated(team.id, Method::MaxFlow)?);
//! }
//! # Ok::<(), baseball_elimination::EliminationError>(())
//! ```

pub mod checker;
pub mod common;
pub mod division;
pub mod error;
pub mod flow;
pub mod lp;
pub mod network;
pub mod solver;
pub mod team;
pub mod trivial;

#[cfg(test)]
mod fixtures;

pub use checker::{Certificate, EliminationChecker};
pub use common::{Games, Method, Pair, TeamId};
pub use division::DivisionModel;
pub use error::{EliminationError, Result};
pub use flow::FlowSolver;
pub use lp::{LinearProgram, LpBackend, LpSolver, MinilpBackend};
pub use network::{FlowNetwork, Node, SaturatedEdges};
pub use solver::FeasibilitySolver;
pub use team::TeamRecord;
pub use trivial::{is_trivially_eliminated, trivial_eliminator};
