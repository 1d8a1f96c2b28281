//! The elimination network written out as an explicit linear program.
//!
//! Variables: flow on every edge (bounded by its capacity) plus the total flow `F`.
//! Constraints: conservation at pair and team nodes, source outflow == F,
//! sink inflow == F. Objective: maximize F.

use log::debug;
use minilp::{ComparisonOp, OptimizationDirection, Problem, Variable};

use crate::error::{EliminationError, Result};
use crate::network::{FlowNetwork, Node};
use crate::solver::FeasibilitySolver;

pub const TOLERANCE: f64 = 1e-3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    Eq,
    Le,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinearConstraint {
    // sum(coeff * x[var]) <relation> rhs
    pub terms: Vec<(usize, f64)>,
    pub relation: Relation,
    pub rhs: f64,
}

#[derive(Clone, Debug)]
pub struct LinearProgram {
    pub objective: Vec<f64>,
    pub bounds: Vec<(f64, f64)>,
    pub constraints: Vec<LinearConstraint>,
    pub total_flow: usize,
}

impl LinearProgram {
    /// Variable `i` is the flow on edge `i` of the network; the last one is `F`.
    pub fn from_network(network: &FlowNetwork) -> Self {
        let mut bounds: Vec<(f64, f64)> = network
            .graph()
            .edge_weights()
            .map(|&cap| (0.0, cap as f64))
            .collect();
        let total_flow = bounds.len();
        bounds.push((0.0, f64::INFINITY));
        let mut objective = vec![0.0; bounds.len()];
        objective[total_flow] = 1.0;

        let mut constraints = Vec::with_capacity(network.node_count());
        for node in network.nodes() {
            let inflow = network.incoming(node).map(|edge| (edge.index(), 1.0));
            let outflow = network.outgoing(node).map(|edge| (edge.index(), -1.0));
            let terms: Vec<(usize, f64)> = match network.node(node) {
                Node::Source => network
                    .outgoing(node)
                    .map(|edge| (edge.index(), 1.0))
                    .chain([(total_flow, -1.0)])
                    .collect(),
                Node::Sink => inflow.chain([(total_flow, -1.0)]).collect(),
                Node::Pair(_) | Node::Team(_) => inflow.chain(outflow).collect(),
            };
            constraints.push(LinearConstraint {
                terms,
                relation: Relation::Eq,
                rhs: 0.0,
            });
        }
        LinearProgram {
            objective,
            bounds,
            constraints,
            total_flow,
        }
    }

    pub fn variable_count(&self) -> usize {
        self.bounds.len()
    }

    /// Upper bounds as `x <= cap` rows, for backends without per-variable bounds.
    pub fn bound_constraints(&self) -> Vec<LinearConstraint> {
        self.bounds
            .iter()
            .enumerate()
            .filter(|(_, (_, upper))| upper.is_finite())
            .map(|(var, &(_, upper))| LinearConstraint {
                terms: vec![(var, 1.0)],
                relation: Relation::Le,
                rhs: upper,
            })
            .collect()
    }
}

/// Anything that can maximize a [`LinearProgram`] and report the optimal objective.
pub trait LpBackend {
    fn maximize(&self, program: &LinearProgram) -> Result<f64>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MinilpBackend {
    /// State capacities as constraint rows instead of variable bounds.
    pub explicit_bounds: bool,
}

impl LpBackend for MinilpBackend {
    fn maximize(&self, program: &LinearProgram) -> Result<f64> {
        let mut problem = Problem::new(OptimizationDirection::Maximize);
        let vars: Vec<Variable> = program
            .objective
            .iter()
            .zip(&program.bounds)
            .map(|(&coeff, &(lower, upper))| {
                let upper = if self.explicit_bounds { f64::INFINITY } else { upper };
                problem.add_var(coeff, (lower, upper))
            })
            .collect();
        let bound_rows = if self.explicit_bounds {
            program.bound_constraints()
        } else {
            vec![]
        };
        for constraint in program.constraints.iter().chain(&bound_rows) {
            let terms: Vec<(Variable, f64)> = constraint
                .terms
                .iter()
                .map(|&(var, coeff)| (vars[var], coeff))
                .collect();
            let op = match constraint.relation {
                Relation::Eq => ComparisonOp::Eq,
                Relation::Le => ComparisonOp::Le,
            };
            problem.add_constraint(terms.as_slice(), op, constraint.rhs);
        }
        match problem.solve() {
            Ok(solution) => Ok(solution.objective()),
            Err(minilp::Error::Infeasible) => Err(EliminationError::SolverInfeasible),
            Err(err) => Err(EliminationError::SolverNonconvergence(err.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct LpSolver<B: LpBackend = MinilpBackend> {
    backend: B,
    tolerance: f64,
}

impl LpSolver<MinilpBackend> {
    pub fn new() -> Self {
        Self::with_backend(MinilpBackend::default())
    }
}

impl Default for LpSolver<MinilpBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: LpBackend> LpSolver<B> {
    pub fn with_backend(backend: B) -> Self {
        LpSolver {
            backend,
            tolerance: TOLERANCE,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn max_flow_value(&self, network: &FlowNetwork) -> Result<f64> {
        let program = LinearProgram::from_network(network);
        self.backend.maximize(&program)
    }
}

impl<B: LpBackend> FeasibilitySolver for LpSolver<B> {
    fn is_eliminated(&self, network: &FlowNetwork) -> Result<bool> {
        if network.has_negative_capacity() {
            return Ok(true);
        }
        let value = self.max_flow_value(network)?;
        let limit = network.source_capacity() as f64;
        debug!(
            "team {}: lp optimum {:.4} of {} games",
            network.target(),
            value,
            limit
        );
        Ok(value + self.tolerance < limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{division, TEAMS4, TEAMS5};

    struct Fixed(Result<f64>);

    impl LpBackend for Fixed {
        fn maximize(&self, _: &LinearProgram) -> Result<f64> {
            match &self.0 {
                Ok(value) => Ok(*value),
                Err(EliminationError::SolverInfeasible) => Err(EliminationError::SolverInfeasible),
                Err(err) => Err(EliminationError::SolverNonconvergence(err.to_string())),
            }
        }
    }

    #[test]
    fn test_program_shape() {
        let division = division(TEAMS4);
        let (network, _) = FlowNetwork::build(&division, 1).unwrap();
        let program = LinearProgram::from_network(&network);
        assert_eq!(program.variable_count(), network.edge_count() + 1);
        assert_eq!(program.total_flow, network.edge_count());
        assert_eq!(program.constraints.len(), network.node_count());
        assert_eq!(program.objective.iter().sum::<f64>(), 1.0);
        assert_eq!(program.bounds[program.total_flow], (0.0, f64::INFINITY));
        assert_eq!(program.bound_constraints().len(), network.edge_count());
        for constraint in &program.constraints {
            assert_eq!(constraint.relation, Relation::Eq);
            assert_eq!(constraint.rhs, 0.0);
        }
        // pair node: one edge in, two out
        let pair = network
            .nodes()
            .find(|&node| matches!(network.node(node), Node::Pair(_)))
            .unwrap();
        let row = &program.constraints[pair.index()];
        assert_eq!(row.terms.len(), 3);
        assert_eq!(row.terms.iter().map(|&(_, c)| c).sum::<f64>(), -1.0);
    }

    #[test]
    fn test_optimum_matches_max_flow() {
        let division = division(TEAMS5);
        let (network, _) = FlowNetwork::build(&division, 4).unwrap();
        let value = LpSolver::new().max_flow_value(&network).unwrap();
        assert!((value - 26.0).abs() < TOLERANCE);
        assert!(LpSolver::new().is_eliminated(&network).unwrap());
    }

    #[test]
    fn test_explicit_bounds_backend() {
        let division = division(TEAMS4);
        let solver = LpSolver::with_backend(MinilpBackend {
            explicit_bounds: true,
        });
        let (network, _) = FlowNetwork::build(&division, 1).unwrap();
        assert!((solver.max_flow_value(&network).unwrap() - 6.0).abs() < TOLERANCE);
        assert!(solver.is_eliminated(&network).unwrap());
        let (network, _) = FlowNetwork::build(&division, 2).unwrap();
        assert!(!solver.is_eliminated(&network).unwrap());
    }

    #[test]
    fn test_tolerance() {
        let division = division(TEAMS4);
        let (network, _) = FlowNetwork::build(&division, 1).unwrap();
        // 7 games among Philadelphia's rivals
        let slack = LpSolver::with_backend(Fixed(Ok(6.9995)));
        assert!(!slack.is_eliminated(&network).unwrap());
        let short = LpSolver::with_backend(Fixed(Ok(6.99)));
        assert!(short.is_eliminated(&network).unwrap());
        let strict = LpSolver::with_backend(Fixed(Ok(6.9995))).with_tolerance(0.0);
        assert!(strict.is_eliminated(&network).unwrap());
        assert_eq!(strict.tolerance(), 0.0);
    }

    #[test]
    fn test_backend_failure_is_not_a_verdict() {
        let division = division(TEAMS4);
        let (network, _) = FlowNetwork::build(&division, 1).unwrap();
        let solver = LpSolver::with_backend(Fixed(Err(EliminationError::SolverInfeasible)));
        assert!(matches!(
            solver.is_eliminated(&network),
            Err(EliminationError::SolverInfeasible)
        ));
    }

    #[test]
    fn test_negative_capacity_skips_backend() {
        let division = division(TEAMS4);
        let (network, _) = FlowNetwork::build(&division, 3).unwrap();
        let solver = LpSolver::with_backend(Fixed(Err(EliminationError::SolverInfeasible)));
        assert!(solver.is_eliminated(&network).unwrap());
    }
}
