use std::collections::{HashMap, HashSet};

use log::{debug, trace};
use pathfinding::prelude::{bfs_reach, edmonds_karp_sparse};
use petgraph::graph::NodeIndex;

use crate::common::{Games, TeamId};
use crate::error::Result;
use crate::network::{FlowNetwork, Node};
use crate::solver::FeasibilitySolver;

#[derive(Clone, Debug)]
pub struct MaxFlow {
    pub value: Games,
    /// Positive flow per edge.
    pub flows: HashMap<(NodeIndex, NodeIndex), Games>,
    /// Nodes reachable from the source in the residual graph.
    pub source_side: HashSet<NodeIndex>,
    /// Edges of a minimum cut: saturated edges leaving `source_side`.
    pub cut: Vec<(NodeIndex, NodeIndex)>,
}

// negative capacities are treated as zero here; callers check has_negative_capacity first
pub fn max_flow(network: &FlowNetwork) -> MaxFlow {
    let vertices: Vec<NodeIndex> = network.nodes().collect();
    let caps = network
        .capacities()
        .map(|(from, to, cap)| ((from, to), cap.max(0)));
    let (flows, value) = edmonds_karp_sparse(&vertices, &network.source(), &network.sink(), caps);
    let flows: HashMap<(NodeIndex, NodeIndex), Games> =
        flows.into_iter().filter(|&(_, flow)| flow > 0).collect();
    let source_side = residual_reach(network, &flows);
    let cut: Vec<(NodeIndex, NodeIndex)> = network
        .capacities()
        .filter(|(from, to, _)| source_side.contains(from) && !source_side.contains(to))
        .map(|(from, to, _)| (from, to))
        .collect();
    trace!("max flow {} with {} edges in the min cut", value, cut.len());
    MaxFlow {
        value,
        flows,
        source_side,
        cut,
    }
}

fn residual_reach(
    network: &FlowNetwork,
    flows: &HashMap<(NodeIndex, NodeIndex), Games>,
) -> HashSet<NodeIndex> {
    let mut residual: HashMap<NodeIndex, Vec<NodeIndex>> = HashMap::new();
    for (from, to, cap) in network.capacities() {
        let used = flows.get(&(from, to)).copied().unwrap_or(0);
        if cap.max(0) > used {
            residual.entry(from).or_default().push(to);
        }
        if used > 0 {
            residual.entry(to).or_default().push(from);
        }
    }
    bfs_reach(network.source(), |node| {
        residual.get(node).cloned().unwrap_or_default()
    })
    .collect()
}

/// Rivals reachable from the source in the residual graph of `flow`.
///
/// When the flow does not saturate the source, these teams have more wins
/// between them (current wins plus games left among themselves) than they can
/// share without one of them passing the target.
pub fn residual_teams(network: &FlowNetwork, flow: &MaxFlow) -> Vec<TeamId> {
    let mut teams: Vec<TeamId> = flow
        .source_side
        .iter()
        .filter_map(|&node| match network.node(node) {
            Node::Team(team) => Some(team),
            _ => None,
        })
        .collect();
    teams.sort_unstable();
    teams
}

/// Exact integer max-flow (Edmonds-Karp).
#[derive(Clone, Copy, Debug, Default)]
pub struct FlowSolver;

impl FeasibilitySolver for FlowSolver {
    fn is_eliminated(&self, network: &FlowNetwork) -> Result<bool> {
        if network.has_negative_capacity() {
            return Ok(true);
        }
        let flow = max_flow(network);
        let limit = network.source_capacity();
        debug!(
            "team {}: max flow {} of {} games",
            network.target(),
            flow.value,
            limit
        );
        Ok(flow.value < limit)
    }
}
