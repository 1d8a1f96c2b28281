//! Layered flow network for one (division, target team) query.
//!
//! source -> one node per pair of rivals (capacity: games left between them)
//!        -> one node per rival (same capacity on both out-edges of a pair)
//!        -> sink (capacity: wins the rival may add without passing the target's best total)
//!
//! The target cannot finish first iff no flow saturates every source edge.

use std::collections::HashMap;
use std::fmt::Display;

use log::debug;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::common::{Games, Pair, TeamId};
use crate::division::DivisionModel;
use crate::error::Result;

#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum Node {
    Source,
    Sink,
    Pair(Pair),
    Team(TeamId),
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Source => write!(f, "source"),
            Node::Sink => write!(f, "sink"),
            Node::Pair(pair) => write!(f, "pair {}", pair),
            Node::Team(team) => write!(f, "team {}", team),
        }
    }
}

/// Games left between two rivals, keyed by both orderings of the pair.
pub type SaturatedEdges = HashMap<(TeamId, TeamId), Games>;

#[derive(Clone, Debug)]
pub struct FlowNetwork {
    target: TeamId,
    graph: DiGraph<Node, Games>,
    source: NodeIndex,
    sink: NodeIndex,
    team_nodes: HashMap<TeamId, NodeIndex>,
}

impl FlowNetwork {
    pub fn build(division: &DivisionModel, target: TeamId) -> Result<(Self, SaturatedEdges)> {
        let best = division.team(target)?.max_wins();
        let rivals: Vec<TeamId> = division.team_ids().filter(|&id| id != target).collect();

        let mut graph = DiGraph::new();
        let source = graph.add_node(Node::Source);
        let sink = graph.add_node(Node::Sink);
        let team_nodes: HashMap<TeamId, NodeIndex> = rivals
            .iter()
            .map(|&id| (id, graph.add_node(Node::Team(id))))
            .collect();

        let mut saturated_edges = SaturatedEdges::new();
        for (i, &a) in rivals.iter().enumerate() {
            for &b in &rivals[i + 1..] {
                let games = division.get_against(a, b)?;
                saturated_edges.insert((a, b), games);
                saturated_edges.insert((b, a), games);
                let pair = graph.add_node(Node::Pair(Pair::new(a, b)));
                graph.add_edge(source, pair, games);
                // not halved: conservation at the pair node caps the two together
                graph.add_edge(pair, team_nodes[&a], games);
                graph.add_edge(pair, team_nodes[&b], games);
            }
        }

        for &id in &rivals {
            let cap = best - division.team(id)?.wins;
            graph.add_edge(team_nodes[&id], sink, cap);
        }

        debug!(
            "network for team {}: {} nodes, {} edges, {} games among rivals",
            target,
            graph.node_count(),
            graph.edge_count(),
            saturated_edges.values().sum::<Games>() / 2
        );
        let network = FlowNetwork {
            target,
            graph,
            source,
            sink,
            team_nodes,
        };
        Ok((network, saturated_edges))
    }

    pub fn target(&self) -> TeamId {
        self.target
    }

    pub fn source(&self) -> NodeIndex {
        self.source
    }

    pub fn sink(&self) -> NodeIndex {
        self.sink
    }

    pub fn graph(&self) -> &DiGraph<Node, Games> {
        &self.graph
    }

    pub fn node(&self, index: NodeIndex) -> Node {
        self.graph[index]
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> {
        self.graph.node_indices()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn team_node(&self, team: TeamId) -> Option<NodeIndex> {
        self.team_nodes.get(&team).copied()
    }

    pub fn capacity(&self, edge: EdgeIndex) -> Games {
        self.graph[edge]
    }

    /// Every edge as (from, to, capacity).
    pub fn capacities(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, Games)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (edge.source(), edge.target(), *edge.weight()))
    }

    pub fn outgoing(&self, node: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph
            .edges_directed(node, Direction::Outgoing)
            .map(|edge| edge.id())
    }

    pub fn incoming(&self, node: NodeIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph
            .edges_directed(node, Direction::Incoming)
            .map(|edge| edge.id())
    }

    pub fn source_capacity(&self) -> Games {
        self.outgoing(self.source).map(|edge| self.graph[edge]).sum()
    }

    pub fn sink_capacity(&self) -> Games {
        self.incoming(self.sink).map(|edge| self.graph[edge]).sum()
    }

    // a rival already past the target's best total; no non-negative flow fits
    pub fn has_negative_capacity(&self) -> bool {
        self.graph.edge_weights().any(|&cap| cap < 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EliminationError;
    use crate::fixtures::{division, random_division, TEAMS4, TEAMS5};

    fn find_edge(network: &FlowNetwork, from: Node, to: Node) -> Option<Games> {
        network
            .capacities()
            .find(|&(u, v, _)| network.node(u) == from && network.node(v) == to)
            .map(|(_, _, cap)| cap)
    }

    #[test]
    fn test_layout_teams4() {
        let division = division(TEAMS4);
        let (network, saturated) = FlowNetwork::build(&division, 1).unwrap();
        // source, sink, 3 rivals, 3 pairs
        assert_eq!(network.node_count(), 8);
        assert_eq!(network.edge_count(), 3 * 3 + 3);
        assert_eq!(network.target(), 1);
        assert_eq!(network.node(network.source()), Node::Source);
        assert_eq!(network.node(network.sink()), Node::Sink);
        assert!(network.team_node(1).is_none());

        let atl_ny = Node::Pair(Pair::new(0, 2));
        assert_eq!(find_edge(&network, Node::Source, atl_ny), Some(6));
        assert_eq!(find_edge(&network, atl_ny, Node::Team(0)), Some(6));
        assert_eq!(find_edge(&network, atl_ny, Node::Team(2)), Some(6));
        assert_eq!(find_edge(&network, atl_ny, Node::Team(3)), None);
        // Philadelphia can reach 83
        assert_eq!(find_edge(&network, Node::Team(0), Node::Sink), Some(0));
        assert_eq!(find_edge(&network, Node::Team(2), Node::Sink), Some(5));
        assert_eq!(find_edge(&network, Node::Team(3), Node::Sink), Some(6));

        assert_eq!(saturated[&(0, 2)], 6);
        assert_eq!(saturated[&(2, 0)], 6);
        assert_eq!(saturated[&(2, 3)], 0);
        assert_eq!(saturated.len(), 6);
        assert!(!saturated.contains_key(&(0, 1)));
    }

    #[test]
    fn test_negative_sink_capacity() {
        let division = division(TEAMS4);
        let (network, _) = FlowNetwork::build(&division, 3).unwrap();
        assert_eq!(find_edge(&network, Node::Team(0), Node::Sink), Some(-3));
        assert!(network.has_negative_capacity());
        let (network, _) = FlowNetwork::build(&division, 0).unwrap();
        assert!(!network.has_negative_capacity());
    }

    #[test]
    fn test_source_capacity_detroit() {
        let division = division(TEAMS5);
        let (network, _) = FlowNetwork::build(&division, 4).unwrap();
        assert_eq!(network.source_capacity(), 27);
        assert_eq!(network.sink_capacity(), 1 + 5 + 7 + 13);
    }

    #[test]
    fn test_capacity_conservation() {
        for num_teams in 1..8 {
            for seed in 0..20 {
                let division = random_division(num_teams, seed);
                for target in division.team_ids() {
                    let (network, saturated) = FlowNetwork::build(&division, target).unwrap();
                    let rivals = num_teams - 1;
                    assert_eq!(network.node_count(), 2 + rivals + rivals * rivals.saturating_sub(1) / 2);
                    assert_eq!(network.source_capacity(), division.games_left_without(target));
                    assert_eq!(
                        saturated.values().sum::<Games>(),
                        2 * division.games_left_without(target)
                    );
                }
            }
        }
    }

    #[test]
    fn test_pair_edges_repeat_source_capacity() {
        let division = random_division(6, 7);
        let (network, _) = FlowNetwork::build(&division, 2).unwrap();
        for node in network.nodes() {
            if let Node::Pair(pair) = network.node(node) {
                let incoming: Vec<Games> =
                    network.incoming(node).map(|edge| network.capacity(edge)).collect();
                let outgoing: Vec<Games> =
                    network.outgoing(node).map(|edge| network.capacity(edge)).collect();
                let games = division.get_against(pair.a, pair.b).unwrap();
                assert_eq!(incoming, vec![games]);
                assert_eq!(outgoing, vec![games, games]);
            }
        }
    }

    #[test]
    fn test_unknown_target() {
        let division = division(TEAMS4);
        assert!(matches!(
            FlowNetwork::build(&division, 4),
            Err(EliminationError::UnknownTeam(4))
        ));
    }

    #[test]
    fn test_fresh_network_per_query() {
        let division = division(TEAMS5);
        let (first, _) = FlowNetwork::build(&division, 4).unwrap();
        let (_, _) = FlowNetwork::build(&division, 0).unwrap();
        let (again, _) = FlowNetwork::build(&division, 4).unwrap();
        assert_eq!(
            first.capacities().collect::<Vec<_>>(),
            again.capacities().collect::<Vec<_>>()
        );
    }
}
