//! Machine shape analyzer
//!
//! Projects a built [`TransitionGraph`] onto a petgraph graph to report
//! counts, entry/exit states and the overall shape of the machine
//! (linear, branching or cyclic).

use super::{EdgeKind, TransitionGraph};
use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use serde::Serialize;
use std::collections::HashMap;

/// What a node in the drawn graph stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    State,
    Decision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MachinePattern {
    /// No edges at all
    Empty,

    /// A -> B -> C -> D
    Linear,

    /// A -> B
    ///   -> C
    Branching,

    /// A -> B -> A
    Cyclic,
}

impl MachinePattern {
    pub fn display_name(&self) -> &'static str {
        match self {
            MachinePattern::Empty => "Empty",
            MachinePattern::Linear => "Linear",
            MachinePattern::Branching => "Branching",
            MachinePattern::Cyclic => "Cyclic",
        }
    }
}

/// The drawn graph as petgraph sees it, one node per distinct name
pub struct Topology {
    pub graph: StableGraph<(String, NodeKind), EdgeKind>,

    /// Node name to graph index, so each name is added exactly once
    pub node_index: HashMap<String, NodeIndex>,
}

impl Topology {
    pub fn from_graph(model: &TransitionGraph) -> Self {
        let mut topology = Self {
            graph: StableGraph::new(),
            node_index: HashMap::new(),
        };

        for members in model.clusters.values() {
            for member in members {
                topology.node(&member.to, model);
            }
        }
        for question in &model.decisions {
            topology.node(question, model);
        }
        for edge in &model.edges {
            let source = topology.node(&edge.source, model);
            let target = topology.node(&edge.target, model);
            topology.graph.add_edge(source, target, edge.kind);
        }

        topology
    }

    fn node(&mut self, name: &str, model: &TransitionGraph) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(name) {
            return idx;
        }

        let kind = if model.is_decision(name) {
            NodeKind::Decision
        } else {
            NodeKind::State
        };
        let idx = self.graph.add_node((name.to_string(), kind));
        self.node_index.insert(name.to_string(), idx);
        idx
    }

    fn degree(&self, idx: NodeIndex, direction: Direction) -> usize {
        self.graph.edges_directed(idx, direction).count()
    }

    /// States with nothing leading into them, in first-seen order
    pub fn initial_states(&self) -> Vec<String> {
        self.states_where(|idx| self.degree(idx, Direction::Incoming) == 0)
    }

    /// States with nothing leading out of them, in first-seen order
    pub fn terminal_states(&self) -> Vec<String> {
        self.states_where(|idx| self.degree(idx, Direction::Outgoing) == 0)
    }

    fn states_where(&self, predicate: impl Fn(NodeIndex) -> bool) -> Vec<String> {
        self.graph
            .node_indices()
            .filter(|&idx| predicate(idx))
            .filter_map(|idx| self.graph.node_weight(idx))
            .filter(|(_, kind)| *kind == NodeKind::State)
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn pattern(&self) -> MachinePattern {
        if self.graph.edge_count() == 0 {
            return MachinePattern::Empty;
        }
        if petgraph::algo::is_cyclic_directed(&self.graph) {
            return MachinePattern::Cyclic;
        }

        let max_out = self
            .graph
            .node_indices()
            .map(|idx| self.degree(idx, Direction::Outgoing))
            .max()
            .unwrap_or(0);

        if max_out <= 1 {
            MachinePattern::Linear
        } else {
            MachinePattern::Branching
        }
    }

    /// Average out-degree over all nodes
    pub fn branching_factor(&self) -> f64 {
        let node_count = self.graph.node_count();
        if node_count == 0 {
            return 0.0;
        }
        self.graph.edge_count() as f64 / node_count as f64
    }
}

/// Summary of a built graph
#[derive(Debug, Clone, Serialize)]
pub struct GraphStats {
    pub name: String,
    pub states: usize,
    pub decision_nodes: usize,
    pub clusters: usize,
    pub direct_edges: usize,
    pub decision_entries: usize,
    pub decision_exits: usize,
    pub initial_states: Vec<String>,
    pub terminal_states: Vec<String>,
    pub branching_factor: f64,
    pub pattern: MachinePattern,
}

impl GraphStats {
    pub fn total_edges(&self) -> usize {
        self.direct_edges + self.decision_entries + self.decision_exits
    }
}

/// Compute statistics for a built graph
pub fn analyze(model: &TransitionGraph) -> GraphStats {
    let topology = Topology::from_graph(model);
    let states = topology
        .graph
        .node_indices()
        .filter_map(|idx| topology.graph.node_weight(idx))
        .filter(|(_, kind)| *kind == NodeKind::State)
        .count();

    GraphStats {
        name: model.name.clone(),
        states,
        decision_nodes: model.decisions.len(),
        clusters: model.clusters.len(),
        direct_edges: model.edges_of_kind(EdgeKind::Direct).count(),
        decision_entries: model.edges_of_kind(EdgeKind::DecisionEntry).count(),
        decision_exits: model.edges_of_kind(EdgeKind::DecisionExit).count(),
        initial_states: topology.initial_states(),
        terminal_states: topology.terminal_states(),
        branching_factor: topology.branching_factor(),
        pattern: topology.pattern(),
    }
}
