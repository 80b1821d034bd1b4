//! State machine module - Build and render transition graphs

pub mod analyzer;
pub mod attributes;
pub mod dot;
pub mod graph;
pub mod transition;

// Re-export key types
pub use analyzer::{GraphStats, MachinePattern};
pub use attributes::Attributes;
pub use graph::{Edge, EdgeKind, TransitionGraph};
pub use transition::{Branch, Transition};

pub type StateName = String;

/// Build the graph for an ordered list of declared transitions
pub fn build_transition_graph(transitions: &[Transition], graph_name: &str) -> TransitionGraph {
    TransitionGraph::build(transitions, graph_name)
}

/// Build and serialize in one step
pub fn render_dot(transitions: &[Transition], graph_name: &str) -> String {
    build_transition_graph(transitions, graph_name).to_dot()
}
