use crate::state_machine::{Attributes, StateName, Transition};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use std::collections::HashSet;

/// How an edge came to exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Source state straight to destination state
    Direct,
    /// Source state into a decision node
    DecisionEntry,
    /// Decision node to destination state, labelled with the answer
    DecisionExit,
}

/// A directed edge with the attributes it is drawn with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub source: StateName,
    pub target: StateName,
    pub attributes: Attributes,
    pub kind: EdgeKind,
}

impl Edge {
    fn new(
        source: impl Into<StateName>,
        target: impl Into<StateName>,
        attributes: Attributes,
        kind: EdgeKind,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            attributes,
            kind,
        }
    }
}

/// A decision node entry edge is identified by its source state and question
type EntryIdentity = (StateName, String);

/// The graph of a declared state machine, ready to be serialized.
///
/// Built in a single pass over an ordered list of transitions. Every
/// collection keeps first-seen order so the same declarations always
/// produce the same document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionGraph {
    /// Name the document is declared under
    pub name: String,

    /// Submachine name to the transitions whose destination is drawn inside it.
    ///
    /// Member transitions carry no `label` attribute.
    pub clusters: IndexMap<String, Vec<Transition>>,

    /// Questions of conditional transitions, one diamond node each
    pub decisions: IndexSet<String>,

    /// Edges in emission order
    pub edges: Vec<Edge>,
}

impl TransitionGraph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Build the graph for `transitions` in declaration order
    pub fn build(transitions: &[Transition], name: impl Into<String>) -> Self {
        let mut graph = Self::new(name);
        let mut entered = HashSet::new();

        for transition in transitions {
            graph.add_to_cluster(transition);
            graph.add_decision(transition);
            graph.expand_edges(transition, &mut entered);
        }

        tracing::debug!(
            "Built graph {} with {} clusters, {} decision nodes and {} edges",
            graph.name,
            graph.clusters.len(),
            graph.decisions.len(),
            graph.edges.len()
        );

        graph
    }

    fn add_to_cluster(&mut self, transition: &Transition) {
        let Some(submachine) = &transition.submachine else {
            return;
        };

        let member = Transition {
            attributes: transition.attributes.without("label"),
            ..transition.clone()
        };
        self.clusters
            .entry(submachine.clone())
            .or_default()
            .push(member);
    }

    fn add_decision(&mut self, transition: &Transition) {
        if let Some(branch) = transition.branch()
            && !self.decisions.contains(branch.question)
        {
            self.decisions.insert(branch.question.to_string());
        }
    }

    fn expand_edges(&mut self, transition: &Transition, entered: &mut HashSet<EntryIdentity>) {
        if transition.from.is_empty() {
            tracing::warn!(
                "Transition {:?} has no source states and contributes no edges",
                transition.name
            );
        }
        if transition.is_half_branched() {
            tracing::warn!(
                "Transition {:?} declares only one of question/answer, drawing it as a plain edge",
                transition.name
            );
        }

        for from_state in &transition.from {
            match transition.branch() {
                Some(branch) => {
                    if entered.insert((from_state.clone(), branch.question.to_string())) {
                        self.edges.push(Edge::new(
                            from_state.as_str(),
                            branch.question,
                            transition.attributes.clone(),
                            EdgeKind::DecisionEntry,
                        ));
                    }

                    self.edges.push(Edge::new(
                        branch.question,
                        transition.to.as_str(),
                        transition.attributes.with("label", branch.answer),
                        EdgeKind::DecisionExit,
                    ));
                }
                None => {
                    self.edges.push(Edge::new(
                        from_state.as_str(),
                        transition.to.as_str(),
                        transition.attributes.clone(),
                        EdgeKind::Direct,
                    ));
                }
            }
        }
    }

    /// Edges created for the given reason, in emission order
    pub fn edges_of_kind(&self, kind: EdgeKind) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |edge| edge.kind == kind)
    }

    /// Members of a submachine cluster
    pub fn cluster(&self, submachine: &str) -> Option<&[Transition]> {
        self.clusters.get(submachine).map(Vec::as_slice)
    }

    pub fn is_decision(&self, node: &str) -> bool {
        self.decisions.contains(node)
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty() && self.decisions.is_empty() && self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge_pairs(graph: &TransitionGraph) -> Vec<(&str, &str)> {
        graph
            .edges
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect()
    }

    #[test]
    fn test_empty_graph() {
        let graph = TransitionGraph::build(&[], "EmptyGraph");
        assert!(graph.is_empty());
        assert_eq!(graph.name, "EmptyGraph");
    }

    #[test]
    fn test_direct_edges_follow_declaration_order() {
        let transitions = vec![
            Transition::new("submit", ["draft", "rejected"], "submitted"),
            Transition::new("publish", ["submitted"], "published"),
        ];
        let graph = TransitionGraph::build(&transitions, "DocumentGraph");

        assert_eq!(
            edge_pairs(&graph),
            vec![
                ("draft", "submitted"),
                ("rejected", "submitted"),
                ("submitted", "published"),
            ]
        );
        assert!(graph.edges.iter().all(|e| e.kind == EdgeKind::Direct));
        assert!(graph.decisions.is_empty());
        assert!(graph.clusters.is_empty());
    }

    #[test]
    fn test_empty_from_contributes_no_edges() {
        let transitions = vec![Transition::new("orphan", Vec::<String>::new(), "nowhere")];
        let graph = TransitionGraph::build(&transitions, "G");
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn test_shared_question_entry_edge_is_deduplicated() {
        let transitions = vec![
            Transition::new("accept", ["review"], "accepted").with_branch("Valid?", "yes"),
            Transition::new("reject", ["review"], "rejected").with_branch("Valid?", "no"),
        ];
        let graph = TransitionGraph::build(&transitions, "G");

        assert_eq!(
            edge_pairs(&graph),
            vec![
                ("review", "Valid?"),
                ("Valid?", "accepted"),
                ("Valid?", "rejected"),
            ]
        );
        assert_eq!(graph.edges_of_kind(EdgeKind::DecisionEntry).count(), 1);

        let labels: Vec<_> = graph
            .edges_of_kind(EdgeKind::DecisionExit)
            .map(|e| e.attributes.get("label"))
            .collect();
        assert_eq!(labels, vec![Some("yes"), Some("no")]);

        assert_eq!(graph.decisions.len(), 1);
        assert!(graph.is_decision("Valid?"));
    }

    #[test]
    fn test_exit_edges_are_never_deduplicated() {
        let transitions = vec![
            Transition::new("a", ["one"], "done").with_branch("Ready?", "yes"),
            Transition::new("b", ["two"], "done").with_branch("Ready?", "yes"),
        ];
        let graph = TransitionGraph::build(&transitions, "G");

        assert_eq!(graph.edges_of_kind(EdgeKind::DecisionEntry).count(), 2);
        assert_eq!(graph.edges_of_kind(EdgeKind::DecisionExit).count(), 2);
    }

    #[test]
    fn test_entry_edge_keeps_first_transition_attributes() {
        let transitions = vec![
            Transition::new("a", ["s"], "x")
                .with_branch("Q?", "1")
                .with_attribute("color", "red"),
            Transition::new("b", ["s"], "y")
                .with_branch("Q?", "2")
                .with_attribute("color", "blue"),
        ];
        let graph = TransitionGraph::build(&transitions, "G");

        let entry = graph
            .edges_of_kind(EdgeKind::DecisionEntry)
            .next()
            .unwrap();
        assert_eq!(entry.attributes.get("color"), Some("red"));
        assert!(!entry.attributes.contains("label"));
    }

    #[test]
    fn test_answer_overrides_existing_label() {
        let transitions = vec![
            Transition::new("t", ["a"], "b")
                .with_attribute("label", "old")
                .with_branch("Q?", "new"),
        ];
        let graph = TransitionGraph::build(&transitions, "G");

        let entry = graph.edges_of_kind(EdgeKind::DecisionEntry).next().unwrap();
        assert_eq!(entry.attributes.get("label"), Some("old"));

        let exit = graph.edges_of_kind(EdgeKind::DecisionExit).next().unwrap();
        assert_eq!(exit.attributes.get("label"), Some("new"));
        // the declaration itself is not modified
        assert_eq!(transitions[0].attributes.get("label"), Some("old"));
    }

    #[test]
    fn test_half_declared_branch_is_direct() {
        let transitions = vec![
            Transition::new("q", ["a"], "b").with_question("Only question?"),
            Transition::new("r", ["a"], "c").with_answer("only answer"),
        ];
        let graph = TransitionGraph::build(&transitions, "G");

        assert_eq!(edge_pairs(&graph), vec![("a", "b"), ("a", "c")]);
        assert!(graph.decisions.is_empty());
        assert!(graph.edges.iter().all(|e| e.kind == EdgeKind::Direct));
    }

    #[test]
    fn test_cluster_members_strip_label() {
        let transitions = vec![
            Transition::new("start", ["idle"], "charging")
                .with_submachine("Payment")
                .with_attribute("label", "x")
                .with_attribute("color", "red"),
            Transition::new("finish", ["charging"], "charged").with_submachine("Payment"),
            Transition::new("ship", ["charged"], "shipped").with_submachine("Delivery"),
        ];
        let graph = TransitionGraph::build(&transitions, "G");

        let keys: Vec<_> = graph.clusters.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Payment", "Delivery"]);

        let payment = graph.cluster("Payment").unwrap();
        assert_eq!(payment.len(), 2);
        assert_eq!(payment[0].to, "charging");
        assert!(!payment[0].attributes.contains("label"));
        assert_eq!(payment[0].attributes.get("color"), Some("red"));

        // edges still carry the label
        assert_eq!(graph.edges[0].attributes.get("label"), Some("x"));
    }

    #[test]
    fn test_edge_count_invariants() {
        let transitions = vec![
            Transition::new("d1", ["a", "b"], "c"),
            Transition::new("d2", ["c"], "a"),
            Transition::new("c1", ["a", "b"], "x").with_branch("Q1", "yes"),
            Transition::new("c2", ["a"], "y").with_branch("Q1", "no"),
            Transition::new("c3", ["b", "c"], "z").with_branch("Q2", "maybe"),
            Transition::new("h", ["z"], "a").with_question("dangling"),
        ];
        let graph = TransitionGraph::build(&transitions, "G");

        let direct: usize = transitions
            .iter()
            .filter(|t| !t.is_conditional())
            .map(|t| t.from.len())
            .sum();
        let exits: usize = transitions
            .iter()
            .filter(|t| t.is_conditional())
            .map(|t| t.from.len())
            .sum();
        let entries: HashSet<(String, String)> = transitions
            .iter()
            .filter_map(|t| t.branch().map(|b| (t, b.question)))
            .flat_map(|(t, q)| t.from.iter().map(move |f| (f.clone(), q.to_string())))
            .collect();

        assert_eq!(graph.edges_of_kind(EdgeKind::Direct).count(), direct);
        assert_eq!(graph.edges_of_kind(EdgeKind::DecisionExit).count(), exits);
        assert_eq!(
            graph.edges_of_kind(EdgeKind::DecisionEntry).count(),
            entries.len()
        );
        assert_eq!(direct, 4);
        assert_eq!(exits, 5);
        assert_eq!(entries.len(), 4);
    }
}
