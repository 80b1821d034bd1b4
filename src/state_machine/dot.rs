//! Graphviz DOT serialization of a [`TransitionGraph`]
//!
//! Sections are always written in the same order: header, submachine
//! clusters, decision nodes, edges, footer. Empty sections are skipped.

use crate::state_machine::TransitionGraph;
use crate::state_machine::attributes::quoted;
use regex::Regex;
use std::sync::LazyLock;

const INDENT: &str = "    ";

static BARE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier pattern"));

/// Render an identifier bare when DOT allows it, quoted otherwise
fn id(name: &str) -> String {
    if BARE_ID.is_match(name) {
        name.to_string()
    } else {
        quoted(name)
    }
}

impl TransitionGraph {
    /// Export to DOT format for Graphviz
    pub fn to_dot(&self) -> String {
        let mut sections = vec![self.dot_header()];
        sections.extend(self.dot_clusters());
        sections.extend(self.dot_decisions());
        sections.extend(self.dot_edges());

        let mut dot = sections.join("\n");
        dot.push_str("}\n");
        dot
    }

    fn dot_header(&self) -> String {
        let mut header = format!("digraph {} {{\n", id(&self.name));
        header.push_str(&format!("{INDENT}node [shape = rectangle nodesep = 2.0]\n"));
        header.push_str(&format!("{INDENT}graph [overlap = false]\n"));
        header.push_str(&format!("{INDENT}rankdir = LR\n"));
        header.push_str(&format!("{INDENT}splines = spline\n"));
        header.push_str(&format!("{INDENT}size = \"20,10\"\n"));
        header
    }

    fn dot_clusters(&self) -> Option<String> {
        if self.clusters.is_empty() {
            return None;
        }

        let blocks: Vec<String> = self
            .clusters
            .iter()
            .map(|(name, members)| {
                let mut block = format!("{INDENT}subgraph {} {{\n", id(&format!("cluster{name}")));
                block.push_str(&format!("{INDENT}{INDENT}style = filled\n"));
                block.push_str(&format!("{INDENT}{INDENT}color = \"#efefef\"\n"));
                block.push_str(&format!(
                    "{INDENT}{INDENT}node [style = filled fillcolor = white color = grey]\n\n"
                ));
                for member in members {
                    block.push_str(&format!(
                        "{INDENT}{INDENT}{} {}\n",
                        quoted(&member.to),
                        member.attributes
                    ));
                }
                block.push_str(&format!("{INDENT}}}\n"));
                block
            })
            .collect();

        Some(blocks.join("\n"))
    }

    fn dot_decisions(&self) -> Option<String> {
        if self.decisions.is_empty() {
            return None;
        }

        Some(
            self.decisions
                .iter()
                .map(|question| format!("{INDENT}{} [shape = diamond]\n", quoted(question)))
                .collect(),
        )
    }

    fn dot_edges(&self) -> Option<String> {
        if self.edges.is_empty() {
            return None;
        }

        Some(
            self.edges
                .iter()
                .map(|edge| {
                    format!(
                        "{INDENT}{} -> {} {}\n",
                        quoted(&edge.source),
                        quoted(&edge.target),
                        edge.attributes
                    )
                })
                .collect(),
        )
    }
}
