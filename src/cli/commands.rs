//! CLI command implementations
//!
//! This module contains the implementation for each CLI command.

use crate::Result;
use crate::collector::{TransitionCollector, create_collector, graph_name};
use crate::state_machine::{self, TransitionGraph};
use anyhow::Context;
use std::io::Write;
use std::path::PathBuf;

/// Resolve a target and build its graph.
///
/// Resolution happens before anything is built, so an unknown target
/// leaves no partial output behind.
fn build_graph(collector: &dyn TransitionCollector, target: &str) -> Result<TransitionGraph> {
    let transitions = collector.collect(target)?;
    tracing::info!("Found {} transitions on {}", transitions.len(), target);

    Ok(state_machine::build_transition_graph(
        &transitions,
        &graph_name(target),
    ))
}

/// Generate command implementation
pub mod generate {
    use super::*;

    /// Execute the generate command
    pub fn execute(target: &str, manifest: PathBuf) -> Result<()> {
        tracing::info!("Generating graph for {}", target);
        tracing::debug!("Using manifest: {:?}", manifest);

        let collector = create_collector(&manifest)?;
        run(collector.as_ref(), target, &mut std::io::stdout().lock())
    }

    /// Write the DOT document for `target` to `w`
    pub fn run(
        collector: &dyn TransitionCollector,
        target: &str,
        w: &mut impl Write,
    ) -> Result<()> {
        let dot = build_graph(collector, target)?.to_dot();

        w.write_all(dot.as_bytes())
            .and_then(|_| w.flush())
            .context("failed to write graph")?;
        Ok(())
    }
}

/// Stats command implementation
pub mod stats {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::state_machine::analyzer;

    /// Execute the stats command
    pub fn execute(target: &str, manifest: PathBuf, output: OutputFormat) -> Result<()> {
        tracing::info!("Analyzing graph for {}", target);

        let collector = create_collector(&manifest)?;
        run(collector.as_ref(), target, output, &mut std::io::stdout().lock())
    }

    pub fn run(
        collector: &dyn TransitionCollector,
        target: &str,
        output: OutputFormat,
        w: &mut impl Write,
    ) -> Result<()> {
        let stats = analyzer::analyze(&build_graph(collector, target)?);

        match output {
            OutputFormat::Json => crate::cli::output::output_json(w, &stats),
            OutputFormat::Table => crate::cli::output::output_table(w, &stats),
        }
    }
}

/// Targets command implementation
pub mod targets {
    use super::*;

    /// Execute the targets command
    pub fn execute(manifest: PathBuf) -> Result<()> {
        let collector = create_collector(&manifest)?;
        run(collector.as_ref(), &mut std::io::stdout().lock())
    }

    pub fn run(collector: &dyn TransitionCollector, w: &mut impl Write) -> Result<()> {
        let targets = collector.targets();
        if targets.is_empty() {
            tracing::warn!("No targets declared");
        }

        for target in targets {
            writeln!(w, "{}", target)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::OutputFormat;
    use crate::collector::MemoryCollector;
    use crate::state_machine::Transition;

    fn collector() -> MemoryCollector {
        MemoryCollector::new()
            .with_target(
                "shop::order::Order",
                vec![
                    Transition::new("accept", ["A"], "B").with_branch("Q?", "yes"),
                    Transition::new("decline", ["A"], "C").with_branch("Q?", "no"),
                ],
            )
            .with_target("shop::Basket", vec![Transition::new("add", ["A"], "B")])
    }

    fn output_of(
        f: impl FnOnce(&mut Vec<u8>) -> crate::Result<()>,
    ) -> (crate::Result<()>, String) {
        let mut buffer = Vec::new();
        let result = f(&mut buffer);
        (result, String::from_utf8(buffer).unwrap())
    }

    #[test]
    fn test_generate_writes_document() {
        let (result, dot) =
            output_of(|w| super::generate::run(&collector(), "shop::order::Order", w));
        assert!(result.is_ok());
        assert!(dot.starts_with("digraph OrderGraph {\n"));
        assert!(dot.contains("\"Q?\" -> \"C\" [label = \"no\"]"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn test_generate_single_edge_scenario() {
        let (result, dot) = output_of(|w| super::generate::run(&collector(), "shop::Basket", w));
        assert!(result.is_ok());
        assert_eq!(dot.matches("->").count(), 1);
        assert!(dot.contains("\"A\" -> \"B\" []"));
    }

    #[test]
    fn test_generate_unknown_target_writes_nothing() {
        let (result, dot) = output_of(|w| super::generate::run(&collector(), "shop::Refund", w));
        assert!(result.unwrap_err().is_resolution_error());
        assert!(dot.is_empty());
    }

    #[test]
    fn test_stats_json() {
        let (result, json) = output_of(|w| {
            super::stats::run(&collector(), "shop::order::Order", OutputFormat::Json, w)
        });
        assert!(result.is_ok());

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["name"], "OrderGraph");
        assert_eq!(value["decision_entries"], 1);
        assert_eq!(value["decision_exits"], 2);
        assert_eq!(value["pattern"], "branching");
    }

    #[test]
    fn test_targets_lists_in_order() {
        let (result, listing) = output_of(|w| super::targets::run(&collector(), w));
        assert!(result.is_ok());
        assert_eq!(listing, "shop::order::Order\nshop::Basket\n");
    }
}
