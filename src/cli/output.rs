//! Output formatting module
//!
//! This module handles formatting graph statistics for different output formats.

use crate::{Result, state_machine::GraphStats};
use anyhow::Context;

/// Output graph statistics as JSON
pub fn output_json(w: &mut impl std::io::Write, stats: &GraphStats) -> Result<()> {
    serde_json::to_writer_pretty(&mut *w, stats).context("failed to write statistics")?;
    writeln!(w)?; // Add trailing newline
    Ok(())
}

/// Output graph statistics as a text table
pub fn output_table(w: &mut impl std::io::Write, stats: &GraphStats) -> Result<()> {
    writeln!(w, "{} - Transition Graph Summary", stats.name)?;
    writeln!(w, "{}", "=".repeat(60))?;
    writeln!(w)?;

    writeln!(w, "Nodes:")?;
    writeln!(w, "  States:            {}", stats.states)?;
    writeln!(w, "  Decision nodes:    {}", stats.decision_nodes)?;
    writeln!(w, "  Clusters:          {}", stats.clusters)?;
    writeln!(w)?;

    writeln!(w, "Edges:")?;
    writeln!(w, "  Direct:            {}", stats.direct_edges)?;
    writeln!(w, "  Decision entries:  {}", stats.decision_entries)?;
    writeln!(w, "  Decision exits:    {}", stats.decision_exits)?;
    writeln!(w, "  Total:             {}", stats.total_edges())?;
    writeln!(w)?;

    writeln!(w, "Shape:")?;
    writeln!(w, "  Pattern:           {}", stats.pattern.display_name())?;
    writeln!(w, "  Branching factor:  {:.2}", stats.branching_factor)?;
    writeln!(w)?;

    if !stats.initial_states.is_empty() {
        writeln!(w, "Initial states:")?;
        for state in &stats.initial_states {
            writeln!(w, "  - {}", state)?;
        }
        writeln!(w)?;
    }

    if !stats.terminal_states.is_empty() {
        writeln!(w, "Terminal states:")?;
        for state in &stats.terminal_states {
            writeln!(w, "  - {}", state)?;
        }
        writeln!(w)?;
    }

    Ok(())
}
