//! Transition Graph
//!
//! Renders the transitions declared on a state machine type as a Graphviz
//! DOT document.
//!
//! This library provides functionality for:
//! - Collecting transition declarations from manifests or in-memory registrations
//! - Building a graph of states, submachine clusters and decision nodes
//! - Serializing that graph to deterministic DOT text
//! - Summarizing the shape of the resulting machine
//!
//! ```
//! use transition_graph::state_machine::{Transition, render_dot};
//!
//! let dot = render_dot(&[Transition::new("open", ["closed"], "opened")], "DoorGraph");
//! assert!(dot.contains("\"closed\" -> \"opened\" []"));
//! ```

pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod state_machine;

pub use config::Config;
pub use error::{Error, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Initialize logging with the given log level.
///
/// Logs go to stderr; stdout is reserved for generated output.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
