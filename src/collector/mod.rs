//! Collector module - Abstraction for discovering declared transitions
//!
//! A collector resolves a target type name to the transitions declared on
//! it, in declaration order. Graph construction never performs discovery
//! itself.

use crate::Result;
use crate::state_machine::Transition;
use std::path::Path;

pub mod manifest;
pub mod memory;

pub use manifest::{ManifestCollector, ManifestFormat};
pub use memory::MemoryCollector;

/// Source of transition declarations
///
/// Implementations provide different backends:
/// - `ManifestCollector`: TOML or JSON declaration manifests
/// - `MemoryCollector`: declarations registered in code
pub trait TransitionCollector {
    /// Transitions declared on `target`, in declaration order.
    ///
    /// Fails with [`crate::Error::UnknownTarget`] when the target is not known.
    fn collect(&self, target: &str) -> Result<Vec<Transition>>;

    /// Names of all known targets
    fn targets(&self) -> Vec<String>;
}

/// Create the manifest-backed collector for the given file
pub fn create_collector(manifest: &Path) -> Result<Box<dyn TransitionCollector>> {
    Ok(Box::new(ManifestCollector::from_file(manifest)?))
}

/// Last path segment of a target name.
///
/// `::`, `\` and `.` are all accepted as separators.
pub fn target_short_name(target: &str) -> &str {
    target
        .rsplit(['\\', '.', ':'])
        .find(|segment| !segment.is_empty())
        .unwrap_or(target)
}

/// Name of the document generated for a target
pub fn graph_name(target: &str) -> String {
    format!("{}Graph", target_short_name(target))
}
