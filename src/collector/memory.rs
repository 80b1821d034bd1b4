//! In-memory collector for embedding and tests

use super::TransitionCollector;
use crate::state_machine::Transition;
use crate::{Error, Result};
use indexmap::IndexMap;

/// Collector over declarations registered in code
#[derive(Debug, Clone, Default)]
pub struct MemoryCollector {
    targets: IndexMap<String, Vec<Transition>>,
}

impl MemoryCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the transitions of a target, replacing any earlier registration
    pub fn with_target(mut self, target: impl Into<String>, transitions: Vec<Transition>) -> Self {
        self.targets.insert(target.into(), transitions);
        self
    }
}

impl TransitionCollector for MemoryCollector {
    fn collect(&self, target: &str) -> Result<Vec<Transition>> {
        self.targets
            .get(target)
            .cloned()
            .ok_or_else(|| Error::UnknownTarget(target.to_string()))
    }

    fn targets(&self) -> Vec<String> {
        self.targets.keys().cloned().collect()
    }
}
