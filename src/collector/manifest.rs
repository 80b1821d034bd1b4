//! Manifest-based collection
//!
//! A manifest lists target types, the methods declared on each, and the
//! transitions attached to each method:
//!
//! ```toml
//! [[target]]
//! type = "shop::order::Order"
//!
//! [[target.method]]
//! name = "pay"
//!
//! [[target.method.transition]]
//! name = "pay"
//! from = ["new"]
//! to = "paid"
//! ```

use super::TransitionCollector;
use crate::state_machine::Transition;
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, rename = "target")]
    pub targets: Vec<TargetDecl>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetDecl {
    /// Fully qualified target type name
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default, rename = "method")]
    pub methods: Vec<MethodDecl>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,

    #[serde(default, rename = "transition")]
    pub transitions: Vec<Transition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Toml,
    Json,
}

impl ManifestFormat {
    /// `.json` files are JSON, everything else is TOML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ManifestFormat::Json,
            _ => ManifestFormat::Toml,
        }
    }
}

impl Manifest {
    pub fn parse(contents: &str, format: ManifestFormat) -> Result<Self> {
        let manifest: Manifest = match format {
            ManifestFormat::Toml => toml::from_str(contents)?,
            ManifestFormat::Json => serde_json::from_str(contents)?,
        };
        Ok(manifest)
    }
}

/// Collector backed by a declaration manifest
#[derive(Debug, Clone)]
pub struct ManifestCollector {
    source: PathBuf,
    targets: IndexMap<String, Vec<Transition>>,
}

impl ManifestCollector {
    /// Load and validate a manifest file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        tracing::debug!("Reading manifest {:?}", path);

        let contents = std::fs::read_to_string(&path)
            .map_err(|e| Error::manifest(&path, format!("failed to read: {}", e)))?;

        Self::from_contents(&contents, ManifestFormat::from_path(&path), path)
    }

    /// Parse manifest contents, attributing errors to `source`
    pub fn from_contents(
        contents: &str,
        format: ManifestFormat,
        source: impl Into<PathBuf>,
    ) -> Result<Self> {
        let source = source.into();
        let manifest = Manifest::parse(contents, format).map_err(|e| match e {
            Error::Manifest { message, .. } => Error::manifest(&source, message),
            other => other,
        })?;

        Self::from_manifest(manifest, source)
    }

    pub fn from_manifest(manifest: Manifest, source: impl Into<PathBuf>) -> Result<Self> {
        let source = source.into();
        let mut targets = IndexMap::new();

        for target in manifest.targets {
            if targets.contains_key(&target.type_name) {
                return Err(Error::manifest(
                    &source,
                    format!("target {:?} is declared more than once", target.type_name),
                ));
            }

            let mut transitions = Vec::new();
            for method in target.methods {
                for transition in method.transitions {
                    transition.validate().map_err(|e| {
                        Error::manifest(
                            &source,
                            format!("{}::{}: {}", target.type_name, method.name, e),
                        )
                    })?;
                    transitions.push(transition);
                }
            }

            tracing::debug!(
                "Target {} declares {} transitions",
                target.type_name,
                transitions.len()
            );
            targets.insert(target.type_name, transitions);
        }

        tracing::info!("Loaded {} targets from {:?}", targets.len(), source);
        Ok(Self { source, targets })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }
}

impl TransitionCollector for ManifestCollector {
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
