//! Construction options for the dependency graph.
//!
//! Options can be built in code or loaded from a YAML file:
//!
//! ```yaml
//! allow-self-loops: false
//! allow-multi-edges: true
//! validate-on-construction: true
//! ```
//!
//! Keys that are omitted keep their default value.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options fixed when a [`DependencyGraph`](crate::DependencyGraph) is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GraphOptions {
    /// Permit edges from a node to itself. Defaults to `true`.
    pub allow_self_loops: bool,

    /// Permit more than one edge per ordered node pair. Defaults to `false`.
    pub allow_multi_edges: bool,

    /// Re-check adjacency indices after every edge insertion. Defaults to `true`.
    pub validate_on_construction: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            allow_self_loops: true,
            allow_multi_edges: false,
            validate_on_construction: true,
        }
    }
}

impl GraphOptions {
    /// Parse options from a YAML document.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load options from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Render options as a YAML document.
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))
    }
}
