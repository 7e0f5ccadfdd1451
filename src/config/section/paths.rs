//! `[paths]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [paths]
//! source = "src"      # Source tree root, relative to the project root
//! output = "dist"     # Output tree root, recreated on every build
//! ```
//!
//! The category layout inside the source tree is fixed (`assets/scss`,
//! `assets/js`, `assets/img`, ...); only the roots move.

use serde::Deserialize;
use std::path::PathBuf;

/// Source and output tree roots.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Source tree root, relative to the project root.
    pub source: PathBuf,

    /// Output tree root. Owned by the pipeline and destructively
    /// recreated on every invocation.
    pub output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("src"),
            output: PathBuf::from("dist"),
        }
    }
}
