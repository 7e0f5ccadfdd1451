//! `[style]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [style]
//! load_paths = ["node_modules"]   # Extra SCSS @use/@import search paths
//! ```

use serde::Deserialize;
use std::path::PathBuf;

/// SCSS compilation settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Extra search paths for `@use`/`@import`, relative to the project
    /// root. The stylesheet's own directory is always searched first.
    pub load_paths: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_style_config() {
        let config = test_parse_config("[style]\nload_paths = [\"vendor/scss\"]");
        assert_eq!(config.style.load_paths, vec![PathBuf::from("vendor/scss")]);
    }

    #[test]
    fn test_style_defaults() {
        let config = test_parse_config("");
        assert!(config.style.load_paths.is_empty());
    }
}
