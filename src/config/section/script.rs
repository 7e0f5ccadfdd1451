//! `[script]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [script]
//! mangle = true     # Shorten identifiers when minifying (production only)
//! ```

use serde::Deserialize;

/// Script processing settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    /// Mangle identifiers during production minification.
    pub mangle: bool,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self { mangle: true }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_script_config() {
        let config = test_parse_config("[script]\nmangle = false");
        assert!(!config.script.mangle);
    }

    #[test]
    fn test_script_defaults() {
        let config = test_parse_config("");
        assert!(config.script.mangle);
    }
}
