//! `[markup]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [markup]
//! include_prefix = "@"    # Directive prefix: @include('partial.html')
//! ```
//!
//! Include paths resolve relative to the file containing the directive.

use serde::Deserialize;

/// HTML include expansion settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    /// Prefix of the include directive, e.g. `@` for `@include('x.html')`.
    pub include_prefix: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            include_prefix: "@".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_markup_config() {
        let config = test_parse_config("[markup]\ninclude_prefix = \"%%\"");
        assert_eq!(config.markup.include_prefix, "%%");
    }

    #[test]
    fn test_markup_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.markup.include_prefix, "@");
    }
}
