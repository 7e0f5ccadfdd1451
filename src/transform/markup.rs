//! Markup include expansion.
//!
//! Supports `@include('partials/head.html')` directives. Paths resolve
//! relative to the file containing the directive, and includes may nest.

use std::fs;
use std::path::Path;

use regex::Regex;

/// Nesting limit; deeper chains are treated as include cycles.
const MAX_DEPTH: usize = 8;

/// Compiled include-directive matcher.
pub struct IncludeExpander {
    pattern: Regex,
}

impl IncludeExpander {
    /// Build an expander for the configured directive prefix.
    pub fn new(prefix: &str) -> Self {
        let pattern = format!(
            r#"{}include\(\s*['"]([^'"]+)['"]\s*\)"#,
            regex::escape(prefix)
        );
        Self {
            // The pattern only varies in the escaped prefix
            pattern: Regex::new(&pattern).unwrap(),
        }
    }

    /// Expand all include directives in `source`, which lives in `dir`.
    pub fn expand(&self, source: &str, dir: &Path) -> Result<String, String> {
        self.expand_at(source, dir, 0)
    }

    fn expand_at(&self, source: &str, dir: &Path, depth: usize) -> Result<String, String> {
        if depth > MAX_DEPTH {
            return Err(format!(
                "include nesting exceeds {MAX_DEPTH} levels (cycle?)"
            ));
        }

        let mut out = String::with_capacity(source.len());
        let mut last = 0;

        for caps in self.pattern.captures_iter(source) {
            let whole = caps.get(0).unwrap();
            let rel = &caps[1];

            let target = dir.join(rel);
            let included = fs::read_to_string(&target)
                .map_err(|e| format!("include '{}': {}", target.display(), e))?;

            let parent = target.parent().unwrap_or(dir);
            let expanded = self.expand_at(&included, parent, depth + 1)?;

            out.push_str(&source[last..whole.start()]);
            out.push_str(&expanded);
            last = whole.end();
        }

        out.push_str(&source[last..]);
        Ok(out)
    }
}
