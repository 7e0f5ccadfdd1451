//! Build mode configuration for production/development pipelines.
//!
//! The mode is an explicit value constructed once from the CLI subcommand
//! and threaded into pipeline construction and every task context. There is
//! no process-global mode flag.

/// Build mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildMode {
    /// Whether transforms emit minified output.
    pub minify: bool,

    /// Whether tasks may notify connected browser clients.
    /// The build pipeline never does; the dev pipeline always does.
    pub live_reload: bool,

    /// Whether a transform failure aborts the whole invocation.
    /// Development recovers per-task and keeps going.
    pub fail_fast: bool,
}

impl BuildMode {
    /// Production mode: minified output, abort on any task failure.
    pub const PRODUCTION: Self = Self {
        minify: true,
        live_reload: false,
        fail_fast: true,
    };

    /// Development mode: readable output, live reload, recover per-task.
    pub const DEVELOPMENT: Self = Self {
        minify: false,
        live_reload: true,
        fail_fast: false,
    };

    /// Check if this is development mode.
    #[inline]
    pub const fn is_dev(&self) -> bool {
        self.live_reload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_profiles() {
        assert!(BuildMode::PRODUCTION.minify);
        assert!(!BuildMode::PRODUCTION.live_reload);
        assert!(BuildMode::PRODUCTION.fail_fast);

        assert!(!BuildMode::DEVELOPMENT.minify);
        assert!(BuildMode::DEVELOPMENT.live_reload);
        assert!(!BuildMode::DEVELOPMENT.fail_fast);
        assert!(BuildMode::DEVELOPMENT.is_dev());
    }
}
