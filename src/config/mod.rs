//! Pipeline configuration management for `rill.toml`.
//!
//! # Sections
//!
//! | Section    | Purpose                                        |
//! |------------|------------------------------------------------|
//! | `[paths]`  | Source and output tree roots                   |
//! | `[serve]`  | Development server (interface, port, watch)    |
//! | `[style]`  | SCSS compilation options                       |
//! | `[script]` | Script processing options                      |
//! | `[markup]` | HTML include expansion options                 |
//! | `[image]`  | Image re-encoding and WebP generation options  |
//!
//! Every section is optional; defaults reproduce the conventional
//! `src/` → `dist/` project layout. Unknown keys are reported as warnings
//! rather than rejected, so a config written for a newer version still
//! loads.

pub mod section;

pub use section::{
    ImageConfig, MarkupConfig, PathsConfig, ScriptConfig, ServeConfig, StyleConfig,
};

use crate::cli::{Cli, Commands};
use crate::log;
use crate::resolve::PathResolver;
use crate::utils::path::normalize_path;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing rill.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Source and output tree roots
    pub paths: PathsConfig,

    /// Development server settings
    pub serve: ServeConfig,

    /// SCSS compilation settings
    pub style: StyleConfig,

    /// Script processing settings
    pub script: ScriptConfig,

    /// HTML include expansion settings
    pub markup: MarkupConfig,

    /// Image processing settings
    pub image: ImageConfig,
}

impl PipelineConfig {
    /// Load configuration for the given CLI invocation.
    ///
    /// Reads the config file when it exists; otherwise starts from
    /// defaults with the current directory as project root. CLI flags
    /// override the `[serve]` section afterwards.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match find_config_file(&cli.config) {
            Some(path) => Self::from_file(&path)?,
            None => {
                crate::debug!("config"; "no {} found, using defaults", cli.config.display());
                Self {
                    root: normalize_path(Path::new(".")),
                    ..Self::default()
                }
            }
        };

        config.apply_cli(cli);
        Ok(config)
    }

    /// Parse a config file, warning on unknown keys.
    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let mut unknown = Vec::new();
        let de = toml::Deserializer::new(&content);
        let mut config: Self = serde_ignored::deserialize(de, |key| {
            unknown.push(key.to_string());
        })
        .with_context(|| format!("Failed to parse {}", path.display()))?;

        for key in unknown {
            log!("config"; "unknown key `{}` in {}", key, path.display());
        }

        config.config_path = normalize_path(path);
        config.root = config
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| normalize_path(Path::new(".")));
        crate::debug!("config"; "loaded {}", config.config_path.display());
        Ok(config)
    }

    /// Apply CLI overrides onto the `[serve]` section.
    fn apply_cli(&mut self, cli: &Cli) {
        let (interface, port, watch) = match &cli.command {
            Some(Commands::Dev { args }) => (args.interface, args.port, args.watch),
            Some(Commands::Preview { interface, port }) => (*interface, *port, None),
            _ => return,
        };

        if let Some(interface) = interface {
            self.serve.interface = interface;
        }
        if let Some(port) = port {
            self.serve.port = port;
        }
        if let Some(watch) = watch {
            self.serve.watch = watch;
        }
    }

    /// Absolute source tree root.
    pub fn source_root(&self) -> PathBuf {
        self.root.join(&self.paths.source)
    }

    /// Absolute output tree root.
    pub fn output_root(&self) -> PathBuf {
        self.root.join(&self.paths.output)
    }

    /// Build the category resolver for this configuration.
    pub fn resolver(&self) -> PathResolver {
        PathResolver::new(self.source_root(), self.output_root())
    }
}

/// Locate the config file: the given path as-is, or walking up from the
/// current directory when the default name was not overridden.
fn find_config_file(config_arg: &Path) -> Option<PathBuf> {
    if config_arg.exists() {
        return Some(config_arg.to_path_buf());
    }
    if config_arg.is_absolute() {
        return None;
    }

    // Walk up from cwd so `rill dev` works from a subdirectory
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let candidate = dir.join(config_arg);
        if candidate.exists() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

/// Parse a config from a TOML string with defaults (test helper).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> PipelineConfig {
    toml::from_str(content).expect("test config must parse")
}
