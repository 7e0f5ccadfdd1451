//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

/// Rill asset pipeline CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: rill.toml)
    #[arg(short = 'C', long, default_value = "rill.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands (omitted: dev)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Clean, build unminified, serve with live reload and watch
    #[command(visible_alias = "d")]
    Dev {
        #[command(flatten)]
        args: DevArgs,
    },

    /// Clean, build minified output and exit
    #[command(visible_alias = "b")]
    Build,

    /// Serve a previously built output directory (no rebuild, no watch)
    #[command(visible_alias = "p")]
    Preview {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Scaffold a new project
    #[command(visible_alias = "i")]
    Init {
        /// Project directory (default: current directory)
        #[arg(value_hint = clap::ValueHint::DirPath)]
        name: Option<PathBuf>,
    },
}

/// Arguments for the dev command
#[derive(clap::Args, Debug, Clone, Default)]
pub struct DevArgs {
    /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
    #[arg(short, long)]
    pub interface: Option<IpAddr>,

    /// Port number to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Enable file watching for auto-rebuild
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub watch: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::parse_from(["rill"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_dev_flags() {
        let cli = Cli::parse_from(["rill", "dev", "--port", "8080", "--watch", "false"]);
        match cli.command {
            Some(Commands::Dev { args }) => {
                assert_eq!(args.port, Some(8080));
                assert_eq!(args.watch, Some(false));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_aliases() {
        assert!(matches!(
            Cli::parse_from(["rill", "b"]).command,
            Some(Commands::Build)
        ));
        assert!(matches!(
            Cli::parse_from(["rill", "p"]).command,
            Some(Commands::Preview { .. })
        ));
    }
}
