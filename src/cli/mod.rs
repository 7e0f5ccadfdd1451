//! Command-line interface.

mod args;
pub mod build;
pub mod dev;
pub mod init;
pub mod preview;

pub use args::{Cli, Commands, DevArgs};
