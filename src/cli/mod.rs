//! Command-line interface for Cinedex.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cinedex - catalog admin panel for movies, series and anime
#[derive(Parser)]
#[command(name = "cinedex")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the default locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Start the web server (default)
    Serve,

    /// Write a default config.toml to the working directory
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::parse_from(["cinedex"]);
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_config_flag_after_subcommand() {
        let cli = Cli::parse_from(["cinedex", "serve", "--config", "/etc/cinedex.toml"]);
        assert_eq!(cli.command, Some(Commands::Serve));
        assert_eq!(cli.config, Some(PathBuf::from("/etc/cinedex.toml")));
    }
}
