//! Command-line interface definition for radgroups
//!
//! This module defines the CLI structure using clap's derive API. The tool is
//! single-purpose: resolve one user's transitive group membership and print
//! RADIUS attribute-value pairs, so there are no subcommands.

use clap::Parser;

/// radgroups - resolve transitive LDAP group membership for RADIUS
///
/// Looks up a user in the directory, walks the memberOf relation
/// transitively, and prints one RADIUS attribute-value pair per group.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "radgroups")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "RADGROUPS_CONFIG")]
    pub config: Option<String>,

    /// Override the group output format from config
    #[arg(short, long, value_parser = ["cn", "dn"])]
    pub format: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Username to resolve groups for
    ///
    /// The USER_NAME environment variable takes precedence over this
    /// argument when both are set.
    pub username: Option<String>,
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Determine the username for this run
    ///
    /// The `USER_NAME` environment variable wins over the positional
    /// argument; an empty environment value counts as unset.
    pub fn resolve_username(&self) -> Option<String> {
        std::env::var("USER_NAME")
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| self.username.clone())
    }
}
