//! Group resolution command handler
//!
//! Opens and binds the directory connection, resolves the user's transitive
//! group membership, prints the formatted attribute-value pairs to stdout,
//! and guarantees connection teardown on every path.

use crate::config::Config;
use crate::directory::{DirectorySearch, LdapDirectory};
use crate::error::Result;
use crate::format;
use crate::resolver;
use std::io::{self, Write};
use tracing::info;

/// Resolve groups for `username` and print attribute-value pairs
///
/// The connection is unbound exactly once, whether resolution succeeds or
/// fails. On failure nothing has been printed: formatting completes for the
/// whole result before the first line is written.
pub async fn run_resolve(config: Config, username: String) -> Result<()> {
    let mut directory = LdapDirectory::connect(&config.ldap).await?;

    let outcome = resolve_and_print(&mut directory, &config, &username).await;

    // Best-effort teardown, on success and failure alike
    directory.unbind().await;

    outcome
}

/// Resolve, format, and print against any directory implementation
///
/// Split from [`run_resolve`] so the full pipeline short of the LDAP
/// connection can run against an in-memory directory in tests.
pub async fn resolve_and_print<D: DirectorySearch>(
    directory: &mut D,
    config: &Config,
    username: &str,
) -> Result<()> {
    let groups = resolver::resolve_groups(directory, username).await?;
    let pairs = format::format_pairs(&groups, config)?;

    info!(
        username = %username,
        groups = pairs.len(),
        "Printing resolved groups"
    );

    let mut stdout = io::stdout().lock();
    for pair in &pairs {
        writeln!(stdout, "{}", pair)?;
    }

    Ok(())
}
