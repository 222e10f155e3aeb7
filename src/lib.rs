//! radgroups - transitive LDAP group resolution for RADIUS authorization
//!
//! This library resolves the full set of directory groups a user
//! transitively belongs to and formats that set as RADIUS attribute-value
//! pairs consumable by an authentication gateway.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `directory`: the directory query interface — a narrow trait over LDAP
//!   bind/search/unbind, plus the `ldap3`-backed implementation
//! - `resolver`: worklist-based depth-first traversal of the `memberOf`
//!   relation with cycle avoidance and deduplication
//! - `format`: mapping of resolved group DNs to attribute-value pair lines
//! - `commands`: the CLI operation wiring the pieces together
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use radgroups::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     radgroups::commands::resolve::run_resolve(config, "jdoe".to_string()).await
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod directory;
pub mod error;
pub mod format;
pub mod resolver;

// Re-export commonly used types
pub use config::Config;
pub use directory::{DirectoryEntry, DirectorySearch, LdapDirectory};
pub use error::{RadgroupsError, Result};
pub use format::GroupFormat;
