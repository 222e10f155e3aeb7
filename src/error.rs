//! Error types for radgroups
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for radgroups operations
///
/// This enum encompasses every fatal condition the tool can hit:
/// configuration problems, directory connection/bind failures, lookup and
/// traversal failures, and malformed group DNs during CN-mode formatting.
/// All of them are fatal; none is retried or downgraded to a warning.
#[derive(Error, Debug)]
pub enum RadgroupsError {
    /// Configuration-related errors (unreadable file, bad values, missing username)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connecting or binding to the directory server failed or timed out
    #[error("Connection error: {0}")]
    Connection(String),

    /// The account-name filter matched no directory entry
    #[error("user dn not found for {username}")]
    UserNotFound {
        /// Username the lookup filter was built from
        username: String,
    },

    /// A search during group traversal failed (network or protocol fault)
    #[error("Directory error: {0}")]
    Directory(String),

    /// CN-mode formatting encountered a group DN without a leading CN= component
    #[error("malformed group dn (no CN component): {dn}")]
    MalformedDn {
        /// The offending distinguished name
        dn: String,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for radgroups operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
