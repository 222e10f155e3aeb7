//! Configuration management for radgroups
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.
//!
//! Configuration is loaded once at startup and passed by reference into the
//! resolver and formatter; there is no global mutable state.

use crate::error::{RadgroupsError, Result};
use crate::format::GroupFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for radgroups
///
/// Holds the RADIUS output settings and the LDAP connection settings.
/// Keys in the file use camelCase (`attributeName`, `baseDn`, ...), matching
/// the format this tool's deployments have always shipped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// RADIUS attribute-value pair output settings
    #[serde(default)]
    pub radius: RadiusConfig,

    /// LDAP connection and search settings
    #[serde(default)]
    pub ldap: LdapConfig,
}

/// RADIUS output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadiusConfig {
    /// The RADIUS attribute each resolved group is assigned to
    #[serde(default = "default_attribute_name")]
    pub attribute_name: String,

    /// Prefix prepended to every attribute value
    #[serde(default)]
    pub value_prefix: String,
}

fn default_attribute_name() -> String {
    "Filter-Id".to_string()
}

impl Default for RadiusConfig {
    fn default() -> Self {
        Self {
            attribute_name: default_attribute_name(),
            value_prefix: String::new(),
        }
    }
}

/// LDAP connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LdapConfig {
    /// Directory server host
    #[serde(default)]
    pub host: String,

    /// Directory server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Bind DN or account used to authenticate the connection
    #[serde(default)]
    pub user: String,

    /// Bind password
    #[serde(default)]
    pub password: String,

    /// Search root for the initial user lookup
    #[serde(default)]
    pub base_dn: String,

    /// Timeout in milliseconds, applied to connect and bind
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// How group DNs are rendered in the output (cn or dn)
    #[serde(default)]
    pub format: GroupFormat,
}

fn default_port() -> u16 {
    389
}

fn default_timeout() -> u64 {
    5000
}

impl Default for LdapConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: default_port(),
            user: String::new(),
            password: String::new(),
            base_dn: String::new(),
            timeout: default_timeout(),
            format: GroupFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file with env-var and CLI overrides applied
    ///
    /// Resolution order: file contents, then `RADGROUPS_*` environment
    /// variables, then CLI flags. A missing file falls back to defaults
    /// (which `validate` will reject unless the environment supplies the
    /// required LDAP settings).
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| RadgroupsError::Config(format!("Failed to read config file: {}", e)))?;

        // Deployments of the original tool carried a config.json; accept it
        // alongside the YAML default.
        if path.ends_with(".json") {
            serde_json::from_str(&contents)
                .map_err(|e| RadgroupsError::Config(format!("Failed to parse config: {}", e)).into())
        } else {
            serde_yaml::from_str(&contents)
                .map_err(|e| RadgroupsError::Config(format!("Failed to parse config: {}", e)).into())
        }
    }

    fn apply_env_vars(&mut self) {
        if let Ok(host) = std::env::var("RADGROUPS_LDAP_HOST") {
            self.ldap.host = host;
        }

        if let Ok(port) = std::env::var("RADGROUPS_LDAP_PORT") {
            if let Ok(value) = port.parse() {
                self.ldap.port = value;
            } else {
                tracing::warn!("Invalid RADGROUPS_LDAP_PORT: {}", port);
            }
        }

        if let Ok(user) = std::env::var("RADGROUPS_LDAP_USER") {
            self.ldap.user = user;
        }

        if let Ok(password) = std::env::var("RADGROUPS_LDAP_PASSWORD") {
            self.ldap.password = password;
        }

        if let Ok(base_dn) = std::env::var("RADGROUPS_LDAP_BASE_DN") {
            self.ldap.base_dn = base_dn;
        }

        if let Ok(timeout) = std::env::var("RADGROUPS_LDAP_TIMEOUT") {
            if let Ok(value) = timeout.parse() {
                self.ldap.timeout = value;
            } else {
                tracing::warn!("Invalid RADGROUPS_LDAP_TIMEOUT: {}", timeout);
            }
        }

        if let Ok(format) = std::env::var("RADGROUPS_LDAP_FORMAT") {
            match format.parse() {
                Ok(value) => self.ldap.format = value,
                Err(_) => tracing::warn!("Invalid RADGROUPS_LDAP_FORMAT: {}", format),
            }
        }

        if let Ok(attribute) = std::env::var("RADGROUPS_RADIUS_ATTRIBUTE") {
            self.radius.attribute_name = attribute;
        }

        if let Ok(prefix) = std::env::var("RADGROUPS_RADIUS_PREFIX") {
            self.radius.value_prefix = prefix;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        // clap restricts --format to "cn" / "dn", so the parse cannot fail
        if let Some(format) = cli.format.as_deref() {
            if let Ok(value) = format.parse() {
                self.ldap.format = value;
            }
        }
    }

    /// Validate the configuration
    ///
    /// # Returns
    ///
    /// Returns Ok(()) if valid, error describing the first problem found
    pub fn validate(&self) -> Result<()> {
        if self.ldap.host.is_empty() {
            return Err(RadgroupsError::Config("ldap.host cannot be empty".to_string()).into());
        }

        if self.ldap.port == 0 {
            return Err(RadgroupsError::Config("ldap.port cannot be 0".to_string()).into());
        }

        if self.ldap.user.is_empty() {
            return Err(RadgroupsError::Config("ldap.user cannot be empty".to_string()).into());
        }

        if self.ldap.password.is_empty() {
            return Err(RadgroupsError::Config("ldap.password cannot be empty".to_string()).into());
        }

        if self.ldap.base_dn.is_empty() {
            return Err(RadgroupsError::Config("ldap.baseDn cannot be empty".to_string()).into());
        }

        if self.ldap.timeout == 0 {
            return Err(
                RadgroupsError::Config("ldap.timeout must be greater than 0".to_string()).into(),
            );
        }

        if self.radius.attribute_name.is_empty() {
            return Err(RadgroupsError::Config(
                "radius.attributeName cannot be empty".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
