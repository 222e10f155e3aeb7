//! Directory query interface
//!
//! This module wraps the LDAP protocol behind a narrow, mockable trait.
//! The resolver only ever needs two lookups: the initial user entry
//! (subtree search under the configured base DN) and a group entry by its
//! own DN (base-scope search). Both request only the `memberOf` attribute
//! and return at most one entry.

use crate::config::LdapConfig;
use crate::error::{RadgroupsError, Result};
use async_trait::async_trait;
use ldap3::{ldap_escape, Ldap, LdapConnAsync, LdapConnSettings, LdapError, Scope, SearchEntry};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

/// The one attribute every search requests
pub const ATTR_MEMBER_OF: &str = "memberOf";

/// noSuchObject: the server cannot resolve the search base DN
const RC_NO_SUCH_OBJECT: u32 = 32;
/// invalidCredentials: bind rejected
const RC_INVALID_CREDENTIALS: u32 = 49;

/// A single directory search result
///
/// A distinguished name plus a mapping from attribute name to its values.
/// Entries are ephemeral: produced per search call and consumed immediately
/// by the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Distinguished name of the entry
    pub dn: String,
    /// Attribute name to multi-valued string values
    pub attrs: HashMap<String, Vec<String>>,
}

impl DirectoryEntry {
    /// Collect every value of the named attribute
    ///
    /// Attribute names are compared ASCII case-insensitively and values are
    /// concatenated across all matching attributes, so a directory returning
    /// `memberOf` as one multi-valued attribute or as repeated attributes
    /// behaves identically. Value order within an attribute is preserved.
    pub fn attr_values(&self, name: &str) -> Vec<String> {
        self.attrs
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(name))
            .flat_map(|(_, values)| values.iter().cloned())
            .collect()
    }
}

impl From<SearchEntry> for DirectoryEntry {
    fn from(entry: SearchEntry) -> Self {
        Self {
            dn: entry.dn,
            attrs: entry.attrs,
        }
    }
}

/// The two lookups the group resolver performs
///
/// Implementations issue one blocking round trip per call and return the
/// first entry, or `None` when the search matched nothing. `find_group`
/// returning `None` marks the DN as a leaf (e.g. a foreign or cross-domain
/// reference the server cannot expand); it is not an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectorySearch: Send {
    /// Look up a user entry by account name under the configured base DN
    async fn find_user(&mut self, username: &str) -> Result<Option<DirectoryEntry>>;

    /// Look up a group entry by its distinguished name
    async fn find_group(&mut self, dn: &str) -> Result<Option<DirectoryEntry>>;
}

/// LDAP-backed implementation of [`DirectorySearch`]
///
/// One connection is opened and bound at construction and shared,
/// sequentially, for the whole run. The configured timeout (milliseconds)
/// applies to connect and bind.
pub struct LdapDirectory {
    ldap: Ldap,
    base_dn: String,
}

impl LdapDirectory {
    /// Connect to the directory server and bind with the configured account
    pub async fn connect(config: &LdapConfig) -> Result<Self> {
        let url = format!("ldap://{}:{}", config.host, config.port);
        let timeout = Duration::from_millis(config.timeout);

        debug!(url = %url, "Connecting to LDAP server");

        let settings = LdapConnSettings::new().set_conn_timeout(timeout);
        let (conn, mut ldap) = LdapConnAsync::with_settings(settings, &url)
            .await
            .map_err(|e| {
                RadgroupsError::Connection(format!(
                    "Failed to connect to LDAP server at {}: {}",
                    url, e
                ))
            })?;

        // Drive the connection in the background for the lifetime of the run
        tokio::spawn(async move {
            if let Err(e) = conn.drive().await {
                warn!(error = %e, "LDAP connection driver error");
            }
        });

        debug!(bind_user = %config.user, "Performing LDAP bind");

        let result = ldap
            .with_timeout(timeout)
            .simple_bind(&config.user, &config.password)
            .await
            .map_err(|e| {
                RadgroupsError::Connection(format!("LDAP bind failed for {}: {}", config.user, e))
            })?;

        if result.rc != 0 {
            if result.rc == RC_INVALID_CREDENTIALS {
                return Err(RadgroupsError::Connection(format!(
                    "LDAP bind failed for {}: invalid credentials",
                    config.user
                ))
                .into());
            }
            return Err(RadgroupsError::Connection(format!(
                "LDAP bind failed with code {}: {}",
                result.rc, result.text
            ))
            .into());
        }

        info!(host = %config.host, "LDAP connection established");

        Ok(Self {
            ldap,
            base_dn: config.base_dn.clone(),
        })
    }

    /// Release the connection
    ///
    /// Best-effort: unbind failures are logged and ignored. Called exactly
    /// once during teardown on every exit path after a successful connect.
    pub async fn unbind(&mut self) {
        if let Err(e) = self.ldap.unbind().await {
            debug!(error = %e, "LDAP unbind failed");
        }
    }

    /// One search round trip, first entry only
    ///
    /// Result code 32 (noSuchObject) maps to `None` so that group DNs the
    /// server cannot resolve are treated as leaves rather than failures.
    async fn search_first(
        &mut self,
        base: &str,
        scope: Scope,
        filter: &str,
    ) -> Result<Option<DirectoryEntry>> {
        let result = self
            .ldap
            .search(base, scope, filter, vec![ATTR_MEMBER_OF])
            .await
            .map_err(|e| RadgroupsError::Directory(format!("LDAP search failed: {}", e)))?;

        match result.success() {
            Ok((entries, _res)) => Ok(entries
                .into_iter()
                .next()
                .map(|entry| DirectoryEntry::from(SearchEntry::construct(entry)))),
            Err(LdapError::LdapResult { result }) if result.rc == RC_NO_SUCH_OBJECT => Ok(None),
            Err(e) => Err(RadgroupsError::Directory(format!("LDAP search failed: {}", e)).into()),
        }
    }
}

#[async_trait]
impl DirectorySearch for LdapDirectory {
    async fn find_user(&mut self, username: &str) -> Result<Option<DirectoryEntry>> {
        let filter = format!(
            "(&(sAMAccountName={})(objectClass=user))",
            ldap_escape(username)
        );
        let base = self.base_dn.clone();
        self.search_first(&base, Scope::Subtree, &filter).await
    }

    async fn find_group(&mut self, dn: &str) -> Result<Option<DirectoryEntry>> {
        self.search_first(dn, Scope::Base, "(objectClass=*)").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_with(attrs: &[(&str, &[&str])]) -> DirectoryEntry {
        DirectoryEntry {
            dn: "CN=test,DC=x".to_string(),
            attrs: attrs
                .iter()
                .map(|(k, vs)| {
                    (
                        k.to_string(),
                        vs.iter().map(|v| v.to_string()).collect::<Vec<_>>(),
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn test_attr_values_multi_valued() {
        let entry = entry_with(&[("memberOf", &["CN=A,DC=x", "CN=B,DC=x"])]);
        assert_eq!(
            entry.attr_values("memberOf"),
            vec!["CN=A,DC=x".to_string(), "CN=B,DC=x".to_string()]
        );
    }

    #[test]
    fn test_attr_values_case_insensitive_name() {
        let entry = entry_with(&[("memberof", &["CN=A,DC=x"])]);
        assert_eq!(entry.attr_values("memberOf"), vec!["CN=A,DC=x".to_string()]);
    }

    #[test]
    fn test_attr_values_missing_attribute() {
        let entry = entry_with(&[("cn", &["test"])]);
        assert!(entry.attr_values("memberOf").is_empty());
    }

    #[test]
    fn test_directory_entry_from_search_entry() {
        let mut attrs = HashMap::new();
        attrs.insert("memberOf".to_string(), vec!["CN=A,DC=x".to_string()]);
        let search_entry = SearchEntry {
            dn: "CN=jdoe,OU=Users,DC=x".to_string(),
            attrs,
            bin_attrs: HashMap::new(),
        };

        let entry = DirectoryEntry::from(search_entry);
        assert_eq!(entry.dn, "CN=jdoe,OU=Users,DC=x");
        assert_eq!(entry.attr_values("memberOf"), vec!["CN=A,DC=x".to_string()]);
    }
}
