//! Shared test fixtures for integration tests
//!
//! Provides an in-memory directory: a set of user entries plus a group
//! membership graph keyed by group DN, with optional poisoned DNs whose
//! lookup fails like a directory fault.

use async_trait::async_trait;
use radgroups::directory::{DirectoryEntry, DirectorySearch};
use radgroups::error::{RadgroupsError, Result};
use std::collections::{HashMap, HashSet};

/// In-memory [`DirectorySearch`] implementation
#[derive(Default)]
pub struct FakeDirectory {
    /// username -> direct memberOf values
    users: HashMap<String, Vec<String>>,
    /// group DN -> the group's own memberOf values; DNs absent from this
    /// map behave like unresolvable leaves
    groups: HashMap<String, Vec<String>>,
    /// group DNs whose lookup fails with a directory error
    failing: HashSet<String>,
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, username: &str, member_of: &[&str]) -> Self {
        self.users.insert(
            username.to_string(),
            member_of.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    pub fn with_group(mut self, dn: &str, member_of: &[&str]) -> Self {
        self.groups.insert(
            dn.to_string(),
            member_of.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    pub fn with_failing_group(mut self, dn: &str) -> Self {
        self.failing.insert(dn.to_string());
        self
    }

    fn entry(dn: &str, member_of: &[String]) -> DirectoryEntry {
        let mut attrs = HashMap::new();
        if !member_of.is_empty() {
            attrs.insert("memberOf".to_string(), member_of.to_vec());
        }
        DirectoryEntry {
            dn: dn.to_string(),
            attrs,
        }
    }
}

#[async_trait]
impl DirectorySearch for FakeDirectory {
    async fn find_user(&mut self, username: &str) -> Result<Option<DirectoryEntry>> {
        Ok(self.users.get(username).map(|member_of| {
            Self::entry(
                &format!("CN={},OU=Users,DC=example,DC=com", username),
                member_of,
            )
        }))
    }

    async fn find_group(&mut self, dn: &str) -> Result<Option<DirectoryEntry>> {
        if self.failing.contains(dn) {
            return Err(RadgroupsError::Directory(format!("search failed for {}", dn)).into());
        }
        Ok(self
            .groups
            .get(dn)
            .map(|member_of| Self::entry(dn, member_of)))
    }
}
