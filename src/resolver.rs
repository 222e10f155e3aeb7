//! Transitive group membership resolution
//!
//! The core of the tool: starting from a user's direct `memberOf` values,
//! walk the directory's group-membership relation until no new group DN
//! appears. Traversal is an explicit worklist rather than recursion, so
//! membership depth is unbounded and progress lives in plain state: a stack
//! of DNs still to expand and a visited set that gates every expansion.
//!
//! The visited set only ever grows and a DN enters it at most once, so a
//! membership cycle (A in B, B in A) contributes each DN exactly once and
//! cannot loop. Output order is depth-first preorder over the graph: a
//! group's whole subtree is emitted before its next sibling, reproducibly
//! for a fixed directory state.

use crate::directory::{DirectorySearch, ATTR_MEMBER_OF};
use crate::error::{RadgroupsError, Result};
use std::collections::HashSet;
use tracing::debug;

/// Resolve the ordered, deduplicated transitive closure of groups for a user
///
/// Requires an already-bound directory. Fails with
/// [`RadgroupsError::UserNotFound`] when the account-name filter matches no
/// entry; any directory failure during traversal aborts the run with no
/// partial result. A group DN whose own lookup matches nothing is a leaf:
/// it stays in the result but contributes no descendants.
pub async fn resolve_groups<D: DirectorySearch>(
    directory: &mut D,
    username: &str,
) -> Result<Vec<String>> {
    let entry = directory
        .find_user(username)
        .await?
        .ok_or_else(|| RadgroupsError::UserNotFound {
            username: username.to_string(),
        })?;

    let direct = entry.attr_values(ATTR_MEMBER_OF);
    debug!(
        username = %username,
        direct_groups = direct.len(),
        "Found user entry"
    );

    let mut visited: HashSet<String> = HashSet::new();
    let mut result: Vec<String> = Vec::with_capacity(direct.len());

    // Deduplicate in first-seen order, then push in reverse so the stack
    // pops the first direct group first.
    let mut seeds: Vec<String> = Vec::with_capacity(direct.len());
    for dn in direct {
        if visited.insert(dn.clone()) {
            seeds.push(dn);
        }
    }
    let mut stack: Vec<String> = seeds.into_iter().rev().collect();

    while let Some(dn) = stack.pop() {
        result.push(dn.clone());

        if let Some(group) = directory.find_group(&dn).await? {
            let nested = group.attr_values(ATTR_MEMBER_OF);
            let mut fresh: Vec<String> = Vec::with_capacity(nested.len());
            for parent_dn in nested {
                if visited.insert(parent_dn.clone()) {
                    fresh.push(parent_dn);
                }
            }
            for parent_dn in fresh.into_iter().rev() {
                stack.push(parent_dn);
            }
        }
        // No entry: the DN is a leaf (e.g. foreign/cross-domain reference)
    }

    debug!(
        username = %username,
        total_groups = result.len(),
        "Group resolution complete"
    );

    Ok(result)
}
