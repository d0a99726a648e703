//! Structural checks on a built hierarchy.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::arena::HierarchyArena;
use crate::domain::error::{DomainResult, HierarchyViolation};
use crate::domain::key::NodeKey;

/// How much of the single-tree contract is enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationMode {
    /// Accept any input and order whatever is reachable from the root
    #[default]
    Lenient,
    /// Reject input that does not describe exactly one tree
    Strict,
}

/// Check that `arena` holds exactly one tree covering every record.
///
/// Empty input is valid. Checks run in a fixed order (duplicates, roots,
/// orphan references, reachability) and the first violation is returned.
#[instrument(level = "debug", skip(arena), fields(nodes = arena.len()))]
pub fn validate(arena: &HierarchyArena) -> DomainResult<()> {
    if arena.is_empty() {
        return Ok(());
    }

    if let Some(key) = arena.duplicates().first() {
        return Err(HierarchyViolation::DuplicateId(key.clone()).into());
    }

    if arena.root().is_none() {
        return Err(HierarchyViolation::NoRoot.into());
    }

    let claims: Vec<NodeKey> = arena
        .root_claims()
        .iter()
        .filter_map(|&idx| arena.get_node(idx))
        .map(|node| node.key.clone())
        .collect();
    if claims.len() > 1 {
        return Err(HierarchyViolation::MultipleRoots(claims).into());
    }

    if let Some((_, node)) = arena.placeholders().next() {
        return Err(HierarchyViolation::OrphanReference(node.key.clone()).into());
    }

    let reachable: HashSet<_> = arena.iter().map(|(idx, _)| idx).collect();
    if reachable.len() < arena.len() {
        let mut missing: Vec<NodeKey> = arena
            .nodes()
            .filter(|(idx, _)| !reachable.contains(idx))
            .map(|(_, node)| node.key.clone())
            .collect();
        missing.sort();
        return Err(HierarchyViolation::Unreachable(missing).into());
    }

    Ok(())
}
