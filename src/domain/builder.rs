//! Builds a rooted hierarchy from parent-pointer records in arbitrary order.

use std::collections::HashMap;

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::HierarchyArena;
use crate::domain::error::DomainResult;
use crate::domain::key::NodeKey;
use crate::domain::record::{FieldNames, Record};

/// Constructs a [`HierarchyArena`] in a single forward pass.
///
/// A record may name a parent that has not been seen yet. In that case a
/// placeholder node is registered for the parent and filled in once the
/// parent's own record arrives.
#[derive(Debug, Default)]
pub struct HierarchyBuilder {
    fields: FieldNames,
}

impl HierarchyBuilder {
    pub fn new(fields: FieldNames) -> Self {
        Self { fields }
    }

    /// Build the hierarchy. The root is `None` when no record has a null parent.
    ///
    /// Duplicate identifiers overwrite the node's data (last write wins) and
    /// keep its children; when several records have a null parent the last
    /// one becomes the root. Both are recorded on the arena for validation.
    #[instrument(level = "debug", skip_all)]
    pub fn build<I>(&self, records: I) -> DomainResult<HierarchyArena>
    where
        I: IntoIterator<Item = Record>,
    {
        let records = records.into_iter();
        let mut tree = HierarchyArena::with_capacity(records.size_hint().0);
        let mut lookup: HashMap<NodeKey, Index> = HashMap::with_capacity(records.size_hint().0);

        for (position, record) in records.enumerate() {
            let key = self.fields.id_of(&record, position)?;
            let parent_key = self.fields.parent_of(&record, position)?;

            let idx = match lookup.get(&key).copied() {
                Some(idx) => {
                    let previous = tree
                        .get_node_mut(idx)
                        .and_then(|node| node.data.replace(record));
                    if previous.is_some() {
                        debug!(%key, position, "duplicate identifier, keeping later record");
                        tree.record_duplicate(key.clone());
                    } else {
                        trace!(%key, position, "filled placeholder");
                    }
                    idx
                }
                None => {
                    let idx = tree.insert_node(key.clone(), Some(record));
                    lookup.insert(key.clone(), idx);
                    idx
                }
            };

            match parent_key {
                None => {
                    if let Some(previous) = tree.root() {
                        debug!(%key, ?previous, "replacing earlier root");
                    }
                    tree.set_root(idx);
                }
                Some(parent_key) => {
                    let parent_idx = *lookup.entry(parent_key.clone()).or_insert_with(|| {
                        trace!(
                            parent = %parent_key,
                            child = %key,
                            "forward reference, creating placeholder"
                        );
                        tree.insert_node(parent_key.clone(), None)
                    });
                    tree.attach(parent_idx, idx);
                }
            }
        }

        debug!(nodes = tree.len(), has_root = tree.root().is_some(), "hierarchy built");
        Ok(tree)
    }
}
