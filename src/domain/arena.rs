use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::key::NodeKey;
use crate::domain::record::Record;

/// Node in the arena-based hierarchy.
#[derive(Debug)]
pub struct HierarchyNode {
    /// Identifier this node was registered under
    pub key: NodeKey,
    /// Record payload, None while the node is only a forward reference
    pub data: Option<Record>,
    /// Index of parent node in the arena, None for roots and unattached nodes
    pub parent: Option<Index>,
    /// Indices of child nodes in attachment order
    pub children: Vec<Index>,
}

impl HierarchyNode {
    pub fn is_placeholder(&self) -> bool {
        self.data.is_none()
    }
}

/// Arena-based hierarchy built from parent-pointer records.
///
/// Ownership runs through the arena; parent and child links are plain
/// indices, so the back-reference to the parent never forms a cycle of owners.
/// Besides the tree itself the arena remembers what the builder saw along
/// the way (duplicate identifiers, every record that claimed to be the root)
/// so that strict validation can run after construction.
#[derive(Debug, Default)]
pub struct HierarchyArena {
    arena: Arena<HierarchyNode>,
    root: Option<Index>,
    root_claims: Vec<Index>,
    duplicates: Vec<NodeKey>,
}

impl HierarchyArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            ..Self::default()
        }
    }

    #[instrument(level = "trace", skip(self, data))]
    pub fn insert_node(&mut self, key: NodeKey, data: Option<Record>) -> Index {
        self.arena.insert(HierarchyNode {
            key,
            data,
            parent: None,
            children: Vec::new(),
        })
    }

    /// Append `child` to `parent`'s children and set the back-reference.
    #[instrument(level = "trace", skip(self))]
    pub fn attach(&mut self, parent: Index, child: Index) {
        if let Some(node) = self.arena.get_mut(parent) {
            node.children.push(child);
        }
        if let Some(node) = self.arena.get_mut(child) {
            node.parent = Some(parent);
        }
    }

    /// Mark `idx` as the root. The last call wins.
    pub fn set_root(&mut self, idx: Index) {
        self.root_claims.push(idx);
        self.root = Some(idx);
    }

    pub(crate) fn record_duplicate(&mut self, key: NodeKey) {
        self.duplicates.push(key);
    }

    pub fn get_node(&self, idx: Index) -> Option<&HierarchyNode> {
        self.arena.get(idx)
    }

    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut HierarchyNode> {
        self.arena.get_mut(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    /// Every node that was marked as root, in processing order.
    pub fn root_claims(&self) -> &[Index] {
        &self.root_claims
    }

    /// Identifiers that were defined by more than one record.
    pub fn duplicates(&self) -> &[NodeKey] {
        &self.duplicates
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (Index, &HierarchyNode)> {
        self.arena.iter()
    }

    /// Nodes that were referenced as a parent but never defined by a record.
    pub fn placeholders(&self) -> impl Iterator<Item = (Index, &HierarchyNode)> {
        self.arena.iter().filter(|(_, node)| node.is_placeholder())
    }

    /// Take the record out of a node, leaving it a placeholder.
    pub fn take_data(&mut self, idx: Index) -> Option<Record> {
        self.arena.get_mut(idx).and_then(|node| node.data.take())
    }

    /// Number of levels below and including the root; 0 without a root.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };
        let mut max_depth = 0;
        let mut stack = vec![(root, 1)];
        let mut seen = std::collections::HashSet::new();
        while let Some((idx, depth)) = stack.pop() {
            if !seen.insert(idx) {
                continue;
            }
            max_depth = max_depth.max(depth);
            if let Some(node) = self.get_node(idx) {
                stack.extend(node.children.iter().map(|&child| (child, depth + 1)));
            }
        }
        max_depth
    }

    /// Identifiers of nodes without children that hang below the root.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_keys(&self) -> Vec<NodeKey> {
        self.iter()
            .filter(|(_, node)| node.children.is_empty())
            .map(|(_, node)| node.key.clone())
            .collect()
    }

    /// Pre-order iteration from the root, children left to right.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }
}

pub struct TreeIterator<'a> {
    arena: &'a HierarchyArena,
    stack: Vec<Index>,
    seen: std::collections::HashSet<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a HierarchyArena) -> Self {
        Self {
            arena,
            stack: arena.root().into_iter().collect(),
            seen: std::collections::HashSet::new(),
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a HierarchyNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if !self.seen.insert(current_idx) {
                continue;
            }
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(node.children.iter().rev());
                return Some((current_idx, node));
            }
        }
        None
    }
}
