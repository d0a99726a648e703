//! Linearizes a hierarchy so that every record precedes its descendants.

use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;

use generational_arena::Index;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::domain::arena::HierarchyArena;
use crate::domain::record::Record;

/// Dequeue discipline of the flattening work queue.
///
/// Both orders put a parent before all of its descendants. Only
/// `LevelOrder` additionally emits every record of depth k before any
/// record of depth k+1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Traversal {
    /// FIFO: breadth-first, level by level
    #[default]
    LevelOrder,
    /// LIFO on the same queue: the legacy quasi depth-first order
    Stack,
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LevelOrder => write!(f, "level-order"),
            Self::Stack => write!(f, "stack"),
        }
    }
}

impl FromStr for Traversal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "level-order" | "level_order" | "level" | "bfs" => Ok(Self::LevelOrder),
            "stack" | "lifo" => Ok(Self::Stack),
            other => Err(format!("unknown traversal '{other}' (expected level-order or stack)")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LevelOrderFlattener {
    traversal: Traversal,
}

impl LevelOrderFlattener {
    pub fn new(traversal: Traversal) -> Self {
        Self { traversal }
    }

    /// Visit order of the nodes reachable from the root.
    ///
    /// The root comes first, then the queue seeded with its children is
    /// drained. A node is visited at most once even if duplicate identifiers
    /// have linked it into a cycle.
    #[instrument(level = "debug", skip(arena))]
    pub fn order(&self, arena: &HierarchyArena) -> Vec<Index> {
        let Some(root) = arena.root() else {
            return Vec::new();
        };

        let mut order = Vec::with_capacity(arena.len());
        let mut seen = HashSet::with_capacity(arena.len());
        let mut queue: VecDeque<Index> = VecDeque::new();

        order.push(root);
        seen.insert(root);
        if let Some(node) = arena.get_node(root) {
            queue.extend(node.children.iter().copied());
        }

        while let Some(idx) = self.dequeue(&mut queue) {
            if !seen.insert(idx) {
                warn!(?idx, "node reached twice, skipping");
                continue;
            }
            order.push(idx);
            if let Some(node) = arena.get_node(idx) {
                queue.extend(node.children.iter().copied());
            }
        }
        order
    }

    fn dequeue(&self, queue: &mut VecDeque<Index>) -> Option<Index> {
        match self.traversal {
            Traversal::LevelOrder => queue.pop_front(),
            Traversal::Stack => queue.pop_back(),
        }
    }

    /// Consume the hierarchy and return its records in insertion order.
    ///
    /// An absent root yields an empty sequence.
    #[instrument(level = "debug", skip(arena), fields(nodes = arena.len()))]
    pub fn flatten(&self, mut arena: HierarchyArena) -> Vec<Record> {
        let order = self.order(&arena);
        let records: Vec<Record> = order
            .into_iter()
            .filter_map(|idx| {
                let data = arena.take_data(idx);
                if data.is_none() {
                    warn!(?idx, "node without record data reachable from root, skipping");
                }
                data
            })
            .collect();
        debug!(emitted = records.len(), "flattened hierarchy");
        records
    }
}
