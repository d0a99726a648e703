use std::collections::{HashMap, HashSet};

use generational_arena::Index;
use termtree::Tree;

use crate::domain::arena::HierarchyArena;

/// Levels rendered below the root; deeper subtrees collapse into one line.
pub const MAX_RENDER_DEPTH: usize = 64;

/// Rendering of a hierarchy as a `termtree` for terminal output.
pub trait TreeDisplay {
    fn to_tree_string(&self) -> Tree<String>;
}

enum Frame {
    Enter(Index, usize),
    Exit(Index),
}

fn label(arena: &HierarchyArena, idx: Index) -> String {
    match arena.get_node(idx) {
        Some(node) if node.is_placeholder() => format!("{} (undefined)", node.key),
        Some(node) => node.key.to_string(),
        None => "?".to_string(),
    }
}

/// Count the not yet visited nodes below `idx`, marking them visited.
fn hidden_below(arena: &HierarchyArena, idx: Index, seen: &mut HashSet<Index>) -> usize {
    let mut count = 0;
    let mut stack: Vec<Index> = arena
        .get_node(idx)
        .map(|node| node.children.clone())
        .unwrap_or_default();
    while let Some(child) = stack.pop() {
        if !seen.insert(child) {
            continue;
        }
        count += 1;
        if let Some(node) = arena.get_node(child) {
            stack.extend(node.children.iter().copied());
        }
    }
    count
}

impl TreeDisplay for HierarchyArena {
    /// Built bottom-up with an explicit stack, so chain length does not
    /// grow the call stack. The result is at most `MAX_RENDER_DEPTH` levels
    /// deep, which keeps `termtree`'s recursive `Display` bounded as well.
    fn to_tree_string(&self) -> Tree<String> {
        let Some(root_idx) = self.root() else {
            return Tree::new("Empty tree".to_string());
        };

        let mut built: HashMap<Index, Tree<String>> = HashMap::new();
        let mut seen = HashSet::from([root_idx]);
        let mut stack = vec![Frame::Enter(root_idx, 0)];

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(idx, depth) => {
                    let Some(node) = self.get_node(idx) else {
                        continue;
                    };
                    if depth >= MAX_RENDER_DEPTH && !node.children.is_empty() {
                        let hidden = hidden_below(self, idx, &mut seen);
                        let collapsed = format!("{} ... ({hidden} more below)", label(self, idx));
                        built.insert(idx, Tree::new(collapsed));
                        continue;
                    }
                    stack.push(Frame::Exit(idx));
                    for &child in node.children.iter().rev() {
                        if seen.insert(child) {
                            stack.push(Frame::Enter(child, depth + 1));
                        }
                    }
                }
                Frame::Exit(idx) => {
                    let mut tree = Tree::new(label(self, idx));
                    if let Some(node) = self.get_node(idx) {
                        for &child in &node.children {
                            // Missing means the child was already placed elsewhere
                            let subtree = built.remove(&child).unwrap_or_else(|| {
                                Tree::new(format!("{} (repeated)", label(self, child)))
                            });
                            tree.push(subtree);
                        }
                    }
                    built.insert(idx, tree);
                }
            }
        }

        built
            .remove(&root_idx)
            .unwrap_or_else(|| Tree::new(label(self, root_idx)))
    }
}
