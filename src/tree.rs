//! Tree Utilities
//!
//! Helpers the demo tree view uses to feed rows.

use crate::node::{NodeKey, TreeNode};
use crate::row::RowPosition;

/// A visible row: node, its parent, and where it sits
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRow {
    pub node: TreeNode,
    pub parent: Option<TreeNode>,
    pub position: RowPosition,
}

/// Render nodes as indented rows using recursive DFS
/// Children of collapsed nodes are skipped
pub fn flatten_rows(roots: &[TreeNode]) -> Vec<FlatRow> {
    fn collect(
        nodes: &[TreeNode],
        parent: Option<&TreeNode>,
        path: &[NodeKey],
        lower_counts: &[usize],
        result: &mut Vec<FlatRow>,
    ) {
        for (i, node) in nodes.iter().enumerate() {
            let mut node_path = path.to_vec();
            node_path.push(node.key.clone());
            let mut node_counts = lower_counts.to_vec();
            node_counts.push(nodes.len() - i - 1);

            let index = result.len();
            result.push(FlatRow {
                node: node.clone(),
                parent: parent.cloned(),
                position: RowPosition {
                    path: node_path.clone(),
                    tree_index: index,
                    list_index: index,
                    lower_sibling_counts: node_counts.clone(),
                },
            });

            if node.expanded {
                if let Some(children) = node.loaded_children() {
                    collect(children, Some(node), &node_path, &node_counts, result);
                }
            }
        }
    }

    let mut result = Vec::new();
    collect(roots, None, &[], &[], &mut result);
    result
}

/// Find a node anywhere in the forest
pub fn find_node<'a>(roots: &'a [TreeNode], key: &NodeKey) -> Option<&'a TreeNode> {
    find_node_by(roots, &|node| &node.key == key)
}

/// First node, in depth-first order, matching `pred`
pub fn find_node_by<'a>(roots: &'a [TreeNode], pred: &dyn Fn(&TreeNode) -> bool) -> Option<&'a TreeNode> {
    roots.iter().find_map(|node| {
        if pred(node) {
            Some(node)
        } else {
            node.loaded_children().and_then(|children| find_node_by(children, pred))
        }
    })
}

/// Flip `expanded` on the node with `key`; false if no such node
///
/// Expanding a node with a loader runs it and keeps the result.
pub fn toggle_expanded(roots: &mut [TreeNode], key: &NodeKey) -> bool {
    use crate::node::NodeChildren;

    for node in roots.iter_mut() {
        if &node.key == key {
            node.expanded = !node.expanded;
            if node.expanded {
                if let Some(NodeChildren::Deferred(loader)) = node.children.clone() {
                    let loaded = loader(node);
                    log::debug!(target: "TREE", "loaded {} children for {}", loaded.len(), node.key);
                    node.children = Some(NodeChildren::Loaded(loaded));
                }
            }
            return true;
        }
        if let Some(NodeChildren::Loaded(children)) = &mut node.children {
            if toggle_expanded(children, key) {
                return true;
            }
        }
    }
    false
}
