//! Document-wide lookups built before items are read
//!
//! [`IdIndex`] maps `id` attribute values to nodes so that `itemref` can pull
//! in subtrees from anywhere in the document. [`top_level_items`] finds the
//! roots of the items that are not the value of some other property.

use std::collections::HashMap;

use crate::backend::DocumentNode;

/// Lookup from `id` attribute value to the node carrying it
///
/// Built in one pass over the tree and read-only afterwards. When an id is
/// declared more than once, the first node in document order wins.
#[derive(Debug, Clone)]
pub struct IdIndex<N> {
    nodes: HashMap<String, N>,
}

impl<N: DocumentNode> IdIndex<N> {
    /// Index every node below (and including) `root` that has an `id`
    pub fn build(root: &N) -> Self {
        let mut nodes = HashMap::new();
        for node in root.descendants() {
            if let Some(id) = node.attr("id") {
                nodes.entry(id.to_string()).or_insert_with(|| node.clone());
            }
        }
        Self { nodes }
    }

    /// Get the node with the given id
    pub fn get(&self, id: &str) -> Option<&N> {
        self.nodes.get(id)
    }

    /// Number of indexed ids
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether no element carries an id
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Find the root nodes of all top-level items, in document order
///
/// A node is a top-level item root when it has `itemscope` but no `itemprop`;
/// a node with `itemprop` is always the value of another item's property.
pub fn top_level_items<N: DocumentNode>(root: &N) -> Vec<N> {
    root.descendants()
        .into_iter()
        .filter(|node| node.has_attr("itemscope") && !node.has_attr("itemprop"))
        .collect()
}
