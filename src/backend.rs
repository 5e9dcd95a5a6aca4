//! HTML backend abstraction for walking parsed document trees
//!
//! The extraction algorithm only needs a handful of read-only queries on a
//! node: its identity, tag name, attributes, children and text. Any tree that
//! can answer them implements [`DocumentNode`]; the `scraper` tree is supported
//! out of the box.

use std::{fmt::Debug, hash::Hash};

use scraper::Node;

/// Trait representing a node in a parsed HTML document tree
///
/// This trait abstracts over different HTML parsing backends so the microdata
/// reader can work with any parser that exposes this interface. Implementors
/// are expected to be cheap handles into an immutable tree.
pub trait DocumentNode: Clone {
    /// Identity of a node, stable for the lifetime of the tree
    type Key: Copy + Eq + Hash + Debug;

    /// Get the identity of this node
    fn key(&self) -> Self::Key;

    /// Get the lower-case tag name of this node
    ///
    /// Returns `None` for anything that is not an element (text, comments,
    /// the document node itself).
    fn tag_name(&self) -> Option<&str>;

    /// Get the value of an HTML attribute
    ///
    /// Returns `None` if the attribute doesn't exist. When an attribute is
    /// declared more than once, the first declaration wins.
    fn attr(&self, name: &str) -> Option<&str>;

    /// Get the children of this node in document order
    fn children(&self) -> Vec<Self>;

    /// Get the content of a text node
    ///
    /// Returns `None` for every other kind of node.
    fn text(&self) -> Option<&str>;

    /// Check whether an attribute is present, regardless of its value
    fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Get this node and all of its descendants in document (pre-)order
    fn descendants(&self) -> Vec<Self> {
        let mut out = Vec::new();
        let mut stack = vec![self.clone()];
        while let Some(node) = stack.pop() {
            let mut children = node.children();
            children.reverse();
            stack.extend(children);
            out.push(node);
        }
        out
    }

    /// Get the concatenated content of every descendant text node
    fn text_content(&self) -> String {
        let mut text = String::new();
        for node in self.descendants() {
            if let Some(content) = node.text() {
                text.push_str(content);
            }
        }
        text
    }
}

/// Implementation of DocumentNode for nodes of a `scraper` document
impl DocumentNode for ego_tree::NodeRef<'_, Node> {
    type Key = ego_tree::NodeId;

    fn key(&self) -> Self::Key {
        self.id()
    }

    fn tag_name(&self) -> Option<&str> {
        self.value().as_element().map(|element| element.name())
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.value().as_element()?.attr(name)
    }

    fn children(&self) -> Vec<Self> {
        ego_tree::NodeRef::children(self).collect()
    }

    fn text(&self) -> Option<&str> {
        self.value().as_text().map(|text| &**text)
    }

    fn descendants(&self) -> Vec<Self> {
        ego_tree::NodeRef::descendants(self).collect()
    }
}

/// Split an attribute value into its space-separated tokens
///
/// Leading, trailing and repeated whitespace is ignored and empty tokens are
/// dropped, so `"  a   b "` yields `["a", "b"]`.
pub fn split_tokens(value: &str) -> impl Iterator<Item = &str> {
    value.split_ascii_whitespace()
}
