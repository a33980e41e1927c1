//! Keyed tree serializer.

use std::collections::HashMap;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, trace};

use crate::error::DomJsonError;
use crate::host::HostNode;
use crate::label::node_label;
use crate::meaning::is_meaningless;
use crate::visibility::{FilterOptions, is_visually_hidden_with};

/// Key of a serialized node: tag name plus its per-tag visit index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(String);

impl NodeKey {
    pub fn new(tag_name: &str, index: usize) -> Self {
        Self(format!("{}{}", tag_name, index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for NodeKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Serialize for NodeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Per-tag visit counters for one serialization pass.
///
/// Counts only ever grow, so every key handed out within a pass is unique.
#[derive(Debug, Clone, Default)]
pub struct TagCounters {
    counts: HashMap<String, usize>,
}

impl TagCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next key for `tag_name` and advance its counter.
    pub fn next_key(&mut self, tag_name: &str) -> NodeKey {
        let count = self.counts.entry(tag_name.to_string()).or_insert(0);
        let key = NodeKey::new(tag_name, *count);
        *count += 1;
        key
    }

    /// Number of keys handed out for `tag_name` so far.
    pub fn count(&self, tag_name: &str) -> usize {
        self.counts.get(tag_name).copied().unwrap_or(0)
    }

    /// Number of keys handed out across all tags.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Value stored under a [`NodeKey`].
#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    /// The node had no surviving children.
    Label(String),
    /// Surviving children in document order.
    Children(Vec<SerializedNode>),
}

impl Serialize for NodeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NodeValue::Label(label) => serializer.serialize_str(label),
            NodeValue::Children(children) => {
                let mut map = serializer.serialize_map(Some(children.len()))?;
                for child in children {
                    map.serialize_entry(&child.key, &child.value)?;
                }
                map.end()
            }
        }
    }
}

/// A surviving node: serializes as the single-entry map `{key: value}`.
#[derive(Debug, Clone, PartialEq)]
pub struct SerializedNode {
    pub key: NodeKey,
    pub value: NodeValue,
}

impl SerializedNode {
    /// The label, if this node is a leaf.
    pub fn label(&self) -> Option<&str> {
        match &self.value {
            NodeValue::Label(label) => Some(label),
            NodeValue::Children(_) => None,
        }
    }

    /// Surviving children; empty for leaves.
    pub fn children(&self) -> &[SerializedNode] {
        match &self.value {
            NodeValue::Label(_) => &[],
            NodeValue::Children(children) => children,
        }
    }

    /// Direct child by key.
    pub fn child(&self, key: &str) -> Option<&SerializedNode> {
        self.children().iter().find(|c| c.key == key)
    }

    /// Keys of this node and all its descendants in pre-order.
    pub fn preorder_keys(&self) -> Vec<&NodeKey> {
        let mut keys = Vec::new();
        self.collect_keys(&mut keys);
        keys
    }

    fn collect_keys<'a>(&'a self, keys: &mut Vec<&'a NodeKey>) {
        keys.push(&self.key);
        for child in self.children() {
            child.collect_keys(keys);
        }
    }
}

impl Serialize for SerializedNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.key, &self.value)?;
        map.end()
    }
}

/// Top-level output: `{root_tag: <serialized root or null>}`.
#[derive(Debug, Clone, PartialEq)]
pub struct DomJsonTree {
    /// Bare lower-cased tag name of the root, without a counter suffix.
    pub root_tag: String,
    /// Serialized root; `None` when the root itself was pruned.
    pub root: Option<SerializedNode>,
}

impl DomJsonTree {
    pub fn to_json_string(&self) -> Result<String, DomJsonError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_string_pretty(&self) -> Result<String, DomJsonError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_value(&self) -> Result<serde_json::Value, DomJsonError> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Serialize for DomJsonTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.root_tag, &self.root)?;
        map.end()
    }
}

/// Walks a host tree, pruning hidden and meaningless subtrees.
#[derive(Debug, Clone, Default)]
pub struct DomSerializer {
    options: FilterOptions,
}

impl DomSerializer {
    pub fn new(options: FilterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Whether `node` and its whole subtree are dropped.
    pub fn is_pruned<N: HostNode>(&self, node: &N) -> bool {
        is_visually_hidden_with(node, &self.options) || is_meaningless(node)
    }

    /// Serialize `node`, drawing keys from `counters`.
    ///
    /// Returns `None` when the node is pruned; descendants of a pruned node
    /// are never visited.
    pub fn serialize_node<N: HostNode>(
        &self,
        node: &N,
        counters: &mut TagCounters,
    ) -> Option<SerializedNode> {
        if self.is_pruned(node) {
            trace!("Pruned <{}>", node.node_name());
            return None;
        }

        let tag_name = node.tag_name();
        let key = counters.next_key(&tag_name);

        let children: Vec<SerializedNode> = node
            .element_children()
            .filter_map(|child| self.serialize_node(child, counters))
            .collect();

        debug_assert!(
            has_unique_keys(&children),
            "duplicate child keys under {}",
            key
        );

        let value = if children.is_empty() {
            NodeValue::Label(node_label(node))
        } else {
            NodeValue::Children(children)
        };

        Some(SerializedNode { key, value })
    }

    /// Serialize the tree under `root` with fresh counters.
    pub fn build_tree<N: HostNode>(&self, root: &N) -> DomJsonTree {
        let mut counters = TagCounters::new();
        let root_tag = root.tag_name();
        let serialized = self.serialize_node(root, &mut counters);

        debug!(
            "Serialized <{}>: {} nodes kept{}",
            root_tag,
            counters.total(),
            if serialized.is_none() { " (root pruned)" } else { "" }
        );

        DomJsonTree {
            root_tag,
            root: serialized,
        }
    }
}

fn has_unique_keys(children: &[SerializedNode]) -> bool {
    let mut seen = std::collections::HashSet::with_capacity(children.len());
    children.iter().all(|c| seen.insert(&c.key))
}

/// Serialize `node` with the default filters and the caller's counters.
pub fn dom_tree_to_json<N: HostNode>(node: &N, counters: &mut TagCounters) -> Option<SerializedNode> {
    DomSerializer::default().serialize_node(node, counters)
}

/// Serialize the tree under `root` with the default filters.
pub fn build_dom_json_tree<N: HostNode>(root: &N) -> DomJsonTree {
    DomSerializer::default().build_tree(root)
}

/// Serialize the tree under `root` straight to a compact JSON string.
pub fn dom_json_string<N: HostNode>(root: &N) -> Result<String, DomJsonError> {
    build_dom_json_tree(root).to_json_string()
}

#[cfg(test)]
#[path = "serializer_tests.rs"]
mod tests;
