//! Owned DOM snapshot: a captured element tree with its computed layout facts.
//!
//! Snapshots are what a browser capture produces and what the serializer
//! walks. They decode from camelCase JSON:
//!
//! ```json
//! {
//!   "url": "https://example.com/",
//!   "title": "Example",
//!   "body": {
//!     "nodeType": 1,
//!     "nodeName": "BODY",
//!     "attributes": {"class": "home"},
//!     "style": {"display": "block", "visibility": "visible", "opacity": "1"},
//!     "offsetWidth": 1280,
//!     "offsetHeight": 900,
//!     "children": [{"nodeType": 3, "text": "Hello"}]
//!   }
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DomJsonError;
use crate::host::{ComputedStyle, HostNode, NodeKind, RenderedSize};
use crate::json::from_str_unbounded;
use crate::serializer::{DomJsonTree, DomSerializer};

/// A captured page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomSnapshot {
    /// Page URL at capture time.
    #[serde(default)]
    pub url: String,
    /// Page title at capture time.
    #[serde(default)]
    pub title: String,
    /// The document body, the default serialization root.
    pub body: SnapshotNode,
}

impl DomSnapshot {
    pub fn new(body: SnapshotNode) -> Self {
        Self {
            url: String::new(),
            title: String::new(),
            body,
        }
    }

    /// Decode a snapshot from JSON text. Nesting depth is not limited.
    pub fn from_json(json: &str) -> Result<Self, DomJsonError> {
        Ok(from_str_unbounded(json)?)
    }

    /// Decode a snapshot from an already parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, DomJsonError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Read a snapshot file.
    pub fn load(path: &Path) -> Result<Self, DomJsonError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Read a snapshot from any reader, e.g. stdin.
    pub fn read_from(mut reader: impl Read) -> Result<Self, DomJsonError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::from_json(&content)
    }

    /// Serialize the body with `serializer`.
    pub fn to_dom_json(&self, serializer: &DomSerializer) -> DomJsonTree {
        serializer.build_tree(&self.body)
    }
}

/// One node of a captured tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotNode {
    /// DOM node type.
    #[serde(default)]
    pub node_type: NodeKind,

    /// Node name as the host reports it (`DIV`, `#text`).
    #[serde(default)]
    pub node_name: String,

    /// Element attributes.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attributes: HashMap<String, String>,

    /// Character data for text and CDATA nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Computed style.
    #[serde(default)]
    pub style: ComputedStyle,

    /// `offsetWidth`, absent when the host has no layout box for the node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_width: Option<f64>,

    /// `offsetHeight`, absent when the host has no layout box for the node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_height: Option<f64>,

    /// All child nodes, including text and comments, in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SnapshotNode>,
}

impl SnapshotNode {
    /// An element with no attributes, style or size.
    pub fn element(name: impl Into<String>) -> Self {
        Self {
            node_type: NodeKind::Element,
            node_name: name.into(),
            ..Default::default()
        }
    }

    /// A text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            node_type: NodeKind::Text,
            node_name: "#text".to_string(),
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// A comment node.
    pub fn comment(text: impl Into<String>) -> Self {
        Self {
            node_type: NodeKind::Comment,
            node_name: "#comment".to_string(),
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Append a text child.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(SnapshotNode::text(text))
    }

    pub fn with_child(mut self, child: SnapshotNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = SnapshotNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.offset_width = Some(width);
        self.offset_height = Some(height);
        self
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.style.display = display.into();
        self
    }

    pub fn with_visibility(mut self, visibility: impl Into<String>) -> Self {
        self.style.visibility = visibility.into();
        self
    }

    pub fn with_opacity(mut self, opacity: impl Into<String>) -> Self {
        self.style.opacity = Some(opacity.into());
        self
    }

    fn collect_text(&self, out: &mut String) {
        if self.node_type.is_character_data() {
            if let Some(text) = &self.text {
                out.push_str(text);
            }
            return;
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }
}

impl HostNode for SnapshotNode {
    fn node_kind(&self) -> NodeKind {
        self.node_type
    }

    fn node_name(&self) -> &str {
        &self.node_name
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn element_children(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter(|c| c.node_type.is_element())
    }

    fn text_content(&self) -> String {
        // Comments report their own data; every other node concatenates
        // descendant character data.
        if self.node_type == NodeKind::Comment {
            return self.text.clone().unwrap_or_default();
        }
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn computed_style(&self) -> ComputedStyle {
        self.style.clone()
    }

    fn rendered_size(&self) -> RenderedSize {
        RenderedSize {
            width: self.offset_width,
            height: self.offset_height,
        }
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
