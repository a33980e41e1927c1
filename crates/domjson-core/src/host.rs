//! Host collaborator contract: the element tree and layout queries the
//! filters and serializer read from.

use serde::{Deserialize, Serialize};

/// DOM node kind, numbered like `Node.nodeType`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u16", into = "u16")]
pub enum NodeKind {
    #[default]
    Element,
    Text,
    CData,
    Comment,
    Document,
    Fragment,
    Other(u16),
}

impl NodeKind {
    pub fn is_element(self) -> bool {
        self == NodeKind::Element
    }

    /// Whether this node contributes characters to an ancestor's `textContent`.
    pub fn is_character_data(self) -> bool {
        matches!(self, NodeKind::Text | NodeKind::CData)
    }
}

impl From<u16> for NodeKind {
    fn from(value: u16) -> Self {
        match value {
            1 => NodeKind::Element,
            3 => NodeKind::Text,
            4 => NodeKind::CData,
            8 => NodeKind::Comment,
            9 => NodeKind::Document,
            11 => NodeKind::Fragment,
            other => NodeKind::Other(other),
        }
    }
}

impl From<NodeKind> for u16 {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Element => 1,
            NodeKind::Text => 3,
            NodeKind::CData => 4,
            NodeKind::Comment => 8,
            NodeKind::Document => 9,
            NodeKind::Fragment => 11,
            NodeKind::Other(n) => n,
        }
    }
}

/// Computed style facts relevant to visibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComputedStyle {
    /// Computed `display` value.
    #[serde(default)]
    pub display: String,
    /// Computed `visibility` value.
    #[serde(default)]
    pub visibility: String,
    /// Computed `opacity` value, as reported by the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<String>,
}

impl ComputedStyle {
    /// `display: none` or `visibility: hidden`.
    pub fn hides_element(&self) -> bool {
        self.display == "none" || self.visibility == "hidden"
    }

    /// Whether the computed opacity parses to exactly zero.
    pub fn is_transparent(&self) -> bool {
        self.opacity
            .as_deref()
            .and_then(|o| o.trim().parse::<f64>().ok())
            .is_some_and(|o| o == 0.0)
    }
}

/// Rendered layout size (`offsetWidth` / `offsetHeight`).
///
/// A dimension is `None` when the host has no such measurement for the node,
/// e.g. SVG children, which never count as zero-sized.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderedSize {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl RenderedSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }

    /// Both dimensions are reported and exactly zero.
    pub fn is_empty(&self) -> bool {
        self.width == Some(0.0) && self.height == Some(0.0)
    }
}

/// A node in a host-rendered element tree.
///
/// Implementations must answer every query synchronously and consistently
/// for the duration of one serialization pass.
pub trait HostNode {
    /// The node's kind.
    fn node_kind(&self) -> NodeKind;

    /// Raw node name as reported by the host (`DIV`, `svg`, `#text`).
    fn node_name(&self) -> &str;

    /// Attribute lookup by name.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Identifier attribute.
    fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// Direct element children in document order.
    fn element_children(&self) -> impl Iterator<Item = &Self>;

    /// Aggregate text content of the node and all its descendants.
    fn text_content(&self) -> String;

    /// Host-computed style.
    fn computed_style(&self) -> ComputedStyle;

    /// Host-computed rendered size.
    fn rendered_size(&self) -> RenderedSize;

    /// Lower-cased node name.
    fn tag_name(&self) -> String {
        self.node_name().to_lowercase()
    }

    /// Attribute value if present and non-empty.
    fn non_empty_attribute(&self, name: &str) -> Option<&str> {
        self.attribute(name).filter(|v| !v.is_empty())
    }
}
