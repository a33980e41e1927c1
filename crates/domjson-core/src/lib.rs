//! # domjson core
//!
//! Turns a rendered element tree into a compact JSON outline that keeps only
//! what a reader would see.
//!
//! Two filters decide what survives:
//! - [`is_visually_hidden`]: non-elements, `script`/`style`/... tags,
//!   `display: none`, `visibility: hidden` and 0x0 boxes.
//! - [`is_meaningless`]: bare `div`/`span`/... wrappers with no id, class,
//!   role, text or element children.
//!
//! A pruned node takes its whole subtree with it. Surviving nodes are keyed
//! by tag plus a per-tag counter in pre-order (`div0`, `div1`, `p0`) and carry
//! either a label (`div#id.cls/ content='...'`) or a mapping of their
//! surviving children.
//!
//! ```rust,ignore
//! let snapshot = DomSnapshot::load(path)?;
//! let json = snapshot.to_dom_json(&DomSerializer::default()).to_json_string()?;
//! // {"body":{"body0":{"span0":"span#x/ content='hi'"}}}
//! ```
//!
//! The tree is read through the [`HostNode`] trait; [`SnapshotNode`] is the
//! owned implementation produced by browser captures.

mod error;
mod host;
mod json;
mod label;
mod meaning;
mod serializer;
mod snapshot;
mod visibility;

pub use error::DomJsonError;
pub use host::{ComputedStyle, HostNode, NodeKind, RenderedSize};
pub use json::from_str_unbounded;
pub use label::{
    CONTENT_LIMIT, ELLIPSIS, collapse_whitespace, is_js_whitespace, node_label, truncate_content,
};
pub use meaning::{STRUCTURAL_TAGS, is_meaningless};
pub use serializer::{
    DomJsonTree, DomSerializer, NodeKey, NodeValue, SerializedNode, TagCounters,
    build_dom_json_tree, dom_json_string, dom_tree_to_json,
};
pub use snapshot::{DomSnapshot, SnapshotNode};
pub use visibility::{FilterOptions, INVISIBLE_TAGS, is_visually_hidden, is_visually_hidden_with};
