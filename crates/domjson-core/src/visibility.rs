//! Visibility filter: decides whether a node is display-hidden.

use crate::host::HostNode;

/// Tags that never render visible content.
pub const INVISIBLE_TAGS: &[&str] = &["script", "style", "meta", "link", "template", "noscript"];

/// Options that relax or tighten the visibility rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Treat `opacity: 0` as hidden. Off unless explicitly requested.
    pub exclude_transparent: bool,
}

impl FilterOptions {
    pub fn exclude_transparent(mut self, enabled: bool) -> Self {
        self.exclude_transparent = enabled;
        self
    }
}

/// Whether `node` is invisible under the default rules.
pub fn is_visually_hidden<N: HostNode>(node: &N) -> bool {
    is_visually_hidden_with(node, &FilterOptions::default())
}

/// Whether `node` is invisible.
///
/// Rules are checked in order and the first match wins: non-element nodes,
/// [`INVISIBLE_TAGS`], `display: none` / `visibility: hidden` (plus zero
/// opacity when enabled), then a rendered size of exactly 0x0.
pub fn is_visually_hidden_with<N: HostNode>(node: &N, options: &FilterOptions) -> bool {
    if !node.node_kind().is_element() {
        return true;
    }

    let tag_name = node.tag_name();
    if INVISIBLE_TAGS.contains(&tag_name.as_str()) {
        return true;
    }

    let style = node.computed_style();
    if style.hides_element() || (options.exclude_transparent && style.is_transparent()) {
        return true;
    }

    node.rendered_size().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::SnapshotNode;

    fn visible(tag: &str) -> SnapshotNode {
        SnapshotNode::element(tag).with_size(100.0, 20.0)
    }

    #[test]
    fn test_text_and_comment_nodes_are_hidden() {
        assert!(is_visually_hidden(&SnapshotNode::text("hello")));
        assert!(is_visually_hidden(&SnapshotNode::comment("note")));
    }

    #[test]
    fn test_invisible_tags() {
        for tag in INVISIBLE_TAGS {
            assert!(is_visually_hidden(&visible(tag)), "{} should be hidden", tag);
        }
        assert!(is_visually_hidden(&visible("SCRIPT")));
        assert!(!is_visually_hidden(&visible("p")));
    }

    #[test]
    fn test_display_none() {
        let node = visible("p").with_display("none").with_child(SnapshotNode::text("text"));
        assert!(is_visually_hidden(&node));
    }

    #[test]
    fn test_visibility_hidden() {
        assert!(is_visually_hidden(&visible("p").with_visibility("hidden")));
        assert!(!is_visually_hidden(&visible("p").with_visibility("collapse")));
    }

    #[test]
    fn test_zero_size() {
        assert!(is_visually_hidden(&SnapshotNode::element("p").with_size(0.0, 0.0)));
        assert!(!is_visually_hidden(&SnapshotNode::element("p").with_size(0.0, 1.0)));
        assert!(!is_visually_hidden(&SnapshotNode::element("p").with_size(1.0, 0.0)));
    }

    #[test]
    fn test_unmeasured_size_is_not_zero() {
        assert!(!is_visually_hidden(&SnapshotNode::element("path")));
    }

    #[test]
    fn test_opacity_disabled_by_default() {
        let node = visible("p").with_opacity("0");
        assert!(!is_visually_hidden(&node));
        let options = FilterOptions::default().exclude_transparent(true);
        assert!(is_visually_hidden_with(&node, &options));
        assert!(!is_visually_hidden_with(&visible("p").with_opacity("1"), &options));
    }

    #[test]
    fn test_predicate_is_idempotent() {
        let node = visible("div").with_visibility("hidden");
        assert_eq!(is_visually_hidden(&node), is_visually_hidden(&node));
        let node = visible("div");
        assert_eq!(is_visually_hidden(&node), is_visually_hidden(&node));
    }
}
