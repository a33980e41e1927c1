//! Meaning filter: flags bare structural wrappers that carry nothing.

use crate::host::HostNode;
use crate::label::is_js_whitespace;

/// Layout-only tags that may be dropped when they are empty and unnamed.
pub const STRUCTURAL_TAGS: &[&str] = &["div", "span", "section", "article", "header", "footer", "main"];

/// Whether `node` is noise.
///
/// Non-element nodes are always meaningless. A [`STRUCTURAL_TAGS`] element is
/// meaningless when it has no id, class or role, no non-blank text and no
/// element children. Every other element is meaningful.
pub fn is_meaningless<N: HostNode>(node: &N) -> bool {
    if !node.node_kind().is_element() {
        return true;
    }

    let tag_name = node.tag_name();
    if !STRUCTURAL_TAGS.contains(&tag_name.as_str()) {
        return false;
    }

    let has_useful_attrs = node.id().is_some_and(|id| !id.is_empty())
        || node.non_empty_attribute("class").is_some()
        || node.non_empty_attribute("role").is_some();
    if has_useful_attrs {
        return false;
    }

    if node.element_children().next().is_some() {
        return false;
    }

    node.text_content().trim_matches(is_js_whitespace).is_empty()
}
