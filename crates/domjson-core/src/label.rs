//! Human-readable node labels: `tag#id.class1.class2/ content='...'`.

use crate::host::HostNode;

/// Maximum number of characters of text kept in a label.
pub const CONTENT_LIMIT: usize = 100;

/// Marker appended to truncated content.
pub const ELLIPSIS: char = '\u{2026}';

/// Build the label for `node`.
pub fn node_label<N: HostNode>(node: &N) -> String {
    let mut label = node.tag_name();

    if let Some(id) = node.id().filter(|id| !id.is_empty()) {
        label.push('#');
        label.push_str(id);
    }

    if let Some(class) = node.non_empty_attribute("class") {
        label.push('.');
        label.push_str(&split_js_whitespace(class).collect::<Vec<_>>().join("."));
    }

    label.push('/');

    let text = collapse_whitespace(&node.text_content());
    if !text.is_empty() {
        label.push_str(" content='");
        label.push_str(&truncate_content(&text));
        label.push('\'');
    }

    label
}

/// Whitespace as a browser script sees it (`\s`, `String.prototype.trim`).
///
/// Unicode `White_Space` minus U+0085, plus the byte order mark U+FEFF.
pub fn is_js_whitespace(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

fn split_js_whitespace(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_js_whitespace).filter(|s| !s.is_empty())
}

/// Trim and collapse every whitespace run to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    split_js_whitespace(text).collect::<Vec<_>>().join(" ")
}

/// Keep the first [`CONTENT_LIMIT`] characters, marking a cut with [`ELLIPSIS`].
pub fn truncate_content(text: &str) -> String {
    match text.char_indices().nth(CONTENT_LIMIT) {
        Some((cut, _)) => {
            let mut out = String::with_capacity(cut + ELLIPSIS.len_utf8());
            out.push_str(&text[..cut]);
            out.push(ELLIPSIS);
            out
        }
        None => text.to_string(),
    }
}
