use super::*;
use crate::snapshot::SnapshotNode;
use serde_json::json;

fn shown(tag: &str) -> SnapshotNode {
    SnapshotNode::element(tag).with_size(100.0, 20.0)
}

#[test]
fn test_tag_counters_increment_per_tag() {
    let mut counters = TagCounters::new();
    assert_eq!(counters.next_key("div"), "div0");
    assert_eq!(counters.next_key("div"), "div1");
    assert_eq!(counters.next_key("p"), "p0");
    assert_eq!(counters.count("div"), 2);
    assert_eq!(counters.count("span"), 0);
    assert_eq!(counters.total(), 3);
}

#[test]
fn test_node_key_display() {
    let key = NodeKey::new("section", 12);
    assert_eq!(key.to_string(), "section12");
    assert_eq!(key.as_str(), "section12");
}

#[test]
fn test_leaf_gets_label() {
    let node = shown("button").with_attr("id", "go").with_text("Go");
    let mut counters = TagCounters::new();
    let result = dom_tree_to_json(&node, &mut counters).unwrap();
    assert_eq!(result.key, "button0");
    assert_eq!(result.label(), Some("button#go/ content='Go'"));
}

#[test]
fn test_inner_node_gets_children_map() {
    let node = shown("ul").with_children([
        shown("li").with_text("one"),
        shown("li").with_text("two"),
    ]);
    let result = dom_tree_to_json(&node, &mut TagCounters::new()).unwrap();
    assert!(result.label().is_none());
    assert_eq!(result.children().len(), 2);
    assert_eq!(result.child("li0").unwrap().label(), Some("li/ content='one'"));
    assert_eq!(result.child("li1").unwrap().label(), Some("li/ content='two'"));
}

#[test]
fn test_pruned_root_returns_none() {
    let node = shown("div").with_display("none").with_text("secret");
    let mut counters = TagCounters::new();
    assert!(dom_tree_to_json(&node, &mut counters).is_none());
    assert_eq!(counters.total(), 0);
}

#[test]
fn test_pruned_subtree_is_not_visited() {
    let node = shown("main").with_attr("id", "app").with_children([
        shown("section")
            .with_visibility("hidden")
            .with_child(shown("p").with_text("inside hidden")),
        shown("p").with_text("outside"),
    ]);
    let mut counters = TagCounters::new();
    let result = dom_tree_to_json(&node, &mut counters).unwrap();

    assert_eq!(counters.count("section"), 0);
    assert_eq!(counters.count("p"), 1);
    assert_eq!(result.children().len(), 1);
    assert_eq!(result.child("p0").unwrap().label(), Some("p/ content='outside'"));
}

#[test]
fn test_children_that_all_prune_fall_back_to_label() {
    let node = shown("article")
        .with_attr("class", "post")
        .with_text("Body text")
        .with_child(shown("script").with_text("track()"));
    let result = dom_tree_to_json(&node, &mut TagCounters::new()).unwrap();
    // Label text is the aggregate content, script text included.
    assert_eq!(result.label(), Some("article.post/ content='Body texttrack()'"));
}

#[test]
fn test_counters_are_shared_across_depths() {
    let node = shown("div").with_attr("id", "a").with_children([
        shown("div")
            .with_attr("id", "b")
            .with_child(shown("div").with_attr("id", "c")),
        shown("div").with_attr("id", "d"),
    ]);
    let result = dom_tree_to_json(&node, &mut TagCounters::new()).unwrap();
    let keys: Vec<&str> = result.preorder_keys().into_iter().map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["div0", "div1", "div2", "div3"]);
    assert_eq!(result.child("div1").unwrap().child("div2").unwrap().label(), Some("div#c/"));
    assert_eq!(result.child("div3").unwrap().label(), Some("div#d/"));
}

#[test]
fn test_caller_counters_continue_between_calls() {
    let mut counters = TagCounters::new();
    let first = dom_tree_to_json(&shown("p").with_text("a"), &mut counters).unwrap();
    let second = dom_tree_to_json(&shown("p").with_text("b"), &mut counters).unwrap();
    assert_eq!(first.key, "p0");
    assert_eq!(second.key, "p1");
}

#[test]
fn test_build_tree_wraps_root_tag() {
    let body = shown("BODY").with_child(shown("span").with_attr("id", "x").with_text("hi"));
    let tree = build_dom_json_tree(&body);
    assert_eq!(tree.root_tag, "body");
    assert_eq!(
        tree.to_json_string().unwrap(),
        r#"{"body":{"body0":{"span0":"span#x/ content='hi'"}}}"#
    );
}

#[test]
fn test_build_tree_with_pruned_root_is_null() {
    let body = SnapshotNode::element("BODY").with_size(0.0, 0.0);
    let tree = build_dom_json_tree(&body);
    assert!(tree.root.is_none());
    assert_eq!(tree.to_json_string().unwrap(), r#"{"body":null}"#);
}

#[test]
fn test_build_tree_uses_fresh_counters() {
    let body = shown("body").with_child(shown("p").with_text("x"));
    let serializer = DomSerializer::default();
    let first = serializer.build_tree(&body).to_json_string().unwrap();
    let second = serializer.build_tree(&body).to_json_string().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_output_preserves_document_order() {
    let body = shown("body").with_children([
        shown("h1").with_text("Title"),
        shown("p").with_text("first"),
        shown("a").with_attr("href", "/x").with_text("link"),
        shown("p").with_text("second"),
    ]);
    let json = build_dom_json_tree(&body).to_json_string().unwrap();
    assert_eq!(
        json,
        concat!(
            r#"{"body":{"body0":{"h10":"h1/ content='Title'","#,
            r#""p0":"p/ content='first'","a0":"a/ content='link'","#,
            r#""p1":"p/ content='second'"}}}"#
        )
    );
}

#[test]
fn test_to_value_matches_structure() {
    let body = shown("body").with_child(
        shown("nav")
            .with_attr("role", "navigation")
            .with_child(shown("a").with_attr("class", "home link").with_text("Home")),
    );
    let value = build_dom_json_tree(&body).to_value().unwrap();
    assert_eq!(
        value,
        json!({"body": {"body0": {"nav0": {"a0": "a.home.link/ content='Home'"}}}})
    );
}

#[test]
fn test_exclude_transparent_option() {
    let body = shown("body").with_children([
        shown("p").with_opacity("0").with_text("ghost"),
        shown("p").with_text("solid"),
    ]);

    let default_tree = DomSerializer::default().build_tree(&body);
    assert_eq!(default_tree.root.as_ref().unwrap().children().len(), 2);

    let strict = DomSerializer::new(FilterOptions::default().exclude_transparent(true));
    let strict_tree = strict.build_tree(&body);
    let root = strict_tree.root.unwrap();
    assert_eq!(root.children().len(), 1);
    assert_eq!(root.child("p0").unwrap().label(), Some("p/ content='solid'"));
}

#[test]
fn test_pretty_output() {
    let body = shown("body").with_child(shown("p").with_text("x"));
    let pretty = build_dom_json_tree(&body).to_json_string_pretty().unwrap();
    assert!(pretty.contains('\n'));
    assert!(pretty.contains("\"p0\": \"p/ content='x'\""));
}

#[test]
fn test_dom_json_string() {
    let body = shown("body").with_child(shown("img").with_attr("class", "logo"));
    assert_eq!(
        dom_json_string(&body).unwrap(),
        r#"{"body":{"body0":{"img0":"img.logo/"}}}"#
    );
}
