use markup::{Document, NodeId, parse_document};

fn find_first(doc: &Document, tag: &str) -> Option<NodeId> {
    let mut stack = vec![doc.root()];
    while let Some(id) = stack.pop() {
        if doc.tag(id) == Some(tag) {
            return Some(id);
        }
        stack.extend(doc.children(id).iter().copied().rev());
    }
    None
}

#[test]
fn head_only_tags_synthesize_head() {
    let _ = env_logger::builder().is_test(true).try_init();

    let doc = parse_document("<title>T</title><p>content</p>", false);
    let head = find_first(&doc, "head").expect("head synthesized");
    let title = find_first(&doc, "title").expect("title parsed");
    assert_eq!(doc.parent(title), Some(head));

    // Body content closed the head implicitly.
    let body = find_first(&doc, "body").expect("body synthesized");
    let p = find_first(&doc, "p").expect("paragraph parsed");
    assert_eq!(doc.parent(p), Some(body));
    assert_eq!(doc.parent(head), Some(doc.root()));
    assert_eq!(doc.parent(body), Some(doc.root()));
}

#[test]
fn meta_lands_in_head_without_children() {
    let doc = parse_document("<meta charset=utf-8><p>x", false);
    let head = find_first(&doc, "head").expect("head synthesized");
    let meta = find_first(&doc, "meta").expect("meta parsed");
    assert_eq!(doc.parent(meta), Some(head));
    assert!(doc.children(meta).is_empty());
}

#[test]
fn explicit_skeleton_is_not_duplicated() {
    let doc = parse_document("<html><head></head><body>x</body></html>", false);
    assert_eq!(doc.tag(doc.root()), Some("html"));
    let html_children = doc.children(doc.root());
    assert_eq!(html_children.len(), 2, "expected exactly head and body");
    assert_eq!(doc.tag(html_children[0]), Some("head"));
    assert_eq!(doc.tag(html_children[1]), Some("body"));
}
