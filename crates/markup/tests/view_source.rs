use markup::{Document, NodeId, parse_document};

fn body_of(doc: &Document) -> NodeId {
    let mut stack = vec![doc.root()];
    while let Some(id) = stack.pop() {
        if doc.tag(id) == Some("body") {
            return id;
        }
        stack.extend(doc.children(id).iter().copied().rev());
    }
    panic!("no body in tree");
}

fn pre_text(doc: &Document, pre: NodeId) -> String {
    let mut out = String::new();
    let mut stack = vec![pre];
    while let Some(id) = stack.pop() {
        if let Some(text) = doc.text(id) {
            out.push_str(text);
        }
        stack.extend(doc.children(id).iter().copied().rev());
    }
    out
}

#[test]
fn tags_are_shown_literally_in_preformatted_bold() {
    let _ = env_logger::builder().is_test(true).try_init();

    let doc = parse_document("<p>Hi</p>", true);
    assert_eq!(doc.tag(doc.root()), Some("html"));

    let body = body_of(&doc);
    let blocks: Vec<NodeId> = doc.children(body).to_vec();
    assert_eq!(blocks.len(), 3, "one <pre> per tag/text event");
    for pre in &blocks {
        assert_eq!(doc.tag(*pre), Some("pre"));
        let b = doc.children(*pre)[0];
        assert_eq!(doc.tag(b), Some("b"));
    }
    assert_eq!(pre_text(&doc, blocks[0]), "<p>");
    assert_eq!(pre_text(&doc, blocks[1]), "Hi");
    assert_eq!(pre_text(&doc, blocks[2]), "</p>");
}

#[test]
fn view_source_never_interprets_markup() {
    let doc = parse_document("<div><br></div>", true);
    let mut stack = vec![doc.root()];
    while let Some(id) = stack.pop() {
        if let Some(tag) = doc.tag(id) {
            assert!(
                matches!(tag, "html" | "body" | "pre" | "b"),
                "unexpected structural element <{tag}>"
            );
        }
        stack.extend(doc.children(id).iter().copied());
    }
}

#[test]
fn whitespace_between_tags_produces_no_empty_blocks() {
    let doc = parse_document("<a>\n   \n<b2>", true);
    let body = body_of(&doc);
    for child in doc.children(body) {
        assert!(!pre_text(&doc, *child).is_empty());
    }
}
