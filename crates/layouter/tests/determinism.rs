use fontkit::FontCache;
use layouter::{LayoutTree, layout};
use markup::parse_document;

fn snapshot(tree: &LayoutTree) -> Vec<(f32, f32, f32, f32, Vec<(f32, f32, String)>)> {
    tree.iter_preorder()
        .map(|id| {
            let b = tree.get(id);
            let runs = b
                .display
                .iter()
                .map(|r| (r.x, r.y, r.text.clone()))
                .collect();
            (b.x, b.y, b.width, b.height, runs)
        })
        .collect()
}

#[test]
fn relayout_reproduces_identical_geometry() {
    let _ = env_logger::builder().is_test(true).try_init();

    let markup = "<h1>Title</h1><p>Some <b>mixed</b> content that wraps \
                  across a few lines at this width.</p><pre>raw  text</pre>";
    let doc = parse_document(markup, false);
    let mut fonts = FontCache::heuristic();

    let first = snapshot(&layout(&doc, 240.0, &mut fonts));
    let second = snapshot(&layout(&doc, 240.0, &mut fonts));
    assert_eq!(first, second);

    // A fresh cache changes nothing either.
    let mut cold = FontCache::heuristic();
    let third = snapshot(&layout(&doc, 240.0, &mut cold));
    assert_eq!(first, third);
}

#[test]
fn narrower_viewport_narrows_every_box() {
    let doc = parse_document("<p>one</p><p>two</p>", false);
    let mut fonts = FontCache::heuristic();
    let wide = layout(&doc, 800.0, &mut fonts);
    let narrow = layout(&doc, 400.0, &mut fonts);
    for (w, n) in wide.iter_preorder().zip(narrow.iter_preorder()) {
        assert_eq!(wide.get(w).width, 800.0 - 26.0);
        assert_eq!(narrow.get(n).width, 400.0 - 26.0);
    }
}
