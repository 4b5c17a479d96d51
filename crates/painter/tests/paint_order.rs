use fontkit::FontCache;
use layouter::{HSTEP, layout};
use markup::parse_document;
use painter::{NAV_BACKGROUND, PaintCommand, paint};

fn commands(markup: &str, viewport_width: f32) -> Vec<PaintCommand> {
    let _ = env_logger::builder().is_test(true).try_init();
    let doc = parse_document(markup, false);
    let mut fonts = FontCache::heuristic();
    let tree = layout(&doc, viewport_width, &mut fonts);
    paint(&doc, &tree)
}

#[test]
fn text_runs_carry_absolute_coordinates() {
    let commands = commands("<p>word</p>", 800.0);
    let runs: Vec<(f32, String)> = commands
        .iter()
        .filter_map(|c| match c {
            PaintCommand::TextRun { x, text, .. } => Some((*x, text.clone())),
            PaintCommand::FilledRect { .. } => None,
        })
        .collect();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].1, "word");
    // Box-relative x = 0 translated by the page margin.
    assert_eq!(runs[0].0, HSTEP);
}

#[test]
fn nav_links_background_precedes_its_text() {
    let commands = commands(r#"<nav class="links">Home About</nav>"#, 800.0);
    let rect_at = commands
        .iter()
        .position(|c| matches!(c, PaintCommand::FilledRect { .. }));
    let first_text = commands
        .iter()
        .position(|c| matches!(c, PaintCommand::TextRun { .. }));
    let (Some(rect_at), Some(first_text)) = (rect_at, first_text) else {
        panic!("expected both a rectangle and text runs");
    };
    assert!(rect_at < first_text, "background paints beneath the text");

    let PaintCommand::FilledRect { x1, x2, color, .. } = &commands[rect_at] else {
        unreachable!();
    };
    assert_eq!(*color, NAV_BACKGROUND);
    assert_eq!(*x1, HSTEP);
    assert_eq!(*x2, HSTEP + (800.0 - 2.0 * HSTEP));
}

#[test]
fn plain_nav_gets_no_background() {
    let commands = commands("<nav>Home</nav>", 800.0);
    assert!(
        commands
            .iter()
            .all(|c| matches!(c, PaintCommand::TextRun { .. }))
    );
}

#[test]
fn commands_follow_document_order() {
    let commands = commands("<p>first</p><p>second</p>", 800.0);
    let texts: Vec<&str> = commands
        .iter()
        .filter_map(|c| match c {
            PaintCommand::TextRun { text, .. } => Some(text.as_str()),
            PaintCommand::FilledRect { .. } => None,
        })
        .collect();
    assert_eq!(texts, ["first", "second"]);
}
