use fontkit::FontCache;
use page::{Payload, page_height, render};
use painter::PaintCommand;

fn texts(commands: &[PaintCommand]) -> Vec<&str> {
    commands
        .iter()
        .filter_map(|c| match c {
            PaintCommand::TextRun { text, .. } => Some(text.as_str()),
            PaintCommand::FilledRect { .. } => None,
        })
        .collect()
}

#[test]
fn end_to_end_produces_text_commands() {
    let _ = env_logger::builder().is_test(true).try_init();

    let payload = Payload::new("<h1>Title</h1><p>Hello <b>world</b></p>");
    let mut fonts = FontCache::heuristic();
    let rendered = render(&payload, 800.0, &mut fonts).unwrap();

    assert_eq!(texts(&rendered.commands), ["Title", "Hello", "world"]);
    assert!(page_height(&rendered) > 0.0);
    assert_eq!(rendered.document.tag(rendered.document.root()), Some("html"));
}

#[test]
fn view_source_renders_the_markup_itself() {
    let payload = Payload::view_source("<p>Hi</p>");
    let mut fonts = FontCache::heuristic();
    let rendered = render(&payload, 800.0, &mut fonts).unwrap();

    let texts = texts(&rendered.commands);
    assert!(texts.contains(&"<p>"), "tags appear as literal text: {texts:?}");
    assert!(texts.contains(&"Hi"));
}

#[test]
fn degenerate_viewport_is_rejected() {
    let payload = Payload::new("x");
    let mut fonts = FontCache::heuristic();
    assert!(render(&payload, 10.0, &mut fonts).is_err());
    assert!(render(&payload, f32::NAN, &mut fonts).is_err());
}

#[test]
fn malformed_markup_still_renders() {
    let payload = Payload::new("<p>unclosed <b>everywhere");
    let mut fonts = FontCache::heuristic();
    let rendered = render(&payload, 800.0, &mut fonts).unwrap();
    assert_eq!(texts(&rendered.commands), ["unclosed", "everywhere"]);
}
