//! Single-pass scanner and the two build strategies.
//!
//! The scanner walks the raw input once, carrying `in_tag` / `in_comment` /
//! `in_script` / `in_attribute` state, and forwards text and tag events to a
//! [`BuildStrategy`]. The normal strategy interprets tags; the view-source
//! strategy re-emits them as escaped, preformatted text. Which one runs is a
//! property of the document payload, selected once via [`strategy_for`].

mod core;

pub use core::{BuilderCore, HEAD_TAGS, SELF_CLOSING_TAGS};

use crate::dom::Document;

/// Receives the scanner's text and tag events.
pub trait BuildStrategy {
    /// Called once before scanning starts.
    fn begin(&mut self, _core: &mut BuilderCore) {}

    /// A run of character data (entities already substituted).
    fn text(&mut self, core: &mut BuilderCore, text: &str);

    /// A tag spelling without the surrounding angle brackets.
    fn tag(&mut self, core: &mut BuilderCore, tag: &str);
}

/// Normal mode: tags are interpreted structurally.
pub struct DomStrategy;

impl BuildStrategy for DomStrategy {
    fn text(&mut self, core: &mut BuilderCore, text: &str) {
        core.add_text(text);
    }

    fn tag(&mut self, core: &mut BuilderCore, tag: &str) {
        core.add_tag(tag);
    }
}

/// View-source mode: every tag is shown literally, each text run wrapped in
/// a synthesized `<pre><b>…</b></pre>` enclosure.
pub struct ViewSourceStrategy;

impl BuildStrategy for ViewSourceStrategy {
    fn begin(&mut self, core: &mut BuilderCore) {
        core.add_tag("html");
        core.add_tag("body");
    }

    fn text(&mut self, core: &mut BuilderCore, text: &str) {
        if text.chars().all(char::is_whitespace) {
            return;
        }
        core.add_tag("pre");
        core.add_tag("b");
        core.add_text(text);
        core.add_tag("/b");
        core.add_tag("/pre");
    }

    fn tag(&mut self, core: &mut BuilderCore, tag: &str) {
        self.text(core, &format!("<{tag}>"));
    }
}

/// Pick the build strategy for a document payload.
pub fn strategy_for(is_view_source: bool) -> Box<dyn BuildStrategy> {
    if is_view_source {
        Box::new(ViewSourceStrategy)
    } else {
        Box::new(DomStrategy)
    }
}

/// Build a document tree from raw markup. Never fails: malformed input is
/// absorbed by scaffolding, auto-close and recovery rules.
pub fn parse_document(content: &str, is_view_source: bool) -> Document {
    let mut strategy = strategy_for(is_view_source);
    let mut core = BuilderCore::new();
    strategy.begin(&mut core);
    scan(content, strategy.as_mut(), &mut core);
    core.finish()
}

fn scan(content: &str, strategy: &mut dyn BuildStrategy, core: &mut BuilderCore) {
    let mut in_tag = false;
    let mut in_comment = false;
    let mut in_script = false;
    let mut in_attribute = false;
    let mut text = String::new();

    let mut chars = content.char_indices();
    while let Some((index, c)) = chars.next() {
        if in_script {
            // Script bodies are captured verbatim and dropped; nothing in
            // them is re-entered as markup.
            text.push(c);
            if text.ends_with("</script>") {
                text.clear();
                in_script = false;
            }
        } else if in_tag && in_comment {
            text.push(c);
            if c == '\n' || text.ends_with("-->") {
                text.clear();
                in_tag = false;
                in_comment = false;
            }
        } else if c == '<' && !in_tag {
            in_tag = true;
            if !text.is_empty() {
                strategy.text(core, &text);
            }
            text.clear();
        } else if c == '>' && in_tag && !in_attribute {
            in_tag = false;
            if text.starts_with("script") {
                in_script = true;
            } else {
                strategy.tag(core, &text);
            }
            text.clear();
        } else if c == '"' && in_tag {
            // A quoted '>' must not end the tag.
            in_attribute = !in_attribute;
        } else if content[index..].starts_with("&lt;") {
            text.push('<');
            for _ in 0..3 {
                chars.next();
            }
        } else if content[index..].starts_with("&gt;") {
            text.push('>');
            for _ in 0..3 {
                chars.next();
            }
        } else {
            text.push(c);
            if in_tag && text == "!--" {
                in_comment = true;
            }
        }
    }
    if !in_tag && !text.is_empty() {
        strategy.text(core, &text);
    }
}
