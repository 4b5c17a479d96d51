//! Inline text flow: line construction, word wrapping, soft-hyphen breaks
//! and the inline style stack.
//!
//! One [`InlineFlow`] is created per inline box and discarded when that box's
//! flow finishes; nothing here outlives a single layout pass. Coordinates
//! produced are relative to the owning box's origin.

use std::sync::Arc;

use fontkit::{FontCache, FontFace, FontSpec, Slant, Weight};
use log::trace;
use markup::{Document, NodeId, NodeKind};

use crate::VSTEP;

/// Family used while preformatted mode is active.
pub const MONOSPACE_FAMILY: &str = "Courier";

const SOFT_HYPHEN: char = '\u{00AD}';
const BASE_SIZE: i32 = 12;

/// A finalized, box-relative text run.
#[derive(Debug, Clone)]
pub struct DisplayItem {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub font: Arc<dyn FontFace>,
}

/// A run waiting on the in-progress line, pre-baseline.
struct LineItem {
    x: f32,
    text: String,
    font: Arc<dyn FontFace>,
    superscript: bool,
}

/// Inline style state carried through one box's text flow.
#[derive(Debug, Clone)]
pub struct StyleContext {
    pub size: i32,
    pub weight: Weight,
    pub slant: Slant,
    pub superscript: bool,
    pub preformatted: bool,
    abbr: bool,
    abbr_buf: String,
}

impl Default for StyleContext {
    fn default() -> Self {
        Self {
            size: BASE_SIZE,
            weight: Weight::Normal,
            slant: Slant::Roman,
            superscript: false,
            preformatted: false,
            abbr: false,
            abbr_buf: String::new(),
        }
    }
}

/// Walks an inline subtree in document order, placing words on lines.
pub struct InlineFlow<'a> {
    width: f32,
    fonts: &'a mut FontCache,
    style: StyleContext,
    cursor_x: f32,
    cursor_y: f32,
    line: Vec<LineItem>,
    display: Vec<DisplayItem>,
}

impl<'a> InlineFlow<'a> {
    pub fn new(width: f32, fonts: &'a mut FontCache) -> Self {
        Self {
            width,
            fonts,
            style: StyleContext::default(),
            cursor_x: 0.0,
            cursor_y: 0.0,
            line: Vec::new(),
            display: Vec::new(),
        }
    }

    /// Flow the subtree rooted at `node`.
    pub fn recurse(&mut self, doc: &Document, node: NodeId) {
        match &doc.node(node).kind {
            NodeKind::Text { text } => self.text(text),
            NodeKind::Element { tag, .. } => {
                self.open_tag(tag);
                for child in doc.children(node) {
                    self.recurse(doc, *child);
                }
                self.close_tag(tag);
            }
        }
    }

    /// Flush the trailing line and hand back the display list plus the final
    /// vertical cursor (the box height).
    pub fn finish(mut self) -> (Vec<DisplayItem>, f32) {
        self.flush();
        (self.display, self.cursor_y)
    }

    fn font(&mut self) -> Arc<dyn FontFace> {
        let mut spec = FontSpec::new(self.style.size, self.style.weight, self.style.slant);
        if self.style.preformatted {
            spec = spec.with_family(MONOSPACE_FAMILY);
        }
        self.fonts.font(spec)
    }

    fn open_tag(&mut self, tag: &str) {
        match tag {
            "i" => self.style.slant = Slant::Italic,
            "b" => self.style.weight = Weight::Bold,
            "small" => self.style.size -= 2,
            "big" => self.style.size += 4,
            "br" => self.flush(),
            "sup" => {
                self.style.size /= 2;
                self.style.superscript = true;
            }
            "abbr" => {
                self.style.abbr = true;
                self.style.abbr_buf.clear();
            }
            "pre" => self.style.preformatted = true,
            _ => {}
        }
    }

    fn close_tag(&mut self, tag: &str) {
        match tag {
            "i" => self.style.slant = Slant::Roman,
            "b" => self.style.weight = Weight::Normal,
            "small" => self.style.size += 2,
            "big" => self.style.size -= 4,
            "sup" => {
                self.style.size *= 2;
                self.style.superscript = false;
            }
            "p" => {
                self.flush();
                self.cursor_y += VSTEP;
            }
            "li" => self.flush(),
            "h1" => self.flush_centered(),
            "abbr" => self.finish_abbr(),
            "pre" => {
                self.style.preformatted = false;
                self.flush();
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.style.abbr {
            self.style.abbr_buf.push_str(text);
            return;
        }
        if self.style.preformatted {
            for (i, segment) in text.split('\n').enumerate() {
                if i > 0 {
                    self.flush();
                }
                if !segment.is_empty() {
                    self.preformatted_segment(segment);
                }
            }
        } else {
            for word in text.split_whitespace() {
                self.word(word);
            }
        }
    }

    /// Place one verbatim preformatted segment; interior spaces are kept and
    /// no wrapping applies.
    fn preformatted_segment(&mut self, segment: &str) {
        let font = self.font();
        let advance = font.measure(segment);
        self.line.push(LineItem {
            x: self.cursor_x,
            text: segment.to_string(),
            font,
            superscript: self.style.superscript,
        });
        self.cursor_x += advance;
    }

    /// Place one word, wrapping (and hyphenating where permitted) when it
    /// would reach or exceed the container width.
    fn word(&mut self, word: &str) {
        let font = self.font();
        let shown = strip_soft_hyphens(word);
        let advance = font.measure(&shown) + font.measure(" ");
        if self.cursor_x + advance >= self.width {
            if word.contains(SOFT_HYPHEN) && !self.style.superscript {
                self.hyphenate(word, &font);
                return;
            }
            self.flush();
        }
        self.place(&shown, &font);
    }

    fn place(&mut self, text: &str, font: &Arc<dyn FontFace>) {
        let advance = font.measure(text) + font.measure(" ");
        self.line.push(LineItem {
            x: self.cursor_x,
            text: text.to_string(),
            font: Arc::clone(font),
            superscript: self.style.superscript,
        });
        self.cursor_x += advance;
    }

    /// Break an overflowing word at its soft-hyphen points: emit the longest
    /// prefix that still fits with a trailing hyphen, wrap, and continue with
    /// the remainder. An unsplittable word at line start is placed as
    /// overflow so placement always terminates.
    fn hyphenate(&mut self, word: &str, font: &Arc<dyn FontFace>) {
        let mut rest = word.to_string();
        loop {
            let segments: Vec<&str> = rest.split(SOFT_HYPHEN).collect();
            let mut fitting = 0;
            let mut prefix = String::new();
            let mut candidate = String::new();
            for (i, segment) in segments.iter().enumerate() {
                candidate.push_str(segment);
                let hyphenated_width = font.measure(&candidate) + font.measure("-");
                if self.cursor_x + hyphenated_width < self.width {
                    fitting = i + 1;
                    prefix.clone_from(&candidate);
                } else {
                    break;
                }
            }

            if fitting == 0 {
                if self.cursor_x == 0.0 {
                    trace!("overlong unsplittable word placed as overflow");
                    let shown = strip_soft_hyphens(&rest);
                    self.place(&shown, font);
                    self.flush();
                    return;
                }
                self.flush();
                continue;
            }
            if fitting == segments.len() {
                self.place(&prefix, font);
                return;
            }
            prefix.push('-');
            self.place(&prefix, font);
            self.flush();
            rest = segments[fitting..].join("\u{00AD}");
        }
    }

    /// Re-segment buffered abbreviation text: uppercase-or-digit runs keep
    /// the surrounding size and weight (upper-cased), lowercase runs render
    /// two points smaller and bold.
    fn finish_abbr(&mut self) {
        let buffered = std::mem::take(&mut self.style.abbr_buf);
        self.style.abbr = false;
        let saved_size = self.style.size;
        let saved_weight = self.style.weight;
        for (upper, run) in classify_runs(buffered.trim()) {
            if upper {
                self.style.size = saved_size;
                self.style.weight = saved_weight;
                self.word(&run);
            } else {
                self.style.size = saved_size - 2;
                self.style.weight = Weight::Bold;
                self.word(&run.to_uppercase());
            }
        }
        self.style.size = saved_size;
        self.style.weight = saved_weight;
    }

    /// Finalize the current line: align every run on a shared baseline, then
    /// advance the vertical cursor and reset the horizontal one. Flushing an
    /// empty buffer is a no-op.
    fn flush(&mut self) {
        if self.line.is_empty() {
            return;
        }
        let max_ascent = self
            .line
            .iter()
            .map(|item| item.font.metrics().ascent)
            .fold(0.0f32, f32::max);
        let max_descent = self
            .line
            .iter()
            .map(|item| item.font.metrics().descent)
            .fold(0.0f32, f32::max);
        let baseline = self.cursor_y + 1.25 * max_ascent;
        for item in self.line.drain(..) {
            let y = if item.superscript {
                // Superscript runs sit at the top of the line box.
                self.cursor_y
            } else {
                baseline - item.font.metrics().ascent
            };
            self.display.push(DisplayItem {
                x: item.x,
                y,
                text: item.text,
                font: item.font,
            });
        }
        self.cursor_y = baseline + 1.25 * max_descent;
        self.cursor_x = 0.0;
    }

    /// Center the in-progress line within the container, then flush it.
    fn flush_centered(&mut self) {
        if self.line.is_empty() {
            return;
        }
        let line_width = self
            .line
            .iter()
            .map(|item| item.x + item.font.measure(&item.text))
            .fold(0.0f32, f32::max);
        let offset = ((self.width - line_width) / 2.0).max(0.0);
        for item in &mut self.line {
            item.x += offset;
        }
        self.flush();
    }
}

fn strip_soft_hyphens(word: &str) -> String {
    word.chars().filter(|c| *c != SOFT_HYPHEN).collect()
}

fn is_upper_or_digit(c: char) -> bool {
    c.is_uppercase() || c.is_ascii_digit()
}

/// Partition text into maximal runs of uppercase-or-digit vs. lowercase
/// characters; runs alternate by classification.
fn classify_runs(text: &str) -> Vec<(bool, String)> {
    let mut runs: Vec<(bool, String)> = Vec::new();
    for c in text.chars() {
        let upper = is_upper_or_digit(c);
        match runs.last_mut() {
            Some((class, run)) if *class == upper => run.push(c),
            _ => runs.push((upper, c.to_string())),
        }
    }
    runs
}
