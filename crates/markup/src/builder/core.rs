//! The open-element stack and tag dispatch rules.

use log::{debug, trace, warn};
use smallvec::SmallVec;

use crate::dom::{Attributes, Document, NodeArena, NodeId, NodeKind};

/// Tags that never take children and are never pushed onto the open stack.
pub const SELF_CLOSING_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Tags that belong in `<head>`; used when synthesizing implicit scaffolding.
pub const HEAD_TAGS: &[&str] = &[
    "base", "basefont", "bgsound", "noscript", "link", "meta", "title", "style", "script",
];

/// Block-level tags that auto-close an open sibling of the same class.
const BLOCK_SIBLING_TAGS: &[&str] = &["p", "li"];

/// List owners that also auto-close an open `p`/`li`.
const LIST_OWNER_TAGS: &[&str] = &["ol", "ul"];

/// Tags eligible for out-of-order close recovery.
const TEXT_FORMATTING_TAGS: &[&str] = &["b", "i"];

/// One build invocation's state: the arena under construction plus the stack
/// of currently open (unfinished) elements. Owned exclusively by one build;
/// never shared.
pub struct BuilderCore {
    arena: NodeArena,
    unfinished: SmallVec<NodeId, 8>,
}

impl Default for BuilderCore {
    fn default() -> Self {
        Self::new()
    }
}

impl BuilderCore {
    pub fn new() -> Self {
        Self {
            arena: NodeArena::new(),
            unfinished: SmallVec::new(),
        }
    }

    fn tag_of(&self, id: NodeId) -> &str {
        self.arena.get(id).tag().unwrap_or_default()
    }

    /// True when the open stack is exactly the given sequence of tags.
    fn stack_is(&self, expect: &[&str]) -> bool {
        self.unfinished.len() == expect.len()
            && self
                .unfinished
                .iter()
                .zip(expect)
                .all(|(id, tag)| self.tag_of(*id) == *tag)
    }

    /// Flush a run of character data as a text node. Whitespace-only runs
    /// are dropped.
    pub fn add_text(&mut self, text: &str) {
        if text.chars().all(char::is_whitespace) {
            return;
        }
        self.add_implicit_tags(None);
        let Some(&parent) = self.unfinished.last() else {
            return;
        };
        let node = self.arena.alloc(
            NodeKind::Text {
                text: text.to_string(),
            },
            Some(parent),
        );
        self.arena.get_mut(parent).children.push(node);
    }

    /// Synthesize missing `html`/`head`/`body` ancestors so every document
    /// ends up with the canonical skeleton. `tag` is the pending tag about
    /// to be dispatched, or `None` for a text flush.
    fn add_implicit_tags(&mut self, tag: Option<&str>) {
        loop {
            if self.unfinished.is_empty() && tag != Some("html") {
                trace!("implicit <html>");
                self.add_tag("html");
            } else if self.stack_is(&["html"]) && !matches!(tag, Some("head" | "body" | "/html")) {
                if tag.is_some_and(|t| HEAD_TAGS.contains(&t)) {
                    trace!("implicit <head>");
                    self.add_tag("head");
                } else {
                    trace!("implicit <body>");
                    self.add_tag("body");
                }
            } else if self.stack_is(&["html", "head"])
                && !(tag == Some("/head") || tag.is_some_and(|t| HEAD_TAGS.contains(&t)))
            {
                trace!("implicit </head>");
                self.add_tag("/head");
            } else {
                break;
            }
        }
    }

    /// Pop the innermost open element and attach it to its parent. A no-op
    /// when only the root remains open.
    fn close_unfinished_tag(&mut self) {
        if self.unfinished.len() <= 1 {
            return;
        }
        let Some(node) = self.unfinished.pop() else {
            return;
        };
        let Some(&parent) = self.unfinished.last() else {
            return;
        };
        self.arena.get_mut(parent).children.push(node);
    }

    /// Dispatch one buffered tag spelling (without the angle brackets).
    pub fn add_tag(&mut self, raw: &str) {
        // Doctypes and other declarations are dropped.
        if raw.starts_with('!') {
            return;
        }
        let (tag, attrs) = parse_tag(raw);
        if tag.is_empty() {
            return;
        }
        self.add_implicit_tags(Some(&tag));

        if SELF_CLOSING_TAGS.contains(&tag.as_str()) {
            let Some(&parent) = self.unfinished.last() else {
                return;
            };
            let node = self.arena.alloc(NodeKind::Element { tag, attrs }, Some(parent));
            self.arena.get_mut(parent).children.push(node);
            return;
        }

        if let Some(name) = tag.strip_prefix('/') {
            let top_tag = self
                .unfinished
                .last()
                .map(|&id| self.tag_of(id).to_string());
            let mismatched_formatting = top_tag
                .as_deref()
                .is_some_and(|t| TEXT_FORMATTING_TAGS.contains(&t) && t != name);
            if mismatched_formatting {
                // Out-of-order close: close the formatting element, close the
                // level it was nested in, then re-open the formatting element
                // so later siblings keep its effect.
                let reopened = top_tag.unwrap_or_default();
                warn!("recovering </{name}>: re-opening <{reopened}>");
                self.close_unfinished_tag();
                self.close_unfinished_tag();
                self.add_tag(&reopened);
            } else {
                self.close_unfinished_tag();
            }
        } else {
            if let Some(&top) = self.unfinished.last() {
                let top_tag = self.tag_of(top);
                if BLOCK_SIBLING_TAGS.contains(&top_tag)
                    && (BLOCK_SIBLING_TAGS.contains(&tag.as_str())
                        || LIST_OWNER_TAGS.contains(&tag.as_str()))
                {
                    trace!("auto-closing <{top_tag}> before <{tag}>");
                    self.close_unfinished_tag();
                }
            }
            let parent = self.unfinished.last().copied();
            let node = self.arena.alloc(NodeKind::Element { tag, attrs }, parent);
            self.unfinished.push(node);
        }
    }

    /// Close everything still open and hand back the finished document.
    pub fn finish(mut self) -> Document {
        if self.unfinished.is_empty() {
            self.add_implicit_tags(None);
        }
        while self.unfinished.len() > 1 {
            self.close_unfinished_tag();
        }
        let root = self
            .unfinished
            .pop()
            .expect("scaffolding guarantees a root element");
        debug!("built tree with {} nodes", self.arena.len());
        Document::new(self.arena, root)
    }
}

/// Split tag text into a lower-cased name and its attribute map. Attribute
/// tokens are `key=value` (surrounding quotes stripped) or bare booleans
/// with an empty value.
fn parse_tag(raw: &str) -> (String, Attributes) {
    let mut parts = raw.split_whitespace();
    let tag = parts.next().unwrap_or_default().to_lowercase();
    let mut attrs = Attributes::new();
    for pair in parts {
        match pair.split_once('=') {
            Some((key, value)) => {
                attrs.insert(key.to_lowercase(), strip_quotes(value).to_string());
            }
            None => {
                attrs.insert(pair.to_lowercase(), String::new());
            }
        }
    }
    (tag, attrs)
}

fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}
