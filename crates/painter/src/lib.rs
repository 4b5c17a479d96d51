//! Draw-command generation over a finished layout tree.
//!
//! A pre-order walk turns each box into zero or more [`PaintCommand`]s:
//! a background rectangle where the highlight rule matches, then the box's
//! own text runs, then its children. The consumer applies scroll translation
//! and viewport clipping; nothing here depends on window state.

use std::sync::Arc;

use fontkit::FontFace;
use layouter::{BoxId, LayoutTree};
use log::debug;
use markup::{Document, NodeId};

/// Background fill for highlighted navigation blocks.
pub const NAV_BACKGROUND: Color = Color::rgb(190, 190, 190);

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// One draw command, in absolute page coordinates.
#[derive(Debug, Clone)]
pub enum PaintCommand {
    TextRun {
        x: f32,
        y: f32,
        text: String,
        font: Arc<dyn FontFace>,
    },
    FilledRect {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Color,
    },
}

/// Walk the box tree and produce the ordered command list.
pub fn paint(doc: &Document, tree: &LayoutTree) -> Vec<PaintCommand> {
    let mut commands = Vec::new();
    paint_box(doc, tree, tree.root(), &mut commands);
    debug!("emitted {} paint commands", commands.len());
    commands
}

fn paint_box(doc: &Document, tree: &LayoutTree, id: BoxId, out: &mut Vec<PaintCommand>) {
    let b = tree.get(id);
    if is_highlighted(doc, b.node) {
        // Backgrounds go first so the box's own text paints on top.
        out.push(PaintCommand::FilledRect {
            x1: b.x,
            y1: b.y,
            x2: b.x + b.width,
            y2: b.y + b.height,
            color: NAV_BACKGROUND,
        });
    }
    for item in &b.display {
        out.push(PaintCommand::TextRun {
            x: b.x + item.x,
            y: b.y + item.y,
            text: item.text.clone(),
            font: Arc::clone(&item.font),
        });
    }
    for child in &b.children {
        paint_box(doc, tree, *child, out);
    }
}

/// The fixed highlight rule: a `<nav class="links">` landmark.
fn is_highlighted(doc: &Document, node: NodeId) -> bool {
    doc.tag(node) == Some("nav") && doc.attr(node, "class") == Some("links")
}
