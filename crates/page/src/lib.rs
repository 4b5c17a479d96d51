//! The parse → layout → paint pipeline for one document.
//!
//! [`render`] runs the three passes to completion, synchronously, and hands
//! back every intermediate product so callers can inspect the tree, re-paint,
//! or re-layout at a new width. Payload decoding (charset, compression) is
//! the caller's problem; the content arrives here as text.

use std::time::Instant;

use anyhow::{Result, ensure};
use fontkit::FontCache;
use layouter::{LayoutTree, layout};
use log::debug;
use markup::{Document, parse_document};
use painter::{PaintCommand, paint};

/// A decoded document ready to render.
#[derive(Debug, Clone)]
pub struct Payload {
    pub content: String,
    /// Render the markup itself rather than interpreting it.
    pub is_view_source: bool,
}

impl Payload {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_view_source: false,
        }
    }

    pub fn view_source(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_view_source: true,
        }
    }
}

/// Everything one pipeline run produces.
pub struct Rendered {
    pub document: Document,
    pub layout: LayoutTree,
    pub commands: Vec<PaintCommand>,
}

/// Render a payload at the given viewport width.
///
/// Malformed markup never fails; the builder absorbs it. The only rejected
/// input is a viewport too narrow to hold the page margins.
pub fn render(payload: &Payload, viewport_width: f32, fonts: &mut FontCache) -> Result<Rendered> {
    ensure!(
        viewport_width.is_finite() && viewport_width > 2.0 * layouter::HSTEP,
        "viewport width {viewport_width} leaves no content area"
    );

    let start = Instant::now();
    let document = parse_document(&payload.content, payload.is_view_source);
    debug!(
        "parsed {} nodes in {:?}",
        document.node_count(),
        start.elapsed()
    );

    let start = Instant::now();
    let layout = layout(&document, viewport_width, fonts);
    debug!(
        "laid out {} boxes in {:?}",
        layout.box_count(),
        start.elapsed()
    );

    let start = Instant::now();
    let commands = paint(&document, &layout);
    debug!("painted {} commands in {:?}", commands.len(), start.elapsed());

    Ok(Rendered {
        document,
        layout,
        commands,
    })
}

/// Height of the laid-out page, for scrollbar sizing.
pub fn page_height(rendered: &Rendered) -> f32 {
    let root = rendered.layout.get(rendered.layout.root());
    root.y + root.height
}
