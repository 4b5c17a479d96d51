//! Box layout engine.
//!
//! Consumes a [`markup::Document`] plus a viewport width and produces a
//! [`LayoutTree`] with resolved geometry and, on every inline box, the
//! box-relative text runs ready for painting. Layout is a pure function of
//! its inputs: re-running it with the same document, width and font backend
//! yields identical geometry.

pub mod inline;
mod printing;
pub mod tree;

use fontkit::FontCache;
use log::debug;
use markup::{Document, NodeId};

use crate::inline::InlineFlow;
pub use crate::inline::{DisplayItem, StyleContext};
pub use crate::tree::{BoxId, BoxKind, LayoutBox, LayoutTree};

/// Horizontal page margin, inherited from the document box down.
pub const HSTEP: f32 = 13.0;
/// Vertical page margin; also the gap appended after a closed paragraph.
pub const VSTEP: f32 = 18.0;

/// Tags that establish block-level flow. Anything else participates in
/// inline flow.
pub const BLOCK_TAGS: &[&str] = &[
    "html",
    "body",
    "article",
    "section",
    "nav",
    "aside",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "hgroup",
    "header",
    "footer",
    "address",
    "p",
    "hr",
    "pre",
    "blockquote",
    "ol",
    "ul",
    "menu",
    "li",
    "dl",
    "dt",
    "dd",
    "figure",
    "figcaption",
    "main",
    "div",
    "table",
    "form",
    "fieldset",
    "legend",
    "details",
    "summary",
];

/// How a box lays out its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    Block,
    Inline,
}

/// Decide the layout mode for a node: inline for text nodes and for element
/// subtrees without block-tagged element children; block otherwise, and
/// block (with no inline content) for childless nodes.
pub fn layout_mode(doc: &Document, node: NodeId) -> LayoutMode {
    if doc.node(node).is_text() {
        return LayoutMode::Inline;
    }
    let children = doc.children(node);
    if children
        .iter()
        .any(|c| doc.tag(*c).is_some_and(|t| BLOCK_TAGS.contains(&t)))
    {
        LayoutMode::Block
    } else if !children.is_empty() {
        LayoutMode::Inline
    } else {
        LayoutMode::Block
    }
}

/// Lay out a document at the given viewport width. The returned tree has all
/// geometry fields set on every box.
pub fn layout(doc: &Document, viewport_width: f32, fonts: &mut FontCache) -> LayoutTree {
    let mut tree = LayoutTree::new(doc.root());
    let root = tree.root();
    let content = tree.alloc(LayoutBox::new(
        BoxKind::Block,
        doc.root(),
        Some(root),
        None,
    ));
    tree.get_mut(root).children.push(content);
    build_subtree(&mut tree, doc, content);

    {
        let document_box = tree.get_mut(root);
        document_box.x = HSTEP;
        document_box.y = VSTEP;
        document_box.width = viewport_width - 2.0 * HSTEP;
    }
    layout_box(&mut tree, doc, fonts, content);
    tree.get_mut(root).height = tree.get(content).height;

    debug!(
        "laid out {} boxes at width {viewport_width}",
        tree.box_count()
    );
    tree
}

/// Mirror the node tree into boxes below a block-mode box. Inline-mode
/// subtrees stay leaf boxes; their content is resolved by the text flow.
fn build_subtree(tree: &mut LayoutTree, doc: &Document, box_id: BoxId) {
    let node = tree.get(box_id).node;
    if layout_mode(doc, node) != LayoutMode::Block {
        return;
    }
    let mut prev = None;
    for &child_node in doc.children(node) {
        let child = tree.alloc(LayoutBox::new(
            BoxKind::Block,
            child_node,
            Some(box_id),
            prev,
        ));
        tree.get_mut(box_id).children.push(child);
        build_subtree(tree, doc, child);
        prev = Some(child);
    }
}

/// Post-order geometry pass: x and width come from the parent, y from the
/// previous sibling (or the parent for a first child), height from children
/// or from the inline flow.
fn layout_box(tree: &mut LayoutTree, doc: &Document, fonts: &mut FontCache, id: BoxId) {
    let (parent, prev_sibling, node) = {
        let b = tree.get(id);
        (b.parent, b.prev_sibling, b.node)
    };
    let (parent_x, parent_y, parent_width) = match parent {
        Some(p) => {
            let p = tree.get(p);
            (p.x, p.y, p.width)
        }
        None => (HSTEP, VSTEP, 0.0),
    };
    let y = match prev_sibling {
        Some(prev) => {
            let prev = tree.get(prev);
            prev.y + prev.height
        }
        None => parent_y,
    };
    {
        let b = tree.get_mut(id);
        b.x = parent_x;
        b.width = parent_width;
        b.y = y;
    }

    match layout_mode(doc, node) {
        LayoutMode::Block => {
            let children = tree.get(id).children.clone();
            for child in &children {
                layout_box(tree, doc, fonts, *child);
            }
            let height = children.iter().map(|c| tree.get(*c).height).sum();
            tree.get_mut(id).height = height;
        }
        LayoutMode::Inline => {
            let width = tree.get(id).width;
            let mut flow = InlineFlow::new(width, fonts);
            flow.recurse(doc, node);
            let (display, height) = flow.finish();
            let b = tree.get_mut(id);
            b.display = display;
            b.height = height;
        }
    }
}
