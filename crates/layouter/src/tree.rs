//! The layout box tree.

use markup::NodeId;

use crate::inline::DisplayItem;

/// Index into a [`LayoutTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoxId(usize);

/// Box variant: the single document root, or a block in normal flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxKind {
    Document,
    Block,
}

/// One box in the layout tree.
///
/// Geometry fields are written exactly once, during this box's layout pass,
/// and are only meaningful afterwards. `display` holds the box-relative text
/// runs of an inline box; it stays empty on block-mode boxes.
pub struct LayoutBox {
    pub kind: BoxKind,
    /// Source node in the document tree (non-owning).
    pub node: NodeId,
    pub parent: Option<BoxId>,
    /// Previous sibling, used for vertical-flow positioning (non-owning).
    pub prev_sibling: Option<BoxId>,
    pub children: Vec<BoxId>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub display: Vec<DisplayItem>,
}

impl LayoutBox {
    pub fn new(
        kind: BoxKind,
        node: NodeId,
        parent: Option<BoxId>,
        prev_sibling: Option<BoxId>,
    ) -> Self {
        Self {
            kind,
            node,
            parent,
            prev_sibling,
            children: Vec::new(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            display: Vec::new(),
        }
    }
}

/// Arena of layout boxes, rebuilt from scratch on every layout pass.
pub struct LayoutTree {
    boxes: Vec<LayoutBox>,
    root: BoxId,
}

impl LayoutTree {
    pub(crate) fn new(root_node: NodeId) -> Self {
        let mut tree = Self {
            boxes: Vec::new(),
            root: BoxId(0),
        };
        let root = tree.alloc(LayoutBox::new(BoxKind::Document, root_node, None, None));
        tree.root = root;
        tree
    }

    pub(crate) fn alloc(&mut self, layout_box: LayoutBox) -> BoxId {
        let id = BoxId(self.boxes.len());
        self.boxes.push(layout_box);
        id
    }

    pub fn root(&self) -> BoxId {
        self.root
    }

    pub fn get(&self, id: BoxId) -> &LayoutBox {
        &self.boxes[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: BoxId) -> &mut LayoutBox {
        &mut self.boxes[id.0]
    }

    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    /// Pre-order iteration over the whole tree.
    pub fn iter_preorder(&self) -> impl Iterator<Item = BoxId> + '_ {
        let mut order = Vec::with_capacity(self.boxes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.get(id).children.iter().copied().rev());
        }
        order.into_iter()
    }
}
