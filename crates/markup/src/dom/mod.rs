//! Node tree model.
//!
//! Nodes live in a [`NodeArena`] and are referenced by [`NodeId`]. Parent
//! links are lookup-only back-references; ownership runs strictly top-down
//! through the `children` lists.

mod printing;

use std::collections::HashMap;

/// Case-folded attribute map. Keys are unique, insertion order is irrelevant.
pub type Attributes = HashMap<String, String>;

/// The payload distinguishing the two node variants.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Element { tag: String, attrs: Attributes },
    Text { text: String },
}

/// A single node in the tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl Node {
    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element { .. })
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text { .. })
    }

    /// The element's tag name, or `None` for text nodes.
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text { .. } => None,
        }
    }
}

/// Index into a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

/// Flat storage for one document's nodes.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            parent,
            children: Vec::new(),
        });
        id
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A finished, read-only document tree. The root is always an element
/// tagged `html`.
pub struct Document {
    arena: NodeArena,
    root: NodeId,
}

impl Document {
    pub(crate) fn new(arena: NodeArena, root: NodeId) -> Self {
        Self { arena, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        self.arena.get(id)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.arena.get(id).children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id).parent
    }

    /// Element tag name, or `None` for text nodes.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.arena.get(id).tag()
    }

    /// Attribute lookup on an element node.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.arena.get(id).kind {
            NodeKind::Element { attrs, .. } => attrs.get(name).map(String::as_str),
            NodeKind::Text { .. } => None,
        }
    }

    /// Text content, or `None` for element nodes.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.arena.get(id).kind {
            NodeKind::Text { text } => Some(text),
            NodeKind::Element { .. } => None,
        }
    }

    pub fn node_count(&self) -> usize {
        self.arena.len()
    }
}
