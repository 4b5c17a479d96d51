//! Fault-tolerant markup tree construction.
//!
//! Raw text goes in, a single rooted element/text tree comes out. Malformed
//! input is absorbed by implicit scaffolding, auto-closing and formatting
//! recovery rather than rejected; there is no failure mode.

pub mod builder;
pub mod dom;

pub use builder::{BuildStrategy, DomStrategy, ViewSourceStrategy, parse_document, strategy_for};
pub use dom::{Attributes, Document, Node, NodeArena, NodeId, NodeKind};
