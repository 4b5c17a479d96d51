use std::fmt;

use crate::tree::{BoxId, BoxKind, LayoutTree};

impl fmt::Debug for LayoutTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn fmt_box(
            tree: &LayoutTree,
            id: BoxId,
            f: &mut fmt::Formatter<'_>,
            depth: usize,
        ) -> fmt::Result {
            for _ in 0..depth {
                f.write_str("  ")?;
            }
            let b = tree.get(id);
            let kind = match b.kind {
                BoxKind::Document => "document",
                BoxKind::Block => "block",
            };
            writeln!(
                f,
                "{kind} x={} y={} w={} h={} runs={}",
                b.x,
                b.y,
                b.width,
                b.height,
                b.display.len()
            )?;
            for child in &b.children {
                fmt_box(tree, *child, f, depth + 1)?;
            }
            Ok(())
        }

        writeln!(f, "LAYOUT")?;
        fmt_box(self, self.root(), f, 0)
    }
}
