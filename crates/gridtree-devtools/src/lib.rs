use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gridtree_core::{ListenerId, NodeId, Tree, TreeError, UpdateKind};

/// Text dump of the visible rows plus an optional one-line stats footer.
pub struct Inspector {
    pub show_stats: bool,
    pub column: usize,
    dump_count: u64,
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new()
    }
}

impl Inspector {
    pub fn new() -> Self {
        Self {
            show_stats: false,
            column: 0,
            dump_count: 0,
        }
    }

    pub fn toggle_stats(&mut self) {
        self.show_stats = !self.show_stats;
    }

    pub fn dump_count(&self) -> u64 {
        self.dump_count
    }

    /// One line per visible row, in flat order:
    /// `[flat] <indent><marker> <text>`, where the marker is `-` for an
    /// expanded parent, `+` for a collapsed one and `*` for a leaf.
    ///
    /// Walking the rows materializes placeholders for every visible slot, so
    /// keep this to small trees.
    pub fn dump(&mut self, tree: &mut Tree) -> String {
        self.dump_count += 1;
        let mut lines = Vec::new();
        let mut current = tree.next_item(tree.root(), false);
        while let Some(id) = current {
            lines.push(self.row_line(tree, id));
            current = tree.next_item(id, false);
        }
        log::debug!("inspector dump #{}: {} rows", self.dump_count, lines.len());
        if self.show_stats {
            lines.push(TreeStats::collect(tree).summary());
        }
        lines.join("\n")
    }

    fn row_line(&self, tree: &Tree, id: NodeId) -> String {
        let marker = match (tree.has_children(id), tree.is_expanded(id)) {
            (true, true) => '-',
            (true, false) => '+',
            (false, _) => '*',
        };
        let indent = "  ".repeat(tree.level(id).max(0) as usize);
        let flat = tree
            .flat_index(id)
            .map_or_else(|| "?".to_string(), |i| i.to_string());
        format!(
            "[{flat}] {indent}{marker} {}",
            tree.content(id).text(self.column)
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Live nodes, root excluded.
    pub nodes: usize,
    pub materialized: usize,
    pub placeholders: usize,
    pub expanded: usize,
    /// Declared children of the root.
    pub root_items: usize,
    pub visible_rows: usize,
}

impl TreeStats {
    pub fn collect(tree: &Tree) -> Self {
        let root = tree.root();
        let mut stats = TreeStats {
            root_items: tree.children_len(root),
            visible_rows: tree.visible_children_count(root),
            ..Default::default()
        };
        for (id, node) in tree.iter() {
            if id == root {
                continue;
            }
            stats.nodes += 1;
            if node.is_materialized() {
                stats.materialized += 1;
            } else {
                stats.placeholders += 1;
            }
            if node.is_expanded() {
                stats.expanded += 1;
            }
        }
        stats
    }

    pub fn summary(&self) -> String {
        [
            format!("rows: {}", self.visible_rows),
            format!("items: {}", self.root_items),
            format!("nodes: {}", self.nodes),
            format!("placeholders: {}", self.placeholders),
            format!("expanded: {}", self.expanded),
        ]
        .join("  |  ")
    }
}

/// Counts the updates reaching one node, by kind.
pub struct EventCounter {
    node: NodeId,
    listener: ListenerId,
    counts: Rc<RefCell<HashMap<UpdateKind, usize>>>,
}

impl EventCounter {
    pub fn attach(tree: &mut Tree, node: NodeId) -> Result<Self, TreeError> {
        let counts: Rc<RefCell<HashMap<UpdateKind, usize>>> = Rc::default();
        let listener = tree.add_listener(node, {
            let counts = counts.clone();
            move |e| *counts.borrow_mut().entry(e.kind).or_default() += 1
        })?;
        Ok(Self {
            node,
            listener,
            counts,
        })
    }

    pub fn count(&self, kind: UpdateKind) -> usize {
        self.counts.borrow().get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.borrow().values().sum()
    }

    pub fn reset(&self) {
        self.counts.borrow_mut().clear();
    }

    pub fn detach(self, tree: &mut Tree) -> bool {
        tree.remove_listener(self.node, self.listener)
    }
}
