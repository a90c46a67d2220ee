use crate::{NodeId, Px, Tree, TreeConfig};

/// Scroll window over a [`Tree`]. Only rows inside the window (plus a small
/// overscan) are ever resolved to nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    scroll_offset: Px,
    viewport_height: Px,
    overscan: usize,
}

/// Rows to render for one frame, with the space above and below them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibleRows {
    pub first_flat_index: usize,
    pub rows: Vec<NodeId>,
    pub top_spacer: Px,
    pub bottom_spacer: Px,
}

impl Viewport {
    pub fn new(viewport_height: Px) -> Self {
        Self::from_config(&TreeConfig::default(), viewport_height)
    }

    pub fn from_config(config: &TreeConfig, viewport_height: Px) -> Self {
        Self {
            scroll_offset: 0,
            viewport_height: viewport_height.max(0),
            overscan: config.overscan_rows,
        }
    }

    pub fn scroll_offset(&self) -> Px {
        self.scroll_offset
    }

    pub fn viewport_height(&self) -> Px {
        self.viewport_height
    }

    pub fn set_viewport_height(&mut self, height: Px) {
        self.viewport_height = height.max(0);
    }

    pub fn set_offset(&mut self, offset: Px, content_height: Px) {
        let max_offset = (content_height - self.viewport_height).max(0);
        self.scroll_offset = offset.clamp(0, max_offset);
    }

    /// Consume delta in px. Returns leftover in px (for nested scroll).
    pub fn scroll_by(&mut self, delta: Px, content_height: Px) -> Px {
        let before = self.scroll_offset;
        self.set_offset(before + delta, content_height);
        let consumed = self.scroll_offset - before;
        delta - consumed
    }

    /// Scrolls the minimum distance that brings `id`'s own row fully into view.
    pub fn scroll_to(&mut self, tree: &Tree, id: NodeId) {
        let top = tree.offset(id);
        let bottom = top + tree.own_height(id);
        let offset = if top < self.scroll_offset {
            top
        } else if bottom > self.scroll_offset + self.viewport_height {
            bottom - self.viewport_height
        } else {
            self.scroll_offset
        };
        self.set_offset(offset, tree.content_height());
    }

    /// Resolves the rows intersecting the window, placeholders included.
    pub fn visible_rows(&self, tree: &mut Tree) -> VisibleRows {
        let height = tree.default_height();
        let total = tree.visible_children_count(tree.root());

        let first_visible = (self.scroll_offset / height).max(0) as usize;
        let last_visible = ((self.scroll_offset + self.viewport_height + height - 1) / height) as usize;
        let first = first_visible.saturating_sub(self.overscan);
        let end = (last_visible + self.overscan).min(total);

        let mut rows = Vec::with_capacity(end.saturating_sub(first));
        let mut current = if first < end {
            tree.node_at_flat_index(first)
        } else {
            None
        };
        while let Some(id) = current {
            rows.push(id);
            if first + rows.len() >= end {
                break;
            }
            current = tree.next_item(id, false);
        }

        let remaining = total.saturating_sub(first + rows.len());
        VisibleRows {
            first_flat_index: first,
            top_spacer: first.min(total) as Px * height,
            bottom_spacer: remaining as Px * height,
            rows,
        }
    }
}
