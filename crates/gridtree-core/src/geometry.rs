//! Counting and pixel math over the lazily materialized tree.
//!
//! Every non-expanded child occupies exactly one row, materialized or not.
//! Only expanded children (the parent's waypoints) take more, so walks over
//! a child sequence jump between waypoints instead of visiting every slot.

use smallvec::SmallVec;

use crate::{NodeId, Px, Tree};

/// Sorted slot indices of a node's expanded children.
pub type Waypoints = SmallVec<[usize; 8]>;

impl Tree {
    /// Number of visible rows below `id`, not counting `id` itself.
    ///
    /// Memoized per node until a structural update passes through it.
    pub fn visible_children_count(&self, id: NodeId) -> usize {
        let node = &self.nodes[id];
        if let Some(count) = node.visible_count.get() {
            return count;
        }
        let count = if node.is_expanded() || node.is_root() {
            node.children.len()
                + node
                    .children
                    .iter()
                    .flatten()
                    .map(|&child| self.visible_children_count(child))
                    .sum::<usize>()
        } else {
            0
        };
        node.visible_count.set(Some(count));
        count
    }

    /// Height of a single row. Uniform for every node.
    pub fn own_height(&self, _id: NodeId) -> Px {
        self.default_height()
    }

    /// Pixels occupied by `id`'s row plus its visible descendants.
    pub fn offset_height(&self, id: NodeId) -> Px {
        (self.visible_children_count(id) as Px + 1) * self.default_height()
    }

    /// Slot index of `item` within `parent`, or `None` if it is not a child.
    pub fn index_of(&self, parent: NodeId, item: NodeId) -> Option<usize> {
        let node = &self.nodes[parent];
        if let Some(&index) = node.index_cache.borrow().get(&item) {
            return Some(index);
        }
        let index = node.children.iter().position(|c| *c == Some(item))?;
        node.index_cache.borrow_mut().insert(item, index);
        Some(index)
    }

    /// Slot indices of `parent`'s expanded children, ascending.
    pub fn expanded_indices(&self, parent: NodeId) -> Waypoints {
        let mut indices: Waypoints = self.nodes[parent]
            .expanded_children
            .iter()
            .filter_map(|&child| self.index_of(parent, child))
            .collect();
        indices.sort_unstable();
        indices
    }

    /// Pixel offset of `item` relative to the top of `parent`'s children.
    pub fn child_offset(&self, parent: NodeId, item: NodeId) -> Option<Px> {
        let local = self.index_of(parent, item)?;
        let height = self.default_height();
        let mut offset = local as Px * height;
        for waypoint in self.expanded_indices(parent) {
            if waypoint >= local {
                break;
            }
            if let Some(sibling) = self.nodes[parent].children[waypoint] {
                offset += self.offset_height(sibling) - height;
            }
        }
        Some(offset)
    }

    /// Absolute pixel offset of `id` from the top of the tree. The root is at 0.
    pub fn offset(&self, id: NodeId) -> Px {
        let Some(parent) = self.nodes[id].parent else {
            return 0;
        };
        let mut offset = 0;
        if parent != self.root {
            offset += self.offset(parent) + self.default_height();
        }
        offset + self.child_offset(parent, id).unwrap_or_default()
    }

    /// Position of `id` among all visible rows. `None` for the root, which is
    /// not a row.
    pub fn flat_index(&self, id: NodeId) -> Option<usize> {
        let parent = self.nodes[id].parent?;
        let local = self.index_of(parent, id)?;
        let mut index = local;
        for waypoint in self.expanded_indices(parent) {
            if waypoint >= local {
                break;
            }
            if let Some(sibling) = self.nodes[parent].children[waypoint] {
                index += self.visible_children_count(sibling);
            }
        }
        if parent != self.root {
            index += self.flat_index(parent)? + 1;
        }
        Some(index)
    }

    /// The node whose row covers `target` px below the top of `id`'s children.
    ///
    /// A placeholder is synthesized for the slot the answer lands on; the
    /// slots walked over stay empty.
    pub fn find_item_by_offset(&mut self, id: NodeId, target: Px) -> Option<NodeId> {
        let len = self.nodes[id].children.len();
        if target < 0 || len == 0 {
            return None;
        }
        let height = self.default_height();
        let waypoints = self.expanded_indices(id);
        let mut waypoints = waypoints.into_iter().peekable();
        let mut current_index = 0;
        let mut current_offset: Px = 0;
        loop {
            while waypoints.next_if(|&w| w <= current_index).is_some() {}
            let slot = *self.nodes[id].children.get(current_index)?;
            // An empty slot cannot be expanded, so it is exactly one row.
            let current_height = slot.map_or(height, |c| self.offset_height(c));
            if target < current_offset + current_height {
                if target < current_offset + height {
                    return self.child(id, current_index);
                }
                let local = target - current_offset - height;
                return self.find_item_by_offset(slot?, local);
            }
            let end_of_current = current_offset + current_height;
            match waypoints.peek().copied() {
                Some(next)
                    if end_of_current + (next - current_index - 1) as Px * height <= target =>
                {
                    current_offset = end_of_current + (next - current_index - 1) as Px * height;
                    current_index = next;
                }
                _ => {
                    // Uniform run between here and the next waypoint.
                    let rows = ((target - end_of_current) / height) as usize;
                    return self.child(id, current_index + 1 + rows);
                }
            }
        }
    }

    /// Node at position `flat_index` among all visible rows.
    pub fn node_at_flat_index(&mut self, flat_index: usize) -> Option<NodeId> {
        if flat_index >= self.visible_children_count(self.root) {
            return None;
        }
        let target = flat_index as Px * self.default_height();
        self.find_item_by_offset(self.root, target)
    }

    /// Total height of all visible rows.
    pub fn content_height(&self) -> Px {
        self.visible_children_count(self.root) as Px * self.default_height()
    }
}
