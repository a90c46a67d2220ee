use crate::{NodeId, Tree};

impl Tree {
    /// Node in `parent[index]`, synthesizing a placeholder for an empty slot.
    /// `None` past the declared child count.
    pub fn child(&mut self, parent: NodeId, index: usize) -> Option<NodeId> {
        let slot = *self.nodes[parent].children.get(index)?;
        match slot {
            Some(child) => Some(child),
            None => {
                let child = self.alloc(parent, true);
                self.attach(parent, index, child);
                log::trace!("child: placeholder {child:?} at {parent:?}[{index}]");
                Some(child)
            }
        }
    }

    pub fn last_child(&mut self, parent: NodeId) -> Option<NodeId> {
        let len = self.nodes[parent].children.len();
        self.child(parent, len.checked_sub(1)?)
    }

    pub fn has_previous_sibling(&self, id: NodeId) -> bool {
        self.local_index(id).is_some_and(|(_, index)| index > 0)
    }

    pub fn has_next_sibling(&self, id: NodeId) -> bool {
        self.local_index(id)
            .is_some_and(|(parent, index)| index + 1 < self.nodes[parent].children.len())
    }

    pub fn previous_sibling(&mut self, id: NodeId) -> Option<NodeId> {
        let (parent, index) = self.local_index(id)?;
        self.child(parent, index.checked_sub(1)?)
    }

    pub fn next_sibling(&mut self, id: NodeId) -> Option<NodeId> {
        let (parent, index) = self.local_index(id)?;
        let sibling = self.child(parent, index + 1)?;
        // Forward walks ask for this index next.
        self.nodes[parent]
            .index_cache
            .borrow_mut()
            .insert(sibling, index + 1);
        Some(sibling)
    }

    /// Next visible row in depth-first order: first child when expanded,
    /// else next sibling, else the next row after the parent's subtree.
    ///
    /// `skip_children` treats `id` as collapsed, for callers that already
    /// walked its subtree.
    pub fn next_item(&mut self, id: NodeId, skip_children: bool) -> Option<NodeId> {
        let node = &self.nodes[id];
        if !skip_children && node.has_children() && node.is_expanded() {
            self.child(id, 0)
        } else if self.has_next_sibling(id) {
            self.next_sibling(id)
        } else if self.nodes[id].level > 0 {
            let parent = self.nodes[id].parent?;
            self.next_item(parent, true)
        } else {
            None
        }
    }

    /// Previous visible row: the deepest last visible descendant of the
    /// previous sibling, or the parent at the first position.
    pub fn previous_item(&mut self, id: NodeId) -> Option<NodeId> {
        if self.has_previous_sibling(id) {
            let mut result = self.previous_sibling(id)?;
            while self.nodes[result].has_children() && self.nodes[result].is_expanded() {
                result = self.last_child(result)?;
            }
            Some(result)
        } else if self.nodes[id].level > 0 {
            self.nodes[id].parent
        } else {
            None
        }
    }

    fn local_index(&self, id: NodeId) -> Option<(NodeId, usize)> {
        let parent = self.nodes[id].parent?;
        Some((parent, self.index_of(parent, id)?))
    }
}
